//! Session lifecycle integration tests.
//!
//! The session cell is the one shared mutable resource in the core; these
//! tests pin down its behavior under races, failures, and restarts.

use std::sync::Arc;

use futures::future::join_all;
use querypad::engine::{Engine, MockEngine, SqliteEngine, Value};
use querypad::session::{Extension, SessionManager};

#[tokio::test]
async fn test_many_concurrent_callers_one_connect() {
    let engine = Arc::new(MockEngine::new());
    let dyn_engine: Arc<dyn Engine> = engine.clone();
    let manager = Arc::new(SessionManager::new(dyn_engine));

    let tasks: Vec<_> = (0..16)
        .map(|_| {
            let manager = Arc::clone(&manager);
            tokio::spawn(async move { manager.ensure_session().await })
        })
        .collect();

    for joined in join_all(tasks).await {
        assert!(joined.unwrap().is_ok());
    }
    assert_eq!(engine.connect_calls(), 1);
}

#[tokio::test]
async fn test_init_failure_does_not_poison_the_manager() {
    let engine = Arc::new(MockEngine::failing_connects(2));
    let dyn_engine: Arc<dyn Engine> = engine.clone();
    let manager = SessionManager::new(dyn_engine);

    assert!(manager.ensure_session().await.is_err());
    assert!(manager.ensure_session().await.is_err());
    assert!(manager.ensure_session().await.is_ok());
    assert!(manager.is_initialized());
}

#[tokio::test]
async fn test_load_extension_is_memoized() {
    let engine = Arc::new(MockEngine::new());
    let dyn_engine: Arc<dyn Engine> = engine.clone();
    let manager = Arc::new(SessionManager::new(dyn_engine));

    let tasks: Vec<_> = (0..5)
        .map(|_| {
            let manager = Arc::clone(&manager);
            tokio::spawn(async move { manager.load_extension(Extension::Json).await })
        })
        .collect();
    for joined in join_all(tasks).await {
        assert!(joined.unwrap().is_ok());
    }
    // Serial repeats after the concurrent burst stay memoized too.
    manager.load_extension(Extension::Json).await.unwrap();

    let loads = engine
        .queries()
        .into_iter()
        .filter(|q| q.starts_with("LOAD"))
        .count();
    assert_eq!(loads, 1);
}

#[tokio::test]
async fn test_distinct_extensions_load_separately() {
    let engine = Arc::new(MockEngine::new());
    let dyn_engine: Arc<dyn Engine> = engine.clone();
    let manager = SessionManager::new(dyn_engine);

    manager.load_extension(Extension::Json).await.unwrap();
    manager.load_extension(Extension::Parquet).await.unwrap();

    let loads: Vec<_> = engine
        .queries()
        .into_iter()
        .filter(|q| q.starts_with("LOAD"))
        .collect();
    assert_eq!(
        loads,
        vec!["LOAD 'json';".to_string(), "LOAD 'parquet';".to_string()]
    );
}

#[tokio::test]
async fn test_session_is_shared_state() {
    // Two callers acquiring the session see the same underlying engine state.
    let engine: Arc<dyn Engine> = Arc::new(SqliteEngine::in_memory());
    let manager = Arc::new(SessionManager::new(engine));

    let first = manager.ensure_session().await.unwrap();
    first.run("CREATE TABLE t (x INTEGER)").await.unwrap();
    first.run("INSERT INTO t VALUES (41)").await.unwrap();

    let second = manager.ensure_session().await.unwrap();
    let result = second.run("SELECT x FROM t").await.unwrap();
    assert_eq!(result.rows()[0].get("x"), Some(&Value::Int(41)));
}

#[tokio::test]
async fn test_file_backed_engine_persists_across_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("workspace.db");

    {
        let engine: Arc<dyn Engine> = Arc::new(SqliteEngine::at_path(&db_path));
        let manager = SessionManager::new(engine);
        let session = manager.ensure_session().await.unwrap();
        session.run("CREATE TABLE t (x INTEGER)").await.unwrap();
        session.run("INSERT INTO t VALUES (7)").await.unwrap();
    }

    let engine: Arc<dyn Engine> = Arc::new(SqliteEngine::at_path(&db_path));
    let manager = SessionManager::new(engine);
    let session = manager.ensure_session().await.unwrap();
    let result = session.run("SELECT x FROM t").await.unwrap();
    assert_eq!(result.rows()[0].get("x"), Some(&Value::Int(7)));
}
