//! Run orchestration integration tests.
//!
//! Drives the orchestrator end-to-end over the embedded SQLite engine the
//! way the UI layer would: editor buffer, status surface, history.

use std::sync::Arc;

use querypad::config::WorkspaceSettings;
use querypad::engine::{Engine, SqliteEngine};
use querypad::history::QueryStatus;
use querypad::query::QueryExecutor;
use querypad::runner::{RunOptions, RunOrchestrator, RunStatus};
use querypad::session::SessionManager;

fn sqlite_orchestrator(settings: WorkspaceSettings) -> RunOrchestrator {
    let engine: Arc<dyn Engine> = Arc::new(SqliteEngine::in_memory());
    let executor = QueryExecutor::new(Arc::new(SessionManager::new(engine)));
    RunOrchestrator::new(executor, settings)
}

#[tokio::test]
async fn test_editor_driven_run() {
    let orchestrator = sqlite_orchestrator(WorkspaceSettings::default());
    orchestrator.register_editor(|| "SELECT 1 AS one".to_string());

    let result = orchestrator.run(RunOptions::default()).await;
    assert!(result.success);

    let data = result.response.data.unwrap();
    assert_eq!(data[0].columns, vec!["one"]);
    assert_eq!(data[0].row_count, Some(1));
}

#[tokio::test]
async fn test_history_records_successes_and_errors() {
    let orchestrator = sqlite_orchestrator(WorkspaceSettings::default());

    orchestrator
        .run(RunOptions::with_query("CREATE TABLE t (x INT)"))
        .await;
    orchestrator
        .run(RunOptions::with_query("SELEC * FROM t"))
        .await;

    let history = orchestrator.history_entries();
    assert_eq!(history.len(), 2);
    // Most recent first.
    assert_eq!(history[0].query, "SELEC * FROM t");
    assert_eq!(history[0].status, QueryStatus::Error);
    assert_eq!(history[1].query, "CREATE TABLE t (x INT)");
    assert_eq!(history[1].status, QueryStatus::Success);
}

#[tokio::test]
async fn test_system_runs_skip_history() {
    let orchestrator = sqlite_orchestrator(WorkspaceSettings::default());

    // A schema refresh style run should leave no trace.
    let result = orchestrator
        .run(RunOptions::with_query("SELECT name FROM sqlite_master").skipping_history())
        .await;
    assert!(result.success);
    assert!(orchestrator.history_entries().is_empty());
}

#[tokio::test]
async fn test_status_surface_tracks_outcome() {
    let orchestrator = sqlite_orchestrator(WorkspaceSettings::default());
    assert_eq!(orchestrator.state().status, RunStatus::Idle);

    orchestrator.run(RunOptions::with_query("SELECT 1")).await;
    let state = orchestrator.state();
    assert_eq!(state.status, RunStatus::Ready);
    assert!(state.error.is_none());
    assert!(state.time_ms.is_some());

    orchestrator.run(RunOptions::with_query("SELEC 1")).await;
    let state = orchestrator.state();
    assert_eq!(state.status, RunStatus::Error);
    assert!(state.error.is_some());
    assert!(state.time_ms.is_some());
}

#[tokio::test]
async fn test_clear_history() {
    let orchestrator = sqlite_orchestrator(WorkspaceSettings::default());
    orchestrator.run(RunOptions::with_query("SELECT 1")).await;
    assert_eq!(orchestrator.history_entries().len(), 1);

    orchestrator.clear_history();
    assert!(orchestrator.history_entries().is_empty());
}

#[tokio::test]
async fn test_run_sequence_shares_one_engine_session() {
    let orchestrator = sqlite_orchestrator(WorkspaceSettings::default());

    orchestrator
        .run(RunOptions::with_query("CREATE TABLE t (x INTEGER)"))
        .await;
    orchestrator
        .run(RunOptions::with_query("INSERT INTO t VALUES (1), (2)"))
        .await;
    let result = orchestrator
        .run(RunOptions::with_query("SELECT count(*) AS n FROM t"))
        .await;

    let data = result.response.data.unwrap();
    assert_eq!(data[0].row_count, Some(1));
}
