//! Schema introspection integration tests.

use std::sync::Arc;

use querypad::engine::{Engine, SqliteEngine};
use querypad::query::SchemaInspector;
use querypad::session::SessionManager;

fn sqlite_inspector() -> (Arc<SessionManager>, SchemaInspector) {
    let engine: Arc<dyn Engine> = Arc::new(SqliteEngine::in_memory());
    let sessions = Arc::new(SessionManager::new(engine));
    let inspector = SchemaInspector::new(Arc::clone(&sessions));
    (sessions, inspector)
}

async fn seed(sessions: &SessionManager) {
    let session = sessions.ensure_session().await.unwrap();
    session
        .run("CREATE TABLE users (id INTEGER, name TEXT)")
        .await
        .unwrap();
    session
        .run("CREATE TABLE orders (id INTEGER, user_id INTEGER, total REAL)")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_tables_sorted() {
    let (sessions, inspector) = sqlite_inspector();
    seed(&sessions).await;

    assert_eq!(inspector.tables().await.unwrap(), vec!["orders", "users"]);
}

#[tokio::test]
async fn test_table_columns_in_declaration_order() {
    let (sessions, inspector) = sqlite_inspector();
    seed(&sessions).await;

    let columns = inspector.table_columns("orders").await.unwrap();
    let names: Vec<_> = columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["id", "user_id", "total"]);
    assert_eq!(columns[2].data_type, "REAL");
}

#[tokio::test]
async fn test_flattened_schema() {
    let (sessions, inspector) = sqlite_inspector();
    seed(&sessions).await;

    let schema = inspector.schema().await.unwrap();
    assert_eq!(schema.len(), 5);
    assert!(schema
        .iter()
        .any(|row| row.table_name == "users" && row.column_name == "name"));
}

#[tokio::test]
async fn test_table_exists() {
    let (sessions, inspector) = sqlite_inspector();
    seed(&sessions).await;

    assert!(inspector.table_exists("users").await.unwrap());
    assert!(!inspector.table_exists("missing").await.unwrap());
}

#[tokio::test]
async fn test_reset_drops_all_user_tables() {
    let (sessions, inspector) = sqlite_inspector();
    seed(&sessions).await;

    inspector.reset().await.unwrap();
    assert!(inspector.tables().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_explain_returns_plan_rows() {
    let (sessions, inspector) = sqlite_inspector();
    seed(&sessions).await;

    let plan = inspector.explain("SELECT * FROM users").await.unwrap();
    assert!(plan.num_rows() > 0);
}

#[tokio::test]
async fn test_quoted_identifier_round_trip() {
    let (sessions, inspector) = sqlite_inspector();
    let session = sessions.ensure_session().await.unwrap();
    session
        .run("CREATE TABLE \"odd name\" (x INTEGER)")
        .await
        .unwrap();

    assert!(inspector.table_exists("odd name").await.unwrap());
    let columns = inspector.table_columns("odd name").await.unwrap();
    assert_eq!(columns[0].name, "x");

    inspector.reset().await.unwrap();
    assert!(!inspector.table_exists("odd name").await.unwrap());
}
