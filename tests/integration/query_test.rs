//! Query pipeline integration tests.
//!
//! Runs the full classify → session → engine → normalize pipeline against
//! the embedded SQLite engine.

use std::sync::Arc;

use querypad::engine::{Engine, SqliteEngine, Value};
use querypad::query::QueryExecutor;
use querypad::session::SessionManager;

fn sqlite_executor() -> QueryExecutor {
    let engine: Arc<dyn Engine> = Arc::new(SqliteEngine::in_memory());
    QueryExecutor::new(Arc::new(SessionManager::new(engine)))
}

#[tokio::test]
async fn test_select_round_trip() {
    let executor = sqlite_executor();

    executor
        .run_sql("CREATE TABLE users (id INTEGER, name TEXT)")
        .await;
    executor
        .run_sql("INSERT INTO users VALUES (1, 'alice'), (2, 'bob')")
        .await;

    let response = executor
        .run_sql("SELECT id, name FROM users ORDER BY id")
        .await;
    assert!(response.success());

    let data = response.data.unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0].statement_type, "SELECT");
    assert_eq!(data[0].columns, vec!["id", "name"]);
    assert_eq!(data[0].row_count, Some(2));
    assert_eq!(
        data[0].values[0],
        vec![Value::Int(1), Value::String("alice".to_string())]
    );
    assert_eq!(
        data[0].values[1],
        vec![Value::Int(2), Value::String("bob".to_string())]
    );

    // Parallel column/type sequences, every row the same width.
    let types = data[0].column_types.as_ref().unwrap();
    assert_eq!(types.len(), data[0].columns.len());
    for row in &data[0].values {
        assert_eq!(row.len(), data[0].columns.len());
    }
}

#[tokio::test]
async fn test_insert_reports_affected_rows() {
    let executor = sqlite_executor();

    executor.run_sql("CREATE TABLE t (x INTEGER)").await;
    let response = executor
        .run_sql("INSERT INTO t VALUES (1), (2), (3)")
        .await;

    assert!(response.success());
    let data = response.data.unwrap();
    assert_eq!(data[0].statement_type, "INSERT");
    assert_eq!(data[0].affected_rows, Some(3));
    assert_eq!(data[0].row_count, None);
    assert!(data[0].columns.is_empty());
}

#[tokio::test]
async fn test_update_and_delete_counts() {
    let executor = sqlite_executor();

    executor.run_sql("CREATE TABLE t (x INTEGER)").await;
    executor.run_sql("INSERT INTO t VALUES (1), (2), (3)").await;

    let update = executor.run_sql("UPDATE t SET x = 0 WHERE x > 1").await;
    assert_eq!(update.data.unwrap()[0].affected_rows, Some(2));

    let delete = executor.run_sql("DELETE FROM t").await;
    assert_eq!(delete.data.unwrap()[0].affected_rows, Some(3));
}

#[tokio::test]
async fn test_create_is_bare_success() {
    let executor = sqlite_executor();

    let response = executor.run_sql("CREATE TABLE t (x INT)").await;
    assert!(response.success());

    let data = response.data.unwrap();
    assert_eq!(data[0].statement_type, "CREATE");
    assert!(data[0].columns.is_empty());
    assert_eq!(data[0].row_count, None);
    assert_eq!(data[0].affected_rows, None);
}

#[tokio::test]
async fn test_syntax_error_is_data_not_exception() {
    let executor = sqlite_executor();

    let response = executor.run_sql("SELEC * FROM t").await;
    assert!(!response.success());
    assert!(response.data.is_none());

    let error = response.error.unwrap();
    assert!(
        error.to_lowercase().contains("syntax") || error.to_lowercase().contains("error"),
        "unexpected message: {error}"
    );
}

#[tokio::test]
async fn test_run_sql_total_over_arbitrary_input() {
    let executor = sqlite_executor();

    for sql in ["", "   ", "garbage input", "SELECT", "-- comment", "🦀"] {
        let response = executor.run_sql(sql).await;
        // Always resolves: either data or an error, never both, time always set.
        assert_eq!(response.data.is_some(), response.error.is_none(), "{sql:?}");
    }
}

#[tokio::test]
async fn test_empty_select_has_schema_but_no_rows() {
    let executor = sqlite_executor();

    executor
        .run_sql("CREATE TABLE t (id INTEGER, name TEXT)")
        .await;
    let response = executor.run_sql("SELECT id, name FROM t").await;

    let data = response.data.unwrap();
    assert_eq!(data[0].row_count, Some(0));
    assert_eq!(data[0].columns, vec!["id", "name"]);
    assert!(data[0].values.is_empty());
}

#[tokio::test]
async fn test_pragma_is_row_returning() {
    let executor = sqlite_executor();

    executor
        .run_sql("CREATE TABLE t (id INTEGER, name TEXT)")
        .await;
    let response = executor.run_sql("PRAGMA table_info(t)").await;

    assert!(response.success());
    let data = response.data.unwrap();
    assert_eq!(data[0].statement_type, "PRAGMA");
    assert_eq!(data[0].row_count, Some(2));
}

#[tokio::test]
async fn test_with_cte_classified_as_select() {
    let executor = sqlite_executor();

    let response = executor
        .run_sql("WITH nums(n) AS (SELECT 1 UNION SELECT 2) SELECT n FROM nums ORDER BY n")
        .await;

    let data = response.data.unwrap();
    assert_eq!(data[0].statement_type, "SELECT");
    assert_eq!(data[0].row_count, Some(2));
}
