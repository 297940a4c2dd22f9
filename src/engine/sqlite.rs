//! Embedded SQLite engine adapter.
//!
//! Reference implementation of the engine traits over sqlx. The pool is
//! capped at a single connection so the adapter matches the one-connection
//! resource model of the session manager.

use crate::engine::{Engine, EngineConnection, Field, NativeResult, NativeRow, Value};
use crate::error::{QuerypadError, Result};
use async_trait::async_trait;
use futures::TryStreamExt;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{Column, Either, Executor, Row, TypeInfo};
use std::path::PathBuf;
use tracing::debug;

/// Embedded SQLite engine.
#[derive(Debug, Clone, Default)]
pub struct SqliteEngine {
    /// Database file path; `None` runs fully in memory.
    path: Option<PathBuf>,
}

impl SqliteEngine {
    /// Creates an in-memory engine.
    pub fn in_memory() -> Self {
        Self { path: None }
    }

    /// Creates an engine backed by the given database file, created on demand.
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }
}

#[async_trait]
impl Engine for SqliteEngine {
    fn name(&self) -> &str {
        "sqlite"
    }

    async fn connect(&self) -> Result<Box<dyn EngineConnection>> {
        let options = match &self.path {
            Some(path) => SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(true),
            None => SqliteConnectOptions::new().in_memory(true),
        };

        // One connection, held for the process lifetime. An idle or lifetime
        // timeout would silently recycle it and lose in-memory state.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| QuerypadError::session(e.to_string()))?;

        debug!(
            database = %self.path.as_deref().map(|p| p.display().to_string()).unwrap_or_else(|| ":memory:".into()),
            "sqlite engine connected"
        );

        Ok(Box::new(SqliteEngineConnection { pool }))
    }
}

/// One open connection to the embedded SQLite engine.
struct SqliteEngineConnection {
    pool: SqlitePool,
}

#[async_trait]
impl EngineConnection for SqliteEngineConnection {
    async fn query(&self, sql: &str) -> Result<NativeResult> {
        let mut stream = sqlx::raw_sql(sql).fetch_many(&self.pool);

        let mut raw_rows: Vec<SqliteRow> = Vec::new();
        let mut rows_affected: u64 = 0;

        while let Some(step) = stream
            .try_next()
            .await
            .map_err(|e| QuerypadError::engine(format_engine_error(e)))?
        {
            match step {
                Either::Left(done) => rows_affected += done.rows_affected(),
                Either::Right(row) => raw_rows.push(row),
            }
        }
        drop(stream);

        // Mutations surface as a single count row, the implementation-defined
        // contract the executor's best-effort extraction reads.
        if raw_rows.is_empty() && rows_affected > 0 {
            return Ok(NativeResult::new(
                vec![Field::new("Count", "BIGINT")],
                vec![NativeRow::from_pairs([(
                    "Count",
                    Value::Int(rows_affected as i64),
                )])],
            ));
        }

        let fields = match raw_rows.first() {
            Some(first) => first
                .columns()
                .iter()
                .map(|col| Field::new(col.name(), col.type_info().name()))
                .collect(),
            None => self.describe_fields(sql).await,
        };

        let rows = raw_rows.iter().map(convert_row).collect();

        Ok(NativeResult::new(fields, rows))
    }

    async fn close(&self) -> Result<()> {
        self.pool.close().await;
        Ok(())
    }
}

impl SqliteEngineConnection {
    /// Recovers the column schema for a statement that produced no rows.
    /// Best effort: statements the engine cannot describe yield no fields.
    async fn describe_fields(&self, sql: &str) -> Vec<Field> {
        match (&self.pool).describe(sql).await {
            Ok(described) => described
                .columns()
                .iter()
                .map(|col| Field::new(col.name(), col.type_info().name()))
                .collect(),
            Err(_) => Vec::new(),
        }
    }
}

/// Converts a sqlx SqliteRow into the engine-agnostic native row.
fn convert_row(row: &SqliteRow) -> NativeRow {
    NativeRow::from_pairs(row.columns().iter().enumerate().map(|(i, col)| {
        (
            col.name().to_string(),
            convert_value(row, i, col.type_info().name()),
        )
    }))
}

/// Decodes a single column value by its engine-reported type tag.
fn convert_value(row: &SqliteRow, index: usize, type_name: &str) -> Value {
    match type_name.to_uppercase().as_str() {
        "BOOLEAN" | "BOOL" => row
            .try_get::<Option<bool>, _>(index)
            .ok()
            .flatten()
            .map(Value::Bool)
            .unwrap_or(Value::Null),

        "INTEGER" | "INT" | "INT4" | "INT8" | "BIGINT" => row
            .try_get::<Option<i64>, _>(index)
            .ok()
            .flatten()
            .map(Value::Int)
            .unwrap_or(Value::Null),

        "REAL" | "FLOAT" | "DOUBLE" | "NUMERIC" => row
            .try_get::<Option<f64>, _>(index)
            .ok()
            .flatten()
            .map(Value::Float)
            .unwrap_or(Value::Null),

        "BLOB" => row
            .try_get::<Option<Vec<u8>>, _>(index)
            .ok()
            .flatten()
            .map(Value::Bytes)
            .unwrap_or(Value::Null),

        // TEXT, DATETIME, and anything else the engine reports: take it as a
        // string, then fall back through the storage classes.
        _ => row
            .try_get::<Option<String>, _>(index)
            .ok()
            .flatten()
            .map(Value::String)
            .or_else(|| {
                row.try_get::<Option<i64>, _>(index)
                    .ok()
                    .flatten()
                    .map(Value::Int)
            })
            .or_else(|| {
                row.try_get::<Option<f64>, _>(index)
                    .ok()
                    .flatten()
                    .map(Value::Float)
            })
            .unwrap_or(Value::Null),
    }
}

/// Extracts the engine's own message from a sqlx error.
///
/// The pipeline shows engine messages verbatim, so database errors are
/// unwrapped rather than rendered through the sqlx error chain.
fn format_engine_error(error: sqlx::Error) -> String {
    match error.as_database_error() {
        Some(db_error) => db_error.message().to_string(),
        None => error.to_string(),
    }
}
