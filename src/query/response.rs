//! Public response projection.
//!
//! Converts an [`ExecutionOutcome`] into the caller-facing response shape.
//! On success the single outcome is wrapped in a one-element `data` list:
//! a deliberate seam for future multi-statement execution, and structurally
//! symmetric with the row payload itself. Single-statement callers always
//! index element zero.

use serde::{Deserialize, Serialize};

use crate::engine::Value;
use crate::query::outcome::ExecutionOutcome;

/// One normalized result inside the public response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    /// Column names, positional. Empty for non-row-returning statements.
    pub columns: Vec<String>,

    /// Engine-reported type tags, parallel to `columns`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_types: Option<Vec<String>>,

    /// Row values, each inner list parallel to `columns`.
    pub values: Vec<Vec<Value>>,

    /// Canonical uppercase statement tag ("SELECT", "INSERT", ...).
    pub statement_type: String,

    /// Number of rows returned, for row-returning statements.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_count: Option<usize>,

    /// Affected-row count, for mutating statements.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affected_rows: Option<u64>,
}

/// The caller-facing response: `data` is `None` exactly when `error` is set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QueryResponse {
    /// Normalized results; `None` on failure.
    pub data: Option<Vec<QueryResult>>,

    /// Failure message; `None` on success.
    pub error: Option<String>,

    /// Wall-clock duration of the engine call, in milliseconds.
    pub time_ms: u64,
}

impl QueryResponse {
    /// True when the execution succeeded.
    pub fn success(&self) -> bool {
        self.error.is_none()
    }
}

/// Projects an execution outcome into the public response shape. Pure, total.
pub fn project(outcome: ExecutionOutcome) -> QueryResponse {
    match outcome {
        ExecutionOutcome::Failed { error, time_ms } => QueryResponse {
            data: None,
            error: Some(error),
            time_ms,
        },

        ExecutionOutcome::Rows {
            kind,
            columns,
            column_types,
            rows,
            row_count,
            time_ms,
        } => QueryResponse {
            data: Some(vec![QueryResult {
                columns,
                column_types: Some(column_types),
                values: rows,
                statement_type: kind.as_str().to_string(),
                row_count: Some(row_count),
                affected_rows: None,
            }]),
            error: None,
            time_ms,
        },

        ExecutionOutcome::Affected {
            kind,
            affected_rows,
            time_ms,
        } => QueryResponse {
            data: Some(vec![QueryResult {
                columns: Vec::new(),
                column_types: None,
                values: Vec::new(),
                statement_type: kind.as_str().to_string(),
                row_count: None,
                affected_rows: Some(affected_rows),
            }]),
            error: None,
            time_ms,
        },

        ExecutionOutcome::Done { kind, time_ms } => QueryResponse {
            data: Some(vec![QueryResult {
                columns: Vec::new(),
                column_types: None,
                values: Vec::new(),
                statement_type: kind.as_str().to_string(),
                row_count: None,
                affected_rows: None,
            }]),
            error: None,
            time_ms,
        },
    }
}
