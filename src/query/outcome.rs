//! Canonical internal result of running one statement.
//!
//! One variant per behavioral category, so the shape invariants hold by
//! construction: row payloads exist only for row-returning statements,
//! affected counts only for mutations, and a failure carries a message and
//! nothing else. `time_ms` is always present.

use crate::engine::Value;
use crate::statement::StatementKind;

/// The outcome of one executed statement, prior to public projection.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionOutcome {
    /// Row-returning statements: the rows are the answer.
    Rows {
        kind: StatementKind,
        /// Unique column names, positional.
        columns: Vec<String>,
        /// Engine-reported type tags, parallel to `columns`.
        column_types: Vec<String>,
        /// Each inner row has exactly `columns.len()` values.
        rows: Vec<Vec<Value>>,
        row_count: usize,
        time_ms: u64,
    },

    /// Mutating statements: only the affected-row count survives.
    Affected {
        kind: StatementKind,
        affected_rows: u64,
        time_ms: u64,
    },

    /// Bare statements (DDL, transactions, settings): success, no payload.
    Done { kind: StatementKind, time_ms: u64 },

    /// Engine failure; reports as `StatementKind::Error`.
    Failed { error: String, time_ms: u64 },
}

impl ExecutionOutcome {
    /// True unless the engine call failed.
    pub fn success(&self) -> bool {
        !matches!(self, Self::Failed { .. })
    }

    /// The statement kind the outcome reports.
    pub fn statement_kind(&self) -> StatementKind {
        match self {
            Self::Rows { kind, .. } | Self::Affected { kind, .. } | Self::Done { kind, .. } => {
                *kind
            }
            Self::Failed { .. } => StatementKind::Error,
        }
    }

    /// Wall-clock duration of the engine call, in milliseconds.
    pub fn time_ms(&self) -> u64 {
        match self {
            Self::Rows { time_ms, .. }
            | Self::Affected { time_ms, .. }
            | Self::Done { time_ms, .. }
            | Self::Failed { time_ms, .. } => *time_ms,
        }
    }

    /// The failure message, if any.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed { error, .. } => Some(error),
            _ => None,
        }
    }
}
