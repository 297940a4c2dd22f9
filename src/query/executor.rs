//! Query execution pipeline.
//!
//! The single chokepoint every feature runs through: classify the statement,
//! submit it over the engine session, measure the round-trip, and normalize
//! the engine's native result into an [`ExecutionOutcome`]. Errors do not
//! escape `execute`; above this boundary failure is data.

use std::sync::Arc;
use std::time::Instant;

use tracing::debug;

use crate::engine::{NativeResult, Value};
use crate::error::{QuerypadError, Result};
use crate::query::outcome::ExecutionOutcome;
use crate::query::response::{self, QueryResponse};
use crate::session::SessionManager;
use crate::statement::classify;

/// Executes SQL statements against the engine session and normalizes results.
pub struct QueryExecutor {
    sessions: Arc<SessionManager>,
}

impl QueryExecutor {
    /// Creates an executor over the given session manager.
    pub fn new(sessions: Arc<SessionManager>) -> Self {
        Self { sessions }
    }

    /// The session manager this executor runs on.
    pub fn sessions(&self) -> &Arc<SessionManager> {
        &self.sessions
    }

    /// Runs one statement and returns its normalized outcome.
    ///
    /// Total over arbitrary input: malformed SQL, empty strings, and engine
    /// failures all come back as a `Failed` outcome with the elapsed time,
    /// never as an `Err` or a panic. Input is passed to the engine verbatim;
    /// the engine's own rejection is the failure path.
    pub async fn execute(&self, sql: &str) -> ExecutionOutcome {
        let start = Instant::now();
        let kind = classify(sql);

        let native = match self.round_trip(sql).await {
            Ok(native) => native,
            Err(e) => {
                let time_ms = elapsed_ms(start);
                debug!(kind = %kind, time_ms, "statement failed");
                return ExecutionOutcome::Failed {
                    error: error_message(e),
                    time_ms,
                };
            }
        };
        let time_ms = elapsed_ms(start);
        debug!(kind = %kind, time_ms, rows = native.num_rows(), "statement executed");

        if kind.is_row_returning() {
            let (columns, column_types): (Vec<String>, Vec<String>) = native
                .schema_fields()
                .iter()
                .map(|f| (f.name.clone(), f.type_name.clone()))
                .unzip();

            // Project each native row in schema order via by-name access;
            // the engine's own cell order is not trusted.
            let rows: Vec<Vec<Value>> = native
                .rows()
                .iter()
                .map(|row| {
                    columns
                        .iter()
                        .map(|col| row.get(col).cloned().unwrap_or(Value::Null))
                        .collect()
                })
                .collect();

            let row_count = rows.len();
            return ExecutionOutcome::Rows {
                kind,
                columns,
                column_types,
                rows,
                row_count,
                time_ms,
            };
        }

        if kind.is_mutating() {
            return ExecutionOutcome::Affected {
                kind,
                affected_rows: extract_affected_rows(&native),
                time_ms,
            };
        }

        ExecutionOutcome::Done { kind, time_ms }
    }

    /// Runs one statement and projects the outcome into the public response
    /// shape. The sole entry point for collaborators that want normalized
    /// results; resolves for every input, including malformed SQL.
    pub async fn run_sql(&self, sql: &str) -> QueryResponse {
        response::project(self.execute(sql).await)
    }

    async fn round_trip(&self, sql: &str) -> Result<NativeResult> {
        let session = self.sessions.ensure_session().await?;
        session.run(sql).await
    }
}

/// Best-effort affected-row count extraction.
///
/// The engine reports mutations as a single implementation-defined row
/// carrying a `Count`/`count` field. That contract is not guaranteed across
/// engine versions, so a missing field falls back to the native row count and
/// a malformed one degrades to 0 — a count extraction problem must never turn
/// a successful mutation into a reported failure. Isolated here so an
/// engine-version difference is a one-place fix.
fn extract_affected_rows(native: &NativeResult) -> u64 {
    let rows = native.rows();
    let Some(first) = rows.first() else {
        return 0;
    };

    match first.get("Count").or_else(|| first.get("count")) {
        Some(value) => value.as_u64().unwrap_or(0),
        None => rows.len() as u64,
    }
}

/// Unwraps the message for the response surface. The category wrapper is for
/// logs; callers see the engine's text verbatim.
fn error_message(error: QuerypadError) -> String {
    match error {
        QuerypadError::Session(msg)
        | QuerypadError::Engine(msg)
        | QuerypadError::Config(msg)
        | QuerypadError::Internal(msg) => msg,
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}
