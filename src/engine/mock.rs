//! Mock engine for testing.
//!
//! A scripted in-memory engine with call counters, so tests can assert how
//! many times the pipeline connected, what SQL it submitted, and how it
//! behaves under injected failures.

use crate::engine::{Engine, EngineConnection, Field, NativeResult, NativeRow, Value};
use crate::error::{QuerypadError, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct MockState {
    connect_calls: AtomicUsize,
    connect_failures_remaining: AtomicUsize,
    queries: Mutex<Vec<String>>,
    canned_result: Mutex<Option<NativeResult>>,
    query_error: Mutex<Option<String>>,
}

/// A mock engine that returns scripted results.
#[derive(Default)]
pub struct MockEngine {
    state: Arc<MockState>,
}

impl MockEngine {
    /// Creates a mock engine with default canned behavior: row-returning
    /// statements get a one-row result, mutations get a `{Count: 1}` row,
    /// everything else gets an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock engine that answers every query with the given result.
    pub fn with_result(result: NativeResult) -> Self {
        let engine = Self::new();
        *engine.state.canned_result.lock().unwrap() = Some(result);
        engine
    }

    /// Creates a mock engine that fails every query with the given message.
    pub fn with_query_error(message: impl Into<String>) -> Self {
        let engine = Self::new();
        *engine.state.query_error.lock().unwrap() = Some(message.into());
        engine
    }

    /// Creates a mock engine whose first `count` connect attempts fail.
    pub fn failing_connects(count: usize) -> Self {
        let engine = Self::new();
        engine
            .state
            .connect_failures_remaining
            .store(count, Ordering::SeqCst);
        engine
    }

    /// Number of times `connect` was invoked.
    pub fn connect_calls(&self) -> usize {
        self.state.connect_calls.load(Ordering::SeqCst)
    }

    /// All SQL text submitted to the engine, in order.
    pub fn queries(&self) -> Vec<String> {
        self.state.queries.lock().unwrap().clone()
    }

    /// Number of queries submitted to the engine.
    pub fn query_count(&self) -> usize {
        self.state.queries.lock().unwrap().len()
    }
}

#[async_trait]
impl Engine for MockEngine {
    fn name(&self) -> &str {
        "mock"
    }

    async fn connect(&self) -> Result<Box<dyn EngineConnection>> {
        self.state.connect_calls.fetch_add(1, Ordering::SeqCst);

        let failed = self
            .state
            .connect_failures_remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |remaining| {
                remaining.checked_sub(1)
            })
            .is_ok();
        if failed {
            return Err(QuerypadError::session("mock engine refused to start"));
        }

        Ok(Box::new(MockConnection {
            state: Arc::clone(&self.state),
        }))
    }
}

struct MockConnection {
    state: Arc<MockState>,
}

#[async_trait]
impl EngineConnection for MockConnection {
    async fn query(&self, sql: &str) -> Result<NativeResult> {
        self.state.queries.lock().unwrap().push(sql.to_string());

        if let Some(message) = self.state.query_error.lock().unwrap().clone() {
            return Err(QuerypadError::engine(message));
        }
        if let Some(result) = self.state.canned_result.lock().unwrap().clone() {
            return Ok(result);
        }

        Ok(default_response(sql))
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

/// Default scripted behavior, keyed on the leading keyword the way a real
/// engine shapes its results (the mock deliberately does not reuse the
/// pipeline's own classifier).
fn default_response(sql: &str) -> NativeResult {
    let upper = sql.trim().to_uppercase();

    if upper.starts_with("SELECT")
        || upper.starts_with("WITH")
        || upper.starts_with("SHOW")
        || upper.starts_with("DESC")
        || upper.starts_with("EXPLAIN")
        || upper.starts_with("PRAGMA")
    {
        return NativeResult::new(
            vec![Field::new("result", "TEXT")],
            vec![NativeRow::from_pairs([(
                "result",
                Value::String(format!("mock result for: {sql}")),
            )])],
        );
    }

    if upper.starts_with("INSERT") || upper.starts_with("UPDATE") || upper.starts_with("DELETE") {
        return NativeResult::new(
            vec![Field::new("Count", "BIGINT")],
            vec![NativeRow::from_pairs([("Count", Value::Int(1))])],
        );
    }

    NativeResult::empty()
}
