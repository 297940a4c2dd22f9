//! Engine abstraction layer for Querypad.
//!
//! The embedded analytical engine is a collaborator, not part of this crate's
//! design: the pipeline drives it through the async traits defined here. One
//! reference adapter (embedded SQLite via sqlx) ships with the crate so the
//! binary works end-to-end; tests use the scripted mock.

mod mock;
mod sqlite;
mod types;

pub use mock::MockEngine;
pub use sqlite::SqliteEngine;
pub use types::{Field, NativeResult, NativeRow, Value};

use crate::error::Result;
use async_trait::async_trait;

/// An embedded engine instance: a factory for connections.
///
/// The session manager calls [`Engine::connect`] exactly once per process
/// lifetime under normal operation.
#[async_trait]
pub trait Engine: Send + Sync {
    /// Human-readable engine name, for logs.
    fn name(&self) -> &str;

    /// Opens a connection to the engine.
    async fn connect(&self) -> Result<Box<dyn EngineConnection>>;
}

/// One open engine connection.
///
/// `query` is the single round-trip the whole pipeline is built on: it takes
/// raw SQL and either yields the engine's native result or fails with an
/// engine error.
#[async_trait]
pub trait EngineConnection: Send + Sync {
    /// Submits SQL text to the engine and returns its native result.
    async fn query(&self, sql: &str) -> Result<NativeResult>;

    /// Closes the connection.
    async fn close(&self) -> Result<()>;
}
