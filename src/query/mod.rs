//! Query execution and result normalization.
//!
//! The core of the workspace: raw SQL goes in, a stable normalized response
//! comes out. Everything else (runner, history, export, schema viewer) sits
//! on top of this module.

mod executor;
mod outcome;
mod response;
mod schema;

pub use executor::QueryExecutor;
pub use outcome::ExecutionOutcome;
pub use response::{project, QueryResponse, QueryResult};
pub use schema::{SchemaInspector, SchemaRow, TableColumn};
