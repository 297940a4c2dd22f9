//! Querypad — an embedded SQL workspace core.
//!
//! The crate drives an embedded analytical engine through an async trait
//! seam: raw SQL goes into the run orchestrator, the query executor
//! classifies and submits it over the single engine session, and the result
//! comes back as a stable, serializable response consumed by UI, history,
//! and export collaborators.

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod history;
pub mod logging;
pub mod query;
pub mod runner;
pub mod session;
pub mod statement;
