//! Error types for Querypad.
//!
//! Defines the main error enum used throughout the crate. Above the query
//! executor boundary errors travel as data inside the response shape, so
//! these variants mostly surface through logs, the CLI, and direct engine
//! access by collaborators.

use thiserror::Error;

/// Main error type for Querypad operations.
#[derive(Error, Debug)]
pub enum QuerypadError {
    /// Engine session bootstrap errors (worker/module load, connect failure).
    #[error("Session error: {0}")]
    Session(String),

    /// Engine execution errors (syntax errors, constraint violations, etc.)
    #[error("Engine error: {0}")]
    Engine(String),

    /// Configuration errors (invalid config file, bad field values, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal errors (unexpected states, bugs, etc.)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl QuerypadError {
    /// Creates a session error with the given message.
    pub fn session(msg: impl Into<String>) -> Self {
        Self::Session(msg.into())
    }

    /// Creates an engine error with the given message.
    pub fn engine(msg: impl Into<String>) -> Self {
        Self::Engine(msg.into())
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates an internal error with the given message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Session(_) => "Session Error",
            Self::Engine(_) => "Engine Error",
            Self::Config(_) => "Configuration Error",
            Self::Internal(_) => "Internal Error",
        }
    }
}

/// Result type alias using QuerypadError.
pub type Result<T> = std::result::Result<T, QuerypadError>;
