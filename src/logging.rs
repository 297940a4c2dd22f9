//! Logging configuration for Querypad.
//!
//! Stderr logging for the CLI and one-shot runs; file logging for embedding
//! hosts that own the terminal (or have no terminal at all).

use std::fs::{self, File};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Initializes logging to stderr.
///
/// Honors `RUST_LOG`; defaults to `info`.
pub fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

/// Initializes logging to a file under the platform state directory.
///
/// Falls back to no logging rather than failing startup when the log
/// location cannot be created.
pub fn init_file_logging() {
    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            eprintln!("Warning: Could not create log directory: {e}");
            return;
        }
    }

    let log_file = match File::create(&log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: Could not create log file: {e}");
            return;
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .init();
}

/// Returns the log file path
/// (`~/.local/state/querypad/querypad.log` on Linux).
pub fn get_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        return state_dir.join("querypad").join("querypad.log");
    }
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("querypad").join("querypad.log");
    }
    std::env::temp_dir().join("querypad.log")
}
