//! Configuration management for Querypad.
//!
//! Loads workspace and engine settings from a TOML file with environment
//! variable overrides. Preferences are read once at startup; the composition
//! root hands them to the components that need them.

use crate::error::{QuerypadError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure for Querypad.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Workspace preferences.
    #[serde(default)]
    pub workspace: WorkspaceSettings,

    /// Embedded engine settings.
    #[serde(default)]
    pub engine: EngineConfig,
}

/// User-facing workspace preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceSettings {
    /// Record executed queries in history.
    #[serde(default = "default_true")]
    pub auto_save_history: bool,

    /// Show execution time next to results.
    #[serde(default = "default_true")]
    pub show_execution_time: bool,
}

fn default_true() -> bool {
    true
}

impl Default for WorkspaceSettings {
    fn default() -> Self {
        Self {
            auto_save_history: true,
            show_execution_time: true,
        }
    }
}

/// Embedded engine settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EngineConfig {
    /// Database file path; the engine runs in memory when unset.
    pub database: Option<PathBuf>,

    /// Extension names to load once the session is up.
    #[serde(default)]
    pub extensions: Vec<String>,
}

impl Config {
    /// Loads configuration from a TOML file.
    ///
    /// A missing file yields the defaults; an unreadable or invalid file is
    /// a configuration error.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .map_err(|e| QuerypadError::config(format!("Cannot read {}: {e}", path.display())))?;

        toml::from_str(&contents).map_err(|e| {
            QuerypadError::config(format!("Invalid config file {}: {e}", path.display()))
        })
    }

    /// Returns the default config file path
    /// (`~/.config/querypad/config.toml` on Linux).
    pub fn default_path() -> PathBuf {
        if let Some(config_dir) = dirs::config_dir() {
            return config_dir.join("querypad").join("config.toml");
        }
        PathBuf::from("querypad.toml")
    }

    /// Applies environment variable overrides on top of the file values.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(path) = std::env::var("QUERYPAD_DATABASE") {
            if !path.is_empty() {
                self.engine.database = Some(PathBuf::from(path));
            }
        }
        if let Ok(value) = std::env::var("QUERYPAD_AUTO_SAVE_HISTORY") {
            if let Ok(flag) = value.parse() {
                self.workspace.auto_save_history = flag;
            }
        }
    }
}
