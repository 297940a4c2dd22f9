//! Run orchestration.
//!
//! The application-facing entry point for "run whatever the user means":
//! resolves the SQL text to execute, drives the executor exactly once, and
//! fans the outcome out to status, timing, error and history state. The UI
//! layer only ever observes this module; it never touches the executor
//! directly.

use std::sync::{Mutex, RwLock};

use tracing::debug;

use crate::config::WorkspaceSettings;
use crate::history::{HistoryEntry, HistoryLog, QueryStatus};
use crate::query::{QueryExecutor, QueryResponse};

/// Zero-argument accessor returning the live editor buffer, registered by the
/// UI layer once its editor widget has mounted.
pub type EditorBuffer = Box<dyn Fn() -> String + Send + Sync>;

/// Execution status surfaced to the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunStatus {
    /// No run has happened yet.
    #[default]
    Idle,
    /// A run is in flight.
    Running,
    /// The last run succeeded.
    Ready,
    /// The last run failed.
    Error,
}

impl RunStatus {
    /// Returns the status as a string for display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Ready => "ready",
            Self::Error => "error",
        }
    }
}

/// Options for one run.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Overrides the SQL text to execute. When absent (or blank), the
    /// registered editor buffer is used, then the last cached query.
    pub query: Option<String>,
    /// Skips history recording, for system-triggered executions such as a
    /// schema refresh.
    pub skip_history: bool,
}

impl RunOptions {
    /// Options that run the given SQL text.
    pub fn with_query(sql: impl Into<String>) -> Self {
        Self {
            query: Some(sql.into()),
            skip_history: false,
        }
    }

    /// Same options, with history recording disabled.
    pub fn skipping_history(mut self) -> Self {
        self.skip_history = true;
        self
    }
}

/// Shared run state observed by the UI: status plus the latest result.
#[derive(Debug, Clone, Default)]
pub struct RunState {
    pub status: RunStatus,
    pub error: Option<String>,
    pub response: Option<QueryResponse>,
    pub time_ms: Option<u64>,
}

/// What a `run` call hands back to its caller.
#[derive(Debug, Clone)]
pub struct RunResult {
    pub success: bool,
    pub response: QueryResponse,
}

/// Orchestrates query runs and keeps workspace state in sync.
///
/// Overlapping runs are not serialized; the last writer wins on the shared
/// state. Within one run the status transitions are strictly ordered and a
/// terminal state is always reached.
pub struct RunOrchestrator {
    executor: QueryExecutor,
    settings: WorkspaceSettings,
    state: Mutex<RunState>,
    history: Mutex<HistoryLog>,
    editor: RwLock<Option<EditorBuffer>>,
    last_query: Mutex<String>,
}

impl RunOrchestrator {
    /// Creates an orchestrator over the given executor.
    pub fn new(executor: QueryExecutor, settings: WorkspaceSettings) -> Self {
        Self {
            executor,
            settings,
            state: Mutex::new(RunState::default()),
            history: Mutex::new(HistoryLog::new()),
            editor: RwLock::new(None),
            last_query: Mutex::new(String::new()),
        }
    }

    /// Resolves the SQL to run, executes it exactly once, and updates
    /// status, timing, error and history state.
    ///
    /// Never retries and never fails at the call boundary; the outcome is
    /// encoded in the returned response.
    pub async fn run(&self, options: RunOptions) -> RunResult {
        let sql = self.resolve_query_text(options.query.as_deref());
        debug!(chars = sql.len(), skip_history = options.skip_history, "run started");

        {
            let mut state = self.state.lock().unwrap();
            state.status = RunStatus::Running;
            state.error = None;
            state.response = None;
            state.time_ms = None;
        }
        *self.last_query.lock().unwrap() = sql.clone();

        let response = self.executor.run_sql(&sql).await;
        let success = response.success();

        {
            let mut state = self.state.lock().unwrap();
            state.status = if success {
                RunStatus::Ready
            } else {
                RunStatus::Error
            };
            state.error = response.error.clone();
            state.time_ms = Some(response.time_ms);
            state.response = Some(response.clone());
        }

        if !options.skip_history && self.settings.auto_save_history {
            let status = if success {
                QueryStatus::Success
            } else {
                QueryStatus::Error
            };
            self.history.lock().unwrap().record(sql, status);
        }

        RunResult { success, response }
    }

    /// Registers the live editor buffer accessor.
    pub fn register_editor(&self, accessor: impl Fn() -> String + Send + Sync + 'static) {
        *self.editor.write().unwrap() = Some(Box::new(accessor));
    }

    /// Unregisters the editor buffer accessor (editor unmounted).
    pub fn unregister_editor(&self) {
        *self.editor.write().unwrap() = None;
    }

    /// A snapshot of the current run state.
    pub fn state(&self) -> RunState {
        self.state.lock().unwrap().clone()
    }

    /// History entries, most recent first.
    pub fn history_entries(&self) -> Vec<HistoryEntry> {
        self.history.lock().unwrap().entries().cloned().collect()
    }

    /// Clears the query history.
    pub fn clear_history(&self) {
        self.history.lock().unwrap().clear();
    }

    /// Explicit non-blank query > live editor buffer > last cached query.
    ///
    /// The loose fallback chain exists because the editor is an external
    /// collaborator that may not have mounted yet when a run is triggered
    /// programmatically.
    fn resolve_query_text(&self, explicit: Option<&str>) -> String {
        if let Some(query) = explicit {
            if !query.trim().is_empty() {
                return query.to_string();
            }
        }
        if let Some(editor) = self.editor.read().unwrap().as_ref() {
            return editor();
        }
        self.last_query.lock().unwrap().clone()
    }
}
