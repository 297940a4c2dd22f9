//! Query history for the workspace.
//!
//! Session-scoped, append-only log of executed queries with a capacity cap.
//! Entries are kept most-recent-first; the cap drops the oldest.

use std::collections::VecDeque;
use std::time::SystemTime;

/// Maximum number of retained history entries.
pub const MAX_HISTORY_ENTRIES: usize = 200;

/// How an executed query ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    Success,
    Error,
}

impl QueryStatus {
    /// Returns the status as a string for display and persistence.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// One executed query.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    /// The SQL text as it was executed.
    pub query: String,
    /// When the execution completed.
    pub timestamp: SystemTime,
    /// Whether the execution succeeded.
    pub status: QueryStatus,
}

/// Capped query log, most-recent-first.
#[derive(Debug, Default)]
pub struct HistoryLog {
    entries: VecDeque<HistoryEntry>,
}

impl HistoryLog {
    /// Creates an empty history log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an executed query. Blank queries are skipped.
    pub fn record(&mut self, query: impl Into<String>, status: QueryStatus) {
        let query = query.into();
        if query.trim().is_empty() {
            return;
        }

        self.entries.push_front(HistoryEntry {
            query,
            timestamp: SystemTime::now(),
            status,
        });
        self.entries.truncate(MAX_HISTORY_ENTRIES);
    }

    /// Entries, most recent first.
    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Number of retained entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no entries are retained.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
