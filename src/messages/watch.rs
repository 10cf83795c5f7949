//! Watch messages - file changes in, reload outcomes out

use chrono::{DateTime, Local};

/// One coalesced notification for the watched file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileChange {
    Write,
    Create,
    Other,
}

impl FileChange {
    /// Only writes and creates schedule a reparse
    pub fn triggers_reload(self) -> bool {
        matches!(self, FileChange::Write | FileChange::Create)
    }
}

/// Outcomes sent from the reload path to the App layer
#[derive(Debug, Clone)]
pub enum WatchEvent {
    /// Debounce timer fired, reparse starting
    ReloadStarted { at: DateTime<Local> },
    /// New document installed in the store
    Reloaded { count: usize, at: DateTime<Local> },
    /// File could not be read, last good document kept
    ReloadFailed { message: String, at: DateTime<Local> },
    /// The notification channel itself reported an error
    WatchFailed { message: String },
}
