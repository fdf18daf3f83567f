//! Diagnostic log collected while restoring a document.
//!
//! Restore passes treat broken links, unknown knob types and failed
//! expressions as recoverable: the failure is rendered into the log and the
//! pass moves on. Callers inspect the log afterwards to surface the entries
//! to the user.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};

/// One recorded diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// What was being restored, e.g. the script name of the knob involved.
    pub context: String,
    /// Human-readable description of the failure.
    pub message: String,
    /// UNIX timestamp (seconds) at which the entry was recorded.
    pub timestamp: i64,
}

/// Append-only collection of restore diagnostics.
///
/// Shared by reference between the restore passes; interior mutability keeps
/// the passes themselves free to borrow the graph immutably while reporting.
#[derive(Debug, Default)]
pub struct ErrorLog {
    entries: Mutex<Vec<LogEntry>>,
}

impl ErrorLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a diagnostic against `context`.
    pub fn append(&self, context: impl Into<String>, message: impl Into<String>) {
        let entry = LogEntry {
            context: context.into(),
            message: message.into(),
            timestamp: current_timestamp(),
        };
        self.lock().push(entry);
    }

    /// Returns a snapshot of all entries recorded so far.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<LogEntry>> {
        // A poisoned log still holds valid entries; keep collecting.
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Returns the current UNIX timestamp in seconds.
fn current_timestamp() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}
