//! # Undo/Redo History
//!
//! Tracks full-document snapshots and enables undo/redo by replacing the
//! current form with a stored copy.
//!
//! ## Design
//!
//! - A single list of entries plus a cursor pointing at the entry that
//!   matches the live form
//! - Capturing drops any entries after the cursor (the undone "future"),
//!   appends a copy of the form and moves the cursor to it
//! - Beyond `max_entries` the oldest entry is evicted
//! - Entries are owned clones: editing the live form never changes history,
//!   and a restored form never aliases an entry
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut history = History::new();
//! history.capture(&form);
//! form.title = "Edited".into();
//! history.capture(&form);
//!
//! let previous = history.undo().unwrap();
//! let again = history.redo().unwrap();
//! ```

use chrono::{DateTime, Utc};
use formsmith_model::Form;
use tracing::debug;

/// Default number of snapshots kept
pub const DEFAULT_MAX_HISTORY: usize = 50;

/// One immutable snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub form: Form,
    pub timestamp: DateTime<Utc>,
}

/// Bounded linear snapshot history
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<HistoryEntry>,

    /// Index of the entry matching the live form, `None` when empty
    cursor: Option<usize>,

    /// Maximum number of entries (0 = unlimited)
    max_entries: usize,
}

impl History {
    /// Create a history with the default bound (50)
    pub fn new() -> Self {
        Self::with_max_entries(DEFAULT_MAX_HISTORY)
    }

    pub fn with_max_entries(max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            cursor: None,
            max_entries,
        }
    }

    /// Record a copy of `form` as the newest entry
    pub fn capture(&mut self, form: &Form) {
        // New edits invalidate the undone future
        let keep = self.cursor.map_or(0, |c| c + 1);
        self.entries.truncate(keep);

        self.entries.push(HistoryEntry {
            form: form.clone(),
            timestamp: formsmith_model::now(),
        });

        if self.max_entries > 0 && self.entries.len() > self.max_entries {
            self.entries.remove(0);
        }

        self.cursor = Some(self.entries.len() - 1);
        debug!(entries = self.entries.len(), "Captured history snapshot");
    }

    /// Step back one entry and return a copy of it
    pub fn undo(&mut self) -> Option<Form> {
        let cursor = self.cursor.filter(|c| *c > 0)?;
        self.cursor = Some(cursor - 1);
        Some(self.entries[cursor - 1].form.clone())
    }

    /// Step forward one entry and return a copy of it
    pub fn redo(&mut self) -> Option<Form> {
        let next = self.cursor.map_or(0, |c| c + 1);
        if self.cursor.is_none() || next >= self.entries.len() {
            return None;
        }
        self.cursor = Some(next);
        Some(self.entries[next].form.clone())
    }

    pub fn can_undo(&self) -> bool {
        self.cursor.is_some_and(|c| c > 0)
    }

    pub fn can_redo(&self) -> bool {
        self.cursor.is_some_and(|c| c + 1 < self.entries.len())
    }

    /// Cursor position, `None` for an empty history
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Cursor as a signed index, `-1` for an empty history
    pub fn index(&self) -> isize {
        self.cursor.map_or(-1, |c| c as isize)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Drop all entries (start of a new document lineage)
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}
