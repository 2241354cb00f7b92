//! Resume history — append-only, capacity-bounded log of generated résumés.
//!
//! Newest entry first; pushing past capacity evicts the oldest. Entries are
//! immutable once created and there is no update or delete operation.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::errors::AppError;

/// Most recent entries retained per session.
pub const HISTORY_CAPACITY: usize = 5;

/// One previously generated résumé.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub label: String,
}

impl HistoryEntry {
    pub fn new(content: String, label: String) -> Self {
        HistoryEntry {
            content,
            timestamp: Utc::now(),
            label,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResumeHistory {
    entries: VecDeque<HistoryEntry>,
}

impl ResumeHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepends an entry, then truncates to the `HISTORY_CAPACITY` most recent.
    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(HISTORY_CAPACITY);
    }

    /// Entry at `index` (0 = newest), or `IndexOutOfRange`.
    pub fn get(&self, index: usize) -> Result<&HistoryEntry, AppError> {
        self.entries.get(index).ok_or_else(|| AppError::IndexOutOfRange {
            field: "history".to_string(),
            index,
            len: self.entries.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }
}
