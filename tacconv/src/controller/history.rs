//! Session-long log of compilation attempts.

use super::action::Mode;
use crate::error::FailureKind;
use chrono::{DateTime, Local};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    Succeeded,
    Failed { kind: FailureKind, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub at: DateTime<Local>,
    pub mode: Mode,
    /// Trimmed source that was submitted.
    pub source: String,
    pub outcome: AttemptOutcome,
}

impl HistoryEntry {
    pub fn succeeded(&self) -> bool {
        self.outcome == AttemptOutcome::Succeeded
    }
}

/// Append-only. Entries are never edited or removed.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub(crate) fn record(&mut self, mode: Mode, source: &str, outcome: AttemptOutcome) {
        self.entries.push(HistoryEntry {
            at: Local::now(),
            mode,
            source: source.to_string(),
            outcome,
        });
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    pub fn successes(&self) -> usize {
        self.entries.iter().filter(|e| e.succeeded()).count()
    }
}
