//! Undo/redo log of ledger updates.

use chrono::{DateTime, Utc};

use crate::action::ActionKind;
use crate::ledger::{LedgerChange, UsageDelta};

/// One recorded ledger update.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HistoryEntry {
    /// Snapshot of every counter of the touched pools before the update.
    pub before: UsageDelta,
    /// Counters changed by the update.
    pub after: UsageDelta,
    pub action: ActionKind,
    pub annotation: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(change: LedgerChange, action: ActionKind, annotation: Option<String>) -> Self {
        Self {
            before: change.before,
            after: change.after,
            action,
            annotation,
            recorded_at: Utc::now(),
        }
    }

    pub fn message(&self) -> String {
        self.action.message(self.annotation.as_deref())
    }
}

/// Linear history with a cursor.
///
/// Entries `[0, current)` are done, `[current, len)` can be redone. Recording
/// a new entry discards the redo tail.
#[derive(Clone, Debug, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
    current: usize,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, entry: HistoryEntry) {
        self.entries.truncate(self.current);
        self.entries.push(entry);
        self.current += 1;
    }

    /// Move the cursor back and return the snapshot to restore.
    pub fn step_back(&mut self) -> Option<&UsageDelta> {
        if self.current == 0 {
            return None;
        }
        self.current -= 1;
        Some(&self.entries[self.current].before)
    }

    /// Move the cursor forward and return the delta to re-apply.
    pub fn step_forward(&mut self) -> Option<&UsageDelta> {
        let entry = self.entries.get(self.current)?;
        self.current += 1;
        Some(&entry.after)
    }

    pub fn undo_possible(&self) -> bool {
        self.current > 0
    }

    pub fn redo_possible(&self) -> bool {
        self.current < self.entries.len()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
