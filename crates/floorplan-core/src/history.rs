//! Bounded linear undo/redo history over entity-list snapshots.
//!
//! `entries[0]` is the state the document was opened with. Each mutation
//! pushes the pre-mutation entity list and moves the cursor onto it, so the
//! entry at the cursor is always the state one undo step back. Undo and redo
//! exchange the live list with the entry they apply, which keeps the
//! displaced state in place for the opposite operation.

use crate::entities::Entity;
use chrono::{DateTime, Utc};

/// Maximum number of snapshots kept.
pub const MAX_HISTORY: usize = 100;

/// A deep copy of the entity list.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub entities: Vec<Entity>,
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    fn new(entities: Vec<Entity>) -> Self {
        Self {
            entities,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<HistoryEntry>,
    cursor: usize,
    limit: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    /// Empty history, as when no document is open.
    pub fn new() -> Self {
        Self::with_limit(MAX_HISTORY)
    }

    /// History bounded to `limit` entries (at least 2).
    pub fn with_limit(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            cursor: 0,
            limit: limit.max(2),
        }
    }

    /// Start over from a single snapshot of `entities`.
    pub fn reset(&mut self, entities: &[Entity]) {
        self.entries.clear();
        self.entries.push(HistoryEntry::new(entities.to_vec()));
        self.cursor = 0;
    }

    /// Drop all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }

    /// Record the state before a mutation. Discards any redo branch.
    pub fn push(&mut self, entities: &[Entity]) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(HistoryEntry::new(entities.to_vec()));
        self.cursor = self.entries.len() - 1;

        while self.entries.len() > self.limit {
            self.entries.remove(0);
            self.cursor = self.cursor.saturating_sub(1);
        }
    }

    /// Step back one mutation. Returns false at the oldest entry.
    pub fn undo(&mut self, live: &mut Vec<Entity>) -> bool {
        if !self.can_undo() {
            return false;
        }
        std::mem::swap(live, &mut self.entries[self.cursor].entities);
        self.cursor -= 1;
        true
    }

    /// Re-apply the last undone mutation. Returns false at the newest entry.
    pub fn redo(&mut self, live: &mut Vec<Entity>) -> bool {
        if !self.can_redo() {
            return false;
        }
        self.cursor += 1;
        std::mem::swap(live, &mut self.entries[self.cursor].entities);
        true
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0 && self.cursor < self.entries.len()
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }
}
