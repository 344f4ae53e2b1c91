//! # Edit History
//!
//! A linear undo timeline of whole-form snapshots.
//!
//! - `snapshot` discards everything after the cursor, then appends.
//! - At most [`HISTORY_LIMIT`] snapshots are kept; the oldest is evicted first.
//! - `undo`/`redo` move the cursor and hand back the snapshot to restore.
//! - While a snapshot is being restored (inside [`History::replay`]) any
//!   `snapshot` call is ignored, so restoring never records itself.
//!
//! The cursor is `None` only while the timeline is empty.

use crate::form::FormState;
use serde::{Deserialize, Serialize};

pub const HISTORY_LIMIT: usize = 50;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    snapshots: Vec<FormState>,
    cursor: Option<usize>,
    #[serde(skip)]
    applying: bool,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// A timeline holding a single initial snapshot.
    pub fn starting_with(initial: FormState) -> Self {
        let mut history = Self::new();
        history.snapshot(initial);
        history
    }

    /// Records `state`. Returns `false` when the call was suppressed because a
    /// snapshot is being replayed.
    pub fn snapshot(&mut self, state: FormState) -> bool {
        if self.applying {
            return false;
        }
        let keep = self.cursor.map_or(0, |c| c + 1);
        self.snapshots.truncate(keep);
        self.snapshots.push(state);
        if self.snapshots.len() > HISTORY_LIMIT {
            self.snapshots.remove(0);
        }
        self.cursor = Some(self.snapshots.len() - 1);
        true
    }

    pub fn undo(&mut self) -> Option<FormState> {
        match self.cursor {
            Some(c) if c > 0 => {
                self.cursor = Some(c - 1);
                self.snapshots.get(c - 1).cloned()
            }
            _ => None,
        }
    }

    pub fn redo(&mut self) -> Option<FormState> {
        match self.cursor {
            Some(c) if c + 1 < self.snapshots.len() => {
                self.cursor = Some(c + 1);
                self.snapshots.get(c + 1).cloned()
            }
            _ => None,
        }
    }

    /// Clears the timeline down to one snapshot of `initial`.
    pub fn reset(&mut self, initial: FormState) {
        self.snapshots.clear();
        self.cursor = None;
        self.applying = false;
        self.snapshot(initial);
    }

    /// Runs `apply` with snapshotting suppressed.
    pub fn replay<R>(&mut self, apply: impl FnOnce(&mut Self) -> R) -> R {
        let previous = std::mem::replace(&mut self.applying, true);
        let result = apply(self);
        self.applying = previous;
        result
    }

    pub fn is_applying(&self) -> bool {
        self.applying
    }

    pub fn current(&self) -> Option<&FormState> {
        self.cursor.and_then(|c| self.snapshots.get(c))
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        matches!(self.cursor, Some(c) if c > 0)
    }

    pub fn can_redo(&self) -> bool {
        matches!(self.cursor, Some(c) if c + 1 < self.snapshots.len())
    }

    /// Repairs a timeline read from disk: trims to the limit and clamps the cursor.
    pub fn normalized(mut self) -> Self {
        if self.snapshots.len() > HISTORY_LIMIT {
            let excess = self.snapshots.len() - HISTORY_LIMIT;
            self.snapshots.drain(..excess);
            self.cursor = self.cursor.map(|c| c.saturating_sub(excess));
        }
        self.cursor = match (self.snapshots.len(), self.cursor) {
            (0, _) => None,
            (len, None) => Some(len - 1),
            (len, Some(c)) => Some(c.min(len - 1)),
        };
        self.applying = false;
        self
    }
}
