//! Undo history: a bounded stack of full-surface snapshots.
//!
//! A snapshot is pushed at every stroke start and popped on an undo request.
//! Capacity is fixed; pushing past it drops the oldest snapshot, never the
//! newest. A clear-all commit resets the stack outright — past the clear
//! point there is nothing meaningful to undo back to.

#[cfg(test)]
#[path = "undo_test.rs"]
mod undo_test;

use std::collections::VecDeque;

use crate::consts::UNDO_DEPTH;
use crate::surface::Snapshot;

/// Bounded FIFO-evicting snapshot stack.
#[derive(Debug, Default)]
pub struct UndoStack {
    snapshots: VecDeque<Snapshot>,
}

impl UndoStack {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a snapshot, evicting the oldest when over capacity.
    pub fn push(&mut self, snapshot: Snapshot) {
        if self.snapshots.len() == UNDO_DEPTH {
            self.snapshots.pop_front();
        }
        self.snapshots.push_back(snapshot);
    }

    /// Pop the most recent snapshot. `None` means nothing to undo.
    pub fn pop(&mut self) -> Option<Snapshot> {
        self.snapshots.pop_back()
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.snapshots.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Drop every snapshot (clear-all commit).
    pub fn reset(&mut self) {
        self.snapshots.clear();
    }
}
