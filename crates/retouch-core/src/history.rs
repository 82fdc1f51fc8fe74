//! Undo and redo snapshot stacks.
//!
//! Each entry is a full [`ImageBuffer`] copy. The most recent entry is at the
//! back of each stack. With a limit set, recording past the limit evicts the
//! oldest undo entry.

use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::buffer::ImageBuffer;

/// Undo and redo stacks of image snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    undo: VecDeque<ImageBuffer>,
    redo: Vec<ImageBuffer>,
    limit: Option<usize>,
}

impl History {
    /// Unbounded history.
    pub fn new() -> Self {
        Self::default()
    }

    /// History that keeps at most `limit` undo entries. `Some(0)` is treated
    /// as a limit of one.
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            limit: limit.map(|n| n.max(1)),
            ..Self::default()
        }
    }

    /// Maximum undo depth, if any.
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Record the state that a committing edit replaces.
    ///
    /// Pushes `previous` onto the undo stack and clears the redo stack.
    pub fn record(&mut self, previous: ImageBuffer) {
        if !self.redo.is_empty() {
            trace!(dropped = self.redo.len(), "clearing redo stack");
            self.redo.clear();
        }
        self.push_undo(previous);
    }

    /// Push onto the undo stack without touching the redo stack.
    pub fn push_undo(&mut self, snapshot: ImageBuffer) {
        self.undo.push_back(snapshot);
        if let Some(limit) = self.limit {
            while self.undo.len() > limit {
                self.undo.pop_front();
                debug!(limit, "history limit reached, evicted oldest snapshot");
            }
        }
        trace!(undo = self.undo.len(), redo = self.redo.len(), "push undo");
    }

    /// Take the most recent undo snapshot.
    pub fn pop_undo(&mut self) -> Option<ImageBuffer> {
        self.undo.pop_back()
    }

    /// Push a snapshot onto the redo stack.
    pub fn push_redo(&mut self, snapshot: ImageBuffer) {
        self.redo.push(snapshot);
        trace!(undo = self.undo.len(), redo = self.redo.len(), "push redo");
    }

    /// Take the most recent redo snapshot.
    pub fn pop_redo(&mut self) -> Option<ImageBuffer> {
        self.redo.pop()
    }

    /// Number of undo snapshots.
    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    /// Number of redo snapshots.
    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Most recent undo entry, if any.
    pub fn peek_undo(&self) -> Option<&ImageBuffer> {
        self.undo.back()
    }

    /// Drop every entry from both stacks. The limit is kept.
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
