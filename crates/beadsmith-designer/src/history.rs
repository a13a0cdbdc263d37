//! Snapshot-based undo/redo history.
//!
//! Before each committed edit the caller records the state it is about to
//! leave. Undo swaps the current state for the most recent record; redo
//! reverses that. The undo stack is bounded, dropping the oldest record.

use std::collections::VecDeque;

use beadsmith_core::constants::HISTORY_DEPTH;

/// Manages bounded undo/redo stacks of state snapshots.
#[derive(Debug, Clone)]
pub struct HistoryManager<S> {
    undo_stack: VecDeque<S>,
    redo_stack: Vec<S>,
    max_depth: usize,
}

impl<S: Clone> HistoryManager<S> {
    /// Creates a history holding at most `max_depth` undo steps.
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo_stack: VecDeque::with_capacity(max_depth),
            redo_stack: Vec::new(),
            max_depth,
        }
    }

    /// Records the state in effect before an edit and clears redo.
    pub fn snapshot(&mut self, before: &S) {
        self.redo_stack.clear();
        self.push_undo(before.clone());
    }

    fn push_undo(&mut self, state: S) {
        if self.max_depth == 0 {
            return;
        }
        self.undo_stack.push_back(state);
        while self.undo_stack.len() > self.max_depth {
            self.undo_stack.pop_front();
        }
    }

    /// Returns the state to restore, moving `current` onto the redo stack.
    pub fn undo(&mut self, current: &S) -> Option<S> {
        let previous = self.undo_stack.pop_back()?;
        self.redo_stack.push(current.clone());
        Some(previous)
    }

    /// Returns the state to re-apply, moving `current` onto the undo stack.
    pub fn redo(&mut self, current: &S) -> Option<S> {
        let next = self.redo_stack.pop()?;
        self.push_undo(current.clone());
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Drops every recorded step.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

impl<S: Clone> Default for HistoryManager<S> {
    fn default() -> Self {
        Self::new(HISTORY_DEPTH)
    }
}
