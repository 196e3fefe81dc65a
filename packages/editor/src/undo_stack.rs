//! # Undo/Redo Stack
//!
//! Tracks persisted edits so they can be reverted.
//!
//! ## Design
//!
//! - Each revision records the raw paragraph texts before and after an edit
//! - Undo restores `before` and moves the revision to the redo stack
//! - Redo restores `after`
//! - New revisions clear the redo stack
//! - History is bounded; the oldest revision is dropped first

use std::collections::VecDeque;

/// One recorded edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Revision {
    /// Raw paragraphs before the edit
    pub before: Vec<String>,

    /// Raw paragraphs after the edit
    pub after: Vec<String>,

    pub description: Option<String>,
}

impl Revision {
    pub fn new(before: Vec<String>, after: Vec<String>) -> Self {
        Self {
            before,
            after,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Undo/redo history for one document
#[derive(Debug)]
pub struct UndoStack {
    undo_stack: VecDeque<Revision>,
    redo_stack: Vec<Revision>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,
}

impl UndoStack {
    /// Create a new undo stack with default max levels (100)
    pub fn new() -> Self {
        Self::with_max_levels(100)
    }

    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            max_levels,
        }
    }

    /// Record a new edit. Clears the redo stack.
    pub fn push(&mut self, revision: Revision) {
        self.undo_stack.push_back(revision);

        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.pop_front();
        }

        self.redo_stack.clear();
    }

    /// Take the revision to undo
    pub fn pop_undo(&mut self) -> Option<Revision> {
        self.undo_stack.pop_back()
    }

    /// Take the revision to redo
    pub fn pop_redo(&mut self) -> Option<Revision> {
        self.redo_stack.pop()
    }

    /// Record that a revision was undone
    pub fn push_redo(&mut self, revision: Revision) {
        self.redo_stack.push(revision);
    }

    /// Put back a redone revision without touching the redo stack
    pub fn push_undone(&mut self, revision: Revision) {
        self.undo_stack.push_back(revision);
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    /// Clear all undo/redo history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// Get description of the next undo operation
    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack
            .back()
            .and_then(|revision| revision.description.as_deref())
    }

    /// Get description of the next redo operation
    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack
            .last()
            .and_then(|revision| revision.description.as_deref())
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}
