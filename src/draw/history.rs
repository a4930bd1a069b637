//! Linear undo log of completed strokes.

use super::annotation::Annotation;
use serde::{Deserialize, Serialize};

/// Kind of change a history entry can revert. Only additions are recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryAction {
    Add,
}

/// One undo step: a snapshot of the annotation as it was finalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub action: HistoryAction,
    pub annotation: Annotation,
}

/// Undo stack. There is deliberately no redo log.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a finalized annotation.
    pub fn push_add(&mut self, annotation: Annotation) {
        self.entries.push(HistoryEntry {
            action: HistoryAction::Add,
            annotation,
        });
    }

    /// Removes and returns the most recent entry, if any.
    pub fn pop(&mut self) -> Option<HistoryEntry> {
        self.entries.pop()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
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
}
