//! Document text store with linear undo

use crate::text_ops::{apply_operations, TextChangeAction};

/// The whole document text plus the committed changes that can be undone
#[derive(Debug, Clone)]
pub struct Document {
    text: String,
    undo_stack: Vec<TextChangeAction>,
    max_history: usize,
}

impl Default for Document {
    fn default() -> Self {
        Self::new("")
    }
}

impl Document {
    /// Create a document with default max history
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_max_history(text, 1000)
    }

    pub fn with_max_history(text: impl Into<String>, max_history: usize) -> Self {
        Self {
            text: text.into(),
            undo_stack: Vec::new(),
            max_history,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text wholesale, dropping history
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.undo_stack.clear();
    }

    /// Apply a change and record it for undo
    pub fn apply(&mut self, action: TextChangeAction) {
        if action.is_empty() {
            return;
        }
        self.text = apply_operations(&self.text, &action.ops);
        self.undo_stack.push(action);

        // Trim if exceeded max size
        while self.undo_stack.len() > self.max_history {
            self.undo_stack.remove(0);
        }
    }

    /// Revert the most recent change, returning it
    pub fn undo(&mut self) -> Option<TextChangeAction> {
        let action = self.undo_stack.pop()?;
        self.text = apply_operations(&self.text, &action.undo_ops);
        Some(action)
    }

    /// The change [`Document::undo`] would revert
    pub fn last_change(&self) -> Option<&TextChangeAction> {
        self.undo_stack.last()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }
}
