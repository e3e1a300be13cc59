//! Primitive string splicing for document changes.
//!
//! A [`TextChangeAction`] pairs the operations that perform a change with
//! the operations that revert it, so the document store can undo by replaying
//! `undo_ops`. All offsets are character offsets into the whole document.

use serde::{Deserialize, Serialize};

use crate::error::EditError;
use crate::util::text::{char_boundaries, char_len, char_slice, match_char_indices};

/// Replace `[start_index, end_index)` with `replacement`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    pub start_index: usize,
    pub end_index: usize,
    pub replacement: String,
}

impl Operation {
    pub fn new(start_index: usize, end_index: usize, replacement: impl Into<String>) -> Self {
        Self {
            start_index,
            end_index,
            replacement: replacement.into(),
        }
    }
}

/// A document change and its inverse
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextChangeAction {
    pub ops: Vec<Operation>,
    pub undo_ops: Vec<Operation>,
}

impl TextChangeAction {
    /// The action that reverts this one
    pub fn inverse(&self) -> Self {
        Self {
            ops: self.undo_ops.clone(),
            undo_ops: self.ops.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

/// Search target for replace-all
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    /// Plain text, matched exactly
    Literal(String),
    /// Regular expression source (not supported yet)
    Regex(String),
}

impl From<&str> for Pattern {
    fn from(s: &str) -> Self {
        Pattern::Literal(s.to_string())
    }
}

/// Apply `ops` to `text`.
///
/// Ops must be ascending and non-overlapping, with offsets into the original
/// `text` (not into the partially edited result). Offsets past the end are
/// clamped; an op that overlaps its predecessor starts where the predecessor
/// ended.
pub fn apply_operations(text: &str, ops: &[Operation]) -> String {
    if ops.is_empty() {
        return text.to_string();
    }

    let bounds = char_boundaries(text);
    let last = bounds.len() - 1;
    let byte = |i: usize| bounds[i.min(last)];

    let mut result = String::with_capacity(text.len());
    let mut cursor = 0;
    for op in ops {
        let start = op.start_index.max(cursor).min(last);
        let end = op.end_index.max(start).min(last);
        result.push_str(&text[byte(cursor)..byte(start)]);
        result.push_str(&op.replacement);
        cursor = end;
    }
    result.push_str(&text[byte(cursor)..]);
    result
}

/// Build the action replacing `[start_index, end_index)` with `replacement`
pub fn make_range_change(
    text: &str,
    start_index: usize,
    end_index: usize,
    replacement: &str,
) -> TextChangeAction {
    let undo_replacement = char_slice(text, start_index, end_index);
    let undo_end = start_index + char_len(replacement);

    TextChangeAction {
        ops: vec![Operation::new(start_index, end_index, replacement)],
        undo_ops: vec![Operation::new(start_index, undo_end, undo_replacement)],
    }
}

/// Build the action replacing every non-overlapping occurrence of `pattern`.
///
/// Undo ops point into the changed text, so each one is shifted by the
/// length difference accumulated from the replacements before it.
pub fn make_replace_all_change(
    text: &str,
    pattern: &Pattern,
    replacement: &str,
) -> Result<TextChangeAction, EditError> {
    let target = match pattern {
        Pattern::Literal(target) => target,
        Pattern::Regex(source) => return Err(EditError::UnsupportedPattern(source.clone())),
    };

    let target_len = char_len(target);
    let replacement_len = char_len(replacement);

    let mut action = TextChangeAction::default();
    // End of the previous match in the original text and in the changed text
    let mut from_index = 0;
    let mut undo_from_index = 0;

    for index in match_char_indices(text, target) {
        let undo_start = undo_from_index + (index - from_index);
        undo_from_index = undo_start + replacement_len;
        action.undo_ops.push(Operation::new(
            undo_start,
            undo_start + replacement_len,
            target.as_str(),
        ));

        from_index = index + target_len;
        action
            .ops
            .push(Operation::new(index, from_index, replacement));
    }

    tracing::debug!(
        target_len,
        replacements = action.ops.len(),
        "built replace-all change"
    );
    Ok(action)
}
