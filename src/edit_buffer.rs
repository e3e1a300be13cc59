//! Pending edits accumulated while a row is open for input
//!
//! Row-relative edits are turned into document-relative edits before they
//! are applied to the rows, so the buffer can later be folded into a single
//! undoable [`TextChangeAction`]. A full re-wrap invalidates the buffer; call
//! [`EditBuffer::reset`] whenever rows are derived from scratch.

use crate::error::WrapError;
use crate::reconcile::{
    apply_edit, compute_absolute_edit, compute_delete_line_edit, delete_newline_before,
    ReconcileContext,
};
use crate::rows::{Edit, Rows};
use crate::text_ops::{apply_operations, make_range_change, TextChangeAction};
use crate::util::text::{char_len, char_slice};

/// Document-relative edits in the order they happened
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditBuffer {
    edits: Vec<Edit>,
}

impl EditBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn edits(&self) -> &[Edit] {
        &self.edits
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    pub fn reset(&mut self) {
        self.edits.clear();
    }

    /// Apply `edits` to `rows` in arrival order, each against the rows the
    /// previous one produced.
    ///
    /// Either every edit is applied and recorded, or none is.
    pub fn apply_edits(
        &mut self,
        rows: &Rows,
        edits: &[Edit],
        ctx: &ReconcileContext<'_>,
    ) -> Result<Rows, WrapError> {
        let mut rows = rows.clone();
        let mut absolute_edits = Vec::with_capacity(edits.len());
        for edit in edits {
            absolute_edits.extend(compute_absolute_edit(&rows, edit));
            rows = apply_edit(&rows, edit, ctx)?;
        }
        self.edits.extend(absolute_edits);
        Ok(rows)
    }

    /// Merge the editing row into the previous raw line
    pub fn delete_newline(&mut self, rows: &Rows) -> Rows {
        self.edits.extend(compute_delete_line_edit(rows));
        delete_newline_before(rows)
    }

    /// Fold the pending edits into one range change against `original`.
    ///
    /// Returns `None` when the edits leave the text unchanged.
    pub fn to_change_action(&self, original: &str) -> Option<TextChangeAction> {
        if self.edits.is_empty() {
            return None;
        }

        let changed = self.edits.iter().fold(original.to_string(), |text, edit| {
            apply_operations(&text, &[edit.to_operation()])
        });
        if changed == original {
            return None;
        }

        let prefix = original
            .chars()
            .zip(changed.chars())
            .take_while(|(a, b)| a == b)
            .count();
        let original_len = char_len(original);
        let changed_len = char_len(&changed);
        let suffix = original
            .chars()
            .rev()
            .zip(changed.chars().rev())
            .take_while(|(a, b)| a == b)
            .count()
            .min(original_len - prefix)
            .min(changed_len - prefix);

        let replacement = char_slice(&changed, prefix, changed_len - suffix);
        Some(make_range_change(
            original,
            prefix,
            original_len - suffix,
            replacement,
        ))
    }
}
