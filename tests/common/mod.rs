//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use softwrap::config::LayoutConfig;
use softwrap::reconcile::{apply_edit, ReconcileContext};
use softwrap::search::SearchState;
use softwrap::wrap::{derive_rows, process_lines, SelectionState, WrapParams};
use softwrap::{BufferModel, Edit, Rows};

/// Width giving a 10 character budget with the default layout
pub const WIDTH: f32 = 100.0;

/// Wrap `text` with no search and no selection
pub fn wrap(text: &str, max_characters: usize) -> Rows {
    let search = SearchState::default();
    let params = WrapParams::new(&LayoutConfig::default(), &search, SelectionState::default());
    process_lines(text, max_characters, &params)
}

/// Rows for `text` with raw line `line` open for input
pub fn editing_rows(text: &str, line: usize) -> Rows {
    derive_rows(
        text,
        &LayoutConfig::default(),
        WIDTH,
        &SearchState::default(),
        SelectionState::editing(line),
    )
    .unwrap()
}

/// Apply a single edit with the default layout
pub fn reconcile(rows: &Rows, edit: Edit) -> Rows {
    let layout = LayoutConfig::default();
    let search = SearchState::default();
    let ctx = ReconcileContext {
        layout: &layout,
        width: WIDTH,
        search: &search,
    };
    apply_edit(rows, &edit, &ctx).unwrap()
}

/// `(text, raw_line_index, is_editing)` for every row
pub fn summary(rows: &Rows) -> Vec<(String, usize, bool)> {
    rows.iter()
        .map(|row| (row.text().to_string(), row.raw_line_index(), row.is_editing()))
        .collect()
}

/// A model with the default layout at [`WIDTH`]
pub fn test_model(text: &str) -> BufferModel {
    BufferModel::new(text, LayoutConfig::default(), WIDTH).unwrap()
}
