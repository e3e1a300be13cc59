//! Soft-wrap layout: raw text to display rows
//!
//! Each raw line becomes one row when it fits the character budget, or a run
//! of fragments otherwise. Every fragment after the first reserves room for the
//! leading continuation marker; every fragment before the last reserves room
//! for the trailing one.

use crate::config::LayoutConfig;
use crate::error::WrapError;
use crate::highlight::{get_text_sections, get_text_subsections};
use crate::rows::{DisplayRow, EditingRow, RawLocation, Row, Rows};
use crate::search::SearchState;
use crate::util::text::char_boundaries;

/// Which raw line is selected, and whether it is open for input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub selected_line_index: Option<usize>,
    pub is_editing: bool,
}

impl SelectionState {
    pub fn new(selected_line_index: Option<usize>, is_editing: bool) -> Self {
        Self {
            selected_line_index,
            is_editing,
        }
    }

    /// Raw line `line` is selected and open for input
    pub fn editing(line: usize) -> Self {
        Self::new(Some(line), true)
    }
}

/// Inputs shared by every line of one wrap pass
#[derive(Debug, Clone, Copy)]
pub struct WrapParams<'a> {
    pub selected_word: Option<&'a str>,
    pub selected_location: Option<&'a RawLocation>,
    pub selection: SelectionState,
    pub leading_marker_len: usize,
    pub trailing_marker_len: usize,
}

impl<'a> WrapParams<'a> {
    pub fn new(layout: &LayoutConfig, search: &'a SearchState, selection: SelectionState) -> Self {
        Self {
            selected_word: search.word(),
            selected_location: search.location.as_ref(),
            selection,
            leading_marker_len: layout.leading_marker_len(),
            trailing_marker_len: layout.trailing_marker_len(),
        }
    }
}

/// Wrap one raw line into rows.
///
/// The selected line becomes a single editing row when editing is on.
pub fn process_line(
    text: &str,
    raw_line_index: usize,
    max_characters: usize,
    params: &WrapParams<'_>,
) -> Vec<Row> {
    let is_selected = params.selection.selected_line_index == Some(raw_line_index);
    if is_selected && params.selection.is_editing {
        return vec![Row::Editing(EditingRow {
            text: text.to_string(),
            raw_line_index,
            is_selected,
            selection: None,
        })];
    }

    let text_sections = get_text_sections(
        text,
        params.selected_word,
        params.selected_location,
        raw_line_index,
    );
    let bounds = char_boundaries(text);
    let text_len = bounds.len() - 1;

    if text_len <= max_characters {
        return vec![Row::Display(DisplayRow {
            text: text.to_string(),
            raw_line_index,
            start: 0,
            end: text_len,
            continuing: false,
            continued: false,
            is_selected,
            text_sections,
        })];
    }

    let mut rows = Vec::with_capacity(text_len / max_characters.max(1) + 1);
    let mut index = 0;
    while index < text_len {
        let continuing = index > 0;
        let max_length = max_characters
            .saturating_sub(if continuing { params.leading_marker_len } else { 0 });
        let continued = index + max_length < text_len;
        let length = max_length
            .saturating_sub(if continued { params.trailing_marker_len } else { 0 })
            .max(1);
        let end = (index + length).min(text_len);

        rows.push(Row::Display(DisplayRow {
            text: text[bounds[index]..bounds[end]].to_string(),
            raw_line_index,
            start: index,
            end,
            continuing,
            continued,
            is_selected,
            text_sections: get_text_subsections(&text_sections, index, end - index),
        }));
        index = end;
    }
    rows
}

/// Character budget for a viewport `width` pixels wide
pub fn get_max_characters(width: f32, layout: &LayoutConfig) -> Result<usize, WrapError> {
    let max_characters = if width.is_finite() && width > 0.0 && layout.character_width > 0.0 {
        (width / layout.character_width).floor() as usize
    } else {
        0
    };

    // The fragment arithmetic breaks down if a continued, continuing row can't hold a character
    let markers = layout.leading_marker_len() + layout.trailing_marker_len();
    if max_characters < markers + 1 {
        return Err(WrapError::InvalidWidth {
            width,
            max_characters,
        });
    }
    Ok(max_characters)
}

/// Wrap every raw line of `data`, in order
pub fn process_lines(data: &str, max_characters: usize, params: &WrapParams<'_>) -> Rows {
    let mut rows = Rows::new();
    for (raw_line_index, text) in data.split('\n').enumerate() {
        for row in process_line(text, raw_line_index, max_characters, params) {
            rows.push(row);
        }
    }
    rows
}

/// Full rebuild of the row sequence from the document and view state
pub fn derive_rows(
    document: &str,
    layout: &LayoutConfig,
    width: f32,
    search: &SearchState,
    selection: SelectionState,
) -> Result<Rows, WrapError> {
    let max_characters = get_max_characters(width, layout)?;
    let params = WrapParams::new(layout, search, selection);
    let rows = process_lines(document, max_characters, &params);
    tracing::debug!(
        max_characters,
        rows = rows.len(),
        editing = ?rows.editing_index(),
        "derived rows"
    );
    Ok(rows)
}
