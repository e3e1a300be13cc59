//! Vertical row layout for virtualized lists
//!
//! Non-editing rows have a fixed height. The editing row grows with its text,
//! so rows after it are offset by its measured (or estimated) height.

use crate::config::LayoutConfig;
use crate::rows::Rows;
use crate::util::text::char_len;

/// Vertical extent of one row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowLayout {
    pub length: f32,
    pub offset: f32,
    pub index: usize,
}

/// Estimated height of an editing row holding `text` in a `width` wide input
pub fn guess_editing_row_height(text: &str, width: f32, layout: &LayoutConfig) -> f32 {
    let lines = if width > 0.0 {
        (char_len(text) as f32 * layout.character_width / width).ceil()
    } else {
        1.0
    };
    lines.max(1.0) * layout.character_height
}

/// Layout of row `index`, using the measured editing row height when known
pub fn get_row_layout(
    rows: &Rows,
    index: usize,
    editing_row_height: Option<f32>,
    width: f32,
    layout: &LayoutConfig,
) -> RowLayout {
    let row_height = layout.character_height;
    let fixed = RowLayout {
        length: row_height,
        offset: index as f32 * row_height,
        index,
    };

    let (Some(editing_index), Some(editing)) = (rows.editing_index(), rows.editing()) else {
        return fixed;
    };
    if index < editing_index {
        return fixed;
    }

    let editing_height = editing_row_height
        .unwrap_or_else(|| guess_editing_row_height(&editing.text, width, layout));
    if index == editing_index {
        return RowLayout {
            length: editing_height,
            ..fixed
        };
    }

    RowLayout {
        length: row_height,
        offset: (index - 1) as f32 * row_height + editing_height,
        index,
    }
}
