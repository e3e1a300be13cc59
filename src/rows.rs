//! Display row model
//!
//! A raw line (text between `\n`s) is shown as one or more display rows.
//! At most one row is open for text input; [`Rows`] keeps that row apart
//! from the rest so the invariant holds by construction.

use serde::{Deserialize, Serialize};

use crate::highlight::{text_only_section, HighlightSection};
use crate::text_ops::Operation;
use crate::util::text::char_len;

/// A character span within one raw line. `end` is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RawLocation {
    pub start: usize,
    pub end: usize,
    pub line_index: usize,
}

impl RawLocation {
    pub fn new(start: usize, end: usize, line_index: usize) -> Self {
        Self {
            start,
            end,
            line_index,
        }
    }
}

/// A word span within one display row; `line_index` is the row index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BufferLocation {
    pub start: usize,
    pub length: usize,
    pub line_index: usize,
}

/// Caret/selection hint relative to the editing row's text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSelection {
    pub start: usize,
    pub end: usize,
}

impl TextSelection {
    pub fn caret(at: usize) -> Self {
        Self { start: at, end: at }
    }
}

/// Replace `text[start..end]` with `replacement`.
///
/// Offsets are into the editing row's text, or into the whole document for
/// edits produced by [`crate::reconcile::compute_absolute_edit`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edit {
    pub start: usize,
    pub end: usize,
    pub replacement: String,
}

impl Edit {
    pub fn new(start: usize, end: usize, replacement: impl Into<String>) -> Self {
        Self {
            start,
            end,
            replacement: replacement.into(),
        }
    }

    pub fn insert(at: usize, text: impl Into<String>) -> Self {
        Self::new(at, at, text)
    }

    pub fn delete(start: usize, end: usize) -> Self {
        Self::new(start, end, "")
    }

    pub fn to_operation(&self) -> Operation {
        Operation::new(self.start, self.end, self.replacement.as_str())
    }
}

/// A rendered, non-editable row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayRow {
    pub text: String,
    pub raw_line_index: usize,
    /// Offset of `text` within the raw line
    pub start: usize,
    /// Exclusive end offset within the raw line
    pub end: usize,
    /// Not the first fragment of its raw line
    pub continuing: bool,
    /// Not the last fragment of its raw line
    pub continued: bool,
    pub is_selected: bool,
    pub text_sections: Vec<HighlightSection>,
}

/// The row currently open for text input. Always a whole raw line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditingRow {
    pub text: String,
    pub raw_line_index: usize,
    pub is_selected: bool,
    pub selection: Option<TextSelection>,
}

impl EditingRow {
    pub fn new(text: impl Into<String>, raw_line_index: usize) -> Self {
        Self {
            text: text.into(),
            raw_line_index,
            is_selected: true,
            selection: None,
        }
    }

    /// Close the row for input, keeping it as one unwrapped row
    pub fn into_display(self) -> DisplayRow {
        let end = char_len(&self.text);
        DisplayRow {
            text_sections: text_only_section(&self.text),
            text: self.text,
            raw_line_index: self.raw_line_index,
            start: 0,
            end,
            continuing: false,
            continued: false,
            is_selected: self.is_selected,
        }
    }
}

/// An owned row as produced by line wrapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    Display(DisplayRow),
    Editing(EditingRow),
}

/// A borrowed view of any row in a [`Rows`] sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowRef<'a> {
    Display(&'a DisplayRow),
    Editing(&'a EditingRow),
}

impl<'a> RowRef<'a> {
    pub fn text(&self) -> &'a str {
        match self {
            Self::Display(row) => &row.text,
            Self::Editing(row) => &row.text,
        }
    }

    pub fn raw_line_index(&self) -> usize {
        match self {
            Self::Display(row) => row.raw_line_index,
            Self::Editing(row) => row.raw_line_index,
        }
    }

    pub fn start(&self) -> usize {
        match self {
            Self::Display(row) => row.start,
            Self::Editing(_) => 0,
        }
    }

    pub fn end(&self) -> usize {
        match self {
            Self::Display(row) => row.end,
            Self::Editing(row) => char_len(&row.text),
        }
    }

    pub fn continuing(&self) -> bool {
        matches!(self, Self::Display(row) if row.continuing)
    }

    pub fn continued(&self) -> bool {
        matches!(self, Self::Display(row) if row.continued)
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Editing(_))
    }

    pub fn is_selected(&self) -> bool {
        match self {
            Self::Display(row) => row.is_selected,
            Self::Editing(row) => row.is_selected,
        }
    }

    /// Empty for the editing row
    pub fn text_sections(&self) -> &'a [HighlightSection] {
        match self {
            Self::Display(row) => &row.text_sections,
            Self::Editing(_) => &[],
        }
    }

    pub fn selection(&self) -> Option<TextSelection> {
        match self {
            Self::Display(_) => None,
            Self::Editing(row) => row.selection,
        }
    }
}

/// The flat row sequence: `head`, then the optional editing row, then `tail`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rows {
    head: Vec<DisplayRow>,
    editing: Option<EditingRow>,
    tail: Vec<DisplayRow>,
}

impl Rows {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(
        head: Vec<DisplayRow>,
        editing: Option<EditingRow>,
        tail: Vec<DisplayRow>,
    ) -> Self {
        if editing.is_none() && !tail.is_empty() {
            let mut head = head;
            head.extend(tail);
            return Self {
                head,
                editing: None,
                tail: Vec::new(),
            };
        }
        Self {
            head,
            editing,
            tail,
        }
    }

    /// Append a row. A second editing row is closed and kept as a display row.
    pub fn push(&mut self, row: Row) {
        match row {
            Row::Display(row) if self.editing.is_some() => self.tail.push(row),
            Row::Display(row) => self.head.push(row),
            Row::Editing(row) if self.editing.is_some() => {
                tracing::error!(
                    raw_line_index = row.raw_line_index,
                    "second editing row pushed, closing it"
                );
                self.tail.push(row.into_display());
            }
            Row::Editing(row) => self.editing = Some(row),
        }
    }

    pub fn len(&self) -> usize {
        self.head.len() + usize::from(self.editing.is_some()) + self.tail.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Row at flat index `index`, `None` when out of bounds
    pub fn get(&self, index: usize) -> Option<RowRef<'_>> {
        if let Some(row) = self.head.get(index) {
            return Some(RowRef::Display(row));
        }
        let mut index = index - self.head.len();
        if let Some(editing) = &self.editing {
            if index == 0 {
                return Some(RowRef::Editing(editing));
            }
            index -= 1;
        }
        self.tail.get(index).map(RowRef::Display)
    }

    pub fn iter(&self) -> impl Iterator<Item = RowRef<'_>> {
        self.head
            .iter()
            .map(RowRef::Display)
            .chain(self.editing.iter().map(RowRef::Editing))
            .chain(self.tail.iter().map(RowRef::Display))
    }

    /// Rows before the editing row (all rows when none is editing)
    pub fn head(&self) -> &[DisplayRow] {
        &self.head
    }

    pub fn editing(&self) -> Option<&EditingRow> {
        self.editing.as_ref()
    }

    /// Rows after the editing row
    pub fn tail(&self) -> &[DisplayRow] {
        &self.tail
    }

    /// Flat index of the editing row
    pub fn editing_index(&self) -> Option<usize> {
        self.editing.as_ref().map(|_| self.head.len())
    }

    pub fn into_parts(self) -> (Vec<DisplayRow>, Option<EditingRow>, Vec<DisplayRow>) {
        (self.head, self.editing, self.tail)
    }

    /// Full text of raw line `raw_line_index`, stitched from its fragments
    pub fn raw_line_text(&self, raw_line_index: usize) -> String {
        self.iter()
            .filter(|row| row.raw_line_index() == raw_line_index)
            .map(|row| row.text())
            .collect()
    }

    /// Describe the first broken row invariant, if any.
    ///
    /// Raw line indices must start at 0 and step by at most one; fragments of
    /// one raw line must tile it without gaps.
    pub fn invariant_violation(&self) -> Option<String> {
        let mut previous: Option<RowRef<'_>> = None;
        for (index, row) in self.iter().enumerate() {
            match previous {
                None if row.raw_line_index() != 0 => {
                    return Some(format!(
                        "row 0 starts at raw line {}",
                        row.raw_line_index()
                    ));
                }
                Some(prev) if row.raw_line_index() == prev.raw_line_index() => {
                    if row.start() != prev.end() {
                        return Some(format!(
                            "row {} starts at {} but row {} ends at {}",
                            index,
                            row.start(),
                            index - 1,
                            prev.end()
                        ));
                    }
                }
                Some(prev) if row.raw_line_index() != prev.raw_line_index() + 1 => {
                    return Some(format!(
                        "row {} jumps from raw line {} to {}",
                        index,
                        prev.raw_line_index(),
                        row.raw_line_index()
                    ));
                }
                Some(_) if row.start() != 0 => {
                    return Some(format!("row {} opens a raw line at {}", index, row.start()));
                }
                _ => {}
            }
            previous = Some(row);
        }
        None
    }
}
