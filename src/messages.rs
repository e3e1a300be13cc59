//! Message types for the Elm-style architecture
//!
//! All state changes to a [`crate::model::BufferModel`] flow through these.

use crate::rows::Edit;

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    // === Document ===
    /// Replace the document text wholesale (drops history)
    SetText(String),
    /// Viewport width changed, in pixels
    Resize(f32),

    // === Search ===
    /// Search for a word; `None` or empty clears the search
    Search(Option<String>),
    /// Move to the next match, wrapping around
    SearchNext,
    /// Move to the previous match, wrapping around
    SearchPrevious,
    /// Replace the current match
    ReplaceCurrent(String),
    /// Replace every match of the search word
    ReplaceAll(String),

    // === Selection ===
    /// Select a raw line (go-to-line)
    SelectLine(Option<usize>),
    /// Select the raw line after the selected one
    NextLine,
    /// Select the raw line before the selected one
    PreviousLine,
    /// Tap on a non-editing row, already translated to a character index
    TapWord {
        row_index: usize,
        character_index: usize,
    },

    // === Editing ===
    /// Open or close the selected line for input
    SetEditing(bool),
    /// Row-relative edits from the input widget, in arrival order
    Edit(Vec<Edit>),
    /// Backspace at column 0 of the editing row
    DeleteNewline,
    /// Flush pending edits into the document
    Commit,
    /// Revert the last committed change
    Undo,
    /// The input widget reported the editing row's rendered height
    EditingRowMeasured(f32),
}
