//! Command types for the Elm-style architecture
//!
//! Commands describe what the host widget should do after an update:
//! scroll, persist a change, or react to a selection.

use crate::rows::RawLocation;
use crate::text_ops::TextChangeAction;

/// Side effects requested by [`crate::update::update`]
#[derive(Debug, Clone, PartialEq)]
pub enum Cmd {
    /// Bring the first row of a raw line into view
    ScrollToRawLine(usize),
    /// A change was applied to the document; the host store should persist it
    DocumentChanged(TextChangeAction),
    /// A word was tapped and became the search word
    WordSelected { word: String, location: RawLocation },
    /// A tap landed outside any word and selected the raw line
    LineSelected(usize),
    /// The current search match was tapped
    ReplaceRequested(RawLocation),
    /// Multiple commands to execute
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Combine optional commands, dropping the empty ones
    pub fn batch(cmds: impl IntoIterator<Item = Option<Cmd>>) -> Option<Cmd> {
        let mut cmds: Vec<Cmd> = cmds.into_iter().flatten().collect();
        match cmds.len() {
            0 => None,
            1 => cmds.pop(),
            _ => Some(Cmd::Batch(cmds)),
        }
    }

    /// The committed document change, if this command carries one
    pub fn document_change(&self) -> Option<&TextChangeAction> {
        match self {
            Cmd::DocumentChanged(action) => Some(action),
            Cmd::Batch(cmds) => cmds.iter().find_map(Cmd::document_change),
            _ => None,
        }
    }
}
