//! Buffer model - the state owned by the editing widget
//!
//! Rows are always derived from the document and view state. The only state
//! that outlives a full re-derivation is the document itself; pending edits
//! are dropped whenever rows are rebuilt from scratch.

use crate::config::LayoutConfig;
use crate::document::Document;
use crate::edit_buffer::EditBuffer;
use crate::error::WrapError;
use crate::layout::{get_row_layout, RowLayout};
use crate::reconcile::ReconcileContext;
use crate::rows::Rows;
use crate::search::SearchState;
use crate::wrap::{derive_rows, SelectionState};

#[derive(Debug, Clone)]
pub struct BufferModel {
    pub document: Document,
    pub layout: LayoutConfig,
    /// Viewport width in pixels
    pub width: f32,
    pub search: SearchState,
    pub selected_line_index: Option<usize>,
    pub is_editing: bool,
    pub rows: Rows,
    pub pending: EditBuffer,
    /// Rendered height of the editing row, once the input widget reports it
    pub editing_row_height: Option<f32>,
}

impl BufferModel {
    pub fn new(text: &str, layout: LayoutConfig, width: f32) -> Result<Self, WrapError> {
        let mut model = Self {
            document: Document::with_max_history(text, layout.max_history),
            layout,
            width,
            search: SearchState::default(),
            selected_line_index: None,
            is_editing: false,
            rows: Rows::new(),
            pending: EditBuffer::new(),
            editing_row_height: None,
        };
        model.rederive()?;
        Ok(model)
    }

    pub fn text(&self) -> &str {
        self.document.text()
    }

    pub fn selection(&self) -> SelectionState {
        SelectionState::new(self.selected_line_index, self.is_editing)
    }

    /// Rebuild all rows from scratch, discarding pending edits.
    ///
    /// On error the current rows and pending edits are kept.
    pub fn rederive(&mut self) -> Result<(), WrapError> {
        let rows = derive_rows(
            self.document.text(),
            &self.layout,
            self.width,
            &self.search,
            self.selection(),
        )?;
        if !self.pending.is_empty() {
            tracing::debug!(
                dropped = self.pending.edits().len(),
                "full re-wrap discards pending edits"
            );
        }
        self.rows = rows;
        self.pending.reset();
        Ok(())
    }

    pub fn reconcile_context(&self) -> ReconcileContext<'_> {
        ReconcileContext {
            layout: &self.layout,
            width: self.width,
            search: &self.search,
        }
    }

    /// Number of raw lines in the document
    pub fn raw_line_count(&self) -> usize {
        self.document.text().split('\n').count()
    }

    /// Index of the first row showing raw line `raw_line_index`
    pub fn row_index_of_raw_line(&self, raw_line_index: usize) -> Option<usize> {
        self.rows
            .iter()
            .position(|row| row.raw_line_index() == raw_line_index)
    }

    pub fn row_layout(&self, index: usize) -> RowLayout {
        get_row_layout(
            &self.rows,
            index,
            self.editing_row_height,
            self.width,
            &self.layout,
        )
    }
}
