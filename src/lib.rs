//! softwrap - soft-wrap and incremental edit reconciliation
//!
//! This crate turns a document into display rows for a narrow, fixed-pitch
//! viewport and keeps those rows in sync with edits made on the one row
//! that is open for input, following the Elm Architecture pattern.

pub mod commands;
pub mod config;
pub mod config_paths;
pub mod debug_dump;
pub mod document;
pub mod edit_buffer;
pub mod error;
pub mod highlight;
pub mod layout;
pub mod messages;
pub mod model;
pub mod reconcile;
pub mod rows;
pub mod search;
pub mod text_ops;
pub mod tracing;
pub mod update;
pub mod util;
pub mod word;
pub mod wrap;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::LayoutConfig;
pub use error::{EditError, WrapError};
pub use messages::Msg;
pub use model::BufferModel;
pub use rows::{DisplayRow, Edit, EditingRow, RawLocation, Row, RowRef, Rows};
pub use text_ops::{Operation, TextChangeAction};
pub use update::update;
