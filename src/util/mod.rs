//! Utility modules

pub mod text;

pub use text::{char_len, char_slice, is_word_char};
