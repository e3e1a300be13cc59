//! Search state and match navigation over raw lines

use crate::rows::RawLocation;
use crate::text_ops::{apply_operations, make_range_change, Operation, TextChangeAction};
use crate::util::text::{char_len, match_char_indices};

/// The searched word and the match the search is positioned on
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    pub word: Option<String>,
    pub location: Option<RawLocation>,
}

impl SearchState {
    pub fn new(word: Option<String>, location: Option<RawLocation>) -> Self {
        Self {
            word: word.filter(|w| !w.is_empty()),
            location,
        }
    }

    pub fn with_word(word: impl Into<String>) -> Self {
        Self::new(Some(word.into()), None)
    }

    /// The searched word; never empty
    pub fn word(&self) -> Option<&str> {
        self.word.as_deref().filter(|w| !w.is_empty())
    }
}

/// Every match of `word` in one raw line
pub fn get_match_locations(line: &str, word: &str, line_index: usize) -> Vec<RawLocation> {
    let word_len = char_len(word);
    match_char_indices(line, word)
        .into_iter()
        .map(|start| RawLocation::new(start, start + word_len, line_index))
        .collect()
}

/// Every match of `word` in the document, in reading order
pub fn get_all_match_locations(word: &str, text: &str) -> Vec<RawLocation> {
    text.split('\n')
        .enumerate()
        .flat_map(|(line_index, line)| get_match_locations(line, word, line_index))
        .collect()
}

/// The first match after `location`, wrapping around to the first match
pub fn get_next_location(
    word: &str,
    location: Option<&RawLocation>,
    text: &str,
) -> Option<RawLocation> {
    let locations = get_all_match_locations(word, text);
    let Some(current) = location else {
        return locations.first().copied();
    };
    locations
        .iter()
        .find(|l| {
            l.line_index > current.line_index
                || (l.line_index == current.line_index && l.start > current.start)
        })
        .or_else(|| locations.first())
        .copied()
}

/// The last match before `location`, wrapping around to the last match
pub fn get_previous_location(
    word: &str,
    location: Option<&RawLocation>,
    text: &str,
) -> Option<RawLocation> {
    let locations = get_all_match_locations(word, text);
    let Some(current) = location else {
        return locations.last().copied();
    };
    locations
        .iter()
        .rev()
        .find(|l| {
            l.line_index < current.line_index
                || (l.line_index == current.line_index && l.start < current.start)
        })
        .or_else(|| locations.last())
        .copied()
}

/// Document offset of the start of raw line `line_index`
pub fn raw_line_offset(text: &str, line_index: usize) -> usize {
    text.split('\n')
        .take(line_index)
        .map(|line| char_len(line) + 1)
        .sum()
}

/// Char index of the `n`-th newline (0-based)
pub fn index_of_newline(text: &str, n: usize) -> Option<usize> {
    text.chars()
        .enumerate()
        .filter(|(_, c)| *c == '\n')
        .nth(n)
        .map(|(index, _)| index)
}

/// `text` with the match at `location` replaced
pub fn replace_word_at(replacement: &str, location: &RawLocation, text: &str) -> String {
    apply_operations(text, &replace_word_change(replacement, location, text).ops)
}

/// Document offset of `location`'s start in `text`
pub fn location_offset(location: &RawLocation, text: &str) -> usize {
    raw_line_offset(text, location.line_index) + location.start
}

/// The raw location of `[offset, offset + len)` in `text`
pub fn location_at_offset(text: &str, offset: usize, len: usize) -> RawLocation {
    let mut line_index = 0;
    let mut line_start = 0;
    for (index, ch) in text.chars().take(offset).enumerate() {
        if ch == '\n' {
            line_index += 1;
            line_start = index + 1;
        }
    }
    let start = offset - line_start;
    RawLocation::new(start, start + len, line_index)
}

/// Where the range `[start, end)` lands after `ops` are applied.
///
/// `ops` follow [`apply_operations`] rules. Returns `None` when an op
/// rewrites any part of the range.
pub fn shift_range(ops: &[Operation], start: usize, end: usize) -> Option<usize> {
    let mut shifted = start;
    for op in ops {
        if op.end_index <= start {
            let removed = op.end_index - op.start_index.min(op.end_index);
            shifted = shifted + char_len(&op.replacement) - removed;
        } else if op.start_index < end {
            return None;
        }
    }
    Some(shifted)
}

/// The change replacing the match at `location` with `replacement`
pub fn replace_word_change(
    replacement: &str,
    location: &RawLocation,
    text: &str,
) -> TextChangeAction {
    let line_start = raw_line_offset(text, location.line_index);
    make_range_change(
        text,
        line_start + location.start,
        line_start + location.end,
        replacement,
    )
}
