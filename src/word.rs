//! Word lookup for taps on display rows
//!
//! A word may be split across the fragments of a wrapped raw line, so lookups
//! stitch the pieces back together across `continuing`/`continued` rows.

use crate::rows::{BufferLocation, RawLocation, RowRef, Rows};
use crate::util::text::is_word_char;

/// The word span around an index within one row's text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordSpan {
    pub has_word: bool,
    pub start: usize,
    pub length: usize,
    /// The span reaches the end of the text
    pub next_line_possible: bool,
    /// The span reaches the start of the text
    pub previous_line_possible: bool,
}

impl WordSpan {
    fn none() -> Self {
        Self {
            has_word: false,
            start: 0,
            length: 0,
            next_line_possible: false,
            previous_line_possible: false,
        }
    }
}

/// A word resolved across row fragments
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordMatch {
    pub word: Option<String>,
    pub locations: Vec<BufferLocation>,
}

/// Find the maximal run of word characters containing `index`
pub fn locate_word(text: &str, index: usize) -> WordSpan {
    let chars: Vec<char> = text.chars().collect();
    if !chars.get(index).copied().is_some_and(is_word_char) {
        return WordSpan::none();
    }

    let mut start = index;
    while start > 0 && is_word_char(chars[start - 1]) {
        start -= 1;
    }
    let mut end = index + 1;
    while end < chars.len() && is_word_char(chars[end]) {
        end += 1;
    }

    WordSpan {
        has_word: true,
        start,
        length: end - start,
        next_line_possible: end == chars.len(),
        previous_line_possible: start == 0,
    }
}

/// Resolve the word under `character_index` of row `row_index`, following it
/// into neighbouring fragments of the same raw line.
pub fn multiline_locate_word(character_index: usize, row_index: usize, rows: &Rows) -> WordMatch {
    let Some(row) = rows.get(row_index) else {
        return WordMatch::default();
    };
    let start_span = locate_word(row.text(), character_index);
    if !start_span.has_word {
        return WordMatch::default();
    }

    // Walk back to the fragment where the word begins
    let mut start_row_index = row_index;
    let mut start_char = start_span.start;
    let mut has_prev = row.continuing() && start_span.previous_line_possible;
    while has_prev && start_row_index > 0 {
        let Some(prev_row) = rows.get(start_row_index - 1) else {
            break;
        };
        let prev_len = prev_row.text().chars().count();
        let prev_span = match prev_len {
            0 => WordSpan::none(),
            len => locate_word(prev_row.text(), len - 1),
        };
        if !prev_span.has_word {
            break;
        }
        start_row_index -= 1;
        start_char = prev_span.start;
        has_prev = prev_row.continuing() && prev_span.previous_line_possible;
    }

    let mut word = String::new();
    let mut locations = Vec::new();
    let mut next_row_index = start_row_index;
    let mut next_char = start_char;
    while let Some(next_row) = rows.get(next_row_index) {
        let span = locate_word(next_row.text(), next_char);
        if !span.has_word {
            break;
        }
        locations.push(BufferLocation {
            start: span.start,
            length: span.length,
            line_index: next_row_index,
        });
        word.extend(next_row.text().chars().skip(span.start).take(span.length));

        if !(span.next_line_possible && next_row.continued()) {
            break;
        }
        next_char = 0;
        next_row_index += 1;
    }

    WordMatch {
        word: Some(word),
        locations,
    }
}

/// Map fragment `locations` back to one span of the raw line of `row`.
///
/// `row` is the tapped row at `row_index`; locations on earlier rows shift
/// the start back past the row's own start.
pub fn get_raw_location(
    locations: &[BufferLocation],
    row: RowRef<'_>,
    row_index: usize,
) -> Option<RawLocation> {
    let first = locations.first()?;
    let length: usize = locations.iter().map(|l| l.length).sum();
    let before: usize = locations
        .iter()
        .filter(|l| l.line_index < row_index)
        .map(|l| l.length)
        .sum();

    let start = if before == 0 {
        row.start() + first.start
    } else {
        row.start().saturating_sub(before)
    };
    Some(RawLocation::new(start, start + length, row.raw_line_index()))
}
