//! Search-match sections for a row's text

use serde::{Deserialize, Serialize};

use crate::rows::RawLocation;
use crate::util::text::{char_len, char_slice, match_char_indices};

/// How a section of text should be styled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Highlight {
    Normal,
    /// An occurrence of the searched word
    Highlight,
    /// The occurrence the search is currently positioned on
    Current,
}

/// A tagged span of a row's text. Offsets are relative to the row, not the raw line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightSection {
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub highlight: Highlight,
}

impl HighlightSection {
    pub fn new(text: impl Into<String>, start: usize, end: usize, highlight: Highlight) -> Self {
        Self {
            text: text.into(),
            start,
            end,
            highlight,
        }
    }
}

/// A single normal section spanning the whole text
pub fn text_only_section(text: &str) -> Vec<HighlightSection> {
    vec![HighlightSection::new(text, 0, char_len(text), Highlight::Normal)]
}

/// Split `text` into normal and highlighted sections for `selected_word`.
///
/// A match is `Current` when it sits on `line_index` at exactly
/// `selected_location.start`.
pub fn get_text_sections(
    text: &str,
    selected_word: Option<&str>,
    selected_location: Option<&RawLocation>,
    line_index: usize,
) -> Vec<HighlightSection> {
    let Some(word) = selected_word else {
        return text_only_section(text);
    };
    let matches = match_char_indices(text, word);
    if matches.is_empty() {
        return text_only_section(text);
    }

    let word_len = char_len(word);
    let text_len = char_len(text);
    let mut sections = Vec::with_capacity(matches.len() * 2 + 1);
    let mut from_index = 0;

    for index in matches {
        if index > from_index {
            sections.push(HighlightSection::new(
                char_slice(text, from_index, index),
                from_index,
                index,
                Highlight::Normal,
            ));
        }
        from_index = index + word_len;
        let is_current = selected_location
            .is_some_and(|location| location.line_index == line_index && location.start == index);
        sections.push(HighlightSection::new(
            word,
            index,
            from_index,
            if is_current {
                Highlight::Current
            } else {
                Highlight::Highlight
            },
        ));
    }

    if text_len > from_index {
        sections.push(HighlightSection::new(
            char_slice(text, from_index, text_len),
            from_index,
            text_len,
            Highlight::Normal,
        ));
    }
    sections
}

/// Project `sections` onto `[index, index + length)`, clipping and re-basing
/// offsets so they start at 0.
pub fn get_text_subsections(
    sections: &[HighlightSection],
    index: usize,
    length: usize,
) -> Vec<HighlightSection> {
    let range_end = index + length;

    sections
        .iter()
        .filter(|section| {
            let begins_in_section = section.start <= index && index < section.end;
            let ends_in_section = section.start < range_end && range_end <= section.end;
            let overlaps_section = index <= section.start && section.end <= range_end;
            begins_in_section || ends_in_section || overlaps_section
        })
        .map(|section| {
            let clip_start = section.start.max(index);
            let clip_end = section.end.min(range_end);
            let text = char_slice(
                &section.text,
                clip_start - section.start,
                clip_end - section.start,
            );
            HighlightSection::new(
                text,
                clip_start - index,
                clip_end - index,
                section.highlight,
            )
        })
        .collect()
}

/// Whether `character_index` falls inside the current search match
pub fn is_character_index_selected_word(
    character_index: usize,
    sections: &[HighlightSection],
) -> bool {
    sections.iter().any(|section| {
        section.highlight == Highlight::Current
            && section.start <= character_index
            && character_index < section.end
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normal(text: &str, start: usize, end: usize) -> HighlightSection {
        HighlightSection::new(text, start, end, Highlight::Normal)
    }

    #[test]
    fn test_no_word_gives_single_section() {
        assert_eq!(
            get_text_sections("I like text", None, None, 0),
            vec![normal("I like text", 0, 11)]
        );
    }

    #[test]
    fn test_word_not_found() {
        assert_eq!(
            get_text_sections("I like text", Some("love"), None, 0),
            vec![normal("I like text", 0, 11)]
        );
    }

    #[test]
    fn test_highlights_word() {
        assert_eq!(
            get_text_sections("I like text", Some("like"), None, 0),
            vec![
                normal("I ", 0, 2),
                HighlightSection::new("like", 2, 6, Highlight::Highlight),
                normal(" text", 6, 11),
            ]
        );
    }

    #[test]
    fn test_marks_current_match() {
        let location = RawLocation::new(5, 8, 3);
        let sections = get_text_sections("abc abc abc", Some("abc"), Some(&location), 3);
        assert_eq!(
            sections,
            vec![
                HighlightSection::new("abc", 0, 3, Highlight::Highlight),
                normal(" ", 3, 4),
                HighlightSection::new("abc", 4, 7, Highlight::Highlight),
                normal(" ", 7, 8),
                HighlightSection::new("abc", 8, 11, Highlight::Highlight),
            ]
        );

        let location = RawLocation::new(4, 7, 3);
        let sections = get_text_sections("abc abc abc", Some("abc"), Some(&location), 3);
        assert_eq!(sections[2].highlight, Highlight::Current);

        // Same offset on another raw line is not current
        let sections = get_text_sections("abc abc abc", Some("abc"), Some(&location), 2);
        assert!(sections.iter().all(|s| s.highlight != Highlight::Current));
    }

    #[test]
    fn test_adjacent_matches_have_no_empty_gap() {
        let sections = get_text_sections("aaaa", Some("aa"), None, 0);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].start, 0);
        assert_eq!(sections[1].start, 2);
    }

    #[test]
    fn test_subsections_clip_and_rebase() {
        let sections = get_text_sections("I like text", Some("like"), None, 0);
        let sub = get_text_subsections(&sections, 4, 5);
        assert_eq!(
            sub,
            vec![
                HighlightSection::new("ke", 0, 2, Highlight::Highlight),
                normal(" te", 2, 5),
            ]
        );
    }

    #[test]
    fn test_subsections_cover_fragment() {
        let text = "one like two like three";
        let sections = get_text_sections(text, Some("like"), None, 0);
        for (index, length) in [(0, 7), (7, 7), (14, 9)] {
            let joined: String = get_text_subsections(&sections, index, length)
                .iter()
                .map(|s| s.text.as_str())
                .collect();
            assert_eq!(joined, char_slice(text, index, index + length));
        }
    }

    #[test]
    fn test_is_character_index_selected_word() {
        assert!(!is_character_index_selected_word(0, &[]));
        assert!(!is_character_index_selected_word(0, &[normal("abcde", 0, 5)]));
        assert!(!is_character_index_selected_word(
            0,
            &[HighlightSection::new("abcde", 0, 5, Highlight::Highlight)]
        ));
        let current = [HighlightSection::new("abcde", 0, 5, Highlight::Current)];
        assert!(is_character_index_selected_word(4, &current));
        assert!(!is_character_index_selected_word(5, &current));
    }
}
