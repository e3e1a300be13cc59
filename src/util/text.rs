//! Character-offset helpers and word classification
//!
//! Every offset in the row model counts characters, not bytes. These helpers
//! translate between the two so callers can slice `&str` safely.

/// Check if a character belongs to a word: ASCII letters, digits, underscore
pub fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// Length of `text` in characters
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Byte offset of every character boundary, including the end of the string.
///
/// The returned vector has `char_len(text) + 1` entries, so `bounds[i]` is the
/// byte offset of character `i` and `bounds[char_len]` is `text.len()`.
pub fn char_boundaries(text: &str) -> Vec<usize> {
    text.char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect()
}

/// Convert char offset to byte offset (clamped to the end of the string)
pub fn char_to_byte(text: &str, char_offset: usize) -> usize {
    text.char_indices()
        .nth(char_offset)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

/// Slice `text` by character range, clamping both ends
pub fn char_slice(text: &str, start: usize, end: usize) -> &str {
    let start_byte = char_to_byte(text, start);
    let end_byte = char_to_byte(text, end.max(start));
    &text[start_byte..end_byte]
}

/// Character offset of every non-overlapping occurrence of `needle`,
/// scanning left to right.
///
/// An empty needle has no occurrences.
pub fn match_char_indices(haystack: &str, needle: &str) -> Vec<usize> {
    if needle.is_empty() {
        return Vec::new();
    }

    let mut indices = Vec::new();
    let mut last_byte = 0;
    let mut last_char = 0;
    for (byte_idx, _) in haystack.match_indices(needle) {
        last_char += char_len(&haystack[last_byte..byte_idx]);
        last_byte = byte_idx;
        indices.push(last_char);
    }
    indices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_chars() {
        assert!(is_word_char('a'));
        assert!(is_word_char('Z'));
        assert!(is_word_char('7'));
        assert!(is_word_char('_'));
        assert!(!is_word_char('é'));
        assert!(!is_word_char('日'));
        assert!(!is_word_char(' '));
        assert!(!is_word_char('-'));
        assert!(!is_word_char('.'));
    }

    #[test]
    fn test_char_slice_multibyte() {
        let text = "héllo wörld";
        assert_eq!(char_slice(text, 1, 4), "éll");
        assert_eq!(char_slice(text, 6, 100), "wörld");
        assert_eq!(char_slice(text, 20, 30), "");
    }

    #[test]
    fn test_char_boundaries() {
        assert_eq!(char_boundaries("aé"), vec![0, 1, 3]);
        assert_eq!(char_boundaries(""), vec![0]);
    }

    #[test]
    fn test_match_char_indices() {
        assert_eq!(match_char_indices("aaaa", "aa"), vec![0, 2]);
        assert_eq!(match_char_indices("é like like", "like"), vec![2, 7]);
        assert!(match_char_indices("abc", "").is_empty());
        assert!(match_char_indices("abc", "x").is_empty());
    }
}
