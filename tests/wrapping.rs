//! Soft-wrap tests
//!
//! Properties of a full wrap pass over whole documents.

mod common;

use common::{summary, wrap};
use softwrap::config::LayoutConfig;
use softwrap::highlight::{Highlight, HighlightSection};
use softwrap::rows::RawLocation;
use softwrap::search::SearchState;
use softwrap::wrap::{derive_rows, process_lines, SelectionState, WrapParams};

const DOCUMENTS: &[&str] = &[
    "",
    "foo",
    "foo\nbar\n\nbaz",
    "abcdefghijklmnopqrstuvwxyz",
    "the quick brown fox jumps over the lazy dog\n\nand then some",
    "ÅÄÖ åäö ÅÄÖ åäö ÅÄÖ åäö\n日本語のテキストをここに書きます",
    "\n\n\n",
];

#[test]
fn test_single_short_line() {
    let rows = wrap("foo", 10);
    assert_eq!(rows.len(), 1);
    let row = rows.get(0).unwrap();
    assert_eq!(row.text(), "foo");
    assert_eq!(row.raw_line_index(), 0);
    assert_eq!((row.start(), row.end()), (0, 3));
    assert!(!row.continuing() && !row.continued());
    assert_eq!(
        row.text_sections(),
        &[HighlightSection::new("foo", 0, 3, Highlight::Normal)]
    );
}

#[test]
fn test_rows_cover_every_raw_line() {
    for doc in DOCUMENTS {
        for max_characters in [4, 5, 10, 80] {
            let rows = wrap(doc, max_characters);
            for (index, line) in doc.split('\n').enumerate() {
                assert_eq!(
                    rows.raw_line_text(index),
                    line,
                    "raw line {index} of {doc:?} at {max_characters}"
                );
            }
            assert!(rows.invariant_violation().is_none());
        }
    }
}

#[test]
fn test_rows_fit_budget() {
    let layout = LayoutConfig::default();
    for doc in DOCUMENTS {
        for max_characters in [4, 7, 10] {
            for row in wrap(doc, max_characters).iter() {
                let mut used = row.text().chars().count();
                if row.continuing() {
                    used += layout.leading_marker_len();
                }
                if row.continued() {
                    used += layout.trailing_marker_len();
                }
                assert!(used <= max_characters, "{:?} over {max_characters}", row.text());
            }
        }
    }
}

#[test]
fn test_wrap_is_idempotent() {
    let search = SearchState::new(Some("o".to_string()), Some(RawLocation::new(1, 2, 0)));
    let params = WrapParams::new(&LayoutConfig::default(), &search, SelectionState::new(Some(1), false));
    for doc in DOCUMENTS {
        assert_eq!(process_lines(doc, 8, &params), process_lines(doc, 8, &params));
    }
}

#[test]
fn test_fragments_chain() {
    let rows = wrap("abcdefghijklmnopqrstuvwxyz", 10);
    // First fragment keeps room for the trailing marker, the rest for both
    assert_eq!(
        summary(&rows),
        vec![
            ("abcdefghi".to_string(), 0, false),
            ("jklmnop".to_string(), 0, false),
            ("qrstuvw".to_string(), 0, false),
            ("xyz".to_string(), 0, false),
        ]
    );
    let last = rows.get(3).unwrap();
    assert!(last.continuing() && !last.continued());
    assert_eq!((last.start(), last.end()), (23, 26));
}

#[test]
fn test_highlight_split_across_fragments() {
    let search = SearchState::new(Some("ijkl".to_string()), Some(RawLocation::new(8, 12, 0)));
    let rows = derive_rows(
        "abcdefghijklmnop",
        &LayoutConfig::default(),
        100.0,
        &search,
        SelectionState::default(),
    )
    .unwrap();

    let first = rows.get(0).unwrap();
    assert_eq!(
        first.text_sections().last(),
        Some(&HighlightSection::new("i", 8, 9, Highlight::Current))
    );
    let second = rows.get(1).unwrap();
    assert_eq!(
        second.text_sections().first(),
        Some(&HighlightSection::new("jkl", 0, 3, Highlight::Current))
    );
}

#[test]
fn test_editing_line_is_never_wrapped() {
    let text = "short\nabcdefghijklmnopqrstuvwxyz\nend";
    let rows = derive_rows(
        text,
        &LayoutConfig::default(),
        100.0,
        &SearchState::default(),
        SelectionState::editing(1),
    )
    .unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows.editing_index(), Some(1));
    assert_eq!(rows.editing().unwrap().text, "abcdefghijklmnopqrstuvwxyz");
}

#[test]
fn test_narrow_width_is_rejected() {
    let err = derive_rows(
        "foo",
        &LayoutConfig::default(),
        30.0,
        &SearchState::default(),
        SelectionState::default(),
    )
    .unwrap_err();
    assert!(err.to_string().contains("30"));
}
