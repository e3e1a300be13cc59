//! Incremental edit reconciliation
//!
//! Applies a row-relative edit to the editing row and re-derives only the rows
//! it touches. Inserting newlines splits the editing row into wrapped rows
//! plus a new editing row; deleting the newline before the editing row merges
//! it into the previous raw line. Rows after the edit keep their layout and
//! only have their raw line index shifted.

use crate::config::LayoutConfig;
use crate::debug_dump::verify_rows;
use crate::error::WrapError;
use crate::rows::{DisplayRow, Edit, EditingRow, Row, Rows, TextSelection};
use crate::search::SearchState;
use crate::text_ops::apply_operations;
use crate::util::text::char_len;
use crate::wrap::{get_max_characters, process_line, SelectionState, WrapParams};

/// View state needed to re-wrap rows produced by an edit
#[derive(Debug, Clone, Copy)]
pub struct ReconcileContext<'a> {
    pub layout: &'a LayoutConfig,
    pub width: f32,
    pub search: &'a SearchState,
}

/// Raw line index of the editing row
pub fn editing_raw_line_index(rows: &Rows) -> Option<usize> {
    rows.editing().map(|row| row.raw_line_index)
}

/// Apply `edit` to the editing row.
///
/// Without an editing row the rows are returned unchanged.
pub fn apply_edit(rows: &Rows, edit: &Edit, ctx: &ReconcileContext<'_>) -> Result<Rows, WrapError> {
    let Some(editing) = rows.editing() else {
        tracing::debug!("edit ignored, no row is editing");
        return Ok(rows.clone());
    };
    let raw_line_index = editing.raw_line_index;
    let text = apply_operations(&editing.text, &[edit.to_operation()]);

    if !text.contains('\n') {
        let row = EditingRow {
            text,
            raw_line_index,
            is_selected: true,
            selection: None,
        };
        return Ok(Rows::from_parts(
            rows.head().to_vec(),
            Some(row),
            rows.tail().to_vec(),
        ));
    }

    let max_characters = get_max_characters(ctx.width, ctx.layout)?;
    let pieces: Vec<&str> = text.split('\n').collect();
    let added = pieces.len() - 1;
    let editing_line = raw_line_index + added;

    let params = WrapParams::new(
        ctx.layout,
        ctx.search,
        SelectionState::editing(editing_line),
    );
    let mut head = rows.head().to_vec();
    for (offset, piece) in pieces[..added].iter().enumerate() {
        for row in process_line(piece, raw_line_index + offset, max_characters, &params) {
            head.push(match row {
                Row::Display(row) => row,
                Row::Editing(row) => row.into_display(),
            });
        }
    }

    // Caret after whatever the replacement put on the new line
    let caret = edit
        .replacement
        .rsplit('\n')
        .next()
        .map_or(0, char_len);
    let row = EditingRow {
        text: pieces[added].to_string(),
        raw_line_index: editing_line,
        is_selected: true,
        selection: Some(TextSelection::caret(caret)),
    };

    let tail = shift_rows(rows.tail(), |index| index + added);

    tracing::debug!(
        raw_line_index,
        added,
        "split editing row on newline"
    );
    let rows = Rows::from_parts(head, Some(row), tail);
    debug_assert!(verify_rows(&rows, "apply_edit"));
    Ok(rows)
}

/// Merge the editing row into the previous raw line (backspace at column 0).
///
/// Unchanged when nothing is editing or the editing row is the first raw line.
pub fn delete_newline_before(rows: &Rows) -> Rows {
    let Some(editing) = rows.editing() else {
        return rows.clone();
    };
    let Some(previous_line) = editing.raw_line_index.checked_sub(1) else {
        return rows.clone();
    };

    let head = rows.head();
    let Some(first) = head
        .iter()
        .position(|row| row.raw_line_index == previous_line)
    else {
        tracing::warn!(
            previous_line,
            "previous raw line not found, cannot merge"
        );
        return rows.clone();
    };

    let previous_text: String = head[first..]
        .iter()
        .filter(|row| row.raw_line_index == previous_line)
        .map(|row| row.text.as_str())
        .collect();
    let seam = char_len(&previous_text);

    let merged = EditingRow {
        text: previous_text + &editing.text,
        raw_line_index: previous_line,
        is_selected: true,
        selection: Some(TextSelection::caret(seam)),
    };
    let tail = shift_rows(rows.tail(), |index| index.saturating_sub(1));

    tracing::debug!(previous_line, seam, "merged editing row into previous line");
    let rows = Rows::from_parts(head[..first].to_vec(), Some(merged), tail);
    debug_assert!(verify_rows(&rows, "delete_newline_before"));
    rows
}

/// Convert a row-relative edit into a document-relative one.
///
/// Offsets are clamped to the editing row's text, as [`apply_edit`] clamps
/// them, so the edit never reaches past the row's own newline.
pub fn compute_absolute_edit(rows: &Rows, edit: &Edit) -> Option<Edit> {
    let line_start = editing_line_start(rows)?;
    let len = char_len(&rows.editing()?.text);
    let start = edit.start.min(len);
    let end = edit.end.clamp(start, len);
    Some(Edit::new(
        start + line_start,
        end + line_start,
        edit.replacement.as_str(),
    ))
}

/// The document edit deleting the newline before the editing raw line
pub fn compute_delete_line_edit(rows: &Rows) -> Option<Edit> {
    if editing_raw_line_index(rows)? == 0 {
        return None;
    }
    let end = editing_line_start(rows)?;
    let start = end.checked_sub(1)?;
    Some(Edit::delete(start, end))
}

/// Document offset of the editing raw line.
///
/// Sums the text of every row before it plus one newline per raw line, so
/// wrapped lines count once however many fragments they span.
fn editing_line_start(rows: &Rows) -> Option<usize> {
    rows.editing()?;

    let head = rows.head();
    let text_len: usize = head.iter().map(|row| char_len(&row.text)).sum();
    let mut newlines = 0;
    let mut last_line = None;
    for row in head {
        if last_line != Some(row.raw_line_index) {
            newlines += 1;
            last_line = Some(row.raw_line_index);
        }
    }
    Some(text_len + newlines)
}

fn shift_rows(rows: &[DisplayRow], shift: impl Fn(usize) -> usize) -> Vec<DisplayRow> {
    rows.iter()
        .map(|row| DisplayRow {
            raw_line_index: shift(row.raw_line_index),
            ..row.clone()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wrap::process_lines;

    fn display(text: &str, raw_line_index: usize) -> Row {
        let row = EditingRow {
            is_selected: false,
            ..EditingRow::new(text, raw_line_index)
        };
        Row::Display(row.into_display())
    }

    fn rows_of(items: Vec<Row>) -> Rows {
        let mut rows = Rows::new();
        for row in items {
            rows.push(row);
        }
        rows
    }

    fn texts(rows: &Rows) -> Vec<(String, usize, bool)> {
        rows.iter()
            .map(|r| (r.text().to_string(), r.raw_line_index(), r.is_editing()))
            .collect()
    }

    fn wrapped(data: &str, max: usize, selection: SelectionState) -> Rows {
        let search = SearchState::default();
        let params = WrapParams::new(&LayoutConfig::default(), &search, selection);
        process_lines(data, max, &params)
    }

    fn ctx<'a>(layout: &'a LayoutConfig, search: &'a SearchState) -> ReconcileContext<'a> {
        ReconcileContext {
            layout,
            width: 100.0,
            search,
        }
    }

    #[test]
    fn test_edit_without_editing_row_is_noop() {
        let layout = LayoutConfig::default();
        let search = SearchState::default();
        let rows = rows_of(vec![display("foo", 0)]);
        let result = apply_edit(&rows, &Edit::insert(0, "x"), &ctx(&layout, &search)).unwrap();
        assert_eq!(result, rows);
        assert_eq!(compute_absolute_edit(&rows, &Edit::insert(0, "x")), None);
    }

    #[test]
    fn test_edit_in_place() {
        let layout = LayoutConfig::default();
        let search = SearchState::default();
        let rows = rows_of(vec![
            display("", 0),
            Row::Editing(EditingRow::new("foo", 1)),
        ]);
        let result = apply_edit(&rows, &Edit::new(0, 3, "bar"), &ctx(&layout, &search)).unwrap();
        assert_eq!(
            texts(&result),
            vec![("".into(), 0, false), ("bar".into(), 1, true)]
        );
        assert_eq!(result.editing().unwrap().selection, None);
    }

    #[test]
    fn test_newline_splits_and_renumbers() {
        let layout = LayoutConfig::default();
        let search = SearchState::default();
        let rows = wrapped("foo\nbarbaz\n12345678901234567890", 10, SelectionState::editing(1));
        let result = apply_edit(&rows, &Edit::insert(3, "\n"), &ctx(&layout, &search)).unwrap();

        let mut expected = wrapped("foo\nbar\nbaz\n12345678901234567890", 10, SelectionState::editing(2));
        let (head, editing, tail) = expected.clone().into_parts();
        let editing = editing.map(|row| EditingRow {
            selection: Some(TextSelection::caret(0)),
            ..row
        });
        expected = Rows::from_parts(head, editing, tail);
        assert_eq!(result, expected);
        assert_eq!(
            result.tail().iter().map(|r| r.raw_line_index).collect::<Vec<_>>(),
            vec![3, 3, 3]
        );
    }

    #[test]
    fn test_pasted_lines_split_into_several_raw_lines() {
        let layout = LayoutConfig::default();
        let search = SearchState::default();
        let rows = rows_of(vec![
            Row::Editing(EditingRow::new("ad", 0)),
            display("tail", 1),
        ]);
        let result = apply_edit(&rows, &Edit::insert(1, "b\nc\nxy"), &ctx(&layout, &search)).unwrap();
        assert_eq!(
            texts(&result),
            vec![
                ("ab".into(), 0, false),
                ("c".into(), 1, false),
                ("xyd".into(), 2, true),
                ("tail".into(), 3, false),
            ]
        );
        assert_eq!(
            result.editing().unwrap().selection,
            Some(TextSelection::caret(2))
        );
    }

    #[test]
    fn test_split_rewraps_long_head() {
        let layout = LayoutConfig::default();
        let search = SearchState::default();
        // width 100 fits 10 characters
        let rows = rows_of(vec![Row::Editing(EditingRow::new("abcdefghijklmnop", 0))]);
        let result = apply_edit(&rows, &Edit::insert(14, "\n"), &ctx(&layout, &search)).unwrap();
        assert_eq!(
            texts(&result),
            vec![
                ("abcdefghi".into(), 0, false),
                ("jklmn".into(), 0, false),
                ("op".into(), 1, true),
            ]
        );
        assert!(result.invariant_violation().is_none());
    }

    #[test]
    fn test_split_with_narrow_width_fails() {
        let layout = LayoutConfig::default();
        let search = SearchState::default();
        let rows = rows_of(vec![Row::Editing(EditingRow::new("ab", 0))]);
        let context = ReconcileContext {
            layout: &layout,
            width: 10.0,
            search: &search,
        };
        assert!(apply_edit(&rows, &Edit::insert(1, "\n"), &context).is_err());
        // No newline, no re-wrap, no width check
        assert!(apply_edit(&rows, &Edit::insert(1, "x"), &context).is_ok());
    }

    #[test]
    fn test_delete_newline_at_first_line_is_noop() {
        let rows = rows_of(vec![
            Row::Editing(EditingRow::new("", 0)),
            display("foo", 1),
        ]);
        assert_eq!(delete_newline_before(&rows), rows);
        assert_eq!(compute_delete_line_edit(&rows), None);
    }

    #[test]
    fn test_delete_newline_merges_into_previous() {
        let rows = rows_of(vec![
            display("", 0),
            Row::Editing(EditingRow::new("foo", 1)),
        ]);
        let result = delete_newline_before(&rows);
        assert_eq!(texts(&result), vec![("foo".into(), 0, true)]);
        assert_eq!(
            result.editing().unwrap().selection,
            Some(TextSelection::caret(0))
        );
    }

    #[test]
    fn test_delete_newline_renumbers_following_rows() {
        let rows = rows_of(vec![
            display("foo", 0),
            display("bar", 1),
            Row::Editing(EditingRow::new("baz", 2)),
            display("biz", 3),
        ]);
        let result = delete_newline_before(&rows);
        assert_eq!(
            texts(&result),
            vec![
                ("foo".into(), 0, false),
                ("barbaz".into(), 1, true),
                ("biz".into(), 2, false),
            ]
        );
        assert_eq!(
            result.editing().unwrap().selection,
            Some(TextSelection::caret(3))
        );
    }

    #[test]
    fn test_delete_newline_joins_wrapped_previous_line() {
        let rows = wrapped("abcdefghijklmnop\nxyz\nend", 10, SelectionState::editing(1));
        assert_eq!(rows.head().len(), 2);
        let result = delete_newline_before(&rows);
        assert_eq!(
            texts(&result),
            vec![
                ("abcdefghijklmnopxyz".into(), 0, true),
                ("end".into(), 1, false),
            ]
        );
        assert_eq!(
            result.editing().unwrap().selection,
            Some(TextSelection::caret(16))
        );
    }

    #[test]
    fn test_absolute_edit_after_wrapped_line() {
        let data = "abcdefghijklmnop\nxy\nfoo";
        let rows = wrapped(data, 10, SelectionState::editing(2));
        // Raw line 0 spans two rows
        assert_eq!(rows.editing_index(), Some(3));

        let edit = compute_absolute_edit(&rows, &Edit::new(1, 2, "X")).unwrap();
        assert_eq!(edit, Edit::new(21, 22, "X"));
        assert_eq!(&data[edit.start..edit.end], "o");

        let delete = compute_delete_line_edit(&rows).unwrap();
        assert_eq!(delete, Edit::delete(19, 20));
        assert_eq!(&data[delete.start..delete.end], "\n");
    }

    #[test]
    fn test_absolute_edit_on_first_line() {
        let rows = wrapped("foo\nbar", 10, SelectionState::editing(0));
        assert_eq!(
            compute_absolute_edit(&rows, &Edit::insert(3, "!")),
            Some(Edit::insert(3, "!"))
        );
    }
}
