//! Update function for the Elm-style architecture
//!
//! All state transformations of a [`BufferModel`] flow through [`update`].
//! Edits on the open row are reconciled incrementally and buffered; every
//! other message flushes that buffer into the document before the rows are
//! re-derived, so no typed text is lost to a full re-wrap.

use crate::commands::Cmd;
use crate::error::EditError;
use crate::highlight::is_character_index_selected_word;
use crate::messages::Msg;
use crate::model::BufferModel;
use crate::reconcile::{editing_raw_line_index, ReconcileContext};
use crate::rows::{Edit, RawLocation};
use crate::search::{
    get_all_match_locations, get_next_location, get_previous_location, location_at_offset,
    location_offset, replace_word_change, shift_range, SearchState,
};
use crate::text_ops::{make_replace_all_change, Operation, Pattern, TextChangeAction};
use crate::util::text::char_len;
use crate::word::{get_raw_location, multiline_locate_word};
use crate::wrap::get_max_characters;

#[cfg(debug_assertions)]
use crate::tracing::RowsSnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

/// Main update function
///
/// In debug builds, this wraps with tracing instrumentation.
#[inline]
pub fn update(model: &mut BufferModel, msg: Msg) -> Result<Option<Cmd>, EditError> {
    #[cfg(debug_assertions)]
    {
        update_traced(model, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(model, msg)
    }
}

fn update_inner(model: &mut BufferModel, msg: Msg) -> Result<Option<Cmd>, EditError> {
    match msg {
        Msg::SetText(text) => {
            model.document.set_text(text);
            clamp_selection(model);
            revalidate_search(model);
            model.rederive()?;
            Ok(None)
        }
        Msg::Resize(width) => {
            // Validate before touching state so a bad width leaves the model as it was
            get_max_characters(width, &model.layout)?;
            let flushed = commit_pending(model);
            model.width = width;
            model.editing_row_height = None;
            model.rederive()?;
            Ok(flushed.map(Cmd::DocumentChanged))
        }

        Msg::Search(word) => {
            let flushed = commit_pending(model);
            let word = word.filter(|w| !w.is_empty());
            let location = word
                .as_deref()
                .and_then(|w| get_next_location(w, None, model.document.text()));
            model.search = SearchState::new(word, location);
            model.rederive()?;
            Ok(Cmd::batch([
                flushed.map(Cmd::DocumentChanged),
                location.map(|l| Cmd::ScrollToRawLine(l.line_index)),
            ]))
        }
        Msg::SearchNext => step_search(model, get_next_location),
        Msg::SearchPrevious => step_search(model, get_previous_location),
        Msg::ReplaceCurrent(replacement) => replace_current(model, &replacement),
        Msg::ReplaceAll(replacement) => replace_all(model, replacement),

        Msg::SelectLine(line) => select_line(model, line),
        Msg::NextLine => {
            let count = model.raw_line_count();
            let next = match model.selected_line_index {
                None => 0,
                Some(line) if line + 1 < count => line + 1,
                Some(_) => return Ok(None),
            };
            select_line(model, Some(next))
        }
        Msg::PreviousLine => {
            let previous = match model.selected_line_index {
                None => model.raw_line_count().saturating_sub(1),
                Some(0) => return Ok(None),
                Some(line) => line - 1,
            };
            select_line(model, Some(previous))
        }
        Msg::TapWord {
            row_index,
            character_index,
        } => tap_word(model, row_index, character_index),

        Msg::SetEditing(is_editing) => {
            if is_editing == model.is_editing {
                return Ok(None);
            }
            if is_editing && model.selected_line_index.is_none() {
                tracing::debug!("no line selected, editing not opened");
                return Ok(None);
            }
            let flushed = commit_pending(model);
            model.is_editing = is_editing;
            model.editing_row_height = None;
            model.rederive()?;
            Ok(flushed.map(Cmd::DocumentChanged))
        }
        Msg::Edit(edits) => apply_edits(model, &edits),
        Msg::DeleteNewline => {
            if model.rows.editing().is_none() {
                return Ok(None);
            }
            model.rows = model.pending.delete_newline(&model.rows);
            follow_editing_row(model);
            Ok(None)
        }
        Msg::Commit => {
            let Some(action) = commit_pending(model) else {
                return Ok(None);
            };
            model.rederive()?;
            Ok(Some(Cmd::DocumentChanged(action)))
        }
        Msg::Undo => {
            let flushed = commit_pending(model);
            let tracked = model
                .document
                .last_change()
                .and_then(|action| track_search(model, &action.undo_ops));
            let Some(action) = model.document.undo() else {
                if flushed.is_some() {
                    model.rederive()?;
                }
                return Ok(flushed.map(Cmd::DocumentChanged));
            };
            clamp_selection(model);
            restore_search(model, tracked);
            model.rederive()?;
            Ok(Cmd::batch([
                flushed.map(Cmd::DocumentChanged),
                Some(Cmd::DocumentChanged(action.inverse())),
            ]))
        }
        Msg::EditingRowMeasured(height) => {
            if model.rows.editing().is_some() && height.is_finite() && height > 0.0 {
                model.editing_row_height = Some(height);
            }
            Ok(None)
        }
    }
}

/// Fold pending edits into the document.
///
/// Rows are left as the reconciler produced them; callers re-derive.
fn commit_pending(model: &mut BufferModel) -> Option<TextChangeAction> {
    if model.pending.is_empty() {
        return None;
    }
    let action = model.pending.to_change_action(model.document.text());
    model.pending.reset();
    follow_editing_row(model);

    let action = action?;
    tracing::debug!(ops = action.ops.len(), "committing pending edits");
    let tracked = track_search(model, &action.ops);
    model.document.apply(action.clone());
    restore_search(model, tracked);
    Some(action)
}

/// Document range of the current match after `ops` apply to the current text
fn track_search(model: &BufferModel, ops: &[Operation]) -> Option<(usize, usize)> {
    let location = model.search.location?;
    let start = location_offset(&location, model.document.text());
    let len = location.end - location.start;
    shift_range(ops, start, start + len).map(|start| (start, len))
}

/// Re-anchor the current match on the changed text, dropping it if the
/// change rewrote it
fn restore_search(model: &mut BufferModel, tracked: Option<(usize, usize)>) {
    model.search.location =
        tracked.map(|(start, len)| location_at_offset(model.document.text(), start, len));
    revalidate_search(model);
}

fn apply_edits(model: &mut BufferModel, edits: &[Edit]) -> Result<Option<Cmd>, EditError> {
    if model.rows.editing().is_none() {
        tracing::debug!(count = edits.len(), "edits ignored, no row is editing");
        return Ok(None);
    }
    let ctx = ReconcileContext {
        layout: &model.layout,
        width: model.width,
        search: &model.search,
    };
    model.rows = model.pending.apply_edits(&model.rows, edits, &ctx)?;
    model.editing_row_height = None;
    follow_editing_row(model);
    Ok(None)
}

/// Keep the selected line on the editing row as newlines move it
fn follow_editing_row(model: &mut BufferModel) {
    if let Some(raw_line_index) = editing_raw_line_index(&model.rows) {
        model.selected_line_index = Some(raw_line_index);
    }
}

fn clamp_selection(model: &mut BufferModel) {
    let count = model.raw_line_count();
    if model.selected_line_index.is_some_and(|line| line >= count) {
        model.selected_line_index = Some(count - 1);
    }
}

/// Drop a search location that no longer points at the search word
fn revalidate_search(model: &mut BufferModel) {
    let Some(location) = model.search.location else {
        return;
    };
    let still_matches = model.search.word().is_some_and(|word| {
        get_all_match_locations(word, model.document.text()).contains(&location)
    });
    if !still_matches {
        model.search.location = None;
    }
}

fn select_line(model: &mut BufferModel, line: Option<usize>) -> Result<Option<Cmd>, EditError> {
    let flushed = commit_pending(model);
    let count = model.raw_line_count();
    model.selected_line_index = line.filter(|line| *line < count);
    model.editing_row_height = None;
    model.rederive()?;
    Ok(Cmd::batch([
        flushed.map(Cmd::DocumentChanged),
        model.selected_line_index.map(Cmd::ScrollToRawLine),
    ]))
}

fn step_search(
    model: &mut BufferModel,
    step: fn(&str, Option<&RawLocation>, &str) -> Option<RawLocation>,
) -> Result<Option<Cmd>, EditError> {
    let Some(word) = model.search.word().map(str::to_string) else {
        return Ok(None);
    };
    let flushed = commit_pending(model);
    let location = step(&word, model.search.location.as_ref(), model.document.text());
    model.search.location = location;
    model.rederive()?;
    Ok(Cmd::batch([
        flushed.map(Cmd::DocumentChanged),
        location.map(|l| Cmd::ScrollToRawLine(l.line_index)),
    ]))
}

fn tap_word(
    model: &mut BufferModel,
    row_index: usize,
    character_index: usize,
) -> Result<Option<Cmd>, EditError> {
    if model.rows.editing().is_some() {
        tracing::debug!(row_index, "tap ignored while a row is editing");
        return Ok(None);
    }
    let Some(row) = model.rows.get(row_index) else {
        return Ok(None);
    };
    let raw_line_index = row.raw_line_index();

    let matched = multiline_locate_word(character_index, row_index, &model.rows);
    let location = get_raw_location(&matched.locations, row, row_index);
    let is_current = is_character_index_selected_word(character_index, row.text_sections());

    match (matched.word, location) {
        (Some(_), Some(location)) if is_current => Ok(Some(Cmd::ReplaceRequested(location))),
        (Some(word), Some(location)) => {
            model.search = SearchState::new(Some(word.clone()), Some(location));
            model.rederive()?;
            Ok(Some(Cmd::WordSelected { word, location }))
        }
        _ => {
            model.selected_line_index = Some(raw_line_index);
            model.rederive()?;
            Ok(Some(Cmd::LineSelected(raw_line_index)))
        }
    }
}

fn replace_current(model: &mut BufferModel, replacement: &str) -> Result<Option<Cmd>, EditError> {
    let flushed = commit_pending(model);
    let (Some(word), Some(location)) = (
        model.search.word().map(str::to_string),
        model.search.location,
    ) else {
        if flushed.is_some() {
            model.rederive()?;
        }
        return Ok(flushed.map(Cmd::DocumentChanged));
    };

    let action = replace_word_change(replacement, &location, model.document.text());
    model.document.apply(action.clone());

    // Resume after the inserted text so a replacement containing the word
    // is not matched again
    let resume = location.start + char_len(replacement);
    let matches = get_all_match_locations(&word, model.document.text());
    let next = matches
        .iter()
        .find(|l| {
            l.line_index > location.line_index
                || (l.line_index == location.line_index && l.start >= resume)
        })
        .or_else(|| matches.first())
        .copied();
    model.search.location = next;
    model.rederive()?;

    Ok(Cmd::batch([
        flushed.map(Cmd::DocumentChanged),
        Some(Cmd::DocumentChanged(action)),
        next.map(|l| Cmd::ScrollToRawLine(l.line_index)),
    ]))
}

fn replace_all(model: &mut BufferModel, replacement: String) -> Result<Option<Cmd>, EditError> {
    let Some(word) = model.search.word().map(str::to_string) else {
        return Ok(None);
    };
    let flushed = commit_pending(model);
    let action = make_replace_all_change(
        model.document.text(),
        &Pattern::Literal(word),
        &replacement,
    )?;
    let changed = (!action.is_empty()).then(|| {
        model.document.apply(action.clone());
        action
    });

    model.search = SearchState::new(Some(replacement), None);
    model.rederive()?;
    Ok(Cmd::batch([
        flushed.map(Cmd::DocumentChanged),
        changed.map(Cmd::DocumentChanged),
    ]))
}

/// Traced update wrapper (debug builds only)
///
/// Captures before/after row summaries and logs their diff.
#[cfg(debug_assertions)]
fn update_traced(model: &mut BufferModel, msg: Msg) -> Result<Option<Cmd>, EditError> {
    // Measurements arrive on every layout pass
    let is_noisy = matches!(&msg, Msg::EditingRowMeasured(_));

    let msg_name = format!("{:?}", msg);
    let _span = if is_noisy {
        None
    } else {
        Some(span!(Level::DEBUG, "update", msg = %msg_name).entered())
    };

    let before = RowsSnapshot::from_rows(&model.rows);
    if !is_noisy {
        debug!(target: "message", msg = %msg_name, "processing");
    }

    let result = update_inner(model, msg);

    let after = RowsSnapshot::from_rows(&model.rows);
    if let Some(diff) = before.diff(&after) {
        debug!(target: "rows", %diff, "state changed");
    }
    if let Err(ref err) = result {
        debug!(target: "message", msg = %msg_name, %err, "update failed");
    }

    result
}
