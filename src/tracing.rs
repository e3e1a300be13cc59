//! Debug tracing infrastructure
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=softwrap::reconcile=trace` - module-level filtering
//!
//! Logs are also written to `~/.config/softwrap/logs/softwrap.log` with daily rotation.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::rows::Rows;

const LOG_FILE: &str = "softwrap.log";

/// Install console logging filtered by `RUST_LOG` (default `warn`) and a
/// debug-level daily log file.
///
/// Does nothing if the host already installed a global subscriber. Keep the
/// returned guard alive for as long as file logs should be flushed.
pub fn init() -> Option<WorkerGuard> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(env_filter);

    let (file, guard) = match crate::config_paths::ensure_logs_dir() {
        Ok(dir) => {
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, LOG_FILE));
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_line_number(true)
                .with_filter(EnvFilter::new("softwrap=debug"));
            (Some(layer), Some(guard))
        }
        Err(err) => {
            eprintln!("softwrap: file logging disabled: {}", err);
            (None, None)
        }
    };

    tracing_subscriber::registry()
        .with(console)
        .with(file)
        .try_init()
        .ok()
        .and(guard)
}

/// Lightweight summary of a row sequence for diffing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowsSnapshot {
    pub row_count: usize,
    pub raw_line_count: usize,
    pub editing: Option<EditingInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditingInfo {
    pub row_index: usize,
    pub raw_line_index: usize,
    pub len: usize,
}

impl RowsSnapshot {
    pub fn from_rows(rows: &Rows) -> Self {
        Self {
            row_count: rows.len(),
            raw_line_count: rows.iter().last().map_or(0, |row| row.raw_line_index() + 1),
            editing: rows.editing_index().zip(rows.editing()).map(|(row_index, row)| {
                EditingInfo {
                    row_index,
                    raw_line_index: row.raw_line_index,
                    len: row.text.chars().count(),
                }
            }),
        }
    }

    /// Describe what changed between two snapshots
    pub fn diff(&self, other: &RowsSnapshot) -> Option<String> {
        let mut changes = Vec::new();

        if self.row_count != other.row_count {
            changes.push(format!("rows: {} → {}", self.row_count, other.row_count));
        }
        if self.raw_line_count != other.raw_line_count {
            changes.push(format!(
                "raw lines: {} → {}",
                self.raw_line_count, other.raw_line_count
            ));
        }
        match (&self.editing, &other.editing) {
            (None, Some(after)) => changes.push(format!(
                "editing opened at row {} (raw {})",
                after.row_index, after.raw_line_index
            )),
            (Some(_), None) => changes.push("editing closed".to_string()),
            (Some(before), Some(after)) if before != after => changes.push(format!(
                "editing row {}:{} len {} → {}:{} len {}",
                before.row_index,
                before.raw_line_index,
                before.len,
                after.row_index,
                after.raw_line_index,
                after.len
            )),
            _ => {}
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}
