//! Row state dumps for development diagnostics
//!
//! Serializes the row sequence to JSON when an invariant check fails, so the
//! offending shape ends up in the log next to the error.

use crate::rows::Rows;

/// Pretty JSON for `rows`
pub fn rows_to_json(rows: &Rows) -> String {
    serde_json::to_string_pretty(rows).unwrap_or_else(|e| format!("<unserializable rows: {}>", e))
}

/// Log an error with a dump of `rows` if they break the row invariants.
///
/// Returns whether the rows are well formed.
pub fn verify_rows(rows: &Rows, origin: &str) -> bool {
    match rows.invariant_violation() {
        None => true,
        Some(violation) => {
            tracing::error!(
                origin,
                %violation,
                rows = %rows_to_json(rows),
                "rows must ascend"
            );
            false
        }
    }
}
