//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::SyncError;

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &SyncError) -> String {
    match e {
        SyncError::MissingFile(path) => format!(
            "error: preference file not found: {}\nCreate it (it may be empty) or choose another profile.",
            path.display()
        ),
        SyncError::Selection(msg) => format!("error: no profile selected: {}", msg),
        other => format!("error: {}", other),
    }
}
