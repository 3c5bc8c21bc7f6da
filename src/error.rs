//! Error types for prefsync.
//!
//! Only the I/O collaborators fail. Directive parsing and merging are total
//! over their inputs and never produce a `SyncError`.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the fetch, selection, storage and configuration layers
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Failed to fetch baseline from {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("No profile selected: {0}")]
    Selection(String),

    #[error("Preference file not found: {0}")]
    MissingFile(PathBuf),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Prompt failed: {0}")]
    Prompt(String),
}

impl SyncError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SyncError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<config::ConfigError> for SyncError {
    fn from(err: config::ConfigError) -> Self {
        SyncError::Config(err.to_string())
    }
}

impl From<dialoguer::Error> for SyncError {
    fn from(err: dialoguer::Error) -> Self {
        SyncError::Prompt(err.to_string())
    }
}
