//! Error types for the result store.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing result files.
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O error on a result or export file
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File being accessed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// JSON encoding or decoding failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An existing file could not be decoded; it is left untouched
    #[error("refusing to modify malformed result file {path}: {reason}")]
    Malformed {
        /// File that failed to decode
        path: PathBuf,
        /// Decoder message
        reason: String,
    },

    /// CSV export failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Moving the temporary file over the target failed
    #[error("failed to replace {path}: {source}")]
    Persist {
        /// Target file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
