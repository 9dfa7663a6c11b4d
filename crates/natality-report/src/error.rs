//! Error types for output writing.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while persisting output tables.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Failed to create the output directory.
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write or replace an output file.
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize a record into CSV.
    #[error("failed to serialize csv {path}: {message}")]
    Csv { path: PathBuf, message: String },
}

/// Result type for output operations.
pub type Result<T> = std::result::Result<T, ReportError>;
