//! Error types for source ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading and normalizing source files.
///
/// Failures are contained at the file level: the loaders log and skip the
/// offending source, collect the error, and keep going.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Sources directory not found or not a directory.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read file contents.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No candidate encoding decoded the file into a parseable table.
    #[error("no candidate encoding could decode {path}")]
    EncodingExhausted { path: PathBuf },

    /// The decoded text failed to parse as a delimited table.
    #[error("failed to parse {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// Table had no data rows after header and footer trimming.
    #[error("source table is empty: {path}")]
    EmptyTable { path: PathBuf },

    /// Discovered source file has no entry in the year map.
    #[error("no reporting year mapped for source file '{file_name}'")]
    NoYearMapping { file_name: String },

    /// No column header matched the territory keyword set.
    #[error("no territory column recognized in {path}")]
    NoTerritoryColumn { path: PathBuf },

    /// No column header matched the age-bracket keyword set.
    #[error("no age-bracket columns recognized in {path}")]
    NoBracketColumns { path: PathBuf },

    /// Year-map config file could not be loaded.
    #[error("failed to load year config {path}: {message}")]
    YearConfig { path: PathBuf, message: String },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
