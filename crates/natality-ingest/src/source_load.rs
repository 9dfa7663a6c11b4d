//! Shared result shape for file-set loading.

use crate::error::IngestError;

/// Records and per-file errors from loading one source kind. Failed files
/// are skipped; the pipeline continues with whatever loaded.
#[derive(Debug)]
pub struct SourceLoad<T> {
    pub records: Vec<T>,
    pub skipped: Vec<IngestError>,
    pub files_loaded: usize,
}

impl<T> Default for SourceLoad<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            skipped: Vec::new(),
            files_loaded: 0,
        }
    }
}
