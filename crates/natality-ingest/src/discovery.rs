//! Source-file discovery.

use std::path::{Path, PathBuf};

use crate::error::{IngestError, Result};

/// File-name prefix of indicator exports.
pub const INDICATOR_PREFIX: &str = "data";

/// File-name prefix of birth tabulation exports.
pub const BIRTH_PREFIX: &str = "sinasc_cnv_nvuf";

/// Discovered source files split by kind, each sorted by file name.
#[derive(Debug, Clone, Default)]
pub struct DiscoveredSources {
    pub indicators: Vec<PathBuf>,
    pub births: Vec<PathBuf>,
}

impl DiscoveredSources {
    pub fn is_empty(&self) -> bool {
        self.indicators.is_empty() && self.births.is_empty()
    }

    pub fn file_count(&self) -> usize {
        self.indicators.len() + self.births.len()
    }
}

/// Lists all CSV files in a directory, sorted by file name.
pub fn list_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|source| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|source| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("csv"))
            .unwrap_or(false);
        if is_csv {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Splits the CSV files of a sources directory by provider prefix.
/// Files matching neither prefix are ignored.
pub fn discover_sources(dir: &Path) -> Result<DiscoveredSources> {
    let mut discovered = DiscoveredSources::default();
    for path in list_csv_files(dir)? {
        let stem = path
            .file_stem()
            .and_then(|value| value.to_str())
            .unwrap_or("")
            .to_lowercase();
        if stem.starts_with(BIRTH_PREFIX) {
            discovered.births.push(path);
        } else if stem.starts_with(INDICATOR_PREFIX) {
            discovered.indicators.push(path);
        }
    }
    Ok(discovered)
}
