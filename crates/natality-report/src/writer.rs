//! CSV output writing with atomic whole-file replacement.
//!
//! Each table is written to a `.tmp` sibling and renamed into place so a
//! concurrent reader never observes a truncated file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use natality_model::{BirthRecord, ComparisonRecord, IndicatorRecord};

use crate::error::{ReportError, Result};

/// File name of the joined comparison table.
pub const COMPARISON_FILE: &str = "comparison.csv";

/// File name of the normalized pre-join indicator table.
pub const INDICATORS_FILE: &str = "indicators.csv";

/// File name of the aggregated pre-join birth table.
pub const BIRTHS_FILE: &str = "births.csv";

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|value| value.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_csv_atomic<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    let tmp = temp_sibling(path);
    let mut writer = csv::Writer::from_path(&tmp).map_err(|error| ReportError::Csv {
        path: tmp.clone(),
        message: error.to_string(),
    })?;
    for record in records {
        writer.serialize(record).map_err(|error| ReportError::Csv {
            path: tmp.clone(),
            message: error.to_string(),
        })?;
    }
    writer.flush().map_err(|source| ReportError::Io {
        path: tmp.clone(),
        source,
    })?;
    drop(writer);
    fs::rename(&tmp, path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

fn write_table<T: Serialize>(dir: &Path, file_name: &str, records: &[T]) -> Result<PathBuf> {
    fs::create_dir_all(dir).map_err(|source| ReportError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;
    let path = dir.join(file_name);
    write_csv_atomic(&path, records)?;
    info!(
        output_file = %path.display(),
        record_count = records.len(),
        "output written"
    );
    Ok(path)
}

/// Writes the joined comparison table.
pub fn write_comparison(dir: &Path, records: &[ComparisonRecord]) -> Result<PathBuf> {
    write_table(dir, COMPARISON_FILE, records)
}

/// Writes the normalized pre-join indicator table.
pub fn write_indicators(dir: &Path, records: &[IndicatorRecord]) -> Result<PathBuf> {
    write_table(dir, INDICATORS_FILE, records)
}

/// Writes the aggregated pre-join birth table.
pub fn write_births(dir: &Path, records: &[BirthRecord]) -> Result<PathBuf> {
    write_table(dir, BIRTHS_FILE, records)
}
