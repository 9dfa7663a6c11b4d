//! Indicator source loading and header normalization.
//!
//! Each indicator export reports one year of sub-national composite
//! scores. Headers are renamed to the canonical schema through a fixed
//! dictionary; companion ranking columns are recognized so they can be
//! discarded deliberately, and anything unrecognized is dropped.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use natality_model::IndicatorRecord;

use crate::error::Result;
use crate::numeric::parse_plain_f64;
use crate::source_load::SourceLoad;
use crate::table::{ReadOptions, SourceTable, UTF8_ONLY, read_table_file};
use crate::year_map::YearMap;

/// Canonical targets for recognized indicator headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IndicatorField {
    Territory,
    Composite,
    Income,
    Education,
    Longevity,
    /// "Posição IDHM*" ranking companions, discarded after matching.
    Rank,
}

fn recognize_header(header: &str) -> Option<IndicatorField> {
    let normalized = header.trim().to_lowercase();
    match normalized.as_str() {
        "territorialidade" => Some(IndicatorField::Territory),
        "idhm" => Some(IndicatorField::Composite),
        "idhm renda" => Some(IndicatorField::Income),
        "idhm educação" | "idhm educacao" => Some(IndicatorField::Education),
        "idhm longevidade" => Some(IndicatorField::Longevity),
        other if other.starts_with("posição idhm") || other.starts_with("posicao idhm") => {
            Some(IndicatorField::Rank)
        }
        _ => None,
    }
}

/// Parses one indicator table into records for the given reporting year.
pub fn records_from_table(table: &SourceTable, year: i32) -> Vec<IndicatorRecord> {
    let fields: Vec<Option<IndicatorField>> = table
        .headers
        .iter()
        .map(|header| recognize_header(header))
        .collect();
    let territory_column = fields
        .iter()
        .position(|field| *field == Some(IndicatorField::Territory));
    let Some(territory_column) = territory_column else {
        return Vec::new();
    };

    let column_for = |wanted: IndicatorField| -> Option<usize> {
        fields.iter().position(|field| *field == Some(wanted))
    };
    let composite_column = column_for(IndicatorField::Composite);
    let income_column = column_for(IndicatorField::Income);
    let education_column = column_for(IndicatorField::Education);
    let longevity_column = column_for(IndicatorField::Longevity);

    let value_at = |row: &[String], column: Option<usize>| -> Option<f64> {
        column.and_then(|idx| parse_plain_f64(row.get(idx).map(String::as_str).unwrap_or("")))
    };

    let mut records = Vec::new();
    for row in &table.rows {
        let territory = table.cell(row, territory_column).trim();
        if territory.is_empty() {
            continue;
        }
        let record = IndicatorRecord {
            territory: territory.to_string(),
            year,
            composite_index: value_at(row, composite_column),
            sub_index_income: value_at(row, income_column),
            sub_index_education: value_at(row, education_column),
            sub_index_longevity: value_at(row, longevity_column),
        }
        .with_derived_composite();
        records.push(record);
    }
    records
}

/// Reads and normalizes one indicator file.
pub fn load_indicator_file(path: &Path, year: i32) -> Result<Vec<IndicatorRecord>> {
    let table = read_table_file(path, &ReadOptions::default(), &UTF8_ONLY)?;
    let has_territory = table
        .headers
        .iter()
        .any(|header| recognize_header(header) == Some(IndicatorField::Territory));
    if !has_territory {
        return Err(crate::error::IngestError::NoTerritoryColumn {
            path: path.to_path_buf(),
        });
    }
    Ok(records_from_table(&table, year))
}

/// Loads every indicator file, skipping unmapped or unreadable sources
/// with a warning.
pub fn load_indicator_files(paths: &[PathBuf], years: &YearMap) -> SourceLoad<IndicatorRecord> {
    let mut load = SourceLoad::default();
    for path in paths {
        let year = match years.resolve(path) {
            Ok(year) => year,
            Err(error) => {
                warn!(source_file = %path.display(), %error, "skipping indicator source");
                load.skipped.push(error);
                continue;
            }
        };
        match load_indicator_file(path, year) {
            Ok(records) => {
                debug!(
                    source_file = %path.display(),
                    year,
                    record_count = records.len(),
                    "indicator source loaded"
                );
                load.records.extend(records);
                load.files_loaded += 1;
            }
            Err(error) => {
                warn!(source_file = %path.display(), %error, "skipping indicator source");
                load.skipped.push(error);
            }
        }
    }
    load
}
