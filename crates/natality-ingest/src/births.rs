//! Birth tabulation loading: column discovery, row filtering, count
//! parsing.
//!
//! Tabulations arrive as semicolon-delimited exports with three title
//! rows above the header, ten note rows below the data, and an unknown
//! text encoding. Columns are located heuristically through the
//! [`ColumnClassifier`]; rows are kept only when they carry the
//! sub-national marker prefix on the territory cell.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use natality_model::{AgeBracket, BirthRecord, ColumnClass, ColumnClassifier};

use crate::error::{IngestError, Result};
use crate::numeric::{ParsedNumber, parse_cell, parse_count};
use crate::source_load::SourceLoad;
use crate::table::{PROVIDER_ENCODINGS, ReadOptions, SourceTable, read_table_file};
use crate::year_map::YearMap;

/// Marker prefix on sub-national (state-level) territory rows. Regional
/// aggregates and the national total line carry no marker.
pub const STATE_MARKER: &str = ".. ";

/// The provider's fixed export framing.
pub fn provider_read_options() -> ReadOptions {
    ReadOptions {
        delimiter: b';',
        skip_rows: 3,
        skip_footer: 10,
    }
}

struct BirthColumns {
    territory: usize,
    brackets: Vec<usize>,
    total: Option<usize>,
}

fn discover_columns(
    table: &SourceTable,
    classifier: &dyn ColumnClassifier,
    path: &Path,
) -> Result<BirthColumns> {
    let territory = table
        .headers
        .iter()
        .position(|header| classifier.classify(header) == ColumnClass::Territory)
        .ok_or_else(|| IngestError::NoTerritoryColumn {
            path: path.to_path_buf(),
        })?;

    let mut brackets = Vec::new();
    let mut total = None;
    for (idx, header) in table.headers.iter().enumerate() {
        if idx == territory {
            continue;
        }
        match classifier.classify(header) {
            ColumnClass::YearTotal => {
                if total.is_none() {
                    total = Some(idx);
                }
            }
            ColumnClass::Bracket => brackets.push(idx),
            ColumnClass::Territory | ColumnClass::Other => {}
        }
    }
    if brackets.is_empty() {
        return Err(IngestError::NoBracketColumns {
            path: path.to_path_buf(),
        });
    }
    Ok(BirthColumns {
        territory,
        brackets,
        total,
    })
}

/// Parses one birth tabulation into records for the given reporting year.
pub fn records_from_table(
    table: &SourceTable,
    year: i32,
    classifier: &dyn ColumnClassifier,
    path: &Path,
) -> Result<Vec<BirthRecord>> {
    let columns = discover_columns(table, classifier, path)?;

    let mut records = Vec::new();
    for row in &table.rows {
        let raw_territory = table.cell(row, columns.territory);
        let Some(territory) = raw_territory.strip_prefix(STATE_MARKER) else {
            continue;
        };
        let territory = territory.trim();
        if territory.is_empty() {
            continue;
        }

        // A present-but-unparseable total drops the whole row; only an
        // absent total column defaults to zero.
        let year_total = match columns.total {
            Some(idx) => match parse_cell(table.cell(row, idx)) {
                ParsedNumber::Value(value) if value >= 0.0 => value as u64,
                _ => {
                    debug!(
                        source_file = %path.display(),
                        territory,
                        year,
                        "dropping row with unusable year total"
                    );
                    continue;
                }
            },
            None => 0,
        };

        for &column in &columns.brackets {
            let Some(birth_count) = parse_count(table.cell(row, column)) else {
                continue;
            };
            records.push(BirthRecord {
                territory: territory.to_string(),
                year,
                age_bracket: AgeBracket::canonicalize(&table.headers[column]),
                birth_count,
                year_total_births: year_total,
            });
        }
    }
    Ok(records)
}

/// Reads and normalizes one birth tabulation file.
pub fn load_birth_file(
    path: &Path,
    year: i32,
    classifier: &dyn ColumnClassifier,
) -> Result<Vec<BirthRecord>> {
    let table = read_table_file(path, &provider_read_options(), &PROVIDER_ENCODINGS)?;
    records_from_table(&table, year, classifier, path)
}

/// Loads every birth tabulation file, skipping unmapped, unreadable, or
/// schema-mismatched sources with a warning.
pub fn load_birth_files(
    paths: &[PathBuf],
    years: &YearMap,
    classifier: &dyn ColumnClassifier,
) -> SourceLoad<BirthRecord> {
    let mut load = SourceLoad::default();
    for path in paths {
        let year = match years.resolve(path) {
            Ok(year) => year,
            Err(error) => {
                warn!(source_file = %path.display(), %error, "skipping birth source");
                load.skipped.push(error);
                continue;
            }
        };
        match load_birth_file(path, year, classifier) {
            Ok(records) => {
                debug!(
                    source_file = %path.display(),
                    year,
                    record_count = records.len(),
                    "birth source loaded"
                );
                load.records.extend(records);
                load.files_loaded += 1;
            }
            Err(error) => {
                warn!(source_file = %path.display(), %error, "skipping birth source");
                load.skipped.push(error);
            }
        }
    }
    load
}
