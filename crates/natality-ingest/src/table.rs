//! Delimited-table reading with candidate-encoding fallback.
//!
//! Source files arrive with an unknown text encoding and provider-specific
//! framing (title rows above the header, note rows below the data). The
//! reader decodes raw bytes with a fixed ordered candidate list and keeps
//! the first candidate that both decodes cleanly and parses into a table.
//! Taking bytes rather than a path keeps the parse pure and testable.

use std::path::Path;

use csv::ReaderBuilder;
use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};

use crate::error::{IngestError, Result};

/// Candidate encodings for birth tabulations, tried in order. The
/// provider exports latin-1/cp1252 variants, all windows-1252 under the
/// WHATWG encoding standard.
pub const PROVIDER_ENCODINGS: [&Encoding; 2] = [WINDOWS_1252, UTF_8];

/// Strict UTF-8 only, for well-encoded exports.
pub const UTF8_ONLY: [&Encoding; 1] = [UTF_8];

/// Framing options for one provider layout.
#[derive(Debug, Clone, Copy)]
pub struct ReadOptions {
    pub delimiter: u8,
    /// Title rows above the header row.
    pub skip_rows: usize,
    /// Note rows below the last data row.
    pub skip_footer: usize,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            skip_rows: 0,
            skip_footer: 0,
        }
    }
}

/// A decoded, trimmed table: one header row plus data rows padded to the
/// header width.
#[derive(Debug, Clone)]
pub struct SourceTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl SourceTable {
    /// Cell value at (row, column), empty string when the row is short.
    pub fn cell<'a>(&'a self, row: &'a [String], column: usize) -> &'a str {
        row.get(column).map(String::as_str).unwrap_or("")
    }
}

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}').trim_matches('"');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

enum ParseFailure {
    Csv(csv::Error),
    Empty,
}

fn parse_table(text: &str, options: &ReadOptions) -> std::result::Result<SourceTable, ParseFailure> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(options.delimiter)
        .from_reader(text.as_bytes());
    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(ParseFailure::Csv)?;
        let row: Vec<String> = record.iter().map(normalize_cell).collect();
        if row.iter().all(|value| value.is_empty()) {
            continue;
        }
        raw_rows.push(row);
    }
    if raw_rows.len() <= options.skip_rows {
        return Err(ParseFailure::Empty);
    }
    let body = &raw_rows[options.skip_rows..];
    let keep = body.len().saturating_sub(options.skip_footer);
    let Some((header_row, data_rows)) = body[..keep].split_first() else {
        return Err(ParseFailure::Empty);
    };
    let headers: Vec<String> = header_row.iter().map(|value| normalize_header(value)).collect();
    let mut rows = Vec::with_capacity(data_rows.len());
    for record in data_rows {
        let mut row = Vec::with_capacity(headers.len());
        for idx in 0..headers.len() {
            row.push(record.get(idx).cloned().unwrap_or_default());
        }
        rows.push(row);
    }
    Ok(SourceTable { headers, rows })
}

/// Decodes and parses raw bytes, trying each candidate encoding in order.
///
/// A candidate is rejected when it reports decode errors or the decoded
/// text fails to parse as a delimited table; the first surviving
/// candidate wins. `path` is used for error context only.
pub fn read_table_bytes(
    path: &Path,
    bytes: &[u8],
    options: &ReadOptions,
    candidates: &[&'static Encoding],
) -> Result<SourceTable> {
    let mut empty = false;
    let mut last_csv_error = None;
    for encoding in candidates {
        let (text, _, had_errors) = encoding.decode(bytes);
        if had_errors {
            continue;
        }
        match parse_table(&text, options) {
            Ok(table) => return Ok(table),
            Err(ParseFailure::Empty) => {
                empty = true;
            }
            Err(ParseFailure::Csv(error)) => {
                last_csv_error = Some(error.to_string());
            }
        }
    }
    if empty {
        Err(IngestError::EmptyTable {
            path: path.to_path_buf(),
        })
    } else if let Some(message) = last_csv_error {
        Err(IngestError::CsvParse {
            path: path.to_path_buf(),
            message,
        })
    } else {
        Err(IngestError::EncodingExhausted {
            path: path.to_path_buf(),
        })
    }
}

/// File-path wrapper over [`read_table_bytes`].
pub fn read_table_file(
    path: &Path,
    options: &ReadOptions,
    candidates: &[&'static Encoding],
) -> Result<SourceTable> {
    let bytes = std::fs::read(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    read_table_bytes(path, &bytes, options, candidates)
}
