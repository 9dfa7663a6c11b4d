//! Batch pipeline with explicit stages.
//!
//! The pipeline follows these stages in order:
//! 1. **Load**: discover source files, check year mappings, load both
//!    source kinds (independent of each other)
//! 2. **Assemble**: aggregate births, compute shares, join with the
//!    indicator table
//! 3. **Output**: write the comparison table plus the two per-source
//!    tables
//!
//! Each stage takes the output of the previous stage and returns typed
//! results. Failures are contained at the file level; only "no usable
//! input sources" terminates a run.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use natality_assemble::{AssembleError, aggregate_births, assemble};
use natality_ingest::{SourceYears, discover_sources, load_birth_files, load_indicator_files};
use natality_model::{BirthRecord, ColumnClassifier, ComparisonRecord, IndicatorRecord};
use natality_report::{write_births, write_comparison, write_indicators};

use crate::types::{OutputFiles, StageCounts};

/// Result of the load stage.
#[derive(Debug)]
pub struct LoadResult {
    pub indicators: Vec<IndicatorRecord>,
    pub births: Vec<BirthRecord>,
    pub indicator_counts: StageCounts,
    pub birth_counts: StageCounts,
    /// Per-file skip reasons from both source kinds.
    pub skipped: Vec<String>,
}

/// Discover and load all source files in a folder.
///
/// Unmapped, unreadable, and schema-mismatched files are skipped with a
/// warning and collected into `skipped`.
pub fn load(
    sources_dir: &Path,
    years: &SourceYears,
    classifier: &dyn ColumnClassifier,
) -> Result<LoadResult> {
    let span = info_span!("load", sources_dir = %sources_dir.display());
    let _guard = span.enter();
    let start = Instant::now();

    let discovered = discover_sources(sources_dir).context("discover sources")?;
    let unmapped = years.validate(&discovered.indicators, &discovered.births);
    if !unmapped.is_empty() {
        warn!(
            unmapped_files = unmapped.len(),
            "discovered files missing year mappings"
        );
    }

    let indicator_load = load_indicator_files(&discovered.indicators, &years.indicators);
    let birth_load = load_birth_files(&discovered.births, &years.births, classifier);

    let mut skipped: Vec<String> = Vec::new();
    skipped.extend(indicator_load.skipped.iter().map(|error| error.to_string()));
    skipped.extend(birth_load.skipped.iter().map(|error| error.to_string()));

    info!(
        indicator_files = indicator_load.files_loaded,
        indicator_records = indicator_load.records.len(),
        birth_files = birth_load.files_loaded,
        birth_records = birth_load.records.len(),
        skipped_files = skipped.len(),
        duration_ms = start.elapsed().as_millis(),
        "load complete"
    );

    Ok(LoadResult {
        indicator_counts: StageCounts {
            files_discovered: discovered.indicators.len(),
            files_loaded: indicator_load.files_loaded,
            records: indicator_load.records.len(),
        },
        birth_counts: StageCounts {
            files_discovered: discovered.births.len(),
            files_loaded: birth_load.files_loaded,
            records: birth_load.records.len(),
        },
        indicators: indicator_load.records,
        births: birth_load.records,
        skipped,
    })
}

/// Result of the assemble stage.
#[derive(Debug)]
pub struct AssembleResult {
    /// Aggregated pre-join birth records, persisted as the births table.
    pub aggregated_births: Vec<BirthRecord>,
    /// Joined comparison records; empty when the join came up dry.
    pub comparison: Vec<ComparisonRecord>,
}

/// Aggregate births and join against the indicator table.
///
/// An empty join is not terminal: the per-source outputs remain
/// available, so it degrades to an empty comparison with a warning.
pub fn assemble_stage(indicators: &[IndicatorRecord], births: &[BirthRecord]) -> AssembleResult {
    let span = info_span!("assemble");
    let _guard = span.enter();
    let start = Instant::now();

    let aggregated_births = aggregate_births(births);
    let comparison = match assemble(indicators, &aggregated_births) {
        Ok(records) => records,
        Err(error @ AssembleError::EmptyResult { .. }) => {
            warn!(%error, "continuing with per-source outputs only");
            Vec::new()
        }
    };

    info!(
        aggregated_births = aggregated_births.len(),
        comparison_records = comparison.len(),
        duration_ms = start.elapsed().as_millis(),
        "assemble complete"
    );

    AssembleResult {
        aggregated_births,
        comparison,
    }
}

/// Output configuration.
pub struct OutputConfig<'a> {
    pub output_dir: &'a Path,
    pub indicators: &'a [IndicatorRecord],
    pub births: &'a [BirthRecord],
    pub comparison: &'a [ComparisonRecord],
    pub dry_run: bool,
}

/// Write the output tables. Empty tables are not written; the per-source
/// tables are written even when the comparison is empty.
pub fn output(config: OutputConfig<'_>) -> Result<OutputFiles> {
    let span = info_span!("output", output_dir = %config.output_dir.display());
    let _guard = span.enter();
    let start = Instant::now();

    let mut files = OutputFiles::default();
    if config.dry_run {
        info!(
            duration_ms = start.elapsed().as_millis(),
            "output skipped (dry run)"
        );
        return Ok(files);
    }

    if !config.indicators.is_empty() {
        files.indicators = Some(
            write_indicators(config.output_dir, config.indicators).context("write indicators")?,
        );
    }
    if !config.births.is_empty() {
        files.births = Some(write_births(config.output_dir, config.births).context("write births")?);
    }
    if !config.comparison.is_empty() {
        files.comparison = Some(
            write_comparison(config.output_dir, config.comparison).context("write comparison")?,
        );
    }

    info!(
        indicator_records = config.indicators.len(),
        birth_records = config.births.len(),
        comparison_records = config.comparison.len(),
        duration_ms = start.elapsed().as_millis(),
        "output complete"
    );

    Ok(files)
}
