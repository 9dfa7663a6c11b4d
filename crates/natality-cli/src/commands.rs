use anyhow::{Context, Result, bail};
use comfy_table::Table;
use tracing::info_span;

use natality_assemble::pearson;
use natality_ingest::SourceYears;
use natality_model::{AgeBracket, ComparisonRecord, KeywordClassifier};

use crate::cli::RunArgs;
use crate::pipeline::{self, OutputConfig};
use crate::summary::apply_table_style;
use crate::types::{BracketCorrelation, RunResult};

pub fn run_brackets() {
    let mut table = Table::new();
    table.set_header(vec!["Bracket"]);
    apply_table_style(&mut table);
    for bracket in AgeBracket::ALL {
        table.add_row(vec![bracket.as_str()]);
    }
    println!("{table}");
}

pub fn run(args: &RunArgs) -> Result<RunResult> {
    let span = info_span!("run", sources_dir = %args.sources_dir.display());
    let _guard = span.enter();

    let years = match &args.year_config {
        Some(path) => SourceYears::from_json_file(path)
            .with_context(|| format!("load year config {}", path.display()))?,
        None => SourceYears::default(),
    };
    let classifier = KeywordClassifier::default();
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| args.sources_dir.join("output"));

    let load = pipeline::load(&args.sources_dir, &years, &classifier)?;
    if load.indicator_counts.files_loaded == 0 && load.birth_counts.files_loaded == 0 {
        bail!(
            "no usable input sources in {}",
            args.sources_dir.display()
        );
    }

    let assembled = pipeline::assemble_stage(&load.indicators, &load.births);
    let correlation = bracket_correlation(&assembled.comparison, &args.corr_bracket);

    let outputs = pipeline::output(OutputConfig {
        output_dir: &output_dir,
        indicators: &load.indicators,
        births: &assembled.aggregated_births,
        comparison: &assembled.comparison,
        dry_run: args.dry_run,
    })?;

    Ok(RunResult {
        sources_dir: args.sources_dir.clone(),
        output_dir,
        indicators: load.indicator_counts,
        births: load.birth_counts,
        comparison_records: assembled.comparison.len(),
        correlation,
        skipped: load.skipped,
        outputs,
        dry_run: args.dry_run,
    })
}

/// Correlation between the chosen bracket's share and the education
/// sub-index, over the joined records.
fn bracket_correlation(
    comparison: &[ComparisonRecord],
    label: &str,
) -> Option<BracketCorrelation> {
    let bracket = AgeBracket::from_label(label).unwrap_or_else(|| AgeBracket::canonicalize(label));
    let (shares, education): (Vec<f64>, Vec<f64>) = comparison
        .iter()
        .filter(|record| record.age_bracket == bracket)
        .filter_map(|record| {
            record
                .sub_index_education
                .map(|value| (record.share_percent, value))
        })
        .unzip();
    let coefficient = pearson(&shares, &education)?;
    let sample_size = shares
        .iter()
        .zip(&education)
        .filter(|(share, value)| share.is_finite() && value.is_finite())
        .count();
    Some(BracketCorrelation {
        bracket,
        coefficient,
        sample_size,
    })
}
