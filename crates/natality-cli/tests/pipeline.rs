//! End-to-end tests for the pipeline stages over real files.

use std::path::Path;

use tempfile::TempDir;

use natality_cli::pipeline::{self, OutputConfig};
use natality_ingest::SourceYears;
use natality_model::{AgeBracket, KeywordClassifier};

const INDICATOR_2010: &str = "data (1).csv";
const INDICATOR_2021: &str = "data (6).csv";
const BIRTHS_2010: &str = "sinasc_cnv_nvuf133948177_1_252_233.csv";

fn write_indicator_file(dir: &Path, name: &str) {
    std::fs::write(
        dir.join(name),
        "Territorialidade,Posição IDHM,IDHM,Posição IDHM Renda,IDHM Renda,\
Posição IDHM Educação,IDHM Educação,Posição IDHM Longevidade,IDHM Longevidade\n\
Bahia,22,0.660,20,0.640,23,0.620,19,0.720\n",
    )
    .unwrap();
}

fn write_birth_file(dir: &Path, name: &str) {
    let mut text = String::from("Nascidos vivos por residencia da mae\nBrasil\nperiodo 2010\n");
    text.push_str("Unidade da Federação;15 a 19 anos;Total\n");
    // National and regional aggregate lines carry no state marker.
    text.push_str("Total;50.000;500.000\n");
    text.push_str("Região Nordeste;9.000;90.000\n");
    text.push_str(".. Bahia;1.200;12.000\n");
    for idx in 0..10 {
        text.push_str(&format!("Fonte: nota {idx}\n"));
    }
    std::fs::write(dir.join(name), text).unwrap();
}

fn run_stages(sources: &Path, output: &Path) -> pipeline::AssembleResult {
    let years = SourceYears::default();
    let classifier = KeywordClassifier::default();
    let load = pipeline::load(sources, &years, &classifier).unwrap();
    let assembled = pipeline::assemble_stage(&load.indicators, &load.births);
    pipeline::output(OutputConfig {
        output_dir: output,
        indicators: &load.indicators,
        births: &assembled.aggregated_births,
        comparison: &assembled.comparison,
        dry_run: false,
    })
    .unwrap();
    assembled
}

#[test]
fn bahia_2010_end_to_end() {
    let dir = TempDir::new().unwrap();
    write_indicator_file(dir.path(), INDICATOR_2010);
    write_birth_file(dir.path(), BIRTHS_2010);
    let output_dir = dir.path().join("output");

    let assembled = run_stages(dir.path(), &output_dir);

    assert_eq!(assembled.comparison.len(), 1);
    let record = &assembled.comparison[0];
    assert_eq!(record.territory, "Bahia");
    assert_eq!(record.year, 2010);
    assert_eq!(record.age_bracket, AgeBracket::Age15To19);
    assert_eq!(record.birth_count, 1200);
    assert_eq!(record.year_total_births, 12000);
    assert!((record.share_percent - 10.0).abs() < 1e-9);
    assert_eq!(record.composite_index, Some(0.66));
    assert_eq!(record.sub_index_income, Some(0.64));
    assert_eq!(record.sub_index_education, Some(0.62));
    assert_eq!(record.sub_index_longevity, Some(0.72));

    let comparison_csv = std::fs::read_to_string(output_dir.join("comparison.csv")).unwrap();
    assert!(comparison_csv.contains("Bahia,2010,15-19,1200,12000,10.0"));
}

#[test]
fn national_aggregate_rows_contribute_nothing() {
    let dir = TempDir::new().unwrap();
    write_indicator_file(dir.path(), INDICATOR_2010);
    write_birth_file(dir.path(), BIRTHS_2010);

    let years = SourceYears::default();
    let classifier = KeywordClassifier::default();
    let load = pipeline::load(dir.path(), &years, &classifier).unwrap();

    // Only the marked ".. Bahia" row survives; "Total" and the regional
    // aggregate are filtered out.
    assert_eq!(load.births.len(), 1);
    assert_eq!(load.births[0].territory, "Bahia");
}

#[test]
fn indicator_only_year_is_dropped_from_comparison_but_kept_standalone() {
    let dir = TempDir::new().unwrap();
    // Indicator for 2021, births only for 2010: the join is empty.
    write_indicator_file(dir.path(), INDICATOR_2021);
    write_birth_file(dir.path(), BIRTHS_2010);
    let output_dir = dir.path().join("output");

    let assembled = run_stages(dir.path(), &output_dir);

    assert!(assembled.comparison.is_empty());
    // Per-source outputs still written; the comparison table is not.
    assert!(!output_dir.join("comparison.csv").exists());
    let indicators_csv = std::fs::read_to_string(output_dir.join("indicators.csv")).unwrap();
    assert!(indicators_csv.contains("Bahia,2021"));
    let births_csv = std::fs::read_to_string(output_dir.join("births.csv")).unwrap();
    assert!(births_csv.contains("Bahia,2010,15-19,1200,12000"));
}

#[test]
fn dry_run_writes_nothing() {
    let dir = TempDir::new().unwrap();
    write_indicator_file(dir.path(), INDICATOR_2010);
    write_birth_file(dir.path(), BIRTHS_2010);
    let output_dir = dir.path().join("output");

    let years = SourceYears::default();
    let classifier = KeywordClassifier::default();
    let load = pipeline::load(dir.path(), &years, &classifier).unwrap();
    let assembled = pipeline::assemble_stage(&load.indicators, &load.births);
    let files = pipeline::output(OutputConfig {
        output_dir: &output_dir,
        indicators: &load.indicators,
        births: &assembled.aggregated_births,
        comparison: &assembled.comparison,
        dry_run: true,
    })
    .unwrap();

    assert!(files.comparison.is_none());
    assert!(!output_dir.exists());
}
