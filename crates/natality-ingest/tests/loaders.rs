//! Integration tests for file-level loading with the year map.

use std::path::PathBuf;

use tempfile::TempDir;

use natality_ingest::{
    IngestError, SourceYears, discover_sources, load_birth_files, load_indicator_files,
};
use natality_model::KeywordClassifier;

fn write_indicator_file(dir: &TempDir, name: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(
        &path,
        "Territorialidade,Posição IDHM,IDHM,IDHM Renda,IDHM Educação,IDHM Longevidade\n\
Bahia,22,0.660,0.640,0.620,0.720\n\
Sergipe,20,0.665,0.645,0.625,0.725\n",
    )
    .unwrap();
    path
}

fn write_birth_file(dir: &TempDir, name: &str, bahia_count: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut text = String::from("Nascidos vivos por idade da mae\nBrasil\nperiodo\n");
    text.push_str("Unidade da Federação;15 a 19 anos;Total\n");
    text.push_str(&format!(".. Bahia;{bahia_count};12.000\n"));
    text.push_str("Total;50.000;500.000\n");
    for idx in 0..10 {
        text.push_str(&format!("nota {idx}\n"));
    }
    std::fs::write(&path, text).unwrap();
    path
}

#[test]
fn loads_discovered_sources_with_mapped_years() {
    let dir = TempDir::new().unwrap();
    write_indicator_file(&dir, "data (1).csv");
    write_birth_file(&dir, "sinasc_cnv_nvuf133948177_1_252_233.csv", "1.200");

    let discovered = discover_sources(dir.path()).unwrap();
    assert_eq!(discovered.indicators.len(), 1);
    assert_eq!(discovered.births.len(), 1);

    let years = SourceYears::default();
    let indicators = load_indicator_files(&discovered.indicators, &years.indicators);
    assert_eq!(indicators.files_loaded, 1);
    assert_eq!(indicators.records.len(), 2);
    assert!(indicators.records.iter().all(|record| record.year == 2010));

    let classifier = KeywordClassifier::default();
    let births = load_birth_files(&discovered.births, &years.births, &classifier);
    assert_eq!(births.files_loaded, 1);
    assert_eq!(births.records.len(), 1);
    assert_eq!(births.records[0].year, 2010);
    assert_eq!(births.records[0].birth_count, 1200);
    assert_eq!(births.records[0].year_total_births, 12000);
}

#[test]
fn unmapped_file_is_skipped_and_counted() {
    let dir = TempDir::new().unwrap();
    let path = write_indicator_file(&dir, "data (99).csv");

    let years = SourceYears::default();
    let load = load_indicator_files(&[path], &years.indicators);
    assert_eq!(load.files_loaded, 0);
    assert!(load.records.is_empty());
    assert_eq!(load.skipped.len(), 1);
    assert!(matches!(load.skipped[0], IngestError::NoYearMapping { .. }));
}

#[test]
fn corrupt_file_is_skipped_and_remaining_files_load() {
    let dir = TempDir::new().unwrap();
    let bad = dir.path().join("sinasc_cnv_nvuf133906177_1_252_233.csv");
    // Too short for the provider framing: trimmed to nothing.
    std::fs::write(&bad, "only one line\n").unwrap();
    let good = write_birth_file(&dir, "sinasc_cnv_nvuf133948177_1_252_233.csv", "500");

    let years = SourceYears::default();
    let classifier = KeywordClassifier::default();
    let load = load_birth_files(&[bad, good], &years.births, &classifier);
    assert_eq!(load.files_loaded, 1);
    assert_eq!(load.skipped.len(), 1);
    assert_eq!(load.records.len(), 1);
    assert_eq!(load.records[0].birth_count, 500);
}

#[test]
fn duplicate_keys_across_files_are_preserved_for_aggregation() {
    let dir = TempDir::new().unwrap();
    let first = write_birth_file(&dir, "sinasc_cnv_nvuf133948177_1_252_233.csv", "500");
    // Different export, same reporting year via a custom map.
    let second = write_birth_file(&dir, "sinasc_extra.csv", "700");

    let years: SourceYears = serde_json::from_str(
        r#"{
            "births": {
                "sinasc_cnv_nvuf133948177_1_252_233.csv": 2010,
                "sinasc_extra.csv": 2010
            }
        }"#,
    )
    .unwrap();
    let classifier = KeywordClassifier::default();
    let load = load_birth_files(&[first, second], &years.births, &classifier);
    assert_eq!(load.files_loaded, 2);
    // Both observations survive loading; deduplication happens downstream.
    assert_eq!(load.records.len(), 2);
    let total: u64 = load.records.iter().map(|record| record.birth_count).sum();
    assert_eq!(total, 1200);
}
