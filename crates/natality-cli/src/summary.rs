use std::path::PathBuf;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::types::{RunResult, StageCounts};

pub fn print_summary(result: &RunResult) {
    println!("Sources: {}", result.sources_dir.display());
    if result.dry_run {
        println!("Output: none (dry run)");
    } else {
        println!("Output: {}", result.output_dir.display());
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Files"),
        header_cell("Records"),
        header_cell("Written"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);

    table.add_row(vec![
        Cell::new("Indicators").fg(Color::Blue),
        files_cell(&result.indicators),
        Cell::new(result.indicators.records),
        output_cell(result.outputs.indicators.as_ref()),
    ]);
    table.add_row(vec![
        Cell::new("Births").fg(Color::Blue),
        files_cell(&result.births),
        Cell::new(result.births.records),
        output_cell(result.outputs.births.as_ref()),
    ]);
    table.add_row(vec![
        Cell::new("Comparison")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        comparison_count_cell(result.comparison_records),
        output_cell(result.outputs.comparison.as_ref()),
    ]);
    println!("{table}");

    if let Some(correlation) = &result.correlation {
        println!(
            "Correlation ({} share vs education sub-index, n={}): {:.3}",
            correlation.bracket, correlation.sample_size, correlation.coefficient
        );
    }

    if result.comparison_records == 0 {
        eprintln!(
            "No comparison records: the source years or territories do not overlap; \
             the per-source tables remain available."
        );
    }

    if !result.skipped.is_empty() {
        eprintln!("Skipped sources:");
        for reason in &result.skipped {
            eprintln!("- {reason}");
        }
    }
}

fn files_cell(counts: &StageCounts) -> Cell {
    let text = format!("{}/{}", counts.files_loaded, counts.files_discovered);
    if counts.files_loaded < counts.files_discovered {
        Cell::new(text).fg(Color::Yellow)
    } else {
        Cell::new(text)
    }
}

fn comparison_count_cell(count: usize) -> Cell {
    if count == 0 {
        Cell::new(count).fg(Color::Yellow).add_attribute(Attribute::Bold)
    } else {
        Cell::new(count).add_attribute(Attribute::Bold)
    }
}

fn output_cell(path: Option<&PathBuf>) -> Cell {
    match path {
        Some(path) => Cell::new(path.display()).fg(Color::Green),
        None => dim_cell("-"),
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}
