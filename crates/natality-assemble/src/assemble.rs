//! Inner join of aggregated births with indicator records.

use std::collections::BTreeMap;

use tracing::{debug, info};

use natality_model::{BirthRecord, ComparisonRecord, IndicatorRecord};

use crate::aggregate::{aggregate_births, share_percent};
use crate::error::{AssembleError, Result};

/// Builds the comparison table: deduplicate births, compute each
/// bracket's share, and inner-join against the indicators on
/// (territory, year). Keys present on only one side are excluded; that
/// is expected when source year coverage differs.
///
/// Output is sorted by (year, territory, age_bracket) ascending.
pub fn assemble(
    indicators: &[IndicatorRecord],
    births: &[BirthRecord],
) -> Result<Vec<ComparisonRecord>> {
    let grouped = aggregate_births(births);

    // First observation wins per (territory, year).
    let mut index: BTreeMap<(&str, i32), &IndicatorRecord> = BTreeMap::new();
    for record in indicators {
        index.entry(record.key()).or_insert(record);
    }

    let mut output = Vec::new();
    for birth in &grouped {
        let Some(indicator) = index.get(&(birth.territory.as_str(), birth.year)) else {
            debug!(
                territory = %birth.territory,
                year = birth.year,
                "no matching indicator record; excluding from comparison"
            );
            continue;
        };
        output.push(ComparisonRecord {
            territory: birth.territory.clone(),
            year: birth.year,
            age_bracket: birth.age_bracket,
            birth_count: birth.birth_count,
            year_total_births: birth.year_total_births,
            share_percent: share_percent(birth.birth_count, birth.year_total_births),
            composite_index: indicator.composite_index,
            sub_index_income: indicator.sub_index_income,
            sub_index_education: indicator.sub_index_education,
            sub_index_longevity: indicator.sub_index_longevity,
        });
    }

    if output.is_empty() {
        return Err(AssembleError::EmptyResult {
            indicator_count: indicators.len(),
            birth_count: grouped.len(),
        });
    }

    output.sort_by(|a, b| {
        (a.year, a.territory.as_str(), a.age_bracket)
            .cmp(&(b.year, b.territory.as_str(), b.age_bracket))
    });
    info!(record_count = output.len(), "comparison assembled");
    Ok(output)
}
