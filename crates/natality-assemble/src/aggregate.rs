//! Birth-record deduplication and share computation.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use tracing::warn;

use natality_model::{AgeBracket, BirthRecord};

/// Groups birth records by (territory, year, bracket), summing counts.
///
/// The year total is taken from the first observation of each group; the
/// sources are assumed to agree on it per territory and year. A later
/// observation that disagrees is logged, not merged.
///
/// Idempotent: aggregating already-aggregated records is a no-op.
pub fn aggregate_births(records: &[BirthRecord]) -> Vec<BirthRecord> {
    let mut groups: BTreeMap<(String, i32, AgeBracket), BirthRecord> = BTreeMap::new();
    for record in records {
        let key = (record.territory.clone(), record.year, record.age_bracket);
        match groups.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
            }
            Entry::Occupied(mut slot) => {
                let grouped = slot.get_mut();
                grouped.birth_count += record.birth_count;
                if grouped.year_total_births != record.year_total_births {
                    warn!(
                        territory = %record.territory,
                        year = record.year,
                        kept = grouped.year_total_births,
                        seen = record.year_total_births,
                        "year totals disagree across sources; keeping first observation"
                    );
                }
            }
        }
    }
    groups.into_values().collect()
}

/// A bracket's share of the yearly total, in percent. NaN when the total
/// is zero; consumers skip non-finite shares.
pub fn share_percent(birth_count: u64, year_total_births: u64) -> f64 {
    if year_total_births == 0 {
        f64::NAN
    } else {
        100.0 * birth_count as f64 / year_total_births as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn birth(territory: &str, bracket: AgeBracket, count: u64, total: u64) -> BirthRecord {
        BirthRecord {
            territory: territory.to_string(),
            year: 2010,
            age_bracket: bracket,
            birth_count: count,
            year_total_births: total,
        }
    }

    #[test]
    fn sums_duplicate_groups_and_keeps_first_total() {
        let records = vec![
            birth("Bahia", AgeBracket::Age15To19, 500, 12000),
            birth("Bahia", AgeBracket::Age15To19, 700, 11000),
        ];
        let grouped = aggregate_births(&records);
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped[0].birth_count, 1200);
        assert_eq!(grouped[0].year_total_births, 12000);
    }

    #[test]
    fn distinct_keys_stay_separate() {
        let records = vec![
            birth("Bahia", AgeBracket::Age15To19, 500, 12000),
            birth("Bahia", AgeBracket::Age20To24, 700, 12000),
            birth("Sergipe", AgeBracket::Age15To19, 300, 4000),
        ];
        assert_eq!(aggregate_births(&records).len(), 3);
    }

    #[test]
    fn aggregation_is_idempotent() {
        let records = vec![
            birth("Bahia", AgeBracket::Age15To19, 500, 12000),
            birth("Bahia", AgeBracket::Age15To19, 700, 12000),
            birth("Sergipe", AgeBracket::Age20To24, 300, 4000),
        ];
        let once = aggregate_births(&records);
        let twice = aggregate_births(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn share_is_nan_on_zero_total() {
        assert!(share_percent(10, 0).is_nan());
        let share = share_percent(1200, 12000);
        assert!((share - 10.0).abs() < 1e-9);
    }
}
