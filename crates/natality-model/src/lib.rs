pub mod bracket;
pub mod classify;
pub mod record;

pub use bracket::AgeBracket;
pub use classify::{ColumnClass, ColumnClassifier, KeywordClassifier};
pub use record::{BirthRecord, ComparisonRecord, IndicatorRecord};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comparison_record_serializes_nan_share_as_null() {
        let record = ComparisonRecord {
            territory: "Bahia".to_string(),
            year: 2010,
            age_bracket: AgeBracket::Age15To19,
            birth_count: 10,
            year_total_births: 0,
            share_percent: f64::NAN,
            composite_index: Some(0.66),
            sub_index_income: Some(0.64),
            sub_index_education: Some(0.62),
            sub_index_longevity: Some(0.72),
        };
        let json = serde_json::to_value(&record).expect("serialize record");
        assert!(json["share_percent"].is_null());
        assert_eq!(json["age_bracket"], "15-19");
    }
}
