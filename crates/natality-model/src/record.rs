//! Normalized record types flowing through the pipeline.
//!
//! All records are read-only, process-lifetime artifacts: a run constructs
//! them once from the source files and writes them out at the end.

use serde::{Deserialize, Serialize, Serializer};

use crate::AgeBracket;

/// One human-development indicator observation for a territory and
/// reporting year. Identity key: (territory, year).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorRecord {
    pub territory: String,
    pub year: i32,
    /// Composite index in [0, 1]. Absent when the source omitted it and
    /// not all three sub-indices were available to derive it.
    pub composite_index: Option<f64>,
    pub sub_index_income: Option<f64>,
    pub sub_index_education: Option<f64>,
    pub sub_index_longevity: Option<f64>,
}

impl IndicatorRecord {
    /// Fills a missing composite index with the arithmetic mean of the
    /// three sub-indices when all of them are present.
    pub fn with_derived_composite(mut self) -> Self {
        if self.composite_index.is_none()
            && let (Some(income), Some(education), Some(longevity)) = (
                self.sub_index_income,
                self.sub_index_education,
                self.sub_index_longevity,
            )
        {
            self.composite_index = Some((income + education + longevity) / 3.0);
        }
        self
    }

    pub fn key(&self) -> (&str, i32) {
        (&self.territory, self.year)
    }
}

/// One birth-count observation for a territory, reporting year, and
/// maternal age bracket. Identity key: (territory, year, age_bracket).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthRecord {
    pub territory: String,
    pub year: i32,
    pub age_bracket: AgeBracket,
    pub birth_count: u64,
    /// Total births for the territory and year, taken from the source's
    /// total column. Constant across a (territory, year) group.
    pub year_total_births: u64,
}

impl BirthRecord {
    pub fn key(&self) -> (&str, i32, AgeBracket) {
        (&self.territory, self.year, self.age_bracket)
    }
}

/// A joined comparison row: one bracket's share of a territory-year's
/// births alongside that territory-year's indicator values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRecord {
    pub territory: String,
    pub year: i32,
    pub age_bracket: AgeBracket,
    pub birth_count: u64,
    pub year_total_births: u64,
    /// `100 * birth_count / year_total_births`; NaN when the total is zero.
    /// Serialized as an empty field when not finite.
    #[serde(serialize_with = "serialize_share")]
    pub share_percent: f64,
    pub composite_index: Option<f64>,
    pub sub_index_income: Option<f64>,
    pub sub_index_education: Option<f64>,
    pub sub_index_longevity: Option<f64>,
}

fn serialize_share<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_finite() {
        serializer.serialize_some(value)
    } else {
        serializer.serialize_none()
    }
}
