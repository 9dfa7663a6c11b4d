//! Filename-to-reporting-year configuration.
//!
//! The upstream provider's file names carry no intrinsic year
//! information, so each source kind carries an explicit filename -> year
//! table. The tables are injectable (JSON config) and validated against
//! the discovered files at startup: an unmapped file is a loud per-file
//! error, never a silent default year.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{IngestError, Result};

/// Filename -> reporting year lookup for one source kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct YearMap(BTreeMap<String, i32>);

impl YearMap {
    pub fn new<K: Into<String>>(entries: impl IntoIterator<Item = (K, i32)>) -> Self {
        Self(
            entries
                .into_iter()
                .map(|(name, year)| (name.into(), year))
                .collect(),
        )
    }

    /// Resolves the reporting year for a source file by its file name.
    pub fn resolve(&self, path: &Path) -> Result<i32> {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default();
        self.0
            .get(file_name)
            .copied()
            .ok_or_else(|| IngestError::NoYearMapping {
                file_name: file_name.to_string(),
            })
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Year tables for both source kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceYears {
    pub indicators: YearMap,
    pub births: YearMap,
}

impl Default for SourceYears {
    /// The provider's published file sets. Adding a new reporting year
    /// means adding an entry here or supplying a JSON override.
    fn default() -> Self {
        Self {
            indicators: YearMap::new([
                ("data.csv", 2000),
                ("data (1).csv", 2010),
                ("data (2).csv", 2017),
                ("data (3).csv", 2018),
                ("data (4).csv", 2019),
                ("data (5).csv", 2020),
                ("data (6).csv", 2021),
                ("data (7).csv", 2022),
            ]),
            births: YearMap::new([
                ("sinasc_cnv_nvuf133906177_1_252_233.csv", 2000),
                ("sinasc_cnv_nvuf133948177_1_252_233.csv", 2010),
                ("sinasc_cnv_nvuf134057177_1_252_233.csv", 2016),
                ("sinasc_cnv_nvuf134117177_1_252_233.csv", 2017),
                ("sinasc_cnv_nvuf134132177_1_252_233.csv", 2018),
                ("sinasc_cnv_nvuf134154177_1_252_233.csv", 2019),
                ("sinasc_cnv_nvuf134252177_1_252_233.csv", 2020),
                ("sinasc_cnv_nvuf134305177_1_252_233.csv", 2021),
            ]),
        }
    }
}

impl SourceYears {
    /// Loads a JSON override of the built-in tables.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| IngestError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|error| IngestError::YearConfig {
            path: path.to_path_buf(),
            message: error.to_string(),
        })
    }

    /// Checks every discovered file against its year table, returning one
    /// error per unmapped file.
    pub fn validate<P: AsRef<Path>>(&self, indicators: &[P], births: &[P]) -> Vec<IngestError> {
        let mut errors = Vec::new();
        for path in indicators {
            if let Err(error) = self.indicators.resolve(path.as_ref()) {
                errors.push(error);
            }
        }
        for path in births {
            if let Err(error) = self.births.resolve(path.as_ref()) {
                errors.push(error);
            }
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn resolves_mapped_file_names() {
        let years = SourceYears::default();
        let year = years
            .indicators
            .resolve(Path::new("/tmp/sources/data (1).csv"))
            .unwrap();
        assert_eq!(year, 2010);
    }

    #[test]
    fn unmapped_file_is_a_loud_error() {
        let years = SourceYears::default();
        let error = years
            .indicators
            .resolve(Path::new("data (99).csv"))
            .unwrap_err();
        assert!(matches!(error, IngestError::NoYearMapping { .. }));
    }

    #[test]
    fn validate_reports_one_error_per_unmapped_file() {
        let years = SourceYears::default();
        let indicators = [PathBuf::from("data.csv"), PathBuf::from("unknown.csv")];
        let births = [PathBuf::from("sinasc_cnv_nvuf_mystery.csv")];
        let errors = years.validate(&indicators, &births);
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn json_round_trip() {
        let years = SourceYears::default();
        let json = serde_json::to_string(&years).unwrap();
        let round: SourceYears = serde_json::from_str(&json).unwrap();
        assert_eq!(round, years);
    }
}
