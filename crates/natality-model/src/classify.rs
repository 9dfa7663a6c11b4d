//! Pluggable column classification for heuristic source schemas.
//!
//! Birth tabulation layouts vary across export batches, so columns are
//! located by keyword matching rather than position. The strategy is a
//! trait so alternate source formats can supply different keyword sets
//! without touching the aggregation logic.

/// Classification tag for a raw column header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnClass {
    /// The territory (region/federative-unit) axis.
    Territory,
    /// An age-bracket count column.
    Bracket,
    /// The yearly total column.
    YearTotal,
    /// Anything unrecognized.
    Other,
}

/// Strategy for classifying raw column headers.
pub trait ColumnClassifier {
    fn classify(&self, header: &str) -> ColumnClass;
}

/// Default keyword-substring classifier for the upstream provider's
/// layouts. Matching is case-insensitive on the trimmed header.
///
/// Precedence: total, then territory, then bracket. "Unidade da
/// Federação" contains the bracket keyword "idade", so territory terms
/// must be checked first.
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    territory_terms: Vec<String>,
    bracket_terms: Vec<String>,
    total_terms: Vec<String>,
}

impl KeywordClassifier {
    pub fn new(
        territory_terms: impl IntoIterator<Item = impl Into<String>>,
        bracket_terms: impl IntoIterator<Item = impl Into<String>>,
        total_terms: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        let lower = |terms: Vec<String>| -> Vec<String> {
            terms.into_iter().map(|term| term.to_lowercase()).collect()
        };
        Self {
            territory_terms: lower(territory_terms.into_iter().map(Into::into).collect()),
            bracket_terms: lower(bracket_terms.into_iter().map(Into::into).collect()),
            total_terms: lower(total_terms.into_iter().map(Into::into).collect()),
        }
    }
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::new(
            ["região", "regiao", "unidade", "território", "territorio"],
            [
                "anos", "idade", "10 a 14", "15 a 19", "20 a 24", "25 a 29", "30 a 34", "35 a 39",
                "40 a 44", "menor",
            ],
            ["total"],
        )
    }
}

impl ColumnClassifier for KeywordClassifier {
    fn classify(&self, header: &str) -> ColumnClass {
        let header = header.trim().to_lowercase();
        let matches = |terms: &[String]| terms.iter().any(|term| header.contains(term.as_str()));
        if matches(&self.total_terms) {
            ColumnClass::YearTotal
        } else if matches(&self.territory_terms) {
            ColumnClass::Territory
        } else if matches(&self.bracket_terms) {
            ColumnClass::Bracket
        } else {
            ColumnClass::Other
        }
    }
}
