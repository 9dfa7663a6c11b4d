//! Canonical maternal age brackets.
//!
//! Source tabulations label age columns in free form ("15 a 19 anos",
//! "Menor de 10 anos", "Idade ignorada"). Every raw label maps to exactly
//! one canonical bracket; the matching order is load-bearing because a
//! label can contain both a numeric range and a fallback keyword.

use std::fmt;

/// Canonical age bracket of the mother at the time of the birth event.
///
/// Variant order is the bracket sort order used for output determinism.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AgeBracket {
    UnderTen,
    Age10To14,
    Age15To19,
    Age20To24,
    Age25To29,
    Age30To34,
    Age35To39,
    Age40To44,
    Other,
    Unknown,
}

/// Numeric range patterns checked before the generic fallbacks.
/// First match wins.
const RANGE_RULES: [(&str, &str, AgeBracket); 7] = [
    ("10 a 14", "10-14", AgeBracket::Age10To14),
    ("15 a 19", "15-19", AgeBracket::Age15To19),
    ("20 a 24", "20-24", AgeBracket::Age20To24),
    ("25 a 29", "25-29", AgeBracket::Age25To29),
    ("30 a 34", "30-34", AgeBracket::Age30To34),
    ("35 a 39", "35-39", AgeBracket::Age35To39),
    ("40 a 44", "40-44", AgeBracket::Age40To44),
];

impl AgeBracket {
    /// Maps a raw column or label string to exactly one canonical bracket.
    ///
    /// Case-insensitive substring matching. Numeric ranges are checked
    /// before "menor"/"<10" and "ignorada", so a label carrying both a
    /// range and a fallback keyword resolves via the range.
    pub fn canonicalize(label: &str) -> Self {
        let label = label.trim().to_lowercase();
        for (spaced, dashed, bracket) in RANGE_RULES {
            if label.contains(spaced) || label.contains(dashed) {
                return bracket;
            }
        }
        if label.contains("menor") || label.contains("<10") {
            return Self::UnderTen;
        }
        if label.contains("ignorada") {
            return Self::Unknown;
        }
        Self::Other
    }

    /// Canonical display label, also used in persisted CSV output.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UnderTen => "Under 10",
            Self::Age10To14 => "10-14",
            Self::Age15To19 => "15-19",
            Self::Age20To24 => "20-24",
            Self::Age25To29 => "25-29",
            Self::Age30To34 => "30-34",
            Self::Age35To39 => "35-39",
            Self::Age40To44 => "40-44",
            Self::Other => "Other",
            Self::Unknown => "Unknown",
        }
    }

    /// Parses a canonical label back into its bracket.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|bracket| bracket.as_str().eq_ignore_ascii_case(label.trim()))
    }

    /// All brackets in sort order.
    pub const ALL: [Self; 10] = [
        Self::UnderTen,
        Self::Age10To14,
        Self::Age15To19,
        Self::Age20To24,
        Self::Age25To29,
        Self::Age30To34,
        Self::Age35To39,
        Self::Age40To44,
        Self::Other,
        Self::Unknown,
    ];
}

impl fmt::Display for AgeBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl serde::Serialize for AgeBracket {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> serde::Deserialize<'de> for AgeBracket {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Self::from_label(&label)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown age bracket '{label}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonicalize_numeric_ranges() {
        assert_eq!(AgeBracket::canonicalize("10 a 14 anos"), AgeBracket::Age10To14);
        assert_eq!(AgeBracket::canonicalize("15 a 19 anos"), AgeBracket::Age15To19);
        assert_eq!(AgeBracket::canonicalize("20-24"), AgeBracket::Age20To24);
        assert_eq!(AgeBracket::canonicalize("25 a 29 anos"), AgeBracket::Age25To29);
        assert_eq!(AgeBracket::canonicalize("30 a 34 anos"), AgeBracket::Age30To34);
        assert_eq!(AgeBracket::canonicalize("35-39"), AgeBracket::Age35To39);
        assert_eq!(AgeBracket::canonicalize("40 a 44 anos"), AgeBracket::Age40To44);
    }

    #[test]
    fn canonicalize_is_case_insensitive() {
        assert_eq!(AgeBracket::canonicalize("15 A 19 ANOS"), AgeBracket::Age15To19);
        assert_eq!(AgeBracket::canonicalize("MENOR DE 10 ANOS"), AgeBracket::UnderTen);
    }

    #[test]
    fn canonicalize_fallbacks() {
        assert_eq!(AgeBracket::canonicalize("Menor de 10 anos"), AgeBracket::UnderTen);
        assert_eq!(AgeBracket::canonicalize("<10"), AgeBracket::UnderTen);
        assert_eq!(AgeBracket::canonicalize("Idade ignorada"), AgeBracket::Unknown);
        assert_eq!(AgeBracket::canonicalize("50 anos e mais"), AgeBracket::Other);
        assert_eq!(AgeBracket::canonicalize(""), AgeBracket::Other);
    }

    #[test]
    fn ranges_win_over_fallback_keywords() {
        // A label carrying both a range and "ignorada" must resolve via the range.
        assert_eq!(
            AgeBracket::canonicalize("15 a 19 anos (idade ignorada)"),
            AgeBracket::Age15To19
        );
    }

    #[test]
    fn canonicalize_is_total() {
        for label in ["garbage", "Território", "???", "45 a 49 anos"] {
            // Must land on one of the fixed brackets, never panic.
            let bracket = AgeBracket::canonicalize(label);
            assert!(AgeBracket::ALL.contains(&bracket));
        }
    }

    #[test]
    fn label_round_trip() {
        for bracket in AgeBracket::ALL {
            assert_eq!(AgeBracket::from_label(bracket.as_str()), Some(bracket));
        }
        assert_eq!(AgeBracket::from_label("not a bracket"), None);
    }

    #[test]
    fn serializes_as_canonical_label() {
        let json = serde_json::to_string(&AgeBracket::Age15To19).unwrap();
        assert_eq!(json, "\"15-19\"");
        let round: AgeBracket = serde_json::from_str(&json).unwrap();
        assert_eq!(round, AgeBracket::Age15To19);
    }
}
