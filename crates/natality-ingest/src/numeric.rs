//! Sentinel-aware numeric parsing for provider exports.
//!
//! Birth tabulations format numbers with `.` as the thousands separator
//! and `,` as the decimal separator, and mark missing values with
//! sentinel tokens. Indicator exports carry standard `.` decimals.

/// Sentinel tokens the provider uses for missing values. The empty string
/// (after trimming) counts as missing too.
pub const MISSING_TOKENS: [&str; 3] = ["-", "..", "..."];

/// Outcome of parsing one numeric cell.
///
/// `Missing` and `Invalid` are distinct so callers that must not default
/// a bad value (year-total extraction) can drop the row instead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParsedNumber {
    Value(f64),
    /// A sentinel token or empty cell.
    Missing,
    /// Non-sentinel text that failed to parse.
    Invalid,
}

fn is_missing(trimmed: &str) -> bool {
    trimmed.is_empty() || MISSING_TOKENS.contains(&trimmed)
}

/// Parses a locale-formatted cell: strip whitespace, remove `.` thousands
/// separators, swap the `,` decimal separator for `.`, parse as f64.
pub fn parse_cell(raw: &str) -> ParsedNumber {
    let trimmed = raw.trim();
    if is_missing(trimmed) {
        return ParsedNumber::Missing;
    }
    let cleaned = trimmed.replace('.', "").replace(',', ".");
    match cleaned.parse::<f64>() {
        Ok(value) => ParsedNumber::Value(value),
        Err(_) => ParsedNumber::Invalid,
    }
}

/// Locale-formatted parse folding sentinel and invalid input to `None`.
pub fn parse_locale_f64(raw: &str) -> Option<f64> {
    match parse_cell(raw) {
        ParsedNumber::Value(value) => Some(value),
        ParsedNumber::Missing | ParsedNumber::Invalid => None,
    }
}

/// Non-negative locale-formatted count, truncating any fractional part.
pub fn parse_count(raw: &str) -> Option<u64> {
    parse_locale_f64(raw).and_then(|value| {
        if value >= 0.0 {
            Some(value as u64)
        } else {
            None
        }
    })
}

/// Standard-decimal parse with sentinel handling, for indicator exports.
pub fn parse_plain_f64(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if is_missing(trimmed) {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_thousands_and_decimal_separators() {
        assert_eq!(parse_locale_f64("1.234,5"), Some(1234.5));
        assert_eq!(parse_locale_f64("1.200"), Some(1200.0));
        assert_eq!(parse_locale_f64("12.000"), Some(12000.0));
        assert_eq!(parse_locale_f64("0,660"), Some(0.66));
        assert_eq!(parse_locale_f64(" 42 "), Some(42.0));
    }

    #[test]
    fn sentinels_are_missing_never_zero() {
        for token in ["-", "..", "...", "", "   "] {
            assert_eq!(parse_cell(token), ParsedNumber::Missing, "token {token:?}");
            assert_eq!(parse_locale_f64(token), None);
        }
    }

    #[test]
    fn non_numeric_text_is_invalid() {
        assert_eq!(parse_cell("n/a"), ParsedNumber::Invalid);
        assert_eq!(parse_cell("12x"), ParsedNumber::Invalid);
        assert_eq!(parse_locale_f64("n/a"), None);
    }

    #[test]
    fn counts_reject_negatives_and_truncate() {
        assert_eq!(parse_count("1.200"), Some(1200));
        assert_eq!(parse_count("3,7"), Some(3));
        assert_eq!(parse_count("-5"), None);
        assert_eq!(parse_count("-"), None);
    }

    #[test]
    fn plain_parse_keeps_standard_decimals() {
        assert_eq!(parse_plain_f64("0.660"), Some(0.66));
        assert_eq!(parse_plain_f64("-"), None);
        assert_eq!(parse_plain_f64(""), None);
        assert_eq!(parse_plain_f64("abc"), None);
    }
}
