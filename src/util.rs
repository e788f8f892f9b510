// Utility helpers for parsing cells, basic statistics and display formatting.
//
// The loader leans on the parsers here so the rest of the code can assume
// clean, typed values. The formatters are only ever applied to finished
// aggregates, never to values that still need sorting.
use chrono::{Datelike, NaiveDate};
use num_format::{Locale, ToFormattedString};
use std::num::ParseFloatError;

/// Parse a numeric cell.
///
/// - Empty or absent cells are a missing value (`Ok(None)`).
/// - Thousands separators and a leading `$` are tolerated.
/// - Anything else that does not parse is an error for the caller to report.
pub fn parse_number(s: Option<&str>) -> Result<Option<f64>, ParseFloatError> {
    let Some(s) = s.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    let s = s.strip_prefix('$').unwrap_or(s).replace(',', "");
    s.parse::<f64>().map(Some)
}

/// Parse a release year: exactly four ASCII digits naming a real calendar
/// year (year 1 onward).
pub fn parse_year(s: Option<&str>) -> Option<i32> {
    let s = s?.trim();
    if s.len() != 4 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year: i32 = s.parse().ok()?;
    if year < 1 {
        return None;
    }
    NaiveDate::from_ymd_opt(year, 1, 1).map(|d| d.year())
}

/// Arithmetic mean of the present values; `None` when nothing is present.
pub fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let (sum, n) = values
        .into_iter()
        .flatten()
        .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    if n == 0 {
        None
    } else {
        Some(sum / n as f64)
    }
}

/// `n` rounded to `decimals` places with `,` between thousands.
pub fn format_number(n: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, n.abs());
    let (whole, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let grouped = whole
        .parse::<u64>()
        .map(|w| w.to_formatted_string(&Locale::en))
        .unwrap_or_else(|_| whole.to_string());
    let sign = if n < 0.0 { "-" } else { "" };
    if frac.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac}")
    }
}

/// Dollar amount with thousands separators and no cents, e.g. `$318,412,101`.
pub fn format_currency(n: f64) -> String {
    format!("${}", format_number(n, 0))
}

/// Table cell for a value that may be missing.
pub fn format_opt(n: Option<f64>, decimals: usize) -> String {
    match n {
        Some(v) => format_number(v, decimals),
        None => "NaN".to_string(),
    }
}

/// Row counts for console notes, e.g. `9,855`.
pub fn format_int<T: ToFormattedString>(n: T) -> String {
    n.to_formatted_string(&Locale::en)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_tolerate_separators_and_blanks() {
        assert_eq!(parse_number(Some(" 318,412,101 ")), Ok(Some(318_412_101.0)));
        assert_eq!(parse_number(Some("$1,000.5")), Ok(Some(1000.5)));
        assert_eq!(parse_number(Some("   ")), Ok(None));
        assert_eq!(parse_number(None), Ok(None));
        assert!(parse_number(Some("n/a")).is_err());
    }

    #[test]
    fn years_must_be_four_digits() {
        assert_eq!(parse_year(Some("2008")), Some(2008));
        assert_eq!(parse_year(Some(" 1978 ")), Some(1978));
        assert_eq!(parse_year(Some("08")), None);
        assert_eq!(parse_year(Some("2008.0")), None);
        assert_eq!(parse_year(Some("0000")), None);
        assert_eq!(parse_year(Some("")), None);
        assert_eq!(parse_year(None), None);
    }

    #[test]
    fn mean_skips_missing() {
        assert_eq!(mean([Some(1.0), None, Some(3.0)]), Some(2.0));
        assert_eq!(mean([None, None]), None);
        assert_eq!(mean(Vec::<Option<f64>>::new()), None);
    }

    #[test]
    fn formatting() {
        assert_eq!(format_currency(318_412_101.0), "$318,412,101");
        assert_eq!(format_currency(623_357_910.4), "$623,357,910");
        assert_eq!(format_number(7.456, 2), "7.46");
        assert_eq!(format_number(-1234.5, 1), "-1,234.5");
        assert_eq!(format_opt(None, 2), "NaN");
        assert_eq!(format_number(1_234_567.891, 2), "1,234,567.89");
        assert_eq!(format_number(f64::NAN, 2), "NaN");
        assert_eq!(format_int(9855usize), "9,855");
    }
}
