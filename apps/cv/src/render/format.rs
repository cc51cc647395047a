//! Leaf formatters (es-CO). Both are total: bad input degrades to an empty
//! or unchanged string, never to an error.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

const MONTHS_SHORT: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sept", "oct", "nov", "dic",
];

/// Colombian-peso amount with no fraction digits, e.g. `$ 5.000.000`
/// (non-breaking space after the sign). `None`, NaN and infinities yield "".
pub fn format_currency(amount: Option<f64>) -> String {
    let Some(amount) = amount.filter(|a| a.is_finite()) else {
        return String::new();
    };
    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}$\u{a0}{}", group_thousands(&digits))
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

/// `day month year` with a short Spanish month, e.g. `15 mar 2024`.
/// Empty input yields ""; unparseable input is returned unchanged.
pub fn format_date(input: &str) -> String {
    if input.trim().is_empty() {
        return String::new();
    }
    match parse_date(input.trim()) {
        Some(d) => format!("{} {} {}", d.day(), MONTHS_SHORT[d.month0() as usize], d.year()),
        None => input.to_string(),
    }
}

/// Accepts plain dates and the timestamp shapes the store emits.
fn parse_date(input: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.date_naive());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, fmt) {
            return Some(dt.date());
        }
    }
    if let Ok(dt) = DateTime::parse_from_str(input, "%Y-%m-%d %H:%M:%S%.f%#z") {
        return Some(dt.date_naive());
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_groups_with_dots_and_no_fraction() {
        let s = format_currency(Some(5_000_000.0));
        assert_eq!(s, "$\u{a0}5.000.000");
        assert!(s.contains("000.000"));
        assert!(!s.contains(','));
    }

    #[test]
    fn test_currency_rounds_fraction_away() {
        assert_eq!(format_currency(Some(1234.6)), "$\u{a0}1.235");
    }

    #[test]
    fn test_currency_small_and_negative() {
        assert_eq!(format_currency(Some(0.0)), "$\u{a0}0");
        assert_eq!(format_currency(Some(999.0)), "$\u{a0}999");
        assert_eq!(format_currency(Some(-2500.0)), "-$\u{a0}2.500");
    }

    #[test]
    fn test_currency_missing_or_nan_is_empty() {
        assert_eq!(format_currency(None), "");
        assert_eq!(format_currency(Some(f64::NAN)), "");
        assert_eq!(format_currency(Some(f64::INFINITY)), "");
    }

    #[test]
    fn test_date_plain_iso() {
        assert_eq!(format_date("2024-03-15"), "15 mar 2024");
    }

    #[test]
    fn test_date_store_timestamps() {
        assert_eq!(format_date("2024-09-01T10:20:30.123456+00:00"), "1 sept 2024");
        assert_eq!(format_date("2023-12-31T23:59:59"), "31 dic 2023");
        assert_eq!(format_date("2024-01-05 08:00:00+00"), "5 ene 2024");
    }

    #[test]
    fn test_date_unparseable_is_returned_unchanged() {
        assert_eq!(format_date("not-a-date"), "not-a-date");
        assert_eq!(format_date("2021"), "2021");
    }

    #[test]
    fn test_date_empty_is_empty() {
        assert_eq!(format_date(""), "");
        assert_eq!(format_date("   "), "");
    }
}
