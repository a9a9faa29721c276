//! Date normalization for heterogeneous human-written formats.
//!
//! Converts journal dates into calendar days. Supported formats:
//! - `YYYY-MM-DD` (canonical, passed through)
//! - `MM/DD/YY` and `MM/DD/YYYY` (2-digit years are in the 2000s)
//! - `Mon DD, YYYY` (month-name abbreviation, case-insensitive, optional
//!   trailing characters on the month word, optional comma)
//!
//! Anything else yields `None` -- callers treat that as "skip this record",
//! never a fatal error. No timezone handling: dates are opaque calendar
//! days, never converted to instants.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

static ISO_DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{4})-(\d{1,2})-(\d{1,2})$").unwrap());

static SLASH_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{2}|\d{4})$").unwrap());

static MONTH_NAME_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z]{3})[A-Za-z]*\.?\s+(\d{1,2}),?\s+(\d{4})$").unwrap());

/// Fixed month-abbreviation table. Lookup is on the first three letters of
/// the month word, lowercased, so "Sep", "Sept", and "September" all map
/// to 9.
const MONTHS: [(&str, u32); 12] = [
    ("jan", 1),
    ("feb", 2),
    ("mar", 3),
    ("apr", 4),
    ("may", 5),
    ("jun", 6),
    ("jul", 7),
    ("aug", 8),
    ("sep", 9),
    ("oct", 10),
    ("nov", 11),
    ("dec", 12),
];

fn month_from_abbrev(abbrev: &str) -> Option<u32> {
    let key = abbrev.to_ascii_lowercase();
    MONTHS.iter().find(|(name, _)| *name == key).map(|(_, n)| *n)
}

/// Normalize a human-written date into a calendar day.
///
/// Returns `None` for any input matching no supported format, or for inputs
/// that match a format but name an impossible date (e.g. `02/30/26`).
pub fn normalize_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    if let Some(caps) = ISO_DATE.captures(raw) {
        let year: i32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let day: u32 = caps[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    if let Some(caps) = SLASH_DATE.captures(raw) {
        let month: u32 = caps[1].parse().ok()?;
        let day: u32 = caps[2].parse().ok()?;
        let mut year: i32 = caps[3].parse().ok()?;
        if caps[3].len() == 2 {
            year += 2000;
        }
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    if let Some(caps) = MONTH_NAME_DATE.captures(raw) {
        let month = month_from_abbrev(&caps[1])?;
        let day: u32 = caps[2].parse().ok()?;
        let year: i32 = caps[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    None
}

/// Derive a calendar date from a daily-log file name (`YYYY-MM-DD.md`).
///
/// Returns `None` for any other naming convention; the date-scoped
/// extractors (nutrition, workout) never infer dates from content.
pub fn file_date(file_name: &str) -> Option<NaiveDate> {
    let stem = file_name.strip_suffix(".md")?;
    let caps = ISO_DATE.captures(stem)?;
    // Daily-log names are zero-padded; reject `2026-2-5.md`.
    if caps[2].len() != 2 || caps[3].len() != 2 {
        return None;
    }
    normalize_date(stem)
}

/// Format a calendar day back into the canonical `YYYY-MM-DD` string.
pub fn canonical(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_canonical_passthrough() {
        assert_eq!(normalize_date("2026-02-05"), Some(ymd(2026, 2, 5)));
    }

    #[test]
    fn test_slash_two_digit_year() {
        assert_eq!(normalize_date("2/5/26"), Some(ymd(2026, 2, 5)));
        assert_eq!(normalize_date("12/31/25"), Some(ymd(2025, 12, 31)));
    }

    #[test]
    fn test_slash_four_digit_year() {
        assert_eq!(normalize_date("02/05/2026"), Some(ymd(2026, 2, 5)));
    }

    #[test]
    fn test_month_name_variants() {
        assert_eq!(normalize_date("Feb 5, 2026"), Some(ymd(2026, 2, 5)));
        assert_eq!(normalize_date("feb 5 2026"), Some(ymd(2026, 2, 5)));
        assert_eq!(normalize_date("February 5, 2026"), Some(ymd(2026, 2, 5)));
        assert_eq!(normalize_date("Sept 1, 2026"), Some(ymd(2026, 9, 1)));
        assert_eq!(normalize_date("DEC 25, 2025"), Some(ymd(2025, 12, 25)));
    }

    #[test]
    fn test_unparseable_returns_none() {
        assert_eq!(normalize_date("yesterday"), None);
        assert_eq!(normalize_date("2026/02/05"), None);
        assert_eq!(normalize_date("Notamonth 5, 2026"), None);
        assert_eq!(normalize_date(""), None);
    }

    #[test]
    fn test_impossible_dates_rejected() {
        assert_eq!(normalize_date("02/30/26"), None);
        assert_eq!(normalize_date("2026-13-01"), None);
        assert_eq!(normalize_date("Feb 30, 2026"), None);
    }

    #[test]
    fn test_normalization_is_stable() {
        // normalize(canonical(normalize(x))) == normalize(x) for every
        // supported format class.
        for input in ["2026-02-05", "2/5/26", "02/05/2026", "Feb 5, 2026"] {
            let first = normalize_date(input).unwrap();
            let second = normalize_date(&canonical(first)).unwrap();
            assert_eq!(first, second, "unstable for {input}");
        }
    }

    #[test]
    fn test_file_date() {
        assert_eq!(file_date("2026-02-05.md"), Some(ymd(2026, 2, 5)));
        assert_eq!(file_date("fitness.md"), None);
        assert_eq!(file_date("2026-02-05.txt"), None);
        assert_eq!(file_date("2026-2-5.md"), None);
    }
}
