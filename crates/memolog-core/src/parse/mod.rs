//! Pattern-matching extractors over markdown journal text.
//!
//! Each extractor is a pure function `(text, context) -> candidates`.
//! Unparseable dates and implausible values cause individual candidates to
//! be silently dropped -- extraction never fails.

pub mod date;
pub mod nutrition;
pub mod weight;
pub mod workout;

use chrono::NaiveDate;

/// Per-file context derived from the file name.
///
/// Two naming conventions are recognized: `YYYY-MM-DD.md` daily logs (which
/// enable the date-scoped nutrition and workout extractors) and arbitrary
/// names like `fitness.md` (weight extraction only).
#[derive(Debug, Clone)]
pub struct FileContext {
    pub file_name: String,
    /// Present only for `YYYY-MM-DD.md` files.
    pub file_date: Option<NaiveDate>,
}

impl FileContext {
    pub fn from_name(file_name: &str) -> Self {
        Self {
            file_name: file_name.to_string(),
            file_date: date::file_date(file_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_daily_log_name_carries_date() {
        let ctx = FileContext::from_name("2026-02-05.md");
        assert_eq!(ctx.file_date, NaiveDate::from_ymd_opt(2026, 2, 5));
    }

    #[test]
    fn test_aggregate_file_has_no_date() {
        let ctx = FileContext::from_name("fitness.md");
        assert!(ctx.file_date.is_none());
    }
}
