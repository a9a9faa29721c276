//! SQLite storage layer.
//!
//! Repository implementations backed by SQLite with WAL mode and split
//! read/write connection pools.

pub mod nutrition;
pub mod pool;
pub mod weight;
pub mod workout;

use chrono::NaiveDate;
use memolog_types::error::RepositoryError;

/// Dates are stored as canonical `YYYY-MM-DD` TEXT columns.
pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub(crate) fn parse_date(s: &str) -> Result<NaiveDate, RepositoryError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| RepositoryError::Query(format!("invalid date '{s}': {e}")))
}
