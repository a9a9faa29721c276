//! Weight repository trait definition.

use chrono::NaiveDate;
use memolog_types::entry::WeightEntry;
use memolog_types::error::RepositoryError;

/// Repository trait for body-weight entries.
///
/// Implementations live in memolog-infra (e.g., SqliteWeightRepository).
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait WeightRepository: Send + Sync {
    /// Get the authoritative entry for a date, if one exists.
    fn find_by_date(
        &self,
        date: NaiveDate,
    ) -> impl std::future::Future<Output = Result<Option<WeightEntry>, RepositoryError>> + Send;

    /// Insert a new entry. Fails with `Conflict` if the date already exists.
    fn insert(
        &self,
        entry: &WeightEntry,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Replace the fields of the existing entry for `entry.date`.
    fn update(
        &self,
        entry: &WeightEntry,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
