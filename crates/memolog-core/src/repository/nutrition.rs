//! Nutrition repository trait definition.

use chrono::NaiveDate;
use memolog_types::entry::NutritionEntry;
use memolog_types::error::RepositoryError;

/// Repository trait for nutrition entries.
///
/// Nutrition rows are keyed by `(date, name)` -- the importer only ever
/// writes one "Daily Total" row per date and never updates it.
pub trait NutritionRepository: Send + Sync {
    /// Get the entry for a date and name, if one exists.
    fn find_by_date_and_name(
        &self,
        date: NaiveDate,
        name: &str,
    ) -> impl std::future::Future<Output = Result<Option<NutritionEntry>, RepositoryError>> + Send;

    /// Insert a new entry. Fails with `Conflict` if `(date, name)` exists.
    fn insert(
        &self,
        entry: &NutritionEntry,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
