//! Workout repository trait definition.

use chrono::NaiveDate;
use memolog_types::entry::WorkoutEntry;
use memolog_types::error::RepositoryError;

/// Repository trait for workout entries.
///
/// At most one workout is recorded per date; entries are never updated.
pub trait WorkoutRepository: Send + Sync {
    /// Get the entry for a date, if one exists.
    fn find_by_date(
        &self,
        date: NaiveDate,
    ) -> impl std::future::Future<Output = Result<Option<WorkoutEntry>, RepositoryError>> + Send;

    /// Insert a new entry. Fails with `Conflict` if the date already exists.
    fn insert(
        &self,
        entry: &WorkoutEntry,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
