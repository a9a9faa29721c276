//! SQLite workout repository implementation.
//!
//! The date is the primary key; workout rows are insert-only.

use chrono::NaiveDate;
use memolog_core::repository::workout::WorkoutRepository;
use memolog_types::entry::{WorkoutEntry, WorkoutType};
use memolog_types::error::RepositoryError;
use sqlx::Row;

use super::pool::DatabasePool;
use super::{format_date, parse_date};

/// SQLite-backed implementation of `WorkoutRepository`.
pub struct SqliteWorkoutRepository {
    pool: DatabasePool,
}

impl SqliteWorkoutRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

struct WorkoutRow {
    date: String,
    name: String,
    workout_type: String,
    notes: Option<String>,
}

impl WorkoutRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            date: row.try_get("date")?,
            name: row.try_get("name")?,
            workout_type: row.try_get("workout_type")?,
            notes: row.try_get("notes")?,
        })
    }

    fn into_entry(self) -> Result<WorkoutEntry, RepositoryError> {
        let workout_type: WorkoutType = self
            .workout_type
            .parse()
            .map_err(|e: String| RepositoryError::Query(e))?;

        Ok(WorkoutEntry {
            date: parse_date(&self.date)?,
            name: self.name,
            workout_type,
            notes: self.notes,
        })
    }
}

impl WorkoutRepository for SqliteWorkoutRepository {
    async fn find_by_date(&self, date: NaiveDate) -> Result<Option<WorkoutEntry>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM workout_entries WHERE date = ?")
            .bind(format_date(date))
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let workout_row = WorkoutRow::from_row(&row)
                    .map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(workout_row.into_entry()?))
            }
            None => Ok(None),
        }
    }

    async fn insert(&self, entry: &WorkoutEntry) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO workout_entries (date, name, workout_type, notes)
             VALUES (?, ?, ?, ?)",
        )
        .bind(format_date(entry.date))
        .bind(&entry.name)
        .bind(entry.workout_type.to_string())
        .bind(&entry.notes)
        .execute(&self.pool.writer)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.message().contains("UNIQUE") => {
                Err(RepositoryError::Conflict(format!(
                    "workout entry for {} already exists",
                    entry.date
                )))
            }
            Err(e) => Err(RepositoryError::Query(e.to_string())),
        }
    }
}
