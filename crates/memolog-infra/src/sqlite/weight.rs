//! SQLite weight repository implementation.
//!
//! Implements `WeightRepository` from `memolog-core` using sqlx with split
//! read/write pools. The date is the primary key; `updated_at` is touched
//! on every update.

use chrono::NaiveDate;
use memolog_core::repository::weight::WeightRepository;
use memolog_types::entry::WeightEntry;
use memolog_types::error::RepositoryError;
use sqlx::Row;

use super::pool::DatabasePool;
use super::{format_date, parse_date};

/// SQLite-backed implementation of `WeightRepository`.
pub struct SqliteWeightRepository {
    pool: DatabasePool,
}

impl SqliteWeightRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to the domain entry.
struct WeightRow {
    date: String,
    weight: f64,
    body_fat_pct: Option<f64>,
    muscle_mass_pct: Option<f64>,
    notes: Option<String>,
}

impl WeightRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            date: row.try_get("date")?,
            weight: row.try_get("weight")?,
            body_fat_pct: row.try_get("body_fat_pct")?,
            muscle_mass_pct: row.try_get("muscle_mass_pct")?,
            notes: row.try_get("notes")?,
        })
    }

    fn into_entry(self) -> Result<WeightEntry, RepositoryError> {
        Ok(WeightEntry {
            date: parse_date(&self.date)?,
            weight: self.weight,
            body_fat_pct: self.body_fat_pct,
            muscle_mass_pct: self.muscle_mass_pct,
            notes: self.notes,
        })
    }
}

impl WeightRepository for SqliteWeightRepository {
    async fn find_by_date(&self, date: NaiveDate) -> Result<Option<WeightEntry>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM weight_entries WHERE date = ?")
            .bind(format_date(date))
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let weight_row =
                    WeightRow::from_row(&row).map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(weight_row.into_entry()?))
            }
            None => Ok(None),
        }
    }

    async fn insert(&self, entry: &WeightEntry) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO weight_entries (date, weight, body_fat_pct, muscle_mass_pct, notes)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(format_date(entry.date))
        .bind(entry.weight)
        .bind(entry.body_fat_pct)
        .bind(entry.muscle_mass_pct)
        .bind(&entry.notes)
        .execute(&self.pool.writer)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.message().contains("UNIQUE") => {
                Err(RepositoryError::Conflict(format!(
                    "weight entry for {} already exists",
                    entry.date
                )))
            }
            Err(e) => Err(RepositoryError::Query(e.to_string())),
        }
    }

    async fn update(&self, entry: &WeightEntry) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE weight_entries
             SET weight = ?, body_fat_pct = ?, muscle_mass_pct = ?, notes = ?, updated_at = datetime('now')
             WHERE date = ?",
        )
        .bind(entry.weight)
        .bind(entry.body_fat_pct)
        .bind(entry.muscle_mass_pct)
        .bind(&entry.notes)
        .bind(format_date(entry.date))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::pool::DatabasePool;

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        // Leak tempdir so it lives for the test
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    fn feb5() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 5).unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let repo = SqliteWeightRepository::new(test_pool().await);
        let entry = WeightEntry {
            body_fat_pct: Some(19.0),
            notes: Some("scan".to_string()),
            ..WeightEntry::new(feb5(), 221.6)
        };

        repo.insert(&entry).await.unwrap();

        let found = repo.find_by_date(feb5()).await.unwrap().unwrap();
        assert_eq!(found, entry);
    }

    #[tokio::test]
    async fn test_find_missing_returns_none() {
        let repo = SqliteWeightRepository::new(test_pool().await);
        assert!(repo.find_by_date(feb5()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_date_conflicts() {
        let repo = SqliteWeightRepository::new(test_pool().await);
        repo.insert(&WeightEntry::new(feb5(), 221.6)).await.unwrap();

        let err = repo
            .insert(&WeightEntry::new(feb5(), 222.0))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_update() {
        let repo = SqliteWeightRepository::new(test_pool().await);
        repo.insert(&WeightEntry::new(feb5(), 221.6)).await.unwrap();

        let updated = WeightEntry {
            body_fat_pct: Some(18.2),
            ..WeightEntry::new(feb5(), 220.2)
        };
        repo.update(&updated).await.unwrap();

        let found = repo.find_by_date(feb5()).await.unwrap().unwrap();
        assert_eq!(found.weight, 220.2);
        assert_eq!(found.body_fat_pct, Some(18.2));
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let repo = SqliteWeightRepository::new(test_pool().await);
        let err = repo
            .update(&WeightEntry::new(feb5(), 220.0))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }
}
