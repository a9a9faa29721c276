//! SQLite nutrition repository implementation.
//!
//! Rows are unique on `(date, name)`; the importer only ever inserts one
//! "Daily Total" row per date and never updates it.

use chrono::NaiveDate;
use memolog_core::repository::nutrition::NutritionRepository;
use memolog_types::entry::NutritionEntry;
use memolog_types::error::RepositoryError;
use sqlx::Row;

use super::pool::DatabasePool;
use super::{format_date, parse_date};

/// SQLite-backed implementation of `NutritionRepository`.
pub struct SqliteNutritionRepository {
    pool: DatabasePool,
}

impl SqliteNutritionRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

struct NutritionRow {
    date: String,
    name: String,
    calories: Option<f64>,
    protein: Option<f64>,
    carbs: Option<f64>,
    fat: Option<f64>,
    fiber: Option<f64>,
    sugar: Option<f64>,
    sodium: Option<f64>,
}

impl NutritionRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            date: row.try_get("date")?,
            name: row.try_get("name")?,
            calories: row.try_get("calories")?,
            protein: row.try_get("protein")?,
            carbs: row.try_get("carbs")?,
            fat: row.try_get("fat")?,
            fiber: row.try_get("fiber")?,
            sugar: row.try_get("sugar")?,
            sodium: row.try_get("sodium")?,
        })
    }

    fn into_entry(self) -> Result<NutritionEntry, RepositoryError> {
        Ok(NutritionEntry {
            date: parse_date(&self.date)?,
            name: self.name,
            calories: self.calories,
            protein: self.protein,
            carbs: self.carbs,
            fat: self.fat,
            fiber: self.fiber,
            sugar: self.sugar,
            sodium: self.sodium,
        })
    }
}

impl NutritionRepository for SqliteNutritionRepository {
    async fn find_by_date_and_name(
        &self,
        date: NaiveDate,
        name: &str,
    ) -> Result<Option<NutritionEntry>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM nutrition_entries WHERE date = ? AND name = ?")
            .bind(format_date(date))
            .bind(name)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let nutrition_row = NutritionRow::from_row(&row)
                    .map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(nutrition_row.into_entry()?))
            }
            None => Ok(None),
        }
    }

    async fn insert(&self, entry: &NutritionEntry) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO nutrition_entries (date, name, calories, protein, carbs, fat, fiber, sugar, sodium)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(format_date(entry.date))
        .bind(&entry.name)
        .bind(entry.calories)
        .bind(entry.protein)
        .bind(entry.carbs)
        .bind(entry.fat)
        .bind(entry.fiber)
        .bind(entry.sugar)
        .bind(entry.sodium)
        .execute(&self.pool.writer)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.message().contains("UNIQUE") => {
                Err(RepositoryError::Conflict(format!(
                    "nutrition entry '{}' for {} already exists",
                    entry.name, entry.date
                )))
            }
            Err(e) => Err(RepositoryError::Query(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::pool::DatabasePool;
    use memolog_types::entry::DAILY_TOTAL;

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
        let repo = SqliteNutritionRepository::new(test_pool().await);
        let entry = NutritionEntry::daily_total(feb5(), 1290.0, 154.5, 120.0, 45.0);

        repo.insert(&entry).await.unwrap();

        let found = repo
            .find_by_date_and_name(feb5(), DAILY_TOTAL)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found, entry);
    }

    #[tokio::test]
    async fn test_lookup_is_keyed_by_date_and_name() {
        let repo = SqliteNutritionRepository::new(test_pool().await);
        let entry = NutritionEntry::daily_total(feb5(), 1290.0, 154.5, 120.0, 45.0);
        repo.insert(&entry).await.unwrap();

        assert!(
            repo.find_by_date_and_name(feb5(), "Breakfast")
                .await
                .unwrap()
                .is_none()
        );
        let other_day = NaiveDate::from_ymd_opt(2026, 2, 6).unwrap();
        assert!(
            repo.find_by_date_and_name(other_day, DAILY_TOTAL)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_duplicate_date_and_name_conflicts() {
        let repo = SqliteNutritionRepository::new(test_pool().await);
        let entry = NutritionEntry::daily_total(feb5(), 1290.0, 154.5, 120.0, 45.0);
        repo.insert(&entry).await.unwrap();

        let err = repo.insert(&entry).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }
}
