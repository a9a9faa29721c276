//! Importer: drives extraction over a single file and applies idempotent
//! writes.
//!
//! The importer is a pure function over the watcher state:
//! `(state, file name, content) -> (new state, report)`. Repository writes
//! happen through injected ports, and persisting the returned state is the
//! caller's side effect. The content hash is recorded in the returned state
//! only after every write for the file succeeded, so a failed file keeps its
//! old hash and is retried on the next run.

use memolog_types::entry::{NutritionEntry, WeightEntry, WorkoutEntry};
use memolog_types::error::{ImportError, RepositoryError};
use memolog_types::state::WatcherState;

use crate::hash::ContentHasher;
use crate::parse::weight::extract_weights;
use crate::parse::{FileContext, nutrition, workout};
use crate::repository::nutrition::NutritionRepository;
use crate::repository::weight::WeightRepository;
use crate::repository::workout::WorkoutRepository;

/// Per-file outcome counts, for operator-facing reporting only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub file_name: String,
    /// True when the content hash matched the stored one and the file was
    /// skipped without parsing.
    pub skipped_unchanged: bool,
    /// Weight entries inserted or updated.
    pub weights_written: usize,
    /// Nutrition entries inserted.
    pub nutrition_written: usize,
    /// Workout entries inserted.
    pub workouts_written: usize,
}

impl ImportReport {
    fn unchanged(file_name: &str) -> Self {
        Self {
            file_name: file_name.to_string(),
            skipped_unchanged: true,
            ..Default::default()
        }
    }

    /// Total records actually written across all categories.
    pub fn total_written(&self) -> usize {
        self.weights_written + self.nutrition_written + self.workouts_written
    }
}

/// Orchestrates extraction and idempotent upserts for journal files.
///
/// Generic over repository and hashing traits to maintain clean
/// architecture -- memolog-core never depends on memolog-infra.
pub struct Importer<W, N, K, H> {
    weight_repo: W,
    nutrition_repo: N,
    workout_repo: K,
    hasher: H,
}

impl<W, N, K, H> Importer<W, N, K, H>
where
    W: WeightRepository,
    N: NutritionRepository,
    K: WorkoutRepository,
    H: ContentHasher,
{
    pub fn new(weight_repo: W, nutrition_repo: N, workout_repo: K, hasher: H) -> Self {
        Self {
            weight_repo,
            nutrition_repo,
            workout_repo,
            hasher,
        }
    }

    /// Process one file's content against the given state.
    ///
    /// Returns the new state (with the file's hash recorded) and a report.
    /// When the hash matches the stored one, no parsing and no writes
    /// happen. On error the original state remains valid for retry.
    pub async fn process_file(
        &self,
        state: &WatcherState,
        file_name: &str,
        content: &str,
    ) -> Result<(WatcherState, ImportReport), ImportError> {
        let hash = self.hasher.compute_hash(content);
        if state.is_unchanged(file_name, &hash) {
            tracing::debug!(file = file_name, "content unchanged, skipping");
            return Ok((state.clone(), ImportReport::unchanged(file_name)));
        }

        let ctx = FileContext::from_name(file_name);
        let mut report = ImportReport {
            file_name: file_name.to_string(),
            ..Default::default()
        };

        for candidate in extract_weights(content) {
            if self.upsert_weight(&candidate.entry).await? {
                report.weights_written += 1;
            }
        }

        for entry in nutrition::extract_nutrition(content, ctx.file_date) {
            if self.insert_nutrition_once(&entry).await? {
                report.nutrition_written += 1;
            }
        }

        if let Some(entry) = workout::extract_workout(content, ctx.file_date) {
            if self.insert_workout_once(&entry).await? {
                report.workouts_written += 1;
            }
        }

        tracing::info!(
            file = file_name,
            weights = report.weights_written,
            nutrition = report.nutrition_written,
            workouts = report.workouts_written,
            "file imported"
        );

        Ok((state.with_hash(file_name, &hash), report))
    }

    /// Insert-or-update for weight entries.
    ///
    /// An existing entry is updated only when the weight differs or a new
    /// nonzero body-fat percentage arrives; optional fields are merged in
    /// when provided and never cleared. Returns whether a write happened.
    async fn upsert_weight(&self, candidate: &WeightEntry) -> Result<bool, RepositoryError> {
        let Some(existing) = self.weight_repo.find_by_date(candidate.date).await? else {
            self.weight_repo.insert(candidate).await?;
            return Ok(true);
        };

        let weight_changed = candidate.weight != existing.weight;
        let new_body_fat = matches!(
            candidate.body_fat_pct,
            Some(pct) if pct != 0.0 && existing.body_fat_pct != candidate.body_fat_pct
        );
        if !weight_changed && !new_body_fat {
            return Ok(false);
        }

        let merged = WeightEntry {
            date: existing.date,
            weight: candidate.weight,
            body_fat_pct: candidate.body_fat_pct.or(existing.body_fat_pct),
            muscle_mass_pct: candidate.muscle_mass_pct.or(existing.muscle_mass_pct),
            notes: candidate.notes.clone().or(existing.notes),
        };
        self.weight_repo.update(&merged).await?;
        Ok(true)
    }

    /// At-most-once-ever per (date, name): skip outright when a row exists,
    /// no merge. The daily total is treated as atomic.
    async fn insert_nutrition_once(&self, entry: &NutritionEntry) -> Result<bool, RepositoryError> {
        if self
            .nutrition_repo
            .find_by_date_and_name(entry.date, &entry.name)
            .await?
            .is_some()
        {
            tracing::debug!(date = %entry.date, "daily total already recorded, skipping");
            return Ok(false);
        }
        self.nutrition_repo.insert(entry).await?;
        Ok(true)
    }

    /// At-most-once-ever per date; existing entries are never touched.
    async fn insert_workout_once(&self, entry: &WorkoutEntry) -> Result<bool, RepositoryError> {
        if self.workout_repo.find_by_date(entry.date).await?.is_some() {
            tracing::debug!(date = %entry.date, "workout already recorded, skipping");
            return Ok(false);
        }
        self.workout_repo.insert(entry).await?;
        Ok(true)
    }
}
