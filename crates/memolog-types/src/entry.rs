//! Record types extracted from journal files.
//!
//! All three record kinds are keyed by calendar date. Dates are opaque
//! calendar days (`NaiveDate`), never converted to instants.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Name given to nutrition entries derived from an aggregate daily macro line.
pub const DAILY_TOTAL: &str = "Daily Total";

/// A single body-weight observation for one calendar day.
///
/// At most one authoritative entry exists per date; a later observation for
/// the same date updates fields rather than creating a duplicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightEntry {
    pub date: NaiveDate,
    /// Body weight in pounds. Plausible range is 100-500.
    pub weight: f64,
    pub body_fat_pct: Option<f64>,
    pub muscle_mass_pct: Option<f64>,
    /// Free text, e.g. body-composition scan annotations.
    pub notes: Option<String>,
}

impl WeightEntry {
    /// Create an entry carrying only a date and a weight.
    pub fn new(date: NaiveDate, weight: f64) -> Self {
        Self {
            date,
            weight,
            body_fat_pct: None,
            muscle_mass_pct: None,
            notes: None,
        }
    }
}

/// Aggregate daily nutrition totals for one calendar day.
///
/// Only one "Daily Total" entry is ever created per date; the daily total is
/// treated as atomic, so a second parse for the same date is skipped rather
/// than merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionEntry {
    pub date: NaiveDate,
    pub name: String,
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
    pub fiber: Option<f64>,
    pub sugar: Option<f64>,
    pub sodium: Option<f64>,
}

impl NutritionEntry {
    /// Create a "Daily Total" entry with the four required macros.
    pub fn daily_total(date: NaiveDate, calories: f64, protein: f64, carbs: f64, fat: f64) -> Self {
        Self {
            date,
            name: DAILY_TOTAL.to_string(),
            calories: Some(calories),
            protein: Some(protein),
            carbs: Some(carbs),
            fat: Some(fat),
            fiber: None,
            sugar: None,
            sodium: None,
        }
    }
}

/// Broad workout classification derived from keyword matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutType {
    Strength,
    Cardio,
}

impl fmt::Display for WorkoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkoutType::Strength => write!(f, "strength"),
            WorkoutType::Cardio => write!(f, "cardio"),
        }
    }
}

impl FromStr for WorkoutType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strength" => Ok(WorkoutType::Strength),
            "cardio" => Ok(WorkoutType::Cardio),
            other => Err(format!("invalid workout type: '{other}'")),
        }
    }
}

/// A workout mention for one calendar day.
///
/// Only one workout entry is created per date regardless of how many
/// workout-like lines appear in the source file; never updated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutEntry {
    pub date: NaiveDate,
    pub name: String,
    pub workout_type: WorkoutType,
    /// The matched source line, trimmed of a leading bullet marker.
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workout_type_roundtrip() {
        assert_eq!(
            "strength".parse::<WorkoutType>().unwrap(),
            WorkoutType::Strength
        );
        assert_eq!("cardio".parse::<WorkoutType>().unwrap(), WorkoutType::Cardio);
        assert_eq!(WorkoutType::Strength.to_string(), "strength");
        assert_eq!(WorkoutType::Cardio.to_string(), "cardio");
    }

    #[test]
    fn test_workout_type_invalid() {
        assert!("yoga".parse::<WorkoutType>().is_err());
        assert!("Strength".parse::<WorkoutType>().is_err());
    }

    #[test]
    fn test_daily_total_constructor() {
        let date = NaiveDate::from_ymd_opt(2026, 2, 5).unwrap();
        let entry = NutritionEntry::daily_total(date, 1290.0, 154.5, 120.0, 45.0);
        assert_eq!(entry.name, DAILY_TOTAL);
        assert_eq!(entry.calories, Some(1290.0));
        assert_eq!(entry.fiber, None);
        assert_eq!(entry.sodium, None);
    }
}
