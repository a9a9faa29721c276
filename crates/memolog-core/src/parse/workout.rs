//! Workout-mention detection in free-form daily notes.
//!
//! Scans line by line; the first matching line produces the single workout
//! entry for the file's date (one workout per date, enforced here, not just
//! at persistence). Requires a filename-derived date, same as the nutrition
//! extractor.

use chrono::NaiveDate;
use memolog_types::entry::{WorkoutEntry, WorkoutType};
use once_cell::sync::Lazy;
use regex::Regex;

/// A line mentions a workout if it contains a gym-visit phrase, generic
/// workout/training vocabulary, or a session-descriptor phrase.
static WORKOUT_MENTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:gym|worked out|workout|working out|training|trained|lifted|lifting|exercised|cardio|leg day|push day|pull day|upper body|lower body|crunch fitness)\b",
    )
    .unwrap()
});

/// Cardio keywords flip the classification from the default "strength".
static CARDIO_KEYWORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:cardio|run|running|ran|jog|jogging|treadmill|cycling|cycled|biking|rowing|elliptical|swim|swam|swimming)\b",
    )
    .unwrap()
});

/// Day-type phrases override the generic session name.
static DAY_TYPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(leg|push|pull)\s+day\b").unwrap());

/// Gym-brand phrase, overriding to a branded session name.
static GYM_BRAND: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bcrunch fitness\b").unwrap());

/// Extract at most one workout entry from `text`.
///
/// Classification is applied in a fixed order: cardio keywords set the type;
/// a brand phrase overrides the generic name; a leg/push/pull day phrase
/// overrides the name last, independently of the cardio override.
pub fn extract_workout(text: &str, file_date: Option<NaiveDate>) -> Option<WorkoutEntry> {
    let date = file_date?;

    for line in text.lines() {
        if !WORKOUT_MENTION.is_match(line) {
            continue;
        }

        let workout_type = if CARDIO_KEYWORD.is_match(line) {
            WorkoutType::Cardio
        } else {
            WorkoutType::Strength
        };

        let mut name = "Gym Session".to_string();
        if GYM_BRAND.is_match(line) {
            name = "Crunch Fitness".to_string();
        }
        if let Some(caps) = DAY_TYPE.captures(line) {
            let mut day = caps[1].to_lowercase();
            if let Some(first) = day.get_mut(0..1) {
                first.make_ascii_uppercase();
            }
            name = format!("{day} Day");
        }

        return Some(WorkoutEntry {
            date,
            name,
            workout_type,
            notes: Some(strip_bullet(line).to_string()),
        });
    }

    None
}

/// Trim whitespace and a single leading bullet marker from a line.
fn strip_bullet(line: &str) -> &str {
    let trimmed = line.trim();
    for marker in ["- ", "* ", "+ "] {
        if let Some(rest) = trimmed.strip_prefix(marker) {
            return rest.trim_start();
        }
    }
    trimmed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feb5() -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2026, 2, 5)
    }

    #[test]
    fn test_leg_day_classification() {
        let entry =
            extract_workout("- Great leg day at the gym, felt strong", feb5()).unwrap();
        assert_eq!(entry.workout_type, WorkoutType::Strength);
        assert_eq!(entry.name, "Leg Day");
        assert_eq!(
            entry.notes.as_deref(),
            Some("Great leg day at the gym, felt strong")
        );
    }

    #[test]
    fn test_generic_gym_session() {
        let entry = extract_workout("Hit the gym before work.", feb5()).unwrap();
        assert_eq!(entry.name, "Gym Session");
        assert_eq!(entry.workout_type, WorkoutType::Strength);
    }

    #[test]
    fn test_cardio_overrides_type() {
        let entry = extract_workout("Quick treadmill cardio workout tonight", feb5()).unwrap();
        assert_eq!(entry.workout_type, WorkoutType::Cardio);
        assert_eq!(entry.name, "Gym Session");
    }

    #[test]
    fn test_day_type_stacks_with_cardio() {
        // Overrides stack: cardio sets the type, leg day renames, in that order.
        let entry =
            extract_workout("Leg day then 20 min treadmill cardio", feb5()).unwrap();
        assert_eq!(entry.workout_type, WorkoutType::Cardio);
        assert_eq!(entry.name, "Leg Day");
    }

    #[test]
    fn test_brand_overrides_name() {
        let entry = extract_workout("Signed in at Crunch Fitness after lunch", feb5()).unwrap();
        assert_eq!(entry.name, "Crunch Fitness");
    }

    #[test]
    fn test_day_type_beats_brand() {
        let entry =
            extract_workout("Push day at Crunch Fitness", feb5()).unwrap();
        assert_eq!(entry.name, "Push Day");
    }

    #[test]
    fn test_only_first_matching_line_counts() {
        let text = "\
- Morning: leg day at the gym
- Afternoon: another workout
- Evening: more lifting
";
        let entry = extract_workout(text, feb5()).unwrap();
        assert_eq!(entry.name, "Leg Day");
        assert_eq!(
            entry.notes.as_deref(),
            Some("Morning: leg day at the gym")
        );
    }

    #[test]
    fn test_no_file_date_yields_none() {
        assert!(extract_workout("Great leg day at the gym", None).is_none());
    }

    #[test]
    fn test_non_workout_text_yields_none() {
        assert!(extract_workout("Booked flights to Lisbon today.", feb5()).is_none());
    }

    #[test]
    fn test_bullet_markers_trimmed() {
        for text in ["- gym", "* gym", "+ gym", "   gym"] {
            let entry = extract_workout(text, feb5()).unwrap();
            assert_eq!(entry.notes.as_deref(), Some("gym"));
        }
    }
}
