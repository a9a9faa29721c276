//! Daily-macro extraction.
//!
//! Finds aggregate daily nutrition lines like
//! `Calories: 1,290 | Protein: 154.5g | Carbs: 120g | Fat: 45g`.
//! Operates only when the source file name carries a date (`YYYY-MM-DD.md`);
//! this extractor never infers dates from content.

use chrono::NaiveDate;
use memolog_types::entry::NutritionEntry;
use once_cell::sync::Lazy;
use regex::Regex;

/// All four macros must appear, in order, separated by pipe, comma, or
/// newline. Calories may carry a thousands comma and an optional `kcal`;
/// the gram fields take an optional `g` suffix. A line missing any macro
/// fails the whole pattern -- no partial record is produced.
static DAILY_MACROS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)calories:?\s*([\d,]+(?:\.\d+)?)\s*(?:kcal)?\s*[|,\n]\s*protein:?\s*(\d+(?:\.\d+)?)\s*g?\s*[|,\n]\s*carbs:?\s*(\d+(?:\.\d+)?)\s*g?\s*[|,\n]\s*fat:?\s*(\d+(?:\.\d+)?)\s*g?",
    )
    .unwrap()
});

/// Extract "Daily Total" nutrition entries from `text`.
///
/// Every match produces an entry for the same `file_date`; the persistence
/// layer's one-entry-per-date rule is what prevents duplication, not this
/// extractor. Fiber, sugar, and sodium exist in the data model but are not
/// populated here (known gap, carried over deliberately).
pub fn extract_nutrition(text: &str, file_date: Option<NaiveDate>) -> Vec<NutritionEntry> {
    let Some(date) = file_date else {
        return Vec::new();
    };

    DAILY_MACROS
        .captures_iter(text)
        .filter_map(|caps| {
            let calories: f64 = caps[1].replace(',', "").parse().ok()?;
            let protein: f64 = caps[2].parse().ok()?;
            let carbs: f64 = caps[3].parse().ok()?;
            let fat: f64 = caps[4].parse().ok()?;
            Some(NutritionEntry::daily_total(date, calories, protein, carbs, fat))
        })
        .collect()
}
