//! Body-weight extraction from loosely structured markdown.
//!
//! Three passes run over the same text and contribute candidates in a fixed
//! order: generic table rows, inline mentions, body-composition scan rows.
//! An inline match is discarded when a table row already claimed its date
//! (table data wins); the scan pass is not cross-deduplicated against the
//! other two -- the per-date upsert collapses those naturally.

use std::collections::HashSet;

use chrono::NaiveDate;
use memolog_types::entry::WeightEntry;
use once_cell::sync::Lazy;
use regex::Regex;

use super::date::normalize_date;

/// Generic four-column markdown table row: `| date | number | anything | anything |`.
/// The second column is interpreted as weight in pounds.
///
/// Deliberately permissive: this can match unrelated four-column tables in a
/// journal file. Tightening it (e.g. requiring a header row) would silently
/// drop real data, so the permissive form is kept.
static TABLE_ROW: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\|\s*([^|]+?)\s*\|\s*(\d+(?:\.\d+)?)\s*\|[^|]*\|[^|]*\|").unwrap()
});

/// Inline mention: `**Mon DD, YYYY:** 123.4 lbs` with optional bold markers
/// and an optional trailing colon on either side of the closing bold.
static INLINE_MENTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?:\*\*)?([A-Za-z]{3,}\.?\s+\d{1,2},?\s+\d{4}):?(?:\*\*)?:?\s*(\d+(?:\.\d+)?)\s*lbs",
    )
    .unwrap()
});

/// Five-column body-composition scan row:
/// `| MM/DD/YY | weight | SMM | body-fat-lbs | body-fat-pct% |`.
/// Strict two-digit-year dates only.
static SCAN_ROW: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\|\s*(\d{1,2}/\d{1,2}/\d{2})\s*\|\s*(\d+(?:\.\d+)?)\s*\|\s*(\d+(?:\.\d+)?)\s*\|\s*(\d+(?:\.\d+)?)\s*\|\s*(\d+(?:\.\d+)?)\s*%\s*\|",
    )
    .unwrap()
});

/// Which extraction pass produced a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightRule {
    Table,
    Inline,
    BodyScan,
}

/// A weight observation with enough provenance to debug where it came from.
#[derive(Debug, Clone)]
pub struct WeightCandidate {
    pub entry: WeightEntry,
    /// 1-based line number in the source text.
    pub line_no: usize,
    /// The source line the pattern matched.
    pub line: String,
    pub rule: WeightRule,
}

/// Rejection predicate for implausible weights. 100.0 and 500.0 pass;
/// 99.9 and 500.1 do not.
fn plausible_weight(w: f64) -> bool {
    w.is_finite() && !(w < 100.0 || w > 500.0)
}

/// Extract all body-weight observations from `text`.
///
/// Output preserves pass order (table, inline, scan); duplicates across the
/// scan pass and the others are left for the per-date upsert to collapse.
pub fn extract_weights(text: &str) -> Vec<WeightCandidate> {
    let mut candidates = Vec::new();
    let mut table_dates: HashSet<NaiveDate> = HashSet::new();

    for (idx, line) in text.lines().enumerate() {
        let Some(caps) = TABLE_ROW.captures(line) else {
            continue;
        };
        let Some(date) = normalize_date(&caps[1]) else {
            continue;
        };
        let Ok(weight) = caps[2].parse::<f64>() else {
            continue;
        };
        if !plausible_weight(weight) {
            continue;
        }
        table_dates.insert(date);
        candidates.push(WeightCandidate {
            entry: WeightEntry::new(date, weight),
            line_no: idx + 1,
            line: line.to_string(),
            rule: WeightRule::Table,
        });
    }

    for (idx, line) in text.lines().enumerate() {
        for caps in INLINE_MENTION.captures_iter(line) {
            let Some(date) = normalize_date(&caps[1]) else {
                continue;
            };
            if table_dates.contains(&date) {
                continue;
            }
            let Ok(weight) = caps[2].parse::<f64>() else {
                continue;
            };
            if !plausible_weight(weight) {
                continue;
            }
            candidates.push(WeightCandidate {
                entry: WeightEntry::new(date, weight),
                line_no: idx + 1,
                line: line.to_string(),
                rule: WeightRule::Inline,
            });
        }
    }

    for (idx, line) in text.lines().enumerate() {
        let Some(caps) = SCAN_ROW.captures(line) else {
            continue;
        };
        let Some(date) = normalize_date(&caps[1]) else {
            continue;
        };
        let Ok(weight) = caps[2].parse::<f64>() else {
            continue;
        };
        // The range filter applies to weight only, never to the body-fat
        // percentage column.
        if !plausible_weight(weight) {
            continue;
        }
        let (Ok(smm), Ok(body_fat_lbs), Ok(body_fat_pct)) = (
            caps[3].parse::<f64>(),
            caps[4].parse::<f64>(),
            caps[5].parse::<f64>(),
        ) else {
            continue;
        };
        candidates.push(WeightCandidate {
            entry: WeightEntry {
                date,
                weight,
                body_fat_pct: Some(body_fat_pct),
                muscle_mass_pct: None,
                notes: Some(format!("SMM {smm} lbs, body fat {body_fat_lbs} lbs")),
            },
            line_no: idx + 1,
            line: line.to_string(),
            rule: WeightRule::BodyScan,
        });
    }

    candidates
}
