//! Group activity records by itinerary day.
//!
//! ```text
//! Records (source order)         →  Day groups (ordered by day number)
//! ┌──────────────────────┐         ┌──────────────────────────────┐
//! │ Day2: Dazaifu        │         │ Day1:  [Airport, Ichiran]    │
//! │ Day1: Airport        │    →    │ Day2:  [Dazaifu]             │
//! │ Day10: Mojiko        │         │ Day10: [Mojiko]              │
//! │ Day1: Ichiran        │         └──────────────────────────────┘
//! └──────────────────────┘
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

use crate::models::{ActivityRecord, UNKNOWN_TYPE};

static DAY_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Day\s*(\d+)").expect("Invalid day pattern"));

/// All activities of one day, in source order.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DayGroup {
    pub day: String,
    pub activities: Vec<ActivityRecord>,
}

/// Number of an itinerary day (`"Day12"` → 12).
pub fn day_number(day: &str) -> Option<u32> {
    DAY_NUMBER
        .captures(day)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Order days by number (non-numeric days count as 0), then by text.
pub fn compare_days(a: &str, b: &str) -> Ordering {
    let na = day_number(a).unwrap_or(0);
    let nb = day_number(b).unwrap_or(0);
    na.cmp(&nb).then_with(|| a.cmp(b))
}

/// Distinct days, ordered with [`compare_days`].
pub fn unique_days(records: &[ActivityRecord]) -> Vec<String> {
    let mut days: Vec<String> = records
        .iter()
        .map(|r| r.day.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(String::from)
        .collect();
    days.sort_by(|a, b| compare_days(a, b));
    days
}

/// Distinct activity types, alphabetical, without empty and `Unknown` labels.
pub fn unique_types(records: &[ActivityRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.activity_type.as_str())
        .filter(|t| !t.is_empty() && *t != UNKNOWN_TYPE)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(String::from)
        .collect()
}

/// Group records by day.
///
/// Only days that have at least one record produce a group.
pub fn group_by_day(records: &[ActivityRecord]) -> Vec<DayGroup> {
    let mut by_day: HashMap<&str, Vec<ActivityRecord>> = HashMap::new();
    for record in records {
        by_day.entry(record.day.as_str()).or_default().push(record.clone());
    }

    unique_days(records)
        .into_iter()
        .filter_map(|day| {
            let activities = by_day.remove(day.as_str())?;
            Some(DayGroup { day, activities })
        })
        .collect()
}
