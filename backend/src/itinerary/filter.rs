//! Day / type filtering of activity records.

use serde::{Deserialize, Serialize};

use crate::models::ActivityRecord;

/// Label that selects every value.
pub const ALL_LABEL: &str = "All";

/// Selection on one attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "mode", content = "value")]
pub enum Selection {
    #[default]
    All,
    Only(String),
}

impl Selection {
    /// Parse a selection from user input. Empty input and `All` select everything.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value == ALL_LABEL {
            Selection::All
        } else {
            Selection::Only(value.to_string())
        }
    }

    /// `None` selects everything.
    pub fn from_option(value: Option<&str>) -> Self {
        value.map(Self::parse).unwrap_or_default()
    }

    pub fn matches(&self, value: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(wanted) => wanted == value,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }
}

/// Filter on day and activity type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityFilter {
    pub day: Selection,
    #[serde(rename = "type")]
    pub activity_type: Selection,
}

impl ActivityFilter {
    pub fn new(day: Selection, activity_type: Selection) -> Self {
        Self { day, activity_type }
    }

    pub fn matches(&self, record: &ActivityRecord) -> bool {
        self.day.matches(&record.day) && self.activity_type.matches(&record.activity_type)
    }

    /// Keep the matching records, in order.
    pub fn apply(&self, records: &[ActivityRecord]) -> Vec<ActivityRecord> {
        records.iter().filter(|r| self.matches(r)).cloned().collect()
    }

    pub fn is_unfiltered(&self) -> bool {
        self.day.is_all() && self.activity_type.is_all()
    }
}

impl std::fmt::Display for ActivityFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = |s: &Selection| match s {
            Selection::All => ALL_LABEL.to_string(),
            Selection::Only(v) => v.clone(),
        };
        write!(f, "day={}, type={}", label(&self.day), label(&self.activity_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(day: &str, kind: &str) -> ActivityRecord {
        ActivityRecord {
            id: "event-1".into(),
            name: "x".into(),
            day: day.into(),
            link: String::new(),
            notes: String::new(),
            price: String::new(),
            time_frame: String::new(),
            activity_type: kind.into(),
        }
    }

    #[test]
    fn test_selection_parse() {
        assert_eq!(Selection::parse("All"), Selection::All);
        assert_eq!(Selection::parse("  "), Selection::All);
        assert_eq!(Selection::parse(" Day1 "), Selection::Only("Day1".into()));
        assert_eq!(Selection::from_option(None), Selection::All);
    }

    #[test]
    fn test_default_matches_everything() {
        let filter = ActivityFilter::default();
        assert!(filter.is_unfiltered());
        assert!(filter.matches(&record("Day1", "Food")));
    }

    #[test]
    fn test_day_and_type() {
        let filter = ActivityFilter::new(Selection::parse("Day1"), Selection::parse("Food"));
        let records = vec![record("Day1", "Food"), record("Day1", "Cafe"), record("Day2", "Food")];
        let kept = filter.apply(&records);

        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].activity_type, "Food");
        assert_eq!(filter.to_string(), "day=Day1, type=Food");
    }

    #[test]
    fn test_exact_match_only() {
        let filter = ActivityFilter::new(Selection::parse("Day1"), Selection::All);
        assert!(!filter.matches(&record("Day10", "Food")));
    }
}
