//! Domain models for the itinerary ingestion pipeline.
//!
//! - [`ActivityRecord`] - One validated itinerary activity
//! - [`ActivityType`] - Known activity categories of the source sheets
//!
//! Records are built once by the parser and never mutated afterwards.

use serde::{Deserialize, Serialize};

/// Placeholder used when the name column is empty.
pub const UNKNOWN_ACTIVITY: &str = "Unknown Activity";

/// Placeholder used when the type column is empty.
pub const UNKNOWN_TYPE: &str = "Unknown";

/// Literal prefix every accepted `day` value starts with.
pub const DAY_PREFIX: &str = "Day";

/// Prefix of the synthetic record identifier.
pub const ID_PREFIX: &str = "event-";

/// Column headers, in positional order.
pub const COLUMNS: [&str; 7] = ["Name", "Day", "Link", "Notes", "Price", "Time Frame", "Type"];

// =============================================================================
// Activity Record
// =============================================================================

/// A single itinerary activity.
///
/// Every field is always present. Optional source columns decode to empty
/// strings, never to a missing value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRecord {
    /// `event-<line>`, unique within one parse run.
    pub id: String,
    pub name: String,
    /// Always starts with [`DAY_PREFIX`].
    pub day: String,
    /// Raw, possibly comma-joined list of URLs.
    pub link: String,
    pub notes: String,
    pub price: String,
    pub time_frame: String,
    #[serde(rename = "type")]
    pub activity_type: String,
}

impl ActivityRecord {
    /// Build the identifier for the record found at `line` (header is line 0).
    pub fn identifier_for(line: usize) -> String {
        format!("{}{}", ID_PREFIX, line)
    }

    /// Known category of this record, if the type label is one.
    pub fn category(&self) -> Option<ActivityType> {
        ActivityType::from_label(&self.activity_type)
    }

    /// Field values in column order, identifier excluded.
    pub fn columns(&self) -> [&str; 7] {
        [
            &self.name,
            &self.day,
            &self.link,
            &self.notes,
            &self.price,
            &self.time_frame,
            &self.activity_type,
        ]
    }
}

// =============================================================================
// Activity Type
// =============================================================================

/// Activity categories used by the trip sheets.
///
/// The record keeps the raw label; this enum only classifies it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ActivityType {
    /// Spelled as in the source sheets.
    Accomodation,
    Hotel,
    Food,
    Transportation,
    Historic,
    RelaxChill,
    FunTouristy,
    LocalPlaces,
    Cafe,
    Activity,
    Pictures,
    Other,
    Unknown,
}

impl ActivityType {
    pub const ALL: [ActivityType; 13] = [
        Self::Accomodation,
        Self::Hotel,
        Self::Food,
        Self::Transportation,
        Self::Historic,
        Self::RelaxChill,
        Self::FunTouristy,
        Self::LocalPlaces,
        Self::Cafe,
        Self::Activity,
        Self::Pictures,
        Self::Other,
        Self::Unknown,
    ];

    /// Parse a category from its sheet label (case-insensitive).
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized = label.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.label().eq_ignore_ascii_case(normalized))
    }

    /// Label as written in the sheets.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Accomodation => "Accomodation",
            Self::Hotel => "Hotel",
            Self::Food => "Food",
            Self::Transportation => "Transportation",
            Self::Historic => "Historic",
            Self::RelaxChill => "Relax / Chill",
            Self::FunTouristy => "Fun / Touristy",
            Self::LocalPlaces => "Local Places",
            Self::Cafe => "Cafe",
            Self::Activity => "Activity",
            Self::Pictures => "Pictures",
            Self::Other => "Other",
            Self::Unknown => UNKNOWN_TYPE,
        }
    }
}

impl std::fmt::Display for ActivityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ActivityRecord {
        ActivityRecord {
            id: ActivityRecord::identifier_for(3),
            name: "Ohori Park".into(),
            day: "Day2".into(),
            link: String::new(),
            notes: String::new(),
            price: String::new(),
            time_frame: "09:00-10:00".into(),
            activity_type: "relax / chill".into(),
        }
    }

    #[test]
    fn test_identifier_format() {
        assert_eq!(ActivityRecord::identifier_for(7), "event-7");
    }

    #[test]
    fn test_camel_case_serialization() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["id"], "event-3");
        assert_eq!(json["timeFrame"], "09:00-10:00");
        assert_eq!(json["type"], "relax / chill");
        assert!(json.get("activity_type").is_none());
    }

    #[test]
    fn test_category_lookup() {
        assert_eq!(sample().category(), Some(ActivityType::RelaxChill));
        assert_eq!(ActivityType::from_label(" Food "), Some(ActivityType::Food));
        assert_eq!(ActivityType::from_label("Karaoke"), None);
    }

    #[test]
    fn test_label_roundtrip() {
        for t in ActivityType::ALL {
            assert_eq!(ActivityType::from_label(t.label()), Some(t));
        }
    }
}
