//! Approximate coordinates for itinerary places.
//!
//! The lookup is a plain data table: ordered `key → coordinates` pairs where
//! the first key found inside the normalized search string wins. Keys are
//! ad-hoc substrings, so order matters (`kumamotocity` must precede
//! `kumamoto`). The table can be replaced by a JSON file without touching
//! the code.

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{LookupError, LookupResult};
use crate::links::split_links;
use crate::models::ActivityRecord;

static NON_ALNUM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]").expect("Invalid normalization pattern"));

/// Latitude / longitude in degrees.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// One table row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoordinateEntry {
    pub key: String,
    pub lat: f64,
    pub lng: f64,
}

impl CoordinateEntry {
    fn coordinates(&self) -> Coordinates {
        Coordinates { lat: self.lat, lng: self.lng }
    }
}

/// Built-in table for the Fukuoka trip.
const BUILTIN: &[(&str, f64, f64)] = &[
    ("airport", 33.5859, 130.4507),
    ("fukuokacoffee", 33.5912, 130.4038),
    ("coffee", 33.5912, 130.4038),
    ("gion", 33.5960, 130.4116),
    ("ichiran", 33.5930, 130.4045),
    ("nakaima", 33.5957, 130.4137),
    ("kuju", 33.1099, 131.2464),
    ("ski", 33.1099, 131.2464),
    ("dazaifu", 33.5215, 130.5349),
    ("hinata", 33.5190, 130.5330),
    ("aso", 32.8842, 131.1039),
    ("kumamotocity", 32.8031, 130.7079),
    ("kumamoto", 32.8031, 130.7079),
    ("kasumi", 32.7900, 130.7000),
    ("nanzoin", 33.6186, 130.5735),
    ("karato", 33.9576, 130.9413),
    ("kinrin", 33.2665, 131.3697),
    ("yufuin", 33.2665, 131.3697),
    ("kumamotocastle", 32.8062, 130.7058),
    ("yame", 33.2267, 130.5900),
    ("kurume", 33.3188, 130.5085),
    ("kora", 33.3039, 130.5753),
    ("sakurai", 33.6425, 130.2057),
    ("futamigaura", 33.6425, 130.2057),
    ("momochi", 33.5936, 130.3515),
    ("yatai", 33.5920, 130.4080),
    ("nakasu", 33.5920, 130.4080),
    // Hakata station
    ("christmas", 33.5900, 130.4206),
    ("sarakura", 33.8436, 130.7937),
    ("miyajidake", 33.7806, 130.4851),
    ("railway", 33.9450, 130.9608),
    ("tenjin", 33.5900, 130.4000),
    ("kushida", 33.5930, 130.4106),
    ("tochoji", 33.5954, 130.4158),
    ("kawabata", 33.5940, 130.4090),
    ("daimyo", 33.5880, 130.3960),
    ("donquijote", 33.5930, 130.4080),
    ("mojiko", 33.9450, 130.9600),
    ("ohori", 33.5860, 130.3760),
    ("milk", 32.9500, 131.0500),
    ("mina", 33.5930, 130.3990),
    ("yodobashi", 33.5880, 130.4220),
    ("donut", 33.5900, 130.4000),
    ("bayside", 33.6050, 130.4020),
    ("rental", 33.5859, 130.4507),
];

/// Lowercase and keep only `[a-z0-9]`.
pub fn normalize_key(value: &str) -> String {
    NON_ALNUM.replace_all(&value.to_lowercase(), "").into_owned()
}

/// Ordered substring → coordinates table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoordinateTable {
    entries: Vec<CoordinateEntry>,
}

impl CoordinateTable {
    /// Build a table, normalizing keys and checking coordinate ranges.
    pub fn new(entries: Vec<CoordinateEntry>) -> LookupResult<Self> {
        let mut normalized = Vec::with_capacity(entries.len());
        for entry in entries {
            let key = normalize_key(&entry.key);
            if key.is_empty() {
                return Err(LookupError::InvalidEntry {
                    key: entry.key,
                    message: "key has no letters or digits".into(),
                });
            }
            if !(-90.0..=90.0).contains(&entry.lat) || !(-180.0..=180.0).contains(&entry.lng) {
                return Err(LookupError::InvalidEntry {
                    key: entry.key,
                    message: format!("coordinates ({}, {}) out of range", entry.lat, entry.lng),
                });
            }
            normalized.push(CoordinateEntry { key, ..entry });
        }
        Ok(Self { entries: normalized })
    }

    /// Table shipped with the crate.
    pub fn builtin() -> Self {
        let entries = BUILTIN
            .iter()
            .map(|&(key, lat, lng)| CoordinateEntry { key: key.to_string(), lat, lng })
            .collect();
        Self { entries }
    }

    /// Parse a table from a JSON array of `{ "key", "lat", "lng" }` objects.
    pub fn from_json(json: &str) -> LookupResult<Self> {
        let entries: Vec<CoordinateEntry> = serde_json::from_str(json)?;
        Self::new(entries)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> LookupResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn entries(&self) -> &[CoordinateEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First entry whose key occurs in `normalize(name) + normalize(query)`.
    pub fn lookup(&self, name: &str, query: &str) -> Option<Coordinates> {
        let haystack = format!("{}{}", normalize_key(name), normalize_key(query));
        self.entries
            .iter()
            .find(|e| haystack.contains(e.key.as_str()))
            .map(CoordinateEntry::coordinates)
    }
}

/// `query` parameter of the record's first link, or an empty string.
pub fn link_query(record: &ActivityRecord) -> String {
    if !record.link.contains("query=") {
        return String::new();
    }
    split_links(&record.link)
        .first()
        .and_then(|first| Url::parse(first).ok())
        .and_then(|url| {
            url.query_pairs()
                .find(|(k, _)| k == "query")
                .map(|(_, v)| v.into_owned())
        })
        .unwrap_or_default()
}

/// Approximate position of a record.
pub fn locate(record: &ActivityRecord, table: &CoordinateTable) -> Option<Coordinates> {
    table.lookup(&record.name, &link_query(record))
}
