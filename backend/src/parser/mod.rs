//! Itinerary CSV parser.
//!
//! Fixed dialect: comma delimiter, double-quote quoting, doubled-quote
//! escaping, seven positional columns. The parser is a pure function of the
//! payload text and never fails: rows that cannot be validated are reported
//! as [`SkippedRow`]s next to the accepted records.
//!
//! ```text
//! payload ──▶ split_logical_lines ──▶ [header, line 1, line 2, ...]
//!                                          │
//!                        parse_row(line, n) ▼
//!                     RowOutcome::Produced(record) | RowOutcome::Skipped(reason)
//! ```

pub mod fields;
pub mod lines;

pub use fields::{clean_field, split_fields, tokenize_fields};
pub use lines::split_logical_lines;

use serde::{Deserialize, Serialize};

use crate::models::{ActivityRecord, DAY_PREFIX, UNKNOWN_ACTIVITY, UNKNOWN_TYPE};

/// Leading sequence of a spacer row (all-empty leading columns).
const SPACER_PREFIX: &str = ",,,";

/// Minimum number of tokens needed to read the day column.
const MIN_FIELDS: usize = 2;

/// Why a data line did not produce a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SkipReason {
    /// Nothing but whitespace.
    Blank,
    /// Layout spacer row starting with `,,,`.
    Spacer,
    /// Fewer than two columns.
    TooFewFields { found: usize },
    /// Day column does not start with `Day`.
    InvalidDay { day: String },
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::Blank => write!(f, "blank line"),
            SkipReason::Spacer => write!(f, "spacer row"),
            SkipReason::TooFewFields { found } => {
                write!(f, "expected at least {} columns, found {}", MIN_FIELDS, found)
            }
            SkipReason::InvalidDay { day } => {
                write!(f, "day '{}' does not start with '{}'", day, DAY_PREFIX)
            }
        }
    }
}

/// A data line that was dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedRow {
    /// Logical line position (header is 0).
    pub line: usize,
    pub reason: SkipReason,
}

/// Outcome of parsing one data line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    Produced(ActivityRecord),
    Skipped(SkipReason),
}

/// Result of parsing a whole payload.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ParseReport {
    /// Accepted records, in source order.
    pub records: Vec<ActivityRecord>,
    /// Dropped data lines, in source order.
    pub skipped: Vec<SkippedRow>,
}

impl ParseReport {
    /// Number of data lines seen (header excluded).
    pub fn data_lines(&self) -> usize {
        self.records.len() + self.skipped.len()
    }

    /// Get summary statistics
    pub fn summary(&self) -> String {
        format!(
            "Parsed: {} records, {} skipped of {} data lines",
            self.records.len(),
            self.skipped.len(),
            self.data_lines()
        )
    }
}

/// Parse one logical data line found at position `line`.
pub fn parse_row(raw_line: &str, line: usize) -> RowOutcome {
    let trimmed = raw_line.trim();
    if trimmed.is_empty() {
        return RowOutcome::Skipped(SkipReason::Blank);
    }
    if trimmed.starts_with(SPACER_PREFIX) {
        return RowOutcome::Skipped(SkipReason::Spacer);
    }

    let mut columns = split_fields(trimmed).into_iter();
    let found = columns.len();
    if found < MIN_FIELDS {
        return RowOutcome::Skipped(SkipReason::TooFewFields { found });
    }

    let mut next = || columns.next().unwrap_or_default();
    let name = next();
    let day = next();
    if !day.starts_with(DAY_PREFIX) {
        return RowOutcome::Skipped(SkipReason::InvalidDay { day });
    }
    let link = next();
    let notes = next();
    let price = next();
    let time_frame = next();
    let activity_type = next();

    RowOutcome::Produced(ActivityRecord {
        id: ActivityRecord::identifier_for(line),
        name: or_default(name, UNKNOWN_ACTIVITY),
        day,
        link,
        notes,
        price,
        time_frame,
        activity_type: or_default(activity_type, UNKNOWN_TYPE),
    })
}

fn or_default(value: String, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value
    }
}

/// Parse a full payload: header line first, then one activity per line.
///
/// # Example
/// ```
/// use tripboard::parser::parse_itinerary;
///
/// let csv = "Name,Day,Link,Notes,Price,Time Frame,Type\n\
///            Ichiran Ramen,Day1,,Great ramen!,¥900,12:00-13:00,Food\n\
///            Lunch,Tuesday";
/// let report = parse_itinerary(csv);
///
/// assert_eq!(report.records.len(), 1);
/// assert_eq!(report.records[0].id, "event-1");
/// assert_eq!(report.skipped.len(), 1);
/// ```
pub fn parse_itinerary(payload: &str) -> ParseReport {
    let mut report = ParseReport::default();

    for (line, text) in split_logical_lines(payload).iter().enumerate().skip(1) {
        match parse_row(text, line) {
            RowOutcome::Produced(record) => report.records.push(record),
            RowOutcome::Skipped(reason) => report.skipped.push(SkippedRow { line, reason }),
        }
    }

    report
}

/// Parse a payload and keep only the accepted records.
pub fn parse_records(payload: &str) -> Vec<ActivityRecord> {
    parse_itinerary(payload).records
}
