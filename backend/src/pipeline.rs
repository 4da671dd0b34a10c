//! High-level ingestion API.
//!
//! Combines every step: decoding, parsing, diagnostics, filtering and
//! grouping by day.
//!
//! # Example
//!
//! ```rust,ignore
//! use tripboard::pipeline::{ingest_file, IngestOptions};
//!
//! let result = ingest_file("trip.csv", &IngestOptions::default())?;
//! println!("{} activities over {} days", result.records.len(), result.days.len());
//! ```

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

use crate::api::logs::{log_info, log_info_indent, log_success, log_warning};
use crate::config::DEFAULT_MAX_PAYLOAD_BYTES;
use crate::error::IngestError;
use crate::itinerary::{group_by_day, unique_days, unique_types, ActivityFilter, DayGroup};
use crate::models::{ActivityRecord, ActivityType};
use crate::parser::{parse_itinerary, ParseReport, SkippedRow};
use crate::source::{load_bytes, load_file, Payload};

/// Maximum number of skipped rows listed individually in the log.
const SKIP_SAMPLE: usize = 5;

/// Options for the ingestion pipeline
#[derive(Debug, Clone)]
pub struct IngestOptions {
    /// Records kept in `records` and `groups`
    pub filter: ActivityFilter,
    /// Reject larger payloads before decoding
    pub max_payload_bytes: usize,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            filter: ActivityFilter::default(),
            max_payload_bytes: DEFAULT_MAX_PAYLOAD_BYTES,
        }
    }
}

/// Payload information
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceInfo {
    pub encoding: String,
    pub bytes: usize,
    /// Logical lines after the header
    pub data_lines: usize,
}

/// Result of a complete ingestion
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestResult {
    /// Records matching the filter, in source order
    pub records: Vec<ActivityRecord>,
    /// Matching records grouped by day
    pub groups: Vec<DayGroup>,
    /// Every day of the itinerary (unfiltered)
    pub days: Vec<String>,
    /// Every known activity type of the itinerary (unfiltered)
    pub types: Vec<String>,
    /// Total records before filtering
    pub total_records: usize,
    /// Data lines that produced no record
    pub skipped: Vec<SkippedRow>,
    pub source: SourceInfo,
}

/// Ingest a payload file.
pub fn ingest_file<P: AsRef<Path>>(
    path: P,
    options: &IngestOptions,
) -> Result<IngestResult, IngestError> {
    log_info(format!("📖 Reading {}", path.as_ref().display()));
    let payload = load_file(path, options.max_payload_bytes)?;
    Ok(ingest_payload(payload, options))
}

/// Ingest raw payload bytes (upload, download).
pub fn ingest_bytes(bytes: &[u8], options: &IngestOptions) -> Result<IngestResult, IngestError> {
    let payload = load_bytes(bytes, options.max_payload_bytes)?;
    Ok(ingest_payload(payload, options))
}

/// Ingest an already decoded payload.
pub fn ingest_payload(payload: Payload, options: &IngestOptions) -> IngestResult {
    log_success(format!("Detected encoding: {}", payload.encoding));

    let report = parse_itinerary(&payload.text);
    print_parse_report(&report);

    let source = SourceInfo {
        encoding: payload.encoding,
        bytes: payload.bytes,
        data_lines: report.data_lines(),
    };
    build_result(report, options, source)
}

fn build_result(report: ParseReport, options: &IngestOptions, source: SourceInfo) -> IngestResult {
    let ParseReport { records: all, skipped } = report;

    let days = unique_days(&all);
    let types = unique_types(&all);
    let total_records = all.len();

    let records = if options.filter.is_unfiltered() {
        all
    } else {
        log_info(format!("🔎 Filtering ({})", options.filter));
        let kept = options.filter.apply(&all);
        log_success(format!("{} of {} activities match", kept.len(), total_records));
        kept
    };

    let groups = group_by_day(&records);
    log_success(format!("{} days, {} activity types", days.len(), types.len()));

    IngestResult {
        records,
        groups,
        days,
        types,
        total_records,
        skipped,
        source,
    }
}

/// Log parse statistics and skipped-row diagnostics
fn print_parse_report(report: &ParseReport) {
    log_success(report.summary());

    if !report.skipped.is_empty() {
        log_warning(format!("{} rows skipped", report.skipped.len()));
        for skip in report.skipped.iter().take(SKIP_SAMPLE) {
            log_info_indent(format!("line {}: {}", skip.line, skip.reason), 1);
        }
        if report.skipped.len() > SKIP_SAMPLE {
            log_info_indent(format!("... +{}", report.skipped.len() - SKIP_SAMPLE), 1);
        }
    }

    let unrecognized = unrecognized_types(&report.records);
    if !unrecognized.is_empty() {
        let labels: Vec<String> = unrecognized
            .iter()
            .map(|(label, count)| format!("{} ({})", label, count))
            .collect();
        log_warning(format!("Unrecognized activity types: {}", labels.join(", ")));
    }
}

/// Type labels outside the known categories, with their counts
pub fn unrecognized_types(records: &[ActivityRecord]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for record in records {
        if ActivityType::from_label(&record.activity_type).is_none() {
            *counts.entry(record.activity_type.clone()).or_insert(0) += 1;
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SourceError;
    use crate::itinerary::Selection;
    use std::io::Write;

    const TRIP: &str = "Name,Day,Link,Notes,Price,Time Frame,Type\n\
        Airport,Day1,,,,,Transportation\n\
        \"Ichiran Ramen\",Day1,\"https://maps.app.goo.gl/xyz\",Great ramen!,¥900,12:00-13:00,Food\n\
        ,,,,,,\n\
        Dazaifu,Day2,,\"Take the train\nthen walk\",,,Historic\n\
        Karaoke,Day2,,,,,Singing\n\
        Lunch,Tuesday\n";

    #[test]
    fn test_default_options() {
        let opts = IngestOptions::default();
        assert!(opts.filter.is_unfiltered());
        assert_eq!(opts.max_payload_bytes, DEFAULT_MAX_PAYLOAD_BYTES);
    }

    #[test]
    fn test_ingest_bytes() {
        let result = ingest_bytes(TRIP.as_bytes(), &IngestOptions::default()).unwrap();

        assert_eq!(result.records.len(), 4);
        assert_eq!(result.total_records, 4);
        assert_eq!(result.skipped.len(), 2);
        assert_eq!(result.source.data_lines, 6);
        assert_eq!(result.days, vec!["Day1", "Day2"]);
        assert_eq!(result.types, vec!["Food", "Historic", "Singing", "Transportation"]);
        assert_eq!(result.groups.len(), 2);
        assert_eq!(result.groups[1].activities[0].notes, "Take the train\nthen walk");
    }

    #[test]
    fn test_filter_keeps_full_day_list() {
        let options = IngestOptions {
            filter: ActivityFilter::new(Selection::parse("Day2"), Selection::All),
            ..IngestOptions::default()
        };
        let result = ingest_bytes(TRIP.as_bytes(), &options).unwrap();

        assert_eq!(result.records.len(), 2);
        assert_eq!(result.total_records, 4);
        assert_eq!(result.days, vec!["Day1", "Day2"]);
        assert_eq!(result.groups.len(), 1);
    }

    #[test]
    fn test_ingest_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(TRIP.as_bytes()).unwrap();

        let result = ingest_file(file.path(), &IngestOptions::default()).unwrap();
        assert_eq!(result.records[1].name, "Ichiran Ramen");
    }

    #[test]
    fn test_payload_limit() {
        let options = IngestOptions { max_payload_bytes: 8, ..IngestOptions::default() };
        let err = ingest_bytes(TRIP.as_bytes(), &options).unwrap_err();
        assert!(matches!(err, IngestError::Source(SourceError::TooLarge { .. })));
    }

    #[test]
    fn test_unrecognized_types() {
        let result = ingest_bytes(TRIP.as_bytes(), &IngestOptions::default()).unwrap();
        let unknown = unrecognized_types(&result.records);
        assert_eq!(unknown.len(), 1);
        assert_eq!(unknown.get("Singing"), Some(&1));
    }
}
