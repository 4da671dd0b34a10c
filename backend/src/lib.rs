//! # Tripboard - itinerary CSV ingestion
//!
//! Tripboard turns a trip-planning spreadsheet exported as CSV (one activity
//! per row, quoted cells that may contain commas and line breaks) into a
//! validated sequence of activity records, plus the views a trip page needs:
//! days, types, filters, map links and approximate coordinates.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌──────────────┐
//! │  CSV bytes  │────▶│   Source    │────▶│   Parser    │────▶│  Itinerary   │
//! │ (file/URL)  │     │  (decode)   │     │ (lines+rows)│     │ (days/types) │
//! └─────────────┘     └─────────────┘     └─────────────┘     └──────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use tripboard::parse_itinerary;
//!
//! let csv = "Name,Day,Link,Notes,Price,Time Frame,Type\n\
//!            \"Ichiran Ramen\",Day1,https://maps.app.goo.gl/xyz,Great ramen!,¥900,12:00-13:00,Food";
//! let report = parse_itinerary(csv);
//! assert_eq!(report.records[0].name, "Ichiran Ramen");
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types
//! - [`models`] - Activity record and categories
//! - [`parser`] - Line segmentation, tokenization, row validation
//! - [`source`] - File / bytes / URL loading with encoding detection
//! - [`itinerary`] - Day grouping and filtering
//! - [`links`] - Map link classification
//! - [`geo`] - Coordinate lookup table
//! - [`export`] - CSV / JSON serialization
//! - [`validation`] - JSON Schema validation of records
//! - [`pipeline`] - End-to-end ingestion with logging
//! - [`api`] - HTTP API server

// Core modules
pub mod config;
pub mod error;
pub mod models;

// Parsing
pub mod parser;
pub mod source;

// Views
pub mod geo;
pub mod itinerary;
pub mod links;

// Output
pub mod export;
pub mod validation;

// Orchestration
pub mod pipeline;

// HTTP API
pub mod api;

// =============================================================================
// Re-exports - Errors & config
// =============================================================================

pub use config::Settings;
pub use error::{IngestError, LookupError, ServerError, SourceError};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{ActivityRecord, ActivityType, UNKNOWN_ACTIVITY, UNKNOWN_TYPE};

// =============================================================================
// Re-exports - Parsing
// =============================================================================

pub use parser::{
    clean_field,
    parse_itinerary,
    parse_records,
    parse_row,
    split_logical_lines,
    tokenize_fields,
    ParseReport,
    RowOutcome,
    SkipReason,
    SkippedRow,
};

pub use source::{decode_content, detect_encoding, fetch_url, load_bytes, load_file, Payload};

// =============================================================================
// Re-exports - Views
// =============================================================================

pub use itinerary::{group_by_day, unique_days, unique_types, ActivityFilter, DayGroup, Selection};
pub use links::{classify_links, link_label, map_query, map_target, LinkSet, MapTarget};
pub use geo::{locate, CoordinateTable, Coordinates};

// =============================================================================
// Re-exports - Output
// =============================================================================

pub use export::{to_csv, to_json};
pub use validation::{is_valid_activity_record, validate_activity_record, validate_records};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use pipeline::{ingest_bytes, ingest_file, ingest_payload, IngestOptions, IngestResult};

// Server
pub mod server {
    pub use crate::api::server::start_server;
}
