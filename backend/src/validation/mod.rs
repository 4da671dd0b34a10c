//! JSON Schema validation for exported activity records.
//!
//! The parser only ever emits well-formed records; this module checks JSON
//! produced elsewhere (hand-edited exports, other tools) against the same
//! shape before it is fed to a consumer.
//!
//! The schema is embedded at compile time from
//! `schemas/activity-record.json` (JSON Schema Draft 7).
//!
//! # Example
//!
//! ```rust,ignore
//! use serde_json::json;
//! use tripboard::validate_activity_record;
//!
//! let record = json!({
//!     "id": "event-1",
//!     "name": "Ichiran Ramen",
//!     "day": "Day1",
//!     "link": "",
//!     "notes": "",
//!     "price": "¥900",
//!     "timeFrame": "12:00-13:00",
//!     "type": "Food"
//! });
//! assert!(validate_activity_record(&record).is_ok());
//! ```

use once_cell::sync::Lazy;
use serde_json::Value;

static ACTIVITY_RECORD_SCHEMA: Lazy<Value> = Lazy::new(|| {
    serde_json::from_str(include_str!("../../schemas/activity-record.json"))
        .expect("Invalid embedded schema")
});

/// Validate a JSON value against a JSON schema.
///
/// # Returns
/// * `Ok(())` when valid
/// * `Err(Vec<String>)` with every error otherwise
pub fn validate(schema: &Value, data: &Value) -> Result<(), Vec<String>> {
    let validator = jsonschema::draft7::new(schema)
        .map_err(|e| vec![format!("Invalid schema: {}", e)])?;

    let errors: Vec<String> = validator
        .iter_errors(data)
        .map(|e| e.to_string())
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Quick check: true/false only.
pub fn is_valid(schema: &Value, data: &Value) -> bool {
    jsonschema::draft7::is_valid(schema, data)
}

/// Validate one record against the activity record schema.
pub fn validate_activity_record(data: &Value) -> Result<(), Vec<String>> {
    validate(&ACTIVITY_RECORD_SCHEMA, data)
}

/// Quick check against the activity record schema.
pub fn is_valid_activity_record(data: &Value) -> bool {
    is_valid(&ACTIVITY_RECORD_SCHEMA, data)
}

/// Validate every element of a JSON array of records.
///
/// Returns `(valid, invalid, errors)` where `errors` holds the index and
/// messages of each invalid record.
pub fn validate_records(records: &[Value]) -> (usize, usize, Vec<(usize, Vec<String>)>) {
    let mut valid = 0;
    let mut errors = Vec::new();

    for (i, record) in records.iter().enumerate() {
        match validate_activity_record(record) {
            Ok(()) => valid += 1,
            Err(errs) => errors.push((i, errs)),
        }
    }

    (valid, errors.len(), errors)
}
