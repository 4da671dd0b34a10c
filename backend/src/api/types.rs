//! REST API types.
//!
//! Records are returned exactly as the parser emits them, with camelCase
//! keys, so a frontend can render them without conversion.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::itinerary::DayGroup;
use crate::models::ActivityRecord;
use crate::parser::SkippedRow;
use crate::pipeline::IngestResult;

/// Response sent after an upload or raw parse request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    /// Unique job identifier
    pub job_id: String,

    /// Status: "ready" or "warning" (some rows skipped)
    pub status: String,

    /// Activities matching the requested filter
    pub activities: Vec<ActivityRecord>,

    /// Same activities grouped per day
    pub groups: Vec<DayGroupResponse>,

    pub metadata: ResponseMetadata,
}

/// One day of the itinerary
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayGroupResponse {
    pub day: String,
    /// Identifiers of the day's activities, in order
    pub activity_ids: Vec<String>,
}

impl From<&DayGroup> for DayGroupResponse {
    fn from(group: &DayGroup) -> Self {
        Self {
            day: group.day.clone(),
            activity_ids: group.activities.iter().map(|a| a.id.clone()).collect(),
        }
    }
}

/// Metadata about the ingestion
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMetadata {
    /// Activities before filtering
    pub total_activities: usize,

    /// Activities after filtering
    pub matching_activities: usize,

    /// Every day of the itinerary
    pub days: Vec<String>,

    /// Every activity type of the itinerary
    pub types: Vec<String>,

    pub source: SourceMetadata,

    /// Data lines that produced no activity
    pub skipped: Vec<SkippedRow>,

    /// RFC 3339 processing time
    pub processed_at: String,
}

/// Payload metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceMetadata {
    pub encoding: String,
    pub bytes: usize,
    pub data_lines: usize,
}

impl From<IngestResult> for UploadResponse {
    fn from(result: IngestResult) -> Self {
        let groups = result.groups.iter().map(DayGroupResponse::from).collect();
        let matching = result.records.len();

        UploadResponse {
            job_id: Uuid::new_v4().to_string(),
            status: if result.skipped.is_empty() { "ready" } else { "warning" }.to_string(),
            activities: result.records,
            groups,
            metadata: ResponseMetadata {
                total_activities: result.total_records,
                matching_activities: matching,
                days: result.days,
                types: result.types,
                source: SourceMetadata {
                    encoding: result.source.encoding,
                    bytes: result.source.bytes,
                    data_lines: result.source.data_lines,
                },
                skipped: result.skipped,
                processed_at: chrono::Utc::now().to_rfc3339(),
            },
        }
    }
}

/// Create an error response
pub fn error_response(error: &str) -> Value {
    json!({
        "jobId": Uuid::new_v4().to_string(),
        "status": "error",
        "error": error,
        "activities": [],
        "groups": [],
        "metadata": null
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{ingest_bytes, IngestOptions};

    #[test]
    fn test_response_from_result() {
        let csv = "Name,Day,Link,Notes,Price,Time Frame,Type\nA,Day1\nB,Day2\nC,Nope";
        let result = ingest_bytes(csv.as_bytes(), &IngestOptions::default()).unwrap();
        let response = UploadResponse::from(result);

        assert_eq!(response.status, "warning");
        assert_eq!(response.activities.len(), 2);
        assert_eq!(response.groups[1].activity_ids, vec!["event-2"]);
        assert_eq!(response.metadata.skipped.len(), 1);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["metadata"]["totalActivities"], 2);
        assert_eq!(json["activities"][0]["timeFrame"], "");
        assert_eq!(json["metadata"]["skipped"][0]["reason"]["kind"], "invalidDay");
    }

    #[test]
    fn test_error_response_shape() {
        let json = error_response("boom");
        assert_eq!(json["status"], "error");
        assert_eq!(json["error"], "boom");
        assert!(json["activities"].as_array().unwrap().is_empty());
    }
}
