//! HTTP server for the tripboard API.
//!
//! # API Endpoints
//!
//! | Method | Path              | Description                               |
//! |--------|-------------------|-------------------------------------------|
//! | GET    | `/health`         | Health check                              |
//! | POST   | `/api/upload`     | Multipart upload (`file`, `day`, `type`)  |
//! | POST   | `/api/parse`      | Raw CSV body, `?day=..&type=..` filter    |
//! | GET    | `/api/logs`       | SSE stream for real-time logs             |

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Multipart, Query, State},
    http::{header, Method, StatusCode},
    response::{sse::Event, Json, Sse},
    routing::{get, post},
    Router,
};
use futures::stream::Stream;
use serde::Deserialize;
use serde_json::{json, Value};
use std::{convert::Infallible, net::SocketAddr, time::Duration};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt as _;
use tower_http::cors::CorsLayer;

use super::logs::{log_error, log_info, LOG_BROADCASTER};
use super::types::{error_response, UploadResponse};
use crate::config::Settings;
use crate::error::{IngestError, ServerError, ServerResult, SourceError};
use crate::itinerary::{ActivityFilter, Selection};
use crate::pipeline::{ingest_bytes, IngestOptions};

/// Multipart framing overhead allowed on top of the payload limit.
const MULTIPART_SLACK_BYTES: usize = 64 * 1024;

type Rejection = (StatusCode, Json<Value>);

#[derive(Clone)]
struct AppState {
    max_payload_bytes: usize,
}

impl AppState {
    fn options(&self, filter: ActivityFilter) -> IngestOptions {
        IngestOptions { filter, max_payload_bytes: self.max_payload_bytes }
    }
}

/// Filter passed as query parameters.
#[derive(Debug, Default, Deserialize)]
struct FilterParams {
    day: Option<String>,
    #[serde(rename = "type")]
    activity_type: Option<String>,
}

impl FilterParams {
    fn into_filter(self) -> ActivityFilter {
        ActivityFilter::new(
            Selection::from_option(self.day.as_deref()),
            Selection::from_option(self.activity_type.as_deref()),
        )
    }
}

/// Build the application router
pub fn router(settings: &Settings) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_TYPE]);

    let state = AppState { max_payload_bytes: settings.max_payload_bytes };

    Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .route("/api/upload", post(upload_csv))
        .route("/api/parse", post(parse_body))
        .route("/api/logs", get(sse_logs))
        .layer(DefaultBodyLimit::max(settings.max_payload_bytes + MULTIPART_SLACK_BYTES))
        .layer(cors)
        .with_state(state)
}

/// Start the HTTP server
pub async fn start_server(settings: Settings) -> Result<(), Box<dyn std::error::Error>> {
    let app = router(&settings);

    let addr = SocketAddr::from(([0, 0, 0, 0], settings.port));
    println!("🚀 Tripboard server running on http://localhost:{}", settings.port);
    println!("   POST /api/upload - Upload itinerary CSV (multipart)");
    println!("   POST /api/parse  - Parse raw CSV body");
    println!("   GET  /api/logs   - SSE log stream");
    println!("   GET  /health     - Health check");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Health check endpoint
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "tripboard",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "upload": "POST /api/upload",
            "parse": "POST /api/parse",
            "logs": "GET /api/logs (SSE)"
        }
    }))
}

/// SSE endpoint for real-time log streaming
async fn sse_logs() -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = LOG_BROADCASTER.subscribe();

    let stream = BroadcastStream::new(rx).filter_map(|result| match result {
        Ok(entry) => {
            let json = serde_json::to_string(&entry).ok()?;
            Some(Ok(Event::default().data(json)))
        }
        Err(_) => None,
    });

    Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

/// Multipart upload endpoint
async fn upload_csv(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, Rejection> {
    let (bytes, file_name, params) = read_upload(multipart).await.map_err(reject)?;

    log_info(format!(
        "📄 Upload: {} ({} bytes)",
        file_name.as_deref().unwrap_or("unknown"),
        bytes.len()
    ));

    run_ingest(&bytes, state.options(params.into_filter())).map_err(reject)
}

/// Raw body endpoint
async fn parse_body(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
    body: Bytes,
) -> Result<Json<UploadResponse>, Rejection> {
    log_info(format!("📄 Raw payload ({} bytes)", body.len()));
    run_ingest(&body, state.options(params.into_filter())).map_err(reject)
}

async fn read_upload(
    mut multipart: Multipart,
) -> ServerResult<(Vec<u8>, Option<String>, FilterParams)> {
    let mut file_data: Option<Vec<u8>> = None;
    let mut file_name: Option<String> = None;
    let mut params = FilterParams::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServerError::BadRequest(format!("Multipart error: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                file_name = field.file_name().map(|s| s.to_string());
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ServerError::BadRequest(format!("Read error: {}", e)))?;
                file_data = Some(data.to_vec());
            }
            "day" | "type" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| ServerError::BadRequest(format!("Read error: {}", e)))?;
                if name == "day" {
                    params.day = Some(value);
                } else {
                    params.activity_type = Some(value);
                }
            }
            _ => {}
        }
    }

    let bytes = file_data.ok_or_else(|| ServerError::BadRequest("No file provided".into()))?;
    Ok((bytes, file_name, params))
}

fn run_ingest(bytes: &[u8], options: IngestOptions) -> ServerResult<Json<UploadResponse>> {
    let result = ingest_bytes(bytes, &options)?;
    Ok(Json(UploadResponse::from(result)))
}

fn status_for(err: &ServerError) -> StatusCode {
    match err {
        ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
        ServerError::Ingest(IngestError::Source(SourceError::TooLarge { .. })) => {
            StatusCode::PAYLOAD_TOO_LARGE
        }
        ServerError::Ingest(IngestError::Source(SourceError::EmptyPayload)) => {
            StatusCode::BAD_REQUEST
        }
        ServerError::Ingest(_) | ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn reject(err: ServerError) -> Rejection {
    log_error(err.to_string());
    (status_for(&err), Json(error_response(&err.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let too_large = ServerError::Ingest(IngestError::Source(SourceError::TooLarge {
            size: 10,
            max: 1,
        }));
        assert_eq!(status_for(&too_large), StatusCode::PAYLOAD_TOO_LARGE);

        let empty = ServerError::Ingest(SourceError::EmptyPayload.into());
        assert_eq!(status_for(&empty), StatusCode::BAD_REQUEST);

        let internal = ServerError::Internal("x".into());
        assert_eq!(status_for(&internal), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_filter_params() {
        let params = FilterParams { day: Some("Day2".into()), activity_type: Some("All".into()) };
        let filter = params.into_filter();
        assert_eq!(filter.day, Selection::Only("Day2".into()));
        assert!(filter.activity_type.is_all());
    }

    #[test]
    fn test_run_ingest() {
        let Json(response) = run_ingest(
            b"Name,Day\nA,Day1\n",
            IngestOptions::default(),
        )
        .unwrap();
        assert_eq!(response.status, "ready");
        assert_eq!(response.activities[0].name, "A");
    }

    #[test]
    fn test_router_builds() {
        let _ = router(&Settings::default());
    }
}
