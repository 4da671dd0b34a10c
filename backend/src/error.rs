//! Error types for the Tripboard ingestion pipeline.
//!
//! The parser itself never fails; errors only come from the layers around it:
//!
//! - [`SourceError`] - Reading, downloading or decoding a payload
//! - [`LookupError`] - Loading a coordinate table
//! - [`IngestError`] - Top-level orchestration errors
//! - [`ServerError`] - HTTP API errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use thiserror::Error;

// =============================================================================
// Source Errors
// =============================================================================

/// Errors while obtaining the payload text.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Failed to read file.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// Download failed or returned a non-success status.
    #[error("Download failed: {0}")]
    Http(String),

    /// Payload exceeds the configured limit.
    #[error("Payload is {size} bytes, limit is {max} bytes")]
    TooLarge { size: usize, max: usize },

    /// Nothing to parse.
    #[error("Payload is empty")]
    EmptyPayload,
}

impl From<reqwest::Error> for SourceError {
    fn from(e: reqwest::Error) -> Self {
        SourceError::Http(e.to_string())
    }
}

// =============================================================================
// Lookup Errors
// =============================================================================

/// Errors while loading a coordinate table.
#[derive(Debug, Error)]
pub enum LookupError {
    /// IO error.
    #[error("Coordinate table IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error.
    #[error("Coordinate table JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Entry with an empty key or out-of-range coordinates.
    #[error("Invalid coordinate entry '{key}': {message}")]
    InvalidEntry { key: String, message: String },
}

// =============================================================================
// Ingest Errors (top-level)
// =============================================================================

/// Top-level ingestion errors.
///
/// This is the error type returned by [`crate::pipeline::ingest_bytes`].
#[derive(Debug, Error)]
pub enum IngestError {
    /// Payload could not be obtained.
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// Serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// =============================================================================
// Server Errors
// =============================================================================

/// HTTP server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Ingestion error.
    #[error("Ingest error: {0}")]
    Ingest(#[from] IngestError),

    /// Invalid request.
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Server internal error.
    #[error("Internal server error: {0}")]
    Internal(String),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for source operations.
pub type SourceResult<T> = Result<T, SourceError>;

/// Result type for coordinate table operations.
pub type LookupResult<T> = Result<T, LookupError>;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        // SourceError -> IngestError -> ServerError
        let source_err = SourceError::EmptyPayload;
        let ingest_err: IngestError = source_err.into();
        assert!(ingest_err.to_string().contains("empty"));

        let server_err: ServerError = ingest_err.into();
        assert!(server_err.to_string().contains("Ingest error"));
    }

    #[test]
    fn test_too_large_format() {
        let err = SourceError::TooLarge { size: 2048, max: 1024 };
        let msg = err.to_string();
        assert!(msg.contains("2048"));
        assert!(msg.contains("1024"));
    }
}
