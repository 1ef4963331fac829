//! Error types for the Genie API client.

use thiserror::Error;

/// Errors that can occur when talking to the Genie REST API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The requested space does not exist.
    #[error("space not found: {space_id}")]
    NotFound { space_id: String },

    /// Authentication or authorization failed.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Structured error returned by the Databricks API.
    #[error("API error: {error_code} - {message}")]
    Api { error_code: String, message: String },

    /// A required field was missing from a request.
    #[error("request missing required field: {0}")]
    MissingField(&'static str),

    /// Invalid response from the server.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
