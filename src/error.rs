//! Error types for the cache service
//!
//! Provides unified error handling using thiserror. Cache lookups never
//! produce these: absence is reported as `None`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache service.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Cache durations that cannot be represented (e.g. negative seconds)
    #[error("Invalid cache config: {0}")]
    InvalidConfig(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request body failed validation; carries every failed rule
    #[error("Validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            CacheError::InvalidConfig(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            CacheError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            CacheError::Validation(errors) => (StatusCode::BAD_REQUEST, json!({ "errors": errors })),
            CacheError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": msg }))
            }
        };

        (status, Json(body)).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache service.
pub type Result<T> = std::result::Result<T, CacheError>;
