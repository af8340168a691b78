//! Error types for the weather cache
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Cache Error Enum ==
/// Unified error type for the weather cache.
///
/// Cloneable so that a single fetch outcome can be handed to every caller
/// waiting on it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CacheError {
    /// The data source could not produce a record (network, timeout, bad payload)
    #[error("Data unavailable: {0}")]
    DataUnavailable(String),

    /// The data source reported the key as unknown upstream
    #[error("Key not found: {0}")]
    KeyNotFound(String),

    /// A required setting is missing or malformed (startup only)
    #[error("Invalid configuration: {0}")]
    ConfigurationInvalid(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::DataUnavailable(_) => StatusCode::BAD_GATEWAY,
            CacheError::KeyNotFound(_) => StatusCode::NOT_FOUND,
            CacheError::ConfigurationInvalid(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CacheError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the weather cache.
pub type Result<T> = std::result::Result<T, CacheError>;
