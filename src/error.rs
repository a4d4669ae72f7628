//! Error types for the registry
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Reason Strings ==
/// Reason returned when a read finds no live record.
pub const REASON_NOT_FOUND_OR_EXPIRED: &str = "GUID not found or expired";

/// Reason returned when a delete finds no live record.
pub const REASON_NOT_FOUND: &str = "GUID not found";

// == Registry Error Enum ==
/// Unified error type for the registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Request body is not parseable JSON
    #[error("Invalid JSON format")]
    InvalidJson,

    /// Body is JSON but lacks `user`, has a non-numeric `expire`, or is not an object
    #[error("Invalid input format")]
    InvalidInput,

    /// Record is absent or expired; carries the client-facing reason
    #[error("{0}")]
    NotFound(&'static str),

    /// Record store fault, always fatal to the operation
    #[error("Store error: {0}")]
    Store(String),

    /// Cache fault, recovered by the engine wherever the cache is advisory
    #[error("Cache error: {0}")]
    Cache(String),

    /// A payload could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(String),
}

#[cfg(feature = "redis")]
impl From<redis::RedisError> for RegistryError {
    fn from(err: redis::RedisError) -> Self {
        RegistryError::Cache(err.to_string())
    }
}

impl RegistryError {
    /// Returns the HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            RegistryError::InvalidJson | RegistryError::InvalidInput => StatusCode::BAD_REQUEST,
            RegistryError::NotFound(_) => StatusCode::NOT_FOUND,
            RegistryError::Store(_)
            | RegistryError::Cache(_)
            | RegistryError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for RegistryError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            RegistryError::Store(_)
            | RegistryError::Cache(_)
            | RegistryError::Serialization(_) => {
                tracing::error!("Request failed: {}", self);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the registry.
pub type Result<T> = std::result::Result<T, RegistryError>;
