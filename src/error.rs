use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::hex::{HexString, ValidationError};
use crate::store::StoreError;

/// Error response type
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    /// One of: invalid_format, empty_payload, malformed_body, not_found, unavailable, internal
    pub kind: String,
}

/// Response type for health check endpoint
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Response type for unhealthy status
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct UnhealthyResponse {
    pub status: String,
    pub error: String,
}

/// Custom error type for API endpoints
///
/// Every variant maps to one HTTP status and a `kind` string, so callers can
/// tell a bad key from an empty body from a backend outage without parsing
/// the message.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A key or value failed hex validation
    #[error("Invalid {field}: {source}")]
    Validation {
        field: String,
        source: ValidationError,
    },
    /// Request body could not be read as the expected JSON shape
    #[error("Malformed body: {0}")]
    MalformedBody(String),
    /// Key not present in the store
    #[error("Key not found: {0}")]
    KeyNotFound(HexString),
    /// Backend unreachable or timed out
    #[error("Store unavailable: {0}")]
    Unavailable(String),
    /// The store returned something this service cannot serve
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn validation(field: impl Into<String>, source: ValidationError) -> Self {
        ApiError::Validation {
            field: field.into(),
            source,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } | ApiError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            ApiError::KeyNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Validation { source, .. } => source.kind(),
            ApiError::MalformedBody(_) => "malformed_body",
            ApiError::KeyNotFound(_) => "not_found",
            ApiError::Unavailable(_) => "unavailable",
            ApiError::Internal(_) => "internal",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(ErrorResponse {
            error: self.to_string(),
            kind: self.kind().to_string(),
        });

        (status, body).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(msg) => {
                tracing::warn!("Store unavailable: {}", msg);
                ApiError::Unavailable(msg)
            }
            StoreError::CorruptValue { .. } => {
                tracing::error!("{}", err);
                ApiError::Internal(err.to_string())
            }
        }
    }
}
