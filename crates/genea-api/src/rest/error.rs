//! Error handling: maps `GeneaError` kinds to Axum HTTP responses with the
//! `{"error": {"code", "message", "details"?}}` envelope.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use genea_core::GeneaError;
use serde::Serialize;

/// Inner error body.
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// JSON error envelope returned to clients.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Wrapper around `GeneaError` that implements `IntoResponse`.
pub struct ApiError(pub GeneaError);

impl From<GeneaError> for ApiError {
    fn from(err: GeneaError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, details) = match &self.0 {
            GeneaError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found", None),
            GeneaError::Validation { field, .. } => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                Some(serde_json::json!({ "field": field })),
            ),
            GeneaError::VersionConflict {
                expected, current, ..
            } => (
                StatusCode::CONFLICT,
                "version_conflict",
                Some(serde_json::json!({ "expected": expected, "current": current })),
            ),
            GeneaError::Integrity(_) => (StatusCode::CONFLICT, "integrity_violation", None),
            GeneaError::UnknownEventType(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "unknown_event_type", None)
            }
            GeneaError::CodecMalformed(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "gedcom_unreadable", None)
            }
            GeneaError::Cancelled(_) => (StatusCode::BAD_REQUEST, "cancelled", None),
            GeneaError::Backend(_) => (StatusCode::INTERNAL_SERVER_ERROR, "backend_error", None),
            GeneaError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "io_error", None),
        };

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.0.to_string(),
                details,
            },
        };
        (status, axum::Json(body)).into_response()
    }
}

/// Convenience for handlers that resolved `Option::None` from a repo.
pub fn not_found(entity: &'static str, id: uuid::Uuid) -> ApiError {
    ApiError(GeneaError::NotFound { entity, id })
}
