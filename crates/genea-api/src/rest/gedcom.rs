//! REST handlers for GEDCOM import and export.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

use crate::service::gedcom;

use super::error::ApiError;
use super::state::AppState;

/// POST /gedcom/import
///
/// The request body is the raw GEDCOM byte stream (the multipart layer has
/// already unwrapped the file). Always answers with counts plus warnings
/// and errors; only an unreadable stream fails.
pub async fn import(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let summary = gedcom::import_and_persist(&state, &body).await?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::to_value(summary).unwrap_or_default()),
    ))
}

/// GET /gedcom/export
pub async fn export(State(state): State<AppState>) -> Result<Response, ApiError> {
    let result = gedcom::load_and_export(&state.db, None).await?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"genea.ged\"".to_string(),
            ),
        ],
        result.gedcom,
    )
        .into_response())
}
