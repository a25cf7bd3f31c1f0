//! REST handlers for notes and submitters.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use genea_db::repo::{NoteRepo, SubmitterRepo};
use genea_engine::commands::{NoteCommands, SubmitterCommands};

use super::dto::{
    CreateNoteRequest, CreateSubmitterRequest, ListQuery, UpdateNoteRequest,
    UpdateSubmitterRequest, VersionQuery, VersionResponse,
};
use super::error::{ApiError, not_found};
use super::state::AppState;

/// GET /notes
pub async fn list_notes(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let page = NoteRepo::list(&state.db, &query.options()).await?;
    Ok(Json(serde_json::to_value(page).unwrap_or_default()))
}

/// POST /notes
pub async fn create_note(
    State(state): State<AppState>,
    Json(body): Json<CreateNoteRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let note = genea_core::types::Note {
        text: body.text,
        ..Default::default()
    };
    let note = NoteCommands::create(state.store.as_ref(), note).await?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::to_value(note).unwrap_or_default()),
    ))
}

/// GET /notes/{id}
pub async fn get_note(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let note = NoteRepo::get(&state.db, id)
        .await?
        .ok_or_else(|| not_found("Note", id))?;
    Ok(Json(serde_json::to_value(note).unwrap_or_default()))
}

/// PUT /notes/{id}
pub async fn update_note(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateNoteRequest>,
) -> Result<Json<VersionResponse>, ApiError> {
    let (changes, expected) = body.into_changes();
    let version = NoteCommands::update(state.store.as_ref(), id, changes, expected).await?;
    Ok(Json(VersionResponse { version }))
}

/// DELETE /notes/{id}
pub async fn delete_note(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<VersionQuery>,
) -> Result<StatusCode, ApiError> {
    NoteCommands::delete(state.store.as_ref(), id, query.version).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── Submitters ──────────────────────────────────────────────────────

/// GET /submitters
pub async fn list_submitters(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let page = SubmitterRepo::list(&state.db, &query.options()).await?;
    Ok(Json(serde_json::to_value(page).unwrap_or_default()))
}

/// POST /submitters
pub async fn create_submitter(
    State(state): State<AppState>,
    Json(body): Json<CreateSubmitterRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let submitter = genea_core::types::Submitter {
        name: body.name,
        address: body.address,
        phone: body.phone,
        email: body.email,
        ..Default::default()
    };
    let submitter = SubmitterCommands::create(state.store.as_ref(), submitter).await?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::to_value(submitter).unwrap_or_default()),
    ))
}

/// GET /submitters/{id}
pub async fn get_submitter(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let submitter = SubmitterRepo::get(&state.db, id)
        .await?
        .ok_or_else(|| not_found("Submitter", id))?;
    Ok(Json(serde_json::to_value(submitter).unwrap_or_default()))
}

/// PUT /submitters/{id}
pub async fn update_submitter(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateSubmitterRequest>,
) -> Result<Json<VersionResponse>, ApiError> {
    let (changes, expected) = body.into_changes();
    let version = SubmitterCommands::update(state.store.as_ref(), id, changes, expected).await?;
    Ok(Json(VersionResponse { version }))
}

/// DELETE /submitters/{id}
pub async fn delete_submitter(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<VersionQuery>,
) -> Result<StatusCode, ApiError> {
    SubmitterCommands::delete(state.store.as_ref(), id, query.version).await?;
    Ok(StatusCode::NO_CONTENT)
}
