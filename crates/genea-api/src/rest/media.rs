//! REST handlers for media. Multipart decoding is an outer concern; the
//! payload arrives base64-encoded in the JSON body and is served back raw.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use data_encoding::BASE64;
use uuid::Uuid;

use genea_core::GeneaError;
use genea_db::repo::MediaRepo;
use genea_engine::commands::MediaCommands;

use super::dto::{CreateMediaRequest, ListQuery, UpdateMediaRequest, VersionQuery, VersionResponse};
use super::error::{ApiError, not_found};
use super::state::AppState;

/// GET /media
pub async fn list_media(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let page = MediaRepo::list(&state.db, &query.options()).await?;
    Ok(Json(serde_json::to_value(page).unwrap_or_default()))
}

/// POST /media
pub async fn create_media(
    State(state): State<AppState>,
    Json(body): Json<CreateMediaRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let data = BASE64
        .decode(body.data.as_bytes())
        .map_err(|e| ApiError(GeneaError::validation("data", e.to_string())))?;
    let thumbnail = body
        .thumbnail
        .map(|t| BASE64.decode(t.as_bytes()))
        .transpose()
        .map_err(|e| ApiError(GeneaError::validation("thumbnail", e.to_string())))?;

    let media = genea_core::types::Media {
        id: Uuid::nil(),
        xref: None,
        owner_kind: body.owner_kind,
        owner_id: body.owner_id,
        title: body.title,
        description: body.description,
        mime_type: body.mime_type,
        media_kind: body.media_kind,
        file_name: body.file_name,
        data,
        thumbnail,
        crop: body.crop,
        version: 0,
        created_at: chrono::Utc::now(),
        updated_at: chrono::Utc::now(),
    };
    let media = MediaCommands::create(state.store.as_ref(), media).await?;
    // Metadata only in the response; the payload is fetched separately.
    let meta = MediaRepo::get(&state.db, media.id).await?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::to_value(meta).unwrap_or_default()),
    ))
}

/// GET /media/{id} — metadata only.
pub async fn get_media(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let meta = MediaRepo::get(&state.db, id)
        .await?
        .ok_or_else(|| not_found("Media", id))?;
    Ok(Json(serde_json::to_value(meta).unwrap_or_default()))
}

/// GET /media/{id}/data — the raw payload with its MIME type.
pub async fn get_media_data(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let media = MediaRepo::get_with_data(&state.db, id)
        .await?
        .ok_or_else(|| not_found("Media", id))?;
    Ok((
        [(header::CONTENT_TYPE, media.mime_type)],
        media.data,
    )
        .into_response())
}

/// GET /media/{id}/thumbnail
pub async fn get_media_thumbnail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let thumbnail = MediaRepo::get_thumbnail(&state.db, id)
        .await?
        .ok_or_else(|| not_found("Media", id))?;
    Ok(([(header::CONTENT_TYPE, "image/jpeg".to_string())], thumbnail).into_response())
}

/// PUT /media/{id}
pub async fn update_media(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateMediaRequest>,
) -> Result<Json<VersionResponse>, ApiError> {
    let (changes, expected) = body.into_changes();
    let version = MediaCommands::update(state.store.as_ref(), id, changes, expected).await?;
    Ok(Json(VersionResponse { version }))
}

/// DELETE /media/{id}
pub async fn delete_media(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<VersionQuery>,
) -> Result<StatusCode, ApiError> {
    MediaCommands::delete(state.store.as_ref(), id, query.version).await?;
    Ok(StatusCode::NO_CONTENT)
}
