//! REST handlers for sources and repositories.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use genea_core::enums::SourceType;
use genea_core::types::{Repository, Source};
use genea_db::repo::{CitationRepo, RepositoryRepo, SourceRepo};
use genea_engine::commands::{RepositoryCommands, SourceCommands};

use super::dto::{
    CreateRepositoryRequest, CreateSourceRequest, ListQuery, UpdateRepositoryRequest,
    UpdateSourceRequest, VersionQuery, VersionResponse,
};
use super::error::{ApiError, not_found};
use super::state::AppState;

/// GET /sources
pub async fn list_sources(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let page = SourceRepo::list(&state.db, &query.options()).await?;
    Ok(Json(serde_json::to_value(page).unwrap_or_default()))
}

/// POST /sources
pub async fn create_source(
    State(state): State<AppState>,
    Json(body): Json<CreateSourceRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let source = Source {
        id: Uuid::nil(),
        xref: None,
        source_type: body.source_type.unwrap_or(SourceType::Other),
        title: body.title,
        author: body.author,
        publisher: body.publisher,
        publish_date: body.publish_date,
        url: body.url,
        repository_id: body.repository_id,
        repository_name: body.repository_name,
        call_number: body.call_number,
        notes: body.notes,
        ..Default::default()
    };
    let source = SourceCommands::create(state.store.as_ref(), source).await?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::to_value(source).unwrap_or_default()),
    ))
}

/// GET /sources/{id}
pub async fn get_source(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let source = SourceRepo::get(&state.db, id)
        .await?
        .ok_or_else(|| not_found("Source", id))?;
    Ok(Json(serde_json::to_value(source).unwrap_or_default()))
}

/// PUT /sources/{id}
pub async fn update_source(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateSourceRequest>,
) -> Result<Json<VersionResponse>, ApiError> {
    let (changes, expected) = body.into_changes();
    let version = SourceCommands::update(state.store.as_ref(), id, changes, expected).await?;
    Ok(Json(VersionResponse { version }))
}

/// DELETE /sources/{id}
pub async fn delete_source(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<VersionQuery>,
) -> Result<StatusCode, ApiError> {
    SourceCommands::delete(state.store.as_ref(), id, query.version).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /sources/{id}/citations
pub async fn source_citations(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let citations = CitationRepo::for_source(&state.db, id).await?;
    Ok(Json(serde_json::to_value(citations).unwrap_or_default()))
}

// ── Repositories ────────────────────────────────────────────────────

/// GET /repositories
pub async fn list_repositories(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let page = RepositoryRepo::list(&state.db, &query.options()).await?;
    Ok(Json(serde_json::to_value(page).unwrap_or_default()))
}

/// POST /repositories
pub async fn create_repository(
    State(state): State<AppState>,
    Json(body): Json<CreateRepositoryRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let repository = Repository {
        id: Uuid::nil(),
        xref: None,
        name: body.name,
        address: body.address,
        phone: body.phone,
        email: body.email,
        website: body.website,
        ..Default::default()
    };
    let repository = RepositoryCommands::create(state.store.as_ref(), repository).await?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::to_value(repository).unwrap_or_default()),
    ))
}

/// GET /repositories/{id}
pub async fn get_repository(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let repository = RepositoryRepo::get(&state.db, id)
        .await?
        .ok_or_else(|| not_found("Repository", id))?;
    Ok(Json(serde_json::to_value(repository).unwrap_or_default()))
}

/// PUT /repositories/{id}
pub async fn update_repository(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateRepositoryRequest>,
) -> Result<Json<VersionResponse>, ApiError> {
    let (changes, expected) = body.into_changes();
    let version = RepositoryCommands::update(state.store.as_ref(), id, changes, expected).await?;
    Ok(Json(VersionResponse { version }))
}

/// DELETE /repositories/{id}
pub async fn delete_repository(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<VersionQuery>,
) -> Result<StatusCode, ApiError> {
    RepositoryCommands::delete(state.store.as_ref(), id, query.version).await?;
    Ok(StatusCode::NO_CONTENT)
}
