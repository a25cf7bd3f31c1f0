//! REST handlers for the tree queries: pedigree, descendancy, ahnentafel,
//! relationship, search, and quality.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use genea_db::repo::{PersonRepo, PersonSearch};
use genea_engine::query::{
    AhnentafelQuery, DescendancyQuery, PedigreeQuery, QualityQuery, RelationshipQuery,
};

use super::dto::{GenerationsQuery, SearchQuery};
use super::error::{ApiError, not_found};
use super::state::AppState;

/// GET /pedigree/{id}?generations=N
pub async fn pedigree(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<GenerationsQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let tree = PedigreeQuery::pedigree(&state.db, id, query.generations)
        .await?
        .ok_or_else(|| not_found("Person", id))?;
    Ok(Json(serde_json::to_value(tree).unwrap_or_default()))
}

/// GET /descendancy/{id}?generations=N
pub async fn descendancy(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<GenerationsQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let tree = DescendancyQuery::descendancy(&state.db, id, query.generations)
        .await?
        .ok_or_else(|| not_found("Person", id))?;
    Ok(Json(serde_json::to_value(tree).unwrap_or_default()))
}

/// GET /ahnentafel/{id}?format={json|text}&generations=N
pub async fn ahnentafel(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<GenerationsQuery>,
) -> Result<axum::response::Response, ApiError> {
    let entries = AhnentafelQuery::ahnentafel(&state.db, id, query.generations).await?;
    if entries.is_empty() {
        return Err(not_found("Person", id));
    }
    use axum::response::IntoResponse;
    if query.format.as_deref() == Some("text") {
        return Ok(AhnentafelQuery::to_text(&entries).into_response());
    }
    Ok(Json(serde_json::to_value(entries).unwrap_or_default()).into_response())
}

/// GET /relationship/{a}/{b}
pub async fn relationship(
    State(state): State<AppState>,
    Path((a, b)): Path<(Uuid, Uuid)>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let relationship = RelationshipQuery::relationship(&state.db, a, b).await?;
    Ok(Json(serde_json::to_value(relationship).unwrap_or_default()))
}

/// GET /search?q=…&fuzzy=…&soundex=…
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let hits = PersonRepo::search(
        &state.db,
        &PersonSearch {
            query: query.q,
            fuzzy: query.fuzzy,
            soundex: query.soundex,
            birth_date_from: query.birth_date_from,
            birth_date_to: query.birth_date_to,
            birth_place: query.birth_place,
            limit: query.limit,
        },
    )
    .await?;
    Ok(Json(serde_json::to_value(hits).unwrap_or_default()))
}

/// GET /persons/{id}/quality
pub async fn quality(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let report = QualityQuery::for_person(&state.db, id)
        .await?
        .ok_or_else(|| not_found("Person", id))?;
    Ok(Json(serde_json::to_value(report).unwrap_or_default()))
}
