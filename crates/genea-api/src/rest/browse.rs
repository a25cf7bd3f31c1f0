//! REST handlers for browse endpoints, discovery analytics, and the map
//! location feed.

use axum::Json;
use axum::extract::{Query, State};

use genea_engine::query::{BrowseQuery, QualityQuery};

use super::dto::LimitQuery;
use super::error::ApiError;
use super::state::AppState;

/// GET /browse/surnames
pub async fn surnames(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let surnames = BrowseQuery::surnames(&state.db).await?;
    Ok(Json(serde_json::to_value(surnames).unwrap_or_default()))
}

/// GET /browse/places
pub async fn places(State(state): State<AppState>) -> Result<Json<serde_json::Value>, ApiError> {
    let places = BrowseQuery::places(&state.db).await?;
    Ok(Json(serde_json::to_value(places).unwrap_or_default()))
}

/// GET /browse/cemeteries
pub async fn cemeteries(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let cemeteries = BrowseQuery::cemeteries(&state.db).await?;
    Ok(Json(serde_json::to_value(cemeteries).unwrap_or_default()))
}

/// GET /browse/brick-walls
pub async fn brick_walls(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let persons = BrowseQuery::brick_walls(&state.db).await?;
    Ok(Json(serde_json::to_value(persons).unwrap_or_default()))
}

/// GET /analytics/discovery?limit=N
pub async fn discovery(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let reports = QualityQuery::discovery(&state.db, query.limit.unwrap_or(20)).await?;
    Ok(Json(serde_json::to_value(reports).unwrap_or_default()))
}

/// GET /map/locations
pub async fn map_locations(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let locations = BrowseQuery::map_locations(&state.db).await?;
    Ok(Json(serde_json::to_value(locations).unwrap_or_default()))
}
