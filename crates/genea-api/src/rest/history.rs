//! REST handlers for history, snapshots, and snapshot comparison.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use genea_engine::commands::SnapshotCommands;
use genea_engine::query::{HistoryQuery, SnapshotQuery};

use super::dto::{CompareSnapshotsQuery, CreateSnapshotRequest, HistoryRangeQuery};
use super::error::ApiError;
use super::state::AppState;

/// GET /history — the global activity feed.
pub async fn global_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryRangeQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let types: Vec<String> = query
        .types
        .as_deref()
        .map(|t| t.split(',').map(str::trim).map(str::to_string).collect())
        .unwrap_or_default();
    let entries = HistoryQuery::global(
        state.store.as_ref(),
        query.from,
        query.to,
        &types,
        query.limit.unwrap_or(50),
        query.offset.unwrap_or(0),
    )
    .await?;
    Ok(Json(serde_json::to_value(entries).unwrap_or_default()))
}

/// GET /{entity}/{id}/history — per-aggregate field history.
pub async fn aggregate_history(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<HistoryRangeQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let entries = HistoryQuery::for_aggregate(
        state.store.as_ref(),
        id,
        query.limit.unwrap_or(50),
        query.offset.unwrap_or(0),
    )
    .await?;
    Ok(Json(serde_json::to_value(entries).unwrap_or_default()))
}

/// GET /snapshots
pub async fn list_snapshots(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let snapshots = SnapshotQuery::list(&state.db).await?;
    Ok(Json(serde_json::to_value(snapshots).unwrap_or_default()))
}

/// POST /snapshots
pub async fn create_snapshot(
    State(state): State<AppState>,
    Json(body): Json<CreateSnapshotRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let snapshot =
        SnapshotCommands::create(state.store.as_ref(), body.name, body.description).await?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::to_value(snapshot).unwrap_or_default()),
    ))
}

/// GET /snapshots/compare?from=…&to=…
pub async fn compare_snapshots(
    State(state): State<AppState>,
    Query(query): Query<CompareSnapshotsQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let comparison =
        SnapshotQuery::compare(&state.db, state.store.as_ref(), query.from, query.to).await?;
    Ok(Json(serde_json::to_value(comparison).unwrap_or_default()))
}
