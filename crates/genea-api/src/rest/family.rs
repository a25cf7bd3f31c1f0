//! REST handlers for families, their children, family events, and the
//! group sheet.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use genea_core::enums::{ChildRelationship, FactOwnerKind};
use genea_core::types::{FamilyChild, LifeEvent};
use genea_db::repo::{FamilyChildRepo, FamilyRepo, LifeEventRepo};
use genea_engine::commands::{CreateFamily, FactCommands, FamilyCommands};
use genea_engine::query::GroupSheetQuery;

use super::dto::{
    AddChildRequest, CreateFamilyRequest, CreateLifeEventRequest, ListQuery, RemoveChildRequest,
    UpdateFamilyRequest, UpdateLifeEventRequest, VersionQuery, VersionResponse, parse_date,
};
use super::error::{ApiError, not_found};
use super::state::AppState;

/// GET /families
pub async fn list_families(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let page = FamilyRepo::list(&state.db, &query.options()).await?;
    Ok(Json(serde_json::to_value(page).unwrap_or_default()))
}

/// POST /families
pub async fn create_family(
    State(state): State<AppState>,
    Json(body): Json<CreateFamilyRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let family = FamilyCommands::create(
        state.store.as_ref(),
        CreateFamily {
            xref: None,
            partner1_id: body.partner1_id,
            partner2_id: body.partner2_id,
            relationship_type: body.relationship_type,
            marriage_date: body.marriage_date.as_deref().map(parse_date),
            marriage_place: body.marriage_place.map(Into::into),
        },
    )
    .await?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::to_value(family).unwrap_or_default()),
    ))
}

/// GET /families/{id}
pub async fn get_family(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let family = FamilyRepo::get(&state.db, id)
        .await?
        .ok_or_else(|| not_found("Family", id))?;
    Ok(Json(serde_json::to_value(family).unwrap_or_default()))
}

/// PUT /families/{id}
pub async fn update_family(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateFamilyRequest>,
) -> Result<Json<VersionResponse>, ApiError> {
    let (changes, expected) = body.into_changes();
    let version = FamilyCommands::update(state.store.as_ref(), id, changes, expected).await?;
    Ok(Json(VersionResponse { version }))
}

/// DELETE /families/{id}
pub async fn delete_family(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<VersionQuery>,
) -> Result<StatusCode, ApiError> {
    FamilyCommands::delete(state.store.as_ref(), id, query.version).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /families/{id}/children
pub async fn list_children(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<FamilyChild>>, ApiError> {
    Ok(Json(FamilyChildRepo::children_of(&state.db, id).await?))
}

/// POST /families/{id}/children
pub async fn add_child(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<AddChildRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let child = FamilyChild {
        id: Uuid::nil(),
        family_id: id,
        child_id: body.child_id,
        relationship: body.relationship.unwrap_or(ChildRelationship::Biological),
        sequence: body.sequence,
    };
    let (child, version) =
        FamilyCommands::add_child(state.store.as_ref(), child, body.expected_version).await?;
    let mut value = serde_json::to_value(child).unwrap_or_default();
    if let Some(obj) = value.as_object_mut() {
        obj.insert("version".into(), serde_json::json!(version));
    }
    Ok((StatusCode::CREATED, Json(value)))
}

/// DELETE /families/{id}/children
pub async fn remove_child(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<RemoveChildRequest>,
) -> Result<StatusCode, ApiError> {
    FamilyCommands::remove_child(
        state.store.as_ref(),
        id,
        body.child_id,
        body.expected_version,
    )
    .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /families/{id}/events
pub async fn list_events(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<LifeEvent>>, ApiError> {
    Ok(Json(LifeEventRepo::for_owner(&state.db, id).await?))
}

/// POST /families/{id}/events
pub async fn add_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<CreateLifeEventRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let event = LifeEvent {
        id: Uuid::nil(),
        owner_kind: FactOwnerKind::Family,
        owner_id: id,
        fact_type: body.fact_type,
        date: body.date.as_deref().map(parse_date),
        place: body.place.map(Into::into),
        address: body.address,
        description: body.description,
        cause: body.cause,
        age: body.age,
        is_negated: body.is_negated,
    };
    let (event, version) =
        FactCommands::add_life_event(state.store.as_ref(), event, body.expected_version).await?;
    let mut value = serde_json::to_value(event).unwrap_or_default();
    if let Some(obj) = value.as_object_mut() {
        obj.insert("version".into(), serde_json::json!(version));
    }
    Ok((StatusCode::CREATED, Json(value)))
}

/// PUT /families/{id}/events/{event_id}
pub async fn update_event(
    State(state): State<AppState>,
    Path((id, event_id)): Path<(Uuid, Uuid)>,
    Json(body): Json<UpdateLifeEventRequest>,
) -> Result<Json<VersionResponse>, ApiError> {
    let (changes, expected) = body.into_changes();
    let version = FactCommands::update_life_event(
        state.store.as_ref(),
        FactOwnerKind::Family,
        id,
        event_id,
        changes,
        expected,
    )
    .await?;
    Ok(Json(VersionResponse { version }))
}

/// GET /families/{id}/group-sheet
pub async fn group_sheet(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let sheet = GroupSheetQuery::group_sheet(&state.db, id)
        .await?
        .ok_or_else(|| not_found("Family", id))?;
    Ok(Json(serde_json::to_value(sheet).unwrap_or_default()))
}
