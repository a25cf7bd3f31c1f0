//! REST handlers for persons and their sub-resources (names, life events,
//! attributes, associations, brick wall, rollback).

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use genea_core::enums::FactOwnerKind;
use genea_core::types::{LifeEvent, PersonName};
use genea_db::repo::{
    AssociationRepo, AttributeRepo, CitationRepo, LifeEventRepo, MediaRepo, PersonNameRepo,
    PersonRepo,
};
use genea_engine::commands::{CreatePerson, FactCommands, PersonCommands, RollbackCommands};
use genea_engine::query::RestoreQuery;

use super::dto::{
    BrickWallRequest, CreateAssociationRequest, CreateAttributeRequest, CreateLifeEventRequest,
    CreatePersonNameRequest, CreatePersonRequest, ListQuery, RollbackRequest,
    UpdateLifeEventRequest, UpdatePersonNameRequest, UpdatePersonRequest, VersionQuery,
    VersionResponse, parse_date,
};
use super::error::{ApiError, not_found};
use super::state::AppState;

/// GET /persons
pub async fn list_persons(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let page = PersonRepo::list(&state.db, &query.options()).await?;
    Ok(Json(serde_json::to_value(page).unwrap_or_default()))
}

/// POST /persons
pub async fn create_person(
    State(state): State<AppState>,
    Json(body): Json<CreatePersonRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let person = PersonCommands::create(
        state.store.as_ref(),
        CreatePerson {
            xref: None,
            given: body.given,
            surname: body.surname,
            gender: body.gender,
            birth_date: body.birth_date.as_deref().map(parse_date),
            birth_place: body.birth_place.map(Into::into),
            death_date: body.death_date.as_deref().map(parse_date),
            death_place: body.death_place.map(Into::into),
            notes: body.notes,
            research_status: body.research_status,
            fsftid: body.fsftid,
        },
    )
    .await?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::to_value(person).unwrap_or_default()),
    ))
}

/// GET /persons/{id}
pub async fn get_person(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let person = PersonRepo::get(&state.db, id)
        .await?
        .ok_or_else(|| not_found("Person", id))?;
    Ok(Json(serde_json::to_value(person).unwrap_or_default()))
}

/// PUT /persons/{id}
pub async fn update_person(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdatePersonRequest>,
) -> Result<Json<VersionResponse>, ApiError> {
    let (changes, expected) = body.into_changes();
    let version = PersonCommands::update(state.store.as_ref(), id, changes, expected).await?;
    Ok(Json(VersionResponse { version }))
}

/// DELETE /persons/{id}
pub async fn delete_person(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<VersionQuery>,
) -> Result<StatusCode, ApiError> {
    PersonCommands::delete(state.store.as_ref(), id, query.version).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── Names ───────────────────────────────────────────────────────────

/// GET /persons/{id}/names
pub async fn list_names(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<PersonName>>, ApiError> {
    Ok(Json(PersonNameRepo::for_person(&state.db, id).await?))
}

/// POST /persons/{id}/names
pub async fn add_name(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<CreatePersonNameRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let name = PersonName {
        id: Uuid::nil(),
        person_id: id,
        name_type: body.name_type.unwrap_or(genea_core::enums::NameType::Birth),
        given: body.given,
        surname: body.surname,
        prefix: body.prefix,
        suffix: body.suffix,
        surname_prefix: body.surname_prefix,
        nickname: body.nickname,
        is_primary: body.is_primary,
    };
    let (name, version) =
        PersonCommands::add_name(state.store.as_ref(), name, body.expected_version).await?;
    let mut value = serde_json::to_value(name).unwrap_or_default();
    if let Some(obj) = value.as_object_mut() {
        obj.insert("version".into(), serde_json::json!(version));
    }
    Ok((StatusCode::CREATED, Json(value)))
}

/// PUT /persons/{id}/names/{name_id}
pub async fn update_name(
    State(state): State<AppState>,
    Path((id, name_id)): Path<(Uuid, Uuid)>,
    Json(body): Json<UpdatePersonNameRequest>,
) -> Result<Json<VersionResponse>, ApiError> {
    let (changes, expected) = body.into_changes();
    let version =
        PersonCommands::update_name(state.store.as_ref(), id, name_id, changes, expected).await?;
    Ok(Json(VersionResponse { version }))
}

/// DELETE /persons/{id}/names/{name_id}
pub async fn delete_name(
    State(state): State<AppState>,
    Path((id, name_id)): Path<(Uuid, Uuid)>,
    Query(query): Query<VersionQuery>,
) -> Result<StatusCode, ApiError> {
    PersonCommands::delete_name(state.store.as_ref(), id, name_id, query.version).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── Life events ─────────────────────────────────────────────────────

/// GET /persons/{id}/events
pub async fn list_events(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<LifeEvent>>, ApiError> {
    Ok(Json(LifeEventRepo::for_owner(&state.db, id).await?))
}

/// POST /persons/{id}/events
pub async fn add_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<CreateLifeEventRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let event = LifeEvent {
        id: Uuid::nil(),
        owner_kind: FactOwnerKind::Person,
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

/// PUT /persons/{id}/events/{event_id}
pub async fn update_event(
    State(state): State<AppState>,
    Path((id, event_id)): Path<(Uuid, Uuid)>,
    Json(body): Json<UpdateLifeEventRequest>,
) -> Result<Json<VersionResponse>, ApiError> {
    let (changes, expected) = body.into_changes();
    let version = FactCommands::update_life_event(
        state.store.as_ref(),
        FactOwnerKind::Person,
        id,
        event_id,
        changes,
        expected,
    )
    .await?;
    Ok(Json(VersionResponse { version }))
}

/// DELETE /persons/{id}/events/{event_id}
pub async fn delete_event(
    State(state): State<AppState>,
    Path((id, event_id)): Path<(Uuid, Uuid)>,
    Query(query): Query<VersionQuery>,
) -> Result<StatusCode, ApiError> {
    FactCommands::delete_life_event(
        state.store.as_ref(),
        FactOwnerKind::Person,
        id,
        event_id,
        query.version,
    )
    .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── Attributes & associations ───────────────────────────────────────

/// GET /persons/{id}/attributes
pub async fn list_attributes(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let attributes = AttributeRepo::for_person(&state.db, id).await?;
    Ok(Json(serde_json::to_value(attributes).unwrap_or_default()))
}

/// POST /persons/{id}/attributes
pub async fn add_attribute(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<CreateAttributeRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let attribute = genea_core::types::Attribute {
        id: Uuid::nil(),
        person_id: id,
        attribute_type: body.attribute_type,
        value: body.value,
        date: body.date.as_deref().map(parse_date),
        place: body.place,
    };
    let (attribute, version) =
        FactCommands::add_attribute(state.store.as_ref(), attribute, body.expected_version)
            .await?;
    let mut value = serde_json::to_value(attribute).unwrap_or_default();
    if let Some(obj) = value.as_object_mut() {
        obj.insert("version".into(), serde_json::json!(version));
    }
    Ok((StatusCode::CREATED, Json(value)))
}

/// DELETE /persons/{id}/attributes/{attribute_id}
pub async fn delete_attribute(
    State(state): State<AppState>,
    Path((id, attribute_id)): Path<(Uuid, Uuid)>,
    Query(query): Query<VersionQuery>,
) -> Result<StatusCode, ApiError> {
    FactCommands::delete_attribute(state.store.as_ref(), id, attribute_id, query.version).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /persons/{id}/associations
pub async fn list_associations(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let associations = AssociationRepo::for_person(&state.db, id).await?;
    Ok(Json(serde_json::to_value(associations).unwrap_or_default()))
}

/// POST /persons/{id}/associations
pub async fn add_association(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<CreateAssociationRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let association = genea_core::types::Association {
        id: Uuid::nil(),
        person_id: id,
        associate_id: body.associate_id,
        role: body.role,
        phrase: body.phrase,
        notes: body.notes,
    };
    let (association, version) =
        FactCommands::add_association(state.store.as_ref(), association, body.expected_version)
            .await?;
    let mut value = serde_json::to_value(association).unwrap_or_default();
    if let Some(obj) = value.as_object_mut() {
        obj.insert("version".into(), serde_json::json!(version));
    }
    Ok((StatusCode::CREATED, Json(value)))
}

/// DELETE /persons/{id}/associations/{association_id}
pub async fn delete_association(
    State(state): State<AppState>,
    Path((id, association_id)): Path<(Uuid, Uuid)>,
    Query(query): Query<VersionQuery>,
) -> Result<StatusCode, ApiError> {
    FactCommands::delete_association(state.store.as_ref(), id, association_id, query.version)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── Media / citations lookups ───────────────────────────────────────

/// GET /persons/{id}/media
pub async fn list_media(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let media = MediaRepo::for_owner(&state.db, id).await?;
    Ok(Json(serde_json::to_value(media).unwrap_or_default()))
}

/// GET /persons/{id}/citations
pub async fn list_citations(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let citations = CitationRepo::for_owner(&state.db, id).await?;
    Ok(Json(serde_json::to_value(citations).unwrap_or_default()))
}

// ── Brick wall, restore points, rollback ────────────────────────────

/// POST /persons/{id}/brick-wall
pub async fn brick_wall_start(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<BrickWallRequest>,
) -> Result<Json<VersionResponse>, ApiError> {
    let version = PersonCommands::brick_wall_start(
        state.store.as_ref(),
        id,
        body.note,
        body.expected_version,
    )
    .await?;
    Ok(Json(VersionResponse { version }))
}

/// DELETE /persons/{id}/brick-wall — resolve the active wall.
pub async fn brick_wall_resolve(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<VersionQuery>,
) -> Result<Json<VersionResponse>, ApiError> {
    let version =
        PersonCommands::brick_wall_resolve(state.store.as_ref(), id, query.version).await?;
    Ok(Json(VersionResponse { version }))
}

/// GET /persons/{id}/restore-points
pub async fn restore_points(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let points = RestoreQuery::restore_points(state.store.as_ref(), id).await?;
    Ok(Json(serde_json::to_value(points).unwrap_or_default()))
}

/// POST /persons/{id}/rollback
pub async fn rollback(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<RollbackRequest>,
) -> Result<Json<VersionResponse>, ApiError> {
    let version =
        RollbackCommands::rollback(state.store.as_ref(), id, body.target_version).await?;
    Ok(Json(VersionResponse { version }))
}
