//! REST handlers for citations and LDS ordinances.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use genea_core::types::LdsOrdinance;
use genea_core::types::citation::Apid;
use genea_db::repo::{CitationRepo, LdsOrdinanceRepo};
use genea_engine::commands::{CitationCommands, FactCommands};

use super::dto::{
    CreateCitationRequest, CreateOrdinanceRequest, UpdateCitationRequest, VersionQuery,
    VersionResponse, parse_date,
};
use super::error::{ApiError, not_found};
use super::state::AppState;

/// POST /citations
pub async fn create_citation(
    State(state): State<AppState>,
    Json(body): Json<CreateCitationRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let citation = genea_core::types::Citation {
        id: Uuid::nil(),
        source_id: body.source_id,
        fact_type: body.fact_type,
        owner_kind: body.owner_kind,
        owner_id: body.owner_id,
        page: body.page,
        volume: body.volume,
        source_quality: body.source_quality,
        informant_type: body.informant_type,
        evidence_type: body.evidence_type,
        text: body.text,
        analysis: body.analysis,
        apid: body.apid.as_deref().map(Apid::parse),
        version: 0,
        created_at: chrono::Utc::now(),
        updated_at: chrono::Utc::now(),
    };
    let citation = CitationCommands::create(state.store.as_ref(), citation).await?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::to_value(citation).unwrap_or_default()),
    ))
}

/// GET /citations/{id}
pub async fn get_citation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let citation = CitationRepo::get(&state.db, id)
        .await?
        .ok_or_else(|| not_found("Citation", id))?;
    Ok(Json(serde_json::to_value(citation).unwrap_or_default()))
}

/// PUT /citations/{id}
pub async fn update_citation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateCitationRequest>,
) -> Result<Json<VersionResponse>, ApiError> {
    let (changes, expected) = body.into_changes();
    let version = CitationCommands::update(state.store.as_ref(), id, changes, expected).await?;
    Ok(Json(VersionResponse { version }))
}

/// DELETE /citations/{id}
pub async fn delete_citation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<VersionQuery>,
) -> Result<StatusCode, ApiError> {
    CitationCommands::delete(state.store.as_ref(), id, query.version).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /citations/for-fact/{fact_type}/{owner_id}
pub async fn citations_for_fact(
    State(state): State<AppState>,
    Path((fact_type, owner_id)): Path<(String, Uuid)>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let fact: genea_core::enums::FactType =
        serde_json::from_value(serde_json::Value::String(fact_type.clone())).map_err(|_| {
            ApiError(genea_core::GeneaError::validation(
                "fact_type",
                format!("unknown fact type {fact_type}"),
            ))
        })?;
    let citations = CitationRepo::for_fact(&state.db, fact, owner_id).await?;
    Ok(Json(serde_json::to_value(citations).unwrap_or_default()))
}

// ── LDS ordinances ──────────────────────────────────────────────────

/// GET /lds-ordinances/{owner_id}
pub async fn list_ordinances(
    State(state): State<AppState>,
    Path(owner_id): Path<Uuid>,
) -> Result<Json<Vec<LdsOrdinance>>, ApiError> {
    Ok(Json(LdsOrdinanceRepo::for_owner(&state.db, owner_id).await?))
}

/// POST /lds-ordinances
pub async fn create_ordinance(
    State(state): State<AppState>,
    Json(body): Json<CreateOrdinanceRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let ordinance = LdsOrdinance {
        id: Uuid::nil(),
        ordinance_type: body.ordinance_type,
        owner_kind: body.owner_kind,
        owner_id: body.owner_id,
        date: body.date.as_deref().map(parse_date),
        temple: body.temple,
        status: body.status,
        place: body.place,
    };
    let (ordinance, version) =
        FactCommands::add_ordinance(state.store.as_ref(), ordinance, body.expected_version)
            .await?;
    let mut value = serde_json::to_value(ordinance).unwrap_or_default();
    if let Some(obj) = value.as_object_mut() {
        obj.insert("version".into(), serde_json::json!(version));
    }
    Ok((StatusCode::CREATED, Json(value)))
}

/// DELETE /lds-ordinances/{owner_kind}/{owner_id}/{ordinance_id}
pub async fn delete_ordinance(
    State(state): State<AppState>,
    Path((owner_kind, owner_id, ordinance_id)): Path<(String, Uuid, Uuid)>,
    Query(query): Query<VersionQuery>,
) -> Result<StatusCode, ApiError> {
    let kind: genea_core::enums::FactOwnerKind =
        serde_json::from_value(serde_json::Value::String(owner_kind.clone())).map_err(|_| {
            ApiError(genea_core::GeneaError::validation(
                "owner_kind",
                format!("unknown owner kind {owner_kind}"),
            ))
        })?;
    FactCommands::delete_ordinance(
        state.store.as_ref(),
        kind,
        owner_id,
        ordinance_id,
        query.version,
    )
    .await?;
    Ok(StatusCode::NO_CONTENT)
}
