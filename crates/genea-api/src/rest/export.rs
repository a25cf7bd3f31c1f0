//! Flat JSON/CSV exports of the read model, plus the export estimate.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use genea_core::GeneaError;
use genea_db::repo::{
    CitationRepo, FamilyRepo, LifeEventRepo, MediaRepo, NoteRepo, PersonRepo, RepositoryRepo,
    SourceRepo, SubmitterRepo,
};

use super::dto::FormatQuery;
use super::error::ApiError;
use super::state::AppState;

/// Row counts per entity, for sizing an export up front.
#[derive(Debug, Serialize)]
pub struct ExportEstimate {
    pub persons: u64,
    pub families: u64,
    pub sources: u64,
    pub repositories: u64,
    pub citations: u64,
    pub life_events: u64,
    pub media: u64,
    pub notes: u64,
    pub submitters: u64,
}

/// GET /export/estimate
pub async fn estimate(State(state): State<AppState>) -> Result<Json<ExportEstimate>, ApiError> {
    Ok(Json(ExportEstimate {
        persons: PersonRepo::count(&state.db).await?,
        families: FamilyRepo::count(&state.db).await?,
        sources: SourceRepo::count(&state.db).await?,
        repositories: RepositoryRepo::count(&state.db).await?,
        citations: CitationRepo::count(&state.db).await?,
        life_events: LifeEventRepo::count(&state.db).await?,
        media: MediaRepo::count(&state.db).await?,
        notes: NoteRepo::count(&state.db).await?,
        submitters: SubmitterRepo::count(&state.db).await?,
    }))
}

/// GET /export/{entity}?format={json|csv}
pub async fn export_entity(
    State(state): State<AppState>,
    Path(entity): Path<String>,
    Query(query): Query<FormatQuery>,
) -> Result<Response, ApiError> {
    let csv = matches!(query.format.as_deref(), Some("csv"));
    match entity.as_str() {
        "persons" => {
            let persons = PersonRepo::list_all(&state.db).await?;
            if csv {
                let mut out = String::from(
                    "id,given,surname,gender,birth_date,birth_place,death_date,death_place,lifespan\n",
                );
                for p in &persons {
                    out.push_str(&csv_row(&[
                        &p.id.to_string(),
                        p.given.as_deref().unwrap_or(""),
                        p.surname.as_deref().unwrap_or(""),
                        &p.gender.to_string(),
                        &p.birth_date.as_ref().map(|d| d.to_gedcom()).unwrap_or_default(),
                        p.birth_place.as_ref().map(|pl| pl.name.as_str()).unwrap_or(""),
                        &p.death_date.as_ref().map(|d| d.to_gedcom()).unwrap_or_default(),
                        p.death_place.as_ref().map(|pl| pl.name.as_str()).unwrap_or(""),
                        &p.lifespan(),
                    ]));
                }
                Ok(csv_response("persons.csv", out))
            } else {
                Ok(Json(serde_json::to_value(persons).unwrap_or_default()).into_response())
            }
        }
        "families" => {
            let families = FamilyRepo::list_all(&state.db).await?;
            if csv {
                let mut out = String::from(
                    "id,partner1_id,partner2_id,relationship_type,marriage_date,marriage_place\n",
                );
                for f in &families {
                    out.push_str(&csv_row(&[
                        &f.id.to_string(),
                        &f.partner1_id.map(|u| u.to_string()).unwrap_or_default(),
                        &f.partner2_id.map(|u| u.to_string()).unwrap_or_default(),
                        &f.relationship_type.to_string(),
                        &f.marriage_date.as_ref().map(|d| d.to_gedcom()).unwrap_or_default(),
                        f.marriage_place.as_ref().map(|p| p.name.as_str()).unwrap_or(""),
                    ]));
                }
                Ok(csv_response("families.csv", out))
            } else {
                Ok(Json(serde_json::to_value(families).unwrap_or_default()).into_response())
            }
        }
        "sources" => {
            let sources = SourceRepo::list_all(&state.db).await?;
            if csv {
                let mut out =
                    String::from("id,source_type,title,author,publisher,call_number,url\n");
                for s in &sources {
                    out.push_str(&csv_row(&[
                        &s.id.to_string(),
                        &s.source_type.to_string(),
                        &s.title,
                        s.author.as_deref().unwrap_or(""),
                        s.publisher.as_deref().unwrap_or(""),
                        s.call_number.as_deref().unwrap_or(""),
                        s.url.as_deref().unwrap_or(""),
                    ]));
                }
                Ok(csv_response("sources.csv", out))
            } else {
                Ok(Json(serde_json::to_value(sources).unwrap_or_default()).into_response())
            }
        }
        other => Err(ApiError(GeneaError::validation(
            "entity",
            format!("unknown export entity {other}"),
        ))),
    }
}

fn csv_response(filename: &str, body: String) -> Response {
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    )
        .into_response()
}

/// Quote one CSV row; fields with commas, quotes, or newlines are wrapped
/// and inner quotes doubled.
fn csv_row(fields: &[&str]) -> String {
    let mut out = String::new();
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        if field.contains([',', '"', '\n']) {
            out.push('"');
            out.push_str(&field.replace('"', "\"\""));
            out.push('"');
        } else {
            out.push_str(field);
        }
    }
    out.push('\n');
    out
}
