//! Axum router for the REST surface.

use axum::Router;
use axum::routing::{get, post};

use crate::rest::browse;
use crate::rest::citation;
use crate::rest::export;
use crate::rest::family;
use crate::rest::gedcom;
use crate::rest::history;
use crate::rest::media;
use crate::rest::note;
use crate::rest::person;
use crate::rest::query;
use crate::rest::source;
use crate::rest::state::AppState;

/// Build the complete API router.
pub fn build_router(state: AppState) -> Router {
    let person_routes = Router::new()
        .route("/", get(person::list_persons).post(person::create_person))
        .route(
            "/{id}",
            get(person::get_person)
                .put(person::update_person)
                .delete(person::delete_person),
        )
        .route("/{id}/names", get(person::list_names).post(person::add_name))
        .route(
            "/{id}/names/{name_id}",
            axum::routing::put(person::update_name).delete(person::delete_name),
        )
        .route("/{id}/events", get(person::list_events).post(person::add_event))
        .route(
            "/{id}/events/{event_id}",
            axum::routing::put(person::update_event).delete(person::delete_event),
        )
        .route(
            "/{id}/attributes",
            get(person::list_attributes).post(person::add_attribute),
        )
        .route(
            "/{id}/attributes/{attribute_id}",
            axum::routing::delete(person::delete_attribute),
        )
        .route(
            "/{id}/associations",
            get(person::list_associations).post(person::add_association),
        )
        .route(
            "/{id}/associations/{association_id}",
            axum::routing::delete(person::delete_association),
        )
        .route("/{id}/media", get(person::list_media))
        .route("/{id}/citations", get(person::list_citations))
        .route("/{id}/history", get(history::aggregate_history))
        .route("/{id}/restore-points", get(person::restore_points))
        .route(
            "/{id}/brick-wall",
            post(person::brick_wall_start).delete(person::brick_wall_resolve),
        )
        .route("/{id}/rollback", post(person::rollback))
        .route("/{id}/quality", get(query::quality));

    let family_routes = Router::new()
        .route("/", get(family::list_families).post(family::create_family))
        .route(
            "/{id}",
            get(family::get_family)
                .put(family::update_family)
                .delete(family::delete_family),
        )
        .route(
            "/{id}/children",
            get(family::list_children)
                .post(family::add_child)
                .delete(family::remove_child),
        )
        .route("/{id}/events", get(family::list_events).post(family::add_event))
        .route(
            "/{id}/events/{event_id}",
            axum::routing::put(family::update_event),
        )
        .route("/{id}/group-sheet", get(family::group_sheet))
        .route("/{id}/history", get(history::aggregate_history));

    let source_routes = Router::new()
        .route("/", get(source::list_sources).post(source::create_source))
        .route(
            "/{id}",
            get(source::get_source)
                .put(source::update_source)
                .delete(source::delete_source),
        )
        .route("/{id}/citations", get(source::source_citations))
        .route("/{id}/history", get(history::aggregate_history));

    let repository_routes = Router::new()
        .route(
            "/",
            get(source::list_repositories).post(source::create_repository),
        )
        .route(
            "/{id}",
            get(source::get_repository)
                .put(source::update_repository)
                .delete(source::delete_repository),
        );

    let citation_routes = Router::new()
        .route("/", post(citation::create_citation))
        .route(
            "/{id}",
            get(citation::get_citation)
                .put(citation::update_citation)
                .delete(citation::delete_citation),
        )
        .route(
            "/for-fact/{fact_type}/{owner_id}",
            get(citation::citations_for_fact),
        );

    let media_routes = Router::new()
        .route("/", get(media::list_media).post(media::create_media))
        .route(
            "/{id}",
            get(media::get_media)
                .put(media::update_media)
                .delete(media::delete_media),
        )
        .route("/{id}/data", get(media::get_media_data))
        .route("/{id}/thumbnail", get(media::get_media_thumbnail));

    let note_routes = Router::new()
        .route("/", get(note::list_notes).post(note::create_note))
        .route(
            "/{id}",
            get(note::get_note)
                .put(note::update_note)
                .delete(note::delete_note),
        );

    let submitter_routes = Router::new()
        .route("/", get(note::list_submitters).post(note::create_submitter))
        .route(
            "/{id}",
            get(note::get_submitter)
                .put(note::update_submitter)
                .delete(note::delete_submitter),
        );

    let lds_routes = Router::new()
        .route("/", post(citation::create_ordinance))
        .route("/{owner_id}", get(citation::list_ordinances))
        .route(
            "/{owner_kind}/{owner_id}/{ordinance_id}",
            axum::routing::delete(citation::delete_ordinance),
        );

    let snapshot_routes = Router::new()
        .route(
            "/",
            get(history::list_snapshots).post(history::create_snapshot),
        )
        .route("/compare", get(history::compare_snapshots));

    let browse_routes = Router::new()
        .route("/surnames", get(browse::surnames))
        .route("/places", get(browse::places))
        .route("/cemeteries", get(browse::cemeteries))
        .route("/brick-walls", get(browse::brick_walls));

    Router::new()
        .nest("/persons", person_routes)
        .nest("/families", family_routes)
        .nest("/sources", source_routes)
        .nest("/repositories", repository_routes)
        .nest("/citations", citation_routes)
        .nest("/media", media_routes)
        .nest("/notes", note_routes)
        .nest("/submitters", submitter_routes)
        .nest("/lds-ordinances", lds_routes)
        .nest("/snapshots", snapshot_routes)
        .nest("/browse", browse_routes)
        .route("/pedigree/{id}", get(query::pedigree))
        .route("/descendancy/{id}", get(query::descendancy))
        .route("/ahnentafel/{id}", get(query::ahnentafel))
        .route("/relationship/{a}/{b}", get(query::relationship))
        .route("/search", get(query::search))
        .route("/history", get(history::global_history))
        .route("/analytics/discovery", get(browse::discovery))
        .route("/map/locations", get(browse::map_locations))
        .route("/gedcom/import", post(gedcom::import))
        .route("/gedcom/export", get(gedcom::export))
        .route("/export/estimate", get(export::estimate))
        .route("/export/{entity}", get(export::export_entity))
        .with_state(state)
}
