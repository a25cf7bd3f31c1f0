//! Person commands, including the person-name sub-resource and the
//! brick-wall state machine. Sub-resources share the Person stream and
//! version.

use chrono::Utc;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use genea_core::GeneaError;
use genea_core::enums::{Gender, ResearchStatus};
use genea_core::event::{Changes, Deleted, DomainEvent, OwnedDeleted, OwnedUpdated, StreamType, Updated};
use genea_core::gendate::GenDate;
use genea_core::types::{Person, PersonName, Place};
use genea_db::store::EventStore;

use crate::fold;

use super::{append_one, read_existing_stream};

/// Input for creating a person.
#[derive(Debug, Clone, Default)]
pub struct CreatePerson {
    pub xref: Option<String>,
    pub given: Option<String>,
    pub surname: Option<String>,
    pub gender: Option<Gender>,
    pub birth_date: Option<GenDate>,
    pub birth_place: Option<Place>,
    pub death_date: Option<GenDate>,
    pub death_place: Option<Place>,
    pub notes: Option<String>,
    pub research_status: Option<ResearchStatus>,
    pub fsftid: Option<String>,
}

pub struct PersonCommands;

impl PersonCommands {
    pub async fn create(
        store: &dyn EventStore,
        input: CreatePerson,
    ) -> Result<Person, GeneaError> {
        let now = Utc::now();
        let person = Person {
            id: Uuid::now_v7(),
            xref: input.xref,
            given: input.given,
            surname: input.surname,
            gender: input.gender.unwrap_or(Gender::Unknown),
            birth_date: input.birth_date,
            birth_place: input.birth_place,
            death_date: input.death_date,
            death_place: input.death_place,
            notes: input.notes,
            research_status: input.research_status.unwrap_or(ResearchStatus::Unknown),
            fsftid: input.fsftid,
            brick_wall_active: false,
            brick_wall_note: None,
            brick_wall_since: None,
            brick_wall_resolved_at: None,
            version: 1,
            created_at: now,
            updated_at: now,
        };
        person.validate()?;
        append_one(
            store,
            person.id,
            StreamType::Person,
            DomainEvent::PersonCreated(person.clone()),
            0,
            now,
        )
        .await?;
        info!(person_id = %person.id, "person created");
        Ok(person)
    }

    /// Apply a sparse change-set. The changes are validated against the
    /// folded current state before the event is emitted.
    pub async fn update(
        store: &dyn EventStore,
        id: Uuid,
        changes: Changes,
        expected_version: Option<i64>,
    ) -> Result<i64, GeneaError> {
        let events = read_existing_stream(store, id, "Person").await?;
        let state = fold::fold_person(&events, None)?.ok_or(GeneaError::NotFound {
            entity: "Person",
            id,
        })?;

        let mut preview = state.person.clone();
        genea_core::apply::apply_person(&mut preview, &changes)?;
        preview.validate()?;

        let expected = expected_version.unwrap_or(state.person.version);
        append_one(
            store,
            id,
            StreamType::Person,
            DomainEvent::PersonUpdated(Updated { id, changes }),
            expected,
            Utc::now(),
        )
        .await
    }

    pub async fn delete(
        store: &dyn EventStore,
        id: Uuid,
        expected_version: Option<i64>,
    ) -> Result<i64, GeneaError> {
        let events = read_existing_stream(store, id, "Person").await?;
        let state = fold::fold_person(&events, None)?.ok_or(GeneaError::NotFound {
            entity: "Person",
            id,
        })?;
        let expected = expected_version.unwrap_or(state.person.version);
        append_one(
            store,
            id,
            StreamType::Person,
            DomainEvent::PersonDeleted(Deleted { id }),
            expected,
            Utc::now(),
        )
        .await
    }

    // ── Names ───────────────────────────────────────────────────────

    pub async fn add_name(
        store: &dyn EventStore,
        mut name: PersonName,
        expected_version: Option<i64>,
    ) -> Result<(PersonName, i64), GeneaError> {
        if name.id.is_nil() {
            name.id = Uuid::now_v7();
        }
        name.validate()?;
        let events = read_existing_stream(store, name.person_id, "Person").await?;
        let state = fold::fold_person(&events, None)?.ok_or(GeneaError::NotFound {
            entity: "Person",
            id: name.person_id,
        })?;
        // The first name of a person is always primary.
        if state.names.is_empty() {
            name.is_primary = true;
        }
        let expected = expected_version.unwrap_or(state.person.version);
        let version = append_one(
            store,
            name.person_id,
            StreamType::Person,
            DomainEvent::PersonNameCreated(name.clone()),
            expected,
            Utc::now(),
        )
        .await?;
        Ok((name, version))
    }

    pub async fn update_name(
        store: &dyn EventStore,
        person_id: Uuid,
        name_id: Uuid,
        changes: Changes,
        expected_version: Option<i64>,
    ) -> Result<i64, GeneaError> {
        let events = read_existing_stream(store, person_id, "Person").await?;
        let state = fold::fold_person(&events, None)?.ok_or(GeneaError::NotFound {
            entity: "Person",
            id: person_id,
        })?;
        let current = state
            .names
            .iter()
            .find(|n| n.id == name_id)
            .ok_or(GeneaError::NotFound {
                entity: "PersonName",
                id: name_id,
            })?;
        let mut preview = current.clone();
        genea_core::apply::apply_person_name(&mut preview, &changes)?;
        preview.validate()?;
        // Refusing to demote the only primary keeps the invariant intact.
        if current.is_primary && !preview.is_primary {
            return Err(GeneaError::validation(
                "is_primary",
                "make another name primary instead of demoting the only one",
            ));
        }
        let expected = expected_version.unwrap_or(state.person.version);
        append_one(
            store,
            person_id,
            StreamType::Person,
            DomainEvent::PersonNameUpdated(OwnedUpdated {
                owner_id: person_id,
                id: name_id,
                changes,
            }),
            expected,
            Utc::now(),
        )
        .await
    }

    pub async fn delete_name(
        store: &dyn EventStore,
        person_id: Uuid,
        name_id: Uuid,
        expected_version: Option<i64>,
    ) -> Result<i64, GeneaError> {
        let events = read_existing_stream(store, person_id, "Person").await?;
        let state = fold::fold_person(&events, None)?.ok_or(GeneaError::NotFound {
            entity: "Person",
            id: person_id,
        })?;
        if !state.names.iter().any(|n| n.id == name_id) {
            return Err(GeneaError::NotFound {
                entity: "PersonName",
                id: name_id,
            });
        }
        let expected = expected_version.unwrap_or(state.person.version);
        append_one(
            store,
            person_id,
            StreamType::Person,
            DomainEvent::PersonNameDeleted(OwnedDeleted {
                owner_id: person_id,
                id: name_id,
            }),
            expected,
            Utc::now(),
        )
        .await
    }

    // ── Brick wall ──────────────────────────────────────────────────

    /// `inactive → active(note, since)`.
    pub async fn brick_wall_start(
        store: &dyn EventStore,
        id: Uuid,
        note: Option<String>,
        expected_version: Option<i64>,
    ) -> Result<i64, GeneaError> {
        let now = Utc::now();
        let mut changes = Changes::new();
        changes.insert("brick_wall_active".into(), json!(true));
        changes.insert("brick_wall_note".into(), json!(note));
        changes.insert("brick_wall_since".into(), json!(now));
        changes.insert("brick_wall_resolved_at".into(), serde_json::Value::Null);
        Self::update(store, id, changes, expected_version).await
    }

    /// `active → resolved(resolved_at)`.
    pub async fn brick_wall_resolve(
        store: &dyn EventStore,
        id: Uuid,
        expected_version: Option<i64>,
    ) -> Result<i64, GeneaError> {
        let events = read_existing_stream(store, id, "Person").await?;
        let state = fold::fold_person(&events, None)?.ok_or(GeneaError::NotFound {
            entity: "Person",
            id,
        })?;
        if !state.person.brick_wall_active {
            return Err(GeneaError::validation(
                "brick_wall_active",
                "no active brick wall to resolve",
            ));
        }
        let mut changes = Changes::new();
        changes.insert("brick_wall_active".into(), json!(false));
        changes.insert("brick_wall_resolved_at".into(), json!(Utc::now()));
        let expected = expected_version.unwrap_or(state.person.version);
        append_one(
            store,
            id,
            StreamType::Person,
            DomainEvent::PersonUpdated(Updated { id, changes }),
            expected,
            Utc::now(),
        )
        .await
    }
}
