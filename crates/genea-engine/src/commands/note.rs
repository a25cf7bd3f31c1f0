//! Note and submitter commands.

use chrono::Utc;
use uuid::Uuid;

use genea_core::GeneaError;
use genea_core::event::{Changes, Deleted, DomainEvent, StreamType, Updated};
use genea_core::types::{Note, Submitter};
use genea_db::store::EventStore;

use crate::fold::{self, AggregateState};

use super::{append_one, read_existing_stream};

pub struct NoteCommands;

impl NoteCommands {
    pub async fn create(store: &dyn EventStore, mut note: Note) -> Result<Note, GeneaError> {
        let now = Utc::now();
        if note.id.is_nil() {
            note.id = Uuid::now_v7();
        }
        note.version = 1;
        note.created_at = now;
        note.updated_at = now;
        note.validate()?;
        append_one(
            store,
            note.id,
            StreamType::Note,
            DomainEvent::NoteCreated(note.clone()),
            0,
            now,
        )
        .await?;
        Ok(note)
    }

    pub async fn update(
        store: &dyn EventStore,
        id: Uuid,
        changes: Changes,
        expected_version: Option<i64>,
    ) -> Result<i64, GeneaError> {
        let events = read_existing_stream(store, id, "Note").await?;
        let Some(AggregateState::Note(mut preview)) = fold::fold(&events, None)? else {
            return Err(GeneaError::NotFound { entity: "Note", id });
        };
        let expected = expected_version.unwrap_or(preview.version);
        genea_core::apply::apply_note(&mut preview, &changes)?;
        preview.validate()?;
        append_one(
            store,
            id,
            StreamType::Note,
            DomainEvent::NoteUpdated(Updated { id, changes }),
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
        let events = read_existing_stream(store, id, "Note").await?;
        let Some(state) = fold::fold(&events, None)? else {
            return Err(GeneaError::NotFound { entity: "Note", id });
        };
        let expected = expected_version.unwrap_or(state.version());
        append_one(
            store,
            id,
            StreamType::Note,
            DomainEvent::NoteDeleted(Deleted { id }),
            expected,
            Utc::now(),
        )
        .await
    }
}

pub struct SubmitterCommands;

impl SubmitterCommands {
    pub async fn create(
        store: &dyn EventStore,
        mut submitter: Submitter,
    ) -> Result<Submitter, GeneaError> {
        let now = Utc::now();
        if submitter.id.is_nil() {
            submitter.id = Uuid::now_v7();
        }
        submitter.version = 1;
        submitter.created_at = now;
        submitter.updated_at = now;
        submitter.validate()?;
        append_one(
            store,
            submitter.id,
            StreamType::Submitter,
            DomainEvent::SubmitterCreated(submitter.clone()),
            0,
            now,
        )
        .await?;
        Ok(submitter)
    }

    pub async fn update(
        store: &dyn EventStore,
        id: Uuid,
        changes: Changes,
        expected_version: Option<i64>,
    ) -> Result<i64, GeneaError> {
        let events = read_existing_stream(store, id, "Submitter").await?;
        let Some(AggregateState::Submitter(mut preview)) = fold::fold(&events, None)? else {
            return Err(GeneaError::NotFound {
                entity: "Submitter",
                id,
            });
        };
        let expected = expected_version.unwrap_or(preview.version);
        genea_core::apply::apply_submitter(&mut preview, &changes)?;
        preview.validate()?;
        append_one(
            store,
            id,
            StreamType::Submitter,
            DomainEvent::SubmitterUpdated(Updated { id, changes }),
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
        let events = read_existing_stream(store, id, "Submitter").await?;
        let Some(state) = fold::fold(&events, None)? else {
            return Err(GeneaError::NotFound {
                entity: "Submitter",
                id,
            });
        };
        let expected = expected_version.unwrap_or(state.version());
        append_one(
            store,
            id,
            StreamType::Submitter,
            DomainEvent::SubmitterDeleted(Deleted { id }),
            expected,
            Utc::now(),
        )
        .await
    }
}
