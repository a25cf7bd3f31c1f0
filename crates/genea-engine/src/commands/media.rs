//! Media commands. The upload byte stream arrives already decoded (the
//! multipart layer is outside the engine); the domain cap of 10 MiB is
//! enforced by validation.

use chrono::Utc;
use uuid::Uuid;

use genea_core::GeneaError;
use genea_core::event::{Changes, Deleted, DomainEvent, StreamType, Updated};
use genea_core::types::Media;
use genea_db::store::EventStore;

use crate::fold::{self, AggregateState};

use super::{append_one, read_existing_stream};

pub struct MediaCommands;

impl MediaCommands {
    pub async fn create(store: &dyn EventStore, mut media: Media) -> Result<Media, GeneaError> {
        let now = Utc::now();
        if media.id.is_nil() {
            media.id = Uuid::now_v7();
        }
        media.version = 1;
        media.created_at = now;
        media.updated_at = now;
        media.validate()?;
        append_one(
            store,
            media.id,
            StreamType::Media,
            DomainEvent::MediaCreated(media.clone()),
            0,
            now,
        )
        .await?;
        Ok(media)
    }

    pub async fn update(
        store: &dyn EventStore,
        id: Uuid,
        changes: Changes,
        expected_version: Option<i64>,
    ) -> Result<i64, GeneaError> {
        let events = read_existing_stream(store, id, "Media").await?;
        let Some(AggregateState::Media(mut preview)) = fold::fold(&events, None)? else {
            return Err(GeneaError::NotFound { entity: "Media", id });
        };
        let expected = expected_version.unwrap_or(preview.version);
        genea_core::apply::apply_media(&mut preview, &changes)?;
        preview.validate()?;
        append_one(
            store,
            id,
            StreamType::Media,
            DomainEvent::MediaUpdated(Updated { id, changes }),
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
        let events = read_existing_stream(store, id, "Media").await?;
        let Some(state) = fold::fold(&events, None)? else {
            return Err(GeneaError::NotFound { entity: "Media", id });
        };
        let expected = expected_version.unwrap_or(state.version());
        append_one(
            store,
            id,
            StreamType::Media,
            DomainEvent::MediaDeleted(Deleted { id }),
            expected,
            Utc::now(),
        )
        .await
    }
}
