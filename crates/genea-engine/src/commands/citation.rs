//! Citation commands. Citations are their own aggregates, attached to a
//! fact on a person or family.

use chrono::Utc;
use uuid::Uuid;

use genea_core::GeneaError;
use genea_core::event::{Changes, Deleted, DomainEvent, StreamType, Updated};
use genea_core::types::Citation;
use genea_db::store::EventStore;

use crate::fold::{self, AggregateState};

use super::{append_one, read_existing_stream};

pub struct CitationCommands;

impl CitationCommands {
    pub async fn create(
        store: &dyn EventStore,
        mut citation: Citation,
    ) -> Result<Citation, GeneaError> {
        let now = Utc::now();
        if citation.id.is_nil() {
            citation.id = Uuid::now_v7();
        }
        citation.version = 1;
        citation.created_at = now;
        citation.updated_at = now;
        citation.validate()?;
        append_one(
            store,
            citation.id,
            StreamType::Citation,
            DomainEvent::CitationCreated(citation.clone()),
            0,
            now,
        )
        .await?;
        Ok(citation)
    }

    pub async fn update(
        store: &dyn EventStore,
        id: Uuid,
        changes: Changes,
        expected_version: Option<i64>,
    ) -> Result<i64, GeneaError> {
        let events = read_existing_stream(store, id, "Citation").await?;
        let Some(AggregateState::Citation(mut preview)) = fold::fold(&events, None)? else {
            return Err(GeneaError::NotFound {
                entity: "Citation",
                id,
            });
        };
        let expected = expected_version.unwrap_or(preview.version);
        genea_core::apply::apply_citation(&mut preview, &changes)?;
        preview.validate()?;
        append_one(
            store,
            id,
            StreamType::Citation,
            DomainEvent::CitationUpdated(Updated { id, changes }),
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
        let events = read_existing_stream(store, id, "Citation").await?;
        let Some(state) = fold::fold(&events, None)? else {
            return Err(GeneaError::NotFound {
                entity: "Citation",
                id,
            });
        };
        let expected = expected_version.unwrap_or(state.version());
        append_one(
            store,
            id,
            StreamType::Citation,
            DomainEvent::CitationDeleted(Deleted { id }),
            expected,
            Utc::now(),
        )
        .await
    }
}
