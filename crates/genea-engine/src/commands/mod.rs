//! Command handlers: validate → load version → emit events → append.
//!
//! Every handler returns the new stream version (or the created entity).
//! `expected_version` is optional everywhere: passing `None` loads the
//! current version first, so a concurrent writer still surfaces as
//! [`GeneaError::VersionConflict`] at append time; clients may retry once
//! after a brief delay.

pub mod citation;
pub mod facts;
pub mod family;
pub mod import;
pub mod media;
pub mod note;
pub mod person;
pub mod rollback;
pub mod snapshot;
pub mod source;

pub use citation::CitationCommands;
pub use facts::FactCommands;
pub use family::{CreateFamily, FamilyCommands};
pub use import::{ImportCommands, ImportSummary};
pub use media::MediaCommands;
pub use note::{NoteCommands, SubmitterCommands};
pub use person::{CreatePerson, PersonCommands};
pub use rollback::RollbackCommands;
pub use snapshot::SnapshotCommands;
pub use source::{RepositoryCommands, SourceCommands};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use genea_core::GeneaError;
use genea_core::event::{DomainEvent, EventEnvelope, RecordedEvent, StreamType};
use genea_db::store::EventStore;

/// Append one event to one stream.
pub(crate) async fn append_one(
    store: &dyn EventStore,
    stream_id: Uuid,
    stream_type: StreamType,
    event: DomainEvent,
    expected_version: i64,
    occurred_at: DateTime<Utc>,
) -> Result<i64, GeneaError> {
    store
        .append(
            stream_id,
            stream_type,
            vec![EventEnvelope::new(occurred_at, event)],
            expected_version,
        )
        .await
}

/// Read a stream, failing with `NotFound` when it never existed.
pub(crate) async fn read_existing_stream(
    store: &dyn EventStore,
    stream_id: Uuid,
    entity: &'static str,
) -> Result<Vec<RecordedEvent>, GeneaError> {
    let events = store.read_stream(stream_id).await?;
    if events.is_empty() {
        return Err(GeneaError::NotFound {
            entity,
            id: stream_id,
        });
    }
    Ok(events)
}
