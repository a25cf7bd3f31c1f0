//! The append-only event store.
//!
//! Two implementations share one behavioral contract: [`SqlEventStore`]
//! (PostgreSQL or SQLite through SeaORM; append runs the projector inside
//! the same transaction) and [`MemoryEventStore`] (mutex-guarded, used by
//! the contract tests).

mod memory;
mod sql;

pub use memory::MemoryEventStore;
pub use sql::SqlEventStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use genea_core::GeneaError;
use genea_core::event::{EventEnvelope, RecordedEvent, StreamType};

/// One stream's worth of events to append, with its concurrency check.
#[derive(Debug, Clone)]
pub struct AppendBatch {
    pub stream_id: Uuid,
    pub stream_type: StreamType,
    pub expected_version: i64,
    pub events: Vec<EventEnvelope>,
}

/// Append-only event log with optimistic concurrency and a global total
/// order.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Append `events` to one stream. Fails with
    /// [`GeneaError::VersionConflict`] when the stream's current version is
    /// not `expected_version`. Returns the new stream version
    /// (`expected_version + events.len()`).
    async fn append(
        &self,
        stream_id: Uuid,
        stream_type: StreamType,
        events: Vec<EventEnvelope>,
        expected_version: i64,
    ) -> Result<i64, GeneaError>;

    /// Append to several streams atomically: either every batch commits or
    /// none does. Used by composite commands whose target streams are all
    /// new (GEDCOM import).
    async fn append_many(&self, batches: Vec<AppendBatch>) -> Result<(), GeneaError>;

    /// All events of one aggregate, in version order.
    async fn read_stream(&self, stream_id: Uuid) -> Result<Vec<RecordedEvent>, GeneaError>;

    /// Current version of a stream; 0 if the stream never existed.
    async fn stream_version(&self, stream_id: Uuid) -> Result<i64, GeneaError>;

    /// Ascending global-order slice starting after `from_position`.
    async fn read_all(
        &self,
        from_position: i64,
        limit: u64,
    ) -> Result<Vec<RecordedEvent>, GeneaError>;

    /// Paginated history of one stream, newest first.
    async fn read_by_stream(
        &self,
        stream_id: Uuid,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<RecordedEvent>, GeneaError>;

    /// Time- and type-filtered global slice, newest first. An empty `types`
    /// slice means all event types.
    async fn read_global_by_time(
        &self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
        types: &[String],
        limit: u64,
        offset: u64,
    ) -> Result<Vec<RecordedEvent>, GeneaError>;

    /// Highest assigned global position; 0 when the log is empty.
    async fn last_position(&self) -> Result<i64, GeneaError>;
}
