//! Change history over the event log.
//!
//! Per-aggregate history folds the stream and correlates each Updated event
//! with the state before it, turning the sparse change-set into per-field
//! old/new pairs. The global feed is a thin view over the time/type-filtered
//! log.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use genea_core::GeneaError;
use genea_core::event::{DomainEvent, EventAction, StreamType};
use genea_db::store::EventStore;

use crate::fold;

/// One field's transition inside an update.
#[derive(Debug, Clone, Serialize)]
pub struct FieldDiff {
    pub field: String,
    pub old: Value,
    pub new: Value,
}

/// One event of an aggregate's history, enriched with field diffs.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub version: i64,
    pub position: i64,
    pub occurred_at: DateTime<Utc>,
    pub event_type: String,
    pub action: EventAction,
    pub diffs: Vec<FieldDiff>,
}

/// One row of the global activity feed.
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub position: i64,
    pub stream_id: Uuid,
    pub stream_type: StreamType,
    pub version: i64,
    pub occurred_at: DateTime<Utc>,
    pub event_type: String,
    pub action: EventAction,
}

pub struct HistoryQuery;

impl HistoryQuery {
    /// Per-field history of one aggregate, newest first.
    pub async fn for_aggregate(
        store: &dyn EventStore,
        stream_id: Uuid,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<HistoryEntry>, GeneaError> {
        let events = store.read_stream(stream_id).await?;
        if events.is_empty() {
            return Err(GeneaError::NotFound {
                entity: "Aggregate",
                id: stream_id,
            });
        }

        let mut entries = Vec::with_capacity(events.len());
        let mut previous: Option<Value> = None;
        for (i, rec) in events.iter().enumerate() {
            let state = fold::fold(&events[..=i], None)?;
            let current = state.map(|s| s.scalar_value()).transpose()?;

            let diffs = match (&rec.event, &previous, &current) {
                (
                    DomainEvent::PersonUpdated(u)
                    | DomainEvent::FamilyUpdated(u)
                    | DomainEvent::SourceUpdated(u)
                    | DomainEvent::RepositoryUpdated(u)
                    | DomainEvent::CitationUpdated(u)
                    | DomainEvent::MediaUpdated(u)
                    | DomainEvent::NoteUpdated(u)
                    | DomainEvent::SubmitterUpdated(u),
                    Some(before),
                    Some(after),
                ) => u
                    .changes
                    .keys()
                    .map(|field| FieldDiff {
                        field: field.clone(),
                        old: before.get(field).cloned().unwrap_or(Value::Null),
                        new: after.get(field).cloned().unwrap_or(Value::Null),
                    })
                    .collect(),
                _ => Vec::new(),
            };

            entries.push(HistoryEntry {
                version: rec.version,
                position: rec.position,
                occurred_at: rec.occurred_at,
                event_type: rec.event.tag().to_string(),
                action: rec.event.action(),
                diffs,
            });
            previous = current;
        }

        entries.reverse();
        Ok(entries
            .into_iter()
            .skip(offset as usize)
            .take(limit.clamp(1, 500) as usize)
            .collect())
    }

    /// Global activity feed, newest first.
    pub async fn global(
        store: &dyn EventStore,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
        types: &[String],
        limit: u64,
        offset: u64,
    ) -> Result<Vec<LogEntry>, GeneaError> {
        let events = store
            .read_global_by_time(from, to, types, limit.clamp(1, 500), offset)
            .await?;
        Ok(events
            .into_iter()
            .map(|rec| LogEntry {
                position: rec.position,
                stream_id: rec.stream_id,
                stream_type: rec.stream_type,
                version: rec.version,
                occurred_at: rec.occurred_at,
                event_type: rec.event.tag().to_string(),
                action: rec.event.action(),
            })
            .collect())
    }
}
