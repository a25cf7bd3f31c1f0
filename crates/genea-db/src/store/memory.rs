//! In-memory event store used by the behavioral contract tests.
//!
//! State is guarded by a single mutex; there is no projection hook, so this
//! implementation exercises only the log semantics.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use genea_core::GeneaError;
use genea_core::event::{EventEnvelope, RecordedEvent, StreamType};

use super::{AppendBatch, EventStore};

#[derive(Debug, Default)]
struct Inner {
    events: Vec<RecordedEvent>,
    next_position: i64,
}

impl Inner {
    fn current_version(&self, stream_id: Uuid) -> i64 {
        self.events
            .iter()
            .filter(|e| e.stream_id == stream_id)
            .map(|e| e.version)
            .max()
            .unwrap_or(0)
    }

    fn append_batch(&mut self, batch: AppendBatch) -> Result<i64, GeneaError> {
        let current = self.current_version(batch.stream_id);
        if current != batch.expected_version {
            return Err(GeneaError::VersionConflict {
                stream_id: batch.stream_id,
                expected: batch.expected_version,
                current,
            });
        }
        let mut version = batch.expected_version;
        for envelope in batch.events {
            version += 1;
            self.next_position += 1;
            self.events.push(RecordedEvent {
                position: self.next_position,
                stream_id: batch.stream_id,
                stream_type: batch.stream_type,
                version,
                occurred_at: envelope.occurred_at,
                event: envelope.event,
            });
        }
        Ok(version)
    }
}

/// Mutex-guarded in-memory event store.
#[derive(Debug, Default)]
pub struct MemoryEventStore {
    inner: Mutex<Inner>,
}

impl MemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Inner>, GeneaError> {
        self.inner
            .lock()
            .map_err(|_| GeneaError::Backend("event store mutex poisoned".into()))
    }
}

#[async_trait]
impl EventStore for MemoryEventStore {
    async fn append(
        &self,
        stream_id: Uuid,
        stream_type: StreamType,
        events: Vec<EventEnvelope>,
        expected_version: i64,
    ) -> Result<i64, GeneaError> {
        let mut inner = self.lock()?;
        if events.is_empty() {
            return Ok(inner.current_version(stream_id));
        }
        inner.append_batch(AppendBatch {
            stream_id,
            stream_type,
            expected_version,
            events,
        })
    }

    async fn append_many(&self, batches: Vec<AppendBatch>) -> Result<(), GeneaError> {
        let mut inner = self.lock()?;
        // All-or-nothing: validate every version check before writing.
        for batch in &batches {
            let current = inner.current_version(batch.stream_id);
            if current != batch.expected_version {
                return Err(GeneaError::VersionConflict {
                    stream_id: batch.stream_id,
                    expected: batch.expected_version,
                    current,
                });
            }
        }
        for batch in batches {
            inner.append_batch(batch)?;
        }
        Ok(())
    }

    async fn read_stream(&self, stream_id: Uuid) -> Result<Vec<RecordedEvent>, GeneaError> {
        let inner = self.lock()?;
        let mut events: Vec<RecordedEvent> = inner
            .events
            .iter()
            .filter(|e| e.stream_id == stream_id)
            .cloned()
            .collect();
        events.sort_by_key(|e| e.version);
        Ok(events)
    }

    async fn stream_version(&self, stream_id: Uuid) -> Result<i64, GeneaError> {
        Ok(self.lock()?.current_version(stream_id))
    }

    async fn read_all(
        &self,
        from_position: i64,
        limit: u64,
    ) -> Result<Vec<RecordedEvent>, GeneaError> {
        let inner = self.lock()?;
        let mut events: Vec<RecordedEvent> = inner
            .events
            .iter()
            .filter(|e| e.position > from_position)
            .cloned()
            .collect();
        events.sort_by_key(|e| e.position);
        events.truncate(limit as usize);
        Ok(events)
    }

    async fn read_by_stream(
        &self,
        stream_id: Uuid,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<RecordedEvent>, GeneaError> {
        let inner = self.lock()?;
        let mut events: Vec<RecordedEvent> = inner
            .events
            .iter()
            .filter(|e| e.stream_id == stream_id)
            .cloned()
            .collect();
        events.sort_by_key(|e| std::cmp::Reverse(e.version));
        Ok(events
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn read_global_by_time(
        &self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
        types: &[String],
        limit: u64,
        offset: u64,
    ) -> Result<Vec<RecordedEvent>, GeneaError> {
        let inner = self.lock()?;
        let mut events: Vec<RecordedEvent> = inner
            .events
            .iter()
            .filter(|e| from.is_none_or(|f| e.occurred_at >= f))
            .filter(|e| to.is_none_or(|t| e.occurred_at <= t))
            .filter(|e| types.is_empty() || types.iter().any(|t| t == e.event.tag()))
            .cloned()
            .collect();
        events.sort_by_key(|e| std::cmp::Reverse(e.position));
        Ok(events
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn last_position(&self) -> Result<i64, GeneaError> {
        Ok(self.lock()?.next_position)
    }
}
