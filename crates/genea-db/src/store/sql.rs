//! SeaORM-backed event store.
//!
//! Works unchanged against PostgreSQL (server deployments) and SQLite
//! (embedded deployments): SQLite stores the UUID columns as text and the
//! timestamps as RFC-3339 strings through the driver's type mapping, and
//! serializes writes through its single writer.
//!
//! `append` opens one transaction that performs the version check, inserts
//! the rows, and runs the projector; a failure anywhere rolls the whole
//! append back.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{
    ActiveValue::Set, ConnectionTrait, DatabaseConnection, DatabaseTransaction, Order,
    QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};
use tracing::debug;
use uuid::Uuid;

use genea_core::GeneaError;
use genea_core::event::{DomainEvent, EventEnvelope, RecordedEvent, StreamType};

use crate::entities::event_log::{self, Column, Entity};
use crate::projection;

use super::{AppendBatch, EventStore};

/// Event store over a relational backend.
#[derive(Debug, Clone)]
pub struct SqlEventStore {
    db: DatabaseConnection,
}

impl SqlEventStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// The underlying connection, for callers that combine store reads with
    /// read-model queries.
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    fn backend_err(e: DbErr) -> GeneaError {
        GeneaError::Backend(e.to_string())
    }

    async fn current_version<C: ConnectionTrait>(
        conn: &C,
        stream_id: Uuid,
    ) -> Result<i64, GeneaError> {
        let last = Entity::find()
            .filter(Column::StreamId.eq(stream_id))
            .order_by_desc(Column::Version)
            .limit(1)
            .one(conn)
            .await
            .map_err(Self::backend_err)?;
        Ok(last.map(|m| m.version).unwrap_or(0))
    }

    /// Append one batch inside an existing transaction and project each
    /// appended event through the same transaction.
    async fn append_batch(
        txn: &DatabaseTransaction,
        batch: AppendBatch,
    ) -> Result<i64, GeneaError> {
        let AppendBatch {
            stream_id,
            stream_type,
            expected_version,
            events,
        } = batch;

        let current = Self::current_version(txn, stream_id).await?;
        if current != expected_version {
            return Err(GeneaError::VersionConflict {
                stream_id,
                expected: expected_version,
                current,
            });
        }

        let mut version = expected_version;
        for envelope in events {
            version += 1;
            let payload = envelope.event.payload()?;
            let model = event_log::ActiveModel {
                stream_id: Set(stream_id),
                stream_type: Set(stream_type.as_str().to_string()),
                version: Set(version),
                event_type: Set(envelope.event.tag().to_string()),
                payload: Set(payload),
                occurred_at: Set(envelope.occurred_at),
                ..Default::default()
            };
            let position = Entity::insert(model)
                .exec(txn)
                .await
                .map_err(Self::backend_err)?
                .last_insert_id;

            let recorded = RecordedEvent {
                position,
                stream_id,
                stream_type,
                version,
                occurred_at: envelope.occurred_at,
                event: envelope.event,
            };
            projection::project(txn, &recorded).await?;
        }

        debug!(%stream_id, stream_type = %stream_type, version, "appended events");
        Ok(version)
    }
}

fn into_recorded(model: event_log::Model) -> Result<RecordedEvent, GeneaError> {
    let stream_type = StreamType::parse(&model.stream_type)?;
    let event = DomainEvent::decode(&model.event_type, model.payload)?;
    Ok(RecordedEvent {
        position: model.position,
        stream_id: model.stream_id,
        stream_type,
        version: model.version,
        occurred_at: model.occurred_at,
        event,
    })
}

#[async_trait]
impl EventStore for SqlEventStore {
    async fn append(
        &self,
        stream_id: Uuid,
        stream_type: StreamType,
        events: Vec<EventEnvelope>,
        expected_version: i64,
    ) -> Result<i64, GeneaError> {
        if events.is_empty() {
            return Self::current_version(&self.db, stream_id).await;
        }
        let txn = self.db.begin().await.map_err(Self::backend_err)?;
        let version = Self::append_batch(
            &txn,
            AppendBatch {
                stream_id,
                stream_type,
                expected_version,
                events,
            },
        )
        .await?;
        txn.commit().await.map_err(Self::backend_err)?;
        Ok(version)
    }

    async fn append_many(&self, batches: Vec<AppendBatch>) -> Result<(), GeneaError> {
        let txn = self.db.begin().await.map_err(Self::backend_err)?;
        for batch in batches {
            Self::append_batch(&txn, batch).await?;
        }
        txn.commit().await.map_err(Self::backend_err)?;
        Ok(())
    }

    async fn read_stream(&self, stream_id: Uuid) -> Result<Vec<RecordedEvent>, GeneaError> {
        let models = Entity::find()
            .filter(Column::StreamId.eq(stream_id))
            .order_by_asc(Column::Version)
            .all(&self.db)
            .await
            .map_err(Self::backend_err)?;
        models.into_iter().map(into_recorded).collect()
    }

    async fn stream_version(&self, stream_id: Uuid) -> Result<i64, GeneaError> {
        Self::current_version(&self.db, stream_id).await
    }

    async fn read_all(
        &self,
        from_position: i64,
        limit: u64,
    ) -> Result<Vec<RecordedEvent>, GeneaError> {
        let models = Entity::find()
            .filter(Column::Position.gt(from_position))
            .order_by_asc(Column::Position)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(Self::backend_err)?;
        models.into_iter().map(into_recorded).collect()
    }

    async fn read_by_stream(
        &self,
        stream_id: Uuid,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<RecordedEvent>, GeneaError> {
        let models = Entity::find()
            .filter(Column::StreamId.eq(stream_id))
            .order_by(Column::Version, Order::Desc)
            .limit(limit)
            .offset(offset)
            .all(&self.db)
            .await
            .map_err(Self::backend_err)?;
        models.into_iter().map(into_recorded).collect()
    }

    async fn read_global_by_time(
        &self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
        types: &[String],
        limit: u64,
        offset: u64,
    ) -> Result<Vec<RecordedEvent>, GeneaError> {
        let mut query = Entity::find();
        if let Some(from) = from {
            query = query.filter(Column::OccurredAt.gte(from));
        }
        if let Some(to) = to {
            query = query.filter(Column::OccurredAt.lte(to));
        }
        if !types.is_empty() {
            query = query.filter(Column::EventType.is_in(types.iter().cloned()));
        }
        let models = query
            .order_by(Column::Position, Order::Desc)
            .limit(limit)
            .offset(offset)
            .all(&self.db)
            .await
            .map_err(Self::backend_err)?;
        models.into_iter().map(into_recorded).collect()
    }

    async fn last_position(&self) -> Result<i64, GeneaError> {
        let last = Entity::find()
            .order_by_desc(Column::Position)
            .limit(1)
            .one(&self.db)
            .await
            .map_err(Self::backend_err)?;
        Ok(last.map(|m| m.position).unwrap_or(0))
    }
}
