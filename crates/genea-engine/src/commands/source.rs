//! Source and repository commands.

use chrono::Utc;
use uuid::Uuid;

use genea_core::GeneaError;
use genea_core::event::{Changes, Deleted, DomainEvent, StreamType, Updated};
use genea_core::types::{Repository, Source};
use genea_db::store::EventStore;

use crate::fold::{self, AggregateState};

use super::{append_one, read_existing_stream};

pub struct SourceCommands;

impl SourceCommands {
    pub async fn create(
        store: &dyn EventStore,
        mut source: Source,
    ) -> Result<Source, GeneaError> {
        let now = Utc::now();
        if source.id.is_nil() {
            source.id = Uuid::now_v7();
        }
        source.version = 1;
        source.created_at = now;
        source.updated_at = now;
        source.validate()?;
        append_one(
            store,
            source.id,
            StreamType::Source,
            DomainEvent::SourceCreated(source.clone()),
            0,
            now,
        )
        .await?;
        Ok(source)
    }

    pub async fn update(
        store: &dyn EventStore,
        id: Uuid,
        changes: Changes,
        expected_version: Option<i64>,
    ) -> Result<i64, GeneaError> {
        let events = read_existing_stream(store, id, "Source").await?;
        let Some(AggregateState::Source(mut preview)) = fold::fold(&events, None)? else {
            return Err(GeneaError::NotFound {
                entity: "Source",
                id,
            });
        };
        let expected = expected_version.unwrap_or(preview.version);
        genea_core::apply::apply_source(&mut preview, &changes)?;
        preview.validate()?;
        append_one(
            store,
            id,
            StreamType::Source,
            DomainEvent::SourceUpdated(Updated { id, changes }),
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
        let events = read_existing_stream(store, id, "Source").await?;
        let Some(state) = fold::fold(&events, None)? else {
            return Err(GeneaError::NotFound {
                entity: "Source",
                id,
            });
        };
        let expected = expected_version.unwrap_or(state.version());
        append_one(
            store,
            id,
            StreamType::Source,
            DomainEvent::SourceDeleted(Deleted { id }),
            expected,
            Utc::now(),
        )
        .await
    }
}

pub struct RepositoryCommands;

impl RepositoryCommands {
    pub async fn create(
        store: &dyn EventStore,
        mut repository: Repository,
    ) -> Result<Repository, GeneaError> {
        let now = Utc::now();
        if repository.id.is_nil() {
            repository.id = Uuid::now_v7();
        }
        repository.version = 1;
        repository.created_at = now;
        repository.updated_at = now;
        repository.validate()?;
        append_one(
            store,
            repository.id,
            StreamType::Repository,
            DomainEvent::RepositoryCreated(repository.clone()),
            0,
            now,
        )
        .await?;
        Ok(repository)
    }

    pub async fn update(
        store: &dyn EventStore,
        id: Uuid,
        changes: Changes,
        expected_version: Option<i64>,
    ) -> Result<i64, GeneaError> {
        let events = read_existing_stream(store, id, "Repository").await?;
        let Some(AggregateState::Repository(mut preview)) = fold::fold(&events, None)? else {
            return Err(GeneaError::NotFound {
                entity: "Repository",
                id,
            });
        };
        let expected = expected_version.unwrap_or(preview.version);
        genea_core::apply::apply_repository(&mut preview, &changes)?;
        preview.validate()?;
        append_one(
            store,
            id,
            StreamType::Repository,
            DomainEvent::RepositoryUpdated(Updated { id, changes }),
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
        let events = read_existing_stream(store, id, "Repository").await?;
        let Some(state) = fold::fold(&events, None)? else {
            return Err(GeneaError::NotFound {
                entity: "Repository",
                id,
            });
        };
        let expected = expected_version.unwrap_or(state.version());
        append_one(
            store,
            id,
            StreamType::Repository,
            DomainEvent::RepositoryDeleted(Deleted { id }),
            expected,
            Utc::now(),
        )
        .await
    }
}
