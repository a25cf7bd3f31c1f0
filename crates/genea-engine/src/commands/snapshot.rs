//! Snapshot commands: named markers over the global log position.

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use genea_core::GeneaError;
use genea_core::event::{DomainEvent, StreamType};
use genea_core::types::Snapshot;
use genea_db::store::EventStore;

use super::append_one;

pub struct SnapshotCommands;

impl SnapshotCommands {
    /// Capture the current global log position under a name. The snapshot
    /// itself is an aggregate: its creation event lands after the captured
    /// position.
    pub async fn create(
        store: &dyn EventStore,
        name: String,
        description: Option<String>,
    ) -> Result<Snapshot, GeneaError> {
        let now = Utc::now();
        let snapshot = Snapshot {
            id: Uuid::now_v7(),
            name,
            description,
            position: store.last_position().await?,
            created_at: now,
        };
        snapshot.validate()?;
        append_one(
            store,
            snapshot.id,
            StreamType::Snapshot,
            DomainEvent::SnapshotCreated(snapshot.clone()),
            0,
            now,
        )
        .await?;
        info!(snapshot = %snapshot.name, position = snapshot.position, "snapshot created");
        Ok(snapshot)
    }
}
