//! Snapshot listing and comparison.
//!
//! Comparing two snapshots reads the global-log slice `(min, max]` between
//! their positions and groups it per aggregate with a net
//! created/updated/deleted action.

use std::collections::BTreeMap;

use serde::Serialize;
use uuid::Uuid;

use genea_core::GeneaError;
use genea_core::event::{EventAction, StreamType};
use genea_core::types::Snapshot;
use genea_db::repo::SnapshotRepo;
use genea_db::sea_orm::DatabaseConnection;
use genea_db::store::EventStore;

/// One aggregate's net change between two snapshots.
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotDiffEntry {
    pub stream_id: Uuid,
    pub stream_type: StreamType,
    /// Net action over the range.
    pub action: EventAction,
    pub event_count: usize,
    pub first_position: i64,
    pub last_position: i64,
}

/// Result of comparing two snapshots.
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotComparison {
    pub from: Snapshot,
    pub to: Snapshot,
    pub changes: Vec<SnapshotDiffEntry>,
}

pub struct SnapshotQuery;

impl SnapshotQuery {
    pub async fn list(db: &DatabaseConnection) -> Result<Vec<Snapshot>, GeneaError> {
        SnapshotRepo::list(db).await
    }

    pub async fn compare(
        db: &DatabaseConnection,
        store: &dyn EventStore,
        a: Uuid,
        b: Uuid,
    ) -> Result<SnapshotComparison, GeneaError> {
        let first = SnapshotRepo::get(db, a)
            .await?
            .ok_or(GeneaError::NotFound {
                entity: "Snapshot",
                id: a,
            })?;
        let second = SnapshotRepo::get(db, b)
            .await?
            .ok_or(GeneaError::NotFound {
                entity: "Snapshot",
                id: b,
            })?;

        let (from, to) = if first.position <= second.position {
            (first, second)
        } else {
            (second, first)
        };

        // Accumulate the range (from.position, to.position].
        let mut grouped: BTreeMap<Uuid, SnapshotDiffEntry> = BTreeMap::new();
        let mut position = from.position;
        loop {
            let batch = store.read_all(position, 500).await?;
            if batch.is_empty() {
                break;
            }
            let mut done = false;
            for rec in batch {
                position = rec.position;
                if rec.position > to.position {
                    done = true;
                    break;
                }
                let entry = grouped.entry(rec.stream_id).or_insert(SnapshotDiffEntry {
                    stream_id: rec.stream_id,
                    stream_type: rec.stream_type,
                    action: rec.event.action(),
                    event_count: 0,
                    first_position: rec.position,
                    last_position: rec.position,
                });
                entry.event_count += 1;
                entry.last_position = rec.position;
                // Net action: a deletion wins; a creation inside the range
                // wins over plain updates.
                match rec.event.action() {
                    EventAction::Deleted => entry.action = EventAction::Deleted,
                    EventAction::Created if entry.action != EventAction::Deleted => {
                        entry.action = EventAction::Created;
                    }
                    _ => {}
                }
            }
            if done {
                break;
            }
        }

        let mut changes: Vec<SnapshotDiffEntry> = grouped.into_values().collect();
        changes.sort_by_key(|c| c.first_position);
        Ok(SnapshotComparison { from, to, changes })
    }
}
