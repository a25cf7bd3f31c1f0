//! Rollback: restore an aggregate's scalar state to a prior version.
//!
//! The log is never truncated. Rollback folds the stream twice — once up to
//! the target version, once to the end — diffs the two states over the
//! aggregate's writable fields, and appends one Updated event carrying the
//! reconstructing change-set. The stream keeps growing forward.

use chrono::Utc;
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use genea_core::GeneaError;
use genea_core::event::{Changes, DomainEvent, StreamType, Updated};
use genea_db::store::EventStore;

use crate::fold::{self, updatable_fields};

use super::{append_one, read_existing_stream};

pub struct RollbackCommands;

impl RollbackCommands {
    /// Roll an aggregate back to `target_version`. Returns the new stream
    /// version (current + 1 when anything changed, current otherwise).
    pub async fn rollback(
        store: &dyn EventStore,
        stream_id: Uuid,
        target_version: i64,
    ) -> Result<i64, GeneaError> {
        let events = read_existing_stream(store, stream_id, "Aggregate").await?;
        let stream_type = events[0].stream_type;
        if matches!(stream_type, StreamType::Snapshot) {
            return Err(GeneaError::validation(
                "stream_id",
                "snapshots are immutable markers",
            ));
        }

        let current = fold::fold(&events, None)?.ok_or(GeneaError::NotFound {
            entity: "Aggregate",
            id: stream_id,
        })?;
        let target =
            fold::fold(&events, Some(target_version))?.ok_or_else(|| {
                GeneaError::validation(
                    "target_version",
                    format!("no live state at version {target_version}"),
                )
            })?;

        let current_version = current.version();
        if target_version >= current_version {
            return Err(GeneaError::validation(
                "target_version",
                "target must precede the current version",
            ));
        }

        let old = target.scalar_value()?;
        let new = current.scalar_value()?;
        let mut changes = Changes::new();
        for field in updatable_fields(stream_type) {
            let was = old.get(*field).cloned().unwrap_or(Value::Null);
            let is = new.get(*field).cloned().unwrap_or(Value::Null);
            if was != is {
                changes.insert((*field).to_string(), was);
            }
        }
        if changes.is_empty() {
            return Ok(current_version);
        }

        let payload = Updated {
            id: stream_id,
            changes,
        };
        let event = match stream_type {
            StreamType::Person => DomainEvent::PersonUpdated(payload),
            StreamType::Family => DomainEvent::FamilyUpdated(payload),
            StreamType::Source => DomainEvent::SourceUpdated(payload),
            StreamType::Repository => DomainEvent::RepositoryUpdated(payload),
            StreamType::Citation => DomainEvent::CitationUpdated(payload),
            StreamType::Media => DomainEvent::MediaUpdated(payload),
            StreamType::Note => DomainEvent::NoteUpdated(payload),
            StreamType::Submitter => DomainEvent::SubmitterUpdated(payload),
            StreamType::Snapshot => unreachable!("rejected above"),
        };

        let version = append_one(
            store,
            stream_id,
            stream_type,
            event,
            current_version,
            Utc::now(),
        )
        .await?;
        info!(%stream_id, target_version, version, "aggregate rolled back");
        Ok(version)
    }
}
