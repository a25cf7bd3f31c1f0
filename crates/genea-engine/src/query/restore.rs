//! Restore points: the prior versions of an aggregate, each reachable by a
//! forward-moving rollback (see `commands::rollback`).

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use genea_core::GeneaError;
use genea_core::event::EventAction;
use genea_db::store::EventStore;

/// One restorable version of an aggregate.
#[derive(Debug, Clone, Serialize)]
pub struct RestorePoint {
    pub version: i64,
    pub occurred_at: DateTime<Utc>,
    pub event_type: String,
    pub action: EventAction,
    /// Names of the fields the event changed, when it carried a change-set.
    pub changed_fields: Vec<String>,
}

pub struct RestoreQuery;

impl RestoreQuery {
    /// Every version of the aggregate, oldest first.
    pub async fn restore_points(
        store: &dyn EventStore,
        stream_id: Uuid,
    ) -> Result<Vec<RestorePoint>, GeneaError> {
        let events = store.read_stream(stream_id).await?;
        if events.is_empty() {
            return Err(GeneaError::NotFound {
                entity: "Aggregate",
                id: stream_id,
            });
        }
        Ok(events
            .into_iter()
            .map(|rec| {
                let changed_fields = changed_fields(&rec.event);
                RestorePoint {
                    version: rec.version,
                    occurred_at: rec.occurred_at,
                    event_type: rec.event.tag().to_string(),
                    action: rec.event.action(),
                    changed_fields,
                }
            })
            .collect())
    }
}

fn changed_fields(event: &genea_core::event::DomainEvent) -> Vec<String> {
    use genea_core::event::DomainEvent::*;
    match event {
        PersonUpdated(u) | FamilyUpdated(u) | SourceUpdated(u) | RepositoryUpdated(u)
        | CitationUpdated(u) | MediaUpdated(u) | NoteUpdated(u) | SubmitterUpdated(u) => {
            u.changes.keys().cloned().collect()
        }
        PersonNameUpdated(u) | LifeEventUpdated(u) | AttributeUpdated(u)
        | AssociationUpdated(u) | LdsOrdinanceUpdated(u) => u.changes.keys().cloned().collect(),
        _ => Vec::new(),
    }
}
