//! The closed domain-event taxonomy and its codec.
//!
//! Every mutation of the system is one of the variants below, serialized as a
//! string tag plus a JSON payload. The decoder is an exhaustive match over
//! the closed tag set: adding a variant without extending
//! [`DomainEvent::decode`] is caught by the round-trip test over
//! [`DomainEvent::ALL_TAGS`].
//!
//! Created events embed the full entity. Updated events carry a sparse
//! `changes` map of recognized field names to new values; explicit JSON null
//! clears a nullable field, absence leaves it untouched. Deleted events carry
//! only identifiers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::GeneaError;
use crate::types::{
    Association, Attribute, Citation, Family, FamilyChild, LdsOrdinance, LifeEvent, Media, Note,
    Person, PersonName, Repository, Snapshot, Source, Submitter,
};

/// Kind of aggregate a stream belongs to.
///
/// Person sub-resources (names, life events, attributes, associations,
/// person-bound LDS ordinances) ride the Person stream; family children,
/// family events and sealing-spouse ordinances ride the Family stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamType {
    Person,
    Family,
    Source,
    Repository,
    Citation,
    Media,
    Note,
    Submitter,
    Snapshot,
}

impl StreamType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Person => "person",
            Self::Family => "family",
            Self::Source => "source",
            Self::Repository => "repository",
            Self::Citation => "citation",
            Self::Media => "media",
            Self::Note => "note",
            Self::Submitter => "submitter",
            Self::Snapshot => "snapshot",
        }
    }

    pub fn parse(s: &str) -> Result<Self, GeneaError> {
        match s {
            "person" => Ok(Self::Person),
            "family" => Ok(Self::Family),
            "source" => Ok(Self::Source),
            "repository" => Ok(Self::Repository),
            "citation" => Ok(Self::Citation),
            "media" => Ok(Self::Media),
            "note" => Ok(Self::Note),
            "submitter" => Ok(Self::Submitter),
            "snapshot" => Ok(Self::Snapshot),
            other => Err(GeneaError::UnknownEventType(format!(
                "stream type {other}"
            ))),
        }
    }
}

impl std::fmt::Display for StreamType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse action of an event, used when grouping log ranges per aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventAction {
    Created,
    Updated,
    Deleted,
}

/// Sparse field-name → new-value map carried by Updated events.
pub type Changes = serde_json::Map<String, Value>;

/// Payload of an `*_updated` event on a top-level aggregate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Updated {
    pub id: Uuid,
    pub changes: Changes,
}

/// Payload of an `*_deleted` event on a top-level aggregate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deleted {
    pub id: Uuid,
}

/// Payload of an `*_updated` event on a sub-resource riding its owner's
/// stream. `owner_id` is the stream id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OwnedUpdated {
    pub owner_id: Uuid,
    pub id: Uuid,
    pub changes: Changes,
}

/// Payload of an `*_deleted` event on a sub-resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnedDeleted {
    pub owner_id: Uuid,
    pub id: Uuid,
}

/// Payload of `family_child_removed`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChildRemoved {
    pub family_id: Uuid,
    pub child_id: Uuid,
}

/// The closed set of domain events.
#[derive(Debug, Clone)]
pub enum DomainEvent {
    PersonCreated(Person),
    PersonUpdated(Updated),
    PersonDeleted(Deleted),
    PersonNameCreated(PersonName),
    PersonNameUpdated(OwnedUpdated),
    PersonNameDeleted(OwnedDeleted),
    FamilyCreated(Family),
    FamilyUpdated(Updated),
    FamilyDeleted(Deleted),
    FamilyChildAdded(FamilyChild),
    FamilyChildRemoved(ChildRemoved),
    LifeEventCreated(LifeEvent),
    LifeEventUpdated(OwnedUpdated),
    LifeEventDeleted(OwnedDeleted),
    AttributeCreated(Attribute),
    AttributeUpdated(OwnedUpdated),
    AttributeDeleted(OwnedDeleted),
    AssociationCreated(Association),
    AssociationUpdated(OwnedUpdated),
    AssociationDeleted(OwnedDeleted),
    LdsOrdinanceCreated(LdsOrdinance),
    LdsOrdinanceUpdated(OwnedUpdated),
    LdsOrdinanceDeleted(OwnedDeleted),
    SourceCreated(Source),
    SourceUpdated(Updated),
    SourceDeleted(Deleted),
    RepositoryCreated(Repository),
    RepositoryUpdated(Updated),
    RepositoryDeleted(Deleted),
    CitationCreated(Citation),
    CitationUpdated(Updated),
    CitationDeleted(Deleted),
    MediaCreated(Media),
    MediaUpdated(Updated),
    MediaDeleted(Deleted),
    NoteCreated(Note),
    NoteUpdated(Updated),
    NoteDeleted(Deleted),
    SubmitterCreated(Submitter),
    SubmitterUpdated(Updated),
    SubmitterDeleted(Deleted),
    SnapshotCreated(Snapshot),
}

impl DomainEvent {
    /// Every tag in the taxonomy, in declaration order.
    pub const ALL_TAGS: &'static [&'static str] = &[
        "person_created",
        "person_updated",
        "person_deleted",
        "person_name_created",
        "person_name_updated",
        "person_name_deleted",
        "family_created",
        "family_updated",
        "family_deleted",
        "family_child_added",
        "family_child_removed",
        "life_event_created",
        "life_event_updated",
        "life_event_deleted",
        "attribute_created",
        "attribute_updated",
        "attribute_deleted",
        "association_created",
        "association_updated",
        "association_deleted",
        "lds_ordinance_created",
        "lds_ordinance_updated",
        "lds_ordinance_deleted",
        "source_created",
        "source_updated",
        "source_deleted",
        "repository_created",
        "repository_updated",
        "repository_deleted",
        "citation_created",
        "citation_updated",
        "citation_deleted",
        "media_created",
        "media_updated",
        "media_deleted",
        "note_created",
        "note_updated",
        "note_deleted",
        "submitter_created",
        "submitter_updated",
        "submitter_deleted",
        "snapshot_created",
    ];

    /// Discriminator tag stored alongside the payload.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::PersonCreated(_) => "person_created",
            Self::PersonUpdated(_) => "person_updated",
            Self::PersonDeleted(_) => "person_deleted",
            Self::PersonNameCreated(_) => "person_name_created",
            Self::PersonNameUpdated(_) => "person_name_updated",
            Self::PersonNameDeleted(_) => "person_name_deleted",
            Self::FamilyCreated(_) => "family_created",
            Self::FamilyUpdated(_) => "family_updated",
            Self::FamilyDeleted(_) => "family_deleted",
            Self::FamilyChildAdded(_) => "family_child_added",
            Self::FamilyChildRemoved(_) => "family_child_removed",
            Self::LifeEventCreated(_) => "life_event_created",
            Self::LifeEventUpdated(_) => "life_event_updated",
            Self::LifeEventDeleted(_) => "life_event_deleted",
            Self::AttributeCreated(_) => "attribute_created",
            Self::AttributeUpdated(_) => "attribute_updated",
            Self::AttributeDeleted(_) => "attribute_deleted",
            Self::AssociationCreated(_) => "association_created",
            Self::AssociationUpdated(_) => "association_updated",
            Self::AssociationDeleted(_) => "association_deleted",
            Self::LdsOrdinanceCreated(_) => "lds_ordinance_created",
            Self::LdsOrdinanceUpdated(_) => "lds_ordinance_updated",
            Self::LdsOrdinanceDeleted(_) => "lds_ordinance_deleted",
            Self::SourceCreated(_) => "source_created",
            Self::SourceUpdated(_) => "source_updated",
            Self::SourceDeleted(_) => "source_deleted",
            Self::RepositoryCreated(_) => "repository_created",
            Self::RepositoryUpdated(_) => "repository_updated",
            Self::RepositoryDeleted(_) => "repository_deleted",
            Self::CitationCreated(_) => "citation_created",
            Self::CitationUpdated(_) => "citation_updated",
            Self::CitationDeleted(_) => "citation_deleted",
            Self::MediaCreated(_) => "media_created",
            Self::MediaUpdated(_) => "media_updated",
            Self::MediaDeleted(_) => "media_deleted",
            Self::NoteCreated(_) => "note_created",
            Self::NoteUpdated(_) => "note_updated",
            Self::NoteDeleted(_) => "note_deleted",
            Self::SubmitterCreated(_) => "submitter_created",
            Self::SubmitterUpdated(_) => "submitter_updated",
            Self::SubmitterDeleted(_) => "submitter_deleted",
            Self::SnapshotCreated(_) => "snapshot_created",
        }
    }

    /// Coarse create/update/delete action.
    pub fn action(&self) -> EventAction {
        match self {
            Self::PersonCreated(_)
            | Self::PersonNameCreated(_)
            | Self::FamilyCreated(_)
            | Self::FamilyChildAdded(_)
            | Self::LifeEventCreated(_)
            | Self::AttributeCreated(_)
            | Self::AssociationCreated(_)
            | Self::LdsOrdinanceCreated(_)
            | Self::SourceCreated(_)
            | Self::RepositoryCreated(_)
            | Self::CitationCreated(_)
            | Self::MediaCreated(_)
            | Self::NoteCreated(_)
            | Self::SubmitterCreated(_)
            | Self::SnapshotCreated(_) => EventAction::Created,
            Self::PersonUpdated(_)
            | Self::PersonNameUpdated(_)
            | Self::FamilyUpdated(_)
            | Self::LifeEventUpdated(_)
            | Self::AttributeUpdated(_)
            | Self::AssociationUpdated(_)
            | Self::LdsOrdinanceUpdated(_)
            | Self::SourceUpdated(_)
            | Self::RepositoryUpdated(_)
            | Self::CitationUpdated(_)
            | Self::MediaUpdated(_)
            | Self::NoteUpdated(_)
            | Self::SubmitterUpdated(_) => EventAction::Updated,
            Self::PersonDeleted(_)
            | Self::PersonNameDeleted(_)
            | Self::FamilyDeleted(_)
            | Self::FamilyChildRemoved(_)
            | Self::LifeEventDeleted(_)
            | Self::AttributeDeleted(_)
            | Self::AssociationDeleted(_)
            | Self::LdsOrdinanceDeleted(_)
            | Self::SourceDeleted(_)
            | Self::RepositoryDeleted(_)
            | Self::CitationDeleted(_)
            | Self::MediaDeleted(_)
            | Self::NoteDeleted(_)
            | Self::SubmitterDeleted(_) => EventAction::Deleted,
        }
    }

    /// Id of the aggregate (the stream) this event belongs to.
    pub fn aggregate_id(&self) -> Uuid {
        match self {
            Self::PersonCreated(p) => p.id,
            Self::PersonUpdated(u) => u.id,
            Self::PersonDeleted(d) => d.id,
            Self::PersonNameCreated(n) => n.person_id,
            Self::PersonNameUpdated(u) => u.owner_id,
            Self::PersonNameDeleted(d) => d.owner_id,
            Self::FamilyCreated(f) => f.id,
            Self::FamilyUpdated(u) => u.id,
            Self::FamilyDeleted(d) => d.id,
            Self::FamilyChildAdded(c) => c.family_id,
            Self::FamilyChildRemoved(r) => r.family_id,
            Self::LifeEventCreated(e) => e.owner_id,
            Self::LifeEventUpdated(u) => u.owner_id,
            Self::LifeEventDeleted(d) => d.owner_id,
            Self::AttributeCreated(a) => a.person_id,
            Self::AttributeUpdated(u) => u.owner_id,
            Self::AttributeDeleted(d) => d.owner_id,
            Self::AssociationCreated(a) => a.person_id,
            Self::AssociationUpdated(u) => u.owner_id,
            Self::AssociationDeleted(d) => d.owner_id,
            Self::LdsOrdinanceCreated(o) => o.owner_id,
            Self::LdsOrdinanceUpdated(u) => u.owner_id,
            Self::LdsOrdinanceDeleted(d) => d.owner_id,
            Self::SourceCreated(s) => s.id,
            Self::SourceUpdated(u) => u.id,
            Self::SourceDeleted(d) => d.id,
            Self::RepositoryCreated(r) => r.id,
            Self::RepositoryUpdated(u) => u.id,
            Self::RepositoryDeleted(d) => d.id,
            Self::CitationCreated(c) => c.id,
            Self::CitationUpdated(u) => u.id,
            Self::CitationDeleted(d) => d.id,
            Self::MediaCreated(m) => m.id,
            Self::MediaUpdated(u) => u.id,
            Self::MediaDeleted(d) => d.id,
            Self::NoteCreated(n) => n.id,
            Self::NoteUpdated(u) => u.id,
            Self::NoteDeleted(d) => d.id,
            Self::SubmitterCreated(s) => s.id,
            Self::SubmitterUpdated(u) => u.id,
            Self::SubmitterDeleted(d) => d.id,
            Self::SnapshotCreated(s) => s.id,
        }
    }

    /// Serialize the payload for storage.
    pub fn payload(&self) -> Result<Value, GeneaError> {
        let value = match self {
            Self::PersonCreated(p) => serde_json::to_value(p),
            Self::PersonUpdated(p) => serde_json::to_value(p),
            Self::PersonDeleted(p) => serde_json::to_value(p),
            Self::PersonNameCreated(p) => serde_json::to_value(p),
            Self::PersonNameUpdated(p) => serde_json::to_value(p),
            Self::PersonNameDeleted(p) => serde_json::to_value(p),
            Self::FamilyCreated(p) => serde_json::to_value(p),
            Self::FamilyUpdated(p) => serde_json::to_value(p),
            Self::FamilyDeleted(p) => serde_json::to_value(p),
            Self::FamilyChildAdded(p) => serde_json::to_value(p),
            Self::FamilyChildRemoved(p) => serde_json::to_value(p),
            Self::LifeEventCreated(p) => serde_json::to_value(p),
            Self::LifeEventUpdated(p) => serde_json::to_value(p),
            Self::LifeEventDeleted(p) => serde_json::to_value(p),
            Self::AttributeCreated(p) => serde_json::to_value(p),
            Self::AttributeUpdated(p) => serde_json::to_value(p),
            Self::AttributeDeleted(p) => serde_json::to_value(p),
            Self::AssociationCreated(p) => serde_json::to_value(p),
            Self::AssociationUpdated(p) => serde_json::to_value(p),
            Self::AssociationDeleted(p) => serde_json::to_value(p),
            Self::LdsOrdinanceCreated(p) => serde_json::to_value(p),
            Self::LdsOrdinanceUpdated(p) => serde_json::to_value(p),
            Self::LdsOrdinanceDeleted(p) => serde_json::to_value(p),
            Self::SourceCreated(p) => serde_json::to_value(p),
            Self::SourceUpdated(p) => serde_json::to_value(p),
            Self::SourceDeleted(p) => serde_json::to_value(p),
            Self::RepositoryCreated(p) => serde_json::to_value(p),
            Self::RepositoryUpdated(p) => serde_json::to_value(p),
            Self::RepositoryDeleted(p) => serde_json::to_value(p),
            Self::CitationCreated(p) => serde_json::to_value(p),
            Self::CitationUpdated(p) => serde_json::to_value(p),
            Self::CitationDeleted(p) => serde_json::to_value(p),
            Self::MediaCreated(p) => serde_json::to_value(p),
            Self::MediaUpdated(p) => serde_json::to_value(p),
            Self::MediaDeleted(p) => serde_json::to_value(p),
            Self::NoteCreated(p) => serde_json::to_value(p),
            Self::NoteUpdated(p) => serde_json::to_value(p),
            Self::NoteDeleted(p) => serde_json::to_value(p),
            Self::SubmitterCreated(p) => serde_json::to_value(p),
            Self::SubmitterUpdated(p) => serde_json::to_value(p),
            Self::SubmitterDeleted(p) => serde_json::to_value(p),
            Self::SnapshotCreated(p) => serde_json::to_value(p),
        };
        value.map_err(|e| GeneaError::Backend(format!("event payload encode: {e}")))
    }

    /// Decode a stored event. Exhaustive over the closed tag set; anything
    /// else is [`GeneaError::UnknownEventType`].
    pub fn decode(tag: &str, payload: Value) -> Result<Self, GeneaError> {
        fn from<T: serde::de::DeserializeOwned>(
            tag: &str,
            payload: Value,
        ) -> Result<T, GeneaError> {
            serde_json::from_value(payload)
                .map_err(|e| GeneaError::Backend(format!("event payload decode ({tag}): {e}")))
        }

        match tag {
            "person_created" => Ok(Self::PersonCreated(from(tag, payload)?)),
            "person_updated" => Ok(Self::PersonUpdated(from(tag, payload)?)),
            "person_deleted" => Ok(Self::PersonDeleted(from(tag, payload)?)),
            "person_name_created" => Ok(Self::PersonNameCreated(from(tag, payload)?)),
            "person_name_updated" => Ok(Self::PersonNameUpdated(from(tag, payload)?)),
            "person_name_deleted" => Ok(Self::PersonNameDeleted(from(tag, payload)?)),
            "family_created" => Ok(Self::FamilyCreated(from(tag, payload)?)),
            "family_updated" => Ok(Self::FamilyUpdated(from(tag, payload)?)),
            "family_deleted" => Ok(Self::FamilyDeleted(from(tag, payload)?)),
            "family_child_added" => Ok(Self::FamilyChildAdded(from(tag, payload)?)),
            "family_child_removed" => Ok(Self::FamilyChildRemoved(from(tag, payload)?)),
            "life_event_created" => Ok(Self::LifeEventCreated(from(tag, payload)?)),
            "life_event_updated" => Ok(Self::LifeEventUpdated(from(tag, payload)?)),
            "life_event_deleted" => Ok(Self::LifeEventDeleted(from(tag, payload)?)),
            "attribute_created" => Ok(Self::AttributeCreated(from(tag, payload)?)),
            "attribute_updated" => Ok(Self::AttributeUpdated(from(tag, payload)?)),
            "attribute_deleted" => Ok(Self::AttributeDeleted(from(tag, payload)?)),
            "association_created" => Ok(Self::AssociationCreated(from(tag, payload)?)),
            "association_updated" => Ok(Self::AssociationUpdated(from(tag, payload)?)),
            "association_deleted" => Ok(Self::AssociationDeleted(from(tag, payload)?)),
            "lds_ordinance_created" => Ok(Self::LdsOrdinanceCreated(from(tag, payload)?)),
            "lds_ordinance_updated" => Ok(Self::LdsOrdinanceUpdated(from(tag, payload)?)),
            "lds_ordinance_deleted" => Ok(Self::LdsOrdinanceDeleted(from(tag, payload)?)),
            "source_created" => Ok(Self::SourceCreated(from(tag, payload)?)),
            "source_updated" => Ok(Self::SourceUpdated(from(tag, payload)?)),
            "source_deleted" => Ok(Self::SourceDeleted(from(tag, payload)?)),
            "repository_created" => Ok(Self::RepositoryCreated(from(tag, payload)?)),
            "repository_updated" => Ok(Self::RepositoryUpdated(from(tag, payload)?)),
            "repository_deleted" => Ok(Self::RepositoryDeleted(from(tag, payload)?)),
            "citation_created" => Ok(Self::CitationCreated(from(tag, payload)?)),
            "citation_updated" => Ok(Self::CitationUpdated(from(tag, payload)?)),
            "citation_deleted" => Ok(Self::CitationDeleted(from(tag, payload)?)),
            "media_created" => Ok(Self::MediaCreated(from(tag, payload)?)),
            "media_updated" => Ok(Self::MediaUpdated(from(tag, payload)?)),
            "media_deleted" => Ok(Self::MediaDeleted(from(tag, payload)?)),
            "note_created" => Ok(Self::NoteCreated(from(tag, payload)?)),
            "note_updated" => Ok(Self::NoteUpdated(from(tag, payload)?)),
            "note_deleted" => Ok(Self::NoteDeleted(from(tag, payload)?)),
            "submitter_created" => Ok(Self::SubmitterCreated(from(tag, payload)?)),
            "submitter_updated" => Ok(Self::SubmitterUpdated(from(tag, payload)?)),
            "submitter_deleted" => Ok(Self::SubmitterDeleted(from(tag, payload)?)),
            "snapshot_created" => Ok(Self::SnapshotCreated(from(tag, payload)?)),
            other => Err(GeneaError::UnknownEventType(other.to_string())),
        }
    }
}

/// An event prepared by a command handler, not yet appended.
#[derive(Debug, Clone)]
pub struct EventEnvelope {
    pub occurred_at: DateTime<Utc>,
    pub event: DomainEvent,
}

impl EventEnvelope {
    pub fn new(occurred_at: DateTime<Utc>, event: DomainEvent) -> Self {
        Self { occurred_at, event }
    }
}

/// An event as stored: envelope plus the positions assigned on append.
#[derive(Debug, Clone)]
pub struct RecordedEvent {
    /// Global monotonic rank across all streams.
    pub position: i64,
    pub stream_id: Uuid,
    pub stream_type: StreamType,
    /// Per-stream contiguous version.
    pub version: i64,
    pub occurred_at: DateTime<Utc>,
    pub event: DomainEvent,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::*;
    use crate::types::*;

    /// Build a representative event for a tag. Exhaustive: a tag added to
    /// the taxonomy without a sample here fails the round-trip test below.
    fn sample(tag: &str) -> DomainEvent {
        let id = Uuid::now_v7();
        let owner = Uuid::now_v7();
        let updated = Updated {
            id,
            changes: Changes::new(),
        };
        let owned_updated = OwnedUpdated {
            owner_id: owner,
            id,
            changes: Changes::new(),
        };
        let owned_deleted = OwnedDeleted { owner_id: owner, id };
        match tag {
            "person_created" => DomainEvent::PersonCreated(Person::default()),
            "person_updated" => DomainEvent::PersonUpdated(updated),
            "person_deleted" => DomainEvent::PersonDeleted(Deleted { id }),
            "person_name_created" => DomainEvent::PersonNameCreated(PersonName::default()),
            "person_name_updated" => DomainEvent::PersonNameUpdated(owned_updated),
            "person_name_deleted" => DomainEvent::PersonNameDeleted(owned_deleted),
            "family_created" => DomainEvent::FamilyCreated(Family::default()),
            "family_updated" => DomainEvent::FamilyUpdated(updated),
            "family_deleted" => DomainEvent::FamilyDeleted(Deleted { id }),
            "family_child_added" => DomainEvent::FamilyChildAdded(FamilyChild {
                id,
                family_id: owner,
                child_id: Uuid::now_v7(),
                relationship: ChildRelationship::Biological,
                sequence: 0,
            }),
            "family_child_removed" => DomainEvent::FamilyChildRemoved(ChildRemoved {
                family_id: owner,
                child_id: id,
            }),
            "life_event_created" => DomainEvent::LifeEventCreated(LifeEvent {
                id,
                owner_kind: FactOwnerKind::Person,
                owner_id: owner,
                fact_type: FactType::Burial,
                date: None,
                place: None,
                address: None,
                description: None,
                cause: None,
                age: None,
                is_negated: false,
            }),
            "life_event_updated" => DomainEvent::LifeEventUpdated(owned_updated),
            "life_event_deleted" => DomainEvent::LifeEventDeleted(owned_deleted),
            "attribute_created" => DomainEvent::AttributeCreated(Attribute {
                id,
                person_id: owner,
                attribute_type: AttributeType::Occupation,
                value: "miller".into(),
                date: None,
                place: None,
            }),
            "attribute_updated" => DomainEvent::AttributeUpdated(owned_updated),
            "attribute_deleted" => DomainEvent::AttributeDeleted(owned_deleted),
            "association_created" => DomainEvent::AssociationCreated(Association {
                id,
                person_id: owner,
                associate_id: Uuid::now_v7(),
                role: AssociationRole::Witness,
                phrase: None,
                notes: None,
            }),
            "association_updated" => DomainEvent::AssociationUpdated(owned_updated),
            "association_deleted" => DomainEvent::AssociationDeleted(owned_deleted),
            "lds_ordinance_created" => DomainEvent::LdsOrdinanceCreated(LdsOrdinance {
                id,
                ordinance_type: LdsOrdinanceType::Endowment,
                owner_kind: FactOwnerKind::Person,
                owner_id: owner,
                date: None,
                temple: None,
                status: None,
                place: None,
            }),
            "lds_ordinance_updated" => DomainEvent::LdsOrdinanceUpdated(owned_updated),
            "lds_ordinance_deleted" => DomainEvent::LdsOrdinanceDeleted(owned_deleted),
            "source_created" => DomainEvent::SourceCreated(Source {
                title: "1850 census".into(),
                ..Default::default()
            }),
            "source_updated" => DomainEvent::SourceUpdated(updated),
            "source_deleted" => DomainEvent::SourceDeleted(Deleted { id }),
            "repository_created" => DomainEvent::RepositoryCreated(Repository {
                name: "County archive".into(),
                ..Default::default()
            }),
            "repository_updated" => DomainEvent::RepositoryUpdated(updated),
            "repository_deleted" => DomainEvent::RepositoryDeleted(Deleted { id }),
            "citation_created" => DomainEvent::CitationCreated(Citation {
                id,
                source_id: Uuid::now_v7(),
                fact_type: FactType::Birth,
                owner_kind: FactOwnerKind::Person,
                owner_id: owner,
                page: Some("p. 12".into()),
                volume: None,
                source_quality: Some(SourceQuality::Original),
                informant_type: Some(InformantType::Primary),
                evidence_type: Some(EvidenceType::Direct),
                text: None,
                analysis: None,
                apid: None,
                version: 0,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            }),
            "citation_updated" => DomainEvent::CitationUpdated(updated),
            "citation_deleted" => DomainEvent::CitationDeleted(Deleted { id }),
            "media_created" => DomainEvent::MediaCreated(Media {
                id,
                xref: None,
                owner_kind: MediaOwnerKind::Person,
                owner_id: owner,
                title: None,
                description: None,
                mime_type: "image/jpeg".into(),
                media_kind: MediaKind::Photo,
                file_name: "a.jpg".into(),
                data: vec![1, 2, 3],
                thumbnail: None,
                crop: None,
                version: 0,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            }),
            "media_updated" => DomainEvent::MediaUpdated(updated),
            "media_deleted" => DomainEvent::MediaDeleted(Deleted { id }),
            "note_created" => DomainEvent::NoteCreated(Note {
                text: "a note".into(),
                ..Default::default()
            }),
            "note_updated" => DomainEvent::NoteUpdated(updated),
            "note_deleted" => DomainEvent::NoteDeleted(Deleted { id }),
            "submitter_created" => DomainEvent::SubmitterCreated(Submitter {
                name: "Submitter".into(),
                ..Default::default()
            }),
            "submitter_updated" => DomainEvent::SubmitterUpdated(updated),
            "submitter_deleted" => DomainEvent::SubmitterDeleted(Deleted { id }),
            "snapshot_created" => DomainEvent::SnapshotCreated(Snapshot {
                id,
                name: "before import".into(),
                description: None,
                position: 1,
                created_at: Utc::now(),
            }),
            other => panic!("tag {other} has no sample"),
        }
    }

    #[test]
    fn test_every_tag_roundtrips_through_codec() {
        for tag in DomainEvent::ALL_TAGS {
            let event = sample(tag);
            assert_eq!(event.tag(), *tag);
            let payload = event.payload().unwrap();
            let decoded = DomainEvent::decode(tag, payload).unwrap();
            assert_eq!(decoded.tag(), *tag);
            assert_eq!(decoded.aggregate_id(), event.aggregate_id());
            assert_eq!(decoded.action(), event.action());
        }
    }

    #[test]
    fn test_unknown_tag_is_rejected() {
        let err = DomainEvent::decode("person_renamed", Value::Null).unwrap_err();
        assert!(matches!(err, GeneaError::UnknownEventType(_)));
    }

    #[test]
    fn test_stream_type_roundtrip() {
        for st in [
            StreamType::Person,
            StreamType::Family,
            StreamType::Source,
            StreamType::Repository,
            StreamType::Citation,
            StreamType::Media,
            StreamType::Note,
            StreamType::Submitter,
            StreamType::Snapshot,
        ] {
            assert_eq!(StreamType::parse(st.as_str()).unwrap(), st);
        }
        assert!(StreamType::parse("tree").is_err());
    }
}
