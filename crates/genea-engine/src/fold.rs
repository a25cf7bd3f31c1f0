//! Reconstruction of aggregate state from a stream prefix.
//!
//! Folding a stream is the read side of the log: commands fold to validate
//! an update against current state, the history service folds to diff
//! consecutive versions, and rollback folds to reconstruct the target
//! version. Replaying a deleted aggregate folds to `None`.

use serde_json::Value;

use genea_core::GeneaError;
use genea_core::apply;
use genea_core::event::{DomainEvent, RecordedEvent, StreamType};
use genea_core::types::{
    Association, Attribute, Citation, Family, FamilyChild, LdsOrdinance, LifeEvent, Media, Note,
    Person, PersonName, Repository, Snapshot, Source, Submitter,
};

/// A person with its owned sub-resources, as reconstructed from its stream.
#[derive(Debug, Clone, Default)]
pub struct PersonAggregate {
    pub person: Person,
    pub names: Vec<PersonName>,
    pub life_events: Vec<LifeEvent>,
    pub attributes: Vec<Attribute>,
    pub associations: Vec<Association>,
    pub ordinances: Vec<LdsOrdinance>,
}

/// A family with its owned sub-resources.
#[derive(Debug, Clone, Default)]
pub struct FamilyAggregate {
    pub family: Family,
    pub children: Vec<FamilyChild>,
    pub life_events: Vec<LifeEvent>,
    pub ordinances: Vec<LdsOrdinance>,
}

/// Folded state of any aggregate.
#[derive(Debug, Clone)]
pub enum AggregateState {
    Person(Box<PersonAggregate>),
    Family(Box<FamilyAggregate>),
    Source(Source),
    Repository(Repository),
    Citation(Box<Citation>),
    Media(Box<Media>),
    Note(Note),
    Submitter(Submitter),
    Snapshot(Snapshot),
}

impl AggregateState {
    /// Current version of the folded aggregate.
    pub fn version(&self) -> i64 {
        match self {
            Self::Person(a) => a.person.version,
            Self::Family(a) => a.family.version,
            Self::Source(s) => s.version,
            Self::Repository(r) => r.version,
            Self::Citation(c) => c.version,
            Self::Media(m) => m.version,
            Self::Note(n) => n.version,
            Self::Submitter(s) => s.version,
            Self::Snapshot(_) => 1,
        }
    }

    /// The aggregate's scalar fields as a JSON object, used for field-level
    /// diffs. Sub-resources and binary payloads are excluded.
    pub fn scalar_value(&self) -> Result<Value, GeneaError> {
        let value = match self {
            Self::Person(a) => serde_json::to_value(&a.person),
            Self::Family(a) => serde_json::to_value(&a.family),
            Self::Source(s) => serde_json::to_value(s),
            Self::Repository(r) => serde_json::to_value(r),
            Self::Citation(c) => serde_json::to_value(c.as_ref()),
            Self::Media(m) => serde_json::to_value(m.as_ref()).map(|mut v| {
                if let Value::Object(ref mut map) = v {
                    map.remove("data");
                    map.remove("thumbnail");
                }
                v
            }),
            Self::Note(n) => serde_json::to_value(n),
            Self::Submitter(s) => serde_json::to_value(s),
            Self::Snapshot(s) => serde_json::to_value(s),
        };
        value.map_err(|e| GeneaError::Backend(format!("state encode: {e}")))
    }
}

/// The writable scalar fields per aggregate kind — the same whitelists the
/// change-set appliers recognize. Rollback diffs restrict themselves to
/// these.
pub fn updatable_fields(stream_type: StreamType) -> &'static [&'static str] {
    match stream_type {
        StreamType::Person => &[
            "given",
            "surname",
            "gender",
            "birth_date",
            "birth_place",
            "death_date",
            "death_place",
            "notes",
            "research_status",
            "fsftid",
            "brick_wall_active",
            "brick_wall_note",
            "brick_wall_since",
            "brick_wall_resolved_at",
        ],
        StreamType::Family => &[
            "partner1_id",
            "partner2_id",
            "relationship_type",
            "marriage_date",
            "marriage_place",
        ],
        StreamType::Source => &[
            "source_type",
            "title",
            "author",
            "publisher",
            "publish_date",
            "url",
            "repository_id",
            "repository_name",
            "call_number",
            "notes",
        ],
        StreamType::Repository => &["name", "address", "phone", "email", "website"],
        StreamType::Citation => &[
            "page",
            "volume",
            "source_quality",
            "informant_type",
            "evidence_type",
            "text",
            "analysis",
            "apid",
        ],
        StreamType::Media => &["title", "description", "media_kind", "file_name", "crop"],
        StreamType::Note => &["text"],
        StreamType::Submitter => &["name", "address", "phone", "email"],
        StreamType::Snapshot => &[],
    }
}

fn remove_by_id<T>(items: &mut Vec<T>, id: uuid::Uuid, get_id: impl Fn(&T) -> uuid::Uuid) {
    items.retain(|item| get_id(item) != id);
}

/// Fold a stream up to and including `up_to` (or the whole stream when
/// `None`). Returns `None` when the stream is empty or the aggregate was
/// deleted within the folded prefix.
pub fn fold(
    events: &[RecordedEvent],
    up_to: Option<i64>,
) -> Result<Option<AggregateState>, GeneaError> {
    let mut state: Option<AggregateState> = None;

    for rec in events {
        if let Some(limit) = up_to
            && rec.version > limit
        {
            break;
        }
        state = step(state, rec)?;
    }
    Ok(state)
}

fn step(
    state: Option<AggregateState>,
    rec: &RecordedEvent,
) -> Result<Option<AggregateState>, GeneaError> {
    use DomainEvent::*;

    let mut state = match (&rec.event, state) {
        // Creation establishes the aggregate.
        (PersonCreated(p), _) => Some(AggregateState::Person(Box::new(PersonAggregate {
            person: p.clone(),
            ..Default::default()
        }))),
        (FamilyCreated(f), _) => Some(AggregateState::Family(Box::new(FamilyAggregate {
            family: f.clone(),
            ..Default::default()
        }))),
        (SourceCreated(s), _) => Some(AggregateState::Source(s.clone())),
        (RepositoryCreated(r), _) => Some(AggregateState::Repository(r.clone())),
        (CitationCreated(c), _) => Some(AggregateState::Citation(Box::new(c.clone()))),
        (MediaCreated(m), _) => Some(AggregateState::Media(Box::new(m.clone()))),
        (NoteCreated(n), _) => Some(AggregateState::Note(n.clone())),
        (SubmitterCreated(s), _) => Some(AggregateState::Submitter(s.clone())),
        (SnapshotCreated(s), _) => Some(AggregateState::Snapshot(s.clone())),

        // Deletion ends it.
        (
            PersonDeleted(_) | FamilyDeleted(_) | SourceDeleted(_) | RepositoryDeleted(_)
            | CitationDeleted(_) | MediaDeleted(_) | NoteDeleted(_) | SubmitterDeleted(_),
            _,
        ) => None,

        // Everything else mutates existing state; without it the event is a
        // no-op (replay of a deleted aggregate).
        (_, None) => return Ok(None),
        (event, Some(mut state)) => {
            apply_mutation(event, &mut state)?;
            Some(state)
        }
    };

    // Every surviving event advances the aggregate version.
    if let Some(ref mut state) = state {
        set_version(state, rec.version, rec.occurred_at);
    }
    Ok(state)
}

fn apply_mutation(event: &DomainEvent, state: &mut AggregateState) -> Result<(), GeneaError> {
    use DomainEvent::*;

    match (event, state) {
        (PersonUpdated(u), AggregateState::Person(a)) => {
            apply::apply_person(&mut a.person, &u.changes)?;
        }
        (PersonNameCreated(n), AggregateState::Person(a)) => {
            if n.is_primary {
                for existing in &mut a.names {
                    existing.is_primary = false;
                }
            }
            a.names.push(n.clone());
        }
        (PersonNameUpdated(u), AggregateState::Person(a)) => {
            let made_primary = if let Some(name) = a.names.iter_mut().find(|n| n.id == u.id) {
                apply::apply_person_name(name, &u.changes)?;
                name.is_primary
            } else {
                false
            };
            if made_primary {
                for existing in a.names.iter_mut().filter(|n| n.id != u.id) {
                    existing.is_primary = false;
                }
            }
        }
        (PersonNameDeleted(d), AggregateState::Person(a)) => {
            remove_by_id(&mut a.names, d.id, |n| n.id);
        }
        (LifeEventCreated(e), AggregateState::Person(a)) => a.life_events.push(e.clone()),
        (LifeEventUpdated(u), AggregateState::Person(a)) => {
            if let Some(event) = a.life_events.iter_mut().find(|e| e.id == u.id) {
                apply::apply_life_event(event, &u.changes)?;
            }
        }
        (LifeEventDeleted(d), AggregateState::Person(a)) => {
            remove_by_id(&mut a.life_events, d.id, |e| e.id);
        }
        (AttributeCreated(at), AggregateState::Person(a)) => a.attributes.push(at.clone()),
        (AttributeUpdated(u), AggregateState::Person(a)) => {
            if let Some(attribute) = a.attributes.iter_mut().find(|x| x.id == u.id) {
                apply::apply_attribute(attribute, &u.changes)?;
            }
        }
        (AttributeDeleted(d), AggregateState::Person(a)) => {
            remove_by_id(&mut a.attributes, d.id, |x| x.id);
        }
        (AssociationCreated(assoc), AggregateState::Person(a)) => {
            a.associations.push(assoc.clone());
        }
        (AssociationUpdated(u), AggregateState::Person(a)) => {
            if let Some(association) = a.associations.iter_mut().find(|x| x.id == u.id) {
                apply::apply_association(association, &u.changes)?;
            }
        }
        (AssociationDeleted(d), AggregateState::Person(a)) => {
            remove_by_id(&mut a.associations, d.id, |x| x.id);
        }
        (LdsOrdinanceCreated(o), AggregateState::Person(a)) => a.ordinances.push(o.clone()),
        (LdsOrdinanceUpdated(u), AggregateState::Person(a)) => {
            if let Some(ordinance) = a.ordinances.iter_mut().find(|x| x.id == u.id) {
                apply::apply_lds_ordinance(ordinance, &u.changes)?;
            }
        }
        (LdsOrdinanceDeleted(d), AggregateState::Person(a)) => {
            remove_by_id(&mut a.ordinances, d.id, |x| x.id);
        }

        (FamilyUpdated(u), AggregateState::Family(a)) => {
            apply::apply_family(&mut a.family, &u.changes)?;
        }
        (FamilyChildAdded(c), AggregateState::Family(a)) => {
            remove_by_id(&mut a.children, c.id, |x| x.id);
            a.children.push(c.clone());
        }
        (FamilyChildRemoved(r), AggregateState::Family(a)) => {
            a.children.retain(|c| c.child_id != r.child_id);
        }
        (LifeEventCreated(e), AggregateState::Family(a)) => a.life_events.push(e.clone()),
        (LifeEventUpdated(u), AggregateState::Family(a)) => {
            if let Some(event) = a.life_events.iter_mut().find(|e| e.id == u.id) {
                apply::apply_life_event(event, &u.changes)?;
            }
        }
        (LifeEventDeleted(d), AggregateState::Family(a)) => {
            remove_by_id(&mut a.life_events, d.id, |e| e.id);
        }
        (LdsOrdinanceCreated(o), AggregateState::Family(a)) => a.ordinances.push(o.clone()),
        (LdsOrdinanceUpdated(u), AggregateState::Family(a)) => {
            if let Some(ordinance) = a.ordinances.iter_mut().find(|x| x.id == u.id) {
                apply::apply_lds_ordinance(ordinance, &u.changes)?;
            }
        }
        (LdsOrdinanceDeleted(d), AggregateState::Family(a)) => {
            remove_by_id(&mut a.ordinances, d.id, |x| x.id);
        }

        (SourceUpdated(u), AggregateState::Source(s)) => {
            apply::apply_source(s, &u.changes)?;
        }
        (RepositoryUpdated(u), AggregateState::Repository(r)) => {
            apply::apply_repository(r, &u.changes)?;
        }
        (CitationUpdated(u), AggregateState::Citation(c)) => {
            apply::apply_citation(c, &u.changes)?;
        }
        (MediaUpdated(u), AggregateState::Media(m)) => {
            apply::apply_media(m, &u.changes)?;
        }
        (NoteUpdated(u), AggregateState::Note(n)) => {
            apply::apply_note(n, &u.changes)?;
        }
        (SubmitterUpdated(u), AggregateState::Submitter(s)) => {
            apply::apply_submitter(s, &u.changes)?;
        }

        // An event of a kind foreign to this aggregate: corrupt stream.
        (event, _) => {
            return Err(GeneaError::Integrity(format!(
                "event {} on foreign stream",
                event.tag()
            )));
        }
    }
    Ok(())
}

fn set_version(state: &mut AggregateState, version: i64, at: chrono::DateTime<chrono::Utc>) {
    match state {
        AggregateState::Person(a) => {
            a.person.version = version;
            a.person.updated_at = at;
        }
        AggregateState::Family(a) => {
            a.family.version = version;
            a.family.updated_at = at;
        }
        AggregateState::Source(s) => {
            s.version = version;
            s.updated_at = at;
        }
        AggregateState::Repository(r) => {
            r.version = version;
            r.updated_at = at;
        }
        AggregateState::Citation(c) => {
            c.version = version;
            c.updated_at = at;
        }
        AggregateState::Media(m) => {
            m.version = version;
            m.updated_at = at;
        }
        AggregateState::Note(n) => {
            n.version = version;
            n.updated_at = at;
        }
        AggregateState::Submitter(s) => {
            s.version = version;
            s.updated_at = at;
        }
        AggregateState::Snapshot(_) => {}
    }
}

/// Fold a person stream; `None` when absent or deleted.
pub fn fold_person(
    events: &[RecordedEvent],
    up_to: Option<i64>,
) -> Result<Option<PersonAggregate>, GeneaError> {
    Ok(match fold(events, up_to)? {
        Some(AggregateState::Person(a)) => Some(*a),
        _ => None,
    })
}

/// Fold a family stream; `None` when absent or deleted.
pub fn fold_family(
    events: &[RecordedEvent],
    up_to: Option<i64>,
) -> Result<Option<FamilyAggregate>, GeneaError> {
    Ok(match fold(events, up_to)? {
        Some(AggregateState::Family(a)) => Some(*a),
        _ => None,
    })
}
