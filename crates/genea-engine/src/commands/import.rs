//! GEDCOM import fan-out.
//!
//! The parsed file arrives as plain domain entities. Every target stream is
//! new, so the whole import is appended through the store's multi-stream
//! entry point and commits (or rolls back) as one transaction, projection
//! included.

use chrono::Utc;
use tracing::info;

use genea_core::GeneaError;
use genea_core::enums::FactOwnerKind;
use genea_core::event::{DomainEvent, EventEnvelope, StreamType};
use genea_db::store::{AppendBatch, EventStore};
use genea_gedcom::ImportResult;

/// Counts and diagnostics returned to the caller after an import.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct ImportSummary {
    pub vendor: Option<String>,
    pub persons: usize,
    pub families: usize,
    pub repositories: usize,
    pub sources: usize,
    pub citations: usize,
    pub life_events: usize,
    pub media: usize,
    pub notes: usize,
    pub submitters: usize,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

pub struct ImportCommands;

impl ImportCommands {
    /// Persist a parsed GEDCOM file as creation events.
    pub async fn persist(
        store: &dyn EventStore,
        result: &ImportResult,
    ) -> Result<ImportSummary, GeneaError> {
        let now = Utc::now();
        let mut batches: Vec<AppendBatch> = Vec::new();

        // Repositories and sources first: citations refer to them in the
        // read model the moment they project.
        for repository in &result.repositories {
            batches.push(AppendBatch {
                stream_id: repository.id,
                stream_type: StreamType::Repository,
                expected_version: 0,
                events: vec![EventEnvelope::new(
                    now,
                    DomainEvent::RepositoryCreated(repository.clone()),
                )],
            });
        }
        for source in &result.sources {
            batches.push(AppendBatch {
                stream_id: source.id,
                stream_type: StreamType::Source,
                expected_version: 0,
                events: vec![EventEnvelope::new(
                    now,
                    DomainEvent::SourceCreated(source.clone()),
                )],
            });
        }

        // One batch per person stream: the creation plus every owned
        // sub-resource, in one contiguous version run.
        for person in &result.persons {
            let mut events = vec![EventEnvelope::new(
                now,
                DomainEvent::PersonCreated(person.clone()),
            )];
            for name in result.person_names.iter().filter(|n| n.person_id == person.id) {
                events.push(EventEnvelope::new(
                    now,
                    DomainEvent::PersonNameCreated(name.clone()),
                ));
            }
            for event in result
                .life_events
                .iter()
                .filter(|e| e.owner_kind == FactOwnerKind::Person && e.owner_id == person.id)
            {
                events.push(EventEnvelope::new(
                    now,
                    DomainEvent::LifeEventCreated(event.clone()),
                ));
            }
            for attribute in result.attributes.iter().filter(|a| a.person_id == person.id) {
                events.push(EventEnvelope::new(
                    now,
                    DomainEvent::AttributeCreated(attribute.clone()),
                ));
            }
            for association in result
                .associations
                .iter()
                .filter(|a| a.person_id == person.id)
            {
                events.push(EventEnvelope::new(
                    now,
                    DomainEvent::AssociationCreated(association.clone()),
                ));
            }
            for ordinance in result
                .ordinances
                .iter()
                .filter(|o| o.owner_kind == FactOwnerKind::Person && o.owner_id == person.id)
            {
                events.push(EventEnvelope::new(
                    now,
                    DomainEvent::LdsOrdinanceCreated(ordinance.clone()),
                ));
            }
            batches.push(AppendBatch {
                stream_id: person.id,
                stream_type: StreamType::Person,
                expected_version: 0,
                events,
            });
        }

        for family in &result.families {
            let mut events = vec![EventEnvelope::new(
                now,
                DomainEvent::FamilyCreated(family.clone()),
            )];
            for child in result
                .family_children
                .iter()
                .filter(|c| c.family_id == family.id)
            {
                events.push(EventEnvelope::new(
                    now,
                    DomainEvent::FamilyChildAdded(child.clone()),
                ));
            }
            for event in result
                .life_events
                .iter()
                .filter(|e| e.owner_kind == FactOwnerKind::Family && e.owner_id == family.id)
            {
                events.push(EventEnvelope::new(
                    now,
                    DomainEvent::LifeEventCreated(event.clone()),
                ));
            }
            for ordinance in result
                .ordinances
                .iter()
                .filter(|o| o.owner_kind == FactOwnerKind::Family && o.owner_id == family.id)
            {
                events.push(EventEnvelope::new(
                    now,
                    DomainEvent::LdsOrdinanceCreated(ordinance.clone()),
                ));
            }
            batches.push(AppendBatch {
                stream_id: family.id,
                stream_type: StreamType::Family,
                expected_version: 0,
                events,
            });
        }

        for citation in &result.citations {
            batches.push(AppendBatch {
                stream_id: citation.id,
                stream_type: StreamType::Citation,
                expected_version: 0,
                events: vec![EventEnvelope::new(
                    now,
                    DomainEvent::CitationCreated(citation.clone()),
                )],
            });
        }
        for media in &result.media {
            batches.push(AppendBatch {
                stream_id: media.id,
                stream_type: StreamType::Media,
                expected_version: 0,
                events: vec![EventEnvelope::new(
                    now,
                    DomainEvent::MediaCreated(media.clone()),
                )],
            });
        }
        for note in &result.notes {
            batches.push(AppendBatch {
                stream_id: note.id,
                stream_type: StreamType::Note,
                expected_version: 0,
                events: vec![EventEnvelope::new(
                    now,
                    DomainEvent::NoteCreated(note.clone()),
                )],
            });
        }
        for submitter in &result.submitters {
            batches.push(AppendBatch {
                stream_id: submitter.id,
                stream_type: StreamType::Submitter,
                expected_version: 0,
                events: vec![EventEnvelope::new(
                    now,
                    DomainEvent::SubmitterCreated(submitter.clone()),
                )],
            });
        }

        store.append_many(batches).await?;

        let summary = ImportSummary {
            vendor: result.vendor.clone(),
            persons: result.persons.len(),
            families: result.families.len(),
            repositories: result.repositories.len(),
            sources: result.sources.len(),
            citations: result.citations.len(),
            life_events: result.life_events.len(),
            media: result.media.len(),
            notes: result.notes.len(),
            submitters: result.submitters.len(),
            warnings: result.warnings.clone(),
            errors: result.errors.clone(),
        };
        info!(
            persons = summary.persons,
            families = summary.families,
            warnings = summary.warnings.len(),
            "GEDCOM import persisted"
        );
        Ok(summary)
    }
}
