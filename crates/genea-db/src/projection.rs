//! The projection engine: applies domain events to the read model.
//!
//! `project` runs inside the same transaction as the event append (see
//! `store::SqlEventStore`), so read models stay in lockstep with the log.
//! Every handler is idempotent over its own event: saves are upserts and
//! deletes tolerate absent rows, so replaying an event converges on the
//! same state.
//!
//! Besides the direct row writes, the projection maintains the
//! denormalizations: primary-name scalars and search columns on `person`,
//! partner display names on `family`, and `citation_count` on `source`. It
//! also enforces the single-primary-name invariant as a projection
//! side-effect.

use sea_orm::{ConnectionTrait, DatabaseConnection, EntityTrait, TransactionTrait};
use tracing::{debug, info};
use uuid::Uuid;

use genea_core::GeneaError;
use genea_core::apply;
use genea_core::event::{DomainEvent, RecordedEvent};

use crate::entities;
use crate::repo::{
    AssociationRepo, AttributeRepo, CitationRepo, FamilyChildRepo, FamilyRepo, LdsOrdinanceRepo,
    LifeEventRepo, MediaRepo, NoteRepo, PersonNameRepo, PersonRepo, RepositoryRepo, SnapshotRepo,
    SourceRepo, SubmitterRepo,
    search::{build_search_text, soundex_codes},
};
use crate::store::EventStore;

/// Events replayed per batch during a rebuild.
const REBUILD_BATCH: u64 = 500;

/// Apply one recorded event to the read model.
pub async fn project<C: ConnectionTrait>(db: &C, rec: &RecordedEvent) -> Result<(), GeneaError> {
    match &rec.event {
        // ── Person aggregate ────────────────────────────────────────
        DomainEvent::PersonCreated(p) => {
            let mut person = p.clone();
            person.version = rec.version;
            PersonRepo::save(db, &person).await?;
            refresh_person_search(db, person.id).await?;
        }
        DomainEvent::PersonUpdated(u) => {
            if let Some(mut person) = PersonRepo::get(db, u.id).await? {
                apply::apply_person(&mut person, &u.changes)?;
                person.version = rec.version;
                person.updated_at = rec.occurred_at;
                PersonRepo::save(db, &person).await?;
                refresh_person_search(db, u.id).await?;
                refresh_families_of_partner(db, u.id).await?;
            }
        }
        DomainEvent::PersonDeleted(d) => {
            PersonNameRepo::delete_for_person(db, d.id).await?;
            LifeEventRepo::delete_for_owner(db, d.id).await?;
            AttributeRepo::delete_for_person(db, d.id).await?;
            AssociationRepo::delete_for_person(db, d.id).await?;
            LdsOrdinanceRepo::delete_for_owner(db, d.id).await?;
            PersonRepo::delete(db, d.id).await?;
        }
        DomainEvent::PersonNameCreated(n) => {
            PersonNameRepo::save(db, n, rec.occurred_at).await?;
            if n.is_primary {
                PersonNameRepo::clear_other_primaries(db, n.person_id, n.id).await?;
            }
            refresh_primary_name(db, n.person_id).await?;
            refresh_person_search(db, n.person_id).await?;
            refresh_families_of_partner(db, n.person_id).await?;
            touch_person(db, n.person_id, rec).await?;
        }
        DomainEvent::PersonNameUpdated(u) => {
            if let Some(mut name) = PersonNameRepo::get(db, u.id).await? {
                apply::apply_person_name(&mut name, &u.changes)?;
                PersonNameRepo::save(db, &name, rec.occurred_at).await?;
                if name.is_primary {
                    PersonNameRepo::clear_other_primaries(db, u.owner_id, u.id).await?;
                }
                refresh_primary_name(db, u.owner_id).await?;
                refresh_person_search(db, u.owner_id).await?;
                refresh_families_of_partner(db, u.owner_id).await?;
            }
            touch_person(db, u.owner_id, rec).await?;
        }
        DomainEvent::PersonNameDeleted(d) => {
            PersonNameRepo::delete(db, d.id).await?;
            refresh_primary_name(db, d.owner_id).await?;
            refresh_person_search(db, d.owner_id).await?;
            touch_person(db, d.owner_id, rec).await?;
        }

        // ── Family aggregate ────────────────────────────────────────
        DomainEvent::FamilyCreated(f) => {
            let mut family = f.clone();
            family.version = rec.version;
            FamilyRepo::save(db, &family).await?;
            refresh_partner_names(db, family.id).await?;
        }
        DomainEvent::FamilyUpdated(u) => {
            if let Some(mut family) = FamilyRepo::get(db, u.id).await? {
                apply::apply_family(&mut family, &u.changes)?;
                family.version = rec.version;
                family.updated_at = rec.occurred_at;
                FamilyRepo::save(db, &family).await?;
                refresh_partner_names(db, u.id).await?;
            }
        }
        DomainEvent::FamilyDeleted(d) => {
            FamilyChildRepo::delete_for_family(db, d.id).await?;
            LifeEventRepo::delete_for_owner(db, d.id).await?;
            LdsOrdinanceRepo::delete_for_owner(db, d.id).await?;
            FamilyRepo::delete(db, d.id).await?;
        }
        DomainEvent::FamilyChildAdded(c) => {
            FamilyChildRepo::save(db, c).await?;
            touch_family(db, c.family_id, rec).await?;
        }
        DomainEvent::FamilyChildRemoved(r) => {
            FamilyChildRepo::remove(db, r.family_id, r.child_id).await?;
            touch_family(db, r.family_id, rec).await?;
        }

        // ── Owner-scoped facts ──────────────────────────────────────
        DomainEvent::LifeEventCreated(e) => {
            LifeEventRepo::save(db, e, rec.occurred_at).await?;
            touch_owner(db, rec).await?;
        }
        DomainEvent::LifeEventUpdated(u) => {
            if let Some(mut event) = LifeEventRepo::get(db, u.id).await? {
                apply::apply_life_event(&mut event, &u.changes)?;
                LifeEventRepo::save(db, &event, rec.occurred_at).await?;
            }
            touch_owner(db, rec).await?;
        }
        DomainEvent::LifeEventDeleted(d) => {
            LifeEventRepo::delete(db, d.id).await?;
            touch_owner(db, rec).await?;
        }
        DomainEvent::AttributeCreated(a) => {
            AttributeRepo::save(db, a, rec.occurred_at).await?;
            touch_person(db, a.person_id, rec).await?;
        }
        DomainEvent::AttributeUpdated(u) => {
            if let Some(mut attribute) = AttributeRepo::get(db, u.id).await? {
                apply::apply_attribute(&mut attribute, &u.changes)?;
                AttributeRepo::save(db, &attribute, rec.occurred_at).await?;
            }
            touch_person(db, u.owner_id, rec).await?;
        }
        DomainEvent::AttributeDeleted(d) => {
            AttributeRepo::delete(db, d.id).await?;
            touch_person(db, d.owner_id, rec).await?;
        }
        DomainEvent::AssociationCreated(a) => {
            AssociationRepo::save(db, a, rec.occurred_at).await?;
            touch_person(db, a.person_id, rec).await?;
        }
        DomainEvent::AssociationUpdated(u) => {
            if let Some(mut association) = AssociationRepo::get(db, u.id).await? {
                apply::apply_association(&mut association, &u.changes)?;
                AssociationRepo::save(db, &association, rec.occurred_at).await?;
            }
            touch_person(db, u.owner_id, rec).await?;
        }
        DomainEvent::AssociationDeleted(d) => {
            AssociationRepo::delete(db, d.id).await?;
            touch_person(db, d.owner_id, rec).await?;
        }
        DomainEvent::LdsOrdinanceCreated(o) => {
            LdsOrdinanceRepo::save(db, o, rec.occurred_at).await?;
            touch_owner(db, rec).await?;
        }
        DomainEvent::LdsOrdinanceUpdated(u) => {
            if let Some(mut ordinance) = LdsOrdinanceRepo::get(db, u.id).await? {
                apply::apply_lds_ordinance(&mut ordinance, &u.changes)?;
                LdsOrdinanceRepo::save(db, &ordinance, rec.occurred_at).await?;
            }
            touch_owner(db, rec).await?;
        }
        DomainEvent::LdsOrdinanceDeleted(d) => {
            LdsOrdinanceRepo::delete(db, d.id).await?;
            touch_owner(db, rec).await?;
        }

        // ── Source / repository / citation ──────────────────────────
        DomainEvent::SourceCreated(s) => {
            let mut source = s.clone();
            source.version = rec.version;
            SourceRepo::save(db, &source).await?;
            refresh_citation_count(db, source.id).await?;
        }
        DomainEvent::SourceUpdated(u) => {
            if let Some(mut source) = SourceRepo::get(db, u.id).await? {
                apply::apply_source(&mut source, &u.changes)?;
                source.version = rec.version;
                source.updated_at = rec.occurred_at;
                SourceRepo::save(db, &source).await?;
            }
        }
        DomainEvent::SourceDeleted(d) => {
            SourceRepo::delete(db, d.id).await?;
        }
        DomainEvent::RepositoryCreated(r) => {
            let mut repository = r.clone();
            repository.version = rec.version;
            RepositoryRepo::save(db, &repository).await?;
        }
        DomainEvent::RepositoryUpdated(u) => {
            if let Some(mut repository) = RepositoryRepo::get(db, u.id).await? {
                apply::apply_repository(&mut repository, &u.changes)?;
                repository.version = rec.version;
                repository.updated_at = rec.occurred_at;
                RepositoryRepo::save(db, &repository).await?;
            }
        }
        DomainEvent::RepositoryDeleted(d) => {
            RepositoryRepo::delete(db, d.id).await?;
        }
        DomainEvent::CitationCreated(c) => {
            let mut citation = c.clone();
            citation.version = rec.version;
            CitationRepo::save(db, &citation).await?;
            refresh_citation_count(db, citation.source_id).await?;
        }
        DomainEvent::CitationUpdated(u) => {
            if let Some(mut citation) = CitationRepo::get(db, u.id).await? {
                apply::apply_citation(&mut citation, &u.changes)?;
                citation.version = rec.version;
                citation.updated_at = rec.occurred_at;
                CitationRepo::save(db, &citation).await?;
            }
        }
        DomainEvent::CitationDeleted(d) => {
            let source_id = CitationRepo::get(db, d.id).await?.map(|c| c.source_id);
            CitationRepo::delete(db, d.id).await?;
            if let Some(source_id) = source_id {
                refresh_citation_count(db, source_id).await?;
            }
        }

        // ── Media / note / submitter / snapshot ─────────────────────
        DomainEvent::MediaCreated(m) => {
            let mut media = m.clone();
            media.version = rec.version;
            MediaRepo::save(db, &media).await?;
        }
        DomainEvent::MediaUpdated(u) => {
            if let Some(mut media) = MediaRepo::get_with_data(db, u.id).await? {
                apply::apply_media(&mut media, &u.changes)?;
                media.version = rec.version;
                media.updated_at = rec.occurred_at;
                MediaRepo::save(db, &media).await?;
            }
        }
        DomainEvent::MediaDeleted(d) => {
            MediaRepo::delete(db, d.id).await?;
        }
        DomainEvent::NoteCreated(n) => {
            let mut note = n.clone();
            note.version = rec.version;
            NoteRepo::save(db, &note).await?;
        }
        DomainEvent::NoteUpdated(u) => {
            if let Some(mut note) = NoteRepo::get(db, u.id).await? {
                apply::apply_note(&mut note, &u.changes)?;
                note.version = rec.version;
                note.updated_at = rec.occurred_at;
                NoteRepo::save(db, &note).await?;
            }
        }
        DomainEvent::NoteDeleted(d) => {
            NoteRepo::delete(db, d.id).await?;
        }
        DomainEvent::SubmitterCreated(s) => {
            let mut submitter = s.clone();
            submitter.version = rec.version;
            SubmitterRepo::save(db, &submitter).await?;
        }
        DomainEvent::SubmitterUpdated(u) => {
            if let Some(mut submitter) = SubmitterRepo::get(db, u.id).await? {
                apply::apply_submitter(&mut submitter, &u.changes)?;
                submitter.version = rec.version;
                submitter.updated_at = rec.occurred_at;
                SubmitterRepo::save(db, &submitter).await?;
            }
        }
        DomainEvent::SubmitterDeleted(d) => {
            SubmitterRepo::delete(db, d.id).await?;
        }
        DomainEvent::SnapshotCreated(s) => {
            SnapshotRepo::save(db, s).await?;
        }
    }
    Ok(())
}

/// Set version and updated-at on a person row after a sub-resource event.
async fn touch_person<C: ConnectionTrait>(
    db: &C,
    person_id: Uuid,
    rec: &RecordedEvent,
) -> Result<(), GeneaError> {
    if let Some(mut person) = PersonRepo::get(db, person_id).await? {
        person.version = rec.version;
        person.updated_at = rec.occurred_at;
        PersonRepo::save(db, &person).await?;
        refresh_person_search(db, person_id).await?;
    }
    Ok(())
}

/// Set version and updated-at on a family row after a sub-resource event.
async fn touch_family<C: ConnectionTrait>(
    db: &C,
    family_id: Uuid,
    rec: &RecordedEvent,
) -> Result<(), GeneaError> {
    if let Some(mut family) = FamilyRepo::get(db, family_id).await? {
        family.version = rec.version;
        family.updated_at = rec.occurred_at;
        FamilyRepo::save(db, &family).await?;
        refresh_partner_names(db, family_id).await?;
    }
    Ok(())
}

/// Touch whichever aggregate owns the stream of this event.
async fn touch_owner<C: ConnectionTrait>(db: &C, rec: &RecordedEvent) -> Result<(), GeneaError> {
    match rec.stream_type {
        genea_core::event::StreamType::Person => {
            touch_person(db, rec.stream_id, rec).await
        }
        genea_core::event::StreamType::Family => {
            touch_family(db, rec.stream_id, rec).await
        }
        _ => Ok(()),
    }
}

/// Recompute the denormalized primary-name scalars from the name set.
/// Leaves the scalars alone when the person has no name rows.
async fn refresh_primary_name<C: ConnectionTrait>(
    db: &C,
    person_id: Uuid,
) -> Result<(), GeneaError> {
    let names = PersonNameRepo::for_person(db, person_id).await?;
    let Some(primary) = names.iter().find(|n| n.is_primary).or_else(|| names.first()) else {
        return Ok(());
    };
    PersonRepo::update_primary_name(db, person_id, primary.given.clone(), primary.surname.clone())
        .await
}

/// Recompute the person search columns from scalars, all names, and places.
async fn refresh_person_search<C: ConnectionTrait>(
    db: &C,
    person_id: Uuid,
) -> Result<(), GeneaError> {
    let Some(person) = PersonRepo::get(db, person_id).await? else {
        return Ok(());
    };
    let names = PersonNameRepo::for_person(db, person_id).await?;

    let mut parts: Vec<String> = Vec::new();
    if let Some(ref given) = person.given {
        parts.push(given.clone());
    }
    if let Some(ref surname) = person.surname {
        parts.push(surname.clone());
    }
    for name in &names {
        parts.push(name.display_name());
        if let Some(ref nickname) = name.nickname {
            parts.push(nickname.clone());
        }
    }
    if let Some(ref place) = person.birth_place {
        parts.push(place.name.clone());
    }
    if let Some(ref place) = person.death_place {
        parts.push(place.name.clone());
    }

    let search_text = build_search_text(parts.iter().map(String::as_str));
    let mut name_tokens: Vec<String> = Vec::new();
    if let Some(ref given) = person.given {
        name_tokens.push(given.clone());
    }
    if let Some(ref surname) = person.surname {
        name_tokens.push(surname.clone());
    }
    for name in &names {
        name_tokens.push(name.display_name());
    }
    let soundex = soundex_codes(&name_tokens.join(" "));

    PersonRepo::update_search_columns(db, person_id, search_text, soundex).await
}

/// Recompute the partner display names on one family row.
async fn refresh_partner_names<C: ConnectionTrait>(
    db: &C,
    family_id: Uuid,
) -> Result<(), GeneaError> {
    let Some(family) = FamilyRepo::get(db, family_id).await? else {
        return Ok(());
    };
    let partner1_name = match family.partner1_id {
        Some(id) => PersonRepo::get(db, id).await?.map(|p| p.display_name()),
        None => None,
    };
    let partner2_name = match family.partner2_id {
        Some(id) => PersonRepo::get(db, id).await?.map(|p| p.display_name()),
        None => None,
    };
    FamilyRepo::update_partner_names(db, family_id, partner1_name, partner2_name).await
}

/// Refresh partner names on every family this person partners in.
async fn refresh_families_of_partner<C: ConnectionTrait>(
    db: &C,
    person_id: Uuid,
) -> Result<(), GeneaError> {
    for family in FamilyRepo::for_partner(db, person_id).await? {
        refresh_partner_names(db, family.id).await?;
    }
    Ok(())
}

/// Recompute `citation_count` on a source row.
async fn refresh_citation_count<C: ConnectionTrait>(
    db: &C,
    source_id: Uuid,
) -> Result<(), GeneaError> {
    let count = CitationRepo::count_for_source(db, source_id).await?;
    SourceRepo::set_citation_count(db, source_id, count as i64).await
}

/// Replay the full global log against an empty read model.
///
/// Events are read into memory first (the log is append-only), then the
/// read-model tables are wiped and every event is replayed inside one
/// transaction. Returns the number of events replayed.
pub async fn rebuild(
    db: &DatabaseConnection,
    store: &dyn EventStore,
) -> Result<u64, GeneaError> {
    let mut events: Vec<RecordedEvent> = Vec::new();
    let mut position = 0;
    loop {
        let batch = store.read_all(position, REBUILD_BATCH).await?;
        let Some(last) = batch.last() else {
            break;
        };
        position = last.position;
        events.extend(batch);
    }

    let txn = db
        .begin()
        .await
        .map_err(|e| GeneaError::Backend(e.to_string()))?;

    wipe_read_model(&txn).await?;
    let mut replayed = 0u64;
    for rec in &events {
        project(&txn, rec).await?;
        replayed += 1;
    }

    txn.commit()
        .await
        .map_err(|e| GeneaError::Backend(e.to_string()))?;
    info!(replayed, "read model rebuilt");
    Ok(replayed)
}

/// Delete every read-model row. Child tables go first.
async fn wipe_read_model<C: ConnectionTrait>(db: &C) -> Result<(), GeneaError> {
    macro_rules! wipe {
        ($entity:path) => {
            <$entity>::delete_many()
                .exec(db)
                .await
                .map_err(|e| GeneaError::Backend(e.to_string()))?;
        };
    }
    wipe!(entities::person_name::Entity);
    wipe!(entities::family_child::Entity);
    wipe!(entities::life_event::Entity);
    wipe!(entities::attribute::Entity);
    wipe!(entities::association::Entity);
    wipe!(entities::lds_ordinance::Entity);
    wipe!(entities::citation::Entity);
    wipe!(entities::media::Entity);
    wipe!(entities::note::Entity);
    wipe!(entities::submitter::Entity);
    wipe!(entities::snapshot::Entity);
    wipe!(entities::source::Entity);
    wipe!(entities::repository::Entity);
    wipe!(entities::family::Entity);
    wipe!(entities::person::Entity);
    debug!("read model wiped");
    Ok(())
}
