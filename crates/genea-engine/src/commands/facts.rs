//! Commands for owner-scoped facts: life events, attributes, associations,
//! and LDS ordinances. Each rides its owner's stream (Person or Family) and
//! bumps that aggregate's version.

use chrono::Utc;
use uuid::Uuid;

use genea_core::GeneaError;
use genea_core::enums::FactOwnerKind;
use genea_core::event::{Changes, DomainEvent, OwnedDeleted, OwnedUpdated, StreamType};
use genea_core::types::{Association, Attribute, LdsOrdinance, LifeEvent};
use genea_db::store::EventStore;

use super::{append_one, read_existing_stream};

fn stream_of(owner_kind: FactOwnerKind) -> StreamType {
    match owner_kind {
        FactOwnerKind::Person => StreamType::Person,
        FactOwnerKind::Family => StreamType::Family,
    }
}

fn owner_entity(owner_kind: FactOwnerKind) -> &'static str {
    match owner_kind {
        FactOwnerKind::Person => "Person",
        FactOwnerKind::Family => "Family",
    }
}

async fn owner_version(
    store: &dyn EventStore,
    owner_kind: FactOwnerKind,
    owner_id: Uuid,
    expected_version: Option<i64>,
) -> Result<i64, GeneaError> {
    let events = read_existing_stream(store, owner_id, owner_entity(owner_kind)).await?;
    match expected_version {
        Some(v) => Ok(v),
        None => Ok(events.last().map(|e| e.version).unwrap_or(0)),
    }
}

pub struct FactCommands;

impl FactCommands {
    // ── Life events ─────────────────────────────────────────────────

    pub async fn add_life_event(
        store: &dyn EventStore,
        mut event: LifeEvent,
        expected_version: Option<i64>,
    ) -> Result<(LifeEvent, i64), GeneaError> {
        if event.id.is_nil() {
            event.id = Uuid::now_v7();
        }
        event.validate()?;
        let expected =
            owner_version(store, event.owner_kind, event.owner_id, expected_version).await?;
        let version = append_one(
            store,
            event.owner_id,
            stream_of(event.owner_kind),
            DomainEvent::LifeEventCreated(event.clone()),
            expected,
            Utc::now(),
        )
        .await?;
        Ok((event, version))
    }

    pub async fn update_life_event(
        store: &dyn EventStore,
        owner_kind: FactOwnerKind,
        owner_id: Uuid,
        event_id: Uuid,
        changes: Changes,
        expected_version: Option<i64>,
    ) -> Result<i64, GeneaError> {
        let expected = owner_version(store, owner_kind, owner_id, expected_version).await?;
        append_one(
            store,
            owner_id,
            stream_of(owner_kind),
            DomainEvent::LifeEventUpdated(OwnedUpdated {
                owner_id,
                id: event_id,
                changes,
            }),
            expected,
            Utc::now(),
        )
        .await
    }

    pub async fn delete_life_event(
        store: &dyn EventStore,
        owner_kind: FactOwnerKind,
        owner_id: Uuid,
        event_id: Uuid,
        expected_version: Option<i64>,
    ) -> Result<i64, GeneaError> {
        let expected = owner_version(store, owner_kind, owner_id, expected_version).await?;
        append_one(
            store,
            owner_id,
            stream_of(owner_kind),
            DomainEvent::LifeEventDeleted(OwnedDeleted {
                owner_id,
                id: event_id,
            }),
            expected,
            Utc::now(),
        )
        .await
    }

    // ── Attributes (person only) ────────────────────────────────────

    pub async fn add_attribute(
        store: &dyn EventStore,
        mut attribute: Attribute,
        expected_version: Option<i64>,
    ) -> Result<(Attribute, i64), GeneaError> {
        if attribute.id.is_nil() {
            attribute.id = Uuid::now_v7();
        }
        attribute.validate()?;
        let expected = owner_version(
            store,
            FactOwnerKind::Person,
            attribute.person_id,
            expected_version,
        )
        .await?;
        let version = append_one(
            store,
            attribute.person_id,
            StreamType::Person,
            DomainEvent::AttributeCreated(attribute.clone()),
            expected,
            Utc::now(),
        )
        .await?;
        Ok((attribute, version))
    }

    pub async fn update_attribute(
        store: &dyn EventStore,
        person_id: Uuid,
        attribute_id: Uuid,
        changes: Changes,
        expected_version: Option<i64>,
    ) -> Result<i64, GeneaError> {
        let expected =
            owner_version(store, FactOwnerKind::Person, person_id, expected_version).await?;
        append_one(
            store,
            person_id,
            StreamType::Person,
            DomainEvent::AttributeUpdated(OwnedUpdated {
                owner_id: person_id,
                id: attribute_id,
                changes,
            }),
            expected,
            Utc::now(),
        )
        .await
    }

    pub async fn delete_attribute(
        store: &dyn EventStore,
        person_id: Uuid,
        attribute_id: Uuid,
        expected_version: Option<i64>,
    ) -> Result<i64, GeneaError> {
        let expected =
            owner_version(store, FactOwnerKind::Person, person_id, expected_version).await?;
        append_one(
            store,
            person_id,
            StreamType::Person,
            DomainEvent::AttributeDeleted(OwnedDeleted {
                owner_id: person_id,
                id: attribute_id,
            }),
            expected,
            Utc::now(),
        )
        .await
    }

    // ── Associations (person only) ──────────────────────────────────

    pub async fn add_association(
        store: &dyn EventStore,
        mut association: Association,
        expected_version: Option<i64>,
    ) -> Result<(Association, i64), GeneaError> {
        if association.id.is_nil() {
            association.id = Uuid::now_v7();
        }
        association.validate()?;
        let expected = owner_version(
            store,
            FactOwnerKind::Person,
            association.person_id,
            expected_version,
        )
        .await?;
        let version = append_one(
            store,
            association.person_id,
            StreamType::Person,
            DomainEvent::AssociationCreated(association.clone()),
            expected,
            Utc::now(),
        )
        .await?;
        Ok((association, version))
    }

    pub async fn delete_association(
        store: &dyn EventStore,
        person_id: Uuid,
        association_id: Uuid,
        expected_version: Option<i64>,
    ) -> Result<i64, GeneaError> {
        let expected =
            owner_version(store, FactOwnerKind::Person, person_id, expected_version).await?;
        append_one(
            store,
            person_id,
            StreamType::Person,
            DomainEvent::AssociationDeleted(OwnedDeleted {
                owner_id: person_id,
                id: association_id,
            }),
            expected,
            Utc::now(),
        )
        .await
    }

    // ── LDS ordinances ──────────────────────────────────────────────

    pub async fn add_ordinance(
        store: &dyn EventStore,
        mut ordinance: LdsOrdinance,
        expected_version: Option<i64>,
    ) -> Result<(LdsOrdinance, i64), GeneaError> {
        if ordinance.id.is_nil() {
            ordinance.id = Uuid::now_v7();
        }
        ordinance.validate()?;
        let expected = owner_version(
            store,
            ordinance.owner_kind,
            ordinance.owner_id,
            expected_version,
        )
        .await?;
        let version = append_one(
            store,
            ordinance.owner_id,
            stream_of(ordinance.owner_kind),
            DomainEvent::LdsOrdinanceCreated(ordinance.clone()),
            expected,
            Utc::now(),
        )
        .await?;
        Ok((ordinance, version))
    }

    pub async fn update_ordinance(
        store: &dyn EventStore,
        owner_kind: FactOwnerKind,
        owner_id: Uuid,
        ordinance_id: Uuid,
        changes: Changes,
        expected_version: Option<i64>,
    ) -> Result<i64, GeneaError> {
        let expected = owner_version(store, owner_kind, owner_id, expected_version).await?;
        append_one(
            store,
            owner_id,
            stream_of(owner_kind),
            DomainEvent::LdsOrdinanceUpdated(OwnedUpdated {
                owner_id,
                id: ordinance_id,
                changes,
            }),
            expected,
            Utc::now(),
        )
        .await
    }

    pub async fn delete_ordinance(
        store: &dyn EventStore,
        owner_kind: FactOwnerKind,
        owner_id: Uuid,
        ordinance_id: Uuid,
        expected_version: Option<i64>,
    ) -> Result<i64, GeneaError> {
        let expected = owner_version(store, owner_kind, owner_id, expected_version).await?;
        append_one(
            store,
            owner_id,
            stream_of(owner_kind),
            DomainEvent::LdsOrdinanceDeleted(OwnedDeleted {
                owner_id,
                id: ordinance_id,
            }),
            expected,
            Utc::now(),
        )
        .await
    }
}
