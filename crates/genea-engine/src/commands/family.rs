//! Family commands, including the ordered children sub-resource.

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use genea_core::GeneaError;
use genea_core::enums::RelationshipType;
use genea_core::event::{ChildRemoved, Changes, Deleted, DomainEvent, StreamType, Updated};
use genea_core::gendate::GenDate;
use genea_core::types::{Family, FamilyChild, Place};
use genea_db::store::EventStore;

use crate::fold;

use super::{append_one, read_existing_stream};

/// Input for creating a family.
#[derive(Debug, Clone, Default)]
pub struct CreateFamily {
    pub xref: Option<String>,
    pub partner1_id: Option<Uuid>,
    pub partner2_id: Option<Uuid>,
    pub relationship_type: Option<RelationshipType>,
    pub marriage_date: Option<GenDate>,
    pub marriage_place: Option<Place>,
}

pub struct FamilyCommands;

impl FamilyCommands {
    pub async fn create(
        store: &dyn EventStore,
        input: CreateFamily,
    ) -> Result<Family, GeneaError> {
        let now = Utc::now();
        let family = Family {
            id: Uuid::now_v7(),
            xref: input.xref,
            partner1_id: input.partner1_id,
            partner2_id: input.partner2_id,
            relationship_type: input.relationship_type.unwrap_or(RelationshipType::Unknown),
            marriage_date: input.marriage_date,
            marriage_place: input.marriage_place,
            version: 1,
            created_at: now,
            updated_at: now,
        };
        family.validate()?;
        append_one(
            store,
            family.id,
            StreamType::Family,
            DomainEvent::FamilyCreated(family.clone()),
            0,
            now,
        )
        .await?;
        info!(family_id = %family.id, "family created");
        Ok(family)
    }

    pub async fn update(
        store: &dyn EventStore,
        id: Uuid,
        changes: Changes,
        expected_version: Option<i64>,
    ) -> Result<i64, GeneaError> {
        let events = read_existing_stream(store, id, "Family").await?;
        let state = fold::fold_family(&events, None)?.ok_or(GeneaError::NotFound {
            entity: "Family",
            id,
        })?;

        let mut preview = state.family.clone();
        genea_core::apply::apply_family(&mut preview, &changes)?;
        preview.validate()?;

        let expected = expected_version.unwrap_or(state.family.version);
        append_one(
            store,
            id,
            StreamType::Family,
            DomainEvent::FamilyUpdated(Updated { id, changes }),
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
        let events = read_existing_stream(store, id, "Family").await?;
        let state = fold::fold_family(&events, None)?.ok_or(GeneaError::NotFound {
            entity: "Family",
            id,
        })?;
        let expected = expected_version.unwrap_or(state.family.version);
        append_one(
            store,
            id,
            StreamType::Family,
            DomainEvent::FamilyDeleted(Deleted { id }),
            expected,
            Utc::now(),
        )
        .await
    }

    /// Add a child; `child_id` must not already belong to the family.
    pub async fn add_child(
        store: &dyn EventStore,
        mut child: FamilyChild,
        expected_version: Option<i64>,
    ) -> Result<(FamilyChild, i64), GeneaError> {
        if child.id.is_nil() {
            child.id = Uuid::now_v7();
        }
        child.validate()?;
        let events = read_existing_stream(store, child.family_id, "Family").await?;
        let state = fold::fold_family(&events, None)?.ok_or(GeneaError::NotFound {
            entity: "Family",
            id: child.family_id,
        })?;
        if state.children.iter().any(|c| c.child_id == child.child_id) {
            return Err(GeneaError::Integrity(format!(
                "person {} is already a child of family {}",
                child.child_id, child.family_id
            )));
        }
        if child.sequence == 0 && !state.children.is_empty() {
            child.sequence = state
                .children
                .iter()
                .map(|c| c.sequence)
                .max()
                .unwrap_or(0)
                + 1;
        }
        let expected = expected_version.unwrap_or(state.family.version);
        let version = append_one(
            store,
            child.family_id,
            StreamType::Family,
            DomainEvent::FamilyChildAdded(child.clone()),
            expected,
            Utc::now(),
        )
        .await?;
        Ok((child, version))
    }

    pub async fn remove_child(
        store: &dyn EventStore,
        family_id: Uuid,
        child_id: Uuid,
        expected_version: Option<i64>,
    ) -> Result<i64, GeneaError> {
        let events = read_existing_stream(store, family_id, "Family").await?;
        let state = fold::fold_family(&events, None)?.ok_or(GeneaError::NotFound {
            entity: "Family",
            id: family_id,
        })?;
        if !state.children.iter().any(|c| c.child_id == child_id) {
            return Err(GeneaError::NotFound {
                entity: "FamilyChild",
                id: child_id,
            });
        }
        let expected = expected_version.unwrap_or(state.family.version);
        append_one(
            store,
            family_id,
            StreamType::Family,
            DomainEvent::FamilyChildRemoved(ChildRemoved {
                family_id,
                child_id,
            }),
            expected,
            Utc::now(),
        )
        .await
    }
}
