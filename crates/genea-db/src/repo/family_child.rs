//! Repository for `FamilyChild` rows (the family ↔ child join).

use genea_core::GeneaError;
use genea_core::types::FamilyChild;
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ActiveValue::Set, ConnectionTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::entities::family_child::{self, ActiveModel, Column, Entity};
use crate::entities::sea_enums;
use crate::repo::backend;

pub struct FamilyChildRepo;

impl FamilyChildRepo {
    pub async fn get<C: ConnectionTrait>(
        db: &C,
        id: Uuid,
    ) -> Result<Option<FamilyChild>, GeneaError> {
        Ok(Entity::find_by_id(id)
            .one(db)
            .await
            .map_err(backend)?
            .map(into_domain))
    }

    /// Children of a family in sequence order.
    pub async fn children_of<C: ConnectionTrait>(
        db: &C,
        family_id: Uuid,
    ) -> Result<Vec<FamilyChild>, GeneaError> {
        let models = Entity::find()
            .filter(Column::FamilyId.eq(family_id))
            .order_by_asc(Column::Sequence)
            .order_by_asc(Column::Id)
            .all(db)
            .await
            .map_err(backend)?;
        Ok(models.into_iter().map(into_domain).collect())
    }

    /// Memberships of one person as a child.
    pub async fn families_of_child<C: ConnectionTrait>(
        db: &C,
        child_id: Uuid,
    ) -> Result<Vec<FamilyChild>, GeneaError> {
        let models = Entity::find()
            .filter(Column::ChildId.eq(child_id))
            .all(db)
            .await
            .map_err(backend)?;
        Ok(models.into_iter().map(into_domain).collect())
    }

    pub async fn save<C: ConnectionTrait>(db: &C, child: &FamilyChild) -> Result<(), GeneaError> {
        let active = ActiveModel {
            id: Set(child.id),
            family_id: Set(child.family_id),
            child_id: Set(child.child_id),
            relationship: Set(sea_enums::ChildRelationship::from(child.relationship)),
            sequence: Set(child.sequence),
        };
        Entity::insert(active)
            .on_conflict(
                OnConflict::column(Column::Id)
                    .update_columns([Column::Relationship, Column::Sequence])
                    .to_owned(),
            )
            .exec(db)
            .await
            .map_err(backend)?;
        Ok(())
    }

    /// Remove one child from one family.
    pub async fn remove<C: ConnectionTrait>(
        db: &C,
        family_id: Uuid,
        child_id: Uuid,
    ) -> Result<(), GeneaError> {
        Entity::delete_many()
            .filter(Column::FamilyId.eq(family_id))
            .filter(Column::ChildId.eq(child_id))
            .exec(db)
            .await
            .map_err(backend)?;
        Ok(())
    }

    pub async fn delete_for_family<C: ConnectionTrait>(
        db: &C,
        family_id: Uuid,
    ) -> Result<(), GeneaError> {
        Entity::delete_many()
            .filter(Column::FamilyId.eq(family_id))
            .exec(db)
            .await
            .map_err(backend)?;
        Ok(())
    }

    pub async fn list_all<C: ConnectionTrait>(db: &C) -> Result<Vec<FamilyChild>, GeneaError> {
        let models = Entity::find()
            .order_by_asc(Column::Id)
            .all(db)
            .await
            .map_err(backend)?;
        Ok(models.into_iter().map(into_domain).collect())
    }
}

fn into_domain(m: family_child::Model) -> FamilyChild {
    FamilyChild {
        id: m.id,
        family_id: m.family_id,
        child_id: m.child_id,
        relationship: m.relationship.into(),
        sequence: m.sequence,
    }
}
