//! Repository for `Snapshot` rows. Snapshots are immutable markers: they are
//! inserted once and never updated or deleted.

use genea_core::GeneaError;
use genea_core::types::Snapshot;
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ActiveValue::Set, ConnectionTrait, QueryOrder};
use uuid::Uuid;

use crate::entities::snapshot::{self, ActiveModel, Column, Entity};
use crate::repo::backend;

pub struct SnapshotRepo;

impl SnapshotRepo {
    pub async fn get<C: ConnectionTrait>(
        db: &C,
        id: Uuid,
    ) -> Result<Option<Snapshot>, GeneaError> {
        Ok(Entity::find_by_id(id)
            .one(db)
            .await
            .map_err(backend)?
            .map(into_domain))
    }

    pub async fn save<C: ConnectionTrait>(db: &C, s: &Snapshot) -> Result<(), GeneaError> {
        let active = ActiveModel {
            id: Set(s.id),
            name: Set(s.name.clone()),
            description: Set(s.description.clone()),
            position: Set(s.position),
            created_at: Set(s.created_at),
        };
        // Replaying a snapshot_created event must stay idempotent.
        Entity::insert(active)
            .on_conflict(OnConflict::column(Column::Id).do_nothing().to_owned())
            .exec_without_returning(db)
            .await
            .map_err(backend)?;
        Ok(())
    }

    /// All snapshots, oldest log position first.
    pub async fn list<C: ConnectionTrait>(db: &C) -> Result<Vec<Snapshot>, GeneaError> {
        let models = Entity::find()
            .order_by_asc(Column::Position)
            .order_by_asc(Column::CreatedAt)
            .all(db)
            .await
            .map_err(backend)?;
        Ok(models.into_iter().map(into_domain).collect())
    }
}

fn into_domain(m: snapshot::Model) -> Snapshot {
    Snapshot {
        id: m.id,
        name: m.name,
        description: m.description,
        position: m.position,
        created_at: m.created_at,
    }
}
