//! Repository for `Repository` rows (archives holding sources).

use genea_core::GeneaError;
use genea_core::types::{ListOptions, Page, Repository, SortOrder};
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveValue::Set, ConnectionTrait, Order, PaginatorTrait, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use crate::entities::repository::{self, ActiveModel, Column, Entity};
use crate::repo::{backend, from_json_opt, to_json_opt};

pub struct RepositoryRepo;

impl RepositoryRepo {
    pub async fn get<C: ConnectionTrait>(
        db: &C,
        id: Uuid,
    ) -> Result<Option<Repository>, GeneaError> {
        Ok(Entity::find_by_id(id)
            .one(db)
            .await
            .map_err(backend)?
            .map(into_domain))
    }

    pub async fn save<C: ConnectionTrait>(db: &C, repo: &Repository) -> Result<(), GeneaError> {
        let active = ActiveModel {
            id: Set(repo.id),
            xref: Set(repo.xref.clone()),
            name: Set(repo.name.clone()),
            address: Set(to_json_opt(&repo.address)),
            phone: Set(repo.phone.clone()),
            email: Set(repo.email.clone()),
            website: Set(repo.website.clone()),
            version: Set(repo.version),
            created_at: Set(repo.created_at),
            updated_at: Set(repo.updated_at),
        };
        Entity::insert(active)
            .on_conflict(
                OnConflict::column(Column::Id)
                    .update_columns([
                        Column::Xref,
                        Column::Name,
                        Column::Address,
                        Column::Phone,
                        Column::Email,
                        Column::Website,
                        Column::Version,
                        Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec(db)
            .await
            .map_err(backend)?;
        Ok(())
    }

    pub async fn delete<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<(), GeneaError> {
        Entity::delete_by_id(id).exec(db).await.map_err(backend)?;
        Ok(())
    }

    pub async fn list<C: ConnectionTrait>(
        db: &C,
        opts: &ListOptions,
    ) -> Result<Page<Repository>, GeneaError> {
        let order = match opts.order {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        };
        let query = Entity::find();
        let total = PaginatorTrait::count(query.clone(), db)
            .await
            .map_err(backend)? as u64;
        let models = query
            .order_by(Column::Name, order)
            .order_by(Column::Id, Order::Asc)
            .limit(opts.clamped_limit())
            .offset(opts.offset())
            .all(db)
            .await
            .map_err(backend)?;
        Ok(Page {
            items: models.into_iter().map(into_domain).collect(),
            total,
            limit: opts.clamped_limit(),
            offset: opts.offset(),
        })
    }

    pub async fn list_all<C: ConnectionTrait>(db: &C) -> Result<Vec<Repository>, GeneaError> {
        let models = Entity::find()
            .order_by_asc(Column::Id)
            .all(db)
            .await
            .map_err(backend)?;
        Ok(models.into_iter().map(into_domain).collect())
    }

    pub async fn count<C: ConnectionTrait>(db: &C) -> Result<u64, GeneaError> {
        Ok(Entity::find().count(db).await.map_err(backend)?)
    }
}

fn into_domain(m: repository::Model) -> Repository {
    Repository {
        id: m.id,
        xref: m.xref,
        name: m.name,
        address: from_json_opt(m.address),
        phone: m.phone,
        email: m.email,
        website: m.website,
        version: m.version,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}
