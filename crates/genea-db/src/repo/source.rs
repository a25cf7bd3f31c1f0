//! Repository for `Source` rows.

use genea_core::GeneaError;
use genea_core::types::{ListOptions, Page, SortOrder, Source};
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ActiveValue::Set, ConnectionTrait, Order, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use uuid::Uuid;

use crate::entities::sea_enums;
use crate::entities::source::{self, ActiveModel, Column, Entity};
use crate::repo::backend;

pub struct SourceRepo;

impl SourceRepo {
    pub async fn get<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<Option<Source>, GeneaError> {
        Ok(Entity::find_by_id(id)
            .one(db)
            .await
            .map_err(backend)?
            .map(into_domain))
    }

    pub async fn save<C: ConnectionTrait>(db: &C, src: &Source) -> Result<(), GeneaError> {
        let active = ActiveModel {
            id: Set(src.id),
            xref: Set(src.xref.clone()),
            source_type: Set(sea_enums::SourceType::from(src.source_type)),
            title: Set(src.title.clone()),
            author: Set(src.author.clone()),
            publisher: Set(src.publisher.clone()),
            publish_date: Set(src.publish_date.clone()),
            url: Set(src.url.clone()),
            repository_id: Set(src.repository_id),
            repository_name: Set(src.repository_name.clone()),
            call_number: Set(src.call_number.clone()),
            notes: Set(src.notes.clone()),
            // Maintained by the projection from citation events.
            citation_count: Set(0),
            version: Set(src.version),
            created_at: Set(src.created_at),
            updated_at: Set(src.updated_at),
        };
        Entity::insert(active)
            .on_conflict(
                OnConflict::column(Column::Id)
                    .update_columns([
                        Column::Xref,
                        Column::SourceType,
                        Column::Title,
                        Column::Author,
                        Column::Publisher,
                        Column::PublishDate,
                        Column::Url,
                        Column::RepositoryId,
                        Column::RepositoryName,
                        Column::CallNumber,
                        Column::Notes,
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

    pub async fn set_citation_count<C: ConnectionTrait>(
        db: &C,
        id: Uuid,
        count: i64,
    ) -> Result<(), GeneaError> {
        Entity::update_many()
            .col_expr(Column::CitationCount, Expr::value(count))
            .filter(Column::Id.eq(id))
            .exec(db)
            .await
            .map_err(backend)?;
        Ok(())
    }

    /// Paginated source list. Sort whitelist: `title`, `author`,
    /// `created_at`, `updated_at`, `citation_count`.
    pub async fn list<C: ConnectionTrait>(
        db: &C,
        opts: &ListOptions,
    ) -> Result<Page<Source>, GeneaError> {
        let sort_column = match opts.sort.as_deref() {
            Some("author") => Column::Author,
            Some("created_at") => Column::CreatedAt,
            Some("updated_at") => Column::UpdatedAt,
            Some("citation_count") => Column::CitationCount,
            _ => Column::Title,
        };
        let order = match opts.order {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        };

        let query = Entity::find();
        let total = PaginatorTrait::count(query.clone(), db)
            .await
            .map_err(backend)? as u64;
        let models = query
            .order_by(sort_column, order)
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

    pub async fn list_all<C: ConnectionTrait>(db: &C) -> Result<Vec<Source>, GeneaError> {
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

fn into_domain(m: source::Model) -> Source {
    Source {
        id: m.id,
        xref: m.xref,
        source_type: m.source_type.into(),
        title: m.title,
        author: m.author,
        publisher: m.publisher,
        publish_date: m.publish_date,
        url: m.url,
        repository_id: m.repository_id,
        repository_name: m.repository_name,
        call_number: m.call_number,
        notes: m.notes,
        version: m.version,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}
