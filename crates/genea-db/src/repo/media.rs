//! Repository for `Media` rows.
//!
//! The blob columns (`data`, `thumbnail`) are excluded from the default
//! fetchers; `get_with_data` and `get_thumbnail` load them on demand so list
//! and detail paths stay cheap.

use genea_core::GeneaError;
use genea_core::enums::{MediaKind, MediaOwnerKind};
use genea_core::types::{CropRect, ListOptions, Media, Page, SortOrder};
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveValue::Set, ConnectionTrait, FromQueryResult, Order, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};
use serde::Serialize;
use uuid::Uuid;

use crate::entities::media::{self, ActiveModel, Column, Entity};
use crate::entities::sea_enums;
use crate::repo::{backend, from_json_opt, to_json_opt};

/// Media metadata without the binary payloads.
#[derive(Debug, Clone, Serialize)]
pub struct MediaMeta {
    pub id: Uuid,
    pub xref: Option<String>,
    pub owner_kind: MediaOwnerKind,
    pub owner_id: Uuid,
    pub title: Option<String>,
    pub description: Option<String>,
    pub mime_type: String,
    pub media_kind: MediaKind,
    pub file_name: String,
    pub size: i64,
    pub crop: Option<CropRect>,
    pub version: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, FromQueryResult)]
struct MetaRow {
    id: Uuid,
    xref: Option<String>,
    owner_kind: sea_enums::MediaOwnerKind,
    owner_id: Uuid,
    title: Option<String>,
    description: Option<String>,
    mime_type: String,
    media_kind: sea_enums::MediaKind,
    file_name: String,
    size: i64,
    crop: Option<serde_json::Value>,
    version: i64,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<MetaRow> for MediaMeta {
    fn from(r: MetaRow) -> Self {
        Self {
            id: r.id,
            xref: r.xref,
            owner_kind: r.owner_kind.into(),
            owner_id: r.owner_id,
            title: r.title,
            description: r.description,
            mime_type: r.mime_type,
            media_kind: r.media_kind.into(),
            file_name: r.file_name,
            size: r.size,
            crop: from_json_opt(r.crop),
            version: r.version,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

fn meta_select() -> sea_orm::Select<Entity> {
    Entity::find().select_only().columns([
        Column::Id,
        Column::Xref,
        Column::OwnerKind,
        Column::OwnerId,
        Column::Title,
        Column::Description,
        Column::MimeType,
        Column::MediaKind,
        Column::FileName,
        Column::Size,
        Column::Crop,
        Column::Version,
        Column::CreatedAt,
        Column::UpdatedAt,
    ])
}

pub struct MediaRepo;

impl MediaRepo {
    /// Metadata only; blobs stay in the database.
    pub async fn get<C: ConnectionTrait>(
        db: &C,
        id: Uuid,
    ) -> Result<Option<MediaMeta>, GeneaError> {
        Ok(meta_select()
            .filter(Column::Id.eq(id))
            .into_model::<MetaRow>()
            .one(db)
            .await
            .map_err(backend)?
            .map(Into::into))
    }

    /// Full row including the binary payload.
    pub async fn get_with_data<C: ConnectionTrait>(
        db: &C,
        id: Uuid,
    ) -> Result<Option<Media>, GeneaError> {
        Ok(Entity::find_by_id(id)
            .one(db)
            .await
            .map_err(backend)?
            .map(into_domain))
    }

    /// Thumbnail bytes only; `None` when the row or the thumbnail is absent.
    pub async fn get_thumbnail<C: ConnectionTrait>(
        db: &C,
        id: Uuid,
    ) -> Result<Option<Vec<u8>>, GeneaError> {
        let row: Option<(Option<Vec<u8>>,)> = Entity::find()
            .filter(Column::Id.eq(id))
            .select_only()
            .column(Column::Thumbnail)
            .into_tuple()
            .one(db)
            .await
            .map_err(backend)?;
        Ok(row.and_then(|(thumbnail,)| thumbnail))
    }

    pub async fn save<C: ConnectionTrait>(db: &C, m: &Media) -> Result<(), GeneaError> {
        let active = ActiveModel {
            id: Set(m.id),
            xref: Set(m.xref.clone()),
            owner_kind: Set(sea_enums::MediaOwnerKind::from(m.owner_kind)),
            owner_id: Set(m.owner_id),
            title: Set(m.title.clone()),
            description: Set(m.description.clone()),
            mime_type: Set(m.mime_type.clone()),
            media_kind: Set(sea_enums::MediaKind::from(m.media_kind)),
            file_name: Set(m.file_name.clone()),
            size: Set(m.data.len() as i64),
            data: Set(m.data.clone()),
            thumbnail: Set(m.thumbnail.clone()),
            crop: Set(to_json_opt(&m.crop)),
            version: Set(m.version),
            created_at: Set(m.created_at),
            updated_at: Set(m.updated_at),
        };
        Entity::insert(active)
            .on_conflict(
                OnConflict::column(Column::Id)
                    .update_columns([
                        Column::Xref,
                        Column::Title,
                        Column::Description,
                        Column::MimeType,
                        Column::MediaKind,
                        Column::FileName,
                        Column::Size,
                        Column::Data,
                        Column::Thumbnail,
                        Column::Crop,
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

    /// Update only the metadata columns, leaving the blobs untouched. Used
    /// by the projection for sparse media updates.
    pub async fn save_meta<C: ConnectionTrait>(
        db: &C,
        meta: &MediaMeta,
    ) -> Result<(), GeneaError> {
        let active = ActiveModel {
            id: Set(meta.id),
            title: Set(meta.title.clone()),
            description: Set(meta.description.clone()),
            media_kind: Set(sea_enums::MediaKind::from(meta.media_kind)),
            file_name: Set(meta.file_name.clone()),
            crop: Set(to_json_opt(&meta.crop)),
            version: Set(meta.version),
            updated_at: Set(meta.updated_at),
            ..Default::default()
        };
        Entity::update(active)
            .filter(Column::Id.eq(meta.id))
            .exec(db)
            .await
            .map_err(backend)?;
        Ok(())
    }

    /// Overwrite the thumbnail bytes.
    pub async fn set_thumbnail<C: ConnectionTrait>(
        db: &C,
        id: Uuid,
        thumbnail: Option<Vec<u8>>,
    ) -> Result<(), GeneaError> {
        Entity::update_many()
            .col_expr(Column::Thumbnail, sea_orm::sea_query::Expr::value(thumbnail))
            .filter(Column::Id.eq(id))
            .exec(db)
            .await
            .map_err(backend)?;
        Ok(())
    }

    pub async fn delete<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<(), GeneaError> {
        Entity::delete_by_id(id).exec(db).await.map_err(backend)?;
        Ok(())
    }

    pub async fn for_owner<C: ConnectionTrait>(
        db: &C,
        owner_id: Uuid,
    ) -> Result<Vec<MediaMeta>, GeneaError> {
        let rows = meta_select()
            .filter(Column::OwnerId.eq(owner_id))
            .order_by_asc(Column::Id)
            .into_model::<MetaRow>()
            .all(db)
            .await
            .map_err(backend)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Paginated media metadata list. Sort whitelist: `file_name`, `size`,
    /// `created_at`.
    pub async fn list<C: ConnectionTrait>(
        db: &C,
        opts: &ListOptions,
    ) -> Result<Page<MediaMeta>, GeneaError> {
        let sort_column = match opts.sort.as_deref() {
            Some("file_name") => Column::FileName,
            Some("size") => Column::Size,
            _ => Column::CreatedAt,
        };
        let order = match opts.order {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        };

        let total = PaginatorTrait::count(Entity::find(), db)
            .await
            .map_err(backend)? as u64;
        let rows = meta_select()
            .order_by(sort_column, order)
            .order_by(Column::Id, Order::Asc)
            .limit(opts.clamped_limit())
            .offset(opts.offset())
            .into_model::<MetaRow>()
            .all(db)
            .await
            .map_err(backend)?;

        Ok(Page {
            items: rows.into_iter().map(Into::into).collect(),
            total,
            limit: opts.clamped_limit(),
            offset: opts.offset(),
        })
    }

    pub async fn list_all<C: ConnectionTrait>(db: &C) -> Result<Vec<Media>, GeneaError> {
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

fn into_domain(m: media::Model) -> Media {
    Media {
        id: m.id,
        xref: m.xref,
        owner_kind: m.owner_kind.into(),
        owner_id: m.owner_id,
        title: m.title,
        description: m.description,
        mime_type: m.mime_type,
        media_kind: m.media_kind.into(),
        file_name: m.file_name,
        data: m.data,
        thumbnail: m.thumbnail,
        crop: from_json_opt(m.crop),
        version: m.version,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}
