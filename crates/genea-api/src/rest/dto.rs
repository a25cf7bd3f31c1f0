//! Request/response DTOs for REST endpoints.
//!
//! Update DTOs use the double-`Option` idiom: an absent field leaves the
//! value unchanged, an explicit `null` clears it. `into_changes` turns a
//! DTO into the sparse change-set the engine appends.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use genea_core::enums::{
    AssociationRole, AttributeType, ChildRelationship, EvidenceType, FactOwnerKind, FactType,
    Gender, InformantType, LdsOrdinanceType, MediaKind, MediaOwnerKind, NameType,
    RelationshipType, ResearchStatus, SourceQuality, SourceType,
};
use genea_core::event::Changes;
use genea_core::gendate::GenDate;
use genea_core::types::{CropRect, Place, SortOrder};

// ── Shared helpers ──────────────────────────────────────────────────

/// A place in request bodies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceDto {
    pub name: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl From<PlaceDto> for Place {
    fn from(dto: PlaceDto) -> Self {
        Place {
            name: dto.name,
            latitude: dto.latitude,
            longitude: dto.longitude,
        }
    }
}

/// Parse a GEDCOM date phrase from a request; total, like the domain
/// parser.
pub fn parse_date(phrase: &str) -> GenDate {
    GenDate::parse(phrase)
}

fn set<T: serde::Serialize>(changes: &mut Changes, key: &str, field: Option<Option<T>>) {
    if let Some(value) = field {
        let json = match value {
            Some(v) => serde_json::to_value(v).unwrap_or(Value::Null),
            None => Value::Null,
        };
        changes.insert(key.to_string(), json);
    }
}

fn set_flat<T: serde::Serialize>(changes: &mut Changes, key: &str, field: Option<T>) {
    if let Some(value) = field {
        changes.insert(
            key.to_string(),
            serde_json::to_value(value).unwrap_or(Value::Null),
        );
    }
}

fn set_date(changes: &mut Changes, key: &str, field: Option<Option<String>>) {
    if let Some(value) = field {
        let json = match value {
            Some(phrase) => serde_json::to_value(GenDate::parse(&phrase)).unwrap_or(Value::Null),
            None => Value::Null,
        };
        changes.insert(key.to_string(), json);
    }
}

fn set_place(changes: &mut Changes, key: &str, field: Option<Option<PlaceDto>>) {
    if let Some(value) = field {
        let json = match value {
            Some(dto) => serde_json::to_value(Place::from(dto)).unwrap_or(Value::Null),
            None => Value::Null,
        };
        changes.insert(key.to_string(), json);
    }
}

// ── Pagination / list queries ───────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    pub sort: Option<String>,
    pub order: Option<SortOrder>,
}

impl ListQuery {
    pub fn options(&self) -> genea_core::types::ListOptions {
        genea_core::types::ListOptions {
            limit: self.limit,
            offset: self.offset,
            sort: self.sort.clone(),
            order: self.order.unwrap_or_default(),
        }
    }
}

/// `?version=` carries the client's expected aggregate version for
/// optimistic concurrency; absent means "whatever is current".
#[derive(Debug, Default, Deserialize)]
pub struct VersionQuery {
    pub version: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GenerationsQuery {
    pub generations: Option<u32>,
    /// `json` (default) or `text`, for the ahnentafel endpoint.
    pub format: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub q: String,
    #[serde(default)]
    pub fuzzy: bool,
    #[serde(default)]
    pub soundex: bool,
    pub birth_date_from: Option<chrono::NaiveDate>,
    pub birth_date_to: Option<chrono::NaiveDate>,
    pub birth_place: Option<String>,
    pub limit: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct HistoryRangeQuery {
    pub from: Option<chrono::DateTime<chrono::Utc>>,
    pub to: Option<chrono::DateTime<chrono::Utc>>,
    /// Comma-separated event-type tags.
    pub types: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct FormatQuery {
    pub format: Option<String>,
}

// ── Version envelope ────────────────────────────────────────────────

/// Response body for mutations that only move the aggregate version.
#[derive(Debug, Serialize)]
pub struct VersionResponse {
    pub version: i64,
}

// ── Person ──────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct CreatePersonRequest {
    pub given: Option<String>,
    pub surname: Option<String>,
    pub gender: Option<Gender>,
    pub birth_date: Option<String>,
    pub birth_place: Option<PlaceDto>,
    pub death_date: Option<String>,
    pub death_place: Option<PlaceDto>,
    pub notes: Option<String>,
    pub research_status: Option<ResearchStatus>,
    pub fsftid: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdatePersonRequest {
    pub given: Option<Option<String>>,
    pub surname: Option<Option<String>>,
    pub gender: Option<Gender>,
    pub birth_date: Option<Option<String>>,
    pub birth_place: Option<Option<PlaceDto>>,
    pub death_date: Option<Option<String>>,
    pub death_place: Option<Option<PlaceDto>>,
    pub notes: Option<Option<String>>,
    pub research_status: Option<ResearchStatus>,
    pub fsftid: Option<Option<String>>,
    pub expected_version: Option<i64>,
}

impl UpdatePersonRequest {
    pub fn into_changes(self) -> (Changes, Option<i64>) {
        let mut changes = Changes::new();
        set(&mut changes, "given", self.given);
        set(&mut changes, "surname", self.surname);
        set_flat(&mut changes, "gender", self.gender);
        set_date(&mut changes, "birth_date", self.birth_date);
        set_place(&mut changes, "birth_place", self.birth_place);
        set_date(&mut changes, "death_date", self.death_date);
        set_place(&mut changes, "death_place", self.death_place);
        set(&mut changes, "notes", self.notes);
        set_flat(&mut changes, "research_status", self.research_status);
        set(&mut changes, "fsftid", self.fsftid);
        (changes, self.expected_version)
    }
}

#[derive(Debug, Deserialize)]
pub struct CreatePersonNameRequest {
    pub name_type: Option<NameType>,
    pub given: Option<String>,
    pub surname: Option<String>,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    pub surname_prefix: Option<String>,
    pub nickname: Option<String>,
    #[serde(default)]
    pub is_primary: bool,
    pub expected_version: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdatePersonNameRequest {
    pub name_type: Option<NameType>,
    pub given: Option<Option<String>>,
    pub surname: Option<Option<String>>,
    pub prefix: Option<Option<String>>,
    pub suffix: Option<Option<String>>,
    pub surname_prefix: Option<Option<String>>,
    pub nickname: Option<Option<String>>,
    pub is_primary: Option<bool>,
    pub expected_version: Option<i64>,
}

impl UpdatePersonNameRequest {
    pub fn into_changes(self) -> (Changes, Option<i64>) {
        let mut changes = Changes::new();
        set_flat(&mut changes, "name_type", self.name_type);
        set(&mut changes, "given", self.given);
        set(&mut changes, "surname", self.surname);
        set(&mut changes, "prefix", self.prefix);
        set(&mut changes, "suffix", self.suffix);
        set(&mut changes, "surname_prefix", self.surname_prefix);
        set(&mut changes, "nickname", self.nickname);
        set_flat(&mut changes, "is_primary", self.is_primary);
        (changes, self.expected_version)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct BrickWallRequest {
    pub note: Option<String>,
    pub expected_version: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct RollbackRequest {
    pub target_version: i64,
}

// ── Family ──────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct CreateFamilyRequest {
    pub partner1_id: Option<Uuid>,
    pub partner2_id: Option<Uuid>,
    pub relationship_type: Option<RelationshipType>,
    pub marriage_date: Option<String>,
    pub marriage_place: Option<PlaceDto>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateFamilyRequest {
    pub partner1_id: Option<Option<Uuid>>,
    pub partner2_id: Option<Option<Uuid>>,
    pub relationship_type: Option<RelationshipType>,
    pub marriage_date: Option<Option<String>>,
    pub marriage_place: Option<Option<PlaceDto>>,
    pub expected_version: Option<i64>,
}

impl UpdateFamilyRequest {
    pub fn into_changes(self) -> (Changes, Option<i64>) {
        let mut changes = Changes::new();
        set(&mut changes, "partner1_id", self.partner1_id);
        set(&mut changes, "partner2_id", self.partner2_id);
        set_flat(&mut changes, "relationship_type", self.relationship_type);
        set_date(&mut changes, "marriage_date", self.marriage_date);
        set_place(&mut changes, "marriage_place", self.marriage_place);
        (changes, self.expected_version)
    }
}

#[derive(Debug, Deserialize)]
pub struct AddChildRequest {
    pub child_id: Uuid,
    pub relationship: Option<ChildRelationship>,
    #[serde(default)]
    pub sequence: i32,
    pub expected_version: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct RemoveChildRequest {
    pub child_id: Uuid,
    pub expected_version: Option<i64>,
}

// ── Life events / attributes / associations / ordinances ────────────

#[derive(Debug, Deserialize)]
pub struct CreateLifeEventRequest {
    pub fact_type: FactType,
    pub date: Option<String>,
    pub place: Option<PlaceDto>,
    pub address: Option<genea_core::types::Address>,
    pub description: Option<String>,
    pub cause: Option<String>,
    pub age: Option<String>,
    #[serde(default)]
    pub is_negated: bool,
    pub expected_version: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateLifeEventRequest {
    pub fact_type: Option<FactType>,
    pub date: Option<Option<String>>,
    pub place: Option<Option<PlaceDto>>,
    pub address: Option<Option<genea_core::types::Address>>,
    pub description: Option<Option<String>>,
    pub cause: Option<Option<String>>,
    pub age: Option<Option<String>>,
    pub expected_version: Option<i64>,
}

impl UpdateLifeEventRequest {
    pub fn into_changes(self) -> (Changes, Option<i64>) {
        let mut changes = Changes::new();
        set_flat(&mut changes, "fact_type", self.fact_type);
        set_date(&mut changes, "date", self.date);
        set_place(&mut changes, "place", self.place);
        set(&mut changes, "address", self.address);
        set(&mut changes, "description", self.description);
        set(&mut changes, "cause", self.cause);
        set(&mut changes, "age", self.age);
        (changes, self.expected_version)
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateAttributeRequest {
    pub attribute_type: AttributeType,
    pub value: String,
    pub date: Option<String>,
    pub place: Option<String>,
    pub expected_version: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct CreateAssociationRequest {
    pub associate_id: Uuid,
    pub role: AssociationRole,
    pub phrase: Option<String>,
    pub notes: Option<String>,
    pub expected_version: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct CreateOrdinanceRequest {
    pub ordinance_type: LdsOrdinanceType,
    pub owner_kind: FactOwnerKind,
    pub owner_id: Uuid,
    pub date: Option<String>,
    pub temple: Option<String>,
    pub status: Option<String>,
    pub place: Option<String>,
    pub expected_version: Option<i64>,
}

// ── Sources / repositories / citations ──────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateSourceRequest {
    pub source_type: Option<SourceType>,
    pub title: String,
    pub author: Option<String>,
    pub publisher: Option<String>,
    pub publish_date: Option<String>,
    pub url: Option<String>,
    pub repository_id: Option<Uuid>,
    pub repository_name: Option<String>,
    pub call_number: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateSourceRequest {
    pub source_type: Option<SourceType>,
    pub title: Option<String>,
    pub author: Option<Option<String>>,
    pub publisher: Option<Option<String>>,
    pub publish_date: Option<Option<String>>,
    pub url: Option<Option<String>>,
    pub repository_id: Option<Option<Uuid>>,
    pub repository_name: Option<Option<String>>,
    pub call_number: Option<Option<String>>,
    pub notes: Option<Option<String>>,
    pub expected_version: Option<i64>,
}

impl UpdateSourceRequest {
    pub fn into_changes(self) -> (Changes, Option<i64>) {
        let mut changes = Changes::new();
        set_flat(&mut changes, "source_type", self.source_type);
        set_flat(&mut changes, "title", self.title);
        set(&mut changes, "author", self.author);
        set(&mut changes, "publisher", self.publisher);
        set(&mut changes, "publish_date", self.publish_date);
        set(&mut changes, "url", self.url);
        set(&mut changes, "repository_id", self.repository_id);
        set(&mut changes, "repository_name", self.repository_name);
        set(&mut changes, "call_number", self.call_number);
        set(&mut changes, "notes", self.notes);
        (changes, self.expected_version)
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateRepositoryRequest {
    pub name: String,
    pub address: Option<genea_core::types::Address>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateRepositoryRequest {
    pub name: Option<String>,
    pub address: Option<Option<genea_core::types::Address>>,
    pub phone: Option<Option<String>>,
    pub email: Option<Option<String>>,
    pub website: Option<Option<String>>,
    pub expected_version: Option<i64>,
}

impl UpdateRepositoryRequest {
    pub fn into_changes(self) -> (Changes, Option<i64>) {
        let mut changes = Changes::new();
        set_flat(&mut changes, "name", self.name);
        set(&mut changes, "address", self.address);
        set(&mut changes, "phone", self.phone);
        set(&mut changes, "email", self.email);
        set(&mut changes, "website", self.website);
        (changes, self.expected_version)
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateCitationRequest {
    pub source_id: Uuid,
    pub fact_type: FactType,
    pub owner_kind: FactOwnerKind,
    pub owner_id: Uuid,
    pub page: Option<String>,
    pub volume: Option<String>,
    pub source_quality: Option<SourceQuality>,
    pub informant_type: Option<InformantType>,
    pub evidence_type: Option<EvidenceType>,
    pub text: Option<String>,
    pub analysis: Option<String>,
    pub apid: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateCitationRequest {
    pub page: Option<Option<String>>,
    pub volume: Option<Option<String>>,
    pub source_quality: Option<Option<SourceQuality>>,
    pub informant_type: Option<Option<InformantType>>,
    pub evidence_type: Option<Option<EvidenceType>>,
    pub text: Option<Option<String>>,
    pub analysis: Option<Option<String>>,
    pub apid: Option<Option<String>>,
    pub expected_version: Option<i64>,
}

impl UpdateCitationRequest {
    pub fn into_changes(self) -> (Changes, Option<i64>) {
        let mut changes = Changes::new();
        set(&mut changes, "page", self.page);
        set(&mut changes, "volume", self.volume);
        set(&mut changes, "source_quality", self.source_quality);
        set(&mut changes, "informant_type", self.informant_type);
        set(&mut changes, "evidence_type", self.evidence_type);
        set(&mut changes, "text", self.text);
        set(&mut changes, "analysis", self.analysis);
        set(&mut changes, "apid", self.apid);
        (changes, self.expected_version)
    }
}

// ── Media / notes / submitters ──────────────────────────────────────

/// Media upload: multipart decoding happens outside the core, so the
/// payload arrives base64-encoded in the JSON body.
#[derive(Debug, Deserialize)]
pub struct CreateMediaRequest {
    pub owner_kind: MediaOwnerKind,
    pub owner_id: Uuid,
    pub title: Option<String>,
    pub description: Option<String>,
    pub mime_type: String,
    pub media_kind: MediaKind,
    pub file_name: String,
    pub data: String,
    pub thumbnail: Option<String>,
    pub crop: Option<CropRect>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateMediaRequest {
    pub title: Option<Option<String>>,
    pub description: Option<Option<String>>,
    pub media_kind: Option<MediaKind>,
    pub file_name: Option<String>,
    pub crop: Option<Option<CropRect>>,
    pub thumbnail: Option<Option<String>>,
    pub expected_version: Option<i64>,
}

impl UpdateMediaRequest {
    pub fn into_changes(self) -> (Changes, Option<i64>) {
        let mut changes = Changes::new();
        set(&mut changes, "title", self.title);
        set(&mut changes, "description", self.description);
        set_flat(&mut changes, "media_kind", self.media_kind);
        set_flat(&mut changes, "file_name", self.file_name);
        set(&mut changes, "crop", self.crop);
        set(&mut changes, "thumbnail", self.thumbnail);
        (changes, self.expected_version)
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateNoteRequest {
    pub text: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateNoteRequest {
    pub text: Option<String>,
    pub expected_version: Option<i64>,
}

impl UpdateNoteRequest {
    pub fn into_changes(self) -> (Changes, Option<i64>) {
        let mut changes = Changes::new();
        set_flat(&mut changes, "text", self.text);
        (changes, self.expected_version)
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateSubmitterRequest {
    pub name: String,
    pub address: Option<genea_core::types::Address>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateSubmitterRequest {
    pub name: Option<String>,
    pub address: Option<Option<genea_core::types::Address>>,
    pub phone: Option<Option<String>>,
    pub email: Option<Option<String>>,
    pub expected_version: Option<i64>,
}

impl UpdateSubmitterRequest {
    pub fn into_changes(self) -> (Changes, Option<i64>) {
        let mut changes = Changes::new();
        set_flat(&mut changes, "name", self.name);
        set(&mut changes, "address", self.address);
        set(&mut changes, "phone", self.phone);
        set(&mut changes, "email", self.email);
        (changes, self.expected_version)
    }
}

// ── Snapshots ───────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateSnapshotRequest {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CompareSnapshotsQuery {
    pub from: Uuid,
    pub to: Uuid,
}
