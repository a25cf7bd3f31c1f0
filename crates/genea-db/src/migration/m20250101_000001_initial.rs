//! Initial migration: the `event_log` journal plus all read-model tables.

use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 1. event_log — append-only journal, global position, unique
        //    (stream_id, version)
        manager
            .create_table(
                Table::create()
                    .table(EventLog::Table)
                    .if_not_exists()
                    .col(big_integer(EventLog::Position).auto_increment().primary_key())
                    .col(uuid(EventLog::StreamId))
                    .col(string_len(EventLog::StreamType, 20))
                    .col(big_integer(EventLog::Version))
                    .col(string_len(EventLog::EventType, 40))
                    .col(json(EventLog::Payload))
                    .col(timestamp_with_time_zone(EventLog::OccurredAt))
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_event_log_stream_version")
                    .table(EventLog::Table)
                    .col(EventLog::StreamId)
                    .col(EventLog::Version)
                    .unique()
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_event_log_stream_type")
                    .table(EventLog::Table)
                    .col(EventLog::StreamType)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_event_log_occurred_at")
                    .table(EventLog::Table)
                    .col(EventLog::OccurredAt)
                    .to_owned(),
            )
            .await?;

        // 2. person
        manager
            .create_table(
                Table::create()
                    .table(Person::Table)
                    .if_not_exists()
                    .col(uuid(Person::Id).primary_key())
                    .col(string_null(Person::Xref))
                    .col(string_null(Person::Given))
                    .col(string_null(Person::Surname))
                    .col(string_len(Person::Gender, 10))
                    .col(json_null(Person::BirthDate))
                    .col(date_null(Person::BirthDateSort))
                    .col(string_null(Person::BirthPlace))
                    .col(double_null(Person::BirthLatitude))
                    .col(double_null(Person::BirthLongitude))
                    .col(json_null(Person::DeathDate))
                    .col(date_null(Person::DeathDateSort))
                    .col(string_null(Person::DeathPlace))
                    .col(double_null(Person::DeathLatitude))
                    .col(double_null(Person::DeathLongitude))
                    .col(text_null(Person::Notes))
                    .col(string_len(Person::ResearchStatus, 10))
                    .col(string_null(Person::Fsftid))
                    .col(boolean(Person::BrickWallActive))
                    .col(text_null(Person::BrickWallNote))
                    .col(timestamp_with_time_zone_null(Person::BrickWallSince))
                    .col(timestamp_with_time_zone_null(Person::BrickWallResolvedAt))
                    .col(string(Person::Lifespan))
                    .col(text(Person::SearchText))
                    .col(string(Person::Soundex))
                    .col(big_integer(Person::Version))
                    .col(timestamp_with_time_zone(Person::CreatedAt))
                    .col(timestamp_with_time_zone(Person::UpdatedAt))
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_person_surname")
                    .table(Person::Table)
                    .col(Person::Surname)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_person_birth_date_sort")
                    .table(Person::Table)
                    .col(Person::BirthDateSort)
                    .to_owned(),
            )
            .await?;

        // 3. person_name (FK → person)
        manager
            .create_table(
                Table::create()
                    .table(PersonName::Table)
                    .if_not_exists()
                    .col(uuid(PersonName::Id).primary_key())
                    .col(uuid(PersonName::PersonId))
                    .col(string_len(PersonName::NameType, 20))
                    .col(string_null(PersonName::Given))
                    .col(string_null(PersonName::Surname))
                    .col(string_null(PersonName::Prefix))
                    .col(string_null(PersonName::Suffix))
                    .col(string_null(PersonName::SurnamePrefix))
                    .col(string_null(PersonName::Nickname))
                    .col(boolean(PersonName::IsPrimary))
                    .col(timestamp_with_time_zone(PersonName::CreatedAt))
                    .col(timestamp_with_time_zone(PersonName::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_person_name_person")
                            .from(PersonName::Table, PersonName::PersonId)
                            .to(Person::Table, Person::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_person_name_person_id")
                    .table(PersonName::Table)
                    .col(PersonName::PersonId)
                    .to_owned(),
            )
            .await?;

        // 4. family
        manager
            .create_table(
                Table::create()
                    .table(Family::Table)
                    .if_not_exists()
                    .col(uuid(Family::Id).primary_key())
                    .col(string_null(Family::Xref))
                    .col(uuid_null(Family::Partner1Id))
                    .col(uuid_null(Family::Partner2Id))
                    .col(string_null(Family::Partner1Name))
                    .col(string_null(Family::Partner2Name))
                    .col(string_len(Family::RelationshipType, 15))
                    .col(json_null(Family::MarriageDate))
                    .col(date_null(Family::MarriageDateSort))
                    .col(string_null(Family::MarriagePlace))
                    .col(double_null(Family::MarriageLatitude))
                    .col(double_null(Family::MarriageLongitude))
                    .col(big_integer(Family::Version))
                    .col(timestamp_with_time_zone(Family::CreatedAt))
                    .col(timestamp_with_time_zone(Family::UpdatedAt))
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_family_partner1")
                    .table(Family::Table)
                    .col(Family::Partner1Id)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_family_partner2")
                    .table(Family::Table)
                    .col(Family::Partner2Id)
                    .to_owned(),
            )
            .await?;

        // 5. family_child (FK → family, unique (family_id, child_id))
        manager
            .create_table(
                Table::create()
                    .table(FamilyChild::Table)
                    .if_not_exists()
                    .col(uuid(FamilyChild::Id).primary_key())
                    .col(uuid(FamilyChild::FamilyId))
                    .col(uuid(FamilyChild::ChildId))
                    .col(string_len(FamilyChild::Relationship, 12))
                    .col(integer(FamilyChild::Sequence))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_family_child_family")
                            .from(FamilyChild::Table, FamilyChild::FamilyId)
                            .to(Family::Table, Family::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_family_child_unique")
                    .table(FamilyChild::Table)
                    .col(FamilyChild::FamilyId)
                    .col(FamilyChild::ChildId)
                    .unique()
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_family_child_child_id")
                    .table(FamilyChild::Table)
                    .col(FamilyChild::ChildId)
                    .to_owned(),
            )
            .await?;

        // 6. life_event
        manager
            .create_table(
                Table::create()
                    .table(LifeEvent::Table)
                    .if_not_exists()
                    .col(uuid(LifeEvent::Id).primary_key())
                    .col(string_len(LifeEvent::OwnerKind, 10))
                    .col(uuid(LifeEvent::OwnerId))
                    .col(string_len(LifeEvent::FactType, 25))
                    .col(json_null(LifeEvent::Date))
                    .col(date_null(LifeEvent::DateSort))
                    .col(string_null(LifeEvent::Place))
                    .col(double_null(LifeEvent::Latitude))
                    .col(double_null(LifeEvent::Longitude))
                    .col(json_null(LifeEvent::Address))
                    .col(text_null(LifeEvent::Description))
                    .col(string_null(LifeEvent::Cause))
                    .col(string_null(LifeEvent::Age))
                    .col(boolean(LifeEvent::IsNegated))
                    .col(timestamp_with_time_zone(LifeEvent::CreatedAt))
                    .col(timestamp_with_time_zone(LifeEvent::UpdatedAt))
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_life_event_owner")
                    .table(LifeEvent::Table)
                    .col(LifeEvent::OwnerId)
                    .to_owned(),
            )
            .await?;

        // 7. attribute
        manager
            .create_table(
                Table::create()
                    .table(Attribute::Table)
                    .if_not_exists()
                    .col(uuid(Attribute::Id).primary_key())
                    .col(uuid(Attribute::PersonId))
                    .col(string_len(Attribute::AttributeType, 12))
                    .col(string(Attribute::Value))
                    .col(json_null(Attribute::Date))
                    .col(string_null(Attribute::Place))
                    .col(timestamp_with_time_zone(Attribute::CreatedAt))
                    .col(timestamp_with_time_zone(Attribute::UpdatedAt))
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_attribute_person_id")
                    .table(Attribute::Table)
                    .col(Attribute::PersonId)
                    .to_owned(),
            )
            .await?;

        // 8. association
        manager
            .create_table(
                Table::create()
                    .table(Association::Table)
                    .if_not_exists()
                    .col(uuid(Association::Id).primary_key())
                    .col(uuid(Association::PersonId))
                    .col(uuid(Association::AssociateId))
                    .col(string_len(Association::Role, 12))
                    .col(string_null(Association::Phrase))
                    .col(text_null(Association::Notes))
                    .col(timestamp_with_time_zone(Association::CreatedAt))
                    .col(timestamp_with_time_zone(Association::UpdatedAt))
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_association_person_id")
                    .table(Association::Table)
                    .col(Association::PersonId)
                    .to_owned(),
            )
            .await?;

        // 9. lds_ordinance
        manager
            .create_table(
                Table::create()
                    .table(LdsOrdinance::Table)
                    .if_not_exists()
                    .col(uuid(LdsOrdinance::Id).primary_key())
                    .col(string_len(LdsOrdinance::OrdinanceType, 15))
                    .col(string_len(LdsOrdinance::OwnerKind, 10))
                    .col(uuid(LdsOrdinance::OwnerId))
                    .col(json_null(LdsOrdinance::Date))
                    .col(string_null(LdsOrdinance::Temple))
                    .col(string_null(LdsOrdinance::Status))
                    .col(string_null(LdsOrdinance::Place))
                    .col(timestamp_with_time_zone(LdsOrdinance::CreatedAt))
                    .col(timestamp_with_time_zone(LdsOrdinance::UpdatedAt))
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_lds_ordinance_owner")
                    .table(LdsOrdinance::Table)
                    .col(LdsOrdinance::OwnerId)
                    .to_owned(),
            )
            .await?;

        // 10. repository
        manager
            .create_table(
                Table::create()
                    .table(Repository::Table)
                    .if_not_exists()
                    .col(uuid(Repository::Id).primary_key())
                    .col(string_null(Repository::Xref))
                    .col(string(Repository::Name))
                    .col(json_null(Repository::Address))
                    .col(string_null(Repository::Phone))
                    .col(string_null(Repository::Email))
                    .col(string_null(Repository::Website))
                    .col(big_integer(Repository::Version))
                    .col(timestamp_with_time_zone(Repository::CreatedAt))
                    .col(timestamp_with_time_zone(Repository::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // 11. source
        manager
            .create_table(
                Table::create()
                    .table(Source::Table)
                    .if_not_exists()
                    .col(uuid(Source::Id).primary_key())
                    .col(string_null(Source::Xref))
                    .col(string_len(Source::SourceType, 20))
                    .col(string(Source::Title))
                    .col(string_null(Source::Author))
                    .col(string_null(Source::Publisher))
                    .col(string_null(Source::PublishDate))
                    .col(string_null(Source::Url))
                    .col(uuid_null(Source::RepositoryId))
                    .col(string_null(Source::RepositoryName))
                    .col(string_null(Source::CallNumber))
                    .col(text_null(Source::Notes))
                    .col(big_integer(Source::CitationCount))
                    .col(big_integer(Source::Version))
                    .col(timestamp_with_time_zone(Source::CreatedAt))
                    .col(timestamp_with_time_zone(Source::UpdatedAt))
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_source_title")
                    .table(Source::Table)
                    .col(Source::Title)
                    .to_owned(),
            )
            .await?;

        // 12. citation
        manager
            .create_table(
                Table::create()
                    .table(Citation::Table)
                    .if_not_exists()
                    .col(uuid(Citation::Id).primary_key())
                    .col(uuid(Citation::SourceId))
                    .col(string_len(Citation::FactType, 25))
                    .col(string_len(Citation::OwnerKind, 10))
                    .col(uuid(Citation::OwnerId))
                    .col(string_null(Citation::Page))
                    .col(string_null(Citation::Volume))
                    .col(string_len_null(Citation::SourceQuality, 12))
                    .col(string_len_null(Citation::InformantType, 15))
                    .col(string_len_null(Citation::EvidenceType, 10))
                    .col(text_null(Citation::Text))
                    .col(text_null(Citation::Analysis))
                    .col(string_null(Citation::Apid))
                    .col(big_integer(Citation::Version))
                    .col(timestamp_with_time_zone(Citation::CreatedAt))
                    .col(timestamp_with_time_zone(Citation::UpdatedAt))
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_citation_source_id")
                    .table(Citation::Table)
                    .col(Citation::SourceId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_citation_owner")
                    .table(Citation::Table)
                    .col(Citation::OwnerId)
                    .to_owned(),
            )
            .await?;

        // 13. media — blob columns excluded from default fetches
        manager
            .create_table(
                Table::create()
                    .table(Media::Table)
                    .if_not_exists()
                    .col(uuid(Media::Id).primary_key())
                    .col(string_null(Media::Xref))
                    .col(string_len(Media::OwnerKind, 10))
                    .col(uuid(Media::OwnerId))
                    .col(string_null(Media::Title))
                    .col(text_null(Media::Description))
                    .col(string(Media::MimeType))
                    .col(string_len(Media::MediaKind, 10))
                    .col(string(Media::FileName))
                    .col(big_integer(Media::Size))
                    .col(blob(Media::Data))
                    .col(blob_null(Media::Thumbnail))
                    .col(json_null(Media::Crop))
                    .col(big_integer(Media::Version))
                    .col(timestamp_with_time_zone(Media::CreatedAt))
                    .col(timestamp_with_time_zone(Media::UpdatedAt))
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_media_owner")
                    .table(Media::Table)
                    .col(Media::OwnerId)
                    .to_owned(),
            )
            .await?;

        // 14. note
        manager
            .create_table(
                Table::create()
                    .table(Note::Table)
                    .if_not_exists()
                    .col(uuid(Note::Id).primary_key())
                    .col(string_null(Note::Xref))
                    .col(text(Note::Text))
                    .col(big_integer(Note::Version))
                    .col(timestamp_with_time_zone(Note::CreatedAt))
                    .col(timestamp_with_time_zone(Note::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // 15. submitter
        manager
            .create_table(
                Table::create()
                    .table(Submitter::Table)
                    .if_not_exists()
                    .col(uuid(Submitter::Id).primary_key())
                    .col(string_null(Submitter::Xref))
                    .col(string(Submitter::Name))
                    .col(json_null(Submitter::Address))
                    .col(string_null(Submitter::Phone))
                    .col(string_null(Submitter::Email))
                    .col(big_integer(Submitter::Version))
                    .col(timestamp_with_time_zone(Submitter::CreatedAt))
                    .col(timestamp_with_time_zone(Submitter::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // 16. snapshot
        manager
            .create_table(
                Table::create()
                    .table(Snapshot::Table)
                    .if_not_exists()
                    .col(uuid(Snapshot::Id).primary_key())
                    .col(string(Snapshot::Name))
                    .col(text_null(Snapshot::Description))
                    .col(big_integer(Snapshot::Position))
                    .col(timestamp_with_time_zone(Snapshot::CreatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in [
            Snapshot::Table.into_iden(),
            Submitter::Table.into_iden(),
            Note::Table.into_iden(),
            Media::Table.into_iden(),
            Citation::Table.into_iden(),
            Source::Table.into_iden(),
            Repository::Table.into_iden(),
            LdsOrdinance::Table.into_iden(),
            Association::Table.into_iden(),
            Attribute::Table.into_iden(),
            LifeEvent::Table.into_iden(),
            FamilyChild::Table.into_iden(),
            Family::Table.into_iden(),
            PersonName::Table.into_iden(),
            Person::Table.into_iden(),
            EventLog::Table.into_iden(),
        ] {
            manager
                .drop_table(Table::drop().table(table).if_exists().to_owned())
                .await?;
        }
        Ok(())
    }
}

#[derive(DeriveIden)]
enum EventLog {
    Table,
    Position,
    StreamId,
    StreamType,
    Version,
    EventType,
    Payload,
    OccurredAt,
}

#[derive(DeriveIden)]
enum Person {
    Table,
    Id,
    Xref,
    Given,
    Surname,
    Gender,
    BirthDate,
    BirthDateSort,
    BirthPlace,
    BirthLatitude,
    BirthLongitude,
    DeathDate,
    DeathDateSort,
    DeathPlace,
    DeathLatitude,
    DeathLongitude,
    Notes,
    ResearchStatus,
    Fsftid,
    BrickWallActive,
    BrickWallNote,
    BrickWallSince,
    BrickWallResolvedAt,
    Lifespan,
    SearchText,
    Soundex,
    Version,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum PersonName {
    Table,
    Id,
    PersonId,
    NameType,
    Given,
    Surname,
    Prefix,
    Suffix,
    SurnamePrefix,
    Nickname,
    IsPrimary,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Family {
    Table,
    Id,
    Xref,
    Partner1Id,
    Partner2Id,
    Partner1Name,
    Partner2Name,
    RelationshipType,
    MarriageDate,
    MarriageDateSort,
    MarriagePlace,
    MarriageLatitude,
    MarriageLongitude,
    Version,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum FamilyChild {
    Table,
    Id,
    FamilyId,
    ChildId,
    Relationship,
    Sequence,
}

#[derive(DeriveIden)]
enum LifeEvent {
    Table,
    Id,
    OwnerKind,
    OwnerId,
    FactType,
    Date,
    DateSort,
    Place,
    Latitude,
    Longitude,
    Address,
    Description,
    Cause,
    Age,
    IsNegated,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Attribute {
    Table,
    Id,
    PersonId,
    AttributeType,
    Value,
    Date,
    Place,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Association {
    Table,
    Id,
    PersonId,
    AssociateId,
    Role,
    Phrase,
    Notes,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum LdsOrdinance {
    Table,
    Id,
    OrdinanceType,
    OwnerKind,
    OwnerId,
    Date,
    Temple,
    Status,
    Place,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Repository {
    Table,
    Id,
    Xref,
    Name,
    Address,
    Phone,
    Email,
    Website,
    Version,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Source {
    Table,
    Id,
    Xref,
    SourceType,
    Title,
    Author,
    Publisher,
    PublishDate,
    Url,
    RepositoryId,
    RepositoryName,
    CallNumber,
    Notes,
    CitationCount,
    Version,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Citation {
    Table,
    Id,
    SourceId,
    FactType,
    OwnerKind,
    OwnerId,
    Page,
    Volume,
    SourceQuality,
    InformantType,
    EvidenceType,
    Text,
    Analysis,
    Apid,
    Version,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Media {
    Table,
    Id,
    Xref,
    OwnerKind,
    OwnerId,
    Title,
    Description,
    MimeType,
    MediaKind,
    FileName,
    Size,
    Data,
    Thumbnail,
    Crop,
    Version,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Note {
    Table,
    Id,
    Xref,
    Text,
    Version,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Submitter {
    Table,
    Id,
    Xref,
    Name,
    Address,
    Phone,
    Email,
    Version,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Snapshot {
    Table,
    Id,
    Name,
    Description,
    Position,
    CreatedAt,
}
