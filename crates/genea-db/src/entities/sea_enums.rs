//! SeaORM-compatible enum types that mirror `genea_core::enums`.
//!
//! These enums use `DeriveActiveEnum` so SeaORM can serialize them to/from
//! string columns in the database. Conversion impls map between core and DB
//! enums.

use sea_orm::entity::prelude::*;

use genea_core::enums;

/// Gender — stored as a string column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
pub enum Gender {
    #[sea_orm(string_value = "male")]
    Male,
    #[sea_orm(string_value = "female")]
    Female,
    #[sea_orm(string_value = "unknown")]
    Unknown,
}

impl From<enums::Gender> for Gender {
    fn from(v: enums::Gender) -> Self {
        match v {
            enums::Gender::Male => Self::Male,
            enums::Gender::Female => Self::Female,
            enums::Gender::Unknown => Self::Unknown,
        }
    }
}

impl From<Gender> for enums::Gender {
    fn from(v: Gender) -> Self {
        match v {
            Gender::Male => Self::Male,
            Gender::Female => Self::Female,
            Gender::Unknown => Self::Unknown,
        }
    }
}

/// Name type — stored as a string column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum NameType {
    #[sea_orm(string_value = "birth")]
    Birth,
    #[sea_orm(string_value = "married")]
    Married,
    #[sea_orm(string_value = "also_known_as")]
    AlsoKnownAs,
    #[sea_orm(string_value = "immigrant")]
    Immigrant,
    #[sea_orm(string_value = "religious")]
    Religious,
    #[sea_orm(string_value = "professional")]
    Professional,
}

impl From<enums::NameType> for NameType {
    fn from(v: enums::NameType) -> Self {
        match v {
            enums::NameType::Birth => Self::Birth,
            enums::NameType::Married => Self::Married,
            enums::NameType::AlsoKnownAs => Self::AlsoKnownAs,
            enums::NameType::Immigrant => Self::Immigrant,
            enums::NameType::Religious => Self::Religious,
            enums::NameType::Professional => Self::Professional,
        }
    }
}

impl From<NameType> for enums::NameType {
    fn from(v: NameType) -> Self {
        match v {
            NameType::Birth => Self::Birth,
            NameType::Married => Self::Married,
            NameType::AlsoKnownAs => Self::AlsoKnownAs,
            NameType::Immigrant => Self::Immigrant,
            NameType::Religious => Self::Religious,
            NameType::Professional => Self::Professional,
        }
    }
}

/// Research status — stored as a string column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
pub enum ResearchStatus {
    #[sea_orm(string_value = "certain")]
    Certain,
    #[sea_orm(string_value = "probable")]
    Probable,
    #[sea_orm(string_value = "possible")]
    Possible,
    #[sea_orm(string_value = "unknown")]
    Unknown,
}

impl From<enums::ResearchStatus> for ResearchStatus {
    fn from(v: enums::ResearchStatus) -> Self {
        match v {
            enums::ResearchStatus::Certain => Self::Certain,
            enums::ResearchStatus::Probable => Self::Probable,
            enums::ResearchStatus::Possible => Self::Possible,
            enums::ResearchStatus::Unknown => Self::Unknown,
        }
    }
}

impl From<ResearchStatus> for enums::ResearchStatus {
    fn from(v: ResearchStatus) -> Self {
        match v {
            ResearchStatus::Certain => Self::Certain,
            ResearchStatus::Probable => Self::Probable,
            ResearchStatus::Possible => Self::Possible,
            ResearchStatus::Unknown => Self::Unknown,
        }
    }
}

/// Partner relationship type — stored as a string column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(15))")]
pub enum RelationshipType {
    #[sea_orm(string_value = "marriage")]
    Marriage,
    #[sea_orm(string_value = "partnership")]
    Partnership,
    #[sea_orm(string_value = "unknown")]
    Unknown,
}

impl From<enums::RelationshipType> for RelationshipType {
    fn from(v: enums::RelationshipType) -> Self {
        match v {
            enums::RelationshipType::Marriage => Self::Marriage,
            enums::RelationshipType::Partnership => Self::Partnership,
            enums::RelationshipType::Unknown => Self::Unknown,
        }
    }
}

impl From<RelationshipType> for enums::RelationshipType {
    fn from(v: RelationshipType) -> Self {
        match v {
            RelationshipType::Marriage => Self::Marriage,
            RelationshipType::Partnership => Self::Partnership,
            RelationshipType::Unknown => Self::Unknown,
        }
    }
}

/// Child relationship — stored as a string column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(12))")]
pub enum ChildRelationship {
    #[sea_orm(string_value = "biological")]
    Biological,
    #[sea_orm(string_value = "adopted")]
    Adopted,
    #[sea_orm(string_value = "foster")]
    Foster,
}

impl From<enums::ChildRelationship> for ChildRelationship {
    fn from(v: enums::ChildRelationship) -> Self {
        match v {
            enums::ChildRelationship::Biological => Self::Biological,
            enums::ChildRelationship::Adopted => Self::Adopted,
            enums::ChildRelationship::Foster => Self::Foster,
        }
    }
}

impl From<ChildRelationship> for enums::ChildRelationship {
    fn from(v: ChildRelationship) -> Self {
        match v {
            ChildRelationship::Biological => Self::Biological,
            ChildRelationship::Adopted => Self::Adopted,
            ChildRelationship::Foster => Self::Foster,
        }
    }
}

/// Source type — stored as a string column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum SourceType {
    #[sea_orm(string_value = "book")]
    Book,
    #[sea_orm(string_value = "census")]
    Census,
    #[sea_orm(string_value = "church_record")]
    ChurchRecord,
    #[sea_orm(string_value = "civil_registration")]
    CivilRegistration,
    #[sea_orm(string_value = "military_record")]
    MilitaryRecord,
    #[sea_orm(string_value = "newspaper")]
    Newspaper,
    #[sea_orm(string_value = "photograph")]
    Photograph,
    #[sea_orm(string_value = "interview")]
    Interview,
    #[sea_orm(string_value = "manuscript")]
    Manuscript,
    #[sea_orm(string_value = "map")]
    Map,
    #[sea_orm(string_value = "website")]
    Website,
    #[sea_orm(string_value = "other")]
    Other,
}

impl From<enums::SourceType> for SourceType {
    fn from(v: enums::SourceType) -> Self {
        match v {
            enums::SourceType::Book => Self::Book,
            enums::SourceType::Census => Self::Census,
            enums::SourceType::ChurchRecord => Self::ChurchRecord,
            enums::SourceType::CivilRegistration => Self::CivilRegistration,
            enums::SourceType::MilitaryRecord => Self::MilitaryRecord,
            enums::SourceType::Newspaper => Self::Newspaper,
            enums::SourceType::Photograph => Self::Photograph,
            enums::SourceType::Interview => Self::Interview,
            enums::SourceType::Manuscript => Self::Manuscript,
            enums::SourceType::Map => Self::Map,
            enums::SourceType::Website => Self::Website,
            enums::SourceType::Other => Self::Other,
        }
    }
}

impl From<SourceType> for enums::SourceType {
    fn from(v: SourceType) -> Self {
        match v {
            SourceType::Book => Self::Book,
            SourceType::Census => Self::Census,
            SourceType::ChurchRecord => Self::ChurchRecord,
            SourceType::CivilRegistration => Self::CivilRegistration,
            SourceType::MilitaryRecord => Self::MilitaryRecord,
            SourceType::Newspaper => Self::Newspaper,
            SourceType::Photograph => Self::Photograph,
            SourceType::Interview => Self::Interview,
            SourceType::Manuscript => Self::Manuscript,
            SourceType::Map => Self::Map,
            SourceType::Website => Self::Website,
            SourceType::Other => Self::Other,
        }
    }
}

/// GPS source quality — stored as a string column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(12))")]
pub enum SourceQuality {
    #[sea_orm(string_value = "original")]
    Original,
    #[sea_orm(string_value = "derivative")]
    Derivative,
    #[sea_orm(string_value = "authored")]
    Authored,
}

impl From<enums::SourceQuality> for SourceQuality {
    fn from(v: enums::SourceQuality) -> Self {
        match v {
            enums::SourceQuality::Original => Self::Original,
            enums::SourceQuality::Derivative => Self::Derivative,
            enums::SourceQuality::Authored => Self::Authored,
        }
    }
}

impl From<SourceQuality> for enums::SourceQuality {
    fn from(v: SourceQuality) -> Self {
        match v {
            SourceQuality::Original => Self::Original,
            SourceQuality::Derivative => Self::Derivative,
            SourceQuality::Authored => Self::Authored,
        }
    }
}

/// GPS informant type — stored as a string column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(15))")]
pub enum InformantType {
    #[sea_orm(string_value = "primary")]
    Primary,
    #[sea_orm(string_value = "secondary")]
    Secondary,
    #[sea_orm(string_value = "undetermined")]
    Undetermined,
}

impl From<enums::InformantType> for InformantType {
    fn from(v: enums::InformantType) -> Self {
        match v {
            enums::InformantType::Primary => Self::Primary,
            enums::InformantType::Secondary => Self::Secondary,
            enums::InformantType::Undetermined => Self::Undetermined,
        }
    }
}

impl From<InformantType> for enums::InformantType {
    fn from(v: InformantType) -> Self {
        match v {
            InformantType::Primary => Self::Primary,
            InformantType::Secondary => Self::Secondary,
            InformantType::Undetermined => Self::Undetermined,
        }
    }
}

/// GPS evidence type — stored as a string column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
pub enum EvidenceType {
    #[sea_orm(string_value = "direct")]
    Direct,
    #[sea_orm(string_value = "indirect")]
    Indirect,
    #[sea_orm(string_value = "negative")]
    Negative,
}

impl From<enums::EvidenceType> for EvidenceType {
    fn from(v: enums::EvidenceType) -> Self {
        match v {
            enums::EvidenceType::Direct => Self::Direct,
            enums::EvidenceType::Indirect => Self::Indirect,
            enums::EvidenceType::Negative => Self::Negative,
        }
    }
}

impl From<EvidenceType> for enums::EvidenceType {
    fn from(v: EvidenceType) -> Self {
        match v {
            EvidenceType::Direct => Self::Direct,
            EvidenceType::Indirect => Self::Indirect,
            EvidenceType::Negative => Self::Negative,
        }
    }
}

/// Fact type — stored as a string column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(25))")]
pub enum FactType {
    #[sea_orm(string_value = "birth")]
    Birth,
    #[sea_orm(string_value = "death")]
    Death,
    #[sea_orm(string_value = "baptism")]
    Baptism,
    #[sea_orm(string_value = "christening")]
    Christening,
    #[sea_orm(string_value = "burial")]
    Burial,
    #[sea_orm(string_value = "cremation")]
    Cremation,
    #[sea_orm(string_value = "adoption")]
    Adoption,
    #[sea_orm(string_value = "emigration")]
    Emigration,
    #[sea_orm(string_value = "immigration")]
    Immigration,
    #[sea_orm(string_value = "naturalization")]
    Naturalization,
    #[sea_orm(string_value = "census")]
    Census,
    #[sea_orm(string_value = "graduation")]
    Graduation,
    #[sea_orm(string_value = "retirement")]
    Retirement,
    #[sea_orm(string_value = "will")]
    Will,
    #[sea_orm(string_value = "probate")]
    Probate,
    #[sea_orm(string_value = "marriage")]
    Marriage,
    #[sea_orm(string_value = "divorce")]
    Divorce,
    #[sea_orm(string_value = "annulment")]
    Annulment,
    #[sea_orm(string_value = "engagement")]
    Engagement,
    #[sea_orm(string_value = "marriage_bann")]
    MarriageBann,
    #[sea_orm(string_value = "marriage_contract")]
    MarriageContract,
    #[sea_orm(string_value = "marriage_license")]
    MarriageLicense,
    #[sea_orm(string_value = "marriage_settlement")]
    MarriageSettlement,
    #[sea_orm(string_value = "other")]
    Other,
}

impl From<enums::FactType> for FactType {
    fn from(v: enums::FactType) -> Self {
        match v {
            enums::FactType::Birth => Self::Birth,
            enums::FactType::Death => Self::Death,
            enums::FactType::Baptism => Self::Baptism,
            enums::FactType::Christening => Self::Christening,
            enums::FactType::Burial => Self::Burial,
            enums::FactType::Cremation => Self::Cremation,
            enums::FactType::Adoption => Self::Adoption,
            enums::FactType::Emigration => Self::Emigration,
            enums::FactType::Immigration => Self::Immigration,
            enums::FactType::Naturalization => Self::Naturalization,
            enums::FactType::Census => Self::Census,
            enums::FactType::Graduation => Self::Graduation,
            enums::FactType::Retirement => Self::Retirement,
            enums::FactType::Will => Self::Will,
            enums::FactType::Probate => Self::Probate,
            enums::FactType::Marriage => Self::Marriage,
            enums::FactType::Divorce => Self::Divorce,
            enums::FactType::Annulment => Self::Annulment,
            enums::FactType::Engagement => Self::Engagement,
            enums::FactType::MarriageBann => Self::MarriageBann,
            enums::FactType::MarriageContract => Self::MarriageContract,
            enums::FactType::MarriageLicense => Self::MarriageLicense,
            enums::FactType::MarriageSettlement => Self::MarriageSettlement,
            enums::FactType::Other => Self::Other,
        }
    }
}

impl From<FactType> for enums::FactType {
    fn from(v: FactType) -> Self {
        match v {
            FactType::Birth => Self::Birth,
            FactType::Death => Self::Death,
            FactType::Baptism => Self::Baptism,
            FactType::Christening => Self::Christening,
            FactType::Burial => Self::Burial,
            FactType::Cremation => Self::Cremation,
            FactType::Adoption => Self::Adoption,
            FactType::Emigration => Self::Emigration,
            FactType::Immigration => Self::Immigration,
            FactType::Naturalization => Self::Naturalization,
            FactType::Census => Self::Census,
            FactType::Graduation => Self::Graduation,
            FactType::Retirement => Self::Retirement,
            FactType::Will => Self::Will,
            FactType::Probate => Self::Probate,
            FactType::Marriage => Self::Marriage,
            FactType::Divorce => Self::Divorce,
            FactType::Annulment => Self::Annulment,
            FactType::Engagement => Self::Engagement,
            FactType::MarriageBann => Self::MarriageBann,
            FactType::MarriageContract => Self::MarriageContract,
            FactType::MarriageLicense => Self::MarriageLicense,
            FactType::MarriageSettlement => Self::MarriageSettlement,
            FactType::Other => Self::Other,
        }
    }
}

/// Attribute type — stored as a string column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(12))")]
pub enum AttributeType {
    #[sea_orm(string_value = "occupation")]
    Occupation,
    #[sea_orm(string_value = "residence")]
    Residence,
    #[sea_orm(string_value = "education")]
    Education,
    #[sea_orm(string_value = "religion")]
    Religion,
    #[sea_orm(string_value = "title")]
    Title,
}

impl From<enums::AttributeType> for AttributeType {
    fn from(v: enums::AttributeType) -> Self {
        match v {
            enums::AttributeType::Occupation => Self::Occupation,
            enums::AttributeType::Residence => Self::Residence,
            enums::AttributeType::Education => Self::Education,
            enums::AttributeType::Religion => Self::Religion,
            enums::AttributeType::Title => Self::Title,
        }
    }
}

impl From<AttributeType> for enums::AttributeType {
    fn from(v: AttributeType) -> Self {
        match v {
            AttributeType::Occupation => Self::Occupation,
            AttributeType::Residence => Self::Residence,
            AttributeType::Education => Self::Education,
            AttributeType::Religion => Self::Religion,
            AttributeType::Title => Self::Title,
        }
    }
}

/// Association role — stored as a string column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(12))")]
pub enum AssociationRole {
    #[sea_orm(string_value = "godparent")]
    Godparent,
    #[sea_orm(string_value = "witness")]
    Witness,
    #[sea_orm(string_value = "friend")]
    Friend,
    #[sea_orm(string_value = "neighbor")]
    Neighbor,
    #[sea_orm(string_value = "guardian")]
    Guardian,
    #[sea_orm(string_value = "employer")]
    Employer,
    #[sea_orm(string_value = "other")]
    Other,
}

impl From<enums::AssociationRole> for AssociationRole {
    fn from(v: enums::AssociationRole) -> Self {
        match v {
            enums::AssociationRole::Godparent => Self::Godparent,
            enums::AssociationRole::Witness => Self::Witness,
            enums::AssociationRole::Friend => Self::Friend,
            enums::AssociationRole::Neighbor => Self::Neighbor,
            enums::AssociationRole::Guardian => Self::Guardian,
            enums::AssociationRole::Employer => Self::Employer,
            enums::AssociationRole::Other => Self::Other,
        }
    }
}

impl From<AssociationRole> for enums::AssociationRole {
    fn from(v: AssociationRole) -> Self {
        match v {
            AssociationRole::Godparent => Self::Godparent,
            AssociationRole::Witness => Self::Witness,
            AssociationRole::Friend => Self::Friend,
            AssociationRole::Neighbor => Self::Neighbor,
            AssociationRole::Guardian => Self::Guardian,
            AssociationRole::Employer => Self::Employer,
            AssociationRole::Other => Self::Other,
        }
    }
}

/// LDS ordinance type — stored as a string column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(15))")]
pub enum LdsOrdinanceType {
    #[sea_orm(string_value = "baptism")]
    Baptism,
    #[sea_orm(string_value = "confirmation")]
    Confirmation,
    #[sea_orm(string_value = "endowment")]
    Endowment,
    #[sea_orm(string_value = "sealing_child")]
    SealingChild,
    #[sea_orm(string_value = "sealing_spouse")]
    SealingSpouse,
}

impl From<enums::LdsOrdinanceType> for LdsOrdinanceType {
    fn from(v: enums::LdsOrdinanceType) -> Self {
        match v {
            enums::LdsOrdinanceType::Baptism => Self::Baptism,
            enums::LdsOrdinanceType::Confirmation => Self::Confirmation,
            enums::LdsOrdinanceType::Endowment => Self::Endowment,
            enums::LdsOrdinanceType::SealingChild => Self::SealingChild,
            enums::LdsOrdinanceType::SealingSpouse => Self::SealingSpouse,
        }
    }
}

impl From<LdsOrdinanceType> for enums::LdsOrdinanceType {
    fn from(v: LdsOrdinanceType) -> Self {
        match v {
            LdsOrdinanceType::Baptism => Self::Baptism,
            LdsOrdinanceType::Confirmation => Self::Confirmation,
            LdsOrdinanceType::Endowment => Self::Endowment,
            LdsOrdinanceType::SealingChild => Self::SealingChild,
            LdsOrdinanceType::SealingSpouse => Self::SealingSpouse,
        }
    }
}

/// Media kind — stored as a string column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
pub enum MediaKind {
    #[sea_orm(string_value = "photo")]
    Photo,
    #[sea_orm(string_value = "document")]
    Document,
    #[sea_orm(string_value = "audio")]
    Audio,
    #[sea_orm(string_value = "video")]
    Video,
}

impl From<enums::MediaKind> for MediaKind {
    fn from(v: enums::MediaKind) -> Self {
        match v {
            enums::MediaKind::Photo => Self::Photo,
            enums::MediaKind::Document => Self::Document,
            enums::MediaKind::Audio => Self::Audio,
            enums::MediaKind::Video => Self::Video,
        }
    }
}

impl From<MediaKind> for enums::MediaKind {
    fn from(v: MediaKind) -> Self {
        match v {
            MediaKind::Photo => Self::Photo,
            MediaKind::Document => Self::Document,
            MediaKind::Audio => Self::Audio,
            MediaKind::Video => Self::Video,
        }
    }
}

/// Fact owner kind — stored as a string column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
pub enum FactOwnerKind {
    #[sea_orm(string_value = "person")]
    Person,
    #[sea_orm(string_value = "family")]
    Family,
}

impl From<enums::FactOwnerKind> for FactOwnerKind {
    fn from(v: enums::FactOwnerKind) -> Self {
        match v {
            enums::FactOwnerKind::Person => Self::Person,
            enums::FactOwnerKind::Family => Self::Family,
        }
    }
}

impl From<FactOwnerKind> for enums::FactOwnerKind {
    fn from(v: FactOwnerKind) -> Self {
        match v {
            FactOwnerKind::Person => Self::Person,
            FactOwnerKind::Family => Self::Family,
        }
    }
}

/// Media owner kind — stored as a string column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
pub enum MediaOwnerKind {
    #[sea_orm(string_value = "person")]
    Person,
    #[sea_orm(string_value = "family")]
    Family,
    #[sea_orm(string_value = "source")]
    Source,
    #[sea_orm(string_value = "citation")]
    Citation,
    #[sea_orm(string_value = "event")]
    Event,
}

impl From<enums::MediaOwnerKind> for MediaOwnerKind {
    fn from(v: enums::MediaOwnerKind) -> Self {
        match v {
            enums::MediaOwnerKind::Person => Self::Person,
            enums::MediaOwnerKind::Family => Self::Family,
            enums::MediaOwnerKind::Source => Self::Source,
            enums::MediaOwnerKind::Citation => Self::Citation,
            enums::MediaOwnerKind::Event => Self::Event,
        }
    }
}

impl From<MediaOwnerKind> for enums::MediaOwnerKind {
    fn from(v: MediaOwnerKind) -> Self {
        match v {
            MediaOwnerKind::Person => Self::Person,
            MediaOwnerKind::Family => Self::Family,
            MediaOwnerKind::Source => Self::Source,
            MediaOwnerKind::Citation => Self::Citation,
            MediaOwnerKind::Event => Self::Event,
        }
    }
}
