//! Domain enums for Genea.
//!
//! All enums are serializable and use string representations for database
//! storage and event payloads. Each vocabulary is closed: the projection and
//! the GEDCOM codec match on them exhaustively.

use serde::{Deserialize, Serialize};

/// Gender of a person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    #[default]
    Unknown,
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Male => write!(f, "male"),
            Self::Female => write!(f, "female"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Type of a person's name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameType {
    #[default]
    Birth,
    Married,
    AlsoKnownAs,
    Immigrant,
    Religious,
    Professional,
}

impl std::fmt::Display for NameType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Birth => write!(f, "birth"),
            Self::Married => write!(f, "married"),
            Self::AlsoKnownAs => write!(f, "also_known_as"),
            Self::Immigrant => write!(f, "immigrant"),
            Self::Religious => write!(f, "religious"),
            Self::Professional => write!(f, "professional"),
        }
    }
}

/// Research status of a person's identification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResearchStatus {
    Certain,
    Probable,
    Possible,
    #[default]
    Unknown,
}

impl std::fmt::Display for ResearchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Certain => write!(f, "certain"),
            Self::Probable => write!(f, "probable"),
            Self::Possible => write!(f, "possible"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Type of relationship between the two partners of a family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipType {
    Marriage,
    Partnership,
    #[default]
    Unknown,
}

impl std::fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Marriage => write!(f, "marriage"),
            Self::Partnership => write!(f, "partnership"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Type of relationship between a child and a family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChildRelationship {
    Biological,
    Adopted,
    Foster,
}

impl std::fmt::Display for ChildRelationship {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Biological => write!(f, "biological"),
            Self::Adopted => write!(f, "adopted"),
            Self::Foster => write!(f, "foster"),
        }
    }
}

/// Type of a source record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    Book,
    Census,
    ChurchRecord,
    CivilRegistration,
    MilitaryRecord,
    Newspaper,
    Photograph,
    Interview,
    Manuscript,
    Map,
    Website,
    #[default]
    Other,
}

impl std::fmt::Display for SourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Book => write!(f, "book"),
            Self::Census => write!(f, "census"),
            Self::ChurchRecord => write!(f, "church_record"),
            Self::CivilRegistration => write!(f, "civil_registration"),
            Self::MilitaryRecord => write!(f, "military_record"),
            Self::Newspaper => write!(f, "newspaper"),
            Self::Photograph => write!(f, "photograph"),
            Self::Interview => write!(f, "interview"),
            Self::Manuscript => write!(f, "manuscript"),
            Self::Map => write!(f, "map"),
            Self::Website => write!(f, "website"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// GPS source quality: how the information entered the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceQuality {
    Original,
    Derivative,
    Authored,
}

impl std::fmt::Display for SourceQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Original => write!(f, "original"),
            Self::Derivative => write!(f, "derivative"),
            Self::Authored => write!(f, "authored"),
        }
    }
}

/// GPS informant type: how close the informant was to the fact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InformantType {
    Primary,
    Secondary,
    Undetermined,
}

impl std::fmt::Display for InformantType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Primary => write!(f, "primary"),
            Self::Secondary => write!(f, "secondary"),
            Self::Undetermined => write!(f, "undetermined"),
        }
    }
}

/// GPS evidence type: how the information answers the research question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceType {
    Direct,
    Indirect,
    Negative,
}

impl std::fmt::Display for EvidenceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Direct => write!(f, "direct"),
            Self::Indirect => write!(f, "indirect"),
            Self::Negative => write!(f, "negative"),
        }
    }
}

/// Type of genealogical fact carried by a life event or a citation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactType {
    // Individual events
    Birth,
    Death,
    Baptism,
    Christening,
    Burial,
    Cremation,
    Adoption,
    Emigration,
    Immigration,
    Naturalization,
    Census,
    Graduation,
    Retirement,
    Will,
    Probate,
    // Family events
    Marriage,
    Divorce,
    Annulment,
    Engagement,
    MarriageBann,
    MarriageContract,
    MarriageLicense,
    MarriageSettlement,
    // Generic
    Other,
}

impl FactType {
    /// Returns `true` if this fact type applies to an individual person.
    pub fn is_individual(&self) -> bool {
        matches!(
            self,
            Self::Birth
                | Self::Death
                | Self::Baptism
                | Self::Christening
                | Self::Burial
                | Self::Cremation
                | Self::Adoption
                | Self::Emigration
                | Self::Immigration
                | Self::Naturalization
                | Self::Census
                | Self::Graduation
                | Self::Retirement
                | Self::Will
                | Self::Probate
        )
    }

    /// Returns `true` if this fact type applies to a family.
    pub fn is_family(&self) -> bool {
        matches!(
            self,
            Self::Marriage
                | Self::Divorce
                | Self::Annulment
                | Self::Engagement
                | Self::MarriageBann
                | Self::MarriageContract
                | Self::MarriageLicense
                | Self::MarriageSettlement
        )
    }
}

impl std::fmt::Display for FactType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Birth => write!(f, "birth"),
            Self::Death => write!(f, "death"),
            Self::Baptism => write!(f, "baptism"),
            Self::Christening => write!(f, "christening"),
            Self::Burial => write!(f, "burial"),
            Self::Cremation => write!(f, "cremation"),
            Self::Adoption => write!(f, "adoption"),
            Self::Emigration => write!(f, "emigration"),
            Self::Immigration => write!(f, "immigration"),
            Self::Naturalization => write!(f, "naturalization"),
            Self::Census => write!(f, "census"),
            Self::Graduation => write!(f, "graduation"),
            Self::Retirement => write!(f, "retirement"),
            Self::Will => write!(f, "will"),
            Self::Probate => write!(f, "probate"),
            Self::Marriage => write!(f, "marriage"),
            Self::Divorce => write!(f, "divorce"),
            Self::Annulment => write!(f, "annulment"),
            Self::Engagement => write!(f, "engagement"),
            Self::MarriageBann => write!(f, "marriage_bann"),
            Self::MarriageContract => write!(f, "marriage_contract"),
            Self::MarriageLicense => write!(f, "marriage_license"),
            Self::MarriageSettlement => write!(f, "marriage_settlement"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// Type of a person attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    Occupation,
    Residence,
    Education,
    Religion,
    Title,
}

impl std::fmt::Display for AttributeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Occupation => write!(f, "occupation"),
            Self::Residence => write!(f, "residence"),
            Self::Education => write!(f, "education"),
            Self::Religion => write!(f, "religion"),
            Self::Title => write!(f, "title"),
        }
    }
}

/// Role of an associate relative to a person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssociationRole {
    Godparent,
    Witness,
    Friend,
    Neighbor,
    Guardian,
    Employer,
    Other,
}

impl std::fmt::Display for AssociationRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Godparent => write!(f, "godparent"),
            Self::Witness => write!(f, "witness"),
            Self::Friend => write!(f, "friend"),
            Self::Neighbor => write!(f, "neighbor"),
            Self::Guardian => write!(f, "guardian"),
            Self::Employer => write!(f, "employer"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// Type of an LDS ordinance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LdsOrdinanceType {
    Baptism,
    Confirmation,
    Endowment,
    SealingChild,
    SealingSpouse,
}

impl LdsOrdinanceType {
    /// Sealing-spouse binds to a family; every other ordinance to a person.
    pub fn is_family(&self) -> bool {
        matches!(self, Self::SealingSpouse)
    }
}

impl std::fmt::Display for LdsOrdinanceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Baptism => write!(f, "baptism"),
            Self::Confirmation => write!(f, "confirmation"),
            Self::Endowment => write!(f, "endowment"),
            Self::SealingChild => write!(f, "sealing_child"),
            Self::SealingSpouse => write!(f, "sealing_spouse"),
        }
    }
}

/// Kind of media attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Photo,
    Document,
    Audio,
    Video,
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Photo => write!(f, "photo"),
            Self::Document => write!(f, "document"),
            Self::Audio => write!(f, "audio"),
            Self::Video => write!(f, "video"),
        }
    }
}

/// Kind of entity a fact (life event, citation, LDS ordinance) belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactOwnerKind {
    Person,
    Family,
}

impl std::fmt::Display for FactOwnerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Person => write!(f, "person"),
            Self::Family => write!(f, "family"),
        }
    }
}

/// Kind of entity a media item is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaOwnerKind {
    Person,
    Family,
    Source,
    Citation,
    Event,
}

impl std::fmt::Display for MediaOwnerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Person => write!(f, "person"),
            Self::Family => write!(f, "family"),
            Self::Source => write!(f, "source"),
            Self::Citation => write!(f, "citation"),
            Self::Event => write!(f, "event"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fact_type_individual() {
        assert!(FactType::Birth.is_individual());
        assert!(FactType::Christening.is_individual());
        assert!(!FactType::Marriage.is_individual());
        assert!(!FactType::Other.is_individual());
    }

    #[test]
    fn test_fact_type_family() {
        assert!(FactType::Marriage.is_family());
        assert!(FactType::MarriageBann.is_family());
        assert!(!FactType::Burial.is_family());
        assert!(!FactType::Other.is_family());
    }

    #[test]
    fn test_gender_display() {
        assert_eq!(Gender::Male.to_string(), "male");
        assert_eq!(Gender::Female.to_string(), "female");
        assert_eq!(Gender::Unknown.to_string(), "unknown");
    }

    #[test]
    fn test_gender_serde_roundtrip() {
        let json = serde_json::to_string(&Gender::Female).unwrap();
        assert_eq!(json, r#""female""#);
        let deserialized: Gender = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, Gender::Female);
    }

    #[test]
    fn test_fact_type_serde_roundtrip() {
        let json = serde_json::to_string(&FactType::MarriageBann).unwrap();
        assert_eq!(json, r#""marriage_bann""#);
        let deserialized: FactType = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, FactType::MarriageBann);
    }

    #[test]
    fn test_lds_ordinance_owner() {
        assert!(LdsOrdinanceType::SealingSpouse.is_family());
        assert!(!LdsOrdinanceType::Endowment.is_family());
        assert!(!LdsOrdinanceType::SealingChild.is_family());
    }

    #[test]
    fn test_evidence_serde_roundtrip() {
        let json = serde_json::to_string(&EvidenceType::Negative).unwrap();
        assert_eq!(json, r#""negative""#);
        let deserialized: EvidenceType = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, EvidenceType::Negative);
    }
}
