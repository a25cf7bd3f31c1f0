//! Mapping between GEDCOM tags and the closed domain vocabularies.

use genea_core::enums::{
    AssociationRole, AttributeType, ChildRelationship, FactType, LdsOrdinanceType, MediaKind,
    NameType,
};

/// GEDCOM event tag for a fact type. `Other` has no canonical tag and maps
/// to the generic `EVEN`.
pub fn fact_tag(fact: FactType) -> &'static str {
    match fact {
        FactType::Birth => "BIRT",
        FactType::Death => "DEAT",
        FactType::Baptism => "BAPM",
        FactType::Christening => "CHR",
        FactType::Burial => "BURI",
        FactType::Cremation => "CREM",
        FactType::Adoption => "ADOP",
        FactType::Emigration => "EMIG",
        FactType::Immigration => "IMMI",
        FactType::Naturalization => "NATU",
        FactType::Census => "CENS",
        FactType::Graduation => "GRAD",
        FactType::Retirement => "RETI",
        FactType::Will => "WILL",
        FactType::Probate => "PROB",
        FactType::Marriage => "MARR",
        FactType::Divorce => "DIV",
        FactType::Annulment => "ANUL",
        FactType::Engagement => "ENGA",
        FactType::MarriageBann => "MARB",
        FactType::MarriageContract => "MARC",
        FactType::MarriageLicense => "MARL",
        FactType::MarriageSettlement => "MARS",
        FactType::Other => "EVEN",
    }
}

/// Fact type for a GEDCOM event tag; `None` when the tag is not an event.
pub fn fact_from_tag(tag: &str) -> Option<FactType> {
    Some(match tag {
        "BIRT" => FactType::Birth,
        "DEAT" => FactType::Death,
        "BAPM" => FactType::Baptism,
        "CHR" => FactType::Christening,
        "BURI" => FactType::Burial,
        "CREM" => FactType::Cremation,
        "ADOP" => FactType::Adoption,
        "EMIG" => FactType::Emigration,
        "IMMI" => FactType::Immigration,
        "NATU" => FactType::Naturalization,
        "CENS" => FactType::Census,
        "GRAD" => FactType::Graduation,
        "RETI" => FactType::Retirement,
        "WILL" => FactType::Will,
        "PROB" => FactType::Probate,
        "MARR" => FactType::Marriage,
        "DIV" => FactType::Divorce,
        "ANUL" => FactType::Annulment,
        "ENGA" => FactType::Engagement,
        "MARB" => FactType::MarriageBann,
        "MARC" => FactType::MarriageContract,
        "MARL" => FactType::MarriageLicense,
        "MARS" => FactType::MarriageSettlement,
        "EVEN" => FactType::Other,
        _ => return None,
    })
}

pub fn attribute_tag(attribute: AttributeType) -> &'static str {
    match attribute {
        AttributeType::Occupation => "OCCU",
        AttributeType::Residence => "RESI",
        AttributeType::Education => "EDUC",
        AttributeType::Religion => "RELI",
        AttributeType::Title => "TITL",
    }
}

pub fn attribute_from_tag(tag: &str) -> Option<AttributeType> {
    Some(match tag {
        "OCCU" => AttributeType::Occupation,
        "RESI" => AttributeType::Residence,
        "EDUC" => AttributeType::Education,
        "RELI" => AttributeType::Religion,
        "TITL" => AttributeType::Title,
        _ => return None,
    })
}

pub fn lds_tag(ordinance: LdsOrdinanceType) -> &'static str {
    match ordinance {
        LdsOrdinanceType::Baptism => "BAPL",
        LdsOrdinanceType::Confirmation => "CONL",
        LdsOrdinanceType::Endowment => "ENDL",
        LdsOrdinanceType::SealingChild => "SLGC",
        LdsOrdinanceType::SealingSpouse => "SLGS",
    }
}

pub fn lds_from_tag(tag: &str) -> Option<LdsOrdinanceType> {
    Some(match tag {
        "BAPL" => LdsOrdinanceType::Baptism,
        "CONL" => LdsOrdinanceType::Confirmation,
        "ENDL" => LdsOrdinanceType::Endowment,
        "SLGC" => LdsOrdinanceType::SealingChild,
        "SLGS" => LdsOrdinanceType::SealingSpouse,
        _ => return None,
    })
}

/// `NAME.TYPE` values per the 5.5.1 and 7.0 enumerations.
pub fn name_type_from_value(value: &str) -> NameType {
    match value.to_lowercase().as_str() {
        "birth" => NameType::Birth,
        "married" | "marnm" => NameType::Married,
        "aka" | "also_known_as" => NameType::AlsoKnownAs,
        "immigrant" | "immigration" => NameType::Immigrant,
        "religious" => NameType::Religious,
        "professional" => NameType::Professional,
        _ => NameType::Birth,
    }
}

pub fn name_type_value(name_type: NameType) -> &'static str {
    match name_type {
        NameType::Birth => "birth",
        NameType::Married => "married",
        NameType::AlsoKnownAs => "aka",
        NameType::Immigrant => "immigrant",
        NameType::Religious => "religious",
        NameType::Professional => "professional",
    }
}

/// `FAMC.PEDI` values: `birth`, `sealing`, and the empty string mean
/// biological; unknown values fall back to biological.
pub fn pedigree_from_value(value: &str) -> ChildRelationship {
    match value.to_lowercase().as_str() {
        "adopted" | "adop" => ChildRelationship::Adopted,
        "foster" => ChildRelationship::Foster,
        _ => ChildRelationship::Biological,
    }
}

pub fn pedigree_value(relationship: ChildRelationship) -> &'static str {
    match relationship {
        ChildRelationship::Biological => "birth",
        ChildRelationship::Adopted => "adopted",
        ChildRelationship::Foster => "foster",
    }
}

/// `ASSO.RELA` values.
pub fn role_from_value(value: &str) -> AssociationRole {
    match value.to_lowercase().as_str() {
        "godparent" | "godfather" | "godmother" => AssociationRole::Godparent,
        "witness" => AssociationRole::Witness,
        "friend" => AssociationRole::Friend,
        "neighbor" | "neighbour" => AssociationRole::Neighbor,
        "guardian" => AssociationRole::Guardian,
        "employer" => AssociationRole::Employer,
        _ => AssociationRole::Other,
    }
}

pub fn role_value(role: AssociationRole) -> &'static str {
    match role {
        AssociationRole::Godparent => "godparent",
        AssociationRole::Witness => "witness",
        AssociationRole::Friend => "friend",
        AssociationRole::Neighbor => "neighbor",
        AssociationRole::Guardian => "guardian",
        AssociationRole::Employer => "employer",
        AssociationRole::Other => "other",
    }
}

/// `OBJE.FILE.FORM.MEDI` values.
pub fn media_kind_from_value(value: &str) -> MediaKind {
    match value.to_lowercase().as_str() {
        "photo" | "photograph" => MediaKind::Photo,
        "audio" => MediaKind::Audio,
        "video" => MediaKind::Video,
        _ => MediaKind::Document,
    }
}

pub fn media_kind_value(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Photo => "photo",
        MediaKind::Document => "document",
        MediaKind::Audio => "audio",
        MediaKind::Video => "video",
    }
}

/// MIME type for a `FORM` value (which is usually a bare extension).
pub fn mime_from_form(form: &str) -> String {
    match form.to_lowercase().as_str() {
        "jpeg" | "jpg" => "image/jpeg".into(),
        "png" => "image/png".into(),
        "gif" => "image/gif".into(),
        "bmp" => "image/bmp".into(),
        "tiff" | "tif" => "image/tiff".into(),
        "pdf" => "application/pdf".into(),
        "wav" => "audio/wav".into(),
        "mp3" => "audio/mpeg".into(),
        "mp4" => "video/mp4".into(),
        other if other.contains('/') => other.to_string(),
        _ => "application/octet-stream".into(),
    }
}

/// `FORM` value for a MIME type.
pub fn form_from_mime(mime: &str) -> String {
    match mime {
        "image/jpeg" => "jpeg".into(),
        "image/png" => "png".into(),
        "image/gif" => "gif".into(),
        "image/bmp" => "bmp".into(),
        "image/tiff" => "tiff".into(),
        "application/pdf" => "pdf".into(),
        "audio/wav" => "wav".into(),
        "audio/mpeg" => "mp3".into(),
        "video/mp4" => "mp4".into(),
        other => other.to_string(),
    }
}

/// Parse a GEDCOM `LATI`/`LONG` value: direction byte then decimal degrees;
/// `S` and `W` negate.
pub fn parse_coordinate(value: &str) -> Option<f64> {
    let value = value.trim();
    let mut chars = value.chars();
    let first = chars.next()?;
    let rest = chars.as_str();
    match first.to_ascii_uppercase() {
        'N' | 'E' => rest.trim().parse().ok(),
        'S' | 'W' => rest.trim().parse::<f64>().ok().map(|v| -v),
        _ => value.parse().ok(),
    }
}

/// Format a latitude for `LATI`.
pub fn format_latitude(value: f64) -> String {
    if value < 0.0 {
        format!("S{}", -value)
    } else {
        format!("N{value}")
    }
}

/// Format a longitude for `LONG`.
pub fn format_longitude(value: f64) -> String {
    if value < 0.0 {
        format!("W{}", -value)
    } else {
        format!("E{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_fact_tag_roundtrips() {
        for fact in [
            FactType::Birth,
            FactType::Death,
            FactType::Baptism,
            FactType::Christening,
            FactType::Burial,
            FactType::Cremation,
            FactType::Adoption,
            FactType::Emigration,
            FactType::Immigration,
            FactType::Naturalization,
            FactType::Census,
            FactType::Graduation,
            FactType::Retirement,
            FactType::Will,
            FactType::Probate,
            FactType::Marriage,
            FactType::Divorce,
            FactType::Annulment,
            FactType::Engagement,
            FactType::MarriageBann,
            FactType::MarriageContract,
            FactType::MarriageLicense,
            FactType::MarriageSettlement,
            FactType::Other,
        ] {
            assert_eq!(fact_from_tag(fact_tag(fact)), Some(fact));
        }
    }

    #[test]
    fn test_pedigree_values() {
        assert_eq!(pedigree_from_value("birth"), ChildRelationship::Biological);
        assert_eq!(pedigree_from_value("sealing"), ChildRelationship::Biological);
        assert_eq!(pedigree_from_value(""), ChildRelationship::Biological);
        assert_eq!(pedigree_from_value("adopted"), ChildRelationship::Adopted);
        assert_eq!(pedigree_from_value("ADOP"), ChildRelationship::Adopted);
        assert_eq!(pedigree_from_value("foster"), ChildRelationship::Foster);
        assert_eq!(pedigree_from_value("unknown"), ChildRelationship::Biological);
    }

    #[test]
    fn test_coordinates_negate_south_and_west() {
        assert_eq!(parse_coordinate("N50.8333"), Some(50.8333));
        assert_eq!(parse_coordinate("s12.5"), Some(-12.5));
        assert_eq!(parse_coordinate("W1.5833"), Some(-1.5833));
        assert_eq!(parse_coordinate("E0.0"), Some(0.0));
        assert_eq!(format_latitude(-12.5), "S12.5");
        assert_eq!(format_longitude(1.5833), "E1.5833");
    }
}
