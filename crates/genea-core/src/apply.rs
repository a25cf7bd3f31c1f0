//! Application of sparse `changes` maps to domain entities.
//!
//! Each function walks a per-entity whitelist of recognized field names and
//! coerces the JSON value into the field's type. Explicit JSON null clears a
//! nullable field; keys outside the whitelist are ignored so newer writers
//! stay compatible with older readers. The projection, the rollback command,
//! and the history service all share these functions.

use serde_json::Value;

use crate::enums::{
    AssociationRole, AttributeType, ChildRelationship, EvidenceType, FactType, Gender,
    InformantType, MediaKind, NameType, RelationshipType, ResearchStatus, SourceQuality,
    SourceType,
};
use crate::error::GeneaError;
use crate::event::Changes;
use crate::types::{
    Association, Attribute, Citation, CropRect, Family, FamilyChild, LdsOrdinance, LifeEvent,
    Media, Note, Person, PersonName, Repository, Source, Submitter,
};
use crate::types::citation::Apid;

fn coerce<T: serde::de::DeserializeOwned>(field: &str, value: &Value) -> Result<T, GeneaError> {
    serde_json::from_value(value.clone())
        .map_err(|e| GeneaError::validation(field, format!("cannot coerce value: {e}")))
}

pub fn apply_person(person: &mut Person, changes: &Changes) -> Result<(), GeneaError> {
    for (key, value) in changes {
        match key.as_str() {
            "given" => person.given = coerce(key, value)?,
            "surname" => person.surname = coerce(key, value)?,
            "gender" => person.gender = coerce::<Gender>(key, value)?,
            "birth_date" => person.birth_date = coerce(key, value)?,
            "birth_place" => person.birth_place = coerce(key, value)?,
            "death_date" => person.death_date = coerce(key, value)?,
            "death_place" => person.death_place = coerce(key, value)?,
            "notes" => person.notes = coerce(key, value)?,
            "research_status" => person.research_status = coerce::<ResearchStatus>(key, value)?,
            "fsftid" => person.fsftid = coerce(key, value)?,
            "brick_wall_active" => person.brick_wall_active = coerce(key, value)?,
            "brick_wall_note" => person.brick_wall_note = coerce(key, value)?,
            "brick_wall_since" => person.brick_wall_since = coerce(key, value)?,
            "brick_wall_resolved_at" => person.brick_wall_resolved_at = coerce(key, value)?,
            _ => {}
        }
    }
    Ok(())
}

pub fn apply_person_name(name: &mut PersonName, changes: &Changes) -> Result<(), GeneaError> {
    for (key, value) in changes {
        match key.as_str() {
            "name_type" => name.name_type = coerce::<NameType>(key, value)?,
            "given" => name.given = coerce(key, value)?,
            "surname" => name.surname = coerce(key, value)?,
            "prefix" => name.prefix = coerce(key, value)?,
            "suffix" => name.suffix = coerce(key, value)?,
            "surname_prefix" => name.surname_prefix = coerce(key, value)?,
            "nickname" => name.nickname = coerce(key, value)?,
            "is_primary" => name.is_primary = coerce(key, value)?,
            _ => {}
        }
    }
    Ok(())
}

pub fn apply_family(family: &mut Family, changes: &Changes) -> Result<(), GeneaError> {
    for (key, value) in changes {
        match key.as_str() {
            "partner1_id" => family.partner1_id = coerce(key, value)?,
            "partner2_id" => family.partner2_id = coerce(key, value)?,
            "relationship_type" => {
                family.relationship_type = coerce::<RelationshipType>(key, value)?
            }
            "marriage_date" => family.marriage_date = coerce(key, value)?,
            "marriage_place" => family.marriage_place = coerce(key, value)?,
            _ => {}
        }
    }
    Ok(())
}

pub fn apply_family_child(child: &mut FamilyChild, changes: &Changes) -> Result<(), GeneaError> {
    for (key, value) in changes {
        match key.as_str() {
            "relationship" => child.relationship = coerce::<ChildRelationship>(key, value)?,
            "sequence" => child.sequence = coerce(key, value)?,
            _ => {}
        }
    }
    Ok(())
}

pub fn apply_life_event(event: &mut LifeEvent, changes: &Changes) -> Result<(), GeneaError> {
    for (key, value) in changes {
        match key.as_str() {
            "fact_type" => event.fact_type = coerce::<FactType>(key, value)?,
            "date" => event.date = coerce(key, value)?,
            "place" => event.place = coerce(key, value)?,
            "address" => event.address = coerce(key, value)?,
            "description" => event.description = coerce(key, value)?,
            "cause" => event.cause = coerce(key, value)?,
            "age" => event.age = coerce(key, value)?,
            _ => {}
        }
    }
    Ok(())
}

pub fn apply_attribute(attribute: &mut Attribute, changes: &Changes) -> Result<(), GeneaError> {
    for (key, value) in changes {
        match key.as_str() {
            "attribute_type" => attribute.attribute_type = coerce::<AttributeType>(key, value)?,
            "value" => attribute.value = coerce(key, value)?,
            "date" => attribute.date = coerce(key, value)?,
            "place" => attribute.place = coerce(key, value)?,
            _ => {}
        }
    }
    Ok(())
}

pub fn apply_association(
    association: &mut Association,
    changes: &Changes,
) -> Result<(), GeneaError> {
    for (key, value) in changes {
        match key.as_str() {
            "associate_id" => association.associate_id = coerce(key, value)?,
            "role" => association.role = coerce::<AssociationRole>(key, value)?,
            "phrase" => association.phrase = coerce(key, value)?,
            "notes" => association.notes = coerce(key, value)?,
            _ => {}
        }
    }
    Ok(())
}

pub fn apply_lds_ordinance(
    ordinance: &mut LdsOrdinance,
    changes: &Changes,
) -> Result<(), GeneaError> {
    for (key, value) in changes {
        match key.as_str() {
            "date" => ordinance.date = coerce(key, value)?,
            "temple" => ordinance.temple = coerce(key, value)?,
            "status" => ordinance.status = coerce(key, value)?,
            "place" => ordinance.place = coerce(key, value)?,
            _ => {}
        }
    }
    Ok(())
}

pub fn apply_source(source: &mut Source, changes: &Changes) -> Result<(), GeneaError> {
    for (key, value) in changes {
        match key.as_str() {
            "source_type" => source.source_type = coerce::<SourceType>(key, value)?,
            "title" => source.title = coerce(key, value)?,
            "author" => source.author = coerce(key, value)?,
            "publisher" => source.publisher = coerce(key, value)?,
            "publish_date" => source.publish_date = coerce(key, value)?,
            "url" => source.url = coerce(key, value)?,
            "repository_id" => source.repository_id = coerce(key, value)?,
            "repository_name" => source.repository_name = coerce(key, value)?,
            "call_number" => source.call_number = coerce(key, value)?,
            "notes" => source.notes = coerce(key, value)?,
            _ => {}
        }
    }
    Ok(())
}

pub fn apply_repository(repository: &mut Repository, changes: &Changes) -> Result<(), GeneaError> {
    for (key, value) in changes {
        match key.as_str() {
            "name" => repository.name = coerce(key, value)?,
            "address" => repository.address = coerce(key, value)?,
            "phone" => repository.phone = coerce(key, value)?,
            "email" => repository.email = coerce(key, value)?,
            "website" => repository.website = coerce(key, value)?,
            _ => {}
        }
    }
    Ok(())
}

pub fn apply_citation(citation: &mut Citation, changes: &Changes) -> Result<(), GeneaError> {
    for (key, value) in changes {
        match key.as_str() {
            "page" => citation.page = coerce(key, value)?,
            "volume" => citation.volume = coerce(key, value)?,
            "source_quality" => {
                citation.source_quality = coerce::<Option<SourceQuality>>(key, value)?
            }
            "informant_type" => {
                citation.informant_type = coerce::<Option<InformantType>>(key, value)?
            }
            "evidence_type" => {
                citation.evidence_type = coerce::<Option<EvidenceType>>(key, value)?
            }
            "text" => citation.text = coerce(key, value)?,
            "analysis" => citation.analysis = coerce(key, value)?,
            // Accepted both as the wire form string and as the structured
            // object a rollback diff produces.
            "apid" => {
                citation.apid = match value {
                    Value::Null => None,
                    Value::String(raw) => Some(Apid::parse(raw)),
                    other => coerce::<Option<Apid>>(key, other)?,
                };
            }
            _ => {}
        }
    }
    Ok(())
}

pub fn apply_media(media: &mut Media, changes: &Changes) -> Result<(), GeneaError> {
    for (key, value) in changes {
        match key.as_str() {
            "title" => media.title = coerce(key, value)?,
            "description" => media.description = coerce(key, value)?,
            "media_kind" => media.media_kind = coerce::<MediaKind>(key, value)?,
            "file_name" => media.file_name = coerce(key, value)?,
            "crop" => media.crop = coerce::<Option<CropRect>>(key, value)?,
            "thumbnail" => {
                media.thumbnail = match coerce::<Option<String>>(key, value)? {
                    Some(b64) => Some(
                        data_encoding::BASE64
                            .decode(b64.as_bytes())
                            .map_err(|e| GeneaError::validation(key, e.to_string()))?,
                    ),
                    None => None,
                };
            }
            _ => {}
        }
    }
    Ok(())
}

pub fn apply_note(note: &mut Note, changes: &Changes) -> Result<(), GeneaError> {
    for (key, value) in changes {
        match key.as_str() {
            "text" => note.text = coerce(key, value)?,
            _ => {}
        }
    }
    Ok(())
}

pub fn apply_submitter(submitter: &mut Submitter, changes: &Changes) -> Result<(), GeneaError> {
    for (key, value) in changes {
        match key.as_str() {
            "name" => submitter.name = coerce(key, value)?,
            "address" => submitter.address = coerce(key, value)?,
            "phone" => submitter.phone = coerce(key, value)?,
            "email" => submitter.email = coerce(key, value)?,
            _ => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn changes(pairs: &[(&str, Value)]) -> Changes {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_explicit_null_clears_field() {
        let mut person = Person {
            notes: Some("to be cleared".into()),
            ..Default::default()
        };
        apply_person(&mut person, &changes(&[("notes", Value::Null)])).unwrap();
        assert_eq!(person.notes, None);
    }

    #[test]
    fn test_absent_field_is_untouched() {
        let mut person = Person {
            notes: Some("kept".into()),
            ..Default::default()
        };
        apply_person(&mut person, &changes(&[("given", json!("Jean"))])).unwrap();
        assert_eq!(person.notes.as_deref(), Some("kept"));
        assert_eq!(person.given.as_deref(), Some("Jean"));
    }

    #[test]
    fn test_unknown_key_is_ignored() {
        let mut person = Person::default();
        apply_person(&mut person, &changes(&[("shoe_size", json!(42))])).unwrap();
    }

    #[test]
    fn test_wrong_type_is_rejected() {
        let mut person = Person::default();
        let err =
            apply_person(&mut person, &changes(&[("gender", json!("androgyne"))])).unwrap_err();
        assert!(matches!(err, GeneaError::Validation { .. }));
    }

    #[test]
    fn test_gendate_coercion() {
        let mut person = Person::default();
        let date = crate::gendate::GenDate::parse("ABT 1842");
        apply_person(
            &mut person,
            &changes(&[("birth_date", serde_json::to_value(&date).unwrap())]),
        )
        .unwrap();
        assert_eq!(person.birth_date.unwrap().year, Some(1842));
    }

    #[test]
    fn test_citation_apid_from_wire_form() {
        let mut citation: Citation = serde_json::from_value(json!({
            "id": uuid::Uuid::nil(),
            "source_id": uuid::Uuid::nil(),
            "fact_type": "birth",
            "owner_kind": "person",
            "owner_id": uuid::Uuid::nil(),
            "page": null, "volume": null,
            "source_quality": null, "informant_type": null, "evidence_type": null,
            "text": null, "analysis": null, "apid": null,
            "version": 1,
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z"
        }))
        .unwrap();
        apply_citation(&mut citation, &changes(&[("apid", json!("1,7602::99"))])).unwrap();
        assert_eq!(citation.apid.unwrap().db, "7602");
    }
}
