//! GEDCOM → domain import.
//!
//! Four passes over the record stream: repositories → sources → individuals
//! → families. Cross-references are tracked in xref → UUID maps; dangling
//! references produce warnings and the host record is still created. The
//! only fatal condition is an unreadable stream.

use std::collections::HashMap;

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use genea_core::GeneaError;
use genea_core::enums::{
    ChildRelationship, EvidenceType, FactOwnerKind, FactType, Gender, InformantType,
    MediaOwnerKind, SourceType,
};
use genea_core::gendate::GenDate;
use genea_core::types::citation::Apid;
use genea_core::types::{
    Address, Association, Attribute, Citation, Family, FamilyChild, LdsOrdinance, LifeEvent,
    Media, Note, Person, PersonName, Place, Repository, Source, Submitter,
};

use crate::GedcomData;
use crate::encoding::decode_gedcom_bytes;
use crate::parser::{GedRecord, parse_records};
use crate::tags;

/// Import a GEDCOM byte stream.
///
/// # Errors
///
/// [`GeneaError::CodecMalformed`] when the stream cannot be decoded or
/// contains no records; every other issue is a warning in the result.
pub fn import_gedcom(bytes: &[u8]) -> Result<GedcomData, GeneaError> {
    let (text, encoding) = decode_gedcom_bytes(bytes)?;
    debug!(%encoding, "decoded GEDCOM input");
    import_str(&text)
}

/// Import already-decoded GEDCOM text.
pub fn import_str(text: &str) -> Result<GedcomData, GeneaError> {
    let (records, parse_warnings) = parse_records(text);
    if records.is_empty() {
        return Err(GeneaError::CodecMalformed("no GEDCOM records found".into()));
    }

    let mut importer = Importer {
        result: GedcomData {
            warnings: parse_warnings,
            ..Default::default()
        },
        ..Default::default()
    };
    importer.run(&records);
    Ok(importer.result)
}

#[derive(Default)]
struct Importer {
    result: GedcomData,
    indi_map: HashMap<String, Uuid>,
    fam_map: HashMap<String, Uuid>,
    sour_map: HashMap<String, Uuid>,
    repo_map: HashMap<String, Uuid>,
    obje_map: HashMap<String, Uuid>,
    /// `(family xref, individual xref)` → pedigree linkage from FAMC.PEDI.
    pedigree: HashMap<(String, String), ChildRelationship>,
    /// Owner assigned to a top-level OBJE record by the first reference.
    media_owner: HashMap<Uuid, (MediaOwnerKind, Uuid)>,
}

impl Importer {
    fn warn(&mut self, message: impl Into<String>) {
        self.result.warnings.push(message.into());
    }

    fn run(&mut self, records: &[GedRecord]) {
        // Allocate UUIDs for every cross-referenced record up front so any
        // pass can resolve forward references.
        for record in records {
            let Some(xref) = record.line.xref.clone() else {
                continue;
            };
            let map = match record.line.tag.as_str() {
                "INDI" => &mut self.indi_map,
                "FAM" => &mut self.fam_map,
                "SOUR" => &mut self.sour_map,
                "REPO" => &mut self.repo_map,
                "OBJE" => &mut self.obje_map,
                _ => continue,
            };
            map.insert(xref, Uuid::now_v7());
        }

        if let Some(head) = records.iter().find(|r| r.line.tag == "HEAD") {
            self.result.vendor = head.child_value("SOUR").map(str::to_string);
        }

        // Pass 1: repositories.
        for record in records.iter().filter(|r| r.line.tag == "REPO") {
            self.import_repository(record);
        }
        // Pass 2: sources.
        for record in records.iter().filter(|r| r.line.tag == "SOUR") {
            self.import_source(record);
        }
        // Pass 3: individuals (records pedigree links for pass 4).
        for record in records.iter().filter(|r| r.line.tag == "INDI") {
            self.import_individual(record);
        }
        // Pass 4: families (resolves partner and child xrefs).
        for record in records.iter().filter(|r| r.line.tag == "FAM") {
            self.import_family(record);
        }

        // Remaining record kinds.
        for record in records {
            match record.line.tag.as_str() {
                "OBJE" => self.import_media_record(record),
                "NOTE" => self.import_note_record(record),
                "SUBM" => self.import_submitter(record),
                "HEAD" | "TRLR" | "INDI" | "FAM" | "SOUR" | "REPO" => {}
                other => self.warn(format!("unhandled record type {other}")),
            }
        }
    }

    // ── Pass 1 ──────────────────────────────────────────────────────

    fn import_repository(&mut self, record: &GedRecord) {
        let now = Utc::now();
        let Some(xref) = record.line.xref.clone() else {
            self.warn("repository record without xref skipped");
            return;
        };
        let id = self.repo_map[&xref];
        let name = match record.child_value("NAME") {
            Some(name) => name.to_string(),
            None => {
                self.warn(format!("repository {xref} has no name"));
                "Unknown repository".to_string()
            }
        };
        self.result.repositories.push(Repository {
            id,
            xref: Some(xref),
            name,
            address: record.child("ADDR").map(parse_address),
            phone: record.child_value("PHON").map(str::to_string),
            email: record.child_value("EMAIL").map(str::to_string),
            website: record.child_value("WWW").map(str::to_string),
            version: 0,
            created_at: now,
            updated_at: now,
        });
    }

    // ── Pass 2 ──────────────────────────────────────────────────────

    fn import_source(&mut self, record: &GedRecord) {
        let now = Utc::now();
        let Some(xref) = record.line.xref.clone() else {
            self.warn("source record without xref skipped");
            return;
        };
        let id = self.sour_map[&xref];

        let title = match record.child("TITL").and_then(|t| t.text()) {
            Some(title) if !title.is_empty() => title,
            _ => {
                self.warn(format!("source {xref} has no title"));
                "Untitled source".to_string()
            }
        };

        let mut repository_id = None;
        let mut repository_name = None;
        let mut call_number = None;
        if let Some(repo) = record.child("REPO") {
            match repo.line.value.as_deref() {
                Some(pointer) if repo.line.is_pointer() => {
                    match self.repo_map.get(pointer) {
                        Some(&rid) => repository_id = Some(rid),
                        None => {
                            self.warn(format!(
                                "source {xref} references unknown repository {pointer}"
                            ));
                        }
                    }
                }
                Some(free_text) => repository_name = Some(free_text.to_string()),
                None => {}
            }
            call_number = repo.child_value("CALN").map(str::to_string);
        }

        self.result.sources.push(Source {
            id,
            xref: Some(xref),
            source_type: SourceType::Other,
            title,
            author: record.child("AUTH").and_then(|a| a.text()),
            publisher: record.child("PUBL").and_then(|p| p.text()),
            publish_date: None,
            url: record.child_value("WWW").map(str::to_string),
            repository_id,
            repository_name,
            call_number,
            notes: record.child("NOTE").and_then(inline_note_text),
            version: 0,
            created_at: now,
            updated_at: now,
        });
    }

    // ── Pass 3 ──────────────────────────────────────────────────────

    fn import_individual(&mut self, record: &GedRecord) {
        let now = Utc::now();
        let Some(xref) = record.line.xref.clone() else {
            self.warn("individual record without xref skipped");
            return;
        };
        let person_id = self.indi_map[&xref];

        let gender = match record.child_value("SEX") {
            Some("M") => Gender::Male,
            Some("F") => Gender::Female,
            _ => Gender::Unknown,
        };

        // Names; the first one is primary.
        let mut names: Vec<PersonName> = Vec::new();
        for name_record in record.children_tagged("NAME") {
            names.push(parse_name(name_record, person_id, names.is_empty()));
        }
        let (given, surname) = match names.first() {
            Some(primary) => (primary.given.clone(), primary.surname.clone()),
            None => {
                self.warn(format!("individual {xref} has no name"));
                (Some("Unknown".to_string()), None)
            }
        };

        let mut person = Person {
            id: person_id,
            xref: Some(xref.clone()),
            given,
            surname,
            gender,
            fsftid: record.child_value("_FSFTID").map(str::to_string),
            version: 0,
            created_at: now,
            updated_at: now,
            ..Default::default()
        };

        let mut inline_notes: Vec<String> = Vec::new();

        for child in &record.children {
            let tag = child.line.tag.as_str();
            match tag {
                "NAME" | "SEX" | "_FSFTID" | "CHAN" | "FAMS" | "RIN" | "REFN" => {}
                "FAMC" => {
                    if let Some(fam_xref) = child.line.value.clone() {
                        let pedi = child
                            .child_value("PEDI")
                            .map(tags::pedigree_from_value)
                            .unwrap_or(ChildRelationship::Biological);
                        self.pedigree.insert((fam_xref, xref.clone()), pedi);
                    }
                }
                "NO" => {
                    self.import_negated_event(child, FactOwnerKind::Person, person_id);
                }
                "ASSO" => self.import_association(child, person_id),
                "OBJE" => self.link_media(child, MediaOwnerKind::Person, person_id),
                "NOTE" => {
                    if !child.line.is_pointer()
                        && let Some(text) = child.text()
                        && !text.is_empty()
                    {
                        inline_notes.push(text);
                    }
                }
                "SOUR" => {
                    self.import_citation(child, FactType::Other, FactOwnerKind::Person, person_id);
                }
                "BAPL" | "CONL" | "ENDL" | "SLGC" => {
                    self.import_ordinance(child, FactOwnerKind::Person, person_id);
                }
                _ => {
                    if let Some(attribute_type) = tags::attribute_from_tag(tag) {
                        self.import_attribute(child, person_id, attribute_type);
                    } else if let Some(fact) = tags::fact_from_tag(tag) {
                        self.import_event(child, fact, FactOwnerKind::Person, person_id, &mut person);
                    }
                    // Unknown sub-tags are silently skipped; custom tags
                    // other than the supported extensions are not data loss
                    // worth a warning per record.
                }
            }
        }

        if !inline_notes.is_empty() {
            person.notes = Some(inline_notes.join("\n\n"));
        }

        self.result.person_names.extend(names);
        self.result.persons.push(person);
    }

    /// A dated event. The first non-negated birth and death populate the
    /// person's scalar fields; everything else becomes a life-event row.
    fn import_event(
        &mut self,
        record: &GedRecord,
        fact: FactType,
        owner_kind: FactOwnerKind,
        owner_id: Uuid,
        person: &mut Person,
    ) {
        let date = self.parse_event_date(record);
        let place = parse_place(record);

        for citation in record.children_tagged("SOUR") {
            self.import_citation(citation, fact, owner_kind, owner_id);
        }
        for media in record.children_tagged("OBJE") {
            self.link_media(media, MediaOwnerKind::Event, owner_id);
        }

        match fact {
            FactType::Birth if person.birth_date.is_none() && person.birth_place.is_none() => {
                person.birth_date = date;
                person.birth_place = place;
                return;
            }
            FactType::Death if person.death_date.is_none() && person.death_place.is_none() => {
                person.death_date = date;
                person.death_place = place;
                return;
            }
            _ => {}
        }

        self.result.life_events.push(LifeEvent {
            id: Uuid::now_v7(),
            owner_kind,
            owner_id,
            fact_type: fact,
            date,
            place,
            address: record.child("ADDR").map(parse_address),
            description: event_description(record),
            cause: record.child_value("CAUS").map(str::to_string),
            age: record.child_value("AGE").map(str::to_string),
            is_negated: false,
        });
    }

    /// A family-scoped event; the first non-negated marriage populates the
    /// family scalar fields.
    fn import_family_event(
        &mut self,
        record: &GedRecord,
        fact: FactType,
        family: &mut Family,
    ) {
        let date = self.parse_event_date(record);
        let place = parse_place(record);

        for citation in record.children_tagged("SOUR") {
            self.import_citation(citation, fact, FactOwnerKind::Family, family.id);
        }

        if fact == FactType::Marriage
            && family.marriage_date.is_none()
            && family.marriage_place.is_none()
        {
            family.marriage_date = date;
            family.marriage_place = place;
            return;
        }

        self.result.life_events.push(LifeEvent {
            id: Uuid::now_v7(),
            owner_kind: FactOwnerKind::Family,
            owner_id: family.id,
            fact_type: fact,
            date,
            place,
            address: record.child("ADDR").map(parse_address),
            description: event_description(record),
            cause: record.child_value("CAUS").map(str::to_string),
            age: None,
            is_negated: false,
        });
    }

    /// `NO <TAG>` (GEDCOM 7): a fact known not to have happened. Becomes a
    /// bare negated life event and never touches scalar fact fields.
    fn import_negated_event(
        &mut self,
        record: &GedRecord,
        owner_kind: FactOwnerKind,
        owner_id: Uuid,
    ) {
        let Some(tag) = record.line.value.as_deref() else {
            self.warn("NO line without an event tag");
            return;
        };
        let Some(fact) = tags::fact_from_tag(tag) else {
            self.warn(format!("NO references unknown event tag {tag}"));
            return;
        };
        self.result.life_events.push(LifeEvent {
            id: Uuid::now_v7(),
            owner_kind,
            owner_id,
            fact_type: fact,
            date: None,
            place: None,
            address: None,
            description: None,
            cause: None,
            age: None,
            is_negated: true,
        });
    }

    fn import_attribute(
        &mut self,
        record: &GedRecord,
        person_id: Uuid,
        attribute_type: genea_core::enums::AttributeType,
    ) {
        let value = record
            .line
            .value
            .clone()
            .unwrap_or_else(|| "unknown".to_string());
        for citation in record.children_tagged("SOUR") {
            self.import_citation(citation, FactType::Other, FactOwnerKind::Person, person_id);
        }
        let date = self.parse_event_date(record);
        self.result.attributes.push(Attribute {
            id: Uuid::now_v7(),
            person_id,
            attribute_type,
            value,
            date,
            place: record.child_value("PLAC").map(str::to_string),
        });
    }

    fn import_association(&mut self, record: &GedRecord, person_id: Uuid) {
        let Some(pointer) = record.line.value.as_deref() else {
            self.warn("ASSO without a pointer skipped");
            return;
        };
        let Some(&associate_id) = self.indi_map.get(pointer) else {
            self.warn(format!("ASSO references unknown individual {pointer}"));
            return;
        };
        let role = record
            .child_value("RELA")
            .or_else(|| record.child_value("ROLE"))
            .map(tags::role_from_value)
            .unwrap_or(genea_core::enums::AssociationRole::Other);
        self.result.associations.push(Association {
            id: Uuid::now_v7(),
            person_id,
            associate_id,
            role,
            phrase: record.child_value("PHRASE").map(str::to_string),
            notes: record.child("NOTE").and_then(inline_note_text),
        });
    }

    fn import_ordinance(
        &mut self,
        record: &GedRecord,
        owner_kind: FactOwnerKind,
        owner_id: Uuid,
    ) {
        let Some(ordinance_type) = tags::lds_from_tag(&record.line.tag) else {
            return;
        };
        let date = self.parse_event_date(record);
        self.result.ordinances.push(LdsOrdinance {
            id: Uuid::now_v7(),
            ordinance_type,
            owner_kind,
            owner_id,
            date,
            temple: record.child_value("TEMP").map(str::to_string),
            status: record.child_value("STAT").map(str::to_string),
            place: record.child_value("PLAC").map(str::to_string),
        });
    }

    fn import_citation(
        &mut self,
        record: &GedRecord,
        fact_type: FactType,
        owner_kind: FactOwnerKind,
        owner_id: Uuid,
    ) {
        let now = Utc::now();
        let Some(pointer) = record.line.value.as_deref() else {
            self.warn("citation without a source pointer skipped");
            return;
        };
        let Some(&source_id) = self.sour_map.get(pointer) else {
            self.warn(format!("citation references unknown source {pointer}"));
            return;
        };

        let (evidence_type, informant_type) = match record.child_value("QUAY") {
            Some("3") => (Some(EvidenceType::Direct), Some(InformantType::Primary)),
            Some("2") => (None, Some(InformantType::Secondary)),
            Some("1") => (Some(EvidenceType::Indirect), None),
            Some("0") => (Some(EvidenceType::Negative), None),
            _ => (None, None),
        };

        let text = record
            .child("DATA")
            .and_then(|d| d.child("TEXT"))
            .and_then(|t| t.text());

        self.result.citations.push(Citation {
            id: Uuid::now_v7(),
            source_id,
            fact_type,
            owner_kind,
            owner_id,
            page: record.child_value("PAGE").map(str::to_string),
            volume: None,
            source_quality: None,
            informant_type,
            evidence_type,
            text,
            analysis: record.child("NOTE").and_then(inline_note_text),
            apid: record.child_value("_APID").map(Apid::parse),
            version: 0,
            created_at: now,
            updated_at: now,
        });
    }

    /// Record a media reference: a pointer claims the top-level OBJE for
    /// this owner (first reference wins), an inline OBJE becomes its own
    /// media entity.
    fn link_media(&mut self, record: &GedRecord, owner_kind: MediaOwnerKind, owner_id: Uuid) {
        if let Some(pointer) = record.line.value.as_deref() {
            match self.obje_map.get(pointer) {
                Some(&media_id) => {
                    self.media_owner
                        .entry(media_id)
                        .or_insert((owner_kind, owner_id));
                }
                None => self.warn(format!("reference to unknown media record {pointer}")),
            }
            return;
        }
        // Inline OBJE with FILE substructure.
        if let Some(media) = self.parse_media_body(record, None, owner_kind, owner_id) {
            self.result.media.push(media);
        }
    }

    fn import_media_record(&mut self, record: &GedRecord) {
        let Some(xref) = record.line.xref.clone() else {
            self.warn("media record without xref skipped");
            return;
        };
        let id = self.obje_map[&xref];
        let Some(&(owner_kind, owner_id)) = self.media_owner.get(&id) else {
            self.warn(format!("media record {xref} is referenced by nothing"));
            return;
        };
        if let Some(mut media) = self.parse_media_body(record, Some(xref), owner_kind, owner_id) {
            media.id = id;
            self.result.media.push(media);
        }
    }

    fn parse_media_body(
        &mut self,
        record: &GedRecord,
        xref: Option<String>,
        owner_kind: MediaOwnerKind,
        owner_id: Uuid,
    ) -> Option<Media> {
        let now = Utc::now();
        let file = record.child("FILE");
        let file_path = file.and_then(|f| f.line.value.clone()).unwrap_or_default();
        if file_path.is_empty() {
            self.warn("media without a FILE value skipped");
            return None;
        }
        let form = file
            .and_then(|f| f.child_value("FORM"))
            .or_else(|| record.child_value("FORM"));
        let media_kind = file
            .and_then(|f| f.child("FORM"))
            .and_then(|f| f.child_value("MEDI"))
            .or_else(|| record.child_value("MEDI"))
            .map(tags::media_kind_from_value)
            .unwrap_or(genea_core::enums::MediaKind::Document);
        let file_name = file_path
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(&file_path)
            .to_string();

        Some(Media {
            id: Uuid::now_v7(),
            xref,
            owner_kind,
            owner_id,
            title: record
                .child_value("TITL")
                .or_else(|| file.and_then(|f| f.child_value("TITL")))
                .map(str::to_string),
            description: None,
            mime_type: form
                .map(tags::mime_from_form)
                .unwrap_or_else(|| "application/octet-stream".to_string()),
            media_kind,
            file_name,
            // GEDCOM carries file references, not payloads.
            data: Vec::new(),
            thumbnail: None,
            crop: None,
            version: 0,
            created_at: now,
            updated_at: now,
        })
    }

    // ── Pass 4 ──────────────────────────────────────────────────────

    fn import_family(&mut self, record: &GedRecord) {
        let now = Utc::now();
        let Some(xref) = record.line.xref.clone() else {
            self.warn("family record without xref skipped");
            return;
        };
        let family_id = self.fam_map[&xref];

        let mut partner1_id = None;
        let mut partner2_id = None;
        if let Some(husb) = record.child_value("HUSB") {
            match self.indi_map.get(husb) {
                Some(&id) => partner1_id = Some(id),
                None => self.warn(format!("family {xref}: HUSB {husb} not found")),
            }
        }
        if let Some(wife) = record.child_value("WIFE") {
            match self.indi_map.get(wife) {
                Some(&id) => partner2_id = Some(id),
                None => self.warn(format!("family {xref}: WIFE {wife} not found")),
            }
        }

        let mut family = Family {
            id: family_id,
            xref: Some(xref.clone()),
            partner1_id,
            partner2_id,
            relationship_type: genea_core::enums::RelationshipType::Unknown,
            version: 0,
            created_at: now,
            updated_at: now,
            ..Default::default()
        };

        let mut sequence = 0i32;
        for child in record.children_tagged("CHIL") {
            let Some(pointer) = child.line.value.as_deref() else {
                continue;
            };
            let Some(&child_id) = self.indi_map.get(pointer) else {
                self.warn(format!("family {xref}: CHIL {pointer} not found"));
                continue;
            };
            let relationship = self
                .pedigree
                .get(&(xref.clone(), pointer.to_string()))
                .copied()
                .unwrap_or(ChildRelationship::Biological);
            self.result.family_children.push(FamilyChild {
                id: Uuid::now_v7(),
                family_id,
                child_id,
                relationship,
                sequence,
            });
            sequence += 1;
        }

        for child in &record.children {
            let tag = child.line.tag.as_str();
            match tag {
                "HUSB" | "WIFE" | "CHIL" | "CHAN" | "RIN" | "REFN" | "NCHI" => {}
                "NO" => self.import_negated_event(child, FactOwnerKind::Family, family_id),
                "SLGS" => self.import_ordinance(child, FactOwnerKind::Family, family_id),
                "OBJE" => self.link_media(child, MediaOwnerKind::Family, family_id),
                "SOUR" => self.import_citation(
                    child,
                    FactType::Other,
                    FactOwnerKind::Family,
                    family_id,
                ),
                "NOTE" => {
                    if !child.line.is_pointer()
                        && let Some(text) = child.text()
                        && !text.is_empty()
                    {
                        self.result.notes.push(Note {
                            id: Uuid::now_v7(),
                            xref: None,
                            text,
                            version: 0,
                            created_at: now,
                            updated_at: now,
                        });
                    }
                }
                _ => {
                    if let Some(fact) = tags::fact_from_tag(tag)
                        && (fact.is_family() || fact == FactType::Other)
                    {
                        self.import_family_event(child, fact, &mut family);
                    }
                }
            }
        }

        if family.marriage_date.is_some() || family.marriage_place.is_some() {
            family.relationship_type = genea_core::enums::RelationshipType::Marriage;
        }

        self.result.families.push(family);
    }

    // ── Other records ───────────────────────────────────────────────

    fn import_note_record(&mut self, record: &GedRecord) {
        let now = Utc::now();
        let Some(text) = record.text().filter(|t| !t.is_empty()) else {
            self.warn("note record without text skipped");
            return;
        };
        self.result.notes.push(Note {
            id: Uuid::now_v7(),
            xref: record.line.xref.clone(),
            text,
            version: 0,
            created_at: now,
            updated_at: now,
        });
    }

    fn import_submitter(&mut self, record: &GedRecord) {
        let now = Utc::now();
        let name = record
            .child_value("NAME")
            .unwrap_or("Unknown submitter")
            .to_string();
        self.result.submitters.push(Submitter {
            id: Uuid::now_v7(),
            xref: record.line.xref.clone(),
            name,
            address: record.child("ADDR").map(parse_address),
            phone: record.child_value("PHON").map(str::to_string),
            email: record.child_value("EMAIL").map(str::to_string),
            version: 0,
            created_at: now,
            updated_at: now,
        });
    }

    /// Parse a `DATE` child into a `GenDate`, warning when the phrase did
    /// not parse into components (the raw text still survives).
    fn parse_event_date(&mut self, record: &GedRecord) -> Option<GenDate> {
        let value = record.child_value("DATE")?;
        let date = GenDate::parse(value);
        if !date.has_components() && !date.raw.is_empty() {
            self.warn(format!("unparsed date phrase kept as raw text: {value}"));
        }
        Some(date)
    }
}

// ── Free helpers ────────────────────────────────────────────────────

/// Parse `NAME John /Doe/` plus its pieces into a `PersonName`.
fn parse_name(record: &GedRecord, person_id: Uuid, is_primary: bool) -> PersonName {
    let (mut given, mut surname) = (None, None);
    if let Some(value) = record.line.value.as_deref() {
        if let Some(start) = value.find('/') {
            let before = value[..start].trim();
            let rest = &value[start + 1..];
            let end = rest.find('/').unwrap_or(rest.len());
            let between = rest[..end].trim();
            if !before.is_empty() {
                given = Some(before.to_string());
            }
            if !between.is_empty() {
                surname = Some(between.to_string());
            }
        } else if !value.trim().is_empty() {
            given = Some(value.trim().to_string());
        }
    }
    // Explicit pieces override the parsed payload.
    if let Some(g) = record.child_value("GIVN") {
        given = Some(g.to_string());
    }
    if let Some(s) = record.child_value("SURN") {
        surname = Some(s.to_string());
    }

    PersonName {
        id: Uuid::now_v7(),
        person_id,
        name_type: record
            .child_value("TYPE")
            .map(tags::name_type_from_value)
            .unwrap_or(genea_core::enums::NameType::Birth),
        given,
        surname,
        prefix: record.child_value("NPFX").map(str::to_string),
        suffix: record.child_value("NSFX").map(str::to_string),
        surname_prefix: record.child_value("SPFX").map(str::to_string),
        nickname: record.child_value("NICK").map(str::to_string),
        is_primary,
    }
}

/// Parse `PLAC` with its optional `MAP/LATI/LONG`.
fn parse_place(record: &GedRecord) -> Option<Place> {
    let plac = record.child("PLAC")?;
    let name = plac.line.value.clone()?;
    let mut place = Place::named(name);
    if let Some(map) = plac.child("MAP") {
        place.latitude = map.child_value("LATI").and_then(tags::parse_coordinate);
        place.longitude = map.child_value("LONG").and_then(tags::parse_coordinate);
    }
    Some(place)
}

/// Parse an `ADDR` structure.
fn parse_address(record: &GedRecord) -> Address {
    Address {
        line1: record
            .child_value("ADR1")
            .map(str::to_string)
            .or_else(|| record.line.value.clone()),
        line2: record.child_value("ADR2").map(str::to_string),
        line3: record.child_value("ADR3").map(str::to_string),
        city: record.child_value("CITY").map(str::to_string),
        state: record.child_value("STAE").map(str::to_string),
        postal_code: record.child_value("POST").map(str::to_string),
        country: record.child_value("CTRY").map(str::to_string),
    }
}

/// Description of a generic event: the line payload unless it is the
/// presence marker `Y`, else the `TYPE` sub-value.
fn event_description(record: &GedRecord) -> Option<String> {
    match record.line.value.as_deref() {
        Some("Y") | None => record.child_value("TYPE").map(str::to_string),
        Some(value) => Some(value.to_string()),
    }
}

/// Inline (non-pointer) note text.
fn inline_note_text(record: &GedRecord) -> Option<String> {
    if record.line.is_pointer() {
        return None;
    }
    record.text().filter(|t| !t.is_empty())
}
