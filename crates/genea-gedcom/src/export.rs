//! Domain → GEDCOM export.
//!
//! Output is canonical: entities are emitted in internal-id order, xrefs are
//! stable (originals preserved, gaps filled sequentially), multi-line text
//! uses `CONT`/`CONC`, and lines end with LF. An optional progress callback
//! fires per phase; a callback error cancels the export and is returned
//! verbatim.

use std::collections::HashMap;

use uuid::Uuid;

use genea_core::GeneaError;
use genea_core::enums::{EvidenceType, FactType, InformantType, NameType};
use genea_core::gendate::GenDate;
use genea_core::types::{Address, Citation, LifeEvent, Place};

use crate::GedcomData;
use crate::tags;

/// Maximum payload length per line before `CONC` splitting.
const MAX_LINE_VALUE: usize = 248;

/// Phases reported to the progress callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportPhase {
    Sources,
    Persons,
    Families,
    Notes,
    Submitters,
    Encoding,
    Complete,
}

impl std::fmt::Display for ExportPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sources => write!(f, "sources"),
            Self::Persons => write!(f, "persons"),
            Self::Families => write!(f, "families"),
            Self::Notes => write!(f, "notes"),
            Self::Submitters => write!(f, "submitters"),
            Self::Encoding => write!(f, "encoding"),
            Self::Complete => write!(f, "complete"),
        }
    }
}

/// One progress report.
#[derive(Debug, Clone)]
pub struct ExportProgress {
    pub phase: ExportPhase,
    pub current: usize,
    pub total: usize,
    pub percentage: u8,
}

/// Callback invoked at phase boundaries; returning an error cancels the
/// export and surfaces that exact error to the caller.
pub type ProgressFn<'a> = dyn FnMut(&ExportProgress) -> Result<(), GeneaError> + Send + 'a;

/// The produced file plus non-fatal diagnostics.
#[derive(Debug, Clone)]
pub struct ExportResult {
    pub gedcom: String,
    pub warnings: Vec<String>,
}

/// Export a bundle of domain entities as GEDCOM 5.5.1 text (with the
/// GEDCOM 7 `NO` structure for negated events).
pub fn export_gedcom(
    data: &GedcomData,
    mut progress: Option<&mut ProgressFn<'_>>,
) -> Result<ExportResult, GeneaError> {
    let mut exporter = Exporter {
        data,
        out: String::new(),
        warnings: Vec::new(),
        person_xref: assign_xrefs(data.persons.iter().map(|p| (p.id, p.xref.clone())), 'I'),
        family_xref: assign_xrefs(data.families.iter().map(|f| (f.id, f.xref.clone())), 'F'),
        source_xref: assign_xrefs(data.sources.iter().map(|s| (s.id, s.xref.clone())), 'S'),
        repository_xref: assign_xrefs(
            data.repositories.iter().map(|r| (r.id, r.xref.clone())),
            'R',
        ),
        media_xref: assign_xrefs(data.media.iter().map(|m| (m.id, m.xref.clone())), 'M'),
        note_xref: assign_xrefs(data.notes.iter().map(|n| (n.id, n.xref.clone())), 'N'),
        submitter_xref: assign_xrefs(
            data.submitters.iter().map(|s| (s.id, s.xref.clone())),
            'U',
        ),
    };

    exporter.header();

    exporter.repositories();
    report(&mut progress, ExportPhase::Sources, data.sources.len())?;
    exporter.sources();

    report(&mut progress, ExportPhase::Persons, data.persons.len())?;
    exporter.persons();

    report(&mut progress, ExportPhase::Families, data.families.len())?;
    exporter.families();

    exporter.media_records();

    report(&mut progress, ExportPhase::Notes, data.notes.len())?;
    exporter.notes();

    report(&mut progress, ExportPhase::Submitters, data.submitters.len())?;
    exporter.submitters();

    report(&mut progress, ExportPhase::Encoding, 1)?;
    exporter.out.push_str("0 TRLR\n");

    report(&mut progress, ExportPhase::Complete, 1)?;
    Ok(ExportResult {
        gedcom: exporter.out,
        warnings: exporter.warnings,
    })
}

fn report(
    progress: &mut Option<&mut ProgressFn<'_>>,
    phase: ExportPhase,
    total: usize,
) -> Result<(), GeneaError> {
    if let Some(callback) = progress {
        callback(&ExportProgress {
            phase,
            current: 0,
            total,
            percentage: phase_percentage(phase),
        })?;
    }
    Ok(())
}

fn phase_percentage(phase: ExportPhase) -> u8 {
    match phase {
        ExportPhase::Sources => 10,
        ExportPhase::Persons => 30,
        ExportPhase::Families => 60,
        ExportPhase::Notes => 75,
        ExportPhase::Submitters => 85,
        ExportPhase::Encoding => 95,
        ExportPhase::Complete => 100,
    }
}

/// Assign stable xrefs: originals are kept when well-formed and unused;
/// everything else receives the next free `@{prefix}{n}@`.
fn assign_xrefs(
    entities: impl Iterator<Item = (Uuid, Option<String>)>,
    prefix: char,
) -> HashMap<Uuid, String> {
    let mut out = HashMap::new();
    let mut used: std::collections::HashSet<String> = std::collections::HashSet::new();
    let mut pending: Vec<Uuid> = Vec::new();

    for (id, original) in entities {
        match original {
            Some(xref)
                if xref.len() > 2
                    && xref.starts_with('@')
                    && xref.ends_with('@')
                    && !used.contains(&xref) =>
            {
                used.insert(xref.clone());
                out.insert(id, xref);
            }
            _ => pending.push(id),
        }
    }

    let mut next = 1usize;
    for id in pending {
        let xref = loop {
            let candidate = format!("@{prefix}{next}@");
            next += 1;
            if !used.contains(&candidate) {
                break candidate;
            }
        };
        used.insert(xref.clone());
        out.insert(id, xref);
    }
    out
}

struct Exporter<'a> {
    data: &'a GedcomData,
    out: String,
    warnings: Vec<String>,
    person_xref: HashMap<Uuid, String>,
    family_xref: HashMap<Uuid, String>,
    source_xref: HashMap<Uuid, String>,
    repository_xref: HashMap<Uuid, String>,
    media_xref: HashMap<Uuid, String>,
    note_xref: HashMap<Uuid, String>,
    submitter_xref: HashMap<Uuid, String>,
}

impl Exporter<'_> {
    // ── Low-level writers ───────────────────────────────────────────

    fn line(&mut self, level: u8, tag: &str, value: Option<&str>) {
        match value {
            Some(value) => self.out.push_str(&format!("{level} {tag} {value}\n")),
            None => self.out.push_str(&format!("{level} {tag}\n")),
        }
    }

    fn record_header(&mut self, xref: &str, tag: &str) {
        self.out.push_str(&format!("0 {xref} {tag}\n"));
    }

    /// Emit a possibly multi-line, possibly overlong text value with
    /// `CONT`/`CONC` continuation.
    fn text(&mut self, level: u8, tag: &str, text: &str) {
        let cont_level = level + 1;
        for (i, segment) in text.split('\n').enumerate() {
            let line_tag = if i == 0 { tag } else { "CONT" };
            let line_level = if i == 0 { level } else { cont_level };
            let mut chunks = chunk_value(segment);
            let first = chunks.next().unwrap_or_default();
            self.line(
                line_level,
                line_tag,
                if first.is_empty() { None } else { Some(&first) },
            );
            for chunk in chunks {
                self.line(cont_level, "CONC", Some(&chunk));
            }
        }
    }

    fn date(&mut self, level: u8, date: &GenDate) {
        let phrase = date.to_gedcom();
        if !phrase.is_empty() {
            self.line(level, "DATE", Some(&phrase));
        }
    }

    fn place(&mut self, level: u8, place: &Place) {
        self.line(level, "PLAC", Some(&place.name));
        if let (Some(lat), Some(lon)) = (place.latitude, place.longitude) {
            self.line(level + 1, "MAP", None);
            self.line(level + 2, "LATI", Some(&tags::format_latitude(lat)));
            self.line(level + 2, "LONG", Some(&tags::format_longitude(lon)));
        }
    }

    fn address(&mut self, level: u8, address: &Address) {
        if address.is_empty() {
            return;
        }
        self.line(level, "ADDR", address.line1.as_deref());
        let next = level + 1;
        if let Some(ref v) = address.line1 {
            self.line(next, "ADR1", Some(v));
        }
        if let Some(ref v) = address.line2 {
            self.line(next, "ADR2", Some(v));
        }
        if let Some(ref v) = address.line3 {
            self.line(next, "ADR3", Some(v));
        }
        if let Some(ref v) = address.city {
            self.line(next, "CITY", Some(v));
        }
        if let Some(ref v) = address.state {
            self.line(next, "STAE", Some(v));
        }
        if let Some(ref v) = address.postal_code {
            self.line(next, "POST", Some(v));
        }
        if let Some(ref v) = address.country {
            self.line(next, "CTRY", Some(v));
        }
    }

    /// Emit one citation. QUAY follows the total evidence/informant matrix;
    /// the negative row maps to QUAY 0, which is the default and therefore
    /// omitted.
    fn citation(&mut self, level: u8, citation: &Citation) {
        let Some(source_xref) = self.source_xref.get(&citation.source_id).cloned() else {
            self.warnings.push(format!(
                "citation {} references a source outside the export",
                citation.id
            ));
            return;
        };
        self.line(level, "SOUR", Some(&source_xref));
        let next = level + 1;
        if let Some(ref page) = citation.page {
            self.line(next, "PAGE", Some(page));
        }
        if let Some(quay) = quay_value(citation) {
            self.line(next, "QUAY", Some(quay));
        }
        if let Some(ref text) = citation.text {
            self.line(next, "DATA", None);
            self.text(next + 1, "TEXT", text);
        }
        if let Some(ref analysis) = citation.analysis {
            self.text(next, "NOTE", analysis);
        }
        if let Some(ref apid) = citation.apid {
            self.line(next, "_APID", Some(&apid.to_wire()));
        }
    }

    fn citations_for(&mut self, level: u8, fact: FactType, owner_id: Uuid) {
        let matching: Vec<Citation> = self
            .data
            .citations
            .iter()
            .filter(|c| c.owner_id == owner_id && c.fact_type == fact)
            .cloned()
            .collect();
        for citation in matching {
            self.citation(level, &citation);
        }
    }

    fn life_event(&mut self, event: &LifeEvent) {
        let tag = tags::fact_tag(event.fact_type);
        if event.is_negated {
            self.line(1, "NO", Some(tag));
            return;
        }
        if event.fact_type == FactType::Other {
            self.line(1, "EVEN", event.description.as_deref());
        } else {
            self.line(1, tag, None);
            if let Some(ref description) = event.description {
                self.line(2, "TYPE", Some(description));
            }
        }
        if let Some(ref date) = event.date {
            self.date(2, date);
        }
        if let Some(ref place) = event.place {
            self.place(2, place);
        }
        if let Some(ref address) = event.address {
            self.address(2, address);
        }
        if let Some(ref cause) = event.cause {
            self.line(2, "CAUS", Some(cause));
        }
        if let Some(ref age) = event.age {
            self.line(2, "AGE", Some(age));
        }
        self.citations_for(2, event.fact_type, event.owner_id);
    }

    fn media_refs(&mut self, owner_id: Uuid) {
        let refs: Vec<String> = self
            .data
            .media
            .iter()
            .filter(|m| m.owner_id == owner_id)
            .filter_map(|m| self.media_xref.get(&m.id).cloned())
            .collect();
        for xref in refs {
            self.line(1, "OBJE", Some(&xref));
        }
    }

    // ── Records ─────────────────────────────────────────────────────

    fn header(&mut self) {
        self.out.push_str("0 HEAD\n");
        self.line(1, "GEDC", None);
        self.line(2, "VERS", Some("5.5.1"));
        self.line(2, "FORM", Some("LINEAGE-LINKED"));
        self.line(1, "CHAR", Some("UTF-8"));
        self.line(1, "SOUR", Some("GENEA"));
        self.line(2, "NAME", Some("Genea"));
        self.line(2, "VERS", Some(env!("CARGO_PKG_VERSION")));
        if let Some(first) = self.data.submitters.first() {
            let xref = self.submitter_xref[&first.id].clone();
            self.line(1, "SUBM", Some(&xref));
        }
    }

    fn repositories(&mut self) {
        let data = self.data;
        for repository in &data.repositories {
            let xref = self.repository_xref[&repository.id].clone();
            self.out.push_str(&format!("0 {xref} REPO\n"));
            self.out
                .push_str(&format!("1 NAME {}\n", repository.name));
            let address = repository.address.clone();
            let phone = repository.phone.clone();
            let email = repository.email.clone();
            let website = repository.website.clone();
            if let Some(address) = address {
                self.address(1, &address);
            }
            if let Some(phone) = phone {
                self.line(1, "PHON", Some(&phone));
            }
            if let Some(email) = email {
                self.line(1, "EMAIL", Some(&email));
            }
            if let Some(website) = website {
                self.line(1, "WWW", Some(&website));
            }
        }
    }

    fn sources(&mut self) {
        let data = self.data;
        for source in &data.sources {
            let xref = self.source_xref[&source.id].clone();
            let source = source.clone();
            self.record_header(&xref, "SOUR");
            self.text(1, "TITL", &source.title);
            if let Some(ref author) = source.author {
                self.text(1, "AUTH", author);
            }
            if let Some(ref publisher) = source.publisher {
                self.text(1, "PUBL", publisher);
            }
            if let Some(ref url) = source.url {
                self.line(1, "WWW", Some(url));
            }
            match (source.repository_id, source.repository_name.as_deref()) {
                (Some(repository_id), _) => {
                    if let Some(repo_xref) = self.repository_xref.get(&repository_id).cloned() {
                        self.line(1, "REPO", Some(&repo_xref));
                        if let Some(ref caln) = source.call_number {
                            self.line(2, "CALN", Some(caln));
                        }
                    } else {
                        self.warnings.push(format!(
                            "source {} references a repository outside the export",
                            source.id
                        ));
                    }
                }
                (None, Some(name)) => {
                    self.line(1, "REPO", Some(name));
                    if let Some(ref caln) = source.call_number {
                        self.line(2, "CALN", Some(caln));
                    }
                }
                (None, None) => {}
            }
            if let Some(ref notes) = source.notes {
                self.text(1, "NOTE", notes);
            }
        }
    }

    fn persons(&mut self) {
        let data = self.data;
        for person in &data.persons {
            let xref = self.person_xref[&person.id].clone();
            let person = person.clone();
            self.record_header(&xref, "INDI");

            // Names, primary first.
            let mut names: Vec<_> = data
                .person_names
                .iter()
                .filter(|n| n.person_id == person.id)
                .cloned()
                .collect();
            names.sort_by_key(|n| !n.is_primary);
            if names.is_empty() {
                // Fall back to the scalar name so the individual stays
                // identifiable.
                let given = person.given.clone().unwrap_or_default();
                let surname = person.surname.clone().unwrap_or_default();
                self.line(1, "NAME", Some(&format!("{given} /{surname}/")));
            }
            for name in names {
                let given = name.given.clone().unwrap_or_default();
                let surname = name.surname.clone().unwrap_or_default();
                self.line(1, "NAME", Some(&format!("{given} /{surname}/")));
                if let Some(ref g) = name.given {
                    self.line(2, "GIVN", Some(g));
                }
                if let Some(ref s) = name.surname {
                    self.line(2, "SURN", Some(s));
                }
                if let Some(ref v) = name.prefix {
                    self.line(2, "NPFX", Some(v));
                }
                if let Some(ref v) = name.suffix {
                    self.line(2, "NSFX", Some(v));
                }
                if let Some(ref v) = name.surname_prefix {
                    self.line(2, "SPFX", Some(v));
                }
                if let Some(ref v) = name.nickname {
                    self.line(2, "NICK", Some(v));
                }
                if name.name_type != NameType::Birth {
                    self.line(2, "TYPE", Some(tags::name_type_value(name.name_type)));
                }
            }

            let sex = match person.gender {
                genea_core::enums::Gender::Male => "M",
                genea_core::enums::Gender::Female => "F",
                genea_core::enums::Gender::Unknown => "U",
            };
            self.line(1, "SEX", Some(sex));

            // Scalar birth and death.
            if person.birth_date.is_some() || person.birth_place.is_some() {
                self.line(1, "BIRT", None);
                if let Some(ref date) = person.birth_date {
                    self.date(2, date);
                }
                if let Some(ref place) = person.birth_place {
                    self.place(2, place);
                }
                self.citations_for(2, FactType::Birth, person.id);
            }
            if person.death_date.is_some() || person.death_place.is_some() {
                self.line(1, "DEAT", None);
                if let Some(ref date) = person.death_date {
                    self.date(2, date);
                }
                if let Some(ref place) = person.death_place {
                    self.place(2, place);
                }
                self.citations_for(2, FactType::Death, person.id);
            }

            // Life events, negated ones included.
            let events: Vec<LifeEvent> = data
                .life_events
                .iter()
                .filter(|e| e.owner_id == person.id)
                .cloned()
                .collect();
            for event in &events {
                self.life_event(event);
            }

            // Attributes.
            let attributes: Vec<_> = data
                .attributes
                .iter()
                .filter(|a| a.person_id == person.id)
                .cloned()
                .collect();
            for attribute in attributes {
                self.line(
                    1,
                    tags::attribute_tag(attribute.attribute_type),
                    Some(&attribute.value),
                );
                if let Some(ref date) = attribute.date {
                    self.date(2, date);
                }
                if let Some(ref place) = attribute.place {
                    self.line(2, "PLAC", Some(place));
                }
            }

            // Associations.
            let associations: Vec<_> = data
                .associations
                .iter()
                .filter(|a| a.person_id == person.id)
                .cloned()
                .collect();
            for association in associations {
                let Some(associate) = self.person_xref.get(&association.associate_id).cloned()
                else {
                    self.warnings.push(format!(
                        "association {} references a person outside the export",
                        association.id
                    ));
                    continue;
                };
                self.line(1, "ASSO", Some(&associate));
                self.line(2, "RELA", Some(tags::role_value(association.role)));
                if let Some(ref phrase) = association.phrase {
                    self.line(2, "PHRASE", Some(phrase));
                }
                if let Some(ref notes) = association.notes {
                    self.text(2, "NOTE", notes);
                }
            }

            // LDS ordinances bound to the person.
            let ordinances: Vec<_> = data
                .ordinances
                .iter()
                .filter(|o| o.owner_id == person.id)
                .cloned()
                .collect();
            for ordinance in ordinances {
                self.line(1, tags::lds_tag(ordinance.ordinance_type), None);
                if let Some(ref date) = ordinance.date {
                    self.date(2, date);
                }
                if let Some(ref temple) = ordinance.temple {
                    self.line(2, "TEMP", Some(temple));
                }
                if let Some(ref place) = ordinance.place {
                    self.line(2, "PLAC", Some(place));
                }
                if let Some(ref status) = ordinance.status {
                    self.line(2, "STAT", Some(status));
                }
            }

            // Family links.
            let spouse_families: Vec<String> = data
                .families
                .iter()
                .filter(|f| f.partner1_id == Some(person.id) || f.partner2_id == Some(person.id))
                .filter_map(|f| self.family_xref.get(&f.id).cloned())
                .collect();
            for xref in spouse_families {
                self.line(1, "FAMS", Some(&xref));
            }
            let child_memberships: Vec<(String, genea_core::enums::ChildRelationship)> = data
                .family_children
                .iter()
                .filter(|c| c.child_id == person.id)
                .filter_map(|c| {
                    self.family_xref
                        .get(&c.family_id)
                        .cloned()
                        .map(|x| (x, c.relationship))
                })
                .collect();
            for (xref, relationship) in child_memberships {
                self.line(1, "FAMC", Some(&xref));
                if relationship != genea_core::enums::ChildRelationship::Biological {
                    self.line(2, "PEDI", Some(tags::pedigree_value(relationship)));
                }
            }

            self.media_refs(person.id);

            if let Some(ref notes) = person.notes {
                self.text(1, "NOTE", notes);
            }
            if let Some(ref fsftid) = person.fsftid {
                self.line(1, "_FSFTID", Some(fsftid));
            }

            // Person-level citations (facts with no emitted structure).
            self.citations_for(1, FactType::Other, person.id);
        }
    }

    fn families(&mut self) {
        let data = self.data;
        for family in &data.families {
            let xref = self.family_xref[&family.id].clone();
            let family = family.clone();
            self.record_header(&xref, "FAM");

            if let Some(partner1) = family.partner1_id {
                match self.person_xref.get(&partner1).cloned() {
                    Some(p) => self.line(1, "HUSB", Some(&p)),
                    None => self.warnings.push(format!(
                        "family {} partner {partner1} outside the export",
                        family.id
                    )),
                }
            }
            if let Some(partner2) = family.partner2_id {
                match self.person_xref.get(&partner2).cloned() {
                    Some(p) => self.line(1, "WIFE", Some(&p)),
                    None => self.warnings.push(format!(
                        "family {} partner {partner2} outside the export",
                        family.id
                    )),
                }
            }

            let mut children: Vec<_> = data
                .family_children
                .iter()
                .filter(|c| c.family_id == family.id)
                .cloned()
                .collect();
            children.sort_by_key(|c| c.sequence);
            for child in children {
                match self.person_xref.get(&child.child_id).cloned() {
                    Some(c) => self.line(1, "CHIL", Some(&c)),
                    None => self.warnings.push(format!(
                        "family {} child {} outside the export",
                        family.id, child.child_id
                    )),
                }
            }

            if family.marriage_date.is_some() || family.marriage_place.is_some() {
                self.line(1, "MARR", None);
                if let Some(ref date) = family.marriage_date {
                    self.date(2, date);
                }
                if let Some(ref place) = family.marriage_place {
                    self.place(2, place);
                }
                self.citations_for(2, FactType::Marriage, family.id);
            }

            let events: Vec<LifeEvent> = data
                .life_events
                .iter()
                .filter(|e| e.owner_id == family.id)
                .cloned()
                .collect();
            for event in &events {
                self.life_event(event);
            }

            let ordinances: Vec<_> = data
                .ordinances
                .iter()
                .filter(|o| o.owner_id == family.id)
                .cloned()
                .collect();
            for ordinance in ordinances {
                self.line(1, tags::lds_tag(ordinance.ordinance_type), None);
                if let Some(ref date) = ordinance.date {
                    self.date(2, date);
                }
                if let Some(ref temple) = ordinance.temple {
                    self.line(2, "TEMP", Some(temple));
                }
                if let Some(ref place) = ordinance.place {
                    self.line(2, "PLAC", Some(place));
                }
                if let Some(ref status) = ordinance.status {
                    self.line(2, "STAT", Some(status));
                }
            }

            self.media_refs(family.id);
            self.citations_for(1, FactType::Other, family.id);
        }
    }

    fn media_records(&mut self) {
        let data = self.data;
        for media in &data.media {
            let xref = self.media_xref[&media.id].clone();
            let media = media.clone();
            self.record_header(&xref, "OBJE");
            self.line(1, "FILE", Some(&media.file_name));
            self.line(2, "FORM", Some(&tags::form_from_mime(&media.mime_type)));
            self.line(3, "MEDI", Some(tags::media_kind_value(media.media_kind)));
            if let Some(ref title) = media.title {
                self.line(1, "TITL", Some(title));
            }
        }
    }

    fn notes(&mut self) {
        let data = self.data;
        for note in &data.notes {
            let xref = self.note_xref[&note.id].clone();
            let text = note.text.clone();
            // NOTE records carry their text on the record line itself;
            // continuations are level-1 CONT lines.
            let mut lines = text.split('\n');
            match lines.next().filter(|l| !l.is_empty()) {
                Some(first) => self.out.push_str(&format!("0 {xref} NOTE {first}\n")),
                None => self.out.push_str(&format!("0 {xref} NOTE\n")),
            }
            for line in lines {
                self.line(1, "CONT", (!line.is_empty()).then_some(line));
            }
        }
    }

    fn submitters(&mut self) {
        let data = self.data;
        for submitter in &data.submitters {
            let xref = self.submitter_xref[&submitter.id].clone();
            let submitter = submitter.clone();
            self.record_header(&xref, "SUBM");
            self.line(1, "NAME", Some(&submitter.name));
            if let Some(ref address) = submitter.address {
                self.address(1, address);
            }
            if let Some(ref phone) = submitter.phone {
                self.line(1, "PHON", Some(phone));
            }
            if let Some(ref email) = submitter.email {
                self.line(1, "EMAIL", Some(email));
            }
        }
    }
}

/// QUAY per the total GPS matrix. `None` means the line is omitted (the
/// negative row and citations with no GPS grading).
fn quay_value(citation: &Citation) -> Option<&'static str> {
    if citation.evidence_type == Some(EvidenceType::Direct)
        && citation.informant_type == Some(InformantType::Primary)
    {
        return Some("3");
    }
    if citation.informant_type == Some(InformantType::Secondary) {
        return Some("2");
    }
    if citation.evidence_type == Some(EvidenceType::Indirect) {
        return Some("1");
    }
    None
}

/// Split an overlong value into `MAX_LINE_VALUE`-sized chunks on char
/// boundaries.
fn chunk_value(value: &str) -> impl Iterator<Item = String> + '_ {
    let mut rest = value;
    let mut first = true;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            if first {
                first = false;
                return Some(String::new());
            }
            return None;
        }
        first = false;
        let mut end = rest.len().min(MAX_LINE_VALUE);
        while !rest.is_char_boundary(end) {
            end -= 1;
        }
        let (chunk, remainder) = rest.split_at(end);
        rest = remainder;
        Some(chunk.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_value_splits_on_boundary() {
        let long = "x".repeat(MAX_LINE_VALUE + 10);
        let chunks: Vec<String> = chunk_value(&long).collect();
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].len(), MAX_LINE_VALUE);
        assert_eq!(chunks[1].len(), 10);
    }

    #[test]
    fn test_quay_matrix() {
        fn citation(
            evidence: Option<EvidenceType>,
            informant: Option<InformantType>,
        ) -> Citation {
            Citation {
                id: Uuid::nil(),
                source_id: Uuid::nil(),
                fact_type: FactType::Birth,
                owner_kind: genea_core::enums::FactOwnerKind::Person,
                owner_id: Uuid::nil(),
                page: None,
                volume: None,
                source_quality: None,
                informant_type: informant,
                evidence_type: evidence,
                text: None,
                analysis: None,
                apid: None,
                version: 0,
                created_at: chrono::Utc::now(),
                updated_at: chrono::Utc::now(),
            }
        }

        assert_eq!(
            quay_value(&citation(
                Some(EvidenceType::Direct),
                Some(InformantType::Primary)
            )),
            Some("3")
        );
        assert_eq!(
            quay_value(&citation(None, Some(InformantType::Secondary))),
            Some("2")
        );
        assert_eq!(
            quay_value(&citation(Some(EvidenceType::Indirect), None)),
            Some("1")
        );
        // Negative evidence is QUAY 0, the default: omitted.
        assert_eq!(
            quay_value(&citation(Some(EvidenceType::Negative), None)),
            None
        );
        assert_eq!(quay_value(&citation(None, None)), None);
    }
}
