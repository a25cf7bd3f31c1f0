//! GEDCOM import and export for Genea.
//!
//! The codec is lossless on the supported tag subset: unknown date phrases
//! survive through `GenDate::raw`, original xrefs are preserved, vendor
//! extensions (`_APID`, `_FSFTID`) are kept, and GEDCOM 7 `NO <EVENT>`
//! lines round-trip as negated life events.
//!
//! Decoding accepts UTF-8 (with or without BOM), UTF-16 LE/BE,
//! Windows-1252, ISO-8859-1, and ANSEL.

pub mod encoding;
pub mod export;
pub mod import;
pub mod line;
pub mod parser;
pub mod tags;

pub use export::{ExportPhase, ExportProgress, ExportResult, export_gedcom};
pub use import::import_gedcom;

use genea_core::types::{
    Association, Attribute, Citation, Family, FamilyChild, LdsOrdinance, LifeEvent, Media, Note,
    Person, PersonName, Repository, Source, Submitter,
};

/// A GEDCOM file's worth of domain entities plus the diagnostics collected
/// while producing them. Import returns this; export consumes the same
/// shape assembled from the read model.
#[derive(Debug, Clone, Default)]
pub struct GedcomData {
    /// `HEAD.SOUR` value, when the producing system identified itself.
    pub vendor: Option<String>,
    pub persons: Vec<Person>,
    pub person_names: Vec<PersonName>,
    pub families: Vec<Family>,
    pub family_children: Vec<FamilyChild>,
    pub life_events: Vec<LifeEvent>,
    pub attributes: Vec<Attribute>,
    pub associations: Vec<Association>,
    pub ordinances: Vec<LdsOrdinance>,
    pub repositories: Vec<Repository>,
    pub sources: Vec<Source>,
    pub citations: Vec<Citation>,
    pub media: Vec<Media>,
    pub notes: Vec<Note>,
    pub submitters: Vec<Submitter>,
    /// Non-fatal diagnostics.
    pub warnings: Vec<String>,
    /// Structural diagnostics that lost data but did not abort the import.
    pub errors: Vec<String>,
}

/// Import produces a `GedcomData`.
pub type ImportResult = GedcomData;
