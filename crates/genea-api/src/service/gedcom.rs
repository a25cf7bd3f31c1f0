//! GEDCOM import/export workflows.
//!
//! Import parses the byte stream and fans the result into creation events
//! through the engine (one transaction, projection included). Export reads
//! every aggregate from the read model in id order — canonical output —
//! and hands the bundle to the codec.

use tracing::info;

use genea_core::GeneaError;
use genea_db::repo::{
    AssociationRepo, AttributeRepo, CitationRepo, FamilyChildRepo, FamilyRepo, LdsOrdinanceRepo,
    LifeEventRepo, MediaRepo, NoteRepo, PersonNameRepo, PersonRepo, RepositoryRepo, SourceRepo,
    SubmitterRepo,
};
use genea_db::sea_orm::DatabaseConnection;
use genea_engine::commands::{ImportCommands, ImportSummary};
use genea_gedcom::export::{ExportResult, ProgressFn};
use genea_gedcom::{GedcomData, export_gedcom, import_gedcom};

use crate::rest::state::AppState;

/// Parse a GEDCOM byte stream and persist everything it contains.
pub async fn import_and_persist(
    state: &AppState,
    bytes: &[u8],
) -> Result<ImportSummary, GeneaError> {
    let parsed = import_gedcom(bytes)?;
    let summary = ImportCommands::persist(state.store.as_ref(), &parsed).await?;
    info!(
        persons = summary.persons,
        families = summary.families,
        warnings = summary.warnings.len(),
        "GEDCOM file imported"
    );
    Ok(summary)
}

/// Load the full read model into a GEDCOM bundle.
pub async fn load_bundle(db: &DatabaseConnection) -> Result<GedcomData, GeneaError> {
    Ok(GedcomData {
        vendor: None,
        persons: PersonRepo::list_all(db).await?,
        person_names: PersonNameRepo::list_all(db).await?,
        families: FamilyRepo::list_all(db).await?,
        family_children: FamilyChildRepo::list_all(db).await?,
        life_events: LifeEventRepo::list_all(db).await?,
        attributes: AttributeRepo::list_all(db).await?,
        associations: AssociationRepo::list_all(db).await?,
        ordinances: LdsOrdinanceRepo::list_all(db).await?,
        repositories: RepositoryRepo::list_all(db).await?,
        sources: SourceRepo::list_all(db).await?,
        citations: CitationRepo::list_all(db).await?,
        media: MediaRepo::list_all(db).await?,
        notes: NoteRepo::list_all(db).await?,
        submitters: SubmitterRepo::list_all(db).await?,
        warnings: Vec::new(),
        errors: Vec::new(),
    })
}

/// Export the whole database as GEDCOM text.
pub async fn load_and_export(
    db: &DatabaseConnection,
    progress: Option<&mut ProgressFn<'_>>,
) -> Result<ExportResult, GeneaError> {
    let bundle = load_bundle(db).await?;
    export_gedcom(&bundle, progress)
}
