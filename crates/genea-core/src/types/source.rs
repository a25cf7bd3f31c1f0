use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::enums::SourceType;
use crate::error::GeneaError;

/// A source of genealogical information.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Source {
    pub id: Uuid,
    pub xref: Option<String>,
    #[serde(default = "default_source_type")]
    pub source_type: SourceType,
    pub title: String,
    pub author: Option<String>,
    pub publisher: Option<String>,
    /// Publication date as free text (GEDCOM `PUBL` is uninterpreted).
    pub publish_date: Option<String>,
    pub url: Option<String>,
    /// Reference to a repository record, when the archive is catalogued.
    pub repository_id: Option<Uuid>,
    /// Free-text repository name, when it is not.
    pub repository_name: Option<String>,
    pub call_number: Option<String>,
    pub notes: Option<String>,
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_source_type() -> SourceType {
    SourceType::Other
}

impl Source {
    pub fn validate(&self) -> Result<(), GeneaError> {
        if self.title.trim().is_empty() {
            return Err(GeneaError::validation("title", "must not be empty"));
        }
        Ok(())
    }
}
