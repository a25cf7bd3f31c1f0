use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::GeneaError;

/// A shared note record, referenced from any aggregate by xref.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Note {
    pub id: Uuid,
    pub xref: Option<String>,
    pub text: String,
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    pub fn validate(&self) -> Result<(), GeneaError> {
        if self.text.is_empty() {
            return Err(GeneaError::validation("text", "must not be empty"));
        }
        Ok(())
    }
}
