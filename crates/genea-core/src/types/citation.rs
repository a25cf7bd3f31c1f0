use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::enums::{EvidenceType, FactOwnerKind, FactType, InformantType, SourceQuality};
use crate::error::GeneaError;

/// Ancestry permanent identifier (`_APID`), split from its wire form
/// `<revision>,<db>::<record>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Apid {
    pub revision: String,
    pub db: String,
    pub record: String,
}

impl Apid {
    /// Parse the `_APID` wire form. Inputs that do not match the shape are
    /// kept whole in `record` so nothing is lost on re-export.
    pub fn parse(raw: &str) -> Self {
        if let Some((revision, rest)) = raw.split_once(',')
            && let Some((db, record)) = rest.split_once("::")
        {
            return Self {
                revision: revision.to_string(),
                db: db.to_string(),
                record: record.to_string(),
            };
        }
        Self {
            revision: String::new(),
            db: String::new(),
            record: raw.to_string(),
        }
    }

    /// Re-assemble the wire form.
    pub fn to_wire(&self) -> String {
        if self.revision.is_empty() && self.db.is_empty() {
            self.record.clone()
        } else {
            format!("{},{}::{}", self.revision, self.db, self.record)
        }
    }
}

/// A citation binding a source to a fact on a person or family.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Citation {
    pub id: Uuid,
    pub source_id: Uuid,
    pub fact_type: FactType,
    pub owner_kind: FactOwnerKind,
    pub owner_id: Uuid,
    pub page: Option<String>,
    pub volume: Option<String>,
    pub source_quality: Option<SourceQuality>,
    pub informant_type: Option<InformantType>,
    pub evidence_type: Option<EvidenceType>,
    /// Text quoted verbatim from the source.
    pub text: Option<String>,
    pub analysis: Option<String>,
    /// Ancestry permanent identifier, when imported from that vendor.
    pub apid: Option<Apid>,
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Citation {
    pub fn validate(&self) -> Result<(), GeneaError> {
        if self.source_id.is_nil() {
            return Err(GeneaError::validation("source_id", "must reference a source"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apid_parse_wire_form() {
        let apid = Apid::parse("1,7602::12345");
        assert_eq!(apid.revision, "1");
        assert_eq!(apid.db, "7602");
        assert_eq!(apid.record, "12345");
        assert_eq!(apid.to_wire(), "1,7602::12345");
    }

    #[test]
    fn test_apid_parse_unshaped_input() {
        let apid = Apid::parse("not-an-apid");
        assert_eq!(apid.record, "not-an-apid");
        assert_eq!(apid.to_wire(), "not-an-apid");
    }
}
