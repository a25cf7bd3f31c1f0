//! Shared error types for Genea.

use thiserror::Error;
use uuid::Uuid;

/// Top-level error type for Genea operations.
#[derive(Debug, Error)]
pub enum GeneaError {
    /// Entity not found.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: Uuid },

    /// Domain validation error, carrying the offending field.
    #[error("validation error on {field}: {message}")]
    Validation { field: String, message: String },

    /// Optimistic concurrency rejection: another writer advanced the stream.
    #[error("version conflict on stream {stream_id}: expected {expected}, current {current}")]
    VersionConflict {
        stream_id: Uuid,
        expected: i64,
        current: i64,
    },

    /// Referential or structural integrity violation.
    #[error("integrity violation: {0}")]
    Integrity(String),

    /// An event tag outside the closed taxonomy reached the decoder.
    #[error("unknown event type: {0}")]
    UnknownEventType(String),

    /// The GEDCOM stream is structurally unreadable. Recoverable codec
    /// issues are collected as warnings instead.
    #[error("malformed GEDCOM: {0}")]
    CodecMalformed(String),

    /// The operation was cancelled by the caller.
    #[error("operation cancelled: {0}")]
    Cancelled(String),

    /// Storage backend error.
    #[error("backend error: {0}")]
    Backend(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GeneaError {
    /// Shorthand for a [`GeneaError::Validation`] error.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error_display() {
        let id = Uuid::nil();
        let err = GeneaError::NotFound {
            entity: "Person",
            id,
        };
        assert_eq!(err.to_string(), format!("Person with id {id} not found"));
    }

    #[test]
    fn test_validation_error_display() {
        let err = GeneaError::validation("surname", "is required");
        assert_eq!(
            err.to_string(),
            "validation error on surname: is required"
        );
    }

    #[test]
    fn test_version_conflict_display() {
        let id = Uuid::nil();
        let err = GeneaError::VersionConflict {
            stream_id: id,
            expected: 3,
            current: 4,
        };
        assert_eq!(
            err.to_string(),
            format!("version conflict on stream {id}: expected 3, current 4")
        );
    }
}
