use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::enums::{MediaKind, MediaOwnerKind};
use crate::error::GeneaError;

/// Upper bound for a single media payload.
pub const MAX_MEDIA_BYTES: usize = 10 * 1024 * 1024;

/// Crop rectangle applied to a media item's display form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// A media attachment (photo, document, audio, video), polymorphically bound
/// to its owning entity. Binary payloads travel base64-encoded inside event
/// payloads and live in blob columns in the read model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Media {
    pub id: Uuid,
    pub xref: Option<String>,
    pub owner_kind: MediaOwnerKind,
    pub owner_id: Uuid,
    pub title: Option<String>,
    pub description: Option<String>,
    pub mime_type: String,
    pub media_kind: MediaKind,
    pub file_name: String,
    #[serde(with = "crate::b64")]
    pub data: Vec<u8>,
    #[serde(default, with = "crate::b64::opt")]
    pub thumbnail: Option<Vec<u8>>,
    pub crop: Option<CropRect>,
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Media {
    pub fn validate(&self) -> Result<(), GeneaError> {
        if self.mime_type.trim().is_empty() {
            return Err(GeneaError::validation("mime_type", "must not be empty"));
        }
        if self.file_name.trim().is_empty() {
            return Err(GeneaError::validation("file_name", "must not be empty"));
        }
        if self.data.len() > MAX_MEDIA_BYTES {
            return Err(GeneaError::validation(
                "data",
                format!("payload exceeds {MAX_MEDIA_BYTES} bytes"),
            ));
        }
        if let Some(CropRect { width, height, .. }) = self.crop
            && (width == 0 || height == 0)
        {
            return Err(GeneaError::validation("crop", "must have a non-zero area"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn media(data: Vec<u8>) -> Media {
        Media {
            id: Uuid::now_v7(),
            xref: None,
            owner_kind: MediaOwnerKind::Person,
            owner_id: Uuid::now_v7(),
            title: None,
            description: None,
            mime_type: "image/jpeg".into(),
            media_kind: MediaKind::Photo,
            file_name: "portrait.jpg".into(),
            data,
            thumbnail: None,
            crop: None,
            version: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_oversized_payload_rejected() {
        assert!(media(vec![0u8; MAX_MEDIA_BYTES + 1]).validate().is_err());
        assert!(media(vec![0u8; 16]).validate().is_ok());
    }

    #[test]
    fn test_media_bytes_roundtrip_as_base64() {
        let m = media(vec![1, 2, 3, 255]);
        let json = serde_json::to_string(&m).unwrap();
        assert!(json.contains(r#""data":"AQID/w==""#));
        let back: Media = serde_json::from_str(&json).unwrap();
        assert_eq!(back.data, vec![1, 2, 3, 255]);
    }

    #[test]
    fn test_zero_area_crop_rejected() {
        let mut m = media(vec![1]);
        m.crop = Some(CropRect {
            x: 0,
            y: 0,
            width: 0,
            height: 10,
        });
        assert!(m.validate().is_err());
    }
}
