//! Image domain types: content types, stored records and their metadata
//! projection.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ids::ImageId;

// ---------------------------------------------------------------------------
// MimeType
// ---------------------------------------------------------------------------

/// Content types the gallery stores and serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MimeType {
    #[serde(rename = "image/jpeg")]
    Jpeg,
    #[serde(rename = "image/png")]
    Png,
}

impl MimeType {
    /// The canonical `Content-Type` string.
    pub const fn as_str(&self) -> &'static str {
        match self {
            MimeType::Jpeg => "image/jpeg",
            MimeType::Png => "image/png",
        }
    }
}

impl fmt::Display for MimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a content type is outside the allow-list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported content type: {0}")]
pub struct UnsupportedMimeType(pub String);

impl FromStr for MimeType {
    type Err = UnsupportedMimeType;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "image/jpeg" => Ok(MimeType::Jpeg),
            "image/png" => Ok(MimeType::Png),
            other => Err(UnsupportedMimeType(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// ImageRecord
// ---------------------------------------------------------------------------

/// An uploaded image: raw bytes plus metadata.
///
/// `data` is a reference-counted buffer, so cloning a record to hand it to a
/// reader does not copy the image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    pub id: ImageId,
    /// Filename as sent by the client.
    pub filename: String,
    pub mime_type: MimeType,
    pub data: Bytes,
    /// Byte size of `data`.
    pub size: u64,
    pub uploaded_at: DateTime<Utc>,
}

impl ImageRecord {
    /// Build a record stamped with the current time.
    pub fn new(id: ImageId, filename: impl Into<String>, mime_type: MimeType, data: Bytes) -> Self {
        Self {
            id,
            filename: filename.into(),
            mime_type,
            size: data.len() as u64,
            data,
            uploaded_at: Utc::now(),
        }
    }

    /// Metadata view of this record, without the bytes.
    pub fn summary(&self) -> ImageSummary {
        ImageSummary {
            id: self.id,
            filename: self.filename.clone(),
            size: self.size,
            mimetype: self.mime_type,
            uploaded_at: self.uploaded_at.timestamp_millis(),
        }
    }
}

/// Listing entry for `GET /images`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageSummary {
    pub id: ImageId,
    pub filename: String,
    pub size: u64,
    pub mimetype: MimeType,
    /// Milliseconds since the Unix epoch.
    pub uploaded_at: i64,
}
