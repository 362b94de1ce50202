//! Upload validation rules.
//!
//! Checks run in a fixed priority order: presence, then content type, then
//! size. The first failing check wins.

use crate::media::MimeType;

/// Largest accepted upload: 3 MiB.
pub const MAX_UPLOAD_BYTES: u64 = 3 * 1024 * 1024;

/// Reason an upload was rejected. `Display` yields the exact client-facing
/// message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("No file uploaded")]
    Missing,
    #[error("Only JPEG / PNG allowed.")]
    UnsupportedType,
    #[error("File size must not exceed 3MB.")]
    TooLarge,
}

/// What validation needs to know about an uploaded file.
#[derive(Debug, Clone, Copy)]
pub struct UploadCandidate<'a> {
    /// Content type declared by the client.
    pub mime_type: &'a str,
    /// Size of the received payload in bytes.
    pub size: u64,
}

/// Limits applied to uploads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadLimits {
    pub max_bytes: u64,
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self {
            max_bytes: MAX_UPLOAD_BYTES,
        }
    }
}

/// Validate a candidate upload. `None` means no file part was received.
///
/// On success returns the parsed content type; only JPEG and PNG parse.
pub fn validate_upload(
    file: Option<&UploadCandidate<'_>>,
    limits: &UploadLimits,
) -> Result<MimeType, ValidationError> {
    let Some(file) = file else {
        return Err(ValidationError::Missing);
    };

    let mime_type: MimeType = file
        .mime_type
        .parse()
        .map_err(|_| ValidationError::UnsupportedType)?;

    if file.size > limits.max_bytes {
        return Err(ValidationError::TooLarge);
    }

    Ok(mime_type)
}
