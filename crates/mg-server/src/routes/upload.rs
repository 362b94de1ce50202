//! Upload route handler.

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use bytes::Bytes;
use serde::Serialize;

use mg_core::validation::{validate_upload, UploadCandidate, ValidationError};
use mg_core::{Error, ImageId, ImageRecord};

use crate::context::AppContext;
use crate::error::AppError;

/// Multipart field carrying the file.
pub const FILE_FIELD: &str = "image";

/// Filename recorded when the client sends none.
const DEFAULT_FILENAME: &str = "upload";

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub ok: bool,
    pub id: ImageId,
    pub filename: String,
}

/// A file part read from the multipart body.
struct ReceivedFile {
    filename: String,
    content_type: String,
    data: Bytes,
}

impl ReceivedFile {
    fn candidate(&self) -> UploadCandidate<'_> {
        UploadCandidate {
            mime_type: &self.content_type,
            size: self.data.len() as u64,
        }
    }
}

/// POST /upload
pub async fn upload_image(
    State(ctx): State<AppContext>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, AppError> {
    // A request that is not multipart at all carries no file.
    let mut multipart = multipart.map_err(|_| AppError::from(ValidationError::Missing))?;
    let mut file = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field
            .file_name()
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_FILENAME)
            .to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        let data = field.bytes().await.map_err(multipart_error)?;

        file = Some(ReceivedFile {
            filename,
            content_type,
            data,
        });
        break;
    }

    let candidate = file.as_ref().map(ReceivedFile::candidate);
    let validated = validate_upload(candidate.as_ref(), &ctx.config.uploads.limits());

    let (file, mime_type) = match (file, validated) {
        (Some(file), Ok(mime_type)) => (file, mime_type),
        (_, Err(reason)) => {
            tracing::info!(reason = %reason, "Rejected upload");
            return Err(reason.into());
        }
        (None, Ok(_)) => return Err(ValidationError::Missing.into()),
    };

    let id = ImageId::new();
    let record = ImageRecord::new(id, file.filename.clone(), mime_type, file.data);

    tracing::info!(
        image_id = %id,
        filename = %record.filename,
        size = record.size,
        mime_type = %mime_type,
        "Stored upload"
    );

    ctx.images.add(id, record);

    Ok(Json(UploadResponse {
        ok: true,
        id,
        filename: file.filename,
    }))
}

/// Map multipart framing failures to client errors. A body cut off by the
/// request size cap is reported with the usual size message.
fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return ValidationError::TooLarge.into();
    }
    Error::Validation(format!("Malformed upload: {}", e.body_text())).into()
}
