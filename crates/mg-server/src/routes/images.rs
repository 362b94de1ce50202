//! Image listing, serving, thumbnail and delete route handlers.

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use mg_core::{Error, ImageId, ImageSummary};

use crate::context::AppContext;
use crate::error::AppError;

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub ok: bool,
}

/// Ids are opaque to clients, so one that does not parse is simply unknown.
fn parse_id(raw: &str) -> Result<ImageId, Error> {
    raw.parse().map_err(|_| Error::not_found("image", raw))
}

/// GET /images
pub async fn list_images(State(ctx): State<AppContext>) -> Json<Vec<ImageSummary>> {
    Json(ctx.images.summaries())
}

/// GET /images/{id}
pub async fn get_image(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id)?;
    let record = ctx
        .images
        .get(&id)
        .ok_or_else(|| Error::not_found("image", id))?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, record.mime_type.as_str())],
        record.data,
    ))
}

/// GET /images/{id}/thumbnail
pub async fn get_thumbnail(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id)?;
    let thumb = ctx
        .thumbnails
        .get_or_generate(id, &ctx.images, &ctx.config.thumbnails)
        .await?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, thumb.mime_type.as_str())],
        thumb.data,
    ))
}

/// DELETE /images/{id}
pub async fn delete_image(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, AppError> {
    let id = parse_id(&id)?;
    if !ctx.images.delete(&id) {
        return Err(Error::not_found("image", id).into());
    }

    tracing::info!(image_id = %id, "Deleted image");
    Ok(Json(DeleteResponse { ok: true }))
}
