//! Asset download, optionally as a width-bounded preview rendition.
//!
//! The template store is the source of truth for existence: an id unknown
//! to it is a 404 before the media store is touched at all.

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::error::ApiError;
use crate::media::{self, MediaStore};
use crate::state::AppState;
use crate::store::Db;

#[derive(Deserialize)]
pub struct DownloadParams {
    #[serde(rename = "isPreview", default)]
    is_preview: bool,
}

pub async fn process(
    state: web::Data<AppState>,
    template_id: web::Path<i64>,
    params: web::Query<DownloadParams>,
) -> Result<HttpResponse, ApiError> {
    let bytes = download(
        &state.db,
        &state.media,
        template_id.into_inner(),
        params.is_preview,
        state.config.preview_max_width,
    )?;

    let content_type = if params.is_preview {
        "image/png"
    } else {
        "application/octet-stream"
    };
    Ok(HttpResponse::Ok().content_type(content_type).body(bytes))
}

pub fn download(
    db: &Db,
    media: &MediaStore,
    id: i64,
    is_preview: bool,
    preview_max_width: u32,
) -> Result<Vec<u8>, ApiError> {
    if !db.template_exists(id)? {
        return Err(ApiError::NotFound);
    }

    let original = media.retrieve(id)?;
    if is_preview {
        media::render_preview(&original, preview_max_width)
    } else {
        Ok(original)
    }
}
