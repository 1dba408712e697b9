//! Gallery route handlers.
//!
//! Public listing (all / featured) plus the admin batch upload,
//! featured toggle and deletion.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::{Json, response::IntoResponse};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use uplift_core::ImageId;

use crate::db::GalleryRepository;
use crate::error::AppError;
use crate::media::MAX_GALLERY_IMAGE_BYTES;
use crate::models::{GalleryImage, NewGalleryImage};
use crate::state::AppState;

use super::{MAX_GALLERY_BATCH, OkResponse, bad_multipart, map_not_found};

/// `{"images": [...]}` response body.
#[derive(Debug, Serialize)]
pub struct ImagesResponse {
    pub images: Vec<GalleryImage>,
}

/// `{"image": {...}}` response body.
#[derive(Debug, Serialize)]
pub struct ImageResponse {
    pub image: GalleryImage,
}

/// Partial update body for an image.
#[derive(Debug, Deserialize)]
pub struct UpdateImageRequest {
    pub featured: Option<bool>,
}

/// `GET /api/gallery` - public list, newest first.
///
/// Degrades to an empty list when no database is configured so the
/// public page still renders.
pub async fn list_images(State(state): State<AppState>) -> Result<Json<ImagesResponse>, AppError> {
    let Some(pool) = state.pool() else {
        return Ok(Json(ImagesResponse { images: Vec::new() }));
    };

    let images = GalleryRepository::new(pool).list().await?;
    Ok(Json(ImagesResponse { images }))
}

/// `GET /api/gallery/featured` - featured subset for the homepage
/// slideshow.
pub async fn list_featured(State(state): State<AppState>) -> Result<Json<ImagesResponse>, AppError> {
    let Some(pool) = state.pool() else {
        return Ok(Json(ImagesResponse { images: Vec::new() }));
    };

    let images = GalleryRepository::new(pool).list_featured().await?;
    Ok(Json(ImagesResponse { images }))
}

/// `POST /api/gallery/admin` - batch upload.
///
/// Multipart body: optional shared `title` field plus 1..N `images`
/// files. Files missing a shared title are titled by their original
/// filename. Blobs are stored before records are persisted, so a
/// persisted record always has a retrievable URL.
pub async fn upload_images(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut shared_title: Option<String> = None;
    let mut files: Vec<(String, Bytes)> = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        let field_name = field.name().map(ToOwned::to_owned);
        match field_name.as_deref() {
            Some("title") => shared_title = Some(field.text().await.map_err(bad_multipart)?),
            Some("images") => {
                let filename = field.file_name().unwrap_or("image").to_owned();
                let data = field.bytes().await.map_err(bad_multipart)?;
                files.push((filename, data));
            }
            _ => {}
        }
    }

    if files.is_empty() {
        return Err(AppError::BadRequest("No files uploaded".to_string()));
    }
    if files.len() > MAX_GALLERY_BATCH {
        return Err(AppError::BadRequest(format!(
            "too many files (max {MAX_GALLERY_BATCH})"
        )));
    }
    for (filename, data) in &files {
        if data.len() > MAX_GALLERY_IMAGE_BYTES {
            return Err(AppError::BadRequest(format!(
                "{filename} exceeds the 20MiB per-image limit"
            )));
        }
    }

    let pool = state.db()?;
    let repo = GalleryRepository::new(pool);
    let shared_title = shared_title.filter(|t| !t.trim().is_empty());

    let mut images = Vec::with_capacity(files.len());
    for (filename, data) in files {
        let stored = state.media().store(data, &filename).await?;
        let title = shared_title.clone().unwrap_or_else(|| filename.clone());

        let image = repo
            .create(&NewGalleryImage {
                title,
                url: stored.url,
                backend_ref: stored.backend_ref,
            })
            .await?;
        images.push(image);
    }

    Ok((StatusCode::CREATED, Json(ImagesResponse { images })))
}

/// `PATCH /api/gallery/admin/{id}` - update an image (currently only
/// the featured flag).
///
/// A body without `featured` is a no-op that returns the current
/// record.
pub async fn update_image(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateImageRequest>,
) -> Result<Json<ImageResponse>, AppError> {
    let pool = state.db()?;
    let repo = GalleryRepository::new(pool);
    let id = ImageId::new(id);

    let image = match req.featured {
        Some(featured) => repo
            .set_featured(id, featured)
            .await
            .map_err(|e| map_not_found(e, "image"))?,
        None => repo
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound("image".to_string()))?,
    };

    Ok(Json(ImageResponse { image }))
}

/// `DELETE /api/gallery/admin/{id}` - delete an image.
///
/// The underlying blob is deleted best-effort first; a failed blob
/// deletion is logged and swallowed so the record removal always
/// completes.
pub async fn delete_image(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<OkResponse>, AppError> {
    let pool = state.db()?;
    let repo = GalleryRepository::new(pool);
    let id = ImageId::new(id);

    let image = repo
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("image".to_string()))?;

    if let Err(e) = state
        .media()
        .delete(&image.url, image.backend_ref.as_deref())
        .await
    {
        tracing::warn!(error = %e, image_id = %id, "blob delete failed; removing record anyway");
    }

    repo.delete(id).await.map_err(|e| map_not_found(e, "image"))?;
    Ok(Json(OkResponse { ok: true }))
}
