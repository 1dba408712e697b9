//! Donor route handlers.
//!
//! Public donor wall listing plus the admin create, delete and reorder
//! operations.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::{Json, response::IntoResponse};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use uplift_core::{DonorId, Tier};

use crate::db::DonorRepository;
use crate::error::AppError;
use crate::media::MAX_SINGLE_UPLOAD_BYTES;
use crate::models::{Donor, NewDonor};
use crate::state::AppState;

use super::{OkResponse, bad_multipart, map_not_found};

/// `{"donors": [...]}` response body.
#[derive(Debug, Serialize)]
pub struct DonorsResponse {
    pub donors: Vec<Donor>,
}

/// `{"donor": {...}}` response body.
#[derive(Debug, Serialize)]
pub struct DonorResponse {
    pub donor: Donor,
}

/// Reorder request body: the complete desired ordering.
#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    #[serde(rename = "orderedIds")]
    pub ordered_ids: Vec<DonorId>,
}

/// `GET /api/donors` - public list, newest first.
///
/// Degrades to an empty list when no database is configured.
pub async fn list_donors(State(state): State<AppState>) -> Result<Json<DonorsResponse>, AppError> {
    let Some(pool) = state.pool() else {
        return Ok(Json(DonorsResponse { donors: Vec::new() }));
    };

    let donors = DonorRepository::new(pool).list().await?;
    Ok(Json(DonorsResponse { donors }))
}

/// `POST /api/donors/admin` - create a donor.
///
/// Multipart body: `name` and `tier` required, `website`,
/// `donatedAmount`, `donatedCommodity` optional, plus an optional
/// `logo` file. An unparseable amount is treated as absent (the client
/// is trusted for numeric validation).
pub async fn create_donor(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut name: Option<String> = None;
    let mut tier_raw: Option<String> = None;
    let mut website: Option<String> = None;
    let mut amount_raw: Option<String> = None;
    let mut commodity: Option<String> = None;
    let mut logo: Option<(String, Bytes)> = None;

    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        let field_name = field.name().map(ToOwned::to_owned);
        match field_name.as_deref() {
            Some("name") => name = Some(field.text().await.map_err(bad_multipart)?),
            Some("tier") => tier_raw = Some(field.text().await.map_err(bad_multipart)?),
            Some("website") => website = Some(field.text().await.map_err(bad_multipart)?),
            Some("donatedAmount") => amount_raw = Some(field.text().await.map_err(bad_multipart)?),
            Some("donatedCommodity") => commodity = Some(field.text().await.map_err(bad_multipart)?),
            Some("logo") => {
                let filename = field.file_name().unwrap_or("logo").to_owned();
                let data = field.bytes().await.map_err(bad_multipart)?;
                logo = Some((filename, data));
            }
            _ => {}
        }
    }

    let (Some(name), Some(tier_raw)) = (
        name.filter(|n| !n.trim().is_empty()),
        tier_raw.filter(|t| !t.trim().is_empty()),
    ) else {
        return Err(AppError::BadRequest("name and tier required".to_string()));
    };

    let tier: Tier = tier_raw
        .parse()
        .map_err(|e| AppError::BadRequest(format!("{e}")))?;

    if let Some((_, data)) = &logo
        && data.len() > MAX_SINGLE_UPLOAD_BYTES
    {
        return Err(AppError::BadRequest(
            "logo exceeds the 5MiB limit".to_string(),
        ));
    }

    let pool = state.db()?;

    let logo_url = match logo {
        Some((filename, data)) => Some(state.media().store(data, &filename).await?.url),
        None => None,
    };

    let donor = DonorRepository::new(pool)
        .create(&NewDonor {
            name,
            tier,
            logo_url,
            website: website.filter(|w| !w.trim().is_empty()),
            donated_amount: amount_raw.and_then(|s| s.trim().parse::<f64>().ok()),
            donated_commodity: commodity.filter(|c| !c.trim().is_empty()),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(DonorResponse { donor })))
}

/// `DELETE /api/donors/admin/{id}` - delete a donor.
///
/// The logo blob (if any) is deleted best-effort. Donors carry no
/// backend reference, so a cloud-hosted logo's asset outlives the
/// record; the local backend removes the file.
pub async fn delete_donor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<OkResponse>, AppError> {
    let pool = state.db()?;
    let repo = DonorRepository::new(pool);
    let id = DonorId::new(id);

    let donor = repo
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("donor".to_string()))?;

    if let Some(logo_url) = &donor.logo_url
        && let Err(e) = state.media().delete(logo_url, None).await
    {
        tracing::warn!(error = %e, donor_id = %id, "logo delete failed; removing record anyway");
    }

    repo.delete(id).await.map_err(|e| map_not_found(e, "donor"))?;
    Ok(Json(OkResponse { ok: true }))
}

/// `POST /api/donors/admin/reorder` - set donor positions from the
/// given complete ordering.
///
/// Non-transactional by design: one concurrent update per id.
pub async fn reorder_donors(
    State(state): State<AppState>,
    Json(req): Json<ReorderRequest>,
) -> Result<Json<OkResponse>, AppError> {
    let pool = state.db()?;
    DonorRepository::new(pool).reorder(&req.ordered_ids).await?;
    Ok(Json(OkResponse { ok: true }))
}
