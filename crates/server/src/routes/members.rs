//! Team member route handlers.
//!
//! Public team listing plus the admin create, delete and reorder
//! operations.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::{Json, response::IntoResponse};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use uplift_core::MemberId;

use crate::db::MemberRepository;
use crate::error::AppError;
use crate::media::MAX_SINGLE_UPLOAD_BYTES;
use crate::models::{Member, NewMember, member::DEFAULT_ROLE};
use crate::state::AppState;

use super::{OkResponse, bad_multipart, map_not_found};

/// `{"members": [...]}` response body.
#[derive(Debug, Serialize)]
pub struct MembersResponse {
    pub members: Vec<Member>,
}

/// `{"member": {...}}` response body.
#[derive(Debug, Serialize)]
pub struct MemberResponse {
    pub member: Member,
}

/// Reorder request body: the complete desired ordering.
#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    #[serde(rename = "orderedIds")]
    pub ordered_ids: Vec<MemberId>,
}

/// `GET /api/members` - public list in display order (position
/// ascending, then creation time).
///
/// Degrades to an empty list when no database is configured.
pub async fn list_members(State(state): State<AppState>) -> Result<Json<MembersResponse>, AppError> {
    let Some(pool) = state.pool() else {
        return Ok(Json(MembersResponse { members: Vec::new() }));
    };

    let members = MemberRepository::new(pool).list().await?;
    Ok(Json(MembersResponse { members }))
}

/// `POST /api/members/admin` - create a member.
///
/// Multipart body: `name` required; `role` (defaults to "Core"),
/// `bio`, `instaId`, `email`, `contact` optional, plus an optional
/// `photo` file.
pub async fn create_member(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut name: Option<String> = None;
    let mut role: Option<String> = None;
    let mut bio: Option<String> = None;
    let mut insta_id: Option<String> = None;
    let mut email: Option<String> = None;
    let mut contact: Option<String> = None;
    let mut photo: Option<(String, Bytes)> = None;

    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        let field_name = field.name().map(ToOwned::to_owned);
        match field_name.as_deref() {
            Some("name") => name = Some(field.text().await.map_err(bad_multipart)?),
            Some("role") => role = Some(field.text().await.map_err(bad_multipart)?),
            Some("bio") => bio = Some(field.text().await.map_err(bad_multipart)?),
            Some("instaId") => insta_id = Some(field.text().await.map_err(bad_multipart)?),
            Some("email") => email = Some(field.text().await.map_err(bad_multipart)?),
            Some("contact") => contact = Some(field.text().await.map_err(bad_multipart)?),
            Some("photo") => {
                let filename = field.file_name().unwrap_or("photo").to_owned();
                let data = field.bytes().await.map_err(bad_multipart)?;
                photo = Some((filename, data));
            }
            _ => {}
        }
    }

    let Some(name) = name.filter(|n| !n.trim().is_empty()) else {
        return Err(AppError::BadRequest("name required".to_string()));
    };

    if let Some((_, data)) = &photo
        && data.len() > MAX_SINGLE_UPLOAD_BYTES
    {
        return Err(AppError::BadRequest(
            "photo exceeds the 5MiB limit".to_string(),
        ));
    }

    let pool = state.db()?;

    let (photo_url, backend_ref) = match photo {
        Some((filename, data)) => {
            let stored = state.media().store(data, &filename).await?;
            (Some(stored.url), stored.backend_ref)
        }
        None => (None, None),
    };

    let member = MemberRepository::new(pool)
        .create(&NewMember {
            name,
            role: role
                .filter(|r| !r.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_ROLE.to_string()),
            bio: bio.filter(|b| !b.trim().is_empty()),
            insta_id: insta_id.filter(|i| !i.trim().is_empty()),
            email: email.filter(|e| !e.trim().is_empty()),
            contact: contact.filter(|c| !c.trim().is_empty()),
            photo_url,
            backend_ref,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(MemberResponse { member })))
}

/// `DELETE /api/members/admin/{id}` - delete a member.
///
/// The photo blob (if any) is deleted best-effort first; a failed blob
/// deletion is logged and swallowed so the record removal always
/// completes.
pub async fn delete_member(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<OkResponse>, AppError> {
    let pool = state.db()?;
    let repo = MemberRepository::new(pool);
    let id = MemberId::new(id);

    let member = repo
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("member".to_string()))?;

    if let Some(photo_url) = &member.photo_url
        && let Err(e) = state
            .media()
            .delete(photo_url, member.backend_ref.as_deref())
            .await
    {
        tracing::warn!(error = %e, member_id = %id, "photo delete failed; removing record anyway");
    }

    repo.delete(id).await.map_err(|e| map_not_found(e, "member"))?;
    Ok(Json(OkResponse { ok: true }))
}

/// `POST /api/members/admin/reorder` - set member positions from the
/// given complete ordering.
///
/// Non-transactional by design: one concurrent update per id.
pub async fn reorder_members(
    State(state): State<AppState>,
    Json(req): Json<ReorderRequest>,
) -> Result<Json<OkResponse>, AppError> {
    let pool = state.db()?;
    MemberRepository::new(pool).reorder(&req.ordered_ids).await?;
    Ok(Json(OkResponse { ok: true }))
}
