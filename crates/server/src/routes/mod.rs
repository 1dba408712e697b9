//! HTTP surface: public reads, admin writes, health.
//!
//! Admin routes are guarded by [`require_admin`]; everything else is
//! public. When the local media backend is active, uploaded files are
//! served statically under `/uploads/*`.

pub mod auth;
pub mod donors;
pub mod gallery;
pub mod members;

use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, patch, post};
use axum::{Json, Router, middleware};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::db::RepositoryError;
use crate::error::AppError;
use crate::media::{MAX_GALLERY_IMAGE_BYTES, MAX_SINGLE_UPLOAD_BYTES};
use crate::middleware::require_admin;
use crate::state::AppState;

/// Maximum number of images per gallery batch upload.
pub const MAX_GALLERY_BATCH: usize = 12;

// Request body caps for the multipart admin routes. Slightly above the
// per-file limits to leave room for field boundaries and metadata.
const GALLERY_BODY_LIMIT: usize = MAX_GALLERY_BATCH * MAX_GALLERY_IMAGE_BYTES + 1024 * 1024;
const SINGLE_BODY_LIMIT: usize = MAX_SINGLE_UPLOAD_BYTES + 1024 * 1024;

/// `{"ok": true}` response body.
#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

/// `/api/ping` response body.
#[derive(Debug, Serialize)]
pub struct PingResponse {
    pub message: String,
}

/// Build the complete application router.
#[must_use]
pub fn app(state: AppState) -> Router {
    let admin_routes = Router::new()
        .route(
            "/api/gallery/admin",
            post(gallery::upload_images).layer(DefaultBodyLimit::max(GALLERY_BODY_LIMIT)),
        )
        .route(
            "/api/gallery/admin/{id}",
            patch(gallery::update_image).delete(gallery::delete_image),
        )
        .route(
            "/api/donors/admin",
            post(donors::create_donor).layer(DefaultBodyLimit::max(SINGLE_BODY_LIMIT)),
        )
        .route("/api/donors/admin/reorder", post(donors::reorder_donors))
        .route("/api/donors/admin/{id}", delete(donors::delete_donor))
        .route(
            "/api/members/admin",
            post(members::create_member).layer(DefaultBodyLimit::max(SINGLE_BODY_LIMIT)),
        )
        .route("/api/members/admin/reorder", post(members::reorder_members))
        .route("/api/members/admin/{id}", delete(members::delete_member))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    let public_routes = Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .route("/api/ping", get(ping))
        .route("/api/admin/login", post(auth::login))
        .route("/api/gallery", get(gallery::list_images))
        .route("/api/gallery/featured", get(gallery::list_featured))
        .route("/api/donors", get(donors::list_donors))
        .route("/api/members", get(members::list_members));

    let serve_uploads = state.config().local_media_active();
    let uploads_dir = state.config().uploads_dir.clone();

    let mut router = public_routes
        .merge(admin_routes)
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record("latency_ms", latency.as_millis() as u64);
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state);

    if serve_uploads {
        router = router.nest_service("/uploads", ServeDir::new(uploads_dir));
    }

    router
}

/// Liveness health check endpoint.
///
/// Returns `{"ok": true}` if the server is running. Does not check
/// dependencies.
async fn health() -> Json<OkResponse> {
    Json(OkResponse { ok: true })
}

/// Readiness health check endpoint.
///
/// Verifies database connectivity before returning OK.
/// Returns 503 Service Unavailable if no database is configured or it
/// is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    let Some(pool) = state.pool() else {
        return StatusCode::SERVICE_UNAVAILABLE;
    };

    match sqlx::query("SELECT 1").fetch_one(pool).await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Configurable ping endpoint, handy for uptime checks.
async fn ping(State(state): State<AppState>) -> Json<PingResponse> {
    let message = state
        .config()
        .ping_message
        .clone()
        .unwrap_or_else(|| "ping".to_string());
    Json(PingResponse { message })
}

/// Map a repository error to 404 for the given resource, passing other
/// database errors through.
pub(crate) fn map_not_found(err: RepositoryError, what: &str) -> AppError {
    match err {
        RepositoryError::NotFound => AppError::NotFound(what.to_string()),
        other => AppError::Database(other),
    }
}

/// Convert a multipart decoding failure into a 400.
pub(crate) fn bad_multipart(err: axum::extract::multipart::MultipartError) -> AppError {
    AppError::BadRequest(format!("invalid multipart request: {err}"))
}
