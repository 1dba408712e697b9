//! Request guard for the admin surface.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::error::AppError;
use crate::state::AppState;

/// Legacy shared-secret header, kept for backwards compatibility with
/// older admin clients.
pub const ADMIN_KEY_HEADER: &str = "x-admin-key";

/// Gate protecting admin routes.
///
/// Ordered check, first match wins:
/// 1. a configured static admin key supplied via `x-admin-key`
/// 2. a valid bearer token via `Authorization: Bearer <token>`; the
///    decoded claims are attached to the request extensions
///
/// Anything else is rejected with 401. Clients must treat a 401 as
/// "session expired", drop any stored token and prompt a re-login.
pub async fn require_admin(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if let Some(provided) = request
        .headers()
        .get(ADMIN_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        && state.auth().verify_static_key(provided)
    {
        return Ok(next.run(request).await);
    }

    let claims = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .and_then(|token| state.auth().validate_token(token));

    match claims {
        Some(claims) => {
            request.extensions_mut().insert(claims);
            Ok(next.run(request).await)
        }
        None => Err(AppError::Unauthorized),
    }
}
