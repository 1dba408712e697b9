//! Admin login route handler.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::state::AppState;

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// `POST /api/admin/login`
///
/// Verifies the submitted credentials against the configured admin
/// identity and issues a bearer token valid for four hours. There is no
/// lockout or rate limiting (single static admin).
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let (Some(email), Some(password)) = (req.email, req.password) else {
        return Err(AppError::BadRequest("Email and password required".to_string()));
    };

    if !state.auth().verify_credentials(&email, &password) {
        return Err(AppError::Unauthorized);
    }

    let token = state.auth().issue_token()?;
    Ok(Json(TokenResponse { token }))
}
