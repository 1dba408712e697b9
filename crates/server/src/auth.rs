//! Admin authentication service.
//!
//! A single operator identity is configured at deploy time. The service
//! hashes the configured password once at construction (Argon2id) and
//! issues short-lived signed bearer tokens for authenticated sessions.
//!
//! There is no account lockout and no rate limiting: this is a single
//! static admin, not a multi-user system.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Validation, decode, encode};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::AdminConfig;

/// Bearer token lifetime: 4 hours.
const TOKEN_TTL_SECS: i64 = 4 * 60 * 60;

/// Errors raised while constructing the service or issuing tokens.
///
/// Token *validation* never errors; an invalid token is simply `None`.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Hashing the configured password failed.
    #[error("failed to hash admin password")]
    PasswordHash,

    /// Signing a token failed.
    #[error("failed to sign token: {0}")]
    TokenSigning(#[from] jsonwebtoken::errors::Error),
}

/// Claims carried by an admin bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminClaims {
    /// Admin email (subject)
    pub sub: String,
    /// Role marker, always `"admin"`
    pub role: String,
    /// Issued-at (unix seconds)
    pub iat: usize,
    /// Expiry (unix seconds)
    pub exp: usize,
}

/// Admin authentication service.
///
/// Constructed once at process start and shared through `AppState`; the
/// Argon2 hash of the configured password is computed here so that it is
/// never recomputed per request.
pub struct AdminAuth {
    email: String,
    password_hash: String,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    api_key: Option<String>,
}

impl AdminAuth {
    /// Build the service from the admin configuration.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::PasswordHash` if the configured password
    /// cannot be hashed.
    pub fn new(config: &AdminConfig) -> Result<Self, AuthError> {
        let password_hash = hash_password(config.password.expose_secret())?;
        let secret = config.jwt_secret.expose_secret().as_bytes();

        Ok(Self {
            email: config.email.clone(),
            password_hash,
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            api_key: config.api_key.clone(),
        })
    }

    /// Check submitted credentials against the configured identity.
    ///
    /// The email comparison is case-sensitive; the password is checked
    /// against the retained Argon2 hash.
    #[must_use]
    pub fn verify_credentials(&self, email: &str, password: &str) -> bool {
        if email != self.email {
            return false;
        }
        verify_password(password, &self.password_hash)
    }

    /// Issue a signed bearer token for the admin identity.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenSigning` if encoding fails.
    pub fn issue_token(&self) -> Result<String, AuthError> {
        let now = chrono::Utc::now().timestamp();
        let claims = AdminClaims {
            sub: self.email.clone(),
            role: "admin".to_string(),
            iat: usize::try_from(now).unwrap_or(0),
            exp: usize::try_from(now + TOKEN_TTL_SECS).unwrap_or(usize::MAX),
        };

        Ok(encode(
            &jsonwebtoken::Header::default(),
            &claims,
            &self.encoding_key,
        )?)
    }

    /// Validate a bearer token, returning its claims.
    ///
    /// Returns `None` for any failure (bad signature, malformed token,
    /// expired). Callers treat `None` as "unauthenticated".
    #[must_use]
    pub fn validate_token(&self, token: &str) -> Option<AdminClaims> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<AdminClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .ok()
    }

    /// Check the legacy static shared secret.
    ///
    /// Returns `false` when no static key is configured.
    #[must_use]
    pub fn verify_static_key(&self, provided: &str) -> bool {
        self.api_key.as_deref() == Some(provided)
    }
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}
