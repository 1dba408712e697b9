//! Admin identity check command.
//!
//! Builds the same auth service the server constructs at startup and
//! reports whether a credential pair would be accepted. Useful after
//! rotating `ADMIN_PASSWORD` to confirm the deployed configuration.

use thiserror::Error;
use uplift_server::auth::{AdminAuth, AuthError};
use uplift_server::config::{ConfigError, ServerConfig};

/// Errors from the check-admin command.
#[derive(Debug, Error)]
pub enum CheckAdminError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    #[error("credentials rejected")]
    Rejected,
}

/// Verify a credential pair against the configured admin identity.
///
/// # Errors
///
/// Returns `CheckAdminError::Rejected` if the pair does not match, or a
/// config/auth error if the environment is incomplete.
pub fn check(email: &str, password: &str) -> Result<(), CheckAdminError> {
    let config = ServerConfig::from_env()?;
    let auth = AdminAuth::new(&config.admin)?;

    if auth.verify_credentials(email, password) {
        tracing::info!("Credentials accepted for {email}");
        Ok(())
    } else {
        Err(CheckAdminError::Rejected)
    }
}
