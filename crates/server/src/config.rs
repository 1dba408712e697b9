//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `ADMIN_EMAIL` - Email of the single admin operator
//! - `ADMIN_PASSWORD` - Password of the single admin operator
//! - `ADMIN_JWT_SECRET` - Token signing secret (min 32 chars)
//!
//! ## Optional
//! - `DATABASE_URL` - `PostgreSQL` connection string; when absent the
//!   server runs in degraded mode (public reads return empty lists,
//!   admin writes return 503)
//! - `HOST` - Bind address (default: 127.0.0.1)
//! - `PORT` - Listen port (default: 8080)
//! - `ADMIN_API_KEY` - Legacy shared-secret header value (`x-admin-key`)
//! - `UPLOADS_DIR` - Local upload directory (default: public/uploads)
//! - `PING_MESSAGE` - Response body for `/api/ping`
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//!
//! ## Optional (remote image host - enables the cloud media backend)
//! - `CLOUDINARY_CLOUD_NAME` - Image host account name
//! - `CLOUDINARY_API_KEY` - Image host API key
//! - `CLOUDINARY_API_SECRET` - Image host API secret
//! - `CLOUDINARY_FOLDER` - Remote folder for uploads (default: ngo-gallery)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// `PostgreSQL` connection URL (contains password). `None` runs the
    /// server without persistence.
    pub database_url: Option<SecretString>,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Admin identity and token signing configuration
    pub admin: AdminConfig,
    /// Remote image host configuration (optional - selects the cloud
    /// media backend when present)
    pub cloud: Option<CloudStorageConfig>,
    /// Directory for locally stored uploads, served under `/uploads`
    pub uploads_dir: PathBuf,
    /// Response message for `/api/ping`
    pub ping_message: Option<String>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

/// Admin identity configuration.
///
/// Implements `Debug` manually to redact the password and signing secret.
#[derive(Clone)]
pub struct AdminConfig {
    /// Email the operator logs in with (compared case-sensitively)
    pub email: String,
    /// Operator password (hashed once at startup, never stored in plain
    /// text beyond this config)
    pub password: SecretString,
    /// Bearer token signing secret
    pub jwt_secret: SecretString,
    /// Legacy static shared secret for the `x-admin-key` header
    pub api_key: Option<String>,
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("jwt_secret", &"[REDACTED]")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Remote image host configuration.
///
/// Implements `Debug` manually to redact the API secret.
#[derive(Clone)]
pub struct CloudStorageConfig {
    /// Image host account name (becomes part of the upload URL)
    pub cloud_name: String,
    /// Image host API key
    pub api_key: String,
    /// Image host API secret, used for request signing
    pub api_secret: SecretString,
    /// Remote folder uploads are grouped under
    pub folder: String,
}

impl std::fmt::Debug for CloudStorageConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudStorageConfig")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .field("folder", &self.folder)
            .finish()
    }
}

impl CloudStorageConfig {
    fn from_env() -> Result<Option<Self>, ConfigError> {
        let cloud_name = get_optional_env("CLOUDINARY_CLOUD_NAME");
        let api_key = get_optional_env("CLOUDINARY_API_KEY");
        let api_secret = get_optional_env("CLOUDINARY_API_SECRET");

        match (cloud_name, api_key, api_secret) {
            (Some(cloud_name), Some(api_key), Some(api_secret)) => Ok(Some(Self {
                cloud_name,
                api_key,
                api_secret: SecretString::from(api_secret),
                folder: get_env_or_default("CLOUDINARY_FOLDER", "ngo-gallery"),
            })),
            (None, None, None) => Ok(None),
            _ => Err(ConfigError::InvalidEnvVar(
                "CLOUDINARY_*".to_string(),
                "CLOUDINARY_CLOUD_NAME, CLOUDINARY_API_KEY and CLOUDINARY_API_SECRET must be set together"
                    .to_string(),
            )),
        }
    }
}

impl AdminConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let jwt_secret = SecretString::from(get_required_env("ADMIN_JWT_SECRET")?);
        validate_jwt_secret(&jwt_secret, "ADMIN_JWT_SECRET")?;

        Ok(Self {
            email: get_required_env("ADMIN_EMAIL")?,
            password: SecretString::from(get_required_env("ADMIN_PASSWORD")?),
            jwt_secret,
            api_key: get_optional_env("ADMIN_API_KEY"),
        })
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid,
    /// or if the signing secret fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_optional_env("DATABASE_URL").map(SecretString::from);
        let host = get_env_or_default("HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("PORT", "8080")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("PORT".to_string(), e.to_string()))?;

        let admin = AdminConfig::from_env()?;
        let cloud = CloudStorageConfig::from_env()?;
        let uploads_dir = PathBuf::from(get_env_or_default("UPLOADS_DIR", "public/uploads"));
        let ping_message = get_optional_env("PING_MESSAGE");
        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_optional_env("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = get_optional_env("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);

        Ok(Self {
            database_url,
            host,
            port,
            admin,
            cloud,
            uploads_dir,
            ping_message,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the local filesystem media backend is active.
    ///
    /// The remote image host takes precedence whenever its credentials
    /// are configured.
    #[must_use]
    pub const fn local_media_active(&self) -> bool {
        self.cloud.is_none()
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Validate that the token signing secret meets minimum length requirements.
fn validate_jwt_secret(secret: &SecretString, var_name: &str) -> Result<(), ConfigError> {
    let value = secret.expose_secret();
    if value.len() < MIN_JWT_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "must be at least {} characters (got {})",
                MIN_JWT_SECRET_LENGTH,
                value.len()
            ),
        ));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn test_config() -> ServerConfig {
        ServerConfig {
            database_url: None,
            host: "127.0.0.1".parse().unwrap(),
            port: 8080,
            admin: AdminConfig {
                email: "ops@example.org".to_string(),
                password: SecretString::from("a-strong-password"),
                jwt_secret: SecretString::from("x".repeat(32)),
                api_key: Some("legacy-key".to_string()),
            },
            cloud: None,
            uploads_dir: PathBuf::from("public/uploads"),
            ping_message: None,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 1.0,
        }
    }

    #[test]
    fn test_validate_jwt_secret_too_short() {
        let secret = SecretString::from("short");
        assert!(validate_jwt_secret(&secret, "TEST_SECRET").is_err());
    }

    #[test]
    fn test_validate_jwt_secret_valid_length() {
        let secret = SecretString::from("a".repeat(32));
        assert!(validate_jwt_secret(&secret, "TEST_SECRET").is_ok());
    }

    #[test]
    fn test_socket_addr() {
        let config = test_config();
        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 8080);
    }

    #[test]
    fn test_local_media_active_without_cloud_credentials() {
        let mut config = test_config();
        assert!(config.local_media_active());

        config.cloud = Some(CloudStorageConfig {
            cloud_name: "demo".to_string(),
            api_key: "123456".to_string(),
            api_secret: SecretString::from("shhh"),
            folder: "ngo-gallery".to_string(),
        });
        assert!(!config.local_media_active());
    }

    #[test]
    fn test_admin_config_debug_redacts_secrets() {
        let config = test_config();
        let debug_output = format!("{:?}", config.admin);

        assert!(debug_output.contains("ops@example.org"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("a-strong-password"));
        assert!(!debug_output.contains("legacy-key"));
    }

    #[test]
    fn test_cloud_config_debug_redacts_secret() {
        let cloud = CloudStorageConfig {
            cloud_name: "demo".to_string(),
            api_key: "123456".to_string(),
            api_secret: SecretString::from("super-secret-value"),
            folder: "ngo-gallery".to_string(),
        };

        let debug_output = format!("{cloud:?}");
        assert!(debug_output.contains("demo"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super-secret-value"));
    }
}
