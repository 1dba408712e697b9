//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::{AdminAuth, AuthError};
use crate::config::ServerConfig;
use crate::db;
use crate::error::AppError;
use crate::media::{self, MediaError, MediaStore};

/// Error creating the application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("auth setup failed: {0}")]
    Auth(#[from] AuthError),
    #[error("media setup failed: {0}")]
    Media(#[from] MediaError),
    #[error("database setup failed: {0}")]
    Database(#[from] sqlx::Error),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources: configuration, the (optional) database pool, the
/// admin auth service and the selected media backend. Everything here
/// is constructed once at process start and injected - there is no
/// lazily initialized module-level state.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    pool: Option<PgPool>,
    auth: AdminAuth,
    media: Arc<dyn MediaStore>,
}

impl AppState {
    /// Create a new application state from configuration.
    ///
    /// When no database URL is configured the pool is absent and the
    /// server runs in degraded mode: public reads return empty
    /// collections, admin writes return 503.
    ///
    /// # Errors
    ///
    /// Returns an error if the admin password cannot be hashed, the
    /// media backend cannot be constructed, or the database URL cannot
    /// be parsed.
    pub fn new(config: ServerConfig) -> Result<Self, StateError> {
        let pool = config
            .database_url
            .as_ref()
            .map(db::create_pool)
            .transpose()?;
        if pool.is_none() {
            tracing::warn!(
                "DATABASE_URL not set; running without persistence (public reads return empty lists)"
            );
        }

        let auth = AdminAuth::new(&config.admin)?;
        let media = media::from_config(&config)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                auth,
                media,
            }),
        })
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get the database pool, if one is configured.
    #[must_use]
    pub fn pool(&self) -> Option<&PgPool> {
        self.inner.pool.as_ref()
    }

    /// Get the database pool, or the 503 error admin writes surface
    /// when no database is configured.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotConfigured` when no pool exists.
    pub fn db(&self) -> Result<&PgPool, AppError> {
        self.pool().ok_or(AppError::NotConfigured)
    }

    /// Get a reference to the admin auth service.
    #[must_use]
    pub fn auth(&self) -> &AdminAuth {
        &self.inner.auth
    }

    /// Get a reference to the media storage backend.
    #[must_use]
    pub fn media(&self) -> &Arc<dyn MediaStore> {
        &self.inner.media
    }
}
