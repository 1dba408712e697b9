//! Media storage abstraction.
//!
//! "Persist a binary blob, get a retrievable URL back", regardless of
//! physical backend. Two implementations exist and one is selected once
//! at startup from configuration:
//!
//! - [`LocalMediaStore`] - writes under the uploads directory; URLs are
//!   relative static paths served by the router (`/uploads/...`)
//! - [`CloudMediaStore`] - streams blobs to a remote image host; URLs
//!   are the host's secure URLs and a backend reference (asset id) is
//!   retained for later deletion
//!
//! Deletion is best-effort by policy: callers log and swallow failures
//! so record deletion always completes. Losing a blob is preferable to
//! leaving an undeletable record.

pub mod cloud;
pub mod local;

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

use crate::config::ServerConfig;

pub use cloud::CloudMediaStore;
pub use local::LocalMediaStore;

/// Public URL prefix for locally stored uploads.
pub const UPLOADS_URL_PREFIX: &str = "/uploads";

/// Maximum size for a single gallery image in a batch upload (20 MiB).
pub const MAX_GALLERY_IMAGE_BYTES: usize = 20 * 1024 * 1024;

/// Maximum size for a single logo/photo upload (5 MiB).
pub const MAX_SINGLE_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Errors from media storage backends.
#[derive(Debug, Error)]
pub enum MediaError {
    /// Local filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request to the image host failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Image host returned an error response.
    #[error("image host error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to parse an image host response.
    #[error("parse error: {0}")]
    Parse(String),
}

/// Result of persisting a blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMedia {
    /// Retrievable URL for the blob.
    pub url: String,
    /// Backend asset id, present only for the cloud backend. Required
    /// to delete the blob there later.
    pub backend_ref: Option<String>,
}

/// Storage backend for uploaded media.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Persist a blob and return its URL (plus a backend reference for
    /// backends that need one to delete).
    async fn store(&self, data: Bytes, filename: &str) -> Result<StoredMedia, MediaError>;

    /// Delete a previously stored blob.
    ///
    /// Unknown URLs and missing blobs are not errors; backends only
    /// fail on genuine I/O or API problems.
    async fn delete(&self, url: &str, backend_ref: Option<&str>) -> Result<(), MediaError>;
}

/// Select and construct the media backend from configuration.
///
/// The cloud backend is used whenever image host credentials are
/// configured; otherwise blobs land on the local filesystem.
///
/// # Errors
///
/// Returns `MediaError::Http` if the image host HTTP client fails to
/// build.
pub fn from_config(config: &ServerConfig) -> Result<Arc<dyn MediaStore>, MediaError> {
    match &config.cloud {
        Some(cloud) => Ok(Arc::new(CloudMediaStore::new(cloud)?)),
        None => Ok(Arc::new(LocalMediaStore::new(config.uploads_dir.clone()))),
    }
}

/// Build a collision-resistant stored filename from an uploaded one.
///
/// The result is the current unix-millis timestamp, a dash, and the
/// original file name with path components stripped and whitespace
/// normalized to dashes.
pub(crate) fn generate_filename(original: &str) -> String {
    let base = original.rsplit(['/', '\\']).next().unwrap_or(original);
    let mut sanitized = base.split_whitespace().collect::<Vec<_>>().join("-");
    if sanitized.is_empty() {
        sanitized = "file".to_string();
    }

    format!("{}-{sanitized}", chrono::Utc::now().timestamp_millis())
}
