//! Gallery image records.

use chrono::{DateTime, Utc};
use serde::Serialize;

use uplift_core::ImageId;

/// An uploaded gallery image.
///
/// `backend_ref` is the remote image host's asset id; it is only set
/// when the cloud media backend stored the blob, and is required to
/// delete the blob there later.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct GalleryImage {
    pub id: ImageId,
    pub title: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend_ref: Option<String>,
    /// Featured images appear in the public homepage slideshow.
    pub featured: bool,
    pub created_at: DateTime<Utc>,
}

/// Fields for creating a gallery image record.
#[derive(Debug, Clone)]
pub struct NewGalleryImage {
    pub title: String,
    pub url: String,
    pub backend_ref: Option<String>,
}
