//! Local filesystem media backend.
//!
//! Blobs are written under the configured uploads directory (created on
//! demand) and served by the router under `/uploads/*`.

use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;

use super::{MediaError, MediaStore, StoredMedia, UPLOADS_URL_PREFIX, generate_filename};

/// Media store backed by a local uploads directory.
pub struct LocalMediaStore {
    uploads_dir: PathBuf,
}

impl LocalMediaStore {
    /// Create a store rooted at the given uploads directory.
    ///
    /// The directory is created lazily on first store.
    #[must_use]
    pub fn new(uploads_dir: impl Into<PathBuf>) -> Self {
        Self {
            uploads_dir: uploads_dir.into(),
        }
    }
}

#[async_trait]
impl MediaStore for LocalMediaStore {
    async fn store(&self, data: Bytes, filename: &str) -> Result<StoredMedia, MediaError> {
        tokio::fs::create_dir_all(&self.uploads_dir).await?;

        let stored_name = generate_filename(filename);
        let path = self.uploads_dir.join(&stored_name);
        tokio::fs::write(&path, &data).await?;

        tracing::debug!(path = %path.display(), bytes = data.len(), "stored local upload");

        Ok(StoredMedia {
            url: format!("{UPLOADS_URL_PREFIX}/{stored_name}"),
            backend_ref: None,
        })
    }

    async fn delete(&self, url: &str, _backend_ref: Option<&str>) -> Result<(), MediaError> {
        // Only URLs this backend produced are deletable here.
        let Some(name) = url.strip_prefix(UPLOADS_URL_PREFIX).and_then(|rest| rest.strip_prefix('/'))
        else {
            return Ok(());
        };

        // Stored names never contain separators; refuse anything that
        // would escape the uploads directory.
        if name.is_empty() || name.contains('/') || name.contains('\\') || name.contains("..") {
            return Ok(());
        }

        match tokio::fs::remove_file(self.uploads_dir.join(name)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_writes_file_and_returns_uploads_url() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalMediaStore::new(dir.path());

        let stored = store
            .store(Bytes::from_static(b"jpeg bytes"), "drive.jpg")
            .await
            .unwrap();

        assert!(stored.url.starts_with("/uploads/"));
        assert!(stored.url.ends_with("-drive.jpg"));
        assert!(stored.backend_ref.is_none());

        let name = stored.url.strip_prefix("/uploads/").unwrap();
        let on_disk = std::fs::read(dir.path().join(name)).unwrap();
        assert_eq!(on_disk, b"jpeg bytes");
    }

    #[tokio::test]
    async fn test_store_creates_uploads_dir_on_demand() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("public").join("uploads");
        let store = LocalMediaStore::new(&nested);

        store
            .store(Bytes::from_static(b"x"), "a.png")
            .await
            .unwrap();

        assert!(nested.is_dir());
    }

    #[tokio::test]
    async fn test_delete_removes_stored_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalMediaStore::new(dir.path());

        let stored = store
            .store(Bytes::from_static(b"x"), "gone.png")
            .await
            .unwrap();
        let name = stored.url.strip_prefix("/uploads/").unwrap().to_owned();
        assert!(dir.path().join(&name).exists());

        store.delete(&stored.url, None).await.unwrap();
        assert!(!dir.path().join(&name).exists());
    }

    #[tokio::test]
    async fn test_delete_missing_file_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalMediaStore::new(dir.path());

        store.delete("/uploads/never-existed.png", None).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_ignores_foreign_urls() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalMediaStore::new(dir.path());

        store
            .delete("https://images.example.com/asset.png", None)
            .await
            .unwrap();
        store.delete("/elsewhere/file.png", None).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_refuses_path_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let outside = dir.path().join("secret.txt");
        std::fs::write(&outside, b"keep me").unwrap();

        let uploads = dir.path().join("uploads");
        let store = LocalMediaStore::new(&uploads);

        store.delete("/uploads/../secret.txt", None).await.unwrap();
        assert!(outside.exists());
    }
}
