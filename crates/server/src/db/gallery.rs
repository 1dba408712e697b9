//! Gallery image repository for database operations.

use sqlx::PgPool;

use uplift_core::ImageId;

use super::RepositoryError;
use crate::models::{GalleryImage, NewGalleryImage};

const IMAGE_COLUMNS: &str = "id, title, url, backend_ref, featured, created_at";

/// Repository for gallery image database operations.
pub struct GalleryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> GalleryRepository<'a> {
    /// Create a new gallery repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all images, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<GalleryImage>, RepositoryError> {
        let images = sqlx::query_as::<_, GalleryImage>(&format!(
            "SELECT {IMAGE_COLUMNS} FROM gallery_images ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(images)
    }

    /// List featured images, newest first.
    ///
    /// Returns exactly the subset of [`list`](Self::list) with
    /// `featured = true`, in the same relative order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_featured(&self) -> Result<Vec<GalleryImage>, RepositoryError> {
        let images = sqlx::query_as::<_, GalleryImage>(&format!(
            "SELECT {IMAGE_COLUMNS} FROM gallery_images WHERE featured = TRUE
             ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(images)
    }

    /// Persist a new image record.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, new: &NewGalleryImage) -> Result<GalleryImage, RepositoryError> {
        let image = sqlx::query_as::<_, GalleryImage>(&format!(
            "INSERT INTO gallery_images (title, url, backend_ref)
             VALUES ($1, $2, $3)
             RETURNING {IMAGE_COLUMNS}"
        ))
        .bind(&new.title)
        .bind(&new.url)
        .bind(&new.backend_ref)
        .fetch_one(self.pool)
        .await?;

        Ok(image)
    }

    /// Get an image by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ImageId) -> Result<Option<GalleryImage>, RepositoryError> {
        let image = sqlx::query_as::<_, GalleryImage>(&format!(
            "SELECT {IMAGE_COLUMNS} FROM gallery_images WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(image)
    }

    /// Set the featured flag on an image, returning the updated record.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the image doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn set_featured(
        &self,
        id: ImageId,
        featured: bool,
    ) -> Result<GalleryImage, RepositoryError> {
        let image = sqlx::query_as::<_, GalleryImage>(&format!(
            "UPDATE gallery_images SET featured = $1 WHERE id = $2
             RETURNING {IMAGE_COLUMNS}"
        ))
        .bind(featured)
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        image.ok_or(RepositoryError::NotFound)
    }

    /// Delete an image record by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the image doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: ImageId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM gallery_images WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
