//! Donor repository for database operations.

use futures::future::try_join_all;
use sqlx::PgPool;

use uplift_core::DonorId;

use super::RepositoryError;
use crate::models::{Donor, NewDonor};

const DONOR_COLUMNS: &str =
    "id, name, tier, logo_url, website, donated_amount, donated_commodity, position, created_at";

/// Repository for donor database operations.
pub struct DonorRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> DonorRepository<'a> {
    /// Create a new donor repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all donors, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Donor>, RepositoryError> {
        let donors = sqlx::query_as::<_, Donor>(&format!(
            "SELECT {DONOR_COLUMNS} FROM donors ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(donors)
    }

    /// Persist a new donor.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, new: &NewDonor) -> Result<Donor, RepositoryError> {
        let donor = sqlx::query_as::<_, Donor>(&format!(
            "INSERT INTO donors (name, tier, logo_url, website, donated_amount, donated_commodity)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {DONOR_COLUMNS}"
        ))
        .bind(&new.name)
        .bind(new.tier)
        .bind(&new.logo_url)
        .bind(&new.website)
        .bind(new.donated_amount)
        .bind(&new.donated_commodity)
        .fetch_one(self.pool)
        .await?;

        Ok(donor)
    }

    /// Get a donor by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: DonorId) -> Result<Option<Donor>, RepositoryError> {
        let donor = sqlx::query_as::<_, Donor>(&format!(
            "SELECT {DONOR_COLUMNS} FROM donors WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(donor)
    }

    /// Delete a donor by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the donor doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: DonorId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM donors WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Assign `position = index` for every id in the given ordering.
    ///
    /// One UPDATE is issued per id, concurrently and without a
    /// transaction: a partial failure can leave a mixed ordering. Ids
    /// not present in the list keep their previous position.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any update fails.
    pub async fn reorder(&self, ordered_ids: &[DonorId]) -> Result<(), RepositoryError> {
        let updates = ordered_ids.iter().enumerate().map(|(index, id)| {
            sqlx::query("UPDATE donors SET position = $1 WHERE id = $2")
                .bind(i32::try_from(index).unwrap_or(i32::MAX))
                .bind(*id)
                .execute(self.pool)
        });

        try_join_all(updates).await?;
        Ok(())
    }
}
