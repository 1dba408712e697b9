//! Team member repository for database operations.

use futures::future::try_join_all;
use sqlx::PgPool;

use uplift_core::MemberId;

use super::RepositoryError;
use crate::models::{Member, NewMember};

const MEMBER_COLUMNS: &str = "id, name, role, bio, insta_id, email, contact, photo_url, \
                              backend_ref, position, created_at";

/// Repository for team member database operations.
pub struct MemberRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> MemberRepository<'a> {
    /// Create a new member repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all members in display order.
    ///
    /// Ordered by the manual `position` slot ascending; members sharing
    /// a slot fall back to creation order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Member>, RepositoryError> {
        let members = sqlx::query_as::<_, Member>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members ORDER BY position ASC, created_at ASC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(members)
    }

    /// Persist a new member.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, new: &NewMember) -> Result<Member, RepositoryError> {
        let member = sqlx::query_as::<_, Member>(&format!(
            "INSERT INTO members (name, role, bio, insta_id, email, contact, photo_url, backend_ref)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {MEMBER_COLUMNS}"
        ))
        .bind(&new.name)
        .bind(&new.role)
        .bind(&new.bio)
        .bind(&new.insta_id)
        .bind(&new.email)
        .bind(&new.contact)
        .bind(&new.photo_url)
        .bind(&new.backend_ref)
        .fetch_one(self.pool)
        .await?;

        Ok(member)
    }

    /// Get a member by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: MemberId) -> Result<Option<Member>, RepositoryError> {
        let member = sqlx::query_as::<_, Member>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(member)
    }

    /// Delete a member by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the member doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: MemberId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM members WHERE id = $1")
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
    pub async fn reorder(&self, ordered_ids: &[MemberId]) -> Result<(), RepositoryError> {
        let updates = ordered_ids.iter().enumerate().map(|(index, id)| {
            sqlx::query("UPDATE members SET position = $1 WHERE id = $2")
                .bind(i32::try_from(index).unwrap_or(i32::MAX))
                .bind(*id)
                .execute(self.pool)
        });

        try_join_all(updates).await?;
        Ok(())
    }
}
