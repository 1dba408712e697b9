//! Database operations for `PostgreSQL`.
//!
//! ## Tables
//!
//! - `donors` - Donor wall entries
//! - `gallery_images` - Uploaded gallery images
//! - `members` - Team members
//!
//! All queries use the runtime query API (`sqlx::query_as`), so the
//! crate builds without a live database.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p uplift-cli -- migrate
//! ```
//! They are never run automatically at startup.

pub mod donors;
pub mod gallery;
pub mod members;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use donors::DonorRepository;
pub use gallery::GalleryRepository;
pub use members::MemberRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,
}

/// Create a `PostgreSQL` connection pool.
///
/// The pool connects lazily: construction never performs I/O, and the
/// first query establishes the connection. A server started without a
/// reachable database still boots; queries surface errors instead.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection string cannot be parsed.
pub fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(std::time::Duration::from_secs(10))
        .connect_lazy(database_url.expose_secret())
}
