//! Database operations for the globetrot `PostgreSQL` database.
//!
//! # Tables
//!
//! - `users` - Travelers (with optional email + password for session mode)
//! - `user_passwords` - Argon2 password hashes, one row per credentialed user
//! - `countries` - The country catalog seeded from the bundled CSV
//! - `visited_countries` - The visit ledger, one row per (user, country)
//! - `tower_sessions.session` - Tower-sessions storage
//!
//! # Migrations
//!
//! Migrations are stored in `crates/web/migrations/` and run via:
//! ```bash
//! cargo run -p globetrot-cli -- migrate
//! ```

pub mod catalog;
pub mod users;
pub mod visits;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use catalog::CatalogRepository;
pub use users::UserRepository;
pub use visits::VisitRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Unique constraint violation (e.g., duplicate visit or email).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// Foreign key violation (row references a user or country that is gone).
    #[error("foreign key violation: {0}")]
    ForeignKey(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
