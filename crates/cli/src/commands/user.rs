//! Member management commands.
//!
//! # Usage
//!
//! ```bash
//! # Create a member (ambient deployments refuse to start with none)
//! globetrot user add -n "Angela" -c teal
//!
//! # List members
//! globetrot user list
//! ```
//!
//! # Environment Variables
//!
//! - `GLOBETROT_DATABASE_URL` - `PostgreSQL` connection string
//!   (falls back to the generic `DATABASE_URL`)

use sqlx::PgPool;
use thiserror::Error;

use globetrot_core::Email;
use globetrot_web::db::RepositoryError;
use globetrot_web::db::users::UserRepository;
use globetrot_web::models::{DEFAULT_USER_COLOR, MAX_NAME_LENGTH, USER_COLORS};

/// Errors that can occur during member operations.
#[derive(Debug, Error)]
pub enum UserCommandError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Repository operation failed.
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Invalid display name.
    #[error("Invalid name: {0}")]
    InvalidName(String),

    /// Color is not in the dashboard palette.
    #[error("Invalid color: {0}")]
    InvalidColor(String),
}

/// Create a new member.
///
/// # Errors
///
/// Returns an error if the name or color is invalid, the database URL
/// is missing, or the insert fails.
pub async fn add(name: &str, color: Option<&str>) -> Result<(), UserCommandError> {
    dotenvy::dotenv().ok();

    let name = name.trim();
    if name.is_empty() || name.len() > MAX_NAME_LENGTH {
        return Err(UserCommandError::InvalidName(format!(
            "name must be 1-{MAX_NAME_LENGTH} characters"
        )));
    }

    let color = match color {
        Some(c) if USER_COLORS.contains(&c) => c,
        Some(c) => {
            return Err(UserCommandError::InvalidColor(format!(
                "{c}. Valid colors: {}",
                USER_COLORS.join(", ")
            )));
        }
        None => DEFAULT_USER_COLOR,
    };

    let database_url =
        super::database_url().ok_or(UserCommandError::MissingEnvVar("GLOBETROT_DATABASE_URL"))?;

    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(&database_url).await?;

    let user = UserRepository::new(&pool).create(name, color).await?;

    tracing::info!(
        "Member created! ID: {}, Name: {}, Color: {}",
        user.id,
        user.name,
        user.color
    );
    Ok(())
}

/// List all members.
///
/// # Errors
///
/// Returns an error if the database URL is missing or the query fails.
pub async fn list() -> Result<(), UserCommandError> {
    dotenvy::dotenv().ok();

    let database_url =
        super::database_url().ok_or(UserCommandError::MissingEnvVar("GLOBETROT_DATABASE_URL"))?;

    let pool = PgPool::connect(&database_url).await?;
    let users = UserRepository::new(&pool).list_all().await?;

    if users.is_empty() {
        tracing::info!("No members yet. Create one with: globetrot user add -n <name>");
        return Ok(());
    }

    tracing::info!("Members ({}):", users.len());
    for user in users {
        let email = user.email.as_ref().map_or("-", Email::as_str);
        tracing::info!("  {} {} ({}) {}", user.id, user.name, user.color, email);
    }

    Ok(())
}
