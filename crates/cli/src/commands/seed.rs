//! Seed the country catalog from the embedded dataset.
//!
//! The catalog CSV is compiled into the web crate; this command just
//! validates it and inserts whatever is missing. Existing rows are
//! never overwritten, so re-running after an upgrade is safe.

use sqlx::PgPool;
use thiserror::Error;
use tracing::{error, info};

use globetrot_web::seed;

/// Errors that can occur while seeding the catalog.
#[derive(Debug, Error)]
pub enum SeedCommandError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Embedded catalog data is invalid or failed to insert.
    #[error(transparent)]
    Seed(#[from] seed::SeedError),

    /// Validation found problems in the embedded data.
    #[error("{0} validation errors found")]
    Validation(usize),
}

/// Seed the `countries` table.
///
/// # Errors
///
/// Returns an error if the database URL is missing, the embedded data
/// is invalid, or database operations fail.
pub async fn run() -> Result<(), SeedCommandError> {
    dotenvy::dotenv().ok();

    // Validate the embedded data before connecting to the database
    let records = seed::embedded_records()?;
    let errors = seed::validate_records(&records);
    if !errors.is_empty() {
        error!("Catalog validation failed:");
        for err in &errors {
            error!("  - {err}");
        }
        return Err(SeedCommandError::Validation(errors.len()));
    }

    info!(countries = records.len(), "Catalog validated");

    let database_url =
        super::database_url().ok_or(SeedCommandError::MissingEnvVar("GLOBETROT_DATABASE_URL"))?;

    info!("Connecting to database...");
    let pool = PgPool::connect(&database_url).await?;

    let report = seed::seed_countries(&pool).await?;

    info!("Seeding complete!");
    info!("  Countries inserted: {}", report.inserted);
    info!("  Countries skipped (already exist): {}", report.skipped);

    Ok(())
}
