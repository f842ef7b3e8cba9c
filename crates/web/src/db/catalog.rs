//! Country catalog repository.
//!
//! The catalog is read-mostly reference data: it is populated by the
//! seeder and only queried afterwards. Name matching is exact but
//! case-insensitive, so "france" finds France and "Franc" finds nothing.

use sqlx::PgPool;

use globetrot_core::{Continent, CountryCode};

use super::RepositoryError;
use crate::models::Country;

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for `PostgreSQL` catalog queries.
#[derive(Debug, sqlx::FromRow)]
struct CountryRow {
    country_code: String,
    country_name: String,
    continent: String,
}

impl TryFrom<CountryRow> for Country {
    type Error = RepositoryError;

    fn try_from(row: CountryRow) -> Result<Self, Self::Error> {
        let code = CountryCode::parse(&row.country_code).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid country code in database: {e}"))
        })?;

        let continent = row.continent.parse::<Continent>().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid continent in database: {e}"))
        })?;

        Ok(Self {
            code,
            name: row.country_name,
            continent,
        })
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for country catalog operations.
pub struct CatalogRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CatalogRepository<'a> {
    /// Create a new catalog repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Find a country by its exact name, ignoring case.
    ///
    /// Substring or fuzzy matches are deliberately not attempted; an
    /// input that is not a complete catalog name finds nothing.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored row is invalid.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Country>, RepositoryError> {
        let row = sqlx::query_as::<_, CountryRow>(
            r"
            SELECT country_code, country_name, continent
            FROM countries
            WHERE LOWER(country_name) = LOWER($1)
            ",
        )
        .bind(name)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Count all catalog entries.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM countries")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }

    /// Insert a catalog entry unless its code is already present.
    ///
    /// Returns `true` if the row was inserted, `false` if the code
    /// already existed. Existing rows are left untouched so re-seeding
    /// never overwrites manual fixes.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn insert_if_absent(&self, country: &Country) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            INSERT INTO countries (country_code, country_name, continent)
            VALUES ($1, $2, $3)
            ON CONFLICT (country_code) DO NOTHING
            ",
        )
        .bind(country.code.as_str())
        .bind(&country.name)
        .bind(country.continent.as_str())
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}
