//! Visit ledger repository.
//!
//! One row per (user, country) pair. The UNIQUE constraint and the two
//! foreign keys on this table are the canonical guards; application-level
//! checks are fast paths that this layer's error mapping backs up.

use sqlx::PgPool;

use globetrot_core::{Continent, CountryCode, UserId, VisitId};

use super::RepositoryError;
use crate::models::ContinentCount;

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for the continent breakdown query.
#[derive(Debug, sqlx::FromRow)]
struct ContinentCountRow {
    continent: String,
    visits: i64,
}

impl TryFrom<ContinentCountRow> for ContinentCount {
    type Error = RepositoryError;

    fn try_from(row: ContinentCountRow) -> Result<Self, Self::Error> {
        let continent = row.continent.parse::<Continent>().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid continent in database: {e}"))
        })?;

        Ok(Self {
            continent,
            visits: row.visits,
        })
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for visit ledger operations.
pub struct VisitRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> VisitRepository<'a> {
    /// Create a new visit repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List the country codes a user has visited, ordered by code.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_codes(&self, user_id: UserId) -> Result<Vec<CountryCode>, RepositoryError> {
        let codes = sqlx::query_scalar::<_, CountryCode>(
            r"
            SELECT country_code
            FROM visited_countries
            WHERE user_id = $1
            ORDER BY country_code
            ",
        )
        .bind(user_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        Ok(codes)
    }

    /// Count a user's visits per continent.
    ///
    /// Only continents with at least one visit appear; zero rows are
    /// never produced by the GROUP BY.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored continent is invalid.
    pub async fn continent_counts(
        &self,
        user_id: UserId,
    ) -> Result<Vec<ContinentCount>, RepositoryError> {
        let rows = sqlx::query_as::<_, ContinentCountRow>(
            r"
            SELECT c.continent, COUNT(*) AS visits
            FROM visited_countries v
            JOIN countries c ON c.country_code = v.country_code
            WHERE v.user_id = $1
            GROUP BY c.continent
            ORDER BY c.continent
            ",
        )
        .bind(user_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Check whether a user has already visited a country.
    ///
    /// This is the workflow's fast-path duplicate check; the UNIQUE
    /// constraint still catches races that slip past it.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn exists(
        &self,
        user_id: UserId,
        code: &CountryCode,
    ) -> Result<bool, RepositoryError> {
        let exists = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(
                SELECT 1 FROM visited_countries
                WHERE user_id = $1 AND country_code = $2
            )
            ",
        )
        .bind(user_id.as_i32())
        .bind(code.as_str())
        .fetch_one(self.pool)
        .await?;

        Ok(exists)
    }

    /// Record a visit for a user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the visit already exists.
    /// Returns `RepositoryError::ForeignKey` if the user or country row is gone.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn insert(
        &self,
        user_id: UserId,
        code: &CountryCode,
    ) -> Result<VisitId, RepositoryError> {
        let id = sqlx::query_scalar::<_, i32>(
            r"
            INSERT INTO visited_countries (user_id, country_code)
            VALUES ($1, $2)
            RETURNING id
            ",
        )
        .bind(user_id.as_i32())
        .bind(code.as_str())
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e {
                if db_err.is_unique_violation() {
                    return RepositoryError::Conflict("visit already recorded".to_owned());
                }
                if db_err.is_foreign_key_violation() {
                    let constraint = db_err.constraint().unwrap_or("unknown").to_owned();
                    return RepositoryError::ForeignKey(constraint);
                }
            }
            RepositoryError::Database(e)
        })?;

        Ok(VisitId::new(id))
    }
}
