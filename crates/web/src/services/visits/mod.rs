//! The add-visit workflow and dashboard queries.
//!
//! Adding a visit is a funnel: trim the input, match it against the
//! catalog, pre-check the ledger, then insert. Every way out other than
//! a recorded visit ends in a [`VisitRejection`] carrying fresh dashboard
//! data, so the caller can re-render the page with a message and never
//! needs a second round trip.

use tracing::instrument;

use sqlx::PgPool;

use globetrot_core::{CountryCode, UserId};

use crate::db::RepositoryError;
use crate::db::{CatalogRepository, VisitRepository};
use crate::models::{ContinentCount, User};

/// Why an add-visit attempt did not record a visit.
///
/// All variants are recovered locally and rendered as a message on an
/// otherwise-normal dashboard; none of them abort the response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisitRejection {
    /// The input was empty after trimming.
    EmptyInput,
    /// The input matched no catalog name.
    CountryNotFound {
        /// The trimmed input that matched nothing.
        input: String,
    },
    /// The country is already on this user's ledger.
    AlreadyVisited {
        /// Display name of the country the input matched.
        name: String,
    },
    /// A storage error interrupted the attempt.
    TransientFailure,
}

impl VisitRejection {
    /// The user-facing message for this rejection.
    ///
    /// An empty input reads the same as an unknown country: both mean
    /// "nothing in the catalog matched what you typed".
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::EmptyInput | Self::CountryNotFound { .. } => "Country does not exist!",
            Self::AlreadyVisited { .. } => "You have already visited this country!",
            Self::TransientFailure => "Something went wrong. Try again.",
        }
    }
}

/// Everything the dashboard needs for one user.
#[derive(Debug, Clone)]
pub struct DashboardData {
    /// Visited country codes, ordered by code.
    pub visited: Vec<CountryCode>,
    /// Visits per continent, only continents with at least one visit.
    pub continent_counts: Vec<ContinentCount>,
    /// Total number of visited countries.
    pub total: usize,
}

/// Result of an add-visit attempt.
#[derive(Debug)]
pub enum AddVisitOutcome {
    /// The visit was recorded; the caller should redirect to the dashboard.
    Added,
    /// The attempt was rejected; render the dashboard with the message.
    Rejected {
        /// Why the visit was not recorded.
        rejection: VisitRejection,
        /// Fresh dashboard data for the re-render.
        data: DashboardData,
    },
}

/// Service for the visit ledger: dashboard reads and the add workflow.
pub struct VisitService<'a> {
    catalog: CatalogRepository<'a>,
    visits: VisitRepository<'a>,
}

impl<'a> VisitService<'a> {
    /// Create a new visit service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            catalog: CatalogRepository::new(pool),
            visits: VisitRepository::new(pool),
        }
    }

    /// Load the dashboard data for a user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if either ledger query fails.
    pub async fn dashboard(&self, user_id: UserId) -> Result<DashboardData, RepositoryError> {
        let visited = self.visits.list_codes(user_id).await?;
        let continent_counts = self.visits.continent_counts(user_id).await?;
        let total = visited.len();

        Ok(DashboardData {
            visited,
            continent_counts,
            total,
        })
    }

    /// Attempt to record a visit from raw form input.
    ///
    /// Storage errors inside the attempt are classified into a
    /// [`VisitRejection`] rather than propagated, so a flaky insert
    /// degrades to a "try again" message instead of a failed response.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` only if the post-rejection dashboard
    /// recompute fails; that is the one path left for the error page.
    #[instrument(skip_all, fields(user_id = %user.id))]
    pub async fn add_visit(
        &self,
        user: &User,
        raw_input: &str,
    ) -> Result<AddVisitOutcome, RepositoryError> {
        let rejection = match self.try_add(user.id, raw_input).await {
            Ok(None) => return Ok(AddVisitOutcome::Added),
            Ok(Some(rejection)) => rejection,
            Err(e) => storage_rejection(&e),
        };

        let data = self.dashboard(user.id).await?;
        Ok(AddVisitOutcome::Rejected { rejection, data })
    }

    /// Run the add funnel. `Ok(None)` means the visit was recorded.
    async fn try_add(
        &self,
        user_id: UserId,
        raw_input: &str,
    ) -> Result<Option<VisitRejection>, RepositoryError> {
        let input = raw_input.trim();
        if input.is_empty() {
            return Ok(Some(VisitRejection::EmptyInput));
        }

        let Some(country) = self.catalog.find_by_name(input).await? else {
            tracing::debug!(input, "no catalog entry matched");
            return Ok(Some(VisitRejection::CountryNotFound {
                input: input.to_owned(),
            }));
        };

        if self.visits.exists(user_id, &country.code).await? {
            tracing::debug!(code = %country.code, "country already on the ledger");
            return Ok(Some(VisitRejection::AlreadyVisited { name: country.name }));
        }

        match self.visits.insert(user_id, &country.code).await {
            Ok(_) => {
                tracing::info!(code = %country.code, "visit recorded");
                Ok(None)
            }
            // The pre-check raced a concurrent insert for the same pair.
            // The pair is recorded either way, so absorb the violation.
            Err(RepositoryError::Conflict(_)) => {
                tracing::debug!(code = %country.code, "insert lost the duplicate race");
                Ok(Some(VisitRejection::AlreadyVisited { name: country.name }))
            }
            Err(other) => Err(other),
        }
    }
}

/// Log a storage failure from the add funnel and degrade it to the retry
/// rejection.
///
/// A foreign key violation means the user or country row vanished
/// mid-flight; that is an invariant breach worth an error log, but the
/// user still just sees the retry message.
#[must_use]
pub fn storage_rejection(error: &RepositoryError) -> VisitRejection {
    match error {
        RepositoryError::ForeignKey(constraint) => {
            tracing::error!(constraint, "visit references a missing user or country");
        }
        other => {
            tracing::error!(error = %other, "add-visit storage failure");
        }
    }
    VisitRejection::TransientFailure
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_messages_match_the_rendered_strings() {
        let not_found = VisitRejection::CountryNotFound {
            input: "Atlantis".to_owned(),
        };
        assert_eq!(not_found.message(), "Country does not exist!");
        assert_eq!(
            VisitRejection::EmptyInput.message(),
            "Country does not exist!"
        );

        let duplicate = VisitRejection::AlreadyVisited {
            name: "France".to_owned(),
        };
        assert_eq!(duplicate.message(), "You have already visited this country!");
        assert_eq!(
            VisitRejection::TransientFailure.message(),
            "Something went wrong. Try again."
        );
    }

    #[test]
    fn dangling_reference_degrades_to_retry_message() {
        let error = RepositoryError::ForeignKey("visited_countries_user_id_fkey".to_owned());
        assert_eq!(storage_rejection(&error), VisitRejection::TransientFailure);
    }

    #[test]
    fn unclassified_storage_errors_degrade_to_retry_message() {
        let database = RepositoryError::Database(sqlx::Error::RowNotFound);
        assert_eq!(storage_rejection(&database), VisitRejection::TransientFailure);

        let corruption = RepositoryError::DataCorruption("bad continent".to_owned());
        assert_eq!(
            storage_rejection(&corruption),
            VisitRejection::TransientFailure
        );
    }
}
