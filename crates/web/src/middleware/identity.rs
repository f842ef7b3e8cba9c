//! Identity extractor.
//!
//! [`ResolvedUser`] is how handlers learn which user a request acts for.
//! It runs the deployment's identity policy (ambient pointer or cookie
//! session) and always hands the handler an explicit, live [`User`] row;
//! handlers never read ambient state themselves.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use globetrot_core::Email;

use crate::db::users::UserRepository;
use crate::error::AppError;
use crate::models::{CurrentUser, User, session::keys};
use crate::services::identity::Identity;
use crate::state::AppState;

/// Extractor resolving the acting user for this request.
///
/// In ambient mode this follows the process-wide pointer (healing it if
/// stale). In session mode it requires a logged-in session and redirects
/// to the login page otherwise.
///
/// # Example
///
/// ```rust,ignore
/// async fn dashboard(
///     ResolvedUser(user): ResolvedUser,
/// ) -> impl IntoResponse {
///     format!("Tracking visits for {}", user.name)
/// }
/// ```
pub struct ResolvedUser(pub User);

/// Error returned when the acting user cannot be resolved.
pub enum IdentityRejection {
    /// Session mode without a logged-in session.
    RedirectToLogin,
    /// Resolution itself failed (storage error, empty users table).
    Failed(AppError),
}

impl IntoResponse for IdentityRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/auth/login").into_response(),
            Self::Failed(err) => err.into_response(),
        }
    }
}

impl FromRequestParts<AppState> for ResolvedUser {
    type Rejection = IdentityRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let users = UserRepository::new(state.pool());

        let user = match state.identity() {
            Identity::Ambient(pointer) => pointer
                .resolve(&users)
                .await
                .map_err(|e| IdentityRejection::Failed(AppError::Identity(e)))?,

            Identity::Session => {
                // Get the session from extensions (set by SessionManagerLayer)
                let session = parts.extensions.get::<Session>().ok_or_else(|| {
                    IdentityRejection::Failed(AppError::Internal(
                        "session layer not installed".to_string(),
                    ))
                })?;

                let current: CurrentUser = session
                    .get(keys::CURRENT_USER)
                    .await
                    .ok()
                    .flatten()
                    .ok_or(IdentityRejection::RedirectToLogin)?;

                // Re-read the row so a deleted account ends the session
                // instead of acting on stale data
                users
                    .get_by_id(current.id)
                    .await
                    .map_err(|e| IdentityRejection::Failed(AppError::Database(e)))?
                    .ok_or(IdentityRejection::RedirectToLogin)?
            }
        };

        crate::error::set_sentry_user(&user.id, user.email.as_ref().map(Email::as_str));

        Ok(Self(user))
    }
}

/// Helper to set the current user in the session after login.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &CurrentUser,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::CURRENT_USER, user).await
}

/// Helper to clear the current user from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.remove::<CurrentUser>(keys::CURRENT_USER).await?;
    Ok(())
}
