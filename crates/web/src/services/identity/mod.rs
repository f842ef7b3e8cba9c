//! Identity resolution.
//!
//! Every request that reads or writes visit data acts for exactly one
//! user. How that user is chosen depends on the deployment's identity
//! mode:
//!
//! - **Ambient**: a process-wide pointer names the acting user. The
//!   dashboard switcher repoints it, and nothing stops one browser from
//!   repointing it under another. This reproduces the original
//!   shared-terminal deployment.
//! - **Session**: identity comes from the cookie session; requests
//!   without one are redirected to the login page.
//!
//! Both modes produce the same explicit [`User`] value, so handlers never
//! consult ambient state themselves.

use std::sync::atomic::{AtomicI32, Ordering};

use thiserror::Error;

use globetrot_core::UserId;

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::models::User;

/// Errors that can occur while resolving the acting user.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// Ambient mode has no users to fall back to.
    ///
    /// Startup refuses to serve in this state; hitting it later means
    /// every user row was deleted while the server ran.
    #[error("no users configured")]
    NoUsersConfigured,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// The process-wide current-user pointer for ambient mode.
///
/// The pointer is advisory: [`point_to`](Self::point_to) does not check
/// that the target exists. A stale pointer heals on the next
/// [`resolve`](Self::resolve), which falls back to the lowest-id user
/// and repoints so the recovery is not repeated per request.
#[derive(Debug)]
pub struct AmbientPointer {
    current: AtomicI32,
}

impl AmbientPointer {
    /// Create a pointer starting at the configured default user id.
    #[must_use]
    pub const fn new(initial: i32) -> Self {
        Self {
            current: AtomicI32::new(initial),
        }
    }

    /// The user id the pointer currently names.
    #[must_use]
    pub fn current(&self) -> UserId {
        // Relaxed is enough: the pointer is a lone advisory cell and
        // orders no other memory.
        UserId::new(self.current.load(Ordering::Relaxed))
    }

    /// Repoint to another user without checking that it exists.
    ///
    /// A dangling target is tolerated; `resolve` recovers lazily.
    pub fn point_to(&self, id: UserId) {
        self.current.store(id.as_i32(), Ordering::Relaxed);
    }

    /// Resolve the pointer to a live user row.
    ///
    /// If the pointed-at user is gone, falls back to the lowest-id user
    /// and repoints. With an empty users table there is nothing to act
    /// for and resolution fails.
    ///
    /// # Errors
    ///
    /// Returns `IdentityError::NoUsersConfigured` if the users table is empty.
    /// Returns `IdentityError::Repository` if a lookup fails.
    pub async fn resolve(&self, users: &UserRepository<'_>) -> Result<User, IdentityError> {
        if let Some(user) = users.get_by_id(self.current()).await? {
            return Ok(user);
        }

        let Some(fallback) = users.first().await? else {
            return Err(IdentityError::NoUsersConfigured);
        };

        tracing::warn!(
            stale_id = %self.current(),
            fallback_id = %fallback.id,
            "ambient pointer named a missing user, repointing to lowest id"
        );
        self.point_to(fallback.id);

        Ok(fallback)
    }
}

/// Identity policy selected by deployment configuration.
///
/// Constructed once at startup from
/// [`IdentityMode`](crate::config::IdentityMode) and stored in app state.
#[derive(Debug)]
pub enum Identity {
    /// Process-wide pointer, switchable from the dashboard.
    Ambient(AmbientPointer),
    /// Per-request identity from the cookie session.
    Session,
}

impl Identity {
    /// The ambient pointer, if this deployment runs in ambient mode.
    #[must_use]
    pub const fn ambient(&self) -> Option<&AmbientPointer> {
        match self {
            Self::Ambient(pointer) => Some(pointer),
            Self::Session => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_starts_at_initial_id() {
        let pointer = AmbientPointer::new(1);
        assert_eq!(pointer.current(), UserId::new(1));
    }

    #[test]
    fn point_to_does_not_validate_the_target() {
        let pointer = AmbientPointer::new(1);
        pointer.point_to(UserId::new(9999));
        assert_eq!(pointer.current(), UserId::new(9999));
    }

    #[test]
    fn ambient_accessor_only_matches_ambient_mode() {
        let ambient = Identity::Ambient(AmbientPointer::new(1));
        assert!(ambient.ambient().is_some());
        assert!(Identity::Session.ambient().is_none());
    }
}
