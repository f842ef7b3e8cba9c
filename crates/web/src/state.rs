//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::{AppConfig, IdentityMode};
use crate::services::identity::{AmbientPointer, Identity};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AppConfig,
    pool: PgPool,
    identity: Identity,
}

impl AppState {
    /// Create a new application state.
    ///
    /// The identity policy is fixed here from the configured mode; in
    /// ambient mode the process-wide pointer starts at the configured
    /// default user id.
    #[must_use]
    pub fn new(config: AppConfig, pool: PgPool) -> Self {
        let identity = match config.identity_mode {
            IdentityMode::Ambient => Identity::Ambient(AmbientPointer::new(config.default_user_id)),
            IdentityMode::Session => Identity::Session,
        };

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                identity,
            }),
        }
    }

    /// Get a reference to the application configuration.
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the identity policy.
    #[must_use]
    pub fn identity(&self) -> &Identity {
        &self.inner.identity
    }
}
