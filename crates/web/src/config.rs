//! Application configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `GLOBETROT_DATABASE_URL` - `PostgreSQL` connection string
//! - `GLOBETROT_BASE_URL` - Public URL for the application
//!
//! ## Optional
//! - `GLOBETROT_HOST` - Bind address (default: 127.0.0.1)
//! - `GLOBETROT_PORT` - Listen port (default: 3000)
//! - `GLOBETROT_IDENTITY_MODE` - `ambient` or `session` (default: session)
//! - `GLOBETROT_DEFAULT_USER_ID` - Initial ambient user id (default: 1)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name (e.g., production)
//! - `SENTRY_SAMPLE_RATE` - Error sample rate 0.0-1.0 (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Tracing sample rate 0.0-1.0 (default: 0.1)

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// How the application decides which user a request acts for.
///
/// `Ambient` reproduces the shared-terminal deployment: a process-wide
/// pointer names the acting user and anyone can repoint it. `Session`
/// binds identity to an authenticated cookie session instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdentityMode {
    /// Process-wide current-user pointer, switchable from the dashboard.
    Ambient,
    /// Per-request identity from the cookie session; unauthenticated
    /// requests are redirected to the login page.
    #[default]
    Session,
}

impl std::fmt::Display for IdentityMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ambient => write!(f, "ambient"),
            Self::Session => write!(f, "session"),
        }
    }
}

impl std::str::FromStr for IdentityMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ambient" => Ok(Self::Ambient),
            "session" => Ok(Self::Session),
            _ => Err(format!("invalid identity mode: {s} (expected 'ambient' or 'session')")),
        }
    }
}

/// Globetrot application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the application
    pub base_url: String,
    /// How request identity is resolved
    pub identity_mode: IdentityMode,
    /// User id the ambient pointer starts at
    pub default_user_id: i32,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate
    pub sentry_sample_rate: f32,
    /// Sentry performance tracing sample rate
    pub sentry_traces_sample_rate: f32,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("GLOBETROT_DATABASE_URL")?;
        let host = get_env_or_default("GLOBETROT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("GLOBETROT_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("GLOBETROT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("GLOBETROT_PORT".to_string(), e.to_string()))?;
        let base_url = get_required_env("GLOBETROT_BASE_URL")?;
        let identity_mode = get_env_or_default("GLOBETROT_IDENTITY_MODE", "session")
            .parse::<IdentityMode>()
            .map_err(|e| ConfigError::InvalidEnvVar("GLOBETROT_IDENTITY_MODE".to_string(), e))?;
        let default_user_id = get_env_or_default("GLOBETROT_DEFAULT_USER_ID", "1")
            .parse::<i32>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("GLOBETROT_DEFAULT_USER_ID".to_string(), e.to_string())
            })?;

        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_env_or_default("SENTRY_SAMPLE_RATE", "1.0")
            .parse::<f32>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("SENTRY_SAMPLE_RATE".to_string(), e.to_string())
            })?;
        let sentry_traces_sample_rate = get_env_or_default("SENTRY_TRACES_SAMPLE_RATE", "0.1")
            .parse::<f32>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("SENTRY_TRACES_SAMPLE_RATE".to_string(), e.to_string())
            })?;

        Ok(Self {
            database_url,
            host,
            port,
            base_url,
            identity_mode,
            default_user_id,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get database URL with fallback to generic `DATABASE_URL` (used by Fly.io postgres attach).
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    // Try primary key first (e.g., GLOBETROT_DATABASE_URL)
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    // Fallback to generic DATABASE_URL (set by Fly.io postgres attach)
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn identity_mode_parses_both_values() {
        assert_eq!("ambient".parse::<IdentityMode>().unwrap(), IdentityMode::Ambient);
        assert_eq!("session".parse::<IdentityMode>().unwrap(), IdentityMode::Session);
    }

    #[test]
    fn identity_mode_rejects_unknown_values() {
        let err = "kiosk".parse::<IdentityMode>().unwrap_err();
        assert!(err.contains("kiosk"));
    }

    #[test]
    fn identity_mode_defaults_to_session() {
        assert_eq!(IdentityMode::default(), IdentityMode::Session);
    }

    #[test]
    fn identity_mode_display_round_trips() {
        for mode in [IdentityMode::Ambient, IdentityMode::Session] {
            let parsed: IdentityMode = mode.to_string().parse().unwrap();
            assert_eq!(parsed, mode);
        }
    }

    #[test]
    fn socket_addr_combines_host_and_port() {
        let config = AppConfig {
            database_url: SecretString::from("postgres://localhost/test"),
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            identity_mode: IdentityMode::Session,
            default_user_id: 1,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.1,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }
}
