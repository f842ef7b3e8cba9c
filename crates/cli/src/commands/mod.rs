//! CLI command implementations.

pub mod migrate;
pub mod seed;
pub mod user;

/// Database URL from the environment.
///
/// `GLOBETROT_DATABASE_URL` wins; the generic `DATABASE_URL` (set by
/// Fly.io postgres attach) is the fallback.
pub(crate) fn database_url() -> Option<String> {
    std::env::var("GLOBETROT_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .ok()
}
