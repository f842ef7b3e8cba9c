//! HTTP middleware stack.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layers (capture errors, trace transactions)
//! 2. `TraceLayer` (request tracing)
//! 3. Session layer (tower-sessions with `PostgreSQL` store)
//!
//! Identity is not a layer: handlers take the [`ResolvedUser`] extractor,
//! which consults the deployment's identity policy per request.

pub mod identity;
pub mod session;

pub use identity::{IdentityRejection, ResolvedUser, clear_current_user, set_current_user};
pub use session::{SESSION_COOKIE_NAME, create_session_layer};
