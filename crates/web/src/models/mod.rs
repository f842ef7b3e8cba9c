//! Domain models for the visited-countries tracker.
//!
//! These types represent validated domain objects separate from database
//! row types. Row-to-domain conversion lives next to the queries in [`crate::db`].

pub mod country;
pub mod session;
pub mod user;

pub use country::{ContinentCount, Country};
pub use session::CurrentUser;
pub use user::{DEFAULT_USER_COLOR, MAX_NAME_LENGTH, USER_COLORS, User};
