//! Business logic services.
//!
//! # Services
//!
//! - [`identity`] - Resolves which user a request acts for (ambient or session)
//! - [`auth`] - Registration and login for session mode
//! - [`visits`] - The add-visit workflow and dashboard queries

pub mod auth;
pub mod identity;
pub mod visits;

pub use auth::{AuthError, AuthService};
pub use identity::{AmbientPointer, Identity, IdentityError};
pub use visits::{AddVisitOutcome, DashboardData, VisitRejection, VisitService};
