//! Core types for Globetrot.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod country;
pub mod email;
pub mod id;

pub use country::{Continent, ContinentError, CountryCode, CountryCodeError};
pub use email::{Email, EmailError};
pub use id::*;
