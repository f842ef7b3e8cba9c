//! Country catalog and visit statistics domain types.

use globetrot_core::{Continent, CountryCode};

/// A catalog entry: one country a traveler can mark as visited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Country {
    /// ISO 3166-1 alpha-2 code, the catalog primary key.
    pub code: CountryCode,
    /// English short name, matched case-insensitively on input.
    pub name: String,
    /// Continent this country is counted under.
    pub continent: Continent,
}

/// Number of visited countries on one continent.
///
/// Breakdowns only contain continents with at least one visit; a zero
/// row is never produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContinentCount {
    /// The continent being counted.
    pub continent: Continent,
    /// Visited countries on that continent, always >= 1.
    pub visits: i64,
}
