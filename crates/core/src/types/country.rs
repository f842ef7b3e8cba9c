//! Country code and continent types.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`CountryCode`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum CountryCodeError {
    /// The input is not exactly two characters long.
    #[error("country code must be exactly 2 letters, got {len}")]
    WrongLength {
        /// Length of the rejected input, in bytes.
        len: usize,
    },
    /// The input contains characters outside A-Z / a-z.
    #[error("country code must contain only ASCII letters")]
    NotAlphabetic,
}

/// An ISO 3166-1 alpha-2 country code.
///
/// Codes are normalized to uppercase on parse, so `"fr"` and `"FR"`
/// produce the same value. The code is the primary key of the country
/// catalog and the value stored in the visit ledger.
///
/// ## Examples
///
/// ```
/// use globetrot_core::CountryCode;
///
/// let code = CountryCode::parse("fr").unwrap();
/// assert_eq!(code.as_str(), "FR");
///
/// assert!(CountryCode::parse("FRA").is_err());
/// assert!(CountryCode::parse("F1").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct CountryCode(String);

impl CountryCode {
    /// Parse a `CountryCode` from a string, normalizing to uppercase.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not exactly two ASCII letters.
    pub fn parse(s: &str) -> Result<Self, CountryCodeError> {
        if s.len() != 2 {
            return Err(CountryCodeError::WrongLength { len: s.len() });
        }

        if !s.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Err(CountryCodeError::NotAlphabetic);
        }

        Ok(Self(s.to_ascii_uppercase()))
    }

    /// Returns the code as an uppercase string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for CountryCode {
    type Err = CountryCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for CountryCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for CountryCode {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for CountryCode {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        // Database values are assumed valid
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for CountryCode {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

/// Error returned when a string is not a recognized continent name.
#[derive(thiserror::Error, Debug, Clone)]
#[error("unknown continent: {0}")]
pub struct ContinentError(pub String);

/// One of the seven continents used by the country catalog.
///
/// The display form ("North America", not "north_america") is what the
/// catalog stores and what continent breakdowns render, so `Display` and
/// `FromStr` round-trip through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Continent {
    Africa,
    Antarctica,
    Asia,
    Europe,
    #[serde(rename = "North America")]
    NorthAmerica,
    Oceania,
    #[serde(rename = "South America")]
    SouthAmerica,
}

impl Continent {
    /// All continents, in display order.
    pub const ALL: [Self; 7] = [
        Self::Africa,
        Self::Antarctica,
        Self::Asia,
        Self::Europe,
        Self::NorthAmerica,
        Self::Oceania,
        Self::SouthAmerica,
    ];

    /// Returns the display name as a static string slice.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Africa => "Africa",
            Self::Antarctica => "Antarctica",
            Self::Asia => "Asia",
            Self::Europe => "Europe",
            Self::NorthAmerica => "North America",
            Self::Oceania => "Oceania",
            Self::SouthAmerica => "South America",
        }
    }
}

impl fmt::Display for Continent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Continent {
    type Err = ContinentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Africa" => Ok(Self::Africa),
            "Antarctica" => Ok(Self::Antarctica),
            "Asia" => Ok(Self::Asia),
            "Europe" => Ok(Self::Europe),
            "North America" => Ok(Self::NorthAmerica),
            "Oceania" => Ok(Self::Oceania),
            "South America" => Ok(Self::SouthAmerica),
            _ => Err(ContinentError(s.to_owned())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parse_normalizes_to_uppercase() {
        assert_eq!(CountryCode::parse("fr").unwrap().as_str(), "FR");
        assert_eq!(CountryCode::parse("Fr").unwrap().as_str(), "FR");
        assert_eq!(CountryCode::parse("FR").unwrap().as_str(), "FR");
    }

    #[test]
    fn parse_rejects_wrong_length() {
        assert!(matches!(
            CountryCode::parse(""),
            Err(CountryCodeError::WrongLength { len: 0 })
        ));
        assert!(matches!(
            CountryCode::parse("FRA"),
            Err(CountryCodeError::WrongLength { len: 3 })
        ));
    }

    #[test]
    fn parse_rejects_non_letters() {
        assert!(matches!(
            CountryCode::parse("F1"),
            Err(CountryCodeError::NotAlphabetic)
        ));
        assert!(matches!(
            CountryCode::parse("--"),
            Err(CountryCodeError::NotAlphabetic)
        ));
    }

    #[test]
    fn codes_order_alphabetically() {
        let mut codes = vec![
            CountryCode::parse("NZ").unwrap(),
            CountryCode::parse("AR").unwrap(),
            CountryCode::parse("JP").unwrap(),
        ];
        codes.sort();
        let sorted: Vec<&str> = codes.iter().map(CountryCode::as_str).collect();
        assert_eq!(sorted, ["AR", "JP", "NZ"]);
    }

    #[test]
    fn continent_display_round_trips_through_from_str() {
        for continent in Continent::ALL {
            let parsed: Continent = continent.as_str().parse().unwrap();
            assert_eq!(parsed, continent);
        }
    }

    #[test]
    fn continent_rejects_unknown_names() {
        assert!("Atlantis".parse::<Continent>().is_err());
        assert!("north america".parse::<Continent>().is_err());
    }

    #[test]
    fn continent_serde_uses_display_names() {
        let json = serde_json::to_string(&Continent::NorthAmerica).unwrap();
        assert_eq!(json, "\"North America\"");

        let parsed: Continent = serde_json::from_str("\"South America\"").unwrap();
        assert_eq!(parsed, Continent::SouthAmerica);
    }
}
