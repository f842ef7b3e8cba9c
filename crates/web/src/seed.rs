//! Pre-seed the country catalog from embedded CSV data.
//!
//! The catalog ships inside the binary; the `seed` CLI command inserts
//! it into the `countries` table. Codes that already exist are skipped,
//! so re-running after an upgrade only adds what is new.
//!
//! ## CSV Format
//!
//! ```csv
//! country_code,country_name,continent
//! FR,France,Europe
//! JP,Japan,Asia
//! ```

use std::collections::HashSet;

use serde::Deserialize;
use sqlx::PgPool;
use tracing::{debug, info, instrument};

use globetrot_core::{Continent, CountryCode};

use crate::db::RepositoryError;
use crate::db::catalog::CatalogRepository;
use crate::models::Country;

/// Embedded catalog data: the sovereign states plus Antarctica.
const COUNTRIES_CSV: &str = include_str!("../seed/countries.csv");

/// A single catalog row as it appears in the CSV.
#[derive(Debug, Deserialize)]
pub struct CountryRecord {
    /// Two-letter uppercase code.
    pub country_code: String,
    /// Canonical English name, the one add-visit input is matched against.
    pub country_name: String,
    /// One of the seven continent display names.
    pub continent: String,
}

/// Result of a seeding run.
#[derive(Debug)]
pub struct SeedReport {
    /// Number of countries inserted.
    pub inserted: u64,
    /// Number of countries skipped (already present).
    pub skipped: u64,
}

/// Errors that can occur while seeding the catalog.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    /// Embedded CSV failed to parse.
    #[error("catalog data error: {0}")]
    Csv(#[from] csv::Error),

    /// A record failed validation.
    #[error("invalid catalog data: {0}")]
    Invalid(String),

    /// Database operation failed.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Parse the embedded catalog into records.
///
/// # Errors
///
/// Returns `SeedError::Csv` if the embedded data fails to parse.
pub fn embedded_records() -> Result<Vec<CountryRecord>, SeedError> {
    let mut reader = csv::Reader::from_reader(COUNTRIES_CSV.as_bytes());
    let mut records = Vec::new();
    for record in reader.deserialize() {
        records.push(record?);
    }
    Ok(records)
}

/// Validate catalog records.
///
/// Returns one message per problem; an empty vec means the data is good.
#[must_use]
pub fn validate_records(records: &[CountryRecord]) -> Vec<String> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for record in records {
        if CountryCode::parse(&record.country_code).is_err() {
            errors.push(format!("Invalid country code: {}", record.country_code));
        }

        if record.country_name.trim().is_empty() {
            errors.push(format!("Empty name for code: {}", record.country_code));
        }

        if record.continent.parse::<Continent>().is_err() {
            errors.push(format!(
                "Unknown continent '{}' for code '{}'",
                record.continent, record.country_code
            ));
        }

        if !seen.insert(record.country_code.clone()) {
            errors.push(format!("Duplicate country code: {}", record.country_code));
        }
    }

    errors
}

/// Convert a validated record into the domain type.
fn to_country(record: &CountryRecord) -> Result<Country, SeedError> {
    let code = CountryCode::parse(&record.country_code)
        .map_err(|e| SeedError::Invalid(format!("{}: {e}", record.country_code)))?;
    let continent = record
        .continent
        .parse::<Continent>()
        .map_err(|e| SeedError::Invalid(e.to_string()))?;

    Ok(Country {
        code,
        name: record.country_name.trim().to_string(),
        continent,
    })
}

/// Seed the `countries` table from the embedded catalog.
///
/// # Errors
///
/// Returns an error if the embedded data is invalid or an insert fails.
#[instrument(skip(pool))]
pub async fn seed_countries(pool: &PgPool) -> Result<SeedReport, SeedError> {
    let records = embedded_records()?;

    let problems = validate_records(&records);
    if !problems.is_empty() {
        return Err(SeedError::Invalid(problems.join("; ")));
    }

    let catalog = CatalogRepository::new(pool);
    let mut report = SeedReport {
        inserted: 0,
        skipped: 0,
    };

    for record in &records {
        let country = to_country(record)?;
        if catalog.insert_if_absent(&country).await? {
            report.inserted += 1;
            debug!(code = %country.code, "Inserted country");
        } else {
            report.skipped += 1;
        }
    }

    info!(
        inserted = report.inserted,
        skipped = report.skipped,
        "Catalog seeding complete"
    );

    Ok(report)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn embedded_catalog_parses_and_validates() {
        let records = embedded_records().unwrap();
        assert!(
            records.len() > 150,
            "expected a full catalog, got {} records",
            records.len()
        );

        let problems = validate_records(&records);
        assert!(problems.is_empty(), "catalog data problems: {problems:?}");
    }

    #[test]
    fn embedded_catalog_contains_known_entries() {
        let records = embedded_records().unwrap();

        let france = records.iter().find(|r| r.country_code == "FR").unwrap();
        assert_eq!(france.country_name, "France");
        assert_eq!(france.continent, "Europe");

        let japan = records.iter().find(|r| r.country_code == "JP").unwrap();
        assert_eq!(japan.continent, "Asia");
    }

    #[test]
    fn validation_flags_bad_rows() {
        let records = vec![
            CountryRecord {
                country_code: "FRA".to_string(),
                country_name: "France".to_string(),
                continent: "Europe".to_string(),
            },
            CountryRecord {
                country_code: "JP".to_string(),
                country_name: String::new(),
                continent: "Outer Space".to_string(),
            },
            CountryRecord {
                country_code: "JP".to_string(),
                country_name: "Japan".to_string(),
                continent: "Asia".to_string(),
            },
        ];

        let problems = validate_records(&records);
        assert_eq!(problems.len(), 4, "{problems:?}");
    }

    #[test]
    fn records_convert_to_domain_countries() {
        let record = CountryRecord {
            country_code: "NZ".to_string(),
            country_name: " New Zealand ".to_string(),
            continent: "Oceania".to_string(),
        };

        let country = to_country(&record).unwrap();
        assert_eq!(country.code.as_str(), "NZ");
        assert_eq!(country.name, "New Zealand");
        assert_eq!(country.continent, Continent::Oceania);
    }
}
