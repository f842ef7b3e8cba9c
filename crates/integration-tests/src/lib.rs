//! Integration tests for Globetrot.
//!
//! # Running Tests
//!
//! ```bash
//! # Prepare the database
//! cargo run -p globetrot-cli -- migrate
//! cargo run -p globetrot-cli -- seed
//!
//! # Library-level tests run without any services
//! cargo test -p globetrot-integration-tests
//!
//! # Database-backed and HTTP tests are ignored by default
//! cargo test -p globetrot-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `catalog_seed` - Embedded catalog data and idempotent seeding
//! - `visit_workflow` - The add-visit funnel and dashboard queries
//! - `identity_resolution` - Ambient pointer recovery and session auth flows
//!
//! # Environment Variables
//!
//! - `TEST_DATABASE_URL` - `PostgreSQL` connection string for database-backed
//!   tests (defaults to a local `globetrot_test` database)
//! - `WEB_BASE_URL` - Base URL of a running server for HTTP tests
//!   (defaults to `http://localhost:3000`)
//!
//! The HTTP tests state which identity mode they expect in their ignore
//! reason; point them at a server started in that mode.
