//! Globetrot web application library.
//!
//! This crate provides the visited-countries tracker as a library,
//! allowing it to be tested and reused by the CLI and integration tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod seed;
pub mod services;
pub mod state;
