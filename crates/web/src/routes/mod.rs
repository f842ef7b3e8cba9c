//! HTTP route handlers for the tracker.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                - Dashboard (visited list + continent stats)
//! POST /add             - Record a visited country
//! GET  /health          - Health check
//!
//! # Members (ambient identity mode only)
//! POST /user            - Switch the active member, or open the new-member form
//! GET  /new             - New member form
//! POST /new             - Create a member and make them active
//!
//! # Auth (session identity mode only)
//! GET  /auth/login      - Login page
//! POST /auth/login      - Login action
//! GET  /auth/register   - Register page
//! POST /auth/register   - Register action
//! POST /auth/logout     - Logout action
//! ```

pub mod auth;
pub mod dashboard;
pub mod users;
pub mod visits;

use axum::{
    Router,
    routing::{get, post},
};

use crate::config::IdentityMode;
use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", post(auth::logout))
}

/// Create the member management routes router.
///
/// These exist only in ambient mode; session deployments manage
/// accounts through `/auth` instead.
pub fn member_routes() -> Router<AppState> {
    Router::new()
        .route("/user", post(users::switch))
        .route("/new", get(users::new_user_page).post(users::create))
}

/// Create all routes for the tracker.
///
/// The dashboard and add-visit routes are common to both identity
/// modes; the rest depend on how the deployment resolves users.
pub fn routes(mode: IdentityMode) -> Router<AppState> {
    let base = Router::new()
        // Dashboard
        .route("/", get(dashboard::index))
        // Record a visit
        .route("/add", post(visits::add));

    match mode {
        IdentityMode::Ambient => base.merge(member_routes()),
        IdentityMode::Session => base.nest("/auth", auth_routes()),
    }
}
