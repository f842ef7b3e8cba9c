//! Authentication route handlers (session identity mode).
//!
//! Handles login, registration, and logout against the local account
//! store. Expected rejections bounce back to the form with an error
//! code in the query string; the page handlers translate codes into
//! the text the templates show.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result, clear_sentry_user};
use crate::filters;
use crate::middleware::{clear_current_user, set_current_user};
use crate::models::{CurrentUser, DEFAULT_USER_COLOR, USER_COLORS};
use crate::services::{AuthError, AuthService};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
    /// Chosen accent color. Values outside the palette fall back.
    pub color: Option<String>,
}

// =============================================================================
// Query Types
// =============================================================================

/// Query parameters for error/success display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub error: Option<String>,
    /// Palette offered by the color picker.
    pub colors: &'static [&'static str],
}

// =============================================================================
// Error Codes
// =============================================================================

/// Query code for a rejected login, or `None` when the failure is not
/// the user's doing and should surface as a server error instead.
const fn login_error_code(error: &AuthError) -> Option<&'static str> {
    match error {
        AuthError::EmailNotFound => Some("not_found"),
        AuthError::WrongPassword => Some("wrong_password"),
        AuthError::InvalidEmail(_) => Some("invalid_email"),
        _ => None,
    }
}

/// Query code for a rejected registration.
const fn register_error_code(error: &AuthError) -> Option<&'static str> {
    match error {
        AuthError::EmailTaken => Some("email_taken"),
        AuthError::WeakPassword(_) => Some("weak_password"),
        AuthError::InvalidEmail(_) => Some("invalid_email"),
        AuthError::InvalidName(_) => Some("invalid_name"),
        _ => None,
    }
}

/// Message shown on the login page for an error code.
fn login_error_message(code: &str) -> &'static str {
    match code {
        "not_found" => "No account found for this email. Try registering.",
        "wrong_password" => "Incorrect password. Try again.",
        "invalid_email" => "Enter a valid email address.",
        "session" => "Something went wrong. Try again.",
        _ => "Login failed. Try again.",
    }
}

/// Message shown on the login page for a success code.
fn login_success_message(code: &str) -> Option<&'static str> {
    match code {
        "logged_out" => Some("You have been signed out."),
        _ => None,
    }
}

/// Message shown on the register page for an error code.
fn register_error_message(code: &str) -> &'static str {
    match code {
        "email_taken" => "An account with this email already exists.",
        "password_mismatch" => "Passwords do not match.",
        "weak_password" => "Password must be at least 8 characters.",
        "invalid_email" => "Enter a valid email address.",
        "invalid_name" => "Enter a display name (64 characters max).",
        "session" => "Something went wrong. Try again.",
        _ => "Registration failed. Try again.",
    }
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
pub async fn login_page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    LoginTemplate {
        error: query
            .error
            .as_deref()
            .map(|code| login_error_message(code).to_string()),
        success: query
            .success
            .as_deref()
            .and_then(login_success_message)
            .map(String::from),
    }
}

/// Handle login form submission.
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let auth = AuthService::new(state.pool());

    let user = match auth.login(&form.email, &form.password).await {
        Ok(user) => user,
        Err(e) => {
            let Some(code) = login_error_code(&e) else {
                return Err(e.into());
            };
            tracing::warn!("Login rejected: {e}");
            return Ok(Redirect::to(&format!("/auth/login?error={code}")).into_response());
        }
    };

    let Some(email) = user.email.clone() else {
        // login only succeeds for credentialed accounts, which always
        // carry an email.
        return Err(AppError::Internal(
            "credentialed user has no email".to_string(),
        ));
    };

    let current = CurrentUser {
        id: user.id,
        email,
    };
    if let Err(e) = set_current_user(&session, &current).await {
        tracing::error!("Failed to set session: {e}");
        return Ok(Redirect::to("/auth/login?error=session").into_response());
    }

    tracing::info!(user_id = %user.id, "user logged in");
    Ok(Redirect::to("/").into_response())
}

// =============================================================================
// Registration Routes
// =============================================================================

/// Display the registration page.
pub async fn register_page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    RegisterTemplate {
        error: query
            .error
            .as_deref()
            .map(|code| register_error_message(code).to_string()),
        colors: USER_COLORS,
    }
}

/// Handle registration form submission.
///
/// A successful registration signs the new account in directly.
#[instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Result<Response> {
    // The confirm field never reaches the service layer.
    if form.password != form.password_confirm {
        return Ok(Redirect::to("/auth/register?error=password_mismatch").into_response());
    }

    let color = form
        .color
        .as_deref()
        .filter(|c| USER_COLORS.contains(c))
        .unwrap_or(DEFAULT_USER_COLOR);

    let auth = AuthService::new(state.pool());
    let user = match auth
        .register(&form.name, &form.email, &form.password, color)
        .await
    {
        Ok(user) => user,
        Err(e) => {
            let Some(code) = register_error_code(&e) else {
                return Err(e.into());
            };
            tracing::warn!("Registration rejected: {e}");
            return Ok(Redirect::to(&format!("/auth/register?error={code}")).into_response());
        }
    };

    let Some(email) = user.email.clone() else {
        return Err(AppError::Internal(
            "registered user has no email".to_string(),
        ));
    };

    let current = CurrentUser {
        id: user.id,
        email,
    };
    if let Err(e) = set_current_user(&session, &current).await {
        tracing::error!("Failed to set session: {e}");
        return Ok(Redirect::to("/auth/login?error=session").into_response());
    }

    tracing::info!(user_id = %user.id, "account registered");
    Ok(Redirect::to("/").into_response())
}

// =============================================================================
// Logout Route
// =============================================================================

/// Handle logout.
///
/// Logging out twice is harmless; clearing an absent session is a
/// no-op and the redirect is the same either way.
pub async fn logout(session: Session) -> Response {
    if let Err(e) = clear_current_user(&session).await {
        tracing::error!("Failed to clear session: {e}");
    }

    // Also destroy the entire session record
    if let Err(e) = session.flush().await {
        tracing::error!("Failed to flush session: {e}");
    }

    clear_sentry_user();
    Redirect::to("/auth/login?success=logged_out").into_response()
}
