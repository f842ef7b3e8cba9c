//! Member management route handlers (ambient identity mode).
//!
//! These back the member tab strip on the dashboard: switching the
//! ambient pointer to another member, and creating new members. Session
//! deployments never mount them; accounts go through `/auth` there.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use globetrot_core::UserId;

use crate::db::users::UserRepository;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::models::{DEFAULT_USER_COLOR, MAX_NAME_LENGTH, USER_COLORS};
use crate::services::identity::AmbientPointer;
use crate::state::AppState;

/// New member form template.
#[derive(Template, WebTemplate)]
#[template(path = "new_user.html")]
pub struct NewUserTemplate {
    /// Validation message from a rejected submission, if any.
    pub error: Option<String>,
    /// Palette offered by the color picker.
    pub colors: &'static [&'static str],
}

/// Form data posted by the member tab strip.
///
/// Tab selection and the add-member button share one form; `add` is
/// only present when the button was pressed.
#[derive(Debug, Deserialize)]
pub struct SwitchForm {
    /// Id of the selected member tab.
    pub user: Option<i32>,
    /// Set to "new" by the add-member button.
    pub add: Option<String>,
}

/// Form data for creating a member.
#[derive(Debug, Deserialize)]
pub struct NewUserForm {
    /// Display name for the new member.
    pub name: String,
    /// Chosen accent color. Values outside the palette fall back.
    pub color: Option<String>,
}

/// The ambient pointer, or a 404 on deployments that have none.
///
/// Member routes are only mounted in ambient mode, so this guard is
/// for coherence rather than a path a client can normally reach.
fn ambient_pointer(state: &AppState) -> Result<&AmbientPointer> {
    state.identity().ambient().ok_or_else(|| {
        AppError::NotFound("member management is only available in ambient mode".to_string())
    })
}

/// Switch the active member, or open the new-member form.
#[instrument(skip_all)]
pub async fn switch(
    State(state): State<AppState>,
    Form(form): Form<SwitchForm>,
) -> Result<Response> {
    let pointer = ambient_pointer(&state)?;

    if form.add.as_deref() == Some("new") {
        return Ok(NewUserTemplate {
            error: None,
            colors: USER_COLORS,
        }
        .into_response());
    }

    let Some(id) = form.user else {
        return Err(AppError::BadRequest("no member selected".to_string()));
    };

    // The pointer does not validate the target; a bad id heals on the
    // next resolve.
    pointer.point_to(UserId::new(id));

    let id_text = id.to_string();
    add_breadcrumb("members", "Switched member", Some(&[("user_id", &id_text)]));
    Ok(Redirect::to("/").into_response())
}

/// Display the new member form.
pub async fn new_user_page(State(state): State<AppState>) -> Result<NewUserTemplate> {
    ambient_pointer(&state)?;

    Ok(NewUserTemplate {
        error: None,
        colors: USER_COLORS,
    })
}

/// Create a member and make them the active one.
#[instrument(skip_all)]
pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<NewUserForm>,
) -> Result<Response> {
    let pointer = ambient_pointer(&state)?;

    let name = form.name.trim();
    if name.is_empty() || name.len() > MAX_NAME_LENGTH {
        return Ok(NewUserTemplate {
            error: Some(format!(
                "Enter a display name ({MAX_NAME_LENGTH} characters max)."
            )),
            colors: USER_COLORS,
        }
        .into_response());
    }

    let color = form
        .color
        .as_deref()
        .filter(|c| USER_COLORS.contains(c))
        .unwrap_or(DEFAULT_USER_COLOR);

    let user = UserRepository::new(state.pool()).create(name, color).await?;
    pointer.point_to(user.id);

    let id_text = user.id.to_string();
    add_breadcrumb("members", "Created member", Some(&[("user_id", &id_text)]));
    Ok(Redirect::to("/").into_response())
}
