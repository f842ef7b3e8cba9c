//! Add-visit route handler.

use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{Result, add_breadcrumb};
use crate::middleware::ResolvedUser;
use crate::services::{AddVisitOutcome, VisitService};
use crate::state::AppState;

/// Form data for recording a visit.
#[derive(Debug, Deserialize)]
pub struct AddVisitForm {
    /// Country name as typed into the dashboard form.
    pub country: String,
}

/// Record a visited country for the active user.
///
/// A successful add redirects back to the dashboard. A rejected one
/// re-renders the dashboard in place with the rejection message, using
/// the stats the workflow recomputed.
#[instrument(skip_all)]
pub async fn add(
    State(state): State<AppState>,
    ResolvedUser(user): ResolvedUser,
    Form(form): Form<AddVisitForm>,
) -> Result<Response> {
    let service = VisitService::new(state.pool());

    match service.add_visit(&user, &form.country).await? {
        AddVisitOutcome::Added => {
            add_breadcrumb(
                "visits",
                "Recorded a visit",
                Some(&[("country", form.country.trim())]),
            );
            Ok(Redirect::to("/").into_response())
        }
        AddVisitOutcome::Rejected { rejection, data } => {
            let message = rejection.message().to_string();
            let template =
                super::dashboard::index_from_data(&state, &user, data, Some(message)).await?;
            Ok(template.into_response())
        }
    }
}
