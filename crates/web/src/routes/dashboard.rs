//! Dashboard route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use globetrot_core::CountryCode;
use tracing::instrument;

use crate::db::users::UserRepository;
use crate::error::Result;
use crate::filters;
use crate::middleware::ResolvedUser;
use crate::models::{ContinentCount, User};
use crate::services::{DashboardData, VisitService};
use crate::state::AppState;

/// Dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    /// Codes of every country the active user has visited, alphabetical.
    pub visited: Vec<CountryCode>,
    /// Visit counts per continent. Continents without visits are absent.
    pub continent_counts: Vec<ContinentCount>,
    /// Total number of visited countries.
    pub total: usize,
    /// Display name of the active user.
    pub user_name: String,
    /// Accent color of the active user.
    pub user_color: String,
    /// Id of the active user, marking the selected member tab.
    pub current_id: i32,
    /// All members for the tab strip. Empty outside ambient mode.
    pub members: Vec<User>,
    /// Whether member management routes exist on this deployment.
    pub ambient: bool,
    /// Rejection message from a failed add, if any.
    pub error: Option<String>,
}

/// Build the dashboard for a user, loading their visit data fresh.
pub(crate) async fn build_index(
    state: &AppState,
    user: &User,
    error: Option<String>,
) -> Result<IndexTemplate> {
    let data = VisitService::new(state.pool()).dashboard(user.id).await?;
    index_from_data(state, user, data, error).await
}

/// Build the dashboard from already-computed visit data.
///
/// The add-visit handler calls this directly so a rejected submission
/// renders the stats its workflow just recomputed instead of querying
/// them a third time.
pub(crate) async fn index_from_data(
    state: &AppState,
    user: &User,
    data: DashboardData,
    error: Option<String>,
) -> Result<IndexTemplate> {
    let ambient = state.identity().ambient().is_some();
    let members = if ambient {
        UserRepository::new(state.pool()).list_all().await?
    } else {
        Vec::new()
    };

    Ok(IndexTemplate {
        visited: data.visited,
        continent_counts: data.continent_counts,
        total: data.total,
        user_name: user.name.clone(),
        user_color: user.display_color().to_string(),
        current_id: user.id.as_i32(),
        members,
        ambient,
        error,
    })
}

/// Display the dashboard.
#[instrument(skip_all)]
pub async fn index(
    State(state): State<AppState>,
    ResolvedUser(user): ResolvedUser,
) -> Result<impl IntoResponse> {
    build_index(&state, &user, None).await
}
