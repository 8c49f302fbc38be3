use axum::{Json, extract::State};

use crate::{AppState, models::sidebar::SidebarResponse};

/// Handler for GET /api/sidebar
/// Widget failures are absorbed by the service, so this always succeeds
pub async fn get_sidebar(State(state): State<AppState>) -> Json<SidebarResponse> {
    Json(state.sidebar.load().await)
}
