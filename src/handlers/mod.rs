use axum::{
    Router,
    routing::{get, post},
};

use crate::AppState;

pub mod bonus;
pub mod sidebar;
pub mod ticker;

/// All JSON routes consumed by the page shells
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/ticker", get(ticker::get_ticker))
        .route("/api/ticker/refresh", post(ticker::refresh_ticker))
        .route("/api/bonus", get(bonus::get_bonus))
        .route("/api/bonus/exchanges", get(bonus::get_exchanges))
        .route("/api/sidebar", get(sidebar::get_sidebar))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
