use axum::{
    Json,
    extract::{Query, State},
};

use crate::{
    AppState,
    models::quote::{RefreshResponse, TickerQuery},
    services::ticker::{TickerView, TooltipState},
};

/// Handler for GET /api/ticker
/// Returns the render model of the scrolling price strip
pub async fn get_ticker(
    State(state): State<AppState>,
    Query(query): Query<TickerQuery>,
) -> Json<TickerView> {
    let view = state.price_feed.view();

    let mut tooltip = TooltipState::default();
    if let (Some(index), Some(snapshot)) = (query.hover, &view.snapshot) {
        tooltip.pointer_enter(index, &snapshot.quotes);
    }

    Json(state.ticker.render(&view, &tooltip))
}

/// Handler for POST /api/ticker/refresh
/// Runs one refresh cycle outside the regular schedule
pub async fn refresh_ticker(State(state): State<AppState>) -> Json<RefreshResponse> {
    tracing::info!("Manual price feed refresh requested");

    let status = state.price_feed.refresh().await;
    let quote_count = state.price_feed.snapshot().map(|s| s.len()).unwrap_or(0);

    Json(RefreshResponse {
        status,
        quote_count,
    })
}
