use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};

use crate::{
    AppState,
    models::{
        ErrorResponse,
        bonus::{BonusQuery, BonusResponse, ExchangeProfilesResponse},
    },
    services::bonus::{BonusError, TierBoundary, format_usd, quote_bonus},
};

/// Handler for GET /api/bonus/exchanges
pub async fn get_exchanges(State(state): State<AppState>) -> Json<ExchangeProfilesResponse> {
    Json(ExchangeProfilesResponse {
        exchanges: state.bonus.profiles.clone(),
    })
}

/// Handler for GET /api/bonus?exchange=binance&deposit=1000
pub async fn get_bonus(
    State(state): State<AppState>,
    Query(query): Query<BonusQuery>,
) -> Result<Json<BonusResponse>, (StatusCode, Json<ErrorResponse>)> {
    let profile = state.bonus.find(&query.exchange).ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Unknown exchange '{}'", query.exchange),
            }),
        )
    })?;

    let quote = quote_bonus(query.deposit, profile, TierBoundary::HalfOpen).map_err(|e| {
        let status = match &e {
            BonusError::NegativeDeposit { .. } => StatusCode::BAD_REQUEST,
            BonusError::NoMatchingTier { .. } | BonusError::MalformedTiers { .. } => {
                tracing::error!("Bonus table for {} is broken: {}", profile.exchange, e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(ErrorResponse { error: e.to_string() }))
    })?;

    Ok(Json(BonusResponse {
        exchange: profile.exchange.clone(),
        deposit: query.deposit,
        rate: quote.tier.rate,
        capped: quote.capped(),
        formatted: format_usd(quote.bonus),
        bonus: quote.bonus,
    }))
}
