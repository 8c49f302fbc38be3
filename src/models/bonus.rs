use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Deposit range mapped to a bonus rate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateTier {
    pub min: Decimal,
    pub max: Option<Decimal>, // None = unbounded
    pub rate: Decimal,        // 0.15 = 15%
}

impl RateTier {
    pub fn new(min: Decimal, max: Option<Decimal>, rate: Decimal) -> Self {
        Self { min, max, rate }
    }
}

/// Sign-up bonus schedule for one exchange
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeBonusProfile {
    pub exchange: String,
    pub tiers: Vec<RateTier>, // Ascending by min
    pub max_bonus: Decimal,
}

impl ExchangeBonusProfile {
    pub fn new(exchange: &str, tiers: Vec<RateTier>, max_bonus: Decimal) -> Self {
        Self {
            exchange: exchange.to_string(),
            tiers,
            max_bonus,
        }
    }
}

/// Query parameters for GET /api/bonus
#[derive(Debug, Clone, Deserialize)]
pub struct BonusQuery {
    pub exchange: String,
    pub deposit: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct BonusResponse {
    pub exchange: String,
    pub deposit: Decimal,
    pub rate: Decimal,
    pub bonus: Decimal,
    pub capped: bool,
    pub formatted: String, // "$180"
}

#[derive(Debug, Clone, Serialize)]
pub struct ExchangeProfilesResponse {
    pub exchanges: Vec<ExchangeBonusProfile>,
}
