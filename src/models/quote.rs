use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One configured ticker asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetConfig {
    pub id: String,     // Price API identifier: "bitcoin"
    pub name: String,   // "Bitcoin"
    pub symbol: String, // "BTC"
}

impl AssetConfig {
    pub fn new(id: &str, name: &str, symbol: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            symbol: symbol.to_string(),
        }
    }
}

/// Static price/change pair used when the live source is unavailable
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MockQuote {
    pub price: f64,
    pub change_percent_24h: f64,
}

/// Normalized quote for a single asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetQuote {
    pub symbol: String,
    pub name: String,
    pub price: f64, // USD, never negative
    pub change_percent_24h: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteOrigin {
    Live,
    Fallback,
}

/// Complete set of quotes from one refresh cycle
///
/// Snapshots are immutable once built; the feed swaps the whole `Arc`.
#[derive(Debug, Clone, Serialize)]
pub struct FeedSnapshot {
    pub quotes: Vec<AssetQuote>,
    pub origin: QuoteOrigin,
    pub sequence: u64,
    pub refreshed_at: DateTime<Utc>,
}

impl FeedSnapshot {
    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FeedStatus {
    /// No refresh has completed yet
    Loading,
    /// Most recent refresh failed and nothing could be substituted
    Failed { error: String },
    Ready { origin: QuoteOrigin, sequence: u64 },
}

/// Query parameters for GET /api/ticker
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TickerQuery {
    pub hover: Option<usize>, // Index into the duplicated strip
}

/// Response for POST /api/ticker/refresh
#[derive(Debug, Clone, Serialize)]
pub struct RefreshResponse {
    pub status: FeedStatus,
    pub quote_count: usize,
}
