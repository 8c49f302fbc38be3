//! Application configuration
//!
//! Runtime settings come from environment variables (a `.env` file is loaded
//! first by `main`). The asset list, fallback prices, gradient table and bonus
//! profiles are plain structs with `Default` impls so tests can inject their
//! own datasets.

use rust_decimal_macros::dec;
use std::collections::HashMap;
use std::env;
use std::time::Duration;

use crate::models::bonus::{ExchangeBonusProfile, RateTier};
use crate::models::quote::{AssetConfig, MockQuote};
use crate::services::ticker::Gradient;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_COINGECKO_BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// Process-level settings read from the environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub coingecko_base_url: String,
    /// Sent as `x-cg-pro-api-key` when present
    pub coingecko_api_key: Option<String>,
    pub poll_interval: Duration,
    pub http_timeout: Duration,
    pub scroll_duration: Duration,
    pub ad_content_url: Option<String>,
    pub sponsor_content_url: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the config from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let opt_str = |name: &str| {
            lookup(name)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };
        let secs = |name: &str, default: u64| {
            opt_str(name)
                .and_then(|s| s.parse::<u64>().ok())
                .filter(|v| *v > 0)
                .map(Duration::from_secs)
                .unwrap_or_else(|| Duration::from_secs(default))
        };

        Self {
            bind_addr: opt_str("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            coingecko_base_url: opt_str("COINGECKO_BASE_URL")
                .unwrap_or_else(|| DEFAULT_COINGECKO_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            coingecko_api_key: opt_str("COINGECKO_API_KEY"),
            poll_interval: secs("PRICE_POLL_INTERVAL_SECS", 60),
            http_timeout: secs("HTTP_TIMEOUT_SECS", 10),
            scroll_duration: secs("TICKER_SCROLL_SECS", 30),
            ad_content_url: opt_str("AD_CONTENT_URL"),
            sponsor_content_url: opt_str("SPONSOR_CONTENT_URL"),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

/// Assets shown in the ticker and the prices used when the live source is down
#[derive(Debug, Clone)]
pub struct TickerConfig {
    pub assets: Vec<AssetConfig>,
    /// `None` disables the fallback: failed refreshes keep the previous snapshot
    pub fallback: Option<HashMap<String, MockQuote>>,
}

impl TickerConfig {
    pub fn ids(&self) -> Vec<String> {
        self.assets.iter().map(|a| a.id.clone()).collect()
    }
}

impl Default for TickerConfig {
    fn default() -> Self {
        let assets = vec![
            AssetConfig::new("bitcoin", "Bitcoin", "BTC"),
            AssetConfig::new("ethereum", "Ethereum", "ETH"),
            AssetConfig::new("binancecoin", "BNB", "BNB"),
            AssetConfig::new("solana", "Solana", "SOL"),
            AssetConfig::new("ripple", "XRP", "XRP"),
            AssetConfig::new("cardano", "Cardano", "ADA"),
            AssetConfig::new("dogecoin", "Dogecoin", "DOGE"),
            AssetConfig::new("polkadot", "Polkadot", "DOT"),
        ];

        let fallback = [
            ("bitcoin", 43250.0, 2.5),
            ("ethereum", 2280.0, -1.2),
            ("binancecoin", 312.4, 0.8),
            ("solana", 98.6, 6.3),
            ("ripple", 0.62, -0.4),
            ("cardano", 0.51, -5.7),
            ("dogecoin", 0.085, 1.9),
            ("polkadot", 7.2, -2.1),
        ]
        .into_iter()
        .map(|(id, price, change)| {
            (
                id.to_string(),
                MockQuote {
                    price,
                    change_percent_24h: change,
                },
            )
        })
        .collect();

        Self {
            assets,
            fallback: Some(fallback),
        }
    }
}

/// Gradient lookup for ticker badges
#[derive(Debug, Clone)]
pub struct TickerStyleConfig {
    pub gradients: HashMap<String, Gradient>,
    pub default_gradient: Gradient,
}

impl Default for TickerStyleConfig {
    fn default() -> Self {
        use crate::services::ticker::ColorToken::*;

        let gradients = [
            ("BTC", Orange, Yellow),
            ("ETH", Indigo, Purple),
            ("BNB", Yellow, Amber),
            ("SOL", Purple, Teal),
            ("XRP", Slate, Sky),
            ("ADA", Blue, Sky),
            ("DOGE", Amber, Orange),
            ("DOT", Pink, Rose),
        ]
        .into_iter()
        .map(|(symbol, from, to)| (symbol.to_string(), Gradient::new(from, to)))
        .collect();

        Self {
            gradients,
            default_gradient: Gradient::new(Gray, Slate),
        }
    }
}

/// Exchange profiles offered by the bonus calculator
#[derive(Debug, Clone)]
pub struct BonusConfig {
    pub profiles: Vec<ExchangeBonusProfile>,
}

impl BonusConfig {
    pub fn find(&self, exchange: &str) -> Option<&ExchangeBonusProfile> {
        let slug = exchange.trim().to_lowercase();
        self.profiles.iter().find(|p| p.exchange == slug)
    }
}

impl Default for BonusConfig {
    fn default() -> Self {
        Self {
            profiles: vec![
                ExchangeBonusProfile::new(
                    "binance",
                    vec![
                        RateTier::new(dec!(0), Some(dec!(1000)), dec!(0.15)),
                        RateTier::new(dec!(1000), Some(dec!(5000)), dec!(0.18)),
                        RateTier::new(dec!(5000), Some(dec!(20000)), dec!(0.20)),
                        RateTier::new(dec!(20000), None, dec!(0.25)),
                    ],
                    dec!(5000),
                ),
                ExchangeBonusProfile::new(
                    "bybit",
                    vec![
                        RateTier::new(dec!(0), Some(dec!(500)), dec!(0.10)),
                        RateTier::new(dec!(500), Some(dec!(10000)), dec!(0.20)),
                        RateTier::new(dec!(10000), None, dec!(0.30)),
                    ],
                    dec!(30000),
                ),
                ExchangeBonusProfile::new(
                    "okx",
                    vec![
                        RateTier::new(dec!(0), Some(dec!(2000)), dec!(0.12)),
                        RateTier::new(dec!(2000), None, dec!(0.16)),
                    ],
                    dec!(10000),
                ),
                ExchangeBonusProfile::new(
                    "kucoin",
                    vec![
                        RateTier::new(dec!(0), Some(dec!(1000)), dec!(0.10)),
                        RateTier::new(dec!(1000), Some(dec!(5000)), dec!(0.12)),
                        RateTier::new(dec!(5000), None, dec!(0.15)),
                    ],
                    dec!(500),
                ),
            ],
        }
    }
}
