//! Price Feed
//!
//! Fetches the configured ticker assets from a batched quote source and keeps
//! the latest normalized snapshot in memory. A failed fetch is replaced by the
//! configured fallback prices, so readers always get a complete list.
//!
//! Every refresh draws a sequence number before it starts fetching. Results
//! are applied only if they are newer than what is already stored, so a slow
//! response can never overwrite a fresher one.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info, warn};

use crate::config::TickerConfig;
use crate::models::quote::{AssetConfig, AssetQuote, FeedSnapshot, FeedStatus, QuoteOrigin};
use crate::services::coingecko::SimplePrice;

/// Batched quote provider (CoinGecko in production)
#[async_trait]
pub trait QuoteSource: Send + Sync {
    async fn fetch_quotes(
        &self,
        ids: &[String],
    ) -> Result<HashMap<String, SimplePrice>, Box<dyn std::error::Error + Send + Sync>>;
}

#[derive(Default)]
struct FeedState {
    snapshot: Option<Arc<FeedSnapshot>>,
    last_error: Option<String>,
    applied_sequence: u64,
}

impl FeedState {
    fn status(&self) -> FeedStatus {
        match (&self.snapshot, &self.last_error) {
            (Some(snapshot), _) => FeedStatus::Ready {
                origin: snapshot.origin,
                sequence: snapshot.sequence,
            },
            (None, Some(error)) => FeedStatus::Failed {
                error: error.clone(),
            },
            (None, None) => FeedStatus::Loading,
        }
    }
}

/// Read-only view of the feed used by the ticker renderer
#[derive(Debug, Clone)]
pub struct FeedView {
    pub snapshot: Option<Arc<FeedSnapshot>>,
    pub last_error: Option<String>,
}

#[derive(Clone)]
pub struct PriceFeed {
    source: Arc<dyn QuoteSource>,
    config: Arc<TickerConfig>,
    state: Arc<RwLock<FeedState>>,
    next_sequence: Arc<AtomicU64>,
}

impl PriceFeed {
    pub fn new(source: Arc<dyn QuoteSource>, config: TickerConfig) -> Self {
        Self {
            source,
            config: Arc::new(config),
            state: Arc::new(RwLock::new(FeedState::default())),
            next_sequence: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn assets(&self) -> &[AssetConfig] {
        &self.config.assets
    }

    /// Fetch fresh quotes and replace the snapshot
    ///
    /// Never fails: fetch errors degrade to the fallback prices, or, when no
    /// fallback is configured, leave the previous snapshot in place.
    pub async fn refresh(&self) -> FeedStatus {
        let sequence = self.next_sequence.fetch_add(1, Ordering::SeqCst) + 1;
        let ids = self.config.ids();

        let outcome = match self.source.fetch_quotes(&ids).await {
            Ok(prices) => {
                let missing = ids.iter().filter(|id| !prices.contains_key(*id)).count();
                if missing > 0 {
                    debug!("{} of {} assets missing from price response, using 0", missing, ids.len());
                }
                let quotes = normalize_quotes(&self.config.assets, |id| {
                    prices
                        .get(id)
                        .map(|p| (p.usd.unwrap_or(0.0), p.usd_24h_change.unwrap_or(0.0)))
                });
                Ok((quotes, QuoteOrigin::Live, None))
            }
            Err(e) => {
                warn!("Price fetch #{} failed: {}", sequence, e);
                match &self.config.fallback {
                    Some(mock) => {
                        let quotes = normalize_quotes(&self.config.assets, |id| {
                            mock.get(id).map(|q| (q.price, q.change_percent_24h))
                        });
                        Ok((quotes, QuoteOrigin::Fallback, Some(e.to_string())))
                    }
                    None => Err(e.to_string()),
                }
            }
        };

        self.apply(sequence, outcome)
    }

    fn apply(
        &self,
        sequence: u64,
        outcome: Result<(Vec<AssetQuote>, QuoteOrigin, Option<String>), String>,
    ) -> FeedStatus {
        let mut state = self.state.write();

        if sequence <= state.applied_sequence {
            info!(
                "Discarding stale price refresh #{} (#{} already applied)",
                sequence, state.applied_sequence
            );
            return state.status();
        }
        state.applied_sequence = sequence;

        match outcome {
            Ok((quotes, origin, error)) => {
                debug!("Applied price snapshot #{} ({} quotes, {:?})", sequence, quotes.len(), origin);
                state.snapshot = Some(Arc::new(FeedSnapshot {
                    quotes,
                    origin,
                    sequence,
                    refreshed_at: Utc::now(),
                }));
                state.last_error = error;
            }
            Err(error) => {
                state.last_error = Some(error);
            }
        }

        state.status()
    }

    pub fn snapshot(&self) -> Option<Arc<FeedSnapshot>> {
        self.state.read().snapshot.clone()
    }

    pub fn last_error(&self) -> Option<String> {
        self.state.read().last_error.clone()
    }

    pub fn status(&self) -> FeedStatus {
        self.state.read().status()
    }

    /// Snapshot and error read under one lock
    pub fn view(&self) -> FeedView {
        let state = self.state.read();
        FeedView {
            snapshot: state.snapshot.clone(),
            last_error: state.last_error.clone(),
        }
    }
}

/// Build one quote per configured asset, in configuration order
///
/// Assets the lookup doesn't know get price 0 and change 0. Prices are
/// clamped to be finite and non-negative.
fn normalize_quotes<F>(assets: &[AssetConfig], lookup: F) -> Vec<AssetQuote>
where
    F: Fn(&str) -> Option<(f64, f64)>,
{
    assets
        .iter()
        .map(|asset| {
            let (price, change) = lookup(&asset.id).unwrap_or((0.0, 0.0));
            AssetQuote {
                symbol: asset.symbol.clone(),
                name: asset.name.clone(),
                price: if price.is_finite() && price > 0.0 { price } else { 0.0 },
                change_percent_24h: if change.is_finite() { change } else { 0.0 },
            }
        })
        .collect()
}
