use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

use crate::services::price_feed::QuoteSource;

#[derive(Clone)]
pub struct CoinGeckoService {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

/// Entry of the /simple/price response, keyed by coin id
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct SimplePrice {
    #[serde(default)]
    pub usd: Option<f64>,
    #[serde(default)]
    pub usd_24h_change: Option<f64>,
}

impl CoinGeckoService {
    pub fn new(
        api_key: Option<String>,
        base_url: String,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch USD price and 24h change for all `coin_ids` in one request
    pub async fn fetch_simple_prices(
        &self,
        coin_ids: &[String],
    ) -> Result<HashMap<String, SimplePrice>, Box<dyn std::error::Error + Send + Sync>> {
        let ids = coin_ids.join(",");
        tracing::debug!("Fetching simple prices for [{}] from CoinGecko", ids);

        let url = format!("{}/simple/price", self.base_url);

        let mut request = self
            .client
            .get(&url)
            .header("accept", "application/json")
            .query(&[
                ("ids", ids.as_str()),
                ("vs_currencies", "usd"),
                ("include_24hr_change", "true"),
            ]);

        if let Some(api_key) = &self.api_key {
            request = request.header("x-cg-pro-api-key", api_key);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(format!("CoinGecko API error {}: {}", status, error_text).into());
        }

        let prices: HashMap<String, SimplePrice> = response.json().await?;

        tracing::debug!(
            "Fetched {} of {} requested prices from CoinGecko",
            prices.len(),
            coin_ids.len()
        );

        Ok(prices)
    }
}

#[async_trait]
impl QuoteSource for CoinGeckoService {
    async fn fetch_quotes(
        &self,
        ids: &[String],
    ) -> Result<HashMap<String, SimplePrice>, Box<dyn std::error::Error + Send + Sync>> {
        self.fetch_simple_prices(ids).await
    }
}
