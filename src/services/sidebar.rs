//! Sidebar promo widgets
//!
//! The ad and sponsor boxes are fetched independently on every request. A
//! failed ad fetch shows the house ad instead; a failed sponsor fetch hides
//! the box. Neither failure reaches the caller.

use reqwest::Client;
use std::time::Duration;

use crate::models::sidebar::{PromoPayload, SidebarResponse};

#[derive(Clone)]
pub struct SidebarService {
    client: Client,
    ad_url: Option<String>,
    sponsor_url: Option<String>,
}

impl SidebarService {
    pub fn new(
        ad_url: Option<String>,
        sponsor_url: Option<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            ad_url,
            sponsor_url,
        })
    }

    pub async fn load(&self) -> SidebarResponse {
        let (ad, sponsor) = tokio::join!(self.ad(), self.sponsor());
        SidebarResponse { ad, sponsor }
    }

    /// Always returns something: the remote ad or the house ad
    pub async fn ad(&self) -> Option<PromoPayload> {
        match self.fetch_optional(self.ad_url.as_deref()).await {
            Ok(payload) => Some(payload),
            Err(e) => {
                tracing::warn!("Ad widget fetch failed, using house ad: {}", e);
                Some(house_ad())
            }
        }
    }

    pub async fn sponsor(&self) -> Option<PromoPayload> {
        match self.fetch_optional(self.sponsor_url.as_deref()).await {
            Ok(payload) => Some(payload),
            Err(e) => {
                tracing::debug!("Sponsor widget omitted: {}", e);
                None
            }
        }
    }

    async fn fetch_optional(
        &self,
        url: Option<&str>,
    ) -> Result<PromoPayload, Box<dyn std::error::Error + Send + Sync>> {
        let url = url.ok_or("endpoint not configured")?;
        self.fetch_payload(url).await
    }

    async fn fetch_payload(
        &self,
        url: &str,
    ) -> Result<PromoPayload, Box<dyn std::error::Error + Send + Sync>> {
        let response = self
            .client
            .get(url)
            .header("accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(format!("widget endpoint {} returned {}", url, response.status()).into());
        }

        let payload: PromoPayload = response.json().await?;
        Ok(payload)
    }
}

fn house_ad() -> PromoPayload {
    PromoPayload {
        title: "Compare Crypto Exchanges".to_string(),
        body: "See current sign-up bonuses and fees side by side before you deposit.".to_string(),
        link: "/exchanges".to_string(),
        button_text: "Compare now".to_string(),
        image: None,
    }
}
