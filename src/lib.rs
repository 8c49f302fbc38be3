// src/lib.rs

use std::sync::Arc;

use config::BonusConfig;
use services::{price_feed::PriceFeed, sidebar::SidebarService, ticker::TickerRenderer};

#[derive(Clone)]
pub struct AppState {
    pub price_feed: PriceFeed,
    pub ticker: Arc<TickerRenderer>,
    pub bonus: Arc<BonusConfig>,
    pub sidebar: SidebarService,
}

pub mod config;

pub mod services {
    pub mod bonus;
    pub mod coingecko;
    pub mod price_feed;
    pub mod sidebar;
    pub mod ticker;
}

pub mod jobs;
pub mod models;
pub mod handlers;
