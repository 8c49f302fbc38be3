use affiliate_backend::{
    AppState,
    config::{AppConfig, BonusConfig, TickerConfig, TickerStyleConfig},
    handlers::api_router,
    jobs::price_feed_sync::start_price_feed_job,
    services::{
        coingecko::CoinGeckoService, price_feed::PriceFeed, sidebar::SidebarService,
        ticker::TickerRenderer,
    },
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,affiliate_backend=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env();

    let coingecko = CoinGeckoService::new(
        config.coingecko_api_key.clone(),
        config.coingecko_base_url.clone(),
        config.http_timeout,
    )
    .expect("Failed to build CoinGecko client");

    let sidebar = SidebarService::new(
        config.ad_content_url.clone(),
        config.sponsor_content_url.clone(),
        config.http_timeout,
    )
    .expect("Failed to build sidebar client");

    let bonus = BonusConfig::default();
    for profile in &bonus.profiles {
        if let Err(e) = profile.validate() {
            tracing::warn!("{}", e);
        }
    }

    let price_feed = PriceFeed::new(Arc::new(coingecko), TickerConfig::default());
    let polling = start_price_feed_job(price_feed.clone(), config.poll_interval);

    let state = AppState {
        price_feed,
        ticker: Arc::new(TickerRenderer::new(
            TickerStyleConfig::default(),
            config.scroll_duration,
        )),
        bonus: Arc::new(bonus),
        sidebar,
    };

    let app = api_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("Failed to bind listener");

    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    polling.shutdown().await;
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
