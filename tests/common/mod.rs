#![allow(dead_code)]

use affiliate_backend::{
    AppState,
    config::{BonusConfig, TickerConfig, TickerStyleConfig},
    handlers::api_router,
    services::{
        coingecko::CoinGeckoService, price_feed::PriceFeed, sidebar::SidebarService,
        ticker::TickerRenderer,
    },
};
use axum::{
    Json, Router,
    body::Body,
    extract::Query,
    http::{Request, StatusCode},
    routing::get,
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

/// Base URL of a local port that was just released, so connections are refused
pub fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind free port");
    let addr = listener.local_addr().expect("free port addr");
    drop(listener);
    format!("http://{}", addr)
}

/// Serve a stand-in for the price API and the widget endpoints on a random port
///
/// - `/api/v3/simple/price` knows bitcoin and ethereum only
/// - `/broken/simple/price` answers 503
/// - `/garbage/simple/price` answers 200 with a body that isn't JSON
/// - `/ad` returns a promo, `/sponsor` answers 500
pub async fn spawn_fake_upstream() -> String {
    let app = Router::new()
        .route("/api/v3/simple/price", get(simple_price))
        .route(
            "/broken/simple/price",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "rate limited") }),
        )
        .route(
            "/garbage/simple/price",
            get(|| async { (StatusCode::OK, "not json") }),
        )
        .route(
            "/ad",
            get(|| async {
                Json(json!({
                    "title": "Trade on Binance",
                    "body": "Get up to $5,000 in sign-up bonuses",
                    "link": "https://example.com/binance",
                    "buttonText": "Claim bonus",
                    "image": "https://example.com/binance.png"
                }))
            }),
        )
        .route(
            "/sponsor",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fake upstream");
    let addr = listener.local_addr().expect("fake upstream addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("fake upstream");
    });

    format!("http://{}", addr)
}

async fn simple_price(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let ids = params.get("ids").cloned().unwrap_or_default();
    assert_eq!(params.get("vs_currencies").map(String::as_str), Some("usd"));
    assert_eq!(params.get("include_24hr_change").map(String::as_str), Some("true"));

    let mut body = serde_json::Map::new();
    for id in ids.split(',') {
        match id {
            "bitcoin" => {
                body.insert(id.to_string(), json!({"usd": 67000.5, "usd_24h_change": 6.2}));
            }
            "ethereum" => {
                body.insert(id.to_string(), json!({"usd": 3500.25, "usd_24h_change": -0.8}));
            }
            _ => {}
        }
    }
    Json(Value::Object(body))
}

pub struct TestOptions {
    pub price_base_url: String,
    pub ad_url: Option<String>,
    pub sponsor_url: Option<String>,
    pub fallback: bool,
}

impl TestOptions {
    pub fn prices_at(price_base_url: String) -> Self {
        Self {
            price_base_url,
            ad_url: None,
            sponsor_url: None,
            fallback: true,
        }
    }
}

pub fn build_state(options: TestOptions) -> AppState {
    let timeout = Duration::from_secs(2);
    let coingecko = CoinGeckoService::new(None, options.price_base_url, timeout)
        .expect("coingecko client");

    let mut ticker_config = TickerConfig::default();
    if !options.fallback {
        ticker_config.fallback = None;
    }

    AppState {
        price_feed: PriceFeed::new(Arc::new(coingecko), ticker_config),
        ticker: Arc::new(TickerRenderer::new(
            TickerStyleConfig::default(),
            Duration::from_secs(30),
        )),
        bonus: Arc::new(BonusConfig::default()),
        sidebar: SidebarService::new(options.ad_url, options.sponsor_url, timeout)
            .expect("sidebar client"),
    }
}

pub fn build_router(state: AppState) -> Router {
    api_router(state)
}

pub async fn send(app: &Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body).into_owned()))
    };

    (status, json)
}

pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, "GET", uri).await
}
