//! Helper functions for integration tests

use std::time::Duration;

use gastrack::actors::{RefreshClients, RefreshHandle, RefreshSettings};
use gastrack::clients::build_http_client;
use gastrack::config::Config;
use gastrack::state::Dashboard;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const PRICE_PATH: &str = "/api/v3/simple/price";

/// Config pointing both the backend and the market data at one mock server
pub fn create_test_config(server: &MockServer) -> Config {
    Config {
        api_url: server.uri(),
        market_data_url: format!("{}{}", server.uri(), PRICE_PATH),
        ..Config::default()
    }
}

pub fn create_test_clients(server: &MockServer) -> RefreshClients {
    let http = build_http_client(None).unwrap();
    RefreshClients::from_config(http, &create_test_config(server))
}

/// Regular cycles far beyond any test's duration; only the immediate ticks fire
pub fn quiet_settings(fee_retry_delay: Duration) -> RefreshSettings {
    RefreshSettings {
        fee_interval: Duration::from_secs(3600),
        stats_interval: Duration::from_secs(3600),
        asset_price_interval: Duration::from_secs(3600),
        fee_retry_delay,
    }
}

pub fn spawn_refresh(server: &MockServer, settings: RefreshSettings) -> RefreshHandle {
    RefreshHandle::spawn(create_test_clients(server), settings, Dashboard::default())
}

/// Number of requests the mock server received on `request_path`
pub async fn request_count(server: &MockServer, request_path: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|request| request.url.path() == request_path)
        .count()
}

/// Wait until `request_path` has been requested at least `count` times
pub async fn wait_for_requests(server: &MockServer, request_path: &str, count: usize) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while request_count(server, request_path).await < count {
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    })
    .await
    .unwrap_or_else(|_| panic!("expected {count} requests on {request_path}"));
}

pub async fn mount_fee(server: &MockServer, gas_price: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/api/gas-price"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"gasPrice": gas_price, "unit": "Gwei"})),
        )
        .mount(server)
        .await;
}

pub async fn mount_stats(server: &MockServer, active: u64, total: u64, successful: u64) {
    Mock::given(method("GET"))
        .and(path("/api/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "activeUsers": active,
            "totalAlerts24h": total,
            "successfulAlerts24h": successful
        })))
        .mount(server)
        .await;
}

pub async fn mount_asset_price(server: &MockServer, usd: f64) {
    Mock::given(method("GET"))
        .and(path(PRICE_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"ethereum": {"usd": usd}})),
        )
        .mount(server)
        .await;
}
