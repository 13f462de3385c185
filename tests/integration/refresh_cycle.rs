//! Refresh actor tests against a mock backend
//!
//! These verify the polling contract end to end:
//! - All three polls fire immediately on start
//! - A null fee keeps the old value and triggers exactly one retry
//! - Each timer keeps firing on its own period
//! - Failures keep the last good fee and asset price
//! - A slow, superseded fee response does not overwrite a newer one

use std::time::Duration;

use gastrack::actors::RefreshSettings;
use gastrack::fees::{FeeStatus, Operation};
use gastrack::state::{Dashboard, FeeIndicator};
use tokio::sync::watch;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::helpers::*;

async fn wait_for_dashboard<F>(rx: &mut watch::Receiver<Dashboard>, condition: F) -> Dashboard
where
    F: FnMut(&Dashboard) -> bool,
{
    tokio::time::timeout(Duration::from_secs(5), rx.wait_for(condition))
        .await
        .expect("dashboard condition not reached in time")
        .expect("refresh actor stopped")
        .clone()
}

#[tokio::test]
async fn test_all_polls_fire_immediately() {
    let mock_server = MockServer::start().await;
    mount_fee(&mock_server, serde_json::json!(20)).await;
    mount_stats(&mock_server, 42, 10, 7).await;
    mount_asset_price(&mock_server, 3500.0).await;

    let handle = spawn_refresh(&mock_server, quiet_settings(Duration::from_secs(5)));
    let mut rx = handle.subscribe();

    let dashboard = wait_for_dashboard(&mut rx, |d| {
        d.fee.fee.is_some() && d.stats_updated.is_some() && d.asset_price_updated.is_some()
    })
    .await;

    assert_eq!(dashboard.fee.fee, Some(20.0));
    assert_eq!(dashboard.fee_indicator, FeeIndicator::Live);
    assert_eq!(dashboard.status, Some(FeeStatus::Moderate));
    assert_eq!(dashboard.stats.active_users, 42);
    assert_eq!(dashboard.stats.success_rate(), 70);
    assert_eq!(dashboard.asset_price.usd(), 3500.0);

    let transfer = dashboard
        .costs
        .unwrap()
        .into_iter()
        .find(|c| c.operation == Operation::Transfer)
        .unwrap();
    // 21000 * 20 / 1e9 * 3500
    assert!((transfer.cost_usd - 1.47).abs() < 1e-9);

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_null_fee_retries_exactly_once() {
    let mock_server = MockServer::start().await;
    mount_fee(&mock_server, serde_json::Value::Null).await;
    mount_stats(&mock_server, 0, 0, 0).await;
    mount_asset_price(&mock_server, 3000.0).await;

    let handle = spawn_refresh(&mock_server, quiet_settings(Duration::from_millis(200)));
    let mut rx = handle.subscribe();

    let dashboard =
        wait_for_dashboard(&mut rx, |d| d.fee_indicator == FeeIndicator::Loading).await;
    assert_eq!(dashboard.fee.fee, None);
    assert!(dashboard.costs.is_none());
    assert!(dashboard.status.is_none());

    // initial poll + one retry; the null retry does not arm another one
    wait_for_requests(&mock_server, "/api/gas-price", 2).await;
    tokio::time::sleep(Duration::from_millis(800)).await;
    assert_eq!(request_count(&mock_server, "/api/gas-price").await, 2);

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_null_fee_recovers_on_retry() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/gas-price"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"gasPrice": null})))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    mount_fee(&mock_server, serde_json::json!(12)).await;
    mount_stats(&mock_server, 0, 0, 0).await;
    mount_asset_price(&mock_server, 3000.0).await;

    let handle = spawn_refresh(&mock_server, quiet_settings(Duration::from_millis(200)));
    let mut rx = handle.subscribe();

    let dashboard = wait_for_dashboard(&mut rx, |d| d.fee.fee.is_some()).await;

    assert_eq!(dashboard.fee.fee, Some(12.0));
    assert_eq!(dashboard.status, Some(FeeStatus::Good));
    assert_eq!(dashboard.fee_indicator, FeeIndicator::Live);
    assert_eq!(request_count(&mock_server, "/api/gas-price").await, 2);

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_fee_failure_keeps_last_value() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/gas-price"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"gasPrice": 20})))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/gas-price"))
        .respond_with(
            ResponseTemplate::new(503).set_body_json(serde_json::json!({"error": "unavailable"})),
        )
        .mount(&mock_server)
        .await;
    mount_stats(&mock_server, 0, 0, 0).await;
    mount_asset_price(&mock_server, 3000.0).await;

    let handle = spawn_refresh(&mock_server, quiet_settings(Duration::from_secs(5)));
    let mut rx = handle.subscribe();

    wait_for_dashboard(&mut rx, |d| d.fee.fee == Some(20.0)).await;

    handle.refresh_fee_now().await.unwrap();
    let dashboard =
        wait_for_dashboard(&mut rx, |d| d.fee_indicator == FeeIndicator::Unavailable).await;

    assert_eq!(dashboard.fee.fee, Some(20.0));
    assert_eq!(dashboard.status, Some(FeeStatus::Moderate));
    assert!(dashboard.costs.is_some());

    // a failed status is not retried early
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(request_count(&mock_server, "/api/gas-price").await, 2);

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_asset_price_failure_keeps_last_good_price() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PRICE_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"ethereum": {"usd": 3500.0}})),
        )
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path(PRICE_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;
    mount_fee(&mock_server, serde_json::json!(20)).await;
    mount_stats(&mock_server, 0, 0, 0).await;

    let handle = spawn_refresh(&mock_server, quiet_settings(Duration::from_secs(5)));
    let mut rx = handle.subscribe();

    wait_for_dashboard(&mut rx, |d| {
        d.asset_price_updated.is_some() && d.fee.fee.is_some()
    })
    .await;

    handle.refresh_asset_price_now().await.unwrap();
    wait_for_requests(&mock_server, PRICE_PATH, 2).await;

    // a fee update after the failed read still prices with 3500
    let before = handle.snapshot().await.unwrap().fee.last_updated;
    handle.refresh_fee_now().await.unwrap();
    let dashboard = wait_for_dashboard(&mut rx, |d| d.fee.last_updated != before).await;

    assert_eq!(dashboard.asset_price.usd(), 3500.0);
    let transfer = dashboard.costs.unwrap()[0];
    assert!((transfer.cost_usd - 1.47).abs() < 1e-9);

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_asset_price_failure_at_start_keeps_bootstrap() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PRICE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;
    mount_fee(&mock_server, serde_json::json!(10)).await;
    mount_stats(&mock_server, 0, 0, 0).await;

    let handle = spawn_refresh(&mock_server, quiet_settings(Duration::from_secs(5)));
    let mut rx = handle.subscribe();

    let dashboard = wait_for_dashboard(&mut rx, |d| d.fee.fee.is_some()).await;
    wait_for_requests(&mock_server, PRICE_PATH, 1).await;

    assert_eq!(dashboard.asset_price.usd(), 3000.0);
    let snapshot = handle.snapshot().await.unwrap();
    assert!(snapshot.asset_price_updated.is_none());

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_superseded_fee_response_is_dropped() {
    let mock_server = MockServer::start().await;
    // first request answers slowly with an old value
    Mock::given(method("GET"))
        .and(path("/api/gas-price"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"gasPrice": 99}))
                .set_delay(Duration::from_millis(600)),
        )
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    mount_fee(&mock_server, serde_json::json!(10)).await;
    mount_stats(&mock_server, 0, 0, 0).await;
    mount_asset_price(&mock_server, 3000.0).await;

    let handle = spawn_refresh(&mock_server, quiet_settings(Duration::from_secs(5)));
    let mut rx = handle.subscribe();

    wait_for_requests(&mock_server, "/api/gas-price", 1).await;
    handle.refresh_fee_now().await.unwrap();

    wait_for_dashboard(&mut rx, |d| d.fee.fee == Some(10.0)).await;

    // give the slow response time to arrive
    tokio::time::sleep(Duration::from_millis(1000)).await;
    let dashboard = handle.snapshot().await.unwrap();

    assert_eq!(dashboard.fee.fee, Some(10.0));
    assert_eq!(dashboard.status, Some(FeeStatus::Good));

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_stats_failure_keeps_previous_counters() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "activeUsers": 5,
            "totalAlerts24h": 4,
            "successfulAlerts24h": 3
        })))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/stats"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;
    mount_fee(&mock_server, serde_json::json!(10)).await;
    mount_asset_price(&mock_server, 3000.0).await;

    let handle = spawn_refresh(&mock_server, quiet_settings(Duration::from_secs(5)));
    let mut rx = handle.subscribe();

    wait_for_dashboard(&mut rx, |d| d.stats_updated.is_some()).await;

    handle.refresh_stats_now().await.unwrap();
    wait_for_requests(&mock_server, "/api/stats", 2).await;
    tokio::time::sleep(Duration::from_millis(100)).await;

    let dashboard = handle.snapshot().await.unwrap();
    assert_eq!(dashboard.stats.active_users, 5);
    assert_eq!(dashboard.stats.success_rate(), 75);

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_timers_fire_on_independent_periods() {
    let mock_server = MockServer::start().await;
    mount_fee(&mock_server, serde_json::json!(20)).await;
    mount_stats(&mock_server, 0, 0, 0).await;
    mount_asset_price(&mock_server, 3000.0).await;

    let settings = RefreshSettings {
        fee_interval: Duration::from_millis(200),
        stats_interval: Duration::from_secs(3600),
        asset_price_interval: Duration::from_secs(2),
        fee_retry_delay: Duration::from_secs(5),
    };
    let handle = spawn_refresh(&mock_server, settings);

    // the fee timer keeps firing while the slower timers wait for their period
    wait_for_requests(&mock_server, "/api/gas-price", 4).await;
    assert_eq!(request_count(&mock_server, PRICE_PATH).await, 1);
    assert_eq!(request_count(&mock_server, "/api/stats").await, 1);

    wait_for_requests(&mock_server, PRICE_PATH, 2).await;
    assert!(request_count(&mock_server, "/api/gas-price").await >= 8);
    assert_eq!(request_count(&mock_server, "/api/stats").await, 1);

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_null_fee_keeps_previous_value() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/gas-price"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"gasPrice": 20})))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    mount_fee(&mock_server, serde_json::Value::Null).await;
    mount_stats(&mock_server, 0, 0, 0).await;
    mount_asset_price(&mock_server, 3500.0).await;

    let handle = spawn_refresh(&mock_server, quiet_settings(Duration::from_millis(200)));
    let mut rx = handle.subscribe();

    wait_for_dashboard(&mut rx, |d| {
        d.fee.fee == Some(20.0) && d.asset_price_updated.is_some()
    })
    .await;

    handle.refresh_fee_now().await.unwrap();
    wait_for_dashboard(&mut rx, |d| d.fee_indicator == FeeIndicator::Loading).await;

    // the retry answers null as well
    wait_for_requests(&mock_server, "/api/gas-price", 3).await;
    tokio::time::sleep(Duration::from_millis(100)).await;
    let dashboard = handle.snapshot().await.unwrap();

    assert_eq!(dashboard.fee.fee, Some(20.0));
    assert_eq!(dashboard.fee_indicator, FeeIndicator::Loading);
    assert_eq!(dashboard.status, Some(FeeStatus::Moderate));
    let transfer = dashboard.costs.unwrap()[0];
    assert!((transfer.cost_usd - 1.47).abs() < 1e-9);

    handle.shutdown().await.unwrap();
}
