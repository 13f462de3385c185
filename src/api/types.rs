//! Wire types for the gas tracker backend and the market-data source
//!
//! These mirror the JSON payloads exactly. Every response field the dashboard
//! reads is optional here; deciding what a missing field means is up to the
//! consuming client, not the deserializer.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// `GET /api/gas-price`
///
/// The backend also sends `unit` and `timestamp`, which the dashboard ignores.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GasPriceResponse {
    /// Current fee in Gwei; `null` while the backend has no reading yet
    #[serde(default)]
    pub gas_price: Option<f64>,
}

/// `GET /api/stats`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    #[serde(default)]
    pub active_users: Option<u64>,
    #[serde(default)]
    pub total_alerts24h: Option<u64>,
    #[serde(default)]
    pub successful_alerts24h: Option<u64>,
}

/// `POST /api/alert` request body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AlertRequest {
    pub max_gas_price: u32,
    pub telegram_username: String,
}

/// `POST /api/alert` success body
///
/// The backend echoes the normalized username and threshold next to the
/// message; only the message is shown to the user.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AlertResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub telegram_username: Option<String>,
    #[serde(default)]
    pub max_gas_price: Option<u32>,
}

/// Error body returned by every backend endpoint on failure
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    #[serde(default)]
    pub error: Option<String>,
}

/// `GET /api/health`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    #[serde(default)]
    pub status: Option<String>,
}

/// One entry of the market-data `simple/price` response
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UsdQuote {
    #[serde(default)]
    pub usd: Option<f64>,
}

/// Market-data `simple/price` response, keyed by asset id (`{"ethereum": {"usd": 3500.0}}`)
pub type SimplePriceResponse = HashMap<String, UsdQuote>;
