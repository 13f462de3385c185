//! HTTP contract of the gas tracker backend
//!
//! ## Endpoints consumed
//!
//! - `GET /api/gas-price` - Current fee in Gwei
//! - `GET /api/stats` - Subscriber and alert counters
//! - `POST /api/alert` - Register a threshold alert
//! - `GET /api/health` - Backend liveness
//!
//! Plus the third-party `simple/price` market-data endpoint for the asset price.

pub mod types;

pub use types::{
    AlertRequest, AlertResponse, ErrorResponse, GasPriceResponse, HealthResponse,
    SimplePriceResponse, StatsResponse, UsdQuote,
};

/// Path of the fee endpoint
pub const GAS_PRICE_PATH: &str = "/api/gas-price";

/// Path of the statistics endpoint
pub const STATS_PATH: &str = "/api/stats";

/// Path of the alert registration endpoint
pub const ALERT_PATH: &str = "/api/alert";

/// Path of the health endpoint
pub const HEALTH_PATH: &str = "/api/health";
