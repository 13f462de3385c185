//! Dashboard state and its update/notify contract
//!
//! All live data lives in one [`Dashboard`] value owned by a [`DashboardStore`].
//! Every mutation goes through [`DashboardStore::update`], which re-derives the
//! operation costs and the fee status and then publishes the new value to every
//! subscriber through a `watch` channel.

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::trace;

use crate::api::StatsResponse;
use crate::fees::{FeeStatus, OperationCost, calculate_costs};

/// Asset price used before the first successful market-data read
pub const DEFAULT_ASSET_PRICE: f64 = 3000.0;

/// Last known fee reading
///
/// Only a successful fetch with a present value replaces `fee`; failures keep
/// the previous reading. `None` means nothing has been read since start.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeeSnapshot {
    pub fee: Option<f64>,
    pub last_updated: Option<DateTime<Utc>>,
}

/// Transient indicator shown in place of (not instead of storing) the fee
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FeeIndicator {
    /// Nothing fetched yet
    #[default]
    Pending,
    /// Showing the stored value
    Live,
    /// Backend answered without a fee, a retry is underway
    Loading,
    /// Backend answered with a non-success status
    Unavailable,
    /// Request failed or the body was unreadable
    ConnectionError,
}

impl FeeIndicator {
    pub fn label(&self) -> &'static str {
        match self {
            FeeIndicator::Pending | FeeIndicator::Loading => "Loading...",
            FeeIndicator::Live => "Live",
            FeeIndicator::Unavailable => "Unavailable",
            FeeIndicator::ConnectionError => "Connection error",
        }
    }
}

/// Reference price of the native coin in USD; always positive and finite
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct AssetPrice(f64);

impl AssetPrice {
    /// Returns `None` for zero, negative, NaN or infinite prices.
    pub fn new(usd: f64) -> Option<Self> {
        (usd.is_finite() && usd > 0.0).then_some(Self(usd))
    }

    pub fn usd(&self) -> f64 {
        self.0
    }
}

impl Default for AssetPrice {
    fn default() -> Self {
        Self(DEFAULT_ASSET_PRICE)
    }
}

/// Aggregate usage counters from the backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub active_users: u64,
    pub total_alerts24h: u64,
    pub successful_alerts24h: u64,
}

impl StatsSnapshot {
    /// Percentage of successful alerts in the last 24h, rounded to a whole
    /// number; 0 when no alerts were sent.
    pub fn success_rate(&self) -> u64 {
        if self.total_alerts24h == 0 {
            return 0;
        }

        (self.successful_alerts24h as f64 / self.total_alerts24h as f64 * 100.0).round() as u64
    }
}

impl From<StatsResponse> for StatsSnapshot {
    fn from(response: StatsResponse) -> Self {
        Self {
            active_users: response.active_users.unwrap_or(0),
            total_alerts24h: response.total_alerts24h.unwrap_or(0),
            successful_alerts24h: response.successful_alerts24h.unwrap_or(0),
        }
    }
}

/// Everything the display surface shows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dashboard {
    pub fee: FeeSnapshot,
    pub fee_indicator: FeeIndicator,
    pub asset_price: AssetPrice,
    /// When the asset price was last read live; `None` while on the bootstrap value
    pub asset_price_updated: Option<DateTime<Utc>>,
    pub stats: StatsSnapshot,
    pub stats_updated: Option<DateTime<Utc>>,
    /// Derived from `fee` and `asset_price`; `None` until a fee is known
    pub costs: Option<Vec<OperationCost>>,
    /// Derived from `fee`; `None` until a fee is known
    pub status: Option<FeeStatus>,
}

impl Dashboard {
    /// Dashboard with a custom bootstrap asset price
    pub fn with_asset_price(asset_price: AssetPrice) -> Self {
        Self {
            asset_price,
            ..Self::default()
        }
    }

    /// Store a present fee reading
    pub fn apply_fee(&mut self, fee: f64) {
        self.fee = FeeSnapshot {
            fee: Some(fee),
            last_updated: Some(Utc::now()),
        };
        self.fee_indicator = FeeIndicator::Live;
    }

    /// Show a transient indicator, keeping the stored fee
    pub fn mark_fee(&mut self, indicator: FeeIndicator) {
        self.fee_indicator = indicator;
    }

    pub fn apply_asset_price(&mut self, price: AssetPrice) {
        self.asset_price = price;
        self.asset_price_updated = Some(Utc::now());
    }

    pub fn apply_stats(&mut self, stats: StatsSnapshot) {
        self.stats = stats;
        self.stats_updated = Some(Utc::now());
    }

    /// Re-derive costs and status. A no-op while no fee has been read.
    fn recompute(&mut self) {
        let Some(fee) = self.fee.fee else {
            return;
        };

        self.costs = calculate_costs(Some(fee), self.asset_price.usd());
        self.status = Some(FeeStatus::classify(fee));
    }
}

/// Owner of the [`Dashboard`] that notifies subscribers on every update
pub struct DashboardStore {
    dashboard: Dashboard,
    notifier: watch::Sender<Dashboard>,
}

impl DashboardStore {
    pub fn new(dashboard: Dashboard) -> Self {
        let (notifier, _) = watch::channel(dashboard.clone());
        Self {
            dashboard,
            notifier,
        }
    }

    /// Apply a mutation, re-derive dependent values and publish the result.
    ///
    /// Mutation, derivation and publication happen in one call, so no
    /// subscriber ever sees a fee without its matching costs.
    pub fn update<F>(&mut self, mutate: F)
    where
        F: FnOnce(&mut Dashboard),
    {
        mutate(&mut self.dashboard);
        self.dashboard.recompute();

        // send_replace never fails, even without receivers
        self.notifier.send_replace(self.dashboard.clone());
        trace!("published dashboard update");
    }

    pub fn subscribe(&self) -> watch::Receiver<Dashboard> {
        self.notifier.subscribe()
    }

    pub fn current(&self) -> &Dashboard {
        &self.dashboard
    }
}
