//! Message types for the refresh actor
//!
//! Commands arrive from handles over an mpsc channel. Fetches run as their own
//! tasks and report back as [`Completion`]s, so the actor is the only place
//! that mutates the dashboard.

use std::time::Duration;

use tokio::sync::oneshot;

use crate::clients::{FeeReading, FetchResult};
use crate::state::{AssetPrice, Dashboard, StatsSnapshot};

/// Commands that can be sent to the RefreshActor
#[derive(Debug)]
pub enum RefreshCommand {
    /// Fetch the fee now, outside the regular cycle
    RefreshFee,

    /// Fetch the stats now, outside the regular cycle
    RefreshStats,

    /// Fetch the asset price now, outside the regular cycle
    RefreshAssetPrice,

    /// Fetch the stats once after `delay`
    ///
    /// Used after an alert was created so the counters include it.
    RefreshStatsAfter { delay: Duration },

    /// Get a copy of the current dashboard
    GetSnapshot {
        respond_to: oneshot::Sender<Dashboard>,
    },

    /// Stop the actor. Fetches already in flight are dropped on completion.
    Shutdown,
}

/// Why a fee fetch was issued
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeeOrigin {
    /// Regular interval tick or an explicit refresh
    Scheduled,
    /// The one-shot retry after a response without a fee
    Retry,
}

/// Results reported back to the actor by spawned tasks
#[derive(Debug)]
pub(crate) enum Completion {
    Fee {
        seq: u64,
        origin: FeeOrigin,
        result: FetchResult<FeeReading>,
    },
    Stats {
        seq: u64,
        result: FetchResult<StatsSnapshot>,
    },
    AssetPrice {
        seq: u64,
        result: FetchResult<AssetPrice>,
    },
    /// The delay of the one-shot fee retry has elapsed
    FeeRetryDue,
    /// The delay of a requested stats refresh has elapsed
    StatsRefreshDue,
}
