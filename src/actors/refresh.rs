//! RefreshActor - Drives the fee, stats and asset-price polls
//!
//! ## Message Flow
//!
//! ```text
//! fee tick (30s)    ─┐
//! stats tick (30s)  ─┼─> spawn fetch task ──> Completion ──> DashboardStore::update ──> watch subscribers
//! asset tick (300s) ─┘                            ↑
//!     ↑                                           └── one-shot fee retry (5s), delayed stats refresh
//!     └─── Commands (RefreshFee, RefreshStatsAfter, GetSnapshot, Shutdown)
//! ```
//!
//! Each timer fires once immediately and then on its own period. Fetches run
//! in their own tasks, so a slow request never delays another timer; their
//! results are applied one at a time by the actor.
//!
//! Every fetch carries a per-kind sequence number. A result older than one
//! already applied is dropped, so a slow request can not overwrite newer data.

use std::time::Duration;

use anyhow::{Context, Result};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, error, instrument, trace, warn};

use crate::clients::{AssetPriceClient, FeeReading, PriceFeedClient, StatsClient};
use crate::config::Config;
use crate::state::{Dashboard, DashboardStore, FeeIndicator};

use super::messages::{Completion, FeeOrigin, RefreshCommand};

/// Poll periods and retry delays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshSettings {
    pub fee_interval: Duration,
    pub stats_interval: Duration,
    pub asset_price_interval: Duration,
    /// Delay of the one-shot retry after a response without a fee
    pub fee_retry_delay: Duration,
}

impl Default for RefreshSettings {
    fn default() -> Self {
        Self {
            fee_interval: Duration::from_secs(30),
            stats_interval: Duration::from_secs(30),
            asset_price_interval: Duration::from_secs(300),
            fee_retry_delay: Duration::from_secs(5),
        }
    }
}

/// The three clients polled by the actor
#[derive(Debug, Clone)]
pub struct RefreshClients {
    pub fee: PriceFeedClient,
    pub stats: StatsClient,
    pub asset_price: AssetPriceClient,
}

impl RefreshClients {
    pub fn from_config(http: reqwest::Client, config: &Config) -> Self {
        Self {
            fee: PriceFeedClient::new(http.clone(), &config.api_url),
            stats: StatsClient::new(http.clone(), &config.api_url),
            asset_price: AssetPriceClient::new(http, &config.market_data_url, &config.asset_id),
        }
    }
}

/// Issued and applied sequence numbers for one fetch kind
#[derive(Debug, Default)]
struct Sequence {
    issued: u64,
    applied: u64,
}

impl Sequence {
    fn issue(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    /// Accept a result unless a newer one was already applied.
    fn accept(&mut self, seq: u64) -> bool {
        if seq <= self.applied {
            return false;
        }
        self.applied = seq;
        true
    }
}

/// Actor owning the dashboard state
pub struct RefreshActor {
    clients: RefreshClients,
    settings: RefreshSettings,
    store: DashboardStore,
    command_rx: mpsc::Receiver<RefreshCommand>,
    completion_tx: mpsc::UnboundedSender<Completion>,
    completion_rx: mpsc::UnboundedReceiver<Completion>,
    fee_seq: Sequence,
    stats_seq: Sequence,
    asset_price_seq: Sequence,
    /// Armed from a null fee until the retry fetch completes
    fee_retry_outstanding: bool,
}

impl RefreshActor {
    pub fn new(
        clients: RefreshClients,
        settings: RefreshSettings,
        store: DashboardStore,
        command_rx: mpsc::Receiver<RefreshCommand>,
    ) -> Self {
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();

        Self {
            clients,
            settings,
            store,
            command_rx,
            completion_tx,
            completion_rx,
            fee_seq: Sequence::default(),
            stats_seq: Sequence::default(),
            asset_price_seq: Sequence::default(),
            fee_retry_outstanding: false,
        }
    }

    /// Run until a Shutdown command arrives or every handle is dropped.
    #[instrument(skip(self))]
    pub async fn run(mut self) {
        debug!("starting refresh actor");

        // the first tick of each interval completes immediately
        let mut fee_ticker = interval(self.settings.fee_interval);
        let mut stats_ticker = interval(self.settings.stats_interval);
        let mut asset_price_ticker = interval(self.settings.asset_price_interval);
        for ticker in [&mut fee_ticker, &mut stats_ticker, &mut asset_price_ticker] {
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        }

        loop {
            tokio::select! {
                _ = fee_ticker.tick() => self.spawn_fee_fetch(FeeOrigin::Scheduled),

                _ = stats_ticker.tick() => self.spawn_stats_fetch(),

                _ = asset_price_ticker.tick() => self.spawn_asset_price_fetch(),

                Some(completion) = self.completion_rx.recv() => self.handle_completion(completion),

                cmd = self.command_rx.recv() => match cmd {
                    Some(RefreshCommand::RefreshFee) => self.spawn_fee_fetch(FeeOrigin::Scheduled),
                    Some(RefreshCommand::RefreshStats) => self.spawn_stats_fetch(),
                    Some(RefreshCommand::RefreshAssetPrice) => self.spawn_asset_price_fetch(),
                    Some(RefreshCommand::RefreshStatsAfter { delay }) => {
                        debug!("stats refresh requested in {delay:?}");
                        self.spawn_delayed(delay, Completion::StatsRefreshDue);
                    }
                    Some(RefreshCommand::GetSnapshot { respond_to }) => {
                        let _ = respond_to.send(self.store.current().clone());
                    }
                    Some(RefreshCommand::Shutdown) => {
                        debug!("received shutdown command");
                        break;
                    }
                    None => {
                        warn!("command channel closed, shutting down");
                        break;
                    }
                },
            }
        }

        debug!("refresh actor stopped");
    }

    fn spawn_fee_fetch(&mut self, origin: FeeOrigin) {
        let seq = self.fee_seq.issue();
        let client = self.clients.fee.clone();
        let tx = self.completion_tx.clone();
        trace!("fee fetch #{seq} ({origin:?})");

        tokio::spawn(async move {
            let result = client.fetch_fee().await;
            let _ = tx.send(Completion::Fee {
                seq,
                origin,
                result,
            });
        });
    }

    fn spawn_stats_fetch(&mut self) {
        let seq = self.stats_seq.issue();
        let client = self.clients.stats.clone();
        let tx = self.completion_tx.clone();
        trace!("stats fetch #{seq}");

        tokio::spawn(async move {
            let result = client.fetch_stats().await;
            let _ = tx.send(Completion::Stats { seq, result });
        });
    }

    fn spawn_asset_price_fetch(&mut self) {
        let seq = self.asset_price_seq.issue();
        let client = self.clients.asset_price.clone();
        let tx = self.completion_tx.clone();
        trace!("asset price fetch #{seq}");

        tokio::spawn(async move {
            let result = client.fetch_asset_price().await;
            let _ = tx.send(Completion::AssetPrice { seq, result });
        });
    }

    fn spawn_delayed(&self, delay: Duration, completion: Completion) {
        let tx = self.completion_tx.clone();

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(completion);
        });
    }

    fn handle_completion(&mut self, completion: Completion) {
        match completion {
            Completion::Fee {
                seq,
                origin,
                result,
            } => {
                if origin == FeeOrigin::Retry {
                    self.fee_retry_outstanding = false;
                }

                if !self.fee_seq.accept(seq) {
                    debug!("dropping stale fee result #{seq}");
                    return;
                }

                match result {
                    Ok(FeeReading::Present(fee)) => {
                        trace!("fee updated to {fee}");
                        self.store.update(|d| d.apply_fee(fee));
                    }
                    Ok(FeeReading::Absent) => {
                        warn!("fee missing from response");
                        self.store.update(|d| d.mark_fee(FeeIndicator::Loading));

                        // only a regular poll arms the retry, and only once
                        if origin == FeeOrigin::Scheduled && !self.fee_retry_outstanding {
                            debug!("retrying fee in {:?}", self.settings.fee_retry_delay);
                            self.fee_retry_outstanding = true;
                            self.spawn_delayed(self.settings.fee_retry_delay, Completion::FeeRetryDue);
                        }
                    }
                    Err(e) => {
                        error!("failed to fetch fee: {e}");
                        let indicator = if e.is_status() {
                            FeeIndicator::Unavailable
                        } else {
                            FeeIndicator::ConnectionError
                        };
                        self.store.update(|d| d.mark_fee(indicator));
                    }
                }
            }

            Completion::Stats { seq, result } => {
                if !self.stats_seq.accept(seq) {
                    debug!("dropping stale stats result #{seq}");
                    return;
                }

                match result {
                    Ok(stats) => self.store.update(|d| d.apply_stats(stats)),
                    Err(e) => error!("failed to fetch stats: {e}"),
                }
            }

            Completion::AssetPrice { seq, result } => {
                if !self.asset_price_seq.accept(seq) {
                    debug!("dropping stale asset price result #{seq}");
                    return;
                }

                match result {
                    Ok(price) => self.store.update(|d| d.apply_asset_price(price)),
                    Err(e) => error!("failed to fetch asset price, keeping previous: {e}"),
                }
            }

            Completion::FeeRetryDue => self.spawn_fee_fetch(FeeOrigin::Retry),

            Completion::StatsRefreshDue => self.spawn_stats_fetch(),
        }
    }
}

/// Handle for controlling a RefreshActor
///
/// Cheap to clone; the actor stops when Shutdown is sent or the last handle is dropped.
#[derive(Clone)]
pub struct RefreshHandle {
    sender: mpsc::Sender<RefreshCommand>,
    dashboard: watch::Receiver<Dashboard>,
}

impl RefreshHandle {
    /// Spawn the actor starting from `initial`; all three polls fire immediately.
    pub fn spawn(clients: RefreshClients, settings: RefreshSettings, initial: Dashboard) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel(32);

        let store = DashboardStore::new(initial);
        let dashboard = store.subscribe();

        let actor = RefreshActor::new(clients, settings, store, cmd_rx);
        tokio::spawn(actor.run());

        Self {
            sender: cmd_tx,
            dashboard,
        }
    }

    /// Receiver that sees every dashboard update
    pub fn subscribe(&self) -> watch::Receiver<Dashboard> {
        self.dashboard.clone()
    }

    pub async fn snapshot(&self) -> Result<Dashboard> {
        let (tx, rx) = oneshot::channel();
        self.send(RefreshCommand::GetSnapshot { respond_to: tx })
            .await?;

        rx.await.context("failed to receive snapshot")
    }

    pub async fn refresh_fee_now(&self) -> Result<()> {
        self.send(RefreshCommand::RefreshFee).await
    }

    pub async fn refresh_stats_now(&self) -> Result<()> {
        self.send(RefreshCommand::RefreshStats).await
    }

    pub async fn refresh_asset_price_now(&self) -> Result<()> {
        self.send(RefreshCommand::RefreshAssetPrice).await
    }

    pub async fn refresh_stats_after(&self, delay: Duration) -> Result<()> {
        self.send(RefreshCommand::RefreshStatsAfter { delay }).await
    }

    pub async fn shutdown(&self) -> Result<()> {
        self.send(RefreshCommand::Shutdown).await
    }

    async fn send(&self, command: RefreshCommand) -> Result<()> {
        self.sender
            .send(command)
            .await
            .context("refresh actor is not running")
    }
}
