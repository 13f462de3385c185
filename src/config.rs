//! Configuration for the dashboard

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::actors::RefreshSettings;
use crate::state::{AssetPrice, DEFAULT_ASSET_PRICE};

/// Dashboard configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Backend origin serving `/api/*` (default: http://localhost:8080)
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Market-data `simple/price` endpoint
    #[serde(default = "default_market_data_url")]
    pub market_data_url: String,

    /// Market-data id of the native coin (default: ethereum)
    #[serde(default = "default_asset_id")]
    pub asset_id: String,

    /// Username of the notification bot, shown without the marker
    #[serde(default = "default_bot_username")]
    pub bot_username: String,

    /// Fee poll period in seconds (default: 30)
    #[serde(default = "default_fee_interval")]
    pub fee_interval_secs: u64,

    /// Stats poll period in seconds (default: 30)
    #[serde(default = "default_stats_interval")]
    pub stats_interval_secs: u64,

    /// Asset price poll period in seconds (default: 300 = 5 minutes)
    #[serde(default = "default_asset_interval")]
    pub asset_interval_secs: u64,

    /// Delay of the one-shot retry after a response without a fee (default: 5)
    #[serde(default = "default_fee_retry")]
    pub fee_retry_secs: u64,

    /// Delay of the stats refresh after an alert was created (default: 1000)
    #[serde(default = "default_stats_refresh_delay")]
    pub stats_refresh_delay_ms: u64,

    /// Asset price used until the first market-data read (default: 3000)
    #[serde(default = "default_asset_price")]
    pub default_asset_price: f64,

    /// Per-request timeout in seconds; requests never time out when unset
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// Enable debug logging (default: false)
    #[serde(default)]
    pub debug: bool,
}

fn default_api_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_market_data_url() -> String {
    "https://api.coingecko.com/api/v3/simple/price".to_string()
}

fn default_asset_id() -> String {
    "ethereum".to_string()
}

fn default_bot_username() -> String {
    "GasTrackerBot".to_string()
}

fn default_fee_interval() -> u64 {
    30
}

fn default_stats_interval() -> u64 {
    30
}

fn default_asset_interval() -> u64 {
    300
}

fn default_fee_retry() -> u64 {
    5
}

fn default_stats_refresh_delay() -> u64 {
    1000
}

fn default_asset_price() -> f64 {
    DEFAULT_ASSET_PRICE
}

impl Config {
    /// Load configuration from file, or use defaults if no file exists
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = path.map(|p| p.to_path_buf()).or_else(|| {
            let home = dirs::home_dir()?;
            let default_path = home.join(".config/gastrack/viewer.toml");
            default_path.exists().then_some(default_path)
        });

        let config = if let Some(path) = config_path {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;

            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        } else {
            Self::default()
        };

        config.validate()?;
        trace!("loaded config: {config:?}");
        Ok(config)
    }

    /// Reject values the refresh engine can not work with
    pub fn validate(&self) -> Result<()> {
        if self.fee_interval_secs == 0 || self.stats_interval_secs == 0 || self.asset_interval_secs == 0
        {
            bail!("poll intervals must be at least one second");
        }

        if AssetPrice::new(self.default_asset_price).is_none() {
            bail!(
                "default_asset_price must be a positive number, got {}",
                self.default_asset_price
            );
        }

        Ok(())
    }

    pub fn refresh_settings(&self) -> RefreshSettings {
        RefreshSettings {
            fee_interval: Duration::from_secs(self.fee_interval_secs),
            stats_interval: Duration::from_secs(self.stats_interval_secs),
            asset_price_interval: Duration::from_secs(self.asset_interval_secs),
            fee_retry_delay: Duration::from_secs(self.fee_retry_secs),
        }
    }

    pub fn stats_refresh_delay(&self) -> Duration {
        Duration::from_millis(self.stats_refresh_delay_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Bootstrap asset price; falls back to the built-in default when invalid
    pub fn bootstrap_asset_price(&self) -> AssetPrice {
        AssetPrice::new(self.default_asset_price).unwrap_or_default()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            market_data_url: default_market_data_url(),
            asset_id: default_asset_id(),
            bot_username: default_bot_username(),
            fee_interval_secs: default_fee_interval(),
            stats_interval_secs: default_stats_interval(),
            asset_interval_secs: default_asset_interval(),
            fee_retry_secs: default_fee_retry(),
            stats_refresh_delay_ms: default_stats_refresh_delay(),
            default_asset_price: default_asset_price(),
            request_timeout_secs: None,
            debug: false,
        }
    }
}
