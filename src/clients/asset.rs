//! Client for the reference asset price from the market-data source

use tracing::{instrument, trace};

use crate::api::SimplePriceResponse;
use crate::state::AssetPrice;

use super::{FetchError, FetchResult, read_json, status_error};

/// Fetches the USD price of one asset from a `simple/price` style endpoint
#[derive(Debug, Clone)]
pub struct AssetPriceClient {
    client: reqwest::Client,
    url: String,
    asset_id: String,
}

impl AssetPriceClient {
    /// `market_data_url` is the full `simple/price` endpoint; the asset and
    /// currency are added as query parameters.
    pub fn new(client: reqwest::Client, market_data_url: &str, asset_id: &str) -> Self {
        Self {
            client,
            url: market_data_url.to_string(),
            asset_id: asset_id.to_string(),
        }
    }

    /// Any payload without a positive finite `<asset>.usd` is malformed.
    #[instrument(skip(self), fields(asset = %self.asset_id))]
    pub async fn fetch_asset_price(&self) -> FetchResult<AssetPrice> {
        trace!("requesting asset price from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .query(&[("ids", self.asset_id.as_str()), ("vs_currencies", "usd")])
            .send()
            .await
            .map_err(FetchError::Transport)?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        let body: SimplePriceResponse = read_json(response).await?;

        let usd = body
            .get(&self.asset_id)
            .and_then(|quote| quote.usd)
            .ok_or_else(|| FetchError::Malformed(format!("no usd price for {}", self.asset_id)))?;

        AssetPrice::new(usd)
            .ok_or_else(|| FetchError::Malformed(format!("invalid usd price {usd}")))
    }
}
