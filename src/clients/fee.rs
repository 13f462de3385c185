//! Client for the current fee (`GET /api/gas-price`)

use tracing::{debug, instrument, trace};

use crate::api::{GAS_PRICE_PATH, GasPriceResponse};

use super::{FetchError, FetchResult, join_url, read_json, status_error};

/// Outcome of a successful fee request
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeeReading {
    Present(f64),
    /// Backend answered but has no reading yet (`gasPrice` null or missing)
    Absent,
}

/// Polls the backend for the current fee
#[derive(Debug, Clone)]
pub struct PriceFeedClient {
    client: reqwest::Client,
    url: String,
}

impl PriceFeedClient {
    pub fn new(client: reqwest::Client, api_url: &str) -> Self {
        Self {
            client,
            url: join_url(api_url, GAS_PRICE_PATH),
        }
    }

    #[instrument(skip(self))]
    pub async fn fetch_fee(&self) -> FetchResult<FeeReading> {
        trace!("requesting fee from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(FetchError::Transport)?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        let body: GasPriceResponse = read_json(response).await?;
        debug!("fee response: {body:?}");

        Ok(match body.gas_price {
            Some(fee) if fee.is_finite() => FeeReading::Present(fee),
            _ => FeeReading::Absent,
        })
    }
}
