//! Client for aggregate usage counters (`GET /api/stats`)

use tracing::{instrument, trace};

use crate::api::{STATS_PATH, StatsResponse};
use crate::state::StatsSnapshot;

use super::{FetchError, FetchResult, join_url, read_json, status_error};

#[derive(Debug, Clone)]
pub struct StatsClient {
    client: reqwest::Client,
    url: String,
}

impl StatsClient {
    pub fn new(client: reqwest::Client, api_url: &str) -> Self {
        Self {
            client,
            url: join_url(api_url, STATS_PATH),
        }
    }

    /// Fetch the counters; fields missing from the body count as 0.
    #[instrument(skip(self))]
    pub async fn fetch_stats(&self) -> FetchResult<StatsSnapshot> {
        trace!("requesting stats from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(FetchError::Transport)?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        let body: StatsResponse = read_json(response).await?;
        Ok(body.into())
    }
}
