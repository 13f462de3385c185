//! Backend liveness probe (`GET /api/health`)

use tracing::instrument;

use crate::api::{HEALTH_PATH, HealthResponse};

use super::{FetchError, FetchResult, join_url, read_json, status_error};

#[derive(Debug, Clone)]
pub struct HealthClient {
    client: reqwest::Client,
    url: String,
}

impl HealthClient {
    pub fn new(client: reqwest::Client, api_url: &str) -> Self {
        Self {
            client,
            url: join_url(api_url, HEALTH_PATH),
        }
    }

    /// Returns `true` when the backend reports `UP`.
    #[instrument(skip(self))]
    pub async fn check(&self) -> FetchResult<bool> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(FetchError::Transport)?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        let body: HealthResponse = read_json(response).await?;
        Ok(body.status.as_deref() == Some("UP"))
    }
}
