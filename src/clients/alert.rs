//! Client for alert registration (`POST /api/alert`)

use thiserror::Error;
use tracing::{error, info, instrument, warn};

use crate::api::{ALERT_PATH, AlertRequest, AlertResponse, ErrorResponse};

use super::join_url;

/// Shown when the server rejects an alert without saying why
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to create alert";

/// Shown when the request never reached the server or the reply was unreadable
pub const CONNECTION_ERROR_MESSAGE: &str = "Connection error. Please try again.";

/// Shown when the server accepts an alert without a message
pub const GENERIC_SUCCESS_MESSAGE: &str = "Alert created";

/// Why an alert was not created; `Display` is the text shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// The server answered with a failure status
    #[error("{0}")]
    Rejected(String),

    #[error("{}", CONNECTION_ERROR_MESSAGE)]
    Connection,
}

/// Result of one submission: the server's success message or the failure
pub type SubmitOutcome = Result<String, SubmitError>;

#[derive(Debug, Clone)]
pub struct AlertClient {
    client: reqwest::Client,
    url: String,
}

impl AlertClient {
    pub fn new(client: reqwest::Client, api_url: &str) -> Self {
        Self {
            client,
            url: join_url(api_url, ALERT_PATH),
        }
    }

    /// Post one registration. Never retries; every failure is folded into
    /// [`SubmitError`].
    #[instrument(skip(self), fields(user = %request.telegram_username))]
    pub async fn submit(&self, request: &AlertRequest) -> SubmitOutcome {
        let response = match self.client.post(&self.url).json(request).send().await {
            Ok(response) => response,
            Err(e) => {
                error!("failed to send alert request: {e}");
                return Err(SubmitError::Connection);
            }
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                error!("failed to read alert response: {e}");
                return Err(SubmitError::Connection);
            }
        };

        if status.is_success() {
            let Ok(created) = serde_json::from_str::<AlertResponse>(&body) else {
                error!("unparsable alert response: {body}");
                return Err(SubmitError::Connection);
            };

            info!("alert registered with max gas price {}", request.max_gas_price);
            return Ok(created
                .message
                .unwrap_or_else(|| GENERIC_SUCCESS_MESSAGE.to_string()));
        }

        let Ok(failure) = serde_json::from_str::<ErrorResponse>(&body) else {
            error!("unparsable alert error response ({status}): {body}");
            return Err(SubmitError::Connection);
        };

        warn!("alert rejected ({status}): {:?}", failure.error);
        Err(SubmitError::Rejected(
            failure
                .error
                .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string()),
        ))
    }
}
