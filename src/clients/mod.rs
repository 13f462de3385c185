//! HTTP clients for the backend and the market-data source
//!
//! Every client returns a [`FetchResult`] instead of touching the dashboard
//! directly; the refresh actor decides what a result means for the state.
//!
//! ## Failure kinds
//!
//! - [`FetchError::Transport`]: the request never completed
//! - [`FetchError::Status`]: non-success HTTP status, with the server's `error` text if any
//! - [`FetchError::Malformed`]: the body could not be read or parsed
//!
//! A well-formed body that lacks an expected value is not an error for the fee
//! client (see [`fee::FeeReading::Absent`]).

pub mod alert;
pub mod asset;
pub mod fee;
pub mod health;
pub mod stats;

use std::time::Duration;

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::api::ErrorResponse;

pub use alert::{AlertClient, SubmitOutcome};
pub use asset::AssetPriceClient;
pub use fee::{FeeReading, PriceFeedClient};
pub use health::HealthClient;
pub use stats::StatsClient;

/// Result type for all client fetches
pub type FetchResult<T> = Result<T, FetchError>;

/// Why a fetch produced no usable value
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("HTTP error: {status}{}", server_message(.message))]
    Status {
        status: StatusCode,
        message: Option<String>,
    },

    #[error("malformed response: {0}")]
    Malformed(String),
}

fn server_message(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(" ({m})"))
        .unwrap_or_default()
}

impl FetchError {
    pub fn is_status(&self) -> bool {
        matches!(self, FetchError::Status { .. })
    }
}

/// Build the HTTP client shared by all dashboard clients.
///
/// Without a timeout a hanging request simply completes late.
pub fn build_http_client(timeout: Option<Duration>) -> reqwest::Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder();

    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }

    builder.build()
}

pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Read a successful response body as JSON.
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> FetchResult<T> {
    let body = response
        .text()
        .await
        .map_err(|e| FetchError::Malformed(format!("failed to read body: {e}")))?;

    serde_json::from_str(&body).map_err(|e| FetchError::Malformed(e.to_string()))
}

/// Turn a non-success response into [`FetchError::Status`], keeping the
/// server's `error` text when the body carries one.
pub(crate) async fn status_error(response: Response) -> FetchError {
    let status = response.status();
    let message = response
        .text()
        .await
        .ok()
        .and_then(|body| serde_json::from_str::<ErrorResponse>(&body).ok())
        .and_then(|body| body.error);

    FetchError::Status { status, message }
}
