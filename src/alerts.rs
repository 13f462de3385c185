//! Alert registration: input normalization, validation and the submit flow
//!
//! The form is edited live (the handle is normalized on every keystroke),
//! validated locally against the same rules the backend applies, and then
//! posted through [`AlertSubmitter`]. A successful submission clears the form
//! and asks the refresh actor for one extra stats fetch shortly afterwards.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use tracing::{debug, error, warn};

use crate::actors::refresh::RefreshHandle;
use crate::api::AlertRequest;
use crate::clients::alert::{AlertClient, SubmitOutcome};

/// Marker prefixed to messaging handles
pub const HANDLE_MARKER: char = '@';

/// Accepted threshold range in Gwei (inclusive)
pub const MIN_MAX_GAS_PRICE: u32 = 1;
pub const MAX_MAX_GAS_PRICE: u32 = 1000;

/// Accepted handle length without the marker (inclusive)
const MIN_HANDLE_LEN: usize = 5;
const MAX_HANDLE_LEN: usize = 32;

/// Handle without its marker
static HANDLE_PATTERN: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(&format!("^[A-Za-z0-9_]{{{MIN_HANDLE_LEN},{MAX_HANDLE_LEN}}}$")));

/// Remove all whitespace and prefix the handle marker if missing.
///
/// An empty input stays empty.
pub fn normalize_handle(input: &str) -> String {
    let stripped: String = input.chars().filter(|c| !c.is_whitespace()).collect();

    if stripped.is_empty() || stripped.starts_with(HANDLE_MARKER) {
        stripped
    } else {
        format!("{HANDLE_MARKER}{stripped}")
    }
}

/// Check the raw form fields and build the request body.
pub fn validate(max_gas_price: &str, telegram_username: &str) -> Result<AlertRequest, String> {
    let max_gas_price: u32 = max_gas_price
        .trim()
        .parse()
        .map_err(|_| "Max gas price must be a whole number of Gwei".to_string())?;

    if !(MIN_MAX_GAS_PRICE..=MAX_MAX_GAS_PRICE).contains(&max_gas_price) {
        return Err(format!(
            "Max gas price must be between {MIN_MAX_GAS_PRICE} and {MAX_MAX_GAS_PRICE} Gwei"
        ));
    }

    let handle = normalize_handle(telegram_username);
    let name = handle.strip_prefix(HANDLE_MARKER).unwrap_or(&handle);

    if name.is_empty() {
        return Err("Telegram username is required".to_string());
    }

    let pattern = match HANDLE_PATTERN.as_ref() {
        Ok(pattern) => pattern,
        Err(e) => {
            error!("invalid handle pattern: {e}");
            return Err("Username can not be checked right now".to_string());
        }
    };

    if !pattern.is_match(name) {
        return Err(format!(
            "Invalid username. Must be {MIN_HANDLE_LEN}-{MAX_HANDLE_LEN} characters (letters, numbers, underscore)"
        ));
    }

    Ok(AlertRequest {
        max_gas_price,
        telegram_username: handle,
    })
}

/// Which form field receives input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    MaxGasPrice,
    TelegramUsername,
}

impl FormField {
    pub fn next(&self) -> Self {
        match self {
            FormField::MaxGasPrice => FormField::TelegramUsername,
            FormField::TelegramUsername => FormField::MaxGasPrice,
        }
    }
}

/// State of the result region below the form
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Pending,
    Success(String),
    Error(String),
}

impl SubmissionStatus {
    pub fn text(&self) -> Option<String> {
        match self {
            SubmissionStatus::Idle => None,
            SubmissionStatus::Pending => Some("Creating alert...".to_string()),
            SubmissionStatus::Success(message) => Some(format!("✓ {message}")),
            SubmissionStatus::Error(message) => Some(format!("✗ {message}")),
        }
    }
}

/// The two-field registration form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertForm {
    pub max_gas_price: String,
    pub telegram_username: String,
    pub focus: FormField,
    pub status: SubmissionStatus,
}

impl AlertForm {
    pub fn push_char(&mut self, c: char) {
        match self.focus {
            FormField::MaxGasPrice => {
                if c.is_ascii_digit() {
                    self.max_gas_price.push(c);
                }
            }
            FormField::TelegramUsername => {
                self.telegram_username.push(c);
                self.telegram_username = normalize_handle(&self.telegram_username);
            }
        }
    }

    pub fn backspace(&mut self) {
        match self.focus {
            FormField::MaxGasPrice => {
                self.max_gas_price.pop();
            }
            FormField::TelegramUsername => {
                self.telegram_username.pop();
                // a lone marker left behind is dropped with it
                if self.telegram_username == HANDLE_MARKER.to_string() {
                    self.telegram_username.clear();
                }
            }
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn is_pending(&self) -> bool {
        self.status == SubmissionStatus::Pending
    }

    /// Validate the fields and mark the form pending.
    ///
    /// Returns `None` (with an error shown) when the input is invalid or a
    /// submission is already underway.
    pub fn begin_submit(&mut self) -> Option<AlertRequest> {
        if self.is_pending() {
            return None;
        }

        match validate(&self.max_gas_price, &self.telegram_username) {
            Ok(request) => {
                self.status = SubmissionStatus::Pending;
                Some(request)
            }
            Err(message) => {
                debug!("alert form rejected locally: {message}");
                self.status = SubmissionStatus::Error(message);
                None
            }
        }
    }

    /// Show the outcome; the fields are cleared only on success.
    pub fn finish_submit(&mut self, outcome: &SubmitOutcome) {
        match outcome {
            Ok(message) => {
                self.max_gas_price.clear();
                self.telegram_username.clear();
                self.focus = FormField::default();
                self.status = SubmissionStatus::Success(message.clone());
            }
            Err(e) => {
                self.status = SubmissionStatus::Error(e.to_string());
            }
        }
    }
}

/// Posts registrations and refreshes the stats after a success
#[derive(Clone)]
pub struct AlertSubmitter {
    client: AlertClient,
    refresh: RefreshHandle,
    stats_refresh_delay: Duration,
}

impl AlertSubmitter {
    pub fn new(client: AlertClient, refresh: RefreshHandle, stats_refresh_delay: Duration) -> Self {
        Self {
            client,
            refresh,
            stats_refresh_delay,
        }
    }

    pub async fn submit(&self, request: AlertRequest) -> SubmitOutcome {
        let outcome = self.client.submit(&request).await;

        if outcome.is_ok()
            && let Err(e) = self.refresh.refresh_stats_after(self.stats_refresh_delay).await
        {
            warn!("failed to schedule stats refresh: {e:#}");
        }

        outcome
    }
}
