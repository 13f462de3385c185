//! TUI Dashboard Module
//!
//! Terminal display surface for the gas tracker: current fee and status,
//! operation costs, usage statistics and the alert registration form.

#[cfg(feature = "dashboard")]
mod app;
#[cfg(feature = "dashboard")]
mod ui;

#[cfg(feature = "dashboard")]
pub use app::App;
