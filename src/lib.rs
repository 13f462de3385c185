//! Live gas price dashboard
//!
//! Polls a gas tracker backend for the current fee and usage statistics,
//! polls a market-data source for the native coin price, derives the USD cost
//! of common operations and lets users register threshold alerts.

pub mod actors;
pub mod alerts;
pub mod api;
pub mod clients;
pub mod config;
pub mod fees;
pub mod state;
pub mod util;
pub mod viewer;
