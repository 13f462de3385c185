//! UI rendering module

mod fees;
mod form;
mod layout;
mod stats;

pub use layout::{ViewState, render};
