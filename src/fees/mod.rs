//! Pure derivations from the live fee
//!
//! - [`status`]: fee value to a discrete [`FeeStatus`] tier
//! - [`cost`]: fee value and asset price to per-operation USD costs

pub mod cost;
pub mod status;

pub use cost::{GWEI_PER_COIN, Operation, OperationCost, calculate_costs};
pub use status::FeeStatus;
