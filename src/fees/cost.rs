//! Cost calculator for common on-chain operations
//!
//! Converts the live fee (Gwei per gas unit) and the asset price (USD per
//! native coin) into the USD cost of each operation in a fixed catalog.

/// Gwei per native coin. The backend reports fees in Gwei, so dividing
/// `gas units * fee` by this yields the cost in the native coin.
pub const GWEI_PER_COIN: f64 = 1e9;

/// Operations whose cost is shown on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Transfer,
    Swap,
    Nft,
    Approve,
}

impl Operation {
    /// The full catalog, in display order
    pub const ALL: [Operation; 4] = [
        Operation::Transfer,
        Operation::Swap,
        Operation::Nft,
        Operation::Approve,
    ];

    /// Gas units consumed by one operation of this kind
    pub fn gas_units(&self) -> u64 {
        match self {
            Operation::Transfer => 21_000,
            Operation::Swap => 150_000,
            Operation::Nft => 100_000,
            Operation::Approve => 50_000,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Operation::Transfer => "ETH Transfer",
            Operation::Swap => "Token Swap",
            Operation::Nft => "NFT Mint/Transfer",
            Operation::Approve => "Token Approval",
        }
    }
}

/// Cost of one operation at the current fee and asset price
///
/// Values are kept at full precision; rounding happens only when formatting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperationCost {
    pub operation: Operation,
    pub cost_native: f64,
    pub cost_usd: f64,
}

impl OperationCost {
    pub fn compute(operation: Operation, fee: f64, asset_price: f64) -> Self {
        let cost_native = operation.gas_units() as f64 * fee / GWEI_PER_COIN;

        Self {
            operation,
            cost_native,
            cost_usd: cost_native * asset_price,
        }
    }
}

/// Compute the cost of every catalog operation.
///
/// Returns `None` while no fee reading exists, so callers leave the previous
/// display untouched.
pub fn calculate_costs(fee: Option<f64>, asset_price: f64) -> Option<Vec<OperationCost>> {
    let fee = fee?;

    Some(
        Operation::ALL
            .iter()
            .map(|operation| OperationCost::compute(*operation, fee, asset_price))
            .collect(),
    )
}
