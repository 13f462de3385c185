//! Fee tier classification

/// Upper bound (inclusive) of the Excellent tier, in Gwei
pub const EXCELLENT_MAX_GWEI: f64 = 5.0;

/// Upper bound (inclusive) of the Good tier, in Gwei
pub const GOOD_MAX_GWEI: f64 = 15.0;

/// Upper bound (inclusive) of the Moderate tier, in Gwei
pub const MODERATE_MAX_GWEI: f64 = 50.0;

/// Discrete fee level shown next to the current gas price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeeStatus {
    Excellent,
    Good,
    Moderate,
    High,
}

impl FeeStatus {
    /// Classify a fee value. Each boundary belongs to the cheaper tier.
    pub fn classify(fee: f64) -> FeeStatus {
        if fee <= EXCELLENT_MAX_GWEI {
            return FeeStatus::Excellent;
        }

        if fee <= GOOD_MAX_GWEI {
            return FeeStatus::Good;
        }

        if fee <= MODERATE_MAX_GWEI {
            return FeeStatus::Moderate;
        }

        FeeStatus::High
    }

    pub fn label(&self) -> &'static str {
        match self {
            FeeStatus::Excellent => "Excellent time to transact!",
            FeeStatus::Good => "Good gas price",
            FeeStatus::Moderate => "Moderate gas price",
            FeeStatus::High => "High gas price",
        }
    }
}

impl std::fmt::Display for FeeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
