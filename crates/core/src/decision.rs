use crate::signal::Signal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A sized, priced trade recommendation for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradingDecision {
    pub symbol: String,
    pub signal: Signal,
    pub confidence: f64,
    pub entry_price: Decimal,
    pub target_price: Decimal,
    pub stop_loss: Decimal,
    /// Shares to trade (fractional shares allowed)
    pub position_size: Decimal,
    /// Human-readable reasons, in the order the checks ran
    pub rationale: Vec<String>,
    /// Risk estimate in [0, 1]
    pub risk_score: f64,
    /// Expected profit in currency units if the target is hit
    pub expected_return: Decimal,
    pub time_horizon: String,
}

impl TradingDecision {
    /// Capital required to enter the position.
    #[must_use]
    pub fn cost(&self) -> Decimal {
        self.entry_price * self.position_size
    }

    /// Ranking key used when competing for capital: confidence × expected return.
    #[must_use]
    pub fn priority(&self) -> f64 {
        self.confidence * self.expected_return.to_f64().unwrap_or(0.0)
    }
}
