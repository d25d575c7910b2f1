use crate::risk::RiskLevel;
use crate::sentiment::SourceWeights;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub trading: TradingConfig,
    pub sentiment: SentimentConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TradingConfig {
    pub initial_capital: Decimal,
    pub risk_level: RiskLevel,
    /// Horizon label attached to every decision
    pub time_horizon: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SentimentConfig {
    pub weights: SourceWeights,
    /// Per-feed fetch timeout in milliseconds
    pub fetch_timeout_ms: u64,
    /// Seed for simulated feeds; random when unset
    pub seed: Option<u64>,
}

impl Default for TradingConfig {
    fn default() -> Self {
        Self {
            initial_capital: Decimal::from(100_000),
            risk_level: RiskLevel::Moderate,
            time_horizon: "1-5 days".to_string(),
        }
    }
}

impl Default for SentimentConfig {
    fn default() -> Self {
        Self {
            weights: SourceWeights::default(),
            fetch_timeout_ms: 5_000,
            seed: None,
        }
    }
}
