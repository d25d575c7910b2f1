pub mod config;
pub mod config_loader;
pub mod decision;
pub mod position;
pub mod position_sizing;
pub mod risk;
pub mod sentiment;
pub mod signal;

pub use config::{AppConfig, SentimentConfig, TradingConfig};
pub use config_loader::ConfigLoader;
pub use decision::TradingDecision;
pub use position::{
    LedgerError, LedgerSnapshot, PerformanceMetrics, Position, PositionLedger, TradeAction,
    TradeRecord,
};
pub use position_sizing::{confidence_scaled_shares, round_shares, volatility_dampening};
pub use risk::{RiskLevel, RiskProfile};
pub use sentiment::{SentimentLabel, SentimentSource, SourceReading, SourceWeights};
pub use signal::{FeatureVector, ScoredSignal, Signal, SignalScorer, FEATURE_COUNT};
