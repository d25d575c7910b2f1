//! Decision pipeline: features, scoring, capital fitting, and the trading bot.

pub mod bot;
pub mod decision;
pub mod features;
pub mod portfolio;
pub mod scorer;

pub use bot::{PerformanceReport, TradingBot, REPORT_TRADE_COUNT};
pub use decision::{rationale, risk_score, DecisionAggregator, DEFAULT_TIME_HORIZON};
pub use features::{
    bollinger_position, extract_features, macd_from_change, rsi_from_change, MarketSnapshot,
    SnapshotError, DEFAULT_VOLATILITY,
};
pub use portfolio::fit_to_capital;
pub use scorer::{RuleBasedScorer, MAX_SIGNAL_CONFIDENCE};
