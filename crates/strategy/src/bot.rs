//! Trading bot: decide, fit, execute, report.

use crate::decision::DecisionAggregator;
use crate::features::MarketSnapshot;
use crate::portfolio::fit_to_capital;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use stock_ai_core::{
    LedgerError, PerformanceMetrics, Position, PositionLedger, RiskLevel, RiskProfile, SignalScorer,
    TradeRecord, TradingConfig, TradingDecision,
};

/// Trades shown in a performance report.
pub const REPORT_TRADE_COUNT: usize = 10;

/// Portfolio summary for reporting layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceReport {
    pub risk_level: RiskLevel,
    pub performance: PerformanceMetrics,
    pub positions: Vec<Position>,
    pub recent_trades: Vec<TradeRecord>,
    pub risk_parameters: RiskProfile,
}

pub struct TradingBot {
    decisions: DecisionAggregator,
}

impl TradingBot {
    #[must_use]
    pub fn new(risk_level: RiskLevel, scorer: Box<dyn SignalScorer>) -> Self {
        Self {
            decisions: DecisionAggregator::new(risk_level.profile(), scorer),
        }
    }

    /// Creates a bot with the rule-based scorer and the configured risk level.
    #[must_use]
    pub fn from_config(config: &TradingConfig) -> Self {
        Self {
            decisions: DecisionAggregator::rule_based(config.risk_level.profile())
                .with_time_horizon(config.time_horizon.clone()),
        }
    }

    #[must_use]
    pub const fn profile(&self) -> &RiskProfile {
        self.decisions.profile()
    }

    /// Decides for every symbol, then fits the batch to `capital`.
    ///
    /// Symbols are visited in sorted order. Snapshots missing required
    /// fields are skipped.
    #[must_use]
    pub fn analyze(
        &self,
        market: &BTreeMap<String, MarketSnapshot>,
        capital: Decimal,
    ) -> Vec<TradingDecision> {
        let decisions: Vec<TradingDecision> = market
            .iter()
            .filter_map(|(symbol, snapshot)| {
                match self.decisions.decide(symbol, snapshot, capital) {
                    Ok(decision) => decision,
                    Err(e) => {
                        tracing::warn!("Skipping snapshot: {e}");
                        None
                    }
                }
            })
            .collect();

        let candidates = decisions.len();
        let fitted = fit_to_capital(decisions, capital);
        tracing::info!(
            symbols = market.len(),
            candidates,
            fitted = fitted.len(),
            capital = %capital,
            "Analysis complete"
        );
        fitted
    }

    /// Analyzes the market against the ledger's cash and executes the result.
    ///
    /// Returns the decisions that were executed. Decisions the ledger
    /// refuses are logged and skipped. New positions beyond the profile's
    /// position limit are not opened.
    pub fn analyze_and_trade(
        &self,
        market: &BTreeMap<String, MarketSnapshot>,
        ledger: &mut PositionLedger,
    ) -> Vec<TradingDecision> {
        let max_positions = self.profile().max_positions;
        let mut executed = Vec::new();

        for decision in self.analyze(market, ledger.cash()) {
            let opens_position =
                decision.signal.is_buy() && ledger.get_position(&decision.symbol).is_none();
            if opens_position && ledger.all_positions().len() >= max_positions {
                tracing::info!(symbol = %decision.symbol, max_positions, "Position limit reached");
                continue;
            }

            match ledger.execute(&decision) {
                Ok(_) => executed.push(decision),
                Err(LedgerError::NotActionable(signal)) => {
                    tracing::debug!(symbol = %decision.symbol, %signal, "No order for signal");
                }
                Err(e) => {
                    tracing::warn!(symbol = %decision.symbol, "Trade not executed: {e}");
                }
            }
        }

        executed
    }

    #[must_use]
    pub fn performance_report(
        &self,
        ledger: &PositionLedger,
        marks: &HashMap<String, Decimal>,
    ) -> PerformanceReport {
        PerformanceReport {
            risk_level: self.profile().level,
            performance: ledger.performance(marks),
            positions: ledger.all_positions().values().cloned().collect(),
            recent_trades: ledger.recent_trades(REPORT_TRADE_COUNT).to_vec(),
            risk_parameters: *self.profile(),
        }
    }

    /// Plain-language observations about returns, win rate, and exposure.
    #[must_use]
    pub fn trading_insights(
        &self,
        ledger: &PositionLedger,
        metrics: &PerformanceMetrics,
    ) -> Vec<String> {
        let mut insights = Vec::new();
        let return_pct = metrics.total_return * 100.0;

        if metrics.total_return > 0.1 {
            insights.push(format!("Excellent performance with {return_pct:.1}% returns"));
        } else if metrics.total_return > 0.05 {
            insights.push(format!("Good performance with {return_pct:.1}% returns"));
        } else if metrics.total_return < -0.05 {
            insights.push(format!(
                "Underperforming with {:.1}% losses - consider strategy adjustment",
                return_pct.abs()
            ));
        }

        let has_sells = ledger.history().iter().any(|t| t.realized_pnl.is_some());
        if has_sells {
            let win_pct = metrics.win_rate * 100.0;
            if metrics.win_rate > 0.7 {
                insights.push(format!(
                    "High win rate ({win_pct:.1}%) indicates effective strategy"
                ));
            } else if metrics.win_rate < 0.4 {
                insights.push(format!("Low win rate ({win_pct:.1}%) - review entry criteria"));
            }
        }

        let max_positions = self.profile().max_positions;
        if metrics.active_positions == 0 {
            insights.push(
                "All capital in cash - waiting for high-confidence opportunities".to_string(),
            );
        } else if metrics.active_positions as f64 > max_positions as f64 * 0.8 {
            insights.push("Near maximum position limit - consider position sizing".to_string());
        }

        insights
    }
}
