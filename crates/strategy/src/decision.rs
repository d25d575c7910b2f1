//! Per-symbol trading decisions.
//!
//! A [`DecisionAggregator`] scores the feature vector, discards signals
//! below the risk profile's confidence floor, sizes the position, and
//! attaches target, stop, rationale, and risk estimates.

use crate::features::{extract_features, MarketSnapshot, SnapshotError};
use crate::scorer::RuleBasedScorer;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use stock_ai_core::{
    confidence_scaled_shares, FeatureVector, RiskProfile, Signal, SignalScorer, TradingDecision,
};

/// Default holding period attached to decisions.
pub const DEFAULT_TIME_HORIZON: &str = "1-5 days";

/// Position cost that counts as full size risk.
const SIZE_RISK_CAPITAL: f64 = 100_000.0;

/// Fixed market-wide volatility term in the risk score.
const BASE_VOLATILITY_RISK: f64 = 0.02;

fn decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or(Decimal::ZERO)
}

pub struct DecisionAggregator {
    profile: RiskProfile,
    scorer: Box<dyn SignalScorer>,
    time_horizon: String,
}

impl DecisionAggregator {
    #[must_use]
    pub fn new(profile: RiskProfile, scorer: Box<dyn SignalScorer>) -> Self {
        Self {
            profile,
            scorer,
            time_horizon: DEFAULT_TIME_HORIZON.to_string(),
        }
    }

    /// Creates an aggregator with the rule-based scorer.
    #[must_use]
    pub fn rule_based(profile: RiskProfile) -> Self {
        Self::new(profile, Box::new(RuleBasedScorer::default()))
    }

    /// Sets the holding period attached to decisions.
    #[must_use]
    pub fn with_time_horizon(mut self, time_horizon: impl Into<String>) -> Self {
        self.time_horizon = time_horizon.into();
        self
    }

    #[must_use]
    pub const fn profile(&self) -> &RiskProfile {
        &self.profile
    }

    #[must_use]
    pub fn scorer_name(&self) -> &str {
        self.scorer.name()
    }

    /// Builds a decision from a raw market snapshot.
    ///
    /// Returns `Ok(None)` when the signal is not confident enough.
    ///
    /// # Errors
    /// Returns [`SnapshotError`] when the snapshot lacks price or volume.
    pub fn decide(
        &self,
        symbol: &str,
        snapshot: &MarketSnapshot,
        capital: Decimal,
    ) -> Result<Option<TradingDecision>, SnapshotError> {
        let features = extract_features(symbol, snapshot)?;
        let price = snapshot.validate(symbol)?;
        Ok(self.decide_features(symbol, &features, price, capital))
    }

    /// Builds a decision from an already extracted feature vector.
    #[must_use]
    pub fn decide_features(
        &self,
        symbol: &str,
        features: &FeatureVector,
        price: Decimal,
        capital: Decimal,
    ) -> Option<TradingDecision> {
        let scored = self.scorer.score(features);
        if !scored.confidence.is_finite() {
            tracing::warn!(
                %symbol,
                scorer = self.scorer.name(),
                "Scorer returned non-finite confidence"
            );
            return None;
        }
        let confidence = scored.confidence.clamp(0.0, 1.0);

        if confidence < self.profile.min_confidence {
            tracing::debug!(
                %symbol,
                signal = %scored.signal,
                confidence,
                min_confidence = self.profile.min_confidence,
                "Signal below confidence threshold"
            );
            return None;
        }

        let position_size = if price > Decimal::ZERO {
            match confidence_scaled_shares(
                capital,
                self.profile.max_position_fraction,
                confidence,
                features.volatility(),
                price,
            ) {
                Ok(shares) => shares,
                Err(e) => {
                    tracing::warn!(%symbol, "Position sizing failed: {e}");
                    Decimal::ZERO
                }
            }
        } else {
            Decimal::ZERO
        };

        let (target_price, stop_loss) = self.targets(scored.signal, confidence, price);
        let cost = price * position_size;

        let expected_return = if price > Decimal::ZERO && position_size > Decimal::ZERO {
            (target_price - price) / price * price * position_size
        } else {
            Decimal::ZERO
        };

        let decision = TradingDecision {
            symbol: symbol.to_string(),
            signal: scored.signal,
            confidence,
            entry_price: price,
            target_price,
            stop_loss,
            position_size,
            rationale: rationale(scored.signal, confidence, features),
            risk_score: risk_score(price, stop_loss, cost),
            expected_return,
            time_horizon: self.time_horizon.clone(),
        };

        tracing::debug!(
            %symbol,
            signal = %decision.signal,
            confidence,
            shares = %decision.position_size,
            "Decision generated"
        );

        Some(decision)
    }

    /// Target and stop prices for a signal.
    fn targets(&self, signal: Signal, confidence: f64, price: Decimal) -> (Decimal, Decimal) {
        let reward = decimal(self.profile.take_profit_pct) * decimal(confidence);
        let stop = decimal(self.profile.stop_loss_pct);

        if signal.is_buy() {
            (price * (Decimal::ONE + reward), price * (Decimal::ONE - stop))
        } else if signal.is_sell() {
            (price * (Decimal::ONE - reward), price * (Decimal::ONE + stop))
        } else {
            (price, price * (Decimal::ONE - stop))
        }
    }
}

/// Human-readable reasons for a decision, in a fixed order.
#[must_use]
pub fn rationale(signal: Signal, confidence: f64, features: &FeatureVector) -> Vec<String> {
    let mut reasons = Vec::new();

    let move_pct = features.price_change() * 100.0;
    if move_pct.abs() > 2.0 {
        let direction = if move_pct > 0.0 { "upward" } else { "downward" };
        reasons.push(format!("Strong {direction} price momentum ({:.1}%)", move_pct.abs()));
    }

    let rsi = features.rsi();
    if rsi > 0.7 {
        reasons.push("RSI indicates overbought conditions".to_string());
    } else if rsi < 0.3 {
        reasons.push("RSI indicates oversold conditions - potential reversal".to_string());
    }

    let sentiment = features.sentiment_score();
    if sentiment > 0.3 {
        reasons.push("Positive market sentiment supporting bullish outlook".to_string());
    } else if sentiment < -0.3 {
        reasons.push("Negative market sentiment creating bearish pressure".to_string());
    }

    let volume_ratio = features.volume_ratio();
    if volume_ratio > 1.5 {
        reasons.push("Above-average volume confirms price movement".to_string());
    } else if volume_ratio < 0.5 {
        reasons.push("Below-average volume suggests weak conviction".to_string());
    }

    if confidence > 0.8 {
        match signal {
            Signal::StrongBuy => {
                reasons.push("Model shows very high confidence in upward movement".to_string());
            }
            Signal::StrongSell => {
                reasons.push("Model shows very high confidence in downward movement".to_string());
            }
            _ => {}
        }
    }

    if features.volatility() > 0.05 {
        reasons.push("High volatility detected - increased risk/reward potential".to_string());
    }

    reasons
}

/// Risk estimate in [0, 1]: 40% stop distance, 30% position size, 30% volatility.
#[must_use]
pub fn risk_score(price: Decimal, stop_loss: Decimal, cost: Decimal) -> f64 {
    if price <= Decimal::ZERO {
        return 1.0;
    }
    let position_risk = ((price - stop_loss).abs() / price).to_f64().unwrap_or(1.0);
    let size_risk = cost.to_f64().unwrap_or(0.0) / SIZE_RISK_CAPITAL;

    (position_risk * 0.4 + size_risk * 0.3 + BASE_VOLATILITY_RISK * 0.3).min(1.0)
}
