use serde::{Deserialize, Serialize};
use stock_ai_core::{FeatureVector, ScoredSignal, Signal, SignalScorer};

/// Confidence ceiling for any scored signal.
pub const MAX_SIGNAL_CONFIDENCE: f64 = 0.95;

/// Deterministic scorer blending momentum, sentiment, and volume.
///
/// Each component is normalized to roughly [-3, 3]:
/// - momentum: day's move in units of volatility, plus half the MACD value
/// - sentiment: combined sentiment over 0.25
/// - volume: log2 of the volume ratio, signed by the momentum/sentiment direction
///
/// The blended score maps to a signal class at `buy_threshold` and
/// `strong_threshold`, and confidence grows linearly with its magnitude.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleBasedScorer {
    pub momentum_weight: f64,
    pub sentiment_weight: f64,
    pub volume_weight: f64,
    pub buy_threshold: f64,
    pub strong_threshold: f64,
}

impl Default for RuleBasedScorer {
    fn default() -> Self {
        Self {
            momentum_weight: 0.4,
            sentiment_weight: 0.3,
            volume_weight: 0.3,
            buy_threshold: 0.5,
            strong_threshold: 1.5,
        }
    }
}

impl RuleBasedScorer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets thresholds for the Buy/Sell and StrongBuy/StrongSell classes.
    #[must_use]
    pub fn with_thresholds(mut self, buy: f64, strong: f64) -> Self {
        self.buy_threshold = buy;
        self.strong_threshold = strong;
        self
    }

    /// Raw blended score; 0 when any input is non-finite.
    #[must_use]
    pub fn raw_score(&self, features: &FeatureVector) -> f64 {
        let volatility = features.volatility().max(0.005);
        let momentum =
            (features.price_change() / volatility).clamp(-3.0, 3.0) + 0.5 * features.macd();
        let sentiment = (features.sentiment_score() / 0.25).clamp(-3.0, 3.0);
        let volume = features.volume_ratio().max(1e-3).log2().clamp(-3.0, 3.0);

        let direction = momentum + sentiment;
        let direction = if direction > 0.0 {
            1.0
        } else if direction < 0.0 {
            -1.0
        } else {
            0.0
        };

        let score = self.momentum_weight * momentum
            + self.sentiment_weight * sentiment
            + self.volume_weight * volume * direction;

        if score.is_finite() {
            score
        } else {
            0.0
        }
    }

    fn classify(&self, score: f64) -> Signal {
        if score > self.strong_threshold {
            Signal::StrongBuy
        } else if score > self.buy_threshold {
            Signal::Buy
        } else if score < -self.strong_threshold {
            Signal::StrongSell
        } else if score < -self.buy_threshold {
            Signal::Sell
        } else {
            Signal::Hold
        }
    }
}

impl SignalScorer for RuleBasedScorer {
    fn score(&self, features: &FeatureVector) -> ScoredSignal {
        let score = self.raw_score(features);
        let confidence = (0.5 + 0.3 * score.abs()).min(MAX_SIGNAL_CONFIDENCE);
        ScoredSignal::new(self.classify(score), confidence)
    }

    fn name(&self) -> &str {
        "rule_based"
    }
}
