//! Trading signal types and the scoring capability.
//!
//! A [`SignalScorer`] turns a [`FeatureVector`] into a discrete [`Signal`]
//! with a self-reported confidence. The scorer is deliberately opaque: any
//! model (rule-based, trained classifier, remote service) can sit behind it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete trading recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Signal {
    StrongBuy,
    Buy,
    Hold,
    Sell,
    StrongSell,
}

impl Signal {
    /// Maps a classifier class label (-2..=2) to a signal.
    ///
    /// Labels outside the range saturate to the nearest strong signal.
    #[must_use]
    pub const fn from_class(class: i8) -> Self {
        match class {
            i8::MIN..=-2 => Self::StrongSell,
            -1 => Self::Sell,
            0 => Self::Hold,
            1 => Self::Buy,
            _ => Self::StrongBuy,
        }
    }

    /// Returns the classifier class label for this signal.
    #[must_use]
    pub const fn class(self) -> i8 {
        match self {
            Self::StrongBuy => 2,
            Self::Buy => 1,
            Self::Hold => 0,
            Self::Sell => -1,
            Self::StrongSell => -2,
        }
    }

    /// Returns true for `Buy` and `StrongBuy`.
    #[must_use]
    pub const fn is_buy(self) -> bool {
        matches!(self, Self::Buy | Self::StrongBuy)
    }

    /// Returns true for `Sell` and `StrongSell`.
    #[must_use]
    pub const fn is_sell(self) -> bool {
        matches!(self, Self::Sell | Self::StrongSell)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StrongBuy => "STRONG_BUY",
            Self::Buy => "BUY",
            Self::Hold => "HOLD",
            Self::Sell => "SELL",
            Self::StrongSell => "STRONG_SELL",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Number of features the decision stage consumes.
pub const FEATURE_COUNT: usize = 15;

/// Ordered tuple of the numeric signals describing one symbol at one instant.
///
/// Index layout:
///
/// | idx | feature |
/// |-----|---------|
/// | 0 | price change since open (fraction) |
/// | 1 | intraday range / price |
/// | 2 | RSI-like value in [0, 1] |
/// | 3 | MACD-like value in [-1, 1] |
/// | 4 | Bollinger position in [0, 1] |
/// | 5 | combined sentiment |
/// | 6 | news sentiment |
/// | 7 | social sentiment |
/// | 8 | volume / average volume |
/// | 9 | market trend |
/// | 10 | sector performance |
/// | 11 | volatility |
/// | 12 | ln(volume + 1) |
/// | 13 | price / MA20 - 1 |
/// | 14 | price / MA50 - 1 |
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector(pub [f64; FEATURE_COUNT]);

impl FeatureVector {
    #[must_use]
    pub const fn new(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    #[must_use]
    pub const fn values(&self) -> &[f64; FEATURE_COUNT] {
        &self.0
    }

    #[must_use]
    pub const fn price_change(&self) -> f64 {
        self.0[0]
    }

    #[must_use]
    pub const fn price_range(&self) -> f64 {
        self.0[1]
    }

    #[must_use]
    pub const fn rsi(&self) -> f64 {
        self.0[2]
    }

    #[must_use]
    pub const fn macd(&self) -> f64 {
        self.0[3]
    }

    #[must_use]
    pub const fn bollinger_position(&self) -> f64 {
        self.0[4]
    }

    #[must_use]
    pub const fn sentiment_score(&self) -> f64 {
        self.0[5]
    }

    #[must_use]
    pub const fn news_sentiment(&self) -> f64 {
        self.0[6]
    }

    #[must_use]
    pub const fn social_sentiment(&self) -> f64 {
        self.0[7]
    }

    #[must_use]
    pub const fn volume_ratio(&self) -> f64 {
        self.0[8]
    }

    #[must_use]
    pub const fn market_trend(&self) -> f64 {
        self.0[9]
    }

    #[must_use]
    pub const fn sector_performance(&self) -> f64 {
        self.0[10]
    }

    #[must_use]
    pub const fn volatility(&self) -> f64 {
        self.0[11]
    }

    #[must_use]
    pub const fn log_volume(&self) -> f64 {
        self.0[12]
    }

    #[must_use]
    pub const fn ma20_ratio(&self) -> f64 {
        self.0[13]
    }

    #[must_use]
    pub const fn ma50_ratio(&self) -> f64 {
        self.0[14]
    }
}

/// Output of a [`SignalScorer`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredSignal {
    pub signal: Signal,
    /// Self-reported certainty in [0, 1]
    pub confidence: f64,
}

impl ScoredSignal {
    #[must_use]
    pub const fn new(signal: Signal, confidence: f64) -> Self {
        Self { signal, confidence }
    }

    #[must_use]
    pub const fn hold() -> Self {
        Self {
            signal: Signal::Hold,
            confidence: 0.0,
        }
    }
}

/// Scores a feature vector into a signal and confidence.
///
/// Implementations must be pure: the same vector always yields the same score.
pub trait SignalScorer: Send + Sync {
    fn score(&self, features: &FeatureVector) -> ScoredSignal;

    /// Returns the name of this scorer for logging.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_mapping_is_symmetric() {
        for signal in [
            Signal::StrongBuy,
            Signal::Buy,
            Signal::Hold,
            Signal::Sell,
            Signal::StrongSell,
        ] {
            assert_eq!(Signal::from_class(signal.class()), signal);
        }
    }

    #[test]
    fn out_of_range_classes_saturate() {
        assert_eq!(Signal::from_class(7), Signal::StrongBuy);
        assert_eq!(Signal::from_class(-9), Signal::StrongSell);
    }

    #[test]
    fn buy_and_sell_predicates() {
        assert!(Signal::StrongBuy.is_buy());
        assert!(Signal::Buy.is_buy());
        assert!(!Signal::Hold.is_buy());
        assert!(!Signal::Hold.is_sell());
        assert!(Signal::Sell.is_sell());
        assert!(Signal::StrongSell.is_sell());
    }

    #[test]
    fn feature_accessors_follow_layout() {
        let mut values = [0.0; FEATURE_COUNT];
        for (i, v) in values.iter_mut().enumerate() {
            *v = i as f64;
        }
        let fv = FeatureVector::new(values);

        assert_eq!(fv.price_change(), 0.0);
        assert_eq!(fv.rsi(), 2.0);
        assert_eq!(fv.sentiment_score(), 5.0);
        assert_eq!(fv.volume_ratio(), 8.0);
        assert_eq!(fv.volatility(), 11.0);
        assert_eq!(fv.ma50_ratio(), 14.0);
    }

    #[test]
    fn signal_display_uses_wire_names() {
        assert_eq!(Signal::StrongSell.to_string(), "STRONG_SELL");
        assert_eq!(Signal::Hold.to_string(), "HOLD");
    }
}
