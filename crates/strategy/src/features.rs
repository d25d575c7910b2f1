//! Market snapshot to feature vector.
//!
//! The technical indicators here are single-snapshot approximations driven
//! by the day's percentage change; moving averages come from the snapshot
//! or, when absent, from its recent close history.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use stock_ai_core::{FeatureVector, SentimentSource};
use stock_ai_sentiment::CombinedSentiment;
use thiserror::Error;

/// Volatility assumed when the snapshot does not carry one.
pub const DEFAULT_VOLATILITY: f64 = 0.02;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("{symbol}: missing required field `{field}`")]
    MissingField { symbol: String, field: &'static str },

    #[error("{0}: current price must be positive")]
    NonPositivePrice(String),
}

fn default_volatility() -> f64 {
    DEFAULT_VOLATILITY
}

/// Current market state for one symbol, as supplied by the data layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub current_price: Option<Decimal>,
    pub volume: Option<Decimal>,
    #[serde(default)]
    pub open_price: Option<Decimal>,
    #[serde(default)]
    pub high_price: Option<Decimal>,
    #[serde(default)]
    pub low_price: Option<Decimal>,
    #[serde(default)]
    pub avg_volume: Option<Decimal>,
    /// Percentage change on the day (e.g. 1.35 for +1.35%)
    #[serde(default)]
    pub change_percent: Option<f64>,
    #[serde(default)]
    pub sentiment_score: f64,
    #[serde(default)]
    pub news_sentiment: f64,
    #[serde(default)]
    pub social_sentiment: f64,
    #[serde(default)]
    pub market_trend: f64,
    #[serde(default)]
    pub sector_performance: f64,
    #[serde(default = "default_volatility")]
    pub volatility: f64,
    #[serde(default)]
    pub ma_20: Option<Decimal>,
    #[serde(default)]
    pub ma_50: Option<Decimal>,
    /// Recent closes, oldest first
    #[serde(default)]
    pub closes: Vec<Decimal>,
}

impl MarketSnapshot {
    /// Creates a snapshot with price and volume; every other field at its default.
    #[must_use]
    pub fn new(current_price: Decimal, volume: Decimal) -> Self {
        Self {
            current_price: Some(current_price),
            volume: Some(volume),
            open_price: None,
            high_price: None,
            low_price: None,
            avg_volume: None,
            change_percent: None,
            sentiment_score: 0.0,
            news_sentiment: 0.0,
            social_sentiment: 0.0,
            market_trend: 0.0,
            sector_performance: 0.0,
            volatility: DEFAULT_VOLATILITY,
            ma_20: None,
            ma_50: None,
            closes: Vec::new(),
        }
    }

    /// Sets open, high, and low prices.
    #[must_use]
    pub fn with_ohl(mut self, open: Decimal, high: Decimal, low: Decimal) -> Self {
        self.open_price = Some(open);
        self.high_price = Some(high);
        self.low_price = Some(low);
        self
    }

    /// Sets the day's percentage change.
    #[must_use]
    pub fn with_change_percent(mut self, change_percent: f64) -> Self {
        self.change_percent = Some(change_percent);
        self
    }

    /// Sets average volume.
    #[must_use]
    pub fn with_avg_volume(mut self, avg_volume: Decimal) -> Self {
        self.avg_volume = Some(avg_volume);
        self
    }

    /// Sets volatility.
    #[must_use]
    pub fn with_volatility(mut self, volatility: f64) -> Self {
        self.volatility = volatility;
        self
    }

    /// Sets the three sentiment inputs directly.
    #[must_use]
    pub fn with_sentiment_scores(mut self, combined: f64, news: f64, social: f64) -> Self {
        self.sentiment_score = combined;
        self.news_sentiment = news;
        self.social_sentiment = social;
        self
    }

    /// Fills the sentiment inputs from an aggregated sentiment.
    ///
    /// Social sentiment is the effective-weight average of forum and
    /// microblog contributions; sources that did not report leave 0.
    #[must_use]
    pub fn with_sentiment(mut self, sentiment: &CombinedSentiment) -> Self {
        self.sentiment_score = sentiment.combined_sentiment;
        self.news_sentiment = sentiment
            .contribution(&SentimentSource::News)
            .map_or(0.0, |c| c.sentiment);

        let (sum, weight) = sentiment
            .source_breakdown
            .iter()
            .filter(|c| matches!(c.source, SentimentSource::Forum | SentimentSource::Microblog))
            .fold((0.0, 0.0), |(s, w), c| (s + c.sentiment * c.weight, w + c.weight));
        self.social_sentiment = if weight > 0.0 { sum / weight } else { 0.0 };
        self
    }

    /// Sets recent close history.
    #[must_use]
    pub fn with_closes(mut self, closes: Vec<Decimal>) -> Self {
        self.closes = closes;
        self
    }

    /// Returns the current price after checking the required fields.
    ///
    /// # Errors
    /// Returns [`SnapshotError`] when price or volume is missing, or price is not positive.
    pub fn validate(&self, symbol: &str) -> Result<Decimal, SnapshotError> {
        let price = self.current_price.ok_or_else(|| SnapshotError::MissingField {
            symbol: symbol.to_string(),
            field: "current_price",
        })?;
        if self.volume.is_none() {
            return Err(SnapshotError::MissingField {
                symbol: symbol.to_string(),
                field: "volume",
            });
        }
        if price <= Decimal::ZERO {
            return Err(SnapshotError::NonPositivePrice(symbol.to_string()));
        }
        Ok(price)
    }

    /// Moving average from the snapshot, else from the last `period` closes.
    fn moving_average(&self, explicit: Option<Decimal>, period: usize) -> Option<Decimal> {
        explicit.or_else(|| {
            if period == 0 || self.closes.len() < period {
                return None;
            }
            let window = &self.closes[self.closes.len() - period..];
            Some(window.iter().sum::<Decimal>() / Decimal::from(period))
        })
    }
}

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

/// RSI-like value from the day's percentage change.
#[must_use]
pub fn rsi_from_change(change_percent: f64) -> f64 {
    if change_percent > 5.0 {
        0.8
    } else if change_percent < -5.0 {
        0.2
    } else {
        0.5 + change_percent / 20.0
    }
}

/// MACD-like value: `tanh(change / 5)`, in [-1, 1].
#[must_use]
pub fn macd_from_change(change_percent: f64) -> f64 {
    (change_percent / 5.0).tanh()
}

/// Position within Bollinger-style bands: 0 lower, 0.5 middle, 1 upper.
#[must_use]
pub fn bollinger_position(change_percent: f64, volatility: f64) -> f64 {
    if volatility <= 0.0 || !volatility.is_finite() {
        return 0.5;
    }
    (0.5 + (change_percent / 100.0) / (2.0 * volatility)).clamp(0.0, 1.0)
}

/// Builds the 15-element feature vector for one symbol.
///
/// # Errors
/// Returns [`SnapshotError`] when the snapshot fails validation.
pub fn extract_features(
    symbol: &str,
    snapshot: &MarketSnapshot,
) -> Result<FeatureVector, SnapshotError> {
    let price_dec = snapshot.validate(symbol)?;
    let price = to_f64(price_dec);
    let open = snapshot.open_price.map_or(price, to_f64);
    let high = snapshot.high_price.map_or(price, to_f64);
    let low = snapshot.low_price.map_or(price, to_f64);
    let volume = snapshot.volume.map_or(0.0, to_f64).max(0.0);

    let price_change = if open > 0.0 { (price - open) / open } else { 0.0 };
    let price_range = (high - low) / price;
    let change_percent = snapshot.change_percent.unwrap_or(price_change * 100.0);

    let volume_ratio = match snapshot.avg_volume.map(to_f64) {
        Some(avg) if avg > 0.0 => volume / avg,
        _ => 1.0,
    };

    let ma_ratio = |ma: Option<Decimal>| match ma.map(to_f64) {
        Some(ma) if ma > 0.0 => price / ma - 1.0,
        _ => 0.0,
    };

    Ok(FeatureVector::new([
        price_change,
        price_range,
        rsi_from_change(change_percent),
        macd_from_change(change_percent),
        bollinger_position(change_percent, snapshot.volatility),
        snapshot.sentiment_score,
        snapshot.news_sentiment,
        snapshot.social_sentiment,
        volume_ratio,
        snapshot.market_trend,
        snapshot.sector_performance,
        snapshot.volatility,
        (volume + 1.0).ln(),
        ma_ratio(snapshot.moving_average(snapshot.ma_20, 20)),
        ma_ratio(snapshot.moving_average(snapshot.ma_50, 50)),
    ]))
}
