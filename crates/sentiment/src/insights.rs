//! Human-readable commentary and short-horizon trend calls on a combined sentiment.

use crate::aggregator::CombinedSentiment;
use serde::{Deserialize, Serialize};
use stock_ai_core::SentimentSource;

/// Expected direction of sentiment over the next horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Improving,
    Declining,
    Stable,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPrediction {
    pub trend: Trend,
    pub probability: f64,
    pub time_horizon: String,
    pub key_factors: Vec<String>,
}

impl TrendPrediction {
    /// Prediction used when no source produced data.
    #[must_use]
    pub fn unknown() -> Self {
        Self {
            trend: Trend::Unknown,
            probability: 0.5,
            time_horizon: "24h".to_string(),
            key_factors: Vec::new(),
        }
    }
}

/// Generates commentary from volume, score, and notable per-source readings.
#[must_use]
pub fn generate_insights(sentiment: &CombinedSentiment) -> Vec<String> {
    let mut insights = Vec::new();
    let score = sentiment.combined_sentiment;
    let confidence = sentiment.overall_confidence;

    if sentiment.total_volume > 500 {
        insights.push(
            "High social media activity detected - increased market attention".to_string(),
        );
    } else if sentiment.total_volume < 50 {
        insights.push("Low social media volume - limited retail interest".to_string());
    }

    if score > 0.3 && confidence > 0.8 {
        insights.push("Strong bullish sentiment with high confidence".to_string());
    } else if score < -0.3 && confidence > 0.8 {
        insights.push("Strong bearish sentiment with high confidence".to_string());
    } else if score.abs() < 0.1 {
        insights.push("Neutral sentiment - market indecision".to_string());
    }

    if sentiment
        .contribution(&SentimentSource::Forum)
        .is_some_and(|c| c.sentiment > 0.4)
    {
        insights.push("Forum discussion shows strong holder conviction".to_string());
    }
    if sentiment
        .contribution(&SentimentSource::Microblog)
        .is_some_and(|c| c.volume > 200)
    {
        insights.push("High microblog engagement - viral potential".to_string());
    }

    insights
}

/// Predicts the next-24h sentiment trend from the current combined score.
#[must_use]
pub fn predict_trend(sentiment: &CombinedSentiment) -> TrendPrediction {
    let score = sentiment.combined_sentiment;
    let confidence = sentiment.overall_confidence;

    let (trend, probability) = if score > 0.2 {
        (Trend::Improving, (confidence + 0.1).min(0.9))
    } else if score < -0.2 {
        (Trend::Declining, (confidence + 0.1).min(0.9))
    } else {
        (Trend::Stable, confidence)
    };

    TrendPrediction {
        trend,
        probability,
        time_horizon: "24h".to_string(),
        key_factors: vec![
            "Social media momentum".to_string(),
            "News sentiment".to_string(),
            "Market conditions".to_string(),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::SentimentAggregator;
    use stock_ai_core::SourceReading;

    fn combined(readings: &[SourceReading]) -> CombinedSentiment {
        SentimentAggregator::default().aggregate("AAPL", readings)
    }

    #[test]
    fn low_volume_and_indecision() {
        let s = combined(&[SourceReading::new(SentimentSource::News, 0.05, 0.9, 10).unwrap()]);
        let insights = generate_insights(&s);

        assert_eq!(insights.len(), 2);
        assert!(insights[0].starts_with("Low social media volume"));
        assert!(insights[1].starts_with("Neutral sentiment"));
    }

    #[test]
    fn forum_and_microblog_notes() {
        let s = combined(&[
            SourceReading::new(SentimentSource::Forum, 0.6, 0.9, 100).unwrap(),
            SourceReading::new(SentimentSource::Microblog, 0.2, 0.8, 450).unwrap(),
        ]);
        let insights = generate_insights(&s);

        assert!(insights.iter().any(|i| i.starts_with("High social media activity")));
        assert!(insights.iter().any(|i| i.starts_with("Forum discussion")));
        assert!(insights.iter().any(|i| i.starts_with("High microblog engagement")));
    }

    #[test]
    fn strong_bullish_requires_high_confidence() {
        let mut s = combined(&[SourceReading::new(SentimentSource::News, 0.6, 1.0, 100).unwrap()]);
        // 0.35 confidence is not enough
        assert!(!generate_insights(&s).iter().any(|i| i.starts_with("Strong bullish")));

        s.overall_confidence = 0.9;
        assert!(generate_insights(&s).iter().any(|i| i.starts_with("Strong bullish")));
    }

    #[test]
    fn trend_follows_score() {
        let up = combined(&[SourceReading::new(SentimentSource::News, 0.5, 1.0, 1).unwrap()]);
        let prediction = predict_trend(&up);
        assert_eq!(prediction.trend, Trend::Improving);
        assert!((prediction.probability - 0.45).abs() < 1e-12);

        let down = combined(&[SourceReading::new(SentimentSource::News, -0.5, 1.0, 1).unwrap()]);
        assert_eq!(predict_trend(&down).trend, Trend::Declining);

        let flat = combined(&[SourceReading::new(SentimentSource::News, 0.1, 1.0, 1).unwrap()]);
        let prediction = predict_trend(&flat);
        assert_eq!(prediction.trend, Trend::Stable);
        assert!((prediction.probability - 0.35).abs() < 1e-12);
    }

    #[test]
    fn trend_probability_is_capped() {
        let mut s = combined(&[SourceReading::new(SentimentSource::News, 0.9, 1.0, 1).unwrap()]);
        s.overall_confidence = 0.95;
        assert!((predict_trend(&s).probability - 0.9).abs() < f64::EPSILON);
    }
}
