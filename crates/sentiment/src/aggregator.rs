//! Weighted combination of per-source sentiment readings.
//!
//! Each reading contributes with an effective weight of
//! `reliability(source) × confidence`. The combined score is the weighted
//! average of the per-source scores and the overall confidence is the total
//! effective weight, capped at [`MAX_CONFIDENCE`].

use serde::{Deserialize, Serialize};
use stock_ai_core::{SentimentLabel, SentimentSource, SourceReading, SourceWeights};

/// Upper bound on overall confidence.
pub const MAX_CONFIDENCE: f64 = 0.95;

/// One source's share of a combined sentiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceContribution {
    pub source: SentimentSource,
    pub sentiment: f64,
    pub confidence: f64,
    pub volume: u64,
    /// Effective weight: reliability × confidence
    pub weight: f64,
}

/// Sentiment for one symbol, combined across sources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedSentiment {
    pub symbol: String,
    /// Weighted sentiment in [-1.0, 1.0]
    pub combined_sentiment: f64,
    pub label: SentimentLabel,
    /// Total effective weight, in [0.0, 0.95]
    pub overall_confidence: f64,
    pub total_volume: u64,
    /// Per-source contributions, in input order
    pub source_breakdown: Vec<SourceContribution>,
}

impl CombinedSentiment {
    /// Returns the first contribution from `source`, if any.
    #[must_use]
    pub fn contribution(&self, source: &SentimentSource) -> Option<&SourceContribution> {
        self.source_breakdown.iter().find(|c| &c.source == source)
    }
}

/// Combines source readings using fixed reliability weights.
#[derive(Debug, Clone, Default)]
pub struct SentimentAggregator {
    weights: SourceWeights,
}

impl SentimentAggregator {
    #[must_use]
    pub const fn new(weights: SourceWeights) -> Self {
        Self { weights }
    }

    #[must_use]
    pub const fn weights(&self) -> &SourceWeights {
        &self.weights
    }

    /// Combines readings into one score, confidence, and label.
    ///
    /// Readings with non-finite values count as zero-confidence. An empty
    /// input, or one where every confidence is zero, yields a neutral score.
    #[must_use]
    pub fn aggregate(&self, symbol: &str, readings: &[SourceReading]) -> CombinedSentiment {
        let mut weighted_sum = 0.0;
        let mut total_weight = 0.0;
        let mut total_volume: u64 = 0;
        let mut source_breakdown = Vec::with_capacity(readings.len());

        for reading in readings {
            let (sentiment, confidence) = sanitize(reading);
            let reliability = self.weights.reliability(&reading.source);
            let reliability = if reliability.is_finite() { reliability.max(0.0) } else { 0.0 };
            let weight = reliability * confidence;

            weighted_sum += sentiment * weight;
            total_weight += weight;
            total_volume = total_volume.saturating_add(reading.volume);

            source_breakdown.push(SourceContribution {
                source: reading.source.clone(),
                sentiment,
                confidence,
                volume: reading.volume,
                weight,
            });
        }

        let combined_sentiment = if total_weight > 0.0 {
            (weighted_sum / total_weight).clamp(-1.0, 1.0)
        } else {
            0.0
        };

        CombinedSentiment {
            symbol: symbol.to_string(),
            combined_sentiment,
            label: SentimentLabel::from_score(combined_sentiment),
            overall_confidence: total_weight.min(MAX_CONFIDENCE),
            total_volume,
            source_breakdown,
        }
    }
}

/// Clamps a reading into range; malformed readings lose all confidence.
fn sanitize(reading: &SourceReading) -> (f64, f64) {
    if !reading.sentiment.is_finite() || !reading.confidence.is_finite() {
        return (0.0, 0.0);
    }
    (
        reading.sentiment.clamp(-1.0, 1.0),
        reading.confidence.clamp(0.0, 1.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn reading(
        source: SentimentSource,
        sentiment: f64,
        confidence: f64,
        volume: u64,
    ) -> SourceReading {
        SourceReading {
            source,
            sentiment,
            confidence,
            volume,
        }
    }

    fn random_readings(rng: &mut ChaCha8Rng) -> Vec<SourceReading> {
        let sources = [
            SentimentSource::News,
            SentimentSource::Forum,
            SentimentSource::Microblog,
            SentimentSource::Video,
            SentimentSource::Trends,
            SentimentSource::Other("stocktwits".to_string()),
        ];
        let n = rng.gen_range(0..=sources.len());
        (0..n)
            .map(|i| {
                reading(
                    sources[i].clone(),
                    rng.gen_range(-1.0..=1.0),
                    rng.gen_range(0.0..=1.0),
                    rng.gen_range(0..500),
                )
            })
            .collect()
    }

    #[test]
    fn three_source_scenario() {
        let agg = SentimentAggregator::default();
        let result = agg.aggregate(
            "AAPL",
            &[
                reading(SentimentSource::News, 0.5, 0.9, 30),
                reading(SentimentSource::Forum, -0.2, 0.5, 10),
                reading(SentimentSource::Trends, 0.1, 0.6, 5),
            ],
        );

        // weights: 0.35 × 0.9 = 0.315, 0.30 × 0.5 = 0.15, 0.05 × 0.6 = 0.03
        let total_weight = 0.315 + 0.15 + 0.03;
        let expected = (0.5 * 0.315 - 0.2 * 0.15 + 0.1 * 0.03) / total_weight;

        assert!((result.combined_sentiment - expected).abs() < 1e-12);
        assert!((result.combined_sentiment - 0.263_636_363_636).abs() < 1e-9);
        assert!((result.overall_confidence - total_weight).abs() < 1e-12);
        assert_eq!(result.label, SentimentLabel::Bullish);
        assert_eq!(result.total_volume, 45);
        assert_eq!(result.source_breakdown.len(), 3);

        let news = result.contribution(&SentimentSource::News).unwrap();
        assert!((news.weight - 0.315).abs() < 1e-12);
    }

    #[test]
    fn empty_input_is_neutral() {
        let result = SentimentAggregator::default().aggregate("AAPL", &[]);

        assert_eq!(result.combined_sentiment, 0.0);
        assert_eq!(result.overall_confidence, 0.0);
        assert_eq!(result.label, SentimentLabel::Neutral);
        assert_eq!(result.total_volume, 0);
    }

    #[test]
    fn zero_confidence_everywhere_is_neutral() {
        let result = SentimentAggregator::default().aggregate(
            "TSLA",
            &[
                reading(SentimentSource::News, 0.9, 0.0, 12),
                reading(SentimentSource::Microblog, -0.9, 0.0, 40),
                SourceReading::unavailable(SentimentSource::Forum),
            ],
        );

        assert_eq!(result.combined_sentiment, 0.0);
        assert_eq!(result.label, SentimentLabel::Neutral);
        assert_eq!(result.overall_confidence, 0.0);
        // Volume still counts
        assert_eq!(result.total_volume, 52);
    }

    #[test]
    fn malformed_readings_are_ignored() {
        let result = SentimentAggregator::default().aggregate(
            "NVDA",
            &[
                reading(SentimentSource::News, f64::NAN, 0.9, 1),
                reading(SentimentSource::Forum, 0.4, f64::INFINITY, 1),
                reading(SentimentSource::Microblog, -0.5, 0.8, 1),
            ],
        );

        assert!((result.combined_sentiment + 0.5).abs() < 1e-12);
        assert!((result.overall_confidence - 0.2).abs() < 1e-12);
        assert_eq!(result.label, SentimentLabel::Bearish);
    }

    #[test]
    fn confidence_is_capped() {
        let weights = SourceWeights {
            news: 0.8,
            forum: 0.8,
            ..SourceWeights::default()
        };
        let result = SentimentAggregator::new(weights).aggregate(
            "MSFT",
            &[
                reading(SentimentSource::News, 0.2, 1.0, 1),
                reading(SentimentSource::Forum, 0.2, 1.0, 1),
            ],
        );
        assert!((result.overall_confidence - MAX_CONFIDENCE).abs() < f64::EPSILON);
    }

    #[test]
    fn unknown_sources_use_default_weight() {
        let result = SentimentAggregator::default().aggregate(
            "META",
            &[reading(SentimentSource::Other("stocktwits".into()), -0.6, 1.0, 3)],
        );
        assert!((result.overall_confidence - 0.10).abs() < 1e-12);
        assert_eq!(result.label, SentimentLabel::Bearish);
    }

    #[test]
    fn outputs_stay_in_range_for_random_inputs() {
        let agg = SentimentAggregator::default();
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        for _ in 0..1_000 {
            let readings = random_readings(&mut rng);
            let result = agg.aggregate("AAPL", &readings);

            assert!((-1.0..=1.0).contains(&result.combined_sentiment));
            assert!((0.0..=MAX_CONFIDENCE).contains(&result.overall_confidence));
        }
    }

    #[test]
    fn label_is_monotonic_in_sentiment() {
        let agg = SentimentAggregator::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        for _ in 0..1_000 {
            let readings = random_readings(&mut rng);
            let shift: f64 = rng.gen_range(0.0..=1.0);
            let raised: Vec<SourceReading> = readings
                .iter()
                .map(|r| SourceReading {
                    sentiment: (r.sentiment + shift).min(1.0),
                    ..r.clone()
                })
                .collect();

            let before = agg.aggregate("AAPL", &readings);
            let after = agg.aggregate("AAPL", &raised);

            assert!(after.combined_sentiment >= before.combined_sentiment - 1e-12);
            let flipped = before.label == SentimentLabel::Bullish
                && after.label == SentimentLabel::Bearish;
            assert!(!flipped);
        }
    }

    #[test]
    fn aggregation_is_idempotent() {
        let agg = SentimentAggregator::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1234);

        for _ in 0..100 {
            let readings = random_readings(&mut rng);
            let a = agg.aggregate("GOOGL", &readings);
            let b = agg.aggregate("GOOGL", &readings);

            assert_eq!(a.combined_sentiment.to_bits(), b.combined_sentiment.to_bits());
            assert_eq!(a.overall_confidence.to_bits(), b.overall_confidence.to_bits());
            assert_eq!(a, b);
        }
    }
}
