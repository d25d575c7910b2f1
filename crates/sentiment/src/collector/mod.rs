//! Concurrent, best-effort sentiment collection.
//!
//! Every feed is fetched concurrently under its own timeout. Feeds that fail
//! or time out contribute a zero-confidence reading instead of aborting the
//! aggregation.

mod feed;
mod simulated;

pub use feed::{PostFeed, SentimentFeed};
pub use simulated::{SimulatedFeed, SimulationProfile};

use crate::aggregator::{CombinedSentiment, SentimentAggregator};
use crate::insights::{generate_insights, predict_trend, TrendPrediction};
use chrono::{DateTime, Utc};
use futures_util::future::join_all;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use stock_ai_core::{SentimentConfig, SentimentLabel, SourceReading};

/// Overall confidence reported when no feed produced data.
pub const FALLBACK_CONFIDENCE: f64 = 0.3;

/// Combined sentiment plus commentary, as served to reporting layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentReport {
    pub sentiment: CombinedSentiment,
    pub insights: Vec<String>,
    pub trend: TrendPrediction,
    pub generated_at: DateTime<Utc>,
}

impl SentimentReport {
    /// Builds a report from an aggregate.
    #[must_use]
    pub fn from_sentiment(sentiment: CombinedSentiment) -> Self {
        let insights = generate_insights(&sentiment);
        let trend = predict_trend(&sentiment);
        Self {
            sentiment,
            insights,
            trend,
            generated_at: Utc::now(),
        }
    }

    /// Neutral report used when no feed is configured.
    #[must_use]
    pub fn fallback(symbol: &str) -> Self {
        Self {
            sentiment: CombinedSentiment {
                symbol: symbol.to_string(),
                combined_sentiment: 0.0,
                label: SentimentLabel::Neutral,
                overall_confidence: FALLBACK_CONFIDENCE,
                total_volume: 0,
                source_breakdown: Vec::new(),
            },
            insights: vec!["Limited data available - using fallback analysis".to_string()],
            trend: TrendPrediction::unknown(),
            generated_at: Utc::now(),
        }
    }

    /// Returns true when this is a fallback report rather than measured data.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.sentiment.source_breakdown.is_empty()
    }
}

/// Fans out to a fixed set of feeds and aggregates whatever comes back.
pub struct SentimentCollector {
    feeds: Vec<Box<dyn SentimentFeed>>,
    aggregator: SentimentAggregator,
    timeout: Duration,
}

impl SentimentCollector {
    #[must_use]
    pub fn new(aggregator: SentimentAggregator, timeout: Duration) -> Self {
        Self {
            feeds: Vec::new(),
            aggregator,
            timeout,
        }
    }

    /// Creates a collector with the configured weights and timeout and no feeds.
    #[must_use]
    pub fn from_config(config: &SentimentConfig) -> Self {
        Self::new(
            SentimentAggregator::new(config.weights.clone()),
            Duration::from_millis(config.fetch_timeout_ms),
        )
    }

    /// Creates a collector over the simulated demo feeds.
    #[must_use]
    pub fn simulated(config: &SentimentConfig) -> Self {
        SimulationProfile::all()
            .into_iter()
            .enumerate()
            .fold(Self::from_config(config), |collector, (i, profile)| {
                let seed = config.seed.map(|s| s.wrapping_add(i as u64));
                collector.with_feed(Box::new(SimulatedFeed::new(profile, seed)))
            })
    }

    /// Adds a feed.
    pub fn add_feed(&mut self, feed: Box<dyn SentimentFeed>) {
        self.feeds.push(feed);
    }

    /// Builder method to add a feed.
    #[must_use]
    pub fn with_feed(mut self, feed: Box<dyn SentimentFeed>) -> Self {
        self.feeds.push(feed);
        self
    }

    #[must_use]
    pub fn feed_count(&self) -> usize {
        self.feeds.len()
    }

    /// Fetches every feed concurrently; failures become zero-confidence readings.
    ///
    /// Readings are returned in feed order.
    pub async fn fetch_readings(&self, symbol: &str) -> Vec<SourceReading> {
        let fetches = self.feeds.iter().map(|feed| async move {
            let source = feed.source();
            match tokio::time::timeout(self.timeout, feed.fetch(symbol)).await {
                Ok(Ok(reading)) => reading,
                Ok(Err(e)) => {
                    tracing::warn!(%symbol, %source, "Sentiment feed failed: {e}");
                    SourceReading::unavailable(source)
                }
                Err(_) => {
                    let timeout_ms = self.timeout.as_millis() as u64;
                    tracing::warn!(%symbol, %source, timeout_ms, "Sentiment feed timed out");
                    SourceReading::unavailable(source)
                }
            }
        });

        join_all(fetches).await
    }

    /// Collects from all feeds and builds a report.
    ///
    /// Failed feeds still appear in the breakdown with zero confidence, so a
    /// collection where every feed failed aggregates to confidence 0. Returns
    /// the fallback report only when no feed is configured.
    pub async fn collect(&self, symbol: &str) -> SentimentReport {
        if self.feeds.is_empty() {
            tracing::warn!(%symbol, "No sentiment feeds configured, using fallback");
            return SentimentReport::fallback(symbol);
        }

        let readings = self.fetch_readings(symbol).await;
        if readings.iter().all(SourceReading::is_unavailable) {
            tracing::warn!(%symbol, feeds = readings.len(), "No sentiment data available");
        }

        let sentiment = self.aggregator.aggregate(symbol, &readings);
        tracing::debug!(
            %symbol,
            score = sentiment.combined_sentiment,
            confidence = sentiment.overall_confidence,
            label = %sentiment.label,
            "Aggregated sentiment"
        );

        SentimentReport::from_sentiment(sentiment)
    }
}
