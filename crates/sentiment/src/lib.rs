//! Multi-source sentiment collection and aggregation.

pub mod aggregator;
pub mod collector;
pub mod insights;
pub mod text;

pub use aggregator::{CombinedSentiment, SentimentAggregator, SourceContribution, MAX_CONFIDENCE};
pub use collector::{
    PostFeed, SentimentCollector, SentimentFeed, SentimentReport, SimulatedFeed, SimulationProfile,
};
pub use insights::{generate_insights, predict_trend, Trend, TrendPrediction};
pub use text::{consistency_confidence, financial_context_sentiment, Post, PostScorer};
