//! CLI commands for the sentiment and trading pipeline.

pub mod analyze;
pub mod profiles;
pub mod sentiment;

pub use analyze::{run_analyze, AnalyzeArgs};
pub use profiles::run_profiles;
pub use sentiment::{run_sentiment, SentimentArgs};
