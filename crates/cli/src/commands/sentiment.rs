//! Sentiment CLI command.
//!
//! Fans out to the simulated feeds and prints the aggregated report as JSON.

use anyhow::Result;
use clap::Args;
use stock_ai_core::AppConfig;
use stock_ai_sentiment::SentimentCollector;

/// Arguments for the sentiment command.
#[derive(Args, Debug, Clone)]
pub struct SentimentArgs {
    /// Ticker symbol (e.g., "AAPL")
    #[arg(long)]
    pub symbol: String,

    /// Seed for the simulated feeds (overrides config)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Per-feed timeout in milliseconds (overrides config)
    #[arg(long)]
    pub timeout_ms: Option<u64>,
}

/// Runs the sentiment command.
///
/// # Errors
/// Returns an error if the report cannot be serialized.
pub async fn run_sentiment(args: SentimentArgs, config: &AppConfig) -> Result<()> {
    let mut sentiment_config = config.sentiment.clone();
    if args.seed.is_some() {
        sentiment_config.seed = args.seed;
    }
    if let Some(timeout_ms) = args.timeout_ms {
        sentiment_config.fetch_timeout_ms = timeout_ms;
    }

    let symbol = args.symbol.to_uppercase();
    let collector = SentimentCollector::simulated(&sentiment_config);
    tracing::info!(%symbol, feeds = collector.feed_count(), "Collecting sentiment");

    let report = collector.collect(&symbol).await;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
