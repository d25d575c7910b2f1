//! Lexical sentiment scoring for social posts.
//!
//! Turns raw post text into a [`SourceReading`] using a financial keyword
//! lexicon, engagement weighting, and a consistency-based confidence.

use anyhow::{anyhow, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use stock_ai_core::{SentimentSource, SourceReading};

const URL_PATTERN: &str = r"https?\S+|www\S+";
const TAG_PATTERN: &str = r"[@#]\w+";

/// Posts shorter than this after cleaning are skipped.
pub const MIN_POST_LEN: usize = 10;

const BULLISH_KEYWORDS: &[&str] = &[
    "moon",
    "rocket",
    "diamond hands",
    "hodl",
    "buy the dip",
    "bullish",
    "calls",
    "long",
    "pump",
    "squeeze",
    "breakout",
];

const BEARISH_KEYWORDS: &[&str] = &[
    "crash", "dump", "bear", "puts", "short", "sell", "bearish", "drop", "fall", "decline",
    "bubble",
];

/// A social post with its engagement count (likes, upvotes, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub text: String,
    pub engagement: u64,
}

impl Post {
    #[must_use]
    pub fn new(text: impl Into<String>, engagement: u64) -> Self {
        Self {
            text: text.into(),
            engagement,
        }
    }
}

/// Compiles one of the cleaning patterns.
///
/// # Errors
/// Returns an error if the pattern is invalid regex.
fn compile_pattern(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| anyhow!("Invalid regex pattern '{}': {}", pattern, e))
}

/// Cleans and scores social posts.
///
/// Holds the compiled cleaning patterns; build one and reuse it.
#[derive(Debug, Clone)]
pub struct PostScorer {
    urls: Regex,
    tags: Regex,
}

impl PostScorer {
    /// # Errors
    /// Returns an error if a cleaning pattern fails to compile.
    pub fn new() -> Result<Self> {
        Ok(Self {
            urls: compile_pattern(URL_PATTERN)?,
            tags: compile_pattern(TAG_PATTERN)?,
        })
    }

    /// Strips URLs, @mentions and #hashtags, and collapses whitespace.
    #[must_use]
    pub fn clean_text(&self, text: &str) -> String {
        let without_urls = self.urls.replace_all(text, "");
        let without_tags = self.tags.replace_all(&without_urls, "");
        without_tags.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Scores a batch of posts into one reading for `source`.
    ///
    /// Each post is weighted by `max(1, engagement)`. Returns an unavailable
    /// reading when no post survives cleaning.
    #[must_use]
    pub fn reading_from_posts(&self, source: SentimentSource, posts: &[Post]) -> SourceReading {
        let mut scores = Vec::with_capacity(posts.len());
        let mut weights = Vec::with_capacity(posts.len());

        for post in posts {
            let text = self.clean_text(&post.text);
            if text.len() < MIN_POST_LEN {
                continue;
            }
            scores.push(financial_context_sentiment(&text));
            weights.push(post.engagement.max(1) as f64);
        }

        if scores.is_empty() {
            return SourceReading::unavailable(source);
        }

        let total_weight: f64 = weights.iter().sum();
        let sentiment = scores.iter().zip(&weights).map(|(s, w)| s * w).sum::<f64>() / total_weight;

        SourceReading {
            source,
            sentiment: sentiment.clamp(-1.0, 1.0),
            confidence: consistency_confidence(&scores, &weights),
            volume: scores.len() as u64,
        }
    }
}

/// Keyword balance in [-1.0, 1.0]: (bullish hits - bearish hits) / total hits.
///
/// Returns 0 when no keyword matches.
#[must_use]
pub fn financial_context_sentiment(text: &str) -> f64 {
    let lower = text.to_lowercase();
    let bullish = BULLISH_KEYWORDS.iter().filter(|k| lower.contains(*k)).count();
    let bearish = BEARISH_KEYWORDS.iter().filter(|k| lower.contains(*k)).count();

    let total = bullish + bearish;
    if total == 0 {
        return 0.0;
    }
    (bullish as f64 - bearish as f64) / total as f64
}

/// Confidence from agreement between scores and the size of the sample.
///
/// `max(0.1, 1 - σ/2) + min(0.2, n/100)`, capped at 0.95, where σ is the
/// weighted standard deviation. Returns 0 for an empty sample.
#[must_use]
pub fn consistency_confidence(scores: &[f64], weights: &[f64]) -> f64 {
    let total_weight: f64 = weights.iter().take(scores.len()).sum();
    if scores.is_empty() || total_weight <= 0.0 {
        return 0.0;
    }

    let mean = scores.iter().zip(weights).map(|(s, w)| s * w).sum::<f64>() / total_weight;
    let variance = scores
        .iter()
        .zip(weights)
        .map(|(s, w)| w * (s - mean).powi(2))
        .sum::<f64>()
        / total_weight;
    let std_dev = variance.sqrt();

    let base = (1.0 - std_dev / 2.0).max(0.1);
    let volume_boost = (scores.len() as f64 / 100.0).min(0.2);

    (base + volume_boost).min(0.95)
}
