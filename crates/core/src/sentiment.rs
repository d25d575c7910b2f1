//! Sentiment reading types shared by collectors and the aggregator.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Origin of a sentiment reading.
///
/// Serializes as its report name (see [`SentimentSource::name`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum SentimentSource {
    /// Financial news feeds
    News,
    /// Discussion forums (e.g. Reddit)
    Forum,
    /// Microblogging (e.g. Twitter)
    Microblog,
    /// Video comments (e.g. YouTube)
    Video,
    /// Search-interest trends
    Trends,
    /// Any source without a dedicated reliability weight
    Other(String),
}

impl SentimentSource {
    /// Returns the stable source name used in reports.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::News => "news",
            Self::Forum => "reddit",
            Self::Microblog => "twitter",
            Self::Video => "youtube",
            Self::Trends => "google_trends",
            Self::Other(name) => name,
        }
    }

    /// Parses a report name back into a source. Unknown names become `Other`.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "news" => Self::News,
            "reddit" | "forum" => Self::Forum,
            "twitter" | "microblog" => Self::Microblog,
            "youtube" | "video" => Self::Video,
            "google_trends" | "trends" => Self::Trends,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<SentimentSource> for String {
    fn from(source: SentimentSource) -> Self {
        match source {
            SentimentSource::Other(name) => name,
            known => known.name().to_string(),
        }
    }
}

impl From<String> for SentimentSource {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl fmt::Display for SentimentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One collector's view of a symbol's sentiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceReading {
    pub source: SentimentSource,
    /// Sentiment score in [-1.0, 1.0]
    pub sentiment: f64,
    /// Collector confidence in [0.0, 1.0]
    pub confidence: f64,
    /// Number of items (posts, articles, ...) behind the reading
    pub volume: u64,
}

impl SourceReading {
    /// Creates a new reading with validation.
    ///
    /// # Errors
    /// Returns error if sentiment is outside [-1.0, 1.0] or confidence is outside [0.0, 1.0].
    pub fn new(
        source: SentimentSource,
        sentiment: f64,
        confidence: f64,
        volume: u64,
    ) -> Result<Self> {
        if !(-1.0..=1.0).contains(&sentiment) {
            anyhow::bail!("sentiment must be in [-1.0, 1.0], got {sentiment}");
        }
        if !(0.0..=1.0).contains(&confidence) {
            anyhow::bail!("confidence must be in [0.0, 1.0], got {confidence}");
        }
        Ok(Self {
            source,
            sentiment,
            confidence,
            volume,
        })
    }

    /// Zero-confidence placeholder for a source that failed or returned nothing.
    #[must_use]
    pub const fn unavailable(source: SentimentSource) -> Self {
        Self {
            source,
            sentiment: 0.0,
            confidence: 0.0,
            volume: 0,
        }
    }

    /// Returns true when the reading carries no information.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        self.confidence <= 0.0
    }
}

/// Fixed per-source reliability weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceWeights {
    pub news: f64,
    pub forum: f64,
    pub microblog: f64,
    pub video: f64,
    pub trends: f64,
    /// Weight for `SentimentSource::Other`
    pub default_weight: f64,
}

impl SourceWeights {
    /// Returns the reliability weight of a source.
    #[must_use]
    pub fn reliability(&self, source: &SentimentSource) -> f64 {
        match source {
            SentimentSource::News => self.news,
            SentimentSource::Forum => self.forum,
            SentimentSource::Microblog => self.microblog,
            SentimentSource::Video => self.video,
            SentimentSource::Trends => self.trends,
            SentimentSource::Other(_) => self.default_weight,
        }
    }
}

impl Default for SourceWeights {
    fn default() -> Self {
        Self {
            news: 0.35,
            forum: 0.30,
            microblog: 0.25,
            video: 0.05,
            trends: 0.05,
            default_weight: 0.10,
        }
    }
}

/// Direction label of a combined sentiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentLabel {
    Bullish,
    Bearish,
    Neutral,
}

impl SentimentLabel {
    /// Labels a sentiment score: above 0.1 is bullish, below -0.1 bearish.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score > 0.1 {
            Self::Bullish
        } else if score < -0.1 {
            Self::Bearish
        } else {
            Self::Neutral
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Bullish => "Bullish",
            Self::Bearish => "Bearish",
            Self::Neutral => "Neutral",
        };
        f.write_str(s)
    }
}
