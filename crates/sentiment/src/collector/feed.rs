use crate::text::{Post, PostScorer};
use anyhow::Result;
use async_trait::async_trait;
use stock_ai_core::{SentimentSource, SourceReading};

/// A source of sentiment readings for a symbol.
///
/// Fetches are independent and side-effect free, so the collector may run
/// them concurrently and drop any that exceed the timeout.
#[async_trait]
pub trait SentimentFeed: Send + Sync {
    /// Returns the source this feed reports as.
    fn source(&self) -> SentimentSource;

    /// Fetches the current reading for `symbol`.
    ///
    /// # Errors
    /// Returns error if the upstream source cannot be reached or parsed.
    async fn fetch(&self, symbol: &str) -> Result<SourceReading>;
}

/// Feed over a fixed batch of posts, scored with the keyword lexicon.
///
/// Only posts mentioning the symbol (case-insensitive) are scored.
pub struct PostFeed {
    source: SentimentSource,
    posts: Vec<Post>,
    scorer: PostScorer,
}

impl PostFeed {
    /// # Errors
    /// Returns an error if the post scorer cannot be built.
    pub fn new(source: SentimentSource, posts: Vec<Post>) -> Result<Self> {
        Ok(Self {
            source,
            posts,
            scorer: PostScorer::new()?,
        })
    }
}

#[async_trait]
impl SentimentFeed for PostFeed {
    fn source(&self) -> SentimentSource {
        self.source.clone()
    }

    async fn fetch(&self, symbol: &str) -> Result<SourceReading> {
        let needle = symbol.to_lowercase();
        let relevant: Vec<Post> = self
            .posts
            .iter()
            .filter(|p| p.text.to_lowercase().contains(&needle))
            .cloned()
            .collect();

        Ok(self.scorer.reading_from_posts(self.source.clone(), &relevant))
    }
}
