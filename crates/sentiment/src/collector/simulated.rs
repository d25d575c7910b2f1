//! Simulated feeds for sources without a live integration.

use super::feed::SentimentFeed;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::sync::Mutex;
use stock_ai_core::{SentimentSource, SourceReading};

/// Distribution parameters for a simulated source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationProfile {
    /// N(0, 0.3) sentiment, confidence U(0.6, 0.9), 50-199 items
    Video,
    /// N(0, 0.2) sentiment, confidence U(0.7, 0.95), 10-49 items
    News,
    /// Trend direction {-1, 0, 1} × 0.2 plus N(0, 0.1) noise, confidence 0.6, 50-99 searches
    Trends,
}

impl SimulationProfile {
    #[must_use]
    pub fn all() -> Vec<Self> {
        vec![Self::Video, Self::News, Self::Trends]
    }

    #[must_use]
    pub const fn source(self) -> SentimentSource {
        match self {
            Self::Video => SentimentSource::Video,
            Self::News => SentimentSource::News,
            Self::Trends => SentimentSource::Trends,
        }
    }

    fn sample(self, rng: &mut ChaCha8Rng) -> (f64, f64, u64) {
        match self {
            Self::Video => (
                normal(rng, 0.0, 0.3),
                rng.gen_range(0.6..0.9),
                rng.gen_range(50..200),
            ),
            Self::News => (
                normal(rng, 0.0, 0.2),
                rng.gen_range(0.7..0.95),
                rng.gen_range(10..50),
            ),
            Self::Trends => {
                let roll: f64 = rng.gen();
                let direction = if roll < 0.3 {
                    -1.0
                } else if roll < 0.7 {
                    0.0
                } else {
                    1.0
                };
                (
                    direction * 0.2 + normal(rng, 0.0, 0.1),
                    0.6,
                    rng.gen_range(50..100),
                )
            }
        }
    }
}

/// Standard Box-Muller transform.
fn normal(rng: &mut ChaCha8Rng, mean: f64, std_dev: f64) -> f64 {
    let u1: f64 = 1.0 - rng.gen::<f64>();
    let u2: f64 = rng.gen();
    let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
    mean + std_dev * z
}

/// Demo feed drawing readings from a fixed distribution.
pub struct SimulatedFeed {
    profile: SimulationProfile,
    rng: Mutex<ChaCha8Rng>,
}

impl SimulatedFeed {
    /// Creates a feed; `None` seeds from entropy.
    #[must_use]
    pub fn new(profile: SimulationProfile, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self {
            profile,
            rng: Mutex::new(rng),
        }
    }
}

#[async_trait]
impl SentimentFeed for SimulatedFeed {
    fn source(&self) -> SentimentSource {
        self.profile.source()
    }

    async fn fetch(&self, _symbol: &str) -> Result<SourceReading> {
        let (sentiment, confidence, volume) = {
            let mut rng = self
                .rng
                .lock()
                .map_err(|_| anyhow!("simulated feed RNG poisoned"))?;
            self.profile.sample(&mut rng)
        };

        Ok(SourceReading {
            source: self.profile.source(),
            sentiment: sentiment.clamp(-1.0, 1.0),
            confidence,
            volume,
        })
    }
}
