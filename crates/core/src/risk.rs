use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Risk appetite preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Conservative,
    #[default]
    Moderate,
    Aggressive,
}

impl RiskLevel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Conservative => "CONSERVATIVE",
            Self::Moderate => "MODERATE",
            Self::Aggressive => "AGGRESSIVE",
        }
    }

    /// Returns the trading parameters fixed by this preset.
    #[must_use]
    pub const fn profile(self) -> RiskProfile {
        match self {
            Self::Conservative => RiskProfile {
                level: self,
                max_position_fraction: 0.05,
                max_portfolio_risk: 0.15,
                stop_loss_pct: 0.03,
                take_profit_pct: 0.06,
                min_confidence: 0.8,
                max_positions: 5,
            },
            Self::Moderate => RiskProfile {
                level: self,
                max_position_fraction: 0.10,
                max_portfolio_risk: 0.25,
                stop_loss_pct: 0.05,
                take_profit_pct: 0.10,
                min_confidence: 0.7,
                max_positions: 8,
            },
            Self::Aggressive => RiskProfile {
                level: self,
                max_position_fraction: 0.20,
                max_portfolio_risk: 0.40,
                stop_loss_pct: 0.08,
                take_profit_pct: 0.15,
                min_confidence: 0.6,
                max_positions: 12,
            },
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "conservative" => Ok(Self::Conservative),
            "moderate" => Ok(Self::Moderate),
            "aggressive" => Ok(Self::Aggressive),
            other => anyhow::bail!("unknown risk level: {other}"),
        }
    }
}

/// Trading parameters derived from a [`RiskLevel`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskProfile {
    pub level: RiskLevel,
    /// Maximum fraction of capital committed to one position (0.0-1.0)
    pub max_position_fraction: f64,
    /// Maximum fraction of capital at risk across the portfolio (0.0-1.0)
    pub max_portfolio_risk: f64,
    /// Stop-loss distance from entry as a fraction of price
    pub stop_loss_pct: f64,
    /// Take-profit distance from entry at full confidence
    pub take_profit_pct: f64,
    /// Decisions below this confidence are discarded
    pub min_confidence: f64,
    /// Maximum number of concurrently open positions
    pub max_positions: usize,
}

impl Default for RiskProfile {
    fn default() -> Self {
        RiskLevel::default().profile()
    }
}
