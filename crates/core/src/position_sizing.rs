use anyhow::Result;
use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places kept on share quantities.
pub const SHARE_DECIMALS: u32 = 8;

/// Volatility dampening factor: `1 / (1 + 10 × volatility)`.
///
/// Calmer symbols get larger positions. Negative or non-finite volatility
/// is treated as zero.
#[must_use]
pub fn volatility_dampening(volatility: f64) -> f64 {
    let vol = if volatility.is_finite() { volatility.max(0.0) } else { 0.0 };
    1.0 / (1.0 + vol * 10.0)
}

/// Calculate a confidence-scaled position size
///
/// # Arguments
/// * `capital` - Capital available to the bot
/// * `max_position_fraction` - Maximum position as fraction of capital (0.0-1.0)
/// * `confidence` - Scorer confidence (0.0-1.0)
/// * `volatility` - Daily volatility of the symbol (e.g. 0.02)
/// * `price` - Entry price
///
/// # Returns
/// Share quantity, rounded down to [`SHARE_DECIMALS`] places
///
/// # Errors
/// Returns error if parameters are invalid
pub fn confidence_scaled_shares(
    capital: Decimal,
    max_position_fraction: f64,
    confidence: f64,
    volatility: f64,
    price: Decimal,
) -> Result<Decimal> {
    if price <= Decimal::ZERO {
        anyhow::bail!("Entry price must be positive");
    }
    if !(0.0..=1.0).contains(&max_position_fraction) {
        anyhow::bail!("Max position fraction must be between 0 and 1");
    }
    if !(0.0..=1.0).contains(&confidence) {
        anyhow::bail!("Confidence must be between 0 and 1");
    }
    if capital <= Decimal::ZERO {
        return Ok(Decimal::ZERO);
    }

    // Position value = capital × max fraction × confidence × dampening
    let scale =
        Decimal::try_from(max_position_fraction * confidence * volatility_dampening(volatility))?;
    let position_value = capital * scale;

    Ok(round_shares(position_value / price))
}

/// Rounds a share quantity down to [`SHARE_DECIMALS`] places so cost never
/// exceeds the value it was derived from.
#[must_use]
pub fn round_shares(shares: Decimal) -> Decimal {
    shares.round_dp_with_strategy(SHARE_DECIMALS, RoundingStrategy::ToZero)
}
