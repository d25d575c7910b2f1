use anyhow::Result;
use stock_ai_core::RiskLevel;

/// Prints the risk presets as a table.
pub fn run_profiles() -> Result<()> {
    println!(
        "{:<14} {:>9} {:>9} {:>9} {:>9} {:>9} {:>6}",
        "level", "max_pos", "max_risk", "stop", "target", "min_conf", "slots"
    );
    println!("{}", "-".repeat(72));

    for level in [RiskLevel::Conservative, RiskLevel::Moderate, RiskLevel::Aggressive] {
        let p = level.profile();
        println!(
            "{:<14} {:>8.1}% {:>8.1}% {:>8.1}% {:>8.1}% {:>9.2} {:>6}",
            level.as_str(),
            p.max_position_fraction * 100.0,
            p.max_portfolio_risk * 100.0,
            p.stop_loss_pct * 100.0,
            p.take_profit_pct * 100.0,
            p.min_confidence,
            p.max_positions
        );
    }

    Ok(())
}
