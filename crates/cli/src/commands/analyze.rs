//! Analyze CLI command.
//!
//! Loads a `{symbol: snapshot}` JSON map, optionally overlays simulated
//! sentiment, runs one trading session against a fresh ledger, and prints
//! the executed decisions, portfolio report, and insights as JSON.

use anyhow::{Context, Result};
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use stock_ai_core::{AppConfig, LedgerSnapshot, PositionLedger, RiskLevel, TradingDecision};
use stock_ai_sentiment::SentimentCollector;
use stock_ai_strategy::{MarketSnapshot, PerformanceReport, TradingBot};

/// Arguments for the analyze command.
#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Market snapshot JSON file (object keyed by symbol)
    #[arg(short, long)]
    pub snapshot: String,

    /// Starting capital (overrides config)
    #[arg(long)]
    pub capital: Option<Decimal>,

    /// Risk level: conservative, moderate, or aggressive (overrides config)
    #[arg(long)]
    pub risk_level: Option<RiskLevel>,

    /// Fill sentiment fields from the simulated feeds before deciding
    #[arg(long)]
    pub simulate_sentiment: bool,
}

#[derive(Debug, Serialize)]
struct SessionOutput {
    executed: Vec<TradingDecision>,
    ledger: LedgerSnapshot,
    report: PerformanceReport,
    insights: Vec<String>,
}

/// Parses a `{symbol: snapshot}` JSON document. Symbols are upper-cased.
fn parse_market(json: &str) -> Result<BTreeMap<String, MarketSnapshot>> {
    let raw: BTreeMap<String, MarketSnapshot> = serde_json::from_str(json)?;
    Ok(raw
        .into_iter()
        .map(|(symbol, snapshot)| (symbol.to_uppercase(), snapshot))
        .collect())
}

fn load_market(path: &Path) -> Result<BTreeMap<String, MarketSnapshot>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot file {}", path.display()))?;
    parse_market(&json).with_context(|| format!("Invalid snapshot file {}", path.display()))
}

/// Current prices used to mark open positions.
fn marks(market: &BTreeMap<String, MarketSnapshot>) -> HashMap<String, Decimal> {
    market
        .iter()
        .filter_map(|(symbol, snapshot)| snapshot.current_price.map(|p| (symbol.clone(), p)))
        .collect()
}

/// Runs the analyze command.
///
/// # Errors
/// Returns an error if the snapshot file cannot be read or parsed.
pub async fn run_analyze(args: AnalyzeArgs, config: &AppConfig) -> Result<()> {
    let mut trading = config.trading.clone();
    if let Some(capital) = args.capital {
        trading.initial_capital = capital;
    }
    if let Some(level) = args.risk_level {
        trading.risk_level = level;
    }

    let mut market = load_market(Path::new(&args.snapshot))?;
    tracing::info!(symbols = market.len(), path = %args.snapshot, "Loaded market snapshot");

    if args.simulate_sentiment {
        let collector = SentimentCollector::simulated(&config.sentiment);
        for (symbol, snapshot) in &mut market {
            let report = collector.collect(symbol).await;
            *snapshot = snapshot.clone().with_sentiment(&report.sentiment);
        }
    }

    let bot = TradingBot::from_config(&trading);
    let mut ledger = PositionLedger::new(trading.initial_capital);
    tracing::info!(
        risk_level = %trading.risk_level,
        capital = %trading.initial_capital,
        "Starting trading session"
    );

    let executed = bot.analyze_and_trade(&market, &mut ledger);
    let report = bot.performance_report(&ledger, &marks(&market));
    let insights = bot.trading_insights(&ledger, &report.performance);

    let output = SessionOutput {
        executed,
        ledger: ledger.snapshot(),
        report,
        insights,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
