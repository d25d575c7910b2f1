use rust_decimal::Decimal;
use std::collections::BTreeMap;
use stock_ai_core::{PositionLedger, RiskLevel, SentimentConfig};
use stock_ai_sentiment::SentimentCollector;
use stock_ai_strategy::{MarketSnapshot, RuleBasedScorer, TradingBot};

const DEMO_SNAPSHOT: &str = "../../demos/market_snapshot.json";

#[tokio::test]
async fn test_demo_session_with_simulated_sentiment() {
    // Skip if the demo file isn't there
    if !std::path::Path::new(DEMO_SNAPSHOT).exists() {
        return;
    }

    let json = std::fs::read_to_string(DEMO_SNAPSHOT).expect("Failed to read demo snapshot");
    let mut market: BTreeMap<String, MarketSnapshot> =
        serde_json::from_str(&json).expect("Failed to parse demo snapshot");

    let config = SentimentConfig {
        seed: Some(7),
        ..SentimentConfig::default()
    };
    let collector = SentimentCollector::simulated(&config);
    for (symbol, snapshot) in &mut market {
        let report = collector.collect(symbol).await;
        assert!(!report.is_fallback());
        *snapshot = snapshot.clone().with_sentiment(&report.sentiment);
    }

    let bot = TradingBot::new(RiskLevel::Aggressive, Box::new(RuleBasedScorer::default()));
    let mut ledger = PositionLedger::new(Decimal::from(100_000));

    let executed = bot.analyze_and_trade(&market, &mut ledger);

    let spent: Decimal = executed
        .iter()
        .filter(|d| d.signal.is_buy())
        .map(|d| d.cost())
        .sum();
    assert!(spent <= Decimal::from(100_000));
    assert!(ledger.cash() >= Decimal::ZERO);
    assert_eq!(ledger.history().len(), executed.len());
}
