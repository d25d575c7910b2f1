use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::{BTreeMap, HashMap};
use stock_ai_core::{PositionLedger, RiskLevel, SentimentSource, SourceReading, TradeAction};
use stock_ai_sentiment::SentimentAggregator;
use stock_ai_strategy::{MarketSnapshot, RuleBasedScorer, TradingBot};

fn bullish_readings() -> Vec<SourceReading> {
    vec![
        SourceReading::new(SentimentSource::News, 0.7, 0.9, 40).unwrap(),
        SourceReading::new(SentimentSource::Forum, 0.6, 0.8, 120).unwrap(),
        SourceReading::new(SentimentSource::Microblog, 0.8, 0.7, 300).unwrap(),
    ]
}

fn bearish_readings() -> Vec<SourceReading> {
    vec![
        SourceReading::new(SentimentSource::News, -0.7, 0.9, 40).unwrap(),
        SourceReading::new(SentimentSource::Forum, -0.8, 0.8, 120).unwrap(),
    ]
}

#[test]
fn sentiment_to_trades_to_report() {
    let aggregator = SentimentAggregator::default();
    let bot = TradingBot::new(RiskLevel::Aggressive, Box::new(RuleBasedScorer::default()));
    let mut ledger = PositionLedger::new(dec!(100000));

    let rally = MarketSnapshot::new(dec!(104), dec!(30000000))
        .with_ohl(dec!(100), dec!(105), dec!(99))
        .with_avg_volume(dec!(10000000))
        .with_sentiment(&aggregator.aggregate("NVDA", &bullish_readings()));
    let flat = MarketSnapshot::new(dec!(50), dec!(1000000)).with_ohl(dec!(50), dec!(50), dec!(50));

    let market: BTreeMap<String, MarketSnapshot> =
        [("NVDA".to_string(), rally), ("KO".to_string(), flat)].into_iter().collect();

    let executed = bot.analyze_and_trade(&market, &mut ledger);

    assert_eq!(executed.len(), 1);
    assert_eq!(executed[0].symbol, "NVDA");
    assert!(executed[0].signal.is_buy());
    assert!(!executed[0].rationale.is_empty());
    assert!(ledger.cash() < dec!(100000));
    assert!(ledger.cash() >= Decimal::ZERO);

    // Next session: sentiment turns and the price drops
    let selloff = MarketSnapshot::new(dec!(95), dec!(30000000))
        .with_ohl(dec!(104), dec!(104), dec!(94))
        .with_avg_volume(dec!(10000000))
        .with_sentiment(&aggregator.aggregate("NVDA", &bearish_readings()));
    let market: BTreeMap<String, MarketSnapshot> =
        [("NVDA".to_string(), selloff)].into_iter().collect();

    let executed = bot.analyze_and_trade(&market, &mut ledger);

    assert_eq!(executed.len(), 1);
    assert!(executed[0].signal.is_sell());
    let last = ledger.history().last().unwrap();
    assert_eq!(last.action, TradeAction::Sell);
    assert!(last.realized_pnl.unwrap() < Decimal::ZERO);

    let marks: HashMap<String, Decimal> = [("NVDA".to_string(), dec!(95))].into_iter().collect();
    let report = bot.performance_report(&ledger, &marks);
    assert_eq!(report.recent_trades.len(), 2);
    assert_eq!(report.risk_level, RiskLevel::Aggressive);
    assert!(report.performance.total_return < 0.0);
    assert!((report.performance.win_rate).abs() < f64::EPSILON);

    let insights = bot.trading_insights(&ledger, &report.performance);
    assert!(insights.iter().any(|i| i.starts_with("Low win rate")));
}

#[test]
fn capital_is_never_overspent() {
    let bot = TradingBot::new(RiskLevel::Aggressive, Box::new(RuleBasedScorer::default()));
    let mut ledger = PositionLedger::new(dec!(5000));

    let market: BTreeMap<String, MarketSnapshot> = (0..12)
        .map(|i| {
            let price = Decimal::from(20 + i * 15);
            let snapshot = MarketSnapshot::new(price * dec!(1.05), dec!(5000000))
                .with_ohl(price, price * dec!(1.06), price)
                .with_avg_volume(dec!(1000000))
                .with_sentiment_scores(0.6, 0.5, 0.7);
            (format!("SYM{i:02}"), snapshot)
        })
        .collect();

    let executed = bot.analyze_and_trade(&market, &mut ledger);

    let spent: Decimal = executed.iter().map(|d| d.cost()).sum();
    assert!(!executed.is_empty());
    assert!(spent <= dec!(5000));
    assert_eq!(ledger.cash(), dec!(5000) - spent);
    assert!(ledger.all_positions().len() <= bot.profile().max_positions);
}
