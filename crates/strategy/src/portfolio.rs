use rust_decimal::Decimal;
use stock_ai_core::{round_shares, TradingDecision};

/// Smallest share increment after rounding.
const SHARE_STEP: Decimal = Decimal::from_parts(1, 0, 0, false, 8);

fn ranking_key(decision: &TradingDecision) -> f64 {
    let key = decision.priority();
    if key.is_nan() || key == 0.0 {
        0.0
    } else {
        key
    }
}

/// Trims a batch of decisions to fit the available capital.
///
/// Decisions are ranked by confidence × expected return, highest first, with
/// ties kept in input order. Decisions are accepted while their cost fits the
/// remaining capital. The first one that does not fit is shrunk to whatever
/// the remainder buys and the pass stops there.
///
/// The total cost of the result never exceeds `capital`.
#[must_use]
pub fn fit_to_capital(
    mut decisions: Vec<TradingDecision>,
    capital: Decimal,
) -> Vec<TradingDecision> {
    decisions.sort_by(|a, b| ranking_key(b).total_cmp(&ranking_key(a)));

    let mut remaining = capital.max(Decimal::ZERO);
    let mut fitted = Vec::with_capacity(decisions.len());

    for mut decision in decisions {
        let cost = decision.cost();
        if cost <= remaining {
            remaining -= cost;
            fitted.push(decision);
            continue;
        }

        if decision.entry_price <= Decimal::ZERO {
            tracing::debug!(symbol = %decision.symbol, "Skipping unpriced decision");
            continue;
        }

        let mut shares = round_shares(remaining / decision.entry_price);
        if shares * decision.entry_price > remaining {
            shares -= SHARE_STEP;
        }

        if shares > Decimal::ZERO {
            tracing::debug!(
                symbol = %decision.symbol,
                requested = %decision.position_size,
                shares = %shares,
                "Shrinking decision to remaining capital"
            );
            if decision.position_size > Decimal::ZERO {
                decision.expected_return =
                    decision.expected_return * shares / decision.position_size;
            }
            decision.position_size = shares;
            fitted.push(decision);
        }
        break;
    }

    fitted
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;
    use rust_decimal::prelude::FromPrimitive;
    use rust_decimal_macros::dec;
    use stock_ai_core::Signal;

    fn decision(
        symbol: &str,
        price: Decimal,
        shares: Decimal,
        conf: f64,
        ret: Decimal,
    ) -> TradingDecision {
        TradingDecision {
            symbol: symbol.to_string(),
            signal: Signal::Buy,
            confidence: conf,
            entry_price: price,
            target_price: price,
            stop_loss: price,
            position_size: shares,
            rationale: Vec::new(),
            risk_score: 0.0,
            expected_return: ret,
            time_horizon: "1-5 days".to_string(),
        }
    }

    fn total_cost(decisions: &[TradingDecision]) -> Decimal {
        decisions.iter().map(TradingDecision::cost).sum()
    }

    #[test]
    fn second_decision_is_shrunk() {
        let decisions = vec![
            decision("B", dec!(100), dec!(50), 0.5, dec!(10)),
            decision("A", dec!(100), dec!(60), 0.9, dec!(10)),
        ];

        let fitted = fit_to_capital(decisions, dec!(10000));

        assert_eq!(fitted.len(), 2);
        assert_eq!(fitted[0].symbol, "A");
        assert_eq!(fitted[0].position_size, dec!(60));
        assert_eq!(fitted[1].symbol, "B");
        assert_eq!(fitted[1].position_size, dec!(40));
        assert_eq!(fitted[1].expected_return, dec!(8));
        assert_eq!(total_cost(&fitted), dec!(10000));
    }

    #[test]
    fn stops_after_first_shrink() {
        let decisions = vec![
            decision("A", dec!(100), dec!(80), 0.9, dec!(30)),
            decision("B", dec!(100), dec!(50), 0.9, dec!(20)),
            decision("C", dec!(1), dec!(1), 0.9, dec!(10)),
        ];

        let fitted = fit_to_capital(decisions, dec!(10000));

        let symbols: Vec<_> = fitted.iter().map(|d| d.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["A", "B"]);
        assert_eq!(fitted[1].position_size, dec!(20));
    }

    #[test]
    fn ties_keep_input_order() {
        let decisions = vec![
            decision("X", dec!(10), dec!(1), 0.8, dec!(5)),
            decision("Y", dec!(10), dec!(1), 0.8, dec!(5)),
            decision("Z", dec!(10), dec!(1), 0.8, dec!(5)),
        ];

        let fitted = fit_to_capital(decisions, dec!(1000));
        let symbols: Vec<_> = fitted.iter().map(|d| d.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["X", "Y", "Z"]);
    }

    #[test]
    fn fractional_shrink_rounds_down() {
        let decisions = vec![decision("A", dec!(3), dec!(100), 0.9, dec!(1))];

        let fitted = fit_to_capital(decisions, dec!(10));

        assert_eq!(fitted[0].position_size, dec!(3.33333333));
        assert!(total_cost(&fitted) <= dec!(10));
    }

    #[test]
    fn no_capital_yields_nothing() {
        let decisions = vec![decision("A", dec!(100), dec!(1), 0.9, dec!(1))];
        assert!(fit_to_capital(decisions.clone(), Decimal::ZERO).is_empty());
        assert!(fit_to_capital(decisions, dec!(-5)).is_empty());
    }

    #[test]
    fn zero_cost_decisions_pass_through() {
        let decisions = vec![
            decision("A", dec!(100), Decimal::ZERO, 0.9, Decimal::ZERO),
            decision("B", Decimal::ZERO, dec!(5), 0.9, Decimal::ZERO),
        ];
        assert_eq!(fit_to_capital(decisions, dec!(100)).len(), 2);
    }

    #[test]
    fn unpriced_oversized_decision_is_skipped() {
        let decisions = vec![
            decision("NEG", dec!(-1), dec!(-100000), 0.9, dec!(100)),
            decision("OK", dec!(10), dec!(1), 0.9, dec!(1)),
        ];
        let fitted = fit_to_capital(decisions, dec!(50));
        assert_eq!(fitted.len(), 1);
        assert_eq!(fitted[0].symbol, "OK");
    }

    #[test]
    fn accepted_decisions_are_a_ranked_prefix() {
        let decisions = vec![
            decision("LOW", dec!(10), dec!(10), 0.6, dec!(1)),
            decision("HIGH", dec!(10), dec!(10), 0.9, dec!(50)),
            decision("MID", dec!(10), dec!(10), 0.7, dec!(10)),
        ];

        let fitted = fit_to_capital(decisions, dec!(150));
        let symbols: Vec<_> = fitted.iter().map(|d| d.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["HIGH", "MID"]);
        assert_eq!(fitted[1].position_size, dec!(5));
    }

    #[test]
    fn total_cost_never_exceeds_capital() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        for _ in 0..500 {
            let capital = Decimal::from_f64(rng.gen_range(0.0..50_000.0)).unwrap().round_dp(2);
            let count = rng.gen_range(0..8);
            let decisions: Vec<_> = (0..count)
                .map(|i| {
                    decision(
                        &format!("S{i}"),
                        Decimal::from_f64(rng.gen_range(0.5..900.0)).unwrap().round_dp(4),
                        Decimal::from_f64(rng.gen_range(0.0..200.0)).unwrap().round_dp(8),
                        rng.gen_range(0.0..1.0),
                        Decimal::from_f64(rng.gen_range(-500.0..500.0)).unwrap().round_dp(2),
                    )
                })
                .collect();

            let fitted = fit_to_capital(decisions.clone(), capital);

            assert!(total_cost(&fitted) <= capital, "capital {capital} exceeded");
            assert!(fitted.len() <= decisions.len());
            for d in &fitted {
                assert!(d.position_size >= Decimal::ZERO);
                let original = decisions.iter().find(|o| o.symbol == d.symbol).unwrap();
                assert!(d.position_size <= original.position_size);
            }
            let keys: Vec<f64> = fitted
                .iter()
                .map(|d| ranking_key(decisions.iter().find(|o| o.symbol == d.symbol).unwrap()))
                .collect();
            assert!(keys.windows(2).all(|pair| pair[0] >= pair[1]));
        }
    }
}
