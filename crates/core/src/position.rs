//! In-memory position ledger.
//!
//! The ledger owns cash and open positions for one trading session. Callers
//! pass it by `&mut` into each execution call, so at most one execution
//! mutates it at a time.

use crate::decision::TradingDecision;
use crate::signal::Signal;
use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

/// Reasons the ledger refuses to execute a decision.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    /// Hold decisions carry no order.
    #[error("signal {0} is not executable")]
    NotActionable(Signal),

    /// Buy cost exceeds available cash.
    #[error("insufficient capital for {symbol}: need {required}, have {available}")]
    InsufficientCapital {
        symbol: String,
        required: Decimal,
        available: Decimal,
    },

    /// Sell requested for a symbol with no open position.
    #[error("no open position in {0}")]
    NoPosition(String),

    /// Zero or negative share quantity or price.
    #[error("invalid quantity {shares} at price {price}")]
    InvalidQuantity { shares: Decimal, price: Decimal },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub symbol: String,
    pub shares: Decimal,
    pub avg_cost: Decimal,
    pub stop_loss: Decimal,
    pub target_price: Decimal,
}

impl Position {
    #[allow(clippy::missing_const_for_fn)] // String cannot be used in const fn
    fn open(decision: &TradingDecision) -> Self {
        Self {
            symbol: decision.symbol.clone(),
            shares: decision.position_size,
            avg_cost: decision.entry_price,
            stop_loss: decision.stop_loss,
            target_price: decision.target_price,
        }
    }

    /// Cost basis of the open shares.
    #[must_use]
    pub fn cost_basis(&self) -> Decimal {
        self.shares * self.avg_cost
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeAction {
    Buy,
    Sell,
}

/// One executed trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub timestamp: DateTime<Utc>,
    pub symbol: String,
    pub action: TradeAction,
    pub shares: Decimal,
    pub price: Decimal,
    /// Cash paid (buy) or received (sell)
    pub amount: Decimal,
    /// Realized profit, sells only
    pub realized_pnl: Option<Decimal>,
    pub confidence: f64,
    pub rationale: Vec<String>,
}

/// Point-in-time view of the ledger for reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub cash: Decimal,
    pub positions: Vec<Position>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub portfolio_value: Decimal,
    /// (portfolio value - initial capital) / initial capital
    pub total_return: f64,
    /// Profitable sells / all sells, 0 when nothing was sold
    pub win_rate: f64,
    pub total_trades: usize,
    pub active_positions: usize,
    pub cash_available: Decimal,
}

pub struct PositionLedger {
    initial_capital: Decimal,
    cash: Decimal,
    positions: BTreeMap<String, Position>,
    history: Vec<TradeRecord>,
}

impl PositionLedger {
    #[must_use]
    pub fn new(initial_capital: Decimal) -> Self {
        Self {
            initial_capital,
            cash: initial_capital,
            positions: BTreeMap::new(),
            history: Vec::new(),
        }
    }

    #[must_use]
    pub const fn initial_capital(&self) -> Decimal {
        self.initial_capital
    }

    #[must_use]
    pub const fn cash(&self) -> Decimal {
        self.cash
    }

    #[must_use]
    pub fn get_position(&self, symbol: &str) -> Option<&Position> {
        self.positions.get(symbol)
    }

    #[must_use]
    pub const fn all_positions(&self) -> &BTreeMap<String, Position> {
        &self.positions
    }

    #[must_use]
    pub fn history(&self) -> &[TradeRecord] {
        &self.history
    }

    /// Returns the most recent `n` trades, oldest first.
    #[must_use]
    pub fn recent_trades(&self, n: usize) -> &[TradeRecord] {
        let start = self.history.len().saturating_sub(n);
        &self.history[start..]
    }

    /// Executes a decision against the ledger.
    ///
    /// Buys open or add to a position at weighted-average cost; sells reduce
    /// or close one. State changes only after every check passes.
    ///
    /// # Errors
    /// Returns a [`LedgerError`] when the decision cannot be executed.
    pub fn execute(&mut self, decision: &TradingDecision) -> Result<TradeRecord, LedgerError> {
        if decision.signal == Signal::Hold {
            return Err(LedgerError::NotActionable(decision.signal));
        }
        if decision.position_size <= Decimal::ZERO || decision.entry_price <= Decimal::ZERO {
            return Err(LedgerError::InvalidQuantity {
                shares: decision.position_size,
                price: decision.entry_price,
            });
        }

        let record = if decision.signal.is_buy() {
            self.buy(decision)?
        } else {
            self.sell(decision)?
        };

        self.history.push(record.clone());
        Ok(record)
    }

    fn buy(&mut self, decision: &TradingDecision) -> Result<TradeRecord, LedgerError> {
        let cost = decision.cost();
        if cost > self.cash {
            return Err(LedgerError::InsufficientCapital {
                symbol: decision.symbol.clone(),
                required: cost,
                available: self.cash,
            });
        }

        match self.positions.get_mut(&decision.symbol) {
            // Adding to an open position
            Some(pos) => {
                let total_cost = pos.cost_basis() + cost;
                pos.shares += decision.position_size;
                pos.avg_cost = total_cost / pos.shares;
            }
            // Opening a new position
            None => {
                self.positions
                    .insert(decision.symbol.clone(), Position::open(decision));
            }
        }
        self.cash -= cost;

        tracing::info!(
            symbol = %decision.symbol,
            shares = %decision.position_size,
            price = %decision.entry_price,
            "Executed BUY"
        );

        Ok(TradeRecord {
            timestamp: Utc::now(),
            symbol: decision.symbol.clone(),
            action: TradeAction::Buy,
            shares: decision.position_size,
            price: decision.entry_price,
            amount: cost,
            realized_pnl: None,
            confidence: decision.confidence,
            rationale: decision.rationale.clone(),
        })
    }

    fn sell(&mut self, decision: &TradingDecision) -> Result<TradeRecord, LedgerError> {
        let Some(pos) = self
            .positions
            .get_mut(&decision.symbol)
            .filter(|p| p.shares > Decimal::ZERO)
        else {
            return Err(LedgerError::NoPosition(decision.symbol.clone()));
        };

        let sold = decision.position_size.min(pos.shares);
        let revenue = decision.entry_price * sold;
        let pnl = (decision.entry_price - pos.avg_cost) * sold;

        pos.shares -= sold;
        if pos.shares <= Decimal::ZERO {
            self.positions.remove(&decision.symbol);
        }
        self.cash += revenue;

        tracing::info!(
            symbol = %decision.symbol,
            shares = %sold,
            price = %decision.entry_price,
            pnl = %pnl,
            "Executed SELL"
        );

        Ok(TradeRecord {
            timestamp: Utc::now(),
            symbol: decision.symbol.clone(),
            action: TradeAction::Sell,
            shares: sold,
            price: decision.entry_price,
            amount: revenue,
            realized_pnl: Some(pnl),
            confidence: decision.confidence,
            rationale: decision.rationale.clone(),
        })
    }

    #[must_use]
    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            cash: self.cash,
            positions: self.positions.values().cloned().collect(),
        }
    }

    /// Computes performance against the given marks.
    ///
    /// Symbols without a mark are valued at average cost.
    #[must_use]
    pub fn performance(&self, marks: &HashMap<String, Decimal>) -> PerformanceMetrics {
        let holdings: Decimal = self
            .positions
            .values()
            .map(|p| p.shares * marks.get(&p.symbol).copied().unwrap_or(p.avg_cost))
            .sum();
        let portfolio_value = self.cash + holdings;

        let total_return = if self.initial_capital > Decimal::ZERO {
            ((portfolio_value - self.initial_capital) / self.initial_capital)
                .to_f64()
                .unwrap_or(0.0)
        } else {
            0.0
        };

        let sells: Vec<Decimal> = self
            .history
            .iter()
            .filter_map(|t| t.realized_pnl)
            .collect();
        let wins = sells.iter().filter(|pnl| **pnl > Decimal::ZERO).count();
        let win_rate = if sells.is_empty() {
            0.0
        } else {
            wins as f64 / sells.len() as f64
        };

        PerformanceMetrics {
            portfolio_value,
            total_return,
            win_rate,
            total_trades: self.history.len(),
            active_positions: self.positions.len(),
            cash_available: self.cash,
        }
    }
}
