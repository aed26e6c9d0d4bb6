//! Trade ledger types.

use chrono::{DateTime, Utc};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeAction {
    Buy,
    Sell,
}

impl fmt::Display for TradeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeAction::Buy => write!(f, "BUY"),
            TradeAction::Sell => write!(f, "SELL"),
        }
    }
}

/// One executed trade. Immutable once appended to the ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct Trade {
    /// 1-based dense sequence id, reset per run.
    pub id: usize,
    pub timestamp: DateTime<Utc>,
    pub asset: String,
    pub action: TradeAction,
    pub coin_amount: f64,
    pub price: f64,
    /// Cash value of the transaction at execution.
    pub notional: f64,
    /// Realized profit/loss; sells only.
    pub profit_loss: Option<f64>,
    pub partial_fill: bool,
}

/// Result of a simulation run.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeHistory {
    pub trades: Vec<Trade>,
    /// Residual position size at the end of the run; the headline balance
    /// for this long-only single-asset strategy.
    pub ending_coin_balance: f64,
    pub ending_cash_balance: f64,
    pub total_profit_loss: f64,
    pub win_count: usize,
    pub loss_count: usize,
}
