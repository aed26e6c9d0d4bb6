//! Tracing-backed simulation observer.
//!
//! Emits a debug-level state snapshot per processed candle and an
//! info-level event per executed trade. Enable with e.g.
//! `RUST_LOG=wavetrader=debug`.

use crate::domain::candle::Candle;
use crate::domain::strategy::StrategyState;
use crate::domain::trade::Trade;
use crate::ports::observer_port::ObserverPort;

#[derive(Debug, Default)]
pub struct TraceObserver;

impl ObserverPort for TraceObserver {
    fn on_candle(
        &mut self,
        index: usize,
        candle: &Candle,
        state: &StrategyState,
        trades: &[Trade],
    ) {
        tracing::debug!(
            index,
            open_time = candle.open_time,
            cash = state.cash_balance,
            coin = state.coin_balance,
            direction = ?state.direction,
            in_low_wave = state.in_low_wave,
            armed_oversold = state.armed_oversold,
            confirmed_down = state.confirmed_down,
            armed_overbought = state.armed_overbought,
            confirmed_up = state.confirmed_up,
            "candle processed"
        );

        for trade in trades {
            tracing::info!(
                id = trade.id,
                action = %trade.action,
                asset = %trade.asset,
                amount = trade.coin_amount,
                price = trade.price,
                notional = trade.notional,
                profit_loss = ?trade.profit_loss,
                partial_fill = trade.partial_fill,
                "trade executed"
            );
        }
    }
}
