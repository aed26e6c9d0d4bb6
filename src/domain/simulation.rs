//! Simulation driver.
//!
//! Computes indicators once up front, then folds the pure strategy step
//! over the chronological candle series. Candles still inside an indicator
//! warm-up window are skipped with no state mutation.

use crate::domain::candle::{chronological, Candle};
use crate::domain::config::StrategyConfig;
use crate::domain::error::WavetraderError;
use crate::domain::indicator::compute_indicators;
use crate::domain::strategy::{step, StepInput, StrategyState};
use crate::domain::trade::{Trade, TradeAction, TradeHistory};
use crate::ports::observer_port::ObserverPort;

/// Run a full simulation over a candle series.
///
/// Pure and idempotent: the same candles and config always produce an
/// identical trade ledger. Each call owns a freshly initialized state.
pub fn simulate(
    candles: &[Candle],
    config: &StrategyConfig,
) -> Result<TradeHistory, WavetraderError> {
    run(candles, config, None)
}

/// Like [`simulate`], with an observer invoked after each processed candle
/// with the post-step state snapshot and any trades just executed.
pub fn simulate_with_observer(
    candles: &[Candle],
    config: &StrategyConfig,
    observer: &mut dyn ObserverPort,
) -> Result<TradeHistory, WavetraderError> {
    run(candles, config, Some(observer))
}

fn run(
    candles: &[Candle],
    config: &StrategyConfig,
    mut observer: Option<&mut dyn ObserverPort>,
) -> Result<TradeHistory, WavetraderError> {
    config.validate()?;

    let ordered = chronological(candles);
    let indicators = compute_indicators(&ordered, config)?;

    let mut state = StrategyState::new(config.initial_balance);
    let mut ledger: Vec<Trade> = Vec::new();

    for (i, candle) in ordered.iter().enumerate() {
        let (Some(rsi), Some(macd)) = (indicators.rsi[i], indicators.macd[i]) else {
            continue;
        };

        let input = StepInput {
            candle,
            rsi,
            macd,
            next_trade_id: ledger.len() + 1,
        };
        let (next_state, trades) = step(state, input, config)?;
        state = next_state;

        if let Some(obs) = observer.as_deref_mut() {
            obs.on_candle(i, candle, &state, &trades);
        }
        ledger.extend(trades);
    }

    let mut win_count = 0;
    let mut loss_count = 0;
    let mut total_profit_loss = 0.0;
    for trade in &ledger {
        if trade.action == TradeAction::Sell {
            if let Some(pl) = trade.profit_loss {
                if pl > 0.0 {
                    win_count += 1;
                } else {
                    loss_count += 1;
                }
                total_profit_loss += pl;
            }
        }
    }

    Ok(TradeHistory {
        trades: ledger,
        ending_coin_balance: state.coin_balance,
        ending_cash_balance: state.cash_balance,
        total_profit_loss,
        win_count,
        loss_count,
    })
}
