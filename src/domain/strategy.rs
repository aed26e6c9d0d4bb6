//! Trading-decision state machine.
//!
//! Decision state is an explicit [`StrategyState`] fed through the pure
//! [`step`] function, one candle at a time. The machine tracks four sticky
//! "armed" flags and the MACD direction:
//!
//! - RSI below the oversold threshold arms a potential entry; the arming
//!   clears only once RSI rises more than [`RSI_HYSTERESIS_BAND`] points
//!   above the threshold.
//! - While armed, a down-trending MACD confirms the setup; a subsequent
//!   direction flip to up fires the reversal buy.
//! - The overbought/sell side mirrors this exactly.
//!
//! Extreme RSI readings add to (buy) or trim (sell) an open position
//! without waiting for a reversal.

use chrono::{DateTime, TimeZone, Utc};

use crate::domain::candle::Candle;
use crate::domain::config::StrategyConfig;
use crate::domain::error::WavetraderError;
use crate::domain::trade::{Trade, TradeAction};

/// Points RSI must rise above the oversold threshold (or fall below the
/// overbought threshold) before an armed flag clears. Prevents flicker
/// right at the threshold.
pub const RSI_HYSTERESIS_BAND: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacdDirection {
    Unset,
    Up,
    Down,
}

/// Mutable per-run state. Initialized once per simulation from the
/// configured starting balance, mutated candle-by-candle, discarded at the
/// end of the run.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyState {
    pub cash_balance: f64,
    pub coin_balance: f64,
    pub last_buy_price: f64,
    /// True while a position bought into a low wave is still open.
    pub in_low_wave: bool,
    pub last_macd: Option<f64>,
    pub direction: MacdDirection,
    pub armed_oversold: bool,
    pub confirmed_down: bool,
    pub armed_overbought: bool,
    pub confirmed_up: bool,
}

impl StrategyState {
    pub fn new(initial_balance: f64) -> Self {
        StrategyState {
            cash_balance: initial_balance,
            coin_balance: 0.0,
            last_buy_price: 0.0,
            in_low_wave: false,
            last_macd: None,
            direction: MacdDirection::Unset,
            armed_oversold: false,
            confirmed_down: false,
            armed_overbought: false,
            confirmed_up: false,
        }
    }
}

/// Inputs for one candle step: the candle plus its aligned indicator values.
/// Callers must skip candles whose indicator values are still warming up.
#[derive(Debug, Clone, Copy)]
pub struct StepInput<'a> {
    pub candle: &'a Candle,
    pub rsi: f64,
    pub macd: f64,
    /// Id the next emitted trade will carry (1-based, dense per run).
    pub next_trade_id: usize,
}

/// Advance the state machine by one candle.
///
/// Returns the successor state and any trades executed on this candle, in
/// execution order (a buy is always evaluated before a sell).
pub fn step(
    mut state: StrategyState,
    input: StepInput<'_>,
    config: &StrategyConfig,
) -> Result<(StrategyState, Vec<Trade>), WavetraderError> {
    let close = input.candle.close_price()?;
    let direction_changed = update_direction(&mut state, input.macd);

    if input.rsi < config.rsi_oversold {
        state.armed_oversold = true;
    } else if input.rsi > config.rsi_oversold + RSI_HYSTERESIS_BAND {
        state.armed_oversold = false;
        state.confirmed_down = false;
    }

    if input.rsi > config.rsi_overbought {
        state.armed_overbought = true;
    } else if input.rsi < config.rsi_overbought - RSI_HYSTERESIS_BAND {
        state.armed_overbought = false;
        state.confirmed_up = false;
    }

    if state.armed_oversold && state.direction == MacdDirection::Down {
        state.confirmed_down = true;
    }
    if state.armed_overbought && state.direction == MacdDirection::Up {
        state.confirmed_up = true;
    }

    let mut trades = Vec::new();
    let mut next_id = input.next_trade_id;

    if state.cash_balance > 0.0 {
        if state.armed_oversold
            && state.confirmed_down
            && direction_changed
            && state.direction == MacdDirection::Up
        {
            trades.push(execute_buy(
                &mut state,
                input.candle,
                close,
                config.oversold_buy_percentage,
                next_id,
            )?);
            next_id += 1;
            state.armed_oversold = false;
            state.confirmed_down = false;
        } else if state.in_low_wave
            && input.rsi < config.rsi_extreme_oversold
            && input.macd < 0.0
        {
            trades.push(execute_buy(
                &mut state,
                input.candle,
                close,
                config.extreme_oversold_buy_percentage,
                next_id,
            )?);
            next_id += 1;
        }
    }

    if state.coin_balance > 0.0 {
        if state.armed_overbought
            && state.confirmed_up
            && direction_changed
            && state.direction == MacdDirection::Down
        {
            trades.push(execute_sell(
                &mut state,
                input.candle,
                close,
                config.overbought_sell_percentage,
                next_id,
            )?);
            state.armed_overbought = false;
            state.confirmed_up = false;
        } else if input.rsi > config.rsi_extreme_overbought && input.macd > 0.0 {
            trades.push(execute_sell(
                &mut state,
                input.candle,
                close,
                config.extreme_overbought_sell_percentage,
                next_id,
            )?);
        }
    }

    Ok((state, trades))
}

/// Compare the current MACD value to the stored one and update the trend
/// direction. Returns true when the direction flipped on this step. The
/// first observed value only seeds the store; the direction stays unset
/// and no flip is reported.
fn update_direction(state: &mut StrategyState, macd: f64) -> bool {
    let Some(last) = state.last_macd else {
        state.last_macd = Some(macd);
        return false;
    };

    let mut changed = false;
    if macd > last {
        changed = matches!(state.direction, MacdDirection::Down | MacdDirection::Unset);
        state.direction = MacdDirection::Up;
    } else if macd < last {
        changed = matches!(state.direction, MacdDirection::Up | MacdDirection::Unset);
        state.direction = MacdDirection::Down;
    }
    state.last_macd = Some(macd);
    changed
}

fn execute_buy(
    state: &mut StrategyState,
    candle: &Candle,
    close: f64,
    percentage: f64,
    id: usize,
) -> Result<Trade, WavetraderError> {
    if !(percentage > 0.0 && percentage <= 100.0) {
        return Err(WavetraderError::InvalidOrder {
            action: "buy",
            reason: format!("sizing percentage {percentage} outside (0, 100]"),
        });
    }

    let notional = state.cash_balance * percentage / 100.0;
    if notional > state.cash_balance {
        return Err(WavetraderError::InvalidOrder {
            action: "buy",
            reason: format!(
                "notional {notional} exceeds cash balance {}",
                state.cash_balance
            ),
        });
    }
    let coin_amount = notional / close;

    state.cash_balance -= notional;
    state.coin_balance += coin_amount;
    state.last_buy_price = close;
    state.in_low_wave = true;

    Ok(Trade {
        id,
        timestamp: candle_timestamp(candle)?,
        asset: candle.asset.clone(),
        action: TradeAction::Buy,
        coin_amount,
        price: close,
        notional,
        profit_loss: None,
        partial_fill: false,
    })
}

fn execute_sell(
    state: &mut StrategyState,
    candle: &Candle,
    close: f64,
    percentage: f64,
    id: usize,
) -> Result<Trade, WavetraderError> {
    if !(percentage > 0.0 && percentage <= 100.0) {
        return Err(WavetraderError::InvalidOrder {
            action: "sell",
            reason: format!("sizing percentage {percentage} outside (0, 100]"),
        });
    }

    let sell_amount = state.coin_balance * percentage / 100.0;
    if sell_amount > state.coin_balance {
        return Err(WavetraderError::InvalidOrder {
            action: "sell",
            reason: format!(
                "amount {sell_amount} exceeds coin balance {}",
                state.coin_balance
            ),
        });
    }
    let proceeds = sell_amount * close;
    let profit_loss = proceeds - sell_amount * state.last_buy_price;

    state.cash_balance += proceeds;
    state.coin_balance -= sell_amount;

    let partial_fill = percentage < 100.0;
    if !partial_fill {
        state.in_low_wave = false;
        state.last_buy_price = 0.0;
    }

    Ok(Trade {
        id,
        timestamp: candle_timestamp(candle)?,
        asset: candle.asset.clone(),
        action: TradeAction::Sell,
        coin_amount: sell_amount,
        price: close,
        notional: proceeds,
        profit_loss: Some(profit_loss),
        partial_fill,
    })
}

fn candle_timestamp(candle: &Candle) -> Result<DateTime<Utc>, WavetraderError> {
    Utc.timestamp_millis_opt(candle.open_time)
        .single()
        .ok_or(WavetraderError::Data {
            field: "open_time",
            value: candle.open_time.to_string(),
        })
}
