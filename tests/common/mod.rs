#![allow(dead_code)]

use wavetrader::domain::candle::Candle;
use wavetrader::domain::config::StrategyConfig;

pub fn make_candle(index: usize, close: f64) -> Candle {
    let close = format!("{close}");
    Candle {
        asset: "BTCUSDT".into(),
        open_time: index as i64 * 60_000,
        close_time: index as i64 * 60_000 + 59_999,
        open: close.clone(),
        high: close.clone(),
        low: close.clone(),
        close,
        volume: "1".into(),
    }
}

pub fn candles_from_closes(closes: &[f64]) -> Vec<Candle> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &c)| make_candle(i, c))
        .collect()
}

pub fn sample_config() -> StrategyConfig {
    StrategyConfig {
        rsi_period: 6,
        rsi_oversold: 45.0,
        rsi_overbought: 65.0,
        rsi_extreme_oversold: 25.0,
        rsi_extreme_overbought: 85.0,
        macd_fast_period: 12,
        macd_slow_period: 26,
        macd_signal_period: 9,
        initial_balance: 10_000.0,
        oversold_buy_percentage: 50.0,
        extreme_oversold_buy_percentage: 25.0,
        overbought_sell_percentage: 100.0,
        extreme_overbought_sell_percentage: 50.0,
    }
}
