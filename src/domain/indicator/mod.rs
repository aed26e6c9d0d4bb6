//! Technical indicators aligned to the candle series.
//!
//! [`compute_indicators`] is the indicator engine's single entry point: it
//! orders the candles chronologically, parses close prices, and produces
//! four parallel arrays the same length as the candle series. `None` marks
//! a warm-up gap, never a numeric placeholder.

pub mod ema;
pub mod macd;
pub mod rsi;

use serde::Serialize;

use crate::domain::candle::{chronological, Candle};
use crate::domain::config::StrategyConfig;
use crate::domain::error::WavetraderError;

/// Parallel indicator arrays. Index `i` of every array corresponds to the
/// candle at index `i` of the chronologically ordered series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorSeries {
    pub macd: Vec<Option<f64>>,
    pub signal: Vec<Option<f64>>,
    pub histogram: Vec<Option<f64>>,
    pub rsi: Vec<Option<f64>>,
}

impl IndicatorSeries {
    pub fn len(&self) -> usize {
        self.macd.len()
    }

    pub fn is_empty(&self) -> bool {
        self.macd.is_empty()
    }
}

/// Compute MACD and RSI over a candle series.
///
/// Sorts defensively (stable, by open time) before computing; output index
/// `i` maps to post-sort candle `i`. A malformed close price fails the whole
/// computation. A series shorter than a warm-up window yields all-`None`
/// arrays, not an error.
pub fn compute_indicators(
    candles: &[Candle],
    config: &StrategyConfig,
) -> Result<IndicatorSeries, WavetraderError> {
    let ordered = chronological(candles);
    let closes: Vec<f64> = ordered
        .iter()
        .map(Candle::close_price)
        .collect::<Result<_, _>>()?;

    let macd = macd::calculate_macd(
        &closes,
        config.macd_fast_period,
        config.macd_slow_period,
        config.macd_signal_period,
    );
    let rsi = rsi::calculate_rsi(&closes, config.rsi_period);

    Ok(IndicatorSeries {
        macd: macd.line,
        signal: macd.signal,
        histogram: macd.histogram,
        rsi,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_candle(open_time: i64, close: &str) -> Candle {
        Candle {
            asset: "BTCUSDT".into(),
            open_time,
            close_time: open_time + 59_999,
            open: close.into(),
            high: close.into(),
            low: close.into(),
            close: close.into(),
            volume: "1".into(),
        }
    }

    fn sample_config() -> StrategyConfig {
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

    #[test]
    fn arrays_match_candle_count() {
        let candles: Vec<Candle> = (0..50)
            .map(|i| make_candle(i * 60_000, &format!("{}", 100 + i % 7)))
            .collect();
        let series = compute_indicators(&candles, &sample_config()).unwrap();
        assert_eq!(series.len(), candles.len());
        assert_eq!(series.macd.len(), candles.len());
        assert_eq!(series.signal.len(), candles.len());
        assert_eq!(series.histogram.len(), candles.len());
        assert_eq!(series.rsi.len(), candles.len());
    }

    #[test]
    fn out_of_order_input_is_sorted_before_computing() {
        let closes = ["100", "101", "102", "103", "104", "105", "106", "107"];
        let ordered: Vec<Candle> = closes
            .iter()
            .enumerate()
            .map(|(i, c)| make_candle(i as i64 * 60_000, c))
            .collect();
        let mut shuffled = ordered.clone();
        shuffled.reverse();

        let config = StrategyConfig {
            rsi_period: 3,
            macd_fast_period: 2,
            macd_slow_period: 3,
            macd_signal_period: 2,
            ..sample_config()
        };
        let from_ordered = compute_indicators(&ordered, &config).unwrap();
        let from_shuffled = compute_indicators(&shuffled, &config).unwrap();
        assert_eq!(from_ordered, from_shuffled);
    }

    #[test]
    fn malformed_close_fails_whole_computation() {
        let mut candles: Vec<Candle> = (0..10)
            .map(|i| make_candle(i * 60_000, "100"))
            .collect();
        candles[7].close = "oops".into();
        let err = compute_indicators(&candles, &sample_config()).unwrap_err();
        assert!(matches!(err, WavetraderError::Data { field: "close", .. }));
    }

    #[test]
    fn short_series_is_all_none_not_an_error() {
        let candles: Vec<Candle> = (0..5)
            .map(|i| make_candle(i * 60_000, "100"))
            .collect();
        let series = compute_indicators(&candles, &sample_config()).unwrap();
        assert_eq!(series.len(), 5);
        assert!(series.macd.iter().all(Option::is_none));
        assert!(series.signal.iter().all(Option::is_none));
        assert!(series.histogram.iter().all(Option::is_none));
        assert!(series.rsi.iter().all(Option::is_none));
    }

    #[test]
    fn empty_series() {
        let series = compute_indicators(&[], &sample_config()).unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn deterministic() {
        let candles: Vec<Candle> = (0..60)
            .map(|i| make_candle(i * 60_000, &format!("{}.5", 100 + (i * 3) % 11)))
            .collect();
        let a = compute_indicators(&candles, &sample_config()).unwrap();
        let b = compute_indicators(&candles, &sample_config()).unwrap();
        assert_eq!(a, b);
    }
}
