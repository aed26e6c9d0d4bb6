//! MACD (Moving Average Convergence Divergence).
//!
//! MACD Line = EMA(fast) - EMA(slow)
//! Signal Line = EMA(signal) of MACD Line
//! Histogram = MACD Line - Signal Line
//!
//! The MACD line is valid from index slow-1; signal and histogram carry the
//! signal EMA's own warm-up on top, valid from index slow-1 + signal-1.

use crate::domain::indicator::ema::calculate_ema;

#[derive(Debug, Clone, PartialEq)]
pub struct MacdSeries {
    pub line: Vec<Option<f64>>,
    pub signal: Vec<Option<f64>>,
    pub histogram: Vec<Option<f64>>,
}

pub fn calculate_macd(
    closes: &[f64],
    fast: usize,
    slow: usize,
    signal_period: usize,
) -> MacdSeries {
    let n = closes.len();
    let mut line = vec![None; n];
    let mut signal = vec![None; n];
    let mut histogram = vec![None; n];

    if fast == 0 || slow == 0 || signal_period == 0 {
        return MacdSeries {
            line,
            signal,
            histogram,
        };
    }

    let ema_fast = calculate_ema(closes, fast);
    let ema_slow = calculate_ema(closes, slow);
    for i in 0..n {
        if let (Some(f), Some(s)) = (ema_fast[i], ema_slow[i]) {
            line[i] = Some(f - s);
        }
    }

    // The signal line is an EMA over the valid span of the MACD line.
    let line_start = fast.max(slow) - 1;
    if n > line_start {
        let raw: Vec<f64> = line[line_start..].iter().map(|v| v.unwrap_or(0.0)).collect();
        for (j, value) in calculate_ema(&raw, signal_period).into_iter().enumerate() {
            if let Some(s) = value {
                signal[line_start + j] = Some(s);
                histogram[line_start + j] = Some(raw[j] - s);
            }
        }
    }

    MacdSeries {
        line,
        signal,
        histogram,
    }
}
