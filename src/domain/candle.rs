//! OHLCV candle representation.
//!
//! Prices and volume are carried as the decimal strings the exchange feed
//! delivers them in; only the fields the core actually reads are parsed,
//! and a malformed value fails the whole run rather than coercing to 0.

use crate::domain::error::WavetraderError;

#[derive(Debug, Clone, PartialEq)]
pub struct Candle {
    pub asset: String,
    /// Epoch milliseconds; used only for ordering and display.
    pub open_time: i64,
    pub close_time: i64,
    pub open: String,
    pub high: String,
    pub low: String,
    pub close: String,
    pub volume: String,
}

impl Candle {
    pub fn close_price(&self) -> Result<f64, WavetraderError> {
        parse_decimal("close", &self.close)
    }
}

/// Parse a decimal string field, rejecting non-numeric and non-finite values.
pub fn parse_decimal(field: &'static str, value: &str) -> Result<f64, WavetraderError> {
    let parsed: f64 = value.trim().parse().map_err(|_| WavetraderError::Data {
        field,
        value: value.to_string(),
    })?;
    if !parsed.is_finite() {
        return Err(WavetraderError::Data {
            field,
            value: value.to_string(),
        });
    }
    Ok(parsed)
}

/// Stable chronological copy of a candle slice, ordered by open time.
///
/// The indicator engine and the simulation driver both order candles through
/// this one function, so index `i` of an indicator array always refers to
/// index `i` of the chronological series.
pub fn chronological(candles: &[Candle]) -> Vec<Candle> {
    let mut ordered = candles.to_vec();
    ordered.sort_by_key(|c| c.open_time);
    ordered
}
