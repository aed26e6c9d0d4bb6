//! JSON kline dataset adapter.
//!
//! Reads exchange kline exports: a JSON array of positional rows
//! `[openTime, open, high, low, close, volume, closeTime, quoteAssetVolume,
//! numberOfTrades, takerBuyBaseVol, takerBuyQuoteVol, ignored]`.
//! Numeric slots may arrive as JSON numbers or strings; prices stay strings
//! until the core parses them. Trailing fields beyond closeTime are ignored.

use serde_json::Value;
use std::fs;
use std::path::PathBuf;

use crate::domain::candle::Candle;
use crate::domain::error::WavetraderError;
use crate::ports::data_port::DataPort;

pub struct JsonDatasetAdapter {
    base_path: PathBuf,
}

impl JsonDatasetAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn dataset_path(&self, asset: &str) -> PathBuf {
        self.base_path.join(format!("{asset}.json"))
    }
}

impl DataPort for JsonDatasetAdapter {
    fn load_candles(&self, asset: &str) -> Result<Vec<Candle>, WavetraderError> {
        let path = self.dataset_path(asset);
        let file = path.display().to_string();
        let content = fs::read_to_string(&path).map_err(|e| WavetraderError::Dataset {
            file: file.clone(),
            reason: format!("failed to read: {e}"),
        })?;
        let rows: Vec<Value> =
            serde_json::from_str(&content).map_err(|e| WavetraderError::Dataset {
                file: file.clone(),
                reason: format!("JSON parse error: {e}"),
            })?;

        rows.iter()
            .enumerate()
            .map(|(i, row)| candle_from_row(asset, row, &file, i))
            .collect()
    }
}

/// Map one positional kline row into a [`Candle`].
pub fn candle_from_row(
    asset: &str,
    row: &Value,
    file: &str,
    index: usize,
) -> Result<Candle, WavetraderError> {
    let fields = row.as_array().ok_or_else(|| WavetraderError::Dataset {
        file: file.to_string(),
        reason: format!("row {index} is not an array"),
    })?;
    if fields.len() < 7 {
        return Err(WavetraderError::Dataset {
            file: file.to_string(),
            reason: format!("row {index} has {} fields, expected at least 7", fields.len()),
        });
    }

    Ok(Candle {
        asset: asset.to_string(),
        open_time: integer_field(&fields[0], "openTime", file, index)?,
        open: text_field(&fields[1], "open", file, index)?,
        high: text_field(&fields[2], "high", file, index)?,
        low: text_field(&fields[3], "low", file, index)?,
        close: text_field(&fields[4], "close", file, index)?,
        volume: text_field(&fields[5], "volume", file, index)?,
        close_time: integer_field(&fields[6], "closeTime", file, index)?,
    })
}

fn integer_field(
    value: &Value,
    name: &str,
    file: &str,
    index: usize,
) -> Result<i64, WavetraderError> {
    value
        .as_i64()
        .or_else(|| value.as_str().and_then(|s| s.parse().ok()))
        .ok_or_else(|| WavetraderError::Dataset {
            file: file.to_string(),
            reason: format!("row {index}: {name} is not an integer timestamp"),
        })
}

fn text_field(
    value: &Value,
    name: &str,
    file: &str,
    index: usize,
) -> Result<String, WavetraderError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(WavetraderError::Dataset {
            file: file.to_string(),
            reason: format!("row {index}: {name} is neither a string nor a number"),
        }),
    }
}
