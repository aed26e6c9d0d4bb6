//! CSV candle dataset adapter.
//!
//! Reads `<asset>.csv` files with a header row and columns
//! `open_time,open,high,low,close,volume,close_time`. Prices stay strings;
//! only the timestamps are parsed here.

use std::fs;
use std::path::PathBuf;

use crate::domain::candle::Candle;
use crate::domain::error::WavetraderError;
use crate::ports::data_port::DataPort;

pub struct CsvDatasetAdapter {
    base_path: PathBuf,
}

impl CsvDatasetAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn dataset_path(&self, asset: &str) -> PathBuf {
        self.base_path.join(format!("{asset}.csv"))
    }
}

impl DataPort for CsvDatasetAdapter {
    fn load_candles(&self, asset: &str) -> Result<Vec<Candle>, WavetraderError> {
        let path = self.dataset_path(asset);
        let file = path.display().to_string();
        let content = fs::read_to_string(&path).map_err(|e| WavetraderError::Dataset {
            file: file.clone(),
            reason: format!("failed to read: {e}"),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut candles = Vec::new();

        for (index, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| WavetraderError::Dataset {
                file: file.clone(),
                reason: format!("CSV parse error: {e}"),
            })?;

            let column = |i: usize, name: &str| -> Result<String, WavetraderError> {
                record
                    .get(i)
                    .map(str::to_string)
                    .ok_or_else(|| WavetraderError::Dataset {
                        file: file.clone(),
                        reason: format!("row {index}: missing {name} column"),
                    })
            };
            let timestamp = |i: usize, name: &str| -> Result<i64, WavetraderError> {
                column(i, name)?
                    .trim()
                    .parse()
                    .map_err(|_| WavetraderError::Dataset {
                        file: file.clone(),
                        reason: format!("row {index}: {name} is not an integer timestamp"),
                    })
            };

            candles.push(Candle {
                asset: asset.to_string(),
                open_time: timestamp(0, "open_time")?,
                open: column(1, "open")?,
                high: column(2, "high")?,
                low: column(3, "low")?,
                close: column(4, "close")?,
                volume: column(5, "volume")?,
                close_time: timestamp(6, "close_time")?,
            });
        }

        Ok(candles)
    }
}
