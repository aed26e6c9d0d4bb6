//! Candle feed port trait.
//!
//! The core performs no file or network I/O itself; adapters supply the
//! candle series through this trait.

use crate::domain::candle::Candle;
use crate::domain::error::WavetraderError;

pub trait DataPort {
    fn load_candles(&self, asset: &str) -> Result<Vec<Candle>, WavetraderError>;
}
