//! INI strategy configuration adapter.
//!
//! Loads a `[strategy]` section with every field of [`StrategyConfig`]
//! present; a missing key is an error, never a silent default.

use configparser::ini::Ini;
use std::path::Path;

use crate::domain::config::StrategyConfig;
use crate::domain::error::WavetraderError;

const SECTION: &str = "strategy";

#[derive(Debug)]
pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, WavetraderError> {
        let mut config = Ini::new();
        config
            .load(&path)
            .map_err(|reason| WavetraderError::ConfigParse {
                file: path.as_ref().display().to_string(),
                reason,
            })?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, WavetraderError> {
        let mut config = Ini::new();
        config
            .read(content.to_string())
            .map_err(|reason| WavetraderError::ConfigParse {
                file: "<inline>".to_string(),
                reason,
            })?;
        Ok(Self { config })
    }

    /// Assemble a fully-populated config. Callers still run
    /// [`StrategyConfig::validate`] (the simulation does so itself).
    pub fn strategy_config(&self) -> Result<StrategyConfig, WavetraderError> {
        Ok(StrategyConfig {
            rsi_period: self.require_period("rsi_period")?,
            rsi_oversold: self.require_float("rsi_oversold")?,
            rsi_overbought: self.require_float("rsi_overbought")?,
            rsi_extreme_oversold: self.require_float("rsi_extreme_oversold")?,
            rsi_extreme_overbought: self.require_float("rsi_extreme_overbought")?,
            macd_fast_period: self.require_period("macd_fast_period")?,
            macd_slow_period: self.require_period("macd_slow_period")?,
            macd_signal_period: self.require_period("macd_signal_period")?,
            initial_balance: self.require_float("initial_balance")?,
            oversold_buy_percentage: self.require_float("oversold_buy_percentage")?,
            extreme_oversold_buy_percentage: self
                .require_float("extreme_oversold_buy_percentage")?,
            overbought_sell_percentage: self.require_float("overbought_sell_percentage")?,
            extreme_overbought_sell_percentage: self
                .require_float("extreme_overbought_sell_percentage")?,
        })
    }

    fn require_float(&self, key: &str) -> Result<f64, WavetraderError> {
        let raw = self
            .config
            .get(SECTION, key)
            .ok_or_else(|| WavetraderError::ConfigMissing {
                section: SECTION.to_string(),
                key: key.to_string(),
            })?;
        raw.trim()
            .parse()
            .map_err(|_| WavetraderError::ConfigParse {
                file: format!("[{SECTION}] {key}"),
                reason: format!("not a number: {raw:?}"),
            })
    }

    fn require_period(&self, key: &str) -> Result<usize, WavetraderError> {
        let raw = self
            .config
            .get(SECTION, key)
            .ok_or_else(|| WavetraderError::ConfigMissing {
                section: SECTION.to_string(),
                key: key.to_string(),
            })?;
        raw.trim()
            .parse()
            .map_err(|_| WavetraderError::ConfigParse {
                file: format!("[{SECTION}] {key}"),
                reason: format!("not a whole number: {raw:?}"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const FULL_CONFIG: &str = r#"
[strategy]
rsi_period = 14
rsi_oversold = 30
rsi_overbought = 70
rsi_extreme_oversold = 20
rsi_extreme_overbought = 80
macd_fast_period = 12
macd_slow_period = 26
macd_signal_period = 9
initial_balance = 10000
oversold_buy_percentage = 50
extreme_oversold_buy_percentage = 25
overbought_sell_percentage = 100
extreme_overbought_sell_percentage = 50
"#;

    #[test]
    fn parses_full_config() {
        let adapter = FileConfigAdapter::from_string(FULL_CONFIG).unwrap();
        let config = adapter.strategy_config().unwrap();
        assert_eq!(config.rsi_period, 14);
        assert_eq!(config.macd_slow_period, 26);
        assert!((config.rsi_oversold - 30.0).abs() < f64::EPSILON);
        assert!((config.initial_balance - 10_000.0).abs() < f64::EPSILON);
        assert!((config.overbought_sell_percentage - 100.0).abs() < f64::EPSILON);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn missing_key_is_reported() {
        let partial = FULL_CONFIG.replace("rsi_period = 14\n", "");
        let adapter = FileConfigAdapter::from_string(&partial).unwrap();
        let err = adapter.strategy_config().unwrap_err();
        match err {
            WavetraderError::ConfigMissing { section, key } => {
                assert_eq!(section, "strategy");
                assert_eq!(key, "rsi_period");
            }
            other => panic!("expected ConfigMissing, got {other:?}"),
        }
    }

    #[test]
    fn non_numeric_value_is_reported() {
        let broken = FULL_CONFIG.replace("initial_balance = 10000", "initial_balance = lots");
        let adapter = FileConfigAdapter::from_string(&broken).unwrap();
        assert!(matches!(
            adapter.strategy_config().unwrap_err(),
            WavetraderError::ConfigParse { .. }
        ));
    }

    #[test]
    fn fractional_period_is_reported() {
        let broken = FULL_CONFIG.replace("rsi_period = 14", "rsi_period = 14.5");
        let adapter = FileConfigAdapter::from_string(&broken).unwrap();
        assert!(matches!(
            adapter.strategy_config().unwrap_err(),
            WavetraderError::ConfigParse { .. }
        ));
    }

    #[test]
    fn loads_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{FULL_CONFIG}").unwrap();
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert!(adapter.strategy_config().is_ok());
    }

    #[test]
    fn missing_file_is_parse_error() {
        let err = FileConfigAdapter::from_file("/nonexistent/wavetrader.ini").unwrap_err();
        assert!(matches!(err, WavetraderError::ConfigParse { .. }));
    }

    // unwrap_err on Result<FileConfigAdapter, _> requires the Ok type to
    // implement Debug.
    #[test]
    fn adapter_formats_for_debugging() {
        let adapter = FileConfigAdapter::from_string(FULL_CONFIG).unwrap();
        assert!(!format!("{adapter:?}").is_empty());
    }
}
