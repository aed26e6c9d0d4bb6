//! Strategy configuration and validation.
//!
//! Every field is mandatory at the core boundary; defaults, if any, are an
//! external-layer concern. Validation runs before any candle is processed.

use crate::domain::error::WavetraderError;

#[derive(Debug, Clone, PartialEq)]
pub struct StrategyConfig {
    pub rsi_period: usize,
    pub rsi_oversold: f64,
    pub rsi_overbought: f64,
    pub rsi_extreme_oversold: f64,
    pub rsi_extreme_overbought: f64,
    pub macd_fast_period: usize,
    pub macd_slow_period: usize,
    pub macd_signal_period: usize,
    pub initial_balance: f64,
    pub oversold_buy_percentage: f64,
    pub extreme_oversold_buy_percentage: f64,
    pub overbought_sell_percentage: f64,
    pub extreme_overbought_sell_percentage: f64,
}

impl StrategyConfig {
    pub fn validate(&self) -> Result<(), WavetraderError> {
        fn invalid(field: &'static str, reason: String) -> WavetraderError {
            WavetraderError::ConfigInvalid { field, reason }
        }

        if self.rsi_period == 0 {
            return Err(invalid("rsi_period", "must be positive".into()));
        }
        if self.macd_fast_period == 0 {
            return Err(invalid("macd_fast_period", "must be positive".into()));
        }
        if self.macd_slow_period == 0 {
            return Err(invalid("macd_slow_period", "must be positive".into()));
        }
        if self.macd_signal_period == 0 {
            return Err(invalid("macd_signal_period", "must be positive".into()));
        }
        if self.macd_fast_period >= self.macd_slow_period {
            return Err(invalid(
                "macd_fast_period",
                format!(
                    "fast period {} must be less than slow period {}",
                    self.macd_fast_period, self.macd_slow_period
                ),
            ));
        }

        for (field, value) in [
            ("rsi_oversold", self.rsi_oversold),
            ("rsi_overbought", self.rsi_overbought),
            ("rsi_extreme_oversold", self.rsi_extreme_oversold),
            ("rsi_extreme_overbought", self.rsi_extreme_overbought),
        ] {
            if !(value > 0.0 && value < 100.0) {
                return Err(invalid(
                    field,
                    format!("threshold {value} outside (0, 100)"),
                ));
            }
        }
        if self.rsi_oversold >= self.rsi_overbought {
            return Err(invalid(
                "rsi_oversold",
                format!(
                    "oversold threshold {} must be below overbought threshold {}",
                    self.rsi_oversold, self.rsi_overbought
                ),
            ));
        }
        if self.rsi_extreme_oversold > self.rsi_oversold {
            return Err(invalid(
                "rsi_extreme_oversold",
                format!(
                    "extreme oversold threshold {} above oversold threshold {}",
                    self.rsi_extreme_oversold, self.rsi_oversold
                ),
            ));
        }
        if self.rsi_extreme_overbought < self.rsi_overbought {
            return Err(invalid(
                "rsi_extreme_overbought",
                format!(
                    "extreme overbought threshold {} below overbought threshold {}",
                    self.rsi_extreme_overbought, self.rsi_overbought
                ),
            ));
        }

        if !(self.initial_balance > 0.0 && self.initial_balance.is_finite()) {
            return Err(invalid("initial_balance", "must be positive".into()));
        }

        for (field, value) in [
            ("oversold_buy_percentage", self.oversold_buy_percentage),
            (
                "extreme_oversold_buy_percentage",
                self.extreme_oversold_buy_percentage,
            ),
            ("overbought_sell_percentage", self.overbought_sell_percentage),
            (
                "extreme_overbought_sell_percentage",
                self.extreme_overbought_sell_percentage,
            ),
        ] {
            if !(value > 0.0 && value <= 100.0) {
                return Err(invalid(
                    field,
                    format!("sizing percentage {value} outside (0, 100]"),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> StrategyConfig {
        StrategyConfig {
            rsi_period: 14,
            rsi_oversold: 30.0,
            rsi_overbought: 70.0,
            rsi_extreme_oversold: 20.0,
            rsi_extreme_overbought: 80.0,
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
    fn valid_config_passes() {
        assert!(sample_config().validate().is_ok());
    }

    #[test]
    fn zero_rsi_period_rejected() {
        let config = StrategyConfig {
            rsi_period: 0,
            ..sample_config()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            WavetraderError::ConfigInvalid {
                field: "rsi_period",
                ..
            }
        ));
    }

    #[test]
    fn fast_period_must_be_below_slow() {
        let config = StrategyConfig {
            macd_fast_period: 26,
            macd_slow_period: 26,
            ..sample_config()
        };
        assert!(config.validate().is_err());

        let config = StrategyConfig {
            macd_fast_period: 30,
            macd_slow_period: 26,
            ..sample_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn threshold_out_of_range_rejected() {
        let config = StrategyConfig {
            rsi_overbought: 100.0,
            rsi_extreme_overbought: 100.0,
            ..sample_config()
        };
        assert!(config.validate().is_err());

        let config = StrategyConfig {
            rsi_oversold: 0.0,
            ..sample_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn oversold_must_be_below_overbought() {
        let config = StrategyConfig {
            rsi_oversold: 70.0,
            rsi_overbought: 70.0,
            ..sample_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn extreme_thresholds_must_bracket_base_thresholds() {
        let config = StrategyConfig {
            rsi_extreme_oversold: 40.0,
            ..sample_config()
        };
        assert!(config.validate().is_err());

        let config = StrategyConfig {
            rsi_extreme_overbought: 60.0,
            ..sample_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn sizing_percentage_bounds() {
        let config = StrategyConfig {
            oversold_buy_percentage: 0.0,
            ..sample_config()
        };
        assert!(config.validate().is_err());

        let config = StrategyConfig {
            extreme_overbought_sell_percentage: 100.5,
            ..sample_config()
        };
        assert!(config.validate().is_err());

        let config = StrategyConfig {
            overbought_sell_percentage: 100.0,
            ..sample_config()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn non_positive_balance_rejected() {
        let config = StrategyConfig {
            initial_balance: 0.0,
            ..sample_config()
        };
        assert!(config.validate().is_err());

        let config = StrategyConfig {
            initial_balance: -5.0,
            ..sample_config()
        };
        assert!(config.validate().is_err());
    }
}
