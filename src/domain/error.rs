//! Domain error types.

/// Top-level error type for wavetrader.
#[derive(Debug, thiserror::Error)]
pub enum WavetraderError {
    #[error("malformed candle field {field}: {value:?}")]
    Data { field: &'static str, value: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value for {field}: {reason}")]
    ConfigInvalid { field: &'static str, reason: String },

    #[error("invalid {action} order: {reason}")]
    InvalidOrder { action: &'static str, reason: String },

    #[error("dataset error in {file}: {reason}")]
    Dataset { file: String, reason: String },
}

impl WavetraderError {
    /// Process exit code: 1 for configuration problems, 2 for bad input
    /// data, 3 for an order the rule engine should never have produced.
    pub fn exit_code(&self) -> u8 {
        match self {
            WavetraderError::ConfigParse { .. }
            | WavetraderError::ConfigMissing { .. }
            | WavetraderError::ConfigInvalid { .. } => 1,
            WavetraderError::Dataset { .. } | WavetraderError::Data { .. } => 2,
            WavetraderError::InvalidOrder { .. } => 3,
        }
    }
}

impl From<&WavetraderError> for std::process::ExitCode {
    fn from(err: &WavetraderError) -> Self {
        std::process::ExitCode::from(err.exit_code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_error_display() {
        let err = WavetraderError::Data {
            field: "close",
            value: "12.3.4".to_string(),
        };
        assert_eq!(err.to_string(), "malformed candle field close: \"12.3.4\"");
    }

    #[test]
    fn config_missing_display() {
        let err = WavetraderError::ConfigMissing {
            section: "strategy".to_string(),
            key: "rsi_period".to_string(),
        };
        assert_eq!(err.to_string(), "missing config key [strategy] rsi_period");
    }

    #[test]
    fn exit_codes_group_by_failure_class() {
        let config = WavetraderError::ConfigMissing {
            section: "strategy".to_string(),
            key: "rsi_period".to_string(),
        };
        let data = WavetraderError::Data {
            field: "close",
            value: "oops".to_string(),
        };
        let dataset = WavetraderError::Dataset {
            file: "BTCUSDT.json".to_string(),
            reason: "gone".to_string(),
        };
        let order = WavetraderError::InvalidOrder {
            action: "buy",
            reason: "broke".to_string(),
        };
        assert_eq!(config.exit_code(), 1);
        assert_eq!(data.exit_code(), 2);
        assert_eq!(dataset.exit_code(), 2);
        assert_eq!(order.exit_code(), 3);
    }

    #[test]
    fn invalid_order_display() {
        let err = WavetraderError::InvalidOrder {
            action: "buy",
            reason: "sizing percentage 120 outside (0, 100]".to_string(),
        };
        assert!(err.to_string().starts_with("invalid buy order"));
    }
}
