//! Backtest error types.

use serde_json::json;
use thiserror::Error;
use vega_types::ErrorResult;

/// Errors that can occur during backtest orchestration.
#[derive(Debug, Error)]
pub enum BacktestError {
    /// JSON config parse error
    #[error("config parse error: {0}")]
    ConfigParse(String),

    /// Config validation error
    #[error("config validation error: {0}")]
    ConfigValidation(String),

    /// Malformed engine input (capital, prices, dates)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Result serialization error
    #[error("result serialization error: {0}")]
    ResultSerialize(String),

    /// Data loading, validation or alignment error
    #[error("data error: {0}")]
    Data(#[from] vega_data::DataError),

    /// Indicator computation error
    #[error("indicator error: {0}")]
    Indicator(#[from] vega_indicators::IndicatorError),

    /// Not enough aligned rows to get past the indicator warmup
    #[error("insufficient data: need {required}, have {available}")]
    InsufficientData {
        /// Required number of rows
        required: usize,
        /// Available number of rows
        available: usize,
    },
}

impl BacktestError {
    /// Creates an `InvalidInput` error with a message.
    #[must_use]
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        BacktestError::InvalidInput(msg.into())
    }

    /// Returns true if this is a config parse/validation error.
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            BacktestError::ConfigParse(_) | BacktestError::ConfigValidation(_)
        )
    }

    /// Returns the error category for the output contract.
    /// Categories: `config`, `market_data`, `invalid_input`, `runtime`
    #[must_use]
    pub fn error_category(&self) -> &'static str {
        match self {
            BacktestError::ConfigParse(_) | BacktestError::ConfigValidation(_) => "config",

            BacktestError::Data(_) | BacktestError::InsufficientData { .. } => "market_data",

            BacktestError::InvalidInput(_) => "invalid_input",

            BacktestError::Indicator(_) | BacktestError::ResultSerialize(_) => "runtime",
        }
    }
}

impl From<BacktestError> for ErrorResult {
    fn from(err: BacktestError) -> Self {
        let details = match &err {
            BacktestError::Data(e) => json!({ "kind": e.error_category() }),
            BacktestError::Indicator(e) => json!({ "kind": e.error_category() }),
            BacktestError::InsufficientData {
                required,
                available,
            } => json!({ "required": required, "available": available }),
            _ => json!({}),
        };
        Self {
            category: err.error_category().to_string(),
            message: err.to_string(),
            details,
        }
    }
}
