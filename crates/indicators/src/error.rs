//! Indicator error types.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur while building indicators or signals.
#[derive(Debug, Error)]
pub enum IndicatorError {
    /// Invalid parameters for the indicator
    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    /// Primary and proxy series do not share the same date index
    #[error("misaligned series at row {index}: primary {primary:?}, proxy {proxy:?}")]
    Misaligned {
        /// First row where the indices differ.
        index: usize,
        /// Primary date at that row, if any.
        primary: Option<NaiveDate>,
        /// Proxy date at that row, if any.
        proxy: Option<NaiveDate>,
    },
}

impl IndicatorError {
    /// Creates an `InvalidParams` error with a message.
    #[must_use]
    pub fn invalid_params(msg: impl Into<String>) -> Self {
        IndicatorError::InvalidParams(msg.into())
    }

    /// Stable category tag for reports.
    #[must_use]
    pub fn error_category(&self) -> &'static str {
        match self {
            IndicatorError::InvalidParams(_) => "invalid_params",
            IndicatorError::Misaligned { .. } => "misaligned",
        }
    }
}
