//! Volatility error types.

use thiserror::Error;
use vega_data::DataError;

/// Errors from volatility estimation, caching and batch configuration.
#[derive(Debug, Error)]
pub enum VolatilityError {
    /// Fetching or preprocessing the price series failed
    #[error(transparent)]
    Data(#[from] DataError),

    /// Too few returns for a stable fit
    #[error("insufficient data for {instrument}: need {required} returns, got {actual}")]
    InsufficientData {
        /// Instrument being fitted.
        instrument: String,
        /// Minimum number of returns.
        required: usize,
        /// Returns provided.
        actual: usize,
    },

    /// Optimizer hit its iteration bound
    #[error("GARCH fit for {instrument} did not converge within {iterations} iterations")]
    NonConvergence {
        /// Instrument being fitted.
        instrument: String,
        /// Iterations performed.
        iterations: usize,
    },

    /// Likelihood or variance path is not finite
    #[error("non-finite GARCH fit for {instrument}: {reason}")]
    NonFinite {
        /// Instrument being fitted.
        instrument: String,
        /// What went wrong.
        reason: String,
    },

    /// Cache already holds an entry for the instrument
    #[error("duplicate cache key: {0}")]
    DuplicateKey(String),

    /// Batch request could not be parsed or validated
    #[error("invalid batch configuration: {0}")]
    InvalidConfig(String),
}

impl VolatilityError {
    /// Creates an `InvalidConfig` error with a message.
    #[must_use]
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        VolatilityError::InvalidConfig(msg.into())
    }

    /// Returns true for failures of the model fit itself.
    #[must_use]
    pub fn is_model_fit_error(&self) -> bool {
        matches!(
            self,
            VolatilityError::InsufficientData { .. }
                | VolatilityError::NonConvergence { .. }
                | VolatilityError::NonFinite { .. }
        )
    }

    /// Stable category tag for reports.
    #[must_use]
    pub fn error_category(&self) -> &'static str {
        match self {
            VolatilityError::Data(e) => e.error_category(),
            VolatilityError::InsufficientData { .. }
            | VolatilityError::NonConvergence { .. }
            | VolatilityError::NonFinite { .. } => "model_fit",
            VolatilityError::DuplicateKey(_) => "duplicate_key",
            VolatilityError::InvalidConfig(_) => "config",
        }
    }
}
