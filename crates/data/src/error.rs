//! Data-layer error types.

use thiserror::Error;

/// Errors that can occur while fetching, validating or preprocessing series.
#[derive(Debug, Error)]
pub enum DataError {
    /// The series is malformed or too short for the requested transformation.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The price provider could not deliver a series.
    #[error("data unavailable for {instrument}: {reason}")]
    DataUnavailable {
        /// Requested instrument.
        instrument: String,
        /// Provider-specific reason.
        reason: String,
    },

    /// Two series share no common dates.
    #[error("alignment failure: {0}")]
    AlignmentFailure(String),
}

impl DataError {
    /// Creates an `InvalidInput` error with a message.
    #[must_use]
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        DataError::InvalidInput(msg.into())
    }

    /// Creates a `DataUnavailable` error.
    #[must_use]
    pub fn unavailable(instrument: impl Into<String>, reason: impl Into<String>) -> Self {
        DataError::DataUnavailable {
            instrument: instrument.into(),
            reason: reason.into(),
        }
    }

    /// Stable category tag for reports.
    #[must_use]
    pub fn error_category(&self) -> &'static str {
        match self {
            DataError::InvalidInput(_) | DataError::AlignmentFailure(_) => "invalid_input",
            DataError::DataUnavailable { .. } => "data_unavailable",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        assert_eq!(
            DataError::invalid_input("short").error_category(),
            "invalid_input"
        );
        assert_eq!(
            DataError::unavailable("JPM US Equity", "timeout").error_category(),
            "data_unavailable"
        );
        assert_eq!(
            DataError::AlignmentFailure("none".into()).error_category(),
            "invalid_input"
        );
    }

    #[test]
    fn test_unavailable_display() {
        let err = DataError::unavailable("939 HK Equity", "no data");
        assert_eq!(
            err.to_string(),
            "data unavailable for 939 HK Equity: no data"
        );
    }
}
