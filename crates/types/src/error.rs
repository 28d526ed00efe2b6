use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised while constructing shared types.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Range start lies after range end
    #[error("invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Requested start date
        start: NaiveDate,
        /// Requested end date
        end: NaiveDate,
    },
}
