//! Series validation helpers.

use crate::error::DataError;
use vega_types::{Bar, PriceSeries};

/// Validates that bar dates are strictly increasing.
///
/// # Errors
/// - [`DataError::InvalidInput`] on the first non-increasing date.
pub fn validate_dates(bars: &[Bar]) -> Result<(), DataError> {
    for (i, pair) in bars.windows(2).enumerate() {
        if pair[1].date <= pair[0].date {
            return Err(DataError::InvalidInput(format!(
                "non-increasing date at index {}: {} <= {}",
                i + 1,
                pair[1].date,
                pair[0].date
            )));
        }
    }
    Ok(())
}

/// Validates a fully-populated series for simulation.
///
/// Every price must be finite and positive, `low <= high`, and dates must be
/// strictly increasing.
///
/// # Errors
/// - [`DataError::InvalidInput`] when the series is empty or violates the rules above.
pub fn validate_series(series: &PriceSeries) -> Result<(), DataError> {
    if series.is_empty() {
        return Err(DataError::InvalidInput(format!(
            "empty series for {}",
            series.instrument
        )));
    }

    for (i, bar) in series.bars.iter().enumerate() {
        let prices = [bar.open, bar.high, bar.low, bar.close];
        if prices.iter().any(|p| !p.is_finite() || *p <= 0.0) {
            return Err(DataError::InvalidInput(format!(
                "non-positive or non-finite price in {} at index {i}: {bar:?}",
                series.instrument
            )));
        }
        if bar.low > bar.high {
            return Err(DataError::InvalidInput(format!(
                "low above high in {} at index {i}: low={}, high={}",
                series.instrument, bar.low, bar.high
            )));
        }
    }

    validate_dates(&series.bars)
}
