//! Price-to-return preprocessing.

use crate::error::DataError;
use crate::validation::validate_dates;
use vega_types::{PriceSeries, ReturnSeries};

/// Scale applied to log returns (percentage points).
pub const RETURN_SCALE: f64 = 100.0;

/// Converts a price series into percentage log returns on close prices.
///
/// `r[t] = 100 * ln(close[t] / close[t-1])`, dated at `t`. The first bar has
/// no return. A missing close (`NaN`) leaves both returns that touch it
/// undefined, and those rows are dropped.
///
/// # Errors
/// - [`DataError::InvalidInput`] for fewer than two bars, non-increasing dates,
///   a finite close `<= 0`, an infinite close, or when no return is defined.
pub fn log_returns(series: &PriceSeries) -> Result<ReturnSeries, DataError> {
    let n = series.len();
    if n < 2 {
        return Err(DataError::InvalidInput(format!(
            "{}: need at least 2 observations to compute returns, got {n}",
            series.instrument
        )));
    }

    validate_dates(&series.bars)?;

    if let Some((i, bar)) = series
        .bars
        .iter()
        .enumerate()
        .find(|(_, b)| b.close.is_infinite() || (b.close.is_finite() && b.close <= 0.0))
    {
        return Err(DataError::InvalidInput(format!(
            "{}: log return undefined for close {} at index {i}",
            series.instrument, bar.close
        )));
    }

    let mut dates = Vec::with_capacity(n - 1);
    let mut values = Vec::with_capacity(n - 1);
    for pair in series.bars.windows(2) {
        let (prev, curr) = (pair[0].close, pair[1].close);
        if prev.is_nan() || curr.is_nan() {
            continue;
        }
        dates.push(pair[1].date);
        values.push((curr / prev).ln() * RETURN_SCALE);
    }

    if values.is_empty() {
        return Err(DataError::InvalidInput(format!(
            "{}: no defined returns after dropping missing prices",
            series.instrument
        )));
    }

    Ok(ReturnSeries {
        instrument: series.instrument.clone(),
        dates,
        values,
    })
}
