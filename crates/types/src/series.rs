//! Time-indexed series shared across the workspace.

use chrono::NaiveDate;

use crate::bar::Bar;
use crate::error::CoreError;

/// Opaque instrument identifier (e.g. `"JPM US Equity"`).
pub type InstrumentId = String;

/// Inclusive calendar date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DateRange {
    /// First date (inclusive)
    pub start: NaiveDate,
    /// Last date (inclusive)
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a range, rejecting `start > end`.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidDateRange`] when `start` is after `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, CoreError> {
        if start > end {
            return Err(CoreError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Returns true if `date` lies within the range.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Ordered price history of one instrument.
///
/// Dates are expected to be strictly increasing; the data layer validates this
/// before any computation consumes the series.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PriceSeries {
    /// Instrument the bars belong to
    pub instrument: InstrumentId,
    /// Bars in date order
    pub bars: Vec<Bar>,
}

impl PriceSeries {
    /// Creates a series from bars.
    #[must_use]
    pub fn new(instrument: impl Into<InstrumentId>, bars: Vec<Bar>) -> Self {
        Self {
            instrument: instrument.into(),
            bars,
        }
    }

    /// Creates a close-only series from parallel date and close slices.
    ///
    /// Extra elements of the longer slice are ignored.
    #[must_use]
    pub fn from_closes(
        instrument: impl Into<InstrumentId>,
        dates: &[NaiveDate],
        closes: &[f64],
    ) -> Self {
        let bars = dates
            .iter()
            .zip(closes)
            .map(|(date, close)| Bar::from_close(*date, *close))
            .collect();
        Self::new(instrument, bars)
    }

    /// Number of bars.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Returns true when there are no bars.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Dates of all bars.
    #[must_use]
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.bars.iter().map(|b| b.date).collect()
    }

    /// Close prices of all bars.
    #[must_use]
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Low prices of all bars.
    #[must_use]
    pub fn lows(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.low).collect()
    }

    /// Returns a copy restricted to `range`.
    #[must_use]
    pub fn slice_range(&self, range: &DateRange) -> Self {
        Self {
            instrument: self.instrument.clone(),
            bars: self
                .bars
                .iter()
                .filter(|b| range.contains(b.date))
                .copied()
                .collect(),
        }
    }
}

/// Percentage log returns aligned to the later observation date.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ReturnSeries {
    /// Source instrument
    pub instrument: InstrumentId,
    /// Date of each return (date of `price[t]`)
    pub dates: Vec<NaiveDate>,
    /// `100 * ln(price[t] / price[t-1])`
    pub values: Vec<f64>,
}

impl ReturnSeries {
    /// Number of returns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true when there are no returns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Fitted GARCH(1,1) parameters with constant mean.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GarchParams {
    /// Constant mean of the returns
    pub mu: f64,
    /// Variance intercept
    pub omega: f64,
    /// Weight of the previous squared residual
    pub alpha: f64,
    /// Weight of the previous conditional variance
    pub beta: f64,
    /// Gaussian log-likelihood at the optimum
    pub log_likelihood: f64,
    /// Optimizer iterations used
    pub iterations: usize,
}

impl GarchParams {
    /// `alpha + beta`
    #[must_use]
    pub fn persistence(&self) -> f64 {
        self.alpha + self.beta
    }

    /// Unconditional variance `omega / (1 - alpha - beta)`, if stationary.
    #[must_use]
    pub fn long_run_variance(&self) -> Option<f64> {
        let persistence = self.persistence();
        if persistence < 1.0 {
            Some(self.omega / (1.0 - persistence))
        } else {
            None
        }
    }

    /// Periods for a variance shock to decay by half, if stationary.
    #[must_use]
    pub fn half_life(&self) -> Option<f64> {
        let persistence = self.persistence();
        if persistence > 0.0 && persistence < 1.0 {
            Some(-(2.0_f64.ln()) / persistence.ln())
        } else {
            None
        }
    }
}

/// Conditional volatility path of one instrument.
///
/// `values[i]` is the conditional standard deviation on `dates[i]`, in the
/// same percentage units as the return series it was fitted on.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VolatilityEstimate {
    /// Source instrument
    pub instrument: InstrumentId,
    /// Dates, identical to the fitted return series
    pub dates: Vec<NaiveDate>,
    /// Conditional standard deviation per date (non-negative)
    pub values: Vec<f64>,
    /// Fitted model parameters
    pub params: GarchParams,
}

impl VolatilityEstimate {
    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true when there are no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Most recent conditional volatility, if any.
    #[must_use]
    pub fn latest(&self) -> Option<(NaiveDate, f64)> {
        self.dates.last().copied().zip(self.values.last().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_date_range_rejects_inverted_bounds() {
        assert!(DateRange::new(day(5), day(1)).is_err());
        let range = DateRange::new(day(1), day(5)).unwrap();
        assert!(range.contains(day(1)));
        assert!(range.contains(day(5)));
        assert!(!range.contains(day(6)));
    }

    #[test]
    fn test_from_closes_and_slice() {
        let dates = [day(1), day(2), day(3), day(4)];
        let series = PriceSeries::from_closes("SPX", &dates, &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(series.len(), 4);
        assert_eq!(series.closes(), vec![1.0, 2.0, 3.0, 4.0]);

        let sliced = series.slice_range(&DateRange::new(day(2), day(3)).unwrap());
        assert_eq!(sliced.dates(), vec![day(2), day(3)]);
        assert_eq!(sliced.instrument, "SPX");
    }

    #[test]
    fn test_garch_params_derived_values() {
        let params = GarchParams {
            mu: 0.05,
            omega: 0.1,
            alpha: 0.1,
            beta: 0.8,
            log_likelihood: -100.0,
            iterations: 10,
        };
        assert!((params.persistence() - 0.9).abs() < 1e-12);
        assert!((params.long_run_variance().unwrap() - 1.0).abs() < 1e-12);
        let half_life = params.half_life().unwrap();
        assert!((0.9_f64.powf(half_life) - 0.5).abs() < 1e-12);

        let explosive = GarchParams {
            alpha: 0.5,
            beta: 0.6,
            ..params
        };
        assert!(explosive.long_run_variance().is_none());
        assert!(explosive.half_life().is_none());
    }
}
