//! Price-history provider capability.

use std::collections::HashMap;

use crate::error::DataError;
use vega_types::{DateRange, PriceSeries};

/// Source of historical prices.
///
/// Implementations own any connection or session lifecycle; callers only see
/// a series or a [`DataError::DataUnavailable`].
pub trait PriceProvider {
    /// Fetches bars of `instrument` whose dates fall inside `range`.
    ///
    /// # Errors
    /// Returns [`DataError::DataUnavailable`] when the series cannot be delivered.
    fn fetch(&self, instrument: &str, range: &DateRange) -> Result<PriceSeries, DataError>;
}

impl<P: PriceProvider + ?Sized> PriceProvider for &P {
    fn fetch(&self, instrument: &str, range: &DateRange) -> Result<PriceSeries, DataError> {
        (**self).fetch(instrument, range)
    }
}

/// Provider backed by series held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProvider {
    series: HashMap<String, PriceSeries>,
}

impl InMemoryProvider {
    /// Creates an empty provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the series stored under its instrument id.
    pub fn insert(&mut self, series: PriceSeries) {
        self.series.insert(series.instrument.clone(), series);
    }

    /// Builder-style [`InMemoryProvider::insert`].
    #[must_use]
    pub fn with_series(mut self, series: PriceSeries) -> Self {
        self.insert(series);
        self
    }

    /// Number of stored instruments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Returns true when nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

impl PriceProvider for InMemoryProvider {
    fn fetch(&self, instrument: &str, range: &DateRange) -> Result<PriceSeries, DataError> {
        let series = self
            .series
            .get(instrument)
            .ok_or_else(|| DataError::unavailable(instrument, "unknown instrument"))?;

        let sliced = series.slice_range(range);
        if sliced.is_empty() {
            return Err(DataError::unavailable(
                instrument,
                format!("no data between {} and {}", range.start, range.end),
            ));
        }
        Ok(sliced)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn provider() -> InMemoryProvider {
        InMemoryProvider::new().with_series(PriceSeries::from_closes(
            "SCHW US Equity",
            &[day(1), day(2), day(3)],
            &[60.0, 61.0, 62.0],
        ))
    }

    #[test]
    fn test_fetch_filters_range() {
        let range = DateRange::new(day(2), day(10)).unwrap();
        let series = provider().fetch("SCHW US Equity", &range).unwrap();
        assert_eq!(series.dates(), vec![day(2), day(3)]);
    }

    #[test]
    fn test_fetch_unknown_instrument() {
        let range = DateRange::new(day(1), day(3)).unwrap();
        let err = provider().fetch("BAC US Equity", &range).unwrap_err();
        assert!(matches!(err, DataError::DataUnavailable { .. }));
    }

    #[test]
    fn test_fetch_empty_range_is_unavailable() {
        let range = DateRange::new(day(20), day(25)).unwrap();
        let err = provider().fetch("SCHW US Equity", &range).unwrap_err();
        assert!(err.to_string().contains("no data between"));
    }

    #[test]
    fn test_provider_by_reference() {
        fn fetch_len<P: PriceProvider>(provider: P, range: &DateRange) -> usize {
            provider.fetch("SCHW US Equity", range).map_or(0, |s| s.len())
        }

        let p = provider();
        let range = DateRange::new(day(1), day(3)).unwrap();
        assert_eq!(fetch_len(&p, &range), 3);
        let as_dyn: &dyn PriceProvider = &p;
        assert_eq!(fetch_len(as_dyn, &range), 3);
    }
}
