use chrono::NaiveDate;
use proptest::prelude::*;
use vega_types::PriceSeries;

/// Generates strictly-dated, strictly positive close series of length `min..=max`.
pub fn valid_price_series(min: usize, max: usize) -> impl Strategy<Value = PriceSeries> {
    prop::collection::vec(0.01f64..10_000.0, min..=max).prop_map(|closes| {
        let start = NaiveDate::from_ymd_opt(2022, 1, 3).unwrap();
        let dates: Vec<NaiveDate> = start.iter_days().take(closes.len()).collect();
        PriceSeries::from_closes("PROP", &dates, &closes)
    })
}
