use std::path::Path;

use chrono::NaiveDate;
use vega_types::PriceSeries;

pub fn write_series_json(path: &Path, series: &PriceSeries) -> Result<(), Box<dyn std::error::Error>> {
    let rows: Vec<serde_json::Value> = series
        .bars
        .iter()
        .map(|b| {
            serde_json::json!({
                "date": b.date,
                "open": b.open,
                "high": b.high,
                "low": b.low,
                "close": b.close,
            })
        })
        .collect();
    std::fs::write(path, serde_json::to_string_pretty(&rows)?)?;
    Ok(())
}

pub fn trading_days(start: NaiveDate, count: usize) -> Vec<NaiveDate> {
    start.iter_days().take(count).collect()
}

pub fn sample_series(instrument: &str) -> PriceSeries {
    let dates = trading_days(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), 5);
    PriceSeries::from_closes(instrument, &dates, &[100.0, 101.5, 99.0, 102.25, 103.0])
}
