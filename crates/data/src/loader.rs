//! JSON price files and the file-backed provider.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::DataError;
use crate::provider::PriceProvider;
use crate::validation::validate_dates;
use vega_types::{Bar, DateRange, PriceSeries};

/// Environment variable naming the price file root.
pub const DATA_ROOT_ENV: &str = "VEGA_DATA_ROOT";

const DEFAULT_DATA_ROOT: &str = "data/prices";

/// Resolves the price file root from `VEGA_DATA_ROOT`, defaulting to `data/prices`.
#[must_use]
pub fn resolve_data_root() -> PathBuf {
    std::env::var(DATA_ROOT_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_ROOT))
}

/// File path holding `instrument` under `root`.
///
/// Characters outside `[A-Za-z0-9._-]` map to `_`, so `"JPM US Equity"`
/// becomes `JPM_US_Equity.json` and `"^GSPC"` becomes `_GSPC.json`.
#[must_use]
pub fn resolve_series_path(root: &Path, instrument: &str) -> PathBuf {
    let file_stem: String = instrument
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    root.join(format!("{file_stem}.json"))
}

/// On-disk row; open/high/low fall back to close for last-price-only sources.
#[derive(Debug, Deserialize)]
struct BarRecord {
    date: NaiveDate,
    #[serde(default)]
    open: Option<f64>,
    #[serde(default)]
    high: Option<f64>,
    #[serde(default)]
    low: Option<f64>,
    close: f64,
}

impl From<BarRecord> for Bar {
    fn from(r: BarRecord) -> Self {
        Bar {
            date: r.date,
            open: r.open.unwrap_or(r.close),
            high: r.high.unwrap_or(r.close),
            low: r.low.unwrap_or(r.close),
            close: r.close,
        }
    }
}

/// Loads a JSON array of `{date, open?, high?, low?, close}` rows.
///
/// # Errors
/// - [`DataError::DataUnavailable`] when the file cannot be read or parsed,
///   holds no rows, or has non-increasing dates.
pub fn load_series(path: &Path, instrument: &str) -> Result<PriceSeries, DataError> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        DataError::unavailable(instrument, format!("{}: {e}", path.display()))
    })?;
    let records: Vec<BarRecord> = serde_json::from_str(&text).map_err(|e| {
        DataError::unavailable(instrument, format!("{}: {e}", path.display()))
    })?;
    if records.is_empty() {
        return Err(DataError::unavailable(
            instrument,
            format!("{}: no rows", path.display()),
        ));
    }

    let bars: Vec<Bar> = records.into_iter().map(Bar::from).collect();
    validate_dates(&bars)
        .map_err(|e| DataError::unavailable(instrument, format!("{}: {e}", path.display())))?;

    Ok(PriceSeries::new(instrument, bars))
}

/// Provider reading one JSON file per instrument from a root directory.
#[derive(Debug, Clone)]
pub struct JsonFileProvider {
    root: PathBuf,
}

impl JsonFileProvider {
    /// Creates a provider rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Creates a provider rooted at [`resolve_data_root`].
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(resolve_data_root())
    }

    /// Root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl PriceProvider for JsonFileProvider {
    fn fetch(&self, instrument: &str, range: &DateRange) -> Result<PriceSeries, DataError> {
        let path = resolve_series_path(&self.root, instrument);
        let series = load_series(&path, instrument)?.slice_range(range);
        if series.is_empty() {
            return Err(DataError::unavailable(
                instrument,
                format!("no data between {} and {}", range.start, range.end),
            ));
        }
        tracing::debug!(
            "Loaded {} bars for {} from {}",
            series.len(),
            instrument,
            path.display()
        );
        Ok(series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_series_path_sanitizes() {
        let root = Path::new("/tmp/prices");
        assert_eq!(
            resolve_series_path(root, "JPM US Equity"),
            root.join("JPM_US_Equity.json")
        );
        assert_eq!(resolve_series_path(root, "^VIX"), root.join("_VIX.json"));
        assert_eq!(resolve_series_path(root, "BRK.B"), root.join("BRK.B.json"));
    }

    #[test]
    fn test_bar_record_defaults_to_close() {
        let record: BarRecord =
            serde_json::from_str(r#"{"date": "2024-01-02", "close": 10.5}"#).unwrap();
        let bar = Bar::from(record);
        assert_eq!(bar.open, 10.5);
        assert_eq!(bar.high, 10.5);
        assert_eq!(bar.low, 10.5);
    }
}
