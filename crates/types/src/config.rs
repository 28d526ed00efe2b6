use chrono::NaiveDate;

use crate::error::CoreError;
use crate::series::{DateRange, InstrumentId};

/// Backtest configuration for the volatility-spike strategy.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct BacktestConfig {
    /// Schema version
    #[serde(default = "default_schema_version")]
    pub schema_version: String,
    /// Traded instrument (e.g. an equity index)
    pub primary: InstrumentId,
    /// Volatility proxy instrument (e.g. a volatility index)
    pub proxy: InstrumentId,
    /// First date requested from the provider
    pub start_date: NaiveDate,
    /// Last date requested from the provider
    pub end_date: NaiveDate,
    /// Starting cash
    #[serde(default = "default_initial_capital")]
    pub initial_capital: f64,
    /// Indicator windows
    #[serde(default)]
    pub signals: SignalConfig,
}

impl BacktestConfig {
    /// Requested date range.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidDateRange`] when `start_date > end_date`.
    pub fn date_range(&self) -> Result<DateRange, CoreError> {
        DateRange::new(self.start_date, self.end_date)
    }
}

fn default_schema_version() -> String {
    "1".to_string()
}

fn default_initial_capital() -> f64 {
    100_000.0
}

/// Signal generator windows.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SignalConfig {
    /// Moving-average / standard-deviation window
    #[serde(default = "default_ma_window")]
    pub ma_window: usize,
    /// Lookback of the proxy breakout test (current bar excluded)
    #[serde(default = "default_spike_window")]
    pub spike_window: usize,
    /// Band width in standard deviations
    #[serde(default = "default_band_std_factor")]
    pub band_std_factor: f64,
}

fn default_ma_window() -> usize {
    30
}
fn default_spike_window() -> usize {
    5
}
fn default_band_std_factor() -> f64 {
    2.0
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            ma_window: default_ma_window(),
            spike_window: default_spike_window(),
            band_std_factor: default_band_std_factor(),
        }
    }
}

/// GARCH(1,1) fitting controls.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GarchConfig {
    /// Smallest return series accepted for fitting
    #[serde(default = "default_min_observations")]
    pub min_observations: usize,
    /// Optimizer iteration bound
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
    /// Relative spread of simplex objective values treated as converged
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

fn default_min_observations() -> usize {
    20
}
fn default_max_iterations() -> usize {
    2000
}
fn default_tolerance() -> f64 {
    1e-9
}

impl Default for GarchConfig {
    fn default() -> Self {
        Self {
            min_observations: default_min_observations(),
            max_iterations: default_max_iterations(),
            tolerance: default_tolerance(),
        }
    }
}

/// Instrument requested in a volatility batch.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct InstrumentSpec {
    /// Provider identifier
    pub id: InstrumentId,
    /// Display label (defaults to `id`)
    #[serde(default)]
    pub label: Option<String>,
}

impl InstrumentSpec {
    /// Creates a spec without a label.
    #[must_use]
    pub fn new(id: impl Into<InstrumentId>) -> Self {
        Self {
            id: id.into(),
            label: None,
        }
    }

    /// Sets the display label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Label for presentation, falling back to the id.
    #[must_use]
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.id)
    }
}

/// Multi-instrument volatility estimation run.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct VolatilityBatchConfig {
    /// Instruments in processing order
    pub instruments: Vec<InstrumentSpec>,
    /// First date requested from the provider
    pub start_date: NaiveDate,
    /// Last date requested from the provider
    pub end_date: NaiveDate,
    /// Model fitting controls
    #[serde(default)]
    pub garch: GarchConfig,
}

impl VolatilityBatchConfig {
    /// Requested date range.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidDateRange`] when `start_date > end_date`.
    pub fn date_range(&self) -> Result<DateRange, CoreError> {
        DateRange::new(self.start_date, self.end_date)
    }
}
