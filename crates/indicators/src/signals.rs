//! Indicator bundle and entry/exit signals.
//!
//! Combines the primary series' moving average, bands and lower-low pattern
//! with the proxy's spike flag into one row per aligned date:
//!
//! - entry(t) = `lower_low(t) && spike(t-1) && !spike(t) && close(t) < upper(t)`
//! - exit(t) = `close(t) > ma(t) || close(t) < lower(t)`

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::IndicatorError;
use crate::impl_::bollinger::BollingerBands;
use crate::impl_::lower_low::LowerLow;
use crate::impl_::spike::VolatilitySpike;
use crate::traits::{FlagIndicator, MultiOutputIndicator};
use vega_types::{InstrumentId, PriceSeries, SignalConfig};

/// Indicator values and signals for one aligned date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalRow {
    /// Row date
    pub date: NaiveDate,
    /// Primary close
    pub close: f64,
    /// Primary low
    pub low: f64,
    /// Moving average of the primary close
    pub ma: f64,
    /// Upper band
    pub upper: f64,
    /// Lower band
    pub lower: f64,
    /// `low[t] < low[t-1] < low[t-2]`
    pub lower_low: bool,
    /// Proxy close
    pub proxy_close: f64,
    /// Proxy breakout on this row
    pub spike: bool,
    /// Proxy breakout on the previous row
    pub prev_spike: bool,
    /// Entry signal
    pub entry: bool,
    /// Exit signal
    pub exit: bool,
}

/// Minimal per-row input consumed by the backtest engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepInput {
    /// Row date
    pub date: NaiveDate,
    /// Price at which transitions execute
    pub close: f64,
    /// Entry signal
    pub entry: bool,
    /// Exit signal
    pub exit: bool,
}

impl From<&SignalRow> for StepInput {
    fn from(row: &SignalRow) -> Self {
        Self {
            date: row.date,
            close: row.close,
            entry: row.entry,
            exit: row.exit,
        }
    }
}

/// Signal rows for a primary/proxy pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorBundle {
    /// Traded instrument
    pub primary: InstrumentId,
    /// Volatility proxy instrument
    pub proxy: InstrumentId,
    /// Windows the bundle was built with
    pub config: SignalConfig,
    /// Rows from the first fully-defined date onward
    pub rows: Vec<SignalRow>,
}

impl IndicatorBundle {
    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true when there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Engine inputs, one per row.
    #[must_use]
    pub fn step_inputs(&self) -> Vec<StepInput> {
        self.rows.iter().map(StepInput::from).collect()
    }

    /// Number of rows carrying an entry signal.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.rows.iter().filter(|r| r.entry).count()
    }

    /// Number of rows carrying an exit signal.
    #[must_use]
    pub fn exit_count(&self) -> usize {
        self.rows.iter().filter(|r| r.exit).count()
    }
}

/// Index of the first row where every rolling value is defined.
#[must_use]
pub fn first_valid_row(config: &SignalConfig) -> usize {
    (config.ma_window.saturating_sub(1))
        .max(config.spike_window + 1)
        .max(2)
}

fn validate_config(config: &SignalConfig) -> Result<(), IndicatorError> {
    if config.ma_window == 0 {
        return Err(IndicatorError::invalid_params("ma_window must be >= 1"));
    }
    if config.spike_window == 0 {
        return Err(IndicatorError::invalid_params("spike_window must be >= 1"));
    }
    if !config.band_std_factor.is_finite() || config.band_std_factor < 0.0 {
        return Err(IndicatorError::invalid_params(format!(
            "band_std_factor must be finite and >= 0, got {}",
            config.band_std_factor
        )));
    }
    Ok(())
}

fn check_aligned(primary: &PriceSeries, proxy: &PriceSeries) -> Result<(), IndicatorError> {
    let n = primary.len().max(proxy.len());
    for index in 0..n {
        let p = primary.bars.get(index).map(|b| b.date);
        let x = proxy.bars.get(index).map(|b| b.date);
        if p != x {
            return Err(IndicatorError::Misaligned {
                index,
                primary: p,
                proxy: x,
            });
        }
    }
    Ok(())
}

/// Builds the indicator bundle for two series sharing one date index.
///
/// Rows before [`first_valid_row`] are excluded, so a series shorter than the
/// warmup yields an empty bundle. Rows whose moving average or bands are not
/// finite are skipped as well.
///
/// # Errors
/// - [`IndicatorError::InvalidParams`] for a zero window or a negative or
///   non-finite band factor.
/// - [`IndicatorError::Misaligned`] when the date indices differ.
pub fn build_signals(
    primary: &PriceSeries,
    proxy: &PriceSeries,
    config: &SignalConfig,
) -> Result<IndicatorBundle, IndicatorError> {
    validate_config(config)?;
    check_aligned(primary, proxy)?;

    let band_indicator = BollingerBands::new(config.ma_window, config.band_std_factor);
    let spike_indicator = VolatilitySpike::new(config.spike_window);
    tracing::debug!(
        "Computing {}({}), {}({}) and {}({}) over {} rows",
        band_indicator.name(),
        band_indicator.warmup_periods(),
        LowerLow.name(),
        LowerLow.warmup_periods(),
        spike_indicator.name(),
        spike_indicator.warmup_periods(),
        primary.len()
    );

    let bands = band_indicator.compute_all(&primary.bars);
    let lower_low = LowerLow.compute_flags(&primary.bars);
    let spike = spike_indicator.compute_flags(&proxy.bars);

    let t0 = first_valid_row(config);
    let mut rows = Vec::with_capacity(primary.len().saturating_sub(t0));
    for t in t0..primary.len() {
        let (ma, upper, lower) = (bands.middle[t], bands.upper[t], bands.lower[t]);
        if !(ma.is_finite() && upper.is_finite() && lower.is_finite()) {
            continue;
        }
        let bar = primary.bars[t];
        let prev_spike = spike[t - 1];
        let entry = lower_low[t] && prev_spike && !spike[t] && bar.close < upper;
        let exit = bar.close > ma || bar.close < lower;

        rows.push(SignalRow {
            date: bar.date,
            close: bar.close,
            low: bar.low,
            ma,
            upper,
            lower,
            lower_low: lower_low[t],
            proxy_close: proxy.bars[t].close,
            spike: spike[t],
            prev_spike,
            entry,
            exit,
        });
    }

    let bundle = IndicatorBundle {
        primary: primary.instrument.clone(),
        proxy: proxy.instrument.clone(),
        config: config.clone(),
        rows,
    };
    tracing::debug!(
        "Built {} signal rows for {}/{} ({} entries, {} exits)",
        bundle.len(),
        bundle.primary,
        bundle.proxy,
        bundle.entry_count(),
        bundle.exit_count()
    );
    Ok(bundle)
}
