//! Multi-instrument volatility batch.
//!
//! Each requested instrument is fetched and fitted independently. Results are
//! folded into a fresh [`VolatilityCache`]: successes are inserted once,
//! failures are recorded with the instrument and never abort the others.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::cache::VolatilityCache;
use crate::error::VolatilityError;
use crate::garch::estimate_volatility;
use vega_data::PriceProvider;
use vega_types::{
    DateRange, GarchConfig, GarchParams, InstrumentId, InstrumentSpec, VolatilityBatchConfig,
    VolatilityEstimate,
};

/// Diagnostic for an instrument that has no cache entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchFailure {
    /// Requested instrument
    pub instrument: InstrumentId,
    /// Display label
    pub label: String,
    /// Error category (see `error_category()` on the error types)
    pub category: String,
    /// Error message
    pub message: String,
}

impl BatchFailure {
    fn new(spec: &InstrumentSpec, err: &VolatilityError) -> Self {
        Self {
            instrument: spec.id.clone(),
            label: spec.display_label().to_string(),
            category: err.error_category().to_string(),
            message: err.to_string(),
        }
    }
}

/// Outcome of a batch for one instrument.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InstrumentStatus<'a> {
    /// Estimated and cached
    Present(&'a VolatilityEstimate),
    /// Requested but failed
    Failed(&'a BatchFailure),
    /// Not part of the request
    NotRequested,
}

/// Result of one batch run.
#[derive(Debug, Clone)]
pub struct VolatilityBatch {
    requested: Vec<InstrumentSpec>,
    cache: VolatilityCache,
    failures: Vec<BatchFailure>,
}

impl VolatilityBatch {
    /// Successful estimates.
    #[must_use]
    pub fn cache(&self) -> &VolatilityCache {
        &self.cache
    }

    /// Failed instruments in request order.
    #[must_use]
    pub fn failures(&self) -> &[BatchFailure] {
        &self.failures
    }

    /// Instruments as requested.
    #[must_use]
    pub fn requested(&self) -> &[InstrumentSpec] {
        &self.requested
    }

    /// Distinguishes "absent due to failure" from "never requested".
    ///
    /// A duplicated request reports the first instance's outcome.
    #[must_use]
    pub fn status(&self, instrument: &str) -> InstrumentStatus<'_> {
        if let Some(estimate) = self.cache.get(instrument) {
            return InstrumentStatus::Present(estimate);
        }
        match self.failures.iter().find(|f| f.instrument == instrument) {
            Some(failure) => InstrumentStatus::Failed(failure),
            None => InstrumentStatus::NotRequested,
        }
    }

    /// Serializable view keyed by display label.
    #[must_use]
    pub fn report(&self) -> VolatilityReport {
        let series = self
            .cache
            .iter()
            .map(|(id, estimate)| {
                let label = self
                    .requested
                    .iter()
                    .find(|s| s.id == id)
                    .map_or(id, InstrumentSpec::display_label);
                ReportSeries {
                    instrument: id.to_string(),
                    label: label.to_string(),
                    dates: estimate.dates.clone(),
                    values: estimate.values.clone(),
                    latest: estimate.latest().map(|(_, v)| v),
                    long_run_volatility: estimate.params.long_run_variance().map(f64::sqrt),
                    half_life: estimate.params.half_life(),
                    params: estimate.params,
                }
            })
            .collect();

        VolatilityReport {
            requested: self.requested.len(),
            succeeded: self.cache.len(),
            series,
            failures: self.failures.clone(),
        }
    }
}

/// One estimated series in a [`VolatilityReport`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSeries {
    /// Instrument id
    pub instrument: InstrumentId,
    /// Display label
    pub label: String,
    /// Return dates
    pub dates: Vec<NaiveDate>,
    /// Conditional volatility per date
    pub values: Vec<f64>,
    /// Last conditional volatility
    pub latest: Option<f64>,
    /// Unconditional volatility, if the fit is stationary
    pub long_run_volatility: Option<f64>,
    /// Periods for a variance shock to halve, if the fit is stationary
    pub half_life: Option<f64>,
    /// Fitted parameters
    pub params: GarchParams,
}

/// Presentation-ready summary of a batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolatilityReport {
    /// Number of requested instruments
    pub requested: usize,
    /// Number of cached estimates
    pub succeeded: usize,
    /// Estimated series in cache order
    pub series: Vec<ReportSeries>,
    /// Failed instruments
    pub failures: Vec<BatchFailure>,
}

/// Estimates volatility for every instrument in `instruments`.
///
/// Never fails as a whole: fetch and fit errors are recorded as
/// [`BatchFailure`]s. Each instrument is fetched at most once; a repeat is
/// recorded as a `duplicate_key` failure whatever the first outcome was.
pub fn run_volatility_batch<P>(
    provider: &P,
    instruments: &[InstrumentSpec],
    range: &DateRange,
    garch: &GarchConfig,
) -> VolatilityBatch
where
    P: PriceProvider + ?Sized,
{
    tracing::info!(
        "Starting volatility batch: {} instruments, {} to {}",
        instruments.len(),
        range.start,
        range.end
    );

    let mut seen: HashSet<&str> = HashSet::with_capacity(instruments.len());
    let (cache, failures) = instruments.iter().fold(
        (VolatilityCache::with_capacity(instruments.len()), Vec::new()),
        |(mut cache, mut failures), spec| {
            let stored = if seen.insert(spec.id.as_str()) {
                provider
                    .fetch(&spec.id, range)
                    .map_err(VolatilityError::from)
                    .and_then(|series| estimate_volatility(&series, garch))
                    .and_then(|estimate| cache.put(spec.id.clone(), estimate))
            } else {
                Err(VolatilityError::DuplicateKey(spec.id.clone()))
            };
            if let Err(err) = stored {
                tracing::warn!(
                    "Volatility estimation failed for {} ({}): {}",
                    spec.display_label(),
                    err.error_category(),
                    err
                );
                failures.push(BatchFailure::new(spec, &err));
            }
            (cache, failures)
        },
    );

    tracing::info!(
        "Volatility batch complete: {} succeeded, {} failed",
        cache.len(),
        failures.len()
    );

    VolatilityBatch {
        requested: instruments.to_vec(),
        cache,
        failures,
    }
}

/// Parses a [`VolatilityBatchConfig`] and runs it.
///
/// # Errors
/// Returns [`VolatilityError::InvalidConfig`] for malformed JSON, an inverted
/// date range, an empty instrument list or invalid fitting controls.
pub fn run_volatility_batch_from_json<P>(
    config_json: &str,
    provider: &P,
) -> Result<VolatilityBatch, VolatilityError>
where
    P: PriceProvider + ?Sized,
{
    let config: VolatilityBatchConfig = serde_json::from_str(config_json)
        .map_err(|e| VolatilityError::invalid_config(format!("failed to parse config: {e}")))?;
    let range = validate_config(&config)?;
    Ok(run_volatility_batch(
        provider,
        &config.instruments,
        &range,
        &config.garch,
    ))
}

fn validate_config(config: &VolatilityBatchConfig) -> Result<DateRange, VolatilityError> {
    let range = config
        .date_range()
        .map_err(|e| VolatilityError::invalid_config(e.to_string()))?;
    if config.instruments.is_empty() {
        return Err(VolatilityError::invalid_config("instruments must not be empty"));
    }
    if config.garch.max_iterations == 0 {
        return Err(VolatilityError::invalid_config("garch.max_iterations must be >= 1"));
    }
    if !(config.garch.tolerance.is_finite() && config.garch.tolerance >= 0.0) {
        return Err(VolatilityError::invalid_config(
            "garch.tolerance must be finite and >= 0",
        ));
    }
    Ok(range)
}
