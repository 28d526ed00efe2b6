//! High-level backtest runner helpers.

use vega_data::{PriceProvider, align_series, validate_series};
use vega_indicators::build_signals;
use vega_types::{BacktestConfig, BacktestResult, DateRange, ErrorResult};

use crate::engine::BacktestEngine;
use crate::error::BacktestError;
use crate::result_builder;
use crate::warmup::validate_warmup;

/// Main entry point: receives config JSON, returns result JSON.
///
/// # Errors
/// - [`BacktestError::ConfigParse`] when JSON parsing fails.
/// - [`BacktestError::ConfigValidation`] for invalid configuration values.
/// - Any errors from data loading, alignment, signal building or the engine.
pub fn run_backtest_from_json<P>(config_json: &str, provider: &P) -> Result<String, BacktestError>
where
    P: PriceProvider + ?Sized,
{
    let config: BacktestConfig = serde_json::from_str(config_json)
        .map_err(|e| BacktestError::ConfigParse(e.to_string()))?;

    let result = run_backtest(&config, provider)?;

    serde_json::to_string(&result).map_err(|e| BacktestError::ResultSerialize(e.to_string()))
}

/// Like [`run_backtest_from_json`], but always returns JSON: failures are
/// serialized as `{"ok": false, "error": {...}}`.
#[must_use]
pub fn run_backtest_json<P>(config_json: &str, provider: &P) -> String
where
    P: PriceProvider + ?Sized,
{
    match run_backtest_from_json(config_json, provider) {
        Ok(json) => json,
        Err(err) => {
            tracing::warn!("Backtest failed ({}): {}", err.error_category(), err);
            serialize_error(err)
        }
    }
}

/// Serializes a backtest error into a failed result payload.
#[must_use]
pub fn serialize_error(err: BacktestError) -> String {
    let error_result = BacktestResult::failure(ErrorResult::from(err));

    serde_json::to_string(&error_result).unwrap_or_else(|_| {
        r#"{"ok":false,"error":{"category":"runtime","message":"serialization_failed"}}"#
            .to_string()
    })
}

/// Runs a parsed configuration end to end.
///
/// # Errors
/// See [`run_backtest_from_json`].
pub fn run_backtest<P>(config: &BacktestConfig, provider: &P) -> Result<BacktestResult, BacktestError>
where
    P: PriceProvider + ?Sized,
{
    let range = validate_config(config)?;

    let primary = provider.fetch(&config.primary, &range)?;
    let proxy = provider.fetch(&config.proxy, &range)?;
    validate_series(&primary)?;
    validate_series(&proxy)?;

    let aligned = align_series(&primary, &proxy)?;
    validate_warmup(aligned.dates.len(), &config.signals)?;

    let bundle = build_signals(&aligned.primary, &aligned.proxy, &config.signals)?;
    let engine = BacktestEngine::new(config.initial_capital)?;
    let run = engine.run_bundle(&bundle)?;

    let meta = result_builder::build_meta(
        &config.schema_version,
        &bundle,
        &aligned.alignment_stats,
    );
    Ok(result_builder::build_result(
        engine.initial_capital(),
        run,
        meta,
    ))
}

fn validate_config(config: &BacktestConfig) -> Result<DateRange, BacktestError> {
    if config.primary.trim().is_empty() {
        return Err(BacktestError::ConfigValidation("primary is empty".to_string()));
    }
    if config.proxy.trim().is_empty() {
        return Err(BacktestError::ConfigValidation("proxy is empty".to_string()));
    }

    if !(config.initial_capital.is_finite() && config.initial_capital > 0.0) {
        return Err(BacktestError::ConfigValidation(
            "initial_capital must be > 0".to_string(),
        ));
    }

    if config.signals.ma_window == 0 {
        return Err(BacktestError::ConfigValidation(
            "signals.ma_window must be > 0".to_string(),
        ));
    }
    if config.signals.spike_window == 0 {
        return Err(BacktestError::ConfigValidation(
            "signals.spike_window must be > 0".to_string(),
        ));
    }
    if !(config.signals.band_std_factor.is_finite() && config.signals.band_std_factor >= 0.0) {
        return Err(BacktestError::ConfigValidation(
            "signals.band_std_factor must be >= 0".to_string(),
        ));
    }

    config
        .date_range()
        .map_err(|e| BacktestError::ConfigValidation(e.to_string()))
}
