//! Backtest result assembly helpers.

use vega_data::AlignmentStats;
use vega_indicators::IndicatorBundle;
use vega_metrics::compute_metrics;
use vega_types::{BacktestResult, ResultMeta};

use crate::engine::BacktestRun;

/// Builds a successful backtest result payload.
#[must_use]
pub(crate) fn build_result(initial_capital: f64, run: BacktestRun, meta: ResultMeta) -> BacktestResult {
    let metrics = compute_metrics(initial_capital, &run.equity_curve, &run.trades);

    BacktestResult {
        ok: true,
        error: None,
        trades: Some(run.trades),
        open_position: run.open_position,
        metrics: Some(metrics),
        equity_curve: Some(run.equity_curve),
        meta: Some(meta),
    }
}

/// Builds metadata for a backtest result.
#[must_use]
pub(crate) fn build_meta(
    schema_version: &str,
    bundle: &IndicatorBundle,
    alignment: &AlignmentStats,
) -> ResultMeta {
    ResultMeta {
        schema_version: schema_version.to_string(),
        primary: bundle.primary.clone(),
        proxy: bundle.proxy.clone(),
        rows_processed: bundle.len() as u64,
        first_date: bundle.rows.first().map(|r| r.date),
        last_date: bundle.rows.last().map(|r| r.date),
        extra: serde_json::json!({
            "signals": bundle.config,
            "entry_signals": bundle.entry_count(),
            "exit_signals": bundle.exit_count(),
            "alignment": alignment,
        }),
    }
}
