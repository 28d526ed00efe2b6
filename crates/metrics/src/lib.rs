//! Vega Metrics
//!
//! Computes summary metrics from a backtest's equity curve and trade ledger.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(missing_docs)]

/// Metric computation entrypoints.
pub mod compute;
/// Equity-curve metric helpers.
pub mod equity_metrics;
/// Trade-based metric helpers.
pub mod trade_metrics;

pub use compute::compute_metrics;
pub use equity_metrics::{compute_drawdown, exposure};
