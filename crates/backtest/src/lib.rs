//! Vega Backtest
//!
//! Drives the volatility-spike strategy: fetches and aligns the primary and
//! proxy series, builds signals, runs the FLAT/LONG state machine and
//! assembles the result payload.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(missing_docs)]

/// FLAT/LONG state machine.
pub mod engine;
/// Equity curve and drawdown tracking.
pub mod equity;
/// Backtest error types.
pub mod error;
mod event_loop;
mod result_builder;
/// JSON entry points and the end-to-end pipeline.
pub mod runner;
/// Minimum history checks.
pub mod warmup;

pub use engine::{BacktestEngine, BacktestRun, EngineState, StepOutcome, Transition, step};
pub use equity::EquityTracker;
pub use error::BacktestError;
pub use runner::{run_backtest, run_backtest_from_json, run_backtest_json, serialize_error};
pub use vega_indicators::StepInput;
