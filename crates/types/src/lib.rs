//! Vega Types
//!
//! Core data structures for the Vega workspace.
//! This crate provides price and return series, volatility estimates,
//! position state, trades, configuration, and backtest results.

#![deny(clippy::all)]

pub mod bar;
pub mod config;
pub mod error;
pub mod position;
pub mod result;
pub mod series;
pub mod trade;

// Re-export main types for convenience
pub use bar::Bar;
pub use config::{
    BacktestConfig, GarchConfig, InstrumentSpec, SignalConfig, VolatilityBatchConfig,
};
pub use error::CoreError;
pub use position::PositionState;
pub use result::{BacktestResult, EquityPoint, ErrorResult, Metrics, ResultMeta};
pub use series::{
    DateRange, GarchParams, InstrumentId, PriceSeries, ReturnSeries, VolatilityEstimate,
};
pub use trade::{OpenPosition, Trade};
