//! Vega Volatility
//!
//! GARCH(1,1) conditional volatility estimation for a set of instruments.
//!
//! # Features
//! - Maximum-likelihood GARCH(1,1) fit with a bounded, deterministic optimizer
//! - Write-once, insertion-ordered cache per batch run
//! - Batch coordinator isolating per-instrument failures

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(missing_docs)]

/// Multi-instrument batch runs
pub mod batch;
/// Per-run estimate cache
pub mod cache;
/// Error types
pub mod error;
/// GARCH(1,1) estimation
pub mod garch;

/// Re-export batch entry points and outcomes
pub use batch::{
    BatchFailure, InstrumentStatus, ReportSeries, VolatilityBatch, VolatilityReport,
    run_volatility_batch, run_volatility_batch_from_json,
};
/// Re-export the cache
pub use cache::VolatilityCache;
/// Re-export the error type
pub use error::VolatilityError;
/// Re-export the estimator
pub use garch::{GarchEstimator, estimate_volatility};
