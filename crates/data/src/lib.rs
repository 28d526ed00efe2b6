//! Vega Data
//!
//! Price-series validation, return preprocessing, two-series alignment, and
//! the price-provider capability with in-memory and JSON-file implementations.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(missing_docs)]

/// Date-based alignment of two series.
pub mod alignment;
/// Data-layer error types.
pub mod error;
/// JSON price files and the file-backed provider.
pub mod loader;
/// Price-to-return preprocessing.
pub mod preprocess;
/// Price provider trait and in-memory provider.
pub mod provider;
/// Series validation helpers.
pub mod validation;

/// Re-export: aligned series container.
pub use alignment::AlignedPair;
/// Re-export: alignment row accounting.
pub use alignment::AlignmentStats;
/// Re-export: inner join of two series on dates.
pub use alignment::align_series;
/// Re-export: data-layer error type.
pub use error::DataError;
/// Re-export: file-backed provider.
pub use loader::JsonFileProvider;
/// Re-export: load one JSON price file.
pub use loader::load_series;
/// Re-export: resolve the price file root.
pub use loader::resolve_data_root;
/// Re-export: percentage log returns.
pub use preprocess::log_returns;
/// Re-export: in-memory provider.
pub use provider::InMemoryProvider;
/// Re-export: provider capability.
pub use provider::PriceProvider;
/// Re-export: date ordering validation.
pub use validation::validate_dates;
/// Re-export: full series validation.
pub use validation::validate_series;
