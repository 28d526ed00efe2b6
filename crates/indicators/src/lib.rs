//! Vega Indicators
//!
//! Signal generator for the volatility-spike strategy.
//!
//! # Available Indicators
//! - SMA: Simple Moving Average
//! - Bollinger Bands: Upper, Middle, Lower bands (sample standard deviation)
//! - Lower-Low: two consecutive lower lows
//! - Volatility Spike: proxy close above its recent maximum
//!
//! [`build_signals`] combines them into an [`IndicatorBundle`] with entry and
//! exit flags per aligned date.

#![deny(clippy::all)]

pub mod error;
pub mod impl_;
pub mod signals;
pub mod traits;

// Re-export main types
pub use error::IndicatorError;
pub use signals::{IndicatorBundle, SignalRow, StepInput, build_signals, first_valid_row};
pub use traits::{FlagIndicator, Indicator, MultiOutputIndicator};

// Re-export indicator implementations
pub use impl_::{
    bollinger::{BollingerBands, BollingerResult},
    lower_low::LowerLow,
    sma::SMA,
    spike::VolatilitySpike,
};
