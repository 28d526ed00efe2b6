//! Indicator traits.
//!
//! All indicators compute over the full bar series and return one value per
//! bar. Numeric outputs are `NaN` and flags are `false` until warmup is done.

use vega_types::Bar;

/// Trait for single-output indicators.
pub trait Indicator: Send + Sync {
    /// Computes the indicator for all bars.
    ///
    /// Returns `Vec<f64>` with the same length as `bars`.
    /// Values at indices < `warmup_periods() - 1` are `f64::NAN`.
    fn compute(&self, bars: &[Bar]) -> Vec<f64>;

    /// Name of the indicator (e.g., "SMA").
    fn name(&self) -> &str;

    /// Minimum number of bars required for valid output.
    fn warmup_periods(&self) -> usize;
}

/// Trait for multi-output indicators like Bollinger Bands.
///
/// These indicators produce several series (e.g., upper, middle, lower bands)
/// that are computed together.
pub trait MultiOutputIndicator: Send + Sync {
    /// Type of the output structure
    type Output;

    /// Computes all outputs at once.
    fn compute_all(&self, bars: &[Bar]) -> Self::Output;

    /// Name of the indicator.
    fn name(&self) -> &str;

    /// Minimum number of bars for valid output.
    fn warmup_periods(&self) -> usize;
}

/// Trait for boolean pattern indicators.
pub trait FlagIndicator: Send + Sync {
    /// Evaluates the flag for all bars; `false` during warmup.
    fn compute_flags(&self, bars: &[Bar]) -> Vec<bool>;

    /// Name of the flag.
    fn name(&self) -> &str;

    /// Index of the first bar the flag can be true on.
    fn warmup_periods(&self) -> usize;
}
