//! Warmup validation helpers.

use vega_indicators::first_valid_row;
use vega_types::SignalConfig;

use crate::error::BacktestError;

/// Aligned rows needed for at least one fully-defined signal row.
#[must_use]
pub fn required_rows(signals: &SignalConfig) -> usize {
    first_valid_row(signals) + 1
}

/// Validates that the aligned series reach past the indicator warmup.
///
/// # Errors
/// Returns an error if no row would have every rolling value defined.
pub fn validate_warmup(aligned_rows: usize, signals: &SignalConfig) -> Result<(), BacktestError> {
    let required = required_rows(signals);
    if aligned_rows < required {
        return Err(BacktestError::InsufficientData {
            required,
            available: aligned_rows,
        });
    }

    tracing::info!(
        "Warmup validated: {} rows required, {} available ({} trading rows)",
        required,
        aligned_rows,
        aligned_rows - first_valid_row(signals)
    );

    Ok(())
}
