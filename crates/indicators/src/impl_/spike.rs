//! Breakout of a volatility proxy above its recent range.

use crate::traits::FlagIndicator;
use vega_types::Bar;

/// Volatility spike
///
/// True at `t` when `close[t]` is strictly above the maximum close of the
/// preceding `lookback` bars (the current bar excluded). False for
/// `t < lookback`.
#[derive(Debug, Clone)]
pub struct VolatilitySpike {
    /// Number of preceding bars forming the reference range
    pub lookback: usize,
}

impl VolatilitySpike {
    /// Creates a spike detector over `lookback` preceding bars.
    #[must_use]
    pub fn new(lookback: usize) -> Self {
        Self { lookback }
    }
}

impl FlagIndicator for VolatilitySpike {
    fn compute_flags(&self, bars: &[Bar]) -> Vec<bool> {
        let mut flags = vec![false; bars.len()];
        if self.lookback == 0 {
            return flags;
        }

        for t in self.lookback..bars.len() {
            let prior_max = bars[t - self.lookback..t]
                .iter()
                .map(|b| b.close)
                .fold(f64::NEG_INFINITY, f64::max);
            flags[t] = bars[t].close > prior_max;
        }
        flags
    }

    fn name(&self) -> &str {
        "VOL_SPIKE"
    }

    fn warmup_periods(&self) -> usize {
        self.lookback
    }
}
