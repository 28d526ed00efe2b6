//! Two consecutive lower lows.

use crate::traits::FlagIndicator;
use vega_types::Bar;

/// Flags bars whose low undercuts the previous low, which itself undercut the
/// low before it: `low[t] < low[t-1] < low[t-2]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LowerLow;

impl FlagIndicator for LowerLow {
    fn compute_flags(&self, bars: &[Bar]) -> Vec<bool> {
        let mut flags = vec![false; bars.len()];
        for (i, w) in bars.windows(3).enumerate() {
            flags[i + 2] = w[2].low < w[1].low && w[1].low < w[0].low;
        }
        flags
    }

    fn name(&self) -> &str {
        "LOWER_LOW"
    }

    fn warmup_periods(&self) -> usize {
        2
    }
}
