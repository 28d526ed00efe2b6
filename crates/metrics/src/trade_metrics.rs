//! Helpers for trade-derived metrics.

use vega_types::Trade;

/// Counts total trades, wins (pnl > 0) and losses (pnl <= 0).
#[must_use]
pub(crate) fn count_trades(trades: &[Trade]) -> (u64, u64, u64) {
    let total = usize_to_u64(trades.len());
    let wins = usize_to_u64(trades.iter().filter(|trade| trade.is_win()).count());
    (total, wins, total - wins)
}

fn usize_to_u64(value: usize) -> u64 {
    u64::try_from(value).unwrap_or(u64::MAX)
}
