//! Metric computation entrypoints.

use vega_types::{EquityPoint, Metrics, Trade};

use crate::equity_metrics::{compute_drawdown, exposure};
use crate::trade_metrics::count_trades;

/// Computes performance metrics for a completed backtest.
///
/// An empty curve yields zeros with `final_equity = initial_capital`.
#[must_use]
#[allow(clippy::cast_precision_loss)] // Trade counts will never exceed f64 mantissa precision
pub fn compute_metrics(
    initial_capital: f64,
    equity_curve: &[EquityPoint],
    trades: &[Trade],
) -> Metrics {
    let mut metrics = Metrics {
        initial_capital,
        final_equity: equity_curve.last().map_or(initial_capital, |p| p.equity),
        ..Metrics::default()
    };

    metrics.total_return = if initial_capital > 0.0 {
        metrics.final_equity / initial_capital - 1.0
    } else {
        0.0
    };

    let (total_trades, wins, losses) = count_trades(trades);
    metrics.total_trades = total_trades;
    metrics.wins = wins;
    metrics.losses = losses;
    metrics.win_rate = if total_trades > 0 {
        wins as f64 / total_trades as f64
    } else {
        0.0
    };

    let (max_dd, max_dd_abs, max_dd_duration) = compute_drawdown(equity_curve);
    metrics.max_drawdown = max_dd;
    metrics.max_drawdown_abs = max_dd_abs;
    metrics.max_drawdown_duration_bars = max_dd_duration;

    metrics.exposure = exposure(equity_curve);

    metrics
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;
    use vega_types::PositionState;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn point(d: u32, equity: f64, position: PositionState) -> EquityPoint {
        EquityPoint {
            date: day(d),
            equity,
            cash: 0.0,
            units: 0.0,
            position,
            drawdown: 0.0,
            high_water: equity,
        }
    }

    #[test]
    fn test_compute_metrics_round_trip() {
        let curve = vec![
            point(1, 1000.0, PositionState::Flat),
            point(2, 1000.0, PositionState::Flat),
            point(3, 1000.0, PositionState::Long),
            point(4, 1500.0, PositionState::Long),
            point(5, 1875.0, PositionState::Flat),
        ];
        let trades = vec![Trade::from_legs(day(3), 8.0, day(5), 15.0, 125.0)];

        let metrics = compute_metrics(1000.0, &curve, &trades);

        assert_relative_eq!(metrics.final_equity, 1875.0);
        assert_relative_eq!(metrics.total_return, 0.875);
        assert_eq!(metrics.total_trades, 1);
        assert_eq!(metrics.wins, 1);
        assert_eq!(metrics.losses, 0);
        assert_relative_eq!(metrics.win_rate, 1.0);
        assert_relative_eq!(metrics.max_drawdown, 0.0);
        assert_relative_eq!(metrics.exposure, 0.4);
    }

    #[test]
    fn test_compute_metrics_empty_curve() {
        let metrics = compute_metrics(1000.0, &[], &[]);
        assert_eq!(
            metrics,
            Metrics {
                initial_capital: 1000.0,
                final_equity: 1000.0,
                ..Metrics::default()
            }
        );
    }

    #[test]
    fn test_compute_metrics_losing_trade() {
        let curve = vec![
            point(1, 1000.0, PositionState::Long),
            point(2, 800.0, PositionState::Flat),
        ];
        let trades = vec![Trade::from_legs(day(1), 10.0, day(2), 8.0, 100.0)];

        let metrics = compute_metrics(1000.0, &curve, &trades);

        assert_relative_eq!(metrics.total_return, -0.2);
        assert_eq!(metrics.losses, 1);
        assert_relative_eq!(metrics.win_rate, 0.0);
        assert_relative_eq!(metrics.max_drawdown, 0.2);
        assert_relative_eq!(metrics.max_drawdown_abs, 200.0);
        assert_eq!(metrics.max_drawdown_duration_bars, 1);
    }
}
