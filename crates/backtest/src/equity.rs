//! Equity tracking and drawdown calculation.
//!
//! Records one equity point per processed row.

use chrono::NaiveDate;
use vega_types::{EquityPoint, PositionState};

/// Tracks equity changes over time.
#[derive(Debug, Clone)]
pub struct EquityTracker {
    /// Initial capital
    initial_capital: f64,
    /// High-water mark (peak equity)
    high_water_mark: f64,
    /// Maximum drawdown percentage (0-1)
    max_drawdown: f64,
    /// Maximum drawdown in absolute terms
    max_drawdown_abs: f64,
    /// Equity curve history
    equity_curve: Vec<EquityPoint>,
}

impl EquityTracker {
    /// Creates a new equity tracker with the given initial capital.
    #[must_use]
    pub fn new(initial_capital: f64) -> Self {
        Self {
            initial_capital,
            high_water_mark: initial_capital,
            max_drawdown: 0.0,
            max_drawdown_abs: 0.0,
            equity_curve: Vec::new(),
        }
    }

    /// Creates a tracker with room for `rows` points.
    #[must_use]
    pub fn with_capacity(initial_capital: f64, rows: usize) -> Self {
        let mut tracker = Self::new(initial_capital);
        tracker.equity_curve.reserve(rows);
        tracker
    }

    /// Records the equity of one row after its transition.
    pub fn update(
        &mut self,
        date: NaiveDate,
        equity: f64,
        cash: f64,
        units: f64,
        position: PositionState,
    ) {
        if equity > self.high_water_mark {
            self.high_water_mark = equity;
        }

        let drawdown_abs = self.high_water_mark - equity;
        let drawdown = if self.high_water_mark > 0.0 {
            drawdown_abs / self.high_water_mark
        } else {
            0.0
        };

        if drawdown > self.max_drawdown {
            self.max_drawdown = drawdown;
            self.max_drawdown_abs = drawdown_abs;
        }

        self.equity_curve.push(EquityPoint {
            date,
            equity,
            cash,
            units,
            position,
            drawdown,
            high_water: self.high_water_mark,
        });
    }

    /// Returns the initial capital.
    #[must_use]
    pub fn initial_capital(&self) -> f64 {
        self.initial_capital
    }

    /// Returns the latest equity, or the initial capital before any row.
    #[must_use]
    pub fn equity(&self) -> f64 {
        self.equity_curve
            .last()
            .map_or(self.initial_capital, |p| p.equity)
    }

    /// Returns the high-water mark.
    #[must_use]
    pub fn high_water_mark(&self) -> f64 {
        self.high_water_mark
    }

    /// Returns the maximum drawdown as a percentage (0-1).
    #[must_use]
    pub fn max_drawdown(&self) -> f64 {
        self.max_drawdown
    }

    /// Returns the maximum drawdown in absolute terms.
    #[must_use]
    pub fn max_drawdown_abs(&self) -> f64 {
        self.max_drawdown_abs
    }

    /// Returns the equity curve history.
    #[must_use]
    pub fn equity_curve(&self) -> &[EquityPoint] {
        &self.equity_curve
    }

    /// Consumes the tracker and returns the equity curve.
    #[must_use]
    pub fn into_equity_curve(self) -> Vec<EquityPoint> {
        self.equity_curve
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_initial_state() {
        let tracker = EquityTracker::new(10_000.0);

        assert_relative_eq!(tracker.initial_capital(), 10_000.0, epsilon = 1e-10);
        assert_relative_eq!(tracker.equity(), 10_000.0, epsilon = 1e-10);
        assert_relative_eq!(tracker.high_water_mark(), 10_000.0, epsilon = 1e-10);
        assert_relative_eq!(tracker.max_drawdown(), 0.0, epsilon = 1e-10);
        assert!(tracker.equity_curve().is_empty());
    }

    #[test]
    fn test_equity_increase() {
        let mut tracker = EquityTracker::new(10_000.0);

        tracker.update(day(1), 11_000.0, 0.0, 100.0, PositionState::Long);

        assert_relative_eq!(tracker.equity(), 11_000.0, epsilon = 1e-10);
        assert_relative_eq!(tracker.high_water_mark(), 11_000.0, epsilon = 1e-10);
        assert_relative_eq!(tracker.max_drawdown(), 0.0, epsilon = 1e-10);
    }

    #[test]
    fn test_drawdown_calculation() {
        let mut tracker = EquityTracker::new(10_000.0);

        tracker.update(day(1), 12_000.0, 0.0, 100.0, PositionState::Long);
        tracker.update(day(2), 10_800.0, 0.0, 100.0, PositionState::Long);

        assert_relative_eq!(tracker.max_drawdown(), 0.1, epsilon = 1e-10);
        assert_relative_eq!(tracker.max_drawdown_abs(), 1_200.0, epsilon = 1e-10);

        let last = &tracker.equity_curve()[1];
        assert_relative_eq!(last.drawdown, 0.1, epsilon = 1e-10);
        assert_relative_eq!(last.high_water, 12_000.0, epsilon = 1e-10);
        assert_eq!(last.position, PositionState::Long);
    }

    #[test]
    fn test_into_equity_curve() {
        let mut tracker = EquityTracker::with_capacity(1_000.0, 2);
        tracker.update(day(1), 1_000.0, 1_000.0, 0.0, PositionState::Flat);
        tracker.update(day(2), 990.0, 990.0, 0.0, PositionState::Flat);

        let curve = tracker.into_equity_curve();
        assert_eq!(curve.len(), 2);
        assert_eq!(curve[1].date, day(2));
    }
}
