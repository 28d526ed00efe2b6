use chrono::NaiveDate;

use crate::position::PositionState;
use crate::trade::{OpenPosition, Trade};

/// Backtest result container.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct BacktestResult {
    /// Success flag
    pub ok: bool,
    /// Error information if not ok
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorResult>,
    /// Completed round trips
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trades: Option<Vec<Trade>>,
    /// Position held at the last row, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_position: Option<OpenPosition>,
    /// Performance metrics
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Metrics>,
    /// Equity curve data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equity_curve: Option<Vec<EquityPoint>>,
    /// Result metadata
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResultMeta>,
}

impl BacktestResult {
    /// Creates a failed result carrying only the error.
    #[must_use]
    pub fn failure(error: ErrorResult) -> Self {
        Self {
            ok: false,
            error: Some(error),
            trades: None,
            open_position: None,
            metrics: None,
            equity_curve: None,
            meta: None,
        }
    }
}

/// Error result information
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ErrorResult {
    /// Error category
    pub category: String,
    /// Error message
    pub message: String,
    /// Additional error details
    #[serde(default)]
    pub details: serde_json::Value,
}

/// Point in equity curve
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EquityPoint {
    /// Row date
    pub date: NaiveDate,
    /// Portfolio value: cash + units * close
    pub equity: f64,
    /// Cash after this row's transition
    pub cash: f64,
    /// Units held after this row's transition
    pub units: f64,
    /// Exposure after this row's transition
    pub position: PositionState,
    /// Drawdown from the high-water mark (0-1)
    pub drawdown: f64,
    /// High water mark
    pub high_water: f64,
}

/// Performance metrics
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Metrics {
    /// Starting capital
    pub initial_capital: f64,
    /// Equity at the last row
    pub final_equity: f64,
    /// `final_equity / initial_capital - 1`
    pub total_return: f64,
    /// Maximum drawdown percentage (0-1)
    pub max_drawdown: f64,
    /// Maximum drawdown absolute value
    pub max_drawdown_abs: f64,
    /// Longest drawdown in rows
    #[serde(default)]
    pub max_drawdown_duration_bars: u64,
    /// Completed round trips
    pub total_trades: u64,
    /// Trades with positive pnl
    pub wins: u64,
    /// Trades with non-positive pnl
    pub losses: u64,
    /// `wins / total_trades`
    pub win_rate: f64,
    /// Fraction of rows spent LONG
    #[serde(default)]
    pub exposure: f64,
}

/// Result metadata
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ResultMeta {
    /// Schema version of the request
    #[serde(default)]
    pub schema_version: String,
    /// Traded instrument
    pub primary: String,
    /// Volatility proxy instrument
    pub proxy: String,
    /// Rows evaluated by the engine
    #[serde(default)]
    pub rows_processed: u64,
    /// Date of the first evaluated row
    #[serde(default)]
    pub first_date: Option<NaiveDate>,
    /// Date of the last evaluated row
    #[serde(default)]
    pub last_date: Option<NaiveDate>,
    /// Additional metadata
    #[serde(default)]
    pub extra: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_backtest_result_success_serde() {
        let result = BacktestResult {
            ok: true,
            error: None,
            trades: Some(vec![Trade::from_legs(day(2), 8.0, day(4), 15.0, 125.0)]),
            open_position: None,
            metrics: Some(Metrics {
                initial_capital: 1000.0,
                final_equity: 1875.0,
                total_return: 0.875,
                total_trades: 1,
                wins: 1,
                win_rate: 1.0,
                ..Metrics::default()
            }),
            equity_curve: None,
            meta: None,
        };

        let json = serde_json::to_string(&result).unwrap();
        assert!(!json.contains("open_position"));
        let deserialized: BacktestResult = serde_json::from_str(&json).unwrap();

        assert!(deserialized.ok);
        assert!(deserialized.error.is_none());
        assert_eq!(deserialized.trades.unwrap().len(), 1);
    }

    #[test]
    fn test_backtest_result_error_serde() {
        let result = BacktestResult::failure(ErrorResult {
            category: "config".to_string(),
            message: "initial_capital must be > 0".to_string(),
            details: serde_json::json!({"field": "initial_capital"}),
        });

        let json = serde_json::to_string(&result).unwrap();
        let deserialized: BacktestResult = serde_json::from_str(&json).unwrap();

        assert!(!deserialized.ok);
        assert_eq!(deserialized.error.unwrap().category, "config");
    }

    #[test]
    fn test_equity_point_serde() {
        let point = EquityPoint {
            date: day(5),
            equity: 1500.0,
            cash: 0.0,
            units: 125.0,
            position: PositionState::Long,
            drawdown: 0.0,
            high_water: 1500.0,
        };

        let json = serde_json::to_string(&point).unwrap();
        assert!(json.contains("\"position\":\"long\""));
        let deserialized: EquityPoint = serde_json::from_str(&json).unwrap();

        assert_eq!(point, deserialized);
    }
}
