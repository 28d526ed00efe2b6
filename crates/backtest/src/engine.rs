//! Backtest engine: explicit state threaded through a step function.
//!
//! The strategy holds either cash (FLAT) or units of the primary asset (LONG),
//! all-in and all-out, with transitions executed at the row's close:
//!
//! - FLAT and entry: `units = cash / close`, `cash = 0`
//! - LONG and exit: `cash = units * close`, `units = 0`
//! - anything else: no change
//!
//! Entry is evaluated before exit, so a row carrying both while FLAT only
//! enters.

use serde::{Deserialize, Serialize};

use crate::error::BacktestError;
use crate::event_loop;
use vega_indicators::{IndicatorBundle, StepInput};
use vega_types::{EquityPoint, OpenPosition, PositionState, Trade};

/// Portfolio state between rows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineState {
    /// Current exposure
    pub position: PositionState,
    /// Uninvested cash
    pub cash: f64,
    /// Units of the primary asset held
    pub units: f64,
}

impl EngineState {
    /// All-cash starting state.
    #[must_use]
    pub fn flat(cash: f64) -> Self {
        Self {
            position: PositionState::Flat,
            cash,
            units: 0.0,
        }
    }

    /// Portfolio value at `price`.
    #[must_use]
    pub fn equity(&self, price: f64) -> f64 {
        self.cash + self.units * price
    }
}

/// State change applied on a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    /// No change
    Hold,
    /// FLAT -> LONG
    Enter,
    /// LONG -> FLAT
    Exit,
}

/// Result of one [`step`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    /// State after the row
    pub state: EngineState,
    /// Portfolio value at the row's close, after the transition
    pub equity: f64,
    /// Transition applied
    pub transition: Transition,
}

/// Applies one row to `state`.
#[must_use]
pub fn step(state: EngineState, input: &StepInput) -> StepOutcome {
    let (next, transition) = match state.position {
        PositionState::Flat if input.entry => (
            EngineState {
                position: PositionState::Long,
                cash: 0.0,
                units: state.cash / input.close,
            },
            Transition::Enter,
        ),
        PositionState::Long if input.exit => (
            EngineState {
                position: PositionState::Flat,
                cash: state.units * input.close,
                units: 0.0,
            },
            Transition::Exit,
        ),
        _ => (state, Transition::Hold),
    };

    StepOutcome {
        state: next,
        equity: next.equity(input.close),
        transition,
    }
}

/// Completed backtest.
#[derive(Debug, Clone, PartialEq)]
pub struct BacktestRun {
    /// One point per input row
    pub equity_curve: Vec<EquityPoint>,
    /// Closed round trips
    pub trades: Vec<Trade>,
    /// State after the last row
    pub final_state: EngineState,
    /// Position still held after the last row
    pub open_position: Option<OpenPosition>,
}

impl BacktestRun {
    /// Equity values of the curve.
    #[must_use]
    pub fn equity_values(&self) -> Vec<f64> {
        self.equity_curve.iter().map(|p| p.equity).collect()
    }

    /// Final portfolio value, if any row was processed.
    #[must_use]
    pub fn final_equity(&self) -> Option<f64> {
        self.equity_curve.last().map(|p| p.equity)
    }
}

/// Single-position backtest engine.
#[derive(Debug, Clone)]
pub struct BacktestEngine {
    initial_capital: f64,
}

impl BacktestEngine {
    /// Creates an engine starting FLAT with `initial_capital` in cash.
    ///
    /// # Errors
    /// Returns [`BacktestError::InvalidInput`] for non-finite or non-positive
    /// capital.
    pub fn new(initial_capital: f64) -> Result<Self, BacktestError> {
        if !(initial_capital.is_finite() && initial_capital > 0.0) {
            return Err(BacktestError::invalid_input(format!(
                "initial_capital must be finite and > 0, got {initial_capital}"
            )));
        }
        Ok(Self { initial_capital })
    }

    /// Starting cash.
    #[must_use]
    pub fn initial_capital(&self) -> f64 {
        self.initial_capital
    }

    /// Runs the state machine over `inputs`.
    ///
    /// Inputs are validated before any step executes. An open position at the
    /// end is reported, not liquidated.
    ///
    /// # Errors
    /// Returns [`BacktestError::InvalidInput`] for a non-finite or
    /// non-positive close, or dates that are not strictly increasing.
    pub fn run(&self, inputs: &[StepInput]) -> Result<BacktestRun, BacktestError> {
        validate_inputs(inputs)?;
        Ok(event_loop::run_event_loop(self.initial_capital, inputs))
    }

    /// Runs the state machine over an indicator bundle.
    ///
    /// # Errors
    /// See [`BacktestEngine::run`].
    pub fn run_bundle(&self, bundle: &IndicatorBundle) -> Result<BacktestRun, BacktestError> {
        self.run(&bundle.step_inputs())
    }
}

fn validate_inputs(inputs: &[StepInput]) -> Result<(), BacktestError> {
    for (idx, input) in inputs.iter().enumerate() {
        if !(input.close.is_finite() && input.close > 0.0) {
            return Err(BacktestError::invalid_input(format!(
                "close at row {idx} ({}) must be finite and > 0, got {}",
                input.date, input.close
            )));
        }
    }
    if let Some(idx) = inputs.windows(2).position(|w| w[1].date <= w[0].date) {
        return Err(BacktestError::invalid_input(format!(
            "dates must be strictly increasing: {} followed by {} at row {}",
            inputs[idx].date,
            inputs[idx + 1].date,
            idx + 1
        )));
    }
    Ok(())
}
