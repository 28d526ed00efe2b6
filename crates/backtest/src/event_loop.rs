//! Event loop driver.

use chrono::NaiveDate;
use vega_indicators::StepInput;
use vega_types::{OpenPosition, Trade};

use crate::engine::{BacktestRun, EngineState, Transition, step};
use crate::equity::EquityTracker;

struct OpenLeg {
    date: NaiveDate,
    price: f64,
    units: f64,
}

/// Runs the state machine over pre-validated inputs.
pub(crate) fn run_event_loop(initial_capital: f64, inputs: &[StepInput]) -> BacktestRun {
    tracing::info!(
        "Starting backtest: {} rows, initial capital {:.2}",
        inputs.len(),
        initial_capital
    );

    let mut state = EngineState::flat(initial_capital);
    let mut tracker = EquityTracker::with_capacity(initial_capital, inputs.len());
    let mut trades = Vec::new();
    let mut open: Option<OpenLeg> = None;

    for input in inputs {
        let outcome = step(state, input);
        match outcome.transition {
            Transition::Enter => {
                open = Some(OpenLeg {
                    date: input.date,
                    price: input.close,
                    units: outcome.state.units,
                });
            }
            Transition::Exit => {
                if let Some(leg) = open.take() {
                    trades.push(Trade::from_legs(
                        leg.date,
                        leg.price,
                        input.date,
                        input.close,
                        leg.units,
                    ));
                }
            }
            Transition::Hold => {}
        }

        tracker.update(
            input.date,
            outcome.equity,
            outcome.state.cash,
            outcome.state.units,
            outcome.state.position,
        );
        state = outcome.state;
    }

    let open_position = open.zip(inputs.last()).map(|(leg, last)| OpenPosition {
        entry_date: leg.date,
        entry_price: leg.price,
        units: leg.units,
        mark_price: last.close,
        unrealized_pnl: (last.close - leg.price) * leg.units,
    });

    tracing::info!(
        "Backtest complete: {} trades, final equity {:.2}, max drawdown {:.4}",
        trades.len(),
        tracker.equity(),
        tracker.max_drawdown()
    );

    BacktestRun {
        equity_curve: tracker.into_equity_curve(),
        trades,
        final_state: state,
        open_position,
    }
}
