use chrono::NaiveDate;

/// Completed round trip (FLAT -> LONG -> FLAT).
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Trade {
    /// Date the position was opened
    pub entry_date: NaiveDate,
    /// Close price paid per unit
    pub entry_price: f64,
    /// Date the position was liquidated
    pub exit_date: NaiveDate,
    /// Close price received per unit
    pub exit_price: f64,
    /// Units held
    pub units: f64,
    /// Profit in account currency
    pub pnl: f64,
    /// `exit_price / entry_price - 1`
    pub return_pct: f64,
}

impl Trade {
    /// Builds a trade from entry/exit legs, deriving `pnl` and `return_pct`.
    #[must_use]
    pub fn from_legs(
        entry_date: NaiveDate,
        entry_price: f64,
        exit_date: NaiveDate,
        exit_price: f64,
        units: f64,
    ) -> Self {
        let return_pct = if entry_price > 0.0 {
            exit_price / entry_price - 1.0
        } else {
            0.0
        };
        Self {
            entry_date,
            entry_price,
            exit_date,
            exit_price,
            units,
            pnl: (exit_price - entry_price) * units,
            return_pct,
        }
    }

    /// Returns true for a strictly profitable trade.
    #[must_use]
    pub fn is_win(&self) -> bool {
        self.pnl > 0.0
    }
}

/// Position still held when the run ended (marked to market, not closed).
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OpenPosition {
    /// Date the position was opened
    pub entry_date: NaiveDate,
    /// Close price paid per unit
    pub entry_price: f64,
    /// Units held
    pub units: f64,
    /// Last close used for valuation
    pub mark_price: f64,
    /// Unrealized profit at `mark_price`
    pub unrealized_pnl: f64,
}
