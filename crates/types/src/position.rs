/// Exposure of a single-instrument, all-in/all-out backtest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionState {
    /// Cash only
    #[default]
    Flat,
    /// Fully invested in the primary instrument
    Long,
}

impl PositionState {
    /// Returns true when invested.
    #[must_use]
    pub fn is_long(self) -> bool {
        matches!(self, PositionState::Long)
    }
}
