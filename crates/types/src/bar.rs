use chrono::NaiveDate;

/// One daily observation of an instrument.
///
/// Sources that only publish a last price (e.g. a `PX_LAST` field) build bars
/// through [`Bar::from_close`], which sets open, high and low to the close.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Bar {
    /// Calendar date of the observation
    pub date: NaiveDate,
    /// Open price
    pub open: f64,
    /// High price
    pub high: f64,
    /// Low price
    pub low: f64,
    /// Close price
    pub close: f64,
}

impl Bar {
    /// Creates a bar where every price field equals `close`.
    #[must_use]
    pub fn from_close(date: NaiveDate, close: f64) -> Self {
        Self {
            date,
            open: close,
            high: close,
            low: close,
            close,
        }
    }

    /// Creates a bar from close and low, using close for open and high.
    #[must_use]
    pub fn from_close_low(date: NaiveDate, close: f64, low: f64) -> Self {
        Self {
            date,
            open: close,
            high: close.max(low),
            low,
            close,
        }
    }
}
