//! Indicator implementations
//!
//! Contains all concrete indicator implementations.

pub mod bollinger;
pub mod lower_low;
pub mod sma;
pub mod spike;
