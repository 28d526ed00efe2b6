//! Per-run volatility cache.

use std::collections::{HashMap, hash_map::Entry};

use crate::error::VolatilityError;
use vega_types::{InstrumentId, VolatilityEstimate};

/// Write-once map from instrument to its volatility estimate.
///
/// Entries keep insertion order so that iteration and display are
/// deterministic. A batch owns the cache mutably while it runs and hands out
/// only shared references afterwards.
#[derive(Debug, Default, Clone)]
pub struct VolatilityCache {
    entries: Vec<(InstrumentId, VolatilityEstimate)>,
    index: HashMap<InstrumentId, usize>,
}

impl VolatilityCache {
    /// Creates a new empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cache with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Inserts the estimate for `instrument`.
    ///
    /// # Errors
    /// Returns [`VolatilityError::DuplicateKey`] if the instrument is already
    /// present; the existing entry is left untouched.
    pub fn put(
        &mut self,
        instrument: impl Into<InstrumentId>,
        estimate: VolatilityEstimate,
    ) -> Result<(), VolatilityError> {
        match self.index.entry(instrument.into()) {
            Entry::Occupied(entry) => Err(VolatilityError::DuplicateKey(entry.key().clone())),
            Entry::Vacant(entry) => {
                self.entries.push((entry.key().clone(), estimate));
                entry.insert(self.entries.len() - 1);
                Ok(())
            }
        }
    }

    /// Gets the estimate for `instrument`, if present.
    #[must_use]
    pub fn get(&self, instrument: &str) -> Option<&VolatilityEstimate> {
        self.index.get(instrument).map(|&i| &self.entries[i].1)
    }

    /// Checks if an instrument is cached.
    #[must_use]
    pub fn contains(&self, instrument: &str) -> bool {
        self.index.contains_key(instrument)
    }

    /// Instruments in insertion order.
    ///
    /// The iterator is lazy and `Clone`, so it can be restarted.
    pub fn keys(&self) -> impl Iterator<Item = &str> + Clone + '_ {
        self.entries.iter().map(|(id, _)| id.as_str())
    }

    /// `(instrument, estimate)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &VolatilityEstimate)> + Clone + '_ {
        self.entries.iter().map(|(id, est)| (id.as_str(), est))
    }

    /// Returns the number of cached instruments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
