use std::collections::HashSet;

use chrono::NaiveDate;

use crate::error::DataError;
use crate::validation::validate_dates;
use vega_types::PriceSeries;

/// Two series restricted to their common dates.
#[derive(Debug, Clone)]
pub struct AlignedPair {
    /// Primary series on the common dates
    pub primary: PriceSeries,
    /// Proxy series on the common dates
    pub proxy: PriceSeries,
    /// Common dates in ascending order
    pub dates: Vec<NaiveDate>,
    /// Row counts before and after the join
    pub alignment_stats: AlignmentStats,
}

/// Row accounting for an inner join.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AlignmentStats {
    /// Primary rows before the join
    pub primary_count_before: usize,
    /// Proxy rows before the join
    pub proxy_count_before: usize,
    /// Rows kept per series
    pub aligned_count: usize,
    /// Rows dropped across both series
    pub discarded_count: usize,
    /// Largest per-series fraction of rows dropped
    pub alignment_loss: f64,
}

/// Inner join on dates. No interpolation: only dates present in both series survive.
///
/// # Errors
/// - [`DataError::InvalidInput`] when either series is empty or its dates are
///   not strictly increasing.
/// - [`DataError::AlignmentFailure`] when the series share no date.
pub fn align_series(primary: &PriceSeries, proxy: &PriceSeries) -> Result<AlignedPair, DataError> {
    let primary_count_before = primary.len();
    let proxy_count_before = proxy.len();
    if primary_count_before == 0 || proxy_count_before == 0 {
        return Err(DataError::InvalidInput(format!(
            "cannot align empty series ({}: {primary_count_before}, {}: {proxy_count_before})",
            primary.instrument, proxy.instrument
        )));
    }

    for series in [primary, proxy] {
        validate_dates(&series.bars).map_err(|e| {
            DataError::InvalidInput(format!("{}: {e}", series.instrument))
        })?;
    }

    let primary_dates: HashSet<NaiveDate> = primary.bars.iter().map(|b| b.date).collect();
    let proxy_dates: HashSet<NaiveDate> = proxy.bars.iter().map(|b| b.date).collect();
    let common: HashSet<NaiveDate> = primary_dates.intersection(&proxy_dates).copied().collect();
    if common.is_empty() {
        return Err(DataError::AlignmentFailure(format!(
            "no common dates between {} and {}",
            primary.instrument, proxy.instrument
        )));
    }

    let restrict = |series: &PriceSeries| {
        let bars = series
            .bars
            .iter()
            .filter(|b| common.contains(&b.date))
            .copied()
            .collect();
        PriceSeries::new(series.instrument.clone(), bars)
    };
    let aligned_primary = restrict(primary);
    let aligned_proxy = restrict(proxy);

    let aligned_count = aligned_primary.len();
    let discarded_count = primary_count_before + proxy_count_before - 2 * aligned_count;
    let loss_primary = 1.0 - (aligned_count as f64 / primary_count_before as f64);
    let loss_proxy = 1.0 - (aligned_count as f64 / proxy_count_before as f64);
    let alignment_loss = loss_primary.max(loss_proxy);

    if alignment_loss > 0.0 {
        tracing::warn!(
            "Alignment of {} / {} discarded {} rows (loss {:.2}%)",
            primary.instrument,
            proxy.instrument,
            discarded_count,
            alignment_loss * 100.0
        );
    }

    Ok(AlignedPair {
        dates: aligned_primary.dates(),
        primary: aligned_primary,
        proxy: aligned_proxy,
        alignment_stats: AlignmentStats {
            primary_count_before,
            proxy_count_before,
            aligned_count,
            discarded_count,
            alignment_loss,
        },
    })
}
