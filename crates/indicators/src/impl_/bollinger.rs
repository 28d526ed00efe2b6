//! Bollinger Bands indicator

use crate::impl_::sma::SMA;
use crate::traits::{Indicator, MultiOutputIndicator};
use vega_types::Bar;

/// Bollinger Bands result containing upper, middle, and lower bands.
#[derive(Debug, Clone)]
pub struct BollingerResult {
    /// Upper band = SMA + `std_factor` * std
    pub upper: Vec<f64>,
    /// Middle band = SMA
    pub middle: Vec<f64>,
    /// Lower band = SMA - `std_factor` * std
    pub lower: Vec<f64>,
}

/// Bollinger Bands
///
/// Calculates three bands based on standard deviation around a simple moving average:
/// - Upper Band = SMA + (`std_factor` * `StdDev`)
/// - Middle Band = SMA
/// - Lower Band = SMA - (`std_factor` * `StdDev`)
///
/// Uses the sample standard deviation (n-1). A one-bar window has zero width.
#[derive(Debug, Clone)]
pub struct BollingerBands {
    /// Period for the SMA and standard deviation
    pub period: usize,
    /// Multiplier for standard deviation (typically 2.0)
    pub std_factor: f64,
}

impl BollingerBands {
    /// Creates new Bollinger Bands with the given parameters.
    #[must_use]
    pub fn new(period: usize, std_factor: f64) -> Self {
        Self { period, std_factor }
    }
}

impl MultiOutputIndicator for BollingerBands {
    type Output = BollingerResult;

    #[allow(clippy::cast_precision_loss)]
    fn compute_all(&self, bars: &[Bar]) -> Self::Output {
        let middle = SMA::new(self.period).compute(bars);
        let mut upper = vec![f64::NAN; bars.len()];
        let mut lower = vec![f64::NAN; bars.len()];

        let n = self.period as f64;
        for (i, &sma) in middle.iter().enumerate() {
            if sma.is_nan() {
                continue;
            }
            let window = &bars[i + 1 - self.period..=i];
            let std = if self.period > 1 {
                let sum_sq = window
                    .iter()
                    .map(|b| (b.close - sma).powi(2))
                    .sum::<f64>();
                (sum_sq / (n - 1.0)).sqrt()
            } else {
                0.0
            };

            upper[i] = sma + self.std_factor * std;
            lower[i] = sma - self.std_factor * std;
        }

        BollingerResult {
            upper,
            middle,
            lower,
        }
    }

    fn name(&self) -> &str {
        "BOLLINGER"
    }

    fn warmup_periods(&self) -> usize {
        self.period
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn bars(closes: &[f64]) -> Vec<Bar> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        start
            .iter_days()
            .zip(closes)
            .map(|(date, close)| Bar::from_close(date, *close))
            .collect()
    }

    #[test]
    fn test_bollinger_basic() {
        let result = BollingerBands::new(3, 2.0).compute_all(&bars(&[1.0, 2.0, 3.0, 4.0, 5.0]));

        assert!(result.middle[0].is_nan());
        assert!(result.middle[1].is_nan());

        // window [1, 2, 3]: mean 2, sample variance (1 + 0 + 1) / 2 = 1
        assert_relative_eq!(result.middle[2], 2.0, epsilon = 1e-10);
        assert_relative_eq!(result.upper[2], 4.0, epsilon = 1e-10);
        assert_relative_eq!(result.lower[2], 0.0, epsilon = 1e-10);
    }

    #[test]
    fn test_bollinger_constant_input() {
        let result = BollingerBands::new(5, 2.0).compute_all(&bars(&[100.0; 10]));

        for i in 4..10 {
            assert_relative_eq!(result.middle[i], 100.0, epsilon = 1e-10);
            assert_relative_eq!(result.upper[i], 100.0, epsilon = 1e-10);
            assert_relative_eq!(result.lower[i], 100.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_bollinger_symmetry() {
        let input = bars(&[1.0, 2.0, 3.0, 4.0, 5.0, 4.0, 3.0, 2.0, 1.0, 2.0]);
        let result = BollingerBands::new(3, 2.0).compute_all(&input);

        for i in 2..input.len() {
            let mid = result.middle[i];
            let upper_dist = result.upper[i] - mid;
            let lower_dist = mid - result.lower[i];
            assert!(
                (upper_dist - lower_dist).abs() < 1e-10,
                "Bands not symmetric at index {i}"
            );
        }
    }

    #[test]
    fn test_bollinger_period_one_has_zero_width() {
        let result = BollingerBands::new(1, 2.0).compute_all(&bars(&[3.0, 7.0]));
        assert_relative_eq!(result.upper[1], 7.0);
        assert_relative_eq!(result.lower[1], 7.0);
    }

    #[test]
    fn test_bollinger_insufficient_data() {
        let result = BollingerBands::new(5, 2.0).compute_all(&bars(&[1.0, 2.0]));

        assert!(result.upper.iter().all(|v| v.is_nan()));
        assert!(result.middle.iter().all(|v| v.is_nan()));
        assert!(result.lower.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_bollinger_middle_is_sma() {
        let input = bars(&[3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0]);
        let bb = BollingerBands::new(4, 1.0);
        let result = bb.compute_all(&input);
        let sma = SMA::new(4).compute(&input);

        assert_eq!(bb.warmup_periods(), 4);
        for i in 3..input.len() {
            assert_eq!(result.middle[i].to_bits(), sma[i].to_bits());
            assert!(result.upper[i] > result.middle[i]);
            assert!(result.lower[i] < result.middle[i]);
        }
    }
}
