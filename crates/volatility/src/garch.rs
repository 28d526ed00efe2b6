//! GARCH(1,1) volatility estimation
//!
//! Fits a constant-mean GARCH(1,1) model to percentage returns by Gaussian
//! maximum likelihood:
//!
//! ```text
//! r_t  = mu + e_t,   e_t ~ N(0, s2_t)
//! s2_t = omega + alpha * e_{t-1}^2 + beta * s2_{t-1}
//! ```
//!
//! Where:
//! - omega: variance intercept (> 0)
//! - alpha: weight of the previous squared residual (>= 0)
//! - beta: weight of the previous conditional variance (>= 0)
//! - Constraint: alpha + beta < 1 for stationarity
//!
//! The pre-sample variance and squared residual come from an exponentially
//! weighted backcast of the first residuals. The likelihood is minimized with
//! a deterministic Nelder-Mead simplex bounded by `max_iterations`.

use std::f64::consts::PI;

use crate::error::VolatilityError;
use vega_data::log_returns;
use vega_types::{GarchConfig, GarchParams, PriceSeries, ReturnSeries, VolatilityEstimate};

const BACKCAST_DECAY: f64 = 0.94;
const BACKCAST_WINDOW: usize = 75;

const START_ALPHA: f64 = 0.05;
const START_BETA: f64 = 0.90;

const N_PARAMS: usize = 4;

/// Parameter vector `[mu, omega, alpha, beta]`.
type Point = [f64; N_PARAMS];

/// GARCH(1,1) estimator.
#[derive(Debug, Clone, Default)]
pub struct GarchEstimator {
    config: GarchConfig,
}

impl GarchEstimator {
    /// Creates an estimator with the given fitting controls.
    #[must_use]
    pub fn new(config: GarchConfig) -> Self {
        Self { config }
    }

    /// Fitting controls.
    #[must_use]
    pub fn config(&self) -> &GarchConfig {
        &self.config
    }

    /// Fits the model and returns the conditional volatility for every return
    /// date.
    ///
    /// # Errors
    /// - [`VolatilityError::InsufficientData`] when the series is shorter than
    ///   `min_observations` (and never below 2).
    /// - [`VolatilityError::NonConvergence`] when the simplex has not converged
    ///   after `max_iterations`.
    /// - [`VolatilityError::NonFinite`] for non-finite returns, zero-variance
    ///   returns, or a non-finite fitted variance path.
    #[allow(clippy::cast_precision_loss)]
    pub fn fit(&self, returns: &ReturnSeries) -> Result<VolatilityEstimate, VolatilityError> {
        let instrument = &returns.instrument;
        let values = &returns.values;
        let n = values.len();

        let required = self.config.min_observations.max(2);
        if n < required {
            return Err(VolatilityError::InsufficientData {
                instrument: instrument.clone(),
                required,
                actual: n,
            });
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(non_finite(instrument, "return series contains non-finite values"));
        }

        let mean = values.iter().sum::<f64>() / n as f64;
        let variance = values.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n as f64;
        if !(variance.is_finite() && variance > 0.0) {
            return Err(non_finite(instrument, "returns have zero variance"));
        }

        let residuals: Vec<f64> = values.iter().map(|r| r - mean).collect();
        let backcast = backcast(&residuals);

        let start: Point = [
            mean,
            variance * (1.0 - START_ALPHA - START_BETA),
            START_ALPHA,
            START_BETA,
        ];

        let mut scratch = vec![0.0; n];
        let optimizer = NelderMead {
            max_iterations: self.config.max_iterations,
            tolerance: self.config.tolerance,
        };
        let optimum = optimizer
            .minimize(start, |p| {
                negative_log_likelihood(p, values, backcast, &mut scratch)
            })
            .map_err(|iterations| VolatilityError::NonConvergence {
                instrument: instrument.clone(),
                iterations,
            })?;

        if !optimum.value.is_finite() {
            return Err(non_finite(instrument, "likelihood is not finite at the optimum"));
        }

        let mut path = vec![0.0; n];
        variance_path(&optimum.point, values, backcast, &mut path);
        if path.iter().any(|s2| !(s2.is_finite() && *s2 >= 0.0)) {
            return Err(non_finite(instrument, "conditional variance path is not finite"));
        }

        let [mu, omega, alpha, beta] = optimum.point;
        tracing::debug!(
            "GARCH fit for {} converged in {} iterations (omega={:.6}, alpha={:.4}, beta={:.4})",
            instrument,
            optimum.iterations,
            omega,
            alpha,
            beta
        );

        Ok(VolatilityEstimate {
            instrument: instrument.clone(),
            dates: returns.dates.clone(),
            values: path.iter().map(|s2| s2.sqrt()).collect(),
            params: GarchParams {
                mu,
                omega,
                alpha,
                beta,
                log_likelihood: -optimum.value,
                iterations: optimum.iterations,
            },
        })
    }
}

/// Converts `series` to percentage log returns and fits the model.
///
/// # Errors
/// Preprocessing failures surface as [`VolatilityError::Data`]; fitting
/// failures as described on [`GarchEstimator::fit`].
pub fn estimate_volatility(
    series: &PriceSeries,
    config: &GarchConfig,
) -> Result<VolatilityEstimate, VolatilityError> {
    let returns = log_returns(series)?;
    GarchEstimator::new(config.clone()).fit(&returns)
}

fn non_finite(instrument: &str, reason: &str) -> VolatilityError {
    VolatilityError::NonFinite {
        instrument: instrument.to_string(),
        reason: reason.to_string(),
    }
}

/// Exponentially weighted mean of the first squared residuals.
fn backcast(residuals: &[f64]) -> f64 {
    let tau = residuals.len().min(BACKCAST_WINDOW);
    let mut weight = 1.0;
    let mut weighted = 0.0;
    let mut total_weight = 0.0;
    for e in &residuals[..tau] {
        weighted += weight * e * e;
        total_weight += weight;
        weight *= BACKCAST_DECAY;
    }
    weighted / total_weight
}

fn is_feasible(p: &Point) -> bool {
    let [mu, omega, alpha, beta] = *p;
    mu.is_finite() && omega > 0.0 && alpha >= 0.0 && beta >= 0.0 && alpha + beta < 1.0
}

/// Conditional variance recursion; `out` must have the length of `returns`.
fn variance_path(p: &Point, returns: &[f64], backcast: f64, out: &mut [f64]) {
    let [mu, omega, alpha, beta] = *p;
    let mut prev_var = backcast;
    let mut prev_sq = backcast;
    for (r, s2) in returns.iter().zip(out.iter_mut()) {
        *s2 = omega + alpha * prev_sq + beta * prev_var;
        prev_var = *s2;
        prev_sq = (r - mu).powi(2);
    }
}

/// Gaussian negative log-likelihood; infinite outside the feasible region.
fn negative_log_likelihood(p: &Point, returns: &[f64], backcast: f64, scratch: &mut [f64]) -> f64 {
    if !is_feasible(p) {
        return f64::INFINITY;
    }
    variance_path(p, returns, backcast, scratch);

    let ln_2pi = (2.0 * PI).ln();
    let mu = p[0];
    let mut total = 0.0;
    for (r, s2) in returns.iter().zip(scratch.iter()) {
        if !(s2.is_finite() && *s2 > 0.0) {
            return f64::INFINITY;
        }
        let e = r - mu;
        total += ln_2pi + s2.ln() + e * e / s2;
    }
    0.5 * total
}

struct Optimum {
    point: Point,
    value: f64,
    iterations: usize,
}

/// Downhill simplex with the standard coefficients.
struct NelderMead {
    max_iterations: usize,
    tolerance: f64,
}

impl NelderMead {
    const REFLECTION: f64 = 1.0;
    const EXPANSION: f64 = 2.0;
    const CONTRACTION: f64 = 0.5;
    const SHRINK: f64 = 0.5;

    /// Minimizes `f` from `start`; `Err` carries the iteration count when the
    /// bound is reached first.
    fn minimize<F>(&self, start: Point, mut f: F) -> Result<Optimum, usize>
    where
        F: FnMut(&Point) -> f64,
    {
        let mut eval = |p: &Point| {
            let v = f(p);
            if v.is_nan() { f64::INFINITY } else { v }
        };

        let mut simplex: Vec<(Point, f64)> = Vec::with_capacity(N_PARAMS + 1);
        simplex.push((start, eval(&start)));
        for i in 0..N_PARAMS {
            let mut p = start;
            p[i] = if p[i].abs() > 1e-8 { p[i] * 1.05 } else { 0.000_25 };
            simplex.push((p, eval(&p)));
        }

        for iteration in 0..self.max_iterations {
            simplex.sort_by(|a, b| a.1.total_cmp(&b.1));
            if self.converged(&simplex) {
                return Ok(Self::optimum(&simplex, iteration));
            }

            let centroid = centroid(&simplex[..N_PARAMS]);
            let (worst, f_worst) = simplex[N_PARAMS];
            let f_best = simplex[0].1;
            let f_second_worst = simplex[N_PARAMS - 1].1;

            let reflected = affine(&centroid, &worst, -Self::REFLECTION);
            let f_reflected = eval(&reflected);

            if f_reflected < f_best {
                let expanded = affine(&centroid, &worst, -Self::EXPANSION);
                let f_expanded = eval(&expanded);
                simplex[N_PARAMS] = if f_expanded < f_reflected {
                    (expanded, f_expanded)
                } else {
                    (reflected, f_reflected)
                };
                continue;
            }
            if f_reflected < f_second_worst {
                simplex[N_PARAMS] = (reflected, f_reflected);
                continue;
            }

            let (contracted, f_contracted, accept) = if f_reflected < f_worst {
                let c = affine(&centroid, &reflected, Self::CONTRACTION);
                let fc = eval(&c);
                (c, fc, fc <= f_reflected)
            } else {
                let c = affine(&centroid, &worst, Self::CONTRACTION);
                let fc = eval(&c);
                (c, fc, fc < f_worst)
            };
            if accept {
                simplex[N_PARAMS] = (contracted, f_contracted);
                continue;
            }

            let best = simplex[0].0;
            for vertex in simplex.iter_mut().skip(1) {
                let p = affine(&best, &vertex.0, Self::SHRINK);
                *vertex = (p, eval(&p));
            }
        }

        simplex.sort_by(|a, b| a.1.total_cmp(&b.1));
        if self.converged(&simplex) {
            Ok(Self::optimum(&simplex, self.max_iterations))
        } else {
            Err(self.max_iterations)
        }
    }

    fn converged(&self, sorted: &[(Point, f64)]) -> bool {
        let best = sorted[0].1;
        let worst = sorted[sorted.len() - 1].1;
        best.is_finite() && worst - best <= self.tolerance * (1.0 + best.abs())
    }

    fn optimum(sorted: &[(Point, f64)], iterations: usize) -> Optimum {
        Optimum {
            point: sorted[0].0,
            value: sorted[0].1,
            iterations,
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn centroid(vertices: &[(Point, f64)]) -> Point {
    let mut c = [0.0; N_PARAMS];
    for (p, _) in vertices {
        for (ci, pi) in c.iter_mut().zip(p) {
            *ci += pi;
        }
    }
    let k = vertices.len() as f64;
    c.map(|v| v / k)
}

/// `a + t * (b - a)`
fn affine(a: &Point, b: &Point, t: f64) -> Point {
    let mut out = *a;
    for (o, (ai, bi)) in out.iter_mut().zip(a.iter().zip(b)) {
        *o = ai + t * (bi - ai);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn returns(values: &[f64]) -> ReturnSeries {
        ReturnSeries {
            instrument: "TEST".to_string(),
            dates: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .iter_days()
                .take(values.len())
                .collect(),
            values: values.to_vec(),
        }
    }

    #[test]
    fn test_backcast_constant_residuals() {
        assert_relative_eq!(backcast(&[2.0; 100]), 4.0, epsilon = 1e-12);
        assert_relative_eq!(backcast(&[-3.0; 5]), 9.0, epsilon = 1e-12);
    }

    #[test]
    fn test_backcast_weights_recent_less() {
        // First residual carries the largest weight.
        let early = backcast(&[4.0, 0.0, 0.0]);
        let late = backcast(&[0.0, 0.0, 4.0]);
        assert!(early > late);
    }

    #[test]
    fn test_variance_path_recursion() {
        let p = [0.0, 0.1, 0.2, 0.5];
        let mut out = [0.0; 3];
        variance_path(&p, &[1.0, -2.0, 0.5], 1.0, &mut out);

        assert_relative_eq!(out[0], 0.1 + 0.2 * 1.0 + 0.5 * 1.0, epsilon = 1e-12);
        assert_relative_eq!(out[1], 0.1 + 0.2 * 1.0 + 0.5 * out[0], epsilon = 1e-12);
        assert_relative_eq!(out[2], 0.1 + 0.2 * 4.0 + 0.5 * out[1], epsilon = 1e-12);
    }

    #[test]
    fn test_infeasible_points_have_infinite_objective() {
        let r = [0.5, -0.5, 1.0];
        let mut scratch = [0.0; 3];
        for p in [
            [0.0, 0.0, 0.1, 0.8],
            [0.0, 0.1, -0.1, 0.8],
            [0.0, 0.1, 0.1, -0.8],
            [0.0, 0.1, 0.5, 0.5],
        ] {
            assert!(negative_log_likelihood(&p, &r, 1.0, &mut scratch).is_infinite());
        }
        assert!(negative_log_likelihood(&[0.0, 0.1, 0.1, 0.8], &r, 1.0, &mut scratch).is_finite());
    }

    #[test]
    fn test_nelder_mead_quadratic() {
        let target = [1.0, 2.0, 3.0, 4.0];
        let optimizer = NelderMead {
            max_iterations: 5000,
            tolerance: 1e-12,
        };
        let optimum = optimizer
            .minimize([0.5, 1.5, 2.5, 3.5], |p| {
                p.iter().zip(&target).map(|(x, t)| (x - t).powi(2)).sum()
            })
            .unwrap();

        for (x, t) in optimum.point.iter().zip(&target) {
            assert!((x - t).abs() < 1e-3, "{x} vs {t}");
        }
    }

    #[test]
    fn test_nelder_mead_iteration_bound() {
        let optimizer = NelderMead {
            max_iterations: 1,
            tolerance: 1e-12,
        };
        let result = optimizer.minimize([0.5, 1.5, 2.5, 3.5], |p| p.iter().map(|x| x * x).sum());
        assert_eq!(result.err(), Some(1));
    }

    #[test]
    fn test_fit_rejects_short_series() {
        let err = GarchEstimator::default()
            .fit(&returns(&[0.1, -0.2, 0.3]))
            .unwrap_err();
        assert!(matches!(
            err,
            VolatilityError::InsufficientData {
                required: 20,
                actual: 3,
                ..
            }
        ));
        assert!(err.is_model_fit_error());
    }

    #[test]
    fn test_fit_rejects_constant_returns() {
        let err = GarchEstimator::default()
            .fit(&returns(&[0.5; 40]))
            .unwrap_err();
        assert!(matches!(err, VolatilityError::NonFinite { .. }));
    }

    #[test]
    fn test_estimate_volatility_surfaces_preprocessing_errors() {
        let series = PriceSeries::from_closes(
            "ONE",
            &[NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()],
            &[100.0],
        );
        let err = estimate_volatility(&series, &GarchConfig::default()).unwrap_err();
        assert!(matches!(err, VolatilityError::Data(_)));
        assert_eq!(err.error_category(), "invalid_input");
    }
}
