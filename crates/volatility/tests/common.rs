use chrono::NaiveDate;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use vega_types::{PriceSeries, ReturnSeries};

pub struct SimulatedPath {
    pub returns: ReturnSeries,
    pub sigma: Vec<f64>,
}

fn standard_normal(rng: &mut ChaCha8Rng) -> f64 {
    let u1: f64 = rng.gen_range(f64::EPSILON..1.0);
    let u2: f64 = rng.gen_range(0.0..1.0);
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}

fn dates(n: usize) -> Vec<NaiveDate> {
    NaiveDate::from_ymd_opt(2015, 1, 1)
        .unwrap()
        .iter_days()
        .take(n)
        .collect()
}

/// Simulates percentage returns from a GARCH(1,1) process.
pub fn simulate_garch(
    seed: u64,
    n: usize,
    mu: f64,
    omega: f64,
    alpha: f64,
    beta: f64,
) -> SimulatedPath {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut var = omega / (1.0 - alpha - beta);
    let mut values = Vec::with_capacity(n);
    let mut sigma = Vec::with_capacity(n);
    for _ in 0..n {
        let s = var.sqrt();
        let e = s * standard_normal(&mut rng);
        values.push(mu + e);
        sigma.push(s);
        var = omega + alpha * e * e + beta * var;
    }
    SimulatedPath {
        returns: ReturnSeries {
            instrument: format!("SIM{seed}"),
            dates: dates(n),
            values,
        },
        sigma,
    }
}

/// Price series whose percentage log returns are `returns`.
pub fn prices_from_returns(instrument: &str, returns: &[f64]) -> PriceSeries {
    let mut closes = Vec::with_capacity(returns.len() + 1);
    let mut price = 100.0_f64;
    closes.push(price);
    for r in returns {
        price *= (r / 100.0).exp();
        closes.push(price);
    }
    PriceSeries::from_closes(instrument, &dates(closes.len()), &closes)
}
