//! Monte Carlo payoff estimator
//!
//! Turns per-path average prices into a discounted price, its standard error
//! and confidence intervals.

use crate::core::{AsianError, AsianResult, OptionSpec, PricingResult};

/// Minimum sample size for an unbiased variance
pub const MIN_PATHS: usize = 2;

/// Estimate the price of a fixed-strike Asian option from path averages.
///
/// The path count is `averages.len()`. The standard error uses the unbiased
/// (n - 1) sample variance.
pub fn estimate_price(
    rate: f64,
    tenor: f64,
    option: &OptionSpec,
    averages: &[f64],
) -> AsianResult<PricingResult> {
    let n = averages.len();
    if n < MIN_PATHS {
        return Err(AsianError::DegenerateSample { paths: n });
    }
    if !rate.is_finite() || !(tenor.is_finite() && tenor > 0.0) {
        return Err(AsianError::invalid_parameter(format!(
            "discounting needs a finite rate and positive tenor, got r = {}, T = {}",
            rate, tenor
        )));
    }

    let df = (-rate * tenor).exp();
    let payoffs: Vec<f64> = averages.iter().map(|&avg| df * option.payoff(avg)).collect();

    let n_f = n as f64;
    let mean = payoffs.iter().sum::<f64>() / n_f;
    let variance = payoffs.iter().map(|p| (p - mean).powi(2)).sum::<f64>() / (n_f - 1.0);
    let std_error = variance.sqrt() / n_f.sqrt();

    Ok(PricingResult::new(mean, std_error, n))
}
