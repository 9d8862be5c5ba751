//! Geometric-average Asian option (closed form)
//!
//! Under GBM the continuously monitored geometric average is lognormal:
//!
//! ```text
//! ln G ~ N(m, v),  m = ln S0 + (r - q - σ²/2) T / 2,  v = σ² T / 3
//! ```
//!
//! The arithmetic average dominates the geometric one path by path, so this
//! price is a lower bound for the arithmetic Asian call and a useful sanity
//! check on the Monte Carlo estimate.

use statrs::function::erf::erfc;

use crate::core::{AsianError, AsianResult, OptionType};

/// Standard normal CDF
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * erfc(-x / std::f64::consts::SQRT_2)
}

/// Price of a continuously monitored geometric-average Asian option
pub fn geometric_asian_price(
    spot: f64,
    strike: f64,
    rate: f64,
    div: f64,
    vol: f64,
    time: f64,
    option_type: OptionType,
) -> AsianResult<f64> {
    if !(spot > 0.0 && strike > 0.0 && time > 0.0 && vol >= 0.0) {
        return Err(AsianError::invalid_parameter(format!(
            "geometric Asian needs S > 0, K > 0, T > 0, σ >= 0 (S = {}, K = {}, T = {}, σ = {})",
            spot, strike, time, vol
        )));
    }

    let df = (-rate * time).exp();
    let m = spot.ln() + (rate - div - 0.5 * vol * vol) * time / 2.0;
    let v = vol * vol * time / 3.0;

    if v <= 0.0 {
        return Ok(df * option_type.intrinsic(m.exp(), strike));
    }

    let sqrt_v = v.sqrt();
    let d1 = (m - strike.ln() + v) / sqrt_v;
    let d2 = d1 - sqrt_v;
    let expected_g = (m + 0.5 * v).exp();

    Ok(match option_type {
        OptionType::Call => df * (expected_g * norm_cdf(d1) - strike * norm_cdf(d2)),
        OptionType::Put => df * (strike * norm_cdf(-d2) - expected_g * norm_cdf(-d1)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_norm_cdf() {
        assert!((norm_cdf(0.0) - 0.5).abs() < 1e-15);
        assert!((norm_cdf(1.959) - 0.97494).abs() < 1e-4);
        assert!((norm_cdf(-2.576) - 0.0050).abs() < 1e-4);
    }

    #[test]
    fn test_reference_value() {
        // S = K = 100, σ = 20%, T = 0.5, r = 3%
        let call = geometric_asian_price(100.0, 100.0, 0.03, 0.0, 0.2, 0.5, OptionType::Call).unwrap();
        assert!((call - 3.5137).abs() < 1e-3, "call = {}", call);
    }

    #[test]
    fn test_put_call_parity() {
        let (s, k, r, q, vol, t) = (100.0, 95.0, 0.04, 0.01, 0.3, 1.0);
        let call = geometric_asian_price(s, k, r, q, vol, t, OptionType::Call).unwrap();
        let put = geometric_asian_price(s, k, r, q, vol, t, OptionType::Put).unwrap();

        let m: f64 = s.ln() + (r - q - 0.5 * vol * vol) * t / 2.0;
        let v = vol * vol * t / 3.0;
        let forward_g = (m + 0.5 * v).exp();
        let df = (-r * t).exp();

        assert!((call - put - df * (forward_g - k)).abs() < 1e-10);
    }

    #[test]
    fn test_zero_vol() {
        let call = geometric_asian_price(100.0, 90.0, 0.02, 0.0, 0.0, 1.0, OptionType::Call).unwrap();
        let expected = (-0.02f64).exp() * (100.0 * 0.01f64.exp() - 90.0);
        assert!((call - expected).abs() < 1e-10);
    }

    #[test]
    fn test_rejects_invalid() {
        assert!(geometric_asian_price(0.0, 100.0, 0.0, 0.0, 0.2, 1.0, OptionType::Call).is_err());
        assert!(geometric_asian_price(100.0, 100.0, 0.0, 0.0, 0.2, 0.0, OptionType::Put).is_err());
    }
}
