//! Pricing result
//!
//! Monte Carlo price estimate with its standard error and normal-approximation
//! confidence intervals.

use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};
use std::fmt;

use super::error::{AsianError, AsianResult};

/// z-score used for the 95% interval
pub const Z_95: f64 = 1.959;
/// z-score used for the 99% interval
pub const Z_99: f64 = 2.576;

/// Closed interval [low, high]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub low: f64,
    pub high: f64,
}

impl ConfidenceInterval {
    /// Symmetric interval `center ± z * std_error`
    pub fn symmetric(center: f64, std_error: f64, z: f64) -> Self {
        Self {
            low: center - z * std_error,
            high: center + z * std_error,
        }
    }

    pub fn width(&self) -> f64 {
        self.high - self.low
    }

    pub fn contains(&self, x: f64) -> bool {
        self.low <= x && x <= self.high
    }
}

/// Output of a pricing run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingResult {
    /// Discounted mean payoff
    pub price: f64,
    /// Sample standard deviation / sqrt(n)
    pub std_error: f64,
    pub ci95: ConfidenceInterval,
    pub ci99: ConfidenceInterval,
    /// Number of simulated paths
    pub n_paths: usize,
}

impl PricingResult {
    pub fn new(price: f64, std_error: f64, n_paths: usize) -> Self {
        Self {
            price,
            std_error,
            ci95: ConfidenceInterval::symmetric(price, std_error, Z_95),
            ci99: ConfidenceInterval::symmetric(price, std_error, Z_99),
            n_paths,
        }
    }

    /// Two-sided interval at an arbitrary confidence level in (0, 1)
    pub fn confidence_interval(&self, level: f64) -> AsianResult<ConfidenceInterval> {
        if !(level > 0.0 && level < 1.0) {
            return Err(AsianError::invalid_parameter(format!(
                "confidence level must be in (0, 1), got {}",
                level
            )));
        }
        let normal = Normal::new(0.0, 1.0)
            .map_err(|e| AsianError::invalid_parameter(e.to_string()))?;
        let z = normal.inverse_cdf(0.5 + level / 2.0);
        Ok(ConfidenceInterval::symmetric(self.price, self.std_error, z))
    }

    /// ci99 ⊇ ci95 ∋ price
    pub fn intervals_nested(&self) -> bool {
        self.ci99.low <= self.ci95.low
            && self.ci95.low <= self.price
            && self.price <= self.ci95.high
            && self.ci95.high <= self.ci99.high
    }
}

impl fmt::Display for PricingResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Estimated price of Asian option is: {:.4}", self.price)?;
        writeln!(f, "Standard error of the estimation is {:.4}", self.std_error)?;
        writeln!(
            f,
            "95% CI for price (MC): [{:.4}, {:.4}]",
            self.ci95.low, self.ci95.high
        )?;
        write!(
            f,
            "99% CI for price (MC): [{:.4}, {:.4}]",
            self.ci99.low, self.ci99.high
        )
    }
}
