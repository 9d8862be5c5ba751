//! Simulation parameters

use serde::{Deserialize, Serialize};

use super::error::{AsianError, AsianResult};

/// Inputs to the GBM path simulator.
///
/// Fields are private so a value can only exist once validated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    spot: f64,
    sigma: f64,
    tenor: f64,
    n_paths: usize,
    rate: f64,
    div_yield: f64,
    seed: Option<u64>,
}

impl SimulationParameters {
    /// Validate and build.
    ///
    /// Requires `spot > 0`, `tenor > 0`, `n_paths >= 1`, `sigma >= 0` and
    /// finite rates.
    pub fn new(
        spot: f64,
        sigma: f64,
        tenor: f64,
        n_paths: usize,
        rate: f64,
        div_yield: f64,
        seed: Option<u64>,
    ) -> AsianResult<Self> {
        if !(spot.is_finite() && spot > 0.0) {
            return Err(AsianError::invalid_parameter(format!(
                "spot must be positive, got {}",
                spot
            )));
        }
        if !(tenor.is_finite() && tenor > 0.0) {
            return Err(AsianError::invalid_parameter(format!(
                "tenor must be positive, got {}",
                tenor
            )));
        }
        if n_paths == 0 {
            return Err(AsianError::invalid_parameter("path count must be at least 1"));
        }
        if !(sigma.is_finite() && sigma >= 0.0) {
            return Err(AsianError::invalid_parameter(format!(
                "volatility must be non-negative, got {}",
                sigma
            )));
        }
        if !rate.is_finite() || !div_yield.is_finite() {
            return Err(AsianError::invalid_parameter("rates must be finite"));
        }

        Ok(Self {
            spot,
            sigma,
            tenor,
            n_paths,
            rate,
            div_yield,
            seed,
        })
    }

    pub fn spot(&self) -> f64 {
        self.spot
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    pub fn tenor(&self) -> f64 {
        self.tenor
    }

    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn div_yield(&self) -> f64 {
        self.div_yield
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Risk-neutral log drift per unit time: r - q - σ²/2
    pub fn log_drift(&self) -> f64 {
        self.rate - self.div_yield - 0.5 * self.sigma * self.sigma
    }

    /// Same parameters with a different seed
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_parameters() {
        let p = SimulationParameters::new(100.0, 0.2, 0.5, 1000, 0.03, 0.01, Some(7)).unwrap();
        assert_eq!(p.spot(), 100.0);
        assert_eq!(p.n_paths(), 1000);
        assert_eq!(p.seed(), Some(7));
        assert!((p.log_drift() - (0.03 - 0.01 - 0.02)).abs() < 1e-15);
    }

    #[test]
    fn test_rejects_invalid() {
        let invalid = [
            SimulationParameters::new(0.0, 0.2, 0.5, 10, 0.03, 0.0, None),
            SimulationParameters::new(-1.0, 0.2, 0.5, 10, 0.03, 0.0, None),
            SimulationParameters::new(100.0, 0.2, 0.0, 10, 0.03, 0.0, None),
            SimulationParameters::new(100.0, 0.2, 0.5, 0, 0.03, 0.0, None),
            SimulationParameters::new(100.0, -0.1, 0.5, 10, 0.03, 0.0, None),
            SimulationParameters::new(100.0, 0.2, 0.5, 10, f64::NAN, 0.0, None),
        ];

        for result in invalid {
            assert!(matches!(result, Err(AsianError::InvalidParameter(_))));
        }
    }

    #[test]
    fn test_zero_vol_allowed() {
        assert!(SimulationParameters::new(100.0, 0.0, 1.0, 1, 0.0, 0.0, None).is_ok());
    }
}
