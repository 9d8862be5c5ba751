//! Configuration for the pricing pipeline

use serde::{Deserialize, Serialize};

use crate::models::{Execution, PathSimulator, OBSERVATIONS_PER_DAY, TRADING_DAYS_PER_YEAR};

/// Monte Carlo engine settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricerConfig {
    /// Trading days per year used to size the monitoring grid
    pub trading_days_per_year: u32,
    /// Price observations per trading day
    pub observations_per_day: u32,
    /// Seed used when a request does not carry one; `None` draws a fresh seed
    pub default_seed: Option<u64>,
    /// Serial (single documented stream) or parallel path generation
    pub execution: Execution,
}

impl Default for PricerConfig {
    fn default() -> Self {
        Self {
            trading_days_per_year: TRADING_DAYS_PER_YEAR,
            observations_per_day: OBSERVATIONS_PER_DAY,
            default_seed: Some(42),
            execution: Execution::Serial,
        }
    }
}

impl PricerConfig {
    /// Default grid, paths spread over all cores
    pub fn fast() -> Self {
        Self {
            execution: Execution::Parallel,
            ..Default::default()
        }
    }

    /// Monitoring points per year of tenor
    pub fn observations_per_year(&self) -> f64 {
        self.trading_days_per_year as f64 * self.observations_per_day as f64
    }

    pub fn simulator(&self) -> PathSimulator {
        PathSimulator::new(self.observations_per_year(), self.execution)
    }
}
