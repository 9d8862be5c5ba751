//! GBM path simulation for arithmetic averages
//!
//! Simulates the risk-neutral GBM
//!
//! ```text
//! dS_t = (r - q) S_t dt + σ S_t dW_t
//! ```
//!
//! on an equally spaced monitoring grid using the exact log-price transition
//!
//! ```text
//! log S_{i+1} = log S_i + (r - q - σ²/2) dt + σ √dt Z_i
//! ```
//!
//! so the only discretisation error is the monitoring frequency itself. Each
//! path is reduced to the arithmetic mean of its N monitored prices; the
//! initial price S0 is not part of the average.
//!
//! ## Random number layout
//!
//! Normals come from `ChaCha8Rng::seed_from_u64(seed)` through
//! `rand_distr::StandardNormal`.
//!
//! - [`Execution::Serial`]: one stream, step index outer, path index inner.
//!   This is the same order as drawing an `N × n` matrix row by row.
//! - [`Execution::Parallel`]: paths are cut into blocks of
//!   [`PATHS_PER_BLOCK`]; block `b` uses stream `b + 1` of the same seed and
//!   draws step-outer, path-inner within the block. Blocks do not depend on
//!   the thread count, so results are reproducible on any pool size.
//!
//! Serial and parallel runs of the same seed give different (individually
//! reproducible) samples.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, StandardNormal};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::{AsianError, AsianResult, SimulationParameters};

/// Trading days per year used to size the monitoring grid
pub const TRADING_DAYS_PER_YEAR: u32 = 252;
/// Monitoring points per trading day
pub const OBSERVATIONS_PER_DAY: u32 = 8;
/// Paths per independently seeded block in parallel mode
pub const PATHS_PER_BLOCK: usize = 4096;

/// How paths are distributed over threads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Execution {
    /// Single RNG stream, single thread
    #[default]
    Serial,
    /// Rayon over fixed-size path blocks, one RNG substream per block
    Parallel,
}

/// Equally spaced monitoring instants t_1..t_N = dt..T
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonitoringGrid {
    steps: usize,
    dt: f64,
}

impl MonitoringGrid {
    /// Grid with `max(1, round(tenor * observations_per_year))` steps
    pub fn new(tenor: f64, observations_per_year: f64) -> AsianResult<Self> {
        if !(tenor.is_finite() && tenor > 0.0) {
            return Err(AsianError::invalid_parameter(format!(
                "tenor must be positive, got {}",
                tenor
            )));
        }
        if !(observations_per_year.is_finite() && observations_per_year > 0.0) {
            return Err(AsianError::invalid_parameter(format!(
                "monitoring frequency must be positive, got {}",
                observations_per_year
            )));
        }

        let steps = ((tenor * observations_per_year).round() as usize).max(1);
        Ok(Self {
            steps,
            dt: tenor / steps as f64,
        })
    }

    /// 252 trading days × 8 observations per day
    pub fn trading_days(tenor: f64) -> AsianResult<Self> {
        Self::new(tenor, (TRADING_DAYS_PER_YEAR * OBSERVATIONS_PER_DAY) as f64)
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Monitoring times, excluding t = 0
    pub fn times(&self) -> impl Iterator<Item = f64> + '_ {
        (1..=self.steps).map(move |i| i as f64 * self.dt)
    }
}

/// Generates one arithmetic-average sample per path
#[derive(Debug, Clone, Copy)]
pub struct PathSimulator {
    observations_per_year: f64,
    execution: Execution,
}

impl Default for PathSimulator {
    fn default() -> Self {
        Self {
            observations_per_year: (TRADING_DAYS_PER_YEAR * OBSERVATIONS_PER_DAY) as f64,
            execution: Execution::Serial,
        }
    }
}

impl PathSimulator {
    pub fn new(observations_per_year: f64, execution: Execution) -> Self {
        Self {
            observations_per_year,
            execution,
        }
    }

    pub fn with_execution(mut self, execution: Execution) -> Self {
        self.execution = execution;
        self
    }

    pub fn grid(&self, tenor: f64) -> AsianResult<MonitoringGrid> {
        MonitoringGrid::new(tenor, self.observations_per_year)
    }

    /// Simulate `params.n_paths()` path averages.
    ///
    /// Deterministic when `params.seed()` is set. Without a seed a fresh one
    /// is drawn and logged at debug level.
    pub fn simulate(&self, params: &SimulationParameters) -> AsianResult<Vec<f64>> {
        let grid = self.grid(params.tenor())?;
        let seed = params.seed().unwrap_or_else(|| {
            let seed = rand::random::<u64>();
            tracing::debug!("No seed given, drew {}", seed);
            seed
        });

        let step = LogStep {
            log_spot: params.spot().ln(),
            drift: params.log_drift() * grid.dt(),
            diffusion: params.sigma() * grid.dt().sqrt(),
            steps: grid.steps(),
        };

        tracing::debug!(
            "Simulating {} paths x {} steps (dt = {:.3e}, {:?})",
            params.n_paths(),
            grid.steps(),
            grid.dt(),
            self.execution
        );

        let mut samples = vec![0.0; params.n_paths()];

        match self.execution {
            Execution::Serial => {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                step.average_block(&mut rng, &mut samples);
            }
            Execution::Parallel => {
                samples
                    .par_chunks_mut(PATHS_PER_BLOCK)
                    .enumerate()
                    .for_each(|(block, out)| {
                        let mut rng = ChaCha8Rng::seed_from_u64(seed);
                        rng.set_stream(block as u64 + 1);
                        step.average_block(&mut rng, out);
                    });
            }
        }

        Ok(samples)
    }
}

/// Per-step constants of the exact log-price recursion
#[derive(Debug, Clone, Copy)]
struct LogStep {
    log_spot: f64,
    drift: f64,
    diffusion: f64,
    steps: usize,
}

impl LogStep {
    /// Fill `out` with path averages, drawing step-outer, path-inner
    fn average_block(&self, rng: &mut impl rand::Rng, out: &mut [f64]) {
        let mut log_s = vec![self.log_spot; out.len()];
        out.iter_mut().for_each(|sum| *sum = 0.0);

        for _ in 0..self.steps {
            for (x, sum) in log_s.iter_mut().zip(out.iter_mut()) {
                let z: f64 = Distribution::<f64>::sample(&StandardNormal, rng);
                *x += self.drift + self.diffusion * z;
                *sum += x.exp();
            }
        }

        let n = self.steps as f64;
        out.iter_mut().for_each(|sum| *sum /= n);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(sigma: f64, tenor: f64, n: usize, seed: Option<u64>) -> SimulationParameters {
        SimulationParameters::new(100.0, sigma, tenor, n, 0.03, 0.01, seed).unwrap()
    }

    #[test]
    fn test_grid_sizing() {
        let grid = MonitoringGrid::trading_days(0.5).unwrap();
        assert_eq!(grid.steps(), 1008);
        assert!((grid.dt() - 0.5 / 1008.0).abs() < 1e-15);

        // One month = 168 observations
        assert_eq!(MonitoringGrid::trading_days(1.0 / 12.0).unwrap().steps(), 168);

        // Very short tenors still get one step
        let tiny = MonitoringGrid::trading_days(1e-6).unwrap();
        assert_eq!(tiny.steps(), 1);
        assert_eq!(tiny.dt(), 1e-6);

        let times: Vec<f64> = MonitoringGrid::new(1.0, 4.0).unwrap().times().collect();
        assert_eq!(times, vec![0.25, 0.5, 0.75, 1.0]);

        assert!(MonitoringGrid::trading_days(0.0).is_err());
        assert!(MonitoringGrid::new(1.0, 0.0).is_err());
    }

    #[test]
    fn test_seeded_determinism() {
        let sim = PathSimulator::default();
        let p = params(0.25, 1.0 / 12.0, 500, Some(42));

        let a = sim.simulate(&p).unwrap();
        let b = sim.simulate(&p).unwrap();
        assert_eq!(a.len(), 500);
        assert_eq!(a, b);

        let c = sim.simulate(&p.with_seed(Some(43))).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_parallel_determinism() {
        let sim = PathSimulator::default().with_execution(Execution::Parallel);
        // Spans several blocks, last one partial
        let p = params(0.25, 0.02, 2 * PATHS_PER_BLOCK + 17, Some(9));

        let a = sim.simulate(&p).unwrap();
        let b = sim.simulate(&p).unwrap();
        assert_eq!(a.len(), 2 * PATHS_PER_BLOCK + 17);
        assert_eq!(a, b);

        // Blocks use distinct substreams
        assert_ne!(a[0], a[PATHS_PER_BLOCK]);
    }

    #[test]
    fn test_serial_layout_is_step_outer() {
        // With one step, path j consumes the j-th normal of the stream
        let p = SimulationParameters::new(100.0, 0.2, 1e-6, 3, 0.0, 0.0, Some(5)).unwrap();
        let samples = PathSimulator::default().simulate(&p).unwrap();

        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let dt: f64 = 1e-6;
        for sample in samples {
            let z: f64 = Distribution::<f64>::sample(&StandardNormal, &mut rng);
            let expected = (100.0f64.ln() - 0.5 * 0.04 * dt + 0.2 * dt.sqrt() * z).exp();
            assert!((sample - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_zero_volatility() {
        let sim = PathSimulator::default();
        let tenor = 0.25;
        let grid = sim.grid(tenor).unwrap();

        let expected: f64 = grid
            .times()
            .map(|t| 100.0 * ((0.03 - 0.01) * t).exp())
            .sum::<f64>()
            / grid.steps() as f64;

        for seed in [Some(1), Some(2), None] {
            let samples = sim.simulate(&params(0.0, tenor, 20, seed)).unwrap();
            for s in samples {
                assert!((s - expected).abs() / expected < 1e-9);
            }
        }
    }

    #[test]
    fn test_mean_matches_forward_average() {
        // E[S_t] = S0 exp((r - q) t), so the mean of the averages tracks the
        // average forward
        let sim = PathSimulator::default().with_execution(Execution::Parallel);
        let tenor = 1.0 / 12.0;
        let grid = sim.grid(tenor).unwrap();
        let samples = sim.simulate(&params(0.3, tenor, 20_000, Some(11))).unwrap();

        let forward_avg: f64 = grid
            .times()
            .map(|t| 100.0 * ((0.03 - 0.01) * t).exp())
            .sum::<f64>()
            / grid.steps() as f64;
        let mean = samples.iter().sum::<f64>() / samples.len() as f64;

        assert!((mean - forward_avg).abs() < 0.15, "mean {} vs {}", mean, forward_avg);
        assert!(samples.iter().all(|s| *s > 0.0));
    }
}
