//! Pricing models
//!
//! Implements:
//! - Implied volatility selection from a quote snapshot
//! - GBM path simulation of arithmetic averages
//! - Monte Carlo payoff estimation
//! - Geometric-average closed form (benchmark)

pub mod vol_select;
pub mod gbm;
pub mod payoff;
pub mod geometric;

pub use vol_select::*;
pub use gbm::*;
pub use payoff::*;
pub use geometric::*;
