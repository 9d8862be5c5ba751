//! # Asian Options - Monte Carlo Pricing
//!
//! Prices fixed-strike arithmetic-average ("Asian") options on a single
//! underlying by Monte Carlo simulation under geometric Brownian motion, using
//! a market implied volatility.
//!
//! ## Key Components
//!
//! - **Volatility selection**: implied vol of the expiry closest to the
//!   option's tenor, at the strike closest to spot
//! - **Path simulation**: exact GBM log-steps on a 252 × 8 per year
//!   monitoring grid, one arithmetic average per path
//! - **Payoff estimation**: discounted mean payoff, standard error and
//!   95% / 99% confidence intervals
//! - **Market data**: Yahoo Finance client with a local snapshot cache
//!
//! ## Usage
//!
//! ```rust,no_run
//! use asian_options::prelude::*;
//!
//! let request = PricingRequest {
//!     spot: 100.0,
//!     sigma: 0.2,
//!     tenor: 0.5,
//!     strike: 100.0,
//!     rate: 0.03,
//!     div_yield: 0.0,
//!     n_paths: 100_000,
//!     option_type: OptionType::Call,
//!     seed: Some(42),
//! };
//!
//! let result = price_asian(&request, &PricerConfig::default()).unwrap();
//! println!("{}", result);
//! ```
//!
//! ## What This Does NOT Do
//!
//! - American exercise
//! - Discrete dividends
//! - Stochastic volatility
//! - Variance reduction (antithetics, control variates)

pub mod config;
pub mod core;
pub mod data;
pub mod input;
pub mod models;
pub mod pricing;

/// Prelude with commonly used types
pub mod prelude {
    // Core types
    pub use crate::core::{
        AsianError, AsianResult, ConfidenceInterval, ExpiryQuotes, OptionSpec, OptionType,
        PricingResult, SimulationParameters, VolPoint, VolQuoteSnapshot,
    };

    // Market data
    pub use crate::data::{
        CacheConfig, CachedProvider, MarketDataProvider, SnapshotCache, StaticMarketData,
        YahooClient,
    };

    // Models
    pub use crate::models::{
        estimate_price, geometric_asian_price, select_volatility, select_volatility_today,
        Execution, MonitoringGrid, PathSimulator, VolSelection,
    };

    // Pricing
    pub use crate::pricing::{
        price_asian, price_from_market, MarketPricing, MarketPricingRequest, PricerConfig,
        PricingRequest,
    };

    pub use crate::config::AppConfig;
}

// Re-export main types at crate root
pub use crate::core::{AsianError, AsianResult, PricingResult};
pub use crate::pricing::{price_asian, PricerConfig, PricingRequest};
