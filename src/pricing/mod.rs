//! Asian option pricing pipeline
//!
//! Wires the models together:
//! 1. Volatility selection (market flow only)
//! 2. Path simulation
//! 3. Payoff estimation

pub mod config;

pub use config::*;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::{
    AsianError, AsianResult, OptionSpec, OptionType, PricingResult, SimulationParameters,
};
use crate::data::MarketDataProvider;
use crate::models::{estimate_price, select_volatility, VolSelection, MIN_PATHS};

/// Fully specified pricing inputs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingRequest {
    pub spot: f64,
    pub sigma: f64,
    /// Years
    pub tenor: f64,
    pub strike: f64,
    pub rate: f64,
    pub div_yield: f64,
    pub n_paths: usize,
    pub option_type: OptionType,
    /// Falls back to `PricerConfig::default_seed` when `None`
    pub seed: Option<u64>,
}

/// Price an arithmetic-average Asian option by Monte Carlo.
///
/// The path count is checked before any simulation work starts.
pub fn price_asian(request: &PricingRequest, config: &PricerConfig) -> AsianResult<PricingResult> {
    if request.n_paths < MIN_PATHS {
        return Err(AsianError::DegenerateSample {
            paths: request.n_paths,
        });
    }

    let option = OptionSpec::new(request.option_type, request.strike)?;
    let params = SimulationParameters::new(
        request.spot,
        request.sigma,
        request.tenor,
        request.n_paths,
        request.rate,
        request.div_yield,
        request.seed.or(config.default_seed),
    )?;

    tracing::info!(
        "Pricing Asian {} K = {} (S0 = {}, σ = {:.4}, T = {:.4}, r = {}, q = {}, n = {})",
        option.option_type,
        option.strike,
        params.spot(),
        params.sigma(),
        params.tenor(),
        params.rate(),
        params.div_yield(),
        params.n_paths()
    );

    let averages = config.simulator().simulate(&params)?;
    let result = estimate_price(params.rate(), params.tenor(), &option, &averages)?;

    tracing::info!(
        "Price {:.4} ± {:.4} (SE) over {} paths",
        result.price,
        result.std_error,
        result.n_paths
    );

    Ok(result)
}

/// Contract terms for pricing against live market data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketPricingRequest {
    pub ticker: String,
    pub option_type: OptionType,
    /// Years
    pub tenor: f64,
    pub strike: f64,
    pub rate: f64,
    pub n_paths: usize,
    pub seed: Option<u64>,
}

/// Market inputs and result of a market-driven pricing run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketPricing {
    pub spot: f64,
    pub div_yield: f64,
    pub vol: VolSelection,
    pub result: PricingResult,
}

/// Fetch spot, dividend yield and implied vol from `provider`, then price.
///
/// All market data is read before simulation starts. `today` anchors the
/// days-to-expiry used for volatility selection.
pub fn price_from_market<P: MarketDataProvider>(
    provider: &P,
    request: &MarketPricingRequest,
    config: &PricerConfig,
    today: NaiveDate,
) -> AsianResult<MarketPricing> {
    if request.n_paths < MIN_PATHS {
        return Err(AsianError::DegenerateSample {
            paths: request.n_paths,
        });
    }

    let (spot, div_yield) = provider.spot_and_dividend(&request.ticker)?;
    let snapshot = provider.option_chain_snapshot(&request.ticker)?;

    let vol = select_volatility(&snapshot, request.tenor, request.option_type, spot, today)?;
    tracing::info!(
        "{}: spot {}, q {:.4}, IV {:.4} from {} strike {}",
        request.ticker,
        spot,
        div_yield,
        vol.implied_vol,
        vol.expiry,
        vol.strike
    );

    let result = price_asian(
        &PricingRequest {
            spot,
            sigma: vol.implied_vol,
            tenor: request.tenor,
            strike: request.strike,
            rate: request.rate,
            div_yield,
            n_paths: request.n_paths,
            option_type: request.option_type,
            seed: request.seed,
        },
        config,
    )?;

    Ok(MarketPricing {
        spot,
        div_yield,
        vol,
        result,
    })
}
