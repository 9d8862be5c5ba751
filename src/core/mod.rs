//! Core data types for Asian option pricing
//!
//! Defines fundamental types:
//! - OptionType / OptionSpec: call or put, fixed strike
//! - SimulationParameters: validated GBM inputs
//! - VolQuoteSnapshot: implied vol quotes per expiry
//! - PricingResult: price, standard error, confidence intervals

pub mod option;
pub mod params;
pub mod quote;
pub mod result;
pub mod error;

pub use option::*;
pub use params::*;
pub use quote::*;
pub use result::*;
pub use error::*;
