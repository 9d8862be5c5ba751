//! Error types for Asian option pricing

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AsianError {
    /// Malformed user-supplied field. Carries the hint shown on re-prompt.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Market data unavailable: {0}")]
    MarketDataUnavailable(String),

    #[error("No future expiry dates found")]
    NoFutureExpiry,

    #[error("Option chain is empty ({side} for {expiry})")]
    EmptyChain { expiry: NaiveDate, side: &'static str },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Degenerate sample: {paths} path(s), at least 2 are needed for a standard error")]
    DegenerateSample { paths: usize },

    #[error("Network error: {0}")]
    Network(String),

    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type AsianResult<T> = Result<T, AsianError>;

impl AsianError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn market_data(msg: impl Into<String>) -> Self {
        Self::MarketDataUnavailable(msg.into())
    }

    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Missing quotes, expiries or chain sides
    pub fn is_market_data(&self) -> bool {
        matches!(
            self,
            Self::MarketDataUnavailable(_) | Self::NoFutureExpiry | Self::EmptyChain { .. }
        )
    }
}
