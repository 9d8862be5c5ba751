//! Option definitions
//!
//! An Asian option here is fixed-strike, European-style: the payoff is
//! computed once at expiry from the arithmetic average of the monitored prices.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::{AsianError, AsianResult};

/// Option type (Call or Put)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    /// Payoff direction: +1 for call, -1 for put
    pub fn phi(&self) -> f64 {
        match self {
            OptionType::Call => 1.0,
            OptionType::Put => -1.0,
        }
    }

    /// Undiscounted payoff against the given underlying level (spot or average)
    pub fn intrinsic(&self, underlying: f64, strike: f64) -> f64 {
        match self {
            OptionType::Call => (underlying - strike).max(0.0),
            OptionType::Put => (strike - underlying).max(0.0),
        }
    }

    /// Which side of an option chain quotes this type
    pub fn chain_side(&self) -> &'static str {
        match self {
            OptionType::Call => "calls",
            OptionType::Put => "puts",
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "call"),
            OptionType::Put => write!(f, "put"),
        }
    }
}

impl FromStr for OptionType {
    type Err = AsianError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "call" => Ok(OptionType::Call),
            "put" => Ok(OptionType::Put),
            _ => Err(AsianError::invalid_input(
                "Option's type should be either 'call' or 'put'.",
            )),
        }
    }
}

/// Asian option contract terms
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionSpec {
    pub option_type: OptionType,
    pub strike: f64,
}

impl OptionSpec {
    pub fn new(option_type: OptionType, strike: f64) -> AsianResult<Self> {
        if !(strike.is_finite() && strike > 0.0) {
            return Err(AsianError::invalid_parameter(format!(
                "strike must be positive, got {}",
                strike
            )));
        }
        Ok(Self { option_type, strike })
    }

    pub fn call(strike: f64) -> AsianResult<Self> {
        Self::new(OptionType::Call, strike)
    }

    pub fn put(strike: f64) -> AsianResult<Self> {
        Self::new(OptionType::Put, strike)
    }

    /// Undiscounted payoff for a path average
    pub fn payoff(&self, average: f64) -> f64 {
        self.option_type.intrinsic(average, self.strike)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_type() {
        assert_eq!(OptionType::Call.phi(), 1.0);
        assert_eq!(OptionType::Put.phi(), -1.0);

        assert_eq!(OptionType::Call.intrinsic(110.0, 100.0), 10.0);
        assert_eq!(OptionType::Put.intrinsic(90.0, 100.0), 10.0);
        assert_eq!(OptionType::Call.intrinsic(90.0, 100.0), 0.0);
    }

    #[test]
    fn test_parse_option_type() {
        assert_eq!(" Call ".parse::<OptionType>().unwrap(), OptionType::Call);
        assert_eq!("PUT".parse::<OptionType>().unwrap(), OptionType::Put);
        assert!(matches!(
            "straddle".parse::<OptionType>(),
            Err(AsianError::InvalidInput(_))
        ));
        assert_eq!(OptionType::Put.to_string(), "put");
    }

    #[test]
    fn test_option_spec() {
        let call = OptionSpec::call(100.0).unwrap();
        assert_eq!(call.payoff(104.5), 4.5);
        assert_eq!(OptionSpec::put(100.0).unwrap().payoff(104.5), 0.0);

        assert!(OptionSpec::call(0.0).is_err());
        assert!(OptionSpec::put(-5.0).is_err());
        assert!(OptionSpec::call(f64::NAN).is_err());
    }
}
