//! Market data access
//!
//! The pricer needs three things from the market: a spot price, a dividend
//! yield and an implied volatility snapshot. Any source providing them
//! implements [`MarketDataProvider`].

use crate::core::{AsianError, AsianResult, VolQuoteSnapshot};

/// Source of spot, dividend yield and implied vol quotes
pub trait MarketDataProvider {
    /// Last spot price. Fails if no positive quote is available.
    fn spot_price(&self, ticker: &str) -> AsianResult<f64>;

    /// Continuous dividend yield as a fraction; 0 when not reported.
    fn dividend_yield(&self, ticker: &str) -> AsianResult<f64>;

    /// Spot price and dividend yield together, as `(spot, yield)`.
    ///
    /// Sources that serve both from one quote should override this so the
    /// pair comes from a single fetch.
    fn spot_and_dividend(&self, ticker: &str) -> AsianResult<(f64, f64)> {
        let div_yield = self.dividend_yield(ticker)?;
        Ok((self.spot_price(ticker)?, div_yield))
    }

    /// Implied vol quotes for all listed expiries. Fails if there are none.
    fn option_chain_snapshot(&self, ticker: &str) -> AsianResult<VolQuoteSnapshot>;
}

impl<P: MarketDataProvider + ?Sized> MarketDataProvider for &P {
    fn spot_price(&self, ticker: &str) -> AsianResult<f64> {
        (**self).spot_price(ticker)
    }

    fn dividend_yield(&self, ticker: &str) -> AsianResult<f64> {
        (**self).dividend_yield(ticker)
    }

    fn spot_and_dividend(&self, ticker: &str) -> AsianResult<(f64, f64)> {
        (**self).spot_and_dividend(ticker)
    }

    fn option_chain_snapshot(&self, ticker: &str) -> AsianResult<VolQuoteSnapshot> {
        (**self).option_chain_snapshot(ticker)
    }
}

impl<P: MarketDataProvider + ?Sized> MarketDataProvider for Box<P> {
    fn spot_price(&self, ticker: &str) -> AsianResult<f64> {
        (**self).spot_price(ticker)
    }

    fn dividend_yield(&self, ticker: &str) -> AsianResult<f64> {
        (**self).dividend_yield(ticker)
    }

    fn spot_and_dividend(&self, ticker: &str) -> AsianResult<(f64, f64)> {
        (**self).spot_and_dividend(ticker)
    }

    fn option_chain_snapshot(&self, ticker: &str) -> AsianResult<VolQuoteSnapshot> {
        (**self).option_chain_snapshot(ticker)
    }
}

/// Fixed in-memory market data, for tests and offline runs
#[derive(Debug, Clone)]
pub struct StaticMarketData {
    pub spot: Option<f64>,
    pub dividend_yield: Option<f64>,
    pub snapshot: VolQuoteSnapshot,
}

impl StaticMarketData {
    pub fn new(spot: f64, snapshot: VolQuoteSnapshot) -> Self {
        Self {
            spot: Some(spot),
            dividend_yield: None,
            snapshot,
        }
    }

    pub fn with_dividend_yield(mut self, q: f64) -> Self {
        self.dividend_yield = Some(q);
        self
    }
}

impl MarketDataProvider for StaticMarketData {
    fn spot_price(&self, ticker: &str) -> AsianResult<f64> {
        match self.spot {
            Some(s) if s.is_finite() && s > 0.0 => Ok(s),
            _ => Err(AsianError::market_data(format!("No data found for {}", ticker))),
        }
    }

    fn dividend_yield(&self, _ticker: &str) -> AsianResult<f64> {
        Ok(self.dividend_yield.unwrap_or(0.0).max(0.0))
    }

    fn option_chain_snapshot(&self, _ticker: &str) -> AsianResult<VolQuoteSnapshot> {
        if self.snapshot.is_empty() {
            return Err(AsianError::market_data("Options expiry data not available"));
        }
        Ok(self.snapshot.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ExpiryQuotes;
    use chrono::NaiveDate;

    fn snapshot() -> VolQuoteSnapshot {
        let mut s = VolQuoteSnapshot::new("TEST");
        s.push(ExpiryQuotes::new(NaiveDate::from_ymd_opt(2030, 1, 18).unwrap()));
        s
    }

    #[test]
    fn test_static_provider() {
        let provider = StaticMarketData::new(101.5, snapshot());

        assert_eq!(provider.spot_price("TEST").unwrap(), 101.5);
        assert_eq!(provider.dividend_yield("TEST").unwrap(), 0.0);
        assert_eq!(provider.option_chain_snapshot("TEST").unwrap().expiries.len(), 1);

        let provider = provider.with_dividend_yield(0.012);
        assert_eq!(provider.dividend_yield("TEST").unwrap(), 0.012);
        assert_eq!(provider.spot_and_dividend("TEST").unwrap(), (101.5, 0.012));
    }

    #[test]
    fn test_missing_data_is_fatal() {
        let mut provider = StaticMarketData::new(0.0, VolQuoteSnapshot::new("TEST"));

        assert!(provider.spot_price("TEST").unwrap_err().is_market_data());
        assert!(provider.option_chain_snapshot("TEST").unwrap_err().is_market_data());

        provider.spot = None;
        assert!(provider.spot_price("TEST").is_err());
    }

    #[test]
    fn test_boxed_provider() {
        let provider: Box<dyn MarketDataProvider> = Box::new(StaticMarketData::new(50.0, snapshot()));
        assert_eq!(provider.spot_price("X").unwrap(), 50.0);
        assert_eq!(provider.spot_and_dividend("X").unwrap(), (50.0, 0.0));
    }
}
