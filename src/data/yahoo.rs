//! Yahoo Finance data fetcher
//!
//! Fetches spot, dividend yield and option chain implied vols using
//! Yahoo Finance's unofficial API.
//!
//! Note: This is for educational/research purposes. Yahoo Finance
//! data is delayed ~15 minutes and intended for personal use.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::provider::MarketDataProvider;
use crate::core::{AsianError, AsianResult, ExpiryQuotes, VolPoint, VolQuoteSnapshot};

/// Yahoo Finance API client
pub struct YahooClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl YahooClient {
    pub fn new() -> AsianResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .map_err(|e| AsianError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: "https://query1.finance.yahoo.com/v7/finance".to_string(),
        })
    }

    /// Point the client at a different API root (mirrors, proxies)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn get_json<T: for<'de> Deserialize<'de>>(&self, url: &str, what: &str) -> AsianResult<T> {
        self.client
            .get(url)
            .send()
            .map_err(|e| AsianError::network(e.to_string()))?
            .json()
            .map_err(|e| AsianError::serialization(format!("Failed to parse {}: {}", what, e)))
    }

    /// Get current quote for a symbol
    pub fn get_quote(&self, symbol: &str) -> AsianResult<SpotQuote> {
        let url = format!("{}/quote?symbols={}", self.base_url, symbol);
        let response: YahooQuoteResponse = self.get_json(&url, "quote")?;

        let result = response
            .quote_response
            .result
            .into_iter()
            .next()
            .ok_or_else(|| AsianError::market_data(format!("No data found for {}", symbol)))?;

        let price = result
            .regular_market_price
            .filter(|p| p.is_finite() && *p > 0.0)
            .ok_or_else(|| AsianError::market_data(format!("No price quoted for {}", symbol)))?;

        Ok(SpotQuote {
            symbol: symbol.to_string(),
            price: round_to(price, 5),
            // Yahoo reports the yield in percent
            dividend_yield: result.dividend_yield.map(|q| q / 100.0).unwrap_or(0.0),
            timestamp: Utc::now(),
        })
    }

    /// Get available option expiration dates, in the order Yahoo lists them
    pub fn get_expirations(&self, symbol: &str) -> AsianResult<Vec<NaiveDate>> {
        let url = format!("{}/options/{}", self.base_url, symbol);
        let response: YahooOptionsResponse = self.get_json(&url, "options")?;

        let chain = response
            .option_chain
            .result
            .into_iter()
            .next()
            .ok_or_else(|| AsianError::market_data("No options data returned"))?;

        let expiries: Vec<NaiveDate> = chain
            .expiration_dates
            .iter()
            .filter_map(|&ts| DateTime::from_timestamp(ts, 0).map(|dt| dt.date_naive()))
            .collect();

        Ok(expiries)
    }

    /// Get implied vols for a specific expiration
    pub fn get_option_chain(&self, symbol: &str, expiry: NaiveDate) -> AsianResult<ExpiryQuotes> {
        let expiry_ts = expiry
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| AsianError::invalid_parameter(format!("Bad expiry {}", expiry)))?
            .and_utc()
            .timestamp();

        let url = format!("{}/options/{}?date={}", self.base_url, symbol, expiry_ts);
        let response: YahooOptionsResponse = self.get_json(&url, "options")?;

        let chain_data = response
            .option_chain
            .result
            .into_iter()
            .next()
            .ok_or_else(|| AsianError::market_data("No options data returned"))?;

        let mut quotes = ExpiryQuotes::new(expiry);
        if let Some(options) = chain_data.options.first() {
            quotes.calls = options.calls.iter().filter_map(convert_vol_point).collect();
            quotes.puts = options.puts.iter().filter_map(convert_vol_point).collect();
        }

        Ok(quotes)
    }

    /// Implied vol snapshot across all expirations
    pub fn get_snapshot(&self, symbol: &str) -> AsianResult<VolQuoteSnapshot> {
        let expiries = self.get_expirations(symbol)?;
        if expiries.is_empty() {
            return Err(AsianError::market_data("Options expiry data not available"));
        }

        tracing::info!("Fetching {} option chains for {}", expiries.len(), symbol);

        let mut snapshot = VolQuoteSnapshot::new(symbol);
        for expiry in expiries {
            match self.get_option_chain(symbol, expiry) {
                Ok(quotes) => snapshot.push(quotes),
                Err(e) => {
                    tracing::warn!("Failed to get chain for {}: {}", expiry, e);
                }
            }
        }

        if snapshot.is_empty() {
            return Err(AsianError::market_data(format!(
                "No option chains could be fetched for {}",
                symbol
            )));
        }

        Ok(snapshot)
    }
}

impl MarketDataProvider for YahooClient {
    fn spot_price(&self, ticker: &str) -> AsianResult<f64> {
        Ok(self.get_quote(ticker)?.price)
    }

    fn dividend_yield(&self, ticker: &str) -> AsianResult<f64> {
        Ok(self.get_quote(ticker)?.dividend_yield)
    }

    fn spot_and_dividend(&self, ticker: &str) -> AsianResult<(f64, f64)> {
        let quote = self.get_quote(ticker)?;
        Ok((quote.price, quote.dividend_yield))
    }

    fn option_chain_snapshot(&self, ticker: &str) -> AsianResult<VolQuoteSnapshot> {
        self.get_snapshot(ticker)
    }
}

/// Spot price quote
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotQuote {
    pub symbol: String,
    pub price: f64,
    /// Fraction, 0 when not reported
    pub dividend_yield: f64,
    pub timestamp: DateTime<Utc>,
}

fn round_to(x: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (x * scale).round() / scale
}

/// Keep only rows with both a strike and a usable implied vol
fn convert_vol_point(data: &YahooOptionData) -> Option<VolPoint> {
    let strike = data.strike?;
    let iv = data.implied_volatility.filter(|v| v.is_finite() && *v >= 0.0)?;
    Some(VolPoint::new(strike, iv))
}

// Yahoo Finance API response structures

#[derive(Debug, Deserialize)]
struct YahooQuoteResponse {
    #[serde(rename = "quoteResponse")]
    quote_response: YahooQuoteResult,
}

#[derive(Debug, Deserialize)]
struct YahooQuoteResult {
    result: Vec<YahooQuoteData>,
}

#[derive(Debug, Deserialize)]
struct YahooQuoteData {
    #[serde(rename = "regularMarketPrice")]
    regular_market_price: Option<f64>,
    #[serde(rename = "dividendYield")]
    dividend_yield: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct YahooOptionsResponse {
    #[serde(rename = "optionChain")]
    option_chain: YahooOptionChain,
}

#[derive(Debug, Deserialize)]
struct YahooOptionChain {
    result: Vec<YahooOptionChainData>,
}

#[derive(Debug, Deserialize)]
struct YahooOptionChainData {
    #[serde(rename = "expirationDates", default)]
    expiration_dates: Vec<i64>,
    #[serde(default)]
    options: Vec<YahooOptions>,
}

#[derive(Debug, Deserialize)]
struct YahooOptions {
    #[serde(default)]
    calls: Vec<YahooOptionData>,
    #[serde(default)]
    puts: Vec<YahooOptionData>,
}

#[derive(Debug, Deserialize)]
struct YahooOptionData {
    strike: Option<f64>,
    #[serde(rename = "impliedVolatility")]
    implied_volatility: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_options_payload() {
        let json = r#"{
            "optionChain": {
                "result": [{
                    "expirationDates": [1750377600, 1752796800],
                    "quote": {"regularMarketPrice": 530.1},
                    "options": [{
                        "calls": [
                            {"strike": 525.0, "impliedVolatility": 0.18, "bid": 9.1},
                            {"strike": 530.0},
                            {"strike": 535.0, "impliedVolatility": 0.17}
                        ],
                        "puts": [
                            {"strike": 525.0, "impliedVolatility": 0.21}
                        ]
                    }]
                }]
            }
        }"#;

        let response: YahooOptionsResponse = serde_json::from_str(json).unwrap();
        let data = &response.option_chain.result[0];
        assert_eq!(data.expiration_dates.len(), 2);

        let calls: Vec<VolPoint> = data.options[0].calls.iter().filter_map(convert_vol_point).collect();
        assert_eq!(calls, vec![VolPoint::new(525.0, 0.18), VolPoint::new(535.0, 0.17)]);
    }

    #[test]
    fn test_parse_quote_payload() {
        let json = r#"{"quoteResponse": {"result": [
            {"regularMarketPrice": 187.123456, "dividendYield": 0.55}
        ]}}"#;

        let response: YahooQuoteResponse = serde_json::from_str(json).unwrap();
        let data = &response.quote_response.result[0];
        assert_eq!(data.regular_market_price, Some(187.123456));
        assert_eq!(data.dividend_yield, Some(0.55));
        assert_eq!(round_to(187.123456, 5), 187.12346);
    }

    #[test]
    #[ignore] // Requires network
    fn test_get_quote() {
        let client = YahooClient::new().unwrap();
        let quote = client.get_quote("SPY").unwrap();

        assert!(quote.price > 0.0);
        println!("SPY price: {}, q = {}", quote.price, quote.dividend_yield);
    }

    #[test]
    #[ignore] // Requires network
    fn test_get_snapshot() {
        let client = YahooClient::new().unwrap();
        let snapshot = client.get_snapshot("SPY").unwrap();

        println!(
            "SPY: {} expiries, {} quotes",
            snapshot.expiries.len(),
            snapshot.total_quotes()
        );
        assert!(!snapshot.is_empty());
    }
}
