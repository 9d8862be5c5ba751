//! Implied volatility quotes
//!
//! A snapshot of an option chain reduced to what volatility selection needs:
//! per expiry, the (strike, implied vol) pairs for calls and puts.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::option::OptionType;

/// One quoted strike with its implied volatility
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolPoint {
    pub strike: f64,
    /// Annualised implied volatility (0.2 = 20%)
    pub implied_vol: f64,
}

impl VolPoint {
    pub fn new(strike: f64, implied_vol: f64) -> Self {
        Self { strike, implied_vol }
    }
}

/// Quotes for a single expiry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpiryQuotes {
    pub expiry: NaiveDate,
    /// Call quotes, in provider order
    pub calls: Vec<VolPoint>,
    /// Put quotes, in provider order
    pub puts: Vec<VolPoint>,
}

impl ExpiryQuotes {
    pub fn new(expiry: NaiveDate) -> Self {
        Self {
            expiry,
            calls: Vec::new(),
            puts: Vec::new(),
        }
    }

    pub fn with_calls(mut self, calls: Vec<VolPoint>) -> Self {
        self.calls = calls;
        self
    }

    pub fn with_puts(mut self, puts: Vec<VolPoint>) -> Self {
        self.puts = puts;
        self
    }

    /// Side of the chain matching an option type
    pub fn side(&self, option_type: OptionType) -> &[VolPoint] {
        match option_type {
            OptionType::Call => &self.calls,
            OptionType::Put => &self.puts,
        }
    }

    /// Calendar days from `today` to expiry (negative once expired)
    pub fn days_to_expiry(&self, today: NaiveDate) -> i64 {
        (self.expiry - today).num_days()
    }
}

/// Implied vol snapshot across all listed expiries.
///
/// Expiry order is kept exactly as received; volatility selection breaks
/// ties by this order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolQuoteSnapshot {
    pub underlying: String,
    pub expiries: Vec<ExpiryQuotes>,
    pub timestamp: DateTime<Utc>,
}

impl VolQuoteSnapshot {
    pub fn new(underlying: impl Into<String>) -> Self {
        Self {
            underlying: underlying.into(),
            expiries: Vec::new(),
            timestamp: Utc::now(),
        }
    }

    /// Append an expiry (no reordering)
    pub fn push(&mut self, quotes: ExpiryQuotes) {
        self.expiries.push(quotes);
    }

    pub fn is_empty(&self) -> bool {
        self.expiries.is_empty()
    }

    /// All expiry dates in snapshot order
    pub fn expiry_dates(&self) -> Vec<NaiveDate> {
        self.expiries.iter().map(|e| e.expiry).collect()
    }

    /// Quotes for an exact expiry date
    pub fn for_expiry(&self, expiry: NaiveDate) -> Option<&ExpiryQuotes> {
        self.expiries.iter().find(|e| e.expiry == expiry)
    }

    /// Total number of quoted strikes across both sides
    pub fn total_quotes(&self) -> usize {
        self.expiries.iter().map(|e| e.calls.len() + e.puts.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_snapshot_keeps_order() {
        let mut snapshot = VolQuoteSnapshot::new("SPY");
        snapshot.push(ExpiryQuotes::new(date(2025, 9, 19)));
        snapshot.push(ExpiryQuotes::new(date(2025, 6, 20)));

        assert_eq!(
            snapshot.expiry_dates(),
            vec![date(2025, 9, 19), date(2025, 6, 20)]
        );
        assert!(snapshot.for_expiry(date(2025, 6, 20)).is_some());
        assert!(snapshot.for_expiry(date(2025, 7, 18)).is_none());
    }

    #[test]
    fn test_sides_and_days() {
        let quotes = ExpiryQuotes::new(date(2025, 6, 20))
            .with_calls(vec![VolPoint::new(100.0, 0.2), VolPoint::new(105.0, 0.19)])
            .with_puts(vec![VolPoint::new(95.0, 0.25)]);

        assert_eq!(quotes.side(OptionType::Call).len(), 2);
        assert_eq!(quotes.side(OptionType::Put)[0].implied_vol, 0.25);
        assert_eq!(quotes.days_to_expiry(date(2025, 6, 10)), 10);
        assert_eq!(quotes.days_to_expiry(date(2025, 6, 25)), -5);

        let mut snapshot = VolQuoteSnapshot::new("SPY");
        snapshot.push(quotes);
        assert_eq!(snapshot.total_quotes(), 3);
    }
}
