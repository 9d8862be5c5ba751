//! Implied volatility selection
//!
//! Picks the single market implied vol used to simulate an Asian option:
//! the expiry closest in tenor, then the strike closest to spot on the
//! matching side of that expiry's chain.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::core::{AsianError, AsianResult, OptionType, VolQuoteSnapshot};

/// Day count used to convert days-to-expiry into years
pub const DAYS_PER_YEAR: f64 = 365.0;

/// The quote chosen by [`select_volatility`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolSelection {
    pub expiry: NaiveDate,
    /// Time to the chosen expiry in years
    pub expiry_tenor: f64,
    pub strike: f64,
    pub implied_vol: f64,
}

/// Select the implied volatility closest to `tenor` and at-the-money.
///
/// Expiries on or before `today` are ignored. Tenor distance is measured in
/// days, so expiries equally many days either side of the target tie exactly.
/// Ties in either tenor or strike distance go to the first candidate in
/// snapshot order.
///
/// # Errors
///
/// - [`AsianError::NoFutureExpiry`] if no expiry lies strictly after `today`
/// - [`AsianError::EmptyChain`] if the chosen expiry has no quotes on the
///   side matching `option_type`
pub fn select_volatility(
    snapshot: &VolQuoteSnapshot,
    tenor: f64,
    option_type: OptionType,
    spot: f64,
    today: NaiveDate,
) -> AsianResult<VolSelection> {
    let target_days = snap_to_half_day(tenor * DAYS_PER_YEAR);
    let mut best: Option<(usize, f64, f64)> = None; // (index, tenor_i, diff in days)

    for (i, quotes) in snapshot.expiries.iter().enumerate() {
        let days = quotes.days_to_expiry(today);
        if days <= 0 {
            continue;
        }
        let tenor_i = days as f64 / DAYS_PER_YEAR;
        let diff = (target_days - days as f64).abs();

        // Strict comparison keeps the first of equally close expiries
        if best.map_or(true, |(_, _, best_diff)| diff < best_diff) {
            best = Some((i, tenor_i, diff));
        }
    }

    let (index, expiry_tenor, _) = best.ok_or(AsianError::NoFutureExpiry)?;
    let quotes = &snapshot.expiries[index];

    let side = quotes.side(option_type);
    let mut nearest = side.first().ok_or(AsianError::EmptyChain {
        expiry: quotes.expiry,
        side: option_type.chain_side(),
    })?;
    for point in &side[1..] {
        if (point.strike - spot).abs() < (nearest.strike - spot).abs() {
            nearest = point;
        }
    }

    tracing::debug!(
        "Selected {} IV {:.4} at strike {} for expiry {} ({:.4}y vs target {:.4}y)",
        option_type,
        nearest.implied_vol,
        nearest.strike,
        quotes.expiry,
        expiry_tenor,
        tenor
    );

    Ok(VolSelection {
        expiry: quotes.expiry,
        expiry_tenor,
        strike: nearest.strike,
        implied_vol: nearest.implied_vol,
    })
}

/// Target expiry in days, with float noise around whole and half days removed
fn snap_to_half_day(days: f64) -> f64 {
    let halves = (days * 2.0).round();
    if (days * 2.0 - halves).abs() < 1e-9 {
        halves / 2.0
    } else {
        days
    }
}

/// [`select_volatility`] relative to today's local date
pub fn select_volatility_today(
    snapshot: &VolQuoteSnapshot,
    tenor: f64,
    option_type: OptionType,
    spot: f64,
) -> AsianResult<VolSelection> {
    select_volatility(snapshot, tenor, option_type, spot, Local::now().date_naive())
}
