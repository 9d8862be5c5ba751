//! User input validation
//!
//! Each field has a pure validator returning the parsed value or
//! [`AsianError::InvalidInput`] with the hint to show before asking again.
//! [`prompt_until_valid`] is the retry loop around them.

pub mod prompt;

pub use prompt::*;

use crate::core::{AsianError, AsianResult, OptionType};

fn round_to(x: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (x * scale).round() / scale
}

/// `call` or `put`, any case
pub fn parse_option_type(s: &str) -> AsianResult<OptionType> {
    s.parse()
}

/// Whole months, optionally suffixed with `month`/`months`
pub fn parse_tenor_months(s: &str) -> AsianResult<u32> {
    const HINT: &str = "Tenor should be input as an integer in months, e.g., 1/3/6/12.";

    let s = s.trim().to_lowercase();
    let s = s.trim_end_matches("months").trim_end_matches("month").trim();

    match s.parse::<u32>() {
        Ok(months) if months >= 1 => Ok(months),
        _ => Err(AsianError::invalid_input(HINT)),
    }
}

/// Tenor in years for a number of months
pub fn months_to_years(months: u32) -> f64 {
    months as f64 / 12.0
}

/// Positive strike, rounded to 5 decimals
pub fn parse_strike(s: &str) -> AsianResult<f64> {
    const HINT: &str = "Strike's value should be numeric, e.g., 100 or 150.53.";

    match s.trim().parse::<f64>() {
        Ok(k) if k.is_finite() && k > 0.0 => Ok(round_to(k, 5)),
        _ => Err(AsianError::invalid_input(HINT)),
    }
}

/// Risk-free rate as a fraction.
///
/// Accepts `3%`, `3 percent`, `0.03` or `3`; a bare number above 1 is read as
/// a percentage.
pub fn parse_rate(s: &str) -> AsianResult<f64> {
    let hint = || AsianError::invalid_input("Examples: 3%, 3, 0.03, 3 percent");

    let s: String = s.chars().filter(|c| !c.is_whitespace()).collect::<String>().to_lowercase();

    let percent = s
        .strip_suffix('%')
        .or_else(|| s.strip_suffix("percent"));

    if let Some(number) = percent {
        let x: f64 = number.parse().map_err(|_| hint())?;
        if !x.is_finite() {
            return Err(hint());
        }
        return Ok(round_to(x / 100.0, 5));
    }

    let x: f64 = s.parse().map_err(|_| hint())?;
    if !x.is_finite() {
        return Err(hint());
    }
    Ok(if x <= 1.0 { x } else { x / 100.0 })
}

/// Number of simulated paths, at least 2
pub fn parse_path_count(s: &str) -> AsianResult<usize> {
    let cleaned: String = s.trim().chars().filter(|c| *c != '_' && *c != ',').collect();

    match cleaned.parse::<usize>() {
        Ok(n) if n >= 2 => Ok(n),
        _ => Err(AsianError::invalid_input(
            "Path count should be an integer of at least 2, e.g., 10000.",
        )),
    }
}

/// Exchange ticker, upper-cased
pub fn parse_ticker(s: &str) -> AsianResult<String> {
    let s = s.trim();
    let valid = !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^' | '='));

    if valid {
        Ok(s.to_uppercase())
    } else {
        Err(AsianError::invalid_input("Ticker should look like AAPL, BRK-B or ^SPX."))
    }
}
