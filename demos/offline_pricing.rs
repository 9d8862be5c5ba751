//! Example: Asian option pricing against a fixed vol snapshot
//!
//! Run with: cargo run --release --example offline_pricing

use asian_options::prelude::*;
use chrono::{Duration, Local};

fn main() -> AsianResult<()> {
    let today = Local::now().date_naive();

    // Hand-built snapshot: three expiries, a few strikes each
    let mut snapshot = VolQuoteSnapshot::new("DEMO");
    for (days, base_vol) in [(10, 0.24), (40, 0.22), (95, 0.21)] {
        let smile: Vec<VolPoint> = [90.0, 100.0, 110.0]
            .iter()
            .map(|&k| VolPoint::new(k, base_vol + 0.001 * (100.0 - k)))
            .collect();
        snapshot.push(
            ExpiryQuotes::new(today + Duration::days(days))
                .with_calls(smile.clone())
                .with_puts(smile),
        );
    }
    let provider = StaticMarketData::new(101.0, snapshot).with_dividend_yield(0.01);

    let request = MarketPricingRequest {
        ticker: "DEMO".to_string(),
        option_type: OptionType::Call,
        tenor: 3.0 / 12.0,
        strike: 100.0,
        rate: 0.03,
        n_paths: 50_000,
        seed: Some(42),
    };

    println!("=== Asian Call, 3 months ===\n");
    let priced = price_from_market(&provider, &request, &PricerConfig::fast(), today)?;
    println!("Spot:       {:.2}", priced.spot);
    println!("Div yield:  {:.2}%", priced.div_yield * 100.0);
    println!(
        "Vol:        {:.2}% ({} strike {})\n",
        priced.vol.implied_vol * 100.0,
        priced.vol.expiry,
        priced.vol.strike
    );
    println!("{}", priced.result);

    // Geometric average is a lower bound for the arithmetic call
    let geometric = geometric_asian_price(
        priced.spot,
        request.strike,
        request.rate,
        priced.div_yield,
        priced.vol.implied_vol,
        request.tenor,
        OptionType::Call,
    )?;
    println!("\nGeometric-average closed form: {:.4}", geometric);

    // Wider interval on demand
    let ci = priced.result.confidence_interval(0.999)?;
    println!("99.9% CI: [{:.4}, {:.4}]", ci.low, ci.high);

    Ok(())
}
