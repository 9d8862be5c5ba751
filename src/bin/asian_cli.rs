//! Asian Options CLI
//!
//! Prompts for the contract, pulls spot, dividend yield and implied vol from
//! Yahoo Finance, and prints the Monte Carlo price.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Local;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use asian_options::input::{
    months_to_years, parse_option_type, parse_path_count, parse_rate, parse_strike,
    parse_tenor_months, parse_ticker, prompt_until_valid,
};
use asian_options::prelude::*;

#[derive(Debug, Parser)]
#[command(name = "asian_cli", about = "Monte Carlo pricer for arithmetic Asian options")]
struct Args {
    /// JSON config file (pricer and cache settings)
    #[arg(long)]
    config: Option<PathBuf>,

    /// RNG seed, overrides the configured default
    #[arg(long)]
    seed: Option<u64>,

    /// Simulate paths on all cores
    #[arg(long)]
    parallel: bool,

    /// Always fetch fresh option chains
    #[arg(long)]
    no_cache: bool,

    /// Underlying ticker (prompted for when omitted)
    #[arg(long)]
    ticker: Option<String>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> AsianResult<()> {
    let mut config = match &args.config {
        Some(path) => AppConfig::from_json_file(path)?,
        None => AppConfig::default(),
    };
    if args.parallel {
        config.pricer.execution = Execution::Parallel;
    }
    if args.no_cache {
        config.cache.enabled = false;
    }

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut out = io::stdout();

    let ticker = match &args.ticker {
        Some(t) => parse_ticker(t)?,
        None => prompt_until_valid(&mut reader, &mut out, "Input the stock ticker: ", parse_ticker)?,
    };
    let request = read_contract(&mut reader, &mut out, ticker, args.seed)?;

    let provider = CachedProvider::new(YahooClient::new()?, config.cache.clone())?;
    let priced = price_from_market(&provider, &request, &config.pricer, Local::now().date_naive())?;

    let rule = "-".repeat(50);
    writeln!(out, "{}", rule)?;
    writeln!(
        out,
        "\n {} spot {:.4}, dividend yield {:.4}, implied vol {:.4} ({} strike {})",
        request.ticker,
        priced.spot,
        priced.div_yield,
        priced.vol.implied_vol,
        priced.vol.expiry,
        priced.vol.strike
    )?;
    for line in priced.result.to_string().lines() {
        writeln!(out, "\n {}", line)?;
    }
    writeln!(out, "{}", rule)?;

    Ok(())
}

fn read_contract<R: BufRead, W: Write>(
    reader: &mut R,
    out: &mut W,
    ticker: String,
    seed: Option<u64>,
) -> AsianResult<MarketPricingRequest> {
    let option_type = prompt_until_valid(reader, out, "Choose option's type (call/put): ", parse_option_type)?;
    let months = prompt_until_valid(
        reader,
        out,
        "Choose option's time to expiration in months: ",
        parse_tenor_months,
    )?;
    let strike = prompt_until_valid(reader, out, "Choose option's strike price: ", parse_strike)?;
    let rate = prompt_until_valid(reader, out, "Choose risk-free rate (e.g. 3%): ", parse_rate)?;
    let n_paths = prompt_until_valid(
        reader,
        out,
        "Input the number of stock price paths simulations as an integer: ",
        parse_path_count,
    )?;

    Ok(MarketPricingRequest {
        ticker,
        option_type,
        tenor: months_to_years(months),
        strike,
        rate,
        n_paths,
        seed,
    })
}
