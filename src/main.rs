//! `pricer` - command-line front end for pricing-lib
//!
//! # Commands
//!
//! - `pricer price ...` - price a single option, optionally with Greeks
//! - `pricer batch --input <csv> --output <csv>` - price every row of a CSV file
//! - `pricer bench` - measure pricing throughput on synthetic inputs

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pricing_lib::batch::run_batch;
use pricing_lib::benchmark::{run_suite, BenchmarkResult};
use pricing_lib::{
    EuropeanOption, MarketData, ModelKind, OptionType, PricerConfig, PricingError, PricingResult,
};

/// Black-Scholes option pricer
#[derive(Parser)]
#[command(name = "pricer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (TOML)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a single option
    Price {
        /// Option type (call|put)
        #[arg(short = 't', long = "type", value_parser = parse_option_type)]
        option_type: OptionType,

        /// Spot price of the underlying asset
        #[arg(long, allow_negative_numbers = true)]
        spot: f64,

        /// Strike price
        #[arg(long, allow_negative_numbers = true)]
        strike: f64,

        /// Risk-free rate (annual, continuously compounded)
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        rate: f64,

        /// Volatility (annual)
        #[arg(long, allow_negative_numbers = true)]
        vol: f64,

        /// Time to expiration (years)
        #[arg(long, allow_negative_numbers = true)]
        maturity: f64,

        /// Calculate and display Greeks
        #[arg(long)]
        with_greeks: bool,

        /// Pricing model (overrides the config file)
        #[arg(long, value_enum)]
        model: Option<ModelKind>,
    },

    /// Price every row of a CSV file (header: type,spot,strike,rate,vol,maturity)
    Batch {
        /// Input CSV file
        #[arg(short, long)]
        input: String,

        /// Output CSV file
        #[arg(short, long)]
        output: String,

        /// Include Greeks in output
        #[arg(long)]
        with_greeks: bool,

        /// Decimal places for computed values
        #[arg(long)]
        precision: Option<usize>,

        /// Pricing model (overrides the config file)
        #[arg(long, value_enum)]
        model: Option<ModelKind>,
    },

    /// Measure pricing throughput
    Bench {
        /// Comma-separated run sizes, e.g. 100,1000,10000
        #[arg(long, value_delimiter = ',')]
        sizes: Option<Vec<usize>>,

        /// Random seed for the synthetic inputs
        #[arg(long)]
        seed: Option<u64>,

        /// Use the deterministic input grid instead of random draws
        #[arg(long)]
        grid: bool,
    },
}

fn parse_option_type(s: &str) -> std::result::Result<OptionType, String> {
    s.parse().map_err(|e: PricingError| e.to_string())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}\n", e);
            eprintln!("Run 'pricer --help' for usage.");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => PricerConfig::from_file(path)?,
        None => PricerConfig::default(),
    };

    init_tracing(&config, cli.verbose);
    debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Price {
            option_type,
            spot,
            strike,
            rate,
            vol,
            maturity,
            with_greeks,
            model,
        } => {
            let model = model.unwrap_or(config.model).build();
            let option = EuropeanOption::new(option_type, strike, maturity)
                .context("invalid option parameters")?;
            let market =
                MarketData::new(spot, rate, vol).context("invalid market parameters")?;

            let result = model.evaluate(&option, &market, with_greeks);
            print_result(&option, &market, &result, config.batch.precision);
            Ok(())
        }
        Commands::Batch {
            input,
            output,
            with_greeks,
            precision,
            model,
        } => {
            let model = model.unwrap_or(config.model).build();
            let mut batch = config.batch.clone();
            batch.with_greeks |= with_greeks;
            if let Some(precision) = precision {
                batch.precision = precision;
            }

            let summary = run_batch(model.as_ref(), &input, &output, &batch)?;
            println!(
                "Processed {} options ({} skipped). Results written to {}",
                summary.total, summary.skipped, output
            );
            Ok(())
        }
        Commands::Bench { sizes, seed, grid } => {
            let mut bench = config.benchmark.clone();
            if let Some(sizes) = sizes {
                bench.sizes = sizes;
            }
            if seed.is_some() {
                bench.seed = seed;
            }
            if bench.sizes.iter().any(|&n| n == 0) {
                anyhow::bail!("benchmark sizes must be positive");
            }

            let model = config.model.build();
            info!(model = model.name(), sizes = ?bench.sizes, grid, "running benchmark");
            let results = run_suite(model.as_ref(), &bench, grid)?;
            print_benchmark(&results, &bench);
            Ok(())
        }
    }
}

fn init_tracing(config: &PricerConfig, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level))
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn print_result(option: &EuropeanOption, market: &MarketData, result: &PricingResult, p: usize) {
    let kind = match option.option_type() {
        OptionType::Call => "Call",
        OptionType::Put => "Put",
    };

    println!("\n=== Option Pricing Result ===");
    println!("Option Type: {}", kind);
    println!("Spot Price: {:.*}", p, market.spot());
    println!("Strike Price: {:.*}", p, option.strike());
    println!("Risk-Free Rate: {:.*}", p, market.risk_free_rate());
    println!("Volatility: {:.*}", p, market.volatility());
    println!("Time to Expiration: {:.*} years", p, option.time_to_expiration());
    println!("--------------------------------");
    println!("Option Price: {:.*}", p, result.price());

    if let Some(g) = result.greeks() {
        println!("\n--- Greeks ---");
        println!("Delta: {:.*}", p, g.delta);
        println!("Gamma: {:.*}", p, g.gamma);
        println!("Vega:  {:.*}", p, g.vega);
        println!("Theta: {:.*}", p, g.theta);
        println!("Rho:   {:.*}", p, g.rho);
    }

    println!("==============================\n");
}

fn print_benchmark(results: &[BenchmarkResult], config: &pricing_lib::BenchmarkConfig) {
    println!("=== Option Pricing Benchmark ===\n");

    for with_greeks in [false, true] {
        if with_greeks {
            println!("\nTesting pricing with Greeks:");
        } else {
            println!("Testing pricing without Greeks:");
        }
        println!("--------------------------------------------------");
        println!("{:>10}{:>15}{:>20}", "Options", "Time (s)", "Ops/sec");
        println!("--------------------------------------------------");
        for r in results.iter().filter(|r| r.with_greeks == with_greeks) {
            println!(
                "{:>10}{:>15.6}{:>20.2}",
                r.count,
                r.elapsed.as_secs_f64(),
                r.ops_per_second
            );
        }
    }

    println!(
        "\nRequirement: {} options in < {:.1} s ({:.0} ops/sec)",
        config.target_ops,
        config.target_seconds,
        config.target_ops_per_second()
    );
    for r in results.iter().filter(|r| r.count >= config.target_ops) {
        let label = if r.with_greeks { "with Greeks" } else { "price only" };
        let verdict = if r.meets_target(config) { "PASSED" } else { "FAILED" };
        println!("  {:>6} x {:<12} {}", r.count, label, verdict);
    }

    println!("\n=== Benchmark Complete ===");
}
