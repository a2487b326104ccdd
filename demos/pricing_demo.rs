// demos/pricing_demo.rs

//! Demonstration of single-option pricing, Greeks and CSV batch processing
//!
//! This example shows how to:
//! 1. Price one option with and without Greeks
//! 2. Inspect the boundary regimes (expiry, zero volatility)
//! 3. Run the sample CSV through the batch pipeline

use anyhow::Result;
use pricing_lib::batch::run_batch;
use pricing_lib::models::bs::BlackScholesModel;
use pricing_lib::{default_configs, price_option, OptionType};

fn main() -> Result<()> {
    println!("Black-Scholes Pricing Demo");
    println!("==========================");

    println!("\nStep 1: Single option (S=100, K=105, r=5%, σ=20%, T=0.5y)");
    for option_type in [OptionType::Call, OptionType::Put] {
        let result = price_option(option_type, 105.0, 0.5, 100.0, 0.05, 0.2, true)?;
        println!("  {:<4} price = {:.6}", option_type, result.price());
        if let Some(g) = result.greeks() {
            println!(
                "       delta = {:+.6}  gamma = {:.6}  vega = {:.6}  theta = {:+.6}  rho = {:+.6}",
                g.delta, g.gamma, g.vega, g.theta, g.rho
            );
        }
    }

    println!("\nStep 2: Boundary regimes");
    let expiry = price_option(OptionType::Call, 100.0, 0.0, 110.0, 0.05, 0.2, true)?;
    println!(
        "  call at expiry:      price = {:.6}, delta = {}",
        expiry.price(),
        expiry.greeks().map(|g| g.delta).unwrap_or_default()
    );
    let flat = price_option(OptionType::Call, 100.0, 0.5, 110.0, 0.05, 0.0, false)?;
    println!("  call with σ = 0:     price = {:.6}", flat.price());

    match price_option(OptionType::Put, -1.0, 0.5, 100.0, 0.05, 0.2, false) {
        Ok(_) => println!("  unexpected: negative strike accepted"),
        Err(e) => println!("  negative strike:     {}", e),
    }

    println!("\nStep 3: Batch pricing of demos/sample_options.csv");
    let input = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/sample_options.csv");
    let output = std::env::temp_dir().join("pricing_demo_results.csv");
    let config = default_configs::with_greeks();

    let summary = run_batch(&BlackScholesModel, input, &output, &config.batch)?;
    println!(
        "  {} rows priced, {} skipped -> {}",
        summary.priced,
        summary.skipped,
        output.display()
    );
    print!("{}", std::fs::read_to_string(&output)?);

    Ok(())
}
