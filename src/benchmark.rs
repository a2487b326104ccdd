// src/benchmark.rs

//! Throughput measurement for the pricing model.
//!
//! Inputs are generated up front so that only model calls are timed. Two
//! generators are provided: uniform random draws (optionally seeded) and a
//! deterministic cyclic grid that gives identical workloads across machines.

use crate::config::BenchmarkConfig;
use crate::models::traits::PricingModel;
use crate::types::{EuropeanOption, MarketData, OptionType};
use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::hint::black_box;
use std::time::{Duration, Instant};
use tracing::debug;

/// A pre-validated (option, market) pair
pub type BenchInput = (EuropeanOption, MarketData);

/// Draw `n` random inputs: S, K in [50, 150), r in [0.01, 0.1),
/// σ in [0.1, 0.5), T in [0.1, 2.0), calls and puts with equal odds.
pub fn generate_random_inputs(n: usize, seed: Option<u64>) -> Result<Vec<BenchInput>> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut inputs = Vec::with_capacity(n);
    for _ in 0..n {
        let option_type = if rng.gen_bool(0.5) {
            OptionType::Call
        } else {
            OptionType::Put
        };
        let option = EuropeanOption::new(
            option_type,
            rng.gen_range(50.0..150.0),
            rng.gen_range(0.1..2.0),
        )?;
        let market = MarketData::new(
            rng.gen_range(50.0..150.0),
            rng.gen_range(0.01..0.1),
            rng.gen_range(0.1..0.5),
        )?;
        inputs.push((option, market));
    }
    Ok(inputs)
}

/// Deterministic grid cycling spot 90-109, strike 95-109, rate 2-11%,
/// vol 10-29% and maturity 0.1-1.08y; even indices are calls.
pub fn generate_grid_inputs(n: usize) -> Result<Vec<BenchInput>> {
    (0..n)
        .map(|i| -> Result<BenchInput> {
            let spot = 90.0 + (i % 20) as f64;
            let strike = 95.0 + (i % 15) as f64;
            let rate = 0.02 + (i % 10) as f64 * 0.01;
            let vol = 0.1 + (i % 20) as f64 * 0.01;
            let maturity = 0.1 + (i % 50) as f64 * 0.02;
            let option_type = if i % 2 == 0 {
                OptionType::Call
            } else {
                OptionType::Put
            };
            Ok((
                EuropeanOption::new(option_type, strike, maturity)?,
                MarketData::new(spot, rate, vol)?,
            ))
        })
        .collect()
}

/// Timing of one benchmark run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BenchmarkResult {
    pub count: usize,
    pub with_greeks: bool,
    pub elapsed: Duration,
    pub ops_per_second: f64,
}

impl BenchmarkResult {
    /// Whether this run is at least as fast as the configured budget
    /// (`target_ops` calls within `target_seconds`).
    pub fn meets_target(&self, config: &BenchmarkConfig) -> bool {
        self.ops_per_second >= config.target_ops_per_second()
    }
}

/// Time one call per input, price-only or with Greeks.
pub fn run_benchmark<M: PricingModel + ?Sized>(
    model: &M,
    inputs: &[BenchInput],
    with_greeks: bool,
) -> BenchmarkResult {
    let start = Instant::now();
    for (option, market) in inputs {
        black_box(model.evaluate(black_box(option), black_box(market), with_greeks));
    }
    let elapsed = start.elapsed();

    let secs = elapsed.as_secs_f64();
    let ops_per_second = if secs > 0.0 {
        inputs.len() as f64 / secs
    } else {
        f64::INFINITY
    };
    debug!(
        count = inputs.len(),
        with_greeks,
        elapsed_us = elapsed.as_micros() as u64,
        "benchmark run finished"
    );

    BenchmarkResult {
        count: inputs.len(),
        with_greeks,
        elapsed,
        ops_per_second,
    }
}

/// Run every configured size, price-only first and then with Greeks.
pub fn run_suite<M: PricingModel + ?Sized>(
    model: &M,
    config: &BenchmarkConfig,
    grid: bool,
) -> Result<Vec<BenchmarkResult>> {
    let mut results = Vec::with_capacity(config.sizes.len() * 2);
    for with_greeks in [false, true] {
        for &size in &config.sizes {
            let inputs = if grid {
                generate_grid_inputs(size)?
            } else {
                generate_random_inputs(size, config.seed)?
            };
            results.push(run_benchmark(model, &inputs, with_greeks));
        }
    }
    Ok(results)
}
