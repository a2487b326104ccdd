#![allow(dead_code)] // each test binary uses a different subset

use pricing_lib::models::bs::BlackScholesModel;
use pricing_lib::models::traits::PricingModel;
use pricing_lib::{EuropeanOption, Greeks, MarketData, OptionType, PricingResult};
use std::path::{Path, PathBuf};

/// Sample input shipped with the crate
pub fn sample_csv_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/sample_options.csv")
}

pub fn option(option_type: OptionType, strike: f64, maturity: f64) -> EuropeanOption {
    EuropeanOption::new(option_type, strike, maturity).expect("valid option")
}

pub fn market(spot: f64, rate: f64, vol: f64) -> MarketData {
    MarketData::new(spot, rate, vol).expect("valid market data")
}

/// Price with Greeks for (S, K, r, σ, T), the argument order used in the tests.
pub fn greeks_for(
    option_type: OptionType,
    s: f64,
    k: f64,
    r: f64,
    sigma: f64,
    t: f64,
) -> (f64, Greeks) {
    let result = BlackScholesModel.price_with_greeks(&option(option_type, k, t), &market(s, r, sigma));
    let greeks = *result.greeks().expect("greeks requested");
    (result.price(), greeks)
}

pub fn price_for(option_type: OptionType, s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    let result: PricingResult =
        BlackScholesModel.price(&option(option_type, k, t), &market(s, r, sigma));
    result.price()
}

/// Parse CSV text into rows of trimmed fields, header included.
pub fn parse_csv(content: &str) -> Vec<Vec<String>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());
    rdr.records()
        .map(|r| {
            r.expect("valid csv")
                .iter()
                .map(|f| f.trim().to_string())
                .collect()
        })
        .collect()
}
