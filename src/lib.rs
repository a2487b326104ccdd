//! # Pricing-Lib: Closed-Form European Option Pricing
//!
//! `pricing-lib` evaluates the Black-Scholes fair value of European calls and puts
//! together with their first and second order sensitivities (delta, gamma, vega,
//! theta, rho). Pricing is pure and stateless; all input checking happens once,
//! when the option and market records are built.
//!
//! ## Core Features
//!
//! - **Validated inputs**: [`EuropeanOption`] and [`MarketData`] cannot hold out-of-domain values
//! - **Black-Scholes model**: price-only and price-with-Greeks, including the expiry and zero-volatility limits
//! - **Batch pricing**: CSV in, CSV out, one output row per input row
//! - **Benchmarking**: synthetic workloads and throughput checks
//!
//! ## Quick Start
//!
//! ```rust
//! use pricing_lib::{price_option, OptionType};
//!
//! let result = price_option(OptionType::Call, 105.0, 0.5, 100.0, 0.05, 0.2, true)?;
//! println!("price = {:.4}", result.price());
//!
//! if let Some(greeks) = result.greeks() {
//!     println!("delta = {:.4}, vega = {:.4}", greeks.delta, greeks.vega);
//! }
//! # Ok::<(), pricing_lib::PricingError>(())
//! ```
//!
//! ## Model Support
//!
//! Currently supported models:
//! - **Black-Scholes**: European exercise, no dividends, constant rate and volatility
//!
//! ## Configuration Presets
//!
//! See [`default_configs`]:
//! - `standard()`: price-only batch output, default benchmark sizes
//! - `with_greeks()`: batch output including the five Greeks
//! - `quick()`: small, seeded benchmark runs

// ================================================================================================
// MODULES
// ================================================================================================

pub mod batch;
pub mod benchmark;
pub mod config;
pub mod models;
pub mod types;

// ================================================================================================
// IMPORTS
// ================================================================================================

use models::{bs::BlackScholesModel, traits::PricingModel};
use tracing::warn;

// ================================================================================================
// PUBLIC RE-EXPORTS
// ================================================================================================

// Pricing inputs and outputs
pub use types::{EuropeanOption, Greeks, MarketData, OptionType, PricingError, PricingResult};

// Models and the normal distribution helpers they share
pub use models::utils::{normal_cdf, normal_pdf};
pub use models::ModelKind;

// Batch and configuration types
pub use batch::{BatchRow, BatchSummary};
pub use config::{BatchConfig, BenchmarkConfig, PricerConfig};

// ================================================================================================
// DEFAULT CONFIGURATIONS
// ================================================================================================

/// Pre-configured settings for common use cases.
pub mod default_configs {
    use crate::config::PricerConfig;

    /// Price-only batch output with six decimals; benchmark sizes 100, 1,000 and 10,000.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pricing_lib::default_configs;
    ///
    /// let config = default_configs::standard();
    /// assert!(!config.batch.with_greeks);
    /// ```
    pub fn standard() -> PricerConfig {
        PricerConfig::default()
    }

    /// Same as [`standard()`] but batch output includes delta, gamma, vega, theta and rho.
    pub fn with_greeks() -> PricerConfig {
        PricerConfig::with_greeks()
    }

    /// Small seeded benchmark runs, useful for smoke tests and CI.
    pub fn quick() -> PricerConfig {
        PricerConfig::quick()
    }
}

/// Price a single European option with the Black-Scholes model.
///
/// The inputs are validated first, so an out-of-domain value (non-positive
/// strike or spot, negative maturity or volatility, non-finite numbers)
/// returns [`PricingError::InvalidInput`] and never reaches the model.
///
/// # Arguments
///
/// * `option_type` - Call or put
/// * `strike` - Strike price `K`, must be > 0
/// * `maturity` - Time to expiration `T` in years, must be >= 0
/// * `spot` - Underlying price `S`, must be > 0
/// * `rate` - Continuously-compounded risk-free rate `r`, any sign
/// * `vol` - Annualized volatility `σ`, must be >= 0
/// * `with_greeks` - Also compute delta, gamma, vega, theta and rho
///
/// # Example
///
/// ```rust
/// use pricing_lib::{price_option, OptionType};
///
/// // At expiry the value is intrinsic.
/// let result = price_option(OptionType::Put, 100.0, 0.0, 90.0, 0.05, 0.2, false)?;
/// assert_eq!(result.price(), 10.0);
/// assert!(!result.has_greeks());
///
/// assert!(price_option(OptionType::Put, 100.0, 0.5, 90.0, 0.05, -0.2, false).is_err());
/// # Ok::<(), pricing_lib::PricingError>(())
/// ```
pub fn price_option(
    option_type: OptionType,
    strike: f64,
    maturity: f64,
    spot: f64,
    rate: f64,
    vol: f64,
    with_greeks: bool,
) -> Result<PricingResult, PricingError> {
    let option = EuropeanOption::new(option_type, strike, maturity)?;
    let market = MarketData::new(spot, rate, vol)?;
    Ok(BlackScholesModel.evaluate(&option, &market, with_greeks))
}

/// Price parsed batch rows sequentially with the Black-Scholes model.
///
/// The output has one entry per input row, in the same order. A row that
/// fails validation is logged and yields `None`; the remaining rows are still
/// priced.
pub fn price_rows(rows: &[BatchRow], with_greeks: bool) -> Vec<Option<PricingResult>> {
    let model = BlackScholesModel;
    rows.iter()
        .enumerate()
        .map(|(i, row)| match row.to_inputs() {
            Ok((option, market)) => Some(model.evaluate(&option, &market, with_greeks)),
            Err(e) => {
                warn!(row = i + 1, "skipping row: {}", e);
                None
            }
        })
        .collect()
}
