pub mod bs;

use serde::{Deserialize, Serialize};

/// Pricing models selectable from configuration or the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    /// Closed-form Black-Scholes for European exercise
    #[default]
    #[value(name = "black_scholes")]
    BlackScholes,
}

impl ModelKind {
    /// Instantiate the model this kind names.
    pub fn build(self) -> Box<dyn traits::PricingModel> {
        match self {
            ModelKind::BlackScholes => Box::new(bs::BlackScholesModel),
        }
    }
}

/// Common traits used by all pricing models
pub mod traits {
    use crate::types::{EuropeanOption, MarketData, PricingResult};

    /// A stateless closed-form pricer for European options.
    ///
    /// Implementations trust their inputs: validation happens when the
    /// [`EuropeanOption`] and [`MarketData`] are constructed, so neither
    /// operation can fail.
    pub trait PricingModel: Send + Sync {
        /// Short identifier used in configuration and logs.
        fn name(&self) -> &str;

        /// Fair value only; the result carries no Greeks.
        fn price(&self, option: &EuropeanOption, market: &MarketData) -> PricingResult;

        /// Fair value together with delta, gamma, vega, theta and rho.
        fn price_with_greeks(&self, option: &EuropeanOption, market: &MarketData)
            -> PricingResult;

        /// Dispatch to [`price`](Self::price) or
        /// [`price_with_greeks`](Self::price_with_greeks).
        fn evaluate(
            &self,
            option: &EuropeanOption,
            market: &MarketData,
            with_greeks: bool,
        ) -> PricingResult {
            if with_greeks {
                self.price_with_greeks(option, market)
            } else {
                self.price(option, market)
            }
        }
    }
}

/// Standard normal distribution helpers shared by the closed-form models
pub mod utils {
    use std::f64::consts::{FRAC_1_SQRT_2, PI};

    /// Standard normal probability density: e^(-x²/2) / sqrt(2π)
    pub fn normal_pdf(x: f64) -> f64 {
        (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
    }

    /// Standard normal cumulative distribution function Φ(x).
    ///
    /// Evaluated through the complementary error function so the lower tail
    /// keeps full relative precision: Φ(x) = ½·erfc(-x/√2).
    pub fn normal_cdf(x: f64) -> f64 {
        0.5 * libm::erfc(-x * FRAC_1_SQRT_2)
    }

}
