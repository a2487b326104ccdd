// Closed-form Black-Scholes pricing for European options, with the five
// standard Greeks. No dividend yield: the underlying is assumed to pay nothing
// over the life of the option.

use crate::models::traits::PricingModel;
use crate::models::utils::{normal_cdf, normal_pdf};
use crate::types::{EuropeanOption, Greeks, MarketData, OptionType, PricingResult};

/// Stateless Black-Scholes pricer.
///
/// Three mutually exclusive regimes are evaluated in order:
///
/// 1. `T == 0`: intrinsic value, Greeks zero except the terminal delta
/// 2. `σ == 0`: discounted intrinsic value, all Greeks zero
/// 3. otherwise the closed-form formula
///
/// The first two must be handled before the general case because `d1`
/// divides by `σ·√T`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlackScholesModel;

impl BlackScholesModel {
    pub const NAME: &'static str = "black_scholes";

    pub fn new() -> Self {
        Self
    }
}

#[allow(non_snake_case)]
impl PricingModel for BlackScholesModel {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn price(&self, option: &EuropeanOption, market: &MarketData) -> PricingResult {
        let (S, K, r, T, sigma) = unpack(option, market);
        let price = match option.option_type() {
            OptionType::Call => bs_call_price(S, K, r, T, sigma),
            OptionType::Put => bs_put_price(S, K, r, T, sigma),
        };
        PricingResult::PriceOnly { price }
    }

    fn price_with_greeks(&self, option: &EuropeanOption, market: &MarketData) -> PricingResult {
        let (S, K, r, T, sigma) = unpack(option, market);
        let (price, greeks) = bs_price_and_greeks(option.option_type(), S, K, r, T, sigma);
        PricingResult::WithGreeks { price, greeks }
    }
}

fn unpack(option: &EuropeanOption, market: &MarketData) -> (f64, f64, f64, f64, f64) {
    (
        market.spot(),
        option.strike(),
        market.risk_free_rate(),
        option.time_to_expiration(),
        market.volatility(),
    )
}

/// True when `sigma * sqrt(T)` is zero, including when it underflows for a
/// tiny positive `sigma`. Such inputs are priced as the zero-volatility case.
#[allow(non_snake_case)]
fn no_diffusion(T: f64, sigma: f64) -> bool {
    sigma * T.sqrt() <= 0.0
}

#[allow(non_snake_case)]
fn d1_d2(S: f64, K: f64, r: f64, T: f64, sigma: f64) -> (f64, f64) {
    let vol_sqrt_t = sigma * T.sqrt();
    let d1 = ((S / K).ln() + (r + 0.5 * sigma * sigma) * T) / vol_sqrt_t;
    (d1, d1 - vol_sqrt_t)
}

/// Price of a European call option under Black-Scholes assumptions.
#[allow(non_snake_case)]
pub fn bs_call_price(S: f64, K: f64, r: f64, T: f64, sigma: f64) -> f64 {
    if T <= 0.0 {
        return (S - K).max(0.0);
    }
    if no_diffusion(T, sigma) {
        return (S - K * (-r * T).exp()).max(0.0);
    }
    let (d1, d2) = d1_d2(S, K, r, T, sigma);
    S * normal_cdf(d1) - K * (-r * T).exp() * normal_cdf(d2)
}

/// Price of a European put option under Black-Scholes assumptions.
#[allow(non_snake_case)]
pub fn bs_put_price(S: f64, K: f64, r: f64, T: f64, sigma: f64) -> f64 {
    if T <= 0.0 {
        return (K - S).max(0.0);
    }
    if no_diffusion(T, sigma) {
        return (K * (-r * T).exp() - S).max(0.0);
    }
    let (d1, d2) = d1_d2(S, K, r, T, sigma);
    K * (-r * T).exp() * normal_cdf(-d2) - S * normal_cdf(-d1)
}

/// Price and all five Greeks in one pass, sharing `d1`, `d2` and the
/// discount factor between them.
#[allow(non_snake_case)]
pub fn bs_price_and_greeks(
    option_type: OptionType,
    S: f64,
    K: f64,
    r: f64,
    T: f64,
    sigma: f64,
) -> (f64, Greeks) {
    if T <= 0.0 {
        // Delta jumps at expiry; at-the-money resolves to the out-of-the-money side.
        let (price, delta) = match option_type {
            OptionType::Call => ((S - K).max(0.0), if S > K { 1.0 } else { 0.0 }),
            OptionType::Put => ((K - S).max(0.0), if S < K { -1.0 } else { 0.0 }),
        };
        return (
            price,
            Greeks {
                delta,
                ..Greeks::default()
            },
        );
    }

    if no_diffusion(T, sigma) {
        let price = match option_type {
            OptionType::Call => bs_call_price(S, K, r, T, sigma),
            OptionType::Put => bs_put_price(S, K, r, T, sigma),
        };
        return (price, Greeks::default());
    }

    let sqrt_t = T.sqrt();
    let (d1, d2) = d1_d2(S, K, r, T, sigma);
    let discount = (-r * T).exp();
    let pdf_d1 = normal_pdf(d1);
    let cdf_d1 = normal_cdf(d1);

    let gamma = pdf_d1 / (S * sigma * sqrt_t);
    let vega = S * pdf_d1 * sqrt_t;
    let decay = -(S * pdf_d1 * sigma) / (2.0 * sqrt_t);

    match option_type {
        OptionType::Call => {
            let cdf_d2 = normal_cdf(d2);
            let price = S * cdf_d1 - K * discount * cdf_d2;
            let greeks = Greeks {
                delta: cdf_d1,
                gamma,
                vega,
                theta: decay - r * K * discount * cdf_d2,
                rho: K * T * discount * cdf_d2,
            };
            (price, greeks)
        }
        OptionType::Put => {
            let cdf_neg_d2 = normal_cdf(-d2);
            let price = K * discount * cdf_neg_d2 - S * normal_cdf(-d1);
            let greeks = Greeks {
                delta: cdf_d1 - 1.0,
                gamma,
                vega,
                theta: decay + r * K * discount * cdf_neg_d2,
                rho: -K * T * discount * cdf_neg_d2,
            };
            (price, greeks)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn call(strike: f64, t: f64) -> EuropeanOption {
        EuropeanOption::new(OptionType::Call, strike, t).unwrap()
    }

    fn put(strike: f64, t: f64) -> EuropeanOption {
        EuropeanOption::new(OptionType::Put, strike, t).unwrap()
    }

    fn market(spot: f64, rate: f64, vol: f64) -> MarketData {
        MarketData::new(spot, rate, vol).unwrap()
    }

    #[test]
    fn test_reference_call_with_greeks() {
        let model = BlackScholesModel;
        let result = model.price_with_greeks(&call(105.0, 0.5), &market(100.0, 0.05, 0.2));
        let g = result.greeks().expect("greeks requested");

        assert_abs_diff_eq!(result.price(), 4.581680, epsilon = 1e-6);
        assert_abs_diff_eq!(g.delta, 0.461160, epsilon = 1e-6);
        assert_abs_diff_eq!(g.gamma, 0.028076, epsilon = 1e-6);
        assert_abs_diff_eq!(g.vega, 28.075684, epsilon = 1e-6);
        assert_abs_diff_eq!(g.theta, -7.691854, epsilon = 1e-6);
        assert_abs_diff_eq!(g.rho, 20.767171, epsilon = 1e-6);
    }

    #[test]
    fn test_reference_put_with_greeks() {
        let model = BlackScholesModel;
        let result = model.price_with_greeks(&put(105.0, 0.5), &market(100.0, 0.05, 0.2));
        let g = result.greeks().unwrap();

        assert_abs_diff_eq!(result.price(), 6.989221, epsilon = 1e-6);
        assert_abs_diff_eq!(g.delta, -0.538840, epsilon = 1e-6);
        assert_abs_diff_eq!(g.theta, -2.571477, epsilon = 1e-6);
        assert_abs_diff_eq!(g.rho, -30.436599, epsilon = 1e-6);
    }

    #[test]
    fn test_price_only_has_no_greeks_and_matches_greeks_path() {
        let model = BlackScholesModel;
        let option = put(100.0, 1.0);
        let md = market(100.0, 0.05, 0.2);

        let plain = model.price(&option, &md);
        let full = model.price_with_greeks(&option, &md);

        assert!(!plain.has_greeks());
        assert!(full.has_greeks());
        assert_abs_diff_eq!(plain.price(), full.price(), epsilon = 1e-12);
        assert_abs_diff_eq!(plain.price(), 5.573526, epsilon = 1e-6);
    }

    #[test]
    fn test_expiry_branch_intrinsic_and_delta() {
        let model = BlackScholesModel;

        let itm = model.price_with_greeks(&call(100.0, 0.0), &market(110.0, 0.05, 0.2));
        assert_eq!(itm.price(), 10.0);
        assert_eq!(itm.greeks().unwrap().delta, 1.0);

        let put_itm = model.price_with_greeks(&put(100.0, 0.0), &market(90.0, 0.05, 0.2));
        assert_eq!(put_itm.price(), 10.0);
        assert_eq!(put_itm.greeks().unwrap().delta, -1.0);

        // at-the-money resolves to zero delta on both sides
        let atm_call = model.price_with_greeks(&call(100.0, 0.0), &market(100.0, 0.05, 0.2));
        let atm_put = model.price_with_greeks(&put(100.0, 0.0), &market(100.0, 0.05, 0.2));
        assert_eq!(atm_call.greeks().unwrap().delta, 0.0);
        assert_eq!(atm_put.greeks().unwrap().delta, 0.0);
        assert_eq!(atm_call.price(), 0.0);
    }

    #[test]
    fn test_expiry_takes_precedence_over_zero_vol() {
        let model = BlackScholesModel;
        // T=0 and σ=0 together: undiscounted intrinsic, not the σ=0 branch
        let result = model.price_with_greeks(&call(100.0, 0.0), &market(110.0, 0.5, 0.0));
        assert_eq!(result.price(), 10.0);
        assert_eq!(result.greeks().unwrap().delta, 1.0);
    }

    #[test]
    fn test_zero_vol_branch() {
        let model = BlackScholesModel;
        let result = model.price_with_greeks(&call(100.0, 0.5), &market(110.0, 0.05, 0.0));
        assert_abs_diff_eq!(result.price(), 12.469009, epsilon = 1e-6);
        assert_eq!(*result.greeks().unwrap(), Greeks::default());

        let otm_put = model.price(&put(100.0, 0.5), &market(110.0, 0.05, 0.0));
        assert_eq!(otm_put.price(), 0.0);
    }

    #[test]
    fn test_underflowing_vol_uses_zero_vol_branch() {
        let model = BlackScholesModel;
        // sigma * sqrt(T) underflows to 0 although sigma > 0
        let md = market(100.0, 0.0, 1e-320);
        let result = model.price_with_greeks(&call(100.0, 1e-10), &md);
        assert_eq!(result.price(), 0.0);
        assert_eq!(*result.greeks().unwrap(), Greeks::default());

        let itm_put = model.price_with_greeks(&put(110.0, 1e-10), &md);
        assert!(itm_put.price().is_finite());
        assert_abs_diff_eq!(itm_put.price(), 10.0, epsilon = 1e-9);
        assert_eq!(*itm_put.greeks().unwrap(), Greeks::default());

        assert_eq!(bs_call_price(120.0, 100.0, 0.0, 1e-10, 1e-320), 20.0);
    }

    #[test]
    fn test_deep_itm_put_theta_can_be_positive() {
        let model = BlackScholesModel;
        let result = model.price_with_greeks(&put(100.0, 2.0), &market(50.0, 0.15, 0.1));
        let g = result.greeks().unwrap();
        assert_abs_diff_eq!(g.theta, 11.070068, epsilon = 1e-6);
        assert!(g.theta > 0.0);
    }

    #[test]
    fn test_free_functions_match_model() {
        let model = BlackScholesModel;
        let md = market(95.0, 0.03, 0.35);
        let c = model.price(&call(100.0, 0.75), &md).price();
        let p = model.price(&put(100.0, 0.75), &md).price();
        assert_eq!(c, bs_call_price(95.0, 100.0, 0.03, 0.75, 0.35));
        assert_eq!(p, bs_put_price(95.0, 100.0, 0.03, 0.75, 0.35));
        assert_eq!(model.name(), "black_scholes");
    }
}
