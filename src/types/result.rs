use serde::Serialize;

/// First and second order sensitivities of the option price.
///
/// Vega and rho are per unit change (not per 1%), theta is per year.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Greeks {
    pub delta: f64,
    pub gamma: f64,
    pub vega: f64,
    pub theta: f64,
    pub rho: f64,
}

/// Output of a pricing call.
///
/// Whether Greeks were computed is encoded in the variant, so there is no
/// sentinel value to misread.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PricingResult {
    PriceOnly { price: f64 },
    WithGreeks { price: f64, greeks: Greeks },
}

impl PricingResult {
    pub fn price(&self) -> f64 {
        match *self {
            PricingResult::PriceOnly { price } | PricingResult::WithGreeks { price, .. } => price,
        }
    }

    pub fn greeks(&self) -> Option<&Greeks> {
        match self {
            PricingResult::PriceOnly { .. } => None,
            PricingResult::WithGreeks { greeks, .. } => Some(greeks),
        }
    }

    pub fn has_greeks(&self) -> bool {
        matches!(self, PricingResult::WithGreeks { .. })
    }
}
