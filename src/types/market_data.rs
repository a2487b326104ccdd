use super::error::{PricingError, Result};
use serde::Serialize;

/// Market observables needed to price a European option.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MarketData {
    spot: f64,
    risk_free_rate: f64,
    volatility: f64,
}

impl MarketData {
    /// Build a market snapshot. Spot must be positive and volatility
    /// non-negative; the risk-free rate may take either sign but all three
    /// values must be finite.
    pub fn new(spot: f64, risk_free_rate: f64, volatility: f64) -> Result<Self> {
        if !spot.is_finite() || spot <= 0.0 {
            return Err(PricingError::invalid(
                "spot",
                spot,
                "spot price must be positive and finite",
            ));
        }
        if !risk_free_rate.is_finite() {
            return Err(PricingError::invalid(
                "risk_free_rate",
                risk_free_rate,
                "risk-free rate must be finite",
            ));
        }
        if !volatility.is_finite() || volatility < 0.0 {
            return Err(PricingError::invalid(
                "volatility",
                volatility,
                "volatility cannot be negative and must be finite",
            ));
        }

        Ok(Self {
            spot,
            risk_free_rate,
            volatility,
        })
    }

    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Annualized, continuously-compounded rate.
    pub fn risk_free_rate(&self) -> f64 {
        self.risk_free_rate
    }

    pub fn volatility(&self) -> f64 {
        self.volatility
    }
}
