// src/types/option.rs

//! Contract description for a European option.

use super::error::{PricingError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Exercise right carried by the option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    pub fn is_call(self) -> bool {
        self == OptionType::Call
    }

    pub fn is_put(self) -> bool {
        self == OptionType::Put
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => f.pad("call"),
            OptionType::Put => f.pad("put"),
        }
    }
}

impl FromStr for OptionType {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "call" => Ok(OptionType::Call),
            "put" => Ok(OptionType::Put),
            _ => Err(PricingError::InvalidOptionType(s.to_string())),
        }
    }
}

/// A validated European option contract.
///
/// Fields are private: the only way to obtain a value is [`EuropeanOption::new`],
/// so every instance satisfies `strike > 0` and `time_to_expiration >= 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EuropeanOption {
    option_type: OptionType,
    strike: f64,
    time_to_expiration: f64,
}

impl EuropeanOption {
    /// Build an option, rejecting a non-positive strike or a negative (or
    /// non-finite) time to expiration.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pricing_lib::{EuropeanOption, OptionType};
    ///
    /// let option = EuropeanOption::new(OptionType::Call, 105.0, 0.5)?;
    /// assert_eq!(option.strike(), 105.0);
    /// assert!(EuropeanOption::new(OptionType::Put, -1.0, 0.5).is_err());
    /// # Ok::<(), pricing_lib::PricingError>(())
    /// ```
    pub fn new(option_type: OptionType, strike: f64, time_to_expiration: f64) -> Result<Self> {
        if !strike.is_finite() || strike <= 0.0 {
            return Err(PricingError::invalid(
                "strike",
                strike,
                "strike price must be positive and finite",
            ));
        }
        if !time_to_expiration.is_finite() || time_to_expiration < 0.0 {
            return Err(PricingError::invalid(
                "time_to_expiration",
                time_to_expiration,
                "time to expiration cannot be negative and must be finite",
            ));
        }

        Ok(Self {
            option_type,
            strike,
            time_to_expiration,
        })
    }

    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Remaining life in years.
    pub fn time_to_expiration(&self) -> f64 {
        self.time_to_expiration
    }

    pub fn is_call(&self) -> bool {
        self.option_type.is_call()
    }

    pub fn is_put(&self) -> bool {
        self.option_type.is_put()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_type_parsing() {
        assert_eq!("call".parse::<OptionType>().unwrap(), OptionType::Call);
        assert_eq!(" PUT ".parse::<OptionType>().unwrap(), OptionType::Put);
        assert!(matches!(
            "straddle".parse::<OptionType>(),
            Err(PricingError::InvalidOptionType(_))
        ));
        assert_eq!(OptionType::Put.to_string(), "put");
    }

    #[test]
    fn test_option_validation() {
        assert!(EuropeanOption::new(OptionType::Call, 100.0, 1.0).is_ok());
        // expiry day is allowed
        assert!(EuropeanOption::new(OptionType::Call, 100.0, 0.0).is_ok());

        assert!(EuropeanOption::new(OptionType::Call, 0.0, 1.0).is_err());
        assert!(EuropeanOption::new(OptionType::Call, -100.0, 1.0).is_err());
        assert!(EuropeanOption::new(OptionType::Call, 100.0, -1.0).is_err());
        assert!(EuropeanOption::new(OptionType::Call, f64::NAN, 1.0).is_err());
        assert!(EuropeanOption::new(OptionType::Put, 100.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_option_error_names_field() {
        let err = EuropeanOption::new(OptionType::Put, 100.0, -0.5).unwrap_err();
        match err {
            PricingError::InvalidInput { field, value, .. } => {
                assert_eq!(field, "time_to_expiration");
                assert_eq!(value, -0.5);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
