use thiserror::Error;

/// Errors raised while building pricing inputs.
///
/// The pricing model itself is infallible; every failure is detected when an
/// [`EuropeanOption`](crate::EuropeanOption) or [`MarketData`](crate::MarketData)
/// is constructed, or when raw text is parsed into one of their fields.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    /// A numeric input violates its domain (e.g. non-positive strike).
    #[error("invalid {field} ({value}): {reason}")]
    InvalidInput {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// Text that should name an option type could not be parsed.
    #[error("invalid option type: '{0}' (must be 'call' or 'put')")]
    InvalidOptionType(String),
}

impl PricingError {
    pub(crate) fn invalid(field: &'static str, value: f64, reason: &'static str) -> Self {
        Self::InvalidInput {
            field,
            value,
            reason,
        }
    }
}

/// Shorthand result for input construction.
pub type Result<T> = std::result::Result<T, PricingError>;
