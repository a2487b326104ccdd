//! Validated pricing inputs and the values the model produces.

pub mod error;
pub mod market_data;
pub mod option;
pub mod result;

pub use error::PricingError;
pub use market_data::MarketData;
pub use option::{EuropeanOption, OptionType};
pub use result::{Greeks, PricingResult};
