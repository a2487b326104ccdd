use crate::types::{EuropeanOption, MarketData, OptionType, PricingError, PricingResult};
use thiserror::Error;

/// Required input columns, in output order.
pub const INPUT_COLUMNS: [&str; 6] = ["type", "spot", "strike", "rate", "vol", "maturity"];

/// Result columns appended after the input columns.
pub const PRICE_COLUMN: &str = "price";
pub const GREEK_COLUMNS: [&str; 5] = ["delta", "gamma", "vega", "theta", "rho"];

/// Why a single batch row could not be priced
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RowError {
    #[error("missing value for column '{column}'")]
    Missing { column: &'static str },

    #[error("invalid value for {column}: '{value}'")]
    NotANumber { column: &'static str, value: String },

    #[error(transparent)]
    Invalid(#[from] PricingError),
}

/// A data row exactly as read from the input file.
///
/// Cells are kept as text so the output can echo them unchanged, even when
/// the row turns out to be malformed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawRow {
    /// 1-based position among the data rows (header excluded)
    pub row_number: usize,
    pub option_type: String,
    pub spot: String,
    pub strike: String,
    pub rate: String,
    pub vol: String,
    pub maturity: String,
}

impl RawRow {
    /// Cells in `INPUT_COLUMNS` order.
    pub fn cells(&self) -> [&str; 6] {
        [
            &self.option_type,
            &self.spot,
            &self.strike,
            &self.rate,
            &self.vol,
            &self.maturity,
        ]
    }

    /// Convert the text cells into numbers. Domain checks are left to
    /// [`BatchRow::to_inputs`].
    pub fn parse(&self) -> Result<BatchRow, RowError> {
        if self.option_type.is_empty() {
            return Err(RowError::Missing { column: "type" });
        }
        Ok(BatchRow {
            option_type: self.option_type.parse()?,
            spot: parse_cell("spot", &self.spot)?,
            strike: parse_cell("strike", &self.strike)?,
            rate: parse_cell("rate", &self.rate)?,
            vol: parse_cell("vol", &self.vol)?,
            maturity: parse_cell("maturity", &self.maturity)?,
        })
    }
}

fn parse_cell(column: &'static str, text: &str) -> Result<f64, RowError> {
    if text.is_empty() {
        return Err(RowError::Missing { column });
    }
    text.parse::<f64>().map_err(|_| RowError::NotANumber {
        column,
        value: text.to_string(),
    })
}

/// One numeric batch row: an option plus the market it is priced in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatchRow {
    pub option_type: OptionType,
    pub spot: f64,
    pub strike: f64,
    pub rate: f64,
    pub vol: f64,
    pub maturity: f64,
}

impl BatchRow {
    /// Build the validated pricing inputs for this row.
    pub fn to_inputs(&self) -> Result<(EuropeanOption, MarketData), PricingError> {
        let option = EuropeanOption::new(self.option_type, self.strike, self.maturity)?;
        let market = MarketData::new(self.spot, self.rate, self.vol)?;
        Ok((option, market))
    }
}

/// An input row paired with its result; `None` marks a row that was skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchRecord {
    pub row: RawRow,
    pub result: Option<PricingResult>,
}

/// All records of a batch, in input order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BatchOutput {
    pub records: Vec<BatchRecord>,
}

impl BatchOutput {
    pub fn results(&self) -> impl Iterator<Item = Option<&PricingResult>> {
        self.records.iter().map(|r| r.result.as_ref())
    }

    pub fn summary(&self) -> BatchSummary {
        let priced = self.records.iter().filter(|r| r.result.is_some()).count();
        BatchSummary {
            total: self.records.len(),
            priced,
            skipped: self.records.len() - priced,
        }
    }
}

/// Row counts reported after a batch run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchSummary {
    pub total: usize,
    pub priced: usize,
    pub skipped: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(cells: [&str; 6]) -> RawRow {
        RawRow {
            row_number: 1,
            option_type: cells[0].to_string(),
            spot: cells[1].to_string(),
            strike: cells[2].to_string(),
            rate: cells[3].to_string(),
            vol: cells[4].to_string(),
            maturity: cells[5].to_string(),
        }
    }

    #[test]
    fn test_parse_valid_row() {
        let row = raw(["put", "100", "95.5", "-0.01", "0.2", "0.25"])
            .parse()
            .unwrap();
        assert_eq!(row.option_type, OptionType::Put);
        assert_eq!(row.strike, 95.5);
        assert_eq!(row.rate, -0.01);
        assert!(row.to_inputs().is_ok());
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            raw(["call", "abc", "100", "0.05", "0.2", "1"]).parse(),
            Err(RowError::NotANumber {
                column: "spot",
                value: "abc".to_string()
            })
        );
        assert_eq!(
            raw(["call", "100", "100", "0.05", "0.2", ""]).parse(),
            Err(RowError::Missing { column: "maturity" })
        );
        assert!(matches!(
            raw(["swap", "100", "100", "0.05", "0.2", "1"]).parse(),
            Err(RowError::Invalid(PricingError::InvalidOptionType(_)))
        ));
    }

    #[test]
    fn test_parse_defers_domain_checks() {
        let row = raw(["call", "100", "-5", "0.05", "0.2", "1"]).parse().unwrap();
        assert!(matches!(
            row.to_inputs(),
            Err(PricingError::InvalidInput { field: "strike", .. })
        ));
    }
}
