use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::LoanError;
use crate::LoanResult;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Annual rates expressed as percentages (5.0 = 5%), as entered by borrowers.
pub type Percent = Decimal;

/// Loan amount used when the caller supplies none.
pub const DEFAULT_PRINCIPAL: Money = dec!(250000);

/// Annual rate used when the caller supplies none.
pub const DEFAULT_RATE_PERCENT: Percent = dec!(5.0);

/// Loan term, in years, used when the caller supplies none.
pub const DEFAULT_TERM_YEARS: i32 = 30;

/// Fixed-rate loan parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub principal: Money,
    pub annual_rate_percent: Percent,
    /// Signed so that a negative term is reported as a validation failure.
    pub term_months: i32,
    /// Only used to label schedule rows.
    pub start_date: NaiveDate,
}

impl LoanTerms {
    pub fn new(
        principal: Money,
        annual_rate_percent: Percent,
        term_months: i32,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            principal,
            annual_rate_percent,
            term_months,
            start_date,
        }
    }

    /// Build terms from a term expressed in whole years.
    pub fn from_years(
        principal: Money,
        annual_rate_percent: Percent,
        years: i32,
        start_date: NaiveDate,
    ) -> LoanResult<Self> {
        let term_months = years.checked_mul(12).ok_or(LoanError::InvalidTerm)?;
        Ok(Self::new(principal, annual_rate_percent, term_months, start_date))
    }

    /// 250,000 at 5% over 30 years.
    pub fn with_defaults(start_date: NaiveDate) -> Self {
        Self::new(
            DEFAULT_PRINCIPAL,
            DEFAULT_RATE_PERCENT,
            DEFAULT_TERM_YEARS * 12,
            start_date,
        )
    }

    /// Monthly rate as a fraction (annual percent / 1200).
    pub fn monthly_rate(&self) -> Decimal {
        self.annual_rate_percent / dec!(1200)
    }
}

/// Optional overrides for the alternative side of a comparison.
///
/// Any field left as `None` inherits the current loan's value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlternativeTerms {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub principal: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_rate_percent: Option<Percent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term_months: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
}

impl AlternativeTerms {
    pub fn resolve(&self, current: &LoanTerms) -> LoanTerms {
        LoanTerms {
            principal: self.principal.unwrap_or(current.principal),
            annual_rate_percent: self
                .annual_rate_percent
                .unwrap_or(current.annual_rate_percent),
            term_months: self.term_months.unwrap_or(current.term_months),
            start_date: self.start_date.unwrap_or(current.start_date),
        }
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
