//! Parsing of raw user-entered text into loan fields.
//!
//! The amortization engine only accepts typed values; front ends run their
//! text through these helpers first. Each helper also works as a `clap`
//! value parser.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::LoanError;
use crate::types::{Money, Percent};
use crate::LoanResult;

/// Date format accepted for loan start dates.
pub const START_DATE_FORMAT: &str = "%m/%d/%Y";

fn parse_decimal(field: &str, raw: &str) -> LoanResult<Decimal> {
    let trimmed = raw.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| LoanError::InvalidNumericInput {
            field: field.into(),
            value: raw.into(),
        })
}

fn parse_integer(field: &str, raw: &str) -> LoanResult<i32> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| LoanError::InvalidNumericInput {
            field: field.into(),
            value: raw.into(),
        })
}

pub fn parse_amount(raw: &str) -> LoanResult<Money> {
    parse_decimal("loan amount", raw)
}

pub fn parse_rate(raw: &str) -> LoanResult<Percent> {
    parse_decimal("interest rate", raw)
}

/// Whole years only, matching how terms are entered.
pub fn parse_years(raw: &str) -> LoanResult<i32> {
    parse_integer("loan term (years)", raw)
}

pub fn parse_months(raw: &str) -> LoanResult<i32> {
    parse_integer("loan term (months)", raw)
}

/// Parse a start date in `MM/DD/YYYY` form. The year must have four digits.
pub fn parse_start_date(raw: &str) -> LoanResult<NaiveDate> {
    let trimmed = raw.trim();
    let invalid = || LoanError::InvalidDate { value: raw.into() };

    // chrono's %Y accepts short years; insist on four digits.
    let year = trimmed.rsplit('/').next().ok_or_else(invalid)?;
    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    NaiveDate::parse_from_str(trimmed, START_DATE_FORMAT).map_err(|_| invalid())
}
