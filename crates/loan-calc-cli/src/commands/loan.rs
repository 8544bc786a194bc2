use chrono::{Local, NaiveDate};
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::{debug, info};

use loan_calc_core::amortization::report::{self, ComparisonInput};
use loan_calc_core::amortization;
use loan_calc_core::input as parse;
use loan_calc_core::{AlternativeTerms, LoanError, LoanTerms};

use crate::input;

/// Loan terms given as individual flags. Omitted flags fall back to
/// 250,000 at 5% over 30 years starting today.
#[derive(Args)]
pub struct LoanArgs {
    /// Loan amount
    #[arg(long, value_parser = parse::parse_amount, allow_hyphen_values = true)]
    pub amount: Option<Decimal>,

    /// Annual interest rate in percent (5.0 = 5%)
    #[arg(long, value_parser = parse::parse_rate, allow_hyphen_values = true)]
    pub rate: Option<Decimal>,

    /// Loan term in years
    #[arg(
        long,
        value_parser = parse::parse_years,
        allow_hyphen_values = true,
        conflicts_with = "months"
    )]
    pub years: Option<i32>,

    /// Loan term in months
    #[arg(long, value_parser = parse::parse_months, allow_hyphen_values = true)]
    pub months: Option<i32>,

    /// First payment date (MM/DD/YYYY)
    #[arg(long, value_parser = parse::parse_start_date)]
    pub start_date: Option<NaiveDate>,
}

impl LoanArgs {
    fn into_terms(self) -> Result<LoanTerms, LoanError> {
        let defaults = LoanTerms::with_defaults(Local::now().date_naive());
        let principal = self.amount.unwrap_or(defaults.principal);
        let rate = self.rate.unwrap_or(defaults.annual_rate_percent);
        let start_date = self.start_date.unwrap_or(defaults.start_date);

        match (self.months, self.years) {
            (Some(months), _) => Ok(LoanTerms::new(principal, rate, months, start_date)),
            (None, Some(years)) => LoanTerms::from_years(principal, rate, years, start_date),
            (None, None) => Ok(LoanTerms::new(
                principal,
                rate,
                defaults.term_months,
                start_date,
            )),
        }
    }
}

/// Read loan terms from `--input`, piped stdin, or the individual flags.
fn read_terms(path: Option<&str>, loan: LoanArgs) -> Result<LoanTerms, Box<dyn std::error::Error>> {
    let terms: LoanTerms = if let Some(path) = path {
        info!(path, "reading loan terms from file");
        input::file::read_json(path)?
    } else if let Some(terms) = input::stdin::read_piped()? {
        info!("reading loan terms from stdin");
        terms
    } else {
        loan.into_terms()?
    };

    debug!(
        principal = %terms.principal,
        annual_rate_percent = %terms.annual_rate_percent,
        term_months = terms.term_months,
        start_date = %terms.start_date,
        "loan terms"
    );
    Ok(terms)
}

/// Arguments for the payment summary
#[derive(Args)]
pub struct PaymentArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub loan: LoanArgs,
}

pub fn run_payment(args: PaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms = read_terms(args.input.as_deref(), args.loan)?;
    let result = report::payment_report(&terms)?;
    debug!(
        elapsed_us = result.metadata.computation_time_us,
        "payment summary computed"
    );
    Ok(serde_json::to_value(result)?)
}

/// Arguments for the amortization schedule
#[derive(Args)]
pub struct ScheduleArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub loan: LoanArgs,
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms = read_terms(args.input.as_deref(), args.loan)?;
    let result = report::schedule_report(&terms)?;
    debug!(
        rows = result.result.rows.len(),
        elapsed_us = result.metadata.computation_time_us,
        "schedule generated"
    );
    Ok(serde_json::to_value(result)?)
}

/// Arguments for a loan comparison. Alternative flags left out take the
/// current loan's value.
#[derive(Args)]
pub struct CompareArgs {
    /// Path to JSON input file with `current` and optional `alternative`
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub loan: LoanArgs,

    /// Alternative loan amount
    #[arg(long, value_parser = parse::parse_amount, allow_hyphen_values = true)]
    pub alt_amount: Option<Decimal>,

    /// Alternative annual interest rate in percent
    #[arg(long, value_parser = parse::parse_rate, allow_hyphen_values = true)]
    pub alt_rate: Option<Decimal>,

    /// Alternative loan term in years
    #[arg(
        long,
        value_parser = parse::parse_years,
        allow_hyphen_values = true,
        conflicts_with = "alt_months"
    )]
    pub alt_years: Option<i32>,

    /// Alternative loan term in months
    #[arg(long, value_parser = parse::parse_months, allow_hyphen_values = true)]
    pub alt_months: Option<i32>,
}

impl CompareArgs {
    fn alternative(&self) -> Result<AlternativeTerms, LoanError> {
        let term_months = match (self.alt_months, self.alt_years) {
            (Some(months), _) => Some(months),
            (None, Some(years)) => Some(years.checked_mul(12).ok_or(LoanError::InvalidTerm)?),
            (None, None) => None,
        };
        Ok(AlternativeTerms {
            principal: self.alt_amount,
            annual_rate_percent: self.alt_rate,
            term_months,
            start_date: None,
        })
    }
}

pub fn run_compare(args: CompareArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let comparison: ComparisonInput = if let Some(ref path) = args.input {
        info!(path = %path, "reading comparison from file");
        input::file::read_json(path)?
    } else if let Some(comparison) = input::stdin::read_piped()? {
        info!("reading comparison from stdin");
        comparison
    } else {
        let alternative = args.alternative()?;
        ComparisonInput {
            current: args.loan.into_terms()?,
            alternative,
        }
    };

    let result = report::comparison_report(&comparison)?;
    debug!(
        total_interest_delta = %result.result.total_interest_delta,
        elapsed_us = result.metadata.computation_time_us,
        "comparison computed"
    );
    Ok(serde_json::to_value(result)?)
}

/// Arguments for validating loan terms
#[derive(Args)]
pub struct ValidateArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub loan: LoanArgs,
}

pub fn run_validate(args: ValidateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms = read_terms(args.input.as_deref(), args.loan)?;
    amortization::validate(&terms)?;
    Ok(serde_json::json!({
        "valid": true,
        "terms": terms,
    }))
}
