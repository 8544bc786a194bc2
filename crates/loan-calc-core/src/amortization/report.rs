use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::engine::{
    self, AmortizationSchedule, ComparisonResult, PaymentSummary, PAYMENT_INTERVAL_DAYS,
};
use crate::types::{with_metadata, AlternativeTerms, ComputationOutput, LoanTerms};
use crate::LoanResult;

/// Input for a loan comparison: the current loan and alternative overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonInput {
    pub current: LoanTerms,
    #[serde(default)]
    pub alternative: AlternativeTerms,
}

/// Resolved terms echoed back with a comparison.
#[derive(Debug, Serialize)]
struct ComparisonAssumptions<'a> {
    current: &'a LoanTerms,
    alternative: &'a LoanTerms,
}

/// Monthly payment and lifetime totals.
pub fn payment_report(terms: &LoanTerms) -> LoanResult<ComputationOutput<PaymentSummary>> {
    let start = Instant::now();
    let summary = engine::summarize(terms)?;

    let mut warnings = Vec::new();
    rate_warnings("", terms, &mut warnings);

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed-Rate Annuity Payment",
        terms,
        warnings,
        elapsed,
        summary,
    ))
}

/// Full amortization schedule.
pub fn schedule_report(terms: &LoanTerms) -> LoanResult<ComputationOutput<AmortizationSchedule>> {
    let start = Instant::now();
    let schedule = engine::generate_schedule(terms)?;

    let mut warnings = vec![format!(
        "Payment dates advance by a fixed {PAYMENT_INTERVAL_DAYS} days per period, not by calendar month"
    )];
    rate_warnings("", terms, &mut warnings);

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed-Rate Amortization Schedule",
        terms,
        warnings,
        elapsed,
        schedule,
    ))
}

/// Side-by-side comparison; unset alternative fields inherit from the current loan.
pub fn comparison_report(
    input: &ComparisonInput,
) -> LoanResult<ComputationOutput<ComparisonResult>> {
    let start = Instant::now();
    let alternative = input.alternative.resolve(&input.current);
    let result = engine::compare(&input.current, &alternative)?;

    let mut warnings = Vec::new();
    if input.current.term_months != alternative.term_months {
        warnings.push(format!(
            "Loan terms differ ({} vs {} months); total payment and interest deltas span different horizons",
            input.current.term_months, alternative.term_months
        ));
    }
    rate_warnings("Current loan: ", &input.current, &mut warnings);
    rate_warnings("Alternative loan: ", &alternative, &mut warnings);

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed-Rate Loan Comparison (alternative minus current)",
        &ComparisonAssumptions {
            current: &input.current,
            alternative: &alternative,
        },
        warnings,
        elapsed,
        result,
    ))
}

fn rate_warnings(prefix: &str, terms: &LoanTerms, warnings: &mut Vec<String>) {
    if terms.annual_rate_percent.is_zero() {
        warnings.push(format!(
            "{prefix}zero interest rate; principal is repaid in equal instalments"
        ));
    }
}
