use napi::Result as NapiResult;
use napi_derive::napi;

use loan_calc_core::amortization::{self, report};
use loan_calc_core::LoanTerms;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_terms(input_json: &str) -> NapiResult<LoanTerms> {
    serde_json::from_str(input_json).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Loan calculations
// ---------------------------------------------------------------------------

/// Returns `{"valid": true}` or throws with the first validation failure.
#[napi]
pub fn validate_loan(input_json: String) -> NapiResult<String> {
    let terms = parse_terms(&input_json)?;
    amortization::validate(&terms).map_err(to_napi_error)?;
    serde_json::to_string(&serde_json::json!({ "valid": true })).map_err(to_napi_error)
}

#[napi]
pub fn loan_payment(input_json: String) -> NapiResult<String> {
    let terms = parse_terms(&input_json)?;
    let output = report::payment_report(&terms).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn amortization_schedule(input_json: String) -> NapiResult<String> {
    let terms = parse_terms(&input_json)?;
    let output = report::schedule_report(&terms).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Input is `{"current": {...}, "alternative": {...}}`; alternative fields may be omitted.
#[napi]
pub fn compare_loans(input_json: String) -> NapiResult<String> {
    let input: report::ComparisonInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = report::comparison_report(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
