use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoanError {
    #[error("Loan amount must be greater than zero")]
    InvalidPrincipal,

    #[error("Interest rate cannot be negative")]
    InvalidRate,

    #[error("Loan term must be greater than zero")]
    InvalidTerm,

    #[error("Invalid numeric input for {field}: '{value}' is not a valid number")]
    InvalidNumericInput { field: String, value: String },

    #[error("Invalid date '{value}': expected MM/DD/YYYY")]
    InvalidDate { value: String },

    #[error("Arithmetic overflow in {context}")]
    ArithmeticOverflow { context: String },

    #[error("Payment date for period {period} is outside the supported calendar range")]
    DateOutOfRange { period: i32 },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl LoanError {
    /// True for the three engine-side validation failures.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            LoanError::InvalidPrincipal | LoanError::InvalidRate | LoanError::InvalidTerm
        )
    }
}

impl From<serde_json::Error> for LoanError {
    fn from(e: serde_json::Error) -> Self {
        LoanError::SerializationError(e.to_string())
    }
}
