pub mod amortization;
pub mod error;
pub mod input;
pub mod types;

pub use error::LoanError;
pub use types::*;

/// Standard result type for all loan calculations
pub type LoanResult<T> = Result<T, LoanError>;
