use thiserror::Error;

use crate::budgets::BudgetError;
use crate::pledges::PledgeError;

// Create a type alias for Result using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the bookkeeping core
#[derive(Error, Debug)]
pub enum Error {
    #[error("Budget operation failed: {0}")]
    Budget(#[from] BudgetError),

    #[error("Pledge operation failed: {0}")]
    Pledge(#[from] PledgeError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),
}

// Add From implementation for rust_decimal::Error
impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err))
    }
}
