use rust_decimal::Decimal;
use thiserror::Error;

/// Validation failures raised by pledge-tracker operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PledgeError {
    #[error("installment count must be at least 1, got {0}")]
    InvalidInstallmentCount(u32),

    #[error("payment of {attempted} is not accepted on installment '{installment_id}': {payable} is payable")]
    InvalidPaymentAmount {
        installment_id: String,
        attempted: Decimal,
        payable: Decimal,
    },

    #[error("pledge '{0}' is already fully paid")]
    PledgeFullyPaid(String),

    #[error("supplied installments sum to {actual}, expected the pledge total {expected}")]
    ScheduleTotalMismatch { expected: Decimal, actual: Decimal },

    #[error("pledge total amount must be non-negative, got {0}")]
    NegativeTotalAmount(Decimal),

    #[error("installment {sequence_number} due date falls outside the supported calendar range")]
    DueDateOutOfRange { sequence_number: u32 },

    #[error("pledge '{0}' not found")]
    PledgeNotFound(String),

    #[error("installment '{0}' not found")]
    InstallmentNotFound(String),

    #[error("pledge store access failed: {0}")]
    Store(String),
}
