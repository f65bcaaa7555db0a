use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// Validation failures raised by allocation-ledger operations.
///
/// Every variant carries the aggregate id and the amounts involved so the
/// caller can present an actionable message. All of these are deterministic
/// business-rule violations, never retried.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BudgetError {
    #[error("allocating {attempted} would over-commit budget '{budget_id}': {available} remains unallocated")]
    AllocationExceedsBudget {
        budget_id: String,
        attempted: Decimal,
        available: Decimal,
    },

    #[error("cannot lower allocation '{allocation_id}' to {requested}: {spent} has already been spent")]
    AllocationBelowSpent {
        allocation_id: String,
        requested: Decimal,
        spent: Decimal,
    },

    #[error("cannot remove allocation '{allocation_id}': {spent} of recorded spend would be discarded")]
    AllocationHasSpend {
        allocation_id: String,
        spent: Decimal,
    },

    #[error("spending {attempted} would exceed allocation '{allocation_id}': {remaining} remains")]
    SpendExceedsAllocation {
        allocation_id: String,
        attempted: Decimal,
        remaining: Decimal,
    },

    #[error("allocation amount must be positive, got {0}")]
    InvalidAllocationAmount(Decimal),

    #[error("spend amount must be positive, got {0}")]
    InvalidSpendAmount(Decimal),

    #[error("budget total amount must be non-negative, got {0}")]
    NegativeTotalAmount(Decimal),

    #[error("budget period ends {end} before it starts {start}")]
    InvalidPeriod { start: NaiveDate, end: NaiveDate },

    #[error("budget '{0}' not found")]
    BudgetNotFound(String),

    #[error("allocation '{0}' not found")]
    AllocationNotFound(String),

    #[error("budget store access failed: {0}")]
    Store(String),
}
