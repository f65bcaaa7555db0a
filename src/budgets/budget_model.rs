use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::PERCENT_DECIMAL_PRECISION;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BudgetStatus {
    Active,
    Completed,
    OnHold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AllocationStatus {
    Active,
    Completed,
}

/// What a budget allocation is earmarked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AllocationKind {
    Department,
    Group,
    Event,
    Project,
}

/// A bounded pool of money for a period, subdivided into allocations.
///
/// Invariant: the sum of `allocations[].allocated_amount` never exceeds
/// `total_amount`. Only the allocation operations on `BudgetService` mutate
/// a budget, and each re-validates the invariant before saving.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: String,
    pub name: String,
    pub total_amount: Decimal,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub status: BudgetStatus,
    pub allocations: Vec<Allocation>,
}

impl Budget {
    /// Sum of all allocated amounts across this budget's allocations.
    pub fn allocated_total(&self) -> Decimal {
        self.allocations.iter().map(|a| a.allocated_amount).sum()
    }

    /// Sum of all recorded spend across this budget's allocations.
    pub fn spent_total(&self) -> Decimal {
        self.allocations.iter().map(|a| a.spent_amount).sum()
    }

    /// Portion of the total amount not yet committed to any allocation.
    pub fn unallocated_amount(&self) -> Decimal {
        self.total_amount - self.allocated_total()
    }

    pub fn find_allocation(&self, allocation_id: &str) -> Option<&Allocation> {
        self.allocations.iter().find(|a| a.id == allocation_id)
    }
}

/// A named portion of a budget assigned to a department, group, event or
/// project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Allocation {
    pub id: String,
    pub budget_id: String,
    pub name: String,
    pub kind: AllocationKind,
    pub allocated_amount: Decimal,
    pub spent_amount: Decimal,
    pub responsible_party: String,
    pub description: Option<String>,
    pub status: AllocationStatus,
    pub last_spend_date: Option<NaiveDate>,
}

impl Allocation {
    /// Allocated amount not yet spent. Validation keeps this non-negative;
    /// spend beyond the allocation is rejected, never clamped.
    pub fn remaining_amount(&self) -> Decimal {
        self.allocated_amount - self.spent_amount
    }

    /// Spent amount as a percentage of the allocated amount, 0 when nothing
    /// is allocated.
    pub fn utilization_percent(&self) -> Decimal {
        if self.allocated_amount.is_zero() {
            return Decimal::ZERO;
        }
        (self.spent_amount / self.allocated_amount * Decimal::ONE_HUNDRED)
            .round_dp(PERCENT_DECIMAL_PRECISION)
    }

    /// This allocation's share of the owning budget's total amount.
    pub fn share_of_budget_percent(&self, budget_total: Decimal) -> Decimal {
        if budget_total.is_zero() {
            return Decimal::ZERO;
        }
        (self.allocated_amount / budget_total * Decimal::ONE_HUNDRED)
            .round_dp(PERCENT_DECIMAL_PRECISION)
    }
}

/// Input for creating a budget
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBudget {
    pub id: Option<String>,
    pub name: String,
    pub total_amount: Decimal,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
}

/// Input for adding an allocation to a budget
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAllocation {
    pub id: Option<String>,
    pub name: String,
    pub kind: AllocationKind,
    pub allocated_amount: Decimal,
    pub responsible_party: String,
    pub description: Option<String>,
}

/// Patch for updating an allocation; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationUpdate {
    pub name: Option<String>,
    pub kind: Option<AllocationKind>,
    pub allocated_amount: Option<Decimal>,
    pub responsible_party: Option<String>,
    pub description: Option<String>,
    pub status: Option<AllocationStatus>,
}

/// Utilization read model for a whole budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UtilizationSummary {
    pub budget_id: String,
    pub total_amount: Decimal,
    pub total_allocated: Decimal,
    pub total_spent: Decimal,
    pub total_remaining: Decimal,
    /// Allocated share of the budget total, clamped to [0, 100] for display.
    /// Invariant checks in the mutating operations always compare unclamped.
    pub allocation_percent: Decimal,
    pub per_allocation: Vec<AllocationUtilization>,
}

/// Utilization read model for a single allocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationUtilization {
    pub allocation_id: String,
    pub name: String,
    pub kind: AllocationKind,
    pub status: AllocationStatus,
    pub allocated_amount: Decimal,
    pub spent_amount: Decimal,
    pub remaining_amount: Decimal,
    pub utilization_percent: Decimal,
    pub share_of_budget_percent: Decimal,
}
