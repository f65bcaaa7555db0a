use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::budgets::budget_model::{
    Allocation, AllocationUpdate, Budget, NewAllocation, NewBudget, UtilizationSummary,
};
use crate::errors::Result;

/// Trait for budget storage operations.
///
/// A persistence layer implements this with whatever transaction boundary it
/// has; the core only requires that `save_budget` replaces the whole aggregate
/// atomically.
pub trait BudgetRepositoryTrait: Send + Sync {
    fn get_budget(&self, budget_id: &str) -> Result<Budget>;
    fn list_budgets(&self) -> Result<Vec<Budget>>;
    fn save_budget(&self, budget: Budget) -> Result<Budget>;
}

/// Trait for allocation-ledger operations
pub trait BudgetServiceTrait: Send + Sync {
    fn create_budget(&self, new_budget: NewBudget) -> Result<Budget>;
    fn get_budget(&self, budget_id: &str) -> Result<Budget>;
    fn list_budgets(&self) -> Result<Vec<Budget>>;

    fn add_allocation(&self, budget_id: &str, input: NewAllocation) -> Result<Allocation>;
    fn update_allocation(
        &self,
        budget_id: &str,
        allocation_id: &str,
        patch: AllocationUpdate,
    ) -> Result<Allocation>;
    fn remove_allocation(&self, budget_id: &str, allocation_id: &str) -> Result<()>;
    fn record_spend(
        &self,
        budget_id: &str,
        allocation_id: &str,
        amount: Decimal,
        date: NaiveDate,
    ) -> Result<Allocation>;

    fn utilization_summary(&self, budget_id: &str) -> Result<UtilizationSummary>;
}
