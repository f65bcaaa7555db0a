use std::sync::Arc;

use chrono::NaiveDate;
use log::{debug, warn};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::budgets::budget_errors::BudgetError;
use crate::budgets::budget_model::{
    Allocation, AllocationStatus, AllocationUpdate, AllocationUtilization, Budget, BudgetStatus,
    NewAllocation, NewBudget, UtilizationSummary,
};
use crate::budgets::budget_traits::{BudgetRepositoryTrait, BudgetServiceTrait};
use crate::constants::{MONEY_DECIMAL_PRECISION, PERCENT_DECIMAL_PRECISION};
use crate::errors::{Result, ValidationError};

/// Allocation ledger.
///
/// Keeps a budget's allocations internally consistent: the sum of allocated
/// amounts never exceeds the budget total, and spend never exceeds its
/// allocation. Every mutating operation loads the aggregate, validates fully,
/// and only then saves, so a rejected operation leaves the store untouched.
pub struct BudgetService {
    repository: Arc<dyn BudgetRepositoryTrait>,
}

impl BudgetService {
    pub fn new(repository: Arc<dyn BudgetRepositoryTrait>) -> Self {
        BudgetService { repository }
    }
}

impl BudgetServiceTrait for BudgetService {
    fn create_budget(&self, new_budget: NewBudget) -> Result<Budget> {
        if new_budget.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".to_string()).into());
        }
        let total_amount = new_budget.total_amount.round_dp(MONEY_DECIMAL_PRECISION);
        if total_amount < Decimal::ZERO {
            return Err(BudgetError::NegativeTotalAmount(total_amount).into());
        }
        if new_budget.period_end < new_budget.period_start {
            return Err(BudgetError::InvalidPeriod {
                start: new_budget.period_start,
                end: new_budget.period_end,
            }
            .into());
        }

        let budget = Budget {
            id: new_budget
                .id
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            name: new_budget.name,
            total_amount,
            period_start: new_budget.period_start,
            period_end: new_budget.period_end,
            status: BudgetStatus::Active,
            allocations: Vec::new(),
        };
        debug!("Created budget '{}' with total {}", budget.id, total_amount);
        self.repository.save_budget(budget)
    }

    fn get_budget(&self, budget_id: &str) -> Result<Budget> {
        self.repository.get_budget(budget_id)
    }

    fn list_budgets(&self) -> Result<Vec<Budget>> {
        self.repository.list_budgets()
    }

    fn add_allocation(&self, budget_id: &str, input: NewAllocation) -> Result<Allocation> {
        let amount = input.allocated_amount.round_dp(MONEY_DECIMAL_PRECISION);
        if amount <= Decimal::ZERO {
            return Err(BudgetError::InvalidAllocationAmount(amount).into());
        }

        let mut budget = self.repository.get_budget(budget_id)?;
        let current_total = budget.allocated_total();
        // Boundary inclusive: a request equal to the remaining amount passes.
        if current_total + amount > budget.total_amount {
            warn!(
                "Rejected allocation of {} on budget '{}': {} already allocated of {}",
                amount, budget.id, current_total, budget.total_amount
            );
            return Err(BudgetError::AllocationExceedsBudget {
                budget_id: budget.id,
                attempted: amount,
                available: budget.total_amount - current_total,
            }
            .into());
        }

        let allocation = Allocation {
            id: input.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            budget_id: budget.id.clone(),
            name: input.name,
            kind: input.kind,
            allocated_amount: amount,
            spent_amount: Decimal::ZERO,
            responsible_party: input.responsible_party,
            description: input.description,
            status: AllocationStatus::Active,
            last_spend_date: None,
        };
        budget.allocations.push(allocation.clone());
        self.repository.save_budget(budget)?;
        debug!(
            "Added allocation '{}' of {} to budget '{}'",
            allocation.id, amount, budget_id
        );
        Ok(allocation)
    }

    fn update_allocation(
        &self,
        budget_id: &str,
        allocation_id: &str,
        patch: AllocationUpdate,
    ) -> Result<Allocation> {
        let mut budget = self.repository.get_budget(budget_id)?;
        let position = budget
            .allocations
            .iter()
            .position(|a| a.id == allocation_id)
            .ok_or_else(|| BudgetError::AllocationNotFound(allocation_id.to_string()))?;

        let current = &budget.allocations[position];
        let new_amount = patch
            .allocated_amount
            .map(|a| a.round_dp(MONEY_DECIMAL_PRECISION))
            .unwrap_or(current.allocated_amount);
        if new_amount <= Decimal::ZERO {
            return Err(BudgetError::InvalidAllocationAmount(new_amount).into());
        }
        // Spend is historical fact; the allocation cannot shrink below it.
        if new_amount < current.spent_amount {
            return Err(BudgetError::AllocationBelowSpent {
                allocation_id: allocation_id.to_string(),
                requested: new_amount,
                spent: current.spent_amount,
            }
            .into());
        }
        // Over-commitment check excludes the allocation being updated.
        let others_total = budget.allocated_total() - current.allocated_amount;
        if others_total + new_amount > budget.total_amount {
            warn!(
                "Rejected update of allocation '{}' to {}: would over-commit budget '{}'",
                allocation_id, new_amount, budget.id
            );
            return Err(BudgetError::AllocationExceedsBudget {
                budget_id: budget.id,
                attempted: new_amount,
                available: budget.total_amount - others_total,
            }
            .into());
        }

        let allocation = &mut budget.allocations[position];
        allocation.allocated_amount = new_amount;
        if let Some(name) = patch.name {
            allocation.name = name;
        }
        if let Some(kind) = patch.kind {
            allocation.kind = kind;
        }
        if let Some(responsible_party) = patch.responsible_party {
            allocation.responsible_party = responsible_party;
        }
        if let Some(description) = patch.description {
            allocation.description = Some(description);
        }
        if let Some(status) = patch.status {
            allocation.status = status;
        }
        let updated = allocation.clone();
        self.repository.save_budget(budget)?;
        Ok(updated)
    }

    fn remove_allocation(&self, budget_id: &str, allocation_id: &str) -> Result<()> {
        let mut budget = self.repository.get_budget(budget_id)?;
        let allocation = budget
            .find_allocation(allocation_id)
            .ok_or_else(|| BudgetError::AllocationNotFound(allocation_id.to_string()))?;
        // Removal never discards spend history; the caller must zero or
        // transfer spend first.
        if allocation.spent_amount > Decimal::ZERO {
            return Err(BudgetError::AllocationHasSpend {
                allocation_id: allocation_id.to_string(),
                spent: allocation.spent_amount,
            }
            .into());
        }
        budget.allocations.retain(|a| a.id != allocation_id);
        self.repository.save_budget(budget)?;
        debug!(
            "Removed allocation '{}' from budget '{}'",
            allocation_id, budget_id
        );
        Ok(())
    }

    fn record_spend(
        &self,
        budget_id: &str,
        allocation_id: &str,
        amount: Decimal,
        date: NaiveDate,
    ) -> Result<Allocation> {
        let amount = amount.round_dp(MONEY_DECIMAL_PRECISION);
        if amount <= Decimal::ZERO {
            return Err(BudgetError::InvalidSpendAmount(amount).into());
        }

        let mut budget = self.repository.get_budget(budget_id)?;
        let allocation = budget
            .allocations
            .iter_mut()
            .find(|a| a.id == allocation_id)
            .ok_or_else(|| BudgetError::AllocationNotFound(allocation_id.to_string()))?;
        if allocation.spent_amount + amount > allocation.allocated_amount {
            warn!(
                "Rejected spend of {} on allocation '{}': {} of {} already spent",
                amount, allocation_id, allocation.spent_amount, allocation.allocated_amount
            );
            return Err(BudgetError::SpendExceedsAllocation {
                allocation_id: allocation_id.to_string(),
                attempted: amount,
                remaining: allocation.remaining_amount(),
            }
            .into());
        }
        allocation.spent_amount += amount;
        allocation.last_spend_date = Some(date);
        let updated = allocation.clone();
        self.repository.save_budget(budget)?;
        debug!(
            "Recorded spend of {} on allocation '{}'",
            amount, allocation_id
        );
        Ok(updated)
    }

    fn utilization_summary(&self, budget_id: &str) -> Result<UtilizationSummary> {
        let budget = self.repository.get_budget(budget_id)?;
        let total_allocated = budget.allocated_total();
        let total_spent = budget.spent_total();

        let allocation_percent = if budget.total_amount.is_zero() {
            Decimal::ZERO
        } else {
            (total_allocated / budget.total_amount * Decimal::ONE_HUNDRED)
                .round_dp(PERCENT_DECIMAL_PRECISION)
                .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
        };

        let per_allocation = budget
            .allocations
            .iter()
            .map(|a| AllocationUtilization {
                allocation_id: a.id.clone(),
                name: a.name.clone(),
                kind: a.kind,
                status: a.status,
                allocated_amount: a.allocated_amount,
                spent_amount: a.spent_amount,
                remaining_amount: a.remaining_amount(),
                utilization_percent: a.utilization_percent(),
                share_of_budget_percent: a.share_of_budget_percent(budget.total_amount),
            })
            .collect();

        Ok(UtilizationSummary {
            budget_id: budget.id,
            total_amount: budget.total_amount,
            total_allocated,
            total_spent,
            total_remaining: total_allocated - total_spent,
            allocation_percent,
            per_allocation,
        })
    }
}
