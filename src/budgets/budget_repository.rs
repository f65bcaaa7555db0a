use std::collections::HashMap;
use std::sync::RwLock;

use crate::budgets::budget_errors::BudgetError;
use crate::budgets::budget_model::Budget;
use crate::budgets::budget_traits::BudgetRepositoryTrait;
use crate::errors::Result;

/// In-memory budget store.
///
/// Persistence proper is a caller concern; this implementation backs tests and
/// single-process deployments. Each `save_budget` replaces the whole aggregate,
/// matching the one-operation-one-transaction boundary the service assumes.
#[derive(Default)]
pub struct InMemoryBudgetRepository {
    budgets: RwLock<HashMap<String, Budget>>,
}

impl InMemoryBudgetRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BudgetRepositoryTrait for InMemoryBudgetRepository {
    fn get_budget(&self, budget_id: &str) -> Result<Budget> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| BudgetError::Store(e.to_string()))?;
        budgets
            .get(budget_id)
            .cloned()
            .ok_or_else(|| BudgetError::BudgetNotFound(budget_id.to_string()).into())
    }

    fn list_budgets(&self) -> Result<Vec<Budget>> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| BudgetError::Store(e.to_string()))?;
        let mut all: Vec<Budget> = budgets.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    fn save_budget(&self, budget: Budget) -> Result<Budget> {
        let mut budgets = self
            .budgets
            .write()
            .map_err(|e| BudgetError::Store(e.to_string()))?;
        budgets.insert(budget.id.clone(), budget.clone());
        Ok(budget)
    }
}
