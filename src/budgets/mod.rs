pub mod budget_errors;
pub mod budget_model;
pub mod budget_repository;
pub mod budget_service;
pub mod budget_traits;

pub use budget_errors::BudgetError;
pub use budget_model::{
    Allocation, AllocationKind, AllocationStatus, AllocationUpdate, AllocationUtilization, Budget,
    BudgetStatus, NewAllocation, NewBudget, UtilizationSummary,
};
pub use budget_repository::InMemoryBudgetRepository;
pub use budget_service::BudgetService;
pub use budget_traits::{BudgetRepositoryTrait, BudgetServiceTrait};
