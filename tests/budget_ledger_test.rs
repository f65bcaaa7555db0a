use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use stewardship_core::budgets::{
    AllocationKind, BudgetError, BudgetService, BudgetServiceTrait, InMemoryBudgetRepository,
    NewAllocation, NewBudget,
};
use stewardship_core::Error;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn department(name: &str, amount: rust_decimal::Decimal) -> NewAllocation {
    NewAllocation {
        id: None,
        name: name.to_string(),
        kind: AllocationKind::Department,
        allocated_amount: amount,
        responsible_party: "Finance Committee".to_string(),
        description: None,
    }
}

#[test]
fn budget_is_committed_to_the_last_cent() {
    let service = BudgetService::new(Arc::new(InMemoryBudgetRepository::new()));
    let budget = service
        .create_budget(NewBudget {
            id: None,
            name: "Annual Ministry Budget".to_string(),
            total_amount: dec!(25000),
            period_start: date(2024, 1, 1),
            period_end: date(2024, 12, 31),
        })
        .unwrap();

    service
        .add_allocation(&budget.id, department("Dept A", dec!(15000)))
        .unwrap();
    service
        .add_allocation(&budget.id, department("Dept B", dec!(6000)))
        .unwrap();

    // 15000 + 6000 + 5000 would over-commit the 25000 total.
    let rejected = service.add_allocation(&budget.id, department("Dept C", dec!(5000)));
    match rejected {
        Err(Error::Budget(BudgetError::AllocationExceedsBudget {
            attempted,
            available,
            ..
        })) => {
            assert_eq!(attempted, dec!(5000));
            assert_eq!(available, dec!(4000));
        }
        other => panic!("expected AllocationExceedsBudget, got {:?}", other.err()),
    }

    service
        .add_allocation(&budget.id, department("Dept C", dec!(4000)))
        .unwrap();

    let summary = service.utilization_summary(&budget.id).unwrap();
    assert_eq!(summary.total_allocated, dec!(25000));
    assert_eq!(summary.allocation_percent, dec!(100));
    assert_eq!(summary.per_allocation.len(), 3);
}

#[test]
fn utilization_summary_serializes_in_camel_case() {
    let service = BudgetService::new(Arc::new(InMemoryBudgetRepository::new()));
    let budget = service
        .create_budget(NewBudget {
            id: Some("b-wire".to_string()),
            name: "Outreach".to_string(),
            total_amount: dec!(500),
            period_start: date(2024, 1, 1),
            period_end: date(2024, 6, 30),
        })
        .unwrap();
    let allocation = service
        .add_allocation(&budget.id, department("Street Team", dec!(200)))
        .unwrap();
    service
        .record_spend(&budget.id, &allocation.id, dec!(50), date(2024, 2, 14))
        .unwrap();

    let summary = service.utilization_summary(&budget.id).unwrap();
    let json = serde_json::to_value(&summary).unwrap();

    assert_eq!(json["budgetId"], "b-wire");
    assert_eq!(json["totalAllocated"], 200.0);
    assert_eq!(json["allocationPercent"], 40.0);
    let row = &json["perAllocation"][0];
    assert_eq!(row["utilizationPercent"], 25.0);
    assert_eq!(row["shareOfBudgetPercent"], 40.0);
    assert_eq!(row["kind"], "department");
}
