use std::sync::Arc;

use chrono::NaiveDate;
use log::{debug, warn};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::constants::MONEY_DECIMAL_PRECISION;
use crate::errors::{Result, ValidationError};
use crate::pledges::pledge_errors::PledgeError;
use crate::pledges::pledge_model::{
    Installment, NewPledge, Pledge, PledgeStatus, PledgeStatusReport,
};
use crate::pledges::pledge_traits::{PledgeRepositoryTrait, PledgeServiceTrait};
use crate::pledges::schedule::generate_schedule;

/// Pledge schedule tracker.
///
/// Creates pledges with an exact installment schedule and keeps all derived
/// state (paid/remaining amounts, progress, next due date, overdue flag,
/// fulfillment status) consistent through payment recording. Each payment
/// mutates exactly one installment.
pub struct PledgeService {
    repository: Arc<dyn PledgeRepositoryTrait>,
}

impl PledgeService {
    pub fn new(repository: Arc<dyn PledgeRepositoryTrait>) -> Self {
        PledgeService { repository }
    }

    fn build_explicit_schedule(
        pledge_id: &str,
        total_amount: Decimal,
        supplied: Vec<crate::pledges::pledge_model::NewInstallment>,
    ) -> Result<Vec<Installment>> {
        if supplied.is_empty() {
            return Err(PledgeError::InvalidInstallmentCount(0).into());
        }
        let mut installments: Vec<Installment> = supplied
            .into_iter()
            .map(|i| Installment {
                id: i.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
                pledge_id: pledge_id.to_string(),
                sequence_number: i.sequence_number,
                due_date: i.due_date,
                due_amount: i.due_amount.round_dp(MONEY_DECIMAL_PRECISION),
                paid_amount: Decimal::ZERO,
                paid_date: None,
            })
            .collect();
        installments.sort_by_key(|i| i.sequence_number);

        let scheduled: Decimal = installments.iter().map(|i| i.due_amount).sum();
        if scheduled != total_amount {
            return Err(PledgeError::ScheduleTotalMismatch {
                expected: total_amount,
                actual: scheduled,
            }
            .into());
        }
        Ok(installments)
    }
}

impl PledgeServiceTrait for PledgeService {
    fn create_pledge(&self, new_pledge: NewPledge) -> Result<Pledge> {
        if new_pledge.donor_id.trim().is_empty() {
            return Err(ValidationError::MissingField("donorId".to_string()).into());
        }
        let total_amount = new_pledge.total_amount.round_dp(MONEY_DECIMAL_PRECISION);
        if total_amount < Decimal::ZERO {
            return Err(PledgeError::NegativeTotalAmount(total_amount).into());
        }

        let id = new_pledge
            .id
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let installments = match new_pledge.installments {
            Some(supplied) => Self::build_explicit_schedule(&id, total_amount, supplied)?,
            None => generate_schedule(
                &id,
                total_amount,
                new_pledge.installment_count,
                new_pledge.frequency,
                new_pledge.start_date,
            )?,
        };

        let installment_count = installments.len() as u32;
        let end_date = new_pledge
            .end_date
            .or_else(|| installments.iter().map(|i| i.due_date).max());
        let mut pledge = Pledge {
            id,
            donor_id: new_pledge.donor_id,
            total_amount,
            category: new_pledge.category,
            installment_count,
            frequency: new_pledge.frequency,
            start_date: new_pledge.start_date,
            end_date,
            status: PledgeStatus::Active,
            installments,
        };
        if pledge.is_fulfilled() {
            pledge.status = PledgeStatus::Completed;
        }
        debug!(
            "Created pledge '{}' of {} across {} installments",
            pledge.id, total_amount, installment_count
        );
        self.repository.save_pledge(pledge)
    }

    fn get_pledge(&self, pledge_id: &str) -> Result<Pledge> {
        self.repository.get_pledge(pledge_id)
    }

    fn list_pledges(&self) -> Result<Vec<Pledge>> {
        self.repository.list_pledges()
    }

    fn list_pledges_by_donor(&self, donor_id: &str) -> Result<Vec<Pledge>> {
        self.repository.list_pledges_by_donor(donor_id)
    }

    fn record_payment(
        &self,
        pledge_id: &str,
        installment_id: &str,
        amount: Decimal,
        date: NaiveDate,
    ) -> Result<Pledge> {
        let mut pledge = self.repository.get_pledge(pledge_id)?;
        if pledge.is_fulfilled() {
            return Err(PledgeError::PledgeFullyPaid(pledge.id).into());
        }

        let amount = amount.round_dp(MONEY_DECIMAL_PRECISION);
        let installment = pledge
            .installments
            .iter_mut()
            .find(|i| i.id == installment_id)
            .ok_or_else(|| PledgeError::InstallmentNotFound(installment_id.to_string()))?;
        let payable = installment.payable_amount();
        // One call pays into exactly one installment; excess belongs to a
        // different installment by policy.
        if amount <= Decimal::ZERO || amount > payable {
            warn!(
                "Rejected payment of {} on installment '{}': {} payable",
                amount, installment_id, payable
            );
            return Err(PledgeError::InvalidPaymentAmount {
                installment_id: installment_id.to_string(),
                attempted: amount,
                payable,
            }
            .into());
        }

        installment.paid_amount += amount;
        installment.paid_date = Some(date);
        if pledge.is_fulfilled() {
            pledge.status = PledgeStatus::Completed;
        }
        debug!(
            "Recorded payment of {} on pledge '{}', {} remaining",
            amount,
            pledge.id,
            pledge.remaining_amount()
        );
        self.repository.save_pledge(pledge)
    }

    fn status(&self, pledge_id: &str, reference_now: NaiveDate) -> Result<PledgeStatusReport> {
        let pledge = self.repository.get_pledge(pledge_id)?;
        Ok(pledge.status_report(reference_now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use crate::pledges::pledge_model::{Frequency, NewInstallment};
    use crate::pledges::pledge_repository::InMemoryPledgeRepository;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn service() -> PledgeService {
        PledgeService::new(Arc::new(InMemoryPledgeRepository::new()))
    }

    fn monthly_pledge(
        service: &PledgeService,
        total: Decimal,
        count: u32,
        start: NaiveDate,
    ) -> Pledge {
        service
            .create_pledge(NewPledge {
                id: Some("p-1".to_string()),
                donor_id: "donor-7".to_string(),
                total_amount: total,
                category: "Building Fund".to_string(),
                installment_count: count,
                frequency: Frequency::Monthly,
                start_date: start,
                end_date: None,
                installments: None,
            })
            .unwrap()
    }

    #[test]
    fn create_pledge_generates_an_exact_schedule() {
        let service = service();
        let pledge = monthly_pledge(&service, dec!(1000), 3, date(2024, 1, 1));

        let sum: Decimal = pledge.installments.iter().map(|i| i.due_amount).sum();
        assert_eq!(sum, dec!(1000));
        assert_eq!(pledge.installment_count, 3);
        assert_eq!(pledge.status, PledgeStatus::Active);
        // End date defaults to the final installment's due date.
        assert_eq!(pledge.end_date, Some(date(2024, 3, 1)));
    }

    #[test]
    fn create_pledge_rejects_blank_donor() {
        let result = service().create_pledge(NewPledge {
            id: None,
            donor_id: "  ".to_string(),
            total_amount: dec!(100),
            category: "Missions".to_string(),
            installment_count: 1,
            frequency: Frequency::Weekly,
            start_date: date(2024, 1, 1),
            end_date: None,
            installments: None,
        });
        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::MissingField(_)))
        ));
    }

    #[test]
    fn explicit_schedule_must_sum_to_the_total() {
        let supplied = vec![
            NewInstallment {
                id: None,
                sequence_number: 1,
                due_date: date(2024, 1, 1),
                due_amount: dec!(60),
            },
            NewInstallment {
                id: None,
                sequence_number: 2,
                due_date: date(2024, 6, 1),
                due_amount: dec!(30),
            },
        ];
        let result = service().create_pledge(NewPledge {
            id: None,
            donor_id: "donor-7".to_string(),
            total_amount: dec!(100),
            category: "Missions".to_string(),
            installment_count: 2,
            frequency: Frequency::Monthly,
            start_date: date(2024, 1, 1),
            end_date: None,
            installments: Some(supplied),
        });
        assert!(matches!(
            result,
            Err(Error::Pledge(PledgeError::ScheduleTotalMismatch {
                expected,
                actual
            })) if expected == dec!(100) && actual == dec!(90)
        ));
    }

    #[test]
    fn overdue_is_derived_from_the_earliest_unpaid_installment() {
        let service = service();
        let pledge = monthly_pledge(&service, dec!(200), 2, date(2024, 1, 1));

        let report = service.status("p-1", date(2024, 2, 1)).unwrap();
        assert!(report.is_overdue);
        assert_eq!(report.next_due_date, Some(date(2024, 1, 1)));

        // Fully paying the first installment advances the next due date.
        let first = pledge.installments[0].id.clone();
        service
            .record_payment("p-1", &first, dec!(100), date(2024, 2, 1))
            .unwrap();
        let report = service.status("p-1", date(2024, 2, 1)).unwrap();
        assert_eq!(report.next_due_date, Some(date(2024, 2, 1)));
        // Due today is not overdue yet.
        assert!(!report.is_overdue);

        let second = pledge.installments[1].id.clone();
        service
            .record_payment("p-1", &second, dec!(100), date(2024, 2, 1))
            .unwrap();
        let report = service.status("p-1", date(2024, 2, 1)).unwrap();
        assert_eq!(report.next_due_date, None);
        assert!(!report.is_overdue);
        assert_eq!(report.status, PledgeStatus::Completed);
        assert_eq!(report.progress_percent, dec!(100.0));
    }

    #[test]
    fn partial_payment_keeps_the_installment_next_due() {
        let service = service();
        let pledge = monthly_pledge(&service, dec!(300), 3, date(2024, 1, 1));
        let first = pledge.installments[0].id.clone();

        let updated = service
            .record_payment("p-1", &first, dec!(40), date(2024, 1, 2))
            .unwrap();
        assert_eq!(updated.paid_amount(), dec!(40));
        assert_eq!(updated.next_due_date(), Some(date(2024, 1, 1)));
        assert_eq!(updated.installments[0].paid_date, Some(date(2024, 1, 2)));
        // One decimal place of progress.
        assert_eq!(updated.progress_percent(), dec!(13.3));
    }

    #[test]
    fn overpaying_one_installment_is_rejected() {
        let service = service();
        let pledge = monthly_pledge(&service, dec!(300), 3, date(2024, 1, 1));
        let first = pledge.installments[0].id.clone();

        let result = service.record_payment("p-1", &first, dec!(100.01), date(2024, 1, 2));
        match result {
            Err(Error::Pledge(PledgeError::InvalidPaymentAmount {
                attempted, payable, ..
            })) => {
                assert_eq!(attempted, dec!(100.01));
                assert_eq!(payable, dec!(100));
            }
            other => panic!("expected InvalidPaymentAmount, got {:?}", other.err()),
        }
        // Rejection leaves the pledge untouched.
        assert_eq!(service.get_pledge("p-1").unwrap().paid_amount(), Decimal::ZERO);
    }

    #[test]
    fn non_positive_payments_are_rejected() {
        let service = service();
        let pledge = monthly_pledge(&service, dec!(300), 3, date(2024, 1, 1));
        let first = pledge.installments[0].id.clone();

        for bad in [dec!(0), dec!(-10)] {
            assert!(matches!(
                service.record_payment("p-1", &first, bad, date(2024, 1, 2)),
                Err(Error::Pledge(PledgeError::InvalidPaymentAmount { .. }))
            ));
        }
    }

    #[test]
    fn payments_after_fulfillment_are_rejected() {
        let service = service();
        let pledge = monthly_pledge(&service, dec!(100), 1, date(2024, 1, 1));
        let only = pledge.installments[0].id.clone();
        service
            .record_payment("p-1", &only, dec!(100), date(2024, 1, 5))
            .unwrap();

        assert!(matches!(
            service.record_payment("p-1", &only, dec!(1), date(2024, 1, 6)),
            Err(Error::Pledge(PledgeError::PledgeFullyPaid(_)))
        ));
    }

    #[test]
    fn zero_total_pledge_reports_zero_progress() {
        let service = service();
        monthly_pledge(&service, dec!(0), 1, date(2024, 1, 1));

        let report = service.status("p-1", date(2024, 6, 1)).unwrap();
        assert_eq!(report.progress_percent, Decimal::ZERO);
        assert_eq!(report.remaining_amount, Decimal::ZERO);
        assert_eq!(report.next_due_date, None);
        assert!(!report.is_overdue);
    }

    #[test]
    fn unknown_ids_report_not_found() {
        let service = service();
        monthly_pledge(&service, dec!(100), 1, date(2024, 1, 1));

        assert!(matches!(
            service.status("nope", date(2024, 1, 1)),
            Err(Error::Pledge(PledgeError::PledgeNotFound(_)))
        ));
        assert!(matches!(
            service.record_payment("p-1", "nope", dec!(1), date(2024, 1, 1)),
            Err(Error::Pledge(PledgeError::InstallmentNotFound(_)))
        ));
    }

    proptest! {
        // Valid or rejected, random payment attempts never push progress
        // backwards or past 100.
        #[test]
        fn progress_is_monotonic_and_capped(
            attempts in proptest::collection::vec((0usize..4, 1u32..=60_000), 1..40)
        ) {
            let service = service();
            let pledge = monthly_pledge(&service, dec!(1000), 4, date(2024, 1, 1));
            let ids: Vec<String> = pledge.installments.iter().map(|i| i.id.clone()).collect();

            let mut last_progress = Decimal::ZERO;
            for (index, cents) in attempts {
                let amount = Decimal::new(i64::from(cents), 2);
                let _ = service.record_payment("p-1", &ids[index], amount, date(2024, 2, 1));
                let progress = service.get_pledge("p-1").unwrap().progress_percent();
                prop_assert!(progress >= last_progress);
                prop_assert!(progress <= dec!(100));
                last_progress = progress;
            }
        }
    }
}
