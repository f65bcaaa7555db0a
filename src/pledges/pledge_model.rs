use chrono::{Duration, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::PROGRESS_DECIMAL_PRECISION;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PledgeStatus {
    Active,
    Completed,
}

/// Payment cadence of a pledge schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Frequency {
    Weekly,
    BiWeekly,
    Monthly,
    Quarterly,
}

impl Frequency {
    /// Due date `periods` steps after `start`.
    ///
    /// Month and quarter steps are computed from `start` rather than from the
    /// previous due date, so the day-of-month is preserved where possible and
    /// clamped to the last valid day otherwise (Jan 31 + 1 month = Feb 28/29).
    /// `None` only for dates outside chrono's calendar range.
    pub fn due_date_after(&self, start: NaiveDate, periods: u32) -> Option<NaiveDate> {
        match self {
            Frequency::Weekly => start.checked_add_signed(Duration::days(7 * i64::from(periods))),
            Frequency::BiWeekly => {
                start.checked_add_signed(Duration::days(14 * i64::from(periods)))
            }
            Frequency::Monthly => start.checked_add_months(Months::new(periods)),
            Frequency::Quarterly => start.checked_add_months(Months::new(3 * periods)),
        }
    }
}

/// One scheduled payment within a pledge's schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Installment {
    pub id: String,
    pub pledge_id: String,
    /// 1-based position in the schedule.
    pub sequence_number: u32,
    pub due_date: NaiveDate,
    pub due_amount: Decimal,
    pub paid_amount: Decimal,
    pub paid_date: Option<NaiveDate>,
}

impl Installment {
    pub fn is_settled(&self) -> bool {
        self.paid_amount >= self.due_amount
    }

    /// Amount still payable on this installment.
    pub fn payable_amount(&self) -> Decimal {
        self.due_amount - self.paid_amount
    }
}

/// A donor's committed total amount, paid down through an ordered installment
/// schedule.
///
/// Invariants: `paid_amount() <= total_amount`, and the installments' due
/// amounts sum to `total_amount` exactly at schedule-generation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pledge {
    pub id: String,
    pub donor_id: String,
    pub total_amount: Decimal,
    pub category: String,
    pub installment_count: u32,
    pub frequency: Frequency,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub status: PledgeStatus,
    pub installments: Vec<Installment>,
}

impl Pledge {
    pub fn paid_amount(&self) -> Decimal {
        self.installments.iter().map(|i| i.paid_amount).sum()
    }

    pub fn remaining_amount(&self) -> Decimal {
        self.total_amount - self.paid_amount()
    }

    /// Paid share of the commitment, one decimal place, 0 for a zero-amount
    /// pledge.
    pub fn progress_percent(&self) -> Decimal {
        if self.total_amount.is_zero() {
            return Decimal::ZERO;
        }
        (self.paid_amount() / self.total_amount * Decimal::ONE_HUNDRED)
            .round_dp(PROGRESS_DECIMAL_PRECISION)
    }

    /// Earliest due date among installments not yet fully paid.
    pub fn next_due_date(&self) -> Option<NaiveDate> {
        self.installments
            .iter()
            .filter(|i| !i.is_settled())
            .map(|i| i.due_date)
            .min()
    }

    pub fn is_overdue(&self, reference_now: NaiveDate) -> bool {
        self.next_due_date().is_some_and(|due| due < reference_now)
    }

    pub fn is_fulfilled(&self) -> bool {
        self.remaining_amount() <= Decimal::ZERO
    }

    pub fn find_installment(&self, installment_id: &str) -> Option<&Installment> {
        self.installments.iter().find(|i| i.id == installment_id)
    }

    /// Snapshot of all derived pledge state at `reference_now`.
    pub fn status_report(&self, reference_now: NaiveDate) -> PledgeStatusReport {
        PledgeStatusReport {
            pledge_id: self.id.clone(),
            status: self.status,
            paid_amount: self.paid_amount(),
            remaining_amount: self.remaining_amount(),
            progress_percent: self.progress_percent(),
            next_due_date: self.next_due_date(),
            is_overdue: self.is_overdue(reference_now),
        }
    }
}

/// Input for creating a pledge.
///
/// When `installments` is `None` the schedule is generated from the count,
/// frequency and start date; an explicitly supplied schedule must sum to the
/// pledge total.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPledge {
    pub id: Option<String>,
    pub donor_id: String,
    pub total_amount: Decimal,
    pub category: String,
    pub installment_count: u32,
    pub frequency: Frequency,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub installments: Option<Vec<NewInstallment>>,
}

/// One explicitly supplied installment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInstallment {
    pub id: Option<String>,
    pub sequence_number: u32,
    pub due_date: NaiveDate,
    pub due_amount: Decimal,
}

/// Derived pledge state for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PledgeStatusReport {
    pub pledge_id: String,
    pub status: PledgeStatus,
    pub paid_amount: Decimal,
    pub remaining_amount: Decimal,
    pub progress_percent: Decimal,
    pub next_due_date: Option<NaiveDate>,
    pub is_overdue: bool,
}
