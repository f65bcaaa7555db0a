use rust_decimal::{Decimal, RoundingStrategy};
use uuid::Uuid;

use crate::constants::MONEY_DECIMAL_PRECISION;
use crate::errors::Result;
use crate::pledges::pledge_errors::PledgeError;
use crate::pledges::pledge_model::{Frequency, Installment};

/// Generates a pledge's installment schedule.
///
/// Every installment except the last carries the total divided by the count,
/// floored to the cent; the last carries whatever makes the sum exact. The
/// first installment falls on `start_date` itself, later ones advance by the
/// frequency step.
pub fn generate_schedule(
    pledge_id: &str,
    total_amount: Decimal,
    installment_count: u32,
    frequency: Frequency,
    start_date: chrono::NaiveDate,
) -> Result<Vec<Installment>> {
    if installment_count < 1 {
        return Err(PledgeError::InvalidInstallmentCount(installment_count).into());
    }

    let total = total_amount.round_dp(MONEY_DECIMAL_PRECISION);
    let base_amount = (total / Decimal::from(installment_count))
        .round_dp_with_strategy(MONEY_DECIMAL_PRECISION, RoundingStrategy::ToZero);
    // Rounding remainder lands on the final installment so the schedule sums
    // to the total exactly.
    let last_amount = total - base_amount * Decimal::from(installment_count - 1);

    let mut installments = Vec::with_capacity(installment_count as usize);
    for sequence_number in 1..=installment_count {
        let due_date = frequency
            .due_date_after(start_date, sequence_number - 1)
            .ok_or(PledgeError::DueDateOutOfRange { sequence_number })?;
        let due_amount = if sequence_number == installment_count {
            last_amount
        } else {
            base_amount
        };
        installments.push(Installment {
            id: Uuid::new_v4().to_string(),
            pledge_id: pledge_id.to_string(),
            sequence_number,
            due_date,
            due_amount,
            paid_amount: Decimal::ZERO,
            paid_date: None,
        });
    }
    Ok(installments)
}
