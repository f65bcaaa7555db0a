use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::errors::Result;
use crate::pledges::pledge_model::{NewPledge, Pledge, PledgeStatusReport};

/// Trait for pledge storage operations
pub trait PledgeRepositoryTrait: Send + Sync {
    fn get_pledge(&self, pledge_id: &str) -> Result<Pledge>;
    fn list_pledges(&self) -> Result<Vec<Pledge>>;
    fn list_pledges_by_donor(&self, donor_id: &str) -> Result<Vec<Pledge>>;
    fn save_pledge(&self, pledge: Pledge) -> Result<Pledge>;
}

/// Trait for pledge-tracker operations
pub trait PledgeServiceTrait: Send + Sync {
    fn create_pledge(&self, new_pledge: NewPledge) -> Result<Pledge>;
    fn get_pledge(&self, pledge_id: &str) -> Result<Pledge>;
    fn list_pledges(&self) -> Result<Vec<Pledge>>;
    fn list_pledges_by_donor(&self, donor_id: &str) -> Result<Vec<Pledge>>;

    fn record_payment(
        &self,
        pledge_id: &str,
        installment_id: &str,
        amount: Decimal,
        date: NaiveDate,
    ) -> Result<Pledge>;

    fn status(&self, pledge_id: &str, reference_now: NaiveDate) -> Result<PledgeStatusReport>;
}
