use std::collections::HashMap;
use std::sync::RwLock;

use crate::errors::Result;
use crate::pledges::pledge_errors::PledgeError;
use crate::pledges::pledge_model::Pledge;
use crate::pledges::pledge_traits::PledgeRepositoryTrait;

/// In-memory pledge store, mirroring `InMemoryBudgetRepository`.
#[derive(Default)]
pub struct InMemoryPledgeRepository {
    pledges: RwLock<HashMap<String, Pledge>>,
}

impl InMemoryPledgeRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PledgeRepositoryTrait for InMemoryPledgeRepository {
    fn get_pledge(&self, pledge_id: &str) -> Result<Pledge> {
        let pledges = self
            .pledges
            .read()
            .map_err(|e| PledgeError::Store(e.to_string()))?;
        pledges
            .get(pledge_id)
            .cloned()
            .ok_or_else(|| PledgeError::PledgeNotFound(pledge_id.to_string()).into())
    }

    fn list_pledges(&self) -> Result<Vec<Pledge>> {
        let pledges = self
            .pledges
            .read()
            .map_err(|e| PledgeError::Store(e.to_string()))?;
        let mut all: Vec<Pledge> = pledges.values().cloned().collect();
        all.sort_by(|a, b| a.start_date.cmp(&b.start_date).then(a.id.cmp(&b.id)));
        Ok(all)
    }

    fn list_pledges_by_donor(&self, donor_id: &str) -> Result<Vec<Pledge>> {
        Ok(self
            .list_pledges()?
            .into_iter()
            .filter(|p| p.donor_id == donor_id)
            .collect())
    }

    fn save_pledge(&self, pledge: Pledge) -> Result<Pledge> {
        let mut pledges = self
            .pledges
            .write()
            .map_err(|e| PledgeError::Store(e.to_string()))?;
        pledges.insert(pledge.id.clone(), pledge.clone());
        Ok(pledge)
    }
}
