pub mod pledge_errors;
pub mod pledge_model;
pub mod pledge_repository;
pub mod pledge_service;
pub mod pledge_traits;
pub mod schedule;

pub use pledge_errors::PledgeError;
pub use pledge_model::{
    Frequency, Installment, NewInstallment, NewPledge, Pledge, PledgeStatus, PledgeStatusReport,
};
pub use pledge_repository::InMemoryPledgeRepository;
pub use pledge_service::PledgeService;
pub use pledge_traits::{PledgeRepositoryTrait, PledgeServiceTrait};
pub use schedule::generate_schedule;
