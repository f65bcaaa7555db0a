pub mod budgets;
pub mod constants;
pub mod errors;
pub mod pledges;

pub use errors::{Error, Result};
