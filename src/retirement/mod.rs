//! Retirement projection calculator

mod types;
mod plan;

pub use types::{RetirementRequest, RetirementResult, RetirementYear};
pub use plan::{compute_retirement_plan, project_lifetime, SAFE_WITHDRAWAL_RATE};
