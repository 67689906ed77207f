//! Compound and simple interest calculator

mod types;
mod calculator;

pub use types::{
    ContributionFrequency, ContributionTiming, GrowthPoint, InterestMode, InterestRequest,
    InterestResult,
};
pub use calculator::{compute_interest, interest_growth};
