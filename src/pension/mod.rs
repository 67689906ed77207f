//! Workplace pension simulator

mod simulator;

pub use simulator::{compute_pension_projection, PensionRequest, PensionResult, PensionYear};
