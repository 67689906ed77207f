//! Finance Engine - closed-form personal finance projections
//!
//! This library provides:
//! - Compound and simple interest with regular contributions
//! - Loan amortization schedules
//! - Retirement savings targets under the 4% rule
//! - Workplace pension simulation with capped employer match
//! - Emergency fund sizing and net worth aggregation
//! - A typed calculation envelope and parallel batch runner

pub mod error;
pub mod rounding;
pub mod growth;
pub mod interest;
pub mod loan;
pub mod retirement;
pub mod pension;
pub mod emergency;
pub mod net_worth;
pub mod calculation;
pub mod runner;
pub mod export;

// Re-export commonly used types
pub use error::{CalcError, ExportError};
pub use calculation::{CalculationKind, CalculationRequest, CalculationResult, SavedCalculation};
pub use interest::{compute_interest, InterestRequest, InterestResult};
pub use loan::{compute_loan_schedule, LoanRequest, LoanResult};
pub use retirement::{compute_retirement_plan, RetirementRequest, RetirementResult};
pub use pension::{compute_pension_projection, PensionRequest, PensionResult};
pub use emergency::{compute_emergency_fund, EmergencyFundRequest, EmergencyFundResult};
pub use net_worth::{compute_net_worth, BalanceItem, NetWorthRequest, NetWorthResult};
pub use runner::{BatchConfig, BatchRunner};
