//! Loan amortization calculator

mod types;
mod amortization;

pub use types::{AmortizationEntry, LoanRequest, LoanResult, LoanYearSummary};
pub use amortization::{compute_loan_schedule, monthly_payment, yearly_summary};
