//! Loan request, schedule rows and result

use serde::{Deserialize, Serialize};

use crate::error::{require_finite, CalcError};
use crate::rounding::MAX_HORIZON_YEARS;

/// Fixed-rate, fully amortizing loan with monthly payments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanRequest {
    /// Amount borrowed
    pub principal: f64,
    /// Annual rate as a fraction
    pub annual_rate: f64,
    pub term_years: u32,
}

impl LoanRequest {
    pub fn new(principal: f64, annual_rate: f64, term_years: u32) -> Result<Self, CalcError> {
        let request = Self {
            principal,
            annual_rate,
            term_years,
        };
        request.validate()?;
        Ok(request)
    }

    pub fn validate(&self) -> Result<(), CalcError> {
        require_finite("principal", self.principal)?;
        if self.principal <= 0.0 {
            return Err(CalcError::invalid("principal", "must be > 0"));
        }
        require_finite("annualRate", self.annual_rate)?;
        if self.annual_rate < 0.0 {
            return Err(CalcError::invalid("annualRate", "must be >= 0"));
        }
        if self.term_years == 0 {
            return Err(CalcError::invalid("termYears", "must be > 0"));
        }
        if self.term_years > MAX_HORIZON_YEARS {
            return Err(CalcError::invalid(
                "termYears",
                format!("must be <= {}, got {}", MAX_HORIZON_YEARS, self.term_years),
            ));
        }
        Ok(())
    }
}

/// One monthly payment of an amortization schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmortizationEntry {
    /// 1-based month
    pub payment_index: u32,
    pub principal_portion: f64,
    pub interest_portion: f64,
    pub cumulative_interest: f64,
    pub remaining_balance: f64,
}

/// Full loan breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanResult {
    pub monthly_payment: f64,
    pub total_interest: f64,
    /// Principal plus total interest
    pub total_cost: f64,
    pub schedule: Vec<AmortizationEntry>,
}

/// Payments grouped by loan year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanYearSummary {
    pub year: u32,
    pub principal_paid: f64,
    pub interest_paid: f64,
    /// Balance after the last payment of the year
    pub remaining_balance: f64,
}
