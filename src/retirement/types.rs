//! Retirement planning inputs and outputs

use serde::{Deserialize, Serialize};

use crate::error::{require_finite, require_non_negative, CalcError};
use crate::rounding::MAX_HORIZON_YEARS;

/// A saver's situation and retirement goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetirementRequest {
    pub current_age: u32,
    pub retirement_age: u32,
    pub life_expectancy: u32,

    pub current_savings: f64,
    pub monthly_contribution: f64,

    /// Expected annual return as a fraction
    pub annual_return: f64,
    /// Expected annual inflation as a fraction
    pub inflation_rate: f64,

    /// Income wanted in retirement, in today's money
    pub desired_annual_income: f64,
    /// Pensions, social security and similar, in today's money
    #[serde(default)]
    pub expected_annual_other_income: f64,
}

impl RetirementRequest {
    pub fn validate(&self) -> Result<(), CalcError> {
        if self.current_age >= self.retirement_age {
            return Err(CalcError::invalid(
                "retirementAge",
                format!(
                    "must be greater than current age ({} >= {})",
                    self.current_age, self.retirement_age
                ),
            ));
        }
        if self.life_expectancy > MAX_HORIZON_YEARS {
            return Err(CalcError::invalid(
                "lifeExpectancy",
                format!("must be <= {}, got {}", MAX_HORIZON_YEARS, self.life_expectancy),
            ));
        }
        if self.retirement_age > self.life_expectancy {
            return Err(CalcError::invalid(
                "lifeExpectancy",
                format!(
                    "must be at least the retirement age ({} < {})",
                    self.life_expectancy, self.retirement_age
                ),
            ));
        }

        require_non_negative("currentSavings", self.current_savings)?;
        require_non_negative("monthlyContribution", self.monthly_contribution)?;
        require_non_negative("desiredAnnualIncome", self.desired_annual_income)?;
        require_non_negative("expectedAnnualOtherIncome", self.expected_annual_other_income)?;

        require_finite("annualReturn", self.annual_return)?;
        if self.annual_return <= -1.0 {
            return Err(CalcError::invalid("annualReturn", "must be greater than -1"));
        }
        require_finite("inflationRate", self.inflation_rate)?;
        if self.inflation_rate <= -1.0 {
            return Err(CalcError::invalid("inflationRate", "must be greater than -1"));
        }
        Ok(())
    }

    pub fn years_to_retirement(&self) -> u32 {
        self.retirement_age - self.current_age
    }

    pub fn years_in_retirement(&self) -> u32 {
        self.life_expectancy - self.retirement_age
    }
}

/// Projected position at retirement against the goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetirementResult {
    pub total_savings_at_retirement: f64,
    /// Nest egg needed under the safe-withdrawal rule
    pub required_savings: f64,
    pub shortfall: f64,
    pub current_monthly_contribution: f64,
    /// Monthly contribution that closes the shortfall
    pub suggested_monthly_contribution: f64,
    pub years_to_retirement: u32,
    pub years_in_retirement: u32,
}

/// One age on the lifetime savings path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetirementYear {
    pub age: u32,
    /// Savings at the start of this age
    pub savings: f64,
    pub total_contributions: f64,
    /// Drawn from savings during this age; zero before retirement
    pub annual_withdrawal: f64,
}
