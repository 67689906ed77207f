//! Year-by-year workplace pension simulation

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{require_non_negative, CalcError};
use crate::rounding::{finish, MAX_HORIZON_YEARS};

/// Salary, contribution rates and current pot.
///
/// Percentages are whole percents: 8.0 means 8%.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PensionRequest {
    pub current_salary: f64,
    pub employee_contribution_pct: f64,
    /// Nominal employer match; capped at the employee's own rate
    pub employer_match_pct: f64,
    #[serde(default)]
    pub annual_salary_growth_pct: f64,
    pub annual_return_pct: f64,
    pub current_age: u32,
    pub retirement_age: u32,
    #[serde(default)]
    pub current_pension_value: f64,
}

impl PensionRequest {
    pub fn validate(&self) -> Result<(), CalcError> {
        if self.retirement_age <= self.current_age {
            return Err(CalcError::invalid(
                "retirementAge",
                format!(
                    "must be greater than current age ({} <= {})",
                    self.retirement_age, self.current_age
                ),
            ));
        }
        if self.retirement_age > MAX_HORIZON_YEARS {
            return Err(CalcError::invalid(
                "retirementAge",
                format!("must be <= {}, got {}", MAX_HORIZON_YEARS, self.retirement_age),
            ));
        }
        require_non_negative("currentSalary", self.current_salary)?;
        require_non_negative("employeeContributionPct", self.employee_contribution_pct)?;
        require_non_negative("employerMatchPct", self.employer_match_pct)?;
        require_non_negative("annualSalaryGrowthPct", self.annual_salary_growth_pct)?;
        require_non_negative("annualReturnPct", self.annual_return_pct)?;
        require_non_negative("currentPensionValue", self.current_pension_value)?;
        Ok(())
    }

    /// Employer rate actually paid: never more than the employee puts in
    pub fn effective_employer_pct(&self) -> f64 {
        self.employee_contribution_pct.min(self.employer_match_pct)
    }
}

/// One working year of the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PensionYear {
    /// Age at the end of this year
    pub age: u32,
    pub salary: f64,
    pub employee_contribution: f64,
    pub employer_contribution: f64,
    pub investment_return: f64,
    /// Pot value at the end of this year
    pub pension_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PensionResult {
    pub final_pension_value: f64,
    pub total_employee_contributions: f64,
    pub total_employer_contributions: f64,
    pub total_investment_returns: f64,
    pub years: Vec<PensionYear>,
}

/// Running totals kept at full precision
#[derive(Debug, Default)]
struct PensionTotals {
    employee: f64,
    employer: f64,
    returns: f64,
}

/// Simulate the pot from the current age to retirement
pub fn compute_pension_projection(request: &PensionRequest) -> Result<PensionResult, CalcError> {
    request.validate()?;

    let years_to_retirement = request.retirement_age - request.current_age;
    let employee_rate = request.employee_contribution_pct / 100.0;
    let employer_rate = request.effective_employer_pct() / 100.0;
    let return_rate = request.annual_return_pct / 100.0;
    let salary_growth = 1.0 + request.annual_salary_growth_pct / 100.0;

    let mut salary = request.current_salary;
    let mut pension_value = request.current_pension_value;
    let mut totals = PensionTotals::default();
    let mut years = Vec::with_capacity(years_to_retirement as usize);

    for year in 1..=years_to_retirement {
        let employee_contribution = salary * employee_rate;
        let employer_contribution = salary * employer_rate;
        // Return is earned on the opening balance, before this year's contributions
        let investment_return = pension_value * return_rate;

        pension_value += employee_contribution + employer_contribution + investment_return;

        totals.employee += employee_contribution;
        totals.employer += employer_contribution;
        totals.returns += investment_return;

        years.push(PensionYear {
            age: request.current_age + year,
            salary: finish("pension salary", salary)?,
            employee_contribution: finish("pension employee contribution", employee_contribution)?,
            employer_contribution: finish("pension employer contribution", employer_contribution)?,
            investment_return: finish("pension investment return", investment_return)?,
            pension_value: finish("pension value", pension_value)?,
        });

        salary *= salary_growth;
    }

    debug!(
        "pension: {} years, final value {:.2}",
        years_to_retirement, pension_value
    );

    Ok(PensionResult {
        final_pension_value: finish("pension final value", pension_value)?,
        total_employee_contributions: finish("pension employee total", totals.employee)?,
        total_employer_contributions: finish("pension employer total", totals.employer)?,
        total_investment_returns: finish("pension returns total", totals.returns)?,
        years,
    })
}
