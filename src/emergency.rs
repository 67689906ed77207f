//! Emergency fund sizing

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{require_non_negative, CalcError};
use crate::rounding::{finish, round_to};

/// Monthly spending broken down by the usual household headings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MonthlyExpenses {
    pub housing: f64,
    pub utilities: f64,
    pub food: f64,
    pub transportation: f64,
    pub healthcare: f64,
    pub debt_payments: f64,
    pub other: f64,
}

impl MonthlyExpenses {
    pub fn total(&self) -> f64 {
        self.housing
            + self.utilities
            + self.food
            + self.transportation
            + self.healthcare
            + self.debt_payments
            + self.other
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyFundRequest {
    pub monthly_expenses: f64,
    pub desired_months_coverage: u32,
    #[serde(default)]
    pub current_savings: f64,
}

impl EmergencyFundRequest {
    /// Build a request from an itemized expense breakdown
    pub fn from_expenses(
        expenses: &MonthlyExpenses,
        desired_months_coverage: u32,
        current_savings: f64,
    ) -> Self {
        Self {
            monthly_expenses: expenses.total(),
            desired_months_coverage,
            current_savings,
        }
    }

    pub fn compute(&self) -> Result<EmergencyFundResult, CalcError> {
        compute_emergency_fund(
            self.monthly_expenses,
            self.desired_months_coverage,
            self.current_savings,
        )
    }
}

/// How far along the fund is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FundingStatus {
    /// Under 25%
    Critical,
    /// 25% to under 50%
    Low,
    /// 50% to under 75%
    Moderate,
    /// 75% and above
    Funded,
}

impl FundingStatus {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage < 25.0 {
            FundingStatus::Critical
        } else if percentage < 50.0 {
            FundingStatus::Low
        } else if percentage < 75.0 {
            FundingStatus::Moderate
        } else {
            FundingStatus::Funded
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyFundResult {
    pub monthly_expenses: f64,
    pub current_savings: f64,
    pub required_fund: f64,
    pub shortfall: f64,
    /// Share of the target already saved, 0 to 100, one decimal
    pub funding_percentage: f64,
    pub status: FundingStatus,
}

/// Size an emergency fund and measure progress toward it
pub fn compute_emergency_fund(
    monthly_expenses: f64,
    desired_months: u32,
    current_savings: f64,
) -> Result<EmergencyFundResult, CalcError> {
    require_non_negative("monthlyExpenses", monthly_expenses)?;
    require_non_negative("currentSavings", current_savings)?;
    if desired_months == 0 {
        return Err(CalcError::invalid("desiredMonthsCoverage", "must be > 0"));
    }

    let required = monthly_expenses * desired_months as f64;
    let shortfall = (required - current_savings).max(0.0);
    // Nothing to save for counts as fully funded
    let percentage = if required == 0.0 {
        100.0
    } else {
        (current_savings / required * 100.0).min(100.0)
    };
    let percentage = round_to(percentage, 1);

    debug!(
        "emergency fund: required={:.2} saved={:.2} ({}%)",
        required, current_savings, percentage
    );

    Ok(EmergencyFundResult {
        monthly_expenses: finish("emergency monthly expenses", monthly_expenses)?,
        current_savings: finish("emergency savings", current_savings)?,
        required_fund: finish("emergency required fund", required)?,
        shortfall: finish("emergency shortfall", shortfall)?,
        funding_percentage: percentage,
        status: FundingStatus::from_percentage(percentage),
    })
}
