//! Request and result records for the interest calculator

use serde::{Deserialize, Serialize};

use crate::error::{require_finite, require_non_negative, CalcError};
use crate::rounding::MAX_HORIZON_YEARS;

fn default_compound_frequency() -> u32 {
    12
}

/// Simple or compound interest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InterestMode {
    #[default]
    Compound,
    Simple,
}

/// When a regular contribution lands within its period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContributionTiming {
    /// Beginning of period (annuity-due)
    Start,
    /// End of period (ordinary annuity)
    #[default]
    End,
}

/// Contribution frequency chosen on the form.
///
/// The quoted contribution is scaled by a fixed multiplier and then paid
/// once per compounding period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContributionFrequency {
    #[default]
    Monthly,
    Quarterly,
    Annually,
}

impl ContributionFrequency {
    pub fn multiplier(&self) -> u32 {
        match self {
            ContributionFrequency::Monthly => 1,
            ContributionFrequency::Quarterly => 3,
            ContributionFrequency::Annually => 12,
        }
    }
}

/// Parameters for an interest projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterestRequest {
    #[serde(default)]
    pub mode: InterestMode,

    /// Initial deposit
    pub principal: f64,

    /// Annual rate as a fraction (0.05 = 5%)
    pub annual_rate: f64,

    pub years: u32,

    /// Compounding periods per year
    #[serde(default = "default_compound_frequency")]
    pub compound_frequency: u32,

    /// Regular contribution paid each compounding period, before the
    /// `contribution_frequency` multiplier
    #[serde(default)]
    pub contribution: f64,

    #[serde(default)]
    pub contribution_frequency: ContributionFrequency,

    #[serde(default)]
    pub contribution_timing: ContributionTiming,
}

impl InterestRequest {
    /// Compound interest on a lump sum with no contributions
    pub fn lump_sum(principal: f64, annual_rate: f64, years: u32, compound_frequency: u32) -> Self {
        Self {
            mode: InterestMode::Compound,
            principal,
            annual_rate,
            years,
            compound_frequency,
            contribution: 0.0,
            contribution_frequency: ContributionFrequency::Monthly,
            contribution_timing: ContributionTiming::End,
        }
    }

    /// Simple (non-compounding) interest
    pub fn simple(principal: f64, annual_rate: f64, years: u32) -> Self {
        Self {
            mode: InterestMode::Simple,
            ..Self::lump_sum(principal, annual_rate, years, 1)
        }
    }

    /// Add a regular contribution to a compound request
    pub fn with_contribution(
        mut self,
        contribution: f64,
        frequency: ContributionFrequency,
        timing: ContributionTiming,
    ) -> Self {
        self.contribution = contribution;
        self.contribution_frequency = frequency;
        self.contribution_timing = timing;
        self
    }

    pub fn validate(&self) -> Result<(), CalcError> {
        require_non_negative("principal", self.principal)?;
        require_finite("annualRate", self.annual_rate)?;
        require_non_negative("contribution", self.contribution)?;
        if self.compound_frequency < 1 {
            return Err(CalcError::invalid("compoundFrequency", "must be >= 1"));
        }
        if self.years > MAX_HORIZON_YEARS {
            return Err(CalcError::invalid(
                "years",
                format!("must be <= {}, got {}", MAX_HORIZON_YEARS, self.years),
            ));
        }
        Ok(())
    }

    /// Contribution paid each compounding period: monthly ×1, quarterly ×3,
    /// annually ×12
    pub fn contribution_per_period(&self) -> f64 {
        self.contribution * self.contribution_frequency.multiplier() as f64
    }

    /// Total compounding periods over the whole horizon
    pub fn total_periods(&self) -> u64 {
        self.compound_frequency as u64 * self.years as u64
    }
}

/// Outcome of an interest projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterestResult {
    pub final_amount: f64,
    pub interest_earned: f64,
    /// Principal plus every contribution made
    pub total_contributions: f64,
}

/// Balance at the end of one year of an interest projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthPoint {
    pub year: u32,
    pub balance: f64,
    pub total_contributions: f64,
    pub interest: f64,
}
