//! Compound and simple interest projection

use log::debug;

use super::types::{ContributionTiming, GrowthPoint, InterestMode, InterestRequest, InterestResult};
use crate::error::CalcError;
use crate::growth::{annuity_factor, growth_minus_one};
use crate::rounding::finish;

/// Unrounded balance and contributions after `years`
#[derive(Debug, Clone, Copy)]
struct Accumulation {
    balance: f64,
    contributions: f64,
}

impl Accumulation {
    fn interest(&self) -> f64 {
        self.balance - self.contributions
    }
}

/// Project a lump sum (and optional regular contributions) forward
pub fn compute_interest(request: &InterestRequest) -> Result<InterestResult, CalcError> {
    request.validate()?;

    let acc = accumulate(request, request.years);
    debug!(
        "interest: mode={:?} principal={} rate={} years={} -> {}",
        request.mode, request.principal, request.annual_rate, request.years, acc.balance
    );

    Ok(InterestResult {
        final_amount: finish("interest final amount", acc.balance)?,
        interest_earned: finish("interest earned", acc.interest())?,
        total_contributions: finish("interest contributions", acc.contributions)?,
    })
}

/// Year-by-year balances from year 0 through the request horizon
pub fn interest_growth(request: &InterestRequest) -> Result<Vec<GrowthPoint>, CalcError> {
    request.validate()?;

    (0..=request.years)
        .map(|year| {
            let acc = accumulate(request, year);
            Ok(GrowthPoint {
                year,
                balance: finish("interest growth balance", acc.balance)?,
                total_contributions: finish("interest growth contributions", acc.contributions)?,
                interest: finish("interest growth interest", acc.interest())?,
            })
        })
        .collect()
}

fn accumulate(request: &InterestRequest, years: u32) -> Accumulation {
    let principal = request.principal;

    if request.mode == InterestMode::Simple {
        let interest = principal * request.annual_rate * years as f64;
        return Accumulation {
            balance: principal + interest,
            contributions: principal,
        };
    }

    let frequency = request.compound_frequency as f64;
    let periodic_rate = request.annual_rate / frequency;
    let periods = frequency * years as f64;
    let contribution = request.contribution_per_period();
    let contributions = principal + contribution * periods;

    let growth_less_one = growth_minus_one(periodic_rate, periods);
    if periodic_rate == 0.0 || growth_less_one == 0.0 {
        return Accumulation {
            balance: contributions,
            contributions,
        };
    }

    let mut balance = principal * (1.0 + growth_less_one);

    if contribution > 0.0 {
        let mut annuity = contribution * annuity_factor(periodic_rate, periods);
        if request.contribution_timing == ContributionTiming::Start {
            annuity *= 1.0 + periodic_rate;
        }
        balance += annuity;
    }

    Accumulation {
        balance,
        contributions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interest::ContributionFrequency;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_annual_compounding_matches_closed_form() {
        for &(principal, rate, years) in &[
            (1000.0, 0.05, 10u32),
            (25_000.0, 0.07, 30),
            (500.0, 0.0, 5),
            (123_456.78, 0.031, 17),
        ] {
            let request = InterestRequest::lump_sum(principal, rate, years, 1);
            let result = compute_interest(&request).unwrap();
            let expected = principal * (1.0f64 + rate).powi(years as i32);
            assert_abs_diff_eq!(result.final_amount, expected, epsilon = 1e-2);
        }
    }

    #[test]
    fn test_monthly_compounding() {
        let result = compute_interest(&InterestRequest::lump_sum(10_000.0, 0.05, 10, 12)).unwrap();
        assert_eq!(result.final_amount, 16470.09);
        assert_eq!(result.interest_earned, 6470.09);
        assert_eq!(result.total_contributions, 10_000.0);
    }

    #[test]
    fn test_simple_interest() {
        let result = compute_interest(&InterestRequest::simple(1000.0, 0.05, 3)).unwrap();
        assert_eq!(result.interest_earned, 150.0);
        assert_eq!(result.final_amount, 1150.0);
    }

    #[test]
    fn test_contribution_timing() {
        let end = InterestRequest::lump_sum(0.0, 0.12, 1, 12).with_contribution(
            100.0,
            ContributionFrequency::Monthly,
            ContributionTiming::End,
        );
        let result = compute_interest(&end).unwrap();
        assert_eq!(result.final_amount, 1268.25);
        assert_eq!(result.interest_earned, 68.25);

        let start = InterestRequest {
            contribution_timing: ContributionTiming::Start,
            ..end
        };
        let result = compute_interest(&start).unwrap();
        assert_eq!(result.final_amount, 1280.93);
    }

    #[test]
    fn test_zero_rate_with_contribution() {
        let request = InterestRequest::lump_sum(1000.0, 0.0, 2, 12).with_contribution(
            50.0,
            ContributionFrequency::Monthly,
            ContributionTiming::End,
        );
        let result = compute_interest(&request).unwrap();
        assert_eq!(result.final_amount, 2200.0);
        assert_eq!(result.interest_earned, 0.0);
    }

    #[test]
    fn test_contribution_paid_every_period() {
        let json = r#"{"principal":1000,"annualRate":0.05,"years":10,
            "compoundFrequency":1,"contribution":100}"#;
        let request: InterestRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.contribution_per_period(), 100.0);

        let result = compute_interest(&request).unwrap();
        assert_eq!(result.final_amount, 2886.68);
        assert_eq!(result.total_contributions, 2000.0);
        assert_eq!(result.interest_earned, 886.68);
    }

    #[test]
    fn test_contribution_frequency_multiplier() {
        let quarterly = InterestRequest::lump_sum(0.0, 0.0, 1, 12).with_contribution(
            100.0,
            ContributionFrequency::Quarterly,
            ContributionTiming::End,
        );
        assert_eq!(quarterly.contribution_per_period(), 300.0);
        assert_eq!(compute_interest(&quarterly).unwrap().final_amount, 3600.0);

        let annual = InterestRequest::lump_sum(0.0, 0.0, 2, 4).with_contribution(
            10.0,
            ContributionFrequency::Annually,
            ContributionTiming::End,
        );
        assert_eq!(annual.contribution_per_period(), 120.0);
        assert_eq!(compute_interest(&annual).unwrap().total_contributions, 960.0);
    }

    #[test]
    fn test_tiny_rate_keeps_contributions() {
        let request = InterestRequest::lump_sum(0.0, 1e-17, 1, 12).with_contribution(
            100.0,
            ContributionFrequency::Monthly,
            ContributionTiming::End,
        );
        let result = compute_interest(&request).unwrap();
        assert_eq!(result.final_amount, 1200.0);
        assert_eq!(result.interest_earned, 0.0);
    }

    #[test]
    fn test_overflow_is_degenerate() {
        let err = compute_interest(&InterestRequest::lump_sum(1000.0, 1e308, 10, 1)).unwrap_err();
        assert!(matches!(
            err,
            CalcError::DivisionDegenerate { context: "interest final amount" }
        ));
    }

    #[test]
    fn test_horizon_bound() {
        let err = compute_interest(&InterestRequest::lump_sum(1000.0, 0.05, 1_000_000, 12))
            .unwrap_err();
        assert!(matches!(err, CalcError::InvalidArgument { field: "years", .. }));
    }

    #[test]
    fn test_zero_years() {
        let result = compute_interest(&InterestRequest::lump_sum(1000.0, 0.05, 0, 12)).unwrap();
        assert_eq!(result.final_amount, 1000.0);
        assert_eq!(result.interest_earned, 0.0);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(compute_interest(&InterestRequest::lump_sum(-1.0, 0.05, 10, 12)).is_err());
        assert!(compute_interest(&InterestRequest::lump_sum(1000.0, f64::NAN, 10, 12)).is_err());

        let err = compute_interest(&InterestRequest::lump_sum(1000.0, 0.05, 10, 0)).unwrap_err();
        assert!(matches!(err, CalcError::InvalidArgument { field: "compoundFrequency", .. }));
    }

    #[test]
    fn test_growth_series() {
        let request = InterestRequest::lump_sum(1000.0, 0.10, 3, 1);
        let series = interest_growth(&request).unwrap();

        assert_eq!(series.len(), 4);
        assert_eq!(series[0].balance, 1000.0);
        assert_eq!(series[0].interest, 0.0);
        assert_eq!(series[1].balance, 1100.0);
        assert_eq!(series[3].balance, 1331.0);

        // Last point agrees with the single-shot calculation
        let result = compute_interest(&request).unwrap();
        assert_eq!(series[3].balance, result.final_amount);
    }

    #[test]
    fn test_growth_series_with_start_contributions() {
        let request = InterestRequest::lump_sum(0.0, 0.12, 2, 12).with_contribution(
            100.0,
            ContributionFrequency::Monthly,
            ContributionTiming::Start,
        );
        let series = interest_growth(&request).unwrap();

        assert_eq!(series.len(), 3);
        assert_eq!(series[0].balance, 0.0);
        assert_eq!(series[1].balance, 1280.93);
        assert_eq!(series[1].total_contributions, 1200.0);
        assert_eq!(series[2].balance, 2724.32);
        assert_eq!(series[2].total_contributions, 2400.0);
        assert_abs_diff_eq!(series[2].interest, 324.32, epsilon = 1e-9);
    }

    #[test]
    fn test_idempotent() {
        let request = InterestRequest::lump_sum(5000.0, 0.043, 12, 365).with_contribution(
            75.0,
            ContributionFrequency::Monthly,
            ContributionTiming::Start,
        );
        let a = compute_interest(&request).unwrap();
        let b = compute_interest(&request).unwrap();
        assert_eq!(a.final_amount.to_bits(), b.final_amount.to_bits());
        assert_eq!(a.interest_earned.to_bits(), b.interest_earned.to_bits());
    }
}
