//! Retirement savings projection and the safe-withdrawal target

use log::debug;

use super::types::{RetirementRequest, RetirementResult, RetirementYear};
use crate::error::CalcError;
use crate::growth::annuity_factor;
use crate::rounding::{finish, MONTHS_PER_YEAR};

/// Share of the nest egg that can be drawn in the first retirement year (the 4% rule)
pub const SAFE_WITHDRAWAL_RATE: f64 = 0.04;

/// Future value of 1 paid at the start of each month for `months` months
fn annuity_due_factor(monthly_rate: f64, months: u32) -> f64 {
    annuity_factor(monthly_rate, months as f64) * (1.0 + monthly_rate)
}

/// Income the savings must produce, before any inflation adjustment
fn income_gap(request: &RetirementRequest) -> f64 {
    (request.desired_annual_income - request.expected_annual_other_income).max(0.0)
}

/// Compare projected savings at retirement with the amount the goal needs
pub fn compute_retirement_plan(request: &RetirementRequest) -> Result<RetirementResult, CalcError> {
    request.validate()?;

    let years_to_retirement = request.years_to_retirement();
    let monthly_rate = request.annual_return / MONTHS_PER_YEAR as f64;
    let months = years_to_retirement * MONTHS_PER_YEAR;

    let savings_growth = request.current_savings
        * (1.0 + request.annual_return).powf(years_to_retirement as f64);
    let contribution_factor = annuity_due_factor(monthly_rate, months);
    let projected = savings_growth + request.monthly_contribution * contribution_factor;

    let inflation = (1.0 + request.inflation_rate).powf(years_to_retirement as f64);
    let required = income_gap(request) * inflation / SAFE_WITHDRAWAL_RATE;
    let shortfall = (required - projected).max(0.0);

    let additional = if shortfall > 0.0 {
        shortfall / contribution_factor
    } else {
        0.0
    };

    debug!(
        "retirement: {}y to go, projected={:.2} required={:.2} shortfall={:.2}",
        years_to_retirement, projected, required, shortfall
    );

    Ok(RetirementResult {
        total_savings_at_retirement: finish("retirement projected savings", projected)?,
        required_savings: finish("retirement required savings", required)?,
        shortfall: finish("retirement shortfall", shortfall)?,
        current_monthly_contribution: finish(
            "retirement contribution",
            request.monthly_contribution,
        )?,
        suggested_monthly_contribution: finish(
            "retirement suggested contribution",
            request.monthly_contribution + additional,
        )?,
        years_to_retirement,
        years_in_retirement: request.years_in_retirement(),
    })
}

/// Year-by-year savings from the current age through life expectancy.
///
/// Contributions are added annually until retirement; afterwards the
/// inflation-indexed income gap is withdrawn at the start of each year and
/// the remainder earns the annual return. Savings never go below zero.
pub fn project_lifetime(request: &RetirementRequest) -> Result<Vec<RetirementYear>, CalcError> {
    request.validate()?;

    let annual_contribution = request.monthly_contribution * MONTHS_PER_YEAR as f64;
    let growth = 1.0 + request.annual_return;
    let gap = income_gap(request);

    let mut savings = request.current_savings;
    let mut contributions = request.current_savings;
    let span = request.life_expectancy - request.current_age + 1;
    let mut years = Vec::with_capacity(span as usize);

    for age in request.current_age..=request.life_expectancy {
        let withdrawal = if age < request.retirement_age {
            0.0
        } else {
            gap * (1.0 + request.inflation_rate).powf((age - request.current_age) as f64)
        };

        years.push(RetirementYear {
            age,
            savings: finish("lifetime savings", savings)?,
            total_contributions: finish("lifetime contributions", contributions)?,
            annual_withdrawal: finish("lifetime withdrawal", withdrawal)?,
        });

        if age < request.retirement_age {
            savings = savings * growth + annual_contribution;
            contributions += annual_contribution;
        } else {
            savings = ((savings - withdrawal) * growth).max(0.0);
        }
    }

    Ok(years)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn typical_saver() -> RetirementRequest {
        RetirementRequest {
            current_age: 35,
            retirement_age: 65,
            life_expectancy: 90,
            current_savings: 50_000.0,
            monthly_contribution: 1000.0,
            annual_return: 0.07,
            inflation_rate: 0.025,
            desired_annual_income: 70_000.0,
            expected_annual_other_income: 24_000.0,
        }
    }

    fn no_growth_saver() -> RetirementRequest {
        RetirementRequest {
            current_age: 60,
            retirement_age: 65,
            life_expectancy: 70,
            current_savings: 10_000.0,
            monthly_contribution: 100.0,
            annual_return: 0.0,
            inflation_rate: 0.0,
            desired_annual_income: 4000.0,
            expected_annual_other_income: 0.0,
        }
    }

    #[test]
    fn test_four_percent_rule() {
        let request = typical_saver();
        let result = compute_retirement_plan(&request).unwrap();

        let expected = 46_000.0 * 1.025f64.powf(30.0) / 0.04;
        assert_abs_diff_eq!(result.required_savings, expected, epsilon = 0.01);
        assert_eq!(result.years_to_retirement, 30);
        assert_eq!(result.years_in_retirement, 25);
        assert!(result.shortfall > 0.0);
        assert!(result.suggested_monthly_contribution > result.current_monthly_contribution);
    }

    #[test]
    fn test_suggested_contribution_closes_gap() {
        let first = compute_retirement_plan(&typical_saver()).unwrap();

        let revised = RetirementRequest {
            monthly_contribution: first.suggested_monthly_contribution,
            ..typical_saver()
        };
        let second = compute_retirement_plan(&revised).unwrap();

        // Suggested contribution is rounded to cents, so allow a few dollars
        assert!(second.shortfall < 10.0, "shortfall left: {}", second.shortfall);
        assert_abs_diff_eq!(
            second.total_savings_at_retirement,
            first.required_savings,
            epsilon = 10.0
        );
    }

    #[test]
    fn test_zero_return() {
        let result = compute_retirement_plan(&no_growth_saver()).unwrap();
        assert_eq!(result.total_savings_at_retirement, 16_000.0);
        assert_eq!(result.required_savings, 100_000.0);
        assert_eq!(result.shortfall, 84_000.0);
        assert_eq!(result.suggested_monthly_contribution, 1500.0);
    }

    #[test]
    fn test_no_shortfall() {
        let request = RetirementRequest {
            current_savings: 5_000_000.0,
            ..typical_saver()
        };
        let result = compute_retirement_plan(&request).unwrap();
        assert_eq!(result.shortfall, 0.0);
        assert_eq!(result.suggested_monthly_contribution, 1000.0);
    }

    #[test]
    fn test_other_income_covers_goal() {
        let request = RetirementRequest {
            expected_annual_other_income: 90_000.0,
            ..typical_saver()
        };
        let result = compute_retirement_plan(&request).unwrap();
        assert_eq!(result.required_savings, 0.0);
        assert_eq!(result.shortfall, 0.0);
    }

    #[test]
    fn test_invalid_ages() {
        let request = RetirementRequest {
            current_age: 65,
            ..typical_saver()
        };
        assert!(matches!(
            compute_retirement_plan(&request),
            Err(CalcError::InvalidArgument { field: "retirementAge", .. })
        ));

        let request = RetirementRequest {
            life_expectancy: 60,
            ..typical_saver()
        };
        assert!(matches!(
            compute_retirement_plan(&request),
            Err(CalcError::InvalidArgument { field: "lifeExpectancy", .. })
        ));
    }

    #[test]
    fn test_tiny_return_matches_zero_return() {
        let request = RetirementRequest {
            annual_return: 1e-17,
            ..no_growth_saver()
        };
        let result = compute_retirement_plan(&request).unwrap();
        assert_eq!(result.total_savings_at_retirement, 16_000.0);
        assert_eq!(result.shortfall, 84_000.0);
        assert_eq!(result.suggested_monthly_contribution, 1500.0);
    }

    #[test]
    fn test_age_bound() {
        let request = RetirementRequest {
            life_expectancy: u32::MAX,
            ..typical_saver()
        };
        assert!(matches!(
            compute_retirement_plan(&request),
            Err(CalcError::InvalidArgument { field: "lifeExpectancy", .. })
        ));
        assert!(matches!(
            project_lifetime(&request),
            Err(CalcError::InvalidArgument { field: "lifeExpectancy", .. })
        ));
    }

    #[test]
    fn test_retire_at_life_expectancy() {
        let request = RetirementRequest {
            life_expectancy: 65,
            ..typical_saver()
        };
        let result = compute_retirement_plan(&request).unwrap();
        assert_eq!(result.years_in_retirement, 0);
    }

    #[test]
    fn test_lifetime_projection() {
        let years = project_lifetime(&no_growth_saver()).unwrap();
        assert_eq!(years.len(), 11);
        assert_eq!(years[0].age, 60);
        assert_eq!(years[0].savings, 10_000.0);

        // Accumulation: 1200 a year for five years
        assert_eq!(years[5].age, 65);
        assert_eq!(years[5].savings, 16_000.0);
        assert_eq!(years[5].total_contributions, 16_000.0);
        assert_eq!(years[4].annual_withdrawal, 0.0);

        // Distribution: 4000 a year drawn down, floored at zero
        assert_eq!(years[5].annual_withdrawal, 4000.0);
        assert_eq!(years[6].savings, 12_000.0);
        assert_eq!(years[9].savings, 0.0);
        assert_eq!(years[10].savings, 0.0);
    }

    #[test]
    fn test_idempotent() {
        let a = compute_retirement_plan(&typical_saver()).unwrap();
        let b = compute_retirement_plan(&typical_saver()).unwrap();
        assert_eq!(a, b);
    }
}
