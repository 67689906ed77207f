//! Monthly amortization schedule generation

use log::debug;

use super::types::{AmortizationEntry, LoanRequest, LoanResult, LoanYearSummary};
use crate::error::CalcError;
use crate::growth::growth_minus_one;
use crate::rounding::{finish, round_currency, MONTHS_PER_YEAR};

/// Level monthly payment for the loan.
///
/// `P = L·c·(1+c)^n / ((1+c)^n − 1)` with `c` the monthly rate; a rate too
/// small to grow the balance spreads the principal evenly.
pub fn monthly_payment(principal: f64, monthly_rate: f64, payments: u32) -> f64 {
    let growth_less_one = growth_minus_one(monthly_rate, payments as f64);
    if monthly_rate == 0.0 || growth_less_one == 0.0 {
        return principal / payments as f64;
    }
    principal * monthly_rate * (1.0 + growth_less_one) / growth_less_one
}

/// Build the full amortization schedule
///
/// The balance runs at full precision. Each row reports the rounded balance,
/// and the principal column is the drop in rounded balance, so principal
/// portions always add up to the amount borrowed.
pub fn compute_loan_schedule(request: &LoanRequest) -> Result<LoanResult, CalcError> {
    request.validate()?;

    let monthly_rate = request.annual_rate / MONTHS_PER_YEAR as f64;
    let payments = request.term_years * MONTHS_PER_YEAR;
    let payment = monthly_payment(request.principal, monthly_rate, payments);
    if !payment.is_finite() {
        return Err(CalcError::DivisionDegenerate { context: "loan payment" });
    }

    let mut schedule = Vec::with_capacity(payments as usize);
    let mut balance = request.principal;
    let mut cumulative_interest = 0.0;
    let mut reported_balance = round_currency(request.principal);

    for payment_index in 1..=payments {
        let interest = balance * monthly_rate;
        let principal_part = payment - interest;
        cumulative_interest += interest;

        balance = if payment_index == payments {
            // Absorb floating-point drift on the last payment
            0.0
        } else {
            (balance - principal_part).max(0.0)
        };

        let remaining = round_currency(balance);
        schedule.push(AmortizationEntry {
            payment_index,
            principal_portion: round_currency(reported_balance - remaining),
            interest_portion: finish("loan interest portion", interest)?,
            cumulative_interest: finish("loan cumulative interest", cumulative_interest)?,
            remaining_balance: remaining,
        });
        reported_balance = remaining;
    }

    debug!(
        "loan: principal={} rate={} term={}y payment={:.4} interest={:.2}",
        request.principal, request.annual_rate, request.term_years, payment, cumulative_interest
    );

    Ok(LoanResult {
        monthly_payment: finish("loan payment", payment)?,
        total_interest: finish("loan total interest", cumulative_interest)?,
        total_cost: finish("loan total cost", request.principal + cumulative_interest)?,
        schedule,
    })
}

/// Roll a monthly schedule up into loan years
pub fn yearly_summary(result: &LoanResult) -> Vec<LoanYearSummary> {
    result
        .schedule
        .chunks(MONTHS_PER_YEAR as usize)
        .enumerate()
        .map(|(i, months)| LoanYearSummary {
            year: i as u32 + 1,
            principal_paid: round_currency(months.iter().map(|m| m.principal_portion).sum()),
            interest_paid: round_currency(months.iter().map(|m| m.interest_portion).sum()),
            remaining_balance: months.last().map(|m| m.remaining_balance).unwrap_or(0.0),
        })
        .collect()
}
