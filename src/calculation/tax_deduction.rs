//! Mortgage tax-deduction projection.
//!
//! This module projects the yearly refund a borrower receives under a
//! mortgage tax deduction. The loan balance is paid down once a year using
//! simple annual interest on the opening balance and the loan's fixed
//! monthly payment; the deduction applies to the paid-down balance, capped.
//!
//! The yearly simple-interest paydown is an approximation of the monthly
//! amortization schedule and is kept as-is so projections match the figures
//! printed on existing proposals.

use crate::error::{EngineError, EngineResult};
use crate::models::{DEDUCTION_YEARS_RANGE, DeductionInput, DeductionSchedule};

use super::amortization::monthly_payment;

/// Projects the yearly deductions for a loan.
///
/// For each year: `interest = balance * rate`, `principal = payment * 12 -
/// interest`, `balance = max(0, balance - principal)`, and the refund is
/// `min(balance, cap) * deduction_rate`. The loop always runs
/// `deduction_years` times; years after payoff contribute exactly zero.
///
/// # Returns
///
/// A [`DeductionSchedule`] with exactly `deduction_years` entries. Errors when
/// an amount or rate is negative or not finite, the loan term is outside 1
/// to 50 years, or the deduction period exceeds 20 years.
///
/// # Examples
///
/// ```
/// use home_plan_engine::calculation::compute_deduction;
/// use home_plan_engine::models::DeductionInput;
///
/// let schedule = compute_deduction(&DeductionInput {
///     loan_principal: 40_800_000.0,
///     rate_percent: 1.5,
///     deduction_years: 13,
///     cap: 45_000_000.0,
///     deduction_rate_percent: 0.7,
///     term_years: 35,
/// })
/// .unwrap();
///
/// assert_eq!(schedule.yearly_deductions.len(), 13);
/// assert!((schedule.total_return - 3_112_385.04).abs() < 0.01);
/// ```
pub fn compute_deduction(input: &DeductionInput) -> EngineResult<DeductionSchedule> {
    validate_input(input)?;

    let payment = monthly_payment(input.loan_principal, input.rate_percent, input.term_years)?;
    let annual_payment = payment * 12.0;
    let annual_rate = input.rate_percent / 100.0;
    let deduction_rate = input.deduction_rate_percent / 100.0;

    let mut balance = input.loan_principal;
    let mut total_return = 0.0;
    let mut yearly_deductions = Vec::with_capacity(input.deduction_years as usize);

    for _year in 1..=input.deduction_years {
        let interest_year = balance * annual_rate;
        let principal_year = annual_payment - interest_year;
        balance = (balance - principal_year).max(0.0);

        let deduction_base = balance.min(input.cap);
        let deduction = deduction_base * deduction_rate;

        yearly_deductions.push(deduction);
        total_return += deduction;
    }

    Ok(DeductionSchedule {
        total_return,
        yearly_deductions,
    })
}

fn validate_input(input: &DeductionInput) -> EngineResult<()> {
    let amounts = [
        ("loan_principal", input.loan_principal),
        ("cap", input.cap),
        ("deduction_rate_percent", input.deduction_rate_percent),
    ];
    for (field, value) in amounts {
        if !value.is_finite() || value < 0.0 {
            return Err(EngineError::validation(
                field,
                format!("must be a non-negative number, got {}", value),
            ));
        }
    }
    if input.deduction_years > *DEDUCTION_YEARS_RANGE.end() {
        return Err(EngineError::validation(
            "deduction_years",
            format!(
                "must be at most {} years, got {}",
                DEDUCTION_YEARS_RANGE.end(),
                input.deduction_years
            ),
        ));
    }
    Ok(())
}
