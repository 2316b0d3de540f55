//! Budget and monthly payment calculation for one plan tier.
//!
//! This module composes a tier's total budget from land, building and the
//! adjusted transaction fees, derives the loan principal after the owner's
//! cash contribution, and amortizes it into a fixed monthly payment.

use crate::error::{EngineError, EngineResult};
use crate::models::{PlanInput, PlanResult};

use super::amortization::{monthly_payment, validate_rate, validate_term};
use super::fee_adjustment::{FeeAdjustment, VARIABLE_FEE_RATE, adjust_fees};

/// The budget record for a tier together with its fee breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanCalculation {
    /// The budget and payment record.
    pub result: PlanResult,
    /// How the fees were derived from the base estimate.
    pub fee_adjustment: FeeAdjustment,
}

/// Computes the budget breakdown and monthly payment for one tier.
///
/// Uses the standard 3% variable fee rate. See [`calculate_plan`] for a
/// configurable rate and the fee breakdown.
///
/// # Examples
///
/// ```
/// use home_plan_engine::calculation::compute_plan;
/// use home_plan_engine::models::PlanInput;
///
/// let input = PlanInput {
///     land: 1500.0,
///     building: 3000.0,
///     owner_cash: 200.0,
///     base_fee: 280.0,
///     reference_building: 2500.0,
///     rate_percent: 1.5,
///     term_years: 35,
/// };
///
/// let result = compute_plan(&input).unwrap();
/// assert_eq!(result.fees, 295.0);
/// assert_eq!(result.total_budget, 4795.0);
/// assert_eq!(result.loan_principal, 4595.0);
/// ```
pub fn compute_plan(input: &PlanInput) -> EngineResult<PlanResult> {
    calculate_plan(input, VARIABLE_FEE_RATE).map(|calculation| calculation.result)
}

/// Computes a tier's budget with an explicit variable fee rate.
///
/// # Arguments
///
/// * `input` - The tier's raw inputs, all amounts in one base unit
/// * `variable_fee_rate` - Fee surcharge per unit of building-price delta
///
/// # Returns
///
/// A [`PlanCalculation`] whose result satisfies
/// `total_budget == land + building + fees` and `loan_principal >= 0`.
/// Errors when an amount is negative or not finite, the term is outside 1 to
/// 50 years, or the rate is negative.
pub fn calculate_plan(input: &PlanInput, variable_fee_rate: f64) -> EngineResult<PlanCalculation> {
    validate_input(input)?;

    let fee_adjustment = adjust_fees(
        input.base_fee,
        input.building,
        input.reference_building,
        variable_fee_rate,
    );
    let fees = fee_adjustment.fees;

    let total_budget = input.land + input.building + fees;
    let loan_principal = (total_budget - input.owner_cash).max(0.0);
    let payment = monthly_payment(loan_principal, input.rate_percent, input.term_years)?;

    Ok(PlanCalculation {
        result: PlanResult {
            total_budget,
            loan_principal,
            fees,
            land: input.land,
            building: input.building,
            monthly_payment: payment,
            rate: input.rate_percent,
            term_years: input.term_years,
        },
        fee_adjustment,
    })
}

fn validate_input(input: &PlanInput) -> EngineResult<()> {
    let amounts = [
        ("land", input.land),
        ("building", input.building),
        ("owner_cash", input.owner_cash),
        ("base_fee", input.base_fee),
        ("reference_building", input.reference_building),
    ];
    for (field, value) in amounts {
        if !value.is_finite() || value < 0.0 {
            return Err(EngineError::validation(
                field,
                format!("must be a non-negative number, got {}", value),
            ));
        }
    }
    validate_term(input.term_years)?;
    validate_rate(input.rate_percent)
}
