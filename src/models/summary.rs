//! Rounded proposal figures for printed documents.
//!
//! The calculators never round. This module converts a [`Proposal`] into the
//! fixed-precision figures a printed proposal shows: plan amounts in whole
//! 万円, monthly amounts in whole yen, yearly refunds in 万円 to one decimal.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::Proposal;

/// Rounded figures for one tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanSummary {
    /// The tier id.
    pub tier_id: String,
    /// The tier display name.
    pub name: String,
    /// Total budget, in 万円.
    pub total_man: Decimal,
    /// Land price, in 万円.
    pub land_man: Decimal,
    /// Building price, in 万円.
    pub building_man: Decimal,
    /// Fees, in 万円.
    pub fees_man: Decimal,
    /// Loan principal, in 万円.
    pub loan_man: Decimal,
    /// Monthly payment, in yen.
    pub monthly_payment_yen: Decimal,
    /// Interest rate in percent, one decimal.
    pub rate_percent: Decimal,
    /// Loan term in years.
    pub term_years: u32,
}

/// Rounded figures for the deduction page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionSummary {
    /// Number of deduction years.
    pub years: u32,
    /// Deduction rate in percent.
    pub rate_percent: Decimal,
    /// Deduction cap, in 万円.
    pub cap_man: Decimal,
    /// Reference tier loan principal, in 万円.
    pub loan_man: Decimal,
    /// Total refund, in yen.
    pub total_yen: Decimal,
    /// Total refund, in 万円.
    pub total_man: Decimal,
    /// Refund per year, in 万円 to one decimal.
    pub yearly_man: Vec<Decimal>,
    /// Reference tier monthly payment, in yen.
    pub monthly_payment_yen: Decimal,
    /// Total refund spread per month, in yen.
    pub monthly_equivalent_yen: Decimal,
    /// Monthly payment net of the refund, in yen.
    pub effective_monthly_payment_yen: Decimal,
}

/// Everything the document-export layer prints for a proposal.
///
/// # Example
///
/// ```no_run
/// use home_plan_engine::calculation::build_proposal;
/// use home_plan_engine::config::ConfigLoader;
/// use home_plan_engine::models::ProposalSummary;
///
/// let loader = ConfigLoader::load("./config/standard")?;
/// let proposal = build_proposal(&loader.defaults())?;
/// let summary = ProposalSummary::from_proposal(&proposal)?;
/// println!("{} 万円 back over {} years", summary.deduction.total_man, summary.deduction.years);
/// # Ok::<(), home_plan_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalSummary {
    /// Customer name.
    pub customer_name: String,
    /// Household income, in 万円.
    pub household_income_man: Decimal,
    /// Land price shared by the tiers, in 万円.
    pub land_man: Decimal,
    /// Id of the reference tier.
    pub reference_tier: String,
    /// One entry per tier, in proposal order.
    pub plans: Vec<PlanSummary>,
    /// The deduction page figures.
    pub deduction: DeductionSummary,
}

impl ProposalSummary {
    /// Rounds a proposal's figures for printing.
    ///
    /// Errors with `CalculationError` if any figure is not finite or the
    /// reference tier is missing from the proposal.
    pub fn from_proposal(proposal: &Proposal) -> EngineResult<Self> {
        let reference = proposal
            .reference_plan()
            .ok_or_else(|| EngineError::CalculationError {
                message: format!(
                    "reference tier '{}' missing from proposal",
                    proposal.reference_tier
                ),
            })?;

        let plans = proposal
            .plans
            .iter()
            .map(|plan| {
                let r = &plan.result;
                Ok(PlanSummary {
                    tier_id: plan.tier_id.clone(),
                    name: plan.name.clone(),
                    total_man: yen_to_man(r.total_budget, 0)?,
                    land_man: yen_to_man(r.land, 0)?,
                    building_man: yen_to_man(r.building, 0)?,
                    fees_man: yen_to_man(r.fees, 0)?,
                    loan_man: yen_to_man(r.loan_principal, 0)?,
                    monthly_payment_yen: rounded(r.monthly_payment, 0)?,
                    rate_percent: rounded(r.rate, 1)?,
                    term_years: r.term_years,
                })
            })
            .collect::<EngineResult<Vec<_>>>()?;

        let schedule = &proposal.deduction;
        let yearly_man = schedule
            .yearly_deductions
            .iter()
            .map(|amount| yen_to_man(*amount, 1))
            .collect::<EngineResult<Vec<_>>>()?;

        let deduction = DeductionSummary {
            years: schedule.years() as u32,
            rate_percent: rounded(proposal.deduction_terms.rate_percent, 1)?,
            cap_man: rounded(proposal.deduction_terms.cap, 0)?,
            loan_man: yen_to_man(reference.result.loan_principal, 0)?,
            total_yen: rounded(schedule.total_return, 0)?,
            total_man: yen_to_man(schedule.total_return, 0)?,
            yearly_man,
            monthly_payment_yen: rounded(reference.result.monthly_payment, 0)?,
            monthly_equivalent_yen: rounded(proposal.deduction_monthly_equivalent, 0)?,
            effective_monthly_payment_yen: rounded(proposal.effective_monthly_payment, 0)?,
        };

        Ok(Self {
            customer_name: proposal.customer.name.clone(),
            household_income_man: rounded(proposal.customer.household_income, 0)?,
            land_man: yen_to_man(reference.result.land, 0)?,
            reference_tier: proposal.reference_tier.clone(),
            plans,
            deduction,
        })
    }
}

fn to_decimal(value: f64) -> EngineResult<Decimal> {
    Decimal::from_f64(value).ok_or_else(|| EngineError::CalculationError {
        message: format!("value {} cannot be represented as a decimal", value),
    })
}

fn rounded(value: f64, dp: u32) -> EngineResult<Decimal> {
    Ok(to_decimal(value)?.round_dp(dp))
}

fn yen_to_man(yen: f64, dp: u32) -> EngineResult<Decimal> {
    Ok((to_decimal(yen)? / Decimal::from(10_000)).round_dp(dp))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_yen_to_man_rounds_to_whole_units() {
        assert_eq!(yen_to_man(42_800_000.0, 0).unwrap(), dec("4280"));
        assert_eq!(yen_to_man(3_112_385.04, 0).unwrap(), dec("311"));
    }

    #[test]
    fn test_yen_to_man_with_one_decimal() {
        assert_eq!(yen_to_man(279_390.45, 1).unwrap(), dec("27.9"));
        assert_eq!(yen_to_man(197_195.65, 1).unwrap(), dec("19.7"));
    }

    #[test]
    fn test_rounded_yen() {
        assert_eq!(rounded(124_923.251_399, 0).unwrap(), dec("124923"));
        assert_eq!(rounded(1.5, 1).unwrap(), dec("1.5"));
    }

    #[test]
    fn test_non_finite_value_is_calculation_error() {
        assert!(matches!(
            rounded(f64::NAN, 0),
            Err(EngineError::CalculationError { .. })
        ));
        assert!(matches!(
            yen_to_man(f64::INFINITY, 0),
            Err(EngineError::CalculationError { .. })
        ));
    }
}
