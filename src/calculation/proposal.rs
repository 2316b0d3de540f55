//! Proposal composition.
//!
//! Runs the budget calculator for every configured tier and the deduction
//! projector for the reference tier, then derives the dashboard's monthly
//! figures and records an audit trace of every step.

use std::time::Instant;

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditStep, AuditTrace, AuditWarning, DeductionInput, PlanInput, Proposal,
    SimulationParameters, TierPlan,
};

use super::amortization::payment_count;
use super::budget::{PlanCalculation, calculate_plan};
use super::fee_adjustment::base_fee_estimate;
use super::tax_deduction::compute_deduction;

/// Yen per 万円, the unit of the sales input form.
pub const YEN_PER_MAN: f64 = 10_000.0;

/// Converts an amount in 万円 to yen.
pub fn man_to_yen(amount_man: f64) -> f64 {
    amount_man * YEN_PER_MAN
}

/// Composes a complete financing proposal.
///
/// Parameters are validated against the form's accepted ranges first. Every
/// amount is converted from 万円 to yen before calculation, so all monetary
/// fields of the returned [`Proposal`] are in yen.
///
/// # Example
///
/// ```no_run
/// use home_plan_engine::calculation::build_proposal;
/// use home_plan_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/standard")?;
/// let proposal = build_proposal(&loader.defaults())?;
/// println!("Effective monthly payment: {:.0}", proposal.effective_monthly_payment);
/// # Ok::<(), home_plan_engine::error::EngineError>(())
/// ```
pub fn build_proposal(params: &SimulationParameters) -> EngineResult<Proposal> {
    let start_time = Instant::now();
    params.validate()?;

    let reference = params.reference()?;
    let land = man_to_yen(params.land_price);
    let owner_cash = man_to_yen(params.owner_cash);
    let reference_building = man_to_yen(reference.building_price);
    let base_fee = base_fee_estimate(land, reference_building, params.fees.fee_rate_percent);

    let mut steps: Vec<AuditStep> = Vec::new();
    let mut warnings: Vec<AuditWarning> = Vec::new();
    let mut step_number: u32 = 1;

    steps.push(AuditStep {
        step_number,
        rule_id: "base_fee_estimate".to_string(),
        rule_name: "Base Fee Estimate".to_string(),
        tier_id: Some(reference.id.clone()),
        input: serde_json::json!({
            "land": land,
            "reference_building": reference_building,
            "fee_rate_percent": params.fees.fee_rate_percent
        }),
        output: serde_json::json!({ "base_fee": base_fee }),
        reasoning: format!(
            "({} + {}) x {}% = {}",
            land, reference_building, params.fees.fee_rate_percent, base_fee
        ),
    });
    step_number += 1;

    let mut plans = Vec::with_capacity(params.tiers.len());
    for tier in &params.tiers {
        let input = PlanInput {
            land,
            building: man_to_yen(tier.building_price),
            owner_cash,
            base_fee,
            reference_building,
            rate_percent: params.loan.interest_rate_percent,
            term_years: params.loan.term_years,
        };
        let calculation = calculate_plan(&input, params.fees.variable_fee_rate)?;
        debug!(
            tier = %tier.id,
            total_budget = calculation.result.total_budget,
            monthly_payment = calculation.result.monthly_payment,
            "Plan tier calculated"
        );

        steps.push(fee_step(step_number, &tier.id, &input, &calculation));
        step_number += 1;
        steps.push(budget_step(step_number, &tier.id, &input, &calculation));
        step_number += 1;

        if calculation.result.is_cash_purchase() {
            warnings.push(AuditWarning::new(
                "NO_LOAN_REQUIRED",
                format!(
                    "Owner cash covers the whole budget of the '{}' plan; no loan is needed",
                    tier.id
                ),
                "low",
            ));
        }

        plans.push(TierPlan {
            tier_id: tier.id.clone(),
            name: tier.name.clone(),
            is_reference: tier.id == reference.id,
            result: calculation.result,
        });
    }

    let reference_result = plans
        .iter()
        .find(|p| p.is_reference)
        .map(|p| p.result.clone())
        .ok_or_else(|| EngineError::PlanNotFound {
            tier_id: reference.id.clone(),
        })?;

    let deduction_input = DeductionInput {
        loan_principal: reference_result.loan_principal,
        rate_percent: params.loan.interest_rate_percent,
        deduction_years: params.deduction.years,
        cap: man_to_yen(params.deduction.cap),
        deduction_rate_percent: params.deduction.rate_percent,
        term_years: params.loan.term_years,
    };
    let deduction = compute_deduction(&deduction_input)?;
    let deduction_monthly_equivalent = deduction.monthly_equivalent();
    let effective_monthly_payment = reference_result.monthly_payment - deduction_monthly_equivalent;

    if deduction_input.loan_principal > deduction_input.cap {
        warnings.push(AuditWarning::new(
            "DEDUCTION_CAP_APPLIED",
            format!(
                "Loan of {:.0} exceeds the deduction cap of {:.0}; refunds are based on the cap",
                deduction_input.loan_principal, deduction_input.cap
            ),
            "medium",
        ));
    }

    steps.push(AuditStep {
        step_number,
        rule_id: "tax_deduction".to_string(),
        rule_name: "Mortgage Tax Deduction".to_string(),
        tier_id: Some(reference.id.clone()),
        input: serde_json::json!({
            "loan_principal": deduction_input.loan_principal,
            "rate_percent": deduction_input.rate_percent,
            "deduction_years": deduction_input.deduction_years,
            "cap": deduction_input.cap,
            "deduction_rate_percent": deduction_input.deduction_rate_percent,
            "term_years": deduction_input.term_years
        }),
        output: serde_json::json!({
            "total_return": deduction.total_return,
            "yearly_deductions": deduction
                .iter_years()
                .map(|(year, refund)| serde_json::json!({ "year": year, "refund": refund }))
                .collect::<Vec<_>>(),
            "monthly_equivalent": deduction_monthly_equivalent
        }),
        reasoning: format!(
            "{} years at {}% of min(balance, {:.0}) = {:.0} in total, {:.0} per month",
            deduction_input.deduction_years,
            deduction_input.deduction_rate_percent,
            deduction_input.cap,
            deduction.total_return,
            deduction_monthly_equivalent
        ),
    });

    let duration_us = start_time.elapsed().as_micros() as u64;
    debug!(
        tiers = plans.len(),
        total_return = deduction.total_return,
        duration_us,
        "Proposal composed"
    );

    Ok(Proposal {
        proposal_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        customer: params.customer.clone(),
        reference_tier: reference.id.clone(),
        plans,
        deduction_terms: params.deduction,
        deduction,
        deduction_monthly_equivalent,
        effective_monthly_payment,
        audit_trace: AuditTrace {
            steps,
            warnings,
            duration_us,
        },
    })
}

fn fee_step(
    step_number: u32,
    tier_id: &str,
    input: &PlanInput,
    calculation: &PlanCalculation,
) -> AuditStep {
    let adjustment = &calculation.fee_adjustment;
    AuditStep {
        step_number,
        rule_id: "fee_adjustment".to_string(),
        rule_name: "Fee Adjustment".to_string(),
        tier_id: Some(tier_id.to_string()),
        input: serde_json::json!({
            "base_fee": input.base_fee,
            "building": input.building,
            "reference_building": input.reference_building
        }),
        output: serde_json::json!({
            "delta": adjustment.delta,
            "variable_fee": adjustment.variable_fee,
            "fees": adjustment.fees
        }),
        reasoning: format!(
            "{} + ({} - {}) surcharge {} = {}",
            input.base_fee,
            input.building,
            input.reference_building,
            adjustment.variable_fee,
            adjustment.fees
        ),
    }
}

fn budget_step(
    step_number: u32,
    tier_id: &str,
    input: &PlanInput,
    calculation: &PlanCalculation,
) -> AuditStep {
    let result = &calculation.result;
    AuditStep {
        step_number,
        rule_id: "budget_payment".to_string(),
        rule_name: "Budget and Monthly Payment".to_string(),
        tier_id: Some(tier_id.to_string()),
        input: serde_json::json!({
            "land": input.land,
            "building": input.building,
            "fees": result.fees,
            "owner_cash": input.owner_cash,
            "rate_percent": input.rate_percent,
            "term_years": input.term_years
        }),
        output: serde_json::json!({
            "total_budget": result.total_budget,
            "loan_principal": result.loan_principal,
            "monthly_payment": result.monthly_payment,
            "total_repayment": result.total_repayment()
        }),
        reasoning: format!(
            "Budget {:.0} - cash {:.0} = loan {:.0}; {} payments at {}% = {:.0} per month",
            result.total_budget,
            input.owner_cash,
            result.loan_principal,
            payment_count(input.term_years),
            input.rate_percent,
            result.monthly_payment
        ),
    }
}
