//! The composed financing proposal.
//!
//! This module contains the [`Proposal`] type that gathers every tier's
//! budget record, the reference tier's deduction projection, the derived
//! monthly figures and the audit trace into a single value for the dashboard
//! and document-export layers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{AuditTrace, CustomerProfile, DeductionSchedule, DeductionTerms, PlanResult};

/// The budget record for one named tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierPlan {
    /// The tier id.
    pub tier_id: String,
    /// The tier display name.
    pub name: String,
    /// Whether this is the reference tier.
    pub is_reference: bool,
    /// The computed budget and payment.
    pub result: PlanResult,
}

/// A complete financing proposal for one customer.
///
/// Monetary fields are in yen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proposal {
    /// Unique identifier for this proposal.
    pub proposal_id: Uuid,
    /// When the proposal was generated.
    pub generated_at: DateTime<Utc>,
    /// The version of the engine that composed the proposal.
    pub engine_version: String,
    /// The customer the proposal is addressed to.
    pub customer: CustomerProfile,
    /// Id of the reference tier.
    pub reference_tier: String,
    /// One record per tier, in configured order.
    pub plans: Vec<TierPlan>,
    /// The deduction settings used for the projection (cap in 万円).
    pub deduction_terms: DeductionTerms,
    /// The reference tier's deduction projection.
    pub deduction: DeductionSchedule,
    /// Total refund spread over every month of the deduction period.
    pub deduction_monthly_equivalent: f64,
    /// Reference monthly payment minus the monthly refund equivalent.
    pub effective_monthly_payment: f64,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}

impl Proposal {
    /// Looks a tier's plan up by id.
    pub fn plan(&self, tier_id: &str) -> Option<&TierPlan> {
        self.plans.iter().find(|p| p.tier_id == tier_id)
    }

    /// Returns the reference tier's plan.
    pub fn reference_plan(&self) -> Option<&TierPlan> {
        self.plan(&self.reference_tier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tier_plan(tier_id: &str, is_reference: bool) -> TierPlan {
        TierPlan {
            tier_id: tier_id.to_string(),
            name: tier_id.to_string(),
            is_reference,
            result: PlanResult {
                total_budget: 0.0,
                loan_principal: 0.0,
                fees: 0.0,
                land: 0.0,
                building: 0.0,
                monthly_payment: 0.0,
                rate: 1.5,
                term_years: 35,
            },
        }
    }

    fn sample_proposal() -> Proposal {
        Proposal {
            proposal_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            engine_version: "0.1.0".to_string(),
            customer: CustomerProfile {
                name: "Yamada".to_string(),
                household_income: 600.0,
            },
            reference_tier: "standard".to_string(),
            plans: vec![tier_plan("budget", false), tier_plan("standard", true)],
            deduction_terms: DeductionTerms {
                rate_percent: 0.7,
                years: 13,
                cap: 4500.0,
            },
            deduction: DeductionSchedule {
                total_return: 0.0,
                yearly_deductions: vec![0.0; 13],
            },
            deduction_monthly_equivalent: 0.0,
            effective_monthly_payment: 0.0,
            audit_trace: AuditTrace {
                steps: vec![],
                warnings: vec![],
                duration_us: 0,
            },
        }
    }

    #[test]
    fn test_reference_plan_found_by_id() {
        let proposal = sample_proposal();
        let reference = proposal.reference_plan().unwrap();
        assert_eq!(reference.tier_id, "standard");
        assert!(reference.is_reference);
    }

    #[test]
    fn test_unknown_plan_returns_none() {
        assert!(sample_proposal().plan("premium").is_none());
    }

    #[test]
    fn test_proposal_round_trips_through_json() {
        let proposal = sample_proposal();
        let json = serde_json::to_string(&proposal).unwrap();
        let parsed: Proposal = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, proposal);
    }
}
