//! Core data models for the Home Plan Engine.
//!
//! This module contains the domain models used throughout the engine: the
//! per-tier budget records, the deduction schedule, the simulation
//! parameters, and the composed proposal with its audit trace.

mod audit;
mod deduction;
mod parameters;
mod plan;
mod proposal;
mod summary;

pub use audit::{AuditStep, AuditTrace, AuditWarning};
pub use deduction::{DeductionInput, DeductionSchedule};
pub use parameters::{
    CustomerProfile, DEDUCTION_CAP_RANGE, DEDUCTION_RATE_RANGE, DEDUCTION_YEARS_RANGE,
    DeductionTerms, FeeTerms, HOUSEHOLD_INCOME_RANGE, INTEREST_RATE_RANGE, LOAN_TERM_RANGE,
    LoanTerms, OWNER_CASH_RANGE, SimulationParameters,
};
pub use plan::{PlanInput, PlanResult, PlanTier};
pub use proposal::{Proposal, TierPlan};
pub use summary::{DeductionSummary, PlanSummary, ProposalSummary};
