//! Configuration types for proposal simulation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use serde::Deserialize;

use crate::models::{
    CustomerProfile, DeductionTerms, FeeTerms, LoanTerms, PlanTier, SimulationParameters,
};

/// Metadata about the configuration set.
///
/// Identifies which rate sheet a proposal was computed from.
#[derive(Debug, Clone, Deserialize)]
pub struct SimulationMetadata {
    /// Short code for this configuration set (e.g., "standard").
    pub code: String,
    /// The human-readable name of the simulation.
    pub name: String,
    /// The version or effective date of the configured conditions.
    pub version: String,
}

/// Loan and fee configuration file structure (loan.yaml).
#[derive(Debug, Clone, Deserialize)]
pub struct LoanConfig {
    /// Default loan conditions.
    pub loan: LoanTerms,
    /// Default fee estimation settings.
    pub fees: FeeTerms,
}

/// Deduction configuration file structure (deduction.yaml).
#[derive(Debug, Clone, Deserialize)]
pub struct DeductionConfig {
    /// Default deduction settings.
    pub deduction: DeductionTerms,
}

/// Plan configuration file structure (plans.yaml).
#[derive(Debug, Clone, Deserialize)]
pub struct PlansConfig {
    /// Default customer shown on a fresh form.
    pub customer: CustomerProfile,
    /// Default land price, in 万円.
    pub land_price: f64,
    /// Default owner cash, in 万円.
    pub owner_cash: f64,
    /// Id of the tier anchoring fees and deductions.
    pub reference_tier: String,
    /// The offered tiers, in display order.
    pub tiers: Vec<PlanTier>,
}

/// The complete simulation configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Configuration metadata.
    metadata: SimulationMetadata,
    /// Loan and fee defaults.
    loan: LoanConfig,
    /// Deduction defaults.
    deduction: DeductionConfig,
    /// Plan defaults.
    plans: PlansConfig,
}

impl SimulationConfig {
    /// Creates a new SimulationConfig from its component parts.
    pub fn new(
        metadata: SimulationMetadata,
        loan: LoanConfig,
        deduction: DeductionConfig,
        plans: PlansConfig,
    ) -> Self {
        Self {
            metadata,
            loan,
            deduction,
            plans,
        }
    }

    /// Returns the configuration metadata.
    pub fn metadata(&self) -> &SimulationMetadata {
        &self.metadata
    }

    /// Returns the configured tiers in display order.
    pub fn tiers(&self) -> &[PlanTier] {
        &self.plans.tiers
    }

    /// Returns the id of the reference tier.
    pub fn reference_tier(&self) -> &str {
        &self.plans.reference_tier
    }

    /// Builds the parameters of a proposal using every configured default.
    pub fn defaults(&self) -> SimulationParameters {
        SimulationParameters {
            customer: self.plans.customer.clone(),
            land_price: self.plans.land_price,
            owner_cash: self.plans.owner_cash,
            tiers: self.plans.tiers.clone(),
            reference_tier: self.plans.reference_tier.clone(),
            loan: self.loan.loan,
            fees: self.loan.fees,
            deduction: self.deduction.deduction,
        }
    }
}
