//! Request types for the Home Plan Engine API.
//!
//! This module defines the JSON request structures for the `/proposal`,
//! `/plan` and `/deduction` endpoints.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{DeductionInput, PlanInput, PlanTier, SimulationParameters};

/// Request body for the `/proposal` endpoint.
///
/// Every field is optional; omitted fields keep the configured default.
/// Amounts are in 万円, rates in percent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProposalRequest {
    /// Customer name.
    #[serde(default)]
    pub customer_name: Option<String>,
    /// Household income.
    #[serde(default)]
    pub household_income: Option<f64>,
    /// Land price shared by every tier.
    #[serde(default)]
    pub land_price: Option<f64>,
    /// Owner cash / down payment.
    #[serde(default)]
    pub owner_cash: Option<f64>,
    /// Replaces the configured tier list.
    #[serde(default)]
    pub tiers: Option<Vec<PlanTier>>,
    /// Building price overrides keyed by tier id.
    #[serde(default)]
    pub building_prices: BTreeMap<String, f64>,
    /// Id of the reference tier.
    #[serde(default)]
    pub reference_tier: Option<String>,
    /// Screening interest rate.
    #[serde(default)]
    pub interest_rate_percent: Option<f64>,
    /// Repayment period in years.
    #[serde(default)]
    pub term_years: Option<u32>,
    /// Fee rate over the reference tier's land + building total.
    #[serde(default)]
    pub fee_rate_percent: Option<f64>,
    /// Deduction rate.
    #[serde(default)]
    pub deduction_rate_percent: Option<f64>,
    /// Deduction period in years.
    #[serde(default)]
    pub deduction_years: Option<u32>,
    /// Deduction cap.
    #[serde(default)]
    pub deduction_cap: Option<f64>,
}

impl ProposalRequest {
    /// Overlays the request on the configured defaults.
    ///
    /// Fails with `PlanNotFound` when a building price override names a tier
    /// that is not part of the resulting tier list.
    pub fn apply_to(self, defaults: SimulationParameters) -> EngineResult<SimulationParameters> {
        let mut params = defaults;

        if let Some(name) = self.customer_name {
            params.customer.name = name;
        }
        if let Some(income) = self.household_income {
            params.customer.household_income = income;
        }
        if let Some(land_price) = self.land_price {
            params.land_price = land_price;
        }
        if let Some(owner_cash) = self.owner_cash {
            params.owner_cash = owner_cash;
        }
        if let Some(tiers) = self.tiers {
            params.tiers = tiers;
        }
        for (tier_id, price) in self.building_prices {
            let tier = params
                .tiers
                .iter_mut()
                .find(|t| t.id == tier_id)
                .ok_or(EngineError::PlanNotFound { tier_id })?;
            tier.building_price = price;
        }
        if let Some(reference_tier) = self.reference_tier {
            params.reference_tier = reference_tier;
        }
        if let Some(rate) = self.interest_rate_percent {
            params.loan.interest_rate_percent = rate;
        }
        if let Some(term) = self.term_years {
            params.loan.term_years = term;
        }
        if let Some(fee_rate) = self.fee_rate_percent {
            params.fees.fee_rate_percent = fee_rate;
        }
        if let Some(rate) = self.deduction_rate_percent {
            params.deduction.rate_percent = rate;
        }
        if let Some(years) = self.deduction_years {
            params.deduction.years = years;
        }
        if let Some(cap) = self.deduction_cap {
            params.deduction.cap = cap;
        }

        Ok(params)
    }
}

/// Request body for the `/plan` endpoint.
///
/// Amounts share one base unit of the caller's choosing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanRequest {
    /// The land price.
    pub land: f64,
    /// The building price.
    pub building: f64,
    /// Owner cash.
    pub owner_cash: f64,
    /// Fee estimate for the reference tier.
    pub base_fee: f64,
    /// Reference tier building price; defaults to `building` (no surcharge).
    #[serde(default)]
    pub reference_building: Option<f64>,
    /// Annual interest rate in percent.
    pub rate_percent: f64,
    /// Loan term in years.
    pub term_years: u32,
}

/// Request body for the `/deduction` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeductionRequest {
    /// Loan principal at the start of the projection.
    pub loan_principal: f64,
    /// Annual interest rate in percent.
    pub rate_percent: f64,
    /// Number of deduction years.
    pub deduction_years: u32,
    /// Deduction cap, same unit as the loan.
    pub cap: f64,
    /// Deduction rate in percent.
    pub deduction_rate_percent: f64,
    /// Original loan term in years.
    pub term_years: u32,
}

impl From<PlanRequest> for PlanInput {
    fn from(req: PlanRequest) -> Self {
        PlanInput {
            land: req.land,
            building: req.building,
            owner_cash: req.owner_cash,
            base_fee: req.base_fee,
            reference_building: req.reference_building.unwrap_or(req.building),
            rate_percent: req.rate_percent,
            term_years: req.term_years,
        }
    }
}

impl From<DeductionRequest> for DeductionInput {
    fn from(req: DeductionRequest) -> Self {
        DeductionInput {
            loan_principal: req.loan_principal,
            rate_percent: req.rate_percent,
            deduction_years: req.deduction_years,
            cap: req.cap,
            deduction_rate_percent: req.deduction_rate_percent,
            term_years: req.term_years,
        }
    }
}
