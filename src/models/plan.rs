//! Plan tier models and the per-tier budget records.
//!
//! This module defines the raw configuration of one plan tier ([`PlanInput`]),
//! the budget/payment record the calculator produces for it ([`PlanResult`]),
//! and the named building-price variants offered to a customer ([`PlanTier`]).

use serde::{Deserialize, Serialize};

/// One building-price variant offered alongside the others on the same land.
///
/// # Example
///
/// ```
/// use home_plan_engine::models::PlanTier;
///
/// let tier = PlanTier {
///     id: "standard".to_string(),
///     name: "Standard Plan".to_string(),
///     building_price: 2500.0,
/// };
/// assert_eq!(tier.id, "standard");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanTier {
    /// Stable identifier used to select the reference tier (e.g., "standard").
    pub id: String,
    /// Human-readable plan name shown on the dashboard.
    pub name: String,
    /// The building price for this tier, in 万円.
    pub building_price: f64,
}

/// The raw inputs for one budget/payment calculation.
///
/// All monetary values share one base unit; the calculator never converts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanInput {
    /// The land price.
    pub land: f64,
    /// The building price for this tier.
    pub building: f64,
    /// Cash the owner contributes up front.
    pub owner_cash: f64,
    /// The transaction-fee estimate for the reference tier.
    pub base_fee: f64,
    /// The building price of the reference tier, anchoring the fee surcharge.
    pub reference_building: f64,
    /// Annual nominal interest rate in percent (1.5 means 1.5%).
    pub rate_percent: f64,
    /// Loan term in years.
    pub term_years: u32,
}

/// The budget breakdown and fixed monthly payment for one plan tier.
///
/// Field order is relied upon by the document export and must not change.
///
/// # Example
///
/// ```
/// use home_plan_engine::models::PlanResult;
///
/// let result = PlanResult {
///     total_budget: 4280.0,
///     loan_principal: 4080.0,
///     fees: 280.0,
///     land: 1500.0,
///     building: 2500.0,
///     monthly_payment: 12.49,
///     rate: 1.5,
///     term_years: 35,
/// };
/// assert_eq!(result.land + result.building + result.fees, result.total_budget);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanResult {
    /// Land + building + fees.
    pub total_budget: f64,
    /// Total budget minus owner cash, floored at zero.
    pub loan_principal: f64,
    /// Base fee estimate adjusted for the building-price delta.
    pub fees: f64,
    /// The land price (pass-through).
    pub land: f64,
    /// The building price (pass-through).
    pub building: f64,
    /// Fixed monthly payment from the annuity formula.
    pub monthly_payment: f64,
    /// Annual interest rate in percent (echoed).
    pub rate: f64,
    /// Loan term in years (echoed).
    pub term_years: u32,
}

impl PlanResult {
    /// Returns true when owner cash covers the whole budget.
    pub fn is_cash_purchase(&self) -> bool {
        self.loan_principal == 0.0
    }

    /// Returns the total of all monthly payments over the loan term.
    pub fn total_repayment(&self) -> f64 {
        self.monthly_payment * f64::from(self.term_years) * 12.0
    }
}
