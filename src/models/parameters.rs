//! Simulation parameters for one financing proposal.
//!
//! [`SimulationParameters`] is the explicit, immutable configuration threaded
//! into proposal composition. Monetary amounts are expressed in 万円 (units
//! of 10,000 yen), matching the sales input form. Range checks on these
//! parameters happen here, at the boundary; the core calculators trust them.

use std::collections::HashSet;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::PlanTier;

/// Accepted household income, in 万円.
pub const HOUSEHOLD_INCOME_RANGE: RangeInclusive<f64> = 200.0..=5000.0;
/// Accepted owner cash / down payment, in 万円.
pub const OWNER_CASH_RANGE: RangeInclusive<f64> = 0.0..=5000.0;
/// Accepted screening interest rate, in percent.
pub const INTEREST_RATE_RANGE: RangeInclusive<f64> = 0.1..=5.0;
/// Accepted loan term, in years.
pub const LOAN_TERM_RANGE: RangeInclusive<u32> = 1..=50;
/// Accepted deduction rate, in percent.
pub const DEDUCTION_RATE_RANGE: RangeInclusive<f64> = 0.1..=1.0;
/// Accepted deduction period, in years.
pub const DEDUCTION_YEARS_RANGE: RangeInclusive<u32> = 1..=20;
/// Accepted deduction cap, in 万円.
pub const DEDUCTION_CAP_RANGE: RangeInclusive<f64> = 0.0..=10000.0;

/// The customer the proposal is addressed to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerProfile {
    /// Customer name as printed on the proposal (honorific added by the renderer).
    #[serde(default)]
    pub name: String,
    /// Household income, in 万円.
    pub household_income: f64,
}

/// Loan conditions shared by every tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Screening interest rate, in percent.
    pub interest_rate_percent: f64,
    /// Repayment period, in years.
    pub term_years: u32,
}

/// Transaction-fee estimation settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeeTerms {
    /// Fees as a percentage of the reference tier's land + building total.
    pub fee_rate_percent: f64,
    /// Surcharge (or discount) per unit of building-price delta from the reference tier.
    #[serde(default = "default_variable_fee_rate")]
    pub variable_fee_rate: f64,
}

fn default_variable_fee_rate() -> f64 {
    crate::calculation::VARIABLE_FEE_RATE
}

/// Mortgage tax-deduction settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeductionTerms {
    /// Deduction rate, in percent.
    pub rate_percent: f64,
    /// Deduction period, in years.
    pub years: u32,
    /// Maximum eligible loan balance, in 万円.
    pub cap: f64,
}

/// Everything needed to compose one financing proposal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    /// The customer receiving the proposal.
    pub customer: CustomerProfile,
    /// Land price shared by every tier, in 万円.
    pub land_price: f64,
    /// Owner cash shared by every tier, in 万円.
    pub owner_cash: f64,
    /// The tiers to compute, in display order.
    pub tiers: Vec<PlanTier>,
    /// Id of the tier anchoring the fee estimate and the deduction projection.
    pub reference_tier: String,
    /// Loan conditions.
    pub loan: LoanTerms,
    /// Fee estimation settings.
    pub fees: FeeTerms,
    /// Deduction settings.
    pub deduction: DeductionTerms,
}

impl SimulationParameters {
    /// Returns the reference tier.
    pub fn reference(&self) -> EngineResult<&PlanTier> {
        self.tier(&self.reference_tier)
    }

    /// Looks a tier up by id.
    pub fn tier(&self, id: &str) -> EngineResult<&PlanTier> {
        self.tiers
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| EngineError::PlanNotFound {
                tier_id: id.to_string(),
            })
    }

    /// Checks every parameter against the ranges the sales form accepts.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use home_plan_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/standard")?;
    /// let mut params = loader.defaults();
    /// params.loan.term_years = 0;
    /// assert!(params.validate().is_err());
    /// # Ok::<(), home_plan_engine::error::EngineError>(())
    /// ```
    pub fn validate(&self) -> EngineResult<()> {
        check_range(
            "customer.household_income",
            self.customer.household_income,
            &HOUSEHOLD_INCOME_RANGE,
        )?;
        check_non_negative("land_price", self.land_price)?;
        check_range("owner_cash", self.owner_cash, &OWNER_CASH_RANGE)?;
        check_range(
            "loan.interest_rate_percent",
            self.loan.interest_rate_percent,
            &INTEREST_RATE_RANGE,
        )?;
        check_range("loan.term_years", self.loan.term_years, &LOAN_TERM_RANGE)?;
        check_non_negative("fees.fee_rate_percent", self.fees.fee_rate_percent)?;
        if !self.fees.variable_fee_rate.is_finite() {
            return Err(EngineError::validation(
                "fees.variable_fee_rate",
                "must be a finite number",
            ));
        }
        check_range(
            "deduction.rate_percent",
            self.deduction.rate_percent,
            &DEDUCTION_RATE_RANGE,
        )?;
        check_range(
            "deduction.years",
            self.deduction.years,
            &DEDUCTION_YEARS_RANGE,
        )?;
        check_range("deduction.cap", self.deduction.cap, &DEDUCTION_CAP_RANGE)?;

        if self.tiers.is_empty() {
            return Err(EngineError::validation(
                "tiers",
                "at least one plan tier is required",
            ));
        }
        let mut seen = HashSet::new();
        for tier in &self.tiers {
            if !seen.insert(tier.id.as_str()) {
                return Err(EngineError::validation(
                    "tiers",
                    format!("duplicate tier id '{}'", tier.id),
                ));
            }
            check_non_negative(&format!("tiers.{}.building_price", tier.id), tier.building_price)?;
        }
        self.reference()?;

        Ok(())
    }
}

fn check_non_negative(field: &str, value: f64) -> EngineResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(EngineError::validation(
            field,
            format!("must be a non-negative number, got {}", value),
        ));
    }
    Ok(())
}

fn check_range<T>(field: &str, value: T, range: &RangeInclusive<T>) -> EngineResult<()>
where
    T: PartialOrd + std::fmt::Display,
{
    if !range.contains(&value) {
        return Err(EngineError::validation(
            field,
            format!(
                "must be between {} and {}, got {}",
                range.start(),
                range.end(),
                value
            ),
        ));
    }
    Ok(())
}
