//! Transaction-fee estimation.
//!
//! Fees are estimated once, as a percentage of the reference tier's land +
//! building total, and then shifted for every other tier by a linear
//! surcharge (or discount) proportional to its building-price delta.

use serde::{Deserialize, Serialize};

/// Surcharge per unit of building price above the reference tier (3%).
///
/// Tiers below the reference get the same rate as a discount.
pub const VARIABLE_FEE_RATE: f64 = 0.03;

/// The fee figures for one tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeeAdjustment {
    /// Building price minus the reference building price.
    pub delta: f64,
    /// `delta * variable_fee_rate`, negative for cheaper tiers.
    pub variable_fee: f64,
    /// Base fee plus the variable fee.
    pub fees: f64,
}

/// Estimates the reference tier's fees from the configured fee rate.
///
/// # Example
///
/// ```
/// use home_plan_engine::calculation::base_fee_estimate;
///
/// assert_eq!(base_fee_estimate(1500.0, 2500.0, 7.0), 280.0);
/// ```
pub fn base_fee_estimate(land: f64, reference_building: f64, fee_rate_percent: f64) -> f64 {
    (land + reference_building) * (fee_rate_percent / 100.0)
}

/// Shifts the base fee by the tier's building-price delta.
///
/// # Example
///
/// ```
/// use home_plan_engine::calculation::{adjust_fees, VARIABLE_FEE_RATE};
///
/// let adjustment = adjust_fees(280.0, 3000.0, 2500.0, VARIABLE_FEE_RATE);
/// assert_eq!(adjustment.delta, 500.0);
/// assert_eq!(adjustment.variable_fee, 15.0);
/// assert_eq!(adjustment.fees, 295.0);
/// ```
pub fn adjust_fees(
    base_fee: f64,
    building: f64,
    reference_building: f64,
    variable_fee_rate: f64,
) -> FeeAdjustment {
    let delta = building - reference_building;
    let variable_fee = delta * variable_fee_rate;
    FeeAdjustment {
        delta,
        variable_fee,
        fees: base_fee + variable_fee,
    }
}
