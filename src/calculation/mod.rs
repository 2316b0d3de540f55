//! Calculation logic for the Home Plan Engine.
//!
//! This module contains the financial calculation engine: transaction-fee
//! estimation and tier adjustment, fixed-rate loan amortization, per-tier
//! budget composition, the mortgage tax-deduction projection, and the
//! composition of all of these into a single proposal.

mod amortization;
mod budget;
mod fee_adjustment;
mod proposal;
mod tax_deduction;

pub use amortization::{monthly_payment, monthly_rate, payment_count};
pub use budget::{PlanCalculation, calculate_plan, compute_plan};
pub use fee_adjustment::{FeeAdjustment, VARIABLE_FEE_RATE, adjust_fees, base_fee_estimate};
pub use proposal::{YEN_PER_MAN, build_proposal, man_to_yen};
pub use tax_deduction::compute_deduction;
