//! Mortgage tax-deduction models.

use serde::{Deserialize, Serialize};

/// Inputs to the tax deduction projection.
///
/// `term_years` is the original loan term: the projection rebuilds the fixed
/// monthly payment from it even when `deduction_years` is shorter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeductionInput {
    /// The loan principal at the start of the projection.
    pub loan_principal: f64,
    /// Annual interest rate in percent.
    pub rate_percent: f64,
    /// Number of years the deduction is granted.
    pub deduction_years: u32,
    /// Maximum balance eligible for the deduction rate, same unit as the loan.
    pub cap: f64,
    /// Deduction rate in percent (0.7 means 0.7%).
    pub deduction_rate_percent: f64,
    /// Loan term in years.
    pub term_years: u32,
}

/// A year-by-year refund projection and its cumulative total.
///
/// # Example
///
/// ```
/// use home_plan_engine::models::DeductionSchedule;
///
/// let schedule = DeductionSchedule {
///     total_return: 30.0,
///     yearly_deductions: vec![20.0, 10.0],
/// };
/// assert_eq!(schedule.years(), 2);
/// assert_eq!(schedule.monthly_equivalent(), 1.25);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeductionSchedule {
    /// The sum of every yearly refund.
    pub total_return: f64,
    /// Refund amounts ordered from year 1.
    pub yearly_deductions: Vec<f64>,
}

impl DeductionSchedule {
    /// Returns the number of projected years.
    pub fn years(&self) -> usize {
        self.yearly_deductions.len()
    }

    /// Spreads the total refund evenly over every month of the deduction period.
    ///
    /// Returns zero for an empty schedule.
    pub fn monthly_equivalent(&self) -> f64 {
        if self.yearly_deductions.is_empty() {
            return 0.0;
        }
        self.total_return / (self.years() as f64 * 12.0)
    }

    /// Iterates `(year, refund)` pairs with years numbered from 1.
    pub fn iter_years(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.yearly_deductions
            .iter()
            .enumerate()
            .map(|(i, amount)| (i as u32 + 1, *amount))
    }
}
