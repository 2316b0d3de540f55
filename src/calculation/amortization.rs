//! Fixed-rate loan amortization.
//!
//! This module computes the constant monthly payment of a fixed-rate,
//! fixed-term loan with the standard annuity formula:
//!
//! ```text
//! payment = principal * r / (1 - (1 + r)^(-n))
//! ```
//!
//! where `r` is the monthly rate and `n` the number of monthly payments.
//! A zero rate, or one too small for the formula to resolve, falls back to
//! straight-line repayment (`principal / n`).

use crate::error::{EngineError, EngineResult};
use crate::models::LOAN_TERM_RANGE;

/// Converts an annual percentage rate into a monthly fraction.
///
/// # Example
///
/// ```
/// use home_plan_engine::calculation::monthly_rate;
///
/// assert_eq!(monthly_rate(12.0), 0.01);
/// ```
pub fn monthly_rate(rate_percent: f64) -> f64 {
    (rate_percent / 100.0) / 12.0
}

/// Returns the number of monthly payments in a term.
pub fn payment_count(term_years: u32) -> u64 {
    u64::from(term_years) * 12
}

/// Computes the fixed monthly payment for a loan.
///
/// # Arguments
///
/// * `principal` - The amount borrowed
/// * `rate_percent` - Annual nominal rate in percent
/// * `term_years` - Repayment period in years
///
/// # Returns
///
/// The monthly payment in the principal's unit. A zero principal always
/// yields a zero payment. Errors when:
/// - `rate_percent` is negative or not finite (`InvalidRate`)
/// - `principal` is negative or not finite, or `term_years` is outside
///   1 to 50 years (`Validation`)
///
/// # Examples
///
/// ```
/// use home_plan_engine::calculation::monthly_payment;
///
/// let payment = monthly_payment(40_800_000.0, 1.5, 35).unwrap();
/// assert!((payment - 124_923.25).abs() < 0.01);
///
/// // Zero interest repays in equal instalments.
/// assert_eq!(monthly_payment(1_200.0, 0.0, 1).unwrap(), 100.0);
/// ```
pub fn monthly_payment(principal: f64, rate_percent: f64, term_years: u32) -> EngineResult<f64> {
    validate_rate(rate_percent)?;
    if !principal.is_finite() || principal < 0.0 {
        return Err(EngineError::validation(
            "loan_principal",
            format!("must be a non-negative number, got {}", principal),
        ));
    }
    validate_term(term_years)?;

    if principal == 0.0 {
        return Ok(0.0);
    }

    let r = monthly_rate(rate_percent);
    let n = payment_count(term_years) as f64;
    // 1 - (1 + r)^-n, accurate for tiny r
    let denominator = -(-n * r.ln_1p()).exp_m1();
    if r == 0.0 || !denominator.is_normal() || denominator <= 0.0 {
        return Ok(principal / n);
    }

    let payment = principal * r / denominator;
    if !payment.is_finite() {
        return Err(EngineError::InvalidRate {
            rate_percent,
            message: format!("annuity formula did not converge over {} payments", n),
        });
    }
    Ok(payment)
}

/// Rejects terms outside the accepted loan range.
pub(crate) fn validate_term(term_years: u32) -> EngineResult<()> {
    if !LOAN_TERM_RANGE.contains(&term_years) {
        return Err(EngineError::validation(
            "term_years",
            format!(
                "loan term must be between {} and {} years, got {}",
                LOAN_TERM_RANGE.start(),
                LOAN_TERM_RANGE.end(),
                term_years
            ),
        ));
    }
    Ok(())
}

/// Rejects rates the annuity formula cannot use.
pub(crate) fn validate_rate(rate_percent: f64) -> EngineResult<()> {
    if !rate_percent.is_finite() {
        return Err(EngineError::InvalidRate {
            rate_percent,
            message: "rate must be a finite number".to_string(),
        });
    }
    if rate_percent < 0.0 {
        return Err(EngineError::InvalidRate {
            rate_percent,
            message: "rate must not be negative".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() < tolerance,
            "Expected {} (±{}), got {}",
            expected,
            tolerance,
            actual
        );
    }

    #[test]
    fn test_monthly_rate_from_percent() {
        assert_close(monthly_rate(1.5), 0.00125, 1e-15);
    }

    #[test]
    fn test_payment_count_is_twelve_per_year() {
        assert_eq!(payment_count(35), 420);
    }

    #[test]
    fn test_standard_tier_payment() {
        let payment = monthly_payment(40_800_000.0, 1.5, 35).unwrap();
        assert_close(payment, 124_923.251_399, 0.001);
    }

    #[test]
    fn test_payment_scales_linearly_with_principal() {
        let single = monthly_payment(1_000_000.0, 2.0, 30).unwrap();
        let double = monthly_payment(2_000_000.0, 2.0, 30).unwrap();
        assert_close(double, single * 2.0, 1e-6);
    }

    #[test]
    fn test_zero_principal_pays_nothing() {
        assert_eq!(monthly_payment(0.0, 1.5, 35).unwrap(), 0.0);
    }

    #[test]
    fn test_zero_rate_uses_straight_line() {
        assert_close(monthly_payment(4_200_000.0, 0.0, 35).unwrap(), 10_000.0, 1e-9);
    }

    #[test]
    fn test_payments_cover_principal_and_interest() {
        let payment = monthly_payment(10_000_000.0, 1.5, 35).unwrap();
        assert!(payment * 420.0 > 10_000_000.0);
    }

    #[test]
    fn test_negative_rate_rejected() {
        match monthly_payment(1_000.0, -1.0, 10) {
            Err(EngineError::InvalidRate { rate_percent, .. }) => assert_eq!(rate_percent, -1.0),
            other => panic!("Expected InvalidRate, got {:?}", other),
        }
    }

    #[test]
    fn test_nan_rate_rejected() {
        assert!(matches!(
            monthly_payment(1_000.0, f64::NAN, 10),
            Err(EngineError::InvalidRate { .. })
        ));
    }

    #[test]
    fn test_zero_term_rejected() {
        match monthly_payment(1_000.0, 1.5, 0) {
            Err(EngineError::Validation { field, .. }) => assert_eq!(field, "term_years"),
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_term_beyond_range_rejected() {
        for term in [51, 400_000_000, u32::MAX] {
            match monthly_payment(1_000.0, 1.5, term) {
                Err(EngineError::Validation { field, .. }) => assert_eq!(field, "term_years"),
                other => panic!("Expected Validation error for {term}, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_payment_count_does_not_overflow() {
        assert_eq!(payment_count(u32::MAX), u64::from(u32::MAX) * 12);
    }

    #[test]
    fn test_longest_term_payment_is_positive() {
        let payment = monthly_payment(40_800_000.0, 1.5, 50).unwrap();
        assert!(payment > 40_800_000.0 / 600.0);
        assert!(payment < monthly_payment(40_800_000.0, 1.5, 49).unwrap());
    }

    #[test]
    fn test_near_zero_rate_approaches_straight_line() {
        assert_close(monthly_payment(1_200.0, 1e-15, 1).unwrap(), 100.0, 1e-9);
        assert_close(monthly_payment(1_200.0, 1e-300, 1).unwrap(), 100.0, 1e-9);
        assert_close(monthly_payment(4_200_000.0, 1e-9, 35).unwrap(), 10_000.0, 1e-3);
    }

    #[test]
    fn test_negative_principal_rejected() {
        assert!(matches!(
            monthly_payment(-1.0, 1.5, 35),
            Err(EngineError::Validation { .. })
        ));
    }
}
