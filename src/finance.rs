//! Annuity math for a fixed-rate repayment mortgage.
//!
//! Everything here is pure: no I/O, no rounding. Display rounding is the
//! UI's job.

use thiserror::Error;

/// Why a calculation refused its inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FinanceError {
    #[error("Principal must be a positive number.")]
    InvalidPrincipal,
    #[error("Annual interest rate cannot be negative.")]
    InvalidRate,
    #[error("Loan term in years must be a positive integer.")]
    InvalidTerm,
    #[error("Monthly payment must be a positive number.")]
    InvalidPayment,
}

/// Monthly payment for an amortizing loan.
///
/// `annual_rate` is fractional (0.045 for 4.5%). A zero rate degenerates to
/// straight-line repayment, `principal / (term_years * 12)`.
pub fn monthly_payment(
    principal: f64,
    annual_rate: f64,
    term_years: u32,
) -> Result<f64, FinanceError> {
    if principal <= 0.0 {
        return Err(FinanceError::InvalidPrincipal);
    }
    if annual_rate < 0.0 {
        return Err(FinanceError::InvalidRate);
    }
    if term_years == 0 {
        return Err(FinanceError::InvalidTerm);
    }

    let monthly_rate = annual_rate / 12.0;
    let total_payments = f64::from(term_years) * 12.0;

    if monthly_rate == 0.0 {
        return Ok(principal / total_payments);
    }

    // M = P * [ i(1 + i)^n ] / [ (1 + i)^n - 1 ]
    let growth = (1.0 + monthly_rate).powf(total_payments);
    Ok(principal * (monthly_rate * growth) / (growth - 1.0))
}

/// Largest principal whose monthly payment equals `monthly_payment`.
/// Algebraic inverse of [`monthly_payment`].
pub fn max_loan_amount(
    monthly_payment: f64,
    annual_rate: f64,
    term_years: u32,
) -> Result<f64, FinanceError> {
    if monthly_payment <= 0.0 {
        return Err(FinanceError::InvalidPayment);
    }
    if annual_rate < 0.0 {
        return Err(FinanceError::InvalidRate);
    }
    if term_years == 0 {
        return Err(FinanceError::InvalidTerm);
    }

    let monthly_rate = annual_rate / 12.0;
    let total_payments = f64::from(term_years) * 12.0;

    if monthly_rate == 0.0 {
        return Ok(monthly_payment * total_payments);
    }

    // P = M * [ (1 + i)^n - 1 ] / [ i(1 + i)^n ]
    let growth = (1.0 + monthly_rate).powf(total_payments);
    Ok(monthly_payment * (growth - 1.0) / (monthly_rate * growth))
}

/// Deposit as a percentage of the total house price (loan + deposit).
///
/// A non-positive total has no meaningful ratio; report 0% rather than NaN.
pub fn deposit_percentage(principal: f64, deposit: f64) -> f64 {
    let total = principal + deposit;
    if total <= 0.0 {
        return 0.0;
    }
    deposit / total * 100.0
}
