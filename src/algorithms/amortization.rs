//! Fixed-rate mortgage amortization (§4.1).
//!
//! Implements the standard actuarial method: `M = P*r(1+r)^n / ((1+r)^n - 1)`
//! with `r` the monthly rate and `n` the number of monthly payments. The
//! final payment is clamped to the remaining balance so the schedule always
//! ends at (or within a cent of) zero.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::DecimalExt;

/// One monthly payment in the schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmortizationEntry {
    pub payment_number: u32,
    pub payment_amount: Decimal,
    pub principal: Decimal,
    pub interest: Decimal,
    pub remaining_balance: Decimal,
}

/// A full amortization schedule plus its rolled-up totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmortizationSchedule {
    pub payments: Vec<AmortizationEntry>,
    pub monthly_payment: Decimal,
    pub total_principal: Decimal,
    pub total_interest: Decimal,
}

/// One year's worth of debt service, aggregated from 12 (or fewer, for a
/// trailing partial window) consecutive payments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearlyDebt {
    pub year: u32,
    pub principal: Decimal,
    pub interest: Decimal,
    pub debt_service: Decimal,
    pub ending_balance: Decimal,
}

/// `M = P*r(1+r)^n / ((1+r)^n - 1)`. `principal <= 0` returns 0;
/// `annual_rate <= 0` falls back to straight-line division `P/n`.
pub fn calculate_payment(principal: Decimal, annual_rate: Decimal, term_years: u32) -> Decimal {
    let n = term_years * 12;
    if principal <= dec!(0) || n == 0 {
        return dec!(0);
    }
    let n_dec = Decimal::from(n);

    if annual_rate <= dec!(0) {
        return (principal / n_dec).round_money();
    }

    let monthly_rate = annual_rate / dec!(12);
    let one_plus_r_n = power_decimal(dec!(1) + monthly_rate, n);
    let denominator = one_plus_r_n - dec!(1);
    if denominator == dec!(0) {
        return (principal / n_dec).round_money();
    }

    let payment = principal * monthly_rate * one_plus_r_n / denominator;
    payment.round_money()
}

/// Generate the payment-by-payment schedule. Produces exactly
/// `min(hold_years, term_years) * 12` payments (the full term if
/// `hold_years` is `None`). Interest each period is `balance * monthly_rate`
/// rounded half-up to cents; principal is `payment - interest`. The final
/// generated payment is clamped so it exactly retires the remaining
/// balance.
pub fn generate_amortization_schedule(
    principal: Decimal,
    annual_rate: Decimal,
    term_years: u32,
    hold_years: Option<u32>,
) -> AmortizationSchedule {
    let term_months = term_years * 12;
    let horizon_months = match hold_years {
        Some(h) => (h * 12).min(term_months),
        None => term_months,
    };

    let payment = calculate_payment(principal, annual_rate, term_years);
    let monthly_rate = annual_rate / dec!(12);

    let mut payments = Vec::with_capacity(horizon_months as usize);
    let mut balance = principal;
    let mut total_principal = dec!(0);
    let mut total_interest = dec!(0);

    for i in 1..=horizon_months {
        let interest = (balance * monthly_rate).round_money();
        let is_last = i == term_months || balance <= payment - interest;

        let principal_portion = if is_last {
            balance
        } else {
            (payment - interest).max(dec!(0))
        };
        let actual_payment = principal_portion + interest;

        balance = (balance - principal_portion).max(dec!(0));
        total_principal += principal_portion;
        total_interest += interest;

        payments.push(AmortizationEntry {
            payment_number: i,
            payment_amount: actual_payment.round_money(),
            principal: principal_portion.round_money(),
            interest: interest.round_money(),
            remaining_balance: balance.round_money(),
        });

        if balance.is_zero() {
            break;
        }
    }

    AmortizationSchedule {
        payments,
        monthly_payment: payment,
        total_principal,
        total_interest,
    }
}

/// Groups payments into contiguous 12-payment windows (the last window may
/// be partial). One `YearlyDebt` entry per window.
pub fn yearly_debt_summary(schedule: &AmortizationSchedule) -> Vec<YearlyDebt> {
    schedule
        .payments
        .chunks(12)
        .enumerate()
        .map(|(idx, chunk)| {
            let principal: Decimal = chunk.iter().map(|p| p.principal).sum();
            let interest: Decimal = chunk.iter().map(|p| p.interest).sum();
            let debt_service: Decimal = chunk.iter().map(|p| p.payment_amount).sum();
            let ending_balance = chunk.last().map(|p| p.remaining_balance).unwrap_or(dec!(0));
            YearlyDebt {
                year: idx as u32 + 1,
                principal,
                interest,
                debt_service,
                ending_balance,
            }
        })
        .collect()
}

/// `(1 + r)^n` via binary exponentiation.
fn power_decimal(base: Decimal, exp: u32) -> Decimal {
    if exp == 0 {
        return dec!(1);
    }
    let mut result = dec!(1);
    let mut current_base = base;
    let mut remaining_exp = exp;
    while remaining_exp > 0 {
        if remaining_exp % 2 == 1 {
            result *= current_base;
        }
        current_base *= current_base;
        remaining_exp /= 2;
    }
    result
}
