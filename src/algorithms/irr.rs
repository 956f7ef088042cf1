//! Internal rate of return via bisection over a bracketed root, and the
//! equity-multiple ratio (§4.6).

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const LOWER_BOUND: Decimal = dec!(-0.5);
const UPPER_BOUND: Decimal = dec!(10.0);
const TOLERANCE: Decimal = dec!(0.00000001);
const MAX_ITERATIONS: u32 = 1000;

/// `NPV(r) = sum(cf_t / (1+r)^t)` for `t` in `0..cash_flows.len()`.
fn npv(cash_flows: &[Decimal], rate: Decimal) -> Decimal {
    let mut total = dec!(0);
    let mut discount = dec!(1);
    let one_plus_r = dec!(1) + rate;
    for cf in cash_flows {
        total += cf / discount;
        discount *= one_plus_r;
    }
    total
}

/// `compute_irr(cash_flows)`. `cash_flows[0]` is expected to be the
/// (negative) initial equity and the last entry includes disposition
/// proceeds. Solves `NPV(r) = 0` for `r` in `[-0.5, 10.0]` by bisection
/// after bracketing a sign change; returns 0 if no bracket or root is
/// found, or if the input is too short to have a root.
pub fn compute_irr(cash_flows: &[Decimal]) -> Decimal {
    if cash_flows.len() < 2 {
        return dec!(0);
    }

    let f_lower = npv(cash_flows, LOWER_BOUND);
    let f_upper = npv(cash_flows, UPPER_BOUND);

    if f_lower == dec!(0) {
        return LOWER_BOUND;
    }
    if f_upper == dec!(0) {
        return UPPER_BOUND;
    }
    if f_lower.signum() == f_upper.signum() {
        return dec!(0);
    }

    let mut low = LOWER_BOUND;
    let mut high = UPPER_BOUND;
    let mut f_low = f_lower;

    for _ in 0..MAX_ITERATIONS {
        let mid = (low + high) / dec!(2);
        let f_mid = npv(cash_flows, mid);

        if f_mid.abs() < TOLERANCE || (high - low).abs() < TOLERANCE {
            return mid;
        }

        if f_mid.signum() == f_low.signum() {
            low = mid;
            f_low = f_mid;
        } else {
            high = mid;
        }
    }

    (low + high) / dec!(2)
}

/// `total_cash_returned / total_cash_invested`, zero if the denominator is
/// zero.
pub fn compute_equity_multiple(total_cash_returned: Decimal, total_cash_invested: Decimal) -> Decimal {
    if total_cash_invested == dec!(0) {
        return dec!(0);
    }
    total_cash_returned / total_cash_invested
}
