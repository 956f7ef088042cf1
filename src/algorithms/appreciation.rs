//! Appreciation-rate estimation: a weighted composite of neighborhood
//! grade, CPI trend, and walkability (§4.10).

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::Rate;

const FLOOR: Decimal = dec!(0.005);
const CEILING: Decimal = dec!(0.060);
const CPI_FALLBACK: Decimal = dec!(0.030);

fn grade_premium(grade: Option<&str>) -> Decimal {
    match grade {
        Some("A") => dec!(0.045),
        Some("B") => dec!(0.035),
        Some("C") => dec!(0.025),
        Some("D") => dec!(0.015),
        Some("F") => dec!(0.005),
        _ => dec!(0.025),
    }
}

fn walkability_premium(walk_score: Option<Decimal>) -> Decimal {
    match walk_score {
        Some(score) if score >= dec!(80) => dec!(0.005),
        _ => dec!(0),
    }
}

/// `0.5 * grade_premium + 0.3 * cpi_5yr_cagr + 0.2 * walkability_premium`,
/// clamped to `[0.005, 0.060]`. `cpi_5yr_cagr` falls back to 3.0% when
/// unavailable.
pub fn estimate_appreciation(
    neighborhood_grade: Option<&str>,
    cpi_5yr_cagr: Option<Decimal>,
    walk_score: Option<Decimal>,
) -> Rate {
    let cpi = cpi_5yr_cagr.unwrap_or(CPI_FALLBACK);
    let composite = dec!(0.5) * grade_premium(neighborhood_grade)
        + dec!(0.3) * cpi
        + dec!(0.2) * walkability_premium(walk_score);

    Rate::from_decimal(composite).clamp(Rate::from_decimal(FLOOR), Rate::from_decimal(CEILING))
}
