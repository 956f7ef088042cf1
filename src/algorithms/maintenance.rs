//! Maintenance percentage estimation from building age, condition,
//! climate, and renter density (§4.9).

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::external::ClimateZone;
use crate::types::rehab::ConditionGrade;
use crate::types::Rate;

const FLOOR: Decimal = dec!(0.03);
const CEILING: Decimal = dec!(0.15);

fn age_base_pct(age_years: u32) -> Decimal {
    if age_years <= 5 {
        dec!(0.03)
    } else if age_years <= 15 {
        dec!(0.04)
    } else if age_years <= 30 {
        dec!(0.05)
    } else if age_years <= 50 {
        dec!(0.07)
    } else if age_years <= 75 {
        dec!(0.08)
    } else {
        dec!(0.10)
    }
}

fn condition_multiplier(grade: ConditionGrade) -> Decimal {
    match grade {
        ConditionGrade::Turnkey => dec!(0.85),
        ConditionGrade::Light => dec!(0.95),
        ConditionGrade::Medium => dec!(1.00),
        ConditionGrade::Heavy => dec!(1.10),
        ConditionGrade::FullGut => dec!(1.20),
    }
}

fn climate_multiplier(climate: Option<ClimateZone>) -> Decimal {
    match climate {
        Some(ClimateZone::HotHumid) => dec!(1.10),
        Some(ClimateZone::Cold) => dec!(1.10),
        Some(ClimateZone::VeryCold) => dec!(1.15),
        Some(ClimateZone::MixedHumid) => dec!(1.00),
        Some(ClimateZone::Marine) => dec!(1.00),
        Some(ClimateZone::MixedDry) => dec!(0.95),
        Some(ClimateZone::HotDry) => dec!(1.05),
        None => dec!(1.00),
    }
}

fn renter_density_multiplier(renter_pct: Option<Decimal>) -> Decimal {
    match renter_pct {
        Some(p) if p > dec!(0.70) => dec!(1.10),
        Some(p) if p > dec!(0.50) => dec!(1.05),
        _ => dec!(1.00),
    }
}

/// `base_age_pct(age) * condition_mult * climate_mult * renter_mult`,
/// clamped to `[0.03, 0.15]`.
pub fn estimate_maintenance_pct(
    property_age_years: u32,
    condition_grade: ConditionGrade,
    climate_zone: Option<ClimateZone>,
    renter_pct: Option<Decimal>,
) -> Rate {
    let pct = age_base_pct(property_age_years)
        * condition_multiplier(condition_grade)
        * climate_multiplier(climate_zone)
        * renter_density_multiplier(renter_pct);

    Rate::from_decimal(pct).clamp(Rate::from_decimal(FLOOR), Rate::from_decimal(CEILING))
}
