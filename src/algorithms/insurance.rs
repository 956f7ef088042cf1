//! Insurance cost estimation: an 8-layer hazard-surcharge composite when
//! hazard data exists, degrading to whatever layers are actually available
//! (§4.8, §4.14).

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::external::{HailFrequency, NeighborhoodReport};
use crate::types::{Money, PropertyType};

const FLOOR: Decimal = dec!(400);

/// One hazard layer's multiplier and a human-readable note for the
/// justification trail.
struct Surcharge {
    label: &'static str,
    multiplier: Decimal,
}

fn flood_surcharge(zone: Option<&str>) -> Surcharge {
    let multiplier = match zone {
        Some(z) if z.starts_with('V') => dec!(2.00),
        Some(z) if z == "A99" => dec!(1.30),
        Some(z) if z.starts_with('A') => dec!(1.50),
        Some(z) if z == "X500" || z == "B" => dec!(1.15),
        _ => dec!(1.00),
    };
    Surcharge {
        label: "flood",
        multiplier,
    }
}

fn earthquake_surcharge(pga: Option<Decimal>) -> Surcharge {
    let multiplier = match pga {
        Some(p) if p >= dec!(0.4) => dec!(1.40),
        Some(p) if p >= dec!(0.2) => dec!(1.20),
        _ => dec!(1.00),
    };
    Surcharge {
        label: "earthquake",
        multiplier,
    }
}

fn wildfire_surcharge(risk_class: Option<u8>) -> Surcharge {
    let multiplier = match risk_class {
        Some(5) => dec!(1.35),
        Some(4) => dec!(1.20),
        Some(3) => dec!(1.10),
        _ => dec!(1.00),
    };
    Surcharge {
        label: "wildfire",
        multiplier,
    }
}

fn hurricane_surcharge(zone: Option<u8>) -> Surcharge {
    let multiplier = match zone {
        Some(z) if z >= 3 => dec!(1.30),
        Some(z) if z >= 1 => dec!(1.15),
        _ => dec!(1.00),
    };
    Surcharge {
        label: "hurricane",
        multiplier,
    }
}

fn hail_surcharge(frequency: Option<HailFrequency>) -> Surcharge {
    let multiplier = match frequency {
        Some(HailFrequency::High) => dec!(1.15),
        Some(HailFrequency::Moderate) => dec!(1.08),
        _ => dec!(1.00),
    };
    Surcharge {
        label: "hail",
        multiplier,
    }
}

fn crime_surcharge(crime_rate_per_100k: Option<Decimal>) -> Surcharge {
    let multiplier = match crime_rate_per_100k {
        Some(c) if c > dec!(3500) => dec!(1.15),
        Some(c) if c > dec!(2000) => dec!(1.05),
        _ => dec!(1.00),
    };
    Surcharge {
        label: "crime",
        multiplier,
    }
}

fn age_surcharge(year_built: u32) -> Surcharge {
    let multiplier = if year_built < 1950 {
        dec!(1.20)
    } else if year_built < 1970 {
        dec!(1.10)
    } else {
        dec!(1.00)
    };
    Surcharge {
        label: "age",
        multiplier,
    }
}

fn type_surcharge(property_type: PropertyType) -> Surcharge {
    let multiplier = match property_type {
        PropertyType::MultiFamily => dec!(1.15),
        PropertyType::Condo => dec!(0.80),
        _ => dec!(1.00),
    };
    Surcharge {
        label: "property_type",
        multiplier,
    }
}

/// The result of `estimate_insurance`: the premium and a human-readable
/// trail of every surcharge that moved it off the base rate.
#[derive(Debug, Clone, PartialEq)]
pub struct InsuranceEstimate {
    pub annual_premium: Money,
    pub low_confidence: bool,
    pub justification: Vec<String>,
}

/// Composite hazard model. `base = property_value * 0.80 * 0.0035`,
/// multiplied by each active surcharge layer, rounded to the nearest
/// dollar, floored at $400 (below which confidence is flagged low).
pub fn estimate_insurance(
    property_value: Money,
    property_type: PropertyType,
    year_built: u32,
    neighborhood: &NeighborhoodReport,
) -> InsuranceEstimate {
    let base = property_value.as_decimal() * dec!(0.80) * dec!(0.0035);

    let surcharges = [
        flood_surcharge(neighborhood.flood_zone.as_deref()),
        earthquake_surcharge(neighborhood.seismic_pga),
        wildfire_surcharge(neighborhood.wildfire_risk),
        hurricane_surcharge(neighborhood.hurricane_zone),
        hail_surcharge(neighborhood.hail_frequency),
        crime_surcharge(neighborhood.crime_rate),
        age_surcharge(year_built),
        type_surcharge(property_type),
    ];

    let mut premium = base;
    let mut justification = Vec::new();
    for s in &surcharges {
        premium *= s.multiplier;
        if s.multiplier != dec!(1.00) {
            let pct_impact = (s.multiplier - dec!(1.00)) * dec!(100);
            justification.push(format!("{}: {:+.0}%", s.label, pct_impact));
        }
    }

    let rounded = premium.round_dp(0);
    let floored = rounded.max(FLOOR);
    let low_confidence = rounded < FLOOR;

    InsuranceEstimate {
        annual_premium: Money::from_dollars(floored),
        low_confidence,
        justification,
    }
}
