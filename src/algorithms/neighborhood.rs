//! Neighborhood grading: a six-dimension, 100-point composite (§4.12).

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::external::NeighborhoodReport;

/// The letter grade derived from `NeighborhoodGrade::score`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NeighborhoodLetter {
    A,
    B,
    C,
    D,
    F,
}

impl NeighborhoodLetter {
    fn from_score(score: Decimal) -> Self {
        if score >= dec!(80) {
            NeighborhoodLetter::A
        } else if score >= dec!(65) {
            NeighborhoodLetter::B
        } else if score >= dec!(45) {
            NeighborhoodLetter::C
        } else if score >= dec!(30) {
            NeighborhoodLetter::D
        } else {
            NeighborhoodLetter::F
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NeighborhoodLetter::A => "A",
            NeighborhoodLetter::B => "B",
            NeighborhoodLetter::C => "C",
            NeighborhoodLetter::D => "D",
            NeighborhoodLetter::F => "F",
        }
    }
}

/// The graded composite score plus its letter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeighborhoodGrade {
    pub score: Decimal,
    pub letter: NeighborhoodLetter,
}

fn income_score(median_income: Option<i64>) -> Decimal {
    match median_income {
        None => dec!(10),
        Some(i) if i < 35_000 => dec!(4),
        Some(i) if i < 50_000 => dec!(8),
        Some(i) if i < 75_000 => dec!(12),
        Some(i) if i < 100_000 => dec!(16),
        Some(_) => dec!(20),
    }
}

fn schools_score(report: &NeighborhoodReport) -> Decimal {
    if report.schools.is_empty() {
        return dec!(10);
    }
    let sum: Decimal = report.schools.iter().map(|s| s.rating).sum();
    let avg = sum / Decimal::from(report.schools.len() as u32);
    avg / dec!(10) * dec!(20)
}

fn walkability_score(walk_score: Option<Decimal>) -> Decimal {
    match walk_score {
        Some(score) => score / dec!(100) * dec!(15),
        None => dec!(7),
    }
}

fn poverty_component(poverty_rate: Option<Decimal>) -> Decimal {
    match poverty_rate {
        None => dec!(4),
        Some(p) if p < dec!(0.10) => dec!(8),
        Some(p) if p < dec!(0.20) => dec!(5),
        Some(p) if p < dec!(0.30) => dec!(2),
        Some(_) => dec!(0),
    }
}

fn renter_component(renter_pct: Option<Decimal>) -> Decimal {
    match renter_pct {
        None => dec!(3),
        Some(p) if (dec!(0.30)..=dec!(0.60)).contains(&p) => dec!(7),
        Some(p) if p < dec!(0.30) => dec!(4),
        Some(_) => dec!(3),
    }
}

fn housing_stability_score(report: &NeighborhoodReport) -> Decimal {
    if report.demographics.poverty_rate.is_none() && report.demographics.renter_pct.is_none() {
        return dec!(7);
    }
    poverty_component(report.demographics.poverty_rate) + renter_component(report.demographics.renter_pct)
}

fn safety_score(crime_rate: Option<Decimal>) -> Decimal {
    match crime_rate {
        None => dec!(10),
        Some(c) if c < dec!(1000) => dec!(20),
        Some(c) if c < dec!(1500) => dec!(17),
        Some(c) if c < dec!(2000) => dec!(14),
        Some(c) if c < dec!(2500) => dec!(11),
        Some(c) if c < dec!(3000) => dec!(8),
        Some(c) if c < dec!(3500) => dec!(5),
        Some(_) => dec!(2),
    }
}

fn hazards_score(report: &NeighborhoodReport) -> Decimal {
    let mut score = dec!(10);

    if let Some(zone) = &report.flood_zone {
        if zone.starts_with('V') {
            score -= dec!(3);
        } else if zone.starts_with('A') {
            score -= dec!(2);
        } else if zone == "X500" {
            score -= dec!(1);
        }
    }

    if let Some(pga) = report.seismic_pga {
        if pga >= dec!(0.4) {
            score -= dec!(2);
        } else if pga >= dec!(0.2) {
            score -= dec!(1);
        }
    }

    if let Some(wildfire) = report.wildfire_risk {
        if wildfire >= 4 {
            score -= dec!(2);
        } else if wildfire >= 3 {
            score -= dec!(1);
        }
    }

    if let Some(hurricane) = report.hurricane_zone {
        if hurricane >= 3 {
            score -= dec!(2);
        } else if hurricane >= 1 {
            score -= dec!(1);
        }
    }

    if let Some(crate::types::external::HailFrequency::High) = report.hail_frequency {
        score -= dec!(1);
    }

    score.max(dec!(0))
}

/// Sums the six dimensions (income, schools, walkability, housing
/// stability, safety, hazards), each documented on `NeighborhoodReport`'s
/// fields, into a score capped by construction at 100, and derives the
/// letter grade.
pub fn compute_neighborhood_grade(report: &NeighborhoodReport) -> NeighborhoodGrade {
    let score = income_score(report.demographics.median_income)
        + schools_score(report)
        + walkability_score(report.walk_score)
        + housing_stability_score(report)
        + safety_score(report.crime_rate)
        + hazards_score(report);

    NeighborhoodGrade {
        score,
        letter: NeighborhoodLetter::from_score(score),
    }
}
