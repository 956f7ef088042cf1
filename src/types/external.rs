//! Data contracts supplied by external collaborators (§6). The core only
//! consumes these; resolving them (geocoding, AVM, ACS, FRED, HUD FMR,
//! hazard lookups, LLM narrative) is explicitly out of scope.

use super::money::Money;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Macro-economic snapshot. Any field may be absent; estimators fall back
/// to documented defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroContext {
    pub mortgage_rate_30y: Option<Decimal>,
    pub treasury_10y: Option<Decimal>,
    pub cpi_current: Option<Decimal>,
    pub cpi_5yr_cagr: Option<Decimal>,
    pub unemployment_rate: Option<Decimal>,
    pub median_home_price_national: Option<Money>,
}

/// Hail-frequency tier, one of the hazard fields on `NeighborhoodReport`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum HailFrequency {
    Low,
    Moderate,
    High,
}

/// Climate zone, used by the maintenance estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ClimateZone {
    HotHumid,
    HotDry,
    MixedHumid,
    MixedDry,
    Marine,
    Cold,
    VeryCold,
}

/// A single nearby school rating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchoolInfo {
    pub name: String,
    pub rating: Decimal,
    pub distance_miles: Decimal,
}

/// Demographic figures for the property's neighborhood.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NeighborhoodDemographics {
    pub median_income: Option<i64>,
    pub poverty_rate: Option<Decimal>,
    pub renter_pct: Option<Decimal>,
}

/// Resolved neighborhood quality and hazard data. Any field may be absent;
/// the neighborhood grader and insurance composite model degrade
/// gracefully per their documented missing-data defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NeighborhoodReport {
    pub grade: Option<String>,
    pub grade_score: Option<Decimal>,
    pub demographics: NeighborhoodDemographics,
    pub walk_score: Option<Decimal>,
    pub schools: Vec<SchoolInfo>,
    pub flood_zone: Option<String>,
    pub seismic_pga: Option<Decimal>,
    pub wildfire_risk: Option<u8>,
    pub hurricane_zone: Option<u8>,
    pub hail_frequency: Option<HailFrequency>,
    pub crime_rate: Option<Decimal>,
    pub climate_zone: Option<ClimateZone>,
}

/// Identifies which tier of the rent service produced a `TierResult`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TierName {
    Llm,
    Hud,
    RentCast,
}

/// Per-tier confidence, distinct from the blended `Confidence` on the
/// manifest — this one only ever has three levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TierConfidence {
    Low,
    Med,
    High,
}

/// One tier's independent rent estimate (or lack thereof).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierResult {
    pub tier: TierName,
    pub estimate: Option<Money>,
    pub confidence: TierConfidence,
    pub reasoning: String,
}

/// The blended output of the tiered rent estimator; the only part of that
/// service the core consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentEstimate {
    pub address: String,
    pub estimated_rent: Money,
    pub confidence: TierConfidence,
    pub confidence_score: Decimal,
    pub needs_review: bool,
    pub tier_results: Vec<TierResult>,
    pub recommended_range: (Money, Money),
}
