//! Physical property detail and comparable sales/rentals.

use super::money::Money;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Property structural type. Drives management-fee tier, HOA default,
/// and the insurance type multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PropertyType {
    #[strum(serialize = "sfr")]
    #[serde(rename = "sfr")]
    Sfr,
    Condo,
    Townhouse,
    MultiFamily,
}

/// A comparable rental listing used to corroborate `estimated_rent`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentalComp {
    pub address: String,
    pub monthly_rent: Money,
    pub beds: u8,
    pub baths: Decimal,
    pub sqft: u32,
    pub distance_miles: Decimal,
}

/// A comparable sale used to corroborate `estimated_value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleComp {
    pub address: String,
    pub sale_price: Money,
    pub sale_date: Option<NaiveDate>,
    pub beds: u8,
    pub baths: Decimal,
    pub sqft: u32,
    pub distance_miles: Decimal,
}

/// Immutable physical/financial detail about the subject property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDetail {
    pub beds: u8,
    /// Fractional quarters, e.g. 2.25 for two and a quarter baths.
    pub baths: Decimal,
    pub sqft: u32,
    pub year_built: u16,
    pub lot_sqft: Option<u32>,
    pub property_type: PropertyType,
    pub estimated_value: Option<Money>,
    pub last_sale_price: Option<Money>,
    pub assessed_value: Option<Money>,
    pub annual_tax: Option<Money>,
    pub estimated_rent: Option<Money>,
    pub rental_comps: Vec<RentalComp>,
    pub sale_comps: Vec<SaleComp>,
}
