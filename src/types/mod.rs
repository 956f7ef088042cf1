//! Type definitions for the pro-forma engine.
//!
//! # Module Organization
//!
//! - `money` — exact decimal primitives (Money, Rate)
//! - `address` — street address / location key
//! - `property` — physical property detail and comps
//! - `investor` — investor tax profile and derived §469/NIIT properties
//! - `rehab` — rehab budget inputs
//! - `assumptions` — the full pro-forma input (`DealAssumptions`)
//! - `manifest` — the assumption builder's auditable output
//! - `external` — collaborator-supplied data contracts (§6)
//! - `output` — pro-forma results (`YearlyProjection`, `DispositionResult`, `AnalysisResult`)

pub mod address;
pub mod assumptions;
pub mod external;
pub mod investor;
pub mod manifest;
pub mod money;
pub mod output;
pub mod property;
pub mod rehab;

pub use address::Address;
pub use assumptions::{CostSegAllocation, DealAssumptions, LoanType};
pub use external::{
    ClimateZone, HailFrequency, MacroContext, NeighborhoodReport, RentEstimate, SchoolInfo,
    TierConfidence, TierName, TierResult,
};
pub use investor::{FilingStatus, InvestorTaxProfile};
pub use manifest::{AssumptionDetail, AssumptionManifest, AssumptionSource, Confidence, FieldName};
pub use money::{Money, Rate};
pub use output::{AnalysisResult, DispositionResult, YearlyProjection};
pub use property::{PropertyDetail, PropertyType, RentalComp, SaleComp};
pub use rehab::{ConditionGrade, RehabBudget, RehabCategory, RehabLineItem};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use thiserror::Error;

/// US state codes (50 states + DC + territories). Used to key state-level
/// tables (closing-cost percentages, insurance-fallback multipliers).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display,
)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum StateCode {
    AL, AK, AZ, AR, CA, CO, CT, DE, DC, FL,
    GA, HI, ID, IL, IN, IA, KS, KY, LA, ME,
    MD, MA, MI, MN, MS, MO, MT, NE, NV, NH,
    NJ, NM, NY, NC, ND, OH, OK, OR, PA, RI,
    SC, SD, TN, TX, UT, VT, VA, WA, WV, WI,
    WY, PR, VI, GU, AS, MP,
}

impl StateCode {
    /// Parse from a 2-letter string, case-insensitive.
    pub fn from_str_opt(s: &str) -> Option<Self> {
        s.to_uppercase().parse().ok()
    }
}

/// Failure kinds raised by the assumption builder and by `DealAssumptions`
/// construction. The pro-forma runner never raises for a valid
/// `DealAssumptions` (see crate docs, §7).
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
pub enum AnalysisError {
    /// The builder could not determine a required field and no override
    /// was supplied (currently only `purchase_price`).
    #[error("missing required input: {field} ({reason})")]
    MissingInputs { field: String, reason: String },

    /// A structural constraint on `DealAssumptions` was violated.
    #[error("invalid configuration: {field} must satisfy {constraint}, got {value}")]
    InvalidConfiguration {
        field: String,
        constraint: String,
        value: String,
    },

    /// A decimal operation exceeded representable precision. Should never
    /// occur with documented input bounds; kept distinct from the other
    /// variants per the crate's error design.
    #[error("numeric overflow during {operation}")]
    NumericOverflow { operation: String },
}

impl AnalysisError {
    pub fn missing_inputs(field: impl Into<String>, reason: impl Into<String>) -> Self {
        AnalysisError::MissingInputs {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_configuration(
        field: impl Into<String>,
        constraint: impl Into<String>,
        value: impl std::fmt::Display,
    ) -> Self {
        AnalysisError::InvalidConfiguration {
            field: field.into(),
            constraint: constraint.into(),
            value: value.to_string(),
        }
    }

    pub fn numeric_overflow(operation: impl Into<String>) -> Self {
        AnalysisError::NumericOverflow {
            operation: operation.into(),
        }
    }
}

/// Result type alias for fallible engine operations.
pub type AnalysisOutcome<T> = Result<T, AnalysisError>;

/// Decimal extension trait used throughout the crate's line-item rounding.
/// The crate-wide policy is half-up (round half away from zero), not
/// banker's rounding, per the money-handling rule in the crate docs.
pub trait DecimalExt {
    /// Round to 2 decimal places, half-up.
    fn round_money(self) -> Decimal;
    /// Round to `dp` decimal places, half-up.
    fn round_dp_half_up(self, dp: u32) -> Decimal;
    /// Ceiling to `dp` decimal places.
    fn ceil_dp(self, dp: u32) -> Decimal;
    /// Floor to `dp` decimal places.
    fn floor_dp(self, dp: u32) -> Decimal;
}

impl DecimalExt for Decimal {
    fn round_money(self) -> Decimal {
        self.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
    }

    fn round_dp_half_up(self, dp: u32) -> Decimal {
        self.round_dp_with_strategy(dp, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
    }

    fn ceil_dp(self, dp: u32) -> Decimal {
        let scale = Decimal::new(10_i64.pow(dp), 0);
        (self * scale).ceil() / scale
    }

    fn floor_dp(self, dp: u32) -> Decimal {
        let scale = Decimal::new(10_i64.pow(dp), 0);
        (self * scale).floor() / scale
    }
}
