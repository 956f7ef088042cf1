//! The assumption builder's auditable output: one `AssumptionDetail` per
//! scalar field of `DealAssumptions`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{Display, EnumIter, EnumString};

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AssumptionSource {
    ApiFetched,
    Estimated,
    UserOverride,
    Default,
}

/// Confidence tier attached to every resolved value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

/// Every scalar field of `DealAssumptions`, used as the manifest key. Kept
/// as a closed enum (rather than an ad-hoc string/dict) so the manifest's
/// field set can be checked exhaustively at the builder boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, EnumString, Display, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FieldName {
    PurchasePrice,
    ClosingCosts,
    LandValuePct,
    Ltv,
    InterestRate,
    LoanTermYears,
    LoanPoints,
    LoanType,
    MonthlyRent,
    AnnualRentGrowth,
    VacancyRate,
    OtherIncome,
    PropertyTax,
    Insurance,
    MaintenancePct,
    ManagementPct,
    CapexReservePct,
    Hoa,
    AnnualAppreciation,
    HoldYears,
    SellingCostsPct,
    AnnualExpenseGrowth,
    RehabBudget,
    CostSeg,
    PlacedInServiceYear,
    PlacedInServiceMonth,
}

/// A single resolved field: its value, where it came from, how confident
/// the builder is, and a human-readable justification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssumptionDetail {
    pub field_name: FieldName,
    pub value: Value,
    pub source: AssumptionSource,
    pub confidence: Confidence,
    pub justification: String,
    #[serde(default)]
    pub data_points: BTreeMap<String, Value>,
}

impl AssumptionDetail {
    pub fn new(
        field_name: FieldName,
        value: impl Into<Value>,
        source: AssumptionSource,
        confidence: Confidence,
        justification: impl Into<String>,
    ) -> Self {
        AssumptionDetail {
            field_name,
            value: value.into(),
            source,
            confidence,
            justification: justification.into(),
            data_points: BTreeMap::new(),
        }
    }

    pub fn with_data_point(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data_points.insert(key.into(), value.into());
        self
    }
}

/// `field_name -> AssumptionDetail`, one-to-one with `DealAssumptions`'s
/// scalar fields. Produced alongside every assumptions build.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssumptionManifest {
    pub details: BTreeMap<FieldName, AssumptionDetail>,
}

impl AssumptionManifest {
    pub fn new() -> Self {
        AssumptionManifest::default()
    }

    pub fn insert(&mut self, detail: AssumptionDetail) {
        self.details.insert(detail.field_name, detail);
    }

    pub fn get(&self, field: FieldName) -> Option<&AssumptionDetail> {
        self.details.get(&field)
    }

    /// True once every `FieldName` variant has an entry.
    pub fn is_complete(&self) -> bool {
        use strum::IntoEnumIterator;
        FieldName::iter().all(|f| self.details.contains_key(&f))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_insert_and_get() {
        let mut m = AssumptionManifest::new();
        m.insert(AssumptionDetail::new(
            FieldName::PurchasePrice,
            500_000,
            AssumptionSource::UserOverride,
            Confidence::High,
            "user supplied",
        ));
        assert!(m.get(FieldName::PurchasePrice).is_some());
        assert!(m.get(FieldName::Ltv).is_none());
    }

    #[test]
    fn test_is_complete_requires_every_field() {
        let mut m = AssumptionManifest::new();
        assert!(!m.is_complete());
        use strum::IntoEnumIterator;
        for f in FieldName::iter() {
            m.insert(AssumptionDetail::new(
                f,
                serde_json::Value::Null,
                AssumptionSource::Default,
                Confidence::Low,
                "placeholder",
            ));
        }
        assert!(m.is_complete());
    }
}
