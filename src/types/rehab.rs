//! Rehab budget inputs (§4.7).

use super::money::Money;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Overall condition grade, drives both the rehab cost matrix and the
/// maintenance-pct condition multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ConditionGrade {
    Turnkey,
    Light,
    Medium,
    Heavy,
    FullGut,
}

/// A rehab scope-of-work category; each has a `$/sqft` cell in the cost
/// matrix per `ConditionGrade`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RehabCategory {
    Paint,
    Flooring,
    Kitchen,
    Bathrooms,
    Hvac,
    Electrical,
    Plumbing,
    Roof,
    Windows,
    Exterior,
    Contingency,
}

/// One line item of the rehab budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RehabLineItem {
    pub category: RehabCategory,
    pub estimated_cost: Money,
    pub override_cost: Option<Money>,
}

impl RehabLineItem {
    /// The cost actually used: the override if present, else the estimate.
    pub fn effective_cost(&self) -> Money {
        self.override_cost.unwrap_or(self.estimated_cost)
    }
}

/// The full rehab scope and budget for the property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RehabBudget {
    pub condition_grade: ConditionGrade,
    pub line_items: Vec<RehabLineItem>,
    pub rehab_months: u32,
    pub total_override: Option<Money>,
}

impl RehabBudget {
    /// `total_override` if set, else the sum of each line item's effective
    /// cost.
    pub fn total_cost(&self) -> Money {
        self.total_override
            .unwrap_or_else(|| self.line_items.iter().map(|i| i.effective_cost()).sum())
    }
}
