//! Rehab budget estimation from condition grade, square footage, and
//! building age (§4.7).

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use strum::IntoEnumIterator;

use crate::types::rehab::{ConditionGrade, RehabCategory, RehabLineItem};
use crate::types::{DecimalExt, Money, RehabBudget};

/// `$/sqft` base cost for one `(ConditionGrade, RehabCategory)` cell.
/// Turnkey is all zeros; Medium totals ~$21/sqft and FullGut ~$65/sqft for
/// a post-2000 build, matching the grade's typical full gut-rehab scope.
fn base_cost_per_sqft(grade: ConditionGrade, category: RehabCategory) -> Decimal {
    use ConditionGrade::*;
    use RehabCategory::*;

    match (grade, category) {
        (Turnkey, _) => dec!(0),

        (Light, Paint) => dec!(1.0),
        (Light, Flooring) => dec!(1.5),
        (Light, Kitchen) => dec!(2.0),
        (Light, Bathrooms) => dec!(1.5),
        (Light, Hvac) => dec!(0.5),
        (Light, Electrical) => dec!(0.5),
        (Light, Plumbing) => dec!(0.5),
        (Light, Roof) => dec!(0.5),
        (Light, Windows) => dec!(0.5),
        (Light, Exterior) => dec!(0.5),
        (Light, Contingency) => dec!(0.5),

        (Medium, Paint) => dec!(1.5),
        (Medium, Flooring) => dec!(3.0),
        (Medium, Kitchen) => dec!(4.0),
        (Medium, Bathrooms) => dec!(3.0),
        (Medium, Hvac) => dec!(2.0),
        (Medium, Electrical) => dec!(1.5),
        (Medium, Plumbing) => dec!(1.5),
        (Medium, Roof) => dec!(1.5),
        (Medium, Windows) => dec!(1.0),
        (Medium, Exterior) => dec!(1.0),
        (Medium, Contingency) => dec!(1.0),

        (Heavy, Paint) => dec!(2.0),
        (Heavy, Flooring) => dec!(5.0),
        (Heavy, Kitchen) => dec!(7.0),
        (Heavy, Bathrooms) => dec!(5.5),
        (Heavy, Hvac) => dec!(4.0),
        (Heavy, Electrical) => dec!(3.0),
        (Heavy, Plumbing) => dec!(3.0),
        (Heavy, Roof) => dec!(4.0),
        (Heavy, Windows) => dec!(2.5),
        (Heavy, Exterior) => dec!(2.5),
        (Heavy, Contingency) => dec!(3.5),

        (FullGut, Paint) => dec!(2.5),
        (FullGut, Flooring) => dec!(7.0),
        (FullGut, Kitchen) => dec!(10.0),
        (FullGut, Bathrooms) => dec!(8.0),
        (FullGut, Hvac) => dec!(6.0),
        (FullGut, Electrical) => dec!(5.0),
        (FullGut, Plumbing) => dec!(5.0),
        (FullGut, Roof) => dec!(7.0),
        (FullGut, Windows) => dec!(4.0),
        (FullGut, Exterior) => dec!(4.5),
        (FullGut, Contingency) => dec!(6.0),
    }
}

/// Uniform age multiplier applied across every category.
fn age_multiplier(year_built: u32) -> Decimal {
    if year_built >= 2000 {
        dec!(1.00)
    } else if year_built >= 1970 {
        dec!(1.10)
    } else if year_built >= 1950 {
        dec!(1.20)
    } else {
        dec!(1.30)
    }
}

/// Default rehab duration by grade; an explicit `rehab_months_override`
/// always wins.
fn default_rehab_months(grade: ConditionGrade) -> u32 {
    match grade {
        ConditionGrade::Turnkey => 0,
        ConditionGrade::Light => 1,
        ConditionGrade::Medium => 3,
        ConditionGrade::Heavy => 6,
        ConditionGrade::FullGut => 9,
    }
}

/// Build a full `RehabBudget`: one line item per `RehabCategory`, each
/// costed as `base($/sqft) * sqft * age_multiplier(year_built)` and rounded
/// to cents, with any `cost_overrides` entry taking precedence over the
/// estimate for its category.
pub fn estimate_rehab_budget(
    sqft: u32,
    year_built: u32,
    condition_grade: ConditionGrade,
    rehab_months_override: Option<u32>,
    cost_overrides: &[(RehabCategory, Money)],
    total_override: Option<Money>,
) -> RehabBudget {
    let sqft_dec = Decimal::from(sqft);
    let multiplier = age_multiplier(year_built);

    let line_items: Vec<RehabLineItem> = RehabCategory::iter()
        .map(|category| {
            let estimated_cost = Money::from_dollars(
                (base_cost_per_sqft(condition_grade, category) * sqft_dec * multiplier)
                    .round_money(),
            );
            let override_cost = cost_overrides
                .iter()
                .find(|(c, _)| *c == category)
                .map(|(_, m)| *m);
            RehabLineItem {
                category,
                estimated_cost,
                override_cost,
            }
        })
        .collect();

    RehabBudget {
        condition_grade,
        line_items,
        rehab_months: rehab_months_override.unwrap_or_else(|| default_rehab_months(condition_grade)),
        total_override,
    }
}
