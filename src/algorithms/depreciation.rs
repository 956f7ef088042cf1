//! Depreciation: residential 27.5-year (mid-month), MACRS 5/7/15-year
//! (half-year), and bonus depreciation (§4.2).

use std::collections::BTreeMap;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::{CostSegAllocation, DealAssumptions, Money};

/// `year_1_years_equiv(month) = (12.5 - month) / 12`, the fraction of a
/// full year of depreciation the mid-month convention allows in the
/// placement year.
fn year_one_years_equivalent(placed_in_service_month: u32) -> Decimal {
    let month = Decimal::from(placed_in_service_month);
    (dec!(12.5) - month) / dec!(12)
}

/// Residential 27.5-year rate for `year`, given the month the property was
/// placed in service. Derived from the mid-month convention rather than a
/// hardcoded 29x12 table: year 1 gets `year_one_years_equivalent(month) /
/// 27.5`; full years after that get `1 / 27.5`; the table then ends on a
/// single trailing stub year whose fraction is whatever's left of the
/// 27.5-year life. Every year past the stub is zero.
pub fn residential_depreciation_rate(placed_in_service_month: u32, year: u32) -> Decimal {
    if year == 0 {
        return dec!(0);
    }
    let annual_rate = dec!(1) / dec!(27.5);
    let year_one_equiv = year_one_years_equivalent(placed_in_service_month);

    if year == 1 {
        return (year_one_equiv * annual_rate).round_dp(6);
    }

    let remaining_years_equiv = dec!(27.5) - year_one_equiv;
    let full_years_count = remaining_years_equiv.floor();
    let full_years_count_u32: u32 = full_years_count.to_u32().unwrap_or(0);

    let stub_year = 1 + full_years_count_u32 + 1;

    if year >= 2 && year <= 1 + full_years_count_u32 {
        return annual_rate.round_dp(6);
    }
    if year == stub_year {
        let stub_fraction = remaining_years_equiv - full_years_count;
        return (stub_fraction * annual_rate).round_dp(6);
    }
    dec!(0)
}

/// MACRS 5-year vector (IRS Pub 946, half-year convention).
pub const MACRS_5_YEAR: [Decimal; 6] = [
    dec!(0.2000),
    dec!(0.3200),
    dec!(0.1920),
    dec!(0.1152),
    dec!(0.1152),
    dec!(0.0576),
];

/// MACRS 7-year vector (IRS Pub 946, half-year convention).
pub const MACRS_7_YEAR: [Decimal; 8] = [
    dec!(0.1429),
    dec!(0.2449),
    dec!(0.1749),
    dec!(0.1249),
    dec!(0.0893),
    dec!(0.0892),
    dec!(0.0893),
    dec!(0.0446),
];

/// MACRS 15-year vector (IRS Pub 946, half-year convention).
pub const MACRS_15_YEAR: [Decimal; 16] = [
    dec!(0.0500),
    dec!(0.0950),
    dec!(0.0855),
    dec!(0.0770),
    dec!(0.0693),
    dec!(0.0623),
    dec!(0.0590),
    dec!(0.0590),
    dec!(0.0591),
    dec!(0.0590),
    dec!(0.0591),
    dec!(0.0590),
    dec!(0.0591),
    dec!(0.0590),
    dec!(0.0591),
    dec!(0.0295),
];

/// `basis * MACRS_vector[year]`, or zero if `year` falls outside the
/// vector. `year` is 1-indexed.
fn macrs_amount(basis: Decimal, vector: &[Decimal], year: u32) -> Decimal {
    if year == 0 {
        return dec!(0);
    }
    match vector.get((year - 1) as usize) {
        Some(rate) => basis * *rate,
        None => dec!(0),
    }
}

/// Default bonus-depreciation schedule, keyed by `placed_in_service_year`.
/// Callers may supply their own via `bonus_depreciation_rate`'s `schedule`
/// argument; unlisted years fall back to zero.
pub fn default_bonus_schedule() -> BTreeMap<u32, Decimal> {
    BTreeMap::from([
        (2022, dec!(1.0)),
        (2023, dec!(0.8)),
        (2024, dec!(0.6)),
        (2025, dec!(1.0)),
        (2026, dec!(1.0)),
        (2027, dec!(0.8)),
    ])
}

/// Bonus rate for `placed_in_service_year`, looked up in `schedule` (or the
/// built-in default when `None`). Years absent from the schedule get 0.
pub fn bonus_depreciation_rate(
    placed_in_service_year: u32,
    schedule: Option<&BTreeMap<u32, Decimal>>,
) -> Decimal {
    match schedule {
        Some(s) => s.get(&placed_in_service_year).copied().unwrap_or(dec!(0)),
        None => default_bonus_schedule()
            .get(&placed_in_service_year)
            .copied()
            .unwrap_or(dec!(0)),
    }
}

/// One year's depreciation, broken down by class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearlyDepreciation {
    pub residential: Money,
    pub five_year: Money,
    pub seven_year: Money,
    pub fifteen_year: Money,
    pub bonus: Money,
    pub total: Money,
}

/// Class basis allocation for the `depreciable_basis` under `cost_seg`.
struct ClassBasis {
    residential: Decimal,
    five_year: Decimal,
    seven_year: Decimal,
    fifteen_year: Decimal,
}

fn allocate_class_basis(depreciable_basis: Decimal, cost_seg: &CostSegAllocation) -> ClassBasis {
    ClassBasis {
        residential: depreciable_basis * cost_seg.residential_pct().as_decimal(),
        five_year: depreciable_basis * cost_seg.five_year_pct.as_decimal(),
        seven_year: depreciable_basis * cost_seg.seven_year_pct.as_decimal(),
        fifteen_year: depreciable_basis * cost_seg.fifteen_year_pct.as_decimal(),
    }
}

/// `compute_yearly_depreciation(assumptions, year)`. Allocates
/// `depreciable_basis` across the residential and 5/7/15-year classes per
/// `assumptions.cost_seg`. In year 1, bonus depreciation is carved out of
/// each reclassified class basis first; the remainder depreciates on the
/// normal MACRS vector starting from year 1 of that vector. Residential
/// basis is never bonus-eligible.
pub fn compute_yearly_depreciation(
    assumptions: &DealAssumptions,
    year: u32,
    bonus_schedule: Option<&BTreeMap<u32, Decimal>>,
) -> YearlyDepreciation {
    let class_basis = allocate_class_basis(
        assumptions.depreciable_basis().as_decimal(),
        &assumptions.cost_seg,
    );

    let residential_rate =
        residential_depreciation_rate(assumptions.placed_in_service_month, year);
    let residential = class_basis.residential * residential_rate;

    let bonus_rate = bonus_depreciation_rate(assumptions.placed_in_service_year, bonus_schedule);

    let (five_year_bonus, five_year_regular) =
        class_depreciation(class_basis.five_year, &MACRS_5_YEAR, year, bonus_rate);
    let (seven_year_bonus, seven_year_regular) =
        class_depreciation(class_basis.seven_year, &MACRS_7_YEAR, year, bonus_rate);
    let (fifteen_year_bonus, fifteen_year_regular) = class_depreciation(
        class_basis.fifteen_year,
        &MACRS_15_YEAR,
        year,
        bonus_rate,
    );

    let bonus_total = five_year_bonus + seven_year_bonus + fifteen_year_bonus;
    let five_year_total = five_year_bonus + five_year_regular;
    let seven_year_total = seven_year_bonus + seven_year_regular;
    let fifteen_year_total = fifteen_year_bonus + fifteen_year_regular;

    let total = residential + five_year_total + seven_year_total + fifteen_year_total;

    YearlyDepreciation {
        residential: Money::from_dollars(residential).round_cents(),
        five_year: Money::from_dollars(five_year_total).round_cents(),
        seven_year: Money::from_dollars(seven_year_total).round_cents(),
        fifteen_year: Money::from_dollars(fifteen_year_total).round_cents(),
        bonus: Money::from_dollars(bonus_total).round_cents(),
        total: Money::from_dollars(total).round_cents(),
    }
}

/// `(bonus_component, regular_component)` for one reclassified class in a
/// given year. In year 1 with `bonus_rate > 0`, the bonus component is
/// carved off the top and the regular component runs MACRS on what's left.
/// Every other year, the regular component runs MACRS on
/// `class_basis * (1 - bonus_rate)` — the bonus carve-out permanently
/// shrinks what's left to depreciate on the normal schedule.
fn class_depreciation(
    class_basis: Decimal,
    vector: &[Decimal],
    year: u32,
    bonus_rate: Decimal,
) -> (Decimal, Decimal) {
    if bonus_rate <= dec!(0) {
        return (dec!(0), macrs_amount(class_basis, vector, year));
    }

    let remaining_basis = class_basis * (dec!(1) - bonus_rate);
    if year == 1 {
        let bonus_component = class_basis * bonus_rate;
        (bonus_component, macrs_amount(remaining_basis, vector, year))
    } else {
        (dec!(0), macrs_amount(remaining_basis, vector, year))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::rehab::{ConditionGrade, RehabBudget};
    use crate::types::{LoanType, Rate};

    fn base_assumptions() -> DealAssumptions {
        DealAssumptions {
            purchase_price: Money::from_dollars(dec!(500_000)),
            closing_costs: Money::from_dollars(dec!(10_000)),
            land_value_pct: Rate::from_percentage(dec!(20)),
            ltv: Rate::from_percentage(dec!(80)),
            interest_rate: Rate::from_percentage(dec!(7)),
            loan_term_years: 30,
            loan_points: Rate::ZERO,
            loan_type: LoanType::Conventional,
            monthly_rent: Money::from_dollars(dec!(2_800)),
            annual_rent_growth: Rate::from_percentage(dec!(3)),
            vacancy_rate: Rate::from_percentage(dec!(5)),
            other_income: Money::ZERO,
            property_tax: Money::from_dollars(dec!(6_000)),
            insurance: Money::from_dollars(dec!(1_800)),
            maintenance_pct: Rate::from_percentage(dec!(5)),
            management_pct: Rate::from_percentage(dec!(8)),
            capex_reserve_pct: Rate::from_percentage(dec!(5)),
            hoa: Money::ZERO,
            annual_appreciation: Rate::from_percentage(dec!(3)),
            hold_years: 7,
            selling_costs_pct: Rate::from_percentage(dec!(6)),
            cost_seg: CostSegAllocation::NONE,
            placed_in_service_year: 2025,
            placed_in_service_month: 1,
            annual_expense_growth: Rate::from_percentage(dec!(2)),
            rehab_budget: RehabBudget {
                condition_grade: ConditionGrade::Turnkey,
                line_items: vec![],
                rehab_months: 0,
                total_override: None,
            },
        }
    }

    #[test]
    fn test_residential_month_one_landmark() {
        let rate = residential_depreciation_rate(1, 1);
        let diff = (rate - dec!(0.034848)).abs();
        assert!(diff < dec!(0.0001), "rate {} should be ~3.4848%", rate);
    }

    #[test]
    fn test_residential_full_year_rate() {
        let rate = residential_depreciation_rate(1, 10);
        let diff = (rate - dec!(0.036364)).abs();
        assert!(diff < dec!(0.0001), "rate {} should be ~3.6364%", rate);
    }

    #[test]
    fn test_residential_independent_of_month_for_full_years() {
        let r1 = residential_depreciation_rate(1, 10);
        let r12 = residential_depreciation_rate(12, 10);
        assert_eq!(r1, r12);
    }

    #[test]
    fn test_residential_zero_beyond_schedule() {
        let rate = residential_depreciation_rate(1, 40);
        assert_eq!(rate, dec!(0));
    }

    #[test]
    fn test_macrs_vectors_sum_to_one() {
        let sum_5: Decimal = MACRS_5_YEAR.iter().sum();
        let sum_7: Decimal = MACRS_7_YEAR.iter().sum();
        let sum_15: Decimal = MACRS_15_YEAR.iter().sum();
        assert_eq!(sum_5, dec!(1.0000));
        assert_eq!(sum_7, dec!(1.0000));
        assert_eq!(sum_15, dec!(1.0000));
    }

    #[test]
    fn test_bonus_schedule_defaults() {
        assert_eq!(bonus_depreciation_rate(2025, None), dec!(1.0));
        assert_eq!(bonus_depreciation_rate(2023, None), dec!(0.8));
        assert_eq!(bonus_depreciation_rate(2030, None), dec!(0));
    }

    #[test]
    fn test_no_cost_seg_has_zero_bonus_and_class_depreciation() {
        let a = base_assumptions();
        let dep = compute_yearly_depreciation(&a, 1, None);
        assert_eq!(dep.bonus, Money::ZERO);
        assert_eq!(dep.five_year, Money::ZERO);
        assert!(dep.residential.as_decimal() > dec!(0));
    }

    #[test]
    fn test_cost_seg_turbo_increases_year_one_depreciation() {
        let mut a = base_assumptions();
        a.cost_seg = CostSegAllocation {
            five_year_pct: Rate::from_percentage(dec!(20)),
            seven_year_pct: Rate::ZERO,
            fifteen_year_pct: Rate::ZERO,
        };
        let baseline = compute_yearly_depreciation(&base_assumptions(), 1, None);
        let turbo = compute_yearly_depreciation(&a, 1, None);
        assert!(turbo.total.as_decimal() > baseline.total.as_decimal());
        assert!(turbo.bonus.as_decimal() > dec!(0));
    }

    #[test]
    fn test_bonus_only_applies_in_year_one() {
        let mut a = base_assumptions();
        a.cost_seg = CostSegAllocation {
            five_year_pct: Rate::from_percentage(dec!(20)),
            seven_year_pct: Rate::ZERO,
            fifteen_year_pct: Rate::ZERO,
        };
        let year_two = compute_yearly_depreciation(&a, 2, None);
        assert_eq!(year_two.bonus, Money::ZERO);
    }

    #[test]
    fn test_class_depreciation_converges_to_basis() {
        let basis = dec!(100_000);
        let total: Decimal = (1..=20u32)
            .map(|y| macrs_amount(basis, &MACRS_5_YEAR, y))
            .sum();
        let diff = (total - basis).abs();
        assert!(diff < dec!(0.01));
    }
}
