//! Year-indexed cash-flow arithmetic over `DealAssumptions` (§4.3).

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::{DealAssumptions, DecimalExt, Money, Rate};

/// Itemized operating expenses plus their total.
#[derive(Debug, Clone, PartialEq)]
pub struct OperatingExpenses {
    pub line_items: BTreeMap<String, Money>,
    pub total: Money,
}

/// `monthly_rent * 12`, grown by `(1 + annual_rent_growth)^(year-1)`,
/// prorated in year 1 by `(12 - min(rehab_months, 12)) / 12` when the
/// rehab budget calls for downtime before the unit is rentable.
pub fn gross_rent(a: &DealAssumptions, year: u32) -> Money {
    let base = a.monthly_rent.as_decimal() * dec!(12);
    let growth_factor = power(dec!(1) + a.annual_rent_growth.as_decimal(), year.saturating_sub(1));
    let mut rent = base * growth_factor;

    if year == 1 && a.rehab_budget.rehab_months > 0 {
        let vacant_months = a.rehab_budget.rehab_months.min(12);
        let occupied_fraction = Decimal::from(12 - vacant_months) / dec!(12);
        rent *= occupied_fraction;
    }

    Money::from_dollars(rent).round_cents()
}

/// The number of months year `year` actually collects rent: 12, except
/// year 1 during a rehab, which collects `12 - min(rehab_months, 12)`.
pub fn rent_months(a: &DealAssumptions, year: u32) -> u32 {
    if year == 1 && a.rehab_budget.rehab_months > 0 {
        12 - a.rehab_budget.rehab_months.min(12)
    } else {
        12
    }
}

/// `gross_rent - gross_rent * vacancy_rate + other_income`.
pub fn effective_gross_income(a: &DealAssumptions, year: u32) -> Money {
    let rent = gross_rent(a, year);
    let vacancy_loss = rent * a.vacancy_rate.as_decimal();
    (rent - vacancy_loss + a.other_income).round_cents()
}

/// `gross_rent * vacancy_rate`, broken out for the yearly projection.
pub fn vacancy_loss(a: &DealAssumptions, year: u32) -> Money {
    (gross_rent(a, year) * a.vacancy_rate.as_decimal()).round_cents()
}

/// Itemized operating expenses for `year`. Property tax and insurance grow
/// by `(1 + annual_expense_growth)^(year-1)`; maintenance, management, and
/// capex reserve are percentages of the (already prorated) `gross_rent`;
/// HOA is a flat `hoa * 12` with no growth or proration.
pub fn operating_expenses(a: &DealAssumptions, year: u32) -> OperatingExpenses {
    let expense_growth = power(
        dec!(1) + a.annual_expense_growth.as_decimal(),
        year.saturating_sub(1),
    );
    let rent = gross_rent(a, year).as_decimal();

    let property_tax = (a.property_tax.as_decimal() * expense_growth).round_money();
    let insurance = (a.insurance.as_decimal() * expense_growth).round_money();
    let maintenance = (rent * a.maintenance_pct.as_decimal()).round_money();
    let management = (rent * a.management_pct.as_decimal()).round_money();
    let capex_reserve = (rent * a.capex_reserve_pct.as_decimal()).round_money();
    let hoa = (a.hoa.as_decimal() * dec!(12)).round_money();

    let mut line_items = BTreeMap::new();
    line_items.insert("property_tax".to_string(), Money::from_dollars(property_tax));
    line_items.insert("insurance".to_string(), Money::from_dollars(insurance));
    line_items.insert("maintenance".to_string(), Money::from_dollars(maintenance));
    line_items.insert("management".to_string(), Money::from_dollars(management));
    line_items.insert(
        "capex_reserve".to_string(),
        Money::from_dollars(capex_reserve),
    );
    line_items.insert("hoa".to_string(), Money::from_dollars(hoa));

    let total: Money = line_items.values().copied().sum();

    OperatingExpenses { line_items, total }
}

/// `effective_gross_income - total_expenses`.
pub fn noi(a: &DealAssumptions, year: u32) -> Money {
    let egi = effective_gross_income(a, year);
    let expenses = operating_expenses(a, year);
    (egi - expenses.total).round_cents()
}

/// `noi - annual_debt_service`.
pub fn cash_flow_before_tax(noi: Money, annual_debt_service: Money) -> Money {
    (noi - annual_debt_service).round_cents()
}

/// `year1_noi / purchase_price`, zero if `purchase_price` is zero.
pub fn cap_rate(year_one_noi: Money, purchase_price: Money) -> Rate {
    if purchase_price.is_zero() {
        return Rate::ZERO;
    }
    Rate::from_decimal(year_one_noi.as_decimal() / purchase_price.as_decimal()).round_4dp()
}

/// `cash_flow_before_tax / total_initial_investment`, zero if the
/// denominator is zero.
pub fn cash_on_cash(cfbt: Money, total_initial_investment: Money) -> Rate {
    if total_initial_investment.is_zero() {
        return Rate::ZERO;
    }
    Rate::from_decimal(cfbt.as_decimal() / total_initial_investment.as_decimal()).round_4dp()
}

/// `noi / annual_debt_service`, zero if the denominator is zero.
pub fn dscr(noi: Money, annual_debt_service: Money) -> Rate {
    if annual_debt_service.is_zero() {
        return Rate::ZERO;
    }
    Rate::from_decimal(noi.as_decimal() / annual_debt_service.as_decimal()).round_4dp()
}

/// `purchase_price * (1 + annual_appreciation)^year`.
pub fn property_value(a: &DealAssumptions, year: u32) -> Money {
    let factor = power(dec!(1) + a.annual_appreciation.as_decimal(), year);
    (a.purchase_price * factor).round_cents()
}

fn power(base: Decimal, exp: u32) -> Decimal {
    if exp == 0 {
        return dec!(1);
    }
    let mut result = dec!(1);
    let mut current_base = base;
    let mut remaining_exp = exp;
    while remaining_exp > 0 {
        if remaining_exp % 2 == 1 {
            result *= current_base;
        }
        current_base *= current_base;
        remaining_exp /= 2;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::rehab::{ConditionGrade, RehabBudget};
    use crate::types::LoanType;

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
            cost_seg: crate::types::CostSegAllocation::NONE,
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
    fn test_s1_year_one_gross_rent_landmark() {
        let a = base_assumptions();
        assert_eq!(gross_rent(&a, 1).as_decimal(), dec!(33_600.00));
    }

    #[test]
    fn test_s1_year_one_egi_landmark() {
        let a = base_assumptions();
        assert_eq!(effective_gross_income(&a, 1).as_decimal(), dec!(31_920.00));
    }

    #[test]
    fn test_rehab_prorates_year_one_rent_only() {
        let mut a = base_assumptions();
        a.rehab_budget.rehab_months = 3;
        let prorated = gross_rent(&a, 1);
        let full = Money::from_dollars(dec!(33_600.00));
        assert!(prorated.as_decimal() < full.as_decimal());

        let year_two = gross_rent(&a, 2);
        let unprorated_year_two = base_assumptions();
        assert_eq!(year_two, gross_rent(&unprorated_year_two, 2));
    }

    #[test]
    fn test_rent_months_during_rehab() {
        let mut a = base_assumptions();
        a.rehab_budget.rehab_months = 3;
        assert_eq!(rent_months(&a, 1), 9);
        assert_eq!(rent_months(&a, 2), 12);
    }

    #[test]
    fn test_cap_rate_zero_purchase_price() {
        assert_eq!(cap_rate(Money::from_dollars(dec!(1000)), Money::ZERO), Rate::ZERO);
    }

    #[test]
    fn test_dscr_zero_debt_service() {
        assert_eq!(dscr(Money::from_dollars(dec!(1000)), Money::ZERO), Rate::ZERO);
    }

    #[test]
    fn test_property_value_appreciates() {
        let a = base_assumptions();
        let v1 = property_value(&a, 1);
        let v2 = property_value(&a, 2);
        assert!(v2.as_decimal() > v1.as_decimal());
    }

    #[test]
    fn test_operating_expenses_hoa_is_flat_not_prorated() {
        let mut a = base_assumptions();
        a.hoa = Money::from_dollars(dec!(100));
        a.rehab_budget.rehab_months = 6;
        let expenses = operating_expenses(&a, 1);
        assert_eq!(
            expenses.line_items.get("hoa").copied().unwrap().as_decimal(),
            dec!(1200.00)
        );
    }
}
