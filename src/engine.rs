//! The pro-forma runner: the single front door that turns a
//! `DealAssumptions` and `InvestorTaxProfile` into a full `AnalysisResult`
//! (§4.15).

use std::collections::BTreeMap;

use log::{debug, info};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::algorithms::{
    amortization, cashflow, compute_disposition, compute_irr, compute_passive_activity,
    compute_yearly_depreciation, taxable_rental_income,
};
use crate::types::{AnalysisResult, DealAssumptions, InvestorTaxProfile, Money, Rate, YearlyProjection};

/// The crate version, surfaced for callers that log or display engine
/// provenance alongside a run's output.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine-wide knobs that aren't part of `DealAssumptions`: the
/// bonus-depreciation rate schedule is the only one today. `None` uses the
/// built-in default schedule.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    pub bonus_depreciation_schedule: Option<BTreeMap<u32, Decimal>>,
}

/// Human-readable engine identification, useful for logging or embedding
/// in a result envelope.
pub fn engine_info() -> String {
    format!("reia-core pro-forma engine v{}", ENGINE_VERSION)
}

/// `run_proforma(assumptions, investor)` with the default `EngineConfig`.
pub fn run_proforma(assumptions: &DealAssumptions, investor: &InvestorTaxProfile) -> AnalysisResult {
    run_proforma_with_config(assumptions, investor, &EngineConfig::default())
}

/// `run_proforma`, with an explicit `EngineConfig` (currently just the
/// bonus-depreciation schedule override).
pub fn run_proforma_with_config(
    assumptions: &DealAssumptions,
    investor: &InvestorTaxProfile,
    config: &EngineConfig,
) -> AnalysisResult {
    info!(
        "running pro-forma: purchase_price={} hold_years={}",
        assumptions.purchase_price, assumptions.hold_years
    );

    let schedule = amortization::generate_amortization_schedule(
        assumptions.loan_amount().as_decimal(),
        assumptions.interest_rate.as_decimal(),
        assumptions.loan_term_years,
        Some(assumptions.hold_years),
    );
    let yearly_debt = amortization::yearly_debt_summary(&schedule);

    let mut projections = Vec::with_capacity(assumptions.hold_years as usize);
    let mut prior_suspended = Money::ZERO;
    let mut total_depreciation_taken = Money::ZERO;
    let mut total_tax_benefit_operations = Money::ZERO;
    let mut total_suspended_losses = Money::ZERO;
    let mut before_tax_cash_flows: Vec<Decimal> = vec![-assumptions.total_initial_investment().as_decimal()];
    let mut after_tax_cash_flows: Vec<Decimal> = vec![-assumptions.total_initial_investment().as_decimal()];
    let mut loan_balance = assumptions.loan_amount();

    for year in 1..=assumptions.hold_years {
        let debt = yearly_debt
            .get((year - 1) as usize)
            .copied()
            .unwrap_or(amortization::YearlyDebt {
                year,
                principal: dec!(0),
                interest: dec!(0),
                debt_service: dec!(0),
                ending_balance: dec!(0),
            });
        let debt_service = Money::from_dollars(debt.debt_service);
        let interest_paid = Money::from_dollars(debt.interest);
        let principal_paid = Money::from_dollars(debt.principal);
        loan_balance = Money::from_dollars(debt.ending_balance);

        let gross_rent = cashflow::gross_rent(assumptions, year);
        let vacancy_loss = cashflow::vacancy_loss(assumptions, year);
        let egi = cashflow::effective_gross_income(assumptions, year);
        let expenses = cashflow::operating_expenses(assumptions, year);
        let noi = cashflow::noi(assumptions, year);
        let cfbt = cashflow::cash_flow_before_tax(noi, debt_service);

        let depreciation = compute_yearly_depreciation(
            assumptions,
            year,
            config.bonus_depreciation_schedule.as_ref(),
        );
        total_depreciation_taken = total_depreciation_taken + depreciation.total;

        let taxable = taxable_rental_income(noi, interest_paid, depreciation.total);
        let ledger_entry =
            compute_passive_activity(taxable, investor, prior_suspended, year);
        prior_suspended = ledger_entry.cumulative_suspended;
        total_tax_benefit_operations = total_tax_benefit_operations + ledger_entry.tax_benefit;
        total_suspended_losses = ledger_entry.cumulative_suspended;

        let cfat = (cfbt + ledger_entry.tax_benefit).round_cents();

        let property_value = cashflow::property_value(assumptions, year);
        let equity = (property_value - loan_balance).round_cents();

        let year_one_noi = if year == 1 {
            noi
        } else {
            cashflow::noi(assumptions, 1)
        };
        let cap_rate = cashflow::cap_rate(year_one_noi, assumptions.purchase_price);
        let cash_on_cash = cashflow::cash_on_cash(cfbt, assumptions.total_initial_investment());
        let dscr = cashflow::dscr(noi, debt_service);

        before_tax_cash_flows.push(cfbt.as_decimal());
        after_tax_cash_flows.push(cfat.as_decimal());

        projections.push(YearlyProjection {
            year,
            gross_rent,
            vacancy_loss,
            other_income: assumptions.other_income,
            effective_gross_income: egi,
            expenses: expenses
                .line_items
                .iter()
                .map(|(k, v)| (k.clone(), *v))
                .collect(),
            total_expenses: expenses.total,
            noi,
            debt_service,
            cash_flow_before_tax: cfbt,
            principal_paid,
            interest_paid,
            loan_balance,
            residential_depreciation: depreciation.residential,
            cost_seg_depreciation: depreciation.five_year + depreciation.seven_year + depreciation.fifteen_year,
            total_depreciation: depreciation.total,
            taxable_income: taxable,
            passive_loss: ledger_entry.deductible_amount,
            suspended_loss: ledger_entry.cumulative_suspended,
            tax_benefit: ledger_entry.tax_benefit,
            cash_flow_after_tax: cfat,
            property_value,
            equity,
            cap_rate,
            cash_on_cash,
            dscr,
            rent_months: cashflow::rent_months(assumptions, year),
        });
    }

    let sale_price = cashflow::property_value(assumptions, assumptions.hold_years);
    let disposition = compute_disposition(
        assumptions,
        investor,
        sale_price,
        loan_balance,
        total_depreciation_taken,
        prior_suspended,
    );

    *before_tax_cash_flows.last_mut().unwrap() += disposition.gross_equity_proceeds.as_decimal();
    *after_tax_cash_flows.last_mut().unwrap() += disposition.after_tax_sale_proceeds.as_decimal();

    let before_tax_irr = Rate::from_decimal(compute_irr(&before_tax_cash_flows)).round_4dp();
    let after_tax_irr = Rate::from_decimal(compute_irr(&after_tax_cash_flows)).round_4dp();

    let total_cash_returned_after_tax: Decimal = after_tax_cash_flows[1..].iter().sum();
    let equity_multiple = Rate::from_decimal(crate::algorithms::compute_equity_multiple(
        total_cash_returned_after_tax,
        assumptions.total_initial_investment().as_decimal(),
    ))
    .round_4dp();

    let average_cash_on_cash = if projections.is_empty() {
        Rate::ZERO
    } else {
        let sum: Decimal = projections.iter().map(|p| p.cash_on_cash.as_decimal()).sum();
        Rate::from_decimal(sum / Decimal::from(projections.len() as u32)).round_4dp()
    };

    let net_tax_impact = (total_tax_benefit_operations + disposition.tax_benefit_from_release
        - (disposition.recapture_tax
            + disposition.capital_gains_tax
            + disposition.niit_on_gain
            + disposition.state_tax_on_gain))
        .round_cents();

    let total_profit = (Money::from_dollars(total_cash_returned_after_tax)
        - assumptions.total_initial_investment())
    .round_cents();

    debug!(
        "pro-forma complete: before_tax_irr={:?} after_tax_irr={:?} equity_multiple={:?}",
        before_tax_irr, after_tax_irr, equity_multiple
    );

    AnalysisResult {
        projections,
        disposition,
        total_initial_investment: assumptions.total_initial_investment(),
        total_rehab_cost: assumptions.rehab_budget.total_cost(),
        before_tax_irr,
        after_tax_irr,
        equity_multiple,
        average_cash_on_cash,
        total_profit,
        total_depreciation_taken,
        total_tax_benefit_operations,
        total_suspended_losses,
        net_tax_impact,
        total_cash_returned: Money::from_dollars(total_cash_returned_after_tax),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::rehab::{ConditionGrade, RehabBudget};
    use crate::types::{CostSegAllocation, FilingStatus, LoanType};

    fn s1_assumptions() -> DealAssumptions {
        DealAssumptions::new(DealAssumptions {
            purchase_price: Money::from_dollars(dec!(400_000)),
            closing_costs: Money::from_dollars(dec!(8_000)),
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
            property_tax: Money::from_dollars(dec!(5_000)),
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
        })
        .unwrap()
    }

    fn high_income_investor() -> InvestorTaxProfile {
        InvestorTaxProfile {
            filing_status: FilingStatus::Mfj,
            agi: Money::from_dollars(dec!(300_000)),
            marginal_federal_rate: Rate::from_percentage(dec!(32)),
            marginal_state_rate: Rate::from_percentage(dec!(5)),
            state: "CA".to_string(),
            other_passive_income: Money::ZERO,
            is_re_professional: false,
        }
    }

    #[test]
    fn test_s1_baseline_landmarks() {
        let assumptions = s1_assumptions();
        let result = run_proforma(&assumptions, &high_income_investor());

        assert_eq!(result.projections.len(), 7);
        assert_eq!(result.projections[0].gross_rent.as_decimal(), dec!(33_600.00));
        assert_eq!(
            result.projections[0].effective_gross_income.as_decimal(),
            dec!(31_920.00)
        );

        let cap_rate = result.projections[0].cap_rate.as_decimal();
        assert!(cap_rate >= dec!(0.035) && cap_rate <= dec!(0.045));

        assert!(result.equity_multiple.as_decimal() > dec!(1));
        assert!(result.before_tax_irr.as_decimal() > dec!(0));
        assert!(result.total_depreciation_taken.as_decimal() > dec!(0));
        assert!(result.total_suspended_losses.as_decimal() > dec!(0));
    }

    #[test]
    fn test_s2_cost_seg_turbo_increases_year_one_depreciation() {
        let baseline = run_proforma(&s1_assumptions(), &high_income_investor());

        let mut turbo_assumptions = s1_assumptions();
        turbo_assumptions.cost_seg = CostSegAllocation {
            five_year_pct: Rate::from_percentage(dec!(20)),
            seven_year_pct: Rate::ZERO,
            fifteen_year_pct: Rate::ZERO,
        };
        let turbo = run_proforma(&turbo_assumptions, &high_income_investor());

        assert!(
            turbo.projections[0].total_depreciation.as_decimal()
                > baseline.projections[0].total_depreciation.as_decimal()
        );
    }

    #[test]
    fn test_projections_are_chronologically_ordered() {
        let result = run_proforma(&s1_assumptions(), &high_income_investor());
        for window in result.projections.windows(2) {
            assert_eq!(window[1].year, window[0].year + 1);
        }
    }

    #[test]
    fn test_engine_info_contains_version() {
        assert!(engine_info().contains(ENGINE_VERSION));
    }
}
