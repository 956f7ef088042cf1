//! Disposition: sale proceeds, IRC §1250 recapture, §1231 capital gain, and
//! §469(g)(1)(A) release of suspended passive losses (§4.5).

use rust_decimal_macros::dec;

use crate::types::{DealAssumptions, DispositionResult, InvestorTaxProfile, Money};

const RECAPTURE_RATE: rust_decimal::Decimal = dec!(0.25);
const LTCG_RATE: rust_decimal::Decimal = dec!(0.20);

/// `compute_disposition`. `sale_price`/`loan_balance`/`total_depreciation_taken`/
/// `cumulative_suspended_losses` are the state of the deal at the moment of
/// sale; `assumptions` supplies `selling_costs_pct` and `total_basis`.
pub fn compute_disposition(
    assumptions: &DealAssumptions,
    investor: &InvestorTaxProfile,
    sale_price: Money,
    loan_balance: Money,
    total_depreciation_taken: Money,
    cumulative_suspended_losses: Money,
) -> DispositionResult {
    let selling_costs = (sale_price * assumptions.selling_costs_pct.as_decimal()).round_cents();
    let net_sale_proceeds = (sale_price - selling_costs).round_cents();
    let gross_equity_proceeds = (net_sale_proceeds - loan_balance).round_cents();

    let adjusted_basis = (assumptions.total_basis() - total_depreciation_taken).round_cents();
    let total_gain = (net_sale_proceeds - adjusted_basis).round_cents();

    let combined_rate = investor.combined_rate().as_decimal();

    if total_gain.as_decimal() <= dec!(0) {
        let tax_benefit_from_release =
            (cumulative_suspended_losses * combined_rate).round_cents();
        let total_tax_on_sale = Money::from_dollars(-tax_benefit_from_release.as_decimal());
        let after_tax_sale_proceeds =
            (gross_equity_proceeds + tax_benefit_from_release).round_cents();

        return DispositionResult {
            sale_price,
            selling_costs,
            net_sale_proceeds,
            loan_payoff: loan_balance,
            gross_equity_proceeds,
            adjusted_basis,
            total_gain,
            depreciation_recapture: Money::ZERO,
            capital_gain: Money::ZERO,
            recapture_tax: Money::ZERO,
            capital_gains_tax: Money::ZERO,
            niit_on_gain: Money::ZERO,
            state_tax_on_gain: Money::ZERO,
            suspended_losses_released: cumulative_suspended_losses,
            tax_benefit_from_release,
            total_tax_on_sale,
            after_tax_sale_proceeds,
        };
    }

    let depreciation_recapture = total_depreciation_taken.min(total_gain);
    let capital_gain = (total_gain - depreciation_recapture).round_cents();

    let recapture_tax = (depreciation_recapture * RECAPTURE_RATE).round_cents();
    let capital_gains_tax = (capital_gain * LTCG_RATE).round_cents();
    let niit_on_gain = (total_gain * investor.niit_rate().as_decimal()).round_cents();
    let state_tax_on_gain =
        (total_gain * investor.marginal_state_rate.as_decimal()).round_cents();

    // §469(g)(1)(A): suspended losses release against the gain first, at
    // the gain's own rates, with the recapture bucket filled before the
    // LTCG bucket; any leftover is saved at the ordinary combined rate.
    let gain_offset = cumulative_suspended_losses.min(total_gain);
    let remaining_suspended = (cumulative_suspended_losses - gain_offset).round_cents();

    let recapture_offset = gain_offset.min(depreciation_recapture);
    let capital_offset = (gain_offset - recapture_offset).round_cents();
    let gain_offset_dec = gain_offset.as_decimal();

    let benefit_from_gain_offset = (recapture_offset.as_decimal() * RECAPTURE_RATE
        + capital_offset.as_decimal() * LTCG_RATE
        + gain_offset_dec * investor.niit_rate().as_decimal()
        + gain_offset_dec * investor.marginal_state_rate.as_decimal())
    .round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero);

    let benefit_from_remaining =
        (remaining_suspended.as_decimal() * combined_rate).round_dp_with_strategy(
            2,
            rust_decimal::RoundingStrategy::MidpointAwayFromZero,
        );

    let tax_benefit_from_release =
        Money::from_dollars(benefit_from_gain_offset + benefit_from_remaining);

    let total_tax_on_sale = (recapture_tax + capital_gains_tax + niit_on_gain + state_tax_on_gain
        - tax_benefit_from_release)
        .round_cents();
    let after_tax_sale_proceeds =
        (gross_equity_proceeds - total_tax_on_sale).round_cents();

    DispositionResult {
        sale_price,
        selling_costs,
        net_sale_proceeds,
        loan_payoff: loan_balance,
        gross_equity_proceeds,
        adjusted_basis,
        total_gain,
        depreciation_recapture,
        capital_gain,
        recapture_tax,
        capital_gains_tax,
        niit_on_gain,
        state_tax_on_gain,
        suspended_losses_released: cumulative_suspended_losses,
        tax_benefit_from_release,
        total_tax_on_sale,
        after_tax_sale_proceeds,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::rehab::{ConditionGrade, RehabBudget};
    use crate::types::{CostSegAllocation, FilingStatus, LoanType, Rate};

    fn base_assumptions() -> DealAssumptions {
        DealAssumptions {
            purchase_price: Money::from_dollars(dec!(500_000)),
            closing_costs: Money::from_dollars(dec!(5_000)),
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

    fn investor() -> InvestorTaxProfile {
        InvestorTaxProfile {
            filing_status: FilingStatus::Mfj,
            agi: Money::from_dollars(dec!(300_000)),
            marginal_federal_rate: Rate::from_percentage(dec!(32)),
            marginal_state_rate: Rate::ZERO,
            state: "TX".to_string(),
            other_passive_income: Money::ZERO,
            is_re_professional: false,
        }
    }

    #[test]
    fn test_s6_gain_with_recapture_landmarks() {
        let mut a = base_assumptions();
        a.selling_costs_pct = Rate::from_decimal(dec!(36_900) / dec!(615_000));

        let result = compute_disposition(
            &a,
            &investor(),
            Money::from_dollars(dec!(615_000)),
            Money::from_dollars(dec!(375_000)),
            Money::from_dollars(dec!(90_000)),
            Money::ZERO,
        );

        assert_eq!(result.total_gain.as_decimal(), dec!(163_100.00));
        assert_eq!(result.depreciation_recapture.as_decimal(), dec!(90_000.00));
        assert_eq!(result.capital_gain.as_decimal(), dec!(73_100.00));
        assert_eq!(result.recapture_tax.as_decimal(), dec!(22_500.00));
    }

    #[test]
    fn test_s5_loss_on_sale_with_suspended_release() {
        let a = base_assumptions();
        let result = compute_disposition(
            &a,
            &investor(),
            Money::from_dollars(dec!(400_000)),
            Money::from_dollars(dec!(375_000)),
            Money::from_dollars(dec!(90_000)),
            Money::from_dollars(dec!(50_000)),
        );

        assert!(result.total_gain.as_decimal() < dec!(0));
        assert_eq!(result.recapture_tax, Money::ZERO);
        assert_eq!(result.suspended_losses_released.as_decimal(), dec!(50_000));
        assert!(result.tax_benefit_from_release.as_decimal() > dec!(0));
        assert!(
            result.after_tax_sale_proceeds.as_decimal()
                > result.gross_equity_proceeds.as_decimal()
        );
    }

    #[test]
    fn test_gain_with_suspended_losses_fills_recapture_bucket_first() {
        let mut a = base_assumptions();
        a.selling_costs_pct = Rate::from_decimal(dec!(36_900) / dec!(615_000));
        let zero_rate_investor = InvestorTaxProfile {
            filing_status: FilingStatus::Mfj,
            agi: Money::from_dollars(dec!(100_000)),
            marginal_federal_rate: Rate::ZERO,
            marginal_state_rate: Rate::ZERO,
            state: "TX".to_string(),
            other_passive_income: Money::ZERO,
            is_re_professional: false,
        };

        let result = compute_disposition(
            &a,
            &zero_rate_investor,
            Money::from_dollars(dec!(615_000)),
            Money::from_dollars(dec!(375_000)),
            Money::from_dollars(dec!(90_000)),
            Money::from_dollars(dec!(30_000)),
        );

        assert_eq!(result.total_gain.as_decimal(), dec!(163_100.00));
        assert_eq!(result.depreciation_recapture.as_decimal(), dec!(90_000.00));
        // gain_offset (30,000) is entirely within depreciation_recapture
        // (90,000), so it all falls in the recapture bucket: 30,000 * 25%.
        assert_eq!(result.tax_benefit_from_release.as_decimal(), dec!(7_500.00));
        // Disposition always releases every suspended loss, not just the
        // portion absorbed by the gain.
        assert_eq!(result.suspended_losses_released.as_decimal(), dec!(30_000));
    }

    #[test]
    fn test_gain_releases_all_suspended_losses_even_when_gain_is_smaller() {
        let a = base_assumptions();
        let result = compute_disposition(
            &a,
            &investor(),
            Money::from_dollars(dec!(460_000)),
            Money::from_dollars(dec!(375_000)),
            Money::from_dollars(dec!(90_000)),
            Money::from_dollars(dec!(50_000)),
        );

        assert!(result.total_gain.as_decimal() > dec!(0));
        assert!(result.total_gain.as_decimal() < dec!(50_000));
        assert_eq!(result.suspended_losses_released.as_decimal(), dec!(50_000));
    }

    #[test]
    fn test_recapture_plus_capital_gain_equals_total_gain_when_positive() {
        let a = base_assumptions();
        let result = compute_disposition(
            &a,
            &investor(),
            Money::from_dollars(dec!(700_000)),
            Money::from_dollars(dec!(300_000)),
            Money::from_dollars(dec!(50_000)),
            Money::ZERO,
        );
        assert!(result.total_gain.as_decimal() > dec!(0));
        assert_eq!(
            (result.depreciation_recapture + result.capital_gain).as_decimal(),
            result.total_gain.as_decimal()
        );
    }
}
