//! Integration tests for the pro-forma engine.
//!
//! These exercise the full `build_smart_assumptions -> run_proforma`
//! pipeline, plus the individual algorithm entry points for scenarios that
//! don't need a full deal (passive activity, disposition).

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use reia_core::{
    compute_disposition, compute_passive_activity, run_proforma, AnalysisError,
    CostSegAllocation, DealAssumptions, FilingStatus, InvestorTaxProfile, LoanType, Money,
    PropertyType, Rate,
};
use reia_core::types::rehab::{ConditionGrade, RehabBudget};

/// Helper to create the canonical S1 scenario's `DealAssumptions`.
fn create_s1_assumptions(hold_years: u32) -> DealAssumptions {
    DealAssumptions::new(DealAssumptions {
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
        hold_years,
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
    .expect("S1 assumptions should validate")
}

fn ca_high_income_mfj() -> InvestorTaxProfile {
    InvestorTaxProfile {
        filing_status: FilingStatus::Mfj,
        agi: Money::from_dollars(dec!(350_000)),
        marginal_federal_rate: Rate::from_percentage(dec!(35)),
        marginal_state_rate: Rate::from_percentage(dec!(9.3)),
        state: "CA".to_string(),
        other_passive_income: Money::ZERO,
        is_re_professional: false,
    }
}

#[test]
fn s1_canonical_deal_landmarks() {
    let assumptions = create_s1_assumptions(7);
    let result = run_proforma(&assumptions, &ca_high_income_mfj());

    let year_one = &result.projections[0];
    assert_eq!(year_one.gross_rent.as_decimal(), dec!(33_600.00));
    assert_eq!(year_one.effective_gross_income.as_decimal(), dec!(31_920.00));

    let cap_rate = year_one.cap_rate.as_decimal();
    assert!(
        cap_rate >= dec!(0.035) && cap_rate <= dec!(0.045),
        "cap_rate {} out of [0.035, 0.045]",
        cap_rate
    );

    assert!(result.equity_multiple.as_decimal() > dec!(1));
    assert!(result.before_tax_irr.as_decimal() > dec!(0));
    assert!(result.total_depreciation_taken.as_decimal() > dec!(0));

    // high-income MFJ investor with no RE-professional exception: losses
    // eventually get suspended rather than fully deducted.
    assert!(result.total_suspended_losses.as_decimal() > dec!(0));
}

#[test]
fn s2_cost_segregation_turbo_increases_year_one_depreciation_with_bonus() {
    let baseline = run_proforma(&create_s1_assumptions(7), &ca_high_income_mfj());

    let mut turbo = create_s1_assumptions(7);
    turbo.cost_seg = CostSegAllocation {
        five_year_pct: Rate::from_percentage(dec!(20)),
        seven_year_pct: Rate::ZERO,
        fifteen_year_pct: Rate::ZERO,
    };
    let turbo_result = run_proforma(&turbo, &ca_high_income_mfj());

    assert!(
        turbo_result.projections[0].total_depreciation.as_decimal()
            > baseline.projections[0].total_depreciation.as_decimal()
    );

    let year_one_depreciation = reia_core::compute_yearly_depreciation(&turbo, 1, None);
    assert!(year_one_depreciation.bonus.as_decimal() > dec!(0));
}

#[test]
fn s3_low_income_twenty_five_k_exception_fully_deductible() {
    let investor = InvestorTaxProfile {
        filing_status: FilingStatus::Mfj,
        agi: Money::from_dollars(dec!(90_000)),
        marginal_federal_rate: Rate::from_percentage(dec!(22)),
        marginal_state_rate: Rate::ZERO,
        state: "TX".to_string(),
        other_passive_income: Money::ZERO,
        is_re_professional: false,
    };
    let rental_taxable = Money::from_dollars(dec!(-10_000));

    let entry = compute_passive_activity(rental_taxable, &investor, Money::ZERO, 1);

    assert_eq!(entry.deductible_amount.as_decimal(), dec!(-10_000));
    assert_eq!(entry.cumulative_suspended, Money::ZERO);
    assert_eq!(
        entry.tax_benefit.as_decimal(),
        dec!(10_000) * investor.combined_rate().as_decimal()
    );
}

#[test]
fn s4_phase_out_splits_deductible_and_suspended() {
    let investor = InvestorTaxProfile {
        filing_status: FilingStatus::Mfj,
        agi: Money::from_dollars(dec!(120_000)),
        marginal_federal_rate: Rate::from_percentage(dec!(24)),
        marginal_state_rate: Rate::ZERO,
        state: "TX".to_string(),
        other_passive_income: Money::ZERO,
        is_re_professional: false,
    };
    assert_eq!(investor.rental_loss_allowance().as_decimal(), dec!(15_000));

    let rental_taxable = Money::from_dollars(dec!(-20_000));
    let entry = compute_passive_activity(rental_taxable, &investor, Money::ZERO, 1);

    assert_eq!(entry.deductible_amount.as_decimal(), dec!(-15_000));
    assert_eq!(entry.cumulative_suspended.as_decimal(), dec!(5_000));
}

#[test]
fn s5_loss_on_sale_releases_suspended_losses() {
    let assumptions = create_s1_assumptions(7);
    let investor = ca_high_income_mfj();

    let disposition = compute_disposition(
        &assumptions,
        &investor,
        Money::from_dollars(dec!(400_000)),
        Money::from_dollars(dec!(375_000)),
        Money::from_dollars(dec!(90_000)),
        Money::from_dollars(dec!(50_000)),
    );

    assert!(disposition.total_gain.as_decimal() < dec!(0));
    assert_eq!(disposition.recapture_tax, Money::ZERO);
    assert_eq!(disposition.suspended_losses_released.as_decimal(), dec!(50_000));
    assert!(disposition.tax_benefit_from_release.as_decimal() > dec!(0));
    assert!(
        disposition.after_tax_sale_proceeds.as_decimal()
            > disposition.gross_equity_proceeds.as_decimal()
    );
}

#[test]
fn s6_gain_with_recapture_landmarks() {
    let mut assumptions = create_s1_assumptions(7);
    assumptions.purchase_price = Money::from_dollars(dec!(400_000));
    assumptions.closing_costs = Money::from_dollars(dec!(5_000));

    let investor = ca_high_income_mfj();
    let disposition = compute_disposition(
        &assumptions,
        &investor,
        Money::from_dollars(dec!(615_000)),
        Money::from_dollars(dec!(375_000)),
        Money::from_dollars(dec!(90_000)),
        Money::ZERO,
    );

    assert_eq!(disposition.total_gain.as_decimal(), dec!(163_100.00));
    assert_eq!(disposition.depreciation_recapture.as_decimal(), dec!(90_000.00));
    assert_eq!(disposition.capital_gain.as_decimal(), dec!(73_100.00));
    assert_eq!(disposition.recapture_tax.as_decimal(), dec!(22_500.00));
    assert_eq!(
        disposition.depreciation_recapture.as_decimal() + disposition.capital_gain.as_decimal(),
        disposition.total_gain.as_decimal()
    );
}

#[test]
fn hold_years_one_still_produces_a_single_projection_and_a_disposition() {
    let assumptions = create_s1_assumptions(1);
    let result = run_proforma(&assumptions, &ca_high_income_mfj());

    assert_eq!(result.projections.len(), 1);
    assert_eq!(result.projections[0].year, 1);
    assert!(result.disposition.sale_price.as_decimal() > dec!(0));
}

#[test]
fn projections_are_sequentially_numbered() {
    let assumptions = create_s1_assumptions(10);
    let result = run_proforma(&assumptions, &ca_high_income_mfj());

    assert_eq!(result.projections.len(), 10);
    for (i, projection) in result.projections.iter().enumerate() {
        assert_eq!(projection.year, (i + 1) as u32);
    }
}

#[test]
fn determinism_same_inputs_yield_identical_results() {
    let assumptions = create_s1_assumptions(7);
    let investor = ca_high_income_mfj();

    let first = run_proforma(&assumptions, &investor);
    let second = run_proforma(&assumptions, &investor);

    assert_eq!(first, second);
}

#[test]
fn missing_purchase_price_input_fails_with_missing_inputs() {
    let mut assumptions_fields = create_s1_assumptions(7);
    assumptions_fields.purchase_price = Money::ZERO;
    // DealAssumptions::new doesn't itself reject a zero purchase price (that
    // guard lives in the assumption builder); this test instead exercises
    // the builder's error path directly.
    let property = reia_core::PropertyDetail {
        beds: 3,
        baths: dec!(2),
        sqft: 1600,
        year_built: 1998,
        lot_sqft: None,
        property_type: PropertyType::Sfr,
        estimated_value: None,
        last_sale_price: None,
        assessed_value: None,
        annual_tax: None,
        estimated_rent: None,
        rental_comps: vec![],
        sale_comps: vec![],
    };

    let result = reia_core::build_smart_assumptions(
        &property,
        None,
        &Default::default(),
        None,
        "CA",
        &Default::default(),
    );

    assert!(matches!(result, Err(AnalysisError::MissingInputs { .. })));
}

#[test]
fn irr_of_symmetric_flows_matches_the_ten_percent_bracket() {
    let flows: Vec<Decimal> = vec![dec!(-100), dec!(110)];
    let irr = reia_core::compute_irr(&flows);
    assert!((irr - dec!(0.10)).abs() < dec!(0.001));
}

#[test]
fn irr_of_all_negative_flows_is_zero() {
    let flows: Vec<Decimal> = vec![dec!(-100), dec!(-50)];
    let irr = reia_core::compute_irr(&flows);
    assert_eq!(irr, dec!(0));
}
