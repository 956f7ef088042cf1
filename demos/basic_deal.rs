//! Basic Deal Example
//!
//! Demonstrates how to use reia-core to resolve a full set of deal
//! assumptions from partial property/market data and run a multi-year
//! pro-forma analysis.
//!
//! Run with: `cargo run --example basic_deal`

use rust_decimal_macros::dec;
use reia_core::prelude::*;
use reia_core::{
    FilingStatus, MacroContext, NeighborhoodReport, PropertyDetail, PropertyType, RentEstimate,
    TierConfidence, TierName, TierResult, UserOverrides,
};

fn main() {
    println!("=== reia-core Basic Deal Example ===\n");

    let property = PropertyDetail {
        beds: 3,
        baths: dec!(2),
        sqft: 1_650,
        year_built: 2005,
        lot_sqft: Some(5_500),
        property_type: PropertyType::Sfr,
        estimated_value: Some(Money::from_dollars(dec!(500_000))),
        last_sale_price: Some(Money::from_dollars(dec!(470_000))),
        assessed_value: Some(Money::from_dollars(dec!(440_000))),
        annual_tax: Some(Money::from_dollars(dec!(6_000))),
        estimated_rent: None,
        rental_comps: vec![],
        sale_comps: vec![],
    };

    let neighborhood = NeighborhoodReport {
        grade: Some("B".to_string()),
        grade_score: Some(dec!(72)),
        walk_score: Some(dec!(68)),
        ..Default::default()
    };

    let macro_ctx = MacroContext {
        mortgage_rate_30y: Some(dec!(0.07)),
        cpi_5yr_cagr: Some(dec!(0.032)),
        ..Default::default()
    };

    let rent_estimate = RentEstimate {
        address: "123 Main St".to_string(),
        estimated_rent: Money::from_dollars(dec!(2_800)),
        confidence: TierConfidence::High,
        confidence_score: dec!(0.82),
        needs_review: false,
        tier_results: vec![TierResult {
            tier: TierName::RentCast,
            estimate: Some(Money::from_dollars(dec!(2_800))),
            confidence: TierConfidence::High,
            reasoning: "3 comparable rentals within 0.5mi".to_string(),
        }],
        recommended_range: (
            Money::from_dollars(dec!(2_650)),
            Money::from_dollars(dec!(2_950)),
        ),
    };

    println!("Property: {} bed / {} bath, {} sqft, built {}", property.beds, property.baths, property.sqft, property.year_built);
    println!("Neighborhood grade: {}", neighborhood.grade.as_deref().unwrap_or("unknown"));
    println!();

    println!("Resolving assumptions...");
    let (assumptions, manifest) = match build_smart_assumptions(
        &property,
        Some(&neighborhood),
        &macro_ctx,
        Some(&rent_estimate),
        "CA",
        &UserOverrides::default(),
    ) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Could not resolve assumptions: {}", e);
            std::process::exit(1);
        }
    };

    println!("\n=== Resolved Assumptions ===\n");
    println!("  Purchase Price: ${}", assumptions.purchase_price.as_decimal());
    println!("  LTV: {}%", assumptions.ltv.as_percentage());
    println!("  Interest Rate: {}%", assumptions.interest_rate.as_percentage());
    println!("  Monthly Rent: ${}", assumptions.monthly_rent.as_decimal());
    println!("  Hold Period: {} years", assumptions.hold_years);
    println!("  Manifest complete: {}", manifest.is_complete());
    println!();

    let investor = InvestorTaxProfile {
        filing_status: FilingStatus::Mfj,
        agi: Money::from_dollars(dec!(250_000)),
        marginal_federal_rate: Rate::from_percentage(dec!(32)),
        marginal_state_rate: Rate::from_percentage(dec!(9.3)),
        state: "CA".to_string(),
        other_passive_income: Money::ZERO,
        is_re_professional: false,
    };

    println!("Running pro-forma analysis...");
    let result = run_proforma(&assumptions, &investor);

    println!("\n=== Pro-Forma Results ===\n");
    println!("Year 1:");
    let year_one = &result.projections[0];
    println!("  Gross Rent: ${}", year_one.gross_rent.as_decimal());
    println!("  Effective Gross Income: ${}", year_one.effective_gross_income.as_decimal());
    println!("  NOI: ${}", year_one.noi.as_decimal());
    println!("  Cash Flow Before Tax: ${}", year_one.cash_flow_before_tax.as_decimal());
    println!("  Cash Flow After Tax: ${}", year_one.cash_flow_after_tax.as_decimal());
    println!("  Cap Rate: {:.2}%", year_one.cap_rate.as_decimal() * dec!(100));
    println!("  Cash-on-Cash: {:.2}%", year_one.cash_on_cash.as_decimal() * dec!(100));
    println!();

    println!("Disposition (year {}):", assumptions.hold_years);
    println!("  Sale Price: ${}", result.disposition.sale_price.as_decimal());
    println!("  Total Gain: ${}", result.disposition.total_gain.as_decimal());
    println!("  Depreciation Recapture: ${}", result.disposition.depreciation_recapture.as_decimal());
    println!("  Capital Gain: ${}", result.disposition.capital_gain.as_decimal());
    println!("  After-Tax Sale Proceeds: ${}", result.disposition.after_tax_sale_proceeds.as_decimal());
    println!();

    println!("Summary:");
    println!("  Before-Tax IRR: {:.2}%", result.before_tax_irr.as_decimal() * dec!(100));
    println!("  After-Tax IRR: {:.2}%", result.after_tax_irr.as_decimal() * dec!(100));
    println!("  Equity Multiple: {:.2}x", result.equity_multiple.as_decimal());
    println!("  Average Cash-on-Cash: {:.2}%", result.average_cash_on_cash.as_decimal() * dec!(100));
    println!("  Total Depreciation Taken: ${}", result.total_depreciation_taken.as_decimal());
    println!("  Total Suspended Losses: ${}", result.total_suspended_losses.as_decimal());
    println!("  Total Profit: ${}", result.total_profit.as_decimal());
}
