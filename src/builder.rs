//! The assumption builder: resolves a full `DealAssumptions` from whatever
//! external data is available, recording override/estimate/default
//! provenance for every field along the way (§4.14).

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::algorithms::{
    amortization, estimate_insurance, estimate_maintenance_pct, estimate_rehab_budget,
    price_conventional_loan, price_dscr_loan, CreditTier,
};
use crate::types::external::{MacroContext, NeighborhoodReport, RentEstimate};
use crate::types::manifest::{AssumptionDetail, AssumptionManifest, AssumptionSource, Confidence, FieldName};
use crate::types::rehab::{ConditionGrade, RehabBudget};
use crate::types::{
    AnalysisError, AnalysisOutcome, CostSegAllocation, DealAssumptions, LoanType, Money,
    PropertyDetail, PropertyType, Rate,
};

const CPI_FALLBACK: Decimal = dec!(0.030);

/// Caller-supplied overrides, one optional value per `DealAssumptions`
/// scalar field plus the two inputs the builder can't derive from anywhere
/// else (the cost-seg split and the placed-in-service date).
#[derive(Debug, Clone, Default)]
pub struct UserOverrides {
    pub purchase_price: Option<Money>,
    pub closing_costs: Option<Money>,
    pub land_value_pct: Option<Rate>,
    pub ltv: Option<Rate>,
    pub interest_rate: Option<Rate>,
    pub loan_term_years: Option<u32>,
    pub loan_points: Option<Rate>,
    pub loan_type: Option<LoanType>,
    pub credit_tier: Option<CreditTier>,
    pub monthly_rent: Option<Money>,
    pub annual_rent_growth: Option<Rate>,
    pub vacancy_rate: Option<Rate>,
    pub other_income: Option<Money>,
    pub property_tax: Option<Money>,
    pub insurance: Option<Money>,
    pub maintenance_pct: Option<Rate>,
    pub management_pct: Option<Rate>,
    pub capex_reserve_pct: Option<Rate>,
    pub hoa: Option<Money>,
    pub annual_appreciation: Option<Rate>,
    pub hold_years: Option<u32>,
    pub selling_costs_pct: Option<Rate>,
    pub annual_expense_growth: Option<Rate>,
    pub rehab_budget: Option<RehabBudget>,
    pub cost_seg: Option<CostSegAllocation>,
    pub placed_in_service_year: Option<u32>,
    pub placed_in_service_month: Option<u32>,
}

/// `purchase_price * pct` by state, 2.0%-4.0% range, 2.5% default. Rough
/// regional banding of title/recording/attorney customs; not a substitute
/// for a real closing-cost quote.
fn closing_cost_pct(state: &str) -> Decimal {
    match state.to_uppercase().as_str() {
        "NY" | "DE" | "PA" => dec!(0.040),
        "NJ" | "DC" | "MD" | "VT" => dec!(0.035),
        "CA" | "IL" | "OH" | "FL" => dec!(0.030),
        "WA" | "OR" | "CO" | "NM" | "WY" | "MO" => dec!(0.020),
        _ => dec!(0.025),
    }
}

fn rent_growth_grade_premium(grade: Option<&str>) -> Decimal {
    match grade {
        Some("A") => dec!(0.005),
        Some("B") => dec!(0.003),
        Some("C") => dec!(0),
        Some("D") => dec!(-0.005),
        Some("F") => dec!(-0.010),
        _ => dec!(0),
    }
}

fn property_age(property: &PropertyDetail, as_of_year: u32) -> u32 {
    as_of_year.saturating_sub(property.year_built as u32)
}

/// Builds a complete `DealAssumptions` plus its `AssumptionManifest` from
/// whatever external data is available, per the override → estimate →
/// default pipeline described in the crate's assumption-resolution design.
/// Fails only when `purchase_price` can't be resolved from an override,
/// `estimated_value`, or `last_sale_price`.
pub fn build_smart_assumptions(
    property: &PropertyDetail,
    neighborhood: Option<&NeighborhoodReport>,
    macro_ctx: &MacroContext,
    rent_estimate: Option<&RentEstimate>,
    state: &str,
    overrides: &UserOverrides,
) -> AnalysisOutcome<(DealAssumptions, AssumptionManifest)> {
    let mut manifest = AssumptionManifest::new();
    let neighborhood_default = NeighborhoodReport::default();
    let neighborhood = neighborhood.unwrap_or(&neighborhood_default);

    let purchase_price = resolve_purchase_price(property, overrides, &mut manifest)?;
    let closing_costs = resolve_closing_costs(purchase_price, state, overrides, &mut manifest);
    let land_value_pct = resolve_land_value_pct(overrides, &mut manifest);

    let monthly_rent = resolve_monthly_rent(property, rent_estimate, overrides, &mut manifest);
    let (ltv, interest_rate, loan_term_years, loan_points, loan_type) =
        resolve_loan_terms(purchase_price, monthly_rent, macro_ctx, overrides, &mut manifest);

    let annual_rent_growth =
        resolve_annual_rent_growth(neighborhood, macro_ctx, overrides, &mut manifest);
    let vacancy_rate = resolve_vacancy_rate(neighborhood, overrides, &mut manifest);
    let other_income = resolve_other_income(overrides, &mut manifest);

    let property_tax = resolve_property_tax(property, purchase_price, overrides, &mut manifest);
    let insurance = resolve_insurance(
        property,
        purchase_price,
        neighborhood,
        overrides,
        &mut manifest,
    );

    let rehab_budget = resolve_rehab_budget(property, overrides, &mut manifest);
    let maintenance_pct = resolve_maintenance_pct(property, neighborhood, overrides, &mut manifest);
    let management_pct = resolve_management_pct(property, overrides, &mut manifest);
    let capex_reserve_pct = resolve_default_rate(
        overrides.capex_reserve_pct,
        FieldName::CapexReservePct,
        dec!(0.05),
        &mut manifest,
    );
    let hoa = resolve_hoa(property, overrides, &mut manifest);

    let annual_appreciation =
        resolve_annual_appreciation(neighborhood, macro_ctx, overrides, &mut manifest);
    let hold_years = resolve_hold_years(overrides, &mut manifest);
    let selling_costs_pct = resolve_default_rate(
        overrides.selling_costs_pct,
        FieldName::SellingCostsPct,
        dec!(0.06),
        &mut manifest,
    );
    let annual_expense_growth =
        resolve_annual_expense_growth(macro_ctx, overrides, &mut manifest);

    resolve_loan_type_sentinel(loan_type, &mut manifest);

    let cost_seg = resolve_cost_seg(overrides, &mut manifest);
    let placed_in_service_year = resolve_placed_in_service_year(overrides, &mut manifest);
    let placed_in_service_month = resolve_placed_in_service_month(overrides, &mut manifest);

    let assumptions = DealAssumptions::new(DealAssumptions {
        purchase_price,
        closing_costs,
        land_value_pct,
        ltv,
        interest_rate,
        loan_term_years,
        loan_points,
        loan_type,
        monthly_rent,
        annual_rent_growth,
        vacancy_rate,
        other_income,
        property_tax,
        insurance,
        maintenance_pct,
        management_pct,
        capex_reserve_pct,
        hoa,
        annual_appreciation,
        hold_years,
        selling_costs_pct,
        cost_seg,
        placed_in_service_year,
        placed_in_service_month,
        annual_expense_growth,
        rehab_budget,
    })?;

    Ok((assumptions, manifest))
}

fn resolve_purchase_price(
    property: &PropertyDetail,
    overrides: &UserOverrides,
    manifest: &mut AssumptionManifest,
) -> AnalysisOutcome<Money> {
    if let Some(v) = overrides.purchase_price {
        manifest.insert(AssumptionDetail::new(
            FieldName::PurchasePrice,
            v.as_decimal().to_string(),
            AssumptionSource::UserOverride,
            Confidence::High,
            "user-supplied purchase price",
        ));
        return Ok(v);
    }
    if let Some(v) = property.estimated_value {
        manifest.insert(AssumptionDetail::new(
            FieldName::PurchasePrice,
            v.as_decimal().to_string(),
            AssumptionSource::Estimated,
            Confidence::Medium,
            "from the resolved AVM estimated value",
        ));
        return Ok(v);
    }
    if let Some(v) = property.last_sale_price {
        manifest.insert(AssumptionDetail::new(
            FieldName::PurchasePrice,
            v.as_decimal().to_string(),
            AssumptionSource::Estimated,
            Confidence::Low,
            "from the last recorded sale price",
        ));
        return Ok(v);
    }
    Err(AnalysisError::missing_inputs(
        "purchase_price",
        "no override, estimated_value, or last_sale_price available",
    ))
}

fn resolve_closing_costs(
    purchase_price: Money,
    state: &str,
    overrides: &UserOverrides,
    manifest: &mut AssumptionManifest,
) -> Money {
    if let Some(v) = overrides.closing_costs {
        manifest.insert(AssumptionDetail::new(
            FieldName::ClosingCosts,
            v.as_decimal().to_string(),
            AssumptionSource::UserOverride,
            Confidence::High,
            "user-supplied closing costs",
        ));
        return v;
    }
    let pct = closing_cost_pct(state);
    let value = (purchase_price * pct).round_cents();
    manifest.insert(
        AssumptionDetail::new(
            FieldName::ClosingCosts,
            value.as_decimal().to_string(),
            AssumptionSource::Estimated,
            Confidence::Medium,
            format!("{:.1}% state closing-cost estimate for {}", pct * dec!(100), state),
        )
        .with_data_point("pct", pct.to_string()),
    );
    value
}

fn resolve_land_value_pct(
    overrides: &UserOverrides,
    manifest: &mut AssumptionManifest,
) -> Rate {
    resolve_default_rate(
        overrides.land_value_pct,
        FieldName::LandValuePct,
        dec!(0.20),
        manifest,
    )
}

fn resolve_monthly_rent(
    property: &PropertyDetail,
    rent_estimate: Option<&RentEstimate>,
    overrides: &UserOverrides,
    manifest: &mut AssumptionManifest,
) -> Money {
    if let Some(v) = overrides.monthly_rent {
        manifest.insert(AssumptionDetail::new(
            FieldName::MonthlyRent,
            v.as_decimal().to_string(),
            AssumptionSource::UserOverride,
            Confidence::High,
            "user-supplied monthly rent",
        ));
        return v;
    }
    if let Some(estimate) = rent_estimate {
        if !estimate.estimated_rent.is_zero() {
            let confidence = match estimate.confidence {
                crate::types::TierConfidence::High => Confidence::High,
                crate::types::TierConfidence::Med => Confidence::Medium,
                crate::types::TierConfidence::Low => Confidence::Low,
            };
            manifest.insert(AssumptionDetail::new(
                FieldName::MonthlyRent,
                estimate.estimated_rent.as_decimal().to_string(),
                AssumptionSource::Estimated,
                confidence,
                "blended tiered rent estimate",
            ));
            return estimate.estimated_rent;
        }
    }
    if let Some(v) = property.estimated_rent {
        manifest.insert(AssumptionDetail::new(
            FieldName::MonthlyRent,
            v.as_decimal().to_string(),
            AssumptionSource::Estimated,
            Confidence::Low,
            "from the property record's listed rent estimate",
        ));
        return v;
    }
    manifest.insert(AssumptionDetail::new(
        FieldName::MonthlyRent,
        0,
        AssumptionSource::Default,
        Confidence::Low,
        "no rent data available, defaulted to zero",
    ));
    Money::ZERO
}

#[allow(clippy::too_many_arguments)]
fn resolve_loan_terms(
    purchase_price: Money,
    monthly_rent: Money,
    macro_ctx: &MacroContext,
    overrides: &UserOverrides,
    manifest: &mut AssumptionManifest,
) -> (Rate, Rate, u32, Rate, LoanType) {
    let loan_type = overrides.loan_type.unwrap_or(LoanType::Conventional);
    let credit_tier = overrides.credit_tier.unwrap_or(CreditTier::Good);

    let quote = match loan_type {
        LoanType::Conventional => price_conventional_loan(macro_ctx.mortgage_rate_30y, credit_tier),
        LoanType::Dscr => {
            let conventional = price_conventional_loan(macro_ctx.mortgage_rate_30y, credit_tier);
            let rough_loan_amount = purchase_price * conventional.ltv.as_decimal();
            let rough_payment = amortization::calculate_payment(
                rough_loan_amount.as_decimal(),
                conventional.interest_rate.as_decimal(),
                conventional.term_years,
            );
            let rough_annual_debt_service = rough_payment * dec!(12);
            let rough_annual_noi = (monthly_rent.as_decimal() * dec!(12) * dec!(0.65)).max(dec!(0));
            let rough_dscr = if rough_annual_debt_service.is_zero() {
                dec!(0)
            } else {
                rough_annual_noi / rough_annual_debt_service
            };
            price_dscr_loan(macro_ctx.mortgage_rate_30y, rough_dscr)
        }
    };

    let ltv = overrides.ltv.unwrap_or(quote.ltv);
    let interest_rate = overrides.interest_rate.unwrap_or(quote.interest_rate);
    let loan_term_years = overrides.loan_term_years.unwrap_or(quote.term_years);
    let loan_points = overrides.loan_points.unwrap_or(quote.points);

    let override_any = overrides.ltv.is_some()
        || overrides.interest_rate.is_some()
        || overrides.loan_term_years.is_some()
        || overrides.loan_points.is_some();
    let (source, confidence) = if override_any {
        (AssumptionSource::UserOverride, Confidence::High)
    } else {
        (AssumptionSource::Estimated, Confidence::Medium)
    };

    manifest.insert(AssumptionDetail::new(
        FieldName::Ltv,
        ltv.as_percentage().to_string(),
        source,
        confidence,
        quote.rate_source.clone(),
    ));
    manifest.insert(AssumptionDetail::new(
        FieldName::InterestRate,
        interest_rate.as_percentage().to_string(),
        source,
        confidence,
        quote.rate_source.clone(),
    ));
    manifest.insert(AssumptionDetail::new(
        FieldName::LoanTermYears,
        loan_term_years,
        source,
        confidence,
        "priced alongside the loan's rate and LTV",
    ));
    manifest.insert(AssumptionDetail::new(
        FieldName::LoanPoints,
        loan_points.as_percentage().to_string(),
        source,
        confidence,
        "priced alongside the loan's rate and LTV",
    ));

    (ltv, interest_rate, loan_term_years, loan_points, loan_type)
}

fn resolve_loan_type_sentinel(loan_type: LoanType, manifest: &mut AssumptionManifest) {
    manifest.insert(AssumptionDetail::new(
        FieldName::LoanType,
        loan_type.to_string(),
        AssumptionSource::Estimated,
        Confidence::Medium,
        "loan product family chosen alongside its pricing",
    ));
}

fn resolve_annual_rent_growth(
    neighborhood: &NeighborhoodReport,
    macro_ctx: &MacroContext,
    overrides: &UserOverrides,
    manifest: &mut AssumptionManifest,
) -> Rate {
    if let Some(v) = overrides.annual_rent_growth {
        manifest.insert(AssumptionDetail::new(
            FieldName::AnnualRentGrowth,
            v.as_decimal().to_string(),
            AssumptionSource::UserOverride,
            Confidence::High,
            "user-supplied rent growth",
        ));
        return v;
    }
    let cpi = macro_ctx.cpi_5yr_cagr.unwrap_or(CPI_FALLBACK);
    let grade_premium = rent_growth_grade_premium(neighborhood.grade.as_deref());
    let composite = dec!(0.5) * cpi + grade_premium + dec!(0.2) * cpi;
    let rate = Rate::from_decimal(composite).clamp(
        Rate::from_decimal(dec!(0.01)),
        Rate::from_decimal(dec!(0.06)),
    );
    manifest.insert(AssumptionDetail::new(
        FieldName::AnnualRentGrowth,
        rate.as_decimal().to_string(),
        AssumptionSource::Estimated,
        Confidence::Medium,
        "0.7 x CPI 5yr CAGR plus neighborhood grade premium, clamped [1%, 6%]",
    ));
    rate
}

fn resolve_vacancy_rate(
    neighborhood: &NeighborhoodReport,
    overrides: &UserOverrides,
    manifest: &mut AssumptionManifest,
) -> Rate {
    if let Some(v) = overrides.vacancy_rate {
        manifest.insert(AssumptionDetail::new(
            FieldName::VacancyRate,
            v.as_decimal().to_string(),
            AssumptionSource::UserOverride,
            Confidence::High,
            "user-supplied vacancy rate",
        ));
        return v;
    }
    let (pct, source, confidence, justification) = match neighborhood.demographics.renter_pct {
        Some(p) if p > dec!(0.60) => (
            dec!(0.04),
            AssumptionSource::Estimated,
            Confidence::Medium,
            "renter_pct > 60%",
        ),
        Some(p) if p > dec!(0.40) => (
            dec!(0.05),
            AssumptionSource::Estimated,
            Confidence::Medium,
            "renter_pct > 40%",
        ),
        Some(p) if p > dec!(0.20) => (
            dec!(0.06),
            AssumptionSource::Estimated,
            Confidence::Medium,
            "renter_pct > 20%",
        ),
        Some(_) => (
            dec!(0.08),
            AssumptionSource::Estimated,
            Confidence::Medium,
            "renter_pct <= 20%",
        ),
        None => (
            dec!(0.05),
            AssumptionSource::Default,
            Confidence::Low,
            "no renter_pct data, defaulted to 5%",
        ),
    };
    let rate = Rate::from_decimal(pct);
    manifest.insert(AssumptionDetail::new(
        FieldName::VacancyRate,
        rate.as_decimal().to_string(),
        source,
        confidence,
        justification,
    ));
    rate
}

fn resolve_other_income(overrides: &UserOverrides, manifest: &mut AssumptionManifest) -> Money {
    let value = overrides.other_income.unwrap_or(Money::ZERO);
    let (source, confidence) = if overrides.other_income.is_some() {
        (AssumptionSource::UserOverride, Confidence::High)
    } else {
        (AssumptionSource::Default, Confidence::Low)
    };
    manifest.insert(AssumptionDetail::new(
        FieldName::OtherIncome,
        value.as_decimal().to_string(),
        source,
        confidence,
        "no other income source specified, defaulted to zero",
    ));
    value
}

fn resolve_property_tax(
    property: &PropertyDetail,
    purchase_price: Money,
    overrides: &UserOverrides,
    manifest: &mut AssumptionManifest,
) -> Money {
    if let Some(v) = overrides.property_tax {
        manifest.insert(AssumptionDetail::new(
            FieldName::PropertyTax,
            v.as_decimal().to_string(),
            AssumptionSource::UserOverride,
            Confidence::High,
            "user-supplied property tax",
        ));
        return v;
    }
    if let Some(v) = property.annual_tax {
        if !v.is_zero() {
            manifest.insert(AssumptionDetail::new(
                FieldName::PropertyTax,
                v.as_decimal().to_string(),
                AssumptionSource::Estimated,
                Confidence::High,
                "from the resolved annual tax record",
            ));
            return v;
        }
    }
    let value = (purchase_price * dec!(0.01)).round_cents();
    manifest.insert(AssumptionDetail::new(
        FieldName::PropertyTax,
        value.as_decimal().to_string(),
        AssumptionSource::Default,
        Confidence::Low,
        "no tax record available, defaulted to 1% of purchase price",
    ));
    value
}

fn resolve_insurance(
    property: &PropertyDetail,
    purchase_price: Money,
    neighborhood: &NeighborhoodReport,
    overrides: &UserOverrides,
    manifest: &mut AssumptionManifest,
) -> Money {
    if let Some(v) = overrides.insurance {
        manifest.insert(AssumptionDetail::new(
            FieldName::Insurance,
            v.as_decimal().to_string(),
            AssumptionSource::UserOverride,
            Confidence::High,
            "user-supplied insurance premium",
        ));
        return v;
    }
    let estimate = estimate_insurance(
        purchase_price,
        property.property_type,
        property.year_built as u32,
        neighborhood,
    );
    let confidence = if estimate.low_confidence {
        Confidence::Low
    } else {
        Confidence::Medium
    };
    let justification = if estimate.justification.is_empty() {
        "base hazard-composite rate, no active surcharges".to_string()
    } else {
        format!("hazard composite: {}", estimate.justification.join(", "))
    };
    manifest.insert(AssumptionDetail::new(
        FieldName::Insurance,
        estimate.annual_premium.as_decimal().to_string(),
        AssumptionSource::Estimated,
        confidence,
        justification,
    ));
    estimate.annual_premium
}

fn resolve_rehab_budget(
    property: &PropertyDetail,
    overrides: &UserOverrides,
    manifest: &mut AssumptionManifest,
) -> RehabBudget {
    if let Some(budget) = &overrides.rehab_budget {
        manifest.insert(AssumptionDetail::new(
            FieldName::RehabBudget,
            budget.total_cost().as_decimal().to_string(),
            AssumptionSource::UserOverride,
            Confidence::High,
            "user-supplied rehab budget",
        ));
        return budget.clone();
    }
    let budget = estimate_rehab_budget(property.sqft, property.year_built as u32, ConditionGrade::Turnkey, None, &[], None);
    manifest.insert(AssumptionDetail::new(
        FieldName::RehabBudget,
        budget.total_cost().as_decimal().to_string(),
        AssumptionSource::Default,
        Confidence::Low,
        "no condition assessment available, defaulted to turnkey (no rehab)",
    ));
    budget
}

fn resolve_maintenance_pct(
    property: &PropertyDetail,
    neighborhood: &NeighborhoodReport,
    overrides: &UserOverrides,
    manifest: &mut AssumptionManifest,
) -> Rate {
    if let Some(v) = overrides.maintenance_pct {
        manifest.insert(AssumptionDetail::new(
            FieldName::MaintenancePct,
            v.as_decimal().to_string(),
            AssumptionSource::UserOverride,
            Confidence::High,
            "user-supplied maintenance percentage",
        ));
        return v;
    }
    let age = property_age(property, 2025);
    let rate = estimate_maintenance_pct(
        age,
        ConditionGrade::Turnkey,
        neighborhood.climate_zone,
        neighborhood.demographics.renter_pct,
    );
    manifest.insert(AssumptionDetail::new(
        FieldName::MaintenancePct,
        rate.as_decimal().to_string(),
        AssumptionSource::Estimated,
        Confidence::Medium,
        format!("age-based model for a {}-year-old property", age),
    ));
    rate
}

fn resolve_management_pct(
    property: &PropertyDetail,
    overrides: &UserOverrides,
    manifest: &mut AssumptionManifest,
) -> Rate {
    if let Some(v) = overrides.management_pct {
        manifest.insert(AssumptionDetail::new(
            FieldName::ManagementPct,
            v.as_decimal().to_string(),
            AssumptionSource::UserOverride,
            Confidence::High,
            "user-supplied management percentage",
        ));
        return v;
    }
    let pct = if property.property_type == PropertyType::MultiFamily {
        dec!(0.06)
    } else {
        dec!(0.08)
    };
    let rate = Rate::from_decimal(pct);
    manifest.insert(AssumptionDetail::new(
        FieldName::ManagementPct,
        rate.as_decimal().to_string(),
        AssumptionSource::Default,
        Confidence::Low,
        "default management fee by property type",
    ));
    rate
}

fn resolve_hoa(
    property: &PropertyDetail,
    overrides: &UserOverrides,
    manifest: &mut AssumptionManifest,
) -> Money {
    if let Some(v) = overrides.hoa {
        manifest.insert(AssumptionDetail::new(
            FieldName::Hoa,
            v.as_decimal().to_string(),
            AssumptionSource::UserOverride,
            Confidence::High,
            "user-supplied HOA dues",
        ));
        return v;
    }
    let value = match property.property_type {
        PropertyType::Condo | PropertyType::Townhouse => Money::from_dollars(dec!(250)),
        _ => Money::ZERO,
    };
    manifest.insert(AssumptionDetail::new(
        FieldName::Hoa,
        value.as_decimal().to_string(),
        AssumptionSource::Default,
        Confidence::Low,
        "default monthly HOA by property type",
    ));
    value
}

fn resolve_annual_appreciation(
    neighborhood: &NeighborhoodReport,
    macro_ctx: &MacroContext,
    overrides: &UserOverrides,
    manifest: &mut AssumptionManifest,
) -> Rate {
    if let Some(v) = overrides.annual_appreciation {
        manifest.insert(AssumptionDetail::new(
            FieldName::AnnualAppreciation,
            v.as_decimal().to_string(),
            AssumptionSource::UserOverride,
            Confidence::High,
            "user-supplied appreciation rate",
        ));
        return v;
    }
    let rate = crate::algorithms::estimate_appreciation(
        neighborhood.grade.as_deref(),
        macro_ctx.cpi_5yr_cagr,
        neighborhood.walk_score,
    );
    manifest.insert(AssumptionDetail::new(
        FieldName::AnnualAppreciation,
        rate.as_decimal().to_string(),
        AssumptionSource::Estimated,
        Confidence::Medium,
        "grade/CPI/walkability composite",
    ));
    rate
}

fn resolve_hold_years(overrides: &UserOverrides, manifest: &mut AssumptionManifest) -> u32 {
    let value = overrides.hold_years.unwrap_or(7);
    let (source, confidence) = if overrides.hold_years.is_some() {
        (AssumptionSource::UserOverride, Confidence::High)
    } else {
        (AssumptionSource::Default, Confidence::Low)
    };
    manifest.insert(AssumptionDetail::new(
        FieldName::HoldYears,
        value,
        source,
        confidence,
        "default 7-year hold period",
    ));
    value
}

fn resolve_annual_expense_growth(
    macro_ctx: &MacroContext,
    overrides: &UserOverrides,
    manifest: &mut AssumptionManifest,
) -> Rate {
    if let Some(v) = overrides.annual_expense_growth {
        manifest.insert(AssumptionDetail::new(
            FieldName::AnnualExpenseGrowth,
            v.as_decimal().to_string(),
            AssumptionSource::UserOverride,
            Confidence::High,
            "user-supplied expense growth",
        ));
        return v;
    }
    match macro_ctx.cpi_5yr_cagr {
        Some(cpi) => {
            let rate = Rate::from_decimal(cpi);
            manifest.insert(AssumptionDetail::new(
                FieldName::AnnualExpenseGrowth,
                rate.as_decimal().to_string(),
                AssumptionSource::Estimated,
                Confidence::Medium,
                "CPI 5yr CAGR",
            ));
            rate
        }
        None => {
            let rate = Rate::from_decimal(dec!(0.02));
            manifest.insert(AssumptionDetail::new(
                FieldName::AnnualExpenseGrowth,
                rate.as_decimal().to_string(),
                AssumptionSource::Default,
                Confidence::Low,
                "no CPI data, defaulted to 2%",
            ));
            rate
        }
    }
}

fn resolve_cost_seg(
    overrides: &UserOverrides,
    manifest: &mut AssumptionManifest,
) -> CostSegAllocation {
    if let Some(v) = overrides.cost_seg {
        manifest.insert(AssumptionDetail::new(
            FieldName::CostSeg,
            format!(
                "5yr:{},7yr:{},15yr:{}",
                v.five_year_pct.as_decimal(),
                v.seven_year_pct.as_decimal(),
                v.fifteen_year_pct.as_decimal()
            ),
            AssumptionSource::UserOverride,
            Confidence::High,
            "user-supplied cost segregation split",
        ));
        return v;
    }
    let value = CostSegAllocation::NONE;
    manifest.insert(AssumptionDetail::new(
        FieldName::CostSeg,
        "5yr:0,7yr:0,15yr:0".to_string(),
        AssumptionSource::Default,
        Confidence::Low,
        "no cost segregation study available, defaulted to straight residential depreciation",
    ));
    value
}

fn resolve_placed_in_service_year(
    overrides: &UserOverrides,
    manifest: &mut AssumptionManifest,
) -> u32 {
    let value = overrides.placed_in_service_year.unwrap_or(2025);
    let (source, confidence) = if overrides.placed_in_service_year.is_some() {
        (AssumptionSource::UserOverride, Confidence::High)
    } else {
        (AssumptionSource::Default, Confidence::Low)
    };
    manifest.insert(AssumptionDetail::new(
        FieldName::PlacedInServiceYear,
        value,
        source,
        confidence,
        "default placed-in-service year",
    ));
    value
}

fn resolve_placed_in_service_month(
    overrides: &UserOverrides,
    manifest: &mut AssumptionManifest,
) -> u32 {
    let value = overrides.placed_in_service_month.unwrap_or(1);
    let (source, confidence) = if overrides.placed_in_service_month.is_some() {
        (AssumptionSource::UserOverride, Confidence::High)
    } else {
        (AssumptionSource::Default, Confidence::Low)
    };
    manifest.insert(AssumptionDetail::new(
        FieldName::PlacedInServiceMonth,
        value,
        source,
        confidence,
        "default placed-in-service month (January)",
    ));
    value
}

fn resolve_default_rate(
    override_value: Option<Rate>,
    field: FieldName,
    default: Decimal,
    manifest: &mut AssumptionManifest,
) -> Rate {
    if let Some(v) = override_value {
        manifest.insert(AssumptionDetail::new(
            field,
            v.as_decimal().to_string(),
            AssumptionSource::UserOverride,
            Confidence::High,
            format!("user-supplied {}", field),
        ));
        return v;
    }
    let rate = Rate::from_decimal(default);
    manifest.insert(AssumptionDetail::new(
        field,
        rate.as_decimal().to_string(),
        AssumptionSource::Default,
        Confidence::Low,
        format!("hard-coded default for {}", field),
    ));
    rate
}
