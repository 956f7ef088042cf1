//! `DealAssumptions` — the full, resolved input to the pro-forma runner.

use super::money::{Money, Rate};
use super::rehab::RehabBudget;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::types::{AnalysisError, AnalysisOutcome};

/// Fractions of depreciable basis reclassified into shorter MACRS classes
/// via cost segregation. The remainder stays on the 27.5-year residential
/// schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostSegAllocation {
    pub five_year_pct: Rate,
    pub seven_year_pct: Rate,
    pub fifteen_year_pct: Rate,
}

impl CostSegAllocation {
    pub const NONE: CostSegAllocation = CostSegAllocation {
        five_year_pct: Rate::ZERO,
        seven_year_pct: Rate::ZERO,
        fifteen_year_pct: Rate::ZERO,
    };

    /// Fraction remaining on the 27.5-year residential schedule.
    pub fn residential_pct(&self) -> Rate {
        Rate::from_decimal(
            dec!(1) - self.five_year_pct.as_decimal() - self.seven_year_pct.as_decimal()
                - self.fifteen_year_pct.as_decimal(),
        )
    }

    fn validate(&self) -> AnalysisOutcome<()> {
        for (name, r) in [
            ("cost_seg.five_year_pct", self.five_year_pct),
            ("cost_seg.seven_year_pct", self.seven_year_pct),
            ("cost_seg.fifteen_year_pct", self.fifteen_year_pct),
        ] {
            if r.as_decimal() < dec!(0) || r.as_decimal() > dec!(1) {
                return Err(AnalysisError::invalid_configuration(
                    name,
                    "fraction in [0, 1]",
                    r.as_decimal(),
                ));
            }
        }
        let sum = self.five_year_pct.as_decimal()
            + self.seven_year_pct.as_decimal()
            + self.fifteen_year_pct.as_decimal();
        if sum > dec!(1) {
            return Err(AnalysisError::invalid_configuration(
                "cost_seg",
                "sum of class fractions <= 1",
                sum,
            ));
        }
        Ok(())
    }
}

/// Loan product family. Stored on `DealAssumptions` as a string per the
/// manifest's sentinel-entry note (§4.14); this is the typed form used
/// internally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LoanType {
    Conventional,
    Dscr,
}

/// The full input to `run_proforma`. Immutable once constructed;
/// `DealAssumptions::new` validates the structural invariants named in §7
/// (`InvalidConfiguration`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealAssumptions {
    pub purchase_price: Money,
    pub closing_costs: Money,
    pub land_value_pct: Rate,

    pub ltv: Rate,
    pub interest_rate: Rate,
    pub loan_term_years: u32,
    pub loan_points: Rate,
    pub loan_type: LoanType,

    pub monthly_rent: Money,
    pub annual_rent_growth: Rate,
    pub vacancy_rate: Rate,
    pub other_income: Money,

    pub property_tax: Money,
    pub insurance: Money,
    pub maintenance_pct: Rate,
    pub management_pct: Rate,
    pub capex_reserve_pct: Rate,
    pub hoa: Money,

    pub annual_appreciation: Rate,
    pub hold_years: u32,
    pub selling_costs_pct: Rate,

    pub cost_seg: CostSegAllocation,
    pub placed_in_service_year: u32,
    pub placed_in_service_month: u32,

    pub annual_expense_growth: Rate,
    pub rehab_budget: RehabBudget,
}

impl DealAssumptions {
    /// Construct and validate. Mirrors §7's `InvalidConfiguration` list:
    /// cost-seg fractions summing over 1, negative rates, an out-of-range
    /// placed-in-service month, or a non-positive hold period.
    pub fn new(fields: DealAssumptions) -> AnalysisOutcome<Self> {
        fields.cost_seg.validate()?;

        if fields.hold_years == 0 {
            return Err(AnalysisError::invalid_configuration(
                "hold_years",
                "> 0",
                fields.hold_years,
            ));
        }
        if !(1..=12).contains(&fields.placed_in_service_month) {
            return Err(AnalysisError::invalid_configuration(
                "placed_in_service_month",
                "in [1, 12]",
                fields.placed_in_service_month,
            ));
        }
        for (name, r) in [
            ("interest_rate", fields.interest_rate),
            ("ltv", fields.ltv),
            ("vacancy_rate", fields.vacancy_rate),
            ("annual_rent_growth", fields.annual_rent_growth),
            ("annual_expense_growth", fields.annual_expense_growth),
            ("annual_appreciation", fields.annual_appreciation),
        ] {
            if r.as_decimal() < dec!(0) {
                return Err(AnalysisError::invalid_configuration(
                    name,
                    ">= 0",
                    r.as_decimal(),
                ));
            }
        }

        Ok(fields)
    }

    /// `purchase_price * ltv`.
    pub fn loan_amount(&self) -> Money {
        self.purchase_price * self.ltv.as_decimal()
    }

    /// `purchase_price - loan_amount`.
    pub fn down_payment(&self) -> Money {
        self.purchase_price - self.loan_amount()
    }

    /// `down_payment + closing_costs + loan_points*loan_amount + rehab_budget.total_cost`.
    pub fn total_initial_investment(&self) -> Money {
        let points_cost = self.loan_amount() * self.loan_points.as_decimal();
        self.down_payment() + self.closing_costs + points_cost + self.rehab_budget.total_cost()
    }

    /// `purchase_price + closing_costs`.
    pub fn total_basis(&self) -> Money {
        self.purchase_price + self.closing_costs
    }

    /// `total_basis * (1 - land_value_pct) + rehab_budget.total_cost`.
    pub fn depreciable_basis(&self) -> Money {
        let building_basis = self.total_basis() * (dec!(1) - self.land_value_pct.as_decimal());
        building_basis + self.rehab_budget.total_cost()
    }

    /// The portion of `total_basis` allocated to land (never depreciated).
    pub fn land_value(&self) -> Money {
        self.total_basis() * self.land_value_pct.as_decimal()
    }
}
