//! Pure calculation algorithms behind the pro-forma engine.
//!
//! Every function here is deterministic and side-effect free: same input,
//! same output, no I/O. They compose into the two orchestrators in
//! `crate::builder` and `crate::engine`, but each is independently callable
//! and tested.

pub mod amortization;
pub mod appreciation;
pub mod cashflow;
pub mod depreciation;
pub mod disposition;
pub mod insurance;
pub mod irr;
pub mod loan_products;
pub mod maintenance;
pub mod neighborhood;
pub mod passive_activity;
pub mod rehab;
pub mod rent_blender;

pub use amortization::{
    calculate_payment, generate_amortization_schedule, yearly_debt_summary, AmortizationEntry,
    AmortizationSchedule, YearlyDebt,
};
pub use appreciation::estimate_appreciation;
pub use cashflow::{
    cap_rate, cash_flow_before_tax, cash_on_cash, dscr, effective_gross_income, gross_rent, noi,
    operating_expenses, property_value, rent_months, vacancy_loss, OperatingExpenses,
};
pub use depreciation::{
    bonus_depreciation_rate, compute_yearly_depreciation, residential_depreciation_rate,
    YearlyDepreciation, MACRS_15_YEAR, MACRS_5_YEAR, MACRS_7_YEAR,
};
pub use disposition::compute_disposition;
pub use insurance::{estimate_insurance, InsuranceEstimate};
pub use irr::{compute_equity_multiple, compute_irr};
pub use loan_products::{price_conventional_loan, price_dscr_loan, CreditTier, LoanQuote};
pub use maintenance::estimate_maintenance_pct;
pub use neighborhood::{compute_neighborhood_grade, NeighborhoodGrade, NeighborhoodLetter};
pub use passive_activity::{compute_passive_activity, taxable_rental_income, PassiveActivityEntry};
pub use rehab::estimate_rehab_budget;
pub use rent_blender::blend_tier_results;
