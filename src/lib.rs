//! # reia-core
//!
//! A pure Rust calculation engine for rental real-estate investment
//! pro-forma analysis. Provides deterministic, precise calculations for:
//!
//! - **Assumption resolution** - override/estimate/default pipeline with
//!   full auditability (`build_smart_assumptions`)
//! - **Amortization & debt** - payment schedules, yearly debt summaries
//! - **Cash flow** - gross rent, operating expenses, NOI, cash flow
//! - **Depreciation** - MACRS cost segregation, 27.5-year residential,
//!   bonus depreciation
//! - **Tax** - IRC §469 passive activity rules, §1250/§1231 disposition
//!   treatment, NIIT
//! - **Returns** - IRR (before/after tax), equity multiple, cash-on-cash
//!
//! ## Features
//!
//! - **Pure functions** - no side effects, fully deterministic
//! - **Precise math** - uses `rust_decimal` for exact money calculations (no floating point)
//! - **Audit trail** - every resolved assumption carries its source and justification
//!
//! ## Architecture
//!
//! ```text
//! PropertyDetail + NeighborhoodReport + MacroContext + RentEstimate + UserOverrides
//!     -> build_smart_assumptions -> (DealAssumptions, AssumptionManifest)
//!     -> run_proforma -> AnalysisResult
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use reia_core::{build_smart_assumptions, run_proforma, UserOverrides};
//!
//! let (assumptions, manifest) = build_smart_assumptions(
//!     &property, Some(&neighborhood), &macro_ctx, Some(&rent_estimate),
//!     "CA", &UserOverrides::default(),
//! )?;
//!
//! let result = run_proforma(&assumptions, &investor);
//! println!("After-tax IRR: {:?}", result.after_tax_irr);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod algorithms;
pub mod builder;
pub mod engine;
pub mod types;

pub use algorithms::{
    blend_tier_results, calculate_payment, cap_rate, cash_flow_before_tax, cash_on_cash,
    compute_disposition, compute_equity_multiple, compute_irr, compute_neighborhood_grade,
    compute_passive_activity, compute_yearly_depreciation, dscr, estimate_appreciation,
    estimate_insurance, estimate_maintenance_pct, estimate_rehab_budget, generate_amortization_schedule,
    gross_rent, noi, price_conventional_loan, price_dscr_loan, taxable_rental_income,
    yearly_debt_summary, AmortizationEntry, AmortizationSchedule, CreditTier, InsuranceEstimate,
    LoanQuote, NeighborhoodGrade, NeighborhoodLetter, OperatingExpenses, PassiveActivityEntry,
    YearlyDebt, YearlyDepreciation,
};
pub use builder::{build_smart_assumptions, UserOverrides};
pub use engine::{engine_info, run_proforma, run_proforma_with_config, EngineConfig, ENGINE_VERSION};
pub use types::{
    AnalysisError, AnalysisOutcome, AnalysisResult, Address, ClimateZone, ConditionGrade,
    CostSegAllocation, DealAssumptions, DecimalExt, DispositionResult, FilingStatus, HailFrequency,
    InvestorTaxProfile, LoanType, MacroContext, Money, NeighborhoodReport, PropertyDetail,
    PropertyType, Rate, RehabBudget, RehabCategory, RehabLineItem, RentEstimate, RentalComp,
    SaleComp, SchoolInfo, StateCode, TierConfidence, TierName, TierResult, YearlyProjection,
};

/// Commonly used types and traits, for a single glob import.
pub mod prelude {
    //! ```rust,ignore
    //! use reia_core::prelude::*;
    //! ```

    pub use crate::builder::{build_smart_assumptions, UserOverrides};
    pub use crate::engine::{run_proforma, run_proforma_with_config};
    pub use crate::types::{
        AnalysisError, AnalysisOutcome, AnalysisResult, DealAssumptions, DecimalExt,
        InvestorTaxProfile, Money, Rate,
    };

    pub use rust_decimal::Decimal;
    pub use rust_decimal_macros::dec;
}
