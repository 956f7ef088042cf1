//! Pro-forma results — yearly projections, disposition, and the summary
//! `AnalysisResult`.

use std::collections::BTreeMap;

use super::money::{Money, Rate};
use serde::{Deserialize, Serialize};

/// One year of the pro-forma, 1-indexed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyProjection {
    pub year: u32,
    pub gross_rent: Money,
    pub vacancy_loss: Money,
    pub other_income: Money,
    pub effective_gross_income: Money,
    pub expenses: BTreeMap<String, Money>,
    pub total_expenses: Money,
    pub noi: Money,
    pub debt_service: Money,
    pub cash_flow_before_tax: Money,
    pub principal_paid: Money,
    pub interest_paid: Money,
    pub loan_balance: Money,
    pub residential_depreciation: Money,
    pub cost_seg_depreciation: Money,
    pub total_depreciation: Money,
    pub taxable_income: Money,
    pub passive_loss: Money,
    pub suspended_loss: Money,
    pub tax_benefit: Money,
    pub cash_flow_after_tax: Money,
    pub property_value: Money,
    pub equity: Money,
    pub cap_rate: Rate,
    pub cash_on_cash: Rate,
    pub dscr: Rate,
    pub rent_months: u32,
}

/// Result of selling the property at the end of the hold period (IRC
/// §1250 / §1231 / §469(g)).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispositionResult {
    pub sale_price: Money,
    pub selling_costs: Money,
    pub net_sale_proceeds: Money,
    pub loan_payoff: Money,
    pub gross_equity_proceeds: Money,
    pub adjusted_basis: Money,
    pub total_gain: Money,
    pub depreciation_recapture: Money,
    pub capital_gain: Money,
    pub recapture_tax: Money,
    pub capital_gains_tax: Money,
    pub niit_on_gain: Money,
    pub state_tax_on_gain: Money,
    pub suspended_losses_released: Money,
    pub tax_benefit_from_release: Money,
    pub total_tax_on_sale: Money,
    pub after_tax_sale_proceeds: Money,
}

/// The full pro-forma output: yearly projections, disposition, and summary
/// return metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub projections: Vec<YearlyProjection>,
    pub disposition: DispositionResult,

    pub total_initial_investment: Money,
    pub total_rehab_cost: Money,

    pub before_tax_irr: Rate,
    pub after_tax_irr: Rate,
    pub equity_multiple: Rate,
    pub average_cash_on_cash: Rate,

    pub total_profit: Money,
    pub total_depreciation_taken: Money,
    pub total_tax_benefit_operations: Money,
    pub total_suspended_losses: Money,
    pub net_tax_impact: Money,

    /// Sum of every year's after-tax cash flow plus the after-tax sale
    /// proceeds — the numerator of `equity_multiple`, exposed directly
    /// since every downstream consumer of the pro-forma needs it too.
    pub total_cash_returned: Money,
}
