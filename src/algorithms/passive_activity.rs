//! IRC §469 passive-activity loss ledger (§4.4).

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::{InvestorTaxProfile, Money};

/// `NOI - interest_paid - depreciation`. Principal is not deductible.
pub fn taxable_rental_income(noi: Money, interest_paid: Money, depreciation: Money) -> Money {
    (noi - interest_paid - depreciation).round_cents()
}

/// One year's passive-activity entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassiveActivityEntry {
    pub year: u32,
    /// Signed: negative reduces taxable income, positive is income that
    /// consumed suspended losses.
    pub deductible_amount: Money,
    pub suspended_amount: Money,
    pub cumulative_suspended: Money,
    pub tax_benefit: Money,
}

/// `compute_passive_activity(rental_taxable, investor, prior_suspended,
/// year)`. The allowance is re-derived every year from investor AGI (static
/// in this model, so in practice it never actually changes across years,
/// but the derivation is not cached).
pub fn compute_passive_activity(
    rental_taxable: Money,
    investor: &InvestorTaxProfile,
    prior_suspended: Money,
    year: u32,
) -> PassiveActivityEntry {
    let net_passive = (rental_taxable + investor.other_passive_income).as_decimal();
    let combined_rate = investor.combined_rate().as_decimal();

    if net_passive >= dec!(0) {
        let usable = prior_suspended.min(Money::from_dollars(net_passive));
        let new_suspended = prior_suspended - usable;
        let deductible = Money::from_dollars(-usable.as_decimal());
        let tax_benefit = usable * combined_rate;

        return PassiveActivityEntry {
            year,
            deductible_amount: deductible.round_cents(),
            suspended_amount: Money::ZERO,
            cumulative_suspended: new_suspended.round_cents(),
            tax_benefit: tax_benefit.round_cents(),
        };
    }

    let loss = Money::from_dollars(-net_passive);

    if investor.is_re_professional {
        let deductible = Money::from_dollars(-loss.as_decimal());
        let tax_benefit = loss * combined_rate;
        return PassiveActivityEntry {
            year,
            deductible_amount: deductible.round_cents(),
            suspended_amount: Money::ZERO,
            cumulative_suspended: prior_suspended.round_cents(),
            tax_benefit: tax_benefit.round_cents(),
        };
    }

    let allowance = investor.rental_loss_allowance();
    let allowed = loss.min(allowance);
    let newly_suspended = loss - allowed;
    let deductible = Money::from_dollars(-allowed.as_decimal());
    let new_suspended = prior_suspended + newly_suspended;
    let tax_benefit = allowed * combined_rate;

    PassiveActivityEntry {
        year,
        deductible_amount: deductible.round_cents(),
        suspended_amount: newly_suspended.round_cents(),
        cumulative_suspended: new_suspended.round_cents(),
        tax_benefit: tax_benefit.round_cents(),
    }
}
