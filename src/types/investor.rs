//! Investor tax profile and its derived IRC §469 / NIIT properties.

use super::money::{Money, Rate};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// IRS filing status. Only used to pick the NIIT threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum FilingStatus {
    Single,
    #[strum(serialize = "MFJ")]
    #[serde(rename = "MFJ")]
    Mfj,
    #[strum(serialize = "MFS")]
    #[serde(rename = "MFS")]
    Mfs,
    #[strum(serialize = "HOH")]
    #[serde(rename = "HOH")]
    Hoh,
}

/// Investor's tax situation, immutable for the life of one analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestorTaxProfile {
    pub filing_status: FilingStatus,
    pub agi: Money,
    pub marginal_federal_rate: Rate,
    pub marginal_state_rate: Rate,
    pub state: String,
    pub other_passive_income: Money,
    pub is_re_professional: bool,
}

impl InvestorTaxProfile {
    /// Combined ordinary marginal rate (federal + state).
    pub fn combined_rate(&self) -> Rate {
        self.marginal_federal_rate + self.marginal_state_rate
    }

    /// NIIT threshold for this filing status.
    fn niit_threshold(&self) -> Money {
        match self.filing_status {
            FilingStatus::Single | FilingStatus::Hoh => Money::from_dollars(dec!(200_000)),
            FilingStatus::Mfj => Money::from_dollars(dec!(250_000)),
            FilingStatus::Mfs => Money::from_dollars(dec!(125_000)),
        }
    }

    /// Whether the 3.8% Net Investment Income Tax applies.
    pub fn niit_applies(&self) -> bool {
        self.agi.as_decimal() > self.niit_threshold().as_decimal()
    }

    /// NIIT rate: 3.8% when it applies, else zero.
    pub fn niit_rate(&self) -> Rate {
        if self.niit_applies() {
            Rate::from_decimal(dec!(0.038))
        } else {
            Rate::ZERO
        }
    }

    /// The IRC §469 $25,000 rental-loss allowance, phased down $0.50 per
    /// dollar of AGI over $100,000, reaching zero at AGI ≥ $150,000.
    /// Zero for real-estate professionals, who bypass the allowance cap
    /// entirely via unlimited deductibility (see `compute_passive_activity`).
    pub fn rental_loss_allowance(&self) -> Money {
        if self.is_re_professional {
            return Money::ZERO;
        }
        let agi = self.agi.as_decimal();
        if agi <= dec!(100_000) {
            Money::from_dollars(dec!(25_000))
        } else if agi >= dec!(150_000) {
            Money::ZERO
        } else {
            let phase_out = (agi - dec!(100_000)) * dec!(0.5);
            Money::from_dollars(dec!(25_000) - phase_out).clamp_zero()
        }
    }
}
