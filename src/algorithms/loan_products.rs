//! Loan pricing: conventional and DSCR products (§4.11).

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::{LoanType, Rate};

const BASE_RATE_FALLBACK: Decimal = dec!(0.07);
const INVESTOR_PREMIUM_BPS: Decimal = dec!(0.0075);

/// Borrower credit tier, used only to price the spread on a conventional
/// loan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreditTier {
    Excellent,
    Good,
    Fair,
}

fn credit_spread(tier: CreditTier) -> Decimal {
    match tier {
        CreditTier::Excellent => dec!(0),
        CreditTier::Good => dec!(0.0025),
        CreditTier::Fair => dec!(0.0075),
    }
}

/// A priced loan product.
#[derive(Debug, Clone, PartialEq)]
pub struct LoanQuote {
    pub loan_type: LoanType,
    pub interest_rate: Rate,
    pub ltv: Rate,
    pub term_years: u32,
    pub points: Rate,
    pub rate_source: String,
}

fn base_rate(mortgage_rate_30y: Option<Decimal>) -> (Decimal, &'static str) {
    match mortgage_rate_30y {
        Some(r) => (r, "macro 30-year mortgage rate"),
        None => (BASE_RATE_FALLBACK, "fallback 7.0% (no macro rate available)"),
    }
}

/// `base + 75bps investor premium + credit spread`. LTV 80%, 30-year term,
/// zero points.
pub fn price_conventional_loan(mortgage_rate_30y: Option<Decimal>, credit_tier: CreditTier) -> LoanQuote {
    let (base, base_label) = base_rate(mortgage_rate_30y);
    let spread = credit_spread(credit_tier);
    let rate = base + INVESTOR_PREMIUM_BPS + spread;

    LoanQuote {
        loan_type: LoanType::Conventional,
        interest_rate: Rate::from_decimal(rate).round_4dp(),
        ltv: Rate::from_percentage(dec!(80)),
        term_years: 30,
        points: Rate::ZERO,
        rate_source: format!(
            "{} + 75bps investor premium + {:.2}bps credit spread",
            base_label,
            spread * dec!(10_000)
        ),
    }
}

/// Prices a DSCR loan off an estimated coverage ratio computed by the
/// caller from a rough conventional pass. Coverage tiers: `>=1.25x` gets
/// +100bps/80% LTV/1 point; `>=1.00x` gets +175bps/75% LTV/1.5 points;
/// below that, +250bps/65% LTV/2 points.
pub fn price_dscr_loan(mortgage_rate_30y: Option<Decimal>, estimated_dscr: Decimal) -> LoanQuote {
    let (base, base_label) = base_rate(mortgage_rate_30y);

    let (spread, ltv, points) = if estimated_dscr >= dec!(1.25) {
        (dec!(0.0100), dec!(80), dec!(1.0))
    } else if estimated_dscr >= dec!(1.00) {
        (dec!(0.0175), dec!(75), dec!(1.5))
    } else {
        (dec!(0.0250), dec!(65), dec!(2.0))
    };

    let rate = base + INVESTOR_PREMIUM_BPS + spread;

    LoanQuote {
        loan_type: LoanType::Dscr,
        interest_rate: Rate::from_decimal(rate).round_4dp(),
        ltv: Rate::from_percentage(ltv),
        term_years: 30,
        points: Rate::from_percentage(points),
        rate_source: format!(
            "{} + 75bps investor premium + {:.2}bps DSCR spread (coverage {:.2}x)",
            base_label,
            spread * dec!(10_000),
            estimated_dscr
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conventional_uses_fallback_rate_when_macro_absent() {
        let quote = price_conventional_loan(None, CreditTier::Excellent);
        assert_eq!(quote.interest_rate.as_decimal(), dec!(0.0775));
        assert_eq!(quote.ltv.as_percentage(), dec!(80));
        assert_eq!(quote.term_years, 30);
    }

    #[test]
    fn test_conventional_fair_credit_adds_spread() {
        let excellent = price_conventional_loan(Some(dec!(0.065)), CreditTier::Excellent);
        let fair = price_conventional_loan(Some(dec!(0.065)), CreditTier::Fair);
        assert!(fair.interest_rate.as_decimal() > excellent.interest_rate.as_decimal());
    }

    #[test]
    fn test_dscr_high_coverage_gets_best_terms() {
        let quote = price_dscr_loan(Some(dec!(0.065)), dec!(1.30));
        assert_eq!(quote.ltv.as_percentage(), dec!(80));
        assert_eq!(quote.points.as_percentage(), dec!(1.0));
    }

    #[test]
    fn test_dscr_low_coverage_gets_worst_terms() {
        let quote = price_dscr_loan(Some(dec!(0.065)), dec!(0.85));
        assert_eq!(quote.ltv.as_percentage(), dec!(65));
        assert_eq!(quote.points.as_percentage(), dec!(2.0));
    }
}
