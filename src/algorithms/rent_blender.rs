//! Blends the tiered rent service's per-tier outputs into a single
//! estimate (§4.13).

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::external::{RentEstimate, TierConfidence, TierName, TierResult};
use crate::types::Money;

fn tier_weight(tier: TierName) -> Decimal {
    match tier {
        TierName::Llm => dec!(0.3),
        TierName::Hud => dec!(0.3),
        TierName::RentCast => dec!(0.4),
    }
}

fn confidence_numeric(confidence: TierConfidence) -> Decimal {
    match confidence {
        TierConfidence::Low => dec!(0.30),
        TierConfidence::Med => dec!(0.60),
        TierConfidence::High => dec!(0.85),
    }
}

fn numeric_to_confidence(score: Decimal) -> TierConfidence {
    if score >= dec!(0.70) {
        TierConfidence::High
    } else if score >= dec!(0.40) {
        TierConfidence::Med
    } else {
        TierConfidence::Low
    }
}

/// Blends `tier_results` per §4.13: a tier-weighted average over tiers
/// that produced an estimate, a confidence score adjusted for
/// cross-tier agreement, a `needs_review` flag when LLM and HUD disagree
/// by more than 20% of their mean, and a recommended range sized by
/// `(1 - confidence) * 0.15`. If no tier produced an estimate, returns a
/// zero, low-confidence, needs-review result.
pub fn blend_tier_results(address: &str, tier_results: Vec<TierResult>) -> RentEstimate {
    let with_estimates: Vec<&TierResult> = tier_results
        .iter()
        .filter(|t| t.estimate.is_some())
        .collect();

    if with_estimates.is_empty() {
        return RentEstimate {
            address: address.to_string(),
            estimated_rent: Money::ZERO,
            confidence: TierConfidence::Low,
            confidence_score: dec!(0),
            needs_review: true,
            tier_results,
            recommended_range: (Money::ZERO, Money::ZERO),
        };
    }

    let weight_sum: Decimal = with_estimates.iter().map(|t| tier_weight(t.tier)).sum();
    let weighted_rent: Decimal = with_estimates
        .iter()
        .map(|t| tier_weight(t.tier) * t.estimate.unwrap().as_decimal())
        .sum::<Decimal>()
        / weight_sum;

    let weighted_confidence: Decimal = with_estimates
        .iter()
        .map(|t| tier_weight(t.tier) * confidence_numeric(t.confidence))
        .sum::<Decimal>()
        / weight_sum;

    let estimates: Vec<Decimal> = with_estimates
        .iter()
        .map(|t| t.estimate.unwrap().as_decimal())
        .collect();

    let mut confidence_score = weighted_confidence;
    if estimates.len() >= 2 {
        let simple_mean = estimates.iter().sum::<Decimal>() / Decimal::from(estimates.len() as u32);
        let max_deviation = estimates
            .iter()
            .map(|e| (e - simple_mean).abs())
            .fold(dec!(0), Decimal::max);
        let max_deviation_pct = if simple_mean.is_zero() {
            dec!(0)
        } else {
            max_deviation / simple_mean
        };

        if max_deviation_pct < dec!(0.10) {
            confidence_score += dec!(0.10);
        } else if max_deviation_pct > dec!(0.25) {
            confidence_score -= dec!(0.10);
        }
    }
    confidence_score = confidence_score.clamp(dec!(0), dec!(1));

    let llm = tier_results.iter().find(|t| t.tier == TierName::Llm).and_then(|t| t.estimate);
    let hud = tier_results.iter().find(|t| t.tier == TierName::Hud).and_then(|t| t.estimate);
    let needs_review = match (llm, hud) {
        (Some(l), Some(h)) => {
            let mean = (l.as_decimal() + h.as_decimal()) / dec!(2);
            if mean.is_zero() {
                false
            } else {
                (l.as_decimal() - h.as_decimal()).abs() / mean > dec!(0.20)
            }
        }
        _ => false,
    };

    let min_estimate = estimates.iter().copied().fold(Decimal::MAX, Decimal::min);
    let max_estimate = estimates.iter().copied().fold(Decimal::MIN, Decimal::max);
    let margin = weighted_rent * (dec!(1) - confidence_score) * dec!(0.15);

    RentEstimate {
        address: address.to_string(),
        estimated_rent: Money::from_dollars(weighted_rent).round_cents(),
        confidence: numeric_to_confidence(confidence_score),
        confidence_score,
        needs_review,
        tier_results,
        recommended_range: (
            Money::from_dollars(min_estimate - margin).round_cents(),
            Money::from_dollars(max_estimate + margin).round_cents(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tier(tier: TierName, estimate: Option<Decimal>, confidence: TierConfidence) -> TierResult {
        TierResult {
            tier,
            estimate: estimate.map(Money::from_dollars),
            confidence,
            reasoning: "test".to_string(),
        }
    }

    #[test]
    fn test_no_estimates_returns_zero_needs_review() {
        let results = vec![
            tier(TierName::Llm, None, TierConfidence::Low),
            tier(TierName::Hud, None, TierConfidence::Low),
        ];
        let blended = blend_tier_results("123 Main St", results);
        assert_eq!(blended.estimated_rent, Money::ZERO);
        assert!(blended.needs_review);
        assert_eq!(blended.confidence, TierConfidence::Low);
    }

    #[test]
    fn test_agreeing_tiers_boost_confidence() {
        let results = vec![
            tier(TierName::Llm, Some(dec!(2000)), TierConfidence::High),
            tier(TierName::Hud, Some(dec!(2020)), TierConfidence::High),
            tier(TierName::RentCast, Some(dec!(1990)), TierConfidence::High),
        ];
        let blended = blend_tier_results("123 Main St", results);
        assert!(blended.confidence_score > dec!(0.85));
        assert!(!blended.needs_review);
    }

    #[test]
    fn test_llm_hud_disagreement_flags_review() {
        let results = vec![
            tier(TierName::Llm, Some(dec!(1500)), TierConfidence::Med),
            tier(TierName::Hud, Some(dec!(2200)), TierConfidence::Med),
        ];
        let blended = blend_tier_results("123 Main St", results);
        assert!(blended.needs_review);
    }

    #[test]
    fn test_single_tier_does_not_get_agreement_boost() {
        let results = vec![tier(TierName::RentCast, Some(dec!(2500)), TierConfidence::Med)];
        let blended = blend_tier_results("123 Main St", results);
        // confidence_numeric(Med) = 0.60; with no second tier to agree with,
        // the +0.10 agreement boost must not apply.
        assert_eq!(blended.confidence_score, dec!(0.60));
    }

    #[test]
    fn test_single_tier_still_blends() {
        let results = vec![tier(TierName::RentCast, Some(dec!(2500)), TierConfidence::Med)];
        let blended = blend_tier_results("123 Main St", results);
        assert_eq!(blended.estimated_rent.as_decimal(), dec!(2500.00));
    }
}
