//! Synergy detection and bonus payout

use crate::core::metrics::{Metric, Metrics};
use crate::core::types::{Allocation, CardId};
use crate::rules::synergy::SynergyRule;
use serde::{Deserialize, Serialize};

/// A synergy that fired this round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveSynergy {
    pub id: String,
    pub name: String,
    pub target: Metric,
    /// Bonus per token as configured
    pub bonus_per_token: f64,
    pub cards: Vec<CardId>,
    /// Lowest token count among the participants
    pub scale: u32,
    /// `bonus_per_token * scale`, the amount actually added
    pub scaled_bonus: f64,
}

/// Weakest-link token count, or `None` when any participant is unfunded
pub fn synergy_scale(rule: &SynergyRule, allocation: &Allocation) -> Option<u32> {
    rule.cards
        .iter()
        .map(|card| allocation.tokens_for(card.as_str()))
        .min()
        .filter(|&tokens| tokens >= 1)
}

/// Add the bonus of every active synergy to its target metric
///
/// Rules are independent of each other; bonuses accumulate in rule order.
pub fn apply_synergy_bonuses(
    metrics: &Metrics,
    allocation: &Allocation,
    synergies: &[SynergyRule],
) -> (Metrics, Vec<ActiveSynergy>) {
    let mut out = *metrics;
    let mut active = Vec::new();

    for rule in synergies {
        let Some(scale) = synergy_scale(rule, allocation) else {
            continue;
        };

        let scaled_bonus = rule.bonus * f64::from(scale);
        *out.get_mut(rule.target) += scaled_bonus;

        active.push(ActiveSynergy {
            id: rule.id.clone(),
            name: rule.name.clone(),
            target: rule.target,
            bonus_per_token: rule.bonus,
            cards: rule.cards.clone(),
            scale,
            scaled_bonus,
        });
    }

    (out, active)
}
