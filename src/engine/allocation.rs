//! Turn token allocations into raw metric deltas

use crate::core::metrics::Metrics;
use crate::core::types::Allocation;
use crate::rules::card::CardCatalog;
use crate::rules::config::TokenMechanics;

/// Multiplier for the token at `index` (0-based) on a single card
pub fn token_multiplier(index: u32, mechanics: &TokenMechanics) -> f64 {
    if index < mechanics.diminishing_returns_threshold {
        1.0
    } else {
        mechanics.diminishing_returns_multiplier
    }
}

/// Effective token weight for `tokens` tokens on one card
///
/// Equal to summing `token_multiplier` over every index, computed in closed form.
pub fn effective_tokens(tokens: u32, mechanics: &TokenMechanics) -> f64 {
    let full = tokens.min(mechanics.diminishing_returns_threshold);
    let reduced = tokens - full;
    f64::from(full) + f64::from(reduced) * mechanics.diminishing_returns_multiplier
}

/// Complexity surcharge for spending more than the sprawl threshold in total
pub fn sprawl_penalty(total_tokens: u64, mechanics: &TokenMechanics) -> f64 {
    let excess = total_tokens.saturating_sub(u64::from(mechanics.iot_sprawl_threshold));
    excess as f64 * mechanics.iot_sprawl_penalty_per_token
}

/// Apply every funded card's per-token effects, then the global sprawl penalty
///
/// Unknown card ids are skipped. No clamping happens here.
pub fn apply_allocation_effects(
    base: &Metrics,
    allocation: &Allocation,
    cards: &CardCatalog,
    mechanics: &TokenMechanics,
) -> Metrics {
    let mut metrics = *base;

    for (card_id, tokens) in allocation.funded() {
        let Some(card) = cards.get(card_id.as_str()) else {
            continue;
        };
        metrics.add_scaled(&card.effects, effective_tokens(tokens, mechanics));
    }

    // Sprawl counts every token spent, catalog card or not
    metrics.complexity += sprawl_penalty(allocation.total_tokens(), mechanics);

    metrics
}
