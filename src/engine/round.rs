//! Full round computation: allocation, synergies, clamp, disasters, clamp
//!
//! The stage order is fixed. Disasters must see clamped post-synergy metrics,
//! and their penalties are clamped again before the result leaves the engine.

use crate::core::metrics::Metrics;
use crate::core::types::{Allocation, Round};
use crate::engine::allocation::apply_allocation_effects;
use crate::engine::disaster::{apply_disaster_penalties, TriggeredDisaster};
use crate::engine::synergy::{apply_synergy_bonuses, ActiveSynergy};
use crate::rules::config::GameConfig;
use serde::{Deserialize, Serialize};

/// Outcome of one round. Pure value; the caller decides whether to keep it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundResult {
    pub metrics_after: Metrics,
    pub active_synergies: Vec<ActiveSynergy>,
    pub triggered_disasters: Vec<TriggeredDisaster>,
}

impl RoundResult {
    pub fn has_events(&self) -> bool {
        !self.active_synergies.is_empty() || !self.triggered_disasters.is_empty()
    }
}

/// Compute a round against `config` (cards, synergies, disasters, token mechanics)
///
/// Pass `penalty_scale = 1.0` when no difficulty scaling applies.
pub fn calculate_round_effects(
    metrics_before: &Metrics,
    allocation: &Allocation,
    config: &GameConfig,
    current_round: Round,
    penalty_scale: f64,
) -> RoundResult {
    let after_allocation = apply_allocation_effects(
        metrics_before,
        allocation,
        &config.cards,
        &config.token_mechanics,
    );

    let (after_synergy, active_synergies) =
        apply_synergy_bonuses(&after_allocation, allocation, &config.synergies);

    let checkpoint = after_synergy.clamped();

    let (after_disaster, triggered_disasters) = apply_disaster_penalties(
        &checkpoint,
        current_round,
        allocation,
        &config.disasters,
        penalty_scale,
    );

    RoundResult {
        metrics_after: after_disaster.clamped(),
        active_synergies,
        triggered_disasters,
    }
}
