//! Game configuration shared by every round of a session
//!
//! A `GameConfig` is loaded once per session and never mutated afterwards.
//! Difficulty resolution builds a fresh copy rather than editing it.

use crate::core::error::{EngineError, Result};
use crate::core::metrics::{FeedbackThresholds, Metrics, METRIC_MAX, METRIC_MIN};
use crate::core::types::Round;
use crate::rules::card::{CardCatalog, UnlockThresholds};
use crate::rules::disaster::DisasterRule;
use crate::rules::synergy::SynergyRule;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Tuning knobs for how tokens turn into effects
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TokenMechanics {
    /// Token index (0-based) from which the reduced multiplier applies
    pub diminishing_returns_threshold: u32,
    /// Multiplier for every token at or past the threshold
    pub diminishing_returns_multiplier: f64,
    /// Total tokens per round allowed before the sprawl penalty kicks in
    pub iot_sprawl_threshold: u32,
    /// Complexity added per token over the sprawl threshold
    pub iot_sprawl_penalty_per_token: f64,
}

impl Default for TokenMechanics {
    fn default() -> Self {
        Self {
            diminishing_returns_threshold: 2,
            diminishing_returns_multiplier: 0.5,
            iot_sprawl_threshold: 6,
            iot_sprawl_penalty_per_token: 1.5,
        }
    }
}

/// Everything a round computation reads besides metrics and allocation
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub starting_metrics: Metrics,
    pub token_mechanics: TokenMechanics,
    /// UI-level cap, enforced by the session, never by the engine
    pub max_tokens_per_card: u32,
    pub feedback: FeedbackThresholds,
    pub unlocks: UnlockThresholds,
    pub cards: CardCatalog,
    pub synergies: Vec<SynergyRule>,
    pub disasters: Vec<DisasterRule>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_metrics: Metrics::new(25.0, 30.0, 30.0, 20.0, 20.0),
            token_mechanics: TokenMechanics::default(),
            max_tokens_per_card: 3,
            feedback: FeedbackThresholds::default(),
            unlocks: UnlockThresholds::default(),
            cards: CardCatalog::new(),
            synergies: Vec::new(),
            disasters: Vec::new(),
        }
    }
}

impl GameConfig {
    /// Check internal consistency; every problem found is reported at once
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        if !self.starting_metrics.is_in_range() {
            errors.push(format!(
                "starting_metrics must lie within [{}, {}]",
                METRIC_MIN, METRIC_MAX
            ));
        }

        let tm = &self.token_mechanics;
        if !tm.diminishing_returns_multiplier.is_finite() || tm.diminishing_returns_multiplier < 0.0
        {
            errors.push("diminishing_returns_multiplier must be a non-negative number".to_string());
        }
        if !tm.iot_sprawl_penalty_per_token.is_finite() || tm.iot_sprawl_penalty_per_token < 0.0 {
            errors.push("iot_sprawl_penalty_per_token must be a non-negative number".to_string());
        }

        if self.feedback.poor > self.feedback.good {
            errors.push(format!(
                "feedback.poor ({}) must not exceed feedback.good ({})",
                self.feedback.poor, self.feedback.good
            ));
        }

        for id in self.cards.duplicate_ids() {
            errors.push(format!("duplicate card id {}", id));
        }

        for card in self.cards.all() {
            if card.id.as_str().is_empty() {
                errors.push("card with empty id".to_string());
            }
            if card.rounds.is_empty() {
                errors.push(format!("card {}: no rounds listed", card.id));
            }
            if card.rounds.contains(&0) {
                errors.push(format!("card {}: rounds are 1-based", card.id));
            }
            if !card.effects.is_finite() {
                errors.push(format!("card {}: effects must be finite", card.id));
            }
        }

        let mut seen = HashSet::new();
        for synergy in &self.synergies {
            if !seen.insert(synergy.id.as_str()) {
                errors.push(format!("duplicate synergy id {}", synergy.id));
            }
            if synergy.cards.len() < 2 {
                errors.push(format!("synergy {}: needs at least two cards", synergy.id));
            }
            let unique: HashSet<&str> = synergy.cards.iter().map(|c| c.as_str()).collect();
            if unique.len() != synergy.cards.len() {
                errors.push(format!("synergy {}: repeated participant", synergy.id));
            }
            for card in &synergy.cards {
                if !self.cards.contains(card.as_str()) {
                    errors.push(format!("synergy {}: unknown card {}", synergy.id, card));
                }
            }
            if !synergy.bonus.is_finite() {
                errors.push(format!("synergy {}: bonus must be finite", synergy.id));
            }
        }

        let mut seen = HashSet::new();
        for disaster in &self.disasters {
            if !seen.insert(disaster.id.as_str()) {
                errors.push(format!("duplicate disaster id {}", disaster.id));
            }
            if disaster.round == 0 {
                errors.push(format!("disaster {}: rounds are 1-based", disaster.id));
            }
            if !(METRIC_MIN..=METRIC_MAX).contains(&disaster.threshold) {
                errors.push(format!(
                    "disaster {}: threshold {} outside [{}, {}]",
                    disaster.id, disaster.threshold, METRIC_MIN, METRIC_MAX
                ));
            }
            if !disaster.penalty.is_finite() {
                errors.push(format!("disaster {}: penalty must be finite", disaster.id));
            }
            for card in &disaster.mitigated_by {
                if !self.cards.contains(card.as_str()) {
                    errors.push(format!(
                        "disaster {}: unknown mitigating card {}",
                        disaster.id, card
                    ));
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(EngineError::InvalidConfig(errors.join("; ")))
        }
    }

    /// Disasters scheduled for `round`, in config order
    pub fn disasters_for_round(&self, round: Round) -> impl Iterator<Item = &DisasterRule> {
        self.disasters.iter().filter(move |d| d.round == round)
    }
}
