//! Game session - the stateful controller around the pure engine
//!
//! Owns one playthrough: current round, current metrics and round history.
//! Budget and per-card caps are enforced here; the engine tolerates anything.

use crate::core::error::{EngineError, Result};
use crate::core::metrics::{FeedbackLevel, Metric, Metrics};
use crate::core::types::{Allocation, Round};
use crate::difficulty::{
    get_config_for_difficulty, DifficultyId, DifficultyProfile, ROUNDS_PER_GAME,
};
use crate::engine::round::{calculate_round_effects, RoundResult};
use crate::rules::card::Card;
use crate::rules::config::GameConfig;
use crate::rules::disaster::DisasterRule;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// One committed round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub round: Round,
    pub allocation: Allocation,
    pub metrics_before: Metrics,
    pub result: RoundResult,
}

/// End-of-game digest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub difficulty: DifficultyId,
    pub rounds_played: usize,
    pub final_metrics: Metrics,
    pub feedback: Vec<(Metric, FeedbackLevel)>,
    pub synergies_fired: usize,
    pub disasters_fired: usize,
}

#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    difficulty: DifficultyId,
    tokens_per_round: [u32; ROUNDS_PER_GAME],
    penalty_scale: f64,
    round: Round,
    metrics: Metrics,
    history: Vec<RoundRecord>,
}

impl GameSession {
    /// Start a playthrough at round 1 from the scenario's starting metrics
    pub fn new(base: &GameConfig, difficulty: DifficultyId) -> Self {
        let profile = DifficultyProfile::preset(difficulty);
        let config = get_config_for_difficulty(base, difficulty);
        let metrics = config.starting_metrics;

        Self {
            config,
            difficulty,
            tokens_per_round: profile.tokens_per_round,
            penalty_scale: profile.disaster_penalty_scale,
            round: 1,
            metrics,
            history: Vec::new(),
        }
    }

    /// Resolved config (base scenario plus difficulty)
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn difficulty(&self) -> DifficultyId {
        self.difficulty
    }

    pub fn current_round(&self) -> Round {
        self.round
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn history(&self) -> &[RoundRecord] {
        &self.history
    }

    pub fn total_rounds(&self) -> Round {
        ROUNDS_PER_GAME as Round
    }

    pub fn is_complete(&self) -> bool {
        self.round > self.total_rounds()
    }

    /// Tokens available this round, 0 once the game is over
    pub fn budget(&self) -> u32 {
        (self.round as usize)
            .checked_sub(1)
            .and_then(|idx| self.tokens_per_round.get(idx))
            .copied()
            .unwrap_or(0)
    }

    /// Cards the player may fund this round
    pub fn available_cards(&self) -> Vec<&Card> {
        self.config
            .cards
            .available(self.round, &self.metrics, &self.config.unlocks)
            .collect()
    }

    /// Disasters that could strike this round, for warnings
    pub fn upcoming_disasters(&self) -> Vec<&DisasterRule> {
        self.config.disasters_for_round(self.round).collect()
    }

    /// Check an allocation against the session's rules without playing it
    pub fn validate(&self, allocation: &Allocation) -> Result<()> {
        if self.is_complete() {
            return Err(EngineError::SessionComplete(self.total_rounds()));
        }

        let cap = self.config.max_tokens_per_card;
        for (card_id, tokens) in allocation.funded() {
            let card = self
                .config
                .cards
                .get(card_id.as_str())
                .ok_or_else(|| EngineError::UnknownCard(card_id.to_string()))?;

            if !card.is_available(self.round, &self.metrics, &self.config.unlocks) {
                return Err(EngineError::CardUnavailable {
                    card: card_id.to_string(),
                    round: self.round,
                });
            }

            if tokens > cap {
                return Err(EngineError::TokenCapExceeded {
                    card: card_id.to_string(),
                    tokens,
                    cap,
                });
            }
        }

        let spent = allocation.total_tokens();
        let budget = self.budget();
        if spent > u64::from(budget) {
            return Err(EngineError::OverBudget { spent, budget });
        }

        Ok(())
    }

    /// Compute the current round without committing it
    pub fn preview(&self, allocation: &Allocation) -> Result<RoundResult> {
        self.validate(allocation)?;
        Ok(self.compute(allocation))
    }

    /// Preview several candidate allocations in parallel, results in input order
    pub fn preview_candidates(&self, candidates: &[Allocation]) -> Vec<Result<RoundResult>> {
        candidates
            .par_iter()
            .map(|allocation| self.preview(allocation))
            .collect()
    }

    /// Commit an allocation: compute, record, and advance to the next round
    pub fn play_round(&mut self, allocation: Allocation) -> Result<&RoundRecord> {
        if let Err(err) = self.validate(&allocation) {
            tracing::debug!("Rejected allocation for round {}: {}", self.round, err);
            return Err(err);
        }

        let result = self.compute(&allocation);

        for synergy in &result.active_synergies {
            tracing::debug!(
                "Synergy {} fired: {:+} {} (x{})",
                synergy.id,
                synergy.scaled_bonus,
                synergy.target,
                synergy.scale
            );
        }
        for disaster in &result.triggered_disasters {
            tracing::debug!(
                "Disaster {} struck: {} {} >= {}",
                disaster.id,
                disaster.trigger,
                disaster.observed,
                disaster.threshold
            );
        }
        tracing::info!(
            "Round {} played: {} tokens, {} synergies, {} disasters",
            self.round,
            allocation.total_tokens(),
            result.active_synergies.len(),
            result.triggered_disasters.len()
        );

        let record = RoundRecord {
            round: self.round,
            allocation,
            metrics_before: self.metrics,
            result,
        };
        self.metrics = record.result.metrics_after;
        self.round += 1;
        self.history.push(record);

        Ok(&self.history[self.history.len() - 1])
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            difficulty: self.difficulty,
            rounds_played: self.history.len(),
            final_metrics: self.metrics,
            feedback: self.metrics.feedback(&self.config.feedback),
            synergies_fired: self
                .history
                .iter()
                .map(|r| r.result.active_synergies.len())
                .sum(),
            disasters_fired: self
                .history
                .iter()
                .map(|r| r.result.triggered_disasters.len())
                .sum(),
        }
    }

    fn compute(&self, allocation: &Allocation) -> RoundResult {
        calculate_round_effects(
            &self.metrics,
            allocation,
            &self.config,
            self.round,
            self.penalty_scale,
        )
    }
}
