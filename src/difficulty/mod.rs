//! Difficulty presets
//!
//! Three fixed profiles tune token budgets, token mechanics and disaster
//! severity. Hard also adds disasters on top of the scenario's own.

use crate::core::error::{EngineError, Result};
use crate::core::metrics::{Metric, MetricDelta};
use crate::rules::config::{GameConfig, TokenMechanics};
use crate::rules::disaster::DisasterRule;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Rounds in a game, one budget entry each
pub const ROUNDS_PER_GAME: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyId {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl DifficultyId {
    pub const ALL: [DifficultyId; 3] =
        [DifficultyId::Easy, DifficultyId::Normal, DifficultyId::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyId::Easy => "easy",
            DifficultyId::Normal => "normal",
            DifficultyId::Hard => "hard",
        }
    }
}

impl FromStr for DifficultyId {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(DifficultyId::Easy),
            "normal" => Ok(DifficultyId::Normal),
            "hard" => Ok(DifficultyId::Hard),
            _ => Err(EngineError::UnknownDifficulty(s.to_string())),
        }
    }
}

impl std::fmt::Display for DifficultyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Full parameter bundle for one preset
#[derive(Debug, Clone, PartialEq)]
pub struct DifficultyProfile {
    pub id: DifficultyId,
    pub tokens_per_round: [u32; ROUNDS_PER_GAME],
    pub token_mechanics: TokenMechanics,
    pub disaster_penalty_scale: f64,
    /// Appended to the scenario's disasters, never replacing them
    pub extra_disasters: Vec<DisasterRule>,
}

impl DifficultyProfile {
    pub fn preset(id: DifficultyId) -> Self {
        match id {
            DifficultyId::Easy => Self {
                id,
                tokens_per_round: [6, 7, 8],
                token_mechanics: TokenMechanics {
                    diminishing_returns_threshold: 3,
                    diminishing_returns_multiplier: 0.75,
                    iot_sprawl_threshold: 8,
                    iot_sprawl_penalty_per_token: 1.0,
                },
                disaster_penalty_scale: 0.75,
                extra_disasters: Vec::new(),
            },
            DifficultyId::Normal => Self {
                id,
                tokens_per_round: [5, 6, 7],
                token_mechanics: TokenMechanics {
                    diminishing_returns_threshold: 2,
                    diminishing_returns_multiplier: 0.5,
                    iot_sprawl_threshold: 6,
                    iot_sprawl_penalty_per_token: 1.5,
                },
                disaster_penalty_scale: 1.0,
                extra_disasters: Vec::new(),
            },
            DifficultyId::Hard => Self {
                id,
                tokens_per_round: [4, 5, 6],
                token_mechanics: TokenMechanics {
                    diminishing_returns_threshold: 2,
                    diminishing_returns_multiplier: 0.4,
                    iot_sprawl_threshold: 4,
                    iot_sprawl_penalty_per_token: 2.0,
                },
                disaster_penalty_scale: 1.25,
                extra_disasters: hard_extra_disasters(),
            },
        }
    }
}

fn hard_extra_disasters() -> Vec<DisasterRule> {
    vec![
        DisasterRule {
            id: "dataBreach".into(),
            name: "Data Breach".into(),
            round: 2,
            trigger: Metric::Complexity,
            threshold: 45.0,
            penalty: MetricDelta {
                visibility: -6.0,
                efficiency: -5.0,
                ..Default::default()
            },
            mitigated_by: vec!["cyberSecurity".into()],
            description: "An exposed sensor gateway leaks operational data.".into(),
        },
        DisasterRule {
            id: "budgetCollapse".into(),
            name: "Budget Collapse".into(),
            round: 3,
            trigger: Metric::Complexity,
            threshold: 55.0,
            penalty: MetricDelta {
                efficiency: -8.0,
                sustainability: -6.0,
                ..Default::default()
            },
            mitigated_by: vec!["openDataPlatform".into()],
            description: "Maintenance costs of a sprawling system outrun the budget.".into(),
        },
    ]
}

/// New config with the preset's token mechanics and extra disasters applied
///
/// `base` is left untouched. Only token mechanics and disasters vary by
/// difficulty; everything else is copied as-is. An extra disaster whose id the
/// scenario already uses is skipped, so the scenario's own rule wins.
pub fn get_config_for_difficulty(base: &GameConfig, difficulty: DifficultyId) -> GameConfig {
    let profile = DifficultyProfile::preset(difficulty);

    let mut config = base.clone();
    config.token_mechanics = profile.token_mechanics;
    for extra in profile.extra_disasters {
        if !base.disasters.iter().any(|d| d.id == extra.id) {
            config.disasters.push(extra);
        }
    }
    config
}

pub fn get_tokens_per_round(difficulty: DifficultyId) -> [u32; ROUNDS_PER_GAME] {
    DifficultyProfile::preset(difficulty).tokens_per_round
}

pub fn get_disaster_penalty_scale(difficulty: DifficultyId) -> f64 {
    DifficultyProfile::preset(difficulty).disaster_penalty_scale
}
