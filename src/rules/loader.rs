//! Load game scenarios from TOML files
//!
//! A scenario is rejected whole when any part of it is malformed. Nothing is
//! repaired or skipped, so a bad file never reaches a running session.

use crate::core::error::Result;
use crate::core::metrics::{FeedbackThresholds, Metrics};
use crate::rules::card::{Card, CardCatalog, UnlockThresholds};
use crate::rules::config::{GameConfig, TokenMechanics};
use crate::rules::disaster::DisasterRule;
use crate::rules::synergy::SynergyRule;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// On-disk layout of a scenario file
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScenarioFile {
    #[serde(default = "default_max_tokens_per_card")]
    max_tokens_per_card: u32,
    starting_metrics: Metrics,
    #[serde(default)]
    token_mechanics: Option<TokenMechanics>,
    #[serde(default)]
    feedback: FeedbackThresholds,
    #[serde(default)]
    unlocks: UnlockThresholds,
    #[serde(default)]
    cards: Vec<Card>,
    #[serde(default)]
    synergies: Vec<SynergyRule>,
    #[serde(default)]
    disasters: Vec<DisasterRule>,
}

fn default_max_tokens_per_card() -> u32 {
    3
}

/// Load and validate a scenario from disk
pub fn load_scenario(path: &Path) -> Result<GameConfig> {
    tracing::debug!("Loading scenario from {}", path.display());
    let content = fs::read_to_string(path)?;
    let config = parse_scenario(&content)?;
    tracing::info!(
        "Loaded scenario {}: {} cards, {} synergies, {} disasters",
        path.display(),
        config.cards.len(),
        config.synergies.len(),
        config.disasters.len()
    );
    Ok(config)
}

/// Parse and validate a scenario from a TOML string
pub fn parse_scenario(content: &str) -> Result<GameConfig> {
    let file: ScenarioFile = toml::from_str(content)?;

    let config = GameConfig {
        starting_metrics: file.starting_metrics,
        token_mechanics: file.token_mechanics.unwrap_or_default(),
        max_tokens_per_card: file.max_tokens_per_card,
        feedback: file.feedback,
        unlocks: file.unlocks,
        cards: file.cards.into_iter().collect::<CardCatalog>(),
        synergies: file.synergies,
        disasters: file.disasters,
    };
    config.validate()?;

    Ok(config)
}
