use thiserror::Error;

use crate::core::types::Round;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Invalid scenario: {0}")]
    InvalidConfig(String),

    #[error("Unknown difficulty: {0:?} (expected easy, normal or hard)")]
    UnknownDifficulty(String),

    #[error("Unknown card: {0}")]
    UnknownCard(String),

    #[error("Card {card} is not available in round {round}")]
    CardUnavailable { card: String, round: Round },

    #[error("Card {card} has {tokens} tokens, cap is {cap}")]
    TokenCapExceeded { card: String, tokens: u32, cap: u32 },

    #[error("Allocation spends {spent} tokens, budget is {budget}")]
    OverBudget { spent: u64, budget: u32 },

    #[error("Session already finished all {0} rounds")]
    SessionComplete(Round),

    #[error("Invalid allocation: {0}")]
    InvalidAllocation(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
