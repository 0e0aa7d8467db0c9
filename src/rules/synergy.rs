//! Synergy rule definitions

use crate::core::metrics::Metric;
use crate::core::types::CardId;
use serde::{Deserialize, Serialize};

/// Bonus paid when every listed card is funded in the same round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SynergyRule {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// At least two participants
    pub cards: Vec<CardId>,
    pub target: Metric,
    /// Paid per token of the weakest participant; may be negative
    pub bonus: f64,
    #[serde(default)]
    pub description: String,
}
