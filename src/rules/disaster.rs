//! Disaster rule definitions

use crate::core::metrics::{Metric, MetricDelta};
use crate::core::types::{Allocation, CardId, Round};
use serde::{Deserialize, Serialize};

/// Round-scoped penalty that fires once a metric reaches a threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DisasterRule {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// The only round in which this rule is checked
    pub round: Round,
    pub trigger: Metric,
    /// Inclusive: `metrics[trigger] >= threshold` fires
    pub threshold: f64,
    pub penalty: MetricDelta,
    /// Funding any one of these suppresses the disaster outright
    #[serde(default)]
    pub mitigated_by: Vec<CardId>,
    #[serde(default)]
    pub description: String,
}

impl DisasterRule {
    pub fn is_mitigated(&self, allocation: &Allocation) -> bool {
        self.mitigated_by
            .iter()
            .any(|card| allocation.is_funded(card.as_str()))
    }
}
