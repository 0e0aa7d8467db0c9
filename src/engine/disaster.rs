//! Threshold-triggered disaster penalties

use crate::core::metrics::{Metric, MetricDelta, Metrics};
use crate::core::types::{Allocation, CardId, Round};
use crate::rules::disaster::DisasterRule;
use serde::{Deserialize, Serialize};

/// A disaster that fired this round, with enough detail to explain it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggeredDisaster {
    pub id: String,
    pub name: String,
    pub round: Round,
    pub trigger: Metric,
    pub threshold: f64,
    /// Trigger metric value that was checked
    pub observed: f64,
    /// Penalty as configured
    pub penalty: MetricDelta,
    /// Penalty after difficulty scaling, the amount actually applied
    pub applied_penalty: MetricDelta,
    pub mitigated_by: Vec<CardId>,
    pub description: String,
}

/// Fire every rule for `current_round` whose trigger metric reached its threshold
///
/// Triggers are read from `metrics` as given, so one disaster's penalty never
/// sets off another in the same round. Funding any mitigating card suppresses
/// the rule entirely.
pub fn apply_disaster_penalties(
    metrics: &Metrics,
    current_round: Round,
    allocation: &Allocation,
    disasters: &[DisasterRule],
    penalty_scale: f64,
) -> (Metrics, Vec<TriggeredDisaster>) {
    let mut out = *metrics;
    let mut triggered = Vec::new();

    for rule in disasters.iter().filter(|d| d.round == current_round) {
        let observed = metrics.get(rule.trigger);
        if observed < rule.threshold || rule.is_mitigated(allocation) {
            continue;
        }

        let applied_penalty = rule.penalty.scaled(penalty_scale);
        out.add_scaled(&applied_penalty, 1.0);

        triggered.push(TriggeredDisaster {
            id: rule.id.clone(),
            name: rule.name.clone(),
            round: rule.round,
            trigger: rule.trigger,
            threshold: rule.threshold,
            observed,
            penalty: rule.penalty,
            applied_penalty,
            mitigated_by: rule.mitigated_by.clone(),
            description: rule.description.clone(),
        });
    }

    (out, triggered)
}
