//! Metric model - the five bounded dimensions every round reads and writes
//!
//! Values live in [METRIC_MIN, METRIC_MAX] at rest. Intermediate results inside
//! a round may overshoot and are only pulled back at the clamp checkpoints.

use serde::{Deserialize, Serialize};

/// Lower bound of every metric dimension
pub const METRIC_MIN: f64 = 0.0;

/// Upper bound of every metric dimension
pub const METRIC_MAX: f64 = 100.0;

/// One of the five tracked dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Visibility,
    Efficiency,
    Sustainability,
    EarlyWarning,
    /// Complexity risk. Stored like the others, read as "lower is better".
    Complexity,
}

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::Visibility,
        Metric::Efficiency,
        Metric::Sustainability,
        Metric::EarlyWarning,
        Metric::Complexity,
    ];

    /// Stable snake_case key, matching the scenario file format
    pub fn key(&self) -> &'static str {
        match self {
            Metric::Visibility => "visibility",
            Metric::Efficiency => "efficiency",
            Metric::Sustainability => "sustainability",
            Metric::EarlyWarning => "early_warning",
            Metric::Complexity => "complexity",
        }
    }

    pub fn higher_is_better(&self) -> bool {
        !matches!(self, Metric::Complexity)
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Snapshot of all five dimensions
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Metrics {
    pub visibility: f64,
    pub efficiency: f64,
    pub sustainability: f64,
    pub early_warning: f64,
    pub complexity: f64,
}

impl Metrics {
    pub fn new(
        visibility: f64,
        efficiency: f64,
        sustainability: f64,
        early_warning: f64,
        complexity: f64,
    ) -> Self {
        Self {
            visibility,
            efficiency,
            sustainability,
            early_warning,
            complexity,
        }
    }

    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Visibility => self.visibility,
            Metric::Efficiency => self.efficiency,
            Metric::Sustainability => self.sustainability,
            Metric::EarlyWarning => self.early_warning,
            Metric::Complexity => self.complexity,
        }
    }

    pub fn get_mut(&mut self, metric: Metric) -> &mut f64 {
        match metric {
            Metric::Visibility => &mut self.visibility,
            Metric::Efficiency => &mut self.efficiency,
            Metric::Sustainability => &mut self.sustainability,
            Metric::EarlyWarning => &mut self.early_warning,
            Metric::Complexity => &mut self.complexity,
        }
    }

    /// Add `delta * scale` to every dimension, unclamped
    pub fn add_scaled(&mut self, delta: &MetricDelta, scale: f64) {
        for metric in Metric::ALL {
            *self.get_mut(metric) += delta.get(metric) * scale;
        }
    }

    /// Copy with every dimension pulled into [METRIC_MIN, METRIC_MAX]
    pub fn clamped(&self) -> Self {
        let mut out = *self;
        for metric in Metric::ALL {
            let value = out.get_mut(metric);
            *value = value.clamp(METRIC_MIN, METRIC_MAX);
        }
        out
    }

    pub fn is_in_range(&self) -> bool {
        Metric::ALL
            .iter()
            .all(|m| (METRIC_MIN..=METRIC_MAX).contains(&self.get(*m)))
    }

    /// Classify every dimension against the feedback thresholds
    pub fn feedback(&self, thresholds: &FeedbackThresholds) -> Vec<(Metric, FeedbackLevel)> {
        Metric::ALL
            .iter()
            .map(|m| (*m, thresholds.classify(*m, self.get(*m))))
            .collect()
    }
}

/// Per-dimension deltas. Missing keys in config default to zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MetricDelta {
    pub visibility: f64,
    pub efficiency: f64,
    pub sustainability: f64,
    pub early_warning: f64,
    pub complexity: f64,
}

impl MetricDelta {
    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Visibility => self.visibility,
            Metric::Efficiency => self.efficiency,
            Metric::Sustainability => self.sustainability,
            Metric::EarlyWarning => self.early_warning,
            Metric::Complexity => self.complexity,
        }
    }

    /// Delta touching a single dimension
    pub fn single(metric: Metric, amount: f64) -> Self {
        let mut delta = Self::default();
        match metric {
            Metric::Visibility => delta.visibility = amount,
            Metric::Efficiency => delta.efficiency = amount,
            Metric::Sustainability => delta.sustainability = amount,
            Metric::EarlyWarning => delta.early_warning = amount,
            Metric::Complexity => delta.complexity = amount,
        }
        delta
    }

    pub fn scaled(&self, scale: f64) -> Self {
        Self {
            visibility: self.visibility * scale,
            efficiency: self.efficiency * scale,
            sustainability: self.sustainability * scale,
            early_warning: self.early_warning * scale,
            complexity: self.complexity * scale,
        }
    }

    pub fn is_finite(&self) -> bool {
        Metric::ALL.iter().all(|m| self.get(*m).is_finite())
    }
}

/// How a dimension reads to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackLevel {
    Good,
    Fair,
    Poor,
}

/// Cut-offs for feedback, expressed on the "higher is better" scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FeedbackThresholds {
    pub good: f64,
    pub poor: f64,
}

impl Default for FeedbackThresholds {
    fn default() -> Self {
        Self {
            good: 60.0,
            poor: 30.0,
        }
    }
}

impl FeedbackThresholds {
    /// Complexity is read inverted (`100 - value`) before comparing
    pub fn classify(&self, metric: Metric, value: f64) -> FeedbackLevel {
        let score = if metric.higher_is_better() {
            value
        } else {
            METRIC_MAX - value
        };

        if score >= self.good {
            FeedbackLevel::Good
        } else if score <= self.poor {
            FeedbackLevel::Poor
        } else {
            FeedbackLevel::Fair
        }
    }
}
