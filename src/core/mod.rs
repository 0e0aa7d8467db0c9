pub mod error;
pub mod metrics;
pub mod types;

pub use error::{EngineError, Result};
pub use metrics::{
    FeedbackLevel, FeedbackThresholds, Metric, MetricDelta, Metrics, METRIC_MAX, METRIC_MIN,
};
pub use types::{Allocation, CardId, Round};
