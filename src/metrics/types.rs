use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Success,
    Failure,
}

/// Optional host metrics the backend attaches to a sample.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ResourceUsage {
    pub cpu_usage: Option<f64>,
    pub mem_usage: Option<f64>,
}

/// One observed request outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub timestamp: DateTime<Utc>,
    pub response_time: Duration,
    pub outcome: Outcome,
    pub resources: ResourceUsage,
}

impl Sample {
    /// Epoch second this sample falls into (floor of the timestamp).
    #[must_use]
    pub fn bucket(&self) -> i64 {
        self.timestamp.timestamp()
    }
}
