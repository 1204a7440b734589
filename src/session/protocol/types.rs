use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::metrics::{Outcome, ResourceUsage, Sample};

/// First and only outbound message of a session.
///
/// Built by `TestParameters::validate`, so holding one means the parameters
/// passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StartRequest {
    pub(crate) url: String,
    pub(crate) requests: u64,
    pub(crate) concurrency: u64,
}

impl StartRequest {
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub const fn requests(&self) -> u64 {
        self.requests
    }

    #[must_use]
    pub const fn concurrency(&self) -> u64 {
        self.concurrency
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct WireMessage {
    #[serde(default)]
    pub(super) total_requests: Option<u64>,
    #[serde(default)]
    pub(super) success: Option<u64>,
    #[serde(default)]
    pub(super) failures: Option<u64>,
    #[serde(default)]
    pub(super) resource_usage: Option<WireResourceUsageList>,
}

/// Live updates carry one object, final results an array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum WireResourceUsageList {
    Many(Vec<WireResourceUsage>),
    One(WireResourceUsage),
}

impl WireResourceUsageList {
    pub(super) fn into_vec(self) -> Vec<WireResourceUsage> {
        match self {
            WireResourceUsageList::Many(items) => items,
            WireResourceUsageList::One(item) => vec![item],
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct WireResourceUsage {
    pub(super) timestamp: String,
    #[serde(default)]
    pub(super) response_time: Option<f64>,
    #[serde(default)]
    pub(super) cpu_usage: Option<f64>,
    #[serde(default)]
    pub(super) mem_usage: Option<f64>,
}

/// A decoded sample whose outcome is not attributed yet.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RawSample {
    pub(crate) timestamp: DateTime<Utc>,
    pub(crate) response_time: Duration,
    pub(crate) resources: ResourceUsage,
}

impl RawSample {
    pub(crate) const fn into_sample(self, outcome: Outcome) -> Sample {
        Sample {
            timestamp: self.timestamp,
            response_time: self.response_time,
            outcome,
            resources: self.resources,
        }
    }
}
