//! Telemetry samples and the series derived from them.
//!
//! Every series is a pure function of `(samples, success, failures)`: nothing
//! here keeps state between calls, so recomputing from an unchanged buffer
//! always yields the same output.
mod error_rate;
mod histogram;
mod response_time;
mod series;
mod throughput;
mod types;


pub use error_rate::{ErrorRate, ErrorRatePoint, error_rate, error_rate_series};
pub use histogram::{ResponseTimeHistogram, ResponseTimeSummary};
pub use response_time::{ResponseTimePoint, response_time_series};
pub use series::{DerivedSeries, RequestCounts, SeriesSource};
pub use throughput::{ThroughputPoint, throughput_series};
pub use types::{Outcome, ResourceUsage, Sample};

/// Width of the wrap-around used for bucket labels.
pub(crate) const LABEL_WRAP_SECONDS: i64 = 60;

pub(crate) fn bucket_label(bucket: i64) -> u32 {
    u32::try_from(bucket.rem_euclid(LABEL_WRAP_SECONDS)).unwrap_or(0)
}
