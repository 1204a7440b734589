use std::time::Duration;

use serde::Serialize;

use super::Sample;

const NANOS_PER_MILLI: u128 = 1_000_000;
const HALF_MILLI_NANOS: u128 = 500_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResponseTimePoint {
    /// 1-based arrival index.
    pub index: u64,
    /// Response time rounded to the nearest millisecond (3 decimals of a second).
    pub response_time_ms: u64,
}

/// Maps samples to `(index, response time)` in arrival order, starting at 1.
#[must_use]
pub fn response_time_series(samples: &[Sample]) -> Vec<ResponseTimePoint> {
    samples
        .iter()
        .zip(1_u64..)
        .map(|(sample, index)| ResponseTimePoint {
            index,
            response_time_ms: round_to_millis(sample.response_time),
        })
        .collect()
}

pub(crate) fn round_to_millis(duration: Duration) -> u64 {
    let millis = duration
        .as_nanos()
        .saturating_add(HALF_MILLI_NANOS)
        .checked_div(NANOS_PER_MILLI)
        .unwrap_or(0);
    u64::try_from(millis).unwrap_or(u64::MAX)
}
