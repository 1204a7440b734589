use std::collections::BTreeMap;

use serde::Serialize;

use super::{Sample, bucket_label};

/// Requests observed within one epoch second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThroughputPoint {
    pub bucket: i64,
    pub label_second: u32,
    pub requests: u64,
}

/// Counts samples per epoch-second bucket, ascending by bucket.
///
/// Buckets are keyed by the full epoch second; only `label_second` wraps at
/// 60, so samples a minute apart never collide.
#[must_use]
pub fn throughput_series(samples: &[Sample]) -> Vec<ThroughputPoint> {
    let mut buckets: BTreeMap<i64, u64> = BTreeMap::new();
    for sample in samples {
        let count = buckets.entry(sample.bucket()).or_insert(0);
        *count = count.saturating_add(1);
    }

    buckets
        .into_iter()
        .map(|(bucket, requests)| ThroughputPoint {
            bucket,
            label_second: bucket_label(bucket),
            requests,
        })
        .collect()
}
