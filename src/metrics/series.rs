use serde::Serialize;

use super::{
    ErrorRate, ErrorRatePoint, ResourceUsage, ResponseTimePoint, Sample, ThroughputPoint,
    error_rate, error_rate_series, response_time_series, throughput_series,
};

/// Totals behind the requests summary chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RequestCounts {
    pub total: u64,
    pub success: u64,
    pub failures: u64,
}

/// The three chart projections of one sample set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DerivedSeries {
    pub throughput: Vec<ThroughputPoint>,
    pub error_rate: Vec<ErrorRatePoint>,
    pub response_time: Vec<ResponseTimePoint>,
}

impl DerivedSeries {
    #[must_use]
    pub fn compute(samples: &[Sample], success: u64, failures: u64) -> Self {
        Self {
            throughput: throughput_series(samples),
            error_rate: error_rate_series(samples, success, failures),
            response_time: response_time_series(samples),
        }
    }
}

/// Read-only view shared by live snapshots and final results.
///
/// Implementors expose their buffer and counters; every projection is
/// recomputed from them on each call.
pub trait SeriesSource {
    fn samples(&self) -> &[Sample];
    fn success_count(&self) -> u64;
    fn failure_count(&self) -> u64;

    fn counts(&self) -> RequestCounts {
        RequestCounts {
            total: self.success_count().saturating_add(self.failure_count()),
            success: self.success_count(),
            failures: self.failure_count(),
        }
    }

    fn throughput(&self) -> Vec<ThroughputPoint> {
        throughput_series(self.samples())
    }

    fn error_rate(&self) -> Vec<ErrorRatePoint> {
        error_rate_series(self.samples(), self.success_count(), self.failure_count())
    }

    fn response_time(&self) -> Vec<ResponseTimePoint> {
        response_time_series(self.samples())
    }

    fn series(&self) -> DerivedSeries {
        DerivedSeries::compute(self.samples(), self.success_count(), self.failure_count())
    }

    fn overall_error_rate(&self) -> ErrorRate {
        error_rate(self.success_count(), self.failure_count())
    }

    /// Resource readings of the most recent sample.
    fn latest_resources(&self) -> Option<ResourceUsage> {
        self.samples().last().map(|sample| sample.resources)
    }
}
