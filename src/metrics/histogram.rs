use std::time::Duration;

use hdrhistogram::Histogram;

use crate::error::MetricsError;

use super::Sample;

/// Response times recorded in microseconds.
#[derive(Debug)]
pub struct ResponseTimeHistogram {
    hist: Histogram<u64>,
    sum_us: u128,
}

/// Distribution of a run's response times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResponseTimeSummary {
    pub count: u64,
    pub min: Duration,
    pub max: Duration,
    pub mean: Duration,
    pub p50: Duration,
    pub p90: Duration,
    pub p99: Duration,
}

impl ResponseTimeHistogram {
    /// Create an empty histogram.
    ///
    /// # Errors
    ///
    /// Returns an error if the histogram cannot be created.
    pub fn new() -> Result<Self, MetricsError> {
        let hist = Histogram::<u64>::new(3).map_err(|err| MetricsError::Histogram {
            context: "create response time histogram",
            source: Box::new(err),
        })?;
        Ok(Self { hist, sum_us: 0 })
    }

    /// Build a histogram over every sample's response time.
    ///
    /// # Errors
    ///
    /// Returns an error if a value cannot be recorded.
    pub fn from_samples(samples: &[Sample]) -> Result<Self, MetricsError> {
        let mut histogram = Self::new()?;
        for sample in samples {
            histogram.record(sample.response_time)?;
        }
        Ok(histogram)
    }

    /// Record one response time.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be recorded.
    pub fn record(&mut self, response_time: Duration) -> Result<(), MetricsError> {
        let micros = u64::try_from(response_time.as_micros()).unwrap_or(u64::MAX);
        self.hist
            .record(micros.max(1))
            .map_err(|err| MetricsError::Histogram {
                context: "record response time",
                source: Box::new(err),
            })?;
        self.sum_us = self.sum_us.saturating_add(u128::from(micros));
        Ok(())
    }

    #[must_use]
    pub fn count(&self) -> u64 {
        self.hist.len()
    }

    #[must_use]
    pub fn summary(&self) -> ResponseTimeSummary {
        let count = self.count();
        if count == 0 {
            return ResponseTimeSummary::default();
        }
        let mean_us = self.sum_us.checked_div(u128::from(count)).unwrap_or(0);
        ResponseTimeSummary {
            count,
            min: Duration::from_micros(self.hist.min()),
            max: Duration::from_micros(self.hist.max()),
            mean: Duration::from_micros(u64::try_from(mean_us).unwrap_or(u64::MAX)),
            p50: Duration::from_micros(self.hist.value_at_quantile(0.5)),
            p90: Duration::from_micros(self.hist.value_at_quantile(0.9)),
            p99: Duration::from_micros(self.hist.value_at_quantile(0.99)),
        }
    }
}
