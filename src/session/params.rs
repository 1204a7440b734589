use std::ops::RangeInclusive;

use url::Url;

use crate::error::{ParameterField, ValidationError};

use super::protocol::StartRequest;

/// Accepted request counts. Values outside are rejected, never clamped.
pub const REQUEST_COUNT_RANGE: RangeInclusive<u64> = 1..=10_000;
/// Accepted concurrency levels. Values outside are rejected, never clamped.
pub const CONCURRENCY_RANGE: RangeInclusive<u64> = 1..=500;

/// Parameters of one test run as submitted by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestParameters {
    pub target_url: String,
    pub request_count: u64,
    pub concurrency: u64,
}

impl TestParameters {
    #[must_use]
    pub fn new(target_url: impl Into<String>, request_count: u64, concurrency: u64) -> Self {
        Self {
            target_url: target_url.into(),
            request_count,
            concurrency,
        }
    }

    /// Check the parameters and build the outbound start request.
    ///
    /// # Errors
    ///
    /// Returns an error when the target URL is missing or not absolute, or
    /// when a count falls outside its accepted range.
    pub fn validate(&self) -> Result<StartRequest, ValidationError> {
        let target = self.target_url.trim();
        if target.is_empty() {
            return Err(ValidationError::MissingUrl);
        }
        Url::parse(target).map_err(|err| ValidationError::InvalidUrl {
            url: target.to_owned(),
            source: err,
        })?;

        if !REQUEST_COUNT_RANGE.contains(&self.request_count) {
            return Err(ValidationError::out_of_range(
                ParameterField::RequestCount,
                self.request_count,
                &REQUEST_COUNT_RANGE,
            ));
        }
        if !CONCURRENCY_RANGE.contains(&self.concurrency) {
            return Err(ValidationError::out_of_range(
                ParameterField::Concurrency,
                self.concurrency,
                &CONCURRENCY_RANGE,
            ));
        }

        Ok(StartRequest {
            url: target.to_owned(),
            requests: self.request_count,
            concurrency: self.concurrency,
        })
    }
}
