use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ParameterField {
    #[error("requests")]
    RequestCount,
    #[error("concurrency")]
    Concurrency,
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Missing target URL (set --url or provide in config).")]
    MissingUrl,
    #[error("Invalid target URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Invalid backend URL '{url}': {source}")]
    InvalidBackendUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Backend URL '{url}' must use ws:// or wss://.")]
    UnsupportedBackendScheme { url: String },
    #[error("{field} must be within {min}..={max} (got {value}).")]
    OutOfRange {
        field: ParameterField,
        value: u64,
        min: u64,
        max: u64,
    },
    #[error("Duration must not be empty.")]
    DurationEmpty,
    #[error("Invalid duration '{value}'.")]
    InvalidDurationFormat { value: String },
    #[error("Invalid duration '{value}': {source}")]
    InvalidDurationNumber {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Duration overflow.")]
    DurationOverflow,
    #[error("Invalid duration unit '{unit}'.")]
    InvalidDurationUnit { unit: String },
    #[error("Duration must be > 0.")]
    DurationZero,
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}

impl ValidationError {
    pub(crate) fn out_of_range(
        field: ParameterField,
        value: u64,
        range: &std::ops::RangeInclusive<u64>,
    ) -> Self {
        ValidationError::OutOfRange {
            field,
            value,
            min: *range.start(),
            max: *range.end(),
        }
    }
}
