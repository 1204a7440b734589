use std::time::Duration;

use serde::Deserialize;

use crate::args::parse_duration_arg;
use crate::error::{ConfigError, ValidationError};

/// Every key is optional; a flag given on the command line wins over it.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub backend: Option<String>,
    pub url: Option<String>,
    pub requests: Option<u64>,
    pub concurrency: Option<u64>,
    pub connect_timeout: Option<DurationValue>,
    pub charts_path: Option<String>,
    pub no_charts: Option<bool>,
    pub export_json: Option<String>,
    pub summary: Option<bool>,
    pub verbose: Option<bool>,
}

/// Integer seconds or a duration string such as `"500ms"`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self, field: &'static str) -> Result<Duration, ConfigError> {
        match self {
            DurationValue::Seconds(secs) => {
                if *secs == 0 {
                    Err(ConfigError::InvalidDuration {
                        field,
                        source: ValidationError::DurationZero,
                    })
                } else {
                    Ok(Duration::from_secs(*secs))
                }
            }
            DurationValue::Text(text) => parse_duration_arg(text)
                .map_err(|err| ConfigError::InvalidDuration { field, source: err }),
        }
    }
}
