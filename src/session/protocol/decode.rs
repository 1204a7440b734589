use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::error::ProtocolError;
use crate::metrics::ResourceUsage;

use super::types::{RawSample, WireMessage, WireResourceUsage};

/// Cumulative counters as reported by the backend; `None` when omitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct InboundCounts {
    pub(crate) success: Option<u64>,
    pub(crate) failures: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Inbound {
    Update {
        counts: InboundCounts,
        samples: Vec<RawSample>,
    },
    Final {
        total_requests: u64,
        counts: InboundCounts,
        samples: Vec<RawSample>,
    },
}

/// Parse one inbound payload and classify it as live update or final result.
///
/// # Errors
///
/// Returns an error when the payload is not a JSON object of the expected
/// shape, or when a sample carries an invalid timestamp or response time.
pub(crate) fn decode_message(payload: &[u8]) -> Result<Inbound, ProtocolError> {
    let message: WireMessage =
        serde_json::from_slice(payload).map_err(|err| ProtocolError::Decode { source: err })?;

    let counts = InboundCounts {
        success: message.success,
        failures: message.failures,
    };
    let samples = message
        .resource_usage
        .map(|usage| usage.into_vec())
        .unwrap_or_default()
        .into_iter()
        .map(decode_sample)
        .collect::<Result<Vec<_>, _>>()?;

    match message.total_requests {
        Some(total_requests) if total_requests > 0 => Ok(Inbound::Final {
            total_requests,
            counts,
            samples,
        }),
        Some(_) | None => Ok(Inbound::Update { counts, samples }),
    }
}

fn decode_sample(usage: WireResourceUsage) -> Result<RawSample, ProtocolError> {
    let timestamp = DateTime::parse_from_rfc3339(usage.timestamp.trim())
        .map_err(|err| ProtocolError::InvalidTimestamp {
            value: usage.timestamp.clone(),
            source: err,
        })?
        .with_timezone(&Utc);

    let seconds = usage.response_time.unwrap_or(0.0);
    let response_time = Duration::try_from_secs_f64(seconds)
        .map_err(|_err| ProtocolError::InvalidResponseTime { value: seconds })?;

    Ok(RawSample {
        timestamp,
        response_time,
        resources: ResourceUsage {
            cpu_usage: usage.cpu_usage,
            mem_usage: usage.mem_usage,
        },
    })
}
