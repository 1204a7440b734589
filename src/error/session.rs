use std::time::Duration;

use thiserror::Error;
use tokio_tungstenite::tungstenite;

use super::ValidationError;
use crate::session::SessionState;

/// Terminal error of a single session, or a synchronous rejection of `start`.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Invalid test parameters: {0}")]
    Validation(#[from] ValidationError),
    #[error("Transport failure: {0}")]
    Transport(#[from] TransportError),
    #[error("Protocol violation: {0}")]
    Protocol(#[from] ProtocolError),
    #[error("A session is already {state}; cancel it before starting another.")]
    Conflict { state: SessionState },
    #[error("Cannot handle {event} while {state}.")]
    InvalidTransition {
        state: SessionState,
        event: &'static str,
    },
    #[error("Sessions must be started from within a Tokio runtime.")]
    NoRuntime,
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

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Failed to connect to {endpoint}: {source}")]
    Connect {
        endpoint: String,
        #[source]
        source: Box<tungstenite::Error>,
    },
    #[error("Timed out after {}ms connecting to {endpoint}.", .timeout.as_millis())]
    ConnectTimeout { endpoint: String, timeout: Duration },
    #[error("Failed to send {context}: {source}")]
    Send {
        context: &'static str,
        #[source]
        source: Box<tungstenite::Error>,
    },
    #[error("Failed to receive message: {source}")]
    Receive {
        #[source]
        source: Box<tungstenite::Error>,
    },
    #[error("Connection closed before the final result arrived.")]
    ConnectionClosed,
}

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("Failed to encode {context}: {source}")]
    Encode {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("Inbound message is not valid JSON of the expected shape: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid sample timestamp '{value}': {source}")]
    InvalidTimestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
    #[error("Invalid sample response_time {value}; expected a finite number >= 0.")]
    InvalidResponseTime { value: f64 },
}
