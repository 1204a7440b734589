//! Streaming telemetry session: one test run over one WebSocket connection.
//!
//! The [`SessionController`] is the public surface. It validates
//! [`TestParameters`], drives a [`SessionMachine`] on a spawned task, and fans
//! [`SessionEvent`]s out to subscribers.
mod controller;
mod driver;
mod events;
mod machine;
mod params;
pub(crate) mod protocol;
mod transport;

#[cfg(test)]
mod tests;

pub use controller::{SessionController, SessionSubscription};
pub use events::{FinalResult, LiveSnapshot, RunId, SessionEvent};
pub use machine::{SessionMachine, SessionState, Transition};
pub use params::{CONCURRENCY_RANGE, REQUEST_COUNT_RANGE, TestParameters};
pub use protocol::StartRequest;
pub use transport::{Connection, Connector, WebSocketConnector};
