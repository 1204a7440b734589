//! Core library for the `loadscope` CLI.
//!
//! The centre of the crate is the streaming telemetry [`session`]: a
//! [`session::SessionController`] starts one load test at a time against a
//! load-generation backend over WebSocket, classifies every inbound message as
//! a live update or the final result, and fans snapshots out to subscribers.
//! [`metrics`] turns a session's samples into throughput, error-rate and
//! response-time series; [`charts`] renders them to PNG.
pub mod args;
pub mod charts;
pub mod config;
pub mod error;
pub mod metrics;
pub mod session;
