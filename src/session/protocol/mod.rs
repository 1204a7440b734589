//! Wire format spoken with the load-generation backend.
//!
//! Outbound there is a single [`StartRequest`]. Inbound messages carry no type
//! tag: a truthy `total_requests` field marks the final result, anything else
//! is a live update.
mod decode;
mod types;

pub(crate) use decode::{Inbound, InboundCounts, decode_message};
pub use types::StartRequest;
pub(crate) use types::RawSample;
