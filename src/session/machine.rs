use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::error::SessionError;
use crate::metrics::{Outcome, Sample};

use super::events::{FinalResult, LiveSnapshot};
use super::protocol::{Inbound, InboundCounts, RawSample, StartRequest, decode_message};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Connecting,
    Running,
    Completed,
    Failed,
}

impl SessionState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::Connecting => "connecting",
            SessionState::Running => "running",
            SessionState::Completed => "completed",
            SessionState::Failed => "failed",
        }
    }

    /// `Connecting` and `Running` own a connection; a new start must wait.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, SessionState::Connecting | SessionState::Running)
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, SessionState::Completed | SessionState::Failed)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of feeding one inbound message to a running session.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    Snapshot(LiveSnapshot),
    Completed(FinalResult),
}

/// Lifecycle and sample buffer of one session, free of any I/O.
///
/// The buffer is append-only while running. Snapshots share it through an
/// `Arc`; appending after a snapshot was handed out copies on write, so a
/// snapshot never observes later samples.
#[derive(Debug)]
pub struct SessionMachine {
    state: SessionState,
    samples: Arc<Vec<Sample>>,
    success: u64,
    failures: u64,
}

impl Default for SessionMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionMachine {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
            samples: Arc::new(Vec::new()),
            success: 0,
            failures: 0,
        }
    }

    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Shared read-only view of the current buffer.
    #[must_use]
    pub fn buffered_samples(&self) -> Arc<Vec<Sample>> {
        Arc::clone(&self.samples)
    }

    /// `Idle | Completed | Failed -> Connecting` with a fresh buffer.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Conflict`] while a session is connecting or
    /// running; the active session is left untouched.
    pub fn begin(&mut self, request: &StartRequest) -> Result<(), SessionError> {
        if self.state.is_active() {
            return Err(SessionError::Conflict { state: self.state });
        }
        debug!(
            "Starting session for {} ({} requests, concurrency {})",
            request.url(),
            request.requests(),
            request.concurrency()
        );
        self.reset(SessionState::Connecting);
        Ok(())
    }

    /// `Connecting -> Running`.
    ///
    /// # Errors
    ///
    /// Returns an error when the machine is not connecting.
    pub fn connected(&mut self) -> Result<(), SessionError> {
        if self.state != SessionState::Connecting {
            return Err(SessionError::InvalidTransition {
                state: self.state,
                event: "connection established",
            });
        }
        self.state = SessionState::Running;
        Ok(())
    }

    /// Classify and absorb one inbound payload.
    ///
    /// A live update appends its samples and yields a snapshot; a final
    /// message yields the result and moves to `Completed`, releasing the
    /// buffer. A malformed payload moves to `Failed` and discards the buffer.
    ///
    /// # Errors
    ///
    /// Returns a protocol error for malformed payloads, or an invalid
    /// transition error when the machine is not running.
    pub fn handle_payload(&mut self, payload: &[u8]) -> Result<Transition, SessionError> {
        if self.state != SessionState::Running {
            return Err(SessionError::InvalidTransition {
                state: self.state,
                event: "inbound message",
            });
        }

        let inbound = match decode_message(payload) {
            Ok(inbound) => inbound,
            Err(err) => {
                self.reset(SessionState::Failed);
                return Err(err.into());
            }
        };

        match inbound {
            Inbound::Update { counts, samples } => {
                self.absorb(counts, samples);
                Ok(Transition::Snapshot(LiveSnapshot {
                    success_count: self.success,
                    failure_count: self.failures,
                    samples: Arc::clone(&self.samples),
                }))
            }
            Inbound::Final {
                total_requests,
                counts,
                samples,
            } => {
                self.absorb(counts, samples);
                let result = FinalResult {
                    total_requests,
                    success_count: self.success,
                    failure_count: self.failures,
                    samples: std::mem::take(&mut self.samples),
                };
                self.reset(SessionState::Completed);
                Ok(Transition::Completed(result))
            }
        }
    }

    /// `Connecting | Running -> Failed`, discarding any partial buffer.
    pub fn fail(&mut self, error: impl Into<SessionError>) -> SessionError {
        self.reset(SessionState::Failed);
        error.into()
    }

    /// `(any) -> Idle`, discarding the buffer.
    pub fn cancel(&mut self) {
        self.reset(SessionState::Idle);
    }

    fn reset(&mut self, state: SessionState) {
        self.state = state;
        self.samples = Arc::new(Vec::new());
        self.success = 0;
        self.failures = 0;
    }

    /// Append samples, attributing the increase in `failures` to the last
    /// samples of the message.
    fn absorb(&mut self, counts: InboundCounts, samples: Vec<RawSample>) {
        let failures = counts.failures.unwrap_or(self.failures);
        let new_failures = failures.saturating_sub(self.failures);
        let failing = usize::try_from(new_failures)
            .unwrap_or(usize::MAX)
            .min(samples.len());
        let first_failing = samples.len().saturating_sub(failing);

        let buffer = Arc::make_mut(&mut self.samples);
        buffer.reserve(samples.len());
        for (position, raw) in samples.into_iter().enumerate() {
            let outcome = if position >= first_failing {
                Outcome::Failure
            } else {
                Outcome::Success
            };
            buffer.push(raw.into_sample(outcome));
        }

        self.success = counts.success.unwrap_or(self.success);
        self.failures = failures;
    }
}
