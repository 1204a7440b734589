use std::fmt;
use std::sync::Arc;

use crate::error::{MetricsError, SessionError};
use crate::metrics::{ResponseTimeHistogram, ResponseTimeSummary, Sample, SeriesSource};

/// Identifies one `start()` call on a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RunId(u64);

impl RunId {
    pub(crate) const fn new(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "run-{}", self.0)
    }
}

/// In-progress view of a running session, superseded by the next one.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveSnapshot {
    pub(crate) success_count: u64,
    pub(crate) failure_count: u64,
    pub(crate) samples: Arc<Vec<Sample>>,
}

/// Authoritative aggregate of a completed session.
#[derive(Debug, Clone, PartialEq)]
pub struct FinalResult {
    pub(crate) total_requests: u64,
    pub(crate) success_count: u64,
    pub(crate) failure_count: u64,
    pub(crate) samples: Arc<Vec<Sample>>,
}

impl FinalResult {
    #[must_use]
    pub const fn total_requests(&self) -> u64 {
        self.total_requests
    }

    /// Response-time distribution over every sample of the run.
    ///
    /// # Errors
    ///
    /// Returns an error if the histogram cannot be built.
    pub fn response_time_summary(&self) -> Result<ResponseTimeSummary, MetricsError> {
        Ok(ResponseTimeHistogram::from_samples(&self.samples)?.summary())
    }
}

impl SeriesSource for LiveSnapshot {
    fn samples(&self) -> &[Sample] {
        &self.samples
    }

    fn success_count(&self) -> u64 {
        self.success_count
    }

    fn failure_count(&self) -> u64 {
        self.failure_count
    }
}

impl SeriesSource for FinalResult {
    fn samples(&self) -> &[Sample] {
        &self.samples
    }

    fn success_count(&self) -> u64 {
        self.success_count
    }

    fn failure_count(&self) -> u64 {
        self.failure_count
    }
}

/// What subscribers receive: zero or more snapshots, then exactly one of
/// `Completed`, `Failed` or `Cancelled` per run.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    Snapshot {
        run: RunId,
        snapshot: LiveSnapshot,
    },
    Completed {
        run: RunId,
        result: FinalResult,
    },
    Failed {
        run: RunId,
        error: Arc<SessionError>,
    },
    Cancelled {
        run: RunId,
    },
}

impl SessionEvent {
    #[must_use]
    pub const fn run(&self) -> RunId {
        match self {
            SessionEvent::Snapshot { run, .. }
            | SessionEvent::Completed { run, .. }
            | SessionEvent::Failed { run, .. }
            | SessionEvent::Cancelled { run } => *run,
        }
    }

    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, SessionEvent::Snapshot { .. })
    }
}
