use std::fmt;

use tracing::{debug, info};

use crate::metrics::{ResourceUsage, SeriesSource};
use crate::session::{LiveSnapshot, RunId};

/// Logs live progress at every tenth of the requested count.
pub(crate) struct ProgressTracker {
    run: RunId,
    requested: u64,
    last_decile: u64,
}

impl ProgressTracker {
    pub(crate) const fn new(run: RunId, requested: u64) -> Self {
        Self {
            run,
            requested,
            last_decile: 0,
        }
    }

    pub(crate) fn observe(&mut self, snapshot: &LiveSnapshot) {
        let counts = snapshot.counts();
        let resources = snapshot.latest_resources().unwrap_or_default();
        debug!(
            "{} update: {} done, {} failed, {} samples",
            self.run,
            counts.total,
            counts.failures,
            snapshot.samples().len()
        );

        let decile = progress_decile(counts.total, self.requested);
        if decile <= self.last_decile {
            return;
        }
        self.last_decile = decile;
        info!(
            "Progress: {}/{} requests ({}%), error rate {}%, {}",
            counts.total,
            self.requested,
            decile.saturating_mul(10),
            snapshot.overall_error_rate(),
            ResourceReadout(resources)
        );
    }
}

/// Completed tenths of `requested`, capped at 10.
pub(crate) fn progress_decile(completed: u64, requested: u64) -> u64 {
    if requested == 0 {
        return 0;
    }
    let scaled = u128::from(completed)
        .saturating_mul(10)
        .checked_div(u128::from(requested))
        .unwrap_or(0);
    u64::try_from(scaled).unwrap_or(u64::MAX).min(10)
}

/// `CPU: 12.5% | Memory: 40.0%`, with `N/A` for missing readings.
pub(crate) struct ResourceReadout(pub(crate) ResourceUsage);

impl fmt::Display for ResourceReadout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CPU: ")?;
        write_reading(f, self.0.cpu_usage)?;
        f.write_str(" | Memory: ")?;
        write_reading(f, self.0.mem_usage)
    }
}

fn write_reading(f: &mut fmt::Formatter<'_>, value: Option<f64>) -> fmt::Result {
    match value {
        Some(value) => write!(f, "{:.1}%", value),
        None => f.write_str("N/A"),
    }
}
