//! PNG export of a completed session's series.
mod error_rate;
mod naming;
mod response_time;
mod rps;
mod summary;


use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{error, info};

use crate::error::AppResult;
use crate::metrics::SeriesSource;

pub use error_rate::plot_error_rate;
pub use naming::resolve_chart_output_dir;
pub use response_time::plot_response_time;
pub use rps::plot_requests_per_second;
pub use summary::plot_requests_summary;

const CHART_SIZE: (u32, u32) = (1600, 600);

/// Render every chart of `source` into a fresh run directory under
/// `charts_path`. Charts without data are skipped.
///
/// Returns the run directory, or `None` when there was nothing to plot.
///
/// # Errors
///
/// Returns an error when the directory cannot be created or a chart fails to
/// render.
pub async fn export_charts<S: SeriesSource>(
    source: &S,
    charts_path: &str,
    target_url: &str,
) -> AppResult<Option<PathBuf>> {
    let counts = source.counts();
    if source.samples().is_empty() && counts.total == 0 {
        return Ok(None);
    }
    let output_dir = resolve_chart_output_dir(charts_path, target_url);

    if let Err(e) = fs::create_dir_all(&output_dir).await {
        error!(
            "Failed to create output directory '{}': {}",
            output_dir.display(),
            e
        );
        return Err(e.into());
    }

    info!("Plotting requests summary...");
    plot_requests_summary(&counts, &chart_file(&output_dir, "requests_summary.png"))?;

    info!("Plotting response time...");
    plot_response_time(
        &source.response_time(),
        &chart_file(&output_dir, "response_time.png"),
    )?;

    info!("Plotting requests per second...");
    plot_requests_per_second(
        &source.throughput(),
        &chart_file(&output_dir, "requests_per_second.png"),
    )?;

    info!("Plotting error rate...");
    plot_error_rate(
        &source.error_rate(),
        &chart_file(&output_dir, "error_rate.png"),
    )?;

    Ok(Some(output_dir))
}

fn chart_file(dir: &Path, name: &str) -> PathBuf {
    dir.join(name)
}
