use std::path::Path;

use plotters::prelude::*;

use crate::error::AppResult;
use crate::metrics::{ThroughputPoint, bucket_label};

use super::CHART_SIZE;

/// Requests per one-second bucket. The axis shows second-of-minute labels.
///
/// # Errors
///
/// Returns an error when the chart cannot be rendered.
pub fn plot_requests_per_second(points: &[ThroughputPoint], path: &Path) -> AppResult<()> {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return Ok(());
    };
    let x_range = first.bucket..last.bucket.saturating_add(1);
    let y_max = points.iter().map(|point| point.requests).max().unwrap_or(1);
    let y_range = 0u64..y_max.saturating_add(1);

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Requests per Second", ("sans-serif", 30).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(40)
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .x_desc("Second")
        .y_desc("Requests per Second")
        .x_label_formatter(&|bucket| bucket_label(*bucket).to_string())
        .draw()?;

    chart.draw_series(LineSeries::new(
        points.iter().map(|point| (point.bucket, point.requests)),
        &BLUE,
    ))?;

    root.present()?;
    Ok(())
}
