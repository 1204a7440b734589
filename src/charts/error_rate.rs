use std::path::Path;

use plotters::prelude::*;

use crate::error::AppResult;
use crate::metrics::{ErrorRate, ErrorRatePoint, bucket_label};

use super::CHART_SIZE;

const FULL_SCALE_HUNDREDTHS: u64 = 10_000;

/// Error rate per occupied bucket, in percent.
///
/// # Errors
///
/// Returns an error when the chart cannot be rendered.
pub fn plot_error_rate(points: &[ErrorRatePoint], path: &Path) -> AppResult<()> {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return Ok(());
    };
    let x_range = first.bucket..last.bucket.saturating_add(1);
    let y_range = 0u64..FULL_SCALE_HUNDREDTHS.saturating_add(1);

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Error Rate", ("sans-serif", 30).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .x_desc("Second")
        .y_desc("Error Rate (%)")
        .x_label_formatter(&|bucket| bucket_label(*bucket).to_string())
        .y_label_formatter(&|value| ErrorRate::from_hundredths(*value).to_string())
        .draw()?;

    chart.draw_series(LineSeries::new(
        points
            .iter()
            .map(|point| (point.bucket, point.error_rate.hundredths())),
        &RED,
    ))?;

    root.present()?;
    Ok(())
}
