use std::path::Path;

use plotters::prelude::*;

use crate::error::AppResult;
use crate::metrics::ResponseTimePoint;

use super::CHART_SIZE;

/// Response time of each request in arrival order.
///
/// # Errors
///
/// Returns an error when the chart cannot be rendered.
pub fn plot_response_time(points: &[ResponseTimePoint], path: &Path) -> AppResult<()> {
    let Some(last) = points.last() else {
        return Ok(());
    };
    let x_range = 1u64..last.index.saturating_add(1);
    let y_max = points
        .iter()
        .map(|point| point.response_time_ms)
        .max()
        .unwrap_or(0);
    let y_range = 0u64..y_max.saturating_add(1);

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Response Time", ("sans-serif", 30).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .x_desc("Request")
        .y_desc("Response Time (ms)")
        .draw()?;

    chart.draw_series(LineSeries::new(
        points
            .iter()
            .map(|point| (point.index, point.response_time_ms)),
        &BLUE,
    ))?;

    root.present()?;
    Ok(())
}
