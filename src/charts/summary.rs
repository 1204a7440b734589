use std::path::Path;

use plotters::prelude::*;

use crate::error::AppResult;
use crate::metrics::RequestCounts;

use super::CHART_SIZE;

const BARS: [(&str, RGBColor); 3] = [
    ("Total", RGBColor(52, 152, 219)),
    ("Success", RGBColor(46, 204, 113)),
    ("Failures", RGBColor(231, 76, 60)),
];

/// Bar chart of total, successful and failed requests.
///
/// # Errors
///
/// Returns an error when the chart cannot be rendered.
pub fn plot_requests_summary(counts: &RequestCounts, path: &Path) -> AppResult<()> {
    if counts.total == 0 {
        return Ok(());
    }
    let values = [counts.total, counts.success, counts.failures];
    let y_max = values.iter().copied().max().unwrap_or(1);

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Requests Summary", ("sans-serif", 30).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(
            (0u32..2u32).into_segmented(),
            0u64..y_max.saturating_add(1),
        )?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(BARS.len())
        .x_label_formatter(&|value| {
            let index = match value {
                SegmentValue::Exact(index) | SegmentValue::CenterOf(index) => *index,
                SegmentValue::Last => return String::new(),
            };
            usize::try_from(index)
                .ok()
                .and_then(|index| BARS.get(index))
                .map(|(label, _)| (*label).to_owned())
                .unwrap_or_default()
        })
        .y_desc("Requests")
        .draw()?;

    for ((_, color), (index, value)) in BARS.iter().zip((0u32..).zip(values)) {
        chart.draw_series(
            Histogram::vertical(&chart)
                .style(color.filled())
                .margin(40)
                .data([(index, value)]),
        )?;
    }

    root.present()?;
    Ok(())
}
