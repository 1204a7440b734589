use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::AppResult;
use crate::metrics::{
    DerivedSeries, ErrorRate, Outcome, RequestCounts, ResponseTimeSummary, Sample, SeriesSource,
};
use crate::session::FinalResult;

#[derive(Debug, Serialize)]
struct ResultExport {
    total_requests: u64,
    counts: RequestCounts,
    error_rate: ErrorRate,
    response_time_ms: ResponseTimeExport,
    samples: Vec<SampleExport>,
    series: DerivedSeries,
}

#[derive(Debug, Serialize)]
struct ResponseTimeExport {
    min: u64,
    mean: u64,
    max: u64,
    p50: u64,
    p90: u64,
    p99: u64,
}

#[derive(Debug, Serialize)]
struct SampleExport {
    timestamp: String,
    response_time_ms: u64,
    outcome: Outcome,
    cpu_usage: Option<f64>,
    mem_usage: Option<f64>,
}

fn millis(duration: std::time::Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

impl ResponseTimeExport {
    fn new(summary: &ResponseTimeSummary) -> Self {
        Self {
            min: millis(summary.min),
            mean: millis(summary.mean),
            max: millis(summary.max),
            p50: millis(summary.p50),
            p90: millis(summary.p90),
            p99: millis(summary.p99),
        }
    }
}

impl SampleExport {
    fn new(sample: &Sample) -> Self {
        Self {
            timestamp: sample.timestamp.to_rfc3339(),
            response_time_ms: millis(sample.response_time),
            outcome: sample.outcome,
            cpu_usage: sample.resources.cpu_usage,
            mem_usage: sample.resources.mem_usage,
        }
    }
}

/// Write the final result, its samples and the derived series as pretty JSON.
pub(crate) fn export_json(
    path: &Path,
    result: &FinalResult,
    response_times: &ResponseTimeSummary,
) -> AppResult<()> {
    let payload = ResultExport {
        total_requests: result.total_requests(),
        counts: result.counts(),
        error_rate: result.overall_error_rate(),
        response_time_ms: ResponseTimeExport::new(response_times),
        samples: result.samples().iter().map(SampleExport::new).collect(),
        series: result.series(),
    };

    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, &payload)?;
    writer.flush()?;
    Ok(())
}
