use std::path::Path;
use std::time::Duration;

use crate::metrics::{ResponseTimeSummary, SeriesSource};
use crate::session::FinalResult;

pub(crate) struct SummaryStats {
    pub(crate) success_rate_x100: u64,
    pub(crate) avg_rps_x100: u64,
}

pub(crate) fn compute_summary_stats(result: &FinalResult, elapsed: Duration) -> SummaryStats {
    let duration_ms = elapsed.as_millis().max(1);
    let counts = result.counts();
    let total = counts.total;

    let success_rate_x100 = if total > 0 {
        let scaled = u128::from(counts.success)
            .saturating_mul(10_000)
            .checked_div(u128::from(total))
            .unwrap_or(0);
        u64::try_from(scaled).unwrap_or(u64::MAX)
    } else {
        0
    };

    let avg_rps_x100 = if total > 0 {
        let scaled = u128::from(total)
            .saturating_mul(100_000)
            .checked_div(duration_ms)
            .unwrap_or(0);
        u64::try_from(scaled).unwrap_or(u64::MAX)
    } else {
        0
    };

    SummaryStats {
        success_rate_x100,
        avg_rps_x100,
    }
}

pub(crate) fn print_summary(
    result: &FinalResult,
    response_times: &ResponseTimeSummary,
    stats: &SummaryStats,
    elapsed: Duration,
    charts_dir: Option<&Path>,
) {
    let counts = result.counts();

    println!("Duration: {}s", elapsed.as_secs());
    println!("Requested: {}", result.total_requests());
    println!("Total Requests: {}", counts.total);
    println!(
        "Successful: {} ({}.{:02}%)",
        counts.success,
        stats.success_rate_x100 / 100,
        stats.success_rate_x100 % 100
    );
    println!("Failures: {}", counts.failures);
    println!("Error Rate: {}%", result.overall_error_rate());
    println!("Samples: {}", result.samples().len());
    println!(
        "Min/Mean/Max Response Time: {}ms / {}ms / {}ms",
        response_times.min.as_millis(),
        response_times.mean.as_millis(),
        response_times.max.as_millis()
    );
    println!(
        "P50/P90/P99 Response Time: {}ms / {}ms / {}ms",
        response_times.p50.as_millis(),
        response_times.p90.as_millis(),
        response_times.p99.as_millis()
    );
    println!(
        "Avg RPS: {}.{:02}",
        stats.avg_rps_x100 / 100,
        stats.avg_rps_x100 % 100
    );

    match charts_dir {
        Some(dir) => println!("Charts: {}", dir.display()),
        None => println!("Charts: disabled"),
    }
}
