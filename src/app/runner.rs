use std::path::{Path, PathBuf};

use tokio::time::Instant;
use tracing::{error, info, warn};

use crate::args::LoadscopeArgs;
use crate::charts::export_charts;
use crate::error::{AppError, AppResult};
use crate::session::{
    FinalResult, SessionController, SessionEvent, TestParameters, WebSocketConnector,
};
use crate::shutdown::{setup_signal_shutdown_handler, shutdown_channel};

use super::export::export_json;
use super::progress::ProgressTracker;
use super::summary::{compute_summary_stats, print_summary};

/// Run one session against the configured backend until it reaches a
/// terminal event, then report it.
///
/// # Errors
///
/// Returns an error when the parameters are rejected, the session fails or is
/// cancelled, or the JSON export cannot be written.
pub(crate) async fn run_session(args: &LoadscopeArgs) -> AppResult<()> {
    let params = args.test_parameters();
    let connector = WebSocketConnector::new(args.backend.clone(), args.connect_timeout);
    info!("Using backend {}", connector.endpoint());
    let controller = SessionController::new(connector);
    let mut events = controller.subscribe();

    let run = match controller.start(&params) {
        Ok(run) => run,
        Err(err) => {
            error!("{}", err);
            return Err(err.into());
        }
    };

    let (shutdown_tx, mut shutdown_rx) = shutdown_channel();
    let signal_handle = setup_signal_shutdown_handler(&shutdown_tx);
    let started = Instant::now();
    let mut progress = ProgressTracker::new(run, params.request_count);
    let mut cancel_requested = false;

    let outcome = loop {
        tokio::select! {
            _ = shutdown_rx.recv(), if !cancel_requested => {
                warn!("Shutdown requested; cancelling {}", run);
                cancel_requested = true;
                controller.cancel();
            }
            event = events.recv() => {
                let Some(event) = event else {
                    break Err(AppError::Cancelled);
                };
                if event.run() != run {
                    continue;
                }
                match event {
                    SessionEvent::Snapshot { snapshot, .. } => progress.observe(&snapshot),
                    SessionEvent::Completed { result, .. } => {
                        break report_completed(args, &params, &result, started).await;
                    }
                    SessionEvent::Failed { error, .. } => {
                        error!("{} failed: {}", run, error);
                        break Err(AppError::SessionFailed(error));
                    }
                    SessionEvent::Cancelled { .. } => {
                        warn!("{} cancelled", run);
                        break Err(AppError::Cancelled);
                    }
                }
            }
        }
    };

    drop(shutdown_tx.send(()));
    signal_handle.await?;
    outcome
}

async fn report_completed(
    args: &LoadscopeArgs,
    params: &TestParameters,
    result: &FinalResult,
    started: Instant,
) -> AppResult<()> {
    let elapsed = started.elapsed();
    let response_times = result.response_time_summary()?;

    let charts_dir = if args.no_charts {
        None
    } else {
        export_charts_logged(result, &args.charts_path, &params.target_url).await
    };

    if let Some(path) = args.export_json.as_deref() {
        export_json(Path::new(path), result, &response_times)?;
        info!("Exported final result to {}", path);
    }

    if !args.no_summary {
        let stats = compute_summary_stats(result, elapsed);
        print_summary(
            result,
            &response_times,
            &stats,
            elapsed,
            charts_dir.as_deref(),
        );
    }
    Ok(())
}

async fn export_charts_logged(
    result: &FinalResult,
    charts_path: &str,
    target_url: &str,
) -> Option<PathBuf> {
    match export_charts(result, charts_path, target_url).await {
        Ok(Some(dir)) => {
            info!("Charts written to {}", dir.display());
            Some(dir)
        }
        Ok(None) => {
            info!("No samples to chart");
            None
        }
        Err(err) => {
            warn!("Failed to export charts: {}", err);
            None
        }
    }
}
