use std::sync::Arc;

use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use crate::error::{ProtocolError, SessionError, TransportError};

use super::controller::{ControllerState, SharedState, lock_state};
use super::events::{RunId, SessionEvent};
use super::machine::Transition;
use super::protocol::StartRequest;
use super::transport::Connector;

enum Flow {
    Continue,
    Stop,
}

/// Runs one session: connect, send the start request, then absorb inbound
/// messages strictly one at a time until a terminal state.
///
/// Every state change happens under the controller lock and only while `run`
/// is still the current run, so a cancelled run can never emit again.
pub(super) async fn drive_session<C: Connector>(
    connector: Arc<C>,
    shared: SharedState,
    run: RunId,
    request: StartRequest,
    mut cancel_rx: oneshot::Receiver<()>,
) {
    let connected = tokio::select! {
        biased;
        _ = &mut cancel_rx => {
            debug!("{} cancelled while connecting", run);
            return;
        }
        result = connector.connect() => result,
    };
    let mut connection = match connected {
        Ok(connection) => connection,
        Err(err) => {
            fail_run(&shared, run, err);
            return;
        }
    };

    if let Flow::Stop = mark_connected(&shared, run) {
        connection.close().await;
        return;
    }

    let payload = match serde_json::to_string(&request) {
        Ok(payload) => payload,
        Err(err) => {
            let error = ProtocolError::Encode {
                context: "start request",
                source: err,
            };
            fail_run(&shared, run, error);
            connection.close().await;
            return;
        }
    };

    let sent = tokio::select! {
        biased;
        _ = &mut cancel_rx => {
            connection.close().await;
            return;
        }
        result = connection.send_text(payload) => result,
    };
    if let Err(err) = sent {
        fail_run(&shared, run, err);
        connection.close().await;
        return;
    }
    info!("{} start request sent", run);

    loop {
        let next = tokio::select! {
            biased;
            _ = &mut cancel_rx => {
                debug!("{} cancelled; closing connection", run);
                connection.close().await;
                return;
            }
            next = connection.next_payload() => next,
        };
        if let Flow::Stop = handle_next(&shared, run, next) {
            connection.close().await;
            return;
        }
    }
}

fn mark_connected(shared: &SharedState, run: RunId) -> Flow {
    let mut state = lock_state(shared);
    if !state.is_current(run) {
        return Flow::Stop;
    }
    match state.machine.connected() {
        Ok(()) => {
            info!("{} connected", run);
            Flow::Continue
        }
        Err(err) => {
            fail_locked(&mut state, run, err);
            Flow::Stop
        }
    }
}

fn handle_next(
    shared: &SharedState,
    run: RunId,
    next: Result<Option<Vec<u8>>, TransportError>,
) -> Flow {
    let mut state = lock_state(shared);
    if !state.is_current(run) {
        debug!("Dropping late message for {}", run);
        return Flow::Stop;
    }

    let payload = match next {
        Ok(Some(payload)) => payload,
        Ok(None) => {
            fail_locked(&mut state, run, TransportError::ConnectionClosed);
            return Flow::Stop;
        }
        Err(err) => {
            fail_locked(&mut state, run, err);
            return Flow::Stop;
        }
    };

    match state.machine.handle_payload(&payload) {
        Ok(Transition::Snapshot(snapshot)) => {
            debug!(
                "{} live update: success={} failures={} samples={}",
                run,
                snapshot.success_count,
                snapshot.failure_count,
                snapshot.samples.len()
            );
            state.emit(&SessionEvent::Snapshot { run, snapshot });
            Flow::Continue
        }
        Ok(Transition::Completed(result)) => {
            info!(
                "{} completed: total={} success={} failures={}",
                run, result.total_requests, result.success_count, result.failure_count
            );
            state.finish(&SessionEvent::Completed { run, result });
            Flow::Stop
        }
        Err(err) => {
            fail_locked(&mut state, run, err);
            Flow::Stop
        }
    }
}

fn fail_run(shared: &SharedState, run: RunId, error: impl Into<SessionError>) {
    let mut state = lock_state(shared);
    if state.is_current(run) {
        fail_locked(&mut state, run, error);
    }
}

fn fail_locked(state: &mut ControllerState, run: RunId, error: impl Into<SessionError>) {
    let error = state.machine.fail(error);
    warn!("{} failed: {}", run, error);
    state.finish(&SessionEvent::Failed {
        run,
        error: Arc::new(error),
    });
}
