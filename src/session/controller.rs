use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

use crate::error::SessionError;
use crate::metrics::Sample;

use super::driver::drive_session;
use super::events::{RunId, SessionEvent};
use super::machine::{SessionMachine, SessionState};
use super::params::TestParameters;
use super::transport::Connector;

pub(super) type SharedState = Arc<Mutex<ControllerState>>;

struct ActiveRun {
    run: RunId,
    // Dropping the sender wakes the driver the same way sending does.
    _cancel: oneshot::Sender<()>,
}

/// Everything the controller and its driver task share.
pub(super) struct ControllerState {
    pub(super) machine: SessionMachine,
    active: Option<ActiveRun>,
    subscribers: Vec<mpsc::UnboundedSender<SessionEvent>>,
    next_run: u64,
}

impl ControllerState {
    fn new() -> Self {
        Self {
            machine: SessionMachine::new(),
            active: None,
            subscribers: Vec::new(),
            next_run: 1,
        }
    }

    pub(super) fn is_current(&self, run: RunId) -> bool {
        self.active.as_ref().is_some_and(|active| active.run == run)
    }

    pub(super) fn emit(&mut self, event: &SessionEvent) {
        self.subscribers
            .retain(|subscriber| subscriber.send(event.clone()).is_ok());
    }

    /// Emit a terminal event and release the run.
    pub(super) fn finish(&mut self, event: &SessionEvent) {
        self.emit(event);
        self.active = None;
    }

    fn allocate_run(&mut self) -> RunId {
        let run = RunId::new(self.next_run);
        self.next_run = self.next_run.saturating_add(1);
        run
    }
}

pub(super) fn lock_state(shared: &Mutex<ControllerState>) -> MutexGuard<'_, ControllerState> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Receives the events of every run started on a controller.
#[derive(Debug)]
pub struct SessionSubscription {
    receiver: mpsc::UnboundedReceiver<SessionEvent>,
}

impl SessionSubscription {
    /// Wait for the next event. `None` once the controller is gone.
    pub async fn recv(&mut self) -> Option<SessionEvent> {
        self.receiver.recv().await
    }

    /// Take an already delivered event without waiting.
    pub fn try_recv(&mut self) -> Option<SessionEvent> {
        self.receiver.try_recv().ok()
    }
}

/// Public surface of the session core: `start`, `cancel` and subscriptions.
///
/// At most one session is connecting or running per controller. Each run
/// gets a fresh buffer; events of a cancelled run are never delivered after
/// `cancel` returns.
pub struct SessionController<C: Connector> {
    connector: Arc<C>,
    shared: SharedState,
}

impl<C: Connector> SessionController<C> {
    #[must_use]
    pub fn new(connector: C) -> Self {
        Self {
            connector: Arc::new(connector),
            shared: Arc::new(Mutex::new(ControllerState::new())),
        }
    }

    #[must_use]
    pub fn subscribe(&self) -> SessionSubscription {
        let (sender, receiver) = mpsc::unbounded_channel();
        lock_state(&self.shared).subscribers.push(sender);
        SessionSubscription { receiver }
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        lock_state(&self.shared).machine.state()
    }

    /// Read-only view of the active session's sample buffer.
    #[must_use]
    pub fn buffered_samples(&self) -> Arc<Vec<Sample>> {
        lock_state(&self.shared).machine.buffered_samples()
    }

    /// Validate `params` and start a new session in the background.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Conflict`] while another session is connecting
    /// or running, [`SessionError::Validation`] for invalid parameters and
    /// [`SessionError::NoRuntime`] outside a Tokio runtime. In every case no
    /// connection is attempted and the current session is unaffected.
    pub fn start(&self, params: &TestParameters) -> Result<RunId, SessionError> {
        let runtime = Handle::try_current().map_err(|_err| SessionError::NoRuntime)?;

        let mut state = lock_state(&self.shared);
        let current = state.machine.state();
        if current.is_active() {
            return Err(SessionError::Conflict { state: current });
        }
        let request = params.validate()?;
        state.machine.begin(&request)?;

        let run = state.allocate_run();
        let (cancel_tx, cancel_rx) = oneshot::channel();
        state.active = Some(ActiveRun {
            run,
            _cancel: cancel_tx,
        });
        drop(state);

        info!(
            "Starting {} against {} ({} requests, concurrency {})",
            run,
            request.url(),
            request.requests(),
            request.concurrency()
        );
        drop(runtime.spawn(drive_session(
            Arc::clone(&self.connector),
            Arc::clone(&self.shared),
            run,
            request,
            cancel_rx,
        )));
        Ok(run)
    }

    /// Abort the current session, if any, and return to `Idle`.
    ///
    /// Idempotent. Emits `Cancelled` for an active run; nothing else is
    /// emitted for that run afterwards.
    pub fn cancel(&self) {
        let mut state = lock_state(&self.shared);
        state.machine.cancel();
        let Some(active) = state.active.take() else {
            debug!("Cancel requested with no active session");
            return;
        };
        info!("Cancelled {}", active.run);
        state.emit(&SessionEvent::Cancelled { run: active.run });
    }
}

impl<C: Connector> Drop for SessionController<C> {
    /// An active run ends with `Cancelled` like an explicit `cancel()`.
    fn drop(&mut self) {
        self.cancel();
    }
}
