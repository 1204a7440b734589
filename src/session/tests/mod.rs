use std::collections::VecDeque;
use std::future::Future;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::time::timeout;

use crate::error::{AppError, AppResult, TransportError};

use super::{Connection, Connector, SessionEvent, SessionSubscription};


const TEST_TIMEOUT: Duration = Duration::from_secs(2);

fn run_async_test<F>(future: F) -> AppResult<()>
where
    F: Future<Output = AppResult<()>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| AppError::session(format!("Failed to build runtime: {}", err)))?;
    runtime.block_on(future)
}

async fn next_event(subscription: &mut SessionSubscription) -> AppResult<SessionEvent> {
    timeout(TEST_TIMEOUT, subscription.recv())
        .await
        .map_err(|_err| AppError::session("Timed out waiting for session event"))?
        .ok_or_else(|| AppError::session("Subscription closed unexpectedly"))
}

fn update(success: u64, failures: u64, timestamps: &[&str]) -> Vec<u8> {
    let samples: Vec<String> = timestamps
        .iter()
        .map(|timestamp| {
            format!(
                r#"{{"timestamp":"{}","response_time":0.1,"cpu_usage":12.5,"mem_usage":40.0}}"#,
                timestamp
            )
        })
        .collect();
    format!(
        r#"{{"success":{},"failures":{},"resource_usage":[{}]}}"#,
        success,
        failures,
        samples.join(",")
    )
    .into_bytes()
}

fn final_message(total: u64, success: u64, failures: u64, timestamps: &[&str]) -> Vec<u8> {
    let samples: Vec<String> = timestamps
        .iter()
        .map(|timestamp| format!(r#"{{"timestamp":"{}","response_time":0.2}}"#, timestamp))
        .collect();
    format!(
        r#"{{"total_requests":{},"success":{},"failures":{},"resource_usage":[{}]}}"#,
        total,
        success,
        failures,
        samples.join(",")
    )
    .into_bytes()
}

/// Test side of an in-memory connection.
struct FakeBackend {
    inbound: Option<mpsc::UnboundedSender<Vec<u8>>>,
    sent: mpsc::UnboundedReceiver<String>,
}

impl FakeBackend {
    fn push(&self, payload: Vec<u8>) -> AppResult<()> {
        self.inbound
            .as_ref()
            .ok_or_else(|| AppError::session("Backend already hung up"))?
            .send(payload)
            .map_err(|_err| AppError::session("Client side of the connection is gone"))
    }

    /// Push without caring whether the client still listens.
    fn push_late(&self, payload: Vec<u8>) {
        if let Some(inbound) = self.inbound.as_ref() {
            drop(inbound.send(payload));
        }
    }

    fn hang_up(&mut self) {
        self.inbound = None;
    }

    /// Make the client's start request fail to send.
    fn reject_requests(&mut self) {
        self.sent.close();
    }

    async fn start_request(&mut self) -> AppResult<String> {
        timeout(TEST_TIMEOUT, self.sent.recv())
            .await
            .map_err(|_err| AppError::session("Timed out waiting for start request"))?
            .ok_or_else(|| AppError::session("Client never sent a start request"))
    }
}

struct FakeConnection {
    inbound: mpsc::UnboundedReceiver<Vec<u8>>,
    sent: mpsc::UnboundedSender<String>,
}

#[async_trait]
impl Connection for FakeConnection {
    async fn send_text(&mut self, text: String) -> Result<(), TransportError> {
        self.sent
            .send(text)
            .map_err(|_err| TransportError::ConnectionClosed)
    }

    async fn next_payload(&mut self) -> Result<Option<Vec<u8>>, TransportError> {
        Ok(self.inbound.recv().await)
    }

    async fn close(&mut self) {
        self.inbound.close();
    }
}

fn fake_connection() -> (FakeConnection, FakeBackend) {
    let (inbound_tx, inbound_rx) = mpsc::unbounded_channel();
    let (sent_tx, sent_rx) = mpsc::unbounded_channel();
    (
        FakeConnection {
            inbound: inbound_rx,
            sent: sent_tx,
        },
        FakeBackend {
            inbound: Some(inbound_tx),
            sent: sent_rx,
        },
    )
}

/// Hands out the prepared connections in order, then refuses.
struct FakeConnector {
    pending: Mutex<VecDeque<FakeConnection>>,
    hang: bool,
    attempts: Arc<AtomicUsize>,
}

impl FakeConnector {
    fn with_connections(
        connections: VecDeque<FakeConnection>,
        hang: bool,
    ) -> (Self, Arc<AtomicUsize>) {
        let attempts = Arc::new(AtomicUsize::new(0));
        (
            Self {
                pending: Mutex::new(connections),
                hang,
                attempts: Arc::clone(&attempts),
            },
            attempts,
        )
    }

    fn new() -> (Self, FakeBackend, Arc<AtomicUsize>) {
        let (connection, backend) = fake_connection();
        let (connector, attempts) = Self::with_connections(VecDeque::from([connection]), false);
        (connector, backend, attempts)
    }

    /// Two connections for two consecutive runs.
    fn pair() -> (Self, FakeBackend, FakeBackend, Arc<AtomicUsize>) {
        let (first_connection, first) = fake_connection();
        let (second_connection, second) = fake_connection();
        let (connector, attempts) = Self::with_connections(
            VecDeque::from([first_connection, second_connection]),
            false,
        );
        (connector, first, second, attempts)
    }

    fn unreachable() -> (Self, Arc<AtomicUsize>) {
        Self::with_connections(VecDeque::new(), false)
    }

    /// Every connection attempt stays pending forever.
    fn hanging() -> (Self, Arc<AtomicUsize>) {
        Self::with_connections(VecDeque::new(), true)
    }
}

#[async_trait]
impl Connector for FakeConnector {
    async fn connect(&self) -> Result<Box<dyn Connection>, TransportError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.hang {
            std::future::pending::<()>().await;
        }
        let pending = self
            .pending
            .lock()
            .map_err(|_err| TransportError::ConnectionClosed)?
            .pop_front();
        pending
            .map(|connection| Box::new(connection) as Box<dyn Connection>)
            .ok_or_else(|| TransportError::ConnectTimeout {
                endpoint: "fake://backend".to_owned(),
                timeout: Duration::from_millis(1),
            })
    }
}
