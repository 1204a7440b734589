use std::time::Duration;

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::debug;
use url::Url;

use crate::error::TransportError;

/// Opens the persistent connection a session runs over.
#[async_trait]
pub trait Connector: Send + Sync + 'static {
    /// Establish a new connection.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend cannot be reached.
    async fn connect(&self) -> Result<Box<dyn Connection>, TransportError>;
}

/// One bidirectional message connection.
#[async_trait]
pub trait Connection: Send {
    /// Send one text message.
    ///
    /// # Errors
    ///
    /// Returns an error when the message cannot be written.
    async fn send_text(&mut self, text: String) -> Result<(), TransportError>;

    /// Wait for the next data payload. `Ok(None)` means the peer closed.
    ///
    /// # Errors
    ///
    /// Returns an error when the connection fails mid-stream.
    async fn next_payload(&mut self) -> Result<Option<Vec<u8>>, TransportError>;

    /// Close the connection, ignoring errors.
    async fn close(&mut self);
}

/// Connects to the backend's WebSocket endpoint.
#[derive(Debug, Clone)]
pub struct WebSocketConnector {
    endpoint: Url,
    connect_timeout: Duration,
}

impl WebSocketConnector {
    #[must_use]
    pub const fn new(endpoint: Url, connect_timeout: Duration) -> Self {
        Self {
            endpoint,
            connect_timeout,
        }
    }

    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl Connector for WebSocketConnector {
    async fn connect(&self) -> Result<Box<dyn Connection>, TransportError> {
        let endpoint = self.endpoint.as_str();
        debug!("Connecting to backend {}", endpoint);
        let (stream, _) = timeout(self.connect_timeout, connect_async(endpoint))
            .await
            .map_err(|_err| TransportError::ConnectTimeout {
                endpoint: endpoint.to_owned(),
                timeout: self.connect_timeout,
            })?
            .map_err(|err| TransportError::Connect {
                endpoint: endpoint.to_owned(),
                source: Box::new(err),
            })?;
        Ok(Box::new(WebSocketConnection { stream }))
    }
}

struct WebSocketConnection {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

#[async_trait]
impl Connection for WebSocketConnection {
    async fn send_text(&mut self, text: String) -> Result<(), TransportError> {
        self.stream
            .send(Message::Text(text))
            .await
            .map_err(|err| TransportError::Send {
                context: "start request",
                source: Box::new(err),
            })
    }

    async fn next_payload(&mut self) -> Result<Option<Vec<u8>>, TransportError> {
        while let Some(message) = self.stream.next().await {
            let message = message.map_err(|err| TransportError::Receive {
                source: Box::new(err),
            })?;
            match message {
                Message::Text(text) => return Ok(Some(text.into_bytes())),
                Message::Binary(bytes) => return Ok(Some(bytes)),
                Message::Close(_) => return Ok(None),
                Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => {}
            }
        }
        Ok(None)
    }

    async fn close(&mut self) {
        drop(self.stream.close(None).await);
    }
}
