//! Builder pattern for client configuration.
//!
//! Provides a fluent API for configuring the endpoint and establishing the
//! connection.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use phoenix_channels::Client;
//!
//! # async fn example() -> phoenix_channels::Result<()> {
//! let client = Client::builder()
//!     .url("wss://example.com/socket/websocket")
//!     .param("token", "secret")
//!     .connect_timeout(Duration::from_secs(5))
//!     .connect()
//!     .await?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio::time::timeout;
use tokio_tungstenite::connect_async;
use tracing::debug;
use url::Url;

use crate::error::{Error, Result};
use crate::socket::Socket;
use crate::transport::Connection;

use super::core::Client;

// ============================================================================
// Constants
// ============================================================================

/// Default timeout for the WebSocket handshake.
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

// ============================================================================
// ClientBuilder
// ============================================================================

/// Builder for configuring and connecting a [`Client`].
///
/// Use [`Client::builder()`] to create a new builder.
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    /// Endpoint URL.
    url: Option<String>,
    /// Query parameters appended to the endpoint.
    params: Vec<(String, String)>,
    /// Handshake timeout.
    connect_timeout: Duration,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            url: None,
            params: Vec::new(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }
}

// ============================================================================
// ClientBuilder Implementation
// ============================================================================

impl ClientBuilder {
    /// Creates a new client builder with no configuration.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the endpoint URL.
    ///
    /// # Arguments
    ///
    /// * `url` - WebSocket endpoint (e.g., "ws://localhost:4000/socket/websocket")
    #[inline]
    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Appends a query parameter to the endpoint URL.
    ///
    /// Call repeatedly for multiple parameters. Typical use is an auth
    /// token checked by the peer during the WebSocket handshake.
    #[inline]
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Sets the WebSocket handshake timeout (default 10s).
    #[inline]
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Validates the configuration, dials the endpoint, and spawns the
    /// event loop.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] if no URL was set
    /// - [`Error::Url`] if the URL does not parse or is not `ws`/`wss`
    /// - [`Error::ConnectionTimeout`] if the handshake exceeds the timeout
    /// - [`Error::WebSocket`] if the handshake fails
    pub async fn connect(self) -> Result<Client> {
        let url = self.validate_url()?;

        debug!(%url, "connecting");
        let (ws_stream, _response) = timeout(self.connect_timeout, connect_async(url.as_str()))
            .await
            .map_err(|_| Error::connection_timeout(self.connect_timeout.as_millis() as u64))??;
        debug!(%url, "connected");

        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        let socket = Arc::new(Mutex::new(Socket::new(outbound_tx)));
        let connection = Connection::new(ws_stream, outbound_rx, Arc::clone(&socket));

        Ok(Client::new(socket, connection))
    }
}

// ============================================================================
// Validation
// ============================================================================

impl ClientBuilder {
    /// Validates the endpoint configuration and applies query parameters.
    fn validate_url(&self) -> Result<Url> {
        let raw = self.url.clone().ok_or_else(|| {
            Error::config(
                "Endpoint URL is required. Use .url() to set it.\n\
                 Example: Client::builder().url(\"ws://localhost:4000/socket/websocket\")",
            )
        })?;

        let mut url = Url::parse(&raw).map_err(|e| Error::url(&raw, e.to_string()))?;

        match url.scheme() {
            "ws" | "wss" => {}
            other => {
                return Err(Error::url(
                    &raw,
                    format!("unsupported scheme \"{other}\", expected ws or wss"),
                ));
            }
        }

        if !self.params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &self.params {
                pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }
}

// ============================================================================
// Tests
// ============================================================================
