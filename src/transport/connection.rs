//! WebSocket connection and event loop.
//!
//! The connection owns a spawned tokio task that multiplexes three sources:
//!
//! - Outbound frames queued by the [`Socket`](crate::socket::Socket)
//! - Inbound WebSocket messages from the peer
//! - A shutdown command from [`Client::close`](crate::client::Client::close)
//!
//! Each inbound text frame is fully processed under the socket lock before
//! the next is read, which gives the engine its one-frame-at-a-time
//! ordering guarantee.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use parking_lot::Mutex;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{debug, error, trace};

use crate::socket::Socket;

// ============================================================================
// Types
// ============================================================================

/// Client-side stream type produced by `connect_async`.
pub(crate) type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

// ============================================================================
// ConnectionCommand
// ============================================================================

/// Internal commands for the event loop.
enum ConnectionCommand {
    /// Close the WebSocket and stop the loop.
    Shutdown,
}

// ============================================================================
// Connection
// ============================================================================

/// A live WebSocket connection driving one [`Socket`].
///
/// Created by [`ClientBuilder::connect`](crate::client::ClientBuilder::connect);
/// the event loop task is spawned in the constructor and runs until the
/// peer closes, the stream errors, or [`close`](Self::close) is called.
pub struct Connection {
    /// Channel for sending commands to the event loop.
    command_tx: mpsc::UnboundedSender<ConnectionCommand>,
    /// Handle of the spawned event loop task.
    task: Option<JoinHandle<()>>,
}

impl Connection {
    /// Creates a connection from an established WebSocket stream.
    ///
    /// Spawns the event loop task internally.
    pub(crate) fn new(
        ws_stream: WsStream,
        outbound_rx: mpsc::UnboundedReceiver<String>,
        socket: Arc<Mutex<Socket>>,
    ) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();

        let task = tokio::spawn(Self::run_event_loop(
            ws_stream,
            outbound_rx,
            command_rx,
            socket,
        ));

        Self {
            command_tx,
            task: Some(task),
        }
    }

    /// Signals the event loop to close the WebSocket and stop.
    pub(crate) fn shutdown(&self) {
        let _ = self.command_tx.send(ConnectionCommand::Shutdown);
    }

    /// Signals shutdown and waits for the event loop to terminate.
    pub(crate) async fn close(mut self) {
        self.shutdown();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }

    /// Event loop that handles WebSocket I/O.
    async fn run_event_loop(
        ws_stream: WsStream,
        mut outbound_rx: mpsc::UnboundedReceiver<String>,
        mut command_rx: mpsc::UnboundedReceiver<ConnectionCommand>,
        socket: Arc<Mutex<Socket>>,
    ) {
        let (mut ws_write, mut ws_read) = ws_stream.split();

        loop {
            tokio::select! {
                // Inbound frames from the peer
                message = ws_read.next() => {
                    match message {
                        Some(Ok(WsMessage::Text(text))) => {
                            trace!(len = text.len(), "frame received");
                            socket.lock().dispatch(text.as_str());
                        }

                        Some(Ok(WsMessage::Close(_))) => {
                            debug!("WebSocket closed by remote");
                            break;
                        }

                        Some(Err(e)) => {
                            error!(error = %e, "WebSocket error");
                            break;
                        }

                        None => {
                            debug!("WebSocket stream ended");
                            break;
                        }

                        // Ignore Binary, Ping, Pong
                        _ => {}
                    }
                }

                // Outbound frames queued by the socket
                frame = outbound_rx.recv() => {
                    match frame {
                        Some(text) => {
                            trace!(len = text.len(), "frame sent");
                            if let Err(e) = ws_write.send(WsMessage::Text(text.into())).await {
                                error!(error = %e, "failed to send frame");
                                break;
                            }
                        }

                        None => {
                            debug!("outbound queue closed");
                            break;
                        }
                    }
                }

                // Commands from the client handle
                command = command_rx.recv() => {
                    match command {
                        Some(ConnectionCommand::Shutdown) | None => {
                            debug!("shutdown requested");
                            let _ = ws_write.close().await;
                            break;
                        }
                    }
                }
            }
        }

        debug!("event loop terminated");
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Duration;

    use serde_json::json;
    use tokio::net::TcpListener;
    use tokio_tungstenite::{accept_async, connect_async};

    use crate::identifiers::Ref;
    use crate::protocol::{Message, PHX_JOIN, PHX_REPLY};
    use crate::socket::{ChannelHooks, ChannelState};

    /// Accepts one WebSocket connection on a random localhost port.
    async fn local_peer() -> (TcpListener, String) {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let url = format!("ws://{}", listener.local_addr().expect("addr"));
        (listener, url)
    }

    async fn wait_for_state(
        socket: &Arc<Mutex<Socket>>,
        topic: &str,
        state: ChannelState,
    ) -> bool {
        for _ in 0..100 {
            if socket.lock().channel_state(topic) == Some(state) {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        false
    }

    #[tokio::test]
    async fn test_join_round_trip_over_websocket() {
        let (listener, url) = local_peer().await;

        let peer = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.expect("accept");
            let mut ws = accept_async(stream).await.expect("handshake");

            let text = match ws.next().await {
                Some(Ok(WsMessage::Text(text))) => text,
                other => panic!("expected join frame, got {other:?}"),
            };
            let join = Message::decode(text.as_str()).expect("decode join");
            assert_eq!(join.event, PHX_JOIN);
            assert_eq!(join.topic, "room:1");
            assert_eq!(join.msg_ref, Some(Ref::ZERO));

            let reply = Message::new(
                PHX_REPLY,
                join.topic,
                json!({"status": "ok", "response": {}}),
                join.msg_ref,
            );
            ws.send(WsMessage::Text(reply.encode().expect("encode").into()))
                .await
                .expect("send reply");
        });

        let (ws_stream, _) = connect_async(&url).await.expect("connect");
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        let socket = Arc::new(Mutex::new(Socket::new(outbound_tx)));
        let connection = Connection::new(ws_stream, outbound_rx, Arc::clone(&socket));

        socket
            .lock()
            .join("room:1", json!({}), ChannelHooks::new())
            .expect("join accepted");

        assert!(wait_for_state(&socket, "room:1", ChannelState::Joined).await);
        peer.await.expect("peer task");
        connection.close().await;
    }

    #[tokio::test]
    async fn test_shutdown_terminates_event_loop() {
        let (listener, url) = local_peer().await;

        let peer = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.expect("accept");
            let mut ws = accept_async(stream).await.expect("handshake");
            // Drain until the client closes.
            while let Some(Ok(message)) = ws.next().await {
                if matches!(message, WsMessage::Close(_)) {
                    break;
                }
            }
        });

        let (ws_stream, _) = connect_async(&url).await.expect("connect");
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        let socket = Arc::new(Mutex::new(Socket::new(outbound_tx)));
        let connection = Connection::new(ws_stream, outbound_rx, socket);

        connection.close().await;
        peer.await.expect("peer task");
    }
}
