//! The connected client handle.
//!
//! [`Client`] is a thin synchronous facade over the shared
//! [`Socket`](crate::socket::Socket): every protocol operation takes the
//! socket lock, mutates, and returns. The spawned event loop takes the same
//! lock per inbound frame, so application calls and inbound dispatch never
//! interleave within one frame.
//!
//! Handlers and hooks run while the lock is held. Do not call back into the
//! same client from inside a handler; hand the work to your own task or
//! channel instead.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;

use crate::identifiers::Ref;
use crate::socket::{ChannelHooks, ChannelState, PushHooks, Socket};
use crate::transport::Connection;

use super::builder::ClientBuilder;

// ============================================================================
// Client
// ============================================================================

/// Handle to a connected Phoenix Channels socket.
///
/// Created by [`ClientBuilder::connect`]. Cheap operations: every method is
/// non-blocking apart from [`close`](Self::close), which awaits event loop
/// termination.
pub struct Client {
    /// Protocol engine, shared with the event loop.
    socket: Arc<Mutex<Socket>>,
    /// Live connection driving the socket.
    connection: Connection,
}

impl Client {
    /// Returns a builder for configuring a new client.
    #[inline]
    #[must_use]
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Creates a handle around a connected socket.
    pub(crate) fn new(socket: Arc<Mutex<Socket>>, connection: Connection) -> Self {
        Self { socket, connection }
    }

    /// Joins (or re-joins) a topic.
    ///
    /// Returns the join ref, or `None` if the channel is currently leaving.
    /// See [`Socket::join`].
    pub fn join(
        &self,
        topic: impl Into<String>,
        payload: Value,
        hooks: ChannelHooks,
    ) -> Option<Ref> {
        self.socket.lock().join(topic, payload, hooks)
    }

    /// Leaves a topic.
    ///
    /// Returns the leave ref, or `None` unless the channel is joining or
    /// joined. See [`Socket::leave`].
    pub fn leave(&self, topic: &str) -> Option<Ref> {
        self.socket.lock().leave(topic)
    }

    /// Pushes an application event to a topic.
    ///
    /// Returns the ref assigned to the frame. See [`Socket::push`].
    pub fn push(
        &self,
        event: impl Into<String>,
        topic: impl Into<String>,
        payload: Value,
        hooks: PushHooks,
    ) -> Ref {
        self.socket.lock().push(event, topic, payload, hooks)
    }

    /// Registers a handler for an `(event, topic)` pair.
    ///
    /// At most one handler per pair; re-registering replaces it.
    pub fn on(
        &self,
        event: impl Into<String>,
        topic: impl Into<String>,
        handler: impl Fn(&Value) + Send + Sync + 'static,
    ) {
        self.socket.lock().on(event, topic, handler);
    }

    /// Removes the handler for an `(event, topic)` pair, if any.
    pub fn off(&self, event: impl Into<String>, topic: impl Into<String>) {
        self.socket.lock().off(event, topic);
    }

    /// Returns the lifecycle state of a topic's channel, if one exists.
    #[must_use]
    pub fn channel_state(&self, topic: &str) -> Option<ChannelState> {
        self.socket.lock().channel_state(topic)
    }

    /// Returns the number of outstanding pushes awaiting a reply.
    #[must_use]
    pub fn pending_pushes(&self) -> usize {
        self.socket.lock().pending_pushes()
    }

    /// Closes the connection and waits for the event loop to terminate.
    pub async fn close(self) {
        self.connection.close().await;
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("pending_pushes", &self.pending_pushes())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Duration;

    use futures_util::{SinkExt, StreamExt};
    use serde_json::json;
    use tokio::net::TcpListener;
    use tokio_tungstenite::accept_async;
    use tokio_tungstenite::tungstenite::Message as WsMessage;

    use crate::protocol::{Message, PHX_JOIN, PHX_REPLY};

    /// In-process peer: acknowledges every join, then emits one `new_msg`
    /// frame on the joined topic.
    async fn chatty_peer(listener: TcpListener) {
        let (stream, _) = listener.accept().await.expect("accept");
        let mut ws = accept_async(stream).await.expect("handshake");

        let text = match ws.next().await {
            Some(Ok(WsMessage::Text(text))) => text,
            other => panic!("expected join frame, got {other:?}"),
        };
        let join = Message::decode(text.as_str()).expect("decode join");
        assert_eq!(join.event, PHX_JOIN);

        let reply = Message::new(
            PHX_REPLY,
            join.topic.clone(),
            json!({"status": "ok", "response": {}}),
            join.msg_ref,
        );
        ws.send(WsMessage::Text(reply.encode().expect("encode").into()))
            .await
            .expect("send reply");

        let broadcast = Message::new("new_msg", join.topic, json!({"body": "hello"}), None);
        ws.send(WsMessage::Text(broadcast.encode().expect("encode").into()))
            .await
            .expect("send broadcast");
    }

    #[tokio::test]
    async fn test_client_join_and_event_routing() {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let url = format!("ws://{}", listener.local_addr().expect("addr"));
        let peer = tokio::spawn(chatty_peer(listener));

        let client = Client::builder().url(&url).connect().await.expect("connect");

        let messages = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&messages);
        client.on("new_msg", "room:lobby", move |payload| {
            sink.lock().push(payload.clone());
        });

        client
            .join("room:lobby", json!({}), ChannelHooks::new())
            .expect("join accepted");

        for _ in 0..100 {
            if !messages.lock().is_empty() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        assert_eq!(client.channel_state("room:lobby"), Some(ChannelState::Joined));
        assert_eq!(*messages.lock(), vec![json!({"body": "hello"})]);
        assert_eq!(client.pending_pushes(), 0);

        let debug = format!("{client:?}");
        assert!(debug.contains("Client"));
        assert!(debug.contains("pending_pushes: 0"));

        peer.await.expect("peer task");
        client.close().await;
    }
}
