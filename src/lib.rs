//! Phoenix Channels - Client-side protocol engine.
//!
//! This library implements the client half of the Phoenix Channels
//! protocol: a multiplexed, topic-addressed messaging protocol layered
//! over one persistent WebSocket.
//!
//! # Architecture
//!
//! The engine is split into a transport-agnostic core and a thin async
//! shell:
//!
//! - [`Socket`] owns all protocol state: channels, outstanding pushes, the
//!   event-handler table, and the monotonic ref counter. Its only boundary
//!   is "emit serialized text" / "dispatch raw incoming text".
//! - [`Client`] wires a `Socket` to a real WebSocket and exposes the
//!   protocol operations as plain method calls.
//!
//! Key design principles:
//!
//! - Single-owner state: every mutation goes through the socket lock, one
//!   inbound frame fully processed before the next
//! - Exact-match routing: replies correlate by ref, lifecycle transitions
//!   by join/leave ref, application events by `(event, topic)` pair
//! - No hidden failure paths: routing misses and invalid operations are
//!   silent no-ops; peer-reported errors surface only through callbacks
//!
//! # Quick Start
//!
//! ```no_run
//! use phoenix_channels::{ChannelHooks, Client, PushHooks, Result};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     // Connect the underlying socket
//!     let client = Client::builder()
//!         .url("ws://localhost:4000/socket/websocket")
//!         .param("token", "secret")
//!         .connect()
//!         .await?;
//!
//!     // Join a topic and listen for server-pushed events
//!     client.join("room:lobby", json!({}), ChannelHooks::new());
//!     client.on("new_msg", "room:lobby", |payload| {
//!         println!("new message: {payload}");
//!     });
//!
//!     // Push an event and correlate its reply
//!     client.push(
//!         "new_msg",
//!         "room:lobby",
//!         json!({"body": "hello"}),
//!         PushHooks::new().on_ok(|response| println!("ack: {response}")),
//!     );
//!
//!     client.close().await;
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | User-facing [`Client`] handle and [`ClientBuilder`] |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`identifiers`] | Type-safe [`Ref`] wrapper |
//! | [`protocol`] | Frame envelope and reserved events |
//! | [`socket`] | Protocol state machine and dispatch (transport-agnostic) |
//! | [`transport`] | WebSocket connection and event loop |
//!
//! # Scope
//!
//! Reconnection/backoff policy, heartbeat scheduling, and payload schema
//! validation are deliberately left to the application.

// ============================================================================
// Modules
// ============================================================================

/// User-facing client handle and configuration.
///
/// Use [`Client::builder()`] to configure and connect.
pub mod client;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Type-safe identifiers for protocol correlation.
///
/// Newtype wrappers prevent mixing refs with other integers at compile time.
pub mod identifiers;

/// Phoenix Channels wire protocol types.
///
/// Frame envelope, reserved event names, and reply payload parsing.
pub mod protocol;

/// Protocol state machine and message-routing engine.
///
/// The transport-agnostic core; drive it directly to use a custom transport.
pub mod socket;

/// WebSocket transport layer.
///
/// Internal module bridging a [`Socket`] to a live connection.
pub mod transport;

// ============================================================================
// Re-exports
// ============================================================================

// Client types
pub use client::{Client, ClientBuilder};

// Error types
pub use error::{Error, Result};

// Identifier types
pub use identifiers::Ref;

// Protocol types
pub use protocol::{Message, PHX_CLOSE, PHX_ERROR, PHX_JOIN, PHX_LEAVE, PHX_REPLY, Reply};

// Socket types
pub use socket::{Callback, Channel, ChannelHooks, ChannelState, Push, PushHooks, Socket};
