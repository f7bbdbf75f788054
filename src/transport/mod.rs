//! WebSocket transport layer.
//!
//! Bridges a [`Socket`](crate::socket::Socket) to a real WebSocket: the
//! socket's outbound frame queue drains into the sink, inbound text frames
//! feed [`Socket::dispatch`](crate::socket::Socket::dispatch).
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐                           ┌──────────────────┐
//! │  Client (Rust)   │                           │  Phoenix peer    │
//! │                  │         WebSocket         │                  │
//! │  Socket ◄─lock─┐ │◄─────────────────────────►│  Channels        │
//! │  Connection ───┘ │      ws(s)://host/...     │  endpoint        │
//! └──────────────────┘                           └──────────────────┘
//! ```
//!
//! # Connection Lifecycle
//!
//! 1. [`ClientBuilder::connect`](crate::client::ClientBuilder::connect)
//!    dials the endpoint
//! 2. `Connection` spawns the event loop task
//! 3. Frames flow both ways until close, error, or shutdown
//! 4. [`Client::close`](crate::client::Client::close) signals shutdown and
//!    awaits loop termination
//!
//! Reconnection and heartbeat scheduling are deliberately not provided; the
//! loop ends and the application decides what to do next.

// ============================================================================
// Submodules
// ============================================================================

/// WebSocket connection and event loop.
pub mod connection;

// ============================================================================
// Re-exports
// ============================================================================

pub use connection::Connection;
