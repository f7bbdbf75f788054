//! Phoenix Channels wire protocol types.
//!
//! This module defines the frame envelope exchanged with the peer and the
//! helpers for reading reply payloads.
//!
//! # Protocol Overview
//!
//! Every frame is one JSON object:
//!
//! ```json
//! {"event": "phx_join", "topic": "room:1", "payload": {}, "ref": 0}
//! ```
//!
//! Reserved events:
//!
//! | Event | Direction | Purpose |
//! |-------|-----------|---------|
//! | `phx_join` | Local → Peer | Join a topic |
//! | `phx_leave` | Local → Peer | Leave a topic |
//! | `phx_reply` | Peer → Local | Reply to a pushed frame |
//! | `phx_error` | Peer → Local | Channel entered an error state |
//! | `phx_close` | Peer → Local | Channel was closed by the peer |
//!
//! All other `(event, topic)` pairs are application-defined and routed to
//! handlers registered on the [`Socket`](crate::socket::Socket).
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `message` | Frame envelope and reserved event names |
//! | `reply` | Borrowed view over a `phx_reply` payload |

// ============================================================================
// Submodules
// ============================================================================

/// Frame envelope and reserved event names.
pub mod message;

/// Reply payload parsing.
pub mod reply;

// ============================================================================
// Re-exports
// ============================================================================

pub use message::{Message, PHX_CLOSE, PHX_ERROR, PHX_JOIN, PHX_LEAVE, PHX_REPLY, is_reserved};
pub use reply::Reply;
