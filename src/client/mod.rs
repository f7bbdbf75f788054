//! User-facing client handle and configuration.
//!
//! [`Client`] wraps a [`Socket`](crate::socket::Socket) and its live
//! [`Connection`](crate::transport::Connection) behind one lock, exposing
//! the protocol operations (join/leave/push/on/off) as plain method calls.
//!
//! Use [`Client::builder()`] to configure and connect:
//!
//! ```no_run
//! use phoenix_channels::{ChannelHooks, Client, Result};
//! use serde_json::json;
//!
//! # async fn example() -> Result<()> {
//! let client = Client::builder()
//!     .url("ws://localhost:4000/socket/websocket")
//!     .param("token", "secret")
//!     .connect()
//!     .await?;
//!
//! client.join("room:lobby", json!({}), ChannelHooks::new());
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `builder` | Endpoint configuration and connect |
//! | `core` | The connected `Client` handle |

// ============================================================================
// Submodules
// ============================================================================

/// Endpoint configuration and connect.
pub mod builder;

/// The connected client handle.
pub mod core;

// ============================================================================
// Re-exports
// ============================================================================

pub use builder::ClientBuilder;
pub use core::Client;
