//! Protocol state machine and message-routing engine.
//!
//! This module is the core of the crate: the [`Socket`] aggregate owns every
//! channel, every outstanding push, the application handler table, and the
//! monotonic ref counter. It is transport-agnostic; its only boundary is
//! "emit serialized text" (an unbounded channel of frames) and
//! "dispatch raw incoming text" ([`Socket::dispatch`]).
//!
//! # Dispatch
//!
//! One inbound frame produces at most one channel-state mutation, one push
//! resolution, and one external callback invocation:
//!
//! ```text
//! raw text ──decode──► Message
//!                        │
//!            ┌───────────┼──────────────┐
//!            ▼           ▼              ▼
//!       phx_reply    phx_error /    application
//!      push pass +   phx_close       handler
//!      lifecycle     transition       lookup
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `channel` | Per-topic lifecycle state machine |
//! | `core` | The `Socket` registry and dispatch |
//! | `push` | Outstanding request records |

// ============================================================================
// Submodules
// ============================================================================

/// Channel lifecycle state machine.
pub mod channel;

/// The `Socket` registry and dispatch entrypoint.
pub mod core;

/// Outstanding push records.
pub mod push;

// ============================================================================
// Re-exports
// ============================================================================

pub use channel::{Channel, ChannelHooks, ChannelState};
pub use core::{Callback, Socket};
pub use push::{Push, PushHooks};
