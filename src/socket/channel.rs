//! Channel lifecycle state machine.
//!
//! One [`Channel`] exists per joined topic. The socket drives it through
//! [`ChannelState`] transitions; the channel itself holds only the state,
//! the correlation refs of its most recent join/leave requests, and the
//! lifecycle hooks the application registered at join time.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use serde_json::Value;

use crate::identifiers::Ref;

use super::core::Callback;

// ============================================================================
// ChannelState
// ============================================================================

/// Lifecycle state of a channel.
///
/// | State | Meaning |
/// |-------|---------|
/// | `Closed` | Not joined (initial, or left / closed by the peer) |
/// | `Joining` | `phx_join` sent, reply pending |
/// | `Joined` | Join acknowledged by the peer |
/// | `Leaving` | `phx_leave` sent, reply pending |
/// | `Errored` | Peer reported `phx_error` for the topic |
///
/// `Errored` is not terminal: a subsequent join moves the channel back into
/// `Joining`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelState {
    /// Not joined.
    Closed,
    /// Join request in flight.
    Joining,
    /// Join acknowledged.
    Joined,
    /// Leave request in flight.
    Leaving,
    /// Peer reported an error for the topic.
    Errored,
}

impl ChannelState {
    /// Returns `true` if a join request is accepted from this state.
    ///
    /// Only `Leaving` rejects a join: the channel must finish leaving before
    /// it can be re-joined.
    #[inline]
    #[must_use]
    pub fn accepts_join(self) -> bool {
        self != Self::Leaving
    }

    /// Returns `true` if a leave request is accepted from this state.
    #[inline]
    #[must_use]
    pub fn accepts_leave(self) -> bool {
        matches!(self, Self::Joining | Self::Joined)
    }
}

impl fmt::Display for ChannelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Closed => "closed",
            Self::Joining => "joining",
            Self::Joined => "joined",
            Self::Leaving => "leaving",
            Self::Errored => "errored",
        };
        write!(f, "{name}")
    }
}

// ============================================================================
// ChannelHooks
// ============================================================================

/// Lifecycle callbacks for one channel, registered at join time.
///
/// `on_join` and `on_error` double as the ok/error callbacks of the join
/// push, so a join reply fires them through the push pass; `on_error` and
/// `on_close` also fire on inbound `phx_error`/`phx_close` frames for the
/// topic.
///
/// # Example
///
/// ```
/// use phoenix_channels::ChannelHooks;
///
/// let hooks = ChannelHooks::new()
///     .on_join(|response| println!("joined: {response}"))
///     .on_error(|reason| eprintln!("channel error: {reason}"));
/// ```
#[derive(Default, Clone)]
pub struct ChannelHooks {
    pub(crate) on_join: Option<Callback>,
    pub(crate) on_error: Option<Callback>,
    pub(crate) on_close: Option<Callback>,
}

impl ChannelHooks {
    /// Creates an empty hook set.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the callback fired when the join is acknowledged.
    #[inline]
    #[must_use]
    pub fn on_join(mut self, callback: impl Fn(&Value) + Send + Sync + 'static) -> Self {
        self.on_join = Some(std::sync::Arc::new(callback));
        self
    }

    /// Sets the callback fired on a join rejection or an inbound `phx_error`.
    #[inline]
    #[must_use]
    pub fn on_error(mut self, callback: impl Fn(&Value) + Send + Sync + 'static) -> Self {
        self.on_error = Some(std::sync::Arc::new(callback));
        self
    }

    /// Sets the callback fired on an inbound `phx_close`.
    #[inline]
    #[must_use]
    pub fn on_close(mut self, callback: impl Fn(&Value) + Send + Sync + 'static) -> Self {
        self.on_close = Some(std::sync::Arc::new(callback));
        self
    }
}

impl fmt::Debug for ChannelHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChannelHooks")
            .field("on_join", &self.on_join.is_some())
            .field("on_error", &self.on_error.is_some())
            .field("on_close", &self.on_close.is_some())
            .finish()
    }
}

// ============================================================================
// Channel
// ============================================================================

/// Lifecycle record for one topic.
///
/// Owned by the socket's channel map, keyed by topic. A channel entry is
/// never deleted: leave and peer-close only change its state, and a
/// re-join overwrites it with a fresh record.
#[derive(Debug, Clone)]
pub struct Channel {
    /// Current lifecycle state.
    pub(crate) state: ChannelState,
    /// Ref of the most recent join request.
    pub(crate) join_ref: Ref,
    /// Ref of the most recent leave request, if any was ever issued.
    pub(crate) leave_ref: Option<Ref>,
    /// Payload sent with the join request.
    pub(crate) payload: Value,
    /// Lifecycle callbacks.
    pub(crate) hooks: ChannelHooks,
}

impl Channel {
    /// Creates a fresh record in `Joining` state.
    #[inline]
    #[must_use]
    pub(crate) fn joining(join_ref: Ref, payload: Value, hooks: ChannelHooks) -> Self {
        Self {
            state: ChannelState::Joining,
            join_ref,
            leave_ref: None,
            payload,
            hooks,
        }
    }

    /// Current lifecycle state.
    #[inline]
    #[must_use]
    pub fn state(&self) -> ChannelState {
        self.state
    }

    /// Ref of the most recent join request.
    #[inline]
    #[must_use]
    pub fn join_ref(&self) -> Ref {
        self.join_ref
    }

    /// Payload sent with the join request.
    #[inline]
    #[must_use]
    pub fn payload(&self) -> &Value {
        &self.payload
    }
}

// ============================================================================
// Tests
// ============================================================================
