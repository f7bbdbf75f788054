//! The `Socket` registry and dispatch entrypoint.
//!
//! [`Socket`] is the single owned aggregate of the engine: the channel map,
//! the outstanding-push map, the application handler table, and the
//! monotonic ref counter. Every mutation goes through its methods; it spawns
//! nothing and never blocks, so a transport (or a test) drives it one frame
//! at a time.
//!
//! # Dispatch
//!
//! [`Socket::dispatch`] decodes one inbound frame and routes it:
//!
//! - `phx_reply` runs two passes over the same frame: push resolution by
//!   exact ref match, then the channel lifecycle transition by
//!   join-ref/leave-ref match.
//! - `phx_error` / `phx_close` force the topic's channel into
//!   `Errored`/`Closed` and fire its registered hook.
//! - Any other event is looked up in the application handler table.
//!
//! Every missing link in a lookup chain (unknown ref, topic, or handler) is
//! a silent no-op, never an error.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde_json::{Value, json};
use tokio::sync::mpsc;
use tracing::{debug, trace, warn};

use crate::identifiers::Ref;
use crate::protocol::{
    Message, PHX_CLOSE, PHX_ERROR, PHX_JOIN, PHX_LEAVE, PHX_REPLY, Reply, is_reserved,
};

use super::channel::{Channel, ChannelHooks, ChannelState};
use super::push::{Push, PushHooks};

// ============================================================================
// Types
// ============================================================================

/// Callback invoked with a frame payload or reply response.
///
/// Cloneable so a channel's join/error hooks can double as its join-push's
/// reply callbacks while staying registered on the channel.
pub type Callback = Arc<dyn Fn(&Value) + Send + Sync>;

/// Handler-table key: one handler per `(event, topic)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct HandlerKey {
    event: String,
    topic: String,
}

// ============================================================================
// Socket
// ============================================================================

/// The protocol engine: channel registry, push correlation, event routing.
///
/// Transport-agnostic: outbound frames are serialized and handed to the
/// unbounded channel given at construction, inbound text is fed to
/// [`dispatch`](Self::dispatch). Emission is fire-and-forget: if the
/// receiver is gone the frame is discarded silently.
///
/// # Example
///
/// ```
/// use phoenix_channels::{ChannelHooks, Socket};
/// use serde_json::json;
///
/// let (outbound, mut frames) = tokio::sync::mpsc::unbounded_channel();
/// let mut socket = Socket::new(outbound);
///
/// let join_ref = socket.join("room:1", json!({}), ChannelHooks::new());
/// assert!(join_ref.is_some());
/// assert!(frames.try_recv().is_ok());
/// ```
pub struct Socket {
    /// One lifecycle record per topic; entries persist across leave/re-join.
    channels: FxHashMap<String, Channel>,
    /// Outstanding requests keyed by the ref assigned at send time.
    pushes: FxHashMap<Ref, Push>,
    /// Application handlers keyed by `(event, topic)`.
    handlers: FxHashMap<HandlerKey, Callback>,
    /// Next ref to assign; strictly increasing, never reused.
    next_ref: Ref,
    /// Emit side of the transport boundary.
    outbound: mpsc::UnboundedSender<String>,
}

impl Socket {
    /// Creates a socket around the emit side of an unbounded channel.
    ///
    /// The first assigned ref is `0`.
    #[must_use]
    pub fn new(outbound: mpsc::UnboundedSender<String>) -> Self {
        Self {
            channels: FxHashMap::default(),
            pushes: FxHashMap::default(),
            handlers: FxHashMap::default(),
            next_ref: Ref::ZERO,
            outbound,
        }
    }

    /// Takes the current ref and advances the counter.
    fn take_ref(&mut self) -> Ref {
        let taken = self.next_ref;
        self.next_ref = taken.successor();
        taken
    }

    /// Serializes and emits one outbound frame.
    fn emit(&self, message: &Message) {
        let text = match message.encode() {
            Ok(text) => text,
            Err(error) => {
                warn!(%error, event = %message.event, "failed to encode outbound frame");
                return;
            }
        };

        if self.outbound.send(text).is_err() {
            trace!(event = %message.event, "outbound receiver dropped, frame discarded");
        }
    }
}

// ============================================================================
// Outbound Operations
// ============================================================================

impl Socket {
    /// Joins (or re-joins) a topic.
    ///
    /// Emits `phx_join`, registers the channel in `Joining` state, and
    /// registers a push for the join ref whose ok/error callbacks are the
    /// channel's `on_join`/`on_error` hooks.
    ///
    /// Re-joining overwrites the prior channel record and removes its
    /// pending join push, so a late reply to the superseded join cannot
    /// fire the replaced hooks.
    ///
    /// Returns `None` without touching any state if the channel is
    /// currently `Leaving`.
    pub fn join(
        &mut self,
        topic: impl Into<String>,
        payload: Value,
        hooks: ChannelHooks,
    ) -> Option<Ref> {
        let topic = topic.into();

        if let Some(existing) = self.channels.get(&topic) {
            if !existing.state.accepts_join() {
                trace!(%topic, "join rejected: channel is leaving");
                return None;
            }
            let superseded = existing.join_ref;
            self.pushes.remove(&superseded);
        }

        let join_ref = self.take_ref();
        let reply_hooks = PushHooks {
            on_ok: hooks.on_join.clone(),
            on_error: hooks.on_error.clone(),
        };

        self.pushes.insert(
            join_ref,
            Push::new(PHX_JOIN, topic.clone(), payload.clone(), reply_hooks),
        );
        self.channels.insert(
            topic.clone(),
            Channel::joining(join_ref, payload.clone(), hooks),
        );

        debug!(%topic, %join_ref, "joining channel");
        self.emit(&Message::new(PHX_JOIN, topic, payload, Some(join_ref)));

        Some(join_ref)
    }

    /// Leaves a topic.
    ///
    /// Emits `phx_leave` with an empty payload and moves the channel into
    /// `Leaving`. The channel's own pending join push is cancelled;
    /// unrelated application pushes for the topic stay in flight.
    ///
    /// Returns `None` without touching any state unless the channel is
    /// `Joining` or `Joined`.
    pub fn leave(&mut self, topic: &str) -> Option<Ref> {
        let (state, join_ref) = match self.channels.get(topic) {
            Some(channel) => (channel.state, channel.join_ref),
            None => {
                trace!(%topic, "leave ignored: unknown topic");
                return None;
            }
        };

        if !state.accepts_leave() {
            trace!(%topic, %state, "leave ignored in current state");
            return None;
        }

        let leave_ref = self.take_ref();

        self.pushes.remove(&join_ref);
        self.pushes.insert(
            leave_ref,
            Push::new(PHX_LEAVE, topic, json!({}), PushHooks::new()),
        );

        if let Some(channel) = self.channels.get_mut(topic) {
            channel.state = ChannelState::Leaving;
            channel.leave_ref = Some(leave_ref);
        }

        debug!(%topic, %leave_ref, "leaving channel");
        self.emit(&Message::new(PHX_LEAVE, topic, json!({}), Some(leave_ref)));

        Some(leave_ref)
    }

    /// Pushes an application event to a topic.
    ///
    /// Unconditional: no channel state check; the peer is free to reject
    /// via an error reply. Returns the ref assigned to the frame.
    pub fn push(
        &mut self,
        event: impl Into<String>,
        topic: impl Into<String>,
        payload: Value,
        hooks: PushHooks,
    ) -> Ref {
        let event = event.into();
        let topic = topic.into();
        let msg_ref = self.take_ref();

        self.pushes.insert(
            msg_ref,
            Push::new(event.clone(), topic.clone(), payload.clone(), hooks),
        );

        trace!(%event, %topic, %msg_ref, "push");
        self.emit(&Message::new(event, topic, payload, Some(msg_ref)));

        msg_ref
    }

    /// Registers a handler for an `(event, topic)` pair.
    ///
    /// At most one handler per pair; re-registering replaces the previous
    /// handler.
    pub fn on(
        &mut self,
        event: impl Into<String>,
        topic: impl Into<String>,
        handler: impl Fn(&Value) + Send + Sync + 'static,
    ) {
        let key = HandlerKey {
            event: event.into(),
            topic: topic.into(),
        };

        trace!(event = %key.event, topic = %key.topic, "handler registered");
        self.handlers.insert(key, Arc::new(handler));
    }

    /// Removes the handler for an `(event, topic)` pair, if any.
    pub fn off(&mut self, event: impl Into<String>, topic: impl Into<String>) {
        let key = HandlerKey {
            event: event.into(),
            topic: topic.into(),
        };

        if self.handlers.remove(&key).is_some() {
            trace!(event = %key.event, topic = %key.topic, "handler removed");
        }
    }
}

// ============================================================================
// Inbound Dispatch
// ============================================================================

impl Socket {
    /// Processes one raw inbound frame.
    ///
    /// An undecodable frame is dropped without mutating any state. A decoded
    /// frame produces at most one channel-state mutation, one push
    /// resolution, and one external callback invocation.
    pub fn dispatch(&mut self, raw: &str) {
        let message = match Message::decode(raw) {
            Ok(message) => message,
            Err(error) => {
                warn!(%error, "dropping undecodable frame");
                return;
            }
        };

        if message.event == PHX_REPLY {
            self.dispatch_reply(&message);
        } else if message.event == PHX_ERROR {
            self.dispatch_error(&message);
        } else if message.event == PHX_CLOSE {
            self.dispatch_close(&message);
        } else if is_reserved(&message.event) {
            // phx_join / phx_leave are never received from a conforming peer.
            trace!(event = %message.event, "ignoring inbound reserved event");
        } else {
            self.dispatch_event(message);
        }
    }

    /// Handles a `phx_reply` frame: push pass, then lifecycle pass.
    fn dispatch_reply(&mut self, message: &Message) {
        let Some(reply) = Reply::parse(&message.payload) else {
            warn!(topic = %message.topic, "dropping phx_reply with malformed payload");
            return;
        };

        let Some(msg_ref) = message.msg_ref else {
            // No ref: nothing to correlate against.
            trace!(topic = %message.topic, "ignoring phx_reply without ref");
            return;
        };

        // Push pass: resolve by exact ref match, at most once. The entry is
        // removed before the callback fires, so a duplicate reply for the
        // same ref finds nothing.
        match reply.status {
            "ok" => {
                if let Some(push) = self.pushes.remove(&msg_ref) {
                    trace!(%msg_ref, event = %push.event, "push resolved ok");
                    if let Some(on_ok) = push.hooks.on_ok {
                        on_ok(reply.response);
                    }
                }
            }
            "error" => {
                if let Some(push) = self.pushes.remove(&msg_ref) {
                    trace!(%msg_ref, event = %push.event, "push resolved error");
                    if let Some(on_error) = push.hooks.on_error {
                        on_error(reply.response);
                    }
                }
            }
            status => {
                // Unrecognized status: the push stays pending.
                trace!(%msg_ref, status, "ignoring reply with unrecognized status");
            }
        }

        // Lifecycle pass: only an ok reply concludes a join or leave, keyed
        // by the channel's current join/leave refs. The matching phase must
        // still be in flight: a stray duplicate of an old join reply finds
        // no Joining state and cannot resurrect a left channel.
        if !reply.is_ok() {
            return;
        }
        let Some(channel) = self.channels.get_mut(&message.topic) else {
            return;
        };

        if channel.state == ChannelState::Joining && channel.join_ref == msg_ref {
            channel.state = ChannelState::Joined;
            debug!(topic = %message.topic, %msg_ref, "channel joined");
        } else if channel.state == ChannelState::Leaving && channel.leave_ref == Some(msg_ref) {
            channel.state = ChannelState::Closed;
            debug!(topic = %message.topic, %msg_ref, "channel left");
        }
    }

    /// Handles a `phx_error` frame: unconditional `Errored` transition.
    fn dispatch_error(&mut self, message: &Message) {
        let on_error = match self.channels.get_mut(&message.topic) {
            Some(channel) => {
                channel.state = ChannelState::Errored;
                debug!(topic = %message.topic, "channel errored");
                channel.hooks.on_error.clone()
            }
            None => {
                trace!(topic = %message.topic, "phx_error for unknown topic");
                return;
            }
        };

        if let Some(on_error) = on_error {
            on_error(&message.payload);
        }
    }

    /// Handles a `phx_close` frame: `Closed` transition regardless of which
    /// ref the frame names, discarding the channel's join push.
    fn dispatch_close(&mut self, message: &Message) {
        let (join_ref, on_close) = match self.channels.get_mut(&message.topic) {
            Some(channel) => {
                channel.state = ChannelState::Closed;
                debug!(topic = %message.topic, "channel closed by peer");
                (channel.join_ref, channel.hooks.on_close.clone())
            }
            None => {
                trace!(topic = %message.topic, "phx_close for unknown topic");
                return;
            }
        };

        self.pushes.remove(&join_ref);

        if let Some(on_close) = on_close {
            on_close(&message.payload);
        }
    }

    /// Routes an application-defined event to its registered handler.
    fn dispatch_event(&mut self, message: Message) {
        let Message {
            event,
            topic,
            payload,
            ..
        } = message;
        let key = HandlerKey { event, topic };

        if let Some(handler) = self.handlers.get(&key) {
            trace!(event = %key.event, topic = %key.topic, "event dispatched");
            handler(&payload);
        } else {
            trace!(event = %key.event, topic = %key.topic, "no handler for event");
        }
    }
}

// ============================================================================
// Introspection
// ============================================================================

impl Socket {
    /// Returns the lifecycle state of a topic's channel, if one exists.
    #[inline]
    #[must_use]
    pub fn channel_state(&self, topic: &str) -> Option<ChannelState> {
        self.channels.get(topic).map(|channel| channel.state)
    }

    /// Returns a topic's channel record, if one exists.
    #[inline]
    #[must_use]
    pub fn channel(&self, topic: &str) -> Option<&Channel> {
        self.channels.get(topic)
    }

    /// Returns the number of outstanding pushes awaiting a reply.
    #[inline]
    #[must_use]
    pub fn pending_pushes(&self) -> usize {
        self.pushes.len()
    }
}

// ============================================================================
// Tests
// ============================================================================
