//! Frame envelope and reserved event names.
//!
//! Defines the single wire unit of the protocol: `{event, topic, payload,
//! ref}`. The envelope is pure data; routing decisions live in
//! [`Socket`](crate::socket::Socket).

// ============================================================================
// Imports
// ============================================================================

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::identifiers::Ref;

// ============================================================================
// Reserved Events
// ============================================================================

/// Join request, sent by this engine only.
pub const PHX_JOIN: &str = "phx_join";

/// Leave request, sent by this engine only.
pub const PHX_LEAVE: &str = "phx_leave";

/// Reply to a pushed frame, received from the peer.
pub const PHX_REPLY: &str = "phx_reply";

/// Channel error notification, received from the peer.
pub const PHX_ERROR: &str = "phx_error";

/// Channel close notification, received from the peer.
pub const PHX_CLOSE: &str = "phx_close";

/// Returns `true` if `event` is one of the reserved protocol events.
///
/// Reserved events are consumed by the socket's lifecycle and correlation
/// passes and never reach the application handler table.
#[inline]
#[must_use]
pub fn is_reserved(event: &str) -> bool {
    matches!(event, PHX_JOIN | PHX_LEAVE | PHX_REPLY | PHX_ERROR | PHX_CLOSE)
}

// ============================================================================
// Message
// ============================================================================

/// One decoded wire frame.
///
/// Immutable once constructed: produced by a push or by decoding inbound
/// text, consumed exactly once by dispatch.
///
/// # Wire Format
///
/// ```json
/// {"event": "new_msg", "topic": "room:1", "payload": {"body": "hi"}, "ref": 3}
/// ```
///
/// `ref` is absent (or null) on peer-initiated frames that do not answer a
/// request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Event name, reserved or application-defined.
    pub event: String,

    /// Topic the frame addresses.
    pub topic: String,

    /// Opaque payload; schema is event-specific.
    pub payload: Value,

    /// Correlation ref, present on request/reply frames.
    #[serde(rename = "ref", default)]
    pub msg_ref: Option<Ref>,
}

impl Message {
    /// Creates a new frame.
    #[inline]
    #[must_use]
    pub fn new(
        event: impl Into<String>,
        topic: impl Into<String>,
        payload: Value,
        msg_ref: Option<Ref>,
    ) -> Self {
        Self {
            event: event.into(),
            topic: topic.into(),
            payload,
            msg_ref,
        }
    }

    /// Serializes the frame to wire text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`](crate::Error::Json) if serialization fails.
    #[inline]
    pub fn encode(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses a frame from wire text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`](crate::Error::Json) if `text` is not a valid
    /// frame envelope.
    #[inline]
    pub fn decode(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

// ============================================================================
// Tests
// ============================================================================
