//! Outstanding push records.
//!
//! A [`Push`] is one client-initiated request awaiting its correlated
//! reply. The socket keys pushes by the ref assigned at send time and
//! removes each entry the moment it resolves, so a late or duplicate reply
//! for the same ref finds nothing and is inert.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use serde_json::Value;

use super::core::Callback;

// ============================================================================
// PushHooks
// ============================================================================

/// Reply callbacks for one push.
///
/// # Example
///
/// ```
/// use phoenix_channels::PushHooks;
///
/// let hooks = PushHooks::new()
///     .on_ok(|response| println!("ack: {response}"))
///     .on_error(|reason| eprintln!("rejected: {reason}"));
/// ```
#[derive(Default, Clone)]
pub struct PushHooks {
    pub(crate) on_ok: Option<Callback>,
    pub(crate) on_error: Option<Callback>,
}

impl PushHooks {
    /// Creates an empty hook set.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the callback fired on a `"ok"` reply.
    #[inline]
    #[must_use]
    pub fn on_ok(mut self, callback: impl Fn(&Value) + Send + Sync + 'static) -> Self {
        self.on_ok = Some(std::sync::Arc::new(callback));
        self
    }

    /// Sets the callback fired on a `"error"` reply.
    #[inline]
    #[must_use]
    pub fn on_error(mut self, callback: impl Fn(&Value) + Send + Sync + 'static) -> Self {
        self.on_error = Some(std::sync::Arc::new(callback));
        self
    }
}

impl fmt::Debug for PushHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PushHooks")
            .field("on_ok", &self.on_ok.is_some())
            .field("on_error", &self.on_error.is_some())
            .finish()
    }
}

// ============================================================================
// Push
// ============================================================================

/// One outstanding client-initiated request.
#[derive(Debug, Clone)]
pub struct Push {
    /// Event name the frame carried.
    pub(crate) event: String,
    /// Topic the frame addressed.
    pub(crate) topic: String,
    /// Payload the frame carried.
    pub(crate) payload: Value,
    /// Reply callbacks.
    pub(crate) hooks: PushHooks,
}

impl Push {
    /// Creates a push record.
    #[inline]
    #[must_use]
    pub(crate) fn new(
        event: impl Into<String>,
        topic: impl Into<String>,
        payload: Value,
        hooks: PushHooks,
    ) -> Self {
        Self {
            event: event.into(),
            topic: topic.into(),
            payload,
            hooks,
        }
    }

    /// Event name the frame carried.
    #[inline]
    #[must_use]
    pub fn event(&self) -> &str {
        &self.event
    }

    /// Topic the frame addressed.
    #[inline]
    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Payload the frame carried.
    #[inline]
    #[must_use]
    pub fn payload(&self) -> &Value {
        &self.payload
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    #[test]
    fn test_push_accessors() {
        let push = Push::new("new_msg", "room:1", json!({"body": "hi"}), PushHooks::new());

        assert_eq!(push.event(), "new_msg");
        assert_eq!(push.topic(), "room:1");
        assert_eq!(push.payload(), &json!({"body": "hi"}));
    }

    #[test]
    fn test_hooks_debug_shows_presence() {
        let hooks = PushHooks::new().on_ok(|_| {});
        let debug = format!("{hooks:?}");

        assert!(debug.contains("on_ok: true"));
        assert!(debug.contains("on_error: false"));
    }
}
