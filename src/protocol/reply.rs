//! Reply payload parsing.
//!
//! A `phx_reply` payload carries `{"status": "ok"|"error", "response": any}`.
//! [`Reply`] is a borrowed view over that shape; a payload that does not
//! match it parses to `None` and the whole frame is dropped by dispatch.

// ============================================================================
// Imports
// ============================================================================

use serde_json::Value;

// ============================================================================
// Reply
// ============================================================================

/// Borrowed view over a `phx_reply` payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reply<'a> {
    /// Reply status, `"ok"` or `"error"` from a conforming peer.
    pub status: &'a str,

    /// Event-specific response value; JSON null when the peer sent none.
    pub response: &'a Value,
}

impl<'a> Reply<'a> {
    /// Parses a reply payload.
    ///
    /// Returns `None` unless `payload` has a string `status` field. A
    /// missing `response` field reads as JSON null.
    #[must_use]
    pub fn parse(payload: &'a Value) -> Option<Self> {
        let status = payload.get("status")?.as_str()?;
        let response = payload.get("response").unwrap_or(&Value::Null);

        Some(Self { status, response })
    }

    /// Returns `true` if the peer reported success.
    #[inline]
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }

    /// Returns `true` if the peer reported failure.
    #[inline]
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.status == "error"
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
    fn test_parse_ok_reply() {
        let payload = json!({"status": "ok", "response": {"x": 1}});
        let reply = Reply::parse(&payload).expect("parse");

        assert!(reply.is_ok());
        assert!(!reply.is_error());
        assert_eq!(reply.response, &json!({"x": 1}));
    }

    #[test]
    fn test_parse_error_reply() {
        let payload = json!({"status": "error", "response": {"reason": "unmatched topic"}});
        let reply = Reply::parse(&payload).expect("parse");

        assert!(reply.is_error());
        assert_eq!(reply.response["reason"], "unmatched topic");
    }

    #[test]
    fn test_missing_response_reads_as_null() {
        let payload = json!({"status": "ok"});
        let reply = Reply::parse(&payload).expect("parse");
        assert_eq!(reply.response, &Value::Null);
    }

    #[test]
    fn test_rejects_malformed_payloads() {
        assert!(Reply::parse(&json!({})).is_none());
        assert!(Reply::parse(&json!({"status": 5})).is_none());
        assert!(Reply::parse(&json!({"response": {}})).is_none());
        assert!(Reply::parse(&json!("ok")).is_none());
        assert!(Reply::parse(&Value::Null).is_none());
    }

    #[test]
    fn test_unrecognized_status_still_parses() {
        let payload = json!({"status": "timeout", "response": {}});
        let reply = Reply::parse(&payload).expect("parse");

        assert!(!reply.is_ok());
        assert!(!reply.is_error());
        assert_eq!(reply.status, "timeout");
    }
}
