//! Type-safe identifiers for protocol correlation.
//!
//! The Phoenix Channels protocol correlates every client-initiated request
//! with its eventual reply through an integer reference number. Wrapping it
//! in a newtype keeps refs from being mixed up with other integers (payload
//! counters, ports, ...) at compile time.
//!
//! Refs are assigned by [`Socket`](crate::socket::Socket), which owns the
//! monotonic counter; there is no global ref source.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Ref
// ============================================================================

/// A request correlation reference.
///
/// Assigned by the client when a frame is pushed, echoed verbatim by the
/// peer in the matching `phx_reply`. Refs are strictly increasing within one
/// socket and never reused.
///
/// # Wire Format
///
/// Serializes as a bare JSON integer: `{"ref": 42}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ref(u64);

impl Ref {
    /// The first ref a fresh socket assigns.
    pub const ZERO: Ref = Ref(0);

    /// Creates a ref from a raw value.
    #[inline]
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw ref value.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Returns the next ref in sequence.
    #[inline]
    #[must_use]
    pub(crate) const fn successor(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for Ref {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Tests
// ============================================================================
