//! Caller capability: anything that issues calls implements [`Source`].
//!
//! Every request is associated with a `Source`, which is notified when the
//! corresponding response arrives. A source that is going away while it may
//! still have requests in flight must call
//! [`RequestSender::invalidate_source`](crate::RequestSender::invalidate_source)
//! first, so no notification is delivered to it later.

use serde::{Deserialize, Serialize};

use crate::error::CallResult;
use crate::pending::RequestId;

/// Opaque identifier for a caller's execution context.
///
/// Produced by the caller, carried untouched through the sender, and handed
/// to the transport for delivery routing. The sender never interprets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ContextHandle(u64);

impl ContextHandle {
    /// Create a handle from a raw value.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw value back.
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ContextHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:x}", self.0)
    }
}

/// A user of [`RequestSender`](crate::RequestSender): issues named calls and
/// receives their responses.
///
/// Implementors take `&self` and use interior mutability, matching the
/// single-threaded cooperative model of the sender.
pub trait Source {
    /// The execution context responses for this source should be routed to.
    fn context(&self) -> ContextHandle;

    /// Invoked exactly once per completed, non-invalidated request.
    ///
    /// `name` and `request_id` match the original call. `Ok` carries the
    /// handler's structured value; `Err` carries a failure the handler
    /// reported, with a human-readable description.
    fn on_response_received(&self, name: &str, request_id: RequestId, result: CallResult);
}
