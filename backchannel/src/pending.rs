//! Request identity and the sender's per-call bookkeeping record.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::source::Source;

/// Correlates one outgoing call with its eventual response.
///
/// Ids are issued by
/// [`RequestSender::next_request_id`](crate::RequestSender::next_request_id)
/// and are unique among all requests pending on that sender.
///
/// # Examples
///
/// ```
/// use backchannel::RequestId;
///
/// let id = RequestId::new(7);
/// assert_eq!(id.raw(), 7);
/// assert_eq!(id.to_string(), "7");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct RequestId(u64);

impl RequestId {
    /// Create an id with an explicit value.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw value back.
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// The id after this one.
    pub(crate) const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which execution context a response should be handed to once it arrives.
///
/// Recorded per request and forwarded to the transport; the sender itself
/// never interprets the hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RoutingHint {
    /// Deliver on the context that owns the sender.
    #[default]
    OwningContext,
    /// Deliver through the transport's I/O context.
    IoContext,
}

/// Bookkeeping entry for one outstanding call.
///
/// Created when the request starts, read-only afterwards, destroyed exactly
/// once: on response delivery or when its source is invalidated.
pub(crate) struct PendingRequest {
    /// The id this record is keyed by.
    pub(crate) id: RequestId,

    /// Name of the remote operation.
    pub(crate) name: String,

    /// The source that started the call. Held by allocation identity; the
    /// source is only notified while this record exists.
    pub(crate) source: Rc<dyn Source>,

    /// Whether the source expects a callback for this call.
    pub(crate) has_callback: bool,

    /// Delivery routing recorded at start time.
    pub(crate) routing: RoutingHint,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_id_next_advances() {
        let id = RequestId::new(7);
        assert_eq!(id.next(), RequestId::new(8));
    }

    #[test]
    fn test_request_id_next_wraps() {
        let id = RequestId::new(u64::MAX);
        assert_eq!(id.next(), RequestId::new(0));
    }

    #[test]
    fn test_request_id_ordering() {
        assert!(RequestId::new(1) < RequestId::new(2));
    }

    #[test]
    fn test_routing_hint_default() {
        assert_eq!(RoutingHint::default(), RoutingHint::OwningContext);
    }

    #[test]
    fn test_request_id_serde_roundtrip() {
        let id = RequestId::new(99);
        let json = serde_json::to_string(&id).expect("serialize");
        let decoded: RequestId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(id, decoded);
    }
}
