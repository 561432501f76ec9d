//! The seam to whatever actually carries a call across the boundary.
//!
//! The sender hands each started call to a [`Transport`] as an
//! [`OutgoingCall`] and forgets about it until the transport, on its own
//! schedule, reports completion by re-entering
//! [`RequestSender::handle_response`](crate::RequestSender::handle_response).
//! The concrete channel, serialization format, and remote handler are all the
//! transport's business.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::TransportError;
use crate::pending::{RequestId, RoutingHint};
use crate::source::ContextHandle;

/// Everything a transport needs to carry one named call to the remote
/// handler.
///
/// Serde-derived so implementations can serialize it for the wire; the
/// sender itself never serializes anything.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutgoingCall {
    /// Execution context of the originating source.
    pub context: ContextHandle,

    /// Name of the remote operation.
    pub name: String,

    /// Correlation id; the transport must echo it back on completion.
    pub request_id: RequestId,

    /// Whether the source expects a callback for this call.
    pub has_callback: bool,

    /// Where the response should be handed once it arrives.
    pub routing: RoutingHint,

    /// Opaque structured arguments for the remote operation.
    pub arguments: Value,
}

/// Carries outgoing calls across the process or thread boundary.
///
/// The handoff is fire-and-forget: [`forward`](Transport::forward) must not
/// block waiting for the remote handler. The transport reports completion by
/// calling
/// [`RequestSender::handle_response`](crate::RequestSender::handle_response)
/// on the sender's owning context: zero times (the handler never responds)
/// or exactly once per id, never more. A transport living on another context
/// marshals that call onto the owning context itself.
pub trait Transport {
    /// Accept one outgoing call for out-of-process handling.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the call cannot be handed off; the
    /// sender then unwinds the call as if it was never started.
    fn forward(&self, call: OutgoingCall) -> Result<(), TransportError>;
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_outgoing_call_serde_roundtrip() {
        let call = OutgoingCall {
            context: ContextHandle::new(3),
            name: "store.get".to_string(),
            request_id: RequestId::new(7),
            has_callback: true,
            routing: RoutingHint::IoContext,
            arguments: json!({ "key": "theme" }),
        };

        let encoded = serde_json::to_string(&call).expect("serialize");
        let decoded: OutgoingCall = serde_json::from_str(&encoded).expect("deserialize");

        assert_eq!(decoded.context, call.context);
        assert_eq!(decoded.name, call.name);
        assert_eq!(decoded.request_id, call.request_id);
        assert_eq!(decoded.has_callback, call.has_callback);
        assert_eq!(decoded.routing, call.routing);
        assert_eq!(decoded.arguments, call.arguments);
    }
}
