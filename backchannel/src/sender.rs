//! Request registry and response dispatcher.
//!
//! [`RequestSender`] owns the mapping from request id to in-flight call,
//! issues correlation ids, hands outgoing calls to the transport, and routes
//! each response back to the source that started the call, or drops it when
//! that source has been invalidated in the meantime.
//!
//! # Design
//!
//! - Single-threaded cooperative: interior mutability (`Cell`/`RefCell`)
//!   keeps every operation `&self`, and the type is `!Send` by construction,
//!   so entering it from another thread is a compile error rather than a
//!   runtime race.
//! - Table borrows are released before the transport handoff and before any
//!   delivery callback, so both may re-enter the sender.
//! - There is no per-request cancel and no timeout: a request with no
//!   response stays pending until its source is invalidated.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use serde_json::Value;

use crate::error::{CallResult, SendError};
use crate::pending::{PendingRequest, RequestId, RoutingHint};
use crate::source::Source;
use crate::transport::{OutgoingCall, Transport};

/// Sends named calls to an external handler and routes each response back to
/// the originating [`Source`].
pub struct RequestSender<T: Transport> {
    /// Collaborator carrying calls across the boundary.
    transport: T,

    /// In-flight calls keyed by request id.
    /// RefCell for interior mutability in the single-threaded model.
    pending: RefCell<HashMap<RequestId, PendingRequest>>,

    /// Next id to issue. Cell keeps issuance at `&self`.
    next_id: Cell<RequestId>,
}

impl<T: Transport> RequestSender<T> {
    /// Create a sender forwarding calls through `transport`.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            pending: RefCell::new(HashMap::new()),
            next_id: Cell::new(RequestId::new(1)),
        }
    }

    /// Issue the next request id.
    ///
    /// Ids are strictly increasing and never reused while the request they
    /// were issued for is pending. To avoid collisions, every id passed to
    /// [`start_request`](Self::start_request) should come from here.
    pub fn next_request_id(&self) -> RequestId {
        let id = self.next_id.get();
        self.next_id.set(id.next());
        id
    }

    /// Start a call to the remote operation `name`, completed later by
    /// [`handle_response`](Self::handle_response) with the same `request_id`.
    ///
    /// Records the call and hands it to the transport. Returns immediately;
    /// the response may arrive at any later time, or never.
    ///
    /// # Errors
    ///
    /// [`SendError::DuplicateRequestId`] if `request_id` is already pending;
    /// the existing call is left untouched and nothing reaches the
    /// transport. [`SendError::Transport`] if the handoff fails; the call is
    /// then not recorded.
    pub fn start_request(
        &self,
        source: Rc<dyn Source>,
        name: &str,
        request_id: RequestId,
        has_callback: bool,
        routing: RoutingHint,
        arguments: Value,
    ) -> Result<(), SendError> {
        let context = source.context();
        {
            // Insert before the handoff so a transport that completes
            // synchronously on this context can already find the record.
            // Borrow released before forward(), which may re-enter.
            let mut pending = self.pending.borrow_mut();
            if pending.contains_key(&request_id) {
                return Err(SendError::DuplicateRequestId { id: request_id });
            }
            pending.insert(
                request_id,
                PendingRequest {
                    id: request_id,
                    name: name.to_string(),
                    source,
                    has_callback,
                    routing,
                },
            );
        }

        tracing::debug!(%request_id, %name, "starting request");

        let call = OutgoingCall {
            context,
            name: name.to_string(),
            request_id,
            has_callback,
            routing,
            arguments,
        };
        if let Err(err) = self.transport.forward(call) {
            // The call never left this process; drop the record again.
            self.pending.borrow_mut().remove(&request_id);
            return Err(SendError::Transport(err));
        }
        Ok(())
    }

    /// Issue an id and start the request in one step.
    ///
    /// Convenience over [`next_request_id`](Self::next_request_id) followed
    /// by [`start_request`](Self::start_request); returns the id the
    /// response will carry.
    ///
    /// # Errors
    ///
    /// Same as [`start_request`](Self::start_request), minus the duplicate-id
    /// case, which cannot occur for a freshly issued id.
    pub fn send(
        &self,
        source: Rc<dyn Source>,
        name: &str,
        has_callback: bool,
        routing: RoutingHint,
        arguments: Value,
    ) -> Result<RequestId, SendError> {
        let request_id = self.next_request_id();
        self.start_request(source, name, request_id, has_callback, routing, arguments)?;
        Ok(request_id)
    }

    /// Complete the call started with `request_id`.
    ///
    /// Invoked by (or on behalf of) the transport, on the sender's owning
    /// context. The pending record is removed first, so a second response
    /// for the same id, one for a source that already invalidated its
    /// requests, or one for an id that was never issued is a silent no-op.
    /// Otherwise the originating source receives `on_response_received`
    /// exactly once, with the name and id of the original call.
    pub fn handle_response(&self, request_id: RequestId, result: CallResult) {
        // Remove inside its own scope; the callback below may re-enter.
        let request = self.pending.borrow_mut().remove(&request_id);
        let Some(request) = request else {
            // Either the source invalidated its requests while the response
            // was in flight, or the transport sent an id it was never given.
            // The two are indistinguishable here and both are benign.
            tracing::debug!(%request_id, "no pending request for response, dropping");
            return;
        };
        debug_assert_eq!(request.id, request_id);

        tracing::debug!(
            %request_id,
            name = %request.name,
            has_callback = request.has_callback,
            routing = ?request.routing,
            success = result.is_ok(),
            "delivering response"
        );
        request
            .source
            .on_response_received(&request.name, request_id, result);
    }

    /// Forget every pending request owned by `source`, delivering nothing.
    ///
    /// Must be called before a source with possibly-outstanding requests is
    /// torn down; afterwards no response for those requests reaches it. Safe
    /// to call for a source with zero pending requests, and idempotent.
    pub fn invalidate_source(&self, source: &Rc<dyn Source>) {
        let mut pending = self.pending.borrow_mut();
        let before = pending.len();
        pending.retain(|_, request| !Rc::ptr_eq(&request.source, source));
        let removed = before - pending.len();
        if removed > 0 {
            tracing::debug!(removed, "invalidated source with pending requests");
        }
    }

    /// Number of requests currently awaiting a response.
    pub fn pending_count(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Whether `request_id` is currently awaiting a response.
    pub fn has_pending(&self, request_id: RequestId) -> bool {
        self.pending.borrow().contains_key(&request_id)
    }
}
