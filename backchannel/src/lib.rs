//! # backchannel
//!
//! Request/response correlation for asynchronous named calls that cross a
//! process or thread boundary.
//!
//! Many independent, short-lived callers ([`Source`]s) issue calls through a
//! single [`RequestSender`]; a [`Transport`] collaborator carries each call
//! to the external handler and later reports the outcome. The sender routes
//! every response back to the exact source that started the call, or
//! silently drops it if that source has been invalidated in the meantime.
//!
//! ## Pieces
//!
//! - [`Source`]: implemented by anything that issues calls
//! - [`RequestSender`]: id issuance, pending-request tracking, dispatch
//! - [`Transport`]: the out-of-process delivery seam
//! - [`CallResult`] / [`CallFailure`]: what a completed call reports
//!
//! ## Example
//!
//! ```
//! # fn main() -> Result<(), backchannel::SendError> {
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use backchannel::{
//!     CallResult, ContextHandle, OutgoingCall, RequestId, RequestSender, RoutingHint, Source,
//!     Transport, TransportError,
//! };
//!
//! struct Caller {
//!     responses: RefCell<Vec<CallResult>>,
//! }
//!
//! impl Source for Caller {
//!     fn context(&self) -> ContextHandle {
//!         ContextHandle::new(1)
//!     }
//!
//!     fn on_response_received(&self, _name: &str, _id: RequestId, result: CallResult) {
//!         self.responses.borrow_mut().push(result);
//!     }
//! }
//!
//! /// Transport that accepts calls and never answers.
//! struct Discard;
//!
//! impl Transport for Discard {
//!     fn forward(&self, _call: OutgoingCall) -> Result<(), TransportError> {
//!         Ok(())
//!     }
//! }
//!
//! let sender = RequestSender::new(Discard);
//! let caller = Rc::new(Caller {
//!     responses: RefCell::new(Vec::new()),
//! });
//!
//! let id = sender.send(
//!     Rc::clone(&caller) as Rc<dyn Source>,
//!     "session.describe",
//!     true,
//!     RoutingHint::OwningContext,
//!     serde_json::json!({ "verbose": true }),
//! )?;
//!
//! // Later, the transport reports completion on the owning context:
//! sender.handle_response(id, Ok(serde_json::json!({ "title": "x" })));
//! assert_eq!(caller.responses.borrow().len(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## Concurrency
//!
//! Strictly single-threaded cooperative: every operation runs on the context
//! that owns the sender, and [`RequestSender`] is `!Send` by construction. A
//! transport that lives elsewhere marshals its completion call back onto the
//! owning context before invoking
//! [`handle_response`](RequestSender::handle_response).

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]

mod error;
mod pending;
mod sender;
mod source;
mod transport;

// Error exports
pub use error::{CallFailure, CallResult, SendError, TransportError};

// Identity exports
pub use pending::{RequestId, RoutingHint};
pub use source::ContextHandle;

// Correlation-layer exports
pub use sender::RequestSender;
pub use source::Source;
pub use transport::{OutgoingCall, Transport};
