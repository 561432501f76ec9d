//! Error types for the correlation layer.
//!
//! Two kinds of failure live here and they are deliberately distinct:
//!
//! - [`SendError`] / [`TransportError`]: this process could not start or hand
//!   off a call. Surfaced to the code that called
//!   [`start_request`](crate::RequestSender::start_request).
//! - [`CallFailure`]: the remote handler completed the call and reported a
//!   failure. Forwarded to the originating [`Source`](crate::Source) like any
//!   other result, inside [`CallResult`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::pending::RequestId;

/// Outcome of a completed call, as reported by the remote handler.
///
/// `Ok` carries the handler's structured response; `Err` is a failure the
/// handler reported. Either way the call completed; a transport fault that
/// prevents completion shows up as no response at all, not as an `Err` here.
pub type CallResult = Result<Value, CallFailure>;

/// Failure reported by the remote handler for a completed call.
///
/// Serializable so a transport can carry it back across the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{message}")]
pub struct CallFailure {
    /// Human-readable description supplied by the handler.
    pub message: String,
}

impl CallFailure {
    /// Create a failure from a description.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors a transport can report when accepting an outgoing call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The transport is closed or shutting down.
    #[error("transport closed")]
    Closed,

    /// The call could not be handed off.
    #[error("send failed: {message}")]
    SendFailed {
        /// Details about the handoff failure.
        message: String,
    },
}

/// Errors from starting a request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SendError {
    /// The request id already tracks an in-flight call.
    ///
    /// Starting two requests with one id is a caller bug; the sender rejects
    /// the second deterministically and leaves the first untouched.
    #[error("duplicate request id: {id}")]
    DuplicateRequestId {
        /// The id that is already pending.
        id: RequestId,
    },

    /// The transport refused the outgoing call. Nothing was recorded.
    #[error("transport rejected call: {0}")]
    Transport(#[from] TransportError),
}
