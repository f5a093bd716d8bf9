#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! # `zcashrpc-transport` — Request dispatch layer
//!
//! This crate defines the boundary between the command layer and whatever
//! actually moves bytes to the daemon.
//!
//! ## Core Concepts
//!
//! ### `Transport` Trait
//! A transport accepts a marshaled [`Request`] and immediately hands back a
//! [`ResponseFuture`]. The transport must eventually complete that future
//! exactly once, or fail it with [`TransportError::ConnectionClosed`] when it
//! shuts down.
//!
//! ### `ResponseFuture` / `Promise`
//! A single-slot result pair. The transport holds the [`Promise`] and
//! completes it once; any number of callers may hold clones of the future
//! and read the same outcome, from async code with
//! [`ResponseFuture::receive`] or from plain threads with
//! [`ResponseFuture::receive_blocking`].
//!
//! ### `PendingRequests`
//! The table of in-flight requests keyed by id. Backends register a request
//! before sending it and route each response back by id, in whatever order
//! responses arrive.
//!
//! ### `DynTransport`
//! A type-erased (`Arc<dyn Transport>`) handle so the client can run over
//! any backend.
//!
//! ## Example
//! ```
//! use serde_json::json;
//! use transport::{channel, TransportError};
//!
//! # fn main() -> Result<(), TransportError> {
//! let (promise, future) = channel();
//! promise.fulfill(json!("opid-1234"));
//! assert_eq!(future.receive_blocking()?, json!("opid-1234"));
//! # Ok(())
//! # }
//! ```

mod future;
mod pending;

use std::sync::Arc;

use zcashjson::{Request, RpcError};

pub use future::{channel, Promise, ResponseFuture};
pub use pending::PendingRequests;

/// Type alias for structured error handling in transport operations.
pub type Result<T> = std::result::Result<T, TransportError>;

/// Canonical error type for all transport implementations.
///
/// `Clone` because every clone of a [`ResponseFuture`] observes the same
/// failure.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum TransportError {
    /// An HTTP-level failure (connection refused, timeout, or bad status code).
    #[error("HTTP transport error: {0}")]
    Http(String),

    /// Failure to serialize or deserialize a JSON payload.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The daemon answered with a structured error object.
    #[error("RPC error: {0}")]
    Rpc(#[from] RpcError),

    /// The response did not conform to the expected JSON-RPC envelope format.
    #[error("Invalid response format: {0}")]
    InvalidFormat(String),

    /// The connection was torn down before a response arrived.
    #[error("connection closed")]
    ConnectionClosed,

    /// A request with this id is already in flight.
    #[error("request id {0} is already in flight")]
    DuplicateRequestId(u64),

    /// The command could not be marshaled; deferred until receive.
    #[error(transparent)]
    Command(#[from] zcashjson::Error),

    /// Any other error not covered by the specific variants above.
    #[error("Other error: {0}")]
    Other(String),
}

impl From<serde_json::Error> for TransportError {
    fn from(err: serde_json::Error) -> Self { TransportError::Serialization(err.to_string()) }
}

/// The transport boundary.
///
/// `send` never blocks and never fails directly: every failure, including
/// one detected before the request leaves the process, is delivered through
/// the returned future.
pub trait Transport: Send + Sync {
    /// Dispatch `request` and return the future its outcome will arrive on.
    fn send(&self, request: Request) -> ResponseFuture;

    /// Returns the configured endpoint or connection descriptor.
    ///
    /// For network transports, this is usually the URL or socket path.
    /// For mock or in-memory transports, it may be a symbolic name.
    fn endpoint(&self) -> &str;

    /// Stop accepting requests and fail every outstanding future with
    /// [`TransportError::ConnectionClosed`].
    fn shutdown(&self);
}

/// Type alias for a shared, dynamically dispatched transport instance.
///
/// ```
/// use transport::DynTransport;
///
/// fn use_transport(t: DynTransport) {
///     println!("Using endpoint: {}", t.endpoint());
/// }
/// ```
pub type DynTransport = Arc<dyn Transport>;

/// Gets a random free port assigned by the OS.
///
/// This function binds to `127.0.0.1:0`, which causes the OS to assign
/// an available port. The listener is then dropped and the port number
/// is returned.
///
/// # Errors
///
/// Returns an error if binding to the address fails.
pub fn get_random_free_port() -> std::io::Result<u16> {
    let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
    Ok(listener.local_addr()?.port())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from() {
        let err = serde_json::from_str::<serde_json::Value>("not-json")
            .expect_err("Expected JSON parsing to fail");
        let terr: TransportError = err.into();

        match terr {
            TransportError::Serialization(msg) => assert!(!msg.is_empty()),
            _ => panic!("expected Serialization error variant"),
        }
    }

    #[test]
    fn test_rpc_error_display() {
        let err: TransportError = RpcError { code: -8, message: "Invalid parameter".to_string() }.into();
        assert_eq!(err.to_string(), "RPC error: -8: Invalid parameter");
    }

    #[test]
    fn test_get_random_free_port() {
        let port = get_random_free_port().expect("Should get a free port");

        assert!(port > 0);
    }
}
