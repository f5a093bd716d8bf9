//! Routing table of in-flight requests.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use zcashjson::Response;

use crate::future::{channel, Promise, ResponseFuture};
use crate::{Result, TransportError};

#[derive(Debug, Default)]
struct Inner {
    waiting: HashMap<u64, Promise>,
    closed: bool,
}

/// In-flight requests keyed by request id.
///
/// Backends call [`register`](Self::register) before a request leaves the
/// process and [`deliver`](Self::deliver) as each response comes back.
#[derive(Debug, Default)]
pub struct PendingRequests {
    inner: Mutex<Inner>,
}

impl PendingRequests {
    /// Create an empty table.
    pub fn new() -> Self { Self::default() }

    fn lock(&self) -> MutexGuard<'_, Inner> { self.inner.lock().unwrap_or_else(PoisonError::into_inner) }

    /// Start tracking request `id` and return the future its response will
    /// complete.
    ///
    /// # Errors
    /// - [`TransportError::ConnectionClosed`] after [`close`](Self::close)
    /// - [`TransportError::DuplicateRequestId`] if `id` is already in flight
    pub fn register(&self, id: u64) -> Result<ResponseFuture> {
        let mut inner = self.lock();
        if inner.closed {
            return Err(TransportError::ConnectionClosed);
        }
        if inner.waiting.contains_key(&id) {
            return Err(TransportError::DuplicateRequestId(id));
        }
        let (promise, future) = channel();
        inner.waiting.insert(id, promise);
        Ok(future)
    }

    /// Route `response` to the request with the same id.
    ///
    /// A structured daemon error fails the future with
    /// [`TransportError::Rpc`].
    ///
    /// # Errors
    /// [`TransportError::InvalidFormat`] if the response has no id or no
    /// request with that id is in flight.
    pub fn deliver(&self, response: Response) -> Result<()> {
        let id = response
            .id
            .ok_or_else(|| TransportError::InvalidFormat("response has no id".to_string()))?;
        let promise = self.lock().waiting.remove(&id);
        match promise {
            Some(promise) => {
                tracing::trace!(id, "delivering response");
                promise.complete(response.into_result().map_err(TransportError::Rpc));
                Ok(())
            }
            None => {
                tracing::warn!(id, "response for unknown request id");
                Err(TransportError::InvalidFormat(format!("no request in flight with id {}", id)))
            }
        }
    }

    /// Fail request `id` with `err`. Returns `false` if it was not in flight.
    pub fn fail(&self, id: u64, err: TransportError) -> bool {
        let promise = self.lock().waiting.remove(&id);
        match promise {
            Some(promise) => {
                promise.fail(err);
                true
            }
            None => false,
        }
    }

    /// Fail every outstanding request with [`TransportError::ConnectionClosed`]
    /// and reject further registrations. Returns how many were failed.
    pub fn close(&self) -> usize {
        let drained: Vec<Promise> = {
            let mut inner = self.lock();
            inner.closed = true;
            inner.waiting.drain().map(|(_, promise)| promise).collect()
        };
        let count = drained.len();
        if count > 0 {
            tracing::debug!(outstanding = count, "closing with requests in flight");
        }
        for promise in drained {
            promise.fail(TransportError::ConnectionClosed);
        }
        count
    }

    /// Returns `true` once [`close`](Self::close) has been called.
    pub fn is_closed(&self) -> bool { self.lock().closed }

    /// Number of requests in flight.
    pub fn len(&self) -> usize { self.lock().waiting.len() }

    /// Returns `true` if nothing is in flight.
    pub fn is_empty(&self) -> bool { self.lock().waiting.is_empty() }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use zcashjson::RpcError;

    use super::*;

    #[test]
    fn test_register_twice() {
        let pending = PendingRequests::new();
        pending.register(1).expect("first");
        assert_eq!(pending.register(1).expect_err("duplicate"), TransportError::DuplicateRequestId(1));
        assert_eq!(pending.len(), 1);
    }

    #[test]
    fn test_deliver_routes_by_id() {
        let pending = PendingRequests::new();
        let first = pending.register(1).expect("register");
        let second = pending.register(2).expect("register");

        pending.deliver(Response::success(2, json!("two"))).expect("deliver");
        assert!(!first.is_ready());
        assert_eq!(second.try_receive(), Some(Ok(json!("two"))));

        let rpc = RpcError { code: -5, message: "Invalid address".to_string() };
        pending.deliver(Response::failure(1, rpc.clone())).expect("deliver");
        assert_eq!(first.try_receive(), Some(Err(TransportError::Rpc(rpc))));
        assert!(pending.is_empty());
    }

    #[test]
    fn test_deliver_unknown_id() {
        let pending = PendingRequests::new();
        let err = pending.deliver(Response::success(9, json!(null))).expect_err("unknown");
        assert!(matches!(err, TransportError::InvalidFormat(_)));

        let no_id = Response { result: None, error: None, id: None };
        assert!(matches!(pending.deliver(no_id), Err(TransportError::InvalidFormat(_))));
    }

    #[test]
    fn test_close_rejects_registration() {
        let pending = PendingRequests::new();
        let future = pending.register(1).expect("register");
        assert_eq!(pending.close(), 1);
        assert!(pending.is_closed());
        assert_eq!(future.try_receive(), Some(Err(TransportError::ConnectionClosed)));
        assert_eq!(pending.register(2).expect_err("closed"), TransportError::ConnectionClosed);
    }

    #[test]
    fn test_fail() {
        let pending = PendingRequests::new();
        let future = pending.register(3).expect("register");
        assert!(pending.fail(3, TransportError::Http("503".to_string())));
        assert!(!pending.fail(3, TransportError::Http("503".to_string())));
        assert_eq!(future.try_receive(), Some(Err(TransportError::Http("503".to_string()))));
    }
}
