//! The client handle: transport, registry and request id counter.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use registry::{CommandRegistry, CommandRegistryReader};
use serde_json::Value;
use transport::{DynTransport, ResponseFuture};
use zcashjson::{marshal_cmd, wallet_registry, AnyCommand, Marshal, Request};

use crate::error::Result;
use crate::future::TypedFuture;

/// A wallet RPC client.
///
/// Request ids start at 1 and are unique for the lifetime of the client.
/// Every method takes `&self`, so one client can be shared across tasks
/// behind an `Arc`.
pub struct Client {
    transport: DynTransport,
    registry: Arc<CommandRegistry>,
    next_id: AtomicU64,
}

impl Client {
    /// Create a client over `transport` that marshals with `registry`.
    pub fn new(transport: DynTransport, registry: Arc<CommandRegistry>) -> Self {
        Self { transport, registry, next_id: AtomicU64::new(1) }
    }

    /// Create a client whose registry holds the Zcash wallet commands.
    ///
    /// # Errors
    /// Returns [`crate::ClientError::Registry`] if the built-in descriptors
    /// fail validation.
    pub fn with_wallet_commands(transport: DynTransport) -> Result<Self> {
        Ok(Self::new(transport, Arc::new(wallet_registry()?)))
    }

    /// The registry used for marshaling.
    pub fn registry(&self) -> &CommandRegistry { &self.registry }

    /// Endpoint of the underlying transport.
    pub fn endpoint(&self) -> &str { self.transport.endpoint() }

    fn next_id(&self) -> u64 { self.next_id.fetch_add(1, Ordering::Relaxed) }

    /// Marshal `cmd` and dispatch it.
    ///
    /// Never fails directly: a marshal error is delivered through the
    /// returned future.
    pub fn send_cmd<M: Marshal + ?Sized>(&self, cmd: &M) -> ResponseFuture {
        let id = self.next_id();
        match marshal_cmd(self.registry.as_ref(), id, cmd) {
            Ok(request) => {
                tracing::debug!(id, method = %request.method, "sending command");
                self.transport.send(request)
            }
            Err(err) => {
                tracing::warn!(id, method = cmd.method(), "failed to marshal command: {}", err);
                ResponseFuture::failed(err.into())
            }
        }
    }

    pub(crate) fn typed<M: Marshal + ?Sized, R>(
        &self,
        cmd: &M,
        decode: fn(Value) -> Result<R>,
    ) -> TypedFuture<R> {
        TypedFuture::new(self.send_cmd(cmd), decode)
    }

    /// Dispatch a command built at runtime (see [`zcashjson::new_cmd`]) and
    /// return its raw result.
    pub async fn send_any(&self, cmd: &AnyCommand) -> Result<Value> {
        Ok(self.send_cmd(cmd).receive().await?)
    }

    /// Send `method` with `params` as-is, bypassing the registry.
    ///
    /// Useful for daemon methods this crate has no descriptor for.
    pub async fn raw_request(&self, method: &str, params: Vec<Value>) -> Result<Value> {
        let request = Request::new(self.next_id(), method, params);
        tracing::debug!(id = request.id, method, "sending raw request");
        Ok(self.transport.send(request).receive().await?)
    }

    /// Shut the transport down; outstanding operations fail with
    /// [`transport::TransportError::ConnectionClosed`].
    pub fn shutdown(&self) {
        tracing::debug!(endpoint = self.transport.endpoint(), "shutting down client");
        self.transport.shutdown();
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("transport", &self.transport.endpoint())
            .field("commands", &self.registry.command_count())
            .finish()
    }
}
