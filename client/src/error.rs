//! Errors surfaced by client operations.

use registry::RegistryError;
use transport::TransportError;
use zcashjson::RpcError;

/// Result alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Everything that can go wrong between calling an operation and holding
/// its decoded result.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Dispatch failed, the daemon returned an error, or the command could
    /// not be marshaled.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The result payload does not have the expected shape.
    #[error("failed to decode result: {0}")]
    Decode(#[from] serde_json::Error),

    /// A balance is not a representable amount.
    #[error("invalid amount: {0}")]
    Amount(#[from] bitcoin::amount::ParseAmountError),

    /// The client's registry could not be built.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl ClientError {
    /// The daemon's structured error, if that is what this is.
    pub fn rpc_error(&self) -> Option<&RpcError> {
        match self {
            ClientError::Transport(TransportError::Rpc(err)) => Some(err),
            _ => None,
        }
    }

    /// Returns `true` if the connection went away before a response arrived.
    pub fn is_connection_closed(&self) -> bool {
        matches!(self, ClientError::Transport(TransportError::ConnectionClosed))
    }
}
