//! Errors raised while building, marshaling or unmarshaling commands.

use descriptor::ParamType;
use registry::RegistryError;

/// Result alias for this crate
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for command construction and (un)marshaling.
///
/// Every variant owns plain data so the error can be cloned into a
/// response future and handed to more than one receiver.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// Lookup or registration failure, including unknown method names.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// The untyped constructor received too few or too many arguments.
    #[error("wrong number of params for method {method}: got {got}, expected {min} to {max}")]
    NumParams {
        /// Method name
        method: String,
        /// Number of arguments supplied
        got: usize,
        /// Number of required parameters
        min: usize,
        /// Total number of parameters
        max: usize,
    },

    /// A wire request carries too few or too many parameters.
    #[error("wrong number of params in request for {method}: got {got}, expected {min} to {max}")]
    WrongNumberOfParams {
        /// Method name
        method: String,
        /// Number of parameters on the wire
        got: usize,
        /// Number of required parameters
        min: usize,
        /// Total number of parameters
        max: usize,
    },

    /// A loosely-typed argument cannot be converted to the declared type.
    #[error("parameter '{param}' of {method} cannot be coerced to {expected}: {reason}")]
    TypeCoercion {
        /// Method name
        method: String,
        /// Parameter name
        param: String,
        /// Declared semantic type
        expected: ParamType,
        /// What went wrong
        reason: String,
    },

    /// A wire parameter cannot be decoded into its field.
    #[error("parameter '{param}' of {method} must be {expected}: {reason}")]
    UnmarshalType {
        /// Method name
        method: String,
        /// Parameter name
        param: String,
        /// Declared semantic type
        expected: ParamType,
        /// What went wrong
        reason: String,
    },

    /// The command cannot be expressed as a wire request.
    #[error("failed to marshal {method}: {reason}")]
    Marshal {
        /// Method name
        method: String,
        /// What went wrong
        reason: String,
    },

    /// The bytes are not a well-formed JSON-RPC envelope.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}
