//! Futures that decode their raw payload into an operation's result type.

use std::fmt;

use bitcoin::Amount;
use serde::de::DeserializeOwned;
use serde_json::Value;
use transport::ResponseFuture;

use crate::error::Result;

/// The eventual typed result of one operation.
///
/// Receiving does not consume the future: every call decodes the same
/// delivered payload, so repeated receives give equal results.
pub struct TypedFuture<R> {
    inner: ResponseFuture,
    decode: fn(Value) -> Result<R>,
}

impl<R> TypedFuture<R> {
    pub(crate) fn new(inner: ResponseFuture, decode: fn(Value) -> Result<R>) -> Self { Self { inner, decode } }

    /// Wait for the response and decode it.
    pub async fn receive(&self) -> Result<R> {
        let value = self.inner.receive().await?;
        (self.decode)(value)
    }

    /// Block the current thread until the response arrives, then decode it.
    ///
    /// Must not be called from inside an async task.
    pub fn receive_blocking(&self) -> Result<R> {
        let value = self.inner.receive_blocking()?;
        (self.decode)(value)
    }

    /// The untyped future underneath.
    pub fn raw(&self) -> &ResponseFuture { &self.inner }
}

impl<R> Clone for TypedFuture<R> {
    fn clone(&self) -> Self { Self { inner: self.inner.clone(), decode: self.decode } }
}

impl<R> fmt::Debug for TypedFuture<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedFuture").field("inner", &self.inner).finish()
    }
}

/// Scalar, list and structured results.
pub(crate) fn decode_json<R: DeserializeOwned>(value: Value) -> Result<R> { Ok(serde_json::from_value(value)?) }

/// Balances arrive as a decimal number of ZEC.
pub(crate) fn decode_amount(value: Value) -> Result<Amount> {
    let zec: f64 = serde_json::from_value(value)?;
    Ok(Amount::from_btc(zec)?)
}

/// Commands without a result; only the error matters.
pub(crate) fn decode_nothing(_value: Value) -> Result<()> { Ok(()) }
