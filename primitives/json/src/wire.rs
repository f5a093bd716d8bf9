//! JSON-RPC 1.0 envelopes exchanged with the daemon.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// Protocol version tag written into every request.
pub const JSONRPC_VERSION: &str = "1.0";

/// A wire request.
///
/// Field order matches the daemon's own encoding:
/// `{"jsonrpc":"1.0","method":..,"params":[..],"id":..}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// Protocol version tag
    pub jsonrpc: String,
    /// Method name
    pub method: String,
    /// Positional parameters
    #[serde(default, deserialize_with = "nullable_params")]
    pub params: Vec<Value>,
    /// Request identifier, echoed back in the response
    pub id: u64,
}

impl Request {
    /// Build a request with the current protocol version tag.
    pub fn new(id: u64, method: impl Into<String>, params: Vec<Value>) -> Self {
        Self { jsonrpc: JSONRPC_VERSION.to_string(), method: method.into(), params, id }
    }

    /// Parse a request from raw bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| Error::InvalidRequest(e.to_string()))
    }

    /// Encode the request as bytes ready for the transport.
    pub fn to_vec(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| Error::Marshal {
            method: self.method.clone(),
            reason: e.to_string(),
        })
    }
}

fn nullable_params<'de, D>(deserializer: D) -> std::result::Result<Vec<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Structured error object returned by the daemon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{code}: {message}")]
pub struct RpcError {
    /// Numeric error code (e.g. `-5` for an invalid address)
    pub code: i64,
    /// Human-readable message
    pub message: String,
}

/// A wire response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// The value returned by the call; `None` when absent or `null`
    #[serde(default)]
    pub result: Option<Value>,
    /// The error object, if the call failed
    #[serde(default)]
    pub error: Option<RpcError>,
    /// The identifier of the request being answered
    #[serde(default)]
    pub id: Option<u64>,
}

impl Response {
    /// A successful response carrying `result`.
    pub fn success(id: u64, result: Value) -> Self {
        Self { result: Some(result), error: None, id: Some(id) }
    }

    /// A failed response carrying `error`.
    pub fn failure(id: u64, error: RpcError) -> Self {
        Self { result: None, error: Some(error), id: Some(id) }
    }

    /// Parse a response from raw bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| Error::InvalidRequest(e.to_string()))
    }

    /// Split the envelope into the raw result payload or the daemon's error.
    ///
    /// A missing or `null` result with no error is a successful `null`
    /// payload, which is what commands without a result return.
    pub fn into_result(self) -> std::result::Result<Value, RpcError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.result.unwrap_or(Value::Null)),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_request_field_order() {
        let request = Request::new(7, "z_exportkey", vec![json!("zs1abc")]);
        let text = serde_json::to_string(&request).expect("serialize");
        assert_eq!(text, r#"{"jsonrpc":"1.0","method":"z_exportkey","params":["zs1abc"],"id":7}"#);
    }

    #[test]
    fn test_request_null_params() {
        let request = Request::from_slice(br#"{"jsonrpc":"1.0","method":"z_listaddresses","params":null,"id":1}"#)
            .expect("parse");
        assert!(request.params.is_empty());

        let request = Request::from_slice(br#"{"jsonrpc":"1.0","method":"z_listaddresses","id":2}"#)
            .expect("parse");
        assert!(request.params.is_empty());
        assert_eq!(request.id, 2);
    }

    #[test]
    fn test_request_from_slice_invalid() {
        assert!(matches!(Request::from_slice(b"not json"), Err(Error::InvalidRequest(_))));
    }

    #[test]
    fn test_response_into_result() {
        let ok = Response::from_slice(br#"{"result":"opid-1234","error":null,"id":1}"#)
            .expect("parse");
        assert_eq!(ok.id, Some(1));
        assert_eq!(ok.into_result(), Ok(json!("opid-1234")));

        let empty = Response::from_slice(br#"{"result":null,"error":null,"id":2}"#).expect("parse");
        assert_eq!(empty.into_result(), Ok(Value::Null));

        let failed = Response::from_slice(
            br#"{"result":null,"error":{"code":-5,"message":"Invalid address"},"id":3}"#,
        )
        .expect("parse");
        let err = failed.into_result().expect_err("error object present");
        assert_eq!(err.code, -5);
        assert_eq!(err.to_string(), "-5: Invalid address");
    }
}
