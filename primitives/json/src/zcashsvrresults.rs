//! Result shapes returned by Zcash wallet commands.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Error details of a failed asynchronous operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZOperationStatusError {
    /// Numeric error code
    pub code: i64,
    /// Error message
    pub message: String,
}

/// Models the entries returned by `z_getoperationresult` and
/// `z_getoperationstatus`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZGetOperationStatusResult {
    /// Operation id, e.g. `opid-...`
    pub id: String,
    /// `queued`, `executing`, `success`, `failed` or `cancelled`
    pub status: String,
    /// Unix time at which the operation was created
    pub creation_time: i64,
    /// Result object of a successful operation (e.g. `{"txid": ...}`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Map<String, Value>>,
    /// Error of a failed operation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ZOperationStatusError>,
    /// Seconds spent executing, once finished
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_secs: Option<f64>,
}

/// Models the data from the `z_gettotalbalance` command.
///
/// Amounts are kept as the decimal strings the daemon sends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZGetTotalBalanceResult {
    /// Balance of transparent addresses
    pub transparent: String,
    /// Balance of shielded addresses
    pub private: String,
    /// Sum of both
    pub total: String,
}

/// Models one entry from the `z_listreceivedbyaddress` command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZListReceivedByAddressResult {
    /// Transaction id
    pub txid: String,
    /// Amount received in ZEC
    pub amount: f64,
    /// Hex-encoded memo
    #[serde(default)]
    pub memo: String,
}
