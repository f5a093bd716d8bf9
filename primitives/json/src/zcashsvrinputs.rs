//! Structured inputs accepted by Zcash wallet commands.

use serde::{Deserialize, Serialize, Serializer};

/// One recipient of a `z_sendmany` call.
///
/// `memo` is always written, as `null` when absent; the daemon only accepts
/// a memo for shielded recipients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZSendManyEntry {
    /// Transparent or shielded recipient address
    pub address: String,
    /// Amount in ZEC
    #[serde(serialize_with = "finite_amount")]
    pub amount: f64,
    /// Hex-encoded memo
    #[serde(default)]
    pub memo: Option<String>,
}

impl ZSendManyEntry {
    /// A recipient without a memo.
    pub fn new(address: impl Into<String>, amount: f64) -> Self {
        Self { address: address.into(), amount, memo: None }
    }

    /// Attach a hex-encoded memo.
    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = Some(memo.into());
        self
    }
}

fn finite_amount<S: Serializer>(amount: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if !amount.is_finite() {
        return Err(serde::ser::Error::custom(format!("amount must be finite, got {}", amount)));
    }
    serializer.serialize_f64(*amount)
}
