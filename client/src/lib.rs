#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! # `zcashrpc-client` — Typed wallet operations
//!
//! [`Client`] ties an injected [`transport::DynTransport`] to an injected
//! command registry and exposes one method pair per wallet command:
//!
//! - `x_async(..)` marshals and dispatches immediately and returns a
//!   [`TypedFuture`]; nothing fails at this point, marshal errors included.
//! - `x(..)` awaits that future and decodes the result.
//!
//! Non-async callers use [`TypedFuture::receive_blocking`] on the `_async`
//! form.
//!
//! ## Example
//! ```no_run
//! use std::sync::Arc;
//!
//! use client::Client;
//! use zcashrpc_http::HttpTransport;
//!
//! # async fn demo() -> Result<(), client::ClientError> {
//! let transport = Arc::new(HttpTransport::with_auth("http://127.0.0.1:8232", "user", "pass"));
//! let client = Client::with_wallet_commands(transport)?;
//!
//! let balance = client.z_get_total_balance(None, None).await?;
//! println!("private balance: {}", balance.private);
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod future;
mod wallet;

pub use client::Client;
pub use error::{ClientError, Result};
pub use future::TypedFuture;
