// SPDX-License-Identifier: CC0-1.0

//! zcashrpc umbrella crate.
//!
//! Re-exports the workspace member crates under one roof:
//!
//! - [`descriptor`] and [`registry`]: command descriptors and the registry
//!   they are looked up in
//! - [`json`]: wallet commands, marshaling and the wire envelopes
//! - [`transport`]: the dispatch boundary and its single-slot futures
//! - [`http`]: the HTTP transport
//! - [`client`]: typed wallet operations

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![doc(test(attr(warn(unused))))]

pub use {client, descriptor, http, registry, transport, zcashjson as json};

pub use ::client::{Client, ClientError, TypedFuture};

/// Miscellaneous metadata about the zcashrpc workspace.
pub mod zcashrpc_meta {
    /// Version string for the umbrella crate, as reported by Cargo.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
}
