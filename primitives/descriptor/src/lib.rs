#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Command Descriptors
//!
//! This crate defines the data that describes a JSON-RPC command before any
//! value of it exists: its method name, the ordered positional parameters
//! (semantic type, optionality, declared default, usage override) and the
//! capability flags an external dispatcher may consult.
//!
//! Descriptors are plain data built through [`CommandDescriptor::builder`].
//! Nothing here is global; registries that index descriptors by name live in
//! the `zcashrpc-registry` crate.

pub mod command_def;

// Re-export the descriptor types for convenience
pub use command_def::*;
