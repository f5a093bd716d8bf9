#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! # `zcashjson` — Zcash JSON-RPC command marshaling
//!
//! This crate turns strongly-typed wallet commands into JSON-RPC 1.0 wire
//! requests and back again.
//!
//! ## Core Concepts
//!
//! ### [`Command`]
//! Implemented by every concrete command struct (`ZGetBalanceCmd`,
//! `ZSendManyCmd`, ...). It ties a method name to a
//! [`descriptor::CommandDescriptor`] and converts the struct to and from
//! positional parameter slots.
//!
//! ### Marshaling
//! [`marshal_cmd`] looks the command up in an injected registry and emits a
//! [`Request`] whose parameter list stops at the last parameter that is set
//! and differs from its declared default.
//!
//! ### Unmarshaling
//! [`unmarshal_cmd`] and [`unmarshal_as`] rebuild a command from a wire
//! request, filling absent optional parameters with their defaults.
//! [`new_cmd`] builds a command from loosely-typed positional arguments, the
//! way a command-line tool receives them.
//!
//! ## Example
//! ```
//! use zcashjson::{marshal_cmd, wallet_registry, ZGetBalanceCmd};
//!
//! let registry = wallet_registry()?;
//! let cmd = ZGetBalanceCmd::new(Some("t1addr".to_string()), None);
//! let request = marshal_cmd(&registry, 1, &cmd)?;
//! assert_eq!(
//!     serde_json::to_string(&request)?,
//!     r#"{"jsonrpc":"1.0","method":"z_getbalance","params":["t1addr"],"id":1}"#
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod coerce;
pub mod command;
pub mod error;
pub mod params;
pub mod wire;
pub mod zcashsvrcmds;
pub mod zcashsvrinputs;
pub mod zcashsvrresults;

pub use command::{marshal_cmd, new_cmd, unmarshal_as, unmarshal_cmd, Command, Marshal};
pub use error::{Error, Result};
pub use params::{ParamReader, ParamWriter};
pub use wire::{Request, Response, RpcError, JSONRPC_VERSION};
pub use zcashsvrcmds::*;
pub use zcashsvrinputs::*;
pub use zcashsvrresults::*;
