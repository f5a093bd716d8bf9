#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Logging setup for binaries and tests.
//!
//! Libraries in this workspace only emit `tracing` events; installing a
//! subscriber is left to the program, through [`init`].

use tracing_subscriber::EnvFilter;

/// Filter for `level`, overridden by `RUST_LOG` when that is set.
///
/// `level` may be a plain level (`debug`) or a full directive
/// (`client=debug,transport=trace`). A value that does not parse falls back
/// to `info`.
pub fn filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install a stderr `fmt` subscriber filtered at `level`.
///
/// Returns `false` if a global subscriber was already installed.
pub fn init(level: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(filter(level))
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init()
        .is_ok()
}
