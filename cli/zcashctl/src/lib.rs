#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Library side of `zcashctl`: argument parsing, configuration merging and
//! the command round trip, kept out of `main` so they can be tested.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use client::{Client, ClientError};
use config::{Config, ConfigError, RpcAuth, RpcConfig};
use http::HttpTransport;
use registry::{CommandRegistryReader, RegistryError};
use serde_json::Value;
use transport::TransportError;
use zcashjson::{new_cmd, AnyCommand};

/// Command-line interface of `zcashctl`.
#[derive(Parser, Debug)]
#[command(
    name = "zcashctl",
    about = "Send wallet commands to a zcashd node",
    version,
    after_help = "Parameters are positional. Arrays and objects are given as JSON text, \
                  e.g. zcashctl z_sendmany myaccount '[{\"address\":\"t1...\",\"amount\":1.5}]'"
)]
pub struct Cli {
    /// Configuration file (default: {config_dir}/zcashrpc/config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// RPC endpoint URL
    #[arg(long, value_name = "URL")]
    pub rpc_url: Option<String>,

    /// RPC username
    #[arg(long, value_name = "USER", requires = "rpc_password")]
    pub rpc_user: Option<String>,

    /// RPC password
    #[arg(long, value_name = "PASSWORD", requires = "rpc_user")]
    pub rpc_password: Option<String>,

    /// Read credentials from the daemon's cookie file
    #[arg(long, value_name = "PATH", conflicts_with = "rpc_user")]
    pub cookie: Option<PathBuf>,

    /// Log level or filter directive
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// List the supported commands and exit
    #[arg(long)]
    pub list_commands: bool,

    /// Method to call
    #[arg(required_unless_present = "list_commands")]
    pub method: Option<String>,

    /// Positional parameters
    pub params: Vec<String>,
}

/// Errors reported by `zcashctl`.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// The configuration could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The command could not be built from its arguments
    #[error(transparent)]
    Command(#[from] zcashjson::Error),
    /// The transport could not be set up
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// The call failed
    #[error(transparent)]
    Client(#[from] ClientError),
    /// The command registry could not be built
    #[error(transparent)]
    Registry(#[from] RegistryError),
    /// Nothing to do
    #[error("no method given")]
    MissingMethod,
}

/// Load the configuration file and apply command-line overrides.
pub fn resolve_config(cli: &Cli) -> Result<Config, CliError> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(url) = &cli.rpc_url {
        config.rpc.url = url.clone();
    }
    if let Some(user) = &cli.rpc_user {
        config.rpc.user = Some(user.clone());
        config.rpc.password = cli.rpc_password.clone();
    }
    if let Some(cookie) = &cli.cookie {
        config.rpc.user = None;
        config.rpc.password = None;
        config.rpc.cookie_file = Some(cookie.clone());
    }
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    Ok(config)
}

/// HTTP transport for the configured endpoint and credentials.
pub fn build_transport(rpc: &RpcConfig) -> Result<HttpTransport, CliError> {
    Ok(match rpc.auth() {
        RpcAuth::None => HttpTransport::new(rpc.url.clone()),
        RpcAuth::Basic { user, password } => HttpTransport::with_auth(rpc.url.clone(), user, password),
        RpcAuth::Cookie(path) => HttpTransport::from_cookie_file(rpc.url.clone(), path)?,
    })
}

/// One usage line per registered command, with its capability flags.
pub fn list_commands<R: CommandRegistryReader + ?Sized>(registry: &R) -> String {
    registry
        .list_commands()
        .into_iter()
        .filter_map(|name| registry.get_command(name))
        .map(|descriptor| format!("{}  [{}]", descriptor.usage_text(), descriptor.flags))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build the command for `method` from string arguments.
pub fn prepare<R: CommandRegistryReader + ?Sized>(
    registry: &R,
    method: &str,
    params: &[String],
) -> Result<AnyCommand, CliError> {
    let args = params.iter().cloned().map(Value::String).collect();
    Ok(new_cmd(registry, method, args)?)
}

/// Strings print raw, `null` prints nothing, anything else as pretty JSON.
pub fn render(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}

/// Execute `cli` against `config` and return what should be printed.
pub async fn run(cli: &Cli, config: &Config) -> Result<String, CliError> {
    let registry = Arc::new(zcashjson::wallet_registry()?);
    if cli.list_commands {
        return Ok(list_commands(registry.as_ref()));
    }
    let method = cli.method.as_deref().ok_or(CliError::MissingMethod)?;
    let cmd = prepare(registry.as_ref(), method, &cli.params)?;

    let transport = Arc::new(build_transport(&config.rpc)?);
    tracing::debug!(endpoint = %config.rpc.url, method, "dispatching");
    let client = Client::new(transport, registry);
    let result = client.send_any(&cmd).await;
    client.shutdown();
    Ok(render(&result?))
}
